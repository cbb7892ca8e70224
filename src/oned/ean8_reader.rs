/*
 * Copyright 2010 ZXing authors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use crate::common::{BitArray, Result};
use crate::oned::one_d_reader::OneDReader;
use crate::oned::upc_ean_reader::{decode_digit, find_guard_pattern, Range, UpcEanReader, L_PATTERNS, MIDDLE_PATTERN};
use crate::{BarcodeFormat, DecodingHintDictionary, RXingResult};

/// EAN-8 is a shorter EAN-13 sibling: four digits, the middle guard, then
/// four more, all in "odd" (L) parity - there is no hidden first digit to
/// recover, unlike EAN-13.
#[derive(Debug, Default)]
pub struct Ean8Reader;

impl OneDReader for Ean8Reader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        self.upc_ean_decode_row(row_number, row)
    }
}

impl UpcEanReader for Ean8Reader {
    fn barcode_format(&self) -> BarcodeFormat {
        BarcodeFormat::Ean8
    }

    fn decode_middle(&self, row: &BitArray, start_range: Range, result: &mut String) -> Result<usize> {
        let mut counters = [0u32; 4];
        let end = row.size();
        let mut row_offset = start_range.end;

        for _ in 0..4 {
            if row_offset >= end {
                break;
            }
            let best_match = decode_digit(row, &mut counters, row_offset, &L_PATTERNS)?;
            result.push(char::from_digit(best_match as u32, 10).unwrap());
            row_offset += counters.iter().sum::<u32>() as usize;
        }

        let middle_range = find_guard_pattern(row, row_offset, true, &MIDDLE_PATTERN)?;
        row_offset = middle_range.end;

        for _ in 0..4 {
            if row_offset >= end {
                break;
            }
            let best_match = decode_digit(row, &mut counters, row_offset, &L_PATTERNS)?;
            result.push(char::from_digit(best_match as u32, 10).unwrap());
            row_offset += counters.iter().sum::<u32>() as usize;
        }

        Ok(row_offset)
    }
}

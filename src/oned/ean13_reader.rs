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
use crate::oned::upc_ean_reader::{decode_digit, find_guard_pattern, Range, UpcEanReader, L_AND_G_PATTERNS, L_PATTERNS, MIDDLE_PATTERN};
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, RXingResult};

/// Which combination of L/G digit parities across the first six digits
/// implies which (hidden) first digit of an EAN-13 payload.
const FIRST_DIGIT_ENCODINGS: [u32; 10] = [0x00, 0x0B, 0x0D, 0x0E, 0x13, 0x19, 0x1C, 0x15, 0x16, 0x1A];

#[derive(Debug, Default)]
pub struct Ean13Reader;

impl OneDReader for Ean13Reader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        self.upc_ean_decode_row(row_number, row)
    }
}

impl UpcEanReader for Ean13Reader {
    fn barcode_format(&self) -> BarcodeFormat {
        BarcodeFormat::Ean13
    }

    fn decode_middle(&self, row: &BitArray, start_range: Range, result: &mut String) -> Result<usize> {
        let mut counters = [0u32; 4];
        let end = row.size();
        let mut row_offset = start_range.end;

        let mut lg_pattern_found = 0u32;
        for x in 0..6 {
            if row_offset >= end {
                break;
            }
            let best_match = decode_digit(row, &mut counters, row_offset, &L_AND_G_PATTERNS)?;
            result.push(char::from_digit((best_match % 10) as u32, 10).unwrap());
            row_offset += counters.iter().sum::<u32>() as usize;
            if best_match >= 10 {
                lg_pattern_found |= 1 << (5 - x);
            }
        }

        let first_digit = FIRST_DIGIT_ENCODINGS
            .iter()
            .position(|&enc| enc == lg_pattern_found)
            .ok_or_else(|| Exceptions::not_found_with("no EAN-13 first-digit parity encoding matched"))?;
        result.insert(0, char::from_digit(first_digit as u32, 10).unwrap());

        let middle_range = find_guard_pattern(row, row_offset, true, &MIDDLE_PATTERN)?;
        row_offset = middle_range.end;

        for _ in 0..6 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_checksum() {
        assert!(!crate::oned::upc_ean_reader::check_standard_upc_ean_checksum(""));
    }

    #[test]
    fn accepts_a_known_good_ean13() {
        assert!(crate::oned::upc_ean_reader::check_standard_upc_ean_checksum("4006381333931"));
    }
}

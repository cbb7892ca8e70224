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
use crate::oned::ean13_reader::Ean13Reader;
use crate::oned::one_d_reader::OneDReader;
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, Point, RXingResult};

/// UPC-A is encoded exactly like EAN-13 with an implicit leading "0"
/// system digit; delegate to an `Ean13Reader` and strip that digit back
/// off, rejecting anything that didn't actually start with it.
#[derive(Debug, Default)]
pub struct UpcAReader {
    ean13: Ean13Reader,
}

impl OneDReader for UpcAReader {
    fn decode_row(&self, row_number: u32, row: &BitArray, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let result = self.ean13.decode_row(row_number, row, hints)?;
        maybe_return_result(result)
    }
}

fn maybe_return_result(result: RXingResult) -> Result<RXingResult> {
    let text = result.text();
    if !text.starts_with('0') {
        return Err(Exceptions::format_with("UPC-A payload must have a leading system digit of 0"));
    }
    let points: Vec<Point> = result.points().to_vec();
    Ok(RXingResult::new(&text[1..], result.raw_bytes().to_vec(), points, BarcodeFormat::UpcA))
}

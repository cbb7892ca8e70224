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
use crate::oned::upc_ean_reader::{check_standard_upc_ean_checksum, decode_digit, find_guard_pattern, Range, UpcEanReader, L_AND_G_PATTERNS};
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, RXingResult};

const MIDDLE_END_PATTERN: [u32; 6] = [1, 1, 1, 1, 1, 1];

/// Parity patterns across UPC-E's six visible digits, keyed by number
/// system (0 or 1), that encode the suppressed check digit.
const NUMSYS_AND_CHECK_DIGIT_PATTERNS: [[u32; 10]; 2] = [
    [0x38, 0x34, 0x32, 0x31, 0x2C, 0x26, 0x23, 0x2A, 0x29, 0x25],
    [0x07, 0x0B, 0x0D, 0x0E, 0x13, 0x19, 0x1C, 0x15, 0x16, 0x1A],
];

/// UPC-E is UPC-A with trailing/leading zeros compressed out; there is no
/// "second half" of digits, just the middle/end guard after six digits.
#[derive(Debug, Default)]
pub struct UpcEReader;

impl OneDReader for UpcEReader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        self.upc_ean_decode_row(row_number, row)
    }
}

impl UpcEanReader for UpcEReader {
    fn barcode_format(&self) -> BarcodeFormat {
        BarcodeFormat::UpcE
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

        determine_num_sys_and_check_digit(result, lg_pattern_found)?;
        Ok(row_offset)
    }

    fn decode_end(&self, row: &BitArray, end_start: usize) -> Result<Range> {
        find_guard_pattern(row, end_start, true, &MIDDLE_END_PATTERN)
    }

    fn check_checksum(&self, s: &str) -> bool {
        match convert_upc_e_to_upc_a(s) {
            Some(upca) => check_standard_upc_ean_checksum(&upca),
            None => false,
        }
    }
}

fn determine_num_sys_and_check_digit(result: &mut String, lg_pattern_found: u32) -> Result<()> {
    for num_sys in 0..2 {
        if let Some(d) = NUMSYS_AND_CHECK_DIGIT_PATTERNS[num_sys].iter().position(|&enc| enc == lg_pattern_found) {
            result.insert(0, char::from_digit(num_sys as u32, 10).unwrap());
            result.push(char::from_digit(d as u32, 10).unwrap());
            return Ok(());
        }
    }
    Err(Exceptions::not_found_with("no UPC-E parity encoding matched"))
}

/// Expands a UPC-E digit string back into its equivalent 12-digit UPC-A.
pub(crate) fn convert_upc_e_to_upc_a(upce: &str) -> Option<String> {
    let digits: Vec<char> = upce.chars().collect();
    if digits.len() != 8 {
        return None;
    }
    let mut result = String::new();
    result.push(digits[0]);
    let last = digits[6];
    match last {
        '0' | '1' | '2' => {
            result.push(digits[1]);
            result.push(digits[2]);
            result.push(last);
            result.push_str("0000");
            result.push(digits[3]);
            result.push(digits[4]);
            result.push(digits[5]);
        }
        '3' => {
            result.push(digits[1]);
            result.push(digits[2]);
            result.push(digits[3]);
            result.push_str("00000");
            result.push(digits[4]);
            result.push(digits[5]);
        }
        '4' => {
            result.push(digits[1]);
            result.push(digits[2]);
            result.push(digits[3]);
            result.push(digits[4]);
            result.push_str("00000");
            result.push(digits[5]);
        }
        _ => {
            result.push(digits[1]);
            result.push(digits[2]);
            result.push(digits[3]);
            result.push(digits[4]);
            result.push(digits[5]);
            result.push_str("0000");
            result.push(last);
        }
    }
    result.push(digits[7]);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_a_known_upc_e_code() {
        // 0425261 + check digit 1 -> 042100005264 per the ZXing reference vector.
        assert_eq!(convert_upc_e_to_upc_a("04252614").as_deref(), Some("042100005264"));
    }
}

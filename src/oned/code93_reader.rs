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
use crate::oned::one_d_reader::{record_pattern, OneDReader};
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, Point, RXingResult};

const ALPHABET: &[u8; 47] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%abcd*";

/// 9 bits per character: the pattern of four bars and four spaces (plus a
/// trailing terminator bar), 1s for "modules present".
const CHARACTER_ENCODINGS: [u32; 47] = [
    0x114, 0x148, 0x144, 0x142, 0x128, 0x124, 0x122, 0x150, 0x112, 0x10A, // 0-9
    0x1A8, 0x1A4, 0x1A2, 0x194, 0x192, 0x18A, 0x168, 0x164, 0x162, 0x134, // A-J
    0x11A, 0x158, 0x14C, 0x146, 0x12C, 0x116, 0x1B4, 0x1B2, 0x1AC, 0x1A6, // K-T
    0x196, 0x19A, 0x16C, 0x166, 0x136, 0x13A, // U-Z
    0x12E, 0x1D4, 0x1D2, 0x1CA, 0x16E, 0x176, 0x1AE, // - . space $ / + %
    0x126, 0x1DA, 0x1D6, 0x132, 0x15E, // a b c d *
];
const ASTERISK_ENCODING: u32 = CHARACTER_ENCODINGS[47 - 1];
const INTEGER_MATH_SHIFT: u32 = 8;

/// Code 93 is Code 39's higher-density successor: every character still
/// spans four bars and four spaces but widths are read as 1-4 module
/// counts rather than a binary narrow/wide split, and two trailing mod-47
/// "C" and "K" checksum characters replace Code 39's single check digit.
#[derive(Debug, Default)]
pub struct Code93Reader;

impl OneDReader for Code93Reader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let (start0, start1) = find_asterisk_pattern(row)?;

        let mut next_start = row.get_next_set(start1);
        let end = row.size();

        let mut counters = [0u32; 6];
        let mut result = String::new();
        let mut last_start = next_start;
        let mut decoded_char;
        loop {
            record_pattern(row, next_start, &mut counters)?;
            let pattern = to_pattern(&counters).ok_or_else(|| Exceptions::not_found_with("no Code 93 character matched"))?;
            decoded_char = pattern_to_char(pattern)?;
            result.push(decoded_char as char);
            last_start = next_start;
            next_start += counters.iter().sum::<u32>() as usize;
            next_start = row.get_next_set(next_start);
            if decoded_char == b'*' {
                break;
            }
        }
        result.pop(); // the trailing asterisk

        if next_start == end || !row.get(next_start) {
            return Err(Exceptions::not_found_with("missing trailing black module after Code 93 payload"));
        }

        if result.len() < 2 {
            return Err(Exceptions::not_found_with("Code 93 payload too short to hold its checksums"));
        }

        check_checksums(&result)?;
        result.truncate(result.len() - 2);

        let text = decode_extended(&result)?;

        let left = (start1 + start0) as f32 / 2.0;
        let right = (next_start + last_start) as f32 / 2.0;
        Ok(RXingResult::new(
            text,
            Vec::new(),
            vec![Point::new(left, row_number as f32), Point::new(right, row_number as f32)],
            BarcodeFormat::Code93,
        ))
    }
}

fn find_asterisk_pattern(row: &BitArray) -> Result<(usize, usize)> {
    let width = row.size();
    let row_offset = row.get_next_set(0);

    let mut counters = [0u32; 6];
    let mut counter_position = 0usize;
    let mut pattern_start = row_offset;
    let mut is_white = false;
    let pattern_length = counters.len();

    let mut i = row_offset;
    while i < width {
        if row.get(i) != is_white {
            counters[counter_position] += 1;
        } else {
            if counter_position == pattern_length - 1 {
                if to_pattern(&counters) == Some(ASTERISK_ENCODING) {
                    return Ok((pattern_start, i));
                }
                pattern_start += (counters[0] + counters[1]) as usize;
                for y in 2..pattern_length {
                    counters[y - 2] = counters[y];
                }
                counters[pattern_length - 2] = 0;
                counters[pattern_length - 1] = 0;
                counter_position -= 1;
            } else {
                counter_position += 1;
            }
            counters[counter_position] = 1;
            is_white = !is_white;
        }
        i += 1;
    }
    Err(Exceptions::not_found_with("no Code 93 start/stop asterisk found"))
}

/// Scales each of the six bar/space counters to a 1-4 module width; `None`
/// if any width falls outside that range once rounded.
fn to_pattern(counters: &[u32; 6]) -> Option<u32> {
    let sum: u32 = counters.iter().sum();
    let mut pattern = 0u32;
    for (i, &counter) in counters.iter().enumerate() {
        let scaled_shifted = ((counter as u64) << INTEGER_MATH_SHIFT) * 9 / sum as u64;
        let mut scaled_unshifted = (scaled_shifted >> INTEGER_MATH_SHIFT) as u32;
        if (scaled_shifted & 0xFF) > 0x7F {
            scaled_unshifted += 1;
        }
        if !(1..=4).contains(&scaled_unshifted) {
            return None;
        }
        if i & 1 == 0 {
            for _ in 0..scaled_unshifted {
                pattern = (pattern << 1) | 0x01;
            }
        } else {
            pattern <<= scaled_unshifted;
        }
    }
    Some(pattern)
}

fn pattern_to_char(pattern: u32) -> Result<u8> {
    CHARACTER_ENCODINGS
        .iter()
        .position(|&enc| enc == pattern)
        .map(|i| ALPHABET[i])
        .ok_or_else(|| Exceptions::not_found_with("pattern does not match any Code 93 character"))
}

fn decode_extended(encoded: &str) -> Result<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if matches!(c, b'a'..=b'd') {
            let next = *bytes.get(i + 1).ok_or_else(|| Exceptions::format_with("truncated Code 93 extended escape"))?;
            let decoded_char = match c {
                b'd' if (b'A'..=b'Z').contains(&next) => next + 32,
                b'a' if (b'A'..=b'Z').contains(&next) => next - 64,
                b'b' if (b'A'..=b'E').contains(&next) => next - 38,
                b'b' if (b'F'..=b'W').contains(&next) => next - 11,
                b'c' if (b'A'..=b'O').contains(&next) => next - 32,
                b'c' if next == b'Z' => b':',
                _ => return Err(Exceptions::format_with("invalid Code 93 extended escape")),
            };
            decoded.push(decoded_char as char);
            i += 2;
        } else {
            decoded.push(c as char);
            i += 1;
        }
    }
    Ok(decoded)
}

fn check_checksums(result: &str) -> Result<()> {
    let length = result.len();
    check_one_checksum(result, length - 2, 20)?;
    check_one_checksum(result, length - 1, 15)?;
    Ok(())
}

fn check_one_checksum(result: &str, check_position: usize, weight_max: u32) -> Result<()> {
    let bytes = result.as_bytes();
    let mut weight = 1u32;
    let mut total = 0u32;
    for i in (0..check_position).rev() {
        let value = ALPHABET.iter().position(|&a| a == bytes[i]).ok_or_else(|| Exceptions::checksum_with("non-alphabet character in Code 93 checksum range"))?;
        total += weight * value as u32;
        weight += 1;
        if weight > weight_max {
            weight = 1;
        }
    }
    if bytes[check_position] != ALPHABET[(total % 47) as usize] {
        return Err(Exceptions::checksum_with("Code 93 check character mismatch"));
    }
    Ok(())
}

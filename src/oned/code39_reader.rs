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

const ALPHABET: &[u8; 44] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. *$/+%";

/// 9 bits per character: narrow bars/spaces are 0, wide are 1, MSB-first
/// across the nine bar/space runs.
const CHARACTER_ENCODINGS: [u32; 44] = [
    0x034, 0x121, 0x061, 0x160, 0x031, 0x130, 0x070, 0x025, 0x124, 0x064, // 0-9
    0x109, 0x049, 0x148, 0x019, 0x118, 0x058, 0x00D, 0x10C, 0x04C, 0x01C, // A-J
    0x103, 0x043, 0x142, 0x013, 0x112, 0x052, 0x007, 0x106, 0x046, 0x016, // K-T
    0x181, 0x0C1, 0x1C0, 0x091, 0x190, 0x0D0, 0x085, 0x184, 0x0C4, 0x094, // U-Z, -, ., space, *
    0x0A8, 0x0A2, 0x08A, 0x02A, // $ / + %
];
const ASTERISK_ENCODING: u32 = 0x094;

/// Code 39: nine-element wide/narrow bar patterns terminated by an
/// asterisk on each side. Optionally checks a mod-43 trailing check digit
/// and/or unpacks the `+`/`$`/`%`/`/`-escaped "full ASCII" extension.
#[derive(Debug, Clone, Copy)]
pub struct Code39Reader {
    using_check_digit: bool,
    extended_mode: bool,
}

impl Default for Code39Reader {
    fn default() -> Self {
        Self { using_check_digit: false, extended_mode: false }
    }
}

impl Code39Reader {
    pub fn new(using_check_digit: bool, extended_mode: bool) -> Self {
        Self { using_check_digit, extended_mode }
    }
}

impl OneDReader for Code39Reader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let mut counters = [0u32; 9];
        let (start0, start1) = find_asterisk_pattern(row, &mut counters)?;

        let mut next_start = row.get_next_set(start1);
        let end = row.size();

        let mut result = String::new();
        let mut last_start = next_start;
        loop {
            record_pattern(row, next_start, &mut counters)?;
            let pattern = to_narrow_wide_pattern(&counters).ok_or_else(|| Exceptions::not_found_with("no Code 39 character matched"))?;
            let decoded_char = pattern_to_char(pattern)?;
            result.push(decoded_char as char);
            last_start = next_start;
            next_start += counters.iter().sum::<u32>() as usize;
            next_start = row.get_next_set(next_start);
            if decoded_char == b'*' {
                break;
            }
        }
        result.pop(); // the trailing asterisk

        let last_pattern_size: u32 = counters.iter().sum();
        let white_space_after_end = next_start as i64 - last_start as i64 - last_pattern_size as i64;
        if next_start != end && (white_space_after_end >> 1) < last_pattern_size as i64 {
            return Err(Exceptions::not_found_with("missing quiet zone after Code 39 payload"));
        }

        if self.using_check_digit {
            let max = result.len() - 1;
            let bytes = result.as_bytes();
            let total: usize = bytes[..max].iter().map(|&c| index_of(c)).sum::<Option<usize>>().ok_or_else(|| Exceptions::format_with("non-alphabet character in Code 39 payload"))?;
            if bytes[max] != ALPHABET[total % 43] {
                return Err(Exceptions::checksum_with("Code 39 check digit mismatch"));
            }
            result.truncate(max);
        }

        if result.is_empty() {
            return Err(Exceptions::not_found_with("empty Code 39 payload"));
        }

        let text = if self.extended_mode { decode_extended(&result)? } else { result };

        let left = (start1 + start0) as f32 / 2.0;
        let right = last_start as f32 + last_pattern_size as f32 / 2.0;
        Ok(RXingResult::new(
            text,
            Vec::new(),
            vec![Point::new(left, row_number as f32), Point::new(right, row_number as f32)],
            BarcodeFormat::Code39,
        ))
    }
}

fn index_of(c: u8) -> Option<usize> {
    ALPHABET.iter().position(|&a| a == c)
}

fn find_asterisk_pattern(row: &BitArray, counters: &mut [u32; 9]) -> Result<(usize, usize)> {
    let width = row.size();
    let row_offset = row.get_next_set(0);

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
                if to_narrow_wide_pattern(counters) == Some(ASTERISK_ENCODING)
                    && row.is_range(pattern_start.saturating_sub((i - pattern_start) >> 1), pattern_start, false)?
                {
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
    Err(Exceptions::not_found_with("no Code 39 start/stop asterisk found"))
}

/// Classifies each of the nine counters as narrow (0) or wide (1),
/// returning `None` when the run of "wide" counters isn't plausibly three
/// evenly-sized bars.
fn to_narrow_wide_pattern(counters: &[u32; 9]) -> Option<u32> {
    let num_counters = counters.len();
    let mut max_narrow_counter = 0u32;
    loop {
        let min_counter = counters.iter().copied().filter(|&c| c > max_narrow_counter).min();
        let Some(min_counter) = min_counter else { return None };
        max_narrow_counter = min_counter;

        let mut wide_counters = 0;
        let mut total_wide_counters_width = 0u32;
        let mut pattern = 0u32;
        for (i, &counter) in counters.iter().enumerate() {
            if counter > max_narrow_counter {
                pattern |= 1 << (num_counters - 1 - i);
                wide_counters += 1;
                total_wide_counters_width += counter;
            }
        }

        if wide_counters == 3 {
            for &counter in counters {
                if counter > max_narrow_counter && (counter << 1) >= total_wide_counters_width {
                    return None;
                }
            }
            return Some(pattern);
        }
        if wide_counters <= 3 {
            return None;
        }
    }
}

fn pattern_to_char(pattern: u32) -> Result<u8> {
    CHARACTER_ENCODINGS
        .iter()
        .position(|&enc| enc == pattern)
        .map(|i| ALPHABET[i])
        .ok_or_else(|| Exceptions::not_found_with("pattern does not match any Code 39 character"))
}

fn decode_extended(encoded: &str) -> Result<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if matches!(c, b'+' | b'$' | b'%' | b'/') {
            let next = *bytes.get(i + 1).ok_or_else(|| Exceptions::format_with("truncated Code 39 extended escape"))?;
            let decoded_char = match c {
                b'+' if (b'A'..=b'Z').contains(&next) => next + 32,
                b'$' if (b'A'..=b'Z').contains(&next) => next - 64,
                b'%' if (b'A'..=b'E').contains(&next) => next - 38,
                b'%' if (b'F'..=b'W').contains(&next) => next - 11,
                b'/' if (b'A'..=b'O').contains(&next) => next - 32,
                b'/' if next == b'Z' => b':',
                _ => return Err(Exceptions::format_with("invalid Code 39 extended escape")),
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

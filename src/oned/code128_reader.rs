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
use crate::oned::one_d_reader::{pattern_match_variance, record_pattern, OneDReader};
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, Point, RXingResult};

const CODE_SHIFT: i32 = 98;

const CODE_CODE_C: i32 = 99;
const CODE_CODE_B: i32 = 100;
const CODE_CODE_A: i32 = 101;

const CODE_FNC_1: i32 = 102;
const CODE_FNC_2: i32 = 97;
const CODE_FNC_3: i32 = 96;
const CODE_FNC_4_A: i32 = 101;
const CODE_FNC_4_B: i32 = 100;

const CODE_START_A: i32 = 103;
const CODE_START_B: i32 = 104;
const CODE_START_C: i32 = 105;
const CODE_STOP: i32 = 106;

const MAX_AVG_VARIANCE: f32 = 0.25;
const MAX_INDIVIDUAL_VARIANCE: f32 = 0.7;

/// Every Code 128 symbol character is six bars-and-spaces wide (the stop
/// character has a trailing seventh bar this table doesn't model, same as
/// the reference decoder). Three interchangeable code sets - A (control +
/// upper), B (printable ASCII), C (digit pairs) - let `codeSet` switches
/// and single-character shifts pack more data per symbol.
const CODE_PATTERNS: [[u32; 6]; 107] = [
    [2, 1, 2, 2, 2, 2],
    [2, 2, 2, 1, 2, 2],
    [2, 2, 2, 2, 2, 1],
    [1, 2, 1, 2, 2, 3],
    [1, 2, 1, 3, 2, 2],
    [1, 3, 1, 2, 2, 2],
    [1, 2, 2, 2, 1, 3],
    [1, 2, 2, 3, 1, 2],
    [1, 3, 2, 2, 1, 2],
    [2, 2, 1, 2, 1, 3],
    [2, 2, 1, 3, 1, 2],
    [2, 3, 1, 2, 1, 2],
    [1, 1, 2, 2, 3, 2],
    [1, 2, 2, 1, 3, 2],
    [1, 2, 2, 2, 3, 1],
    [1, 1, 3, 2, 2, 2],
    [1, 2, 3, 1, 2, 2],
    [1, 2, 3, 2, 2, 1],
    [2, 2, 3, 2, 1, 1],
    [2, 2, 1, 1, 3, 2],
    [2, 2, 1, 2, 3, 1],
    [2, 1, 3, 2, 1, 2],
    [2, 2, 3, 1, 1, 2],
    [3, 1, 2, 1, 3, 1],
    [3, 1, 1, 2, 2, 2],
    [3, 2, 1, 1, 2, 2],
    [3, 2, 1, 2, 2, 1],
    [3, 1, 2, 2, 1, 2],
    [3, 2, 2, 1, 1, 2],
    [3, 2, 2, 2, 1, 1],
    [2, 1, 2, 1, 2, 3],
    [2, 1, 2, 3, 2, 1],
    [2, 3, 2, 1, 2, 1],
    [1, 1, 1, 3, 2, 3],
    [1, 3, 1, 1, 2, 3],
    [1, 3, 1, 3, 2, 1],
    [1, 1, 2, 3, 1, 3],
    [1, 3, 2, 1, 1, 3],
    [1, 3, 2, 3, 1, 1],
    [2, 1, 1, 3, 1, 3],
    [2, 3, 1, 1, 1, 3],
    [2, 3, 1, 3, 1, 1],
    [1, 1, 2, 1, 3, 3],
    [1, 1, 2, 3, 3, 1],
    [1, 3, 2, 1, 3, 1],
    [1, 1, 3, 1, 2, 3],
    [1, 1, 3, 3, 2, 1],
    [1, 3, 3, 1, 2, 1],
    [3, 1, 3, 1, 2, 1],
    [2, 1, 1, 3, 3, 1],
    [2, 3, 1, 1, 3, 1],
    [2, 1, 3, 1, 1, 3],
    [2, 1, 3, 3, 1, 1],
    [2, 1, 3, 1, 3, 1],
    [3, 1, 1, 1, 2, 3],
    [3, 1, 1, 3, 2, 1],
    [3, 3, 1, 1, 2, 1],
    [3, 1, 2, 1, 1, 3],
    [3, 1, 2, 3, 1, 1],
    [3, 3, 2, 1, 1, 1],
    [3, 1, 4, 1, 1, 1],
    [2, 2, 1, 4, 1, 1],
    [4, 3, 1, 1, 1, 1],
    [1, 1, 1, 2, 2, 4],
    [1, 1, 1, 4, 2, 2],
    [1, 2, 1, 1, 2, 4],
    [1, 2, 1, 4, 2, 1],
    [1, 4, 1, 1, 2, 2],
    [1, 4, 1, 2, 2, 1],
    [1, 1, 2, 2, 1, 4],
    [1, 1, 2, 4, 1, 2],
    [1, 2, 2, 1, 1, 4],
    [1, 2, 2, 4, 1, 1],
    [1, 4, 2, 1, 1, 2],
    [1, 4, 2, 2, 1, 1],
    [2, 4, 1, 2, 1, 1],
    [2, 2, 1, 1, 1, 4],
    [4, 1, 3, 1, 1, 1],
    [2, 4, 1, 1, 1, 2],
    [1, 3, 4, 1, 1, 1],
    [1, 1, 1, 2, 4, 2],
    [1, 2, 1, 1, 4, 2],
    [1, 2, 1, 2, 4, 1],
    [1, 1, 4, 2, 1, 2],
    [1, 2, 4, 1, 1, 2],
    [1, 2, 4, 2, 1, 1],
    [4, 1, 1, 2, 1, 2],
    [4, 2, 1, 1, 1, 2],
    [4, 2, 1, 2, 1, 1],
    [2, 1, 2, 1, 4, 1],
    [2, 1, 4, 1, 2, 1],
    [4, 1, 2, 1, 2, 1],
    [1, 1, 1, 1, 4, 3],
    [1, 1, 1, 3, 4, 1],
    [1, 3, 1, 1, 4, 1],
    [1, 1, 4, 1, 1, 3],
    [1, 1, 4, 3, 1, 1],
    [4, 1, 1, 1, 1, 3],
    [4, 1, 1, 3, 1, 1],
    [1, 1, 3, 1, 4, 1],
    [1, 1, 4, 1, 3, 1],
    [3, 1, 1, 1, 4, 1],
    [4, 1, 1, 1, 3, 1],
    [2, 1, 1, 4, 1, 2],
    [2, 1, 1, 2, 1, 4],
    [2, 1, 1, 2, 3, 2],
    [2, 3, 3, 1, 1, 1],
];

#[derive(Debug, Clone, Copy)]
struct StartPattern {
    start: usize,
    end: usize,
    code: i32,
}

#[derive(Debug, Default)]
pub struct Code128Reader;

impl OneDReader for Code128Reader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let start_pattern = find_start_pattern(row)?;
        let mut code_set = match start_pattern.code {
            CODE_START_A => CODE_CODE_A,
            CODE_START_B => CODE_CODE_B,
            CODE_START_C => CODE_CODE_C,
            _ => return Err(Exceptions::format_with("unrecognized Code 128 start pattern")),
        };

        let mut done = false;
        let mut is_next_shifted = false;

        let mut result = String::new();

        let mut last_start = start_pattern.start;
        let mut next_start = start_pattern.end;
        let mut counters = [0u32; 6];

        let mut last_code = 0i32;
        let mut code = 0i32;
        let mut checksum_total = start_pattern.code;
        let mut multiplier = 0i32;
        let mut last_character_was_printable = true;

        while !done {
            let unshift = is_next_shifted;
            is_next_shifted = false;

            last_code = code;
            code = decode_code(row, &mut counters, next_start)?;

            if code != CODE_STOP {
                last_character_was_printable = true;
                multiplier += 1;
                checksum_total += multiplier * code;
            }

            last_start = next_start;
            next_start += counters.iter().sum::<u32>() as usize;

            if matches!(code, CODE_START_A | CODE_START_B | CODE_START_C) {
                return Err(Exceptions::format_with("unexpected Code 128 start pattern mid-stream"));
            }

            match code_set {
                CODE_CODE_A => {
                    if code < 64 {
                        result.push((b' ' + code as u8) as char);
                    } else if code < 96 {
                        result.push((code as u8 - 64) as char);
                    } else {
                        if code != CODE_STOP {
                            last_character_was_printable = false;
                        }
                        match code {
                            CODE_FNC_1 | CODE_FNC_2 | CODE_FNC_3 | CODE_FNC_4_A => {}
                            CODE_SHIFT => {
                                is_next_shifted = true;
                                code_set = CODE_CODE_B;
                            }
                            CODE_CODE_B => code_set = CODE_CODE_B,
                            CODE_CODE_C => code_set = CODE_CODE_C,
                            CODE_STOP => done = true,
                            _ => {}
                        }
                    }
                }
                CODE_CODE_B => {
                    if code < 96 {
                        result.push((b' ' + code as u8) as char);
                    } else {
                        if code != CODE_STOP {
                            last_character_was_printable = false;
                        }
                        match code {
                            CODE_FNC_1 | CODE_FNC_2 | CODE_FNC_3 | CODE_FNC_4_B => {}
                            CODE_SHIFT => {
                                is_next_shifted = true;
                                code_set = CODE_CODE_A;
                            }
                            CODE_CODE_A => code_set = CODE_CODE_A,
                            CODE_CODE_C => code_set = CODE_CODE_C,
                            CODE_STOP => done = true,
                            _ => {}
                        }
                    }
                }
                CODE_CODE_C => {
                    if code < 100 {
                        if code < 10 {
                            result.push('0');
                        }
                        result.push_str(&code.to_string());
                    } else {
                        if code != CODE_STOP {
                            last_character_was_printable = false;
                        }
                        match code {
                            CODE_FNC_1 => {}
                            CODE_CODE_A => code_set = CODE_CODE_A,
                            CODE_CODE_B => code_set = CODE_CODE_B,
                            CODE_STOP => done = true,
                            _ => {}
                        }
                    }
                }
                _ => unreachable!(),
            }

            if unshift {
                code_set = if code_set == CODE_CODE_A { CODE_CODE_B } else { CODE_CODE_A };
            }
        }

        // CODE_STOP's pattern here is fudged to six elements; there's a
        // trailing seventh bar left unread that we just skip past.
        let size = row.size();
        next_start = row.get_next_unset(next_start);
        if !row.is_range(next_start, size.min(next_start + (next_start - last_start) / 2), false)? {
            return Err(Exceptions::not_found_with("missing quiet zone after Code 128 payload"));
        }

        checksum_total -= multiplier * last_code;
        if checksum_total % 103 != last_code {
            return Err(Exceptions::checksum_with("Code 128 checksum mismatch"));
        }

        if result.is_empty() {
            return Err(Exceptions::not_found_with("empty Code 128 payload"));
        }

        if last_character_was_printable {
            let len = result.len();
            if code_set == CODE_CODE_C {
                result.truncate(len - 2);
            } else {
                result.truncate(len - 1);
            }
        }

        let left = (start_pattern.end + start_pattern.start) as f32 / 2.0;
        let right = (next_start + last_start) as f32 / 2.0;
        Ok(RXingResult::new(
            result,
            Vec::new(),
            vec![Point::new(left, row_number as f32), Point::new(right, row_number as f32)],
            BarcodeFormat::Code128,
        ))
    }
}

fn find_start_pattern(row: &BitArray) -> Result<StartPattern> {
    let width = row.size();
    let row_offset = row.get_next_set(0);

    let mut counter_position = 0usize;
    let mut counters = [0u32; 6];
    let mut pattern_start = row_offset;
    let mut is_white = false;
    let pattern_length = counters.len();

    let mut i = row_offset;
    while i < width {
        if row.get(i) != is_white {
            counters[counter_position] += 1;
        } else {
            if counter_position == pattern_length - 1 {
                let max_variance = (MAX_AVG_VARIANCE * (1 << 8) as f32) as i32;
                let mut best_variance = max_variance;
                let mut best_match = -1i32;
                for start_code in CODE_START_A..=CODE_START_C {
                    let variance = pattern_match_variance(&counters, &CODE_PATTERNS[start_code as usize], MAX_INDIVIDUAL_VARIANCE);
                    if variance < best_variance {
                        best_variance = variance;
                        best_match = start_code;
                    }
                }
                if best_match >= 0 {
                    let quiet_start = pattern_start.saturating_sub((i - pattern_start) / 2);
                    if row.is_range(quiet_start, pattern_start, false)? {
                        return Ok(StartPattern { start: pattern_start, end: i, code: best_match });
                    }
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
    Err(Exceptions::not_found_with("no Code 128 start pattern found"))
}

fn decode_code(row: &BitArray, counters: &mut [u32; 6], row_offset: usize) -> Result<i32> {
    record_pattern(row, row_offset, counters)?;
    let max_variance = (MAX_AVG_VARIANCE * (1 << 8) as f32) as i32;
    let mut best_variance = max_variance;
    let mut best_match: Option<usize> = None;
    for (d, pattern) in CODE_PATTERNS.iter().enumerate() {
        let variance = pattern_match_variance(counters, pattern, MAX_INDIVIDUAL_VARIANCE);
        if variance < best_variance {
            best_variance = variance;
            best_match = Some(d);
        }
    }
    best_match.map(|m| m as i32).ok_or_else(|| Exceptions::not_found_with("no Code 128 character matched"))
}

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

use std::cell::Cell;

use crate::common::{BitArray, Result};
use crate::oned::one_d_reader::{pattern_match_variance, record_pattern, OneDReader};
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, Point, RXingResult};

const W: u32 = 3;
const N: u32 = 1;

const DEFAULT_ALLOWED_LENGTHS: [usize; 11] = [48, 44, 24, 20, 18, 16, 14, 12, 10, 8, 6];

const START_PATTERN: [u32; 4] = [N, N, N, N];
/// The end pattern is searched for against a row that's been reversed, so
/// this is the ordinary ITF end pattern read backwards.
const END_PATTERN_REVERSED: [u32; 3] = [N, N, W];

const PATTERNS: [[u32; 5]; 10] = [
    [N, N, W, W, N], // 0
    [W, N, N, N, W], // 1
    [N, W, N, N, W], // 2
    [W, W, N, N, N], // 3
    [N, N, W, N, W], // 4
    [W, N, W, N, N], // 5
    [N, W, W, N, N], // 6
    [N, N, N, W, W], // 7
    [W, N, N, W, N], // 8
    [N, W, N, W, N], // 9
];

const MAX_AVG_VARIANCE: f32 = 0.38;
const MAX_INDIVIDUAL_VARIANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct Range {
    start: usize,
    end: usize,
}

/// Interleaved 2 of 5: every digit pair is encoded across five interleaved
/// black lines (the first digit) and five interleaved white lines (the
/// second digit), each digit a wide/narrow pattern of two wide elements
/// out of five. Unlike the other narrow/wide formats there's no checksum;
/// instead plausibility is judged by the decoded length matching one of a
/// small set of standard ITF payload lengths.
#[derive(Debug, Default)]
pub struct ItfReader {
    narrow_line_width: Cell<i64>,
}

impl OneDReader for ItfReader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let start_range = self.decode_start(row)?;
        let end_range = self.decode_end(row)?;

        let result = decode_middle(row, start_range.end, end_range.start)?;

        let length = result.len();
        if !DEFAULT_ALLOWED_LENGTHS.contains(&length) {
            return Err(Exceptions::format_with("ITF payload length is not one of the standard sizes"));
        }

        Ok(RXingResult::new(
            result,
            Vec::new(),
            vec![
                Point::new(start_range.end as f32, row_number as f32),
                Point::new(end_range.start as f32, row_number as f32),
            ],
            BarcodeFormat::Itf,
        ))
    }
}

impl ItfReader {
    fn decode_start(&self, row: &BitArray) -> Result<Range> {
        let end_start = skip_white_space(row)?;
        let start_pattern = find_guard_pattern(row, end_start, &START_PATTERN)?;

        self.narrow_line_width.set(((start_pattern.end - start_pattern.start) >> 2) as i64);

        validate_quiet_zone(row, start_pattern.start, self.narrow_line_width.get())?;
        Ok(start_pattern)
    }

    fn decode_end(&self, row: &BitArray) -> Result<Range> {
        let mut reversed = row.clone();
        reversed.reverse();

        let end_start = skip_white_space(&reversed)?;
        let mut end_pattern = find_guard_pattern(&reversed, end_start, &END_PATTERN_REVERSED)?;

        validate_quiet_zone(&reversed, end_pattern.start, self.narrow_line_width.get())?;

        let size = row.size();
        let temp = end_pattern.start;
        end_pattern.start = size - end_pattern.end;
        end_pattern.end = size - temp;
        Ok(end_pattern)
    }
}

fn decode_middle(row: &BitArray, payload_start: usize, payload_end: usize) -> Result<String> {
    let mut result = String::new();
    let mut counter_digit_pair = [0u32; 10];
    let mut counter_black = [0u32; 5];
    let mut counter_white = [0u32; 5];

    let mut payload_start = payload_start;
    while payload_start < payload_end {
        record_pattern(row, payload_start, &mut counter_digit_pair)?;
        for k in 0..5 {
            counter_black[k] = counter_digit_pair[k << 1];
            counter_white[k] = counter_digit_pair[(k << 1) + 1];
        }

        let best_black = decode_digit(&counter_black)?;
        result.push(char::from_digit(best_black as u32, 10).unwrap());
        let best_white = decode_digit(&counter_white)?;
        result.push(char::from_digit(best_white as u32, 10).unwrap());

        payload_start += counter_digit_pair.iter().sum::<u32>() as usize;
    }
    Ok(result)
}

fn skip_white_space(row: &BitArray) -> Result<usize> {
    let width = row.size();
    let end_start = row.get_next_set(0);
    if end_start == width {
        return Err(Exceptions::not_found_with("row is entirely white"));
    }
    Ok(end_start)
}

/// Quiet zone must be at least 10x the narrow line width; `row` is assumed
/// reversed already when validating the zone after the end pattern.
fn validate_quiet_zone(row: &BitArray, start_pattern: usize, narrow_line_width: i64) -> Result<()> {
    let mut quiet_count = narrow_line_width * 10;
    let mut i = start_pattern as i64 - 1;
    while quiet_count > 0 && i >= 0 {
        if row.get(i as usize) {
            break;
        }
        quiet_count -= 1;
        i -= 1;
    }
    if quiet_count != 0 {
        return Err(Exceptions::not_found_with("missing ITF quiet zone"));
    }
    Ok(())
}

fn find_guard_pattern(row: &BitArray, row_offset: usize, pattern: &[u32]) -> Result<Range> {
    let pattern_length = pattern.len();
    let mut counters = vec![0u32; pattern_length];
    let width = row.size();
    let mut is_white = false;

    let mut counter_position = 0usize;
    let mut pattern_start = row_offset;
    let mut x = row_offset;
    while x < width {
        if row.get(x) != is_white {
            counters[counter_position] += 1;
        } else {
            if counter_position == pattern_length - 1 {
                if pattern_match_variance(&counters, pattern, MAX_INDIVIDUAL_VARIANCE) < (MAX_AVG_VARIANCE * (1 << 8) as f32) as i32 {
                    return Ok(Range { start: pattern_start, end: x });
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
        x += 1;
    }
    Err(Exceptions::not_found_with("ITF guard pattern not found"))
}

fn decode_digit(counters: &[u32; 5]) -> Result<usize> {
    let max_variance = (MAX_AVG_VARIANCE * (1 << 8) as f32) as i32;
    let mut best_variance = max_variance;
    let mut best_match: Option<usize> = None;
    for (i, pattern) in PATTERNS.iter().enumerate() {
        let variance = pattern_match_variance(counters, pattern, MAX_INDIVIDUAL_VARIANCE);
        if variance < best_variance {
            best_variance = variance;
            best_match = Some(i);
        }
    }
    best_match.ok_or_else(|| Exceptions::not_found_with("no ITF digit pattern matched"))
}

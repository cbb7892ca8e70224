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

pub(crate) const MAX_AVG_VARIANCE: f32 = 0.48;
pub(crate) const MAX_INDIVIDUAL_VARIANCE: f32 = 0.7;

pub(crate) const START_END_PATTERN: [u32; 3] = [1, 1, 1];
pub(crate) const MIDDLE_PATTERN: [u32; 5] = [1, 1, 1, 1, 1];

/// "Odd" (L) parity digit patterns, bar/space run lengths in units.
pub(crate) const L_PATTERNS: [[u32; 4]; 10] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
];

/// `L_PATTERNS` followed by the "even" (G) parity reversal of each.
pub(crate) const L_AND_G_PATTERNS: [[u32; 4]; 20] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
    [1, 1, 2, 3],
    [1, 2, 2, 2],
    [2, 2, 1, 2],
    [1, 1, 4, 1],
    [2, 3, 1, 1],
    [1, 3, 2, 1],
    [4, 1, 1, 1],
    [2, 1, 3, 1],
    [3, 1, 2, 1],
    [2, 1, 1, 3],
];

#[derive(Debug, Clone, Copy)]
pub(crate) struct Range {
    pub start: usize,
    pub end: usize,
}

/// Shared UPC/EAN family logic: locating the 1:1:1 start/end guard bars,
/// decoding digits against the L/G parity pattern tables, and the mod-10
/// checksum every member of the family (except UPC-E, which first expands
/// back to UPC-A) uses.
pub trait UpcEanReader: OneDReader {
    fn barcode_format(&self) -> BarcodeFormat;

    /// Decodes everything between the start guard and the middle/end
    /// guard, returning the row offset the end guard search should begin
    /// from.
    fn decode_middle(&self, row: &BitArray, start_range: Range, result: &mut String) -> Result<usize>;

    fn decode_end(&self, row: &BitArray, end_start: usize) -> Result<Range> {
        find_guard_pattern(row, end_start, false, &START_END_PATTERN)
    }

    fn check_checksum(&self, s: &str) -> bool {
        check_standard_upc_ean_checksum(s)
    }

    fn upc_ean_decode_row(&self, row_number: u32, row: &BitArray) -> Result<RXingResult> {
        let start_guard_range = find_start_guard_pattern(row)?;
        self.decode_row_with_start(row_number, row, start_guard_range)
    }

    fn decode_row_with_start(&self, row_number: u32, row: &BitArray, start_guard_range: Range) -> Result<RXingResult> {
        let mut result = String::new();
        let end_start = self.decode_middle(row, start_guard_range, &mut result)?;
        let end_range = self.decode_end(row, end_start)?;

        let end = end_range.end;
        let quiet_end = end + (end - end_range.start);
        if quiet_end >= row.size() || !row.is_range(end, quiet_end, false)? {
            return Err(Exceptions::not_found_with("missing trailing quiet zone"));
        }

        if result.len() < 8 {
            return Err(Exceptions::format_with("UPC/EAN payload shorter than 8 digits"));
        }
        if !self.check_checksum(&result) {
            return Err(Exceptions::checksum_with("UPC/EAN checksum mismatch"));
        }

        let left = (start_guard_range.end + start_guard_range.start) as f32 / 2.0;
        let right = (end_range.end + end_range.start) as f32 / 2.0;
        Ok(RXingResult::new(
            result,
            Vec::new(),
            vec![Point::new(left, row_number as f32), Point::new(right, row_number as f32)],
            self.barcode_format(),
        ))
    }
}

/// Finds the leading 1:1:1 guard, retrying further along the row until
/// there is a quiet zone at least as wide as the guard before it.
pub(crate) fn find_start_guard_pattern(row: &BitArray) -> Result<Range> {
    let mut next_start = 0;
    loop {
        let start_range = find_guard_pattern(row, next_start, false, &START_END_PATTERN)?;
        let start = start_range.start;
        next_start = start_range.end;
        let quiet_start = start as i64 - (next_start as i64 - start as i64);
        if quiet_start >= 0 && row.is_range(quiet_start as usize, start, false)? {
            return Ok(start_range);
        }
    }
}

pub(crate) fn find_guard_pattern(row: &BitArray, row_offset: usize, white_first: bool, pattern: &[u32]) -> Result<Range> {
    let mut counters = vec![0u32; pattern.len()];
    let pattern_length = pattern.len();
    let width = row.size();
    let mut is_white = white_first;
    let row_offset = if white_first { row.get_next_unset(row_offset) } else { row.get_next_set(row_offset) };
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
    Err(Exceptions::not_found_with("guard pattern not found"))
}

pub(crate) fn decode_digit(row: &BitArray, counters: &mut [u32], row_offset: usize, patterns: &[[u32; 4]]) -> Result<usize> {
    record_pattern(row, row_offset, counters)?;
    let max_variance = (MAX_AVG_VARIANCE * (1 << 8) as f32) as i32;
    let mut best_variance = max_variance;
    let mut best_match: Option<usize> = None;
    for (i, pattern) in patterns.iter().enumerate() {
        let variance = pattern_match_variance(counters, pattern, MAX_INDIVIDUAL_VARIANCE);
        if variance < best_variance {
            best_variance = variance;
            best_match = Some(i);
        }
    }
    best_match.ok_or_else(|| Exceptions::not_found_with("no digit pattern matched"))
}

/// The standard UPC/EAN weighted mod-10 checksum, over every digit
/// including the check digit itself.
pub(crate) fn check_standard_upc_ean_checksum(s: &str) -> bool {
    let digits: Vec<i32> = s.chars().map(|c| c.to_digit(10).map(|d| d as i32).unwrap_or(-1)).collect();
    if digits.is_empty() || digits.iter().any(|&d| !(0..=9).contains(&d)) {
        return false;
    }
    let length = digits.len();
    let mut sum = 0i32;
    let mut i = length as i64 - 2;
    while i >= 0 {
        sum += digits[i as usize];
        i -= 2;
    }
    sum *= 3;
    let mut i = length as i64 - 1;
    while i >= 0 {
        sum += digits[i as usize];
        i -= 2;
    }
    sum % 10 == 0
}

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

use crate::common::{BitArray, Binarizer, Result};
use crate::decode_hints::dictionary_try_harder;
use crate::reader::ImmutableReader;
use crate::{BinaryBitmap, DecodingHintDictionary, Exceptions, Point, RXingResult};

const INTEGER_MATH_SHIFT: u32 = 8;

/// Shared scan harness for every 1D symbology: decode a handful of rows
/// spaced out from the image's vertical middle, trying each row both as
/// read and reversed (to catch upside-down barcodes), widening the search
/// to every row when `TRY_HARDER` is set.
pub trait OneDReader: std::fmt::Debug {
    fn decode_row(&self, row_number: u32, row: &BitArray, hints: &DecodingHintDictionary) -> Result<RXingResult>;

    fn one_d_decode_with_hints(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        self.do_decode(image, hints).or_else(|e| {
            let try_harder = dictionary_try_harder(hints);
            if try_harder && image.is_rotate_supported() {
                let rotated = image.rotate_counter_clockwise()?;
                let height = rotated.get_height();
                let result = self.do_decode(&rotated, hints)?;
                let points: Vec<Point> = result
                    .points()
                    .iter()
                    .map(|p| Point::new(height as f32 - p.y - 1.0, p.x))
                    .collect();
                Ok(RXingResult::new(result.text().to_owned(), result.raw_bytes().to_vec(), points, result.format()))
            } else {
                Err(e)
            }
        })
    }

    fn do_decode(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let width = image.get_width();
        let height = image.get_height();

        let middle = height >> 1;
        let try_harder = dictionary_try_harder(hints);
        let row_step = 1.max(height >> if try_harder { 8 } else { 5 });
        let max_lines = if try_harder { height } else { 15 };

        for x in 0..max_lines {
            let row_steps_above_or_below = (x + 1) >> 1;
            let is_above = x & 0x01 == 0;
            let row_number = middle as i64
                + row_step as i64 * if is_above { row_steps_above_or_below as i64 } else { -(row_steps_above_or_below as i64) };
            if row_number < 0 || row_number as usize >= height {
                break;
            }
            let row_number = row_number as usize;

            let Ok(mut row) = image.get_black_row(row_number) else { continue };

            for attempt in 0..2 {
                if attempt == 1 {
                    row.reverse();
                }
                if let Ok(mut result) = self.decode_row(row_number as u32, &row, hints) {
                    if attempt == 1 {
                        let points: Vec<Point> = result
                            .points()
                            .iter()
                            .enumerate()
                            .map(|(i, p)| if i < 2 { Point::new(width as f32 - p.x - 1.0, p.y) } else { *p })
                            .collect();
                        result = RXingResult::new(result.text().to_owned(), result.raw_bytes().to_vec(), points, result.format());
                    }
                    return Ok(result);
                }
            }
        }
        Err(Exceptions::not_found_with("no 1D barcode found"))
    }
}

impl<T: OneDReader> ImmutableReader for T {
    fn decode_with_hints(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        self.one_d_decode_with_hints(image, hints)
    }
}

/// Scores how well `counters` (alternating bar/space run lengths) matches
/// `pattern` once both are scaled to the same total width; `i32::MAX` means
/// "does not match", smaller is a tighter fit.
pub fn pattern_match_variance(counters: &[u32], pattern: &[u32], max_individual_variance: f32) -> i32 {
    let num_counters = counters.len();
    let total: u32 = counters.iter().sum();
    let pattern_length: u32 = pattern.iter().sum();
    if total < pattern_length {
        return i32::MAX;
    }

    let unit_bar_width = ((total as i64) << INTEGER_MATH_SHIFT) / pattern_length as i64;
    let max_individual_variance = ((max_individual_variance * (1 << INTEGER_MATH_SHIFT) as f32) as i64 * unit_bar_width) >> INTEGER_MATH_SHIFT;

    let mut total_variance: i64 = 0;
    for x in 0..num_counters {
        let counter = (counters[x] as i64) << INTEGER_MATH_SHIFT;
        let scaled_pattern = pattern[x] as i64 * unit_bar_width;
        let variance = (counter - scaled_pattern).abs();
        if variance > max_individual_variance {
            return i32::MAX;
        }
        total_variance += variance;
    }
    (total_variance / total as i64) as i32
}

/// Walks `row` from `start`, filling `counters` with alternating run
/// lengths of the color starting at `start` until every counter slot has
/// been used (or the row runs out on the very last one).
pub fn record_pattern(row: &BitArray, start: usize, counters: &mut [u32]) -> Result<()> {
    let num_counters = counters.len();
    counters.fill(0);
    let end = row.size();
    if start >= end {
        return Err(Exceptions::not_found_with("record_pattern: start past end of row"));
    }
    let mut is_white = !row.get(start);
    let mut counter_position = 0usize;
    let mut i = start;
    while i < end {
        if row.get(i) != is_white {
            counters[counter_position] += 1;
        } else {
            counter_position += 1;
            if counter_position == num_counters {
                break;
            }
            counters[counter_position] = 1;
            is_white = !is_white;
        }
        i += 1;
    }
    if !(counter_position == num_counters || (counter_position == num_counters - 1 && i == end)) {
        return Err(Exceptions::not_found_with("record_pattern: ran out of row before filling pattern"));
    }
    Ok(())
}

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
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, Point, RXingResult};

const ALPHABET: &[u8; 20] = b"0123456789-$:/.+ABCD";

/// Encodings of characters as patterns of wide/narrow bars and spaces: the
/// 7 least-significant bits correspond to bar/space pattern, 1 = wide.
const CHARACTER_ENCODINGS: [u32; 20] = [
    0x003, 0x006, 0x009, 0x060, 0x012, 0x042, 0x021, 0x024, 0x030, 0x048, // 0-9
    0x00c, 0x018, 0x045, 0x051, 0x054, 0x015, 0x01A, 0x029, 0x00B, 0x00E, // -$:/.+ABCD
];

const MIN_CHARACTER_LENGTH: usize = 3;
const STARTEND_ENCODING: &[u8] = b"ABCD";

const MAX_ACCEPTABLE: i64 = (256.0 * 2.0) as i64;
const PADDING: i64 = (256.0 * 1.5) as i64;
const INTEGER_MATH_SHIFT: u32 = 8;

/// Codabar has no fixed-width start/stop pattern: any of its four "ABCD"
/// characters can serve as a guard, so decoding walks the row looking for
/// one rather than using the shared `UpcEanReader`/`find_guard_pattern`
/// machinery the other narrow/wide formats share.
#[derive(Debug, Default)]
pub struct CodabarReader;

impl OneDReader for CodabarReader {
    fn decode_row(&self, row_number: u32, row: &BitArray, _hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let mut counters = set_counters(row)?;

        let start_offset = find_start_pattern(&counters)?;
        let mut next_start = start_offset;

        let mut result: Vec<u8> = Vec::new();
        loop {
            let char_offset = to_narrow_wide_pattern(&counters, next_start).ok_or_else(|| Exceptions::not_found_with("no Codabar character matched"))?;
            result.push(char_offset as u8);
            next_start += 8;
            if result.len() > 1 && STARTEND_ENCODING.contains(&ALPHABET[char_offset]) {
                break;
            }
            if next_start >= counters.len() {
                break;
            }
        }

        let trailing_whitespace = counters[next_start - 1] as i64;
        let mut last_pattern_size = 0i64;
        for i in next_start.saturating_sub(8)..next_start.saturating_sub(1) {
            last_pattern_size += counters[i] as i64;
        }

        if next_start < counters.len() && trailing_whitespace < last_pattern_size / 2 {
            return Err(Exceptions::not_found_with("missing quiet zone after Codabar payload"));
        }

        validate_pattern(&mut counters, &result, start_offset)?;

        let text: Vec<u8> = result.iter().map(|&offset| ALPHABET[offset as usize]).collect();
        let start_char = text[0];
        if !STARTEND_ENCODING.contains(&start_char) {
            return Err(Exceptions::not_found_with("Codabar payload missing start character"));
        }
        let end_char = *text.last().unwrap();
        if !STARTEND_ENCODING.contains(&end_char) {
            return Err(Exceptions::not_found_with("Codabar payload missing end character"));
        }

        if text.len() <= MIN_CHARACTER_LENGTH {
            return Err(Exceptions::not_found_with("Codabar payload too short to be plausible"));
        }

        let payload = String::from_utf8(text[1..text.len() - 1].to_vec()).map_err(|_| Exceptions::format_with("non-UTF8 Codabar payload"))?;

        let mut running_count = 0u32;
        for &c in &counters[..start_offset] {
            running_count += c;
        }
        let left = running_count as f32;
        for &c in &counters[start_offset..next_start - 1] {
            running_count += c;
        }
        let right = running_count as f32;

        Ok(RXingResult::new(
            payload,
            Vec::new(),
            vec![Point::new(left, row_number as f32), Point::new(right, row_number as f32)],
            BarcodeFormat::Codabar,
        ))
    }
}

/// Records the size of every run of white and black pixels, starting with
/// white, growing the counter list as needed (Codabar characters have no
/// bound on how many there may be in a row).
fn set_counters(row: &BitArray) -> Result<Vec<u32>> {
    let mut counters = Vec::new();
    let end = row.size();
    let mut i = row.get_next_unset(0);
    if i >= end {
        return Err(Exceptions::not_found_with("row is entirely black"));
    }
    let mut is_white = true;
    let mut count = 0u32;
    while i < end {
        if row.get(i) != is_white {
            count += 1;
        } else {
            counters.push(count);
            count = 1;
            is_white = !is_white;
        }
        i += 1;
    }
    counters.push(count);
    Ok(counters)
}

fn find_start_pattern(counters: &[u32]) -> Result<usize> {
    let mut i = 1;
    while i < counters.len() {
        if let Some(char_offset) = to_narrow_wide_pattern(counters, i) {
            if STARTEND_ENCODING.contains(&ALPHABET[char_offset]) {
                let pattern_size: u32 = counters[i..i + 7].iter().sum();
                if i == 1 || counters[i - 1] >= pattern_size / 2 {
                    return Ok(i);
                }
            }
        }
        i += 2;
    }
    Err(Exceptions::not_found_with("no Codabar start pattern found"))
}

fn to_narrow_wide_pattern(counters: &[u32], position: usize) -> Option<usize> {
    let end = position + 7;
    if end >= counters.len() {
        return None;
    }

    let mut max_bar = 0u32;
    let mut min_bar = u32::MAX;
    let mut j = position;
    while j < end {
        let c = counters[j];
        min_bar = min_bar.min(c);
        max_bar = max_bar.max(c);
        j += 2;
    }
    let threshold_bar = (min_bar + max_bar) / 2;

    let mut max_space = 0u32;
    let mut min_space = u32::MAX;
    let mut j = position + 1;
    while j < end {
        let c = counters[j];
        min_space = min_space.min(c);
        max_space = max_space.max(c);
        j += 2;
    }
    let threshold_space = (min_space + max_space) / 2;

    let mut bitmask = 1u32 << 7;
    let mut pattern = 0u32;
    for i in 0..7 {
        let threshold = if i & 1 == 0 { threshold_bar } else { threshold_space };
        bitmask >>= 1;
        if counters[position + i] > threshold {
            pattern |= bitmask;
        }
    }

    CHARACTER_ENCODINGS.iter().position(|&enc| enc == pattern)
}

/// Checks that every bar/space run across the decoded characters falls
/// within a plausible range relative to the average short/long stripe
/// size, rejecting a match that's merely a coincidental pattern hit.
fn validate_pattern(counters: &mut [u32], result: &[u8], start: usize) -> Result<()> {
    let mut sizes = [0i64; 4];
    let mut counts = [0i64; 4];
    let end = result.len() - 1;

    let mut pos = start;
    for (i, &offset) in result.iter().enumerate() {
        let mut pattern = CHARACTER_ENCODINGS[offset as usize];
        for j in (0..=6).rev() {
            let category = (j & 1) + (pattern & 1) as usize * 2;
            sizes[category] += counters[pos + j] as i64;
            counts[category] += 1;
            pattern >>= 1;
        }
        if i >= end {
            break;
        }
        pos += 8;
    }

    let mut maxes = [0i64; 4];
    let mut mins = [0i64; 4];
    for i in 0..2 {
        mins[i] = 0;
        mins[i + 2] = ((sizes[i] << INTEGER_MATH_SHIFT) / counts[i] + (sizes[i + 2] << INTEGER_MATH_SHIFT) / counts[i + 2]) >> 1;
        maxes[i] = mins[i + 2];
        maxes[i + 2] = (sizes[i + 2] * MAX_ACCEPTABLE + PADDING) / counts[i + 2];
    }

    let mut pos = start;
    for (i, &offset) in result.iter().enumerate() {
        let mut pattern = CHARACTER_ENCODINGS[offset as usize];
        for j in (0..=6).rev() {
            let category = (j & 1) + (pattern & 1) as usize * 2;
            let size = (counters[pos + j] as i64) << INTEGER_MATH_SHIFT;
            if size < mins[category] || size > maxes[category] {
                return Err(Exceptions::not_found_with("Codabar stripe outside plausible range"));
            }
            pattern >>= 1;
        }
        if i >= end {
            break;
        }
        pos += 8;
    }
    Ok(())
}

/*
 * Copyright 2007 ZXing authors
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

use crate::common::Result;
use crate::Exceptions;

/// Finds the luminance bucket that best separates a histogram's two major
/// peaks (background and foreground). Shared by `GlobalHistogramBinarizer`
/// and `HybridBinarizer`'s low-contrast tile fallback.
pub fn estimate_black_point(buckets: &[u32]) -> Result<usize> {
    let num_buckets = buckets.len();

    let mut first_peak = 0usize;
    let mut first_peak_size = 0u32;
    for (i, &count) in buckets.iter().enumerate() {
        if count > first_peak_size {
            first_peak = i;
            first_peak_size = count;
        }
    }

    let mut second_peak = 0usize;
    let mut second_peak_score = 0i64;
    for (i, &count) in buckets.iter().enumerate() {
        let distance = i as i64 - first_peak as i64;
        let score = distance * distance * count as i64;
        if score > second_peak_score {
            second_peak = i;
            second_peak_score = score;
        }
    }

    let (first_peak, second_peak) = if first_peak > second_peak {
        (second_peak, first_peak)
    } else {
        (first_peak, second_peak)
    };

    if second_peak - first_peak <= num_buckets / 16 {
        return Err(Exceptions::not_found_with(
            "too little dynamic range in luminance histogram",
        ));
    }

    let mut best_valley = second_peak - 1;
    let mut best_valley_score = -1i64;
    for i in (first_peak + 1)..second_peak {
        let from_first = (i - first_peak) as i64;
        let score = from_first
            * from_first
            * (second_peak - i) as i64
            * (first_peak_size as i64 - buckets[i] as i64);
        if score > best_valley_score {
            best_valley = i;
            best_valley_score = score;
        }
    }

    Ok(best_valley)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_valley_between_two_spikes() {
        let mut buckets = vec![0u32; 32];
        buckets[2] = 1000;
        buckets[28] = 1000;
        let valley = estimate_black_point(&buckets).unwrap();
        assert!(valley > 2 && valley < 28);
    }

    #[test]
    fn rejects_a_flat_histogram() {
        let buckets = vec![10u32; 32];
        assert!(estimate_black_point(&buckets).is_err());
    }
}

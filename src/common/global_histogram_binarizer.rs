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

use crate::common::black_point_estimator::estimate_black_point;
use crate::common::{BitArray, BitMatrix, Binarizer, Result};
use crate::LuminanceSource;

pub const LUMINANCE_BITS: u32 = 5;
pub const LUMINANCE_SHIFT: u32 = 8 - LUMINANCE_BITS;
pub const LUMINANCE_BUCKETS: usize = 1 << LUMINANCE_BITS;

/// Single-threshold binarizer: one black point for the whole row (or, for
/// the whole-image matrix, one black point sampled from a handful of
/// representative rows).
#[derive(Debug)]
pub struct GlobalHistogramBinarizer<L: LuminanceSource> {
    source: L,
}

impl<L: LuminanceSource> GlobalHistogramBinarizer<L> {
    pub fn new(source: L) -> Self {
        Self { source }
    }

    fn histogram(row: &[u8]) -> [u32; LUMINANCE_BUCKETS] {
        let mut buckets = [0u32; LUMINANCE_BUCKETS];
        for &pixel in row {
            buckets[(pixel >> LUMINANCE_SHIFT) as usize] += 1;
        }
        buckets
    }
}

impl<L: LuminanceSource> Binarizer for GlobalHistogramBinarizer<L> {
    fn get_luminance_source(&self) -> &dyn LuminanceSource {
        &self.source
    }

    fn get_black_row(&self, y: usize) -> Result<BitArray> {
        let row = self.source.get_row(y);
        let width = row.len();
        let buckets = Self::histogram(&row);
        let black_point = estimate_black_point(&buckets)? as u32;
        let threshold = (black_point << LUMINANCE_SHIFT) as i32;

        let mut bits = BitArray::with_size(width);
        if width < 3 {
            for (x, &pixel) in row.iter().enumerate() {
                if (pixel as i32) < threshold {
                    bits.set(x);
                }
            }
            return Ok(bits);
        }

        let mut left = row[0] as i32;
        let mut center = row[1] as i32;
        for x in 1..(width - 1) {
            let right = row[x + 1] as i32;
            let luma = ((center * 4) - left - right) >> 1;
            if luma < threshold {
                bits.set(x);
            }
            left = center;
            center = right;
        }
        Ok(bits)
    }

    fn get_black_matrix(&self) -> Result<BitMatrix> {
        let width = self.source.get_width();
        let height = self.source.get_height();
        let mut buckets = [0u32; LUMINANCE_BUCKETS];

        for k in 1..=4usize {
            let y = (height * k) / 5;
            if y >= height {
                continue;
            }
            let row = self.source.get_row(y);
            let left = width / 5;
            let right = (width * 4) / 5;
            for &pixel in &row[left.min(width)..right.min(width)] {
                buckets[(pixel >> LUMINANCE_SHIFT) as usize] += 1;
            }
        }

        let black_point = estimate_black_point(&buckets)? as u32;
        let threshold = (black_point << LUMINANCE_SHIFT) as i32;

        let mut matrix = BitMatrix::new(width as u32, height as u32)?;
        let luminances = self.source.get_matrix();
        for y in 0..height {
            let row_offset = y * width;
            for x in 0..width {
                if (luminances[row_offset + x] as i32) < threshold {
                    matrix.set(x as u32, y as u32);
                }
            }
        }
        Ok(matrix)
    }

    fn create_binarizer(&self, source: Box<dyn LuminanceSource>) -> Box<dyn Binarizer> {
        Box::new(GlobalHistogramBinarizer::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Luma8LuminanceSource;

    fn checkerboard(width: usize, height: usize, cell: usize) -> Vec<u8> {
        let mut data = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                let on = ((x / cell) + (y / cell)) % 2 == 0;
                data[y * width + x] = if on { 230 } else { 20 };
            }
        }
        data
    }

    #[test]
    fn thresholds_a_high_contrast_image() {
        let data = checkerboard(50, 50, 5);
        let source = Luma8LuminanceSource::new(data, 50, 50);
        let binarizer = GlobalHistogramBinarizer::new(source);
        let matrix = binarizer.get_black_matrix().unwrap();
        assert!(matrix.get(0, 0) || matrix.get(6, 0));
    }

    #[test]
    fn flat_image_has_no_dynamic_range() {
        let data = vec![128u8; 50 * 50];
        let source = Luma8LuminanceSource::new(data, 50, 50);
        let binarizer = GlobalHistogramBinarizer::new(source);
        assert!(binarizer.get_black_matrix().is_err());
    }
}

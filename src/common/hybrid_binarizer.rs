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

use crate::common::{BitArray, BitMatrix, Binarizer, GlobalHistogramBinarizer, Result};
use crate::LuminanceSource;

const BLOCK_SIZE_POWER: u32 = 3;
const BLOCK_SIZE: usize = 1 << BLOCK_SIZE_POWER; // 8
const MIN_DYNAMIC_RANGE: i32 = 24;
const MIN_DIMENSION_TO_TILE: usize = 40;

/// Tile-adaptive binarizer: falls back to `GlobalHistogramBinarizer` for
/// per-row queries and for images smaller than 40x40, and otherwise derives
/// a local threshold per 8x8 tile, smoothed over a 5x5 tile neighborhood.
#[derive(Debug)]
pub struct HybridBinarizer<L: LuminanceSource> {
    global: GlobalHistogramBinarizer<L>,
}

impl<L: LuminanceSource> HybridBinarizer<L> {
    pub fn new(source: L) -> Self {
        Self {
            global: GlobalHistogramBinarizer::new(source),
        }
    }
}

impl<L: LuminanceSource> Binarizer for HybridBinarizer<L> {
    fn get_luminance_source(&self) -> &dyn LuminanceSource {
        self.global.get_luminance_source()
    }

    fn get_black_row(&self, y: usize) -> Result<BitArray> {
        self.global.get_black_row(y)
    }

    fn get_black_matrix(&self) -> Result<BitMatrix> {
        let source = self.global.get_luminance_source();
        let width = source.get_width();
        let height = source.get_height();

        if width < MIN_DIMENSION_TO_TILE || height < MIN_DIMENSION_TO_TILE {
            return self.global.get_black_matrix();
        }

        let luminances = source.get_matrix();
        let sub_width = width >> BLOCK_SIZE_POWER;
        let sub_width = if (sub_width << BLOCK_SIZE_POWER) != width { sub_width + 1 } else { sub_width };
        let sub_height = height >> BLOCK_SIZE_POWER;
        let sub_height = if (sub_height << BLOCK_SIZE_POWER) != height { sub_height + 1 } else { sub_height };

        let black_points = calculate_black_points(&luminances, sub_width, sub_height, width, height);
        let mut matrix = BitMatrix::new(width as u32, height as u32)?;
        threshold_block(&luminances, sub_width, sub_height, width, height, &black_points, &mut matrix);
        Ok(matrix)
    }

    fn create_binarizer(&self, source: Box<dyn LuminanceSource>) -> Box<dyn Binarizer> {
        Box::new(HybridBinarizer::new(source))
    }
}

fn tile_origin(sub: usize, sub_count: usize, dimension: usize) -> usize {
    let base = sub << BLOCK_SIZE_POWER;
    if sub == sub_count - 1 {
        dimension - BLOCK_SIZE
    } else {
        base
    }
}

fn calculate_black_points(
    luminances: &[u8],
    sub_width: usize,
    sub_height: usize,
    width: usize,
    height: usize,
) -> Vec<Vec<i32>> {
    let mut black_points = vec![vec![0i32; sub_width]; sub_height];

    for y in 0..sub_height {
        let y_origin = tile_origin(y, sub_height, height);
        for x in 0..sub_width {
            let x_origin = tile_origin(x, sub_width, width);
            let mut sum = 0i32;
            let mut min = 255i32;
            let mut max = 0i32;

            for yy in 0..BLOCK_SIZE {
                let row_offset = (y_origin + yy) * width + x_origin;
                for xx in 0..BLOCK_SIZE {
                    let pixel = luminances[row_offset + xx] as i32;
                    sum += pixel;
                    min = min.min(pixel);
                    max = max.max(pixel);
                }
                if max - min > MIN_DYNAMIC_RANGE {
                    // fast path: dynamic range is already established, so just
                    // accept a looser sum over the remaining rows.
                    for yy2 in (yy + 1)..BLOCK_SIZE {
                        let row_offset = (y_origin + yy2) * width + x_origin;
                        for xx in 0..BLOCK_SIZE {
                            sum += luminances[row_offset + xx] as i32;
                        }
                    }
                    break;
                }
            }

            let mut average = sum >> (2 * BLOCK_SIZE_POWER);
            if max - min <= MIN_DYNAMIC_RANGE {
                average = min / 2;
                if y > 0 && x > 0 {
                    let top = black_points[y - 1][x];
                    let top_left = black_points[y - 1][x - 1];
                    let left = black_points[y][x - 1];
                    let neighbor_estimate = (top + 2 * left + top_left) >> 2;
                    if min < neighbor_estimate {
                        average = neighbor_estimate;
                    }
                }
            }
            black_points[y][x] = average;
        }
    }

    black_points
}

fn threshold_block(
    luminances: &[u8],
    sub_width: usize,
    sub_height: usize,
    width: usize,
    height: usize,
    black_points: &[Vec<i32>],
    matrix: &mut BitMatrix,
) {
    for y in 0..sub_height {
        let y_origin = tile_origin(y, sub_height, height);
        for x in 0..sub_width {
            let x_origin = tile_origin(x, sub_width, width);

            let y_min = y.saturating_sub(2);
            let y_max = (y + 2).min(sub_height - 1);
            let x_min = x.saturating_sub(2);
            let x_max = (x + 2).min(sub_width - 1);

            let mut sum = 0i32;
            for yy in y_min..=y_max {
                for xx in x_min..=x_max {
                    sum += black_points[yy][xx];
                }
            }
            let count = ((y_max - y_min + 1) * (x_max - x_min + 1)) as i32;
            let average = sum / count;

            for yy in 0..BLOCK_SIZE {
                let row_offset = (y_origin + yy) * width + x_origin;
                for xx in 0..BLOCK_SIZE {
                    let pixel = luminances[row_offset + xx] as i32;
                    if pixel <= average {
                        matrix.set((x_origin + xx) as u32, (y_origin + yy) as u32);
                    }
                }
            }
        }
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
                data[y * width + x] = if on { 240 } else { 10 };
            }
        }
        data
    }

    #[test]
    fn agrees_with_global_in_well_lit_high_contrast_images() {
        let data = checkerboard(64, 64, 8);
        let source = Luma8LuminanceSource::new(data.clone(), 64, 64);
        let global = GlobalHistogramBinarizer::new(source.clone());
        let source2 = Luma8LuminanceSource::new(data, 64, 64);
        let hybrid = HybridBinarizer::new(source2);

        let gm = global.get_black_matrix().unwrap();
        let hm = hybrid.get_black_matrix().unwrap();
        let mut agree = 0;
        for y in 0..64u32 {
            for x in 0..64u32 {
                if gm.get(x, y) == hm.get(x, y) {
                    agree += 1;
                }
            }
        }
        assert!(agree as f32 / (64.0 * 64.0) > 0.9);
    }

    #[test]
    fn small_images_fall_back_to_global() {
        let data = checkerboard(20, 20, 4);
        let source = Luma8LuminanceSource::new(data, 20, 20);
        let hybrid = HybridBinarizer::new(source);
        assert!(hybrid.get_black_matrix().is_ok());
    }
}

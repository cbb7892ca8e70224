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

use crate::common::{BitMatrix, PerspectiveTransform, Result};
use crate::Exceptions;

/// Samples a target `dimension_x` x `dimension_y` grid out of `image`
/// through `transform`, one cell center at a time. A coordinate landing
/// exactly at -1 or at `width`/`height` is nudged back into the image;
/// anything further out fails.
pub trait GridSampler {
    fn sample_grid(
        &self,
        image: &BitMatrix,
        dimension_x: u32,
        dimension_y: u32,
        transform: &PerspectiveTransform,
    ) -> Result<BitMatrix>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGridSampler;

impl GridSampler for DefaultGridSampler {
    fn sample_grid(
        &self,
        image: &BitMatrix,
        dimension_x: u32,
        dimension_y: u32,
        transform: &PerspectiveTransform,
    ) -> Result<BitMatrix> {
        if dimension_x == 0 || dimension_y == 0 {
            return Err(Exceptions::not_found_with("sample dimension must be positive"));
        }

        let mut points = vec![0f32; (2 * dimension_x) as usize];
        let mut bits = BitMatrix::new(dimension_x, dimension_y)?;

        for y in 0..dimension_y {
            let y_value = y as f32 + 0.5;
            for (i, slot) in points.chunks_mut(2).enumerate() {
                slot[0] = i as f32 + 0.5;
                slot[1] = y_value;
            }
            transform.transform_points(&mut points);
            check_and_nudge_points(image, &mut points)?;

            for x in 0..dimension_x {
                let px = points[(x * 2) as usize];
                let py = points[(x * 2 + 1) as usize];
                if image.get(px as u32, py as u32) {
                    bits.set(x, y);
                }
            }
        }

        Ok(bits)
    }
}

pub fn sample_grid(
    image: &BitMatrix,
    dimension_x: u32,
    dimension_y: u32,
    transform: &PerspectiveTransform,
) -> Result<BitMatrix> {
    DefaultGridSampler.sample_grid(image, dimension_x, dimension_y, transform)
}

/// Clamps any transformed point that lands exactly on the boundary back
/// into the image; fails for anything further outside.
fn check_and_nudge_points(image: &BitMatrix, points: &mut [f32]) -> Result<()> {
    let width = image.width() as i32;
    let height = image.height() as i32;

    let mut offset = 0;
    while offset + 1 < points.len() {
        let x = points[offset] as i32;
        let y = points[offset + 1] as i32;
        if x < -1 || x > width || y < -1 || y > height {
            return Err(Exceptions::not_found_with(
                "transformed point is outside the image",
            ));
        }
        if x == -1 {
            points[offset] = 0.0;
        } else if x == width {
            points[offset] = (width - 1) as f32;
        }
        if y == -1 {
            points[offset + 1] = 0.0;
        } else if y == height {
            points[offset + 1] = (height - 1) as f32;
        }
        offset += 2;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_an_identity_transform_back_to_the_source() {
        let mut image = BitMatrix::new(4, 4).unwrap();
        image.set(0, 0);
        image.set(3, 3);
        let transform = PerspectiveTransform::square_to_quadrilateral(0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0);
        let sampled = sample_grid(&image, 4, 4, &transform).unwrap();
        assert!(sampled.get(0, 0));
        assert!(sampled.get(3, 3));
        assert!(!sampled.get(1, 1));
    }

    #[test]
    fn rejects_a_transform_that_samples_outside_the_image() {
        let image = BitMatrix::new(4, 4).unwrap();
        let transform =
            PerspectiveTransform::square_to_quadrilateral(0.0, 0.0, 40.0, 0.0, 40.0, 40.0, 0.0, 40.0);
        assert!(sample_grid(&image, 4, 4, &transform).is_err());
    }
}

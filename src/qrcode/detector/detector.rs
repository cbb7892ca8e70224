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

use crate::common::{sample_grid, BitMatrix, DetectorRXingResult, PerspectiveTransform, Result};
use crate::qrcode::decoder::Version;
use crate::qrcode::detector::{AlignmentPattern, AlignmentPatternFinder, FinderPattern, FinderPatternFinder};
use crate::{Exceptions, Point};

/// Turns the three finder patterns `FinderPatternFinder` locates into a
/// sampled, axis-aligned symbol grid: estimate module size and dimension,
/// locate the fourth (alignment) corner when the version has one, then
/// warp the source image through a perspective transform built from all
/// the corners found.
pub struct Detector<'m> {
    image: &'m BitMatrix,
}

impl<'m> Detector<'m> {
    pub fn new(image: &'m BitMatrix) -> Self {
        Self { image }
    }

    pub fn detect(&self, try_harder: bool) -> Result<DetectorRXingResult> {
        let mut finder = FinderPatternFinder::new(self.image);
        let info = finder.find(try_harder)?;
        self.process_finder_pattern_info(info.top_left, info.top_right, info.bottom_left)
    }

    fn process_finder_pattern_info(
        &self,
        top_left: FinderPattern,
        top_right: FinderPattern,
        bottom_left: FinderPattern,
    ) -> Result<DetectorRXingResult> {
        let module_size = self.calculate_module_size(top_left.point, top_right.point, bottom_left.point);
        if module_size < 1.0 {
            return Err(Exceptions::not_found_with("bad module size"));
        }

        let dimension = Self::compute_dimension(top_left.point, top_right.point, bottom_left.point, module_size)?;
        let provisional_version = Version::get_provisional_version_for_dimension(dimension as u32)?;
        let modules_between_fp_centers = provisional_version.dimension_for_version() as i32 - 7;

        let mut alignment_pattern: Option<AlignmentPattern> = None;
        if !provisional_version.alignment_pattern_centers.is_empty() {
            let bottom_right_x = top_right.point.x - top_left.point.x + bottom_left.point.x;
            let bottom_right_y = top_right.point.y - top_left.point.y + bottom_left.point.y;

            let correction_to_top_left = 1.0 - 3.0 / modules_between_fp_centers as f32;
            let est_alignment_x = (top_left.point.x + correction_to_top_left * (bottom_right_x - top_left.point.x)) as i32;
            let est_alignment_y = (top_left.point.y + correction_to_top_left * (bottom_right_y - top_left.point.y)) as i32;

            let mut i = 4;
            while i <= 16 {
                if let Ok(found) = self.find_alignment_in_region(module_size, est_alignment_x, est_alignment_y, i as f32) {
                    alignment_pattern = Some(found);
                    break;
                }
                i <<= 1;
            }
        }

        let transform = Self::create_transform(top_left.point, top_right.point, bottom_left.point, alignment_pattern, dimension);
        let bits = sample_grid(self.image, dimension as u32, dimension as u32, &transform)?;

        let mut points = vec![bottom_left.point, top_left.point, top_right.point];
        if let Some(alignment) = alignment_pattern {
            points.push(alignment.point);
        }

        Ok(DetectorRXingResult::new(bits, points))
    }

    #[allow(clippy::too_many_arguments)]
    fn create_transform(top_left: Point, top_right: Point, bottom_left: Point, alignment_pattern: Option<AlignmentPattern>, dimension: i32) -> PerspectiveTransform {
        let dim_minus_three = dimension as f32 - 3.5;
        let (bottom_right_x, bottom_right_y, source_bottom_right_x, source_bottom_right_y) = match alignment_pattern {
            Some(alignment) => (alignment.point.x, alignment.point.y, dim_minus_three - 3.0, dim_minus_three - 3.0),
            None => (
                top_right.x - top_left.x + bottom_left.x,
                top_right.y - top_left.y + bottom_left.y,
                dim_minus_three,
                dim_minus_three,
            ),
        };

        PerspectiveTransform::quadrilateral_to_quadrilateral(
            3.5,
            3.5,
            dim_minus_three,
            3.5,
            source_bottom_right_x,
            source_bottom_right_y,
            3.5,
            dim_minus_three,
            top_left.x,
            top_left.y,
            top_right.x,
            top_right.y,
            bottom_right_x,
            bottom_right_y,
            bottom_left.x,
            bottom_left.y,
        )
    }

    fn compute_dimension(top_left: Point, top_right: Point, bottom_left: Point, module_size: f32) -> Result<i32> {
        let tltr_dimension = (Point::distance(top_left, top_right) / module_size).round() as i32;
        let tlbl_dimension = (Point::distance(top_left, bottom_left) / module_size).round() as i32;
        let mut dimension = ((tltr_dimension + tlbl_dimension) >> 1) + 7;
        match dimension & 0x03 {
            0 => dimension += 1,
            2 => dimension -= 1,
            3 => return Err(Exceptions::not_found_with(format!("bad dimension: {dimension}"))),
            _ => {}
        }
        Ok(dimension)
    }

    fn calculate_module_size(&self, top_left: Point, top_right: Point, bottom_left: Point) -> f32 {
        (self.calculate_module_size_one_way(top_left, top_right) + self.calculate_module_size_one_way(top_left, bottom_left)) / 2.0
    }

    fn calculate_module_size_one_way(&self, pattern: Point, other_pattern: Point) -> f32 {
        let est1 = self.size_of_black_white_black_run_both_ways(pattern.x as i32, pattern.y as i32, other_pattern.x as i32, other_pattern.y as i32);
        let est2 = self.size_of_black_white_black_run_both_ways(other_pattern.x as i32, other_pattern.y as i32, pattern.x as i32, pattern.y as i32);
        if est1.is_nan() {
            est2
        } else if est2.is_nan() {
            est1
        } else {
            (est1 + est2) / 14.0
        }
    }

    fn size_of_black_white_black_run_both_ways(&self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> f32 {
        let mut result = self.size_of_black_white_black_run(from_x, from_y, to_x, to_y);

        let width = self.image.width() as i32;
        let height = self.image.height() as i32;

        let mut scale = 1.0f32;
        let mut other_to_x = from_x - (to_x - from_x);
        if other_to_x < 0 {
            scale = from_x as f32 / (from_x - other_to_x) as f32;
            other_to_x = 0;
        } else if other_to_x >= width {
            scale = (width - 1 - from_x) as f32 / (other_to_x - from_x) as f32;
            other_to_x = width - 1;
        }
        let mut other_to_y = (from_y as f32 - (to_y - from_y) as f32 * scale) as i32;

        scale = 1.0;
        if other_to_y < 0 {
            scale = from_y as f32 / (from_y - other_to_y) as f32;
            other_to_y = 0;
        } else if other_to_y >= height {
            scale = (height - 1 - from_y) as f32 / (other_to_y - from_y) as f32;
            other_to_y = height - 1;
        }
        other_to_x = (from_x as f32 + (other_to_x - from_x) as f32 * scale) as i32;

        result += self.size_of_black_white_black_run(from_x, from_y, other_to_x, other_to_y);
        result - 1.0
    }

    fn size_of_black_white_black_run(&self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> f32 {
        let steep = (to_y - from_y).abs() > (to_x - from_x).abs();
        let (mut from_x, mut from_y, mut to_x, mut to_y) = (from_x, from_y, to_x, to_y);
        if steep {
            std::mem::swap(&mut from_x, &mut from_y);
            std::mem::swap(&mut to_x, &mut to_y);
        }

        let dx = (to_x - from_x).abs();
        let dy = (to_y - from_y).abs();
        let mut error = -dx >> 1;
        let xstep: i32 = if from_x < to_x { 1 } else { -1 };
        let ystep: i32 = if from_y < to_y { 1 } else { -1 };

        let mut state = 0;
        let x_limit = to_x + xstep;
        let mut x = from_x;
        let mut y = from_y;
        while x != x_limit {
            let (real_x, real_y) = if steep { (y, x) } else { (x, y) };

            if (state == 1) != self.image.get(real_x as u32, real_y as u32) {
                if state == 2 {
                    return dist(x, y, from_x, from_y);
                }
                state += 1;
            }

            error += dy;
            if error > 0 {
                if y == to_y {
                    break;
                }
                y += ystep;
                error -= dx;
            }
            x += xstep;
        }
        if state == 2 {
            return dist(to_x + xstep, to_y, from_x, from_y);
        }
        f32::NAN
    }

    fn find_alignment_in_region(&self, overall_est_module_size: f32, est_alignment_x: i32, est_alignment_y: i32, allowance_factor: f32) -> Result<AlignmentPattern> {
        let allowance = (allowance_factor * overall_est_module_size) as i32;
        let alignment_area_left_x = (est_alignment_x - allowance).max(0);
        let alignment_area_right_x = (est_alignment_x + allowance).min(self.image.width() as i32 - 1);
        if (alignment_area_right_x - alignment_area_left_x) as f32 - overall_est_module_size * 3.0 < 0.0 {
            return Err(Exceptions::not_found_with("region too small to hold alignment pattern"));
        }
        let alignment_area_top_y = (est_alignment_y - allowance).max(0);
        let alignment_area_bottom_y = (est_alignment_y + allowance).min(self.image.height() as i32 - 1);
        if (alignment_area_bottom_y - alignment_area_top_y) as f32 - overall_est_module_size * 3.0 < 0.0 {
            return Err(Exceptions::not_found_with("region too small to hold alignment pattern"));
        }

        let mut finder = AlignmentPatternFinder::new(
            self.image,
            alignment_area_left_x,
            alignment_area_top_y,
            alignment_area_right_x - alignment_area_left_x,
            alignment_area_bottom_y - alignment_area_top_y,
            overall_est_module_size,
        );
        finder.find()
    }
}

fn dist(x0: i32, y0: i32, x1: i32, y1: i32) -> f32 {
    (((x0 - x1).pow(2) + (y0 - y1).pow(2)) as f32).sqrt()
}

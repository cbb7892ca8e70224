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

use crate::common::BitMatrix;
use crate::qrcode::detector::AlignmentPattern;
use crate::Exceptions;

/// Searches a small region around a version's predicted alignment pattern
/// center for the 1:1:1 black/white/black cross-section that marks one,
/// scanning out from the middle row so the most likely hits are seen first.
pub struct AlignmentPatternFinder<'m> {
    image: &'m BitMatrix,
    possible_centers: Vec<AlignmentPattern>,
    start_x: i32,
    start_y: i32,
    width: i32,
    height: i32,
    module_size: f32,
}

fn center_from_end(state_count: &[i32; 3], end: i32) -> f32 {
    (end - state_count[2]) as f32 - state_count[1] as f32 / 2.0
}

impl<'m> AlignmentPatternFinder<'m> {
    pub fn new(image: &'m BitMatrix, start_x: i32, start_y: i32, width: i32, height: i32, module_size: f32) -> Self {
        Self {
            image,
            possible_centers: Vec::new(),
            start_x,
            start_y,
            width,
            height,
            module_size,
        }
    }

    fn found_pattern_cross(&self, state_count: &[i32; 3]) -> bool {
        let max_variance = self.module_size / 2.0;
        for &count in state_count {
            if (self.module_size - count as f32).abs() >= max_variance {
                return false;
            }
        }
        true
    }

    fn cross_check_vertical(&self, start_i: i32, center_j: i32, max_count: i32, original_state_count_total: i32) -> f32 {
        let max_i = self.image.height() as i32;
        let mut state_count = [0i32; 3];

        let mut i = start_i;
        while i >= 0 && self.image.get(center_j as u32, i as u32) && state_count[1] <= max_count {
            state_count[1] += 1;
            i -= 1;
        }
        if i < 0 || state_count[1] > max_count {
            return f32::NAN;
        }
        while i >= 0 && !self.image.get(center_j as u32, i as u32) && state_count[0] <= max_count {
            state_count[0] += 1;
            i -= 1;
        }
        if state_count[0] > max_count {
            return f32::NAN;
        }

        let mut i = start_i + 1;
        while i < max_i && self.image.get(center_j as u32, i as u32) && state_count[1] <= max_count {
            state_count[1] += 1;
            i += 1;
        }
        if i == max_i || state_count[1] > max_count {
            return f32::NAN;
        }
        while i < max_i && !self.image.get(center_j as u32, i as u32) && state_count[2] <= max_count {
            state_count[2] += 1;
            i += 1;
        }
        if state_count[2] > max_count {
            return f32::NAN;
        }

        let state_count_total: i32 = state_count.iter().sum();
        if 5 * (state_count_total - original_state_count_total).abs() >= 2 * original_state_count_total {
            return f32::NAN;
        }

        if self.found_pattern_cross(&state_count) {
            center_from_end(&state_count, i)
        } else {
            f32::NAN
        }
    }

    fn handle_possible_center(&mut self, state_count: &[i32; 3], i: i32, j: i32) -> Option<AlignmentPattern> {
        let state_count_total: i32 = state_count.iter().sum();
        let center_j = center_from_end(state_count, j);
        let center_i = self.cross_check_vertical(i, center_j as i32, 2 * state_count[1], state_count_total);
        if center_i.is_nan() {
            return None;
        }

        let estimated_module_size = state_count_total as f32 / 3.0;
        for center in self.possible_centers.iter() {
            if center.about_equals(estimated_module_size, center_i, center_j) {
                return Some(center.combine_estimate(center_i, center_j, estimated_module_size));
            }
        }
        let new_pattern = AlignmentPattern::new(center_j, center_i, estimated_module_size);
        self.possible_centers.push(new_pattern);
        None
    }

    pub fn find(&mut self) -> Result<AlignmentPattern, Exceptions> {
        let max_j = self.start_x + self.width;
        let middle_i = self.start_y + (self.height >> 1);

        for i_gen in 0..self.height {
            let i = middle_i + if i_gen & 1 == 0 { (i_gen + 1) >> 1 } else { -((i_gen + 1) >> 1) };

            let mut state_count = [0i32; 3];
            let mut j = self.start_x;
            while j < max_j && !self.image.get(j as u32, i as u32) {
                j += 1;
            }
            let mut current_state = 0usize;
            while j < max_j {
                if self.image.get(j as u32, i as u32) {
                    if current_state == 1 {
                        state_count[current_state] += 1;
                    } else if current_state == 2 {
                        if self.found_pattern_cross(&state_count) {
                            if let Some(confirmed) = self.handle_possible_center(&state_count, i, j) {
                                return Ok(confirmed);
                            }
                        }
                        state_count[0] = state_count[2];
                        state_count[1] = 1;
                        state_count[2] = 0;
                        current_state = 1;
                    } else {
                        current_state += 1;
                        state_count[current_state] += 1;
                    }
                } else {
                    if current_state == 1 {
                        current_state += 1;
                    }
                    state_count[current_state] += 1;
                }
                j += 1;
            }
            if self.found_pattern_cross(&state_count) {
                if let Some(confirmed) = self.handle_possible_center(&state_count, i, max_j) {
                    return Ok(confirmed);
                }
            }
        }

        if let Some(&first) = self.possible_centers.first() {
            return Ok(first);
        }

        Err(Exceptions::not_found_with("could not find alignment pattern"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_alignment_pattern_cross() {
        let mut m = BitMatrix::new(60, 60).unwrap();
        for dy in -2..=2 {
            for dx in -2..=2 {
                let ring = dx.abs().max(dy.abs());
                if ring != 1 {
                    m.set((30 + dx) as u32, (30 + dy) as u32);
                }
            }
        }
        let mut finder = AlignmentPatternFinder::new(&m, 20, 20, 20, 20, 1.0);
        let pattern = finder.find().expect("should find the alignment pattern");
        assert!((pattern.point.x - 30.0).abs() < 2.0);
        assert!((pattern.point.y - 30.0).abs() < 2.0);
    }
}

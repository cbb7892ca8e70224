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
use crate::qrcode::detector::{FinderPattern, FinderPatternInfo};
use crate::Exceptions;

const CENTER_QUORUM: u32 = 2;
const MIN_SKIP: i32 = 3;
const MAX_MODULES: i32 = 57;

/// Scans an image row by row looking for the black/white/black/white/black
/// 1:1:3:1:1 run a finder pattern's cross-section produces, merges repeat
/// hits on the same center, and settles on the three best candidates.
pub struct FinderPatternFinder<'m> {
    image: &'m BitMatrix,
    possible_centers: Vec<FinderPattern>,
    has_skipped: bool,
}

fn center_from_end(state_count: &[i32; 5], end: i32) -> f32 {
    (end - state_count[4] - state_count[3]) as f32 - state_count[2] as f32 / 2.0
}

fn found_pattern_cross(state_count: &[i32; 5]) -> bool {
    let total: i32 = state_count.iter().sum();
    if total < 7 {
        return false;
    }
    let module_size = total as f32 / 7.0;
    let max_variance = module_size / 2.0;
    (module_size - state_count[0] as f32).abs() < max_variance
        && (module_size - state_count[1] as f32).abs() < max_variance
        && (3.0 * module_size - state_count[2] as f32).abs() < 3.0 * max_variance
        && (module_size - state_count[3] as f32).abs() < max_variance
        && (module_size - state_count[4] as f32).abs() < max_variance
}

impl<'m> FinderPatternFinder<'m> {
    pub fn new(image: &'m BitMatrix) -> Self {
        Self {
            image,
            possible_centers: Vec::new(),
            has_skipped: false,
        }
    }

    fn cross_check_vertical(&self, start_i: i32, center_j: i32, max_count: i32, original_state_count_total: i32) -> f32 {
        let max_i = self.image.height() as i32;
        let mut state_count = [0i32; 5];

        let mut i = start_i;
        while i >= 0 && self.image.get(center_j as u32, i as u32) {
            state_count[2] += 1;
            i -= 1;
        }
        if i < 0 {
            return f32::NAN;
        }
        while i >= 0 && !self.image.get(center_j as u32, i as u32) && state_count[1] <= max_count {
            state_count[1] += 1;
            i -= 1;
        }
        if i < 0 || state_count[1] > max_count {
            return f32::NAN;
        }
        while i >= 0 && self.image.get(center_j as u32, i as u32) && state_count[0] <= max_count {
            state_count[0] += 1;
            i -= 1;
        }
        if state_count[0] > max_count {
            return f32::NAN;
        }

        let mut i = start_i + 1;
        while i < max_i && self.image.get(center_j as u32, i as u32) {
            state_count[2] += 1;
            i += 1;
        }
        if i == max_i {
            return f32::NAN;
        }
        while i < max_i && !self.image.get(center_j as u32, i as u32) && state_count[3] < max_count {
            state_count[3] += 1;
            i += 1;
        }
        if i == max_i || state_count[3] >= max_count {
            return f32::NAN;
        }
        while i < max_i && self.image.get(center_j as u32, i as u32) && state_count[4] < max_count {
            state_count[4] += 1;
            i += 1;
        }
        if state_count[4] >= max_count {
            return f32::NAN;
        }

        let state_count_total: i32 = state_count.iter().sum();
        if 5 * (state_count_total - original_state_count_total).abs() >= 2 * original_state_count_total {
            return f32::NAN;
        }

        if found_pattern_cross(&state_count) {
            center_from_end(&state_count, i)
        } else {
            f32::NAN
        }
    }

    fn cross_check_horizontal(&self, start_j: i32, center_i: i32, max_count: i32, original_state_count_total: i32) -> f32 {
        let max_j = self.image.width() as i32;
        let mut state_count = [0i32; 5];

        let mut j = start_j;
        while j >= 0 && self.image.get(j as u32, center_i as u32) {
            state_count[2] += 1;
            j -= 1;
        }
        if j < 0 {
            return f32::NAN;
        }
        while j >= 0 && !self.image.get(j as u32, center_i as u32) && state_count[1] <= max_count {
            state_count[1] += 1;
            j -= 1;
        }
        if j < 0 || state_count[1] > max_count {
            return f32::NAN;
        }
        while j >= 0 && self.image.get(j as u32, center_i as u32) && state_count[0] <= max_count {
            state_count[0] += 1;
            j -= 1;
        }
        if state_count[0] > max_count {
            return f32::NAN;
        }

        let mut j = start_j + 1;
        while j < max_j && self.image.get(j as u32, center_i as u32) {
            state_count[2] += 1;
            j += 1;
        }
        if j == max_j {
            return f32::NAN;
        }
        while j < max_j && !self.image.get(j as u32, center_i as u32) && state_count[3] < max_count {
            state_count[3] += 1;
            j += 1;
        }
        if j == max_j || state_count[3] >= max_count {
            return f32::NAN;
        }
        while j < max_j && self.image.get(j as u32, center_i as u32) && state_count[4] < max_count {
            state_count[4] += 1;
            j += 1;
        }
        if state_count[4] >= max_count {
            return f32::NAN;
        }

        let state_count_total: i32 = state_count.iter().sum();
        if 5 * (state_count_total - original_state_count_total).abs() >= original_state_count_total {
            return f32::NAN;
        }

        if found_pattern_cross(&state_count) {
            center_from_end(&state_count, j)
        } else {
            f32::NAN
        }
    }

    fn handle_possible_center(&mut self, state_count: &[i32; 5], i: i32, j: i32) -> bool {
        let state_count_total: i32 = state_count.iter().sum();
        let mut center_j = center_from_end(state_count, j);
        let center_i = self.cross_check_vertical(i, center_j as i32, state_count[2], state_count_total);
        if center_i.is_nan() {
            return false;
        }

        center_j = self.cross_check_horizontal(center_j as i32, center_i as i32, state_count[2], state_count_total);
        if center_j.is_nan() {
            return false;
        }

        let estimated_module_size = state_count_total as f32 / 7.0;
        for center in self.possible_centers.iter_mut() {
            if center.about_equals(estimated_module_size, center_i, center_j) {
                *center = center.combine_estimate(center_i, center_j, estimated_module_size);
                return true;
            }
        }
        self.possible_centers.push(FinderPattern::new(center_j, center_i, estimated_module_size));
        true
    }

    fn find_row_skip(&mut self) -> i32 {
        if self.possible_centers.len() <= 1 {
            return 0;
        }
        let mut first_confirmed: Option<FinderPattern> = None;
        for &center in &self.possible_centers {
            if center.count >= CENTER_QUORUM {
                match first_confirmed {
                    None => first_confirmed = Some(center),
                    Some(first) => {
                        self.has_skipped = true;
                        return ((first.point.x - center.point.x).abs() - (first.point.y - center.point.y).abs()) as i32 / 2;
                    }
                }
            }
        }
        0
    }

    fn have_multiply_confirmed_centers(&self) -> bool {
        let mut confirmed_count = 0;
        let mut total_module_size = 0.0f32;
        for center in &self.possible_centers {
            if center.count >= CENTER_QUORUM {
                confirmed_count += 1;
                total_module_size += center.estimated_module_size;
            }
        }
        if confirmed_count < 3 {
            return false;
        }
        let average = total_module_size / self.possible_centers.len() as f32;
        let mut total_deviation = 0.0f32;
        for center in &self.possible_centers {
            total_deviation += (center.estimated_module_size - average).abs();
        }
        total_deviation <= 0.05 * total_module_size
    }

    fn select_best_patterns(&mut self) -> Result<[FinderPattern; 3], Exceptions> {
        let start_size = self.possible_centers.len();
        if start_size < 3 {
            return Err(Exceptions::not_found_with("could not find three finder patterns"));
        }

        if start_size > 3 {
            let mut total_module_size = 0.0f32;
            let mut square = 0.0f32;
            for center in &self.possible_centers {
                let size = center.estimated_module_size;
                total_module_size += size;
                square += size * size;
            }
            let average = total_module_size / start_size as f32;
            let std_dev = (square / start_size as f32 - average * average).sqrt();

            self.possible_centers
                .sort_by(|a, b| {
                    let da = (a.estimated_module_size - average).abs();
                    let db = (b.estimated_module_size - average).abs();
                    db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
                });

            let limit = (0.2 * average).max(std_dev);
            let mut i = 0;
            while i < self.possible_centers.len() && self.possible_centers.len() > 3 {
                if (self.possible_centers[i].estimated_module_size - average).abs() > limit {
                    self.possible_centers.remove(i);
                } else {
                    i += 1;
                }
            }
        }

        if self.possible_centers.len() > 3 {
            let mut total_module_size = 0.0f32;
            for center in &self.possible_centers {
                total_module_size += center.estimated_module_size;
            }
            let average = total_module_size / start_size as f32;
            self.possible_centers.sort_by(|a, b| {
                if a.count != b.count {
                    b.count.cmp(&a.count)
                } else {
                    let da = (a.estimated_module_size - average).abs();
                    let db = (b.estimated_module_size - average).abs();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                }
            });
        }

        self.possible_centers.truncate(3);
        Ok([self.possible_centers[0], self.possible_centers[1], self.possible_centers[2]])
    }

    /// Runs the full search and returns the three best finder patterns,
    /// ordered into `FinderPatternInfo`. `try_harder` disables the usual
    /// row-skipping optimization so sparse, low-version symbols aren't missed.
    pub fn find(&mut self, try_harder: bool) -> Result<FinderPatternInfo, Exceptions> {
        let max_i = self.image.height() as i32;
        let max_j = self.image.width() as i32;

        let mut i_skip = (3 * max_i) / (4 * MAX_MODULES);
        if i_skip < MIN_SKIP || try_harder {
            i_skip = MIN_SKIP;
        }

        let mut done = false;
        let mut i = i_skip - 1;
        while i < max_i && !done {
            let mut state_count = [0i32; 5];
            let mut current_state = 0usize;

            let mut j = 0i32;
            while j < max_j {
                if self.image.get(j as u32, i as u32) {
                    if current_state & 1 == 1 {
                        current_state += 1;
                    }
                    state_count[current_state] += 1;
                } else {
                    if current_state & 1 == 0 {
                        if current_state == 4 {
                            if found_pattern_cross(&state_count) {
                                let confirmed = self.handle_possible_center(&state_count, i, j);
                                if confirmed {
                                    i_skip = 2;
                                    if self.has_skipped {
                                        done = self.have_multiply_confirmed_centers();
                                    } else {
                                        let row_skip = self.find_row_skip();
                                        if row_skip > state_count[2] {
                                            i += row_skip - state_count[2] - i_skip;
                                            j = max_j - 1;
                                        }
                                    }
                                } else {
                                    state_count[0] = state_count[2];
                                    state_count[1] = state_count[3];
                                    state_count[2] = state_count[4];
                                    state_count[3] = 1;
                                    state_count[4] = 0;
                                    current_state = 3;
                                    j += 1;
                                    continue;
                                }
                                current_state = 0;
                                state_count = [0; 5];
                            } else {
                                state_count[0] = state_count[2];
                                state_count[1] = state_count[3];
                                state_count[2] = state_count[4];
                                state_count[3] = 1;
                                state_count[4] = 0;
                                current_state = 3;
                            }
                        } else {
                            current_state += 1;
                            state_count[current_state] += 1;
                        }
                    } else {
                        state_count[current_state] += 1;
                    }
                }
                j += 1;
            }

            if found_pattern_cross(&state_count) {
                let confirmed = self.handle_possible_center(&state_count, i, max_j);
                if confirmed {
                    i_skip = state_count[0];
                    if self.has_skipped {
                        done = self.have_multiply_confirmed_centers();
                    }
                }
            }

            i += i_skip;
        }

        let patterns = self.select_best_patterns()?;
        Ok(FinderPatternInfo::new(patterns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_finder_pattern(m: &mut BitMatrix, cx: i32, cy: i32, module: i32) {
        for dy in -3..=3 {
            for dx in -3..=3 {
                let ring = dx.abs().max(dy.abs());
                let black = !(ring == 2);
                if black {
                    for sy in 0..module {
                        for sx in 0..module {
                            let x = cx + dx * module + sx;
                            let y = cy + dy * module + sy;
                            if x >= 0 && y >= 0 && (x as u32) < m.width() && (y as u32) < m.height() {
                                m.set(x as u32, y as u32);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn finds_three_finder_patterns() {
        let mut m = BitMatrix::new(200, 200).unwrap();
        draw_finder_pattern(&mut m, 30, 30, 4);
        draw_finder_pattern(&mut m, 150, 30, 4);
        draw_finder_pattern(&mut m, 30, 150, 4);

        let mut finder = FinderPatternFinder::new(&m);
        let info = finder.find(true).expect("should find three finder patterns");

        assert!((info.top_left.point.x - 30.0).abs() < 5.0);
        assert!((info.top_left.point.y - 30.0).abs() < 5.0);
    }

    #[test]
    fn too_few_patterns_is_not_found() {
        let mut m = BitMatrix::new(100, 100).unwrap();
        draw_finder_pattern(&mut m, 30, 30, 4);
        let mut finder = FinderPatternFinder::new(&m);
        assert!(finder.find(true).is_err());
    }
}

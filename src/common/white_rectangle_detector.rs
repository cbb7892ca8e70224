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

use crate::common::{BitMatrix, Result};
use crate::{Exceptions, Point};

const INIT_SIZE: i32 = 10;
const CORR: f32 = 1.0;

/// Detects the white rectangle enclosing a symbol by growing a seed
/// rectangle outward from the image center until it stops finding black
/// pixels along each edge, then locates the symbol's four corners by
/// scanning diagonals across the resulting square. Shared by the Data
/// Matrix and Aztec detectors, both of which are framed by a solid
/// quiet zone rather than finder patterns alone.
#[derive(Debug)]
pub struct WhiteRectangleDetector<'m> {
    image: &'m BitMatrix,
    height: i32,
    width: i32,
    left_init: i32,
    right_init: i32,
    down_init: i32,
    up_init: i32,
}

impl<'m> WhiteRectangleDetector<'m> {
    pub fn new(image: &'m BitMatrix) -> Result<Self> {
        let x = image.width() as i32 / 2;
        let y = image.height() as i32 / 2;
        Self::with_seed(image, INIT_SIZE, x, y)
    }

    pub fn with_seed(image: &'m BitMatrix, init_size: i32, x: i32, y: i32) -> Result<Self> {
        let height = image.height() as i32;
        let width = image.width() as i32;
        let halfsize = init_size / 2;
        let left_init = x - halfsize;
        let right_init = x + halfsize;
        let up_init = y - halfsize;
        let down_init = y + halfsize;
        if up_init < 0 || left_init < 0 || down_init >= height || right_init >= width {
            return Err(Exceptions::not_found_with("seed rectangle runs off the image"));
        }
        Ok(Self {
            image,
            height,
            width,
            left_init,
            right_init,
            down_init,
            up_init,
        })
    }

    pub fn detect(&self) -> Result<[Point; 4]> {
        let mut left = self.left_init;
        let mut right = self.right_init;
        let mut up = self.up_init;
        let mut down = self.down_init;

        let mut size_exceeded = false;
        let mut a_black_point_found_on_border = true;

        let mut at_least_one_on_right = false;
        let mut at_least_one_on_bottom = false;
        let mut at_least_one_on_left = false;
        let mut at_least_one_on_top = false;

        while a_black_point_found_on_border {
            a_black_point_found_on_border = false;

            let mut right_border_not_white = true;
            while (right_border_not_white || !at_least_one_on_right) && right < self.width {
                right_border_not_white = self.contains_black_point(up, down, right, false);
                if right_border_not_white {
                    right += 1;
                    a_black_point_found_on_border = true;
                    at_least_one_on_right = true;
                } else if !at_least_one_on_right {
                    right += 1;
                }
            }
            if right >= self.width {
                size_exceeded = true;
                break;
            }

            let mut bottom_border_not_white = true;
            while (bottom_border_not_white || !at_least_one_on_bottom) && down < self.height {
                bottom_border_not_white = self.contains_black_point(left, right, down, true);
                if bottom_border_not_white {
                    down += 1;
                    a_black_point_found_on_border = true;
                    at_least_one_on_bottom = true;
                } else if !at_least_one_on_bottom {
                    down += 1;
                }
            }
            if down >= self.height {
                size_exceeded = true;
                break;
            }

            let mut left_border_not_white = true;
            while (left_border_not_white || !at_least_one_on_left) && left >= 0 {
                left_border_not_white = self.contains_black_point(up, down, left, false);
                if left_border_not_white {
                    left -= 1;
                    a_black_point_found_on_border = true;
                    at_least_one_on_left = true;
                } else if !at_least_one_on_left {
                    left -= 1;
                }
            }
            if left < 0 {
                size_exceeded = true;
                break;
            }

            let mut top_border_not_white = true;
            while (top_border_not_white || !at_least_one_on_top) && up >= 0 {
                top_border_not_white = self.contains_black_point(left, right, up, true);
                if top_border_not_white {
                    up -= 1;
                    a_black_point_found_on_border = true;
                    at_least_one_on_top = true;
                } else if !at_least_one_on_top {
                    up -= 1;
                }
            }
            if up < 0 {
                size_exceeded = true;
                break;
            }
        }

        if size_exceeded {
            return Err(Exceptions::not_found_with("white rectangle grew past the image bounds"));
        }

        let max_size = right - left;

        let z = (1..max_size)
            .find_map(|i| self.black_point_on_segment(left as f32, (down - i) as f32, (left + i) as f32, down as f32))
            .ok_or_else(|| Exceptions::not_found_with("no black point on bottom-left diagonal"))?;

        let t = (1..max_size)
            .find_map(|i| self.black_point_on_segment(left as f32, (up + i) as f32, (left + i) as f32, up as f32))
            .ok_or_else(|| Exceptions::not_found_with("no black point on top-left diagonal"))?;

        let x = (1..max_size)
            .find_map(|i| self.black_point_on_segment(right as f32, (up + i) as f32, (right - i) as f32, up as f32))
            .ok_or_else(|| Exceptions::not_found_with("no black point on top-right diagonal"))?;

        let y = (1..max_size)
            .find_map(|i| self.black_point_on_segment(right as f32, (down - i) as f32, (right - i) as f32, down as f32))
            .ok_or_else(|| Exceptions::not_found_with("no black point on bottom-right diagonal"))?;

        Ok(self.center_edges(y, z, x, t))
    }

    fn black_point_on_segment(&self, a_x: f32, a_y: f32, b_x: f32, b_y: f32) -> Option<Point> {
        let dist = ((b_x - a_x).powi(2) + (b_y - a_y).powi(2)).sqrt().round() as i32;
        if dist == 0 {
            return if self.image.get(a_x.round() as u32, a_y.round() as u32) {
                Some(Point::new(a_x.round(), a_y.round()))
            } else {
                None
            };
        }
        let x_step = (b_x - a_x) / dist as f32;
        let y_step = (b_y - a_y) / dist as f32;

        for i in 0..dist {
            let x = (a_x + i as f32 * x_step).round();
            let y = (a_y + i as f32 * y_step).round();
            if x < 0.0 || y < 0.0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
                continue;
            }
            if self.image.get(x as u32, y as u32) {
                return Some(Point::new(x, y));
            }
        }
        None
    }

    fn center_edges(&self, y: Point, z: Point, x: Point, t: Point) -> [Point; 4] {
        let yi = y.x;
        let yj = y.y;
        let zi = z.x;
        let zj = z.y;
        let xi = x.x;
        let xj = x.y;
        let ti = t.x;
        let tj = t.y;

        if yi < self.width as f32 / 2.0 {
            [
                Point::new(ti - CORR, tj + CORR),
                Point::new(zi + CORR, zj + CORR),
                Point::new(xi - CORR, xj - CORR),
                Point::new(yi + CORR, yj - CORR),
            ]
        } else {
            [
                Point::new(ti + CORR, tj + CORR),
                Point::new(zi + CORR, zj - CORR),
                Point::new(xi - CORR, xj + CORR),
                Point::new(yi - CORR, yj - CORR),
            ]
        }
    }

    fn contains_black_point(&self, a: i32, b: i32, fixed: i32, horizontal: bool) -> bool {
        if horizontal {
            (a..=b).any(|x| self.image.get(x as u32, fixed as u32))
        } else {
            (a..=b).any(|y| self.image.get(fixed as u32, y as u32))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_square(size: u32, margin: u32) -> BitMatrix {
        let mut m = BitMatrix::new(size, size).unwrap();
        for y in margin..(size - margin) {
            for x in margin..(size - margin) {
                m.set(x, y);
            }
        }
        m
    }

    #[test]
    fn detects_corners_of_a_centered_square() {
        let image = solid_square(60, 15);
        let detector = WhiteRectangleDetector::new(&image).unwrap();
        let corners = detector.detect().unwrap();
        for p in &corners {
            assert!(p.x >= 10.0 && p.x <= 50.0);
            assert!(p.y >= 10.0 && p.y <= 50.0);
        }
    }

    #[test]
    fn seed_rectangle_off_image_is_rejected() {
        let image = BitMatrix::new(5, 5).unwrap();
        assert!(WhiteRectangleDetector::new(&image).is_err());
    }
}

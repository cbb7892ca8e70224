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

use crate::common::{sample_grid, BitMatrix, DetectorRXingResult, PerspectiveTransform, Result, WhiteRectangleDetector};
use crate::{Exceptions, Point};

/// One of the six pairings among the four corners the white-rectangle
/// detector finds, together with the number of black/white transitions
/// counted along it - used to tell the two solid "L" sides from the two
/// alternating clock-track sides.
#[derive(Debug, Clone, Copy)]
struct PointsAndTransitions {
    from: Point,
    to: Point,
    transitions: i32,
}

/// Locates a Data Matrix symbol's four corners from a pre-binarized
/// image and samples its module grid. Unlike a QR code's three finder
/// patterns, Data Matrix is found by the `WhiteRectangleDetector`'s
/// four corner points, which are then sorted into top-left/top-right/
/// bottom-left/bottom-right by counting transitions along the symbol's
/// two solid border sides versus its two alternating clock-track sides.
pub struct Detector<'m> {
    image: &'m BitMatrix,
}

impl<'m> Detector<'m> {
    pub fn new(image: &'m BitMatrix) -> Self {
        Self { image }
    }

    pub fn detect(&self) -> Result<DetectorRXingResult> {
        let corners = WhiteRectangleDetector::new(self.image)?.detect()?;
        let [point_a, point_b, point_c, point_d] = corners;

        let mut transitions = [
            self.transitions_between(point_a, point_b),
            self.transitions_between(point_a, point_c),
            self.transitions_between(point_b, point_d),
            self.transitions_between(point_c, point_d),
        ];
        transitions.sort_by_key(|t| t.transitions);

        let l_side_one = transitions[0];
        let l_side_two = transitions[1];

        let mut point_count: Vec<(Point, i32)> = Vec::new();
        for point in [l_side_one.from, l_side_one.to, l_side_two.from, l_side_two.to] {
            if let Some(entry) = point_count.iter_mut().find(|(p, _)| *p == point) {
                entry.1 += 1;
            } else {
                point_count.push((point, 1));
            }
        }

        let mut maybe_top_left: Option<Point> = None;
        let mut bottom_left: Option<Point> = None;
        let mut maybe_bottom_right: Option<Point> = None;
        for (point, value) in point_count {
            if value == 2 {
                bottom_left = Some(point);
            } else if maybe_top_left.is_none() {
                maybe_top_left = Some(point);
            } else {
                maybe_bottom_right = Some(point);
            }
        }

        let (maybe_top_left, bottom_left, maybe_bottom_right) = match (maybe_top_left, bottom_left, maybe_bottom_right) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => return Err(Exceptions::not_found_with("could not resolve Data Matrix corners")),
        };

        let (bottom_right, bottom_left, top_left) = order_best_patterns(maybe_top_left, bottom_left, maybe_bottom_right);

        let top_right = [point_a, point_b, point_c, point_d]
            .into_iter()
            .find(|&p| p != bottom_right && p != bottom_left && p != top_left)
            .unwrap_or(point_d);

        let mut dimension_top = self.transitions_between(top_left, top_right).transitions;
        let mut dimension_right = self.transitions_between(bottom_right, top_right).transitions;

        if dimension_top & 1 == 1 {
            dimension_top += 1;
        }
        dimension_top += 2;

        if dimension_right & 1 == 1 {
            dimension_right += 1;
        }
        dimension_right += 2;

        let (bits, corrected_top_right);

        if 4 * dimension_top >= 7 * dimension_right || 4 * dimension_right >= 7 * dimension_top {
            let top_right_fixed = self
                .correct_top_right_rectangular(bottom_left, bottom_right, top_left, top_right, dimension_top, dimension_right)
                .unwrap_or(top_right);

            dimension_top = self.transitions_between(top_left, top_right_fixed).transitions;
            dimension_right = self.transitions_between(bottom_right, top_right_fixed).transitions;
            if dimension_top & 1 == 1 {
                dimension_top += 1;
            }
            if dimension_right & 1 == 1 {
                dimension_right += 1;
            }
            dimension_top = dimension_top.max(1);
            dimension_right = dimension_right.max(1);

            let transform = create_transform(top_left, top_right_fixed, bottom_left, bottom_right, dimension_top as u32, dimension_right as u32);
            bits = sample_grid(self.image, dimension_top as u32, dimension_right as u32, &transform)?;
            corrected_top_right = top_right_fixed;
        } else {
            let dimension = dimension_right.min(dimension_top);
            let top_right_fixed = self.correct_top_right(bottom_left, bottom_right, top_left, top_right, dimension).unwrap_or(top_right);

            let mut dimension_corrected = self
                .transitions_between(top_left, top_right_fixed)
                .transitions
                .max(self.transitions_between(bottom_right, top_right_fixed).transitions);
            dimension_corrected += 1;
            if dimension_corrected & 1 == 1 {
                dimension_corrected += 1;
            }
            dimension_corrected = dimension_corrected.max(1);

            let transform = create_transform(top_left, top_right_fixed, bottom_left, bottom_right, dimension_corrected as u32, dimension_corrected as u32);
            bits = sample_grid(self.image, dimension_corrected as u32, dimension_corrected as u32, &transform)?;
            corrected_top_right = top_right_fixed;
        }

        Ok(DetectorRXingResult::new(bits, vec![top_left, bottom_left, corrected_top_right, bottom_right]))
    }

    /// Projects a corrected top-right (white module corner) point for a
    /// rectangular symbol, choosing between the two candidates derived
    /// from the top and right sides by which better matches the
    /// transition counts already measured along each side.
    fn correct_top_right_rectangular(
        &self,
        bottom_left: Point,
        bottom_right: Point,
        top_left: Point,
        top_right: Point,
        dimension_top: i32,
        dimension_right: i32,
    ) -> Option<Point> {
        let corr = Point::distance(bottom_left, bottom_right) / dimension_top as f32;
        let norm = Point::distance(top_left, top_right);
        let cos = (top_right.x - top_left.x) / norm;
        let sin = (top_right.y - top_left.y) / norm;
        let c1 = Point::new(top_right.x + corr * cos, top_right.y + corr * sin);

        let corr = Point::distance(bottom_left, top_left) / dimension_right as f32;
        let norm = Point::distance(bottom_right, top_right);
        let cos = (top_right.x - bottom_right.x) / norm;
        let sin = (top_right.y - bottom_right.y) / norm;
        let c2 = Point::new(top_right.x + corr * cos, top_right.y + corr * sin);

        match (self.is_valid(c1), self.is_valid(c2)) {
            (false, false) => None,
            (false, true) => Some(c2),
            (true, false) => Some(c1),
            (true, true) => {
                let l1 = (dimension_top - self.transitions_between(top_left, c1).transitions).abs()
                    + (dimension_right - self.transitions_between(bottom_right, c1).transitions).abs();
                let l2 = (dimension_top - self.transitions_between(top_left, c2).transitions).abs()
                    + (dimension_right - self.transitions_between(bottom_right, c2).transitions).abs();
                Some(if l1 <= l2 { c1 } else { c2 })
            }
        }
    }

    /// Same idea as `correct_top_right_rectangular`, specialized for the
    /// square case where both sides share a single dimension estimate.
    fn correct_top_right(&self, bottom_left: Point, bottom_right: Point, top_left: Point, top_right: Point, dimension: i32) -> Option<Point> {
        let corr = Point::distance(bottom_left, bottom_right) / dimension as f32;
        let norm = Point::distance(top_left, top_right);
        let cos = (top_right.x - top_left.x) / norm;
        let sin = (top_right.y - top_left.y) / norm;
        let c1 = Point::new(top_right.x + corr * cos, top_right.y + corr * sin);

        let corr = Point::distance(bottom_left, top_left) / dimension as f32;
        let norm = Point::distance(bottom_right, top_right);
        let cos = (top_right.x - bottom_right.x) / norm;
        let sin = (top_right.y - bottom_right.y) / norm;
        let c2 = Point::new(top_right.x + corr * cos, top_right.y + corr * sin);

        match (self.is_valid(c1), self.is_valid(c2)) {
            (false, false) => None,
            (false, true) => Some(c2),
            (true, false) => Some(c1),
            (true, true) => {
                let l1 = (self.transitions_between(top_left, c1).transitions - self.transitions_between(bottom_right, c1).transitions).abs();
                let l2 = (self.transitions_between(top_left, c2).transitions - self.transitions_between(bottom_right, c2).transitions).abs();
                Some(if l1 <= l2 { c1 } else { c2 })
            }
        }
    }

    fn is_valid(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x < self.image.width() as f32 && p.y > 0.0 && p.y < self.image.height() as f32
    }

    /// Bresenham-walks from `from` to `to`, same technique as the QR
    /// detector's `sizeOfBlackWhiteBlackRun`, but counting every
    /// black/white transition along the way instead of stopping at the
    /// third run boundary.
    fn transitions_between(&self, from: Point, to: Point) -> PointsAndTransitions {
        let (mut from_x, mut from_y) = (from.x as i32, from.y as i32);
        let (mut to_x, mut to_y) = (to.x as i32, to.y as i32);
        let steep = (to_y - from_y).abs() > (to_x - from_x).abs();
        if steep {
            std::mem::swap(&mut from_x, &mut from_y);
            std::mem::swap(&mut to_x, &mut to_y);
        }

        let dx = (to_x - from_x).abs();
        let dy = (to_y - from_y).abs();
        let mut error = -dx >> 1;
        let ystep = if from_y < to_y { 1 } else { -1 };
        let xstep = if from_x < to_x { 1 } else { -1 };
        let mut transitions = 0;
        let mut in_black = self.image.get(
            (if steep { from_y } else { from_x }) as u32,
            (if steep { from_x } else { from_y }) as u32,
        );

        let mut x = from_x;
        let mut y = from_y;
        while x != to_x {
            let is_black = self.image.get((if steep { y } else { x }) as u32, (if steep { x } else { y }) as u32);
            if is_black != in_black {
                transitions += 1;
                in_black = is_black;
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

        PointsAndTransitions { from, to, transitions }
    }
}

fn create_transform(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point, dimension_x: u32, dimension_y: u32) -> PerspectiveTransform {
    PerspectiveTransform::quadrilateral_to_quadrilateral(
        0.5,
        0.5,
        dimension_x as f32 - 0.5,
        0.5,
        dimension_x as f32 - 0.5,
        dimension_y as f32 - 0.5,
        0.5,
        dimension_y as f32 - 0.5,
        top_left.x,
        top_left.y,
        top_right.x,
        top_right.y,
        bottom_right.x,
        bottom_right.y,
        bottom_left.x,
        bottom_left.y,
    )
}

/// Same dot-product trick the QR detector uses to order its finder
/// patterns: pick the pivot as the point not in the longest of the
/// three pairwise distances, then use the cross product's sign to fix
/// left/right orientation. Returns `(bottom_right, bottom_left, top_left)`.
fn order_best_patterns(a: Point, b: Point, c: Point) -> (Point, Point, Point) {
    let zero_one = Point::distance(a, b);
    let one_two = Point::distance(b, c);
    let zero_two = Point::distance(a, c);

    let (mut point_a, point_b, mut point_c) = if one_two >= zero_one && one_two >= zero_two {
        (b, a, c)
    } else if zero_two >= one_two && zero_two >= zero_one {
        (a, b, c)
    } else {
        (a, c, b)
    };

    if Point::cross_product_z(point_a, point_b, point_c) < 0.0 {
        std::mem::swap(&mut point_a, &mut point_c);
    }

    (point_a, point_b, point_c)
}

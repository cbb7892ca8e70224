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

use crate::qrcode::detector::FinderPattern;
use crate::Point;

/// The three finder patterns found for one symbol, sorted so that
/// `top_left` is the one at the right-angle corner and `top_right` /
/// `bottom_left` are ordered consistently with the symbol's own
/// coordinate axes (found via the cross product of the other two).
#[derive(Debug, Clone, Copy)]
pub struct FinderPatternInfo {
    pub bottom_left: FinderPattern,
    pub top_left: FinderPattern,
    pub top_right: FinderPattern,
}

impl FinderPatternInfo {
    pub fn new(patterns: [FinderPattern; 3]) -> Self {
        let [a, b, c] = patterns;
        let (bottom_left, top_left, top_right) = Self::order_best_patterns(a, b, c);
        Self {
            bottom_left,
            top_left,
            top_right,
        }
    }

    fn order_best_patterns(a: FinderPattern, b: FinderPattern, c: FinderPattern) -> (FinderPattern, FinderPattern, FinderPattern) {
        let zero_one = Point::distance(a.point, b.point);
        let one_two = Point::distance(b.point, c.point);
        let zero_two = Point::distance(a.point, c.point);

        let (mut point_a, point_b, mut point_c) = if one_two >= zero_one && one_two >= zero_two {
            (b, a, c)
        } else if zero_two >= one_two && zero_two >= zero_one {
            (a, b, c)
        } else {
            (a, c, b)
        };

        if Point::cross_product_z(point_a.point, point_b.point, point_c.point) < 0.0 {
            std::mem::swap(&mut point_a, &mut point_c);
        }

        (point_a, point_b, point_c)
    }
}

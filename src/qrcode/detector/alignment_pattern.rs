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

use crate::Point;

/// A candidate alignment pattern center: the small bullseye squares a QR
/// symbol (version 2+) places to anchor the grid sampler against print
/// distortion and perspective skew.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentPattern {
    pub point: Point,
    pub estimated_module_size: f32,
}

impl AlignmentPattern {
    pub fn new(x: f32, y: f32, estimated_module_size: f32) -> Self {
        Self {
            point: Point::new(x, y),
            estimated_module_size,
        }
    }

    pub fn about_equals(&self, module_size: f32, i: f32, j: f32) -> bool {
        if (i - self.point.y).abs() <= module_size && (j - self.point.x).abs() <= module_size {
            let module_size_diff = (module_size - self.estimated_module_size).abs();
            module_size_diff <= 1.0 || module_size_diff <= self.estimated_module_size
        } else {
            false
        }
    }

    pub fn combine_estimate(&self, i: f32, j: f32, new_module_size: f32) -> Self {
        let combined_x = (self.point.x + j) / 2.0;
        let combined_y = (self.point.y + i) / 2.0;
        let combined_module_size = (self.estimated_module_size + new_module_size) / 2.0;
        Self::new(combined_x, combined_y, combined_module_size)
    }
}

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

use crate::common::BitMatrix;
use crate::Point;

/// Everything the Aztec decoder needs beyond the sampled grid itself:
/// whether the symbol used the compact (single-ring bullseye) layout,
/// how many concentric data layers it has, and how many codewords its
/// data region holds.
#[derive(Debug)]
pub struct AztecDetectorResult {
    bits: BitMatrix,
    points: Vec<Point>,
    compact: bool,
    nb_datablocks: u32,
    nb_layers: u32,
}

impl AztecDetectorResult {
    pub fn new(bits: BitMatrix, points: Vec<Point>, compact: bool, nb_datablocks: u32, nb_layers: u32) -> Self {
        Self {
            bits,
            points,
            compact,
            nb_datablocks,
            nb_layers,
        }
    }

    pub fn bits(&self) -> &BitMatrix {
        &self.bits
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn nb_datablocks(&self) -> u32 {
        self.nb_datablocks
    }

    pub fn nb_layers(&self) -> u32 {
        self.nb_layers
    }
}

/*
 * Copyright 2009 ZXing authors
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
use crate::oned::upc_ean_reader::{find_guard_pattern, Range};
use crate::pdf417::pdf417_common::{MODULES_IN_CODEWORD, START_PATTERN, STOP_PATTERN};
use crate::{Exceptions, Point};

/// A pixel row where both the start and stop guard were located.
struct RowMatch {
    y: u32,
    start: Range,
    stop: Range,
}

/// A run of consecutive image rows whose guard patterns line up, taken
/// to be the pixels of one logical PDF417 row.
struct Band {
    top: RowMatch,
    bottom_y: u32,
}

/// Finds a PDF417 symbol by scanning every pixel row for its left and
/// right guard patterns, in place of the multi-row voting `LinesSampler`
/// the format's authors describe: no implementation of that algorithm
/// survived into the reference material this was built from, so rows
/// are grouped into bands by simple y-contiguity instead of by the
/// guards' own vertical extent. See DESIGN.md.
pub struct Detector<'m> {
    image: &'m BitMatrix,
}

impl<'m> Detector<'m> {
    pub fn new(image: &'m BitMatrix) -> Self {
        Self { image }
    }

    pub fn detect(&self) -> Result<DetectorRXingResult> {
        let matches = self.find_row_matches()?;
        if matches.is_empty() {
            return Err(Exceptions::not_found_with("no PDF417 guard patterns found"));
        }

        let bands = group_into_bands(matches);
        if bands.is_empty() {
            return Err(Exceptions::not_found_with("no PDF417 row bands found"));
        }

        let first = &bands[0];
        let last = &bands[bands.len() - 1];

        let module_width = (first.top.start.end - first.top.start.start) as f32 / MODULES_IN_CODEWORD as f32;
        if module_width <= 0.0 {
            return Err(Exceptions::not_found_with("degenerate PDF417 module width"));
        }

        let interior_pixels = first.top.stop.start as f32 - first.top.start.end as f32;
        let interior_columns = (interior_pixels / module_width / MODULES_IN_CODEWORD as f32).round() as u32;
        if interior_columns == 0 {
            return Err(Exceptions::not_found_with("no interior PDF417 columns found"));
        }

        let num_rows = bands.len() as u32;
        let dimension_x = interior_columns * MODULES_IN_CODEWORD;

        let top_left = Point::new(first.top.start.end as f32, first.top.y as f32);
        let top_right = Point::new(first.top.stop.start as f32, first.top.y as f32);
        let bottom_left = Point::new(last.top.start.end as f32, last.bottom_y as f32);
        let bottom_right = Point::new(last.top.stop.start as f32, last.bottom_y as f32);

        let transform = create_transform(top_left, top_right, bottom_left, bottom_right, dimension_x, num_rows);
        let bits = sample_grid(self.image, dimension_x, num_rows, &transform)?;

        Ok(DetectorRXingResult::new(
            bits,
            vec![top_left, top_right, bottom_right, bottom_left],
        ))
    }

    fn find_row_matches(&self) -> Result<Vec<RowMatch>> {
        let mut matches = Vec::new();
        for y in 0..self.image.height() {
            let row = self.image.get_row(y, None);
            let start = match find_guard_pattern(&row, 0, false, &START_PATTERN) {
                Ok(range) => range,
                Err(_) => continue,
            };
            let stop = match find_last_guard_pattern(&row, start.end, &STOP_PATTERN) {
                Ok(range) => range,
                Err(_) => continue,
            };
            if stop.start <= start.end {
                continue;
            }
            matches.push(RowMatch { y, start, stop });
        }
        Ok(matches)
    }
}

/// Repeatedly slides `find_guard_pattern` forward across `row`, keeping
/// the rightmost match, since the stop guard must be found past every
/// codeword column rather than at the first byte-aligned hit.
fn find_last_guard_pattern(row: &crate::common::BitArray, from: usize, pattern: &[u32]) -> Result<Range> {
    let mut offset = from;
    let mut last = None;
    while let Ok(range) = find_guard_pattern(row, offset, false, pattern) {
        offset = range.end;
        last = Some(range);
    }
    last.ok_or_else(|| Exceptions::not_found_with("stop guard pattern not found"))
}

fn group_into_bands(matches: Vec<RowMatch>) -> Vec<Band> {
    let mut bands = Vec::new();
    let mut iter = matches.into_iter();
    let Some(first) = iter.next() else {
        return bands;
    };

    let mut current_bottom = first.y;
    let mut current_top = first;

    for row_match in iter {
        if row_match.y <= current_bottom + 1 {
            current_bottom = row_match.y;
        } else {
            bands.push(Band { top: current_top, bottom_y: current_bottom });
            current_top = row_match;
            current_bottom = current_top.y;
        }
    }
    bands.push(Band { top: current_top, bottom_y: current_bottom });
    bands
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

/*
 * Copyright 2011 ZXing authors
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

use crate::common::{Binarizer, Result};
use crate::multi::MultipleBarcodeReader;
use crate::reader::Reader;
use crate::{BinaryBitmap, DecodingHintDictionary, Exceptions, Point, RXingResult};

const MIN_DIMENSION_TO_RECUR: f32 = 100.0;
const MAX_DEPTH: u32 = 4;

/// Finds every barcode in an image by decoding once, then recursing into
/// the (up to) four rectangular regions left over outside the hit's
/// bounding box - left of it, above it, right of it, below it - each
/// offset so result points come back in the original image's coordinates.
pub struct GenericMultipleBarcodeReader<R> {
    delegate: R,
}

impl<R: Reader> GenericMultipleBarcodeReader<R> {
    pub fn new(delegate: R) -> Self {
        Self { delegate }
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_multiple_inner(
        &mut self,
        image: &BinaryBitmap<dyn Binarizer>,
        hints: &DecodingHintDictionary,
        results: &mut Vec<RXingResult>,
        x_offset: i32,
        y_offset: i32,
        current_depth: u32,
    ) -> Result<()> {
        if current_depth > MAX_DEPTH {
            return Ok(());
        }

        let result = match self.delegate.decode_with_hints(image, hints) {
            Ok(r) => r,
            Err(_) => return Ok(()),
        };

        let already_found = results.iter().any(|existing| existing.text() == result.text());
        if !already_found {
            results.push(translate_result_points(result.clone(), x_offset, y_offset));
        }

        if result.points().is_empty() {
            return Ok(());
        }

        let width = image.get_width();
        let height = image.get_height();
        let mut min_x = width as f32;
        let mut min_y = height as f32;
        let mut max_x = 0.0f32;
        let mut max_y = 0.0f32;
        for point in result.points() {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        if min_x > MIN_DIMENSION_TO_RECUR {
            let cropped = image.crop(0, 0, min_x as usize, height)?;
            self.decode_multiple_inner(&cropped, hints, results, x_offset, y_offset, current_depth + 1)?;
        }
        if min_y > MIN_DIMENSION_TO_RECUR {
            let cropped = image.crop(0, 0, width, min_y as usize)?;
            self.decode_multiple_inner(&cropped, hints, results, x_offset, y_offset, current_depth + 1)?;
        }
        if max_x < width as f32 - MIN_DIMENSION_TO_RECUR {
            let cropped = image.crop(max_x as usize, 0, width - max_x as usize, height)?;
            self.decode_multiple_inner(&cropped, hints, results, x_offset + max_x as i32, y_offset, current_depth + 1)?;
        }
        if max_y < height as f32 - MIN_DIMENSION_TO_RECUR {
            let cropped = image.crop(0, max_y as usize, width, height - max_y as usize)?;
            self.decode_multiple_inner(&cropped, hints, results, x_offset, y_offset + max_y as i32, current_depth + 1)?;
        }

        Ok(())
    }
}

fn translate_result_points(result: RXingResult, x_offset: i32, y_offset: i32) -> RXingResult {
    if x_offset == 0 && y_offset == 0 {
        return result;
    }
    let points = result
        .points()
        .iter()
        .map(|p| Point::new(p.x + x_offset as f32, p.y + y_offset as f32))
        .collect();
    RXingResult::new(result.text().to_owned(), result.raw_bytes().to_vec(), points, result.format())
}

impl<R: Reader> MultipleBarcodeReader for GenericMultipleBarcodeReader<R> {
    fn decode_multiple_with_hints(
        &mut self,
        image: &BinaryBitmap<dyn Binarizer>,
        hints: &DecodingHintDictionary,
    ) -> Result<Vec<RXingResult>> {
        let mut results = Vec::new();
        self.decode_multiple_inner(image, hints, &mut results, 0, 0, 0)?;
        if results.is_empty() {
            return Err(Exceptions::not_found_with("No barcode detected"));
        }
        Ok(results)
    }
}

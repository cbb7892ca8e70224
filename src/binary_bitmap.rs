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

use crate::common::{BitArray, BitMatrix, Binarizer, Result};
use crate::Exceptions;

/// Joins a `Binarizer` to the image it binarizes, and memoizes the
/// expensive whole-image matrix the first time it is asked for.
#[derive(Debug)]
pub struct BinaryBitmap<B: Binarizer + ?Sized = dyn Binarizer> {
    matrix: std::cell::RefCell<Option<BitMatrix>>,
    binarizer: Box<B>,
}

impl BinaryBitmap<dyn Binarizer> {
    pub fn new(binarizer: impl Binarizer + 'static) -> Self {
        Self {
            binarizer: Box::new(binarizer),
            matrix: std::cell::RefCell::new(None),
        }
    }
}

impl<B: Binarizer + ?Sized> BinaryBitmap<B> {
    pub fn from_box(binarizer: Box<B>) -> Self {
        Self {
            binarizer,
            matrix: std::cell::RefCell::new(None),
        }
    }

    pub fn get_width(&self) -> usize {
        self.binarizer.get_width()
    }

    pub fn get_height(&self) -> usize {
        self.binarizer.get_height()
    }

    pub fn get_black_row(&self, y: usize) -> Result<BitArray> {
        self.binarizer.get_black_row(y)
    }

    pub fn get_black_matrix(&self) -> Result<BitMatrix> {
        if let Some(m) = self.matrix.borrow().as_ref() {
            return Ok(m.clone());
        }
        let m = self.binarizer.get_black_matrix()?;
        *self.matrix.borrow_mut() = Some(m.clone());
        Ok(m)
    }

    pub fn is_crop_supported(&self) -> bool {
        self.binarizer.get_luminance_source().is_crop_supported()
    }

    pub fn is_rotate_supported(&self) -> bool {
        self.binarizer.get_luminance_source().is_rotate_supported()
    }

    /// Returns a bitmap over the rectangular sub-region, rebuilding a
    /// binarizer of the same kind around the cropped source. Used by
    /// `GenericMultipleBarcodeReader` to recurse into the regions left
    /// over after a hit.
    pub fn crop(&self, left: usize, top: usize, width: usize, height: usize) -> Result<BinaryBitmap> {
        if !self.is_crop_supported() {
            return Err(Exceptions::unsupported_operation_with("This luminance source does not support cropping."));
        }
        let cropped = self.binarizer.get_luminance_source().crop(left, top, width, height)?;
        Ok(BinaryBitmap::from_box(self.binarizer.create_binarizer(cropped)))
    }

    /// Returns a bitmap over the image rotated 90 degrees counter-clockwise,
    /// for formats that can only be read along one axis normally (the 1D
    /// "try harder" retry reads a vertical barcode this way).
    pub fn rotate_counter_clockwise(&self) -> Result<BinaryBitmap> {
        if !self.is_rotate_supported() {
            return Err(Exceptions::unsupported_operation_with("This luminance source does not support rotation by 90 degrees."));
        }
        let rotated = self.binarizer.get_luminance_source().rotate_counter_clockwise()?;
        Ok(BinaryBitmap::from_box(self.binarizer.create_binarizer(rotated)))
    }
}

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

use crate::common::Result;
use crate::Exceptions;

/// An immutable view of an H x W field of grey-level bytes. Implementations
/// are pure buffer adapters: no I/O happens behind this trait, cropping and
/// rotation are lazy views over the same backing bytes wherever possible.
pub trait LuminanceSource: std::fmt::Debug {
    fn get_width(&self) -> usize;
    fn get_height(&self) -> usize;

    /// Returns the `y`th row of luminance data. `row` is reused when it is
    /// already the right size; otherwise a fresh buffer is returned and the
    /// caller must use what comes back, never assume in-place reuse.
    fn get_row(&self, y: usize) -> Vec<u8>;

    /// The full image as a row-major buffer, top-down.
    fn get_matrix(&self) -> Vec<u8>;

    fn is_crop_supported(&self) -> bool {
        false
    }

    fn crop(&self, _left: usize, _top: usize, _width: usize, _height: usize) -> Result<Box<dyn LuminanceSource>> {
        Err(Exceptions::unsupported_operation_with(
            "This luminance source does not support cropping.",
        ))
    }

    fn is_rotate_supported(&self) -> bool {
        false
    }

    fn rotate_counter_clockwise(&self) -> Result<Box<dyn LuminanceSource>> {
        Err(Exceptions::unsupported_operation_with(
            "This luminance source does not support rotation by 90 degrees.",
        ))
    }

    fn rotate_counter_clockwise45(&self) -> Result<Box<dyn LuminanceSource>> {
        Err(Exceptions::unsupported_operation_with(
            "This luminance source does not support rotation by 45 degrees.",
        ))
    }

    fn invert(&self) -> InvertedLuminanceSource
    where
        Self: Sized + Clone + 'static,
    {
        InvertedLuminanceSource {
            delegate: Box::new(self.clone()),
        }
    }
}

/// Converts RGBA samples to luminance the way a display would perceive
/// brightness: `Y = (306R + 601G + 117B + 512) >> 10`.
pub fn rgba_to_luminance(r: u8, g: u8, b: u8) -> u8 {
    (((306 * r as u32) + (601 * g as u32) + (117 * b as u32) + 512) >> 10) as u8
}

/// A plain luma8 source over an owned byte buffer. Supports cropping
/// (a lazy origin/window, never a copy) but not rotation.
#[derive(Debug, Clone)]
pub struct Luma8LuminanceSource {
    width: usize,
    height: usize,
    origin_x: usize,
    origin_y: usize,
    data: std::sync::Arc<Vec<u8>>,
    original_width: usize,
    inverted: bool,
}

impl Luma8LuminanceSource {
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            origin_x: 0,
            origin_y: 0,
            data: std::sync::Arc::new(data),
            original_width: width,
            inverted: false,
        }
    }

    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for px in rgba.chunks_exact(4) {
            data.push(rgba_to_luminance(px[0], px[1], px[2]));
        }
        Self::new(data, width, height)
    }
}

impl LuminanceSource for Luma8LuminanceSource {
    fn get_width(&self) -> usize {
        self.width
    }

    fn get_height(&self) -> usize {
        self.height
    }

    fn get_row(&self, y: usize) -> Vec<u8> {
        let row_start = (y + self.origin_y) * self.original_width + self.origin_x;
        let row = &self.data[row_start..row_start + self.width];
        if self.inverted {
            row.iter().map(|b| 255 - b).collect()
        } else {
            row.to_vec()
        }
    }

    fn get_matrix(&self) -> Vec<u8> {
        if self.origin_x == 0 && self.origin_y == 0 && self.width == self.original_width {
            if self.inverted {
                self.data.iter().map(|b| 255 - b).collect()
            } else {
                (*self.data).clone()
            }
        } else {
            let mut out = Vec::with_capacity(self.width * self.height);
            for y in 0..self.height {
                out.extend_from_slice(&self.get_row(y));
            }
            out
        }
    }

    fn is_crop_supported(&self) -> bool {
        true
    }

    fn crop(&self, left: usize, top: usize, width: usize, height: usize) -> Result<Box<dyn LuminanceSource>> {
        if left + width > self.width || top + height > self.height {
            return Err(Exceptions::illegal_argument_with(
                "Crop rectangle does not fit within image data.",
            ));
        }
        Ok(Box::new(Self {
            width,
            height,
            origin_x: self.origin_x + left,
            origin_y: self.origin_y + top,
            data: self.data.clone(),
            original_width: self.original_width,
            inverted: self.inverted,
        }))
    }
}

impl LuminanceSource for Box<dyn LuminanceSource> {
    fn get_width(&self) -> usize {
        (**self).get_width()
    }

    fn get_height(&self) -> usize {
        (**self).get_height()
    }

    fn get_row(&self, y: usize) -> Vec<u8> {
        (**self).get_row(y)
    }

    fn get_matrix(&self) -> Vec<u8> {
        (**self).get_matrix()
    }

    fn is_crop_supported(&self) -> bool {
        (**self).is_crop_supported()
    }

    fn crop(&self, left: usize, top: usize, width: usize, height: usize) -> Result<Box<dyn LuminanceSource>> {
        (**self).crop(left, top, width, height)
    }

    fn is_rotate_supported(&self) -> bool {
        (**self).is_rotate_supported()
    }

    fn rotate_counter_clockwise(&self) -> Result<Box<dyn LuminanceSource>> {
        (**self).rotate_counter_clockwise()
    }

    fn rotate_counter_clockwise45(&self) -> Result<Box<dyn LuminanceSource>> {
        (**self).rotate_counter_clockwise45()
    }
}

/// Lazily presents the complement of a delegate source's luminance, for
/// formats that may appear as light-on-dark.
#[derive(Debug)]
pub struct InvertedLuminanceSource {
    delegate: Box<dyn LuminanceSource>,
}

impl LuminanceSource for InvertedLuminanceSource {
    fn get_width(&self) -> usize {
        self.delegate.get_width()
    }

    fn get_height(&self) -> usize {
        self.delegate.get_height()
    }

    fn get_row(&self, y: usize) -> Vec<u8> {
        self.delegate.get_row(y).into_iter().map(|b| 255 - b).collect()
    }

    fn get_matrix(&self) -> Vec<u8> {
        self.delegate.get_matrix().into_iter().map(|b| 255 - b).collect()
    }
}

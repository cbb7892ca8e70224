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

pub mod bit_array;
pub mod bit_matrix;
pub mod bit_source;
pub mod black_point_estimator;
pub mod detector_result;
pub mod global_histogram_binarizer;
pub mod grid_sampler;
pub mod hybrid_binarizer;
pub mod modulus;
pub mod perspective_transform;
pub mod reedsolomon;
pub mod white_rectangle_detector;

pub use bit_array::BitArray;
pub use bit_matrix::BitMatrix;
pub use bit_source::BitSource;
pub use detector_result::DetectorRXingResult;
pub use global_histogram_binarizer::GlobalHistogramBinarizer;
pub use grid_sampler::{sample_grid, GridSampler};
pub use hybrid_binarizer::HybridBinarizer;
pub use perspective_transform::PerspectiveTransform;
pub use white_rectangle_detector::WhiteRectangleDetector;

use crate::{Exceptions, LuminanceSource};

pub type Result<T> = std::result::Result<T, Exceptions>;

/// Closed family of binarization strategies: given a `LuminanceSource`,
/// produce black/white bits either a row at a time or for the whole image.
/// The whole-image matrix is expected to be cached by implementors for the
/// lifetime of the binarizer instance.
pub trait Binarizer: std::fmt::Debug {
    fn get_luminance_source(&self) -> &dyn LuminanceSource;
    fn get_width(&self) -> usize {
        self.get_luminance_source().get_width()
    }
    fn get_height(&self) -> usize {
        self.get_luminance_source().get_height()
    }
    fn get_black_row(&self, y: usize) -> Result<BitArray>;
    fn get_black_matrix(&self) -> Result<BitMatrix>;

    /// Rebuilds a binarizer of the same kind over a different (typically
    /// cropped or rotated) luminance source. Used by `BinaryBitmap::crop`.
    fn create_binarizer(&self, source: Box<dyn LuminanceSource>) -> Box<dyn Binarizer>;
}

/// A small closed set of symbol-specific error-correction strengths.
/// QR names them L/M/Q/H; the other formats use a plain numeric level,
/// so both constructors are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    L,
    M,
    Q,
    H,
    Numeric(u8),
}

impl ECLevel {
    pub fn as_str(&self) -> String {
        match self {
            Self::L => "L".to_owned(),
            Self::M => "M".to_owned(),
            Self::Q => "Q".to_owned(),
            Self::H => "H".to_owned(),
            Self::Numeric(n) => n.to_string(),
        }
    }
}

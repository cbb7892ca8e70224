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

//! Multi-format 1D/2D barcode decoding: given a grey-level image, locate
//! the symbol(s), correct transmission errors, and return the decoded
//! payload plus the image-space points it was found at.

pub mod aztec;
pub mod barcode_format;
pub mod binary_bitmap;
pub mod common;
pub mod datamatrix;
pub mod decode_hints;
pub mod exceptions;
mod helpers;
pub mod luminance_source;
pub mod multi;
mod multi_format_reader;
pub mod oned;
pub mod pdf417;
mod point;
pub mod qrcode;
pub mod reader;
pub mod result;

pub use barcode_format::BarcodeFormat;
pub use binary_bitmap::BinaryBitmap;
pub use decode_hints::{DecodeHints, DecodeHintType, DecodeHintValue, DecodingHintDictionary};
pub use exceptions::Exceptions;
pub use helpers::*;
pub use luminance_source::{Luma8LuminanceSource, LuminanceSource};
pub use multi_format_reader::MultiFormatReader;
pub use point::Point;
pub use reader::{ImmutableReader, Reader};
pub use result::RXingResult;

use common::{HybridBinarizer, Result};

/// Decodes the first barcode found in `source`.
pub fn decode(source: impl LuminanceSource + 'static, hints: &DecodeHints) -> Result<RXingResult> {
    let mut reader = MultiFormatReader::new(hints);
    let bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
    reader.decode_with_hints(&bitmap, &hints.to_dictionary())
}

/// Decodes every barcode found in `source`, recursing into the four
/// image regions outside each hit's bounding box (see [`multi`]).
pub fn decode_multiple(source: impl LuminanceSource + 'static, hints: &DecodeHints) -> Result<Vec<RXingResult>> {
    use multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};

    let reader = MultiFormatReader::new(hints);
    let bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
    let mut scanner = GenericMultipleBarcodeReader::new(reader);
    scanner.decode_multiple_with_hints(&bitmap, &hints.to_dictionary())
}

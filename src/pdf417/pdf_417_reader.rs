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

use crate::common::{Binarizer, Result};
use crate::decode_hints::{dictionary_point_callback, DecodingHintDictionary};
use crate::pdf417::decoder::Decoder;
use crate::pdf417::detector::Detector;
use crate::reader::ImmutableReader;
use crate::{BarcodeFormat, BinaryBitmap, RXingResult};

/// Locates and decodes a PDF417 symbol: find its start/stop guard rows,
/// sample the module grid they mark out, then hand that grid to the
/// codeword and bit-stream decoder.
#[derive(Debug, Default)]
pub struct Pdf417Reader;

impl ImmutableReader for Pdf417Reader {
    fn decode_with_hints(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let black_matrix = image.get_black_matrix()?;
        let detector_result = Detector::new(&black_matrix).detect()?;

        if let Some(callback) = dictionary_point_callback(hints) {
            for point in detector_result.points() {
                callback(point.x, point.y);
            }
        }

        let decoder_result = Decoder::decode(detector_result.bits())?;

        Ok(RXingResult::new(
            decoder_result.text().to_owned(),
            decoder_result.raw_bytes().to_vec(),
            detector_result.points().to_vec(),
            BarcodeFormat::Pdf417,
        ))
    }
}

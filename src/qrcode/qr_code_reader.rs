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

use crate::common::{Binarizer, Result};
use crate::decode_hints::{dictionary_point_callback, dictionary_try_harder, DecodeHintType, DecodeHintValue, DecodingHintDictionary};
use crate::qrcode::decoder::Decoder;
use crate::qrcode::detector::Detector;
use crate::reader::ImmutableReader;
use crate::{BarcodeFormat, BinaryBitmap, RXingResult};

/// Locates and decodes a QR code in an image: detect the symbol grid, then
/// hand it to the codeword/bit-stream decoder.
#[derive(Debug, Default)]
pub struct QrCodeReader;

impl ImmutableReader for QrCodeReader {
    fn decode_with_hints(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let black_matrix = image.get_black_matrix()?;
        let detector = Detector::new(&black_matrix);

        let try_harder = dictionary_try_harder(hints);
        let detector_result = detector
            .detect(try_harder)
            .or_else(|e| if try_harder { Err(e) } else { detector.detect(true) })?;

        if let Some(callback) = dictionary_point_callback(hints) {
            for point in detector_result.points() {
                callback(point.x, point.y);
            }
        }

        let charset = hints.get(&DecodeHintType::CHARACTER_SET).and_then(|v| match v {
            DecodeHintValue::CharacterSet(s) => Some(s.as_str()),
            _ => None,
        });

        let decoder_result = Decoder::decode(detector_result.bits(), charset)?;

        Ok(RXingResult::new(
            decoder_result.text().to_owned(),
            decoder_result.raw_bytes().to_vec(),
            detector_result.points().to_vec(),
            BarcodeFormat::QrCode,
        ))
    }
}

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

use crate::common::{Binarizer, BitMatrix, DetectorRXingResult, Result};
use crate::datamatrix::decoder::Decoder;
use crate::datamatrix::detector::Detector;
use crate::decode_hints::{dictionary_point_callback, DecodingHintDictionary};
use crate::reader::ImmutableReader;
use crate::{BarcodeFormat, BinaryBitmap, Point, RXingResult};

/// Locates and decodes a Data Matrix symbol: find its four corners via
/// the shared white-rectangle detector, sample its module grid, then
/// hand that grid to the codeword/bit-stream decoder.
#[derive(Debug, Default)]
pub struct DataMatrixReader;

impl ImmutableReader for DataMatrixReader {
    fn decode_with_hints(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        let black_matrix = image.get_black_matrix()?;

        let detector_result = Detector::new(&black_matrix).detect().or_else(|_| extract_pure_bits(&black_matrix))?;

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
            BarcodeFormat::DataMatrix,
        ))
    }
}

/// A cheap fallback for symbols filling the entire frame edge to edge
/// (a "pure" barcode with no surrounding scene): rather than running
/// the full white-rectangle corner search, trust the image's own
/// bounding box and sample the grid directly off its enclosed modules.
fn extract_pure_bits(image: &BitMatrix) -> Result<DetectorRXingResult> {
    let (left, top, width, height) = image
        .get_enclosing_rectangle()
        .ok_or_else(|| crate::Exceptions::not_found_with("empty image has no Data Matrix modules"))?;

    let module_size = module_size(left, top, image)?;

    let top_f = top as f32;
    let bottom = (top + height - 1) as f32;
    let left_f = left as f32;
    let right = (left + width - 1) as f32;

    let matrix_width = ((right - left_f) / module_size).round() as u32 + 1;
    let matrix_height = ((bottom - top_f) / module_size).round() as u32 + 1;
    if matrix_width == 0 || matrix_height == 0 {
        return Err(crate::Exceptions::not_found_with("pure Data Matrix bounding box too small"));
    }

    let nudge = module_size / 2.0;
    let mut bits = BitMatrix::new(matrix_width, matrix_height)?;
    for y in 0..matrix_height {
        let iy = top_f + nudge + y as f32 * module_size;
        for x in 0..matrix_width {
            let ix = left_f + nudge + x as f32 * module_size;
            if image.get(ix as u32, iy as u32) {
                bits.set(x, y);
            }
        }
    }

    Ok(DetectorRXingResult::new(
        bits,
        vec![Point::new(left_f, top_f), Point::new(right, top_f), Point::new(right, bottom), Point::new(left_f, bottom)],
    ))
}

fn module_size(left: u32, top: u32, image: &BitMatrix) -> Result<f32> {
    let width = image.width();
    let mut x = left;
    while x < width && image.get(x, top) {
        x += 1;
    }
    if x == width {
        return Err(crate::Exceptions::not_found_with("no white module found tracing pure Data Matrix border"));
    }
    Ok((x - left) as f32)
}

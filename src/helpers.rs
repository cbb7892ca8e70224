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

use std::io::Write;
use std::path::PathBuf;

use crate::common::{BitMatrix, HybridBinarizer, Result};
use crate::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use crate::reader::Reader;
use crate::{BarcodeFormat, BinaryBitmap, DecodeHints, Exceptions, Luma8LuminanceSource, MultiFormatReader, RXingResult};

/// Decodes the first barcode found in a plain luma8 buffer.
pub fn detect_in_luma(luma: Vec<u8>, width: u32, height: u32, barcode_type: Option<BarcodeFormat>) -> Result<RXingResult> {
    detect_in_luma_with_hints(luma, width, height, barcode_type, &DecodeHints::default())
}

pub fn detect_in_luma_with_hints(
    luma: Vec<u8>,
    width: u32,
    height: u32,
    barcode_type: Option<BarcodeFormat>,
    hints: &DecodeHints,
) -> Result<RXingResult> {
    let mut hints = hints.clone();
    if let Some(format) = barcode_type {
        hints.formats = vec![format];
    }
    hints.try_harder = true;

    let mut reader = MultiFormatReader::new(&hints);
    let bitmap = BinaryBitmap::new(HybridBinarizer::new(Luma8LuminanceSource::new(luma, width as usize, height as usize)));
    reader.decode(&bitmap)
}

/// Decodes every barcode found in a plain luma8 buffer, recursing into
/// the regions left over outside each hit's bounding box.
pub fn detect_multiple_in_luma(luma: Vec<u8>, width: u32, height: u32) -> Result<Vec<RXingResult>> {
    detect_multiple_in_luma_with_hints(luma, width, height, &DecodeHints::default())
}

pub fn detect_multiple_in_luma_with_hints(luma: Vec<u8>, width: u32, height: u32, hints: &DecodeHints) -> Result<Vec<RXingResult>> {
    let mut hints = hints.clone();
    hints.try_harder = true;

    let mut scanner = GenericMultipleBarcodeReader::new(MultiFormatReader::new(&hints));
    let bitmap = BinaryBitmap::new(HybridBinarizer::new(Luma8LuminanceSource::new(luma, width as usize, height as usize)));
    scanner.decode_multiple(&bitmap)
}

#[cfg(feature = "image")]
fn open_as_luma(file_name: &str) -> Result<Luma8LuminanceSource> {
    let img = image::open(file_name).map_err(|e| Exceptions::illegal_argument_with(format!("couldn't read '{file_name}': {e}")))?;
    let luma = img.to_luma8();
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    Ok(Luma8LuminanceSource::new(luma.into_raw(), width, height))
}

/// Decodes the first barcode found in an image file. Requires the
/// `image` feature.
#[cfg(feature = "image")]
pub fn detect_in_file(file_name: &str, barcode_type: Option<BarcodeFormat>) -> Result<RXingResult> {
    detect_in_file_with_hints(file_name, barcode_type, &DecodeHints::default())
}

#[cfg(feature = "image")]
pub fn detect_in_file_with_hints(file_name: &str, barcode_type: Option<BarcodeFormat>, hints: &DecodeHints) -> Result<RXingResult> {
    let mut hints = hints.clone();
    if let Some(format) = barcode_type {
        hints.formats = vec![format];
    }
    hints.try_harder = true;

    let mut reader = MultiFormatReader::new(&hints);
    let bitmap = BinaryBitmap::new(HybridBinarizer::new(open_as_luma(file_name)?));
    reader.decode(&bitmap)
}

/// Decodes every barcode found in an image file. Requires the `image`
/// feature.
#[cfg(feature = "image")]
pub fn detect_multiple_in_file(file_name: &str) -> Result<Vec<RXingResult>> {
    detect_multiple_in_file_with_hints(file_name, &DecodeHints::default())
}

#[cfg(feature = "image")]
pub fn detect_multiple_in_file_with_hints(file_name: &str, hints: &DecodeHints) -> Result<Vec<RXingResult>> {
    let mut hints = hints.clone();
    hints.try_harder = true;

    let mut scanner = GenericMultipleBarcodeReader::new(MultiFormatReader::new(&hints));
    let bitmap = BinaryBitmap::new(HybridBinarizer::new(open_as_luma(file_name)?));
    scanner.decode_multiple(&bitmap)
}

#[cfg(feature = "image")]
pub fn save_image(file_name: &str, bit_matrix: &BitMatrix) -> Result<()> {
    let image: image::DynamicImage = bit_matrix.into();
    image
        .save(file_name)
        .map_err(|err| Exceptions::illegal_argument_with(format!("could not save file '{file_name}': {err}")))
}

/// Writes a `BitMatrix` to `file_name`: as an image when the `image`
/// feature is enabled and the extension is recognised, otherwise as a
/// plain `X `/`  ` text grid.
pub fn save_file(file_name: &str, bit_matrix: &BitMatrix) -> Result<()> {
    let path = PathBuf::from(file_name);

    #[allow(unused_variables)]
    let ext = path.extension().map(|e| e.to_string_lossy().to_string()).unwrap_or_default();

    #[cfg(feature = "image")]
    if !ext.is_empty() && ext != "txt" {
        return save_image(file_name, bit_matrix);
    }

    let write_text = || -> std::io::Result<()> {
        let file = std::fs::File::create(&path)?;
        let mut output = std::io::BufWriter::new(file);
        output.write_all(bit_matrix.to_string().as_bytes())?;
        output.flush()
    };

    write_text().map_err(|_| Exceptions::illegal_argument_with(format!("could not write to '{file_name}'")))
}

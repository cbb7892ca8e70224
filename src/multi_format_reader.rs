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

use crate::aztec::AztecReader;
use crate::common::{Binarizer, Result};
use crate::datamatrix::DataMatrixReader;
use crate::decode_hints::{dictionary_formats, dictionary_try_harder};
use crate::oned::MultiFormatOneDReader;
use crate::pdf417::Pdf417Reader;
use crate::qrcode::QrCodeReader;
use crate::reader::Reader;
use crate::{BarcodeFormat, BinaryBitmap, DecodeHints, DecodingHintDictionary, Exceptions, RXingResult};

const ONE_D_FORMATS: &[BarcodeFormat] = &[
    BarcodeFormat::UpcA,
    BarcodeFormat::UpcE,
    BarcodeFormat::Ean13,
    BarcodeFormat::Ean8,
    BarcodeFormat::Codabar,
    BarcodeFormat::Code39,
    BarcodeFormat::Code93,
    BarcodeFormat::Code128,
    BarcodeFormat::Itf,
    BarcodeFormat::Rss14,
    BarcodeFormat::RssExpanded,
];

/// The main entry point for most uses: by default it tries every format
/// this crate supports, in the order most likely to match quickly. A
/// `POSSIBLE_FORMATS` hint narrows the reader list to just those formats.
pub struct MultiFormatReader {
    hints: DecodingHintDictionary,
    readers: Vec<Box<dyn Reader>>,
}

impl MultiFormatReader {
    pub fn new(hints: &DecodeHints) -> Self {
        let mut reader = Self { hints: DecodingHintDictionary::new(), readers: Vec::new() };
        reader.set_hints(&hints.to_dictionary());
        reader
    }

    /// Rebuilds the reader list for `hints`. Subsequent `decode_with_state`
    /// calls reuse it without reallocating, which matters for continuous
    /// scanning clients.
    pub fn set_hints(&mut self, hints: &DecodingHintDictionary) {
        self.hints = hints.clone();

        let try_harder = dictionary_try_harder(hints);
        let mut readers: Vec<Box<dyn Reader>> = Vec::new();

        if let Some(formats) = dictionary_formats(hints) {
            let add_one_d_reader = formats.iter().any(|f| ONE_D_FORMATS.contains(f));
            if add_one_d_reader && !try_harder {
                readers.push(Box::new(MultiFormatOneDReader::new(hints)));
            }
            if formats.contains(&BarcodeFormat::QrCode) {
                readers.push(Box::new(QrCodeReader));
            }
            if formats.contains(&BarcodeFormat::DataMatrix) {
                readers.push(Box::new(DataMatrixReader));
            }
            if formats.contains(&BarcodeFormat::Aztec) {
                readers.push(Box::new(AztecReader));
            }
            if formats.contains(&BarcodeFormat::Pdf417) {
                readers.push(Box::new(Pdf417Reader));
            }
            if add_one_d_reader && try_harder {
                readers.push(Box::new(MultiFormatOneDReader::new(hints)));
            }
        }

        if readers.is_empty() {
            if !try_harder {
                readers.push(Box::new(MultiFormatOneDReader::new(hints)));
            }
            readers.push(Box::new(QrCodeReader));
            readers.push(Box::new(DataMatrixReader));
            readers.push(Box::new(AztecReader));
            readers.push(Box::new(Pdf417Reader));
            if try_harder {
                readers.push(Box::new(MultiFormatOneDReader::new(hints)));
            }
        }

        self.readers = readers;
    }

    /// Decodes using the reader list built by the last `set_hints` call,
    /// without rebuilding it - the fast path for repeated scans.
    pub fn decode_with_state(&mut self, image: &BinaryBitmap<dyn Binarizer>) -> Result<RXingResult> {
        if self.readers.is_empty() {
            self.set_hints(&DecodingHintDictionary::new());
        }
        self.decode_internal(image)
    }

    fn decode_internal(&mut self, image: &BinaryBitmap<dyn Binarizer>) -> Result<RXingResult> {
        for reader in self.readers.iter_mut() {
            if let Ok(result) = reader.decode_with_hints(image, &self.hints) {
                return Ok(result);
            }
        }
        Err(Exceptions::not_found_with("No barcode detected"))
    }
}

impl Reader for MultiFormatReader {
    fn decode_with_hints(&mut self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        self.set_hints(hints);
        self.decode_internal(image)
    }
}

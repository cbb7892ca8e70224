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

use crate::common::{Binarizer, Result};
use crate::decode_hints::dictionary_formats;
use crate::oned::codabar_reader::CodabarReader;
use crate::oned::code128_reader::Code128Reader;
use crate::oned::code39_reader::Code39Reader;
use crate::oned::code93_reader::Code93Reader;
use crate::oned::itf_reader::ItfReader;
use crate::oned::multi_format_upc_ean_reader::MultiFormatUpcEanReader;
use crate::reader::ImmutableReader;
use crate::{BarcodeFormat, BinaryBitmap, DecodingHintDictionary, Exceptions, RXingResult};

const UPC_EAN_FORMATS: &[BarcodeFormat] = &[BarcodeFormat::UpcA, BarcodeFormat::UpcE, BarcodeFormat::Ean13, BarcodeFormat::Ean8];

/// Composes every 1D format reader into the single `OneDReader`-shaped
/// scan the multi-format dispatcher invokes, selecting which formats to
/// try from the caller's `POSSIBLE_FORMATS` hint (or every format, absent
/// one) - mirroring the umbrella `MultiFormatReader` one level down.
#[derive(Debug)]
pub struct MultiFormatOneDReader {
    readers: Vec<Box<dyn ImmutableReader>>,
}

impl MultiFormatOneDReader {
    pub fn new(hints: &DecodingHintDictionary) -> Self {
        let mut readers: Vec<Box<dyn ImmutableReader>> = Vec::new();

        match dictionary_formats(hints) {
            Some(formats) if !formats.is_empty() => {
                if formats.iter().any(|f| UPC_EAN_FORMATS.contains(f)) {
                    readers.push(Box::new(MultiFormatUpcEanReader::new(hints)));
                }
                if formats.contains(&BarcodeFormat::Code39) {
                    readers.push(Box::new(Code39Reader::default()));
                }
                if formats.contains(&BarcodeFormat::Code93) {
                    readers.push(Box::new(Code93Reader));
                }
                if formats.contains(&BarcodeFormat::Code128) {
                    readers.push(Box::new(Code128Reader));
                }
                if formats.contains(&BarcodeFormat::Itf) {
                    readers.push(Box::new(ItfReader::default()));
                }
                if formats.contains(&BarcodeFormat::Codabar) {
                    readers.push(Box::new(CodabarReader));
                }
            }
            _ => {}
        }

        if readers.is_empty() {
            readers.push(Box::new(MultiFormatUpcEanReader::new(hints)));
            readers.push(Box::new(Code39Reader::default()));
            readers.push(Box::new(CodabarReader));
            readers.push(Box::new(Code93Reader));
            readers.push(Box::new(Code128Reader));
            readers.push(Box::new(ItfReader::default()));
        }

        Self { readers }
    }
}

impl ImmutableReader for MultiFormatOneDReader {
    fn decode_with_hints(&self, image: &BinaryBitmap<dyn Binarizer>, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        for reader in &self.readers {
            if let Ok(result) = reader.decode_with_hints(image, hints) {
                return Ok(result);
            }
        }
        Err(Exceptions::not_found_with("no 1D barcode format matched"))
    }
}

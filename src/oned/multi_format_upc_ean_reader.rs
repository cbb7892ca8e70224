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

use crate::common::{BitArray, Result};
use crate::decode_hints::dictionary_formats;
use crate::oned::ean13_reader::Ean13Reader;
use crate::oned::ean8_reader::Ean8Reader;
use crate::oned::one_d_reader::OneDReader;
use crate::oned::upc_a_reader::UpcAReader;
use crate::oned::upc_e_reader::UpcEReader;
use crate::{BarcodeFormat, DecodingHintDictionary, Exceptions, RXingResult};

/// Tries each UPC/EAN-family reader the caller's `POSSIBLE_FORMATS` hint
/// allows (all four, absent a hint), in the order a scan is most likely to
/// hit: EAN-13 first since it subsumes UPC-A's bit pattern, then UPC-A
/// itself, then the two shorter 8-digit forms.
#[derive(Debug, Default)]
pub struct MultiFormatUpcEanReader {
    try_ean13: bool,
    try_upc_a: bool,
    try_ean8: bool,
    try_upc_e: bool,
}

impl MultiFormatUpcEanReader {
    pub fn new(hints: &DecodingHintDictionary) -> Self {
        match dictionary_formats(hints) {
            Some(formats) if !formats.is_empty() => Self {
                try_ean13: formats.contains(&BarcodeFormat::Ean13),
                try_upc_a: formats.contains(&BarcodeFormat::UpcA),
                try_ean8: formats.contains(&BarcodeFormat::Ean8),
                try_upc_e: formats.contains(&BarcodeFormat::UpcE),
            },
            _ => Self { try_ean13: true, try_upc_a: true, try_ean8: true, try_upc_e: true },
        }
    }
}

impl OneDReader for MultiFormatUpcEanReader {
    fn decode_row(&self, row_number: u32, row: &BitArray, hints: &DecodingHintDictionary) -> Result<RXingResult> {
        if self.try_ean13 {
            if let Ok(result) = Ean13Reader.decode_row(row_number, row, hints) {
                return Ok(result);
            }
        }
        if self.try_upc_a {
            if let Ok(result) = UpcAReader::default().decode_row(row_number, row, hints) {
                return Ok(result);
            }
        }
        if self.try_ean8 {
            if let Ok(result) = Ean8Reader.decode_row(row_number, row, hints) {
                return Ok(result);
            }
        }
        if self.try_upc_e {
            if let Ok(result) = UpcEReader.decode_row(row_number, row, hints) {
                return Ok(result);
            }
        }
        Err(Exceptions::not_found_with("no UPC/EAN-family reader matched this row"))
    }
}

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

/// Enumerates every barcode format the library and its `DecodeHints`
/// recognize. A format listed here need not have a working `Reader`
/// registered in `MultiFormatReader`'s default chain - `MaxiCode`, `Rss14`,
/// `RssExpanded` and `UpcEanExtension` are recognized as formats but have
/// no decoder in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum BarcodeFormat {
    UpcA,
    UpcE,
    Ean8,
    Ean13,
    Code39,
    Code93,
    Code128,
    Itf,
    Codabar,
    Rss14,
    RssExpanded,
    QrCode,
    DataMatrix,
    Aztec,
    Pdf417,
    MaxiCode,
    UpcEanExtension,
}

impl BarcodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpcA => "UPC_A",
            Self::UpcE => "UPC_E",
            Self::Ean8 => "EAN_8",
            Self::Ean13 => "EAN_13",
            Self::Code39 => "CODE_39",
            Self::Code93 => "CODE_93",
            Self::Code128 => "CODE_128",
            Self::Itf => "ITF",
            Self::Codabar => "CODABAR",
            Self::Rss14 => "RSS_14",
            Self::RssExpanded => "RSS_EXPANDED",
            Self::QrCode => "QR_CODE",
            Self::DataMatrix => "DATA_MATRIX",
            Self::Aztec => "AZTEC",
            Self::Pdf417 => "PDF_417",
            Self::MaxiCode => "MAXICODE",
            Self::UpcEanExtension => "UPC_EAN_EXTENSION",
        }
    }

    pub const ONE_D_FORMATS: &'static [BarcodeFormat] = &[
        Self::UpcA,
        Self::UpcE,
        Self::Ean8,
        Self::Ean13,
        Self::Code39,
        Self::Code93,
        Self::Code128,
        Self::Itf,
        Self::Codabar,
        Self::Rss14,
        Self::RssExpanded,
    ];
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

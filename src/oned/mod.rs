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

//! Readers for the 1D (linear) barcode symbologies: the UPC/EAN family,
//! Code 39/93/128, Interleaved 2 of 5, and Codabar.

mod codabar_reader;
mod code128_reader;
mod code39_reader;
mod code93_reader;
mod ean13_reader;
mod ean8_reader;
mod itf_reader;
mod multi_format_one_d_reader;
mod multi_format_upc_ean_reader;
pub(crate) mod one_d_reader;
mod upc_a_reader;
mod upc_e_reader;
pub(crate) mod upc_ean_reader;

pub use codabar_reader::CodabarReader;
pub use code128_reader::Code128Reader;
pub use code39_reader::Code39Reader;
pub use code93_reader::Code93Reader;
pub use ean13_reader::Ean13Reader;
pub use ean8_reader::Ean8Reader;
pub use itf_reader::ItfReader;
pub use multi_format_one_d_reader::MultiFormatOneDReader;
pub use multi_format_upc_ean_reader::MultiFormatUpcEanReader;
pub use one_d_reader::OneDReader;
pub use upc_a_reader::UpcAReader;
pub use upc_e_reader::UpcEReader;
pub use upc_ean_reader::UpcEanReader;

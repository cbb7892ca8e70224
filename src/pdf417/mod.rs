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

//! A PDF417 reader: guard-pattern row detection, GF(929) error
//! correction, and text/byte/numeric compaction bit-stream decoding.

pub mod decoder;
pub mod detector;
mod pdf417_common;

mod pdf_417_reader;

pub use pdf_417_reader::Pdf417Reader;

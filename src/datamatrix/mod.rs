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

//! A Data Matrix (ECC 200) reader: symbol detection, codeword
//! extraction, Reed-Solomon correction, and bit-stream decoding.

pub mod decoder;
pub mod detector;

mod data_matrix_reader;

pub use data_matrix_reader::DataMatrixReader;

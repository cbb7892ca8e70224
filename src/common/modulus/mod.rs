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

//! PDF417's error correction field: GF(929), a prime field rather than the
//! GF(2^8) extension fields the other symbologies use.

mod error_correction;
mod modulus_gf;
mod modulus_poly;

pub use error_correction::ModulusErrorCorrection;
pub use modulus_gf::{ModulusGf, PDF417_GF};
pub use modulus_poly::ModulusPoly;

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

mod generic_gf;
mod generic_gf_poly;
mod reed_solomon_decoder;

pub use generic_gf::{get_predefined_genericgf, GenericGf, PredefinedGenericGf, DATA_MATRIX_FIELD_256, QR_CODE_FIELD_256};
pub use generic_gf_poly::GenericGfPoly;
pub use reed_solomon_decoder::ReedSolomonDecoder;

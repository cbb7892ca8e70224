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

use crate::common::{Binarizer, Result};
use crate::{BinaryBitmap, DecodingHintDictionary, RXingResult};

/// Implemented by every format-specific decoder (`QRCodeReader`,
/// `DataMatrixReader`, the 1D family, ...) and by the composing
/// `MultiFormatReader`.
pub trait Reader {
    fn decode(&mut self, image: &BinaryBitmap<dyn Binarizer>) -> Result<RXingResult> {
        self.decode_with_hints(image, &DecodingHintDictionary::new())
    }

    fn decode_with_hints(
        &mut self,
        image: &BinaryBitmap<dyn Binarizer>,
        hints: &DecodingHintDictionary,
    ) -> Result<RXingResult>;
}

/// A `Reader` that does not need `&mut self` to decode - most format
/// readers are stateless once constructed and can implement this instead.
pub trait ImmutableReader {
    fn decode_with_hints(
        &self,
        image: &BinaryBitmap<dyn Binarizer>,
        hints: &DecodingHintDictionary,
    ) -> Result<RXingResult>;
}

impl<T: ImmutableReader> Reader for T {
    fn decode_with_hints(
        &mut self,
        image: &BinaryBitmap<dyn Binarizer>,
        hints: &DecodingHintDictionary,
    ) -> Result<RXingResult> {
        ImmutableReader::decode_with_hints(self, image, hints)
    }
}

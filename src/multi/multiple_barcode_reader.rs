/*
 * Copyright 2011 ZXing authors
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

/// Implemented by readers that can locate every barcode in an image
/// rather than just the first one found.
pub trait MultipleBarcodeReader {
    fn decode_multiple(&mut self, image: &BinaryBitmap<dyn Binarizer>) -> Result<Vec<RXingResult>> {
        self.decode_multiple_with_hints(image, &DecodingHintDictionary::new())
    }

    fn decode_multiple_with_hints(
        &mut self,
        image: &BinaryBitmap<dyn Binarizer>,
        hints: &DecodingHintDictionary,
    ) -> Result<Vec<RXingResult>>;
}

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

use crate::common::BitMatrix;
use crate::Exceptions;

/// The eight XOR masks a QR encoder may have applied to the data area to
/// avoid misleading patterns; `data_mask()` in format information says
/// which one this symbol used, so the decoder can undo it before
/// reading codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMask {
    Mask000,
    Mask001,
    Mask010,
    Mask011,
    Mask100,
    Mask101,
    Mask110,
    Mask111,
}

impl DataMask {
    pub fn for_reference(reference: u8) -> Result<Self, Exceptions> {
        match reference {
            0 => Ok(Self::Mask000),
            1 => Ok(Self::Mask001),
            2 => Ok(Self::Mask010),
            3 => Ok(Self::Mask011),
            4 => Ok(Self::Mask100),
            5 => Ok(Self::Mask101),
            6 => Ok(Self::Mask110),
            7 => Ok(Self::Mask111),
            _ => Err(Exceptions::illegal_argument_with("data mask reference out of range")),
        }
    }

    fn is_masked(self, i: u32, j: u32) -> bool {
        let (i, j) = (i as i64, j as i64);
        match self {
            Self::Mask000 => (i + j) & 0x01 == 0,
            Self::Mask001 => i & 0x01 == 0,
            Self::Mask010 => j % 3 == 0,
            Self::Mask011 => (i + j) % 3 == 0,
            Self::Mask100 => ((i / 2) + (j / 3)) & 0x01 == 0,
            Self::Mask101 => {
                let temp = i * j;
                (temp & 0x01) + (temp % 3) == 0
            }
            Self::Mask110 => {
                let temp = i * j;
                ((temp & 0x01) + (temp % 3)) & 0x01 == 0
            }
            Self::Mask111 => {
                let temp = i * j;
                (((i + j) & 0x01) + (temp % 3)) & 0x01 == 0
            }
        }
    }

    /// Flips every masked bit in place, row by row.
    pub fn unmask_bit_matrix(self, bits: &mut BitMatrix, dimension: u32) {
        for i in 0..dimension {
            for j in 0..dimension {
                if self.is_masked(i, j) {
                    bits.flip(j, i);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_reference_round_trips_all_eight_patterns() {
        for r in 0..8u8 {
            assert!(DataMask::for_reference(r).is_ok());
        }
        assert!(DataMask::for_reference(8).is_err());
    }

    #[test]
    fn unmasking_twice_is_the_identity() {
        let mut bits = BitMatrix::new(21, 21).unwrap();
        bits.set(3, 4);
        bits.set(10, 10);
        let original = bits.clone();
        let mask = DataMask::Mask101;
        mask.unmask_bit_matrix(&mut bits, 21);
        mask.unmask_bit_matrix(&mut bits, 21);
        assert_eq!(bits.to_bool_grid(), original.to_bool_grid());
    }
}

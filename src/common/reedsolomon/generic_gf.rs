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

use once_cell::sync::Lazy;

use super::GenericGfPoly;

/// A Galois field GF(2^8) defined by its primitive polynomial and the
/// generator base exponent. Precomputes the `exp`/`log` tables once at
/// construction, which is cheap enough (256 entries) to not bother caching
/// per-call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericGf {
    exp_table: Vec<i32>,
    log_table: Vec<i32>,
    zero: std::sync::Arc<GenericGfPoly>,
    one: std::sync::Arc<GenericGfPoly>,
    size: i32,
    primitive: i32,
    generator_base: i32,
}

impl GenericGf {
    pub fn new(primitive: i32, size: i32, generator_base: i32) -> Self {
        let mut exp_table = vec![0i32; size as usize];
        let mut log_table = vec![0i32; size as usize];
        let mut x = 1i32;
        for i in 0..size {
            exp_table[i as usize] = x;
            x <<= 1;
            if x >= size {
                x ^= primitive;
                x &= size - 1;
            }
        }
        for i in 0..(size - 1) {
            log_table[exp_table[i as usize] as usize] = i;
        }

        let zero = std::sync::Arc::new(GenericGfPoly::from_coefficients_unchecked(vec![0]));
        let one = std::sync::Arc::new(GenericGfPoly::from_coefficients_unchecked(vec![1]));

        Self {
            exp_table,
            log_table,
            zero,
            one,
            size,
            primitive,
            generator_base,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn generator_base(&self) -> i32 {
        self.generator_base
    }

    pub fn zero(&self) -> GenericGfPoly {
        (*self.zero).clone()
    }

    pub fn one(&self) -> GenericGfPoly {
        (*self.one).clone()
    }

    pub fn build_monomial(&self, degree: i32, coefficient: i32) -> GenericGfPoly {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0i32; degree as usize + 1];
        coefficients[0] = coefficient;
        GenericGfPoly::from_coefficients_unchecked(coefficients)
    }

    pub fn add_or_subtract(a: i32, b: i32) -> i32 {
        a ^ b
    }

    pub fn exp(&self, a: i32) -> i32 {
        self.exp_table[a as usize]
    }

    pub fn log(&self, a: i32) -> i32 {
        debug_assert!(a != 0);
        self.log_table[a as usize]
    }

    pub fn inverse(&self, a: i32) -> i32 {
        debug_assert!(a != 0);
        self.exp_table[(self.size - self.log_table[a as usize] - 1) as usize]
    }

    pub fn multiply(&self, a: i32, b: i32) -> i32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp_table[((self.log_table[a as usize] + self.log_table[b as usize]) % (self.size - 1)) as usize]
    }

    pub fn primitive(&self) -> i32 {
        self.primitive
    }
}

pub static QR_CODE_FIELD_256: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x011D, 256, 0));
pub static DATA_MATRIX_FIELD_256: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x012D, 256, 1));
pub static AZTEC_DATA_6: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x43, 64, 1));
pub static AZTEC_DATA_8: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x012D, 256, 1));
pub static AZTEC_DATA_10: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x409, 1024, 1));
pub static AZTEC_DATA_12: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x1069, 4096, 1));
pub static AZTEC_PARAM: Lazy<GenericGf> = Lazy::new(|| GenericGf::new(0x13, 16, 1));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedGenericGf {
    QrCodeField256,
    DataMatrixField256,
    AztecData6,
    AztecData8,
    AztecData10,
    AztecData12,
    AztecParam,
}

pub fn get_predefined_genericgf(which: PredefinedGenericGf) -> &'static GenericGf {
    match which {
        PredefinedGenericGf::QrCodeField256 => &QR_CODE_FIELD_256,
        PredefinedGenericGf::DataMatrixField256 => &DATA_MATRIX_FIELD_256,
        PredefinedGenericGf::AztecData6 => &AZTEC_DATA_6,
        PredefinedGenericGf::AztecData8 => &AZTEC_DATA_8,
        PredefinedGenericGf::AztecData10 => &AZTEC_DATA_10,
        PredefinedGenericGf::AztecData12 => &AZTEC_DATA_12,
        PredefinedGenericGf::AztecParam => &AZTEC_PARAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_and_log_are_inverses() {
        let field = &*QR_CODE_FIELD_256;
        for a in 1..256 {
            assert_eq!(field.exp(field.log(a)), a);
        }
    }

    #[test]
    fn multiply_by_inverse_is_one() {
        let field = &*QR_CODE_FIELD_256;
        for a in 1..256 {
            assert_eq!(field.multiply(a, field.inverse(a)), 1);
        }
    }

    #[test]
    fn data_matrix_field_uses_its_own_primitive() {
        let field = &*DATA_MATRIX_FIELD_256;
        for a in 1..256 {
            assert_eq!(field.multiply(a, field.inverse(a)), 1);
        }
        assert_eq!(field.generator_base(), 1);
    }
}

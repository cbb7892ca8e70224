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

use super::ModulusPoly;

/// A prime field `Z/modulus`, with a distinguished generator used to build
/// `exp`/`log` tables the same way `GenericGf` does for GF(2^8).
#[derive(Debug, Clone)]
pub struct ModulusGf {
    modulus: i32,
    exp_table: Vec<i32>,
    log_table: Vec<i32>,
}

impl ModulusGf {
    pub fn new(modulus: i32, generator: i32) -> Self {
        let mut exp_table = vec![0i32; modulus as usize];
        let mut log_table = vec![0i32; modulus as usize];
        let mut x = 1i32;
        for i in 0..modulus {
            exp_table[i as usize] = x;
            x = (x * generator) % modulus;
        }
        for i in 0..(modulus - 1) {
            log_table[exp_table[i as usize] as usize] = i;
        }
        Self {
            modulus,
            exp_table,
            log_table,
        }
    }

    pub fn modulus(&self) -> i32 {
        self.modulus
    }

    pub fn zero(&self) -> ModulusPoly {
        ModulusPoly::new(self, vec![0])
    }

    pub fn one(&self) -> ModulusPoly {
        ModulusPoly::new(self, vec![1])
    }

    pub fn build_monomial(&self, degree: usize, coefficient: i32) -> ModulusPoly {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0i32; degree + 1];
        coefficients[0] = coefficient;
        ModulusPoly::new(self, coefficients)
    }

    pub fn add(&self, a: i32, b: i32) -> i32 {
        (a + b) % self.modulus
    }

    pub fn subtract(&self, a: i32, b: i32) -> i32 {
        (self.modulus + a - b) % self.modulus
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
        self.exp_table[(self.modulus - self.log_table[a as usize] - 1) as usize]
    }

    pub fn multiply(&self, a: i32, b: i32) -> i32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp_table[((self.log_table[a as usize] + self.log_table[b as usize]) % (self.modulus - 1)) as usize]
    }
}

impl PartialEq for ModulusGf {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}
impl Eq for ModulusGf {}

pub static PDF417_GF: Lazy<ModulusGf> = Lazy::new(|| ModulusGf::new(929, 3));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_by_inverse_is_one() {
        let field = &*PDF417_GF;
        for a in 1..929 {
            assert_eq!(field.multiply(a, field.inverse(a)), 1);
        }
    }

    #[test]
    fn exp_log_round_trip() {
        let field = &*PDF417_GF;
        for a in 1..929 {
            assert_eq!(field.exp(field.log(a)), a);
        }
    }
}

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

use std::fmt;

use super::GenericGf;

/// A polynomial over a `GenericGf`. Coefficients are stored highest-degree
/// first; leading zero coefficients are trimmed on construction (except
/// for the zero polynomial itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericGfPoly {
    coefficients: Vec<i32>,
}

impl GenericGfPoly {
    pub fn new(coefficients: &[i32]) -> Self {
        if coefficients.len() > 1 {
            let mut first_non_zero = 0;
            while first_non_zero < coefficients.len() - 1 && coefficients[first_non_zero] == 0 {
                first_non_zero += 1;
            }
            Self {
                coefficients: coefficients[first_non_zero..].to_vec(),
            }
        } else {
            Self {
                coefficients: coefficients.to_vec(),
            }
        }
    }

    pub(super) fn from_coefficients_unchecked(coefficients: Vec<i32>) -> Self {
        Self::new(&coefficients)
    }

    pub fn coefficients(&self) -> &[i32] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    pub fn get_coefficient(&self, degree: usize) -> i32 {
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    pub fn evaluate_at(&self, field: &GenericGf, a: i32) -> i32 {
        if a == 0 {
            return self.get_coefficient(0);
        }
        if a == 1 {
            return self.coefficients.iter().fold(0, |acc, &c| GenericGf::add_or_subtract(acc, c));
        }
        let mut result = self.coefficients[0];
        for &c in &self.coefficients[1..] {
            result = GenericGf::add_or_subtract(field.multiply(a, result), c);
        }
        result
    }

    pub fn add_or_subtract(&self, other: &GenericGfPoly) -> GenericGfPoly {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let (smaller, larger) = if self.coefficients.len() <= other.coefficients.len() {
            (&self.coefficients, &other.coefficients)
        } else {
            (&other.coefficients, &self.coefficients)
        };

        let mut sum = vec![0i32; larger.len()];
        let length_diff = larger.len() - smaller.len();
        sum[..length_diff].copy_from_slice(&larger[..length_diff]);

        for i in length_diff..larger.len() {
            sum[i] = GenericGf::add_or_subtract(smaller[i - length_diff], larger[i]);
        }
        GenericGfPoly::new(&sum)
    }

    pub fn multiply(&self, field: &GenericGf, other: &GenericGfPoly) -> GenericGfPoly {
        if self.is_zero() || other.is_zero() {
            return field.zero();
        }
        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0i32; a.len() + b.len() - 1];
        for (i, &ai) in a.iter().enumerate() {
            if ai == 0 {
                continue;
            }
            for (j, &bj) in b.iter().enumerate() {
                if bj != 0 {
                    product[i + j] = GenericGf::add_or_subtract(product[i + j], field.multiply(ai, bj));
                }
            }
        }
        GenericGfPoly::new(&product)
    }

    pub fn multiply_by_scalar(&self, field: &GenericGf, scalar: i32) -> GenericGfPoly {
        if scalar == 0 {
            return field.zero();
        }
        if scalar == 1 {
            return self.clone();
        }
        let product: Vec<i32> = self.coefficients.iter().map(|&c| field.multiply(c, scalar)).collect();
        GenericGfPoly::new(&product)
    }

    pub fn multiply_by_monomial(&self, field: &GenericGf, degree: i32, coefficient: i32) -> GenericGfPoly {
        debug_assert!(degree >= 0);
        if coefficient == 0 {
            return field.zero();
        }
        let mut product = vec![0i32; self.coefficients.len() + degree as usize];
        for (i, &c) in self.coefficients.iter().enumerate() {
            product[i] = field.multiply(c, coefficient);
        }
        GenericGfPoly::new(&product)
    }

    /// Polynomial long division: returns `(quotient, remainder)`.
    pub fn divide(&self, field: &GenericGf, other: &GenericGfPoly) -> (GenericGfPoly, GenericGfPoly) {
        let mut quotient = field.zero();
        let mut remainder = self.clone();

        let denominator_leading_term = other.get_coefficient(other.degree());
        let inverse_denominator_leading_term = field.inverse(denominator_leading_term);

        while remainder.degree() >= other.degree() && !remainder.is_zero() {
            let degree_diff = remainder.degree() - other.degree();
            let scale = field.multiply(
                remainder.get_coefficient(remainder.degree()),
                inverse_denominator_leading_term,
            );
            let term = other.multiply_by_monomial(field, degree_diff as i32, scale);
            let iteration_quotient = field.build_monomial(degree_diff as i32, scale);
            quotient = quotient.add_or_subtract(&iteration_quotient);
            remainder = remainder.add_or_subtract(&term);
        }

        (quotient, remainder)
    }
}

impl fmt::Display for GenericGfPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for degree in (0..=self.degree()).rev() {
            let coefficient = self.get_coefficient(degree);
            if coefficient == 0 {
                continue;
            }
            if coefficient < 0 {
                write!(f, " - ")?;
            } else if degree != self.degree() {
                write!(f, " + ")?;
            }
            if degree == 0 || coefficient.abs() != 1 {
                write!(f, "{}", coefficient.abs())?;
            }
            if degree != 0 {
                if degree == 1 {
                    write!(f, "x")?;
                } else {
                    write!(f, "x^{degree}")?;
                }
            }
        }
        Ok(())
    }
}

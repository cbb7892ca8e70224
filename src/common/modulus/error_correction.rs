/*
 * Copyright 2012 ZXing authors
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

use crate::common::Result;
use crate::Exceptions;

use super::{ModulusGf, ModulusPoly};

/// PDF417's error corrector, working over GF(929) rather than GF(2^8).
/// The arithmetic is modular subtraction instead of XOR, so unlike the
/// Reed-Solomon decoder used by the other symbologies, the Forney
/// magnitude has to be computed from the error locator's actual formal
/// derivative and then subtracted (not XORed) back into the codeword.
#[derive(Debug, Clone, Copy)]
pub struct ModulusErrorCorrection<'f> {
    field: &'f ModulusGf,
}

impl<'f> ModulusErrorCorrection<'f> {
    pub fn new(field: &'f ModulusGf) -> Self {
        Self { field }
    }

    /// Corrects `received` in place, returning the number of errors found.
    pub fn decode(&self, received: &mut [i32], num_ec_codewords: usize, erasures: &[usize]) -> Result<usize> {
        let field = self.field;
        let poly = ModulusPoly::new(field, received.to_vec());
        let mut syndrome_coefficients = vec![0i32; num_ec_codewords];
        let mut error = false;
        for i in 1..=num_ec_codewords {
            let eval = poly.evaluate_at(field, field.exp(i as i32));
            syndrome_coefficients[num_ec_codewords - i] = eval;
            if eval != 0 {
                error = true;
            }
        }
        if !error {
            return Ok(0);
        }

        let mut known_errors = field.one();
        for &erasure in erasures {
            let b = field.exp(received.len() as i32 - 1 - erasure as i32);
            let term = ModulusPoly::new(field, vec![field.subtract(0, b), 1]);
            known_errors = known_errors.multiply(field, &term);
        }

        let mut syndrome = ModulusPoly::new(field, syndrome_coefficients);
        syndrome = syndrome.multiply(field, &known_errors);

        let (sigma, omega) =
            self.run_euclidean_algorithm(&field.build_monomial(num_ec_codewords, 1), &syndrome, num_ec_codewords)?;
        let sigma = sigma.multiply(field, &known_errors);

        let error_locations = self.find_error_locations(&sigma)?;
        let error_magnitudes = self.find_error_magnitudes(&omega, &sigma, &error_locations);

        for (i, &location) in error_locations.iter().enumerate() {
            let position = received.len() as i32 - 1 - field.log(location);
            if position < 0 {
                return Err(Exceptions::checksum_with("bad error location"));
            }
            received[position as usize] = field.subtract(received[position as usize], error_magnitudes[i]);
        }
        Ok(error_locations.len())
    }

    fn run_euclidean_algorithm(&self, a: &ModulusPoly, b: &ModulusPoly, r: usize) -> Result<(ModulusPoly, ModulusPoly)> {
        let field = self.field;
        let (mut r_last, mut r_cur) = if a.degree() < b.degree() {
            (b.clone(), a.clone())
        } else {
            (a.clone(), b.clone())
        };

        let mut t_last = field.zero();
        let mut t_cur = field.one();

        while r_cur.degree() >= r / 2 {
            let r_last_last = r_last;
            let t_last_last = t_last;
            r_last = r_cur;
            t_last = t_cur;

            if r_last.is_zero() {
                return Err(Exceptions::checksum_with("r_last is zero"));
            }

            r_cur = r_last_last;
            let mut q = field.zero();
            let denominator_leading_term = r_last.get_coefficient(r_last.degree());
            let dlt_inverse = field.inverse(denominator_leading_term);

            while r_cur.degree() >= r_last.degree() && !r_cur.is_zero() {
                let degree_diff = r_cur.degree() - r_last.degree();
                let scale = field.multiply(r_cur.get_coefficient(r_cur.degree()), dlt_inverse);
                q = q.add(field, &field.build_monomial(degree_diff, scale));
                r_cur = r_cur.subtract(field, &r_last.multiply_by_monomial(field, degree_diff, scale));
            }

            t_cur = q.multiply(field, &t_last).subtract(field, &t_last_last);

            if r_cur.degree() >= r_last.degree() {
                return Err(Exceptions::runtime_with(
                    "division algorithm failed to reduce polynomial degree",
                ));
            }
        }

        let sigma_tilde_at_zero = t_cur.get_coefficient(0);
        if sigma_tilde_at_zero == 0 {
            return Err(Exceptions::checksum_with("sigma(0) is zero"));
        }

        let inverse = field.inverse(sigma_tilde_at_zero);
        let sigma = t_cur.multiply_by_scalar(field, inverse);
        let omega = r_cur.multiply_by_scalar(field, inverse);
        Ok((sigma, omega))
    }

    fn find_error_locations(&self, error_locator: &ModulusPoly) -> Result<Vec<i32>> {
        let field = self.field;
        let num_errors = error_locator.degree();
        let mut result = vec![0i32; num_errors];
        let mut e = 0usize;
        let mut i = 1i32;
        while i < field.modulus() && e < num_errors {
            if error_locator.evaluate_at(field, i) == 0 {
                result[e] = field.inverse(i);
                e += 1;
            }
            i += 1;
        }
        if e != num_errors {
            return Err(Exceptions::checksum_with("error locator degree does not match number of roots"));
        }
        Ok(result)
    }

    fn find_error_magnitudes(&self, error_evaluator: &ModulusPoly, error_locator: &ModulusPoly, error_locations: &[i32]) -> Vec<i32> {
        let field = self.field;
        let error_locator_degree = error_locator.degree();
        let mut formal_derivative_coefficients = vec![0i32; error_locator_degree];
        for i in 1..=error_locator_degree {
            let idx = formal_derivative_coefficients.len() - i;
            formal_derivative_coefficients[idx] = field.multiply(i as i32, error_locator.get_coefficient(i));
        }
        let formal_derivative = ModulusPoly::new(field, formal_derivative_coefficients);

        let s = error_locations.len();
        let mut result = vec![0i32; s];
        for (i, &location) in error_locations.iter().enumerate() {
            let xi_inverse = field.inverse(location);
            let numerator = field.subtract(0, error_evaluator.evaluate_at(field, xi_inverse));
            let denominator = field.inverse(formal_derivative.evaluate_at(field, xi_inverse));
            result[i] = field.multiply(numerator, denominator);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::modulus_gf::PDF417_GF;
    use super::*;

    fn encode(data: &[i32], num_ec: usize) -> Vec<i32> {
        let field = &*PDF417_GF;
        let mut generator = field.one();
        for i in 0..num_ec {
            generator = generator.multiply(field, &ModulusPoly::new(field, vec![1, field.exp(i as i32)]));
        }

        let mut info_coefficients = vec![0i32; data.len() + num_ec];
        info_coefficients[..data.len()].copy_from_slice(data);
        let info = ModulusPoly::new(field, info_coefficients.clone());
        let info = info.multiply_by_monomial(field, num_ec, 1);
        let (_, remainder) = info.divide(field, &generator);

        let mut result = info_coefficients;
        let rem_coeffs = remainder.coefficients();
        let offset = num_ec - rem_coeffs.len();
        for (i, &c) in rem_coeffs.iter().enumerate() {
            result[data.len() + offset + i] = c;
        }
        result
    }

    #[test]
    fn decode_round_trip_with_no_errors() {
        let field = &*PDF417_GF;
        let data = [10, 20, 30, 40, 50];
        let mut encoded = encode(&data, 8);
        let ec = ModulusErrorCorrection::new(field);
        let fixed = ec.decode(&mut encoded, 8, &[]).unwrap();
        assert_eq!(fixed, 0);
        assert_eq!(&encoded[..data.len()], &data);
    }

    #[test]
    fn decode_recovers_from_correctable_errors() {
        let field = &*PDF417_GF;
        let data = [1, 2, 3, 4, 5, 6];
        let num_ec = 8;
        let mut encoded = encode(&data, num_ec);

        encoded[0] = (encoded[0] + 57) % 929;
        encoded[4] = (encoded[4] + 400) % 929;
        encoded[9] = (encoded[9] + 12) % 929;

        let ec = ModulusErrorCorrection::new(field);
        let fixed = ec.decode(&mut encoded, num_ec, &[]).unwrap();
        assert_eq!(fixed, 3);
        assert_eq!(&encoded[..data.len()], &data);
    }
}

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

use crate::common::Result;
use crate::Exceptions;

use super::{GenericGf, GenericGfPoly};

/// Syndrome decoder for GF(2^8): syndrome computation, the Euclidean
/// algorithm for the error locator/evaluator, Chien search, and Forney's
/// formula, corresting `received` in place.
#[derive(Debug, Clone, Copy)]
pub struct ReedSolomonDecoder<'f> {
    field: &'f GenericGf,
}

impl<'f> ReedSolomonDecoder<'f> {
    pub fn new(field: &'f GenericGf) -> Self {
        Self { field }
    }

    pub fn decode(&self, received: &mut [i32], num_ec_codewords: usize) -> Result<()> {
        let field = self.field;
        let poly = GenericGfPoly::new(received);
        let mut syndrome_coefficients = vec![0i32; num_ec_codewords];
        let mut no_error = true;
        for i in 0..num_ec_codewords {
            let eval = poly.evaluate_at(field, field.exp(i as i32 + field.generator_base()));
            let idx = syndrome_coefficients.len() - 1 - i;
            syndrome_coefficients[idx] = eval;
            if eval != 0 {
                no_error = false;
            }
        }
        if no_error {
            return Ok(());
        }

        let syndrome = GenericGfPoly::new(&syndrome_coefficients);
        let monomial = field.build_monomial(num_ec_codewords as i32, 1);
        let (sigma, omega) = self.run_euclidean_algorithm(&monomial, &syndrome, num_ec_codewords)?;

        let error_locations = self.find_error_locations(&sigma)?;
        let error_magnitudes = self.find_error_magnitudes(&omega, &error_locations);

        for (i, &location) in error_locations.iter().enumerate() {
            let position = received.len() as i32 - 1 - field.log(location);
            if position < 0 {
                return Err(Exceptions::checksum_with("bad error location"));
            }
            received[position as usize] = GenericGf::add_or_subtract(received[position as usize], error_magnitudes[i]);
        }
        Ok(())
    }

    fn run_euclidean_algorithm(
        &self,
        a: &GenericGfPoly,
        b: &GenericGfPoly,
        r: usize,
    ) -> Result<(GenericGfPoly, GenericGfPoly)> {
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
                q = q.add_or_subtract(&field.build_monomial(degree_diff as i32, scale));
                r_cur = r_cur.add_or_subtract(&r_last.multiply_by_monomial(field, degree_diff as i32, scale));
            }

            t_cur = q.multiply(field, &t_last).add_or_subtract(&t_last_last);

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

    fn find_error_locations(&self, error_locator: &GenericGfPoly) -> Result<Vec<i32>> {
        let field = self.field;
        let num_errors = error_locator.degree();
        if num_errors == 1 {
            return Ok(vec![error_locator.get_coefficient(1)]);
        }
        let mut result = vec![0i32; num_errors];
        let mut e = 0usize;
        let mut i = 1i32;
        while i < field.size() && e < num_errors {
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

    fn find_error_magnitudes(&self, error_evaluator: &GenericGfPoly, error_locations: &[i32]) -> Vec<i32> {
        let field = self.field;
        let s = error_locations.len();
        let mut result = vec![0i32; s];
        for (i, &xi_inverse) in error_locations.iter().enumerate() {
            let mut error_locator_derivative_coefficient = 1i32;
            for (j, &location) in error_locations.iter().enumerate() {
                if i == j {
                    continue;
                }
                let term = field.multiply(location, xi_inverse);
                let term = GenericGf::add_or_subtract(1, term);
                error_locator_derivative_coefficient = field.multiply(error_locator_derivative_coefficient, term);
            }
            result[i] = field.multiply(
                error_evaluator.evaluate_at(field, xi_inverse),
                field.inverse(error_locator_derivative_coefficient),
            );
            if field.generator_base() != 0 {
                result[i] = field.multiply(result[i], xi_inverse);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::QR_CODE_FIELD_256;
    use super::*;

    fn encode(data: &[i32], num_ec: usize) -> Vec<i32> {
        let field = &*QR_CODE_FIELD_256;
        let mut generator = field.one();
        for i in 0..num_ec {
            generator = generator.multiply(field, &GenericGfPoly::new(&[1, field.exp(i as i32 + field.generator_base())]));
        }

        let mut info_coefficients = vec![0i32; data.len() + num_ec];
        info_coefficients[..data.len()].copy_from_slice(data);
        let info = GenericGfPoly::new(&info_coefficients);
        let info = info.multiply_by_monomial(field, num_ec as i32, 1);
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
        let field = &*QR_CODE_FIELD_256;
        let data = [10, 20, 30, 40, 50];
        let mut encoded = encode(&data, 10);
        let decoder = ReedSolomonDecoder::new(field);
        decoder.decode(&mut encoded, 10).unwrap();
        assert_eq!(&encoded[..data.len()], &data);
    }

    #[test]
    fn decode_recovers_from_correctable_errors() {
        let field = &*QR_CODE_FIELD_256;
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let num_ec = 10;
        let mut encoded = encode(&data, num_ec);

        encoded[0] ^= 0xFF;
        encoded[3] ^= 0x7A;
        encoded[9] ^= 0x13;
        encoded[12] ^= 0x45;
        encoded[15] ^= 0x02;

        let decoder = ReedSolomonDecoder::new(field);
        decoder.decode(&mut encoded, num_ec).unwrap();
        assert_eq!(&encoded[..data.len()], &data);
    }

    #[test]
    fn decode_fails_when_errors_exceed_capacity() {
        let field = &*QR_CODE_FIELD_256;
        let data = [1, 2, 3, 4, 5];
        let num_ec = 6;
        let mut encoded = encode(&data, num_ec);
        for c in encoded.iter_mut().take(5) {
            *c ^= 0xFF;
        }
        let decoder = ReedSolomonDecoder::new(field);
        assert!(decoder.decode(&mut encoded, num_ec).is_err());
    }
}

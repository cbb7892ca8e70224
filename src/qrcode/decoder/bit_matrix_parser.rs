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

use crate::common::{BitMatrix, Result};
use crate::qrcode::decoder::{version, DataMask, FormatInformation, Version};
use crate::Exceptions;

/// Reads format information, version information, and data codewords out
/// of a sampled, unmasked symbol grid, following the zig-zag column scan
/// the QR spec defines for codeword placement.
pub struct BitMatrixParser<'m> {
    bit_matrix: BitMatrix,
    parsed_version: Option<&'static Version>,
    parsed_format_info: Option<FormatInformation>,
    mirror: bool,
    _source: std::marker::PhantomData<&'m ()>,
}

impl<'m> BitMatrixParser<'m> {
    pub fn new(bit_matrix: BitMatrix) -> Result<Self> {
        let dimension = bit_matrix.height();
        if !(21..=177).contains(&dimension) || dimension % 4 != 1 {
            return Err(Exceptions::format_with(Some("bad dimension for a QR symbol".to_owned())));
        }
        Ok(Self {
            bit_matrix,
            parsed_version: None,
            parsed_format_info: None,
            mirror: false,
            _source: std::marker::PhantomData,
        })
    }

    fn copy_bit(&self, i: u32, j: u32, version_bits: u32) -> u32 {
        let bit = if self.mirror { self.bit_matrix.get(j, i) } else { self.bit_matrix.get(i, j) };
        (version_bits << 1) | (bit as u32)
    }

    pub fn read_format_information(&mut self) -> Result<FormatInformation> {
        if let Some(info) = self.parsed_format_info {
            return Ok(info);
        }

        let mut format_info_bits1 = 0u32;
        for i in 0..6 {
            format_info_bits1 = self.copy_bit(i, 8, format_info_bits1);
        }
        format_info_bits1 = self.copy_bit(7, 8, format_info_bits1);
        format_info_bits1 = self.copy_bit(8, 8, format_info_bits1);
        format_info_bits1 = self.copy_bit(8, 7, format_info_bits1);
        for j in (0..=5).rev() {
            format_info_bits1 = self.copy_bit(8, j, format_info_bits1);
        }

        let dimension = self.bit_matrix.height();
        let mut format_info_bits2 = 0u32;
        for j in ((dimension - 7)..dimension).rev() {
            format_info_bits2 = self.copy_bit(8, j, format_info_bits2);
        }
        for i in (dimension - 8)..dimension {
            format_info_bits2 = self.copy_bit(i, 8, format_info_bits2);
        }

        let parsed = FormatInformation::decode_format_information(format_info_bits1, format_info_bits2)
            .ok_or_else(|| Exceptions::format_with(Some("could not decode format information".to_owned())))?;
        self.parsed_format_info = Some(parsed);
        Ok(parsed)
    }

    pub fn read_version(&mut self) -> Result<&'static Version> {
        if let Some(v) = self.parsed_version {
            return Ok(v);
        }

        let dimension = self.bit_matrix.height();
        let provisional_version = (dimension - 17) / 4;
        if provisional_version <= 6 {
            let v = Version::get_version_for_number(provisional_version)?;
            self.parsed_version = Some(v);
            return Ok(v);
        }

        let mut version_bits = 0u32;
        let ij_min = dimension - 11;
        for j in (0..6).rev() {
            for i in (ij_min..dimension - 8).rev() {
                version_bits = self.copy_bit(i, j, version_bits);
            }
        }

        if let Some(v) = version::decode_version_information(version_bits) {
            if v.dimension_for_version() == dimension {
                self.parsed_version = Some(v);
                return Ok(v);
            }
        }

        let mut version_bits = 0u32;
        for i in (0..6).rev() {
            for j in (ij_min..dimension - 8).rev() {
                version_bits = self.copy_bit(i, j, version_bits);
            }
        }
        if let Some(v) = version::decode_version_information(version_bits) {
            if v.dimension_for_version() == dimension {
                self.parsed_version = Some(v);
                return Ok(v);
            }
        }

        Err(Exceptions::format_with(Some("could not decode version information".to_owned())))
    }

    pub fn remask(&mut self) {
        if let Some(info) = self.parsed_format_info {
            if let Ok(mask) = DataMask::for_reference(info.data_mask()) {
                let dimension = self.bit_matrix.height();
                mask.unmask_bit_matrix(&mut self.bit_matrix, dimension);
            }
        }
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
        self.parsed_version = None;
        self.parsed_format_info = None;
    }

    pub fn mirror(&mut self) {
        for x in 0..self.bit_matrix.width() {
            for y in (x + 1)..self.bit_matrix.height() {
                if self.bit_matrix.get(x, y) != self.bit_matrix.get(y, x) {
                    self.bit_matrix.flip(y, x);
                    self.bit_matrix.flip(x, y);
                }
            }
        }
    }

    /// Reads the data + EC codewords off the grid by sweeping two
    /// columns at a time, bottom to top then top to bottom, skipping
    /// whichever cells the function pattern occupies, exactly as the
    /// symbol's codeword placement algorithm lays them down.
    pub fn read_codewords(&mut self) -> Result<Vec<u8>> {
        let format_info = self.read_format_information()?;
        let version = self.read_version()?;

        let function_pattern = version.build_function_pattern();
        self.remask();

        let dimension = self.bit_matrix.height();
        let mut result = Vec::with_capacity(version.total_codewords() as usize);
        let mut current_byte = 0u8;
        let mut bits_read = 0u32;
        let mut reading_up = true;

        let mut j = dimension as i64 - 1;
        while j > 0 {
            if j == 6 {
                j -= 1;
            }
            for count in 0..dimension {
                let i = if reading_up { dimension - 1 - count } else { count };
                for col in 0..2i64 {
                    let jj = (j - col) as u32;
                    if !function_pattern.get(jj, i) {
                        bits_read += 1;
                        current_byte <<= 1;
                        if self.bit_matrix.get(jj, i) {
                            current_byte |= 1;
                        }
                        if bits_read == 8 {
                            result.push(current_byte);
                            bits_read = 0;
                            current_byte = 0;
                        }
                    }
                }
            }
            reading_up = !reading_up;
            j -= 2;
        }

        if result.len() != version.total_codewords() as usize {
            return Err(Exceptions::format_with(Some("read wrong number of codewords".to_owned())));
        }
        Ok(result)
    }
}

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

use crate::Exceptions;

use super::{BitArray, Result};

const WORD_BITS: usize = super::bit_array::WORD_BITS;

/// A W x H matrix of bits stored row-major in 32-bit words, one fresh
/// word per row so a row can be sliced out cheaply into a `BitArray`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: u32,
    height: u32,
    row_size: usize,
    bits: Vec<u32>,
}

impl BitMatrix {
    pub fn with_single_dimension(dimension: u32) -> Result<Self> {
        Self::new(dimension, dimension)
    }

    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(Exceptions::illegal_argument_with(
                "Both dimensions must be greater than 0",
            ));
        }
        let row_size = (width as usize).div_ceil(WORD_BITS);
        Ok(Self {
            width,
            height,
            row_size,
            bits: vec![0; row_size * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Exceptions::illegal_argument_with(format!(
                "coordinate ({x},{y}) out of bounds for {}x{} matrix",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        let offset = y as usize * self.row_size + (x as usize / WORD_BITS);
        (self.bits[offset] >> (x as usize & (WORD_BITS - 1)) & 1) != 0
    }

    pub fn try_get(&self, x: u32, y: u32) -> Result<bool> {
        self.check_bounds(x, y)?;
        Ok(self.get(x, y))
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let offset = y as usize * self.row_size + (x as usize / WORD_BITS);
        self.bits[offset] |= 1u32 << (x as usize & (WORD_BITS - 1));
    }

    pub fn unset(&mut self, x: u32, y: u32) {
        let offset = y as usize * self.row_size + (x as usize / WORD_BITS);
        self.bits[offset] &= !(1u32 << (x as usize & (WORD_BITS - 1)));
    }

    pub fn flip(&mut self, x: u32, y: u32) {
        let offset = y as usize * self.row_size + (x as usize / WORD_BITS);
        self.bits[offset] ^= 1u32 << (x as usize & (WORD_BITS - 1));
    }

    pub fn flip_all(&mut self) {
        for b in self.bits.iter_mut() {
            *b = !*b;
        }
    }

    pub fn xor(&mut self, other: &BitMatrix) -> Result<()> {
        if self.width != other.width || self.height != other.height || self.row_size != other.row_size {
            return Err(Exceptions::illegal_argument_with(
                "input matrix dimensions do not match",
            ));
        }
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a ^= *b;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        for b in self.bits.iter_mut() {
            *b = 0;
        }
    }

    pub fn set_region(&mut self, left: u32, top: u32, width: u32, height: u32) -> Result<()> {
        if width < 1 || height < 1 {
            return Err(Exceptions::illegal_argument_with("width and height must be at least 1"));
        }
        let right = left + width;
        let bottom = top + height;
        if right > self.width || bottom > self.height {
            return Err(Exceptions::illegal_argument_with(
                "region must fit inside the matrix",
            ));
        }
        for y in top..bottom {
            let offset = y as usize * self.row_size;
            for x in left..right {
                self.bits[offset + (x as usize / WORD_BITS)] |= 1u32 << (x as usize & (WORD_BITS - 1));
            }
        }
        Ok(())
    }

    /// Extracts row `y` into `row` if it is already large enough, otherwise
    /// returns a freshly allocated `BitArray` of the right size - callers
    /// must use the returned value, never assume in-place reuse.
    pub fn get_row(&self, y: u32, row: Option<BitArray>) -> BitArray {
        let mut row = match row {
            Some(r) if r.size() >= self.width as usize => r,
            _ => BitArray::with_size(self.width as usize),
        };
        let offset = y as usize * self.row_size;
        for x in 0..self.row_size {
            row.set_bulk(x, self.bits[offset + x]);
        }
        row
    }

    pub fn set_row(&mut self, y: u32, row: &BitArray) {
        let offset = y as usize * self.row_size;
        self.bits[offset..offset + self.row_size].copy_from_slice(&row.words()[..self.row_size]);
    }

    /// Shifts every row `y` rows upward, filling the freed rows below with
    /// zero bits. Used after cropping a detected symbol's bounding box.
    pub fn rotate180(&mut self) {
        let width = self.width;
        let height = self.height;
        let mut top_row = BitArray::with_size(width as usize);
        let mut bottom_row = BitArray::with_size(width as usize);
        for i in 0..((height + 1) / 2) {
            top_row = self.get_row(i, Some(top_row));
            bottom_row = self.get_row(height - 1 - i, Some(bottom_row));
            top_row.reverse();
            bottom_row.reverse();
            self.set_row(i, &bottom_row);
            self.set_row(height - 1 - i, &top_row);
        }
    }

    /// Returns `(left, top, width, height)` of the smallest enclosing box of
    /// set bits, or `None` if the matrix is entirely unset.
    pub fn get_enclosing_rectangle(&self) -> Option<(u32, u32, u32, u32)> {
        let mut left = self.width;
        let mut top = self.height;
        let mut right: i64 = -1;
        let mut bottom: i64 = -1;

        for y in 0..self.height {
            for x32 in 0..self.row_size {
                let word = self.bits[y as usize * self.row_size + x32];
                if word == 0 {
                    continue;
                }
                if y < top {
                    top = y;
                }
                if y as i64 > bottom {
                    bottom = y as i64;
                }
                let base = x32 as u32 * WORD_BITS as u32;
                if base < left {
                    let bit = word.trailing_zeros();
                    if base + bit < left {
                        left = base + bit;
                    }
                }
                let msb = WORD_BITS as u32 - 1 - word.leading_zeros();
                if (base + msb) as i64 > right {
                    right = (base + msb) as i64;
                }
            }
        }

        if right < left as i64 || bottom < 0 {
            None
        } else {
            Some((left, top, right as u32 - left + 1, bottom as u32 - top + 1))
        }
    }

    pub fn to_bool_grid(&self) -> Vec<Vec<bool>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.get(x, y)).collect())
            .collect()
    }

    pub fn parse_bools(image: &[Vec<bool>]) -> Result<Self> {
        let height = image.len() as u32;
        let width = image[0].len() as u32;
        let mut m = BitMatrix::new(width, height)?;
        for (y, row) in image.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                if bit {
                    m.set(x as u32, y as u32);
                }
            }
        }
        Ok(m)
    }
}

#[cfg(feature = "image")]
impl From<&BitMatrix> for image::DynamicImage {
    /// Black modules become black pixels, everything else white - the
    /// inverse of the convention `HybridBinarizer` consumes.
    fn from(matrix: &BitMatrix) -> Self {
        let mut buffer = image::GrayImage::new(matrix.width(), matrix.height());
        for y in 0..matrix.height() {
            for x in 0..matrix.width() {
                let value = if matrix.get(x, y) { 0u8 } else { 255u8 };
                buffer.put_pixel(x, y, image::Luma([value]));
            }
        }
        image::DynamicImage::ImageLuma8(buffer)
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", if self.get(x, y) { "X " } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_flip() {
        let mut m = BitMatrix::new(33, 5).unwrap();
        assert!(!m.get(32, 4));
        m.set(32, 4);
        assert!(m.get(32, 4));
        m.flip(32, 4);
        assert!(!m.get(32, 4));
    }

    #[test]
    fn set_region_bounds_checked() {
        let mut m = BitMatrix::new(10, 10).unwrap();
        assert!(m.set_region(8, 8, 5, 1).is_err());
        m.set_region(2, 2, 3, 3).unwrap();
        for y in 2..5 {
            for x in 2..5 {
                assert!(m.get(x, y));
            }
        }
        assert!(!m.get(1, 1));
        assert!(!m.get(5, 5));
    }

    #[test]
    fn get_row_extracts_full_row() {
        let mut m = BitMatrix::new(40, 3).unwrap();
        m.set(0, 1);
        m.set(39, 1);
        let row = m.get_row(1, None);
        assert_eq!(row.size(), 40);
        assert!(row.get(0));
        assert!(row.get(39));
        assert!(!row.get(20));
    }

    #[test]
    fn enclosing_rectangle_of_empty_matrix_is_none() {
        let m = BitMatrix::new(10, 10).unwrap();
        assert!(m.get_enclosing_rectangle().is_none());
    }

    #[test]
    fn enclosing_rectangle_tight_bounds() {
        let mut m = BitMatrix::new(20, 20).unwrap();
        m.set(3, 4);
        m.set(10, 15);
        let (left, top, width, height) = m.get_enclosing_rectangle().unwrap();
        assert_eq!((left, top), (3, 4));
        assert_eq!((left + width - 1, top + height - 1), (10, 15));
    }
}

/*
 * Copyright 2010 ZXing authors
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
use crate::datamatrix::decoder::Version;
use crate::Exceptions;

/// Strips a sampled symbol grid down to its data region (discarding the
/// alternating solid/clock-track border and any interior alignment
/// patterns a large symbol carries), then walks the interleaved "Utah"
/// diagonal sweep ECC 200 lays codewords out in to recover the raw
/// codeword bytes.
pub struct BitMatrixParser {
    mapping_bit_matrix: BitMatrix,
    read_mapping_matrix: BitMatrix,
    version: &'static Version,
}

impl BitMatrixParser {
    pub fn new(bit_matrix: &BitMatrix) -> Result<Self, Exceptions> {
        let dimension = bit_matrix.height();
        if !(8..=144).contains(&dimension) || dimension & 0x01 != 0 {
            return Err(Exceptions::illegal_argument_with("dimension must be even, 8 <= d <= 144"));
        }

        let version = Version::get_version_for_dimensions(bit_matrix.height(), bit_matrix.width())?;
        let mapping_bit_matrix = extract_data_region(bit_matrix, version)?;
        let read_mapping_matrix = BitMatrix::new(mapping_bit_matrix.width(), mapping_bit_matrix.height())?;

        Ok(Self { mapping_bit_matrix, read_mapping_matrix, version })
    }

    pub fn version(&self) -> &'static Version {
        self.version
    }

    pub fn read_codewords(&mut self) -> Result<Vec<u8>, Exceptions> {
        let mut result = vec![0u8; self.version.total_codewords() as usize];
        let mut result_offset = 0usize;

        let mut row = 4i32;
        let mut column = 0i32;

        let num_rows = self.mapping_bit_matrix.height() as i32;
        let num_columns = self.mapping_bit_matrix.width() as i32;

        let mut corner1_read = false;
        let mut corner2_read = false;
        let mut corner3_read = false;
        let mut corner4_read = false;

        loop {
            if row == num_rows && column == 0 && !corner1_read {
                result[result_offset] = self.read_corner1(num_rows, num_columns);
                result_offset += 1;
                row -= 2;
                column += 2;
                corner1_read = true;
            } else if row == num_rows - 2 && column == 0 && (num_columns & 0x03) != 0 && !corner2_read {
                result[result_offset] = self.read_corner2(num_rows, num_columns);
                result_offset += 1;
                row -= 2;
                column += 2;
                corner2_read = true;
            } else if row == num_rows + 4 && column == 2 && (num_columns & 0x07) == 0 && !corner3_read {
                result[result_offset] = self.read_corner3(num_rows, num_columns);
                result_offset += 1;
                row -= 2;
                column += 2;
                corner3_read = true;
            } else if row == num_rows - 2 && column == 0 && (num_columns & 0x07) == 4 && !corner4_read {
                result[result_offset] = self.read_corner4(num_rows, num_columns);
                result_offset += 1;
                row -= 2;
                column += 2;
                corner4_read = true;
            } else {
                loop {
                    if row < num_rows && column >= 0 && !self.read_mapping_matrix.get(column as u32, row as u32) {
                        result[result_offset] = self.read_utah(row, column, num_rows, num_columns);
                        result_offset += 1;
                    }
                    row -= 2;
                    column += 2;
                    if !(row >= 0 && column < num_columns) {
                        break;
                    }
                }
                row += 1;
                column += 3;

                loop {
                    if row >= 0 && column < num_columns && !self.read_mapping_matrix.get(column as u32, row as u32) {
                        result[result_offset] = self.read_utah(row, column, num_rows, num_columns);
                        result_offset += 1;
                    }
                    row += 2;
                    column -= 2;
                    if !(row < num_rows && column >= 0) {
                        break;
                    }
                }
                row += 3;
                column += 1;
            }
            if !(row < num_rows || column < num_columns) {
                break;
            }
        }

        if result_offset != self.version.total_codewords() as usize {
            return Err(Exceptions::not_found_with("did not read all Data Matrix codewords"));
        }
        Ok(result)
    }

    fn read_module(&mut self, row: i32, column: i32, num_rows: i32, num_columns: i32) -> bool {
        let (mut row, mut column) = (row, column);
        if row < 0 {
            row += num_rows;
            column += 4 - ((num_rows + 4) & 0x07);
        }
        if column < 0 {
            column += num_columns;
            row += 4 - ((num_columns + 4) & 0x07);
        }
        self.read_mapping_matrix.set(column as u32, row as u32);
        self.mapping_bit_matrix.get(column as u32, row as u32)
    }

    fn read_utah(&mut self, row: i32, column: i32, num_rows: i32, num_columns: i32) -> u8 {
        let mut current_byte = 0u8;
        for (dr, dc) in [(-2, -2), (-2, -1), (-1, -2), (-1, -1), (-1, 0), (0, -2), (0, -1), (0, 0)] {
            current_byte <<= 1;
            if self.read_module(row + dr, column + dc, num_rows, num_columns) {
                current_byte |= 1;
            }
        }
        current_byte
    }

    fn read_corner1(&mut self, num_rows: i32, num_columns: i32) -> u8 {
        let mut current_byte = 0u8;
        for (r, c) in [
            (num_rows - 1, 0),
            (num_rows - 1, 1),
            (num_rows - 1, 2),
            (0, num_columns - 2),
            (0, num_columns - 1),
            (1, num_columns - 1),
            (2, num_columns - 1),
            (3, num_columns - 1),
        ] {
            current_byte <<= 1;
            if self.read_module(r, c, num_rows, num_columns) {
                current_byte |= 1;
            }
        }
        current_byte
    }

    fn read_corner2(&mut self, num_rows: i32, num_columns: i32) -> u8 {
        let mut current_byte = 0u8;
        for (r, c) in [
            (num_rows - 3, 0),
            (num_rows - 2, 0),
            (num_rows - 1, 0),
            (0, num_columns - 4),
            (0, num_columns - 3),
            (0, num_columns - 2),
            (0, num_columns - 1),
            (1, num_columns - 1),
        ] {
            current_byte <<= 1;
            if self.read_module(r, c, num_rows, num_columns) {
                current_byte |= 1;
            }
        }
        current_byte
    }

    fn read_corner3(&mut self, num_rows: i32, num_columns: i32) -> u8 {
        let mut current_byte = 0u8;
        for (r, c) in [
            (num_rows - 1, 0),
            (num_rows - 1, num_columns - 1),
            (0, num_columns - 3),
            (0, num_columns - 2),
            (0, num_columns - 1),
            (1, num_columns - 3),
            (1, num_columns - 2),
            (1, num_columns - 1),
        ] {
            current_byte <<= 1;
            if self.read_module(r, c, num_rows, num_columns) {
                current_byte |= 1;
            }
        }
        current_byte
    }

    fn read_corner4(&mut self, num_rows: i32, num_columns: i32) -> u8 {
        let mut current_byte = 0u8;
        for (r, c) in [
            (num_rows - 3, 0),
            (num_rows - 2, 0),
            (num_rows - 1, 0),
            (0, num_columns - 2),
            (0, num_columns - 1),
            (1, num_columns - 1),
            (2, num_columns - 1),
            (3, num_columns - 1),
        ] {
            current_byte <<= 1;
            if self.read_module(r, c, num_rows, num_columns) {
                current_byte |= 1;
            }
        }
        current_byte
    }
}

/// Peels off the solid border and any interior alignment-pattern rows
/// and columns a multi-region symbol has, concatenating the remaining
/// data-bearing rows/columns into one contiguous grid.
fn extract_data_region(bit_matrix: &BitMatrix, version: &Version) -> Result<BitMatrix, Exceptions> {
    let symbol_size_rows = version.symbol_size_rows;
    let symbol_size_columns = version.symbol_size_columns;

    if bit_matrix.height() != symbol_size_rows {
        return Err(Exceptions::illegal_argument_with("dimension of bitMatrix must match the version size"));
    }

    let data_region_size_rows = version.data_region_size_rows;
    let data_region_size_columns = version.data_region_size_columns;

    let num_data_regions_row = symbol_size_rows / data_region_size_rows;
    let num_data_regions_column = symbol_size_columns / data_region_size_columns;

    let size_data_region_row = num_data_regions_row * data_region_size_rows;
    let size_data_region_column = num_data_regions_column * data_region_size_columns;

    let mut bit_matrix_without_alignment = BitMatrix::new(size_data_region_column, size_data_region_row)?;
    for data_region_row in 0..num_data_regions_row {
        let data_region_row_offset = data_region_row * data_region_size_rows;
        for data_region_column in 0..num_data_regions_column {
            let data_region_column_offset = data_region_column * data_region_size_columns;
            for i in 0..data_region_size_rows {
                let read_row_offset = data_region_row * (data_region_size_rows + 2) + 1 + i;
                let write_row_offset = data_region_row_offset + i;
                for j in 0..data_region_size_columns {
                    let read_column_offset = data_region_column * (data_region_size_columns + 2) + 1 + j;
                    if bit_matrix.get(read_column_offset, read_row_offset) {
                        let write_column_offset = data_region_column_offset + j;
                        bit_matrix_without_alignment.set(write_column_offset, write_row_offset);
                    }
                }
            }
        }
    }
    Ok(bit_matrix_without_alignment)
}

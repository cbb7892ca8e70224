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

use once_cell::sync::Lazy;

use crate::Exceptions;

/// One block size within a symbol's error-correction layout: `count`
/// interleaved Reed-Solomon blocks, each carrying `data_codewords`
/// data bytes (plus the version's shared `ec_codewords_per_block`).
#[derive(Debug, Clone, Copy)]
pub struct EcBlock {
    pub count: u32,
    pub data_codewords: u32,
}

#[derive(Debug, Clone)]
pub struct EcBlocks {
    pub ec_codewords_per_block: u32,
    pub ec_blocks: Vec<EcBlock>,
}

/// One of the 24 square or 6 rectangular ECC 200 symbol sizes: how many
/// rows/columns the full symbol (including its alignment patterns) and
/// its interior data region occupy, and the Reed-Solomon block layout
/// that many data bytes need.
#[derive(Debug, Clone)]
pub struct Version {
    pub version_number: u32,
    pub symbol_size_rows: u32,
    pub symbol_size_columns: u32,
    pub data_region_size_rows: u32,
    pub data_region_size_columns: u32,
    pub ec_blocks: EcBlocks,
    total_codewords: u32,
}

impl Version {
    fn new(version_number: u32, symbol_size_rows: u32, symbol_size_columns: u32, data_region_size_rows: u32, data_region_size_columns: u32, ec_codewords_per_block: u32, ec_blocks: Vec<EcBlock>) -> Self {
        let total_data_codewords: u32 = ec_blocks.iter().map(|b| b.count * b.data_codewords).sum();
        let total_blocks: u32 = ec_blocks.iter().map(|b| b.count).sum();
        let total_codewords = total_data_codewords + ec_codewords_per_block * total_blocks;
        Self {
            version_number,
            symbol_size_rows,
            symbol_size_columns,
            data_region_size_rows,
            data_region_size_columns,
            ec_blocks: EcBlocks { ec_codewords_per_block, ec_blocks },
            total_codewords,
        }
    }

    pub fn total_codewords(&self) -> u32 {
        self.total_codewords
    }

    pub fn data_region_rows_per_symbol(&self) -> u32 {
        self.symbol_size_rows / self.data_region_size_rows
    }

    pub fn data_region_columns_per_symbol(&self) -> u32 {
        self.symbol_size_columns / self.data_region_size_columns
    }

    pub fn get_version_for_dimensions(num_rows: u32, num_columns: u32) -> Result<&'static Version, Exceptions> {
        if num_rows & 0x01 != 0 || num_columns & 0x01 != 0 {
            return Err(Exceptions::illegal_argument_with("dimensions must be even"));
        }
        VERSIONS
            .iter()
            .find(|v| v.symbol_size_rows == num_rows && v.symbol_size_columns == num_columns)
            .ok_or_else(|| Exceptions::not_found_with("no Data Matrix version matches this dimension"))
    }
}

fn eb(count: u32, data_codewords: u32) -> EcBlock {
    EcBlock { count, data_codewords }
}

/// The fixed ECC 200 symbol table: 24 square sizes (10x10 through
/// 144x144) followed by 6 rectangular sizes (8x18 through 16x48).
static VERSIONS: Lazy<Vec<Version>> = Lazy::new(|| {
    vec![
        Version::new(1, 10, 10, 8, 8, 5, vec![eb(1, 3)]),
        Version::new(2, 12, 12, 10, 10, 7, vec![eb(1, 5)]),
        Version::new(3, 14, 14, 12, 12, 10, vec![eb(1, 8)]),
        Version::new(4, 16, 16, 14, 14, 12, vec![eb(1, 12)]),
        Version::new(5, 18, 18, 16, 16, 14, vec![eb(1, 18)]),
        Version::new(6, 20, 20, 18, 18, 18, vec![eb(1, 22)]),
        Version::new(7, 22, 22, 20, 20, 20, vec![eb(1, 30)]),
        Version::new(8, 24, 24, 22, 22, 24, vec![eb(1, 36)]),
        Version::new(9, 26, 26, 24, 24, 28, vec![eb(1, 44)]),
        Version::new(10, 32, 32, 14, 14, 36, vec![eb(1, 62)]),
        Version::new(11, 36, 36, 16, 16, 42, vec![eb(1, 86)]),
        Version::new(12, 40, 40, 18, 18, 48, vec![eb(1, 114)]),
        Version::new(13, 44, 44, 20, 20, 56, vec![eb(1, 144)]),
        Version::new(14, 48, 48, 22, 22, 68, vec![eb(1, 174)]),
        Version::new(15, 52, 52, 24, 24, 42, vec![eb(2, 102)]),
        Version::new(16, 64, 64, 14, 14, 56, vec![eb(2, 140)]),
        Version::new(17, 72, 72, 16, 16, 36, vec![eb(4, 92)]),
        Version::new(18, 80, 80, 18, 18, 48, vec![eb(4, 114)]),
        Version::new(19, 88, 88, 20, 20, 56, vec![eb(4, 144)]),
        Version::new(20, 96, 96, 22, 22, 68, vec![eb(4, 174)]),
        Version::new(21, 104, 104, 24, 24, 56, vec![eb(6, 136)]),
        Version::new(22, 120, 120, 18, 18, 68, vec![eb(6, 175)]),
        Version::new(23, 132, 132, 20, 20, 62, vec![eb(8, 163)]),
        Version::new(24, 144, 144, 22, 22, 62, vec![eb(4, 156), eb(18, 155)]),
        Version::new(25, 8, 18, 6, 16, 7, vec![eb(1, 5)]),
        Version::new(26, 8, 32, 6, 14, 11, vec![eb(1, 10)]),
        Version::new(27, 12, 26, 10, 24, 14, vec![eb(1, 16)]),
        Version::new(28, 12, 36, 10, 16, 18, vec![eb(1, 22)]),
        Version::new(29, 16, 36, 14, 16, 24, vec![eb(1, 32)]),
        Version::new(30, 16, 48, 14, 22, 28, vec![eb(1, 49)]),
    ]
});

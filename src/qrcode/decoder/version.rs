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

use crate::common::BitMatrix;
use crate::qrcode::decoder::ErrorCorrectionLevel;
use crate::Exceptions;

/// One group of identically-sized Reed-Solomon blocks within a version's
/// data area (versions above 1 typically split their data into several
/// same-size groups, e.g. "2 blocks of 43 plus 2 blocks of 44").
#[derive(Debug, Clone, Copy)]
pub struct Ecb {
    pub count: u32,
    pub data_codewords: u32,
}

impl Ecb {
    const fn new(count: u32, data_codewords: u32) -> Self {
        Self { count, data_codewords }
    }
}

#[derive(Debug, Clone)]
pub struct EcBlocks {
    pub ec_codewords_per_block: u32,
    pub ec_blocks: Vec<Ecb>,
}

impl EcBlocks {
    fn new(ec_codewords_per_block: u32, ec_blocks: Vec<Ecb>) -> Self {
        Self {
            ec_codewords_per_block,
            ec_blocks,
        }
    }

    pub fn num_blocks(&self) -> u32 {
        self.ec_blocks.iter().map(|b| b.count).sum()
    }

    pub fn total_ec_codewords(&self) -> u32 {
        self.ec_codewords_per_block * self.num_blocks()
    }
}

#[derive(Debug, Clone)]
pub struct Version {
    pub version_number: u32,
    pub alignment_pattern_centers: Vec<u32>,
    ec_blocks: [EcBlocks; 4],
    total_codewords: u32,
}

impl Version {
    fn new(version_number: u32, alignment_pattern_centers: &[u32], l: EcBlocks, m: EcBlocks, q: EcBlocks, h: EcBlocks) -> Self {
        let total = l.ec_blocks.iter().map(|b| b.count * (b.data_codewords + l.ec_codewords_per_block)).sum();
        Self {
            version_number,
            alignment_pattern_centers: alignment_pattern_centers.to_vec(),
            ec_blocks: [l, m, q, h],
            total_codewords: total,
        }
    }

    pub fn dimension_for_version(&self) -> u32 {
        17 + 4 * self.version_number
    }

    pub fn total_codewords(&self) -> u32 {
        self.total_codewords
    }

    pub fn ec_blocks_for_level(&self, level: ErrorCorrectionLevel) -> &EcBlocks {
        match level {
            ErrorCorrectionLevel::L => &self.ec_blocks[0],
            ErrorCorrectionLevel::M => &self.ec_blocks[1],
            ErrorCorrectionLevel::Q => &self.ec_blocks[2],
            ErrorCorrectionLevel::H => &self.ec_blocks[3],
        }
    }

    pub fn get_version_for_number(version_number: u32) -> Result<&'static Version, Exceptions> {
        VERSIONS
            .get((version_number as usize).wrapping_sub(1))
            .filter(|_| (1..=40).contains(&version_number))
            .ok_or_else(|| Exceptions::illegal_argument_with("version number out of range"))
    }

    pub fn get_provisional_version_for_dimension(dimension: u32) -> Result<&'static Version, Exceptions> {
        if dimension % 4 != 1 {
            return Err(Exceptions::not_found_with("dimension is not 4k+1"));
        }
        let version_number = (dimension - 17) / 4;
        Version::get_version_for_number(version_number)
    }

    /// Builds the blank function-pattern mask: finder patterns, timing
    /// lines, the dark module, and (for versions >= 7) the two version
    /// information blocks, all marked so the caller can avoid reading
    /// data bits out of them.
    pub fn build_function_pattern(&self) -> BitMatrix {
        let dimension = self.dimension_for_version();
        let mut matrix = BitMatrix::new(dimension, dimension).unwrap();

        matrix.set_region(0, 0, 9, 9).unwrap();
        matrix.set_region(dimension - 8, 0, 8, 9).unwrap();
        matrix.set_region(0, dimension - 8, 9, 8).unwrap();

        let max_alignment_value = self.alignment_pattern_centers.len();
        for x in 0..max_alignment_value {
            let i = self.alignment_pattern_centers[x];
            for y in 0..max_alignment_value {
                let j = self.alignment_pattern_centers[y];
                if (x == 0 && (y == 0 || y == max_alignment_value - 1)) || (x == max_alignment_value - 1 && y == 0) {
                    continue;
                }
                if i < 2 || j < 2 {
                    continue;
                }
                matrix.set_region(i - 2, j - 2, 5, 5).unwrap();
            }
        }

        matrix.set_region(6, 9, 1, dimension - 17).unwrap();
        matrix.set_region(9, 6, dimension - 17, 1).unwrap();

        if self.version_number > 6 {
            matrix.set_region(dimension - 11, 0, 3, 6).unwrap();
            matrix.set_region(0, dimension - 11, 6, 3).unwrap();
        }

        matrix
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version_number)
    }
}

/// Hamming-weighted decode table for the two redundant 18-bit version
/// information blocks carried by versions 7 and up.
static VERSION_DECODE_INFO: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78, 0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683,
    0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB, 0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

pub fn decode_version_information(version_bits: u32) -> Option<&'static Version> {
    let mut best_difference = u32::MAX;
    let mut best_version = 0usize;
    for (i, &target) in VERSION_DECODE_INFO.iter().enumerate() {
        if target == version_bits {
            return Version::get_version_for_number((i + 7) as u32).ok();
        }
        let bits_difference = (target ^ version_bits).count_ones();
        if bits_difference < best_difference {
            best_version = i + 7;
            best_difference = bits_difference;
        }
    }
    if best_difference <= 3 {
        Version::get_version_for_number(best_version as u32).ok()
    } else {
        None
    }
}

macro_rules! v {
    ($n:expr, [$($a:expr),* $(,)?], $l:expr, $m:expr, $q:expr, $h:expr) => {
        Version::new($n, &[$($a),*], $l, $m, $q, $h)
    };
}

fn ecb(count: u32, data: u32) -> Ecb {
    Ecb::new(count, data)
}

fn blocks(ec_per_block: u32, blocks: Vec<Ecb>) -> EcBlocks {
    EcBlocks::new(ec_per_block, blocks)
}

static VERSIONS: Lazy<Vec<Version>> = Lazy::new(|| {
    vec![
        v!(1, [], blocks(7, vec![ecb(1, 19)]), blocks(10, vec![ecb(1, 16)]), blocks(13, vec![ecb(1, 13)]), blocks(17, vec![ecb(1, 9)])),
        v!(2, [6, 18], blocks(10, vec![ecb(1, 34)]), blocks(16, vec![ecb(1, 28)]), blocks(22, vec![ecb(1, 22)]), blocks(28, vec![ecb(1, 16)])),
        v!(3, [6, 22], blocks(15, vec![ecb(1, 55)]), blocks(26, vec![ecb(1, 44)]), blocks(18, vec![ecb(2, 17)]), blocks(22, vec![ecb(2, 13)])),
        v!(4, [6, 26], blocks(20, vec![ecb(1, 80)]), blocks(18, vec![ecb(2, 32)]), blocks(26, vec![ecb(2, 24)]), blocks(16, vec![ecb(4, 9)])),
        v!(5, [6, 30], blocks(26, vec![ecb(1, 108)]), blocks(24, vec![ecb(2, 43)]), blocks(18, vec![ecb(2, 15), ecb(2, 16)]), blocks(22, vec![ecb(2, 11), ecb(2, 12)])),
        v!(6, [6, 34], blocks(18, vec![ecb(2, 68)]), blocks(16, vec![ecb(4, 27)]), blocks(24, vec![ecb(4, 19)]), blocks(28, vec![ecb(4, 15)])),
        v!(7, [6, 22, 38], blocks(20, vec![ecb(2, 78)]), blocks(18, vec![ecb(4, 31)]), blocks(18, vec![ecb(2, 14), ecb(4, 15)]), blocks(26, vec![ecb(4, 13), ecb(1, 14)])),
        v!(8, [6, 24, 42], blocks(24, vec![ecb(2, 97)]), blocks(22, vec![ecb(2, 38), ecb(2, 39)]), blocks(22, vec![ecb(4, 18), ecb(2, 19)]), blocks(26, vec![ecb(4, 14), ecb(2, 15)])),
        v!(9, [6, 26, 46], blocks(30, vec![ecb(2, 116)]), blocks(22, vec![ecb(3, 36), ecb(2, 37)]), blocks(20, vec![ecb(4, 16), ecb(4, 17)]), blocks(24, vec![ecb(4, 12), ecb(4, 13)])),
        v!(10, [6, 28, 50], blocks(18, vec![ecb(2, 68), ecb(2, 69)]), blocks(26, vec![ecb(4, 43), ecb(1, 44)]), blocks(24, vec![ecb(6, 19), ecb(2, 20)]), blocks(28, vec![ecb(6, 15), ecb(2, 16)])),
        v!(11, [6, 30, 54], blocks(20, vec![ecb(4, 81)]), blocks(30, vec![ecb(1, 50), ecb(4, 51)]), blocks(28, vec![ecb(4, 22), ecb(4, 23)]), blocks(24, vec![ecb(3, 12), ecb(8, 13)])),
        v!(12, [6, 32, 58], blocks(24, vec![ecb(2, 92), ecb(2, 93)]), blocks(22, vec![ecb(6, 36), ecb(2, 37)]), blocks(26, vec![ecb(4, 20), ecb(6, 21)]), blocks(28, vec![ecb(7, 14), ecb(4, 15)])),
        v!(13, [6, 34, 62], blocks(26, vec![ecb(4, 107)]), blocks(22, vec![ecb(8, 37), ecb(1, 38)]), blocks(24, vec![ecb(8, 20), ecb(4, 21)]), blocks(22, vec![ecb(12, 11), ecb(4, 12)])),
        v!(14, [6, 26, 46, 66], blocks(30, vec![ecb(3, 115), ecb(1, 116)]), blocks(24, vec![ecb(4, 40), ecb(5, 41)]), blocks(20, vec![ecb(11, 16), ecb(5, 17)]), blocks(24, vec![ecb(11, 12), ecb(5, 13)])),
        v!(15, [6, 26, 48, 70], blocks(22, vec![ecb(5, 87), ecb(1, 88)]), blocks(24, vec![ecb(5, 41), ecb(5, 42)]), blocks(30, vec![ecb(5, 24), ecb(7, 25)]), blocks(24, vec![ecb(11, 12), ecb(7, 13)])),
        v!(16, [6, 26, 50, 74], blocks(24, vec![ecb(5, 98), ecb(1, 99)]), blocks(28, vec![ecb(7, 45), ecb(3, 46)]), blocks(24, vec![ecb(15, 19), ecb(2, 20)]), blocks(30, vec![ecb(3, 15), ecb(13, 16)])),
        v!(17, [6, 30, 54, 78], blocks(28, vec![ecb(1, 107), ecb(5, 108)]), blocks(28, vec![ecb(10, 46), ecb(1, 47)]), blocks(28, vec![ecb(1, 22), ecb(15, 23)]), blocks(28, vec![ecb(2, 14), ecb(17, 15)])),
        v!(18, [6, 30, 56, 82], blocks(30, vec![ecb(5, 120), ecb(1, 121)]), blocks(26, vec![ecb(9, 43), ecb(4, 44)]), blocks(28, vec![ecb(17, 22), ecb(1, 23)]), blocks(28, vec![ecb(2, 14), ecb(19, 15)])),
        v!(19, [6, 30, 58, 86], blocks(28, vec![ecb(3, 113), ecb(4, 114)]), blocks(26, vec![ecb(3, 44), ecb(11, 45)]), blocks(26, vec![ecb(17, 21), ecb(4, 22)]), blocks(26, vec![ecb(9, 13), ecb(16, 14)])),
        v!(20, [6, 34, 62, 90], blocks(28, vec![ecb(3, 107), ecb(5, 108)]), blocks(26, vec![ecb(3, 41), ecb(13, 42)]), blocks(30, vec![ecb(15, 24), ecb(5, 25)]), blocks(28, vec![ecb(15, 15), ecb(10, 16)])),
        v!(21, [6, 28, 50, 72, 94], blocks(28, vec![ecb(4, 116), ecb(4, 117)]), blocks(26, vec![ecb(17, 42)]), blocks(28, vec![ecb(17, 22), ecb(6, 23)]), blocks(30, vec![ecb(19, 16), ecb(6, 17)])),
        v!(22, [6, 26, 50, 74, 98], blocks(28, vec![ecb(2, 111), ecb(7, 112)]), blocks(28, vec![ecb(17, 46)]), blocks(30, vec![ecb(7, 24), ecb(16, 25)]), blocks(24, vec![ecb(34, 13)])),
        v!(23, [6, 30, 54, 78, 102], blocks(30, vec![ecb(4, 121), ecb(5, 122)]), blocks(28, vec![ecb(4, 47), ecb(14, 48)]), blocks(30, vec![ecb(11, 24), ecb(14, 25)]), blocks(30, vec![ecb(16, 15), ecb(14, 16)])),
        v!(24, [6, 28, 54, 80, 106], blocks(30, vec![ecb(6, 117), ecb(4, 118)]), blocks(28, vec![ecb(6, 45), ecb(14, 46)]), blocks(30, vec![ecb(11, 24), ecb(16, 25)]), blocks(30, vec![ecb(30, 16), ecb(2, 17)])),
        v!(25, [6, 32, 58, 84, 110], blocks(26, vec![ecb(8, 106), ecb(4, 107)]), blocks(28, vec![ecb(8, 47), ecb(13, 48)]), blocks(30, vec![ecb(7, 24), ecb(22, 25)]), blocks(30, vec![ecb(22, 15), ecb(13, 16)])),
        v!(26, [6, 30, 58, 86, 114], blocks(28, vec![ecb(10, 114), ecb(2, 115)]), blocks(28, vec![ecb(19, 46), ecb(4, 47)]), blocks(28, vec![ecb(28, 22), ecb(6, 23)]), blocks(30, vec![ecb(33, 16), ecb(4, 17)])),
        v!(27, [6, 34, 62, 90, 118], blocks(30, vec![ecb(8, 122), ecb(4, 123)]), blocks(28, vec![ecb(22, 45), ecb(3, 46)]), blocks(30, vec![ecb(8, 23), ecb(26, 24)]), blocks(30, vec![ecb(12, 15), ecb(28, 16)])),
        v!(28, [6, 26, 50, 74, 98, 122], blocks(30, vec![ecb(3, 117), ecb(10, 118)]), blocks(28, vec![ecb(3, 45), ecb(23, 46)]), blocks(30, vec![ecb(4, 24), ecb(31, 25)]), blocks(30, vec![ecb(11, 15), ecb(31, 16)])),
        v!(29, [6, 30, 54, 78, 102, 126], blocks(30, vec![ecb(7, 116), ecb(7, 117)]), blocks(28, vec![ecb(21, 45), ecb(7, 46)]), blocks(30, vec![ecb(1, 23), ecb(37, 24)]), blocks(30, vec![ecb(19, 15), ecb(26, 16)])),
        v!(30, [6, 26, 52, 78, 104, 130], blocks(30, vec![ecb(5, 115), ecb(10, 116)]), blocks(28, vec![ecb(19, 47), ecb(10, 48)]), blocks(30, vec![ecb(15, 24), ecb(25, 25)]), blocks(30, vec![ecb(23, 15), ecb(25, 16)])),
        v!(31, [6, 30, 56, 82, 108, 134], blocks(30, vec![ecb(13, 115), ecb(3, 116)]), blocks(28, vec![ecb(2, 46), ecb(29, 47)]), blocks(30, vec![ecb(42, 24), ecb(1, 25)]), blocks(30, vec![ecb(23, 15), ecb(28, 16)])),
        v!(32, [6, 34, 60, 86, 112, 138], blocks(30, vec![ecb(17, 115)]), blocks(28, vec![ecb(10, 46), ecb(23, 47)]), blocks(30, vec![ecb(10, 24), ecb(35, 25)]), blocks(30, vec![ecb(19, 15), ecb(35, 16)])),
        v!(33, [6, 30, 58, 86, 114, 142], blocks(30, vec![ecb(17, 115), ecb(1, 116)]), blocks(28, vec![ecb(14, 46), ecb(21, 47)]), blocks(30, vec![ecb(29, 24), ecb(19, 25)]), blocks(30, vec![ecb(11, 15), ecb(46, 16)])),
        v!(34, [6, 34, 62, 90, 118, 146], blocks(30, vec![ecb(13, 115), ecb(6, 116)]), blocks(28, vec![ecb(14, 46), ecb(23, 47)]), blocks(30, vec![ecb(44, 24), ecb(7, 25)]), blocks(30, vec![ecb(59, 16), ecb(1, 17)])),
        v!(35, [6, 30, 54, 78, 102, 126, 150], blocks(30, vec![ecb(12, 121), ecb(7, 122)]), blocks(28, vec![ecb(12, 47), ecb(26, 48)]), blocks(30, vec![ecb(39, 24), ecb(14, 25)]), blocks(30, vec![ecb(22, 15), ecb(41, 16)])),
        v!(36, [6, 24, 50, 76, 102, 128, 154], blocks(30, vec![ecb(6, 121), ecb(14, 122)]), blocks(28, vec![ecb(6, 47), ecb(34, 48)]), blocks(30, vec![ecb(46, 24), ecb(10, 25)]), blocks(30, vec![ecb(2, 15), ecb(64, 16)])),
        v!(37, [6, 28, 54, 80, 106, 132, 158], blocks(30, vec![ecb(17, 122), ecb(4, 123)]), blocks(28, vec![ecb(29, 46), ecb(14, 47)]), blocks(30, vec![ecb(49, 24), ecb(10, 25)]), blocks(30, vec![ecb(24, 15), ecb(46, 16)])),
        v!(38, [6, 32, 58, 84, 110, 136, 162], blocks(30, vec![ecb(4, 122), ecb(18, 123)]), blocks(28, vec![ecb(13, 46), ecb(32, 47)]), blocks(30, vec![ecb(48, 24), ecb(14, 25)]), blocks(30, vec![ecb(42, 15), ecb(32, 16)])),
        v!(39, [6, 26, 54, 82, 110, 138, 166], blocks(30, vec![ecb(20, 117), ecb(4, 118)]), blocks(28, vec![ecb(40, 47), ecb(7, 48)]), blocks(30, vec![ecb(43, 24), ecb(22, 25)]), blocks(30, vec![ecb(10, 15), ecb(67, 16)])),
        v!(40, [6, 30, 58, 86, 114, 142, 170], blocks(30, vec![ecb(19, 118), ecb(6, 119)]), blocks(28, vec![ecb(18, 47), ecb(31, 48)]), blocks(30, vec![ecb(34, 24), ecb(34, 25)]), blocks(30, vec![ecb(20, 15), ecb(61, 16)])),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_1_has_no_alignment_patterns_and_26_codewords() {
        let v = Version::get_version_for_number(1).unwrap();
        assert!(v.alignment_pattern_centers.is_empty());
        assert_eq!(v.total_codewords(), 26);
        assert_eq!(v.dimension_for_version(), 21);
    }

    #[test]
    fn provisional_version_round_trips_dimension() {
        let v = Version::get_version_for_number(7).unwrap();
        let dimension = v.dimension_for_version();
        let provisional = Version::get_provisional_version_for_dimension(dimension).unwrap();
        assert_eq!(provisional.version_number, 7);
    }

    #[test]
    fn decode_version_information_matches_exact_entry() {
        let v = decode_version_information(VERSION_DECODE_INFO[0]).unwrap();
        assert_eq!(v.version_number, 7);
    }

    #[test]
    fn function_pattern_dimensions_match_symbol_size() {
        let v = Version::get_version_for_number(5).unwrap();
        let pattern = v.build_function_pattern();
        assert_eq!(pattern.width(), v.dimension_for_version());
        assert_eq!(pattern.height(), v.dimension_for_version());
    }
}

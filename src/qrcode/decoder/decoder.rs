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

use crate::common::reedsolomon::{get_predefined_genericgf, PredefinedGenericGf, ReedSolomonDecoder};
use crate::common::BitMatrix;
use crate::qrcode::decoder::{decoded_bit_stream_parser, BitMatrixParser, DataBlock};
use crate::result::DecoderRXingResult;
use crate::Exceptions;

/// Turns a sampled QR symbol grid into text: parse format/version info,
/// pull codewords off the grid, de-interleave them into their Reed-
/// Solomon blocks, correct each block, then hand the concatenated data
/// codewords to the bit-stream parser.
pub struct Decoder;

impl Decoder {
    pub fn decode(bits: &BitMatrix, hinted_charset: Option<&str>) -> Result<DecoderRXingResult, Exceptions> {
        Self::decode_with_mirror(bits.clone(), false, hinted_charset)
            .or_else(|_| Self::decode_with_mirror(bits.clone(), true, hinted_charset))
    }

    fn decode_with_mirror(bits: BitMatrix, mirror: bool, hinted_charset: Option<&str>) -> Result<DecoderRXingResult, Exceptions> {
        let mut parser = BitMatrixParser::new(bits)?;
        parser.set_mirror(mirror);

        // Version and format info must be read (and cached) before the
        // physical transpose below: they rely on the logical i/j swap
        // `copy_bit` performs while `self.mirror` is set, against the
        // still-untransposed grid.
        let version = parser.read_version()?;
        let format_info = parser.read_format_information()?;
        let ec_level = format_info.error_correction_level();

        if mirror {
            parser.mirror();
        }

        let codewords = parser.read_codewords()?;
        let data_blocks = DataBlock::get_data_blocks(&codewords, version, ec_level)?;

        let total_bytes: usize = data_blocks.iter().map(|b| b.num_data_codewords()).sum();
        let mut result_bytes = vec![0u8; total_bytes];
        let mut result_offset = 0usize;

        let field = get_predefined_genericgf(PredefinedGenericGf::QrCodeField256);
        let rs_decoder = ReedSolomonDecoder::new(field);

        for mut block in data_blocks {
            let num_data_codewords = block.num_data_codewords();
            let codeword_bytes = block.codewords_mut();
            let mut codeword_ints: Vec<i32> = codeword_bytes.iter().map(|&b| b as i32).collect();

            let num_ec_codewords = codeword_ints.len() - num_data_codewords;
            rs_decoder
                .decode(&mut codeword_ints, num_ec_codewords)
                .map_err(|_| Exceptions::checksum_with("reed-solomon correction failed"))?;

            for i in 0..num_data_codewords {
                result_bytes[result_offset] = codeword_ints[i] as u8;
                result_offset += 1;
            }
        }

        decoded_bit_stream_parser::decode(&result_bytes, version, ec_level, hinted_charset)
    }
}

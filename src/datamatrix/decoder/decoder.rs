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

use crate::common::reedsolomon::{get_predefined_genericgf, PredefinedGenericGf, ReedSolomonDecoder};
use crate::common::BitMatrix;
use crate::datamatrix::decoder::{decoded_bit_stream_parser, BitMatrixParser, DataBlock};
use crate::result::DecoderRXingResult;
use crate::Exceptions;

/// Turns a sampled Data Matrix symbol grid into text: parse the
/// version from its dimensions, pull codewords off the grid along the
/// Utah diagonal sweep, de-interleave them into their Reed-Solomon
/// blocks, correct each block against GF(256) with generator base 1,
/// then hand the concatenated data codewords to the bit-stream parser.
pub struct Decoder;

impl Decoder {
    pub fn decode(bits: &BitMatrix) -> Result<DecoderRXingResult, Exceptions> {
        let mut parser = BitMatrixParser::new(bits)?;
        let version = parser.version();

        let codewords = parser.read_codewords()?;
        let data_blocks = DataBlock::get_data_blocks(&codewords, version)?;

        let total_bytes: usize = data_blocks.iter().map(|b| b.num_data_codewords()).sum();
        let mut result_bytes = vec![0u8; total_bytes];
        let mut result_offset = 0usize;

        let field = get_predefined_genericgf(PredefinedGenericGf::DataMatrixField256);
        let rs_decoder = ReedSolomonDecoder::new(field);

        for mut block in data_blocks {
            let num_data_codewords = block.num_data_codewords();
            let codeword_bytes = block.codewords_mut();
            let mut codeword_ints: Vec<i32> = codeword_bytes.iter().map(|&b| b as i32).collect();

            let num_ec_codewords = codeword_ints.len() - num_data_codewords;
            rs_decoder
                .decode(&mut codeword_ints, num_ec_codewords)
                .map_err(|_| Exceptions::checksum_with("reed-solomon correction failed"))?;

            for value in codeword_ints.iter().take(num_data_codewords) {
                result_bytes[result_offset] = *value as u8;
                result_offset += 1;
            }
        }

        decoded_bit_stream_parser::decode(&result_bytes)
    }
}

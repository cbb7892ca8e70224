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

use crate::datamatrix::decoder::Version;
use crate::Exceptions;

/// One interleaved Reed-Solomon block: its data codewords followed by
/// its own EC codewords, as regrouped from the raw stream the Utah
/// sweep read off the grid.
#[derive(Debug, Clone)]
pub struct DataBlock {
    num_data_codewords: usize,
    codewords: Vec<u8>,
}

impl DataBlock {
    pub fn num_data_codewords(&self) -> usize {
        self.num_data_codewords
    }

    pub fn codewords_mut(&mut self) -> &mut [u8] {
        &mut self.codewords
    }

    /// Same interleaving scheme as the QR code format: blocks may
    /// differ in length by at most one data codeword, with the longer
    /// blocks' extra codeword interleaved in right after the common
    /// prefix every block shares.
    pub fn get_data_blocks(raw_codewords: &[u8], version: &Version) -> Result<Vec<DataBlock>, Exceptions> {
        if raw_codewords.len() != version.total_codewords() as usize {
            return Err(Exceptions::illegal_argument_with("raw codewords length does not match version"));
        }

        let ec_blocks = &version.ec_blocks;
        let total_blocks: usize = ec_blocks.ec_blocks.iter().map(|b| b.count as usize).sum();
        let mut result: Vec<DataBlock> = Vec::with_capacity(total_blocks);
        for ecb in &ec_blocks.ec_blocks {
            for _ in 0..ecb.count {
                let num_data_codewords = ecb.data_codewords as usize;
                let num_block_codewords = ec_blocks.ec_codewords_per_block as usize + num_data_codewords;
                result.push(DataBlock {
                    num_data_codewords,
                    codewords: vec![0u8; num_block_codewords],
                });
            }
        }

        let shorter_blocks_total_codewords = result[0].codewords.len();
        let mut longer_blocks_start_at = result.len() as i64 - 1;
        while longer_blocks_start_at >= 0 {
            let num_codewords = result[longer_blocks_start_at as usize].codewords.len();
            if num_codewords == shorter_blocks_total_codewords {
                break;
            }
            longer_blocks_start_at -= 1;
        }
        longer_blocks_start_at += 1;
        let longer_blocks_start_at = longer_blocks_start_at as usize;

        let shorter_blocks_num_data_codewords = shorter_blocks_total_codewords - ec_blocks.ec_codewords_per_block as usize;
        let mut raw_codewords_offset = 0usize;
        let num_result_blocks = result.len();

        for i in 0..shorter_blocks_num_data_codewords {
            for block in result.iter_mut() {
                block.codewords[i] = raw_codewords[raw_codewords_offset];
                raw_codewords_offset += 1;
            }
        }
        for block in result[longer_blocks_start_at..num_result_blocks].iter_mut() {
            block.codewords[shorter_blocks_num_data_codewords] = raw_codewords[raw_codewords_offset];
            raw_codewords_offset += 1;
        }

        let max = result[0].codewords.len();
        for i in shorter_blocks_num_data_codewords..max {
            for (j, block) in result.iter_mut().enumerate() {
                let i_offset = if j < longer_blocks_start_at { i } else { i + 1 };
                block.codewords[i_offset] = raw_codewords[raw_codewords_offset];
                raw_codewords_offset += 1;
            }
        }

        Ok(result)
    }
}

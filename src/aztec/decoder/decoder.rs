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
use crate::common::{BitArray, BitMatrix};
use crate::result::DecoderRXingResult;
use crate::Exceptions;

use super::tables::{get_character, Entry, Table};
use crate::aztec::detector::AztecDetectorResult;

const NB_BITS_COMPACT: [i32; 5] = [0, 104, 240, 408, 608];

const NB_BITS: [i32; 33] = [
    0, 128, 288, 480, 704, 960, 1248, 1568, 1920, 2304, 2720, 3168, 3648, 4160, 4704, 5280, 5888, 6528, 7200, 7904, 8640, 9408, 10208, 11040,
    11904, 12800, 13728, 14688, 15680, 16704, 17760, 18848, 19968,
];

const NB_DATABLOCK_COMPACT: [i32; 5] = [0, 17, 40, 51, 76];

const NB_DATABLOCK: [i32; 33] = [
    0, 21, 48, 60, 88, 120, 156, 196, 240, 230, 272, 316, 364, 416, 470, 528, 588, 652, 720, 790, 864, 940, 1020, 920, 992, 1066, 1144, 1224,
    1306, 1392, 1480, 1570, 1664,
];

/// Turns a sampled Aztec symbol grid into text: lift the raw bits off
/// the grid's concentric rings (undoing the reference-grid dashed lines
/// on full-size symbols first), split them into codewords sized by the
/// layer count, correct those against the matching `AZTEC_DATA_*`
/// Galois field, then run the corrected bitstream through the
/// Upper/Lower/Mixed/Punct/Digit/Binary table state machine.
pub struct Decoder;

impl Decoder {
    pub fn decode(detector_result: &AztecDetectorResult) -> Result<DecoderRXingResult, Exceptions> {
        let matrix = if detector_result.compact() {
            detector_result.bits().clone()
        } else {
            remove_dashed_lines(detector_result.bits())?
        };

        let (rawbits, num_codewords) = extract_bits(&matrix, detector_result)?;
        let (corrected_bits, end_index) = correct_bits(&rawbits, num_codewords, detector_result)?;
        let text = get_encoded_data(&corrected_bits, end_index)?;

        // Mirrors the reference decoder's own raw-bytes representation:
        // the corrected bit array flattened one bit per byte, not a
        // packed byte stream.
        let raw_bytes: Vec<u8> = (0..corrected_bits.size()).map(|i| corrected_bits.get(i) as u8).collect();

        Ok(DecoderRXingResult::new(raw_bytes, text))
    }
}

fn extract_bits(matrix: &BitMatrix, detector_result: &AztecDetectorResult) -> Result<(BitArray, usize), Exceptions> {
    let compact = detector_result.compact();
    let layers = detector_result.nb_layers();

    let (total_bits, num_codewords) = if compact {
        if layers > 4 {
            return Err(Exceptions::format_with("aztec layer count too large for a compact symbol"));
        }
        (NB_BITS_COMPACT[layers as usize], NB_DATABLOCK_COMPACT[layers as usize])
    } else {
        if layers > 32 {
            return Err(Exceptions::format_with("aztec layer count too large"));
        }
        (NB_BITS[layers as usize], NB_DATABLOCK[layers as usize])
    };

    let mut rawbits = vec![false; total_bits as usize];

    let mut layer = layers as i32;
    let mut size = matrix.height() as i32;
    let mut rawbits_offset = 0usize;
    let mut matrix_offset = 0i32;

    while layer != 0 {
        let mut flip = 0i32;
        for i in 0..(2 * size - 4) {
            rawbits[rawbits_offset + i as usize] = matrix.get((matrix_offset + flip) as u32, (matrix_offset + i / 2) as u32);
            rawbits[rawbits_offset + (2 * size - 4 + i) as usize] =
                matrix.get((matrix_offset + i / 2) as u32, (matrix_offset + size - 1 - flip) as u32);
            flip = (flip + 1) % 2;
        }

        flip = 0;
        let mut i = 2 * size + 1;
        while i > 5 {
            rawbits[rawbits_offset + (4 * size - 8 + (2 * size - i) + 1) as usize] =
                matrix.get((matrix_offset + size - 1 - flip) as u32, (matrix_offset + i / 2 - 1) as u32);
            rawbits[rawbits_offset + (6 * size - 12 + (2 * size - i) + 1) as usize] =
                matrix.get((matrix_offset + i / 2 - 1) as u32, (matrix_offset + flip) as u32);
            flip = (flip + 1) % 2;
            i -= 1;
        }

        matrix_offset += 2;
        rawbits_offset += (8 * size - 16) as usize;
        layer -= 1;
        size -= 4;
    }

    let mut bit_array = BitArray::with_size(rawbits.len());
    for (i, &bit) in rawbits.iter().enumerate() {
        if bit {
            bit_array.set(i);
        }
    }

    Ok((bit_array, num_codewords as usize))
}

fn correct_bits(rawbits: &BitArray, num_codewords: usize, detector_result: &AztecDetectorResult) -> Result<(BitArray, i32), Exceptions> {
    let nb_layers = detector_result.nb_layers();
    let (codeword_size, gf_kind) = if nb_layers <= 2 {
        (6, PredefinedGenericGf::AztecData6)
    } else if nb_layers <= 8 {
        (8, PredefinedGenericGf::AztecData8)
    } else if nb_layers <= 22 {
        (10, PredefinedGenericGf::AztecData10)
    } else {
        (12, PredefinedGenericGf::AztecData12)
    };

    let num_data_codewords = detector_result.nb_datablocks() as i32;
    let (total_bits, total_data_blocks) = if detector_result.compact() {
        (NB_BITS_COMPACT[nb_layers as usize], NB_DATABLOCK_COMPACT[nb_layers as usize])
    } else {
        (NB_BITS[nb_layers as usize], NB_DATABLOCK[nb_layers as usize])
    };
    let offset_bits = total_bits - num_codewords as i32 * codeword_size;
    let num_ec_codewords = total_data_blocks - num_data_codewords;
    if num_ec_codewords < 0 {
        return Err(Exceptions::format_with("aztec symbol reports fewer data blocks than data codewords"));
    }

    let mut data_words = vec![0i32; num_codewords];
    for (i, word) in data_words.iter_mut().enumerate() {
        let mut flag = 1i32;
        for j in 1..=codeword_size {
            let bit_index = codeword_size * i as i32 + codeword_size - j + offset_bits;
            if bit_index >= 0 && (bit_index as usize) < rawbits.size() && rawbits.get(bit_index as usize) {
                *word += flag;
            }
            flag <<= 1;
        }
    }

    let field = get_predefined_genericgf(gf_kind);
    let rs_decoder = ReedSolomonDecoder::new(field);
    rs_decoder
        .decode(&mut data_words, num_ec_codewords as usize)
        .map_err(|_| Exceptions::checksum_with("aztec data codewords failed reed-solomon correction"))?;

    let mut offset = 0i32;
    let mut inverted_bit_count = 0i32;
    let mut corrected_bits = BitArray::with_size((num_data_codewords * codeword_size) as usize);

    for i in 0..num_data_codewords {
        let mut series_color = false;
        let mut series_count = 0i32;
        let mut flag = 1i32 << (codeword_size - 1);

        for j in 0..codeword_size {
            let color = (data_words[i as usize] & flag) == flag;

            if series_count == codeword_size - 1 {
                if color == series_color {
                    return Err(Exceptions::format_with("aztec codeword bit was not inverted as expected"));
                }
                series_color = false;
                series_count = 0;
                offset += 1;
                inverted_bit_count += 1;
            } else {
                if series_color == color {
                    series_count += 1;
                } else {
                    series_count = 1;
                    series_color = color;
                }
                if color {
                    corrected_bits.set((i * codeword_size + j - offset) as usize);
                }
            }

            flag >>= 1;
        }
    }

    let end_index = codeword_size * num_data_codewords - inverted_bit_count;
    Ok((corrected_bits, end_index))
}

fn get_encoded_data(corrected_bits: &BitArray, end_index: i32) -> Result<String, Exceptions> {
    if end_index > corrected_bits.size() as i32 {
        return Err(Exceptions::format_with("invalid aztec input data"));
    }

    let mut last_table = Table::Upper;
    let mut table = Table::Upper;
    let mut start_index = 0i32;
    let mut result = String::new();
    let mut end = false;
    let mut shift = false;
    let mut binary_shift = false;

    while !end {
        let switch_shift = shift;
        if !shift {
            last_table = table;
        }

        if binary_shift {
            if end_index - start_index < 5 {
                break;
            }
            let mut length = read_code(corrected_bits, start_index, 5);
            start_index += 5;
            if length == 0 {
                if end_index - start_index < 11 {
                    break;
                }
                length = read_code(corrected_bits, start_index, 11) + 31;
                start_index += 11;
            }
            for _ in 0..length {
                if end_index - start_index < 8 {
                    end = true;
                    break;
                }
                let code = read_code(corrected_bits, start_index, 8);
                result.push(code as u8 as char);
                start_index += 8;
            }
            binary_shift = false;
        } else if table == Table::Binary {
            if end_index - start_index < 8 {
                break;
            }
            let code = read_code(corrected_bits, start_index, 8);
            start_index += 8;
            result.push(code as u8 as char);
        } else {
            let size = if table == Table::Digit { 4 } else { 5 };
            if end_index - start_index < size {
                break;
            }
            let code = read_code(corrected_bits, start_index, size);
            start_index += size;

            match get_character(table, code as usize) {
                Entry::Str(s) => result.push_str(s),
                Entry::Latch(next) => table = next,
                Entry::Shift(next) => {
                    table = next;
                    shift = true;
                    if next == Table::Binary {
                        binary_shift = true;
                    }
                }
            }
        }

        if switch_shift {
            table = last_table;
            shift = false;
        }
    }

    Ok(result)
}

fn read_code(bits: &BitArray, start_index: i32, length: i32) -> i32 {
    let mut res = 0i32;
    for i in start_index..start_index + length {
        res <<= 1;
        if bits.get(i as usize) {
            res += 1;
        }
    }
    res
}

fn remove_dashed_lines(matrix: &BitMatrix) -> Result<BitMatrix, Exceptions> {
    let nb_dashed = 1 + 2 * ((matrix.width() as i32 - 1) / 2 / 16);
    let mut new_matrix = BitMatrix::new((matrix.width() as i32 - nb_dashed) as u32, (matrix.height() as i32 - nb_dashed) as u32)?;

    let mut nx = 0u32;
    for x in 0..matrix.width() as i32 {
        if (matrix.width() as i32 / 2 - x) % 16 == 0 {
            continue;
        }
        let mut ny = 0u32;
        for y in 0..matrix.height() as i32 {
            if (matrix.width() as i32 / 2 - y) % 16 == 0 {
                continue;
            }
            if matrix.get(x as u32, y as u32) {
                new_matrix.set(nx, ny);
            }
            ny += 1;
        }
        nx += 1;
    }
    Ok(new_matrix)
}

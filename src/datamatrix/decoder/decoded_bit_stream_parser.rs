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

use crate::result::DecoderRXingResult;
use crate::Exceptions;

const PAD_ENCODATION: u8 = 0;
const ASCII_ENCODATION: u8 = 1;
const C40_ENCODATION: u8 = 2;
const TEXT_ENCODATION: u8 = 3;
const ANSI_X12_ENCODATION: u8 = 4;
const EDIFACT_ENCODATION: u8 = 5;
const BASE256_ENCODATION: u8 = 6;

/// Decodes the de-interleaved, error-corrected data codeword stream of
/// a Data Matrix symbol into text: codeword 0-255 values switch among
/// six encodation schemes (plain ASCII/digit-pairs, the three-values-
/// per-two-bytes C40/Text/ANSI X12 family, 6-bit-packed EDIFACT, and
/// raw Base 256 bytes), each mode staying active until another mode
/// switch or unlatch codeword appears.
pub fn decode(bytes: &[u8]) -> Result<DecoderRXingResult, Exceptions> {
    let mut result = String::new();
    let mut byte_segments: Vec<Vec<u8>> = Vec::new();
    let mut index = 0usize;
    let mut mode = ASCII_ENCODATION;

    while index < bytes.len() && mode != PAD_ENCODATION {
        mode = match mode {
            ASCII_ENCODATION => decode_ascii_segment(bytes, &mut index, &mut result)?,
            C40_ENCODATION => {
                decode_c40_segment(bytes, &mut index, &mut result)?;
                ASCII_ENCODATION
            }
            TEXT_ENCODATION => {
                decode_text_segment(bytes, &mut index, &mut result)?;
                ASCII_ENCODATION
            }
            ANSI_X12_ENCODATION => {
                decode_ansi_x12_segment(bytes, &mut index, &mut result)?;
                ASCII_ENCODATION
            }
            EDIFACT_ENCODATION => {
                decode_edifact_segment(bytes, &mut index, &mut result)?;
                ASCII_ENCODATION
            }
            BASE256_ENCODATION => {
                let segment = decode_base256_segment(bytes, &mut index)?;
                result.push_str(&guess_charset(&segment));
                byte_segments.push(segment);
                ASCII_ENCODATION
            }
            _ => return Err(Exceptions::format_with("invalid Data Matrix mode")),
        };
    }

    Ok(DecoderRXingResult::new(bytes.to_vec(), result).with_byte_segments(byte_segments))
}

/// Heuristic charset guess for a Base 256 byte run: UTF-8 if valid,
/// otherwise a byte-for-byte Latin-1 mapping so decoding never fails.
fn guess_charset(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}

fn decode_ascii_segment(bytes: &[u8], index: &mut usize, result: &mut String) -> Result<u8, Exceptions> {
    let mut upper_shift = false;
    loop {
        if *index >= bytes.len() {
            return Ok(PAD_ENCODATION);
        }
        let one_byte = bytes[*index] as u32;
        *index += 1;

        if one_byte == 0 {
            return Err(Exceptions::format_with("unexpected Data Matrix codeword 0"));
        } else if one_byte <= 128 {
            let value = if upper_shift { one_byte + 128 } else { one_byte };
            upper_shift = false;
            result.push((value - 1) as u8 as char);
            return Ok(ASCII_ENCODATION);
        } else if one_byte == 129 {
            return Ok(PAD_ENCODATION);
        } else if one_byte <= 229 {
            let value = one_byte - 130;
            result.push(char::from_digit(value / 10, 10).unwrap());
            result.push(char::from_digit(value % 10, 10).unwrap());
        } else if one_byte == 230 {
            return Ok(C40_ENCODATION);
        } else if one_byte == 231 {
            return Ok(BASE256_ENCODATION);
        } else if one_byte == 232 {
            result.push('\u{1D}');
        } else if one_byte == 233 || one_byte == 234 {
            // Structured Append / Reader Programming: consume and ignore.
            if one_byte == 233 {
                *index += 2;
            }
        } else if one_byte == 235 {
            upper_shift = true;
        } else if one_byte == 236 {
            result.push_str("[)>\u{1E}05\u{1D}");
        } else if one_byte == 237 {
            result.push_str("[)>\u{1E}06\u{1D}");
        } else if one_byte == 238 {
            return Ok(ANSI_X12_ENCODATION);
        } else if one_byte == 239 {
            return Ok(EDIFACT_ENCODATION);
        } else if one_byte == 240 {
            parse_eci(bytes, index)?;
        } else if one_byte == 254 {
            // Unlatch within ASCII itself is a no-op.
        } else {
            return Err(Exceptions::format_with("unsupported Data Matrix ASCII codeword"));
        }
    }
}

fn parse_eci(bytes: &[u8], index: &mut usize) -> Result<u32, Exceptions> {
    let read = |i: &mut usize| -> Result<u32, Exceptions> {
        let b = *bytes.get(*i).ok_or_else(|| Exceptions::format_with("truncated Data Matrix ECI"))? as u32;
        *i += 1;
        Ok(b)
    };
    let first = read(index)?;
    if (1..=127).contains(&first) {
        Ok(first - 1)
    } else if (128..=191).contains(&first) {
        let second = read(index)?;
        Ok(127 + (first - 128) * 254 + (second - 1))
    } else {
        let second = read(index)?;
        let third = read(index)?;
        Ok(16511 + (first - 192) * 254 * 254 + (second - 1) * 254 + (third - 1))
    }
}

/// Unpacks a run of C40/Text/ANSI X12 codewords into base-40 "values":
/// each pair of codewords holds three tri-valued symbols in `[0, 40)`,
/// packed as `(first-1)*256 + (second-1) = v0*1600 + v1*40 + v2`.
fn next_triple(bytes: &[u8], index: &mut usize) -> Result<Option<[u32; 3]>, Exceptions> {
    if *index >= bytes.len() {
        return Ok(None);
    }
    let first_byte = bytes[*index] as u32;
    if first_byte == 254 {
        *index += 1;
        return Ok(None);
    }
    if *index + 1 >= bytes.len() {
        *index += 1;
        return Ok(None);
    }
    let second_byte = bytes[*index + 1] as u32;
    *index += 2;
    let full_bit_value = (first_byte - 1) * 256 + (second_byte - 1);
    Ok(Some([full_bit_value / 1600, (full_bit_value % 1600) / 40, full_bit_value % 40]))
}

const SHIFT2_SET: [char; 27] = [
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=', '>', '?', '@', '[', '\\', ']', '^', '_',
];

fn decode_c40_segment(bytes: &[u8], index: &mut usize, result: &mut String) -> Result<(), Exceptions> {
    let mut shift = 0u8;
    let mut upper_shift = false;

    'outer: while let Some(values) = next_triple(bytes, index)? {
        for &c_value in &values {
            match shift {
                1 => {
                    result.push(apply_upper_shift(c_value as u8 as char, &mut upper_shift));
                    shift = 0;
                }
                2 => {
                    if c_value < 27 {
                        result.push(apply_upper_shift(SHIFT2_SET[c_value as usize], &mut upper_shift));
                    } else if c_value == 27 {
                        result.push('\u{1D}');
                    } else if c_value == 30 {
                        upper_shift = true;
                    } else {
                        return Err(Exceptions::format_with("invalid C40 shift-2 value"));
                    }
                    shift = 0;
                }
                3 => {
                    result.push(apply_upper_shift((c_value as u8).wrapping_add(224) as char, &mut upper_shift));
                    shift = 0;
                }
                _ => {
                    if c_value < 3 {
                        shift = (c_value + 1) as u8;
                    } else if c_value == 3 {
                        result.push(apply_upper_shift(' ', &mut upper_shift));
                    } else if c_value <= 13 {
                        result.push(apply_upper_shift(char::from_digit(c_value - 4, 10).unwrap(), &mut upper_shift));
                    } else if c_value <= 39 {
                        result.push(apply_upper_shift((b'A' + (c_value - 14) as u8) as char, &mut upper_shift));
                    } else {
                        return Err(Exceptions::format_with("invalid C40 basic value"));
                    }
                }
            }
        }
        if bytes.get(*index).is_none() {
            break 'outer;
        }
    }
    Ok(())
}

fn decode_text_segment(bytes: &[u8], index: &mut usize, result: &mut String) -> Result<(), Exceptions> {
    let mut shift = 0u8;
    let mut upper_shift = false;

    while let Some(values) = next_triple(bytes, index)? {
        for &c_value in &values {
            match shift {
                1 => {
                    result.push(apply_upper_shift(c_value as u8 as char, &mut upper_shift));
                    shift = 0;
                }
                2 => {
                    if c_value < 27 {
                        result.push(apply_upper_shift(SHIFT2_SET[c_value as usize], &mut upper_shift));
                    } else if c_value == 27 {
                        result.push('\u{1D}');
                    } else if c_value == 30 {
                        upper_shift = true;
                    } else {
                        return Err(Exceptions::format_with("invalid Text shift-2 value"));
                    }
                    shift = 0;
                }
                3 => {
                    let ch = match c_value {
                        0 => '`',
                        1..=26 => (b'A' + (c_value - 1) as u8) as char,
                        27 => '{',
                        28 => '|',
                        29 => '}',
                        30 => '~',
                        31 => 127u8 as char,
                        _ => return Err(Exceptions::format_with("invalid Text shift-3 value")),
                    };
                    result.push(apply_upper_shift(ch, &mut upper_shift));
                    shift = 0;
                }
                _ => {
                    if c_value < 3 {
                        shift = (c_value + 1) as u8;
                    } else if c_value == 3 {
                        result.push(apply_upper_shift(' ', &mut upper_shift));
                    } else if c_value <= 13 {
                        result.push(apply_upper_shift(char::from_digit(c_value - 4, 10).unwrap(), &mut upper_shift));
                    } else if c_value <= 39 {
                        result.push(apply_upper_shift((b'a' + (c_value - 14) as u8) as char, &mut upper_shift));
                    } else {
                        return Err(Exceptions::format_with("invalid Text basic value"));
                    }
                }
            }
        }
    }
    Ok(())
}

fn apply_upper_shift(ch: char, upper_shift: &mut bool) -> char {
    if *upper_shift && (ch as u32) < 128 {
        *upper_shift = false;
        char::from_u32(ch as u32 + 128).unwrap_or(ch)
    } else {
        *upper_shift = false;
        ch
    }
}

fn decode_ansi_x12_segment(bytes: &[u8], index: &mut usize, result: &mut String) -> Result<(), Exceptions> {
    while let Some(values) = next_triple(bytes, index)? {
        for &c_value in &values {
            let ch = match c_value {
                0 => '\r',
                1 => '*',
                2 => '>',
                3 => ' ',
                4..=13 => char::from_digit(c_value - 4, 10).unwrap(),
                14..=39 => (b'A' + (c_value - 14) as u8) as char,
                _ => return Err(Exceptions::format_with("invalid ANSI X12 value")),
            };
            result.push(ch);
        }
    }
    Ok(())
}

/// Unpacks four 6-bit EDIFACT values out of every three codeword bytes,
/// continuing until the 0x1F unlatch value appears or the codewords
/// run out; the final partial codeword following an unlatch is simply
/// left unread since it carries no data.
fn decode_edifact_segment(bytes: &[u8], index: &mut usize, result: &mut String) -> Result<(), Exceptions> {
    let mut bit_buffer: u32 = 0;
    let mut bits_in_buffer = 0u32;

    loop {
        if bits_in_buffer < 6 {
            if *index >= bytes.len() {
                return Ok(());
            }
            bit_buffer = (bit_buffer << 8) | bytes[*index] as u32;
            bits_in_buffer += 8;
            *index += 1;
        }

        let edifact_value = (bit_buffer >> (bits_in_buffer - 6)) & 0x3F;
        bits_in_buffer -= 6;

        if edifact_value == 0x1F {
            return Ok(());
        }

        let ch = if edifact_value & 0x20 == 0 { edifact_value | 0x40 } else { edifact_value };
        result.push(ch as u8 as char);
    }
}

fn unrandomize_255_state(randomized_base256_codeword: u8, base256_codeword_position: usize) -> u8 {
    let pseudo_random_number = ((149 * base256_codeword_position) % 255) + 1;
    let temp_variable = randomized_base256_codeword as i32 - pseudo_random_number as i32;
    if temp_variable < 0 {
        (temp_variable + 256) as u8
    } else {
        temp_variable as u8
    }
}

fn decode_base256_segment(bytes: &[u8], index: &mut usize) -> Result<Vec<u8>, Exceptions> {
    let codeword_position = *index + 1;
    let d1 = unrandomize_255_state(*bytes.get(*index).ok_or_else(|| Exceptions::format_with("truncated Base 256 segment"))?, codeword_position);
    *index += 1;

    let count = if d1 == 0 {
        bytes.len() - *index
    } else if d1 < 250 {
        d1 as usize
    } else {
        let d2 = unrandomize_255_state(*bytes.get(*index).ok_or_else(|| Exceptions::format_with("truncated Base 256 segment"))?, codeword_position + 1);
        *index += 1;
        250 * (d1 as usize - 249) + d2 as usize
    };

    let mut result = Vec::with_capacity(count);
    for i in 0..count {
        let pos = *index + i;
        let b = *bytes.get(pos).ok_or_else(|| Exceptions::format_with("truncated Base 256 segment"))?;
        result.push(unrandomize_255_state(b, codeword_position + 1 + i));
    }
    *index += count;
    Ok(result)
}

/*
 * Copyright 2009 ZXing authors
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

use crate::common::Result;
use crate::Exceptions;

const TEXT_COMPACTION_MODE_LATCH: i32 = 900;
const BYTE_COMPACTION_MODE_LATCH: i32 = 901;
const NUMERIC_COMPACTION_MODE_LATCH: i32 = 902;
const BYTE_COMPACTION_MODE_LATCH_6: i32 = 924;
const ECI_USER_DEFINED: i32 = 925;
const ECI_GENERAL_PURPOSE: i32 = 926;
const ECI_CHARSET: i32 = 927;
const BEGIN_MACRO_PDF417_CONTROL_BLOCK: i32 = 928;
const BEGIN_MACRO_PDF417_OPTIONAL_FIELD: i32 = 923;
const MACRO_PDF417_TERMINATOR: i32 = 922;

const MIXED_CHARS: [char; 25] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '&', '\r', '\t', ',', ':', '#', '-', '.', '$', '/', '+', '%', '*', '=', '^',
];

const PUNCT_CHARS: [char; 29] = [
    ';', '<', '>', '@', '[', '\\', ']', '_', '`', '~', '!', '\r', '\t', ',', ':', '\n', '-', '.', '$', '/', '"', '|', '*', '(', ')', '?', '{', '}',
    '\'',
];

#[derive(Clone, Copy, PartialEq)]
enum TextSubMode {
    Alpha,
    Lower,
    Mixed,
    Punct,
}

/// Decodes the data-codeword stream of a PDF417 symbol (the symbol
/// length descriptor already stripped off by the caller) into text,
/// dispatching between Text/Byte/Numeric compaction the way the
/// reference decoder's own mode-switch loop does. ECI and Macro PDF417
/// control codewords are recognised and consumed but not surfaced,
/// matching this crate's choice elsewhere not to wire ECI into actual
/// charset switching.
pub fn decode(codewords: &[i32]) -> Result<String> {
    let mut result = String::new();
    let mut index = 0usize;
    let mut mode = TEXT_COMPACTION_MODE_LATCH;

    while index < codewords.len() {
        let codeword = codewords[index];
        match codeword {
            TEXT_COMPACTION_MODE_LATCH | BYTE_COMPACTION_MODE_LATCH | BYTE_COMPACTION_MODE_LATCH_6 | NUMERIC_COMPACTION_MODE_LATCH => {
                mode = codeword;
                index += 1;
            }
            ECI_CHARSET | ECI_GENERAL_PURPOSE => {
                index += 2;
            }
            ECI_USER_DEFINED => {
                index += 1;
            }
            BEGIN_MACRO_PDF417_CONTROL_BLOCK | BEGIN_MACRO_PDF417_OPTIONAL_FIELD | MACRO_PDF417_TERMINATOR => {
                index += 1;
            }
            _ => {
                index = match mode {
                    BYTE_COMPACTION_MODE_LATCH | BYTE_COMPACTION_MODE_LATCH_6 => decode_byte_compaction(codewords, index, &mut result),
                    NUMERIC_COMPACTION_MODE_LATCH => decode_numeric_compaction(codewords, index, &mut result),
                    _ => decode_text_compaction(codewords, index, &mut result),
                };
            }
        }
    }

    if result.is_empty() {
        return Err(Exceptions::format_with("PDF417 codeword stream decoded to no text"));
    }
    Ok(result)
}

/// Unpacks each codeword below 900 into two base-30 sub-values and
/// walks the Alpha/Lower/Mixed/Punct sub-mode state machine, stopping
/// at the first codeword that is a mode-switch latch.
fn decode_text_compaction(codewords: &[i32], start: usize, result: &mut String) -> usize {
    let mut sub_mode = TextSubMode::Alpha;
    let mut shift_punct = false;
    let mut shift_alpha = false;
    let mut index = start;

    while index < codewords.len() && codewords[index] < 900 {
        let pair = codewords[index];
        let values = [pair / 30, pair % 30];
        for &value in &values {
            let effective = if shift_punct {
                shift_punct = false;
                TextSubMode::Punct
            } else if shift_alpha {
                shift_alpha = false;
                TextSubMode::Alpha
            } else {
                sub_mode
            };

            match effective {
                TextSubMode::Alpha => match value {
                    0..=25 => result.push((b'A' + value as u8) as char),
                    26 => result.push(' '),
                    27 => sub_mode = TextSubMode::Lower,
                    28 => sub_mode = TextSubMode::Mixed,
                    29 => shift_punct = true,
                    _ => {}
                },
                TextSubMode::Lower => match value {
                    0..=25 => result.push((b'a' + value as u8) as char),
                    26 => result.push(' '),
                    27 => shift_alpha = true,
                    28 => sub_mode = TextSubMode::Mixed,
                    29 => shift_punct = true,
                    _ => {}
                },
                TextSubMode::Mixed => match value {
                    0..=24 => result.push(MIXED_CHARS[value as usize]),
                    25 => sub_mode = TextSubMode::Punct,
                    26 => sub_mode = TextSubMode::Lower,
                    27 => sub_mode = TextSubMode::Alpha,
                    29 => shift_punct = true,
                    _ => {}
                },
                TextSubMode::Punct => {
                    if (0..29).contains(&value) {
                        result.push(PUNCT_CHARS[value as usize]);
                    } else {
                        sub_mode = TextSubMode::Alpha;
                    }
                }
            }
        }
        index += 1;
    }

    index
}

/// Groups codewords below 900 into fives, each unpacked as a base-900
/// big-endian value split into 6 bytes; a trailing partial group (fewer
/// than 5 codewords left before the next mode switch) is read as literal
/// single bytes instead.
fn decode_byte_compaction(codewords: &[i32], start: usize, result: &mut String) -> usize {
    let mut index = start;
    let mut bytes = Vec::new();

    while index < codewords.len() && codewords[index] < 900 {
        let remaining = codewords.len() - index;
        if remaining >= 5 {
            let mut value: u64 = 0;
            for offset in 0..5 {
                value = value * 900 + codewords[index + offset] as u64;
            }
            let mut group = [0u8; 6];
            for slot in group.iter_mut().rev() {
                *slot = (value & 0xFF) as u8;
                value >>= 8;
            }
            bytes.extend_from_slice(&group);
            index += 5;
        } else {
            bytes.push(codewords[index] as u8);
            index += 1;
        }
    }

    result.push_str(&guess_charset(&bytes));
    index
}

/// Consumes the entire contiguous run of codewords below 900 as one
/// base-900 big number, converting digit-by-digit into decimal via
/// manual carry propagation (no bignum dependency is in the crate's
/// stack), then strips the synthetic leading `1` digit the format uses
/// to preserve leading zeros.
fn decode_numeric_compaction(codewords: &[i32], start: usize, result: &mut String) -> usize {
    let mut index = start;
    let mut decimal_digits: Vec<u8> = vec![0];

    while index < codewords.len() && codewords[index] < 900 {
        let mut carry = codewords[index] as u32;
        for digit in decimal_digits.iter_mut() {
            let total = *digit as u32 * 900 + carry;
            *digit = (total % 10) as u8;
            carry = total / 10;
        }
        while carry > 0 {
            decimal_digits.push((carry % 10) as u8);
            carry /= 10;
        }
        index += 1;
    }

    let digits: String = decimal_digits.iter().rev().map(|&d| (b'0' + d) as char).collect();
    let trimmed = digits.strip_prefix('1').unwrap_or(&digits);
    result.push_str(trimmed);
    index
}

/// Falls back to Latin-1 when the byte run isn't valid UTF-8, the same
/// permissive decoding the other symbol decoders use for raw byte runs.
fn guess_charset(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_alpha_text() {
        // "AB" -> alpha values 0, 1 packed as one base-30 pair.
        let codewords = [0 * 30 + 1];
        let mut result = String::new();
        decode_text_compaction(&codewords, 0, &mut result);
        assert_eq!(result, "AB");
    }

    #[test]
    fn decodes_numeric_compaction_preserving_leading_zero() {
        // Encode "007" the way the format does: prefix with a 1, base-900 digits.
        let mut value: u64 = 1;
        for ch in "007".chars() {
            value = value * 10 + ch.to_digit(10).unwrap() as u64;
        }
        let mut digits = Vec::new();
        let mut v = value;
        if v == 0 {
            digits.push(0);
        }
        while v > 0 {
            digits.push((v % 900) as i32);
            v /= 900;
        }
        digits.reverse();

        let mut result = String::new();
        decode_numeric_compaction(&digits, 0, &mut result);
        assert_eq!(result, "007");
    }

    #[test]
    fn byte_compaction_round_trips_a_five_byte_group() {
        let bytes: [u8; 6] = [1, 2, 3, 4, 5, 6];
        let mut value: u64 = 0;
        for &b in &bytes {
            value = (value << 8) | b as u64;
        }
        let mut codewords = [0i32; 5];
        for slot in codewords.iter_mut().rev() {
            *slot = (value % 900) as i32;
            value /= 900;
        }

        let mut result = String::new();
        decode_byte_compaction(&codewords, 0, &mut result);
        assert_eq!(result.as_bytes(), &bytes);
    }
}

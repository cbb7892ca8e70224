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

use crate::common::BitSource;
use crate::qrcode::decoder::{ErrorCorrectionLevel, Mode, Version};
use crate::result::DecoderRXingResult;
use crate::Exceptions;

const ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";
const GB2312_SUBSET: u32 = 1;

/// Maps an ECI designator value to the encoding name `encoding_rs`
/// understands, covering the subset of the ECI registry the corpus's
/// other barcode readers actually exercise.
fn character_set_eci_name(value: u32) -> Option<&'static str> {
    match value {
        0 | 2 => Some("Cp437"),
        1 | 3 => Some("ISO-8859-1"),
        4 => Some("ISO-8859-2"),
        5 => Some("ISO-8859-3"),
        6 => Some("ISO-8859-4"),
        7 => Some("ISO-8859-5"),
        8 => Some("ISO-8859-6"),
        9 => Some("ISO-8859-7"),
        10 => Some("ISO-8859-8"),
        11 => Some("ISO-8859-9"),
        15 => Some("ISO-8859-13"),
        17 => Some("ISO-8859-15"),
        18 => Some("Shift_JIS"),
        20 => Some("Shift_JIS"),
        21 => Some("windows-1250"),
        22 => Some("windows-1251"),
        23 => Some("windows-1252"),
        24 => Some("windows-1256"),
        25 => Some("UTF-16BE"),
        26 => Some("UTF-8"),
        27 | 170 => Some("ASCII"),
        28 => Some("GBK"),
        29 => Some("EUC-KR"),
        _ => None,
    }
}

fn decode_with_charset(bytes: &[u8], charset_name: &str) -> String {
    let encoding = encoding_rs::Encoding::for_label(charset_name.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1252);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Heuristic charset guess for byte segments that carried no ECI and
/// no hinted character set: try UTF-8, and fall back to Latin-1 (a
/// byte-for-byte identity mapping) since that never fails to decode.
fn guess_charset(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}

fn parse_eci_value(bits: &mut BitSource) -> Result<u32, Exceptions> {
    let first_byte = bits.read_bits(8)?;
    if first_byte & 0x80 == 0 {
        return Ok(first_byte & 0x7F);
    } else if first_byte & 0xC0 == 0x80 {
        let second_byte = bits.read_bits(8)?;
        return Ok(((first_byte & 0x3F) << 8) | second_byte);
    } else if first_byte & 0xE0 == 0xC0 {
        let rest = bits.read_bits(16)?;
        return Ok(((first_byte & 0x1F) << 16) | rest);
    }
    Err(Exceptions::format_with(Some("invalid ECI designator".to_owned())))
}

fn decode_numeric_segment(bits: &mut BitSource, result: &mut String, mut count: u32) -> Result<(), Exceptions> {
    while count >= 3 {
        if bits.available() < 10 {
            return Err(Exceptions::format_with(None));
        }
        let three_digits = bits.read_bits(10)?;
        if three_digits >= 1000 {
            return Err(Exceptions::format_with(Some("invalid numeric digits".to_owned())));
        }
        result.push_str(&format!("{:03}", three_digits));
        count -= 3;
    }
    if count == 2 {
        if bits.available() < 7 {
            return Err(Exceptions::format_with(None));
        }
        let two_digits = bits.read_bits(7)?;
        if two_digits >= 100 {
            return Err(Exceptions::format_with(Some("invalid numeric digits".to_owned())));
        }
        result.push_str(&format!("{:02}", two_digits));
    } else if count == 1 {
        if bits.available() < 4 {
            return Err(Exceptions::format_with(None));
        }
        let digit = bits.read_bits(4)?;
        if digit >= 10 {
            return Err(Exceptions::format_with(Some("invalid numeric digit".to_owned())));
        }
        result.push_str(&digit.to_string());
    }
    Ok(())
}

fn decode_alphanumeric_segment(bits: &mut BitSource, result: &mut String, mut count: u32, fc1_in_effect: bool) -> Result<(), Exceptions> {
    let start = result.len();
    while count > 1 {
        if bits.available() < 11 {
            return Err(Exceptions::format_with(None));
        }
        let next_two_chars_bits = bits.read_bits(11)?;
        result.push(ALPHANUMERIC_CHARS[(next_two_chars_bits / 45) as usize] as char);
        result.push(ALPHANUMERIC_CHARS[(next_two_chars_bits % 45) as usize] as char);
        count -= 2;
    }
    if count == 1 {
        if bits.available() < 6 {
            return Err(Exceptions::format_with(None));
        }
        result.push(ALPHANUMERIC_CHARS[bits.read_bits(6)? as usize] as char);
    }
    if fc1_in_effect {
        let tail: Vec<char> = result[start..].chars().collect();
        let mut rebuilt = String::with_capacity(tail.len());
        let mut i = 0;
        while i < tail.len() {
            if tail[i] == '%' {
                if i + 1 < tail.len() && tail[i + 1] == '%' {
                    rebuilt.push('%');
                    i += 2;
                    continue;
                }
                rebuilt.push('\u{1D}');
                i += 1;
                continue;
            }
            rebuilt.push(tail[i]);
            i += 1;
        }
        result.truncate(start);
        result.push_str(&rebuilt);
    }
    Ok(())
}

fn decode_byte_segment(
    bits: &mut BitSource,
    result: &mut String,
    count: u32,
    current_charset: Option<&str>,
    byte_segments: &mut Vec<Vec<u8>>,
) -> Result<(), Exceptions> {
    if bits.available() < 8 * count as usize {
        return Err(Exceptions::format_with(None));
    }
    let mut read_bytes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        read_bytes.push(bits.read_bits(8)? as u8);
    }
    let text = match current_charset {
        Some(name) => decode_with_charset(&read_bytes, name),
        None => guess_charset(&read_bytes),
    };
    byte_segments.push(read_bytes);
    result.push_str(&text);
    Ok(())
}

fn decode_kanji_segment(bits: &mut BitSource, result: &mut String, count: u32) -> Result<(), Exceptions> {
    if bits.available() < 13 * count as usize {
        return Err(Exceptions::format_with(None));
    }
    let mut buffer = Vec::with_capacity(2 * count as usize);
    for _ in 0..count {
        let two_bytes = bits.read_bits(13)?;
        let mut assembled = ((two_bytes / 0xC0) << 8) | (two_bytes % 0xC0);
        assembled += if assembled < 0x01F00 { 0x8140 } else { 0xC140 };
        buffer.push((assembled >> 8) as u8);
        buffer.push((assembled & 0xFF) as u8);
    }
    let (decoded, _, _) = encoding_rs::SHIFT_JIS.decode(&buffer);
    result.push_str(&decoded);
    Ok(())
}

fn decode_hanzi_segment(bits: &mut BitSource, result: &mut String, count: u32) -> Result<(), Exceptions> {
    if bits.available() < 13 * count as usize {
        return Err(Exceptions::format_with(None));
    }
    let mut buffer = Vec::with_capacity(2 * count as usize);
    for _ in 0..count {
        let two_bytes = bits.read_bits(13)?;
        let mut assembled = ((two_bytes / 0x060) << 8) | (two_bytes % 0x060);
        assembled += 0xA1A1;
        buffer.push((assembled >> 8) as u8);
        buffer.push((assembled & 0xFF) as u8);
    }
    let (decoded, _, _) = encoding_rs::GBK.decode(&buffer);
    result.push_str(&decoded);
    Ok(())
}

pub fn decode(
    bytes: &[u8],
    version: &Version,
    ec_level: ErrorCorrectionLevel,
    hinted_charset: Option<&str>,
) -> Result<DecoderRXingResult, Exceptions> {
    let mut bits = BitSource::new(bytes);
    let mut result = String::with_capacity(50);
    let mut byte_segments: Vec<Vec<u8>> = Vec::new();
    let mut symbol_sequence: i32 = -1;
    let mut parity_data: i32 = -1;
    let mut current_charset: Option<&str> = hinted_charset;
    let mut fc1_in_effect = false;

    loop {
        let mode = if bits.available() < 4 {
            Mode::Terminator
        } else {
            Mode::for_bits(bits.read_bits(4)?)?
        };

        match mode {
            Mode::Terminator => break,
            Mode::Fnc1FirstPosition | Mode::Fnc1SecondPosition => {
                fc1_in_effect = true;
            }
            Mode::StructuredAppend => {
                if bits.available() < 16 {
                    return Err(Exceptions::format_with(None));
                }
                symbol_sequence = bits.read_bits(8)? as i32;
                parity_data = bits.read_bits(8)? as i32;
            }
            Mode::Eci => {
                let value = parse_eci_value(&mut bits)?;
                current_charset = Some(character_set_eci_name(value).ok_or_else(|| Exceptions::format_with(Some("unsupported ECI value".to_owned())))?);
            }
            Mode::Hanzi => {
                let subset = bits.read_bits(4)?;
                let count_hanzi = bits.read_bits(mode.character_count_bits(version.version_number) as usize)?;
                if subset == GB2312_SUBSET {
                    decode_hanzi_segment(&mut bits, &mut result, count_hanzi)?;
                }
            }
            Mode::Numeric | Mode::Alphanumeric | Mode::Byte | Mode::Kanji => {
                let count = bits.read_bits(mode.character_count_bits(version.version_number) as usize)?;
                match mode {
                    Mode::Numeric => decode_numeric_segment(&mut bits, &mut result, count)?,
                    Mode::Alphanumeric => decode_alphanumeric_segment(&mut bits, &mut result, count, fc1_in_effect)?,
                    Mode::Byte => decode_byte_segment(&mut bits, &mut result, count, current_charset, &mut byte_segments)?,
                    Mode::Kanji => decode_kanji_segment(&mut bits, &mut result, count)?,
                    _ => unreachable!(),
                }
            }
        }
    }

    let mut decoder_result = DecoderRXingResult::new(bytes.to_vec(), result).with_ec_level(ec_level.as_str().to_owned());
    if !byte_segments.is_empty() {
        decoder_result = decoder_result.with_byte_segments(byte_segments);
    }
    if symbol_sequence >= 0 || parity_data >= 0 {
        decoder_result = decoder_result.with_structured_append(symbol_sequence, parity_data);
    }
    Ok(decoder_result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BitArray;

    fn bits_for_numeric(digits: &str) -> Vec<u8> {
        let mut ba = BitArray::new();
        ba.append_bits(Mode::Numeric.bits(), 4).unwrap();
        ba.append_bits(digits.len() as u32, Mode::Numeric.character_count_bits(1) as usize).unwrap();
        let bytes = digits.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let remaining = bytes.len() - i;
            if remaining >= 3 {
                let v: u32 = digits[i..i + 3].parse().unwrap();
                ba.append_bits(v, 10).unwrap();
                i += 3;
            } else if remaining == 2 {
                let v: u32 = digits[i..i + 2].parse().unwrap();
                ba.append_bits(v, 7).unwrap();
                i += 2;
            } else {
                let v: u32 = digits[i..i + 1].parse().unwrap();
                ba.append_bits(v, 4).unwrap();
                i += 1;
            }
        }
        ba.append_bits(Mode::Terminator.bits(), 4).unwrap();
        while ba.size() % 8 != 0 {
            ba.append_bit(false);
        }
        let mut out = Vec::new();
        for byte_start in (0..ba.size()).step_by(8) {
            let mut b = 0u8;
            for bit in 0..8 {
                b = (b << 1) | ba.get(byte_start + bit) as u8;
            }
            out.push(b);
        }
        out
    }

    #[test]
    fn decodes_a_numeric_segment_round_trip() {
        let bytes = bits_for_numeric("0123456789");
        let version = Version::get_version_for_number(1).unwrap();
        let result = decode(&bytes, version, ErrorCorrectionLevel::M, None).unwrap();
        assert_eq!(result.text(), "0123456789");
    }
}

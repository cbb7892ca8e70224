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

use crate::{BarcodeFormat, Point};

/// The final, public decode result: a payload plus where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct RXingResult {
    text: String,
    raw_bytes: Vec<u8>,
    points: Vec<Point>,
    format: BarcodeFormat,
}

impl RXingResult {
    pub fn new(
        text: impl Into<String>,
        raw_bytes: Vec<u8>,
        points: Vec<Point>,
        format: BarcodeFormat,
    ) -> Self {
        Self {
            text: text.into(),
            raw_bytes,
            points,
            format,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn format(&self) -> BarcodeFormat {
        self.format
    }
}

/// Output of a symbol-specific bit-stream decoder: the stage between
/// corrected codewords and the public `RXingResult`.
#[derive(Debug, Clone, Default)]
pub struct DecoderRXingResult {
    raw_bytes: Vec<u8>,
    text: String,
    byte_segments: Vec<Vec<u8>>,
    ec_level: Option<String>,
    structured_append_sequence_number: i32,
    structured_append_parity: i32,
    symbology_modifier: u32,
}

impl DecoderRXingResult {
    pub fn new(raw_bytes: Vec<u8>, text: impl Into<String>) -> Self {
        Self {
            raw_bytes,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_ec_level(mut self, ec_level: impl Into<String>) -> Self {
        self.ec_level = Some(ec_level.into());
        self
    }

    pub fn with_byte_segments(mut self, segments: Vec<Vec<u8>>) -> Self {
        self.byte_segments = segments;
        self
    }

    pub fn with_structured_append(mut self, sequence_number: i32, parity: i32) -> Self {
        self.structured_append_sequence_number = sequence_number;
        self.structured_append_parity = parity;
        self
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn byte_segments(&self) -> &[Vec<u8>] {
        &self.byte_segments
    }

    pub fn ec_level(&self) -> Option<&str> {
        self.ec_level.as_deref()
    }
}


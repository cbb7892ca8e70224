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

use std::collections::HashMap;
use std::rc::Rc;

use crate::BarcodeFormat;

/// Key half of the hint dictionary consumed internally by readers. Kept
/// separate from `DecodeHintValue` so the dictionary can be typed as a
/// `HashMap` keyed on a plain enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeHintType {
    POSSIBLE_FORMATS,
    TRY_HARDER,
    PURE_BARCODE,
    CHARACTER_SET,
    ALSO_INVERTED,
    NEED_RESULT_POINT_CALLBACK,
    QR_ASSUME_SPEC_CONFORM_INPUT,
}

pub type ResultPointCallback = Rc<dyn Fn(f32, f32)>;

#[derive(Clone)]
pub enum DecodeHintValue {
    PossibleFormats(Vec<BarcodeFormat>),
    TryHarder(bool),
    PureBarcode(bool),
    CharacterSet(String),
    AlsoInverted(bool),
    NeedResultPointCallback(ResultPointCallback),
    QrAssumeSpecConformInput(bool),
}

impl std::fmt::Debug for DecodeHintValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PossibleFormats(v) => write!(f, "PossibleFormats({v:?})"),
            Self::TryHarder(v) => write!(f, "TryHarder({v})"),
            Self::PureBarcode(v) => write!(f, "PureBarcode({v})"),
            Self::CharacterSet(v) => write!(f, "CharacterSet({v})"),
            Self::AlsoInverted(v) => write!(f, "AlsoInverted({v})"),
            Self::NeedResultPointCallback(_) => write!(f, "NeedResultPointCallback(..)"),
            Self::QrAssumeSpecConformInput(v) => write!(f, "QrAssumeSpecConformInput({v})"),
        }
    }
}

/// The dictionary shape every `Reader::decode` is handed. Built from the
/// friendlier `DecodeHints` below.
pub type DecodingHintDictionary = HashMap<DecodeHintType, DecodeHintValue>;

/// Public, ergonomic hint surface: a format bitset plus a few toggles.
#[derive(Debug, Clone, Default)]
pub struct DecodeHints {
    pub formats: Vec<BarcodeFormat>,
    pub try_harder: bool,
    pub character_set: Option<&'static str>,
    pub also_inverted: bool,
    #[allow(clippy::type_complexity)]
    pub point_callback: Option<Rc<dyn Fn(f32, f32)>>,
}

impl DecodeHints {
    pub fn with_formats(formats: impl IntoIterator<Item = BarcodeFormat>) -> Self {
        Self {
            formats: formats.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn try_harder(mut self, v: bool) -> Self {
        self.try_harder = v;
        self
    }

    pub fn to_dictionary(&self) -> DecodingHintDictionary {
        let mut dict = DecodingHintDictionary::new();
        if !self.formats.is_empty() {
            dict.insert(
                DecodeHintType::POSSIBLE_FORMATS,
                DecodeHintValue::PossibleFormats(self.formats.clone()),
            );
        }
        if self.try_harder {
            dict.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        }
        if self.also_inverted {
            dict.insert(
                DecodeHintType::ALSO_INVERTED,
                DecodeHintValue::AlsoInverted(true),
            );
        }
        if let Some(cs) = self.character_set {
            dict.insert(
                DecodeHintType::CHARACTER_SET,
                DecodeHintValue::CharacterSet(cs.to_owned()),
            );
        }
        if let Some(cb) = self.point_callback.clone() {
            dict.insert(
                DecodeHintType::NEED_RESULT_POINT_CALLBACK,
                DecodeHintValue::NeedResultPointCallback(cb),
            );
        }
        dict
    }
}

pub fn dictionary_try_harder(hints: &DecodingHintDictionary) -> bool {
    matches!(
        hints.get(&DecodeHintType::TRY_HARDER),
        Some(DecodeHintValue::TryHarder(true))
    )
}

pub fn dictionary_formats(hints: &DecodingHintDictionary) -> Option<&[BarcodeFormat]> {
    match hints.get(&DecodeHintType::POSSIBLE_FORMATS) {
        Some(DecodeHintValue::PossibleFormats(v)) => Some(v.as_slice()),
        _ => None,
    }
}

pub fn dictionary_point_callback(hints: &DecodingHintDictionary) -> Option<&ResultPointCallback> {
    match hints.get(&DecodeHintType::NEED_RESULT_POINT_CALLBACK) {
        Some(DecodeHintValue::NeedResultPointCallback(cb)) => Some(cb),
        _ => None,
    }
}

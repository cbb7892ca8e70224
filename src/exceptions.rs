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

use thiserror::Error;

/// The full error taxonomy produced by every stage of the decoding pipeline.
///
/// `NotFoundException` is the only variant the outer scanning loops swallow
/// silently while they keep looking; the other three are always surfaced to
/// the caller of the top level `Reader`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Exceptions {
    /// No barcode could be located, or detection heuristics were exhausted.
    #[error("NotFoundException: {0}")]
    NotFoundException(String),

    /// A structural violation: bad mode indicator, invalid version/format
    /// information, data that overruns the layer capacity, and the like.
    #[error("FormatException: {0:?}")]
    FormatException(Option<String>),

    /// Reed-Solomon (or a 1D check digit) failed to validate the codewords.
    #[error("ChecksumException: {0}")]
    ChecksumException(String),

    /// Caller supplied bad arguments - out-of-range coordinates, a crop
    /// rectangle outside the image, an inverted bit-array range. Indicates a
    /// bug in the calling code rather than a malformed barcode.
    #[error("IllegalArgumentException: {0}")]
    IllegalArgumentException(String),

    #[error("IllegalStateException: {0}")]
    IllegalStateException(String),

    #[error("UnsupportedOperationException: {0}")]
    UnsupportedOperationException(String),

    #[error("RuntimeException: {0}")]
    RuntimeException(String),
}

impl Exceptions {
    pub fn not_found_with(msg: impl Into<String>) -> Self {
        Self::NotFoundException(msg.into())
    }

    pub fn format_with(msg: impl Into<String>) -> Self {
        Self::FormatException(Some(msg.into()))
    }

    pub fn checksum_with(msg: impl Into<String>) -> Self {
        Self::ChecksumException(msg.into())
    }

    pub fn illegal_argument_with(msg: impl Into<String>) -> Self {
        Self::IllegalArgumentException(msg.into())
    }

    pub fn illegal_state_with(msg: impl Into<String>) -> Self {
        Self::IllegalStateException(msg.into())
    }

    pub fn unsupported_operation_with(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperationException(msg.into())
    }

    pub fn runtime_with(msg: impl Into<String>) -> Self {
        Self::RuntimeException(msg.into())
    }

    /// True for the only failure kind the outer scanning loops catch while
    /// continuing to the next row / reader / region.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFoundException(_))
    }
}

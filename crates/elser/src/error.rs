// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for descriptor lookups, stream decoding and plan generation.
//!
//! Codec *resolution* failure is deliberately not represented here: the
//! resolver reports absence as `None` so a containing type can fail without
//! aborting the whole generation pass. Everything that does surface as an
//! error lands in one of the variants below, and [`Error::is_malformed_stream`]
//! separates "bad input data" from "caller bug".

use std::fmt;

/// Invalid element lookup on a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Index is outside the descriptor's element range.
    UnknownIndex { descriptor: String, index: usize },
    /// Name does not match any element of the descriptor.
    UnknownName { descriptor: String, name: String },
    /// The structural kind carries no elements at all (e.g. unit).
    NoElements { descriptor: String },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIndex { descriptor, index } => {
                write!(f, "{}: no element at index {}", descriptor, index)
            }
            Self::UnknownName { descriptor, name } => {
                write!(f, "{}: no element named '{}'", descriptor, name)
            }
            Self::NoElements { descriptor } => {
                write!(f, "{} has no elements", descriptor)
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

/// Malformed input detected while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// List items must arrive with contiguous, increasing indices from 1.
    ListOutOfOrder { expected: usize, found: usize },
    /// The stream selected an element index the descriptor does not have.
    UnknownElementIndex {
        descriptor: String,
        index: usize,
        count: usize,
    },
    /// A concrete protocol implementation rejected its own input.
    Malformed { reason: String },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListOutOfOrder { expected, found } => write!(
                f,
                "list elements must be in order: expected index {}, found {}",
                expected, found
            ),
            Self::UnknownElementIndex {
                descriptor,
                index,
                count,
            } => write!(
                f,
                "{}: stream selected element {} but descriptor has {} elements",
                descriptor, index, count
            ),
            Self::Malformed { reason } => write!(f, "malformed stream: {}", reason),
        }
    }
}

impl std::error::Error for StreamError {}

/// Generation-time diagnostics pointing at the offending field or type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No codec could be resolved for a field that needs one.
    UnresolvableField { record: String, field: String },
    /// Executing a plan that was never emitted for this entry point.
    MissingPlan { record: String, direction: &'static str },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvableField { record, field } => {
                write!(f, "{}.{}: no codec resolved for field type", record, field)
            }
            Self::MissingPlan { record, direction } => {
                write!(f, "{}: no {} plan was generated", record, direction)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Descriptor(DescriptorError),
    Stream(StreamError),
    Generation(GenerationError),
    /// A value handed to a codec does not have the shape the codec encodes.
    ValueMismatch {
        expected: &'static str,
        found: String,
    },
}

impl Error {
    /// True when the error came from bad stream data rather than a caller bug.
    pub fn is_malformed_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor(e) => write!(f, "descriptor error: {}", e),
            Self::Stream(e) => write!(f, "stream error: {}", e),
            Self::Generation(e) => write!(f, "generation error: {}", e),
            Self::ValueMismatch { expected, found } => {
                write!(f, "value mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Descriptor(e) => Some(e),
            Self::Stream(e) => Some(e),
            Self::Generation(e) => Some(e),
            Self::ValueMismatch { .. } => None,
        }
    }
}

impl From<DescriptorError> for Error {
    fn from(e: DescriptorError) -> Self {
        Self::Descriptor(e)
    }
}

impl From<StreamError> for Error {
    fn from(e: StreamError) -> Self {
        Self::Stream(e)
    }
}

impl From<GenerationError> for Error {
    fn from(e: GenerationError) -> Self {
        Self::Generation(e)
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

//! Error types for the settlement engine.
//!
//! Undetermined settlements are not errors; they surface as `None`.
//! These variants cover caller contract violations at the string boundary.

use thiserror::Error;

/// A betting line could not be parsed as an exact decimal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("empty line value")]
    Empty,

    #[error("invalid line '{input}': {reason}")]
    Invalid { input: String, reason: String },
}

/// A wire string did not name a known enum value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Line ladder configuration is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    #[error("ladder step must be positive, got {0}")]
    NonPositiveStep(String),

    #[error("ladder {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("{range} range would exceed {limit} entries")]
    TooManyEntries { range: &'static str, limit: u32 },

    #[error("{range} range is inverted: {min} > {max}")]
    InvertedRange {
        range: &'static str,
        min: String,
        max: String,
    },
}

//! Rejections produced by the aggregation engine, plus the process exit codes
//! the CLI maps them onto.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Exit codes used by the `boletim` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success, including a failing verdict (0)
    Success = 0,
    /// I/O or configuration failure (1)
    Failure = 1,
    /// Bad flags, or an entry count that does not match the scheme (2)
    Usage = 2,
    /// Input rejected by validation (3)
    Rejected = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Grade,
    Weight,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Grade => f.write_str("grade"),
            Field::Weight => f.write_str("weight"),
        }
    }
}

/// Position of the entry an error refers to. `index` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRef {
    pub index: usize,
    pub label: Option<String>,
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "entry {} ({})", self.index + 1, label),
            None => write!(f, "entry {}", self.index + 1),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{entry}: {field} {text:?} is not a number")]
    NotANumber {
        entry: EntryRef,
        field: Field,
        text: String,
    },

    #[error("{entry}: grade {value} is outside 0..=10")]
    OutOfRange { entry: EntryRef, value: f64 },

    #[error("{entry}: weight {value} must be greater than 0")]
    NonPositiveWeight { entry: EntryRef, value: f64 },

    #[error("total weight is zero")]
    ZeroTotalWeight,

    #[error("average is not a finite number")]
    NonFiniteAverage,

    #[error("no entries to aggregate")]
    NoEntries,
}

impl ValidationError {
    /// The entry the failure refers to, if it concerns a single entry
    pub fn entry(&self) -> Option<&EntryRef> {
        match self {
            ValidationError::NotANumber { entry, .. }
            | ValidationError::OutOfRange { entry, .. }
            | ValidationError::NonPositiveWeight { entry, .. } => Some(entry),
            ValidationError::ZeroTotalWeight
            | ValidationError::NonFiniteAverage
            | ValidationError::NoEntries => None,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Rejected
    }
}

/// Usage errors raised while turning CLI input into a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{scheme} expects {expected} {field}s, got {actual}")]
    EntryCountMismatch {
        scheme: String,
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("unknown scheme: {0} (expected: fundamental, medio, bimester, trimester or semester)")]
    UnknownScheme(String),

    #[error("{0}")]
    Other(String),
}

impl UsageError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Usage
    }
}

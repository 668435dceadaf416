//! Crate-wide error type.
//!
//! Mirrors the error-handling shape used throughout this crate's teacher
//! lineage (hand-written enums with `Display` + `std::error::Error`, no
//! `thiserror`): a small, closed set of variants, each carrying a message
//! that names the offending input and the expected form.
//!
//! Only two kinds are ever constructed: [`Error::InputInvalid`] for
//! malformed input (bad hex, mismatched lengths, invalid constructor
//! parameters) and [`Error::StateViolation`] for calling an operation in
//! the wrong lifecycle state (`update` after `train`, `query` before
//! `train`). There is no third "internal" variant — any such condition is
//! a bug, not a representable error.

use std::fmt;

/// Errors produced by the index's public operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input: bad hex syntax, wrong length, invalid config.
    InputInvalid { message: String },
    /// An operation was called in a lifecycle state that forbids it.
    StateViolation { message: String },
}

impl Error {
    pub(crate) fn input_invalid(message: impl Into<String>) -> Self {
        Error::InputInvalid {
            message: message.into(),
        }
    }

    pub(crate) fn state_violation(message: impl Into<String>) -> Self {
        Error::StateViolation {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputInvalid { message } => write!(f, "invalid input: {message}"),
            Error::StateViolation { message } => write!(f, "invalid state: {message}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

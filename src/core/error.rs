//! core::error
//!
//! The result protocol shared by parsing, autocomplete and execution.
//!
//! # Design
//!
//! Every public operation of the core returns [`ShellResult`]. A failure is
//! a [`ShellError`] whose variant determines its [`ErrorKind`] and whose
//! `Display` output is the human-readable message. Nothing in the core
//! panics on bad input; the worst outcome is a reported failure.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::types::EntryKind;

/// Result type for every core operation.
pub type ShellResult<T> = Result<T, ShellError>;

/// Classification of a failure, independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    EntryNotFound,
    NotADirectory,
    NotACommand,
    WrongEntryKind,
    UnterminatedQuote,
    InvalidParamValue,
    MissingRequiredParam,
    UnexpectedArgument,
    NoMatch,
    ExecutionError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A failure reported by the core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    /// A path component has no matching child.
    #[error("no such entry: '{0}'")]
    EntryNotFound(String),

    /// A command was used where more path components followed.
    #[error("not a directory: '{0}'")]
    NotADirectory(String),

    /// A command line named a directory instead of a command.
    #[error("not a command: '{0}'")]
    NotACommand(String),

    /// A path resolved, but to the wrong kind of entry.
    #[error("'{path}' is a {found}, expected a {expected}")]
    WrongEntryKind {
        path: String,
        expected: EntryKind,
        found: EntryKind,
    },

    /// A quote was opened and never closed. Carries the byte offset of the
    /// opening quote.
    #[error("unterminated quote at offset {0}")]
    UnterminatedQuote(usize),

    #[error("invalid value for '{param}': {reason}")]
    InvalidParamValue { param: String, reason: String },

    #[error("missing required parameter '{0}'")]
    MissingRequiredParam(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    /// Autocomplete produced no candidates.
    #[error("no completions for '{0}'")]
    NoMatch(String),

    /// An executor failed or panicked.
    #[error("{0}")]
    Execution(String),
}

impl ShellError {
    /// Shorthand for an `InvalidParamValue` failure.
    pub fn invalid_value(param: impl Into<String>, reason: impl Into<String>) -> Self {
        ShellError::InvalidParamValue {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// The kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShellError::EntryNotFound(_) => ErrorKind::EntryNotFound,
            ShellError::NotADirectory(_) => ErrorKind::NotADirectory,
            ShellError::NotACommand(_) => ErrorKind::NotACommand,
            ShellError::WrongEntryKind { .. } => ErrorKind::WrongEntryKind,
            ShellError::UnterminatedQuote(_) => ErrorKind::UnterminatedQuote,
            ShellError::InvalidParamValue { .. } => ErrorKind::InvalidParamValue,
            ShellError::MissingRequiredParam(_) => ErrorKind::MissingRequiredParam,
            ShellError::UnexpectedArgument(_) => ErrorKind::UnexpectedArgument,
            ShellError::NoMatch(_) => ErrorKind::NoMatch,
            ShellError::Execution(_) => ErrorKind::ExecutionError,
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

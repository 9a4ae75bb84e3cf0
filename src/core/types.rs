//! core::types
//!
//! Strong types for namespace names.
//!
//! # Types
//!
//! - [`EntryName`] - Validated directory or command name
//! - [`EntryKind`] - Directory or command tag
//!
//! # Validation
//!
//! Names are validated at construction time. A name that could not be
//! typed as a single path component on a command line cannot be
//! represented.
//!
//! # Examples
//!
//! ```
//! use treeshell::core::types::EntryName;
//!
//! let name = EntryName::new("build").unwrap();
//! assert_eq!(name.as_str(), "build");
//!
//! assert!(EntryName::new("").is_err());
//! assert!(EntryName::new("has space").is_err());
//! assert!(EntryName::new("..").is_err());
//! ```

use serde::Serialize;
use thiserror::Error;

/// Errors from name validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid entry name: {0}")]
    InvalidEntryName(String),

    #[error("invalid parameter name: {0}")]
    InvalidParamName(String),
}

/// The two kinds of namespace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    Command,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::Command => write!(f, "command"),
        }
    }
}

/// A validated entry name.
///
/// Entry names must be usable as a single path component:
/// - Cannot be empty
/// - Cannot be exactly `.` or `..` (reserved for relative navigation)
/// - Cannot contain whitespace or control characters
///
/// Separator and quote characters are syntax-dependent and are rejected by
/// the namespace builder, which knows the syntax in use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryName(String);

impl EntryName {
    /// Create a new validated entry name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidEntryName` if the name breaks a rule above.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The root directory's name: the only empty name.
    pub(crate) fn root() -> Self {
        Self(String::new())
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidEntryName(
                "entry name cannot be empty".into(),
            ));
        }
        if name == "." || name == ".." {
            return Err(TypeError::InvalidEntryName(format!(
                "'{name}' is reserved for relative paths"
            )));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidEntryName(format!(
                "'{name}' contains whitespace or control characters"
            )));
        }
        Ok(())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a parameter name.
///
/// Parameter names appear after `--` on the command line, so they cannot be
/// empty, start with `-`, or contain whitespace or `=`.
pub fn validate_param_name(name: &str) -> Result<(), TypeError> {
    if name.is_empty() {
        return Err(TypeError::InvalidParamName(
            "parameter name cannot be empty".into(),
        ));
    }
    if name.starts_with('-') {
        return Err(TypeError::InvalidParamName(format!(
            "'{name}' cannot start with '-'"
        )));
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control() || c == '=') {
        return Err(TypeError::InvalidParamName(format!(
            "'{name}' contains whitespace, control characters or '='"
        )));
    }
    Ok(())
}

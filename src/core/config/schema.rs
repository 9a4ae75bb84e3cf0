//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing. The separator and quote characters
//! must be distinct punctuation that cannot appear inside a flag or a
//! number, and the prompt template must not be empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Shell configuration file.
///
/// # Example
///
/// ```toml
/// separator = "/"
/// quote = '"'
/// prompt = "{cwd}> "
/// history_limit = 100
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Path separator
    pub separator: Option<char>,

    /// Quote character
    pub quote: Option<char>,

    /// Prompt template; `{cwd}` is replaced with the working directory
    pub prompt: Option<String>,

    /// Number of history entries kept
    pub history_limit: Option<usize>,
}

/// Characters that can never be the separator or the quote.
const FORBIDDEN: &[char] = &['.', '-', '='];

fn check_syntax_char(key: &str, c: char) -> Result<(), ConfigError> {
    if c.is_whitespace() || c.is_alphanumeric() || c.is_control() || FORBIDDEN.contains(&c) {
        return Err(ConfigError::InvalidValue(format!(
            "{key} '{}' must be punctuation other than {}",
            c.escape_default(),
            FORBIDDEN.iter().map(|f| format!("'{f}'")).collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(())
}

impl ShellConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(separator) = self.separator {
            check_syntax_char("separator", separator)?;
        }
        if let Some(quote) = self.quote {
            check_syntax_char("quote", quote)?;
        }

        let separator = self.separator.unwrap_or('/');
        let quote = self.quote.unwrap_or('"');
        if separator == quote {
            return Err(ConfigError::InvalidValue(format!(
                "separator and quote are both '{separator}'"
            )));
        }

        if let Some(prompt) = &self.prompt {
            if prompt.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "prompt cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

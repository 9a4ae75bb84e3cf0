//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order; the first existing file wins:
//! 1. `$TREESHELL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/treeshell/config.toml`
//! 3. `~/.treeshell/config.toml`
//!
//! A missing file means defaults. A file that exists but does not parse or
//! validate is an error.
//!
//! # Example
//!
//! ```no_run
//! use treeshell::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("separator: {}", config.syntax().separator);
//! println!("history: {}", config.history_limit());
//! ```

pub mod schema;

pub use schema::ShellConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::lexer::Syntax;

/// Default prompt template.
pub const DEFAULT_PROMPT: &str = "{cwd}> ";

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub shell: ShellConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let found = locate(|key| std::env::var(key).ok(), dirs::home_dir());
        match found {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let shell: ShellConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        shell.validate()?;

        log::debug!("loaded config from {}", path.display());
        Ok(Self {
            shell,
            path: Some(path.to_path_buf()),
        })
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    /// Separator and quote characters.
    pub fn syntax(&self) -> Syntax {
        let defaults = Syntax::default();
        Syntax {
            separator: self.shell.separator.unwrap_or(defaults.separator),
            quote: self.shell.quote.unwrap_or(defaults.quote),
        }
    }

    /// Prompt template. Defaults to `"{cwd}> "`.
    pub fn prompt(&self) -> &str {
        self.shell.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// Defaults to 100.
    pub fn history_limit(&self) -> usize {
        self.shell.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Find the first existing config file.
fn locate(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    let candidates = [
        env("TREESHELL_CONFIG").map(PathBuf::from),
        env("XDG_CONFIG_HOME").map(|xdg| PathBuf::from(xdg).join("treeshell/config.toml")),
        home.map(|home| home.join(".treeshell/config.toml")),
    ];
    candidates.into_iter().flatten().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.syntax(), Syntax::default());
        assert_eq!(config.prompt(), "{cwd}> ");
        assert_eq!(config.history_limit(), 100);
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "config.toml",
            r#"
            separator = ":"
            prompt = "tsh {cwd} $ "
            "#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.syntax().separator, ':');
        assert_eq!(config.syntax().quote, '"');
        assert_eq!(config.prompt(), "tsh {cwd} $ ");
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "config.toml", "separator = \"a\"");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn unparsable_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "config.toml", "history_limit = \"lots\"");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));

        let missing = temp.path().join("missing.toml");
        assert!(matches!(
            Config::load_from(&missing),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn locate_precedence() {
        let temp = TempDir::new().unwrap();
        let explicit = write(temp.path(), "explicit.toml", "");
        let xdg = write(temp.path(), "xdg/treeshell/config.toml", "");
        let home = write(temp.path(), "home/.treeshell/config.toml", "");
        let xdg_root = temp.path().join("xdg").to_string_lossy().into_owned();
        let home_dir = Some(temp.path().join("home"));

        let env_all = |key: &str| match key {
            "TREESHELL_CONFIG" => Some(explicit.to_string_lossy().into_owned()),
            "XDG_CONFIG_HOME" => Some(xdg_root.clone()),
            _ => None,
        };
        assert_eq!(locate(env_all, home_dir.clone()), Some(explicit.clone()));

        let env_xdg = |key: &str| (key == "XDG_CONFIG_HOME").then(|| xdg_root.clone());
        assert_eq!(locate(env_xdg, home_dir.clone()), Some(xdg));

        assert_eq!(locate(|_| None, home_dir), Some(home));
        assert_eq!(locate(|_| None, None), None);
    }

    #[test]
    fn missing_explicit_file_falls_through() {
        let temp = TempDir::new().unwrap();
        let home = write(temp.path(), ".treeshell/config.toml", "");
        let env = |key: &str| (key == "TREESHELL_CONFIG").then(|| "/nonexistent/tsh.toml".to_string());
        assert_eq!(locate(env, Some(temp.path().to_path_buf())), Some(home));
    }
}

//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Console output is formatted consistently and respects the quiet flag.
//! Command output from executors reaches the terminal through
//! [`StdoutSink`]; everything else goes through the functions here.

use std::fmt::Display;
use std::io::Write;

use crate::core::complete::Suggestions;
use crate::core::error::ShellError;
use crate::core::exec::OutputSink;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Writes command output straight to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Format a core failure as `kind: message`.
pub fn format_error(err: &ShellError) -> String {
    format!("{}: {}", err.kind(), err.message())
}

/// Format suggestions for display: candidates in columns, or the completed
/// line when there is exactly one.
pub fn format_suggestions(suggestions: &Suggestions, completed: &str) -> String {
    if suggestions.is_unique() {
        return completed.to_string();
    }
    format_list(suggestions.candidates.iter(), "  ")
}

/// Format a list of items.
pub fn format_list<T: Display>(items: impl IntoIterator<Item = T>, prefix: &str) -> String {
    items
        .into_iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

//! complete command - Complete a partial line
//!
//! Plain output lists the candidates, or prints the completed line when
//! there is exactly one. `--json` prints the full suggestion record.

use std::io::Write;

use serde::Serialize;

use crate::cli::Context;
use crate::core::complete::Suggestions;
use crate::ui::output::{format_error, format_suggestions};
use anyhow::{anyhow, Result};

use super::open_shell;

#[derive(Serialize)]
struct CompletionReport<'a> {
    #[serde(flatten)]
    suggestions: &'a Suggestions,
    completed: String,
}

/// Complete `line`, optionally from the namespace directory `cwd`.
pub fn complete(
    ctx: &Context,
    line: &str,
    cwd: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let shell = open_shell(ctx, cwd)?;
    let suggestions = shell
        .autocomplete(line)
        .map_err(|e| anyhow!(format_error(&e)))?;
    let completed = suggestions.apply(line, shell.namespace().syntax());

    if json {
        let report = CompletionReport {
            suggestions: &suggestions,
            completed,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", format_suggestions(&suggestions, &completed))?;
    }
    Ok(())
}

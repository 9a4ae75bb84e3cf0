//! repl command - Interactive line loop
//!
//! Reads one line at a time. A line ending in a TAB character is a
//! completion request for the text before the TAB; `exit` or `quit` ends
//! the loop, as does end of input. Failures are reported and the loop
//! continues.

use std::io::{BufRead, Write};

use crate::cli::Context;
use crate::ui::output::{self, format_error, format_suggestions, Verbosity};
use anyhow::Result;

use super::open_shell;

/// Run the REPL until `exit`, `quit` or end of input.
pub fn repl(ctx: &Context, input: impl BufRead, out: &mut dyn Write) -> Result<()> {
    let mut shell = open_shell(ctx, None)?;
    output::debug(
        format!("{} commands loaded", shell.namespace().command_count()),
        ctx.verbosity,
    );

    let mut lines = input.lines();
    loop {
        if ctx.verbosity != Verbosity::Quiet {
            write!(out, "{}", shell.prompt())?;
            out.flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(partial) = line.strip_suffix('\t') {
            match shell.autocomplete(partial) {
                Ok(suggestions) => {
                    let completed = suggestions.apply(partial, shell.namespace().syntax());
                    writeln!(out, "{}", format_suggestions(&suggestions, &completed))?;
                }
                Err(e) => output::error(format_error(&e)),
            }
            continue;
        }

        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        let mut buffer = String::new();
        let result = shell.run(line, &mut buffer);
        out.write_all(buffer.as_bytes())?;
        if let Err(e) = result {
            output::error(format_error(&e));
        }
    }

    Ok(())
}

//! run command - Run a single line and exit

use crate::cli::Context;
use crate::core::exec::OutputSink;
use crate::ui::output::format_error;
use anyhow::{anyhow, Result};

use super::open_shell;

/// Run `line`, optionally from the namespace directory `cwd`.
pub fn run(ctx: &Context, line: &str, cwd: Option<&str>, out: &mut dyn OutputSink) -> Result<()> {
    let mut shell = open_shell(ctx, cwd)?;
    shell
        .run(line, out)
        .map_err(|e| anyhow!(format_error(&e)))
}

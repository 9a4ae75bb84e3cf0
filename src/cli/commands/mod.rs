//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds a session over the demo namespace
//! 2. Hands the line to the session
//! 3. Formats and displays the outcome
//!
//! Handlers write to the writer they are given so they can be exercised
//! without a terminal.

mod complete;
mod completion;
mod repl;
mod run;
mod tree;

pub use complete::complete;
pub use completion::completion;
pub use repl::repl;
pub use run::run;
pub use tree::tree;

use crate::cli::args::Command;
use crate::cli::{demo, Context};
use crate::shell::Shell;
use crate::ui::output::{format_error, StdoutSink};
use anyhow::{anyhow, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    let stdout = std::io::stdout();
    match command {
        Command::Repl => repl::repl(ctx, std::io::stdin().lock(), &mut stdout.lock()),
        Command::Run { line, cwd } => run::run(ctx, &line, cwd.as_deref(), &mut StdoutSink),
        Command::Complete { line, cwd, json } => {
            complete::complete(ctx, &line, cwd.as_deref(), json, &mut stdout.lock())
        }
        Command::Tree => tree::tree(ctx, &mut stdout.lock()),
        Command::Completion { shell } => completion::completion(shell, &mut stdout.lock()),
    }
}

/// Open a session over the demo namespace, optionally at `cwd`.
pub(crate) fn open_shell(ctx: &Context, cwd: Option<&str>) -> Result<Shell> {
    let namespace = demo::namespace(ctx.config.syntax())?;
    let mut shell = Shell::with_config(namespace, &ctx.config);
    if let Some(path) = cwd {
        shell
            .change_dir(path)
            .map_err(|e| anyhow!("invalid --cwd: {}", format_error(&e)))?;
    }
    Ok(shell)
}

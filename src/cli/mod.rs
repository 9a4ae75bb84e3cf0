//! cli
//!
//! The `tsh` host binary.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging and load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds the demo
//! namespace from [`demo`] and drives a [`crate::shell::Shell`] over it.

pub mod args;
pub mod commands;
pub mod demo;

pub use args::{Cli, ShellKind};

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};
use anyhow::Result;

/// Settings shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    if let Some(path) = config.loaded_from() {
        output::debug(format!("config: {}", path.display()), verbosity);
    }

    let ctx = Context { config, verbosity };
    commands::dispatch(cli.command.unwrap_or(args::Command::Repl), &ctx)
}

/// Install `env_logger`; `RUST_LOG` overrides the default filter.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

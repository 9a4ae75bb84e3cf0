//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Load this config file instead of searching
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tsh - a demonstration host for the treeshell command engine
#[derive(Parser, Debug)]
#[command(name = "tsh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; no prompt in the REPL
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `repl`
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read lines from stdin and run them
    #[command(
        name = "repl",
        long_about = "Read lines from stdin and run them against the demo namespace.\n\n\
            Builtins (cd, pwd, ls, help, history) are always available. A line \
            ending in a TAB character asks for completions instead of running.",
        after_help = "\
EXAMPLES:
    tsh
    /> cd math
    /math> add 2 3
    5
    /math> exit"
    )]
    Repl,

    /// Run a single line and exit
    #[command(
        name = "run",
        after_help = "\
EXAMPLES:
    tsh run 'echo \"hello world\"'
    tsh run 'add 2 3' --cwd /math"
    )]
    Run {
        /// The command line
        line: String,

        /// Working directory inside the namespace
        #[arg(long, value_name = "PATH")]
        cwd: Option<String>,
    },

    /// Complete a partial line
    #[command(
        name = "complete",
        after_help = "\
EXAMPLES:
    tsh complete 'ma'
    tsh complete 'math/add --' --json"
    )]
    Complete {
        /// The partial line
        line: String,

        /// Working directory inside the namespace
        #[arg(long, value_name = "PATH")]
        cwd: Option<String>,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Print the namespace
    Tree,

    /// Generate shell completion scripts for tsh
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    tsh completion bash > ~/.local/share/bash-completion/completions/tsh
    tsh completion zsh > ~/.zfunc/_tsh"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: ShellKind,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repl_is_the_default() {
        let cli = Cli::try_parse_from(["tsh", "--quiet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.quiet);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tsh", "complete", "ma", "--json", "--debug"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Some(Command::Complete { line, json, cwd }) => {
                assert_eq!(line, "ma");
                assert!(json);
                assert!(cwd.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

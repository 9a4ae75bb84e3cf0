//! completion command - Generate shell completion scripts

use std::io::Write;

use crate::cli::args::{Cli, ShellKind};
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};

/// Generate shell completion scripts.
pub fn completion(shell: ShellKind, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        ShellKind::Bash => generate(shells::Bash, &mut cmd, &name, out),
        ShellKind::Zsh => generate(shells::Zsh, &mut cmd, &name, out),
        ShellKind::Fish => generate(shells::Fish, &mut cmd, &name, out),
        ShellKind::PowerShell => generate(shells::PowerShell, &mut cmd, &name, out),
    }

    Ok(())
}

//! shell::builtins
//!
//! Session commands available in every working directory.
//!
//! Builtins are matched on the first token before the namespace is
//! consulted, so a namespace entry with the same name is only reachable
//! through a longer path (`./ls`). Their arguments go through the same
//! parameter matching as namespace commands.

use crate::core::args::Arguments;
use crate::core::error::{ShellError, ShellResult};
use crate::core::exec::OutputSink;
use crate::core::lexer::Syntax;
use crate::core::params::Parameter;
use crate::core::path::resolve;
use crate::core::tree::{DirId, Entry, Namespace};

use super::Shell;

/// A session builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Pwd,
    Ls,
    Help,
    History,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Cd,
        Builtin::Pwd,
        Builtin::Ls,
        Builtin::Help,
        Builtin::History,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Pwd => "pwd",
            Builtin::Ls => "ls",
            Builtin::Help => "help",
            Builtin::History => "history",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Builtin::Cd => "Change the working directory",
            Builtin::Pwd => "Print the working directory",
            Builtin::Ls => "List a directory",
            Builtin::Help => "Describe builtins, commands and directories",
            Builtin::History => "Show recent lines",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Parameters, built for the namespace's syntax.
    pub fn params(self, syntax: &Syntax) -> Vec<Parameter> {
        match self {
            Builtin::Cd => {
                let root = syntax.separator.to_string();
                vec![Parameter::optional_directory("path", move || root.clone())
                    .describe("Directory to enter; the root if omitted")]
            }
            Builtin::Pwd => Vec::new(),
            Builtin::Ls => vec![Parameter::optional_directory("path", || ".".to_string())
                .describe("Directory to list")],
            Builtin::Help => vec![Parameter::optional_string("topic", String::new)
                .describe("Builtin name or path")],
            Builtin::History => vec![Parameter::optional_integer("count", || 0)
                .short('n')
                .describe("Number of lines to show; all if 0")],
        }
    }

    /// `name [params...]`
    pub fn usage(self, syntax: &Syntax) -> String {
        std::iter::once(self.name().to_string())
            .chain(self.params(syntax).iter().map(Parameter::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run `builtin` against the session.
pub(super) fn run(
    shell: &mut Shell,
    builtin: Builtin,
    args: &Arguments,
    out: &mut dyn OutputSink,
) -> ShellResult<()> {
    let ns = shell.namespace();
    match builtin {
        Builtin::Cd => {
            let target = args.directory("path")?;
            log::debug!("cd {}", ns.path_of(Entry::Directory(target)));
            shell.cwd = target;
        }
        Builtin::Pwd => out.write_line(&ns.path_of(Entry::Directory(shell.cwd))),
        Builtin::Ls => {
            for line in listing(ns, args.directory("path")?) {
                out.write_line(&line);
            }
        }
        Builtin::Help => help(shell, args.string("topic")?, out)?,
        Builtin::History => {
            let count = args.integer("count")?;
            let count = usize::try_from(count)
                .map_err(|_| ShellError::invalid_value("count", "must not be negative"))?;
            for entry in shell.history.recent(count) {
                out.write_line(&format!(
                    "{:>5}  {}  {}",
                    entry.number,
                    entry.at.format("%H:%M:%S"),
                    entry.line
                ));
            }
        }
    }
    Ok(())
}

/// Children of `dir`: directories with a trailing separator, commands with
/// their description.
pub fn listing(ns: &Namespace, dir: DirId) -> Vec<String> {
    let sep = ns.syntax().separator;
    let children = ns.directory(dir).children();
    let labels: Vec<String> = children
        .iter()
        .map(|&entry| match entry {
            Entry::Directory(_) => format!("{}{sep}", ns.name_of(entry)),
            Entry::Command(_) => ns.name_of(entry).to_string(),
        })
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    children
        .iter()
        .zip(labels)
        .map(|(&entry, label)| match ns.description_of(entry) {
            "" => label,
            description => format!("{label:<width$}  {description}"),
        })
        .collect()
}

fn help(shell: &Shell, topic: &str, out: &mut dyn OutputSink) -> ShellResult<()> {
    let ns = shell.namespace();
    let syntax = ns.syntax();

    if topic.is_empty() {
        out.write_line("Builtins:");
        let usages: Vec<(String, &str)> = Builtin::ALL
            .iter()
            .map(|b| (b.usage(syntax), b.description()))
            .collect();
        let width = usages.iter().map(|(u, _)| u.len()).max().unwrap_or(0);
        for (usage, description) in usages {
            out.write_line(&format!("  {usage:<width$}  {description}"));
        }
        out.write_line("Type a command path to run it; 'help <path>' describes it.");
        return Ok(());
    }

    if let Some(builtin) = Builtin::from_name(topic) {
        out.write_line(&format!("usage: {}", builtin.usage(syntax)));
        out.write_line(builtin.description());
        describe_params(&builtin.params(syntax), out);
        return Ok(());
    }

    match resolve(ns, topic, shell.cwd)? {
        Entry::Command(id) => {
            let command = ns.command(id);
            out.write_line(&format!("usage: {}", command.usage()));
            if !command.description().is_empty() {
                out.write_line(command.description());
            }
            describe_params(command.params(), out);
        }
        Entry::Directory(id) => {
            let description = ns.description_of(Entry::Directory(id));
            if !description.is_empty() {
                out.write_line(description);
            }
            for line in listing(ns, id) {
                out.write_line(&format!("  {line}"));
            }
        }
    }
    Ok(())
}

fn describe_params(params: &[Parameter], out: &mut dyn OutputSink) {
    let width = params.iter().map(|p| p.name().len()).max().unwrap_or(0);
    for param in params {
        let flag = match param.short_flag() {
            Some(c) => format!(" (-{c})"),
            None => String::new(),
        };
        let line = format!(
            "  {:<width$}  {:<9}  {}{flag}",
            param.name(),
            param.kind().to_string(),
            param.description()
        );
        out.write_line(line.trim_end());
    }
}

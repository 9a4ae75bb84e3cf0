//! tree command - Print the namespace

use std::io::Write;

use crate::cli::Context;
use crate::core::tree::{DirId, Entry, Namespace};
use anyhow::Result;

use super::open_shell;

/// Print every entry, indented by depth, commands with their usage.
pub fn tree(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let shell = open_shell(ctx, None)?;
    let ns = shell.namespace();
    let mut lines = vec![ns.path_of(Entry::Directory(ns.root()))];
    render(ns, ns.root(), 1, &mut lines);
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn render(ns: &Namespace, dir: DirId, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for &entry in ns.directory(dir).children() {
        match entry {
            Entry::Directory(child) => {
                lines.push(format!("{indent}{}{}", ns.name_of(entry), ns.syntax().separator));
                render(ns, child, depth + 1, lines);
            }
            Entry::Command(id) => {
                let command = ns.command(id);
                match command.description() {
                    "" => lines.push(format!("{indent}{}", command.usage())),
                    description => {
                        lines.push(format!("{indent}{}  - {description}", command.usage()))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::output::Verbosity;

    #[test]
    fn prints_demo_namespace() {
        let ctx = Context {
            config: Default::default(),
            verbosity: Verbosity::Normal,
        };
        let mut out = Vec::new();
        tree(&ctx, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "/");
        assert!(lines.contains(&"  math/"));
        assert!(lines.contains(&"    add <a> <b>  - Add two integers"));
        assert!(lines.contains(&"    verbose [--value]  - Set verbose mode; toggles when no value is given"));
    }
}

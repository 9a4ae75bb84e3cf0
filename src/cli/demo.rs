//! cli::demo
//!
//! The namespace served by `tsh`.
//!
//! ```text
//! /
//! ├── echo <text>
//! ├── math/
//! │   ├── add <a> <b>
//! │   └── div <a> <b>
//! ├── settings/
//! │   ├── verbose [--value]
//! │   └── show
//! └── nav/
//!     ├── describe <target>
//!     └── list [dir]
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use anyhow::{bail, Context as _};

use crate::core::lexer::Syntax;
use crate::core::params::Parameter;
use crate::core::tree::{BuildError, CommandDef, Entry, Namespace, NamespaceBuilder};
use crate::shell::builtins::listing;

/// Late-bound access to the finished namespace for commands that inspect it.
type NamespaceHandle = Arc<OnceLock<Weak<Namespace>>>;

fn upgrade(handle: &NamespaceHandle) -> anyhow::Result<Arc<Namespace>> {
    handle
        .get()
        .and_then(Weak::upgrade)
        .context("namespace is no longer available")
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Build the demo namespace.
///
/// # Errors
///
/// Returns a `BuildError` if a name clashes with `syntax`.
pub fn namespace(syntax: Syntax) -> Result<Arc<Namespace>, BuildError> {
    let handle: NamespaceHandle = Arc::new(OnceLock::new());
    let verbose = Arc::new(AtomicBool::new(false));

    let mut b = NamespaceBuilder::with_syntax(syntax);
    let root = b.root();

    b.command(
        root,
        CommandDef::new("echo", |args, out| {
            out.write_line(args.string("text")?);
            Ok(())
        })
        .describe("Print the text")
        .param(Parameter::string("text").describe("Text to print")),
    )?;

    let math = b.directory(root, "math", "Arithmetic")?;
    b.command(
        math,
        CommandDef::new("add", |args, out| {
            let (a, b) = (args.integer("a")?, args.integer("b")?);
            let sum = a.checked_add(b).context("sum overflows")?;
            out.write_line(&sum.to_string());
            Ok(())
        })
        .describe("Add two integers")
        .param(Parameter::integer("a"))
        .param(Parameter::integer("b")),
    )?;
    b.command(
        math,
        CommandDef::new("div", |args, out| {
            let (a, b) = (args.double("a")?, args.double("b")?);
            if b == 0.0 {
                bail!("division by zero");
            }
            out.write_line(&(a / b).to_string());
            Ok(())
        })
        .describe("Divide a by b")
        .param(Parameter::double("a").describe("Dividend"))
        .param(Parameter::double("b").describe("Divisor")),
    )?;

    let settings = b.directory(root, "settings", "Session settings")?;
    let state = Arc::clone(&verbose);
    let current = Arc::clone(&verbose);
    b.command(
        settings,
        CommandDef::new("verbose", move |args, out| {
            let value = args.boolean("value")?;
            state.store(value, Ordering::SeqCst);
            out.write_line(&format!("verbose: {}", on_off(value)));
            Ok(())
        })
        .describe("Set verbose mode; toggles when no value is given")
        .param(Parameter::toggle("value", move || current.load(Ordering::SeqCst)).short('v')),
    )?;
    let state = Arc::clone(&verbose);
    b.command(
        settings,
        CommandDef::new("show", move |_, out| {
            out.write_line(&format!("verbose: {}", on_off(state.load(Ordering::SeqCst))));
            Ok(())
        })
        .describe("Show the settings"),
    )?;

    let nav = b.directory(root, "nav", "Namespace inspection")?;
    let ns = Arc::clone(&handle);
    b.command(
        nav,
        CommandDef::new("describe", move |args, out| {
            let ns = upgrade(&ns)?;
            let command = ns.command(args.command("target")?);
            out.write_line(&command.usage());
            if !command.description().is_empty() {
                out.write_line(command.description());
            }
            Ok(())
        })
        .describe("Show a command's usage")
        .param(Parameter::command("target").describe("Command path")),
    )?;
    let ns = Arc::clone(&handle);
    b.command(
        nav,
        CommandDef::new("list", move |args, out| {
            let ns = upgrade(&ns)?;
            let dir = args.directory("dir")?;
            out.write_line(&format!("{}:", ns.path_of(Entry::Directory(dir))));
            for line in listing(&ns, dir) {
                out.write_line(&format!("  {line}"));
            }
            Ok(())
        })
        .describe("List a directory")
        .param(Parameter::optional_directory("dir", || ".".to_string()).describe("Directory path")),
    )?;

    let namespace = Arc::new(b.build());
    let _ = handle.set(Arc::downgrade(&namespace));
    Ok(namespace)
}

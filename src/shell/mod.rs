//! shell
//!
//! An interactive session over a namespace.
//!
//! # Responsibilities
//!
//! - Own the working directory and the command history
//! - Route lines to a [`Builtin`] or to the namespace
//! - Merge builtin names into first-token completion
//!
//! The session is single-threaded; hosts that want several sessions over
//! one namespace share it through the `Arc`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use treeshell::core::params::Parameter;
//! use treeshell::core::tree::{CommandDef, NamespaceBuilder};
//! use treeshell::shell::Shell;
//!
//! let mut builder = NamespaceBuilder::new();
//! let math = builder.directory(builder.root(), "math", "").unwrap();
//! builder
//!     .command(
//!         math,
//!         CommandDef::new("add", |args, out| {
//!             let sum = args.integer("a")? + args.integer("b")?;
//!             out.write_line(&sum.to_string());
//!             Ok(())
//!         })
//!         .param(Parameter::integer("a"))
//!         .param(Parameter::integer("b")),
//!     )
//!     .unwrap();
//!
//! let mut shell = Shell::new(Arc::new(builder.build()));
//! let mut out = String::new();
//! shell.run("cd math", &mut out).unwrap();
//! shell.run("add 2 3", &mut out).unwrap();
//! assert_eq!(out, "5\n");
//! assert_eq!(shell.prompt(), "/math> ");
//! ```

pub mod builtins;
pub mod history;

pub use builtins::Builtin;
pub use history::{History, HistoryEntry};

use std::sync::Arc;

use crate::core::complete::{self, complete_arguments, Suggestions};
use crate::core::config::{Config, DEFAULT_HISTORY_LIMIT, DEFAULT_PROMPT};
use crate::core::error::ShellResult;
use crate::core::exec::{execute, OutputSink};
use crate::core::lexer::{tokenize, tokenize_partial};
use crate::core::params::ParseContext;
use crate::core::parser::{bind, parse, ParsedLine};
use crate::core::path::resolve_directory;
use crate::core::tree::{DirId, Entry, Namespace};

/// A shell session.
#[derive(Debug)]
pub struct Shell {
    namespace: Arc<Namespace>,
    cwd: DirId,
    prompt: String,
    history: History,
}

impl Shell {
    /// A session at the root with the default prompt and history size.
    pub fn new(namespace: Arc<Namespace>) -> Self {
        let cwd = namespace.root();
        Self {
            namespace,
            cwd,
            prompt: DEFAULT_PROMPT.to_string(),
            history: History::new(DEFAULT_HISTORY_LIMIT),
        }
    }

    /// A session using the prompt and history size from `config`.
    pub fn with_config(namespace: Arc<Namespace>, config: &Config) -> Self {
        Self {
            prompt: config.prompt().to_string(),
            history: History::new(config.history_limit()),
            ..Self::new(namespace)
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The working directory.
    pub fn cwd(&self) -> DirId {
        self.cwd
    }

    /// Move the working directory to `path`, resolved against the current one.
    ///
    /// # Errors
    ///
    /// As [`resolve_directory`]; the working directory is left unchanged.
    pub fn change_dir(&mut self, path: &str) -> ShellResult<DirId> {
        self.cwd = resolve_directory(&self.namespace, path, self.cwd)?;
        Ok(self.cwd)
    }

    pub fn cwd_path(&self) -> String {
        self.namespace.path_of(Entry::Directory(self.cwd))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The prompt with `{cwd}` replaced by the working directory.
    pub fn prompt(&self) -> String {
        self.prompt.replace("{cwd}", &self.cwd_path())
    }

    /// Parse `line` at the working directory without running it.
    ///
    /// # Errors
    ///
    /// As [`crate::core::parser::parse`].
    pub fn parse(&self, line: &str) -> ShellResult<ParsedLine> {
        parse(&self.namespace, line, self.cwd)
    }

    /// Run one line.
    ///
    /// Blank lines do nothing. Every other line is recorded in the history
    /// before it runs, whether or not it succeeds.
    ///
    /// # Errors
    ///
    /// Any parse failure, or `Execution` if the command fails.
    pub fn run(&mut self, line: &str, out: &mut dyn OutputSink) -> ShellResult<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        self.history.push(line.trim());

        let tokens = tokenize(line, self.namespace.syntax())?;
        if let Some((head, rest)) = tokens.split_first() {
            if let Some(builtin) = Builtin::from_name(&head.text).filter(|_| !head.quoted) {
                log::debug!("builtin {}", builtin.name());
                let namespace = Arc::clone(&self.namespace);
                let ctx = ParseContext::new(&namespace, self.cwd);
                let args = bind(&builtin.params(namespace.syntax()), rest, &ctx)?;
                return builtins::run(self, builtin, &args, out);
            }
        }

        let parsed = self.parse(line)?;
        execute(&self.namespace, parsed.command, &parsed.arguments, out)
    }

    /// Complete a partial line at the working directory.
    ///
    /// # Errors
    ///
    /// As [`crate::core::complete::autocomplete`].
    pub fn autocomplete(&self, line: &str) -> ShellResult<Suggestions> {
        let ns = &*self.namespace;
        let partial = tokenize_partial(line, ns.syntax());
        let ctx = ParseContext::new(ns, self.cwd);
        let trailing = &partial.trailing;

        match partial.complete.split_first() {
            None if !trailing.quoted
                && !trailing.text.contains(ns.syntax().separator)
                && !matches!(trailing.text.as_str(), "." | "..") =>
            {
                let text = trailing.text.as_str();
                let entries = ns
                    .directory(self.cwd)
                    .children()
                    .iter()
                    .map(|&entry| (ns.name_of(entry), entry.as_directory().is_some()));
                let builtins = Builtin::ALL.iter().map(|b| (b.name(), false));
                let matches = entries
                    .chain(builtins)
                    .filter(|(name, _)| name.starts_with(text))
                    .map(|(name, is_dir)| (name.to_string(), is_dir));
                Suggestions::from_matches(text, trailing.start, matches)
            }
            Some((head, rest)) if !head.quoted => match Builtin::from_name(&head.text) {
                Some(builtin) => complete_arguments(&builtin.params(ns.syntax()), rest, trailing, &ctx),
                None => complete::autocomplete(ns, line, self.cwd),
            },
            _ => complete::autocomplete(ns, line, self.cwd),
        }
    }
}

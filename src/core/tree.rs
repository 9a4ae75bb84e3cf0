//! core::tree
//!
//! The command namespace: directories and commands.
//!
//! # Architecture
//!
//! The namespace is an arena. Directories and commands live in two vectors
//! and are addressed by [`DirId`] and [`CommandId`]. A directory owns the
//! ids of its children; every entry keeps a parent id for `..` navigation.
//! There are no reference cycles.
//!
//! # Invariants
//!
//! - Sibling names are unique across directories and commands
//! - Parameter names are unique within a command
//! - The root is `DirId(0)` and is its own parent
//! - The namespace is immutable once [`NamespaceBuilder::build`] returns
//!
//! # Example
//!
//! ```
//! use treeshell::core::params::Parameter;
//! use treeshell::core::tree::{CommandDef, NamespaceBuilder};
//!
//! let mut builder = NamespaceBuilder::new();
//! let lib = builder.directory(builder.root(), "lib", "Build tools").unwrap();
//! builder
//!     .command(
//!         lib,
//!         CommandDef::new("build", |_args, out| {
//!             out.write_line("building");
//!             Ok(())
//!         })
//!         .param(Parameter::string("target")),
//!     )
//!     .unwrap();
//! let namespace = builder.build();
//!
//! assert_eq!(namespace.directory(namespace.root()).children().len(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::args::Arguments;
use super::exec::{Executor, OutputSink};
use super::lexer::Syntax;
use super::params::Parameter;
use super::types::{validate_param_name, EntryKind, EntryName, TypeError};

/// Errors from namespace assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    #[error("'{name}' contains the reserved character '{reserved}'")]
    ReservedCharacter { name: String, reserved: char },

    #[error("'{name}' already exists in '{parent}'")]
    DuplicateEntry { parent: String, name: String },

    #[error("command '{command}' declares parameter '{param}' more than once")]
    DuplicateParameter { command: String, param: String },

    #[error("command '{command}' declares short flag '-{short}' more than once")]
    DuplicateShortFlag { command: String, short: char },
}

/// Handle to a directory in a [`Namespace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirId(usize);

/// Handle to a command in a [`Namespace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

/// A namespace entry: either a directory or a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    Directory(DirId),
    Command(CommandId),
}

impl Entry {
    /// The kind of this entry.
    pub fn kind(self) -> EntryKind {
        match self {
            Entry::Directory(_) => EntryKind::Directory,
            Entry::Command(_) => EntryKind::Command,
        }
    }

    /// The directory id, if this is a directory.
    pub fn as_directory(self) -> Option<DirId> {
        match self {
            Entry::Directory(id) => Some(id),
            Entry::Command(_) => None,
        }
    }

    /// The command id, if this is a command.
    pub fn as_command(self) -> Option<CommandId> {
        match self {
            Entry::Command(id) => Some(id),
            Entry::Directory(_) => None,
        }
    }
}

impl From<DirId> for Entry {
    fn from(id: DirId) -> Self {
        Entry::Directory(id)
    }
}

impl From<CommandId> for Entry {
    fn from(id: CommandId) -> Self {
        Entry::Command(id)
    }
}

/// A directory: a named container of entries.
#[derive(Debug)]
pub struct Directory {
    name: EntryName,
    description: String,
    parent: Option<DirId>,
    /// Children in insertion order.
    children: Vec<Entry>,
    index: HashMap<String, Entry>,
}

impl Directory {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The parent directory; `None` for the root.
    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    /// Look up a child by exact (case-sensitive) name.
    pub fn child(&self, name: &str) -> Option<Entry> {
        self.index.get(name).copied()
    }
}

/// A command: a named executor with an ordered parameter list.
pub struct Command {
    name: EntryName,
    description: String,
    parent: DirId,
    params: Vec<Parameter>,
    executor: Arc<dyn Executor>,
}

impl Command {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The directory containing this command.
    pub fn parent(&self) -> DirId {
        self.parent
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name() == name)
    }

    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// One-line usage, e.g. `build <target> [--release]`.
    pub fn usage(&self) -> String {
        std::iter::once(self.name().to_string())
            .chain(self.params.iter().map(Parameter::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parent", &self.parent)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Definition of a command, handed to [`NamespaceBuilder::command`].
pub struct CommandDef {
    name: String,
    description: String,
    params: Vec<Parameter>,
    executor: Arc<dyn Executor>,
}

impl CommandDef {
    /// Define a command backed by a closure.
    pub fn new<F>(name: impl Into<String>, executor: F) -> Self
    where
        F: Fn(&Arguments, &mut dyn OutputSink) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::with_executor(name, executor)
    }

    /// Define a command backed by any [`Executor`].
    pub fn with_executor(name: impl Into<String>, executor: impl Executor + 'static) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            executor: Arc::new(executor),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a parameter. Order defines positional matching.
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }
}

/// The assembled, read-only command namespace.
#[derive(Debug)]
pub struct Namespace {
    syntax: Syntax,
    dirs: Vec<Directory>,
    commands: Vec<Command>,
}

impl Namespace {
    /// The syntax this namespace was built with.
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    pub fn root(&self) -> DirId {
        DirId(0)
    }

    /// Get a directory.
    ///
    /// Ids are only minted by this namespace's builder, so lookups by a
    /// valid id always succeed.
    pub fn directory(&self, id: DirId) -> &Directory {
        &self.dirs[id.0]
    }

    /// Get a command.
    pub fn command(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    /// The parent of a directory; the root is its own parent.
    pub fn parent_of(&self, id: DirId) -> DirId {
        self.directory(id).parent.unwrap_or(id)
    }

    pub fn name_of(&self, entry: Entry) -> &str {
        match entry {
            Entry::Directory(id) => self.directory(id).name(),
            Entry::Command(id) => self.command(id).name(),
        }
    }

    pub fn description_of(&self, entry: Entry) -> &str {
        match entry {
            Entry::Directory(id) => self.directory(id).description(),
            Entry::Command(id) => self.command(id).description(),
        }
    }

    /// Absolute path of an entry. The root renders as the bare separator.
    pub fn path_of(&self, entry: Entry) -> String {
        let (mut names, mut dir) = match entry {
            Entry::Directory(id) => (Vec::new(), Some(id)),
            Entry::Command(id) => {
                let cmd = self.command(id);
                (vec![cmd.name()], Some(cmd.parent))
            }
        };
        while let Some(id) = dir {
            let d = self.directory(id);
            if d.parent.is_some() {
                names.push(d.name());
            }
            dir = d.parent;
        }
        names.reverse();

        let sep = self.syntax.separator.to_string();
        format!("{sep}{}", names.join(&sep))
    }

    /// Number of directories, including the root.
    pub fn directory_count(&self) -> usize {
        self.dirs.len()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// All commands with their ids.
    pub fn commands(&self) -> impl Iterator<Item = (CommandId, &Command)> {
        self.commands
            .iter()
            .enumerate()
            .map(|(i, c)| (CommandId(i), c))
    }
}

/// Assembles a [`Namespace`].
#[derive(Debug)]
pub struct NamespaceBuilder {
    ns: Namespace,
}

impl Default for NamespaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceBuilder {
    /// Start an empty namespace with the default syntax.
    pub fn new() -> Self {
        Self::with_syntax(Syntax::default())
    }

    /// Start an empty namespace with a custom syntax.
    pub fn with_syntax(syntax: Syntax) -> Self {
        let root = Directory {
            name: EntryName::root(),
            description: String::new(),
            parent: None,
            children: Vec::new(),
            index: HashMap::new(),
        };
        Self {
            ns: Namespace {
                syntax,
                dirs: vec![root],
                commands: Vec::new(),
            },
        }
    }

    pub fn root(&self) -> DirId {
        self.ns.root()
    }

    /// Add a directory under `parent`.
    ///
    /// # Errors
    ///
    /// Invalid or reserved names, and names already used by a sibling.
    pub fn directory(
        &mut self,
        parent: DirId,
        name: &str,
        description: &str,
    ) -> Result<DirId, BuildError> {
        let name = self.check_name(parent, name)?;
        let id = DirId(self.ns.dirs.len());
        self.ns.dirs.push(Directory {
            name: name.clone(),
            description: description.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            index: HashMap::new(),
        });
        self.link(parent, name, Entry::Directory(id));
        Ok(id)
    }

    /// Add a command under `parent`.
    ///
    /// # Errors
    ///
    /// Invalid or reserved names, sibling collisions, and duplicate
    /// parameter names or short flags.
    pub fn command(&mut self, parent: DirId, def: CommandDef) -> Result<CommandId, BuildError> {
        let name = self.check_name(parent, &def.name)?;

        let mut seen = std::collections::HashSet::new();
        let mut shorts = std::collections::HashSet::new();
        for param in &def.params {
            validate_param_name(param.name())?;
            if !seen.insert(param.name()) {
                return Err(BuildError::DuplicateParameter {
                    command: def.name.clone(),
                    param: param.name().to_string(),
                });
            }
            if let Some(short) = param.short_flag() {
                if !shorts.insert(short) {
                    return Err(BuildError::DuplicateShortFlag {
                        command: def.name.clone(),
                        short,
                    });
                }
            }
        }

        let id = CommandId(self.ns.commands.len());
        self.ns.commands.push(Command {
            name: name.clone(),
            description: def.description,
            parent,
            params: def.params,
            executor: def.executor,
        });
        self.link(parent, name, Entry::Command(id));
        Ok(id)
    }

    /// Finish assembly.
    pub fn build(self) -> Namespace {
        log::debug!(
            "namespace built: {} directories, {} commands",
            self.ns.dirs.len(),
            self.ns.commands.len()
        );
        self.ns
    }

    fn check_name(&self, parent: DirId, name: &str) -> Result<EntryName, BuildError> {
        let name = EntryName::new(name)?;
        let syntax = self.ns.syntax;
        for reserved in [syntax.separator, syntax.quote] {
            if name.as_str().contains(reserved) {
                return Err(BuildError::ReservedCharacter {
                    name: name.to_string(),
                    reserved,
                });
            }
        }
        if self.ns.directory(parent).child(name.as_str()).is_some() {
            return Err(BuildError::DuplicateEntry {
                parent: self.ns.path_of(Entry::Directory(parent)),
                name: name.to_string(),
            });
        }
        Ok(name)
    }

    fn link(&mut self, parent: DirId, name: EntryName, entry: Entry) {
        let dir = &mut self.ns.dirs[parent.0];
        dir.children.push(entry);
        dir.index.insert(name.as_str().to_string(), entry);
    }
}

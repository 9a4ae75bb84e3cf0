//! core
//!
//! The command namespace and the algorithms over it.
//!
//! # Modules
//!
//! - [`error`] - `ShellError`, `ErrorKind` and the `ShellResult` protocol
//! - [`types`] - Validated entry names
//! - [`lexer`] - Tokenizer and the configurable `Syntax`
//! - [`tree`] - Directory/command arena and its builder
//! - [`path`] - Path resolution
//! - [`params`] - Typed parameters, values and the parse context
//! - [`args`] - Argument bundle handed to executors
//! - [`parser`] - Command-line parsing
//! - [`complete`] - Autocomplete
//! - [`exec`] - Executors and the invocation boundary
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The namespace is immutable after building; every operation here is a
//!   pure function of the namespace, the working directory and the line
//! - Every failure is a `ShellError`; nothing panics and nothing prints

pub mod args;
pub mod complete;
pub mod config;
pub mod error;
pub mod exec;
pub mod lexer;
pub mod params;
pub mod parser;
pub mod path;
pub mod tree;
pub mod types;

pub use args::{ArgumentError, Arguments};
pub use complete::{autocomplete, Suggestions};
pub use error::{ErrorKind, ShellError, ShellResult};
pub use exec::{execute, Executor, OutputSink};
pub use lexer::Syntax;
pub use params::{ParamKind, Parameter, ParseContext, Value};
pub use parser::{parse, ParsedLine};
pub use path::resolve;
pub use tree::{BuildError, CommandDef, CommandId, DirId, Entry, Namespace, NamespaceBuilder};
pub use types::EntryKind;

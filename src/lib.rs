//! treeshell - an embeddable command-shell engine
//!
//! A host application registers commands in a hierarchical namespace of
//! directories and hands user lines to the engine. The engine resolves
//! paths, parses typed parameters, completes partial lines and invokes the
//! command's executor, reporting every failure through one result type.
//!
//! # Architecture
//!
//! - [`core`] - Namespace, path resolution, parsing, completion, execution
//! - [`shell`] - A session with a working directory, history and builtins
//! - [`ui`] - Console formatting for hosts
//! - [`cli`] - The `tsh` demonstration binary
//!
//! # Guarantees
//!
//! 1. The namespace is immutable once built
//! 2. Parsing and completion never run executors
//! 3. Executor failures, panics included, surface as `ExecutionError`
//! 4. The core never prints and never exits the process

pub mod cli;
pub mod core;
pub mod shell;
pub mod ui;

//! core::path
//!
//! Path resolution over the namespace.
//!
//! # Rules
//!
//! - The empty path is the working directory.
//! - A leading separator starts from the root; other empty components
//!   (`a//b`, trailing `/`) are ignored.
//! - `.` stays, `..` moves to the parent. `..` at the root stays at the root.
//! - Names match case-sensitively.
//! - A command is only valid as the final component.

use super::error::{ShellError, ShellResult};
use super::tree::{CommandId, DirId, Entry, Namespace};
use super::types::EntryKind;

/// Resolve `path` starting from `cwd`.
///
/// # Errors
///
/// - `EntryNotFound` naming the first component with no matching child
/// - `NotADirectory` naming a command that is followed by more components
pub fn resolve(ns: &Namespace, path: &str, cwd: DirId) -> ShellResult<Entry> {
    let sep = ns.syntax().separator;
    let mut current = if path.starts_with(sep) { ns.root() } else { cwd };

    let components: Vec<&str> = path.split(sep).filter(|c| !c.is_empty()).collect();
    for (i, component) in components.iter().enumerate() {
        match *component {
            "." => {}
            ".." => current = ns.parent_of(current),
            name => match ns.directory(current).child(name) {
                Some(Entry::Directory(id)) => current = id,
                Some(Entry::Command(id)) if i + 1 == components.len() => {
                    log::debug!("resolved {path:?} to command {name}");
                    return Ok(Entry::Command(id));
                }
                Some(Entry::Command(_)) => {
                    return Err(ShellError::NotADirectory(name.to_string()));
                }
                None => return Err(ShellError::EntryNotFound(name.to_string())),
            },
        }
    }

    Ok(Entry::Directory(current))
}

/// Resolve a path that must name a directory.
///
/// # Errors
///
/// As [`resolve`], plus `WrongEntryKind` if the path names a command.
pub fn resolve_directory(ns: &Namespace, path: &str, cwd: DirId) -> ShellResult<DirId> {
    match resolve(ns, path, cwd)? {
        Entry::Directory(id) => Ok(id),
        Entry::Command(_) => Err(ShellError::WrongEntryKind {
            path: path.to_string(),
            expected: EntryKind::Directory,
            found: EntryKind::Command,
        }),
    }
}

/// Resolve a path that must name a command.
///
/// # Errors
///
/// As [`resolve`], plus `WrongEntryKind` if the path names a directory.
pub fn resolve_command(ns: &Namespace, path: &str, cwd: DirId) -> ShellResult<CommandId> {
    match resolve(ns, path, cwd)? {
        Entry::Command(id) => Ok(id),
        Entry::Directory(_) => Err(ShellError::WrongEntryKind {
            path: path.to_string(),
            expected: EntryKind::Command,
            found: EntryKind::Directory,
        }),
    }
}

/// Split a path after its last separator: `("lib/sub/", "bu")`.
pub fn split_last(path: &str, separator: char) -> (&str, &str) {
    match path.rfind(separator) {
        Some(i) => path.split_at(i + separator.len_utf8()),
        None => ("", path),
    }
}

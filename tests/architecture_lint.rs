//! Architecture enforcement tests.
//!
//! The engine is embedded in host applications, so everything below the
//! CLI layer reports through return values and output sinks. These tests
//! scan the sources and fail when a module talks to the terminal or ends
//! the process on its own.
//!
//! # Test Categories
//!
//! 1. **Print Detection** - `core` and `shell` must not print
//! 2. **Exit Detection** - only `main.rs` decides the exit status
//! 3. **Layering** - `core` must not depend on the layers above it

use std::fs;
use std::path::{Path, PathBuf};

/// Macros that write straight to stdout or stderr.
const PRINT_MACROS: &[&str] = &["println!", "eprintln!", "print!", "eprint!", "dbg!"];

/// Modules that `core` must never import.
const UPPER_LAYERS: &[&str] = &["crate::shell", "crate::ui", "crate::cli"];

/// Collect every `.rs` file below `dir`.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read source directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// The lines of a file that are not inside its `#[cfg(test)]` module
/// and are not comments.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let content = fs::read_to_string(path).expect("Failed to read source file");
    content
        .lines()
        .take_while(|line| !line.contains("#[cfg(test)]"))
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(n, line)| (n + 1, line.to_string()))
        .collect()
}

fn violations(dir: &str, needles: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
    let mut found = Vec::new();
    for file in rust_files(&root) {
        for (n, line) in production_lines(&file) {
            for needle in needles {
                if line.contains(needle) {
                    found.push(format!("{}:{}: {}", file.display(), n, line.trim()));
                }
            }
        }
    }
    found
}

#[test]
fn core_never_prints() {
    let found = violations("src/core", PRINT_MACROS);
    assert!(
        found.is_empty(),
        "core modules must write through an OutputSink or return errors:\n{}",
        found.join("\n")
    );
}

#[test]
fn shell_never_prints() {
    let found = violations("src/shell", PRINT_MACROS);
    assert!(
        found.is_empty(),
        "shell modules must write through an OutputSink:\n{}",
        found.join("\n")
    );
}

#[test]
fn only_main_exits() {
    for dir in ["src/core", "src/shell", "src/ui", "src/cli"] {
        let found = violations(dir, &["process::exit"]);
        assert!(
            found.is_empty(),
            "only main.rs may choose the exit status:\n{}",
            found.join("\n")
        );
    }
}

#[test]
fn core_does_not_depend_on_upper_layers() {
    let found = violations("src/core", UPPER_LAYERS);
    assert!(
        found.is_empty(),
        "core must stay embeddable without the shell, ui or cli layers:\n{}",
        found.join("\n")
    );
}

#[test]
fn lint_sees_the_sources() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/core");
    let files = rust_files(&root);
    assert!(
        files.iter().any(|f| f.ends_with("parser.rs")),
        "expected to find core/parser.rs, found {:?}",
        files
    );
}

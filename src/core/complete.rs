//! core::complete
//!
//! Autocomplete for partially typed command lines.
//!
//! # Algorithm
//!
//! 1. While the first token is being typed, complete it as a path: resolve
//!    everything up to the last separator, then offer the children of that
//!    directory whose names start with the rest.
//! 2. Once the first token is complete it must name a command. The
//!    preceding argument tokens are run through the same matcher the parser
//!    uses, which decides the parameter the trailing token belongs to, and
//!    that parameter completes it.
//! 3. A trailing `--partial` completes flag names; `--name=partial`
//!    completes the value of `name`.
//!
//! # Ambiguity
//!
//! - No candidates: `NoMatch`.
//! - One candidate: `common_prefix` is the candidate itself.
//! - Several: `common_prefix` is their longest common prefix, which may be
//!   no longer than what was already typed.
//!
//! Completion never touches the namespace or the executors.

use std::collections::BTreeSet;

use serde::Serialize;

use super::error::{ShellError, ShellResult};
use super::lexer::{tokenize_partial, Syntax, Token};
use super::params::{ParamKind, ParseContext, Parameter};
use super::parser::Matcher;
use super::path::{resolve, split_last};
use super::tree::{DirId, Entry, Namespace};
use super::types::EntryKind;

/// Completion candidates for the token under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    /// Every candidate, sorted.
    pub candidates: BTreeSet<String>,
    /// Longest prefix shared by all candidates.
    pub common_prefix: String,
    /// Byte offset in the line where the completed segment begins.
    pub start: usize,
    /// The single candidate is a directory.
    pub directory: bool,
}

impl Suggestions {
    /// Build suggestions from `(candidate, is_directory)` pairs.
    ///
    /// # Errors
    ///
    /// `NoMatch` naming `typed` if there are no candidates.
    pub(crate) fn from_matches(
        typed: &str,
        start: usize,
        matches: impl IntoIterator<Item = (String, bool)>,
    ) -> ShellResult<Self> {
        let mut candidates = BTreeSet::new();
        let mut directory = false;
        for (candidate, is_directory) in matches {
            directory = is_directory;
            candidates.insert(candidate);
        }

        match candidates.len() {
            0 => Err(ShellError::NoMatch(typed.to_string())),
            1 => Ok(Self {
                common_prefix: candidates.iter().next().cloned().unwrap_or_default(),
                candidates,
                start,
                directory,
            }),
            _ => Ok(Self {
                common_prefix: longest_common_prefix(candidates.iter().map(String::as_str)),
                candidates,
                start,
                directory: false,
            }),
        }
    }

    /// Whether exactly one candidate matched.
    pub fn is_unique(&self) -> bool {
        self.candidates.len() == 1
    }

    pub(crate) fn shifted(mut self, offset: usize) -> Self {
        self.start += offset;
        self
    }

    /// Union of two suggestion sets completing the same segment.
    pub(crate) fn merged(self, other: Self) -> Self {
        let directory = self.directory || other.directory;
        let mut candidates = self.candidates;
        candidates.extend(other.candidates);
        let common_prefix = longest_common_prefix(candidates.iter().map(String::as_str));
        Self {
            directory: directory && candidates.len() == 1,
            candidates,
            common_prefix,
            start: self.start,
        }
    }

    /// Splice the completion into `line`, replacing everything from `start`.
    ///
    /// A unique directory gets a trailing separator.
    pub fn apply(&self, line: &str, syntax: &Syntax) -> String {
        let kept = line.get(..self.start).unwrap_or(line);
        let mut completed = format!("{kept}{}", self.common_prefix);
        if self.is_unique() && self.directory {
            completed.push(syntax.separator);
        }
        completed
    }
}

/// Longest common prefix of `words`, on character boundaries.
pub fn longest_common_prefix<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    let mut words = words.into_iter();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut len = first.len();
    for word in words {
        len = first[..len]
            .char_indices()
            .zip(word.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0);
    }
    first[..len].to_string()
}

/// Which entries a path completion may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFilter {
    /// Directories and commands.
    Any,
    /// Directories only.
    Directories,
}

impl PathFilter {
    fn accepts(self, entry: Entry) -> bool {
        match self {
            PathFilter::Any => true,
            PathFilter::Directories => entry.kind() == EntryKind::Directory,
        }
    }
}

/// Complete a partial path relative to the context's working directory.
///
/// `start` in the result is relative to `partial`.
///
/// # Errors
///
/// Resolver failures for the part before the last separator, and `NoMatch`.
pub fn complete_path(
    ctx: &ParseContext<'_>,
    partial: &str,
    filter: PathFilter,
) -> ShellResult<Suggestions> {
    let ns = ctx.namespace();
    let sep = ns.syntax().separator;
    let (head, tail) = split_last(partial, sep);

    let dir = match resolve(ns, head, ctx.cwd())? {
        Entry::Directory(id) => id,
        Entry::Command(_) => {
            let name = split_last(head.trim_end_matches(sep), sep).1;
            return Err(ShellError::NotADirectory(name.to_string()));
        }
    };

    let relative = [".", ".."]
        .into_iter()
        .filter(|dots| *dots == tail)
        .map(|dots| (dots, true));
    let matches = ns
        .directory(dir)
        .children()
        .iter()
        .copied()
        .filter(|entry| filter.accepts(*entry))
        .map(|entry| (ns.name_of(entry), entry.kind() == EntryKind::Directory))
        .chain(relative)
        .filter(|(name, _)| name.starts_with(tail))
        .map(|(name, is_dir)| (name.to_string(), is_dir));

    Suggestions::from_matches(partial, head.len(), matches)
}

/// Complete the trailing token of an argument list.
///
/// `tokens` are the complete argument tokens preceding `trailing`.
///
/// # Errors
///
/// Matching failures in `tokens`, and `NoMatch` when the trailing token
/// belongs to no parameter or its parameter has nothing to offer.
pub fn complete_arguments(
    params: &[Parameter],
    tokens: &[Token],
    trailing: &Token,
    ctx: &ParseContext<'_>,
) -> ShellResult<Suggestions> {
    let mut matcher = Matcher::new(params);
    for token in tokens {
        matcher.feed(token)?;
    }

    let text = trailing.text.as_str();
    let flag_like = !trailing.quoted && !matcher.options_done() && text.starts_with('-');

    if let Some(index) = matcher.pending() {
        let param = &params[index];
        if param.kind() != ParamKind::Boolean {
            return param
                .autocomplete(text, ctx)
                .map(|s| s.shifted(trailing.start));
        }
        if !flag_like {
            // A pending Boolean flag only takes `true`/`false`; anything
            // else is the next positional value.
            let value = param.autocomplete(text, ctx);
            let positional = matcher
                .next_positional()
                .map(|i| params[i].autocomplete(text, ctx));
            let suggestions = match (value, positional) {
                (Ok(value), Some(Ok(positional))) => Ok(value.merged(positional)),
                (Ok(value), _) => Ok(value),
                (Err(_), Some(positional)) => positional,
                (Err(e), None) => Err(e),
            };
            return suggestions.map(|s| s.shifted(trailing.start));
        }
    }

    if flag_like {
        if let Some(long) = text.strip_prefix("--") {
            if let Some((name, value)) = long.split_once('=') {
                let index = params
                    .iter()
                    .position(|p| p.name() == name)
                    .ok_or_else(|| ShellError::UnexpectedArgument(format!("--{name}")))?;
                return params[index]
                    .autocomplete(value, ctx)
                    .map(|s| s.shifted(trailing.start + name.len() + 3));
            }
            return complete_flags(&matcher, text, trailing.start);
        }
    }

    match matcher.next_positional() {
        Some(index) => params[index]
            .autocomplete(text, ctx)
            .map(|s| s.shifted(trailing.start)),
        None => Err(ShellError::NoMatch(text.to_string())),
    }
}

fn complete_flags(matcher: &Matcher<'_>, typed: &str, start: usize) -> ShellResult<Suggestions> {
    let matches = matcher
        .params()
        .iter()
        .enumerate()
        .filter(|(i, _)| !matcher.is_named(*i) && matcher.pending() != Some(*i))
        .map(|(_, p)| format!("--{}", p.name()))
        .filter(|flag| flag.starts_with(typed))
        .map(|flag| (flag, false));

    Suggestions::from_matches(typed, start, matches)
}

/// Complete a partial command line at `cwd`.
///
/// # Errors
///
/// - `NoMatch` when nothing fits
/// - `NotACommand` when arguments follow a directory path
/// - resolver and matching failures from the complete tokens
pub fn autocomplete(ns: &Namespace, line: &str, cwd: DirId) -> ShellResult<Suggestions> {
    let partial = tokenize_partial(line, ns.syntax());
    let ctx = ParseContext::new(ns, cwd);
    let trailing = &partial.trailing;

    let Some((head, rest)) = partial.complete.split_first() else {
        log::debug!("completing path {:?}", trailing.text);
        return complete_path(&ctx, &trailing.text, PathFilter::Any)
            .map(|s| s.shifted(trailing.start));
    };

    let command = match resolve(ns, &head.text, cwd)? {
        Entry::Command(id) => id,
        Entry::Directory(id) => {
            return Err(ShellError::NotACommand(ns.path_of(Entry::Directory(id))));
        }
    };
    log::debug!(
        "completing argument {:?} of {}",
        trailing.text,
        ns.path_of(Entry::Command(command))
    );
    complete_arguments(ns.command(command).params(), rest, trailing, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::parser::parse;
    use crate::core::tree::{CommandDef, NamespaceBuilder};

    fn namespace() -> Namespace {
        let mut b = NamespaceBuilder::new();
        let root = b.root();
        let lib = b.directory(root, "lib", "").unwrap();
        b.directory(root, "list", "").unwrap();
        b.command(lib, CommandDef::new("build", |_, _| Ok(())))
            .unwrap();
        b.command(lib, CommandDef::new("bundle", |_, _| Ok(())))
            .unwrap();
        b.command(
            root,
            CommandDef::new("run", |_, _| Ok(()))
                .param(Parameter::command("target"))
                .param(Parameter::optional_boolean("verbose", || false))
                .param(Parameter::optional_directory("in", || ".".into()))
                .param(Parameter::optional_integer("jobs", || 1)),
        )
        .unwrap();
        b.build()
    }

    fn complete(ns: &Namespace, line: &str) -> ShellResult<Suggestions> {
        autocomplete(ns, line, ns.root())
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ambiguous_prefix() {
        let ns = namespace();
        let s = complete(&ns, "li").unwrap();
        assert_eq!(s.candidates, set(&["lib", "list"]));
        assert_eq!(s.common_prefix, "li");
        assert!(!s.is_unique());
    }

    #[test]
    fn unique_directory() {
        let ns = namespace();
        let s = complete(&ns, "lib").unwrap();
        assert_eq!(s.candidates, set(&["lib"]));
        assert_eq!(s.common_prefix, "lib");
        assert!(s.directory);
        assert_eq!(s.apply("lib", ns.syntax()), "lib/");
    }

    #[test]
    fn empty_line_lists_working_directory() {
        let ns = namespace();
        let s = complete(&ns, "").unwrap();
        assert_eq!(s.candidates, set(&["lib", "list", "run"]));
        assert_eq!(s.common_prefix, "");
    }

    #[test]
    fn descends_into_directories() {
        let ns = namespace();
        let s = complete(&ns, "lib/b").unwrap();
        assert_eq!(s.candidates, set(&["build", "bundle"]));
        assert_eq!(s.common_prefix, "bu");
        assert_eq!(s.start, 4);
        assert_eq!(s.apply("lib/b", ns.syntax()), "lib/bu");

        let s = complete(&ns, "/lib/bui").unwrap();
        assert_eq!(s.common_prefix, "build");
        assert!(!s.directory);
        assert_eq!(s.apply("/lib/bui", ns.syntax()), "/lib/build");
    }

    #[test]
    fn no_match_fails() {
        let ns = namespace();
        assert_eq!(complete(&ns, "zz").unwrap_err(), ShellError::NoMatch("zz".into()));
        assert_eq!(
            complete(&ns, "nope/x").unwrap_err(),
            ShellError::EntryNotFound("nope".into())
        );
        assert_eq!(
            complete(&ns, "run/x").unwrap_err(),
            ShellError::NotADirectory("run".into())
        );
    }

    #[test]
    fn argument_delegates_to_parameter() {
        let ns = namespace();
        let s = complete(&ns, "run lib/bu").unwrap();
        assert_eq!(s.candidates, set(&["build", "bundle"]));
        assert_eq!(s.start, 8);

        let s = complete(&ns, "run lib/build ").unwrap();
        assert_eq!(s.candidates, set(&["false", "true"]));
    }

    #[test]
    fn argument_after_directory_fails() {
        let ns = namespace();
        assert_eq!(complete(&ns, "lib ").unwrap_err().kind(), ErrorKind::NotACommand);
    }

    #[test]
    fn flag_names() {
        let ns = namespace();
        let s = complete(&ns, "run --").unwrap();
        assert_eq!(s.candidates, set(&["--in", "--jobs", "--target", "--verbose"]));

        let s = complete(&ns, "run --verbose --j").unwrap();
        assert_eq!(s.common_prefix, "--jobs");
        assert_eq!(s.start, 14);

        let s = complete(&ns, "run --jobs 2 --").unwrap();
        assert!(!s.candidates.contains("--jobs"));
    }

    #[test]
    fn flag_values() {
        let ns = namespace();
        let s = complete(&ns, "run --in l").unwrap();
        assert_eq!(s.candidates, set(&["lib", "list"]));

        let s = complete(&ns, "run --in=li").unwrap();
        assert_eq!(s.common_prefix, "li");
        assert_eq!(s.start, 9);

        let s = complete(&ns, "run --verbose t").unwrap();
        assert_eq!(s.common_prefix, "true");
    }

    #[test]
    fn pending_boolean_flag_yields_to_positional() {
        let ns = namespace();
        let s = complete(&ns, "run --verbose lib/bu").unwrap();
        assert_eq!(s.candidates, set(&["build", "bundle"]));
        assert_eq!(s.start, 18);
        assert_eq!(s.apply("run --verbose lib/bu", ns.syntax()), "run --verbose lib/bu");
        assert!(parse(&ns, "run --verbose lib/build", ns.root()).is_ok());

        let s = complete(&ns, "run --verbose ").unwrap();
        assert_eq!(s.candidates, set(&["false", "lib", "list", "run", "true"]));
        assert_eq!(s.common_prefix, "");

        let s = complete(&ns, "run --verbose F").unwrap();
        assert_eq!(s.common_prefix, "false");
    }

    #[test]
    fn relative_components_complete_as_directories() {
        let ns = namespace();
        let s = complete(&ns, "..").unwrap();
        assert_eq!(s.candidates, set(&[".."]));
        assert!(s.directory);
        assert_eq!(s.apply("..", ns.syntax()), "../");

        let s = complete(&ns, "lib/.").unwrap();
        assert_eq!(s.apply("lib/.", ns.syntax()), "lib/./");

        let s = complete(&ns, "run --in ..").unwrap();
        assert_eq!(s.apply("run --in ..", ns.syntax()), "run --in ../");
    }

    #[test]
    fn scalar_parameter_has_no_candidates() {
        let ns = namespace();
        let err = complete(&ns, "run lib/build true lib 4").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatch);
    }

    #[test]
    fn exhausted_parameters() {
        let ns = namespace();
        let err = complete(&ns, "run lib/build true lib 4 ").unwrap_err();
        assert_eq!(err, ShellError::NoMatch(String::new()));
    }

    #[test]
    fn common_prefix_helper() {
        assert_eq!(longest_common_prefix(["lib", "list"]), "li");
        assert_eq!(longest_common_prefix(["abc"]), "abc");
        assert_eq!(longest_common_prefix(["abc", "xyz"]), "");
        assert_eq!(longest_common_prefix(["äöx", "äöy"]), "äö");
        assert_eq!(longest_common_prefix(Vec::<&str>::new()), "");
    }
}

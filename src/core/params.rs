//! core::params
//!
//! Typed command parameters.
//!
//! # Kinds
//!
//! | Kind          | Accepts                              | Completes            |
//! |---------------|--------------------------------------|----------------------|
//! | String        | any token                            | nothing              |
//! | Integer       | a whole token parsing as `i64`       | nothing              |
//! | Double        | a whole token parsing as finite `f64`| nothing              |
//! | Boolean       | `true` / `false` (any case)          | `false`, `true`      |
//! | DirectoryRef  | a path resolving to a directory      | directory paths      |
//! | CommandRef    | a path resolving to a command        | command paths        |
//!
//! # Defaults
//!
//! Optional parameters carry a supplier that is called at parse time, every
//! time the parameter is omitted. Suppliers may read external state, so a
//! toggle's default can be the negation of the current value.
//! Directory and command references take a default *path*, resolved against
//! the parse context like a typed token.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::complete::{complete_path, PathFilter, Suggestions};
use super::error::{ShellError, ShellResult};
use super::path::{resolve_command, resolve_directory};
use super::tree::{CommandId, DirId, Entry, Namespace};

/// Vocabulary accepted and offered by Boolean parameters.
pub const BOOLEAN_WORDS: [&str; 2] = ["false", "true"];

/// Per-invocation context for parsing and completing values.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    namespace: &'a Namespace,
    cwd: DirId,
}

impl<'a> ParseContext<'a> {
    pub fn new(namespace: &'a Namespace, cwd: DirId) -> Self {
        Self { namespace, cwd }
    }

    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    /// The working directory.
    pub fn cwd(&self) -> DirId {
        self.cwd
    }

    pub fn root(&self) -> DirId {
        self.namespace.root()
    }
}

/// A parsed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Directory(DirId),
    Command(CommandId),
}

impl Value {
    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::Boolean(_) => "boolean",
            Value::Directory(_) => "directory",
            Value::Command(_) => "command",
        }
    }

    /// Render the value for display, showing references as paths.
    pub fn render(&self, namespace: &Namespace) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Double(d) => d.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Directory(id) => namespace.path_of(Entry::Directory(*id)),
            Value::Command(id) => namespace.path_of(Entry::Command(*id)),
        }
    }
}

/// The type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Double,
    Boolean,
    #[serde(rename = "directory")]
    DirectoryRef,
    #[serde(rename = "command")]
    CommandRef,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Double => "double",
            ParamKind::Boolean => "boolean",
            ParamKind::DirectoryRef => "directory",
            ParamKind::CommandRef => "command",
        };
        f.write_str(label)
    }
}

type ValueSupplier = Arc<dyn Fn() -> Value + Send + Sync>;
type PathSupplier = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
enum Fallback {
    Required,
    Value(ValueSupplier),
    Path(PathSupplier),
}

/// A named, typed command parameter.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    description: String,
    short: Option<char>,
    kind: ParamKind,
    fallback: Fallback,
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("short", &self.short)
            .field("required", &self.is_required())
            .finish()
    }
}

impl Parameter {
    fn new(name: impl Into<String>, kind: ParamKind, fallback: Fallback) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            short: None,
            kind,
            fallback,
        }
    }

    fn with_value<T, F>(
        name: impl Into<String>,
        kind: ParamKind,
        supplier: F,
        wrap: fn(T) -> Value,
    ) -> Self
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(
            name,
            kind,
            Fallback::Value(Arc::new(move || wrap(supplier()))),
        )
    }

    // =========================================================================
    // Required parameters
    // =========================================================================

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String, Fallback::Required)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Integer, Fallback::Required)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Double, Fallback::Required)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Boolean, Fallback::Required)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::DirectoryRef, Fallback::Required)
    }

    pub fn command(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::CommandRef, Fallback::Required)
    }

    // =========================================================================
    // Optional parameters
    // =========================================================================

    pub fn optional_string<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::with_value(name, ParamKind::String, default, Value::String)
    }

    pub fn optional_integer<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        Self::with_value(name, ParamKind::Integer, default, Value::Integer)
    }

    pub fn optional_double<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Self::with_value(name, ParamKind::Double, default, Value::Double)
    }

    pub fn optional_boolean<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::with_value(name, ParamKind::Boolean, default, Value::Boolean)
    }

    /// An optional Boolean whose default is the negation of `current()`,
    /// read at parse time.
    ///
    /// ```
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    /// use treeshell::core::params::Parameter;
    ///
    /// let enabled = Arc::new(AtomicBool::new(false));
    /// let state = Arc::clone(&enabled);
    /// let param = Parameter::toggle("value", move || state.load(Ordering::SeqCst));
    /// assert!(!param.is_required());
    /// ```
    pub fn toggle<F>(name: impl Into<String>, current: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::optional_boolean(name, move || !current())
    }

    /// An optional directory reference defaulting to the path `default()`.
    pub fn optional_directory<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::new(name, ParamKind::DirectoryRef, Fallback::Path(Arc::new(default)))
    }

    /// An optional command reference defaulting to the path `default()`.
    pub fn optional_command<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::new(name, ParamKind::CommandRef, Fallback::Path(Arc::new(default)))
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a single-character flag alias (`-x`).
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn short_flag(&self) -> Option<char> {
        self.short
    }

    pub fn is_required(&self) -> bool {
        matches!(self.fallback, Fallback::Required)
    }

    /// Usage fragment: `<name>`, `[name]`, or `[--name]` for optional booleans.
    pub fn usage(&self) -> String {
        match (self.is_required(), self.kind) {
            (true, _) => format!("<{}>", self.name),
            (false, ParamKind::Boolean) => format!("[--{}]", self.name),
            (false, _) => format!("[{}]", self.name),
        }
    }

    // =========================================================================
    // Parsing and completion
    // =========================================================================

    /// Parse a raw (unquoted) token.
    ///
    /// # Errors
    ///
    /// `InvalidParamValue` naming this parameter.
    pub fn parse(&self, raw: &str, ctx: &ParseContext<'_>) -> ShellResult<Value> {
        match self.kind {
            ParamKind::String => Ok(Value::String(raw.to_string())),
            ParamKind::Integer => raw.parse::<i64>().map(Value::Integer).map_err(|e| {
                ShellError::invalid_value(&self.name, format!("'{raw}' is not an integer ({e})"))
            }),
            ParamKind::Double => {
                let value = raw.parse::<f64>().map_err(|e| {
                    ShellError::invalid_value(&self.name, format!("'{raw}' is not a number ({e})"))
                })?;
                if !value.is_finite() {
                    return Err(ShellError::invalid_value(
                        &self.name,
                        format!("'{raw}' is not a finite number"),
                    ));
                }
                Ok(Value::Double(value))
            }
            ParamKind::Boolean => parse_bool(raw).map(Value::Boolean).ok_or_else(|| {
                ShellError::invalid_value(&self.name, format!("'{raw}' is not true or false"))
            }),
            ParamKind::DirectoryRef => resolve_directory(ctx.namespace, raw, ctx.cwd)
                .map(Value::Directory)
                .map_err(|e| ShellError::invalid_value(&self.name, e.to_string())),
            ParamKind::CommandRef => resolve_command(ctx.namespace, raw, ctx.cwd)
                .map(Value::Command)
                .map_err(|e| ShellError::invalid_value(&self.name, e.to_string())),
        }
    }

    /// Produce the value used when the parameter is omitted.
    ///
    /// # Errors
    ///
    /// `MissingRequiredParam` for required parameters; `InvalidParamValue`
    /// when a default path no longer resolves.
    pub fn default_value(&self, ctx: &ParseContext<'_>) -> ShellResult<Value> {
        match &self.fallback {
            Fallback::Required => Err(ShellError::MissingRequiredParam(self.name.clone())),
            Fallback::Value(supplier) => Ok(supplier()),
            Fallback::Path(supplier) => self.parse(&supplier(), ctx),
        }
    }

    /// Suggest completions for a partially typed value.
    ///
    /// The returned `start` is relative to `partial`.
    ///
    /// # Errors
    ///
    /// `NoMatch` when nothing fits, including for kinds that cannot be
    /// completed (string, integer, double).
    pub fn autocomplete(&self, partial: &str, ctx: &ParseContext<'_>) -> ShellResult<Suggestions> {
        match self.kind {
            ParamKind::String | ParamKind::Integer | ParamKind::Double => {
                Err(ShellError::NoMatch(partial.to_string()))
            }
            ParamKind::Boolean => {
                let lowered = partial.to_ascii_lowercase();
                Suggestions::from_matches(
                    partial,
                    0,
                    BOOLEAN_WORDS
                        .iter()
                        .filter(|w| w.starts_with(&lowered))
                        .map(|w| (w.to_string(), false)),
                )
            }
            ParamKind::DirectoryRef => complete_path(ctx, partial, PathFilter::Directories),
            ParamKind::CommandRef => complete_path(ctx, partial, PathFilter::Any),
        }
    }
}

/// Parse the Boolean vocabulary, ignoring case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::tree::{CommandDef, NamespaceBuilder};
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

    fn namespace() -> (Namespace, DirId, CommandId) {
        let mut b = NamespaceBuilder::new();
        let root = b.root();
        let lib = b.directory(root, "lib", "").unwrap();
        let build = b
            .command(lib, CommandDef::new("build", |_, _| Ok(())))
            .unwrap();
        (b.build(), lib, build)
    }

    #[test]
    fn integer_rejects_trailing_garbage() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let p = Parameter::integer("n");

        assert_eq!(p.parse("4567", &ctx).unwrap(), Value::Integer(4567));
        assert_eq!(p.parse("-12", &ctx).unwrap(), Value::Integer(-12));
        for bad in ["4567a", "100a11", "", "1.5", "99999999999999999999"] {
            let err = p.parse(bad, &ctx).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParamValue, "{bad:?}");
        }
    }

    #[test]
    fn double_parses_whole_token() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let p = Parameter::double("x");

        assert_eq!(p.parse("2.5", &ctx).unwrap(), Value::Double(2.5));
        assert_eq!(p.parse("1e3", &ctx).unwrap(), Value::Double(1000.0));
        for bad in ["2.5x", "inf", "NaN", "abc"] {
            assert!(p.parse(bad, &ctx).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn boolean_vocabulary() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let p = Parameter::boolean("b");

        assert_eq!(p.parse("true", &ctx).unwrap(), Value::Boolean(true));
        assert_eq!(p.parse("FALSE", &ctx).unwrap(), Value::Boolean(false));
        assert!(p.parse("yes", &ctx).is_err());
    }

    #[test]
    fn references_resolve_against_context() {
        let (ns, lib, build) = namespace();
        let root_ctx = ParseContext::new(&ns, ns.root());
        let lib_ctx = ParseContext::new(&ns, lib);

        let dir = Parameter::directory("d");
        assert_eq!(dir.parse("lib", &root_ctx).unwrap(), Value::Directory(lib));
        assert_eq!(dir.parse("..", &lib_ctx).unwrap(), Value::Directory(ns.root()));
        let err = dir.parse("lib/build", &root_ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParamValue);

        let cmd = Parameter::command("c");
        assert_eq!(cmd.parse("build", &lib_ctx).unwrap(), Value::Command(build));
        assert_eq!(cmd.parse("/lib/build", &lib_ctx).unwrap(), Value::Command(build));
        assert!(cmd.parse("lib", &root_ctx).is_err());
        assert!(cmd.parse("nope", &root_ctx).is_err());
    }

    #[test]
    fn defaults_are_evaluated_lazily() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let counter = Arc::new(AtomicI64::new(1));
        let source = Arc::clone(&counter);
        let p = Parameter::optional_integer("n", move || source.load(Ordering::SeqCst));

        assert_eq!(p.default_value(&ctx).unwrap(), Value::Integer(1));
        counter.store(7, Ordering::SeqCst);
        assert_eq!(p.default_value(&ctx).unwrap(), Value::Integer(7));
    }

    #[test]
    fn toggle_defaults_to_negation() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let flag = Arc::new(AtomicBool::new(false));
        let state = Arc::clone(&flag);
        let p = Parameter::toggle("value", move || state.load(Ordering::SeqCst));

        assert_eq!(p.default_value(&ctx).unwrap(), Value::Boolean(true));
        flag.store(true, Ordering::SeqCst);
        assert_eq!(p.default_value(&ctx).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn required_has_no_default() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let err = Parameter::string("text").default_value(&ctx).unwrap_err();
        assert_eq!(err, ShellError::MissingRequiredParam("text".into()));
    }

    #[test]
    fn path_default_resolves_at_parse_time() {
        let (ns, lib, _) = namespace();
        let p = Parameter::optional_directory("dir", || ".".into());

        let ctx = ParseContext::new(&ns, lib);
        assert_eq!(p.default_value(&ctx).unwrap(), Value::Directory(lib));
        let ctx = ParseContext::new(&ns, ns.root());
        assert_eq!(p.default_value(&ctx).unwrap(), Value::Directory(ns.root()));
    }

    #[test]
    fn scalar_kinds_do_not_complete() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        for p in [
            Parameter::string("s"),
            Parameter::integer("i"),
            Parameter::double("d"),
        ] {
            let err = p.autocomplete("1", &ctx).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NoMatch);
        }
    }

    #[test]
    fn boolean_completes_vocabulary() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());
        let p = Parameter::boolean("b");

        let all = p.autocomplete("", &ctx).unwrap();
        assert_eq!(all.candidates.len(), 2);
        assert_eq!(all.common_prefix, "");

        let t = p.autocomplete("t", &ctx).unwrap();
        assert_eq!(t.common_prefix, "true");
        assert_eq!(p.autocomplete("FA", &ctx).unwrap().common_prefix, "false");
        assert!(p.autocomplete("x", &ctx).is_err());
    }

    #[test]
    fn directory_ref_completes_only_directories() {
        let (ns, _, _) = namespace();
        let ctx = ParseContext::new(&ns, ns.root());

        let dirs = Parameter::directory("d").autocomplete("lib/", &ctx);
        assert_eq!(dirs.unwrap_err().kind(), ErrorKind::NoMatch);

        let cmds = Parameter::command("c").autocomplete("lib/", &ctx).unwrap();
        assert_eq!(cmds.common_prefix, "build");
        assert_eq!(cmds.start, 4);
    }

    #[test]
    fn value_rendering() {
        let (ns, lib, build) = namespace();
        assert_eq!(Value::Directory(lib).render(&ns), "/lib");
        assert_eq!(Value::Command(build).render(&ns), "/lib/build");
        assert_eq!(Value::Integer(3).render(&ns), "3");
        assert_eq!(Value::Boolean(true).type_name(), "boolean");
    }
}

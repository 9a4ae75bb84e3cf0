//! core::parser
//!
//! Command-line parsing.
//!
//! # Line syntax
//!
//! ```text
//! <path> [args...]
//! ```
//!
//! The first token is a path to a command. The remaining tokens are matched
//! against the command's parameters:
//!
//! 1. Flags first: `--name value`, `--name=value`, `-x value`, `-x=value`.
//!    A Boolean flag without a `true`/`false` value means `true`. `--` ends
//!    flag processing; quoted tokens are never flags.
//! 2. Leftover tokens fill the remaining parameters positionally, in
//!    declaration order.
//! 3. Unfilled optional parameters take their default; unfilled required
//!    parameters fail.
//!
//! The matcher implementing steps 1 and 2 is shared with autocomplete,
//! so both agree on which parameter a token belongs to.

use super::args::Arguments;
use super::error::{ShellError, ShellResult};
use super::lexer::{tokenize, Token};
use super::params::{parse_bool, ParamKind, ParseContext, Parameter};
use super::path::resolve;
use super::tree::{CommandId, DirId, Entry, Namespace};

/// A successfully parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub command: CommandId,
    pub arguments: Arguments,
}

/// What a token looks like relative to a parameter list.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flag<'t> {
    /// `--`
    EndOfOptions,
    /// A flag naming parameter `index`, with an optional `=value`.
    Named {
        index: usize,
        inline: Option<&'t str>,
    },
    /// `--name` where no parameter is called `name`.
    Unknown,
    /// Not a flag; a positional value.
    Positional,
}

/// Classify a token's text against `params`.
///
/// Single-dash tokens that do not name a short flag (`-5`, `-abc`) are
/// positional, so negative numbers need no escaping.
pub(crate) fn classify<'t>(text: &'t str, params: &[Parameter]) -> Flag<'t> {
    if text == "--" {
        return Flag::EndOfOptions;
    }
    if let Some(long) = text.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (long, None),
        };
        return match params.iter().position(|p| p.name() == name) {
            Some(index) => Flag::Named { index, inline },
            None => Flag::Unknown,
        };
    }
    if let Some(short) = text.strip_prefix('-') {
        let (flag, inline) = match short.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (short, None),
        };
        let mut chars = flag.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(index) = params.iter().position(|p| p.short_flag() == Some(c)) {
                return Flag::Named { index, inline };
            }
        }
    }
    Flag::Positional
}

/// Assigns tokens to parameters.
#[derive(Debug)]
pub(crate) struct Matcher<'p> {
    params: &'p [Parameter],
    /// Raw values assigned by flags, by parameter index.
    named: Vec<Option<String>>,
    positional: Vec<String>,
    options_done: bool,
    /// A flag seen without a value yet.
    pending: Option<usize>,
}

impl<'p> Matcher<'p> {
    pub(crate) fn new(params: &'p [Parameter]) -> Self {
        Self {
            params,
            named: vec![None; params.len()],
            positional: Vec::new(),
            options_done: false,
            pending: None,
        }
    }

    pub(crate) fn params(&self) -> &'p [Parameter] {
        self.params
    }

    pub(crate) fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub(crate) fn options_done(&self) -> bool {
        self.options_done
    }

    /// Whether a flag has already assigned parameter `index`.
    pub(crate) fn is_named(&self, index: usize) -> bool {
        self.named[index].is_some()
    }

    /// Feed the next complete token.
    pub(crate) fn feed(&mut self, token: &Token) -> ShellResult<()> {
        if let Some(index) = self.pending.take() {
            let boolean = self.params[index].kind() == ParamKind::Boolean;
            if !boolean || parse_bool(&token.text).is_some() {
                return self.assign(index, token.text.clone());
            }
            self.assign(index, "true".to_string())?;
        }

        if self.options_done || token.quoted {
            self.positional.push(token.text.clone());
            return Ok(());
        }

        match classify(&token.text, self.params) {
            Flag::EndOfOptions => self.options_done = true,
            Flag::Named {
                index,
                inline: Some(value),
            } => self.assign(index, value.to_string())?,
            Flag::Named {
                index,
                inline: None,
            } => {
                if self.named[index].is_some() {
                    return Err(self.repeated(index));
                }
                self.pending = Some(index);
            }
            Flag::Unknown => return Err(ShellError::UnexpectedArgument(token.text.clone())),
            Flag::Positional => self.positional.push(token.text.clone()),
        }
        Ok(())
    }

    /// Indices of parameters not assigned by a flag, in declaration order.
    pub(crate) fn free(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.params.len()).filter(move |i| self.named[*i].is_none() && self.pending != Some(*i))
    }

    /// The parameter the next positional token would fill.
    pub(crate) fn next_positional(&self) -> Option<usize> {
        self.free().nth(self.positional.len())
    }

    /// Close the line and return the raw value for every parameter.
    pub(crate) fn finish(mut self) -> ShellResult<Vec<Option<String>>> {
        if let Some(index) = self.pending.take() {
            if self.params[index].kind() != ParamKind::Boolean {
                return Err(ShellError::invalid_value(
                    self.params[index].name(),
                    "expected a value",
                ));
            }
            self.assign(index, "true".to_string())?;
        }

        let free: Vec<usize> = self.free().collect();
        let mut slots = self.named;
        let mut positional = self.positional.into_iter();
        for index in free {
            match positional.next() {
                Some(value) => slots[index] = Some(value),
                None => break,
            }
        }
        if let Some(extra) = positional.next() {
            return Err(ShellError::UnexpectedArgument(extra));
        }
        Ok(slots)
    }

    fn assign(&mut self, index: usize, value: String) -> ShellResult<()> {
        if self.named[index].is_some() {
            return Err(self.repeated(index));
        }
        self.named[index] = Some(value);
        Ok(())
    }

    fn repeated(&self, index: usize) -> ShellError {
        ShellError::invalid_value(self.params[index].name(), "given more than once")
    }
}

/// Match `tokens` against `params` and build the argument bundle.
///
/// Values are parsed in declaration order; omitted optional parameters are
/// filled from their default supplier at this point.
///
/// # Errors
///
/// `UnexpectedArgument`, `InvalidParamValue` or `MissingRequiredParam`.
pub fn bind(params: &[Parameter], tokens: &[Token], ctx: &ParseContext<'_>) -> ShellResult<Arguments> {
    let mut matcher = Matcher::new(params);
    for token in tokens {
        matcher.feed(token)?;
    }
    let slots = matcher.finish()?;

    let mut arguments = Arguments::default();
    for (param, raw) in params.iter().zip(slots) {
        let value = match raw {
            Some(raw) => param.parse(&raw, ctx)?,
            None => param.default_value(ctx)?,
        };
        arguments.insert(param.name(), value);
    }
    Ok(arguments)
}

/// Parse a full command line at `cwd`.
///
/// # Errors
///
/// - `UnterminatedQuote` from tokenizing
/// - `NotACommand` if the path names a directory (an empty line names the
///   working directory)
/// - resolver failures for the path
/// - matching and value failures from [`bind`]
pub fn parse(ns: &Namespace, line: &str, cwd: DirId) -> ShellResult<ParsedLine> {
    let tokens = tokenize(line, ns.syntax())?;
    let (path, rest) = match tokens.split_first() {
        Some((head, rest)) => (head.text.as_str(), rest),
        None => ("", &tokens[..]),
    };

    let command = match resolve(ns, path, cwd)? {
        Entry::Command(id) => id,
        Entry::Directory(id) => {
            return Err(ShellError::NotACommand(ns.path_of(Entry::Directory(id))));
        }
    };

    let ctx = ParseContext::new(ns, cwd);
    let arguments = bind(ns.command(command).params(), rest, &ctx)?;
    log::debug!(
        "parsed {:?} as {} with {} arguments",
        line,
        ns.path_of(Entry::Command(command)),
        arguments.len()
    );
    Ok(ParsedLine { command, arguments })
}

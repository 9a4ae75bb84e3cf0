//! core::lexer
//!
//! Command-line tokenizer.
//!
//! # Rules
//!
//! - Tokens are separated by whitespace.
//! - The quote character groups whitespace into a token. A quote may open
//!   in the middle of a token (`a"b c"d` is the single token `ab cd`).
//! - `""` is an empty token.
//! - An unclosed quote is `UnterminatedQuote` for full lines. Partial
//!   lines (autocomplete) tolerate it: the open token is the one being
//!   completed.

use serde::{Deserialize, Serialize};

use super::error::{ShellError, ShellResult};

/// Characters with special meaning on a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syntax {
    /// Path component separator.
    pub separator: char,
    /// Quote character.
    pub quote: char,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            separator: '/',
            quote: '"',
        }
    }
}

/// A token of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text with quotes removed.
    pub text: String,
    /// Byte offset in the line where the text begins (after a leading quote).
    pub start: usize,
    /// Byte offset one past the last byte of the token.
    pub end: usize,
    /// Whether any part of the token was quoted.
    pub quoted: bool,
}

impl Token {
    fn empty_at(offset: usize) -> Self {
        Self {
            text: String::new(),
            start: offset,
            end: offset,
            quoted: false,
        }
    }
}

/// A line split for autocomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialLine {
    /// Tokens terminated by whitespace.
    pub complete: Vec<Token>,
    /// The token under the cursor; empty when the line ends in whitespace.
    pub trailing: Token,
}

struct Scan {
    tokens: Vec<Token>,
    pending: Option<Token>,
    open_quote: Option<usize>,
}

fn scan(line: &str, quote: char) -> Scan {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;
    let mut open_quote: Option<usize> = None;

    for (i, c) in line.char_indices() {
        let next = i + c.len_utf8();

        if open_quote.is_some() {
            if let Some(tok) = current.as_mut() {
                if c == quote {
                    open_quote = None;
                } else {
                    tok.text.push(c);
                }
                tok.end = next;
            }
            continue;
        }

        if c.is_whitespace() {
            if let Some(tok) = current.take() {
                tokens.push(tok);
            }
            continue;
        }

        let tok = current.get_or_insert_with(|| Token {
            text: String::new(),
            start: if c == quote { next } else { i },
            end: i,
            quoted: false,
        });
        if c == quote {
            open_quote = Some(i);
            tok.quoted = true;
        } else {
            tok.text.push(c);
        }
        tok.end = next;
    }

    Scan {
        tokens,
        pending: current,
        open_quote,
    }
}

/// Split a full command line into tokens.
///
/// # Errors
///
/// `UnterminatedQuote` with the offset of the quote that was never closed.
pub fn tokenize(line: &str, syntax: &Syntax) -> ShellResult<Vec<Token>> {
    let scan = scan(line, syntax.quote);
    if let Some(at) = scan.open_quote {
        return Err(ShellError::UnterminatedQuote(at));
    }
    let mut tokens = scan.tokens;
    tokens.extend(scan.pending);
    log::trace!("tokenized {line:?} into {} tokens", tokens.len());
    Ok(tokens)
}

/// Split a line that is still being typed.
pub fn tokenize_partial(line: &str, syntax: &Syntax) -> PartialLine {
    let scan = scan(line, syntax.quote);
    PartialLine {
        complete: scan.tokens,
        trailing: scan.pending.unwrap_or_else(|| Token::empty_at(line.len())),
    }
}

//! Syntax highlighting for the REPL.
//!
//! Input is tokenized with the Lisp profile and each token is colored by
//! category. Every shipped grammar reads well enough through it: brackets,
//! strings, comments and numbers look the same in all of them. Text between
//! tokens is copied unchanged.

use std::borrow::Cow;

use packrat_engine::{Category, LexicalProfile, Node, Scanner};
use packrat_foundation::{Error, ErrorKind};
use packrat_grammars::query::KEYWORDS;

const RESET: &str = "\x1b[0m";
const COMMENT: &str = "\x1b[2;3m"; // dim italic
const STRING: &str = "\x1b[33m"; // yellow
const NUMBER: &str = "\x1b[35m"; // magenta
const BRACKET: &str = "\x1b[1m"; // bold
const KEYWORD: &str = "\x1b[1;32m"; // bold green
const BOOLEAN: &str = "\x1b[34m"; // blue
const COMMAND: &str = "\x1b[36m"; // cyan

/// Highlighter for REPL input.
pub struct PackratHighlighter {
    profile: LexicalProfile,
}

impl PackratHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: LexicalProfile::lisp(),
        }
    }

    /// Highlight a line of input.
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim_start().starts_with(':') {
            return Cow::Owned(format!("{COMMAND}{line}{RESET}"));
        }

        let mut out = String::with_capacity(line.len() * 2);
        let mut scanner = Scanner::new(line, &self.profile);
        let mut copied = 0;

        loop {
            match scanner.next_token() {
                Ok(Some(token)) => {
                    let span = token.span;
                    out.push_str(&line[copied..span.start]);
                    paint(&mut out, color_of(&token), &line[span.start..span.end]);
                    copied = span.end;
                }
                Ok(None) => break,
                Err(e) => {
                    // An open string or comment runs to the end of the line.
                    let (start, color) = open_literal(&e);
                    let start = start.clamp(copied, line.len());
                    out.push_str(&line[copied..start]);
                    paint(&mut out, color, &line[start..]);
                    copied = line.len();
                    break;
                }
            }
        }

        out.push_str(&line[copied..]);
        Cow::Owned(out)
    }
}

impl Default for PackratHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn paint(out: &mut String, color: Option<&str>, text: &str) {
    match color {
        Some(color) => {
            out.push_str(color);
            out.push_str(text);
            out.push_str(RESET);
        }
        None => out.push_str(text),
    }
}

fn color_of(token: &Node) -> Option<&'static str> {
    match token.category {
        Category::Comment => Some(COMMENT),
        Category::Str | Category::Character => Some(STRING),
        Category::Token => {
            let text = token.text.as_str();
            if matches!(text, "(" | ")" | "[" | "]" | "{" | "}") {
                Some(BRACKET)
            } else if text.starts_with(|c: char| c.is_ascii_digit()) {
                Some(NUMBER)
            } else if KEYWORDS.contains(&text) {
                Some(KEYWORD)
            } else if matches!(text, "true" | "false") {
                Some(BOOLEAN)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn open_literal(error: &Error) -> (usize, Option<&'static str>) {
    match error.kind {
        ErrorKind::UnterminatedComment { offset } => (offset, Some(COMMENT)),
        ErrorKind::UnterminatedString { offset }
        | ErrorKind::UnterminatedCharacter { offset } => (offset, Some(STRING)),
        _ => (0, None),
    }
}

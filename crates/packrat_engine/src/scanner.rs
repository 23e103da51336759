//! Tokenizer.
//!
//! The scanner converts source text into a sequence of leaf nodes in a
//! single forward pass, guided by a [`LexicalProfile`]. At each position it
//! tries, in order: significant whitespace, ordinary whitespace, line
//! comments, block comments, delimiters, operators, string literals,
//! character literals, and finally identifier/number words.

use std::rc::Rc;

use packrat_foundation::{Error, Result};

use crate::node::{Category, Node, NodeRef};
use crate::profile::LexicalProfile;
use crate::span::Span;

/// Scans `source` into tokens.
///
/// # Errors
///
/// Returns an error for an unterminated string literal, block comment, or
/// character literal. These abort the whole scan.
pub fn scan(source: &str, profile: &LexicalProfile) -> Result<Vec<NodeRef>> {
    let mut scanner = Scanner::new(source, profile);
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token()? {
        tokens.push(Rc::new(token));
    }
    Ok(tokens)
}

/// Incremental scanner over one source string.
pub struct Scanner<'src, 'p> {
    /// Source text being tokenized.
    source: &'src str,
    /// Configuration for this scan.
    profile: &'p LexicalProfile,
    /// Current byte offset in source.
    position: usize,
}

impl<'src, 'p> Scanner<'src, 'p> {
    /// Creates a new scanner for the given source.
    #[must_use]
    pub fn new(source: &'src str, profile: &'p LexicalProfile) -> Self {
        Self {
            source,
            profile,
            position: 0,
        }
    }

    /// Returns the current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if a string, block comment, or character literal is
    /// cut off by the end of input.
    pub fn next_token(&mut self) -> Result<Option<Node>> {
        loop {
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                return Ok(None);
            };
            let start = self.position;

            if let Some(ws) = self.profile.significant_at(rest) {
                self.position += ws.len();
                return Ok(Some(self.leaf(Category::Newline, start)));
            }

            if self.profile.is_whitespace(c) {
                self.position += c.len_utf8();
                continue;
            }

            if self.profile.line_comment_at(rest).is_some() {
                self.position += rest.find('\n').unwrap_or(rest.len());
                return Ok(Some(self.leaf(Category::Comment, start)));
            }

            if let Some((open, close)) = self.profile.block_comment() {
                if rest.starts_with(open) {
                    return self.scan_block_comment(open, close).map(Some);
                }
            }

            if let Some(delim) = self.profile.delimiter_at(rest) {
                self.position += delim.len();
                return Ok(Some(self.leaf(Category::Token, start)));
            }

            if let Some(op) = self.profile.operator_at(rest) {
                self.position += op.len();
                return Ok(Some(self.leaf(Category::Token, start)));
            }

            if let Some(mark) = self.profile.quotation_at(rest) {
                return self.scan_string(mark).map(Some);
            }

            if let Some(prefix) = self.profile.char_prefix_at(rest) {
                return self.scan_character(prefix).map(Some);
            }

            return Ok(Some(self.scan_word()));
        }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Builds a leaf whose text is the source consumed since `start`.
    fn leaf(&self, category: Category, start: usize) -> Node {
        let span = Span::new(start, self.position);
        Node::leaf(category, span, span.text(self.source))
    }

    /// Scans a block comment through its end marker.
    fn scan_block_comment(&mut self, open: &str, close: &str) -> Result<Node> {
        let start = self.position;
        let body = &self.source[start + open.len()..];
        let Some(end) = body.find(close) else {
            return Err(Error::unterminated_comment(start));
        };
        self.position = start + open.len() + end + close.len();
        Ok(self.leaf(Category::Comment, start))
    }

    /// Scans a string literal. Escaped characters are copied verbatim,
    /// backslash included.
    fn scan_string(&mut self, mark: &str) -> Result<Node> {
        let start = self.position;
        self.position += mark.len();
        let mut text = String::new();
        let mut escaped = false;

        loop {
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                return Err(Error::unterminated_string(start));
            };
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if rest.starts_with(mark) {
                self.position += mark.len();
                break;
            }
            text.push(c);
            self.position += c.len_utf8();
        }

        Ok(Node::leaf(
            Category::Str,
            Span::new(start, self.position),
            text,
        ))
    }

    /// Scans a character literal. The first character after the prefix is
    /// always taken; scanning then runs to the next whitespace or delimiter
    /// and the token keeps only the final character.
    fn scan_character(&mut self, prefix: &str) -> Result<Node> {
        let start = self.position;
        self.position += prefix.len();

        let Some(first) = self.rest().chars().next() else {
            return Err(Error::unterminated_character(start));
        };
        self.position += first.len_utf8();
        let mut last = first;

        while let Some(c) = self.rest().chars().next() {
            if self.profile.is_whitespace(c) || self.profile.delimiter_at(self.rest()).is_some() {
                break;
            }
            last = c;
            self.position += c.len_utf8();
        }

        Ok(Node::leaf(
            Category::Character,
            Span::new(start, self.position),
            last.to_string(),
        ))
    }

    /// Scans an identifier or number up to whitespace, a delimiter, or an
    /// operator. At least one character is always consumed.
    fn scan_word(&mut self) -> Node {
        let start = self.position;
        let mut first = true;

        while let Some(c) = self.rest().chars().next() {
            if !first && self.at_word_boundary(c) {
                break;
            }
            first = false;
            self.position += c.len_utf8();
        }

        self.leaf(Category::Token, start)
    }

    fn at_word_boundary(&self, c: char) -> bool {
        let rest = self.rest();
        self.profile.is_whitespace(c)
            || self.profile.significant_at(rest).is_some()
            || self.profile.delimiter_at(rest).is_some()
            || self.profile.operator_at(rest).is_some()
    }
}

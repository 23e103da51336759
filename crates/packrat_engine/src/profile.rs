//! Lexical profiles.
//!
//! A [`LexicalProfile`] is the complete tokenizer configuration for one
//! grammar. It is an ordinary immutable value: build it once with the
//! `with_*` methods and pass it to [`scan`](crate::scan).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Delimiters, operators, comment and quote markers, and whitespace rules.
///
/// Operators are matched in declared order, so longer operators must be
/// listed before their prefixes (`==` before `=`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LexicalProfile {
    delimiters: Vec<String>,
    operators: Vec<String>,
    line_comments: Vec<String>,
    block_comment: Option<(String, String)>,
    quotation_marks: Vec<String>,
    char_prefixes: Vec<String>,
    whitespace: Vec<char>,
    significant_whitespace: Vec<String>,
}

/// Ordinary whitespace used when a profile does not override it.
const DEFAULT_WHITESPACE: [char; 6] = ['\t', '\n', '\u{b}', '\u{c}', '\r', ' '];

impl LexicalProfile {
    /// Creates a profile with no delimiters, operators, comments, quotes, or
    /// character prefixes, and the default whitespace set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            delimiters: Vec::new(),
            operators: Vec::new(),
            line_comments: Vec::new(),
            block_comment: None,
            quotation_marks: Vec::new(),
            char_prefixes: Vec::new(),
            whitespace: DEFAULT_WHITESPACE.to_vec(),
            significant_whitespace: Vec::new(),
        }
    }

    /// Creates the Lisp-flavoured profile: bracket and quote delimiters, `;`
    /// line comments, `#| |#` block comments, `"` and `'` strings, and `#\`
    /// or `?\` character literals.
    #[must_use]
    pub fn lisp() -> Self {
        Self::empty()
            .with_delimiters(["(", ")", "[", "]", "{", "}", "'", "`", ","])
            .with_line_comments([";"])
            .with_block_comment("#|", "|#")
            .with_quotation_marks(["\"", "'"])
            .with_char_prefixes(["#\\", "?\\"])
    }

    /// Replaces the delimiter set.
    #[must_use]
    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = collect_markers(delimiters);
        self
    }

    /// Replaces the operator list. Order is priority.
    #[must_use]
    pub fn with_operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = collect_markers(operators);
        self
    }

    /// Replaces the line-comment markers.
    #[must_use]
    pub fn with_line_comments<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.line_comments = collect_markers(markers);
        self
    }

    /// Sets the block-comment start and end markers.
    #[must_use]
    pub fn with_block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        let (start, end) = (start.into(), end.into());
        self.block_comment = (!start.is_empty() && !end.is_empty()).then_some((start, end));
        self
    }

    /// Removes block comments.
    #[must_use]
    pub fn without_block_comment(mut self) -> Self {
        self.block_comment = None;
        self
    }

    /// Replaces the quotation marks.
    #[must_use]
    pub fn with_quotation_marks<I, S>(mut self, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quotation_marks = collect_markers(marks);
        self
    }

    /// Replaces the character-literal prefixes.
    #[must_use]
    pub fn with_char_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.char_prefixes = collect_markers(prefixes);
        self
    }

    /// Replaces the ordinary (skipped) whitespace set.
    #[must_use]
    pub fn with_whitespace(mut self, whitespace: impl IntoIterator<Item = char>) -> Self {
        self.whitespace = whitespace.into_iter().collect();
        self
    }

    /// Replaces the significant whitespace set. Significant whitespace is
    /// emitted as newline tokens instead of being skipped.
    #[must_use]
    pub fn with_significant_whitespace<I, S>(mut self, whitespace: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.significant_whitespace = collect_markers(whitespace);
        self
    }

    /// Returns the delimiters.
    #[must_use]
    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    /// Returns the operators in priority order.
    #[must_use]
    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    /// Returns the line-comment markers.
    #[must_use]
    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    /// Returns the block-comment markers.
    #[must_use]
    pub fn block_comment(&self) -> Option<(&str, &str)> {
        self.block_comment
            .as_ref()
            .map(|(start, end)| (start.as_str(), end.as_str()))
    }

    /// Returns the quotation marks.
    #[must_use]
    pub fn quotation_marks(&self) -> &[String] {
        &self.quotation_marks
    }

    /// Returns the character-literal prefixes.
    #[must_use]
    pub fn char_prefixes(&self) -> &[String] {
        &self.char_prefixes
    }

    /// Returns the significant whitespace markers.
    #[must_use]
    pub fn significant_whitespace(&self) -> &[String] {
        &self.significant_whitespace
    }

    /// Returns true if `c` is ordinary whitespace.
    #[must_use]
    pub fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(&c)
    }

    /// Returns the significant whitespace `rest` starts with.
    #[must_use]
    pub fn significant_at(&self, rest: &str) -> Option<&str> {
        match_prefix(&self.significant_whitespace, rest)
    }

    /// Returns the line-comment marker `rest` starts with.
    #[must_use]
    pub fn line_comment_at(&self, rest: &str) -> Option<&str> {
        match_prefix(&self.line_comments, rest)
    }

    /// Returns the delimiter `rest` starts with.
    #[must_use]
    pub fn delimiter_at(&self, rest: &str) -> Option<&str> {
        match_prefix(&self.delimiters, rest)
    }

    /// Returns the first declared operator `rest` starts with.
    #[must_use]
    pub fn operator_at(&self, rest: &str) -> Option<&str> {
        match_prefix(&self.operators, rest)
    }

    /// Returns the quotation mark `rest` starts with.
    #[must_use]
    pub fn quotation_at(&self, rest: &str) -> Option<&str> {
        match_prefix(&self.quotation_marks, rest)
    }

    /// Returns the character-literal prefix `rest` starts with.
    #[must_use]
    pub fn char_prefix_at(&self, rest: &str) -> Option<&str> {
        match_prefix(&self.char_prefixes, rest)
    }
}

impl Default for LexicalProfile {
    fn default() -> Self {
        Self::lisp()
    }
}

/// Empty markers would match everywhere, so they are dropped.
fn collect_markers<I, S>(markers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    markers
        .into_iter()
        .map(Into::into)
        .filter(|m: &String| !m.is_empty())
        .collect()
}

fn match_prefix<'p>(candidates: &'p [String], rest: &str) -> Option<&'p str> {
    candidates
        .iter()
        .find(|c| rest.starts_with(c.as_str()))
        .map(String::as_str)
}

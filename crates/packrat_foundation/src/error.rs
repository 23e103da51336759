//! Error types for the Packrat system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Combinator failures are *not* errors: they are ordinary `None` outcomes
//! that drive backtracking. Everything in this module is either fatal to a
//! scan, a mistake in how a grammar was assembled, or a problem in one of the
//! outer layers (rendering, I/O).

use std::fmt;

use thiserror::Error;

/// The main error type for Packrat operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unterminated character literal error.
    #[must_use]
    pub fn unterminated_character(offset: usize) -> Self {
        Self::new(ErrorKind::UnterminatedCharacter { offset })
    }

    /// Creates an unterminated string literal error.
    #[must_use]
    pub fn unterminated_string(offset: usize) -> Self {
        Self::new(ErrorKind::UnterminatedString { offset })
    }

    /// Creates an unterminated block comment error.
    #[must_use]
    pub fn unterminated_comment(offset: usize) -> Self {
        Self::new(ErrorKind::UnterminatedComment { offset })
    }

    /// Creates a duplicate rule definition error.
    #[must_use]
    pub fn duplicate_rule(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRule(name.into()))
    }

    /// Creates an undefined rule error.
    #[must_use]
    pub fn undefined_rule(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedRule(name.into()))
    }

    /// Creates an incomplete parse error.
    #[must_use]
    pub fn incomplete(offset: usize, remaining: usize) -> Self {
        Self::new(ErrorKind::Incomplete { offset, remaining })
    }

    /// Creates a no-match error, for callers that require a match.
    #[must_use]
    pub fn no_match() -> Self {
        Self::new(ErrorKind::NoMatch)
    }

    /// Creates an unexpected tree shape error.
    #[must_use]
    pub fn unexpected_shape(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedShape {
            label: label.into(),
            message: message.into(),
        })
    }

    /// Returns the byte offset into the source this error points at, for
    /// scan errors and incomplete parses.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::UnterminatedCharacter { offset }
            | ErrorKind::UnterminatedString { offset }
            | ErrorKind::UnterminatedComment { offset }
            | ErrorKind::Incomplete { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// Returns true if this error aborted a scan.
    #[must_use]
    pub const fn is_scan_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnterminatedCharacter { .. }
                | ErrorKind::UnterminatedString { .. }
                | ErrorKind::UnterminatedComment { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A character-literal prefix ran into the end of input.
    #[error("reached end of input while scanning character literal at offset {offset}")]
    UnterminatedCharacter {
        /// Byte offset of the prefix.
        offset: usize,
    },

    /// A string literal has no closing quotation mark.
    #[error("unterminated string literal at offset {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quotation mark.
        offset: usize,
    },

    /// A block comment has no end marker.
    #[error("unterminated block comment at offset {offset}")]
    UnterminatedComment {
        /// Byte offset of the start marker.
        offset: usize,
    },

    /// A rule was defined twice in the same grammar.
    #[error("rule already defined: {0}")]
    DuplicateRule(String),

    /// A rule was referenced but never defined.
    #[error("undefined rule: {0}")]
    UndefinedRule(String),

    /// The top rule did not match.
    #[error("input did not match the grammar")]
    NoMatch,

    /// The top rule matched, but did not consume every token.
    #[error("input not fully consumed: {remaining} token(s) left at offset {offset}")]
    Incomplete {
        /// Byte offset of the first unconsumed token.
        offset: usize,
        /// Number of unconsumed tokens.
        remaining: usize,
    },

    /// A renderer met a node it cannot handle.
    #[error("unexpected {label} node: {message}")]
    UnexpectedShape {
        /// Label of the offending node.
        label: String,
        /// What was wrong with it.
        message: String,
    },

    /// No grammar is registered under this name.
    #[error("unknown grammar: {0}")]
    UnknownGrammar(String),

    /// I/O failure in an outer layer.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Source file or input name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Rules that were being applied, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

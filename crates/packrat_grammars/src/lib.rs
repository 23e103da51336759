//! Ready-made grammars and tree renderers built on the Packrat engine.
//!
//! This crate provides:
//! - [`calc`] - C-like arithmetic and logical expressions
//! - [`sexp`] - Generic s-expressions
//! - [`query`] - Bracketed relational queries
//! - [`render`] - SQL and outline renderers for parsed trees
//! - [`Language`] - Lookup of the grammars above by name
//!
//! Everything here is assembled from the engine's public combinators; none
//! of it needs access to engine internals.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod calc;
pub mod query;
pub mod render;
pub mod sexp;

use std::fmt;
use std::str::FromStr;

use packrat_engine::{
    Combinator, Evaluation, Evaluator, Grammar, HumanFormatter, LexicalProfile, MemoStats, NodeRef,
    Span, TraceFormatter, scan,
};
use packrat_foundation::{Error, ErrorContext, ErrorKind, Result};

pub use render::{
    TreeConfig, render_sql, render_tree, render_tree_with_config, render_trees, to_sql,
};

// =============================================================================
// Languages
// =============================================================================

/// The grammars shipped with this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// [`calc`]
    Calc,
    /// [`sexp`]
    Sexp,
    /// [`query`]
    Query,
}

impl Language {
    /// Every language, in display order.
    pub const ALL: [Self; 3] = [Self::Calc, Self::Sexp, Self::Query];

    /// Returns the name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calc => "calc",
            Self::Sexp => "sexp",
            Self::Query => "query",
        }
    }

    /// Returns the name of the entry rule.
    #[must_use]
    pub const fn top(self) -> &'static str {
        match self {
            Self::Calc => calc::TOP,
            Self::Sexp => sexp::TOP,
            Self::Query => query::TOP,
        }
    }

    /// Returns the tokenizer configuration.
    #[must_use]
    pub fn profile(self) -> LexicalProfile {
        match self {
            Self::Calc => calc::profile(),
            Self::Sexp => sexp::profile(),
            Self::Query => query::profile(),
        }
    }

    /// Builds a fresh copy of the grammar.
    ///
    /// # Errors
    ///
    /// Returns an error only if the rule table is inconsistent.
    pub fn grammar(self) -> Result<Grammar> {
        match self {
            Self::Calc => calc::grammar(),
            Self::Sexp => sexp::grammar(),
            Self::Query => query::grammar(),
        }
    }

    /// Builds a reusable parser for this language.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is missing a rule.
    pub fn parser(self) -> Result<LanguageParser> {
        let grammar = self.grammar()?;
        let top = grammar.entry(self.top())?;
        Ok(LanguageParser {
            language: self,
            profile: self.profile(),
            grammar,
            top,
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::new(ErrorKind::UnknownGrammar(s.to_string())))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// A language's profile and grammar, ready to parse any number of sources.
#[derive(Clone, Debug)]
pub struct LanguageParser {
    language: Language,
    profile: LexicalProfile,
    grammar: Grammar,
    top: Combinator,
}

impl LanguageParser {
    /// Returns the language this parser was built for.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the grammar, for looking up rule names.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parses `source`, requiring every token to be consumed.
    ///
    /// # Errors
    ///
    /// Returns a scan error, [`ErrorKind::NoMatch`], or
    /// [`ErrorKind::Incomplete`].
    pub fn parse(&self, source: &str) -> Result<Vec<NodeRef>> {
        let tokens = scan(source, &self.profile).map_err(|e| self.locate(e, source))?;
        Evaluator::default()
            .run(&self.top, &tokens)
            .into_complete()
            .map_err(|e| self.locate(e, source))
    }

    /// Attaches the line and column of errors that point into `source`.
    fn locate(&self, error: Error, source: &str) -> Error {
        match error.offset() {
            Some(offset) => {
                let (line, column) = Span::at(offset).line_col(source);
                error.with_context(
                    ErrorContext::new()
                        .with_source(self.language.name())
                        .with_position(line, column),
                )
            }
            None => error,
        }
    }

    /// Parses `source` with a configured evaluator, keeping memo counters
    /// and the formatted trace even when the parse itself fails.
    ///
    /// # Errors
    ///
    /// Returns an error only if `source` does not scan.
    pub fn parse_with(&self, source: &str, evaluator: &Evaluator) -> Result<Parsed> {
        let tokens = scan(source, &self.profile).map_err(|e| self.locate(e, source))?;
        let Evaluation {
            outcome,
            stats,
            trace,
        } = evaluator.run(&self.top, &tokens);

        let trace = trace.map(|buffer| {
            HumanFormatter::new().format_buffer(&buffer, &self.grammar.interner())
        });
        let nodes = Evaluation {
            outcome,
            stats,
            trace: None,
        }
        .into_complete()
        .map_err(|e| self.locate(e, source));

        Ok(Parsed {
            nodes,
            stats,
            trace,
        })
    }
}

/// Result of [`LanguageParser::parse_with`].
#[derive(Debug)]
pub struct Parsed {
    /// The parsed trees, or why the input was rejected.
    pub nodes: Result<Vec<NodeRef>>,
    /// Memo counters.
    pub stats: MemoStats,
    /// One line per trace record, when tracing was enabled.
    pub trace: Option<String>,
}

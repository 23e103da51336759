//! Tokenizer, tree model, combinator algebra, and packrat memoization.
//!
//! This crate provides:
//! - [`LexicalProfile`] and [`scan`] - Configurable single-pass tokenizer
//! - [`Node`] - The tagged tree shared by tokens and productions
//! - [`Combinator`] - Composable parsers over token suffixes
//! - [`prefix`], [`postfix`], [`infix_left`], [`infix_right`] - Expression builders
//! - [`Grammar`] - Named, mutually recursive rules with memoized references
//! - [`Evaluator`] - Evaluation with memo statistics and optional tracing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combinator;
pub mod eval;
pub mod expr;
pub mod grammar;
pub mod memo;
pub mod node;
pub mod profile;
pub mod scanner;
pub mod span;
pub mod state;
pub mod trace;

pub use combinator::{
    Combinator, Match, Outcome, Parse, all_of, discard, empty, end_of_input, fail,
    filtered_sequence, kind, literal, map, negative_consume, one_or_more, optional,
    ordered_choice, phantom, predicate, production, separated, sequence, skip, skip_phantom,
    zero_or_more,
};
pub use eval::{EvalConfig, Evaluation, Evaluator, evaluate};
pub use expr::{Associativity, infix, infix_left, infix_right, postfix, prefix};
pub use grammar::Grammar;
pub use memo::{Fingerprint, MemoStats, MemoTable, memo};
pub use node::{Category, Label, Node, NodeRef};
pub use profile::LexicalProfile;
pub use scanner::{Scanner, scan};
pub use span::Span;
pub use state::{Application, ParseState};
pub use trace::{HumanFormatter, TraceBuffer, TraceEvent, TraceFormatter, TraceRecord, TracerConfig};

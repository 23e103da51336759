//! Evaluation entry points.
//!
//! Every evaluation gets a fresh memo table and an empty application stack,
//! and applies the top combinator exactly once. Trailing tokens are not an
//! error; [`Evaluation::into_complete`] is the opt-in check for full
//! consumption.

use packrat_foundation::{Error, Result};

use crate::combinator::{Combinator, Outcome};
use crate::memo::MemoStats;
use crate::node::NodeRef;
use crate::state::ParseState;
use crate::trace::{TraceBuffer, TracerConfig};

/// Applies `top` to `tokens` with default settings.
#[must_use]
pub fn evaluate<'t>(top: &Combinator, tokens: &'t [NodeRef]) -> Outcome<'t> {
    let mut state = ParseState::new(tokens);
    top.apply(tokens, &mut state)
}

/// Settings for an [`Evaluator`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Rule tracing.
    pub tracer: TracerConfig,
}

impl EvalConfig {
    /// Sets the tracer configuration.
    #[must_use]
    pub fn with_tracer(mut self, tracer: TracerConfig) -> Self {
        self.tracer = tracer;
        self
    }
}

/// Runs evaluations with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Creates an evaluator.
    #[must_use]
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Applies `top` to `tokens`.
    #[must_use]
    pub fn run<'t>(&self, top: &Combinator, tokens: &'t [NodeRef]) -> Evaluation<'t> {
        let mut state = ParseState::new(tokens).with_tracer(&self.config.tracer);
        let outcome = top.apply(tokens, &mut state);
        let (stats, trace) = state.finish();
        Evaluation {
            outcome,
            stats,
            trace,
        }
    }
}

/// Everything one evaluation produced.
#[derive(Debug)]
pub struct Evaluation<'t> {
    /// The top combinator's outcome.
    pub outcome: Outcome<'t>,
    /// Memo counters.
    pub stats: MemoStats,
    /// Recorded trace, when tracing was enabled.
    pub trace: Option<TraceBuffer>,
}

impl Evaluation<'_> {
    /// Returns true if the top combinator matched, completely or not.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the matched nodes if every token was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`NoMatch`](packrat_foundation::ErrorKind::NoMatch) if the top
    /// combinator failed, or
    /// [`Incomplete`](packrat_foundation::ErrorKind::Incomplete) with the
    /// offset of the first unconsumed token.
    pub fn into_complete(self) -> Result<Vec<NodeRef>> {
        let matched = self.outcome.ok_or_else(Error::no_match)?;
        match matched.rest.first() {
            None => Ok(matched.nodes),
            Some(next) => Err(Error::incomplete(next.span.start, matched.rest.len())),
        }
    }
}

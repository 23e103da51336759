//! Per-evaluation parse state.
//!
//! A [`ParseState`] is created for one evaluation over one token sequence.
//! It owns the memo table, the application stack, the precomputed suffix
//! fingerprints, and the optional trace buffer. The token sequence itself is
//! only ever sliced.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use packrat_foundation::RuleId;

use crate::combinator::{Combinator, Outcome};
use crate::memo::{Fingerprint, MemoStats, MemoTable};
use crate::node::NodeRef;
use crate::trace::{TraceBuffer, TraceEvent, TracerConfig};

/// One frame of the application stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Application {
    /// The rule being applied.
    pub rule: RuleId,
    /// Token index the rule was applied at.
    pub position: usize,
}

/// Mutable context threaded through every combinator of one evaluation.
pub struct ParseState<'t> {
    /// Number of tokens in the evaluated sequence.
    token_count: usize,
    /// Byte offset just past the last token.
    end_offset: usize,
    /// `suffix_hashes[i]` fingerprints `tokens[i..]`.
    suffix_hashes: Vec<u64>,
    /// Active rule applications, innermost last.
    stack: Vec<Application>,
    memo: MemoTable<'t>,
    trace: Option<TraceBuffer>,
}

impl<'t> ParseState<'t> {
    /// Creates a fresh state for `tokens` with tracing disabled.
    #[must_use]
    pub fn new(tokens: &'t [NodeRef]) -> Self {
        Self {
            token_count: tokens.len(),
            end_offset: tokens.last().map_or(0, |t| t.span.end),
            suffix_hashes: suffix_hashes(tokens),
            stack: Vec::new(),
            memo: MemoTable::new(),
            trace: None,
        }
    }

    /// Enables tracing according to `config`.
    #[must_use]
    pub fn with_tracer(mut self, config: &TracerConfig) -> Self {
        self.trace = config
            .enabled
            .then(|| TraceBuffer::new(config.buffer_size));
        self
    }

    /// Returns the token index at which `input` starts.
    #[must_use]
    pub fn position(&self, input: &[NodeRef]) -> usize {
        self.token_count.saturating_sub(input.len())
    }

    /// Returns the byte offset at which `input` starts: the first token's
    /// start, or the end of the last token when `input` is empty.
    #[must_use]
    pub fn offset_of(&self, input: &[NodeRef]) -> usize {
        input.first().map_or(self.end_offset, |t| t.span.start)
    }

    /// Returns the fingerprint of `input`, which must be a suffix of the
    /// evaluated token sequence.
    #[must_use]
    pub fn fingerprint(&self, input: &[NodeRef]) -> Fingerprint {
        Fingerprint {
            len: input.len(),
            hash: self.suffix_hashes[self.position(input)],
        }
    }

    /// Returns the active rule applications, outermost first.
    #[must_use]
    pub fn stack(&self) -> &[Application] {
        &self.stack
    }

    /// Returns the current application depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Applies `body` as the named rule `rule`, keeping the application
    /// stack and the trace up to date.
    pub fn apply_rule(
        &mut self,
        rule: RuleId,
        body: &Combinator,
        input: &'t [NodeRef],
    ) -> Outcome<'t> {
        let position = self.position(input);
        self.record(rule, position, TraceEvent::Enter);

        self.stack.push(Application { rule, position });
        let outcome = body.apply(input, self);
        self.stack.pop();

        let event = TraceEvent::Exit {
            matched: outcome.is_some(),
            consumed: outcome.as_ref().map_or(0, |m| m.consumed(input)),
        };
        self.record(rule, position, event);
        outcome
    }

    /// Returns the memo counters so far.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Returns the trace recorded so far, if tracing is enabled.
    #[must_use]
    pub fn trace(&self) -> Option<&TraceBuffer> {
        self.trace.as_ref()
    }

    /// Consumes the state, returning the memo counters and the trace.
    #[must_use]
    pub fn finish(self) -> (MemoStats, Option<TraceBuffer>) {
        (self.memo.stats(), self.trace)
    }

    pub(crate) fn memo_mut(&mut self) -> &mut MemoTable<'t> {
        &mut self.memo
    }

    pub(crate) fn record(&mut self, rule: RuleId, position: usize, event: TraceEvent) {
        let depth = self.stack.len();
        if let Some(trace) = &mut self.trace {
            trace.push(rule, position, depth, event);
        }
    }
}

/// Computes every suffix fingerprint in one backwards pass.
fn suffix_hashes(tokens: &[NodeRef]) -> Vec<u64> {
    let mut hashes = vec![0; tokens.len() + 1];
    for (i, token) in tokens.iter().enumerate().rev() {
        let mut hasher = DefaultHasher::new();
        hashes[i + 1].hash(&mut hasher);
        token.category.hash(&mut hasher);
        token.text.hash(&mut hasher);
        hashes[i] = hasher.finish();
    }
    hashes
}

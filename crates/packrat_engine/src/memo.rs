//! Packrat memoization.
//!
//! A [`MemoTable`] lives for exactly one evaluation. It is keyed by the
//! interned id of a rule and a [`Fingerprint`] of the remaining tokens, and
//! stores failures as well as matches.

use std::collections::HashMap;

use packrat_foundation::RuleId;

use crate::combinator::{Combinator, Outcome, Parse};
use crate::node::NodeRef;
use crate::state::ParseState;
use crate::trace::TraceEvent;

/// Content-derived identity of a token suffix.
///
/// Two suffixes of the same token sequence share a fingerprint only if they
/// have the same length and the same categories and texts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Number of remaining tokens.
    pub len: usize,
    /// Rolling hash over the remaining tokens.
    pub hash: u64,
}

/// Cache counters for one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to apply the wrapped combinator.
    pub misses: u64,
    /// Entries stored at the end of the evaluation.
    pub entries: usize,
}

impl MemoStats {
    /// Fraction of lookups answered from the cache, or `0.0` with no lookups.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Outcome cache for one evaluation.
#[derive(Debug, Default)]
pub struct MemoTable<'t> {
    entries: HashMap<(RuleId, Fingerprint), Outcome<'t>>,
    hits: u64,
    misses: u64,
}

impl<'t> MemoTable<'t> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a cached outcome, counting the hit or miss.
    ///
    /// The outer `Option` is presence in the cache; the inner one is the
    /// cached match or failure.
    pub fn get(&mut self, rule: RuleId, key: Fingerprint) -> Option<Outcome<'t>> {
        match self.entries.get(&(rule, key)) {
            Some(outcome) => {
                self.hits += 1;
                Some(outcome.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores an outcome.
    pub fn insert(&mut self, rule: RuleId, key: Fingerprint, outcome: Outcome<'t>) {
        self.entries.insert((rule, key), outcome);
    }

    /// Returns the number of stored outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the current counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

/// Wraps a combinator with the evaluation's memo table.
struct Memo {
    id: RuleId,
    inner: Combinator,
}

impl Parse for Memo {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let key = state.fingerprint(input);
        if let Some(cached) = state.memo_mut().get(self.id, key) {
            let position = state.position(input);
            state.record(
                self.id,
                position,
                TraceEvent::MemoHit {
                    matched: cached.is_some(),
                },
            );
            return cached;
        }

        let outcome = self.inner.apply(input, state);
        state.memo_mut().insert(self.id, key, outcome.clone());
        outcome
    }
}

/// Memoizes `inner` under `id`.
///
/// Every combinator memoized under the same id must parse the same language;
/// the cache cannot tell them apart.
#[must_use]
pub fn memo(id: RuleId, inner: Combinator) -> Combinator {
    Combinator::new(Memo { id, inner })
}

//! Rule-application tracing.
//!
//! When enabled for an evaluation, every named rule application and every
//! memo hit is recorded in a bounded ring buffer. Nothing is recorded when
//! tracing is off.
//!
//! # Example
//!
//! ```text
//! > additive @0
//!   > multiplicative @0
//!   < multiplicative @0 matched 1
//!   = multiplicative @2 (memo, matched)
//! < additive @0 matched 5
//! ```

use std::collections::VecDeque;
use std::fmt::Write;

use packrat_foundation::{Interner, RuleId};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10_000,
        }
    }
}

impl TracerConfig {
    /// Creates an enabled configuration with the default buffer size.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Sets the buffer size.
    #[must_use]
    pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

// =============================================================================
// Records
// =============================================================================

/// Events that can be traced during evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A named rule is about to be applied.
    Enter,
    /// A named rule application finished.
    Exit {
        /// Whether the rule matched.
        matched: bool,
        /// Tokens consumed on a match.
        consumed: usize,
    },
    /// A memoized rule answered from the cache.
    MemoHit {
        /// Whether the cached outcome was a match.
        matched: bool,
    },
}

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Monotonic record id.
    pub id: u64,
    /// The rule the event concerns.
    pub rule: RuleId,
    /// Token index the rule was applied at.
    pub position: usize,
    /// Application-stack depth when the event was recorded.
    pub depth: usize,
    /// What happened.
    pub event: TraceEvent,
}

// =============================================================================
// Trace Buffer
// =============================================================================

/// A ring buffer for storing trace records.
///
/// Maintains a fixed maximum size, discarding oldest records when full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    /// The records, oldest first.
    records: VecDeque<TraceRecord>,
    /// Maximum number of records to store.
    max_size: usize,
    /// Next record ID to assign.
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a new trace buffer with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Pushes a new event to the buffer.
    ///
    /// Returns the assigned record ID.
    pub fn push(&mut self, rule: RuleId, position: usize, depth: usize, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.records.push_back(TraceRecord {
            id,
            rule,
            position,
            depth,
            event,
        });

        while self.records.len() > self.max_size {
            self.records.pop_front();
        }

        id
    }

    /// Returns the number of records in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records ever pushed, including evicted ones.
    #[must_use]
    pub const fn total_recorded(&self) -> u64 {
        self.next_id
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// Returns records concerning one rule.
    #[must_use]
    pub fn records_for_rule(&self, rule: RuleId) -> Vec<&TraceRecord> {
        self.records.iter().filter(|r| r.rule == rule).collect()
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord, interner: &Interner) -> String;

    /// Formats every record in a buffer, one per line.
    fn format_buffer(&self, buffer: &TraceBuffer, interner: &Interner) -> String {
        buffer
            .iter()
            .map(|r| self.format(r, interner))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Formats trace records as an indented call outline.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord, interner: &Interner) -> String {
        let mut line = String::new();
        if self.show_ids {
            let _ = write!(line, "[{:06}] ", record.id);
        }

        // Enter is recorded before the frame is pushed, exit after it is popped.
        line.push_str(&"  ".repeat(record.depth));

        let name = interner.get_rule(record.rule).unwrap_or("?");
        let at = record.position;
        let _ = match record.event {
            TraceEvent::Enter => write!(line, "> {name} @{at}"),
            TraceEvent::Exit {
                matched: true,
                consumed,
            } => write!(line, "< {name} @{at} matched {consumed}"),
            TraceEvent::Exit { matched: false, .. } => write!(line, "< {name} @{at} failed"),
            TraceEvent::MemoHit { matched } => {
                let outcome = if matched { "matched" } else { "failed" };
                write!(line, "= {name} @{at} (memo, {outcome})")
            }
        };
        line
    }
}

//! Integration tests for memoization and tracing
//!
//! Tests memo counters, trace records, and trace formatting across whole
//! evaluations.

use packrat_engine::{
    EvalConfig, Evaluator, Grammar, HumanFormatter, LexicalProfile, TraceEvent, TraceFormatter,
    TracerConfig, literal, ordered_choice, production, scan, sequence,
};
use packrat_foundation::Result;

// =============================================================================
// Helper Functions
// =============================================================================

/// Two alternatives that both start with `item`, so the second one reuses
/// the first one's work.
fn backtracking() -> Result<Grammar> {
    let g = Grammar::new();
    g.define(
        "top",
        ordered_choice([
            production("call", [g.memo("item"), literal("!")]),
            production("plain", [g.memo("item")]),
        ]),
    )?;
    g.define("item", sequence([literal("a"), literal("b")]))?;
    Ok(g)
}

fn traced() -> Evaluator {
    Evaluator::new(EvalConfig::default().with_tracer(TracerConfig::enabled()))
}

// =============================================================================
// Memo Counters
// =============================================================================

#[test]
fn backtracking_reuses_cached_outcomes() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();

    let eval = Evaluator::default().run(&top, &tokens);
    let stats = eval.stats;
    let nodes = eval.into_complete().unwrap();

    assert_eq!(nodes[0].to_string(), "(plain a b)");
    assert_eq!(stats.hits, 1);
    // `top` and `item` at position zero.
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entries, 2);
    assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn every_evaluation_starts_cold() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();
    let evaluator = Evaluator::default();

    let first = evaluator.run(&top, &tokens).stats;
    let second = evaluator.run(&top, &tokens).stats;
    assert_eq!(first, second);
}

#[test]
fn failures_are_cached_too() {
    let g = Grammar::new();
    g.define(
        "top",
        ordered_choice([
            sequence([g.memo("x"), literal("y")]),
            sequence([g.memo("x"), literal("z")]),
            literal("q"),
        ]),
    )
    .unwrap();
    g.define("x", literal("x")).unwrap();

    let top = g.entry("top").unwrap();
    let tokens = scan("q", &LexicalProfile::empty()).unwrap();
    let eval = Evaluator::default().run(&top, &tokens);
    assert!(eval.is_match());
    assert_eq!(eval.stats.hits, 1);
}

// =============================================================================
// Tracing
// =============================================================================

#[test]
fn tracing_is_off_by_default() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();
    assert!(Evaluator::default().run(&top, &tokens).trace.is_none());
}

#[test]
fn trace_records_rule_applications() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();

    let trace = traced().run(&top, &tokens).trace.unwrap();
    let item = g.lookup("item").unwrap();
    let events: Vec<_> = trace
        .records_for_rule(item)
        .iter()
        .map(|r| r.event)
        .collect();

    assert_eq!(
        events,
        vec![
            TraceEvent::Enter,
            TraceEvent::Exit {
                matched: true,
                consumed: 2
            },
            TraceEvent::MemoHit { matched: true },
        ]
    );
}

#[test]
fn trace_depth_follows_nesting() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();

    let trace = traced().run(&top, &tokens).trace.unwrap();
    let top_id = g.lookup("top").unwrap();
    let item = g.lookup("item").unwrap();

    assert!(trace.records_for_rule(top_id).iter().all(|r| r.depth == 0));
    assert!(trace.records_for_rule(item).iter().all(|r| r.depth == 1));
}

#[test]
fn human_formatter_outlines_the_trace() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();

    let trace = traced().run(&top, &tokens).trace.unwrap();
    let text = HumanFormatter::new().format_buffer(&trace, &g.interner());
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "> top @0",
            "  > item @0",
            "  < item @0 matched 2",
            "  = item @0 (memo, matched)",
            "< top @0 matched 2",
        ]
    );
}

#[test]
fn small_buffers_keep_the_latest_records() {
    let g = backtracking().unwrap();
    let top = g.entry("top").unwrap();
    let tokens = scan("a b", &LexicalProfile::empty()).unwrap();

    let config = TracerConfig {
        enabled: true,
        buffer_size: 2,
    };
    let trace = Evaluator::new(EvalConfig::default().with_tracer(config))
        .run(&top, &tokens)
        .trace
        .unwrap();

    assert_eq!(trace.len(), 2);
    let last = trace.iter().last().unwrap();
    assert_eq!(
        last.event,
        TraceEvent::Exit {
            matched: true,
            consumed: 2
        }
    );
}

//! Integration tests for Error types
//!
//! Tests error construction, display, context, and classification.

use packrat_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn scan_errors_carry_offsets() {
    for (err, offset) in [
        (Error::unterminated_string(3), 3),
        (Error::unterminated_character(9), 9),
        (Error::unterminated_comment(0), 0),
    ] {
        assert!(err.is_scan_error());
        assert!(format!("{err}").contains(&format!("offset {offset}")));
    }
}

#[test]
fn grammar_errors_name_the_rule() {
    let err = Error::duplicate_rule("additive");
    assert!(matches!(err.kind, ErrorKind::DuplicateRule(ref name) if name == "additive"));
    assert!(!err.is_scan_error());

    let err = Error::undefined_rule("primary");
    assert!(format!("{err}").contains("primary"));
}

#[test]
fn incomplete_reports_position_and_count() {
    let err = Error::incomplete(14, 2);
    assert!(matches!(
        err.kind,
        ErrorKind::Incomplete {
            offset: 14,
            remaining: 2
        }
    ));
    let msg = format!("{err}");
    assert!(msg.contains("14"));
    assert!(msg.contains('2'));
}

#[test]
fn shape_errors_name_label_and_problem() {
    let err = Error::unexpected_shape("limit", "expected 3 children, found 1");
    let msg = format!("{err}");
    assert!(msg.contains("limit"));
    assert!(msg.contains("expected 3 children"));
}

#[test]
fn no_match_is_not_a_scan_error() {
    let err = Error::no_match();
    assert!(matches!(err.kind, ErrorKind::NoMatch));
    assert!(!err.is_scan_error());
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_attached() {
    let context = ErrorContext::new()
        .with_source("query.sx")
        .with_position(3, 7)
        .with_frame("select")
        .with_frame("where");
    let err = Error::no_match().with_context(context);

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.stack, vec!["select", "where"]);
    let shown = context.to_string();
    assert!(shown.starts_with("at query.sx:3:7"));
    assert!(shown.contains("  in where"));
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::new(ErrorKind::Internal("boom".to_string())));
}

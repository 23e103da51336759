//! Integration tests for language selection and configured parsing

use packrat_engine::{EvalConfig, Evaluator, TracerConfig};
use packrat_foundation::ErrorKind;
use packrat_grammars::Language;

#[test]
fn languages_parse_from_names() {
    assert_eq!("calc".parse::<Language>().unwrap(), Language::Calc);
    assert_eq!("Sexp".parse::<Language>().unwrap(), Language::Sexp);
    let err = "yaml".parse::<Language>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownGrammar(_)));
}

#[test]
fn one_parser_serves_many_sources() {
    let parser = Language::Query.parser().unwrap();
    for table in ["a", "b", "c"] {
        let nodes = parser.parse(&format!("(SELECT (FROM {table}) x)")).unwrap();
        assert_eq!(nodes.len(), 1);
    }
}

#[test]
fn parse_with_reports_memo_activity() {
    let parser = Language::Calc.parser().unwrap();
    let parsed = parser.parse_with("2+3*num", &Evaluator::default()).unwrap();
    assert_eq!(parsed.nodes.unwrap().len(), 1);
    assert!(parsed.stats.hits > 0);
    assert!(parsed.stats.entries > 0);
}

#[test]
fn parse_with_formats_the_trace() {
    let parser = Language::Sexp.parser().unwrap();
    let evaluator = Evaluator::new(EvalConfig::default().with_tracer(TracerConfig::enabled()));
    let parsed = parser.parse_with("(a)", &evaluator).unwrap();

    let trace = parsed.trace.unwrap();
    let lines: Vec<_> = trace.lines().collect();
    assert_eq!(lines.first(), Some(&"> data @0"));
    assert_eq!(lines.last(), Some(&"< data @0 matched 3"));
    assert!(lines.iter().any(|l| l.trim_start().starts_with("> list @0")));
}

#[test]
fn failed_parses_keep_their_trace() {
    let parser = Language::Query.parser().unwrap();
    let evaluator = Evaluator::new(EvalConfig::default().with_tracer(TracerConfig::enabled()));
    let parsed = parser.parse_with("(SELECT x)", &evaluator).unwrap();
    assert!(matches!(
        parsed.nodes.unwrap_err().kind,
        ErrorKind::NoMatch
    ));
    assert!(parsed.trace.unwrap().contains("failed"));
}

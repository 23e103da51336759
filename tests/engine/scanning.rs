//! Integration tests for the tokenizer
//!
//! Tests profile-driven scanning and scan errors.

use packrat_engine::{Category, LexicalProfile, Span, scan};
use packrat_foundation::ErrorKind;

fn texts(source: &str, profile: &LexicalProfile) -> Vec<String> {
    scan(source, profile)
        .unwrap()
        .iter()
        .map(|t| t.text.clone())
        .collect()
}

// =============================================================================
// Plain Tokens
// =============================================================================

#[test]
fn operators_split_an_arithmetic_expression() {
    let profile = LexicalProfile::empty().with_operators(["+", "-", "*", "/"]);
    let tokens = scan("2+3*num", &profile).unwrap();

    assert_eq!(tokens.len(), 5);
    assert!(tokens.iter().all(|t| t.category == Category::Token));
    assert_eq!(texts("2+3*num", &profile), vec!["2", "+", "3", "*", "num"]);
    assert_eq!(tokens[0].span, Span::new(0, 1));
    assert_eq!(tokens[1].span, Span::new(1, 2));
}

#[test]
fn whitespace_only_yields_nothing() {
    assert!(scan("", &LexicalProfile::lisp()).unwrap().is_empty());
    assert!(scan(" \n\t ", &LexicalProfile::lisp()).unwrap().is_empty());
}

#[test]
fn delimiters_stand_alone() {
    assert_eq!(
        texts("(WHERE (FROM t) cond)", &LexicalProfile::lisp()),
        vec!["(", "WHERE", "(", "FROM", "t", ")", "cond", ")"]
    );
}

#[test]
fn spans_increase_through_the_source() {
    let tokens = scan("(a \"b\" ; c\n #\\d)", &LexicalProfile::lisp()).unwrap();
    for pair in tokens.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
}

// =============================================================================
// Literals and Comments
// =============================================================================

#[test]
fn strings_drop_their_quotes() {
    let tokens = scan("x \"hello world\"", &LexicalProfile::lisp()).unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens[1].is_str());
    assert_eq!(tokens[1].text, "hello world");
    assert_eq!(tokens[1].span, Span::new(2, 15));
}

#[test]
fn characters_keep_one_character() {
    let tokens = scan("#\\a ?\\b", &LexicalProfile::lisp()).unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.is_character()));
    assert_eq!(tokens[0].text, "a");
    assert_eq!(tokens[1].text, "b");
}

#[test]
fn comments_are_kept_as_tokens() {
    let tokens = scan("a ; one\n#| two |# b", &LexicalProfile::lisp()).unwrap();
    let comments: Vec<_> = tokens.iter().filter(|t| t.is_comment()).collect();
    assert_eq!(comments.len(), 2);
    assert_eq!(tokens.last().unwrap().text, "b");
}

#[test]
fn significant_whitespace_becomes_newlines() {
    let profile = LexicalProfile::empty()
        .with_whitespace([' '])
        .with_significant_whitespace(["\n"]);
    let tokens = scan("a\nb", &profile).unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(tokens[1].is_newline());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unterminated_forms_are_fatal() {
    let err = scan("(a \"open", &LexicalProfile::lisp()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnterminatedString { offset: 3 }));

    let err = scan("#| never closed", &LexicalProfile::lisp()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnterminatedComment { offset: 0 }));

    let err = scan("x #\\", &LexicalProfile::lisp()).unwrap_err();
    assert!(err.is_scan_error());
}

//! Integration tests for the expression grammar

use packrat_foundation::ErrorKind;
use packrat_grammars::calc;

fn parse_one(source: &str) -> String {
    let nodes = calc::parse(source).unwrap();
    assert_eq!(nodes.len(), 1, "expected one expression in {source:?}");
    nodes[0].to_string()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(
        parse_one("2+3*num"),
        "(additive (int 2) + (multiplicative (int 3) * num))"
    );
    assert_eq!(
        parse_one("(2+3)*num"),
        "(multiplicative (expression (additive (int 2) + (int 3))) * num)"
    );
}

#[test]
fn comparison_below_arithmetic() {
    assert_eq!(
        parse_one("a + 1 >= b % 2"),
        "(relational (additive a + (int 1)) >= (multiplicative b % (int 2)))"
    );
}

#[test]
fn every_binary_level_nests_left() {
    assert_eq!(parse_one("a && b && c"), "(logical-and (logical-and a && b) && c)");
    assert_eq!(parse_one("a ^ b ^ c"), "(bitwise-xor (bitwise-xor a ^ b) ^ c)");
}

#[test]
fn conditional_needs_both_branches() {
    assert_eq!(
        parse_one("x > 0 ? x : -x"),
        "(conditional-expression (relational x > (int 0)) x (prefix - x))"
    );
    assert!(calc::parse("x ? y").is_err());
}

#[test]
fn literals() {
    assert_eq!(parse_one("false"), "(bool false)");
    assert_eq!(parse_one("3.25"), "(float 3.25)");
    assert_eq!(parse_one("'q'"), "\"q\"");
}

#[test]
fn sequences_of_expressions() {
    let nodes = calc::parse("1\n2 + 3\nx").unwrap();
    assert_eq!(nodes.len(), 3);
    assert!(nodes[1].is("additive"));
}

#[test]
fn leftovers_are_reported_with_their_offset() {
    let err = calc::parse("1 + 2 )").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Incomplete {
            offset: 6,
            remaining: 1
        }
    ));
}

#[test]
fn unterminated_string_is_a_scan_error() {
    let err = calc::parse("\"abc").unwrap_err();
    assert!(err.is_scan_error());
}

//! Integration tests for the query grammar

use packrat_grammars::query;

fn parse_one(source: &str) -> String {
    let nodes = query::parse(source).unwrap();
    assert_eq!(nodes.len(), 1);
    nodes[0].to_string()
}

#[test]
fn clauses_nest_innermost_first() {
    assert_eq!(
        parse_one("(SELECT (LIMIT (WHERE (FROM t) (> a 1)) 0 5) a)"),
        "(select (limit (where (from t) (func > a 1)) 0 5) a)"
    );
}

#[test]
fn fields_aliases_and_calls() {
    assert_eq!(
        parse_one("(SELECT (FROM (AS users u)) (AS (. u name) n) (count id) 'x')"),
        "(select (from (as users u)) (as (field u name) n) (func count id) \"x\")"
    );
}

#[test]
fn ordering_keys() {
    assert_eq!(
        parse_one("(SELECT (ORDER (FROM t) (DESC a) (AES b) c) a)"),
        "(select (order (from t) (desc a) (aes b) c) a)"
    );
}

#[test]
fn joins_take_several_tables() {
    let nodes = query::parse("(SELECT (ON (JOIN (FROM a) b c) (= x y)) x)").unwrap();
    let join = nodes[0]
        .descendants()
        .find(|n| n.is("join"))
        .unwrap();
    assert_eq!(join.children.len(), 3);
}

#[test]
fn subqueries_are_expressions() {
    let nodes =
        query::parse("(SELECT (WHERE (FROM a) (in id (SELECT (FROM b) id))) id)").unwrap();
    assert_eq!(nodes[0].descendants().filter(|n| n.is("select")).count(), 2);
}

#[test]
fn several_queries() {
    let nodes = query::parse("(SELECT (FROM a) x)\n(SELECT (FROM b) y)").unwrap();
    assert_eq!(nodes.len(), 2);
}

#[test]
fn malformed_queries() {
    // No projection.
    assert!(query::parse("(SELECT (FROM t))").is_err());
    // A bare table is not a source.
    assert!(query::parse("(SELECT t a)").is_err());
    // LIMIT takes exactly an offset and a count.
    assert!(query::parse("(SELECT (LIMIT (FROM t) 1) a)").is_err());
    // Keywords cannot be called.
    assert!(query::parse("(SELECT (FROM t) (WHERE a))").is_err());
}

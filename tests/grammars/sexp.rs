//! Integration tests for the s-expression grammar

use packrat_grammars::sexp;

fn show(source: &str) -> Vec<String> {
    sexp::parse(source)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn nested_brackets() {
    assert_eq!(
        show("(define (f x) [x {y}])"),
        vec!["(list define (list f x) (vector x (braces y)))"]
    );
}

#[test]
fn quote_forms() {
    assert_eq!(
        show("'a `(b ,c)"),
        vec!["(quote a)", "(quasiquote (list b (unquote c)))"]
    );
}

#[test]
fn comments_between_data_vanish() {
    assert_eq!(
        show(";; header\n(a ; note\n #| block |# b)\n; trailer"),
        vec!["(list a b)"]
    );
}

#[test]
fn atoms_of_every_kind() {
    assert_eq!(
        show("sym 42 \"text\" #\\x"),
        vec!["sym", "42", "\"text\"", "#\\x"]
    );
}

#[test]
fn the_query_example_is_a_valid_sexp() {
    let source = "(SELECT (LIMIT (ORDER (FROM t) (DESC (. t id))) 0 10) (AS (. t id) k))";
    let nodes = sexp::parse(source).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].descendants().filter(|n| n.is("list")).count(), 8);
}

#[test]
fn deep_nesting() {
    let depth = 100;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let nodes = sexp::parse(&source).unwrap();
    assert_eq!(nodes[0].descendants().filter(|n| n.is("list")).count(), depth);
}

#[test]
fn unbalanced_input_is_rejected() {
    assert!(sexp::parse("(a (b)").is_err());
    assert!(sexp::parse("a ]").is_err());
    assert!(sexp::parse("#| open").is_err());
}

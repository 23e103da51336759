//! Integration tests for tree outlines and SQL output

use packrat_grammars::{
    TreeConfig, calc, render_sql, render_tree_with_config, render_trees, sexp, to_sql,
};

// =============================================================================
// Outlines
// =============================================================================

#[test]
fn outline_of_an_arithmetic_expression() {
    let nodes = calc::parse("2+3*num").unwrap();
    let config = TreeConfig::default().with_spans();
    assert_eq!(
        render_tree_with_config(&nodes[0], &config),
        "additive @0..7\n  int @0..1\n    2 @0..1\n  + @1..2\n  multiplicative @2..7\n    int @2..3\n      3 @2..3\n    * @3..4\n    num @4..7"
    );
}

#[test]
fn outlines_of_several_trees() {
    let nodes = sexp::parse("(a) b").unwrap();
    let config = TreeConfig::default().with_indent_width(1);
    assert_eq!(
        render_trees(nodes.iter().map(AsRef::as_ref), &config),
        "list\n a\n\nb"
    );
}

// =============================================================================
// SQL
// =============================================================================

const FULL_QUERY: &str = "
(SELECT
    (LIMIT
        (ORDER
            (HAVING
                (GROUP
                    (WHERE
                       (ON (JOIN (FROM (AS tableA a))
                                 (AS tableB b))
                           (= (. a filedA) (. b filedB)))
                       (= (. a filedA) (. b filedB))
                       (!= (. a filedB) (. b filedA)))
                    (. a b))
                (> (. a b) 10))
            (DESC (. a user_id))
            (AES (. b id)))
        10 100)

    (AS (. a filedA) hello)
    (AS (. b filedB) world)
    (groupArray user_id)
    (distinct id)
    10
)
";

const SUBQUERY: &str = "
(SELECT
    (WHERE
       (FROM (AS tableA a))
       (in (. a filedA)
           (SELECT (WHERE (FROM tableB)
                          (> id 10))
                   (. b user_id)))
       (!= (. a filedB) (. b filedA)))

    (AS (. a filedA) hello)
    (AS (. b filedB) world)
    (groupArray user_id)
    (distinct id)
    10
)
";

#[test]
fn every_clause_in_one_query() {
    assert_eq!(
        to_sql(FULL_QUERY).unwrap(),
        vec![
            "(SELECT a.filedA AS hello, b.filedB AS world, groupArray(user_id), distinct(id), 10 \
             FROM tableA AS a JOIN tableB AS b ON a.filedA = b.filedB \
             WHERE a.filedA = b.filedB AND a.filedB != b.filedA \
             GROUP BY a.b HAVING a.b > 10 \
             ORDER BY a.user_id DESC, b.id AES OFFSET 10 LIMIT 100)"
        ]
    );
}

#[test]
fn subquery_in_a_condition() {
    assert_eq!(
        to_sql(SUBQUERY).unwrap(),
        vec![
            "(SELECT a.filedA AS hello, b.filedB AS world, groupArray(user_id), distinct(id), 10 \
             FROM tableA AS a \
             WHERE a.filedA in (SELECT b.user_id FROM tableB WHERE id > 10) \
             AND a.filedB != b.filedA)"
        ]
    );
}

#[test]
fn string_literals_are_quoted() {
    assert_eq!(
        to_sql("(SELECT (WHERE (FROM t) (= name \"it's\")) id)").unwrap(),
        vec!["(SELECT id FROM t WHERE name = 'it''s')"]
    );
}

#[test]
fn non_query_trees_have_no_sql() {
    let nodes = sexp::parse("(a b)").unwrap();
    assert!(render_sql(&nodes[0]).is_err());
}

#[test]
fn parse_errors_surface_from_to_sql() {
    assert!(to_sql("(SELECT (FROM t)").is_err());
}

//! Bracketed relational queries.
//!
//! A query is a `SELECT` over a chain of nested clauses, innermost first:
//!
//! ```text
//! (SELECT
//!   (LIMIT
//!     (ORDER
//!       (WHERE (FROM (AS users u)) (> (. u age) 18))
//!       (DESC (. u age)))
//!     0 10)
//!   (. u name))
//! ```
//!
//! Every clause takes the clause it refines as its first child:
//!
//! | Form | Node | Children |
//! |---|---|---|
//! | `(FROM table)` | `from` | table |
//! | `(JOIN source table+)` | `join` | source, tables |
//! | `(ON source expr+)` | `on` | source, conditions |
//! | `(WHERE source expr+)` | `where` | source, conditions |
//! | `(GROUP source expr+)` | `group` | source, keys |
//! | `(HAVING source expr+)` | `having` | source, conditions |
//! | `(ORDER source key+)` | `order` | source, `desc`/`aes`/expr keys |
//! | `(LIMIT source offset count)` | `limit` | source, offset, count |
//! | `(SELECT source projection+)` | `select` | source, projections |
//!
//! Expressions are field accesses `(. table column)` (`field`), aliases
//! `(AS expr name)` (`as`), calls `(f arg*)` (`func`), nested selects,
//! strings, and bare tokens.

use packrat_engine::{
    Category, Combinator, Grammar, LexicalProfile, NodeRef, kind, one_or_more, ordered_choice,
    predicate, production, skip, skip_phantom, zero_or_more,
};
use packrat_foundation::Result;

/// Name of the entry rule.
pub const TOP: &str = "queries";

/// Clause keywords. None of them can name a function.
pub const KEYWORDS: [&str; 12] = [
    "SELECT", "FROM", "AS", "JOIN", "ON", "WHERE", "GROUP", "HAVING", "ORDER", "LIMIT", "DESC",
    "AES",
];

/// Clauses that can be the source of another clause, outermost first.
const SOURCES: [&str; 8] = [
    "limit", "order", "having", "group", "where", "on", "join", "from",
];

/// Returns the tokenizer configuration for queries: round brackets only,
/// so `'` quotes strings.
#[must_use]
pub fn profile() -> LexicalProfile {
    LexicalProfile::lisp().with_delimiters(["(", ")"])
}

fn is_bracket(text: &str) -> bool {
    text == "(" || text == ")"
}

/// `( KEYWORD items... )`, with the brackets and keyword left out.
fn clause(label: &str, keyword: &str, items: impl IntoIterator<Item = Combinator>) -> Combinator {
    let mut body = vec![skip_phantom("("), skip(keyword)];
    body.extend(items);
    body.push(skip_phantom(")"));
    production(label, body)
}

/// Builds the query grammar.
///
/// # Errors
///
/// Returns an error only if the rule table is inconsistent, which would be
/// a bug in this module.
pub fn grammar() -> Result<Grammar> {
    let g = Grammar::new();
    let expr = || g.memo("expr");
    let source = || g.memo("source");

    g.define(TOP, one_or_more(g.memo("select")))?;

    g.define(
        "select",
        clause(
            "select",
            "SELECT",
            [source(), one_or_more(ordered_choice([g.memo("as"), expr()]))],
        ),
    )?;

    g.define(
        "source",
        ordered_choice(SOURCES.iter().map(|name| g.memo(name))),
    )?;

    let table = ordered_choice([g.memo("as"), g.memo("select"), g.memo("atom")]);

    g.define("from", clause("from", "FROM", [table.clone()]))?;
    g.define("join", clause("join", "JOIN", [source(), one_or_more(table)]))?;
    for (label, keyword) in [
        ("on", "ON"),
        ("where", "WHERE"),
        ("group", "GROUP"),
        ("having", "HAVING"),
    ] {
        g.define(label, clause(label, keyword, [source(), one_or_more(expr())]))?;
    }
    g.define(
        "order",
        clause(
            "order",
            "ORDER",
            [
                source(),
                one_or_more(ordered_choice([g.memo("desc"), g.memo("aes"), expr()])),
            ],
        ),
    )?;
    g.define("desc", clause("desc", "DESC", [expr()]))?;
    g.define("aes", clause("aes", "AES", [expr()]))?;
    g.define("limit", clause("limit", "LIMIT", [source(), expr(), expr()]))?;

    g.define("as", clause("as", "AS", [expr(), g.memo("atom")]))?;

    g.define(
        "expr",
        ordered_choice([
            g.memo("select"),
            g.memo("field"),
            g.memo("func"),
            g.memo("atom"),
        ]),
    )?;

    g.define(
        "field",
        production(
            "field",
            [skip_phantom("("), skip("."), expr(), expr(), skip_phantom(")")],
        ),
    )?;

    g.define(
        "func",
        production(
            "func",
            [
                skip_phantom("("),
                predicate(|n| {
                    n.is_token()
                        && !is_bracket(&n.text)
                        && n.text != "."
                        && !KEYWORDS.contains(&n.text.as_str())
                }),
                zero_or_more(expr()),
                skip_phantom(")"),
            ],
        ),
    )?;

    g.define(
        "atom",
        ordered_choice([
            kind(Category::Str),
            predicate(|n| n.is_token() && !is_bracket(&n.text)),
        ]),
    )?;

    Ok(g)
}

/// Parses every query in `source`.
///
/// # Errors
///
/// Returns an error if `source` does not scan or is not a sequence of
/// well-formed `SELECT` forms.
pub fn parse(source: &str) -> Result<Vec<NodeRef>> {
    crate::Language::Query.parser()?.parse(source)
}

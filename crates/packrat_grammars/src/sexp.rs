//! Generic s-expressions over the Lisp profile.
//!
//! Produces `list`, `vector` and `braces` nodes for `( )`, `[ ]` and `{ }`,
//! and `quote`, `quasiquote` and `unquote` nodes for `'x`, `` `x `` and
//! `,x`. Atoms are left as their tokens. Comments are dropped.

use packrat_engine::{
    Category, Combinator, Grammar, LexicalProfile, NodeRef, discard, kind, ordered_choice,
    predicate, production, skip_phantom, zero_or_more,
};
use packrat_foundation::Result;

/// Name of the entry rule.
pub const TOP: &str = "data";

const BRACKETS: [(&str, &str, &str); 3] = [
    ("list", "(", ")"),
    ("vector", "[", "]"),
    ("braces", "{", "}"),
];

const PREFIXES: [(&str, &str); 3] = [("quote", "'"), ("quasiquote", "`"), ("unquote", ",")];

/// Returns the tokenizer configuration for s-expressions.
#[must_use]
pub fn profile() -> LexicalProfile {
    LexicalProfile::lisp()
}

/// Strings, characters, and plain tokens other than delimiters.
fn atom(delimiters: Vec<String>) -> Combinator {
    predicate(move |n| match n.category {
        Category::Str | Category::Character => true,
        Category::Token => !delimiters.contains(&n.text),
        _ => false,
    })
}

/// Any number of data, skipping comments between them.
fn data(g: &Grammar) -> Combinator {
    zero_or_more(ordered_choice([discard(kind(Category::Comment)), g.memo("datum")]))
}

/// Builds the s-expression grammar.
///
/// # Errors
///
/// Returns an error only if the rule table is inconsistent, which would be
/// a bug in this module.
pub fn grammar() -> Result<Grammar> {
    let g = Grammar::new();

    g.define(TOP, data(&g))?;

    let mut forms: Vec<Combinator> = BRACKETS
        .iter()
        .map(|(label, _, _)| g.memo(label))
        .chain(PREFIXES.iter().map(|(label, _)| g.memo(label)))
        .collect();
    forms.push(atom(profile().delimiters().to_vec()));
    g.define("datum", ordered_choice(forms))?;

    for (label, open, close) in BRACKETS {
        g.define(
            label,
            production(label, [skip_phantom(open), data(&g), skip_phantom(close)]),
        )?;
    }

    for (label, mark) in PREFIXES {
        // Comments may sit between the mark and its datum.
        g.define(
            label,
            production(
                label,
                [
                    skip_phantom(mark),
                    zero_or_more(discard(kind(Category::Comment))),
                    g.memo("datum"),
                ],
            ),
        )?;
    }

    Ok(g)
}

/// Parses every datum in `source`.
///
/// # Errors
///
/// Returns an error if `source` does not scan or holds an unbalanced or
/// stray closing bracket.
pub fn parse(source: &str) -> Result<Vec<NodeRef>> {
    crate::Language::Sexp.parser()?.parse(source)
}

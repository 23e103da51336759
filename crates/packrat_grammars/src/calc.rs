//! C-like arithmetic and logical expressions.
//!
//! Precedence, loosest first:
//!
//! | Rule | Operators | Shape |
//! |---|---|---|
//! | `conditional-expression` | `? :` | `(conditional-expression cond then else)` |
//! | `logical-or` | `\|\|` | left |
//! | `logical-and` | `&&` | left |
//! | `bitwise-or` | `\|` | left |
//! | `bitwise-xor` | `^` | left |
//! | `bitwise-and` | `&` | left |
//! | `equality` | `== !=` | left |
//! | `relational` | `< <= > >=` | left |
//! | `bitwise-shift` | `<< >>` | left |
//! | `additive` | `+ -` | left |
//! | `multiplicative` | `* / %` | left |
//! | `prefix` | `++ -- + - ~ !` | nested right |
//! | `postfix` | `++ --` | nested left |
//!
//! Primaries are literals (`bool`, `int`, `float`, strings), identifiers,
//! and parenthesised `expression`s. A source may hold several expressions
//! one after another.

use packrat_engine::{
    Category, Combinator, Grammar, LexicalProfile, NodeRef, infix_left, kind, literal,
    ordered_choice, postfix, predicate, prefix, production, skip_phantom, zero_or_more,
};
use packrat_foundation::Result;

/// Name of the entry rule.
pub const TOP: &str = "program";

/// Binary levels, loosest first: rule name, operators, next tighter rule.
const BINARY_LEVELS: [(&str, &[&str], &str); 10] = [
    ("logical-or", &["||"], "logical-and"),
    ("logical-and", &["&&"], "bitwise-or"),
    ("bitwise-or", &["|"], "bitwise-xor"),
    ("bitwise-xor", &["^"], "bitwise-and"),
    ("bitwise-and", &["&"], "equality"),
    ("equality", &["==", "!="], "relational"),
    ("relational", &["<=", ">=", "<", ">"], "bitwise-shift"),
    ("bitwise-shift", &["<<", ">>"], "additive"),
    ("additive", &["+", "-"], "multiplicative"),
    ("multiplicative", &["*", "/", "%"], "prefix"),
];

/// Returns the tokenizer configuration for expressions.
#[must_use]
pub fn profile() -> LexicalProfile {
    LexicalProfile::empty()
        .with_delimiters(["(", ")", "[", "]"])
        .with_operators([
            "==", "!=", ">=", "<=", "&&", "||", ">>", "<<", "++", "--", "+", "-", "*", "/", "%",
            "~", "!", ":", "?", ">", "<", "|", "^", "&",
        ])
        .with_quotation_marks(["\"", "'"])
}

fn one_of(ops: &[&str]) -> Combinator {
    ordered_choice(ops.iter().map(|op| literal(op)))
}

fn is_numeral(node: &packrat_engine::Node) -> bool {
    node.is_token() && node.text.starts_with(|c: char| c.is_ascii_digit())
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builds the expression grammar.
///
/// # Errors
///
/// Returns an error only if the rule table is inconsistent, which would be
/// a bug in this module.
pub fn grammar() -> Result<Grammar> {
    let g = Grammar::new();

    g.define(
        TOP,
        zero_or_more(g.memo("conditional-expression")),
    )?;

    g.define(
        "conditional-expression",
        ordered_choice([
            production(
                "conditional-expression",
                [
                    g.memo("logical-or"),
                    skip_phantom("?"),
                    g.memo("conditional-expression"),
                    skip_phantom(":"),
                    g.memo("conditional-expression"),
                ],
            ),
            g.memo("logical-or"),
        ]),
    )?;

    for (name, ops, tighter) in BINARY_LEVELS {
        g.define(
            name,
            ordered_choice([
                infix_left(name, g.memo(tighter), one_of(ops)),
                g.memo(tighter),
            ]),
        )?;
    }

    g.define(
        "prefix",
        prefix(
            "prefix",
            g.memo("postfix"),
            one_of(&["++", "--", "+", "-", "~", "!"]),
        ),
    )?;

    g.define(
        "postfix",
        ordered_choice([
            postfix("postfix", g.memo("primary"), one_of(&["++", "--"])),
            g.memo("primary"),
        ]),
    )?;

    g.define(
        "primary",
        ordered_choice([
            g.rule("literal"),
            predicate(|n| n.is_token() && is_identifier(&n.text)),
            production(
                "expression",
                [
                    skip_phantom("("),
                    g.memo("conditional-expression"),
                    skip_phantom(")"),
                ],
            ),
        ]),
    )?;

    g.define(
        "literal",
        ordered_choice([
            production("bool", [one_of(&["true", "false"])]),
            kind(Category::Str),
            production(
                "int",
                [predicate(|n| is_numeral(n) && !n.text.contains('.'))],
            ),
            production(
                "float",
                [predicate(|n| is_numeral(n) && n.text.contains('.'))],
            ),
        ]),
    )?;

    Ok(g)
}

/// Parses every expression in `source`.
///
/// # Errors
///
/// Returns an error if `source` does not scan, or if tokens remain that do
/// not form an expression.
pub fn parse(source: &str) -> Result<Vec<NodeRef>> {
    crate::Language::Calc.parser()?.parse(source)
}

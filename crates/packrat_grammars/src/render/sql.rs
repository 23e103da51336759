//! SQL text from [`query`](crate::query) trees.
//!
//! Each clause renders its source first and appends its own keyword, so a
//! `(LIMIT (ORDER (WHERE (FROM t) c) k) 0 10)` chain reads left to right as
//! ` FROM t WHERE c ORDER BY k OFFSET 0 LIMIT 10`. `SELECT` wraps the result
//! in parentheses, which keeps subqueries well formed.
//!
//! # Example
//!
//! ```
//! use packrat_grammars::to_sql;
//!
//! let sql = to_sql("(SELECT (WHERE (FROM users) (> age 18)) name)").unwrap();
//! assert_eq!(sql, vec!["(SELECT name FROM users WHERE age > 18)"]);
//! ```

use packrat_engine::{Category, Node};
use packrat_foundation::{Error, Result};

/// Calls written between their arguments instead of as `f(args)`.
const INFIX: [&str; 14] = [
    "=", "==", ">", "<", "!=", "<=", ">=", "+", "-", "*", "/", "in", "and", "or",
];

/// Renders a query tree, or any node inside one, as SQL.
///
/// # Errors
///
/// Returns [`UnexpectedShape`](packrat_foundation::ErrorKind::UnexpectedShape)
/// for a label with no SQL form, a clause with the wrong number of children,
/// or a leaf that is neither a token nor a string.
pub fn render_sql(node: &Node) -> Result<String> {
    let Some(label) = node.label() else {
        return leaf(node);
    };
    let label = label.as_str();

    Ok(match label {
        "select" => {
            let (source, projections) = split(node, 2)?;
            format!("(SELECT {}{source})", projections.join(", "))
        }
        "from" => format!(" FROM {}", exactly::<1>(node)?[0]),
        "join" => joined(node, " JOIN ", ", ")?,
        "on" => joined(node, " ON ", " AND ")?,
        "where" => joined(node, " WHERE ", " AND ")?,
        "group" => joined(node, " GROUP BY ", ", ")?,
        "having" => joined(node, " HAVING ", " AND ")?,
        "order" => joined(node, " ORDER BY ", ", ")?,
        "limit" => {
            let [source, offset, count] = exactly::<3>(node)?;
            format!("{source} OFFSET {offset} LIMIT {count}")
        }
        "desc" => format!("{} DESC", exactly::<1>(node)?[0]),
        "aes" => format!("{} AES", exactly::<1>(node)?[0]),
        "as" => {
            let [value, alias] = exactly::<2>(node)?;
            format!("{value} AS {alias}")
        }
        "field" => {
            let [table, column] = exactly::<2>(node)?;
            format!("{table}.{column}")
        }
        "func" => call(node)?,
        _ => return Err(Error::unexpected_shape(label, "no SQL form")),
    })
}

/// Parses `source` as queries and renders each one.
///
/// # Errors
///
/// Returns a parse error, or a rendering error from [`render_sql`].
pub fn to_sql(source: &str) -> Result<Vec<String>> {
    crate::query::parse(source)?
        .iter()
        .map(|node| render_sql(node))
        .collect()
}

fn leaf(node: &Node) -> Result<String> {
    match node.category {
        Category::Token => Ok(node.text.clone()),
        Category::Str => Ok(format!("'{}'", node.text.replace('\'', "''"))),
        ref other => Err(Error::unexpected_shape(
            other.name(),
            "leaf has no SQL form",
        )),
    }
}

fn label_of(node: &Node) -> &str {
    node.label().map_or("?", |l| l.as_str())
}

fn children(node: &Node) -> Result<Vec<String>> {
    node.children.iter().map(|c| render_sql(c)).collect()
}

/// Renders a clause with a source and at least `min - 1` items.
fn split(node: &Node, min: usize) -> Result<(String, Vec<String>)> {
    if node.children.len() < min {
        return Err(Error::unexpected_shape(
            label_of(node),
            format!("expected at least {min} children, found {}", node.children.len()),
        ));
    }
    let mut rendered = children(node)?;
    let source = rendered.remove(0);
    Ok((source, rendered))
}

fn exactly<const N: usize>(node: &Node) -> Result<[String; N]> {
    let found = node.children.len();
    children(node)?.try_into().map_err(|_| {
        Error::unexpected_shape(
            label_of(node),
            format!("expected {N} children, found {found}"),
        )
    })
}

/// `source KEYWORD item sep item ...`
fn joined(node: &Node, keyword: &str, separator: &str) -> Result<String> {
    let (source, items) = split(node, 2)?;
    Ok(format!("{source}{keyword}{}", items.join(separator)))
}

fn is_infix_call(node: &Node) -> bool {
    node.is("func")
        && node
            .child(0)
            .is_some_and(|name| name.is_token() && INFIX.contains(&name.text.as_str()))
}

fn call(node: &Node) -> Result<String> {
    let Some(name) = node.child(0) else {
        return Err(Error::unexpected_shape("func", "missing function name"));
    };
    let name = render_sql(name)?;

    let args = node.children[1..]
        .iter()
        .map(|arg| {
            let text = render_sql(arg)?;
            // Nested operators keep their grouping.
            Ok(if is_infix_call(arg) {
                format!("({text})")
            } else {
                text
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if INFIX.contains(&name.as_str()) {
        Ok(args.join(&format!(" {name} ")))
    } else {
        Ok(format!("{name}({})", args.join(",")))
    }
}

//! Indented outlines of any parsed tree.
//!
//! Productions print their label and leaves their text, one node per line,
//! children indented under their parent:
//!
//! ```text
//! additive
//!   int
//!     2
//!   +
//!   multiplicative
//! ```
//!
//! The walk uses an explicit stack, so arbitrarily deep trees are fine.

use std::fmt::Write;

use packrat_engine::Node;

/// Configuration for outline rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of spaces per nesting level.
    pub indent_width: usize,
    /// Whether to append each node's byte range.
    pub show_spans: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_spans: false,
        }
    }
}

impl TreeConfig {
    /// Sets the indent width.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Appends `@start..end` to every line.
    #[must_use]
    pub fn with_spans(mut self) -> Self {
        self.show_spans = true;
        self
    }
}

/// Renders `node` with the default configuration.
#[must_use]
pub fn render_tree(node: &Node) -> String {
    render_tree_with_config(node, &TreeConfig::default())
}

/// Renders `node` with a custom configuration.
#[must_use]
pub fn render_tree_with_config(node: &Node, config: &TreeConfig) -> String {
    let mut out = String::new();
    let mut stack = vec![(node, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&" ".repeat(depth * config.indent_width));
        match node.label() {
            Some(label) => out.push_str(label.as_str()),
            None => {
                let _ = write!(out, "{node}");
            }
        }
        if config.show_spans {
            let _ = write!(out, " @{}..{}", node.span.start, node.span.end);
        }
        stack.extend(node.children.iter().rev().map(|c| (c.as_ref(), depth + 1)));
    }

    out
}

/// Renders several trees, separated by blank lines.
#[must_use]
pub fn render_trees<'a>(
    nodes: impl IntoIterator<Item = &'a Node>,
    config: &TreeConfig,
) -> String {
    nodes
        .into_iter()
        .map(|node| render_tree_with_config(node, config))
        .collect::<Vec<_>>()
        .join("\n\n")
}

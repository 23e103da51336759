//! Renderers that walk parsed trees.
//!
//! Both dispatch on a node's label and recurse into its children; neither
//! needs the grammar that produced the tree.

pub mod sql;
pub mod tree;

pub use sql::{render_sql, to_sql};
pub use tree::{TreeConfig, render_tree, render_tree_with_config, render_trees};

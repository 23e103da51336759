//! The tagged tree shared by tokens and parsed productions.
//!
//! A scanned token and a grammar production are the same type: leaves carry
//! `text`, productions carry `children`. Nodes are reference counted so that
//! the token sequence can be shared by every combinator and by the trees
//! built on top of it.

use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Shared handle to a node.
pub type NodeRef = Rc<Node>;

/// A grammar-defined production label, such as `additive` or `select`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label(Rc<str>);

impl Label {
    /// Creates a label.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    /// Returns the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a node represents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    /// Line or block comment.
    Comment,
    /// Consumed input with no structural meaning (brackets, separators).
    Phantom,
    /// Plain token: delimiter, operator, identifier, or number.
    Token,
    /// String literal; `text` is the content without quotation marks.
    Str,
    /// Character literal; `text` is the single character.
    Character,
    /// Significant whitespace.
    Newline,
    /// End of input.
    Eof,
    /// Composite node built by a grammar production.
    Production(Label),
}

impl Category {
    /// Returns a human-readable name for this category.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Comment => "comment",
            Self::Phantom => "phantom",
            Self::Token => "token",
            Self::Str => "str",
            Self::Character => "character",
            Self::Newline => "newline",
            Self::Eof => "eof",
            Self::Production(label) => label.as_str(),
        }
    }

    /// Returns true for every category the tokenizer can produce.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Production(_))
    }
}

/// A token or a production.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// What this node represents.
    pub category: Category,
    /// Source range covered.
    pub span: Span,
    /// Raw content (leaves only).
    pub text: String,
    /// Ordered children (productions only).
    pub children: Vec<NodeRef>,
}

impl Node {
    /// Creates a leaf node.
    #[must_use]
    pub fn leaf(category: Category, span: Span, text: impl Into<String>) -> Self {
        Self {
            category,
            span,
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Creates a plain token.
    #[must_use]
    pub fn token(span: Span, text: impl Into<String>) -> Self {
        Self::leaf(Category::Token, span, text)
    }

    /// Creates a phantom covering `span`.
    #[must_use]
    pub fn phantom(span: Span) -> Self {
        Self::leaf(Category::Phantom, span, String::new())
    }

    /// Creates a production node.
    #[must_use]
    pub fn production(label: Label, span: Span, children: Vec<NodeRef>) -> Self {
        debug_assert!(children.iter().all(|c| !c.is_phantom()));
        Self {
            category: Category::Production(label),
            span,
            text: String::new(),
            children,
        }
    }

    /// Returns the production label, if this is a production.
    #[must_use]
    pub fn label(&self) -> Option<&Label> {
        match &self.category {
            Category::Production(label) => Some(label),
            _ => None,
        }
    }

    /// Returns true if this is a production with the given label.
    #[must_use]
    pub fn is(&self, label: &str) -> bool {
        self.label().is_some_and(|l| l == label)
    }

    /// Returns true if this is a phantom.
    #[must_use]
    pub fn is_phantom(&self) -> bool {
        self.category == Category::Phantom
    }

    /// Returns true if this is a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.category == Category::Comment
    }

    /// Returns true if this is a plain token.
    #[must_use]
    pub fn is_token(&self) -> bool {
        self.category == Category::Token
    }

    /// Returns true if this is a plain token with exactly this text.
    #[must_use]
    pub fn is_token_text(&self, text: &str) -> bool {
        self.is_token() && self.text == text
    }

    /// Returns true if this is a string literal.
    #[must_use]
    pub fn is_str(&self) -> bool {
        self.category == Category::Str
    }

    /// Returns true if this is a character literal.
    #[must_use]
    pub fn is_character(&self) -> bool {
        self.category == Category::Character
    }

    /// Returns true if this is significant whitespace.
    #[must_use]
    pub fn is_newline(&self) -> bool {
        self.category == Category::Newline
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).map(AsRef::as_ref)
    }

    /// Returns a copy of this tree with every span moved `offset` bytes to
    /// the right, for trees whose source is embedded in a larger text.
    #[must_use]
    pub fn shifted(&self, offset: usize) -> NodeRef {
        let mut built: Vec<NodeRef> = Vec::new();
        let mut stack = vec![(self, false)];

        while let Some((node, expanded)) = stack.pop() {
            if expanded || node.children.is_empty() {
                let children = built.split_off(built.len() - node.children.len());
                built.push(Rc::new(Self {
                    category: node.category.clone(),
                    span: node.span.shifted(offset),
                    text: node.text.clone(),
                    children,
                }));
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|c| (c.as_ref(), false)));
            }
        }

        built.swap_remove(0)
    }

    /// Iterates over this node and all of its descendants, depth first.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl Drop for Node {
    /// Left spines built by the expression folds can be as deep as the input
    /// is long, so uniquely owned children are released from a work list.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(child) {
                pending.append(&mut node.children);
            }
        }
    }
}

/// A step of the [`Display`](fmt::Display) walk.
enum Step<'a> {
    Open(&'a Node),
    Close,
}

impl fmt::Display for Node {
    /// Compact s-expression form: leaves print as their text, productions as
    /// `(label child ...)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Step::Open(self)];
        let mut first = true;

        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Open(node) => node,
                Step::Close => {
                    f.write_str(")")?;
                    continue;
                }
            };
            if !first {
                f.write_str(" ")?;
            }
            first = false;

            match &node.category {
                Category::Production(label) => {
                    write!(f, "({label}")?;
                    stack.push(Step::Close);
                    stack.extend(node.children.iter().rev().map(|c| Step::Open(c)));
                }
                Category::Str => write!(f, "\"{}\"", node.text)?,
                Category::Character => write!(f, "#\\{}", node.text)?,
                Category::Newline => f.write_str("<newline>")?,
                Category::Phantom => f.write_str("<phantom>")?,
                Category::Eof => f.write_str("<eof>")?,
                Category::Comment | Category::Token => f.write_str(&node.text)?,
            }
        }

        Ok(())
    }
}

/// Depth-first iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(AsRef::as_ref));
        Some(node)
    }
}

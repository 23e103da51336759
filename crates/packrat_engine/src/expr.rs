//! Precedence-aware expression builders.
//!
//! Each builder applies an operand combinator and an operator combinator
//! and folds what they match into nested nodes of a single label. Operand
//! and operator applications must each contribute exactly one node; an
//! application yielding any other number of nodes counts as a failure.
//! Phantom operators are left out of the built node's children. All folds
//! are loops, so long chains do not grow the call stack.

use std::rc::Rc;

use crate::combinator::{Combinator, Match, Outcome, Parse};
use crate::node::{Label, Node, NodeRef};
use crate::span::Span;
use crate::state::ParseState;

/// Which way an infix chain nests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is `(a op b) op c`.
    Left,
    /// `a op b op c` is `a op (b op c)`.
    Right,
}

/// Applies `c` and returns its single node, or `None`.
fn single<'t>(
    c: &Combinator,
    input: &'t [NodeRef],
    state: &mut ParseState<'t>,
) -> Option<(NodeRef, &'t [NodeRef])> {
    let Match { mut nodes, rest } = c.apply(input, state)?;
    if nodes.len() == 1 {
        nodes.pop().map(|node| (node, rest))
    } else {
        None
    }
}

/// Builds one `label` node over `parts`, spanning all of them.
fn build(label: &Label, parts: Vec<NodeRef>) -> NodeRef {
    let span = parts
        .first()
        .zip(parts.last())
        .map_or_else(Span::default, |(first, last)| first.span.to(last.span));
    let children = parts.into_iter().filter(|n| !n.is_phantom()).collect();
    Rc::new(Node::production(label.clone(), span, children))
}

// =============================================================================
// Prefix
// =============================================================================

struct Prefix {
    label: Label,
    operand: Combinator,
    op: Combinator,
}

impl Parse for Prefix {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let mut ops = Vec::new();
        let mut rest = input;
        while let Some((op, after)) = single(&self.op, rest, state) {
            if after.len() == rest.len() {
                break;
            }
            ops.push(op);
            rest = after;
        }

        let (mut acc, rest) = single(&self.operand, rest, state)?;
        while let Some(op) = ops.pop() {
            acc = build(&self.label, vec![op, acc]);
        }
        Some(Match::new(vec![acc], rest))
    }
}

/// Zero or more `op`s followed by one `operand`, nested to the right with
/// the operand innermost: `- - x` is `(label - (label - x))`. With no
/// operators the result is the bare operand.
#[must_use]
pub fn prefix(label: &str, operand: Combinator, op: Combinator) -> Combinator {
    Combinator::new(Prefix {
        label: Label::new(label),
        operand,
        op,
    })
}

// =============================================================================
// Postfix
// =============================================================================

struct Postfix {
    label: Label,
    operand: Combinator,
    op: Combinator,
}

impl Parse for Postfix {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let (mut acc, mut rest) = single(&self.operand, input, state)?;
        let mut applied = 0;
        while let Some((op, after)) = single(&self.op, rest, state) {
            if after.len() == rest.len() {
                break;
            }
            acc = build(&self.label, vec![acc, op]);
            rest = after;
            applied += 1;
        }
        (applied > 0).then(|| Match::new(vec![acc], rest))
    }
}

/// One `operand` followed by one or more `op`s, nested to the left:
/// `x ++ ++` is `(label (label x ++) ++)`.
#[must_use]
pub fn postfix(label: &str, operand: Combinator, op: Combinator) -> Combinator {
    Combinator::new(Postfix {
        label: Label::new(label),
        operand,
        op,
    })
}

// =============================================================================
// Infix
// =============================================================================

struct Infix {
    label: Label,
    operand: Combinator,
    op: Combinator,
    associativity: Associativity,
}

impl Parse for Infix {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let (first, mut rest) = single(&self.operand, input, state)?;
        let mut operands = vec![first];
        let mut ops = Vec::new();

        // An operator whose right operand fails is left unconsumed.
        while let Some((op, after_op)) = single(&self.op, rest, state) {
            let Some((rhs, after_rhs)) = single(&self.operand, after_op, state) else {
                break;
            };
            if after_rhs.len() == rest.len() {
                break;
            }
            ops.push(op);
            operands.push(rhs);
            rest = after_rhs;
        }

        if ops.is_empty() {
            return None;
        }

        let node = match self.associativity {
            Associativity::Left => {
                let mut operands = operands.into_iter();
                let mut acc = operands.next()?;
                for (op, rhs) in ops.into_iter().zip(operands) {
                    acc = build(&self.label, vec![acc, op, rhs]);
                }
                acc
            }
            Associativity::Right => {
                let mut acc = operands.pop()?;
                while let (Some(op), Some(lhs)) = (ops.pop(), operands.pop()) {
                    acc = build(&self.label, vec![lhs, op, acc]);
                }
                acc
            }
        };
        Some(Match::new(vec![node], rest))
    }
}

/// Alternating `operand op operand ...` with at least one operator, nested
/// according to `associativity`. Children are `[lhs, op, rhs]`.
#[must_use]
pub fn infix(
    label: &str,
    operand: Combinator,
    op: Combinator,
    associativity: Associativity,
) -> Combinator {
    Combinator::new(Infix {
        label: Label::new(label),
        operand,
        op,
        associativity,
    })
}

/// Left-associative [`infix`].
#[must_use]
pub fn infix_left(label: &str, operand: Combinator, op: Combinator) -> Combinator {
    infix(label, operand, op, Associativity::Left)
}

/// Right-associative [`infix`].
#[must_use]
pub fn infix_right(label: &str, operand: Combinator, op: Combinator) -> Combinator {
    infix(label, operand, op, Associativity::Right)
}

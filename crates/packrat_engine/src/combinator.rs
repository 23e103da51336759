//! The combinator algebra.
//!
//! A [`Combinator`] is a cheap, shareable handle to something implementing
//! [`Parse`]. Applying it to a token suffix yields an [`Outcome`]: either a
//! [`Match`] carrying the matched nodes together with the exact remaining
//! suffix, or `None`. Failure carries no information and has no side
//! effects beyond the memo table and the trace; it only drives
//! backtracking.
//!
//! # Example
//!
//! ```
//! use packrat_engine::{LexicalProfile, evaluate, literal, production, scan};
//!
//! let tokens = scan("a b", &LexicalProfile::empty()).unwrap();
//! let pair = production("pair", [literal("a"), literal("b")]);
//! let matched = evaluate(&pair, &tokens).unwrap();
//! assert_eq!(matched.nodes[0].to_string(), "(pair a b)");
//! ```

use std::fmt;
use std::rc::Rc;

use crate::node::{Category, Label, Node, NodeRef};
use crate::span::Span;
use crate::state::ParseState;

// =============================================================================
// Core types
// =============================================================================

/// A successful application: the matched nodes and the unconsumed suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<'t> {
    /// Matched nodes, possibly none.
    pub nodes: Vec<NodeRef>,
    /// The remaining input. Always a suffix of the input that was parsed.
    pub rest: &'t [NodeRef],
}

impl<'t> Match<'t> {
    /// Creates a match.
    #[must_use]
    pub fn new(nodes: Vec<NodeRef>, rest: &'t [NodeRef]) -> Self {
        Self { nodes, rest }
    }

    /// A match with no nodes that consumes nothing.
    #[must_use]
    pub fn empty(rest: &'t [NodeRef]) -> Self {
        Self::new(Vec::new(), rest)
    }

    /// Returns how many tokens of `input` this match consumed.
    #[must_use]
    pub fn consumed(&self, input: &[NodeRef]) -> usize {
        input.len() - self.rest.len()
    }
}

/// The result of applying a combinator.
pub type Outcome<'t> = Option<Match<'t>>;

/// Anything that can parse a token suffix.
pub trait Parse {
    /// Parses a prefix of `input`.
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t>;
}

/// Shareable handle to a parser.
#[derive(Clone)]
pub struct Combinator(Rc<dyn Parse>);

impl Combinator {
    /// Wraps a parser.
    pub fn new(parser: impl Parse + 'static) -> Self {
        Self(Rc::new(parser))
    }

    /// Applies this combinator to `input`.
    pub fn apply<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        self.0.parse(input, state)
    }
}

impl fmt::Debug for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Combinator")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

fn without_phantoms(nodes: Vec<NodeRef>) -> Vec<NodeRef> {
    if nodes.iter().any(|n| n.is_phantom()) {
        nodes.into_iter().filter(|n| !n.is_phantom()).collect()
    } else {
        nodes
    }
}

// =============================================================================
// Sequencing and choice
// =============================================================================

struct Sequence {
    items: Vec<Combinator>,
    filter: bool,
}

impl Parse for Sequence {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let mut nodes = Vec::new();
        let mut rest = input;
        for item in &self.items {
            let matched = item.apply(rest, state)?;
            nodes.extend(matched.nodes);
            rest = matched.rest;
        }
        if self.filter {
            nodes = without_phantoms(nodes);
        }
        Some(Match::new(nodes, rest))
    }
}

/// Applies each combinator in order, threading the remaining input, and
/// concatenates their nodes. Fails on the first failure.
#[must_use]
pub fn sequence(items: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::new(Sequence {
        items: items.into_iter().collect(),
        filter: false,
    })
}

/// Like [`sequence`], then strips phantom nodes from the result.
#[must_use]
pub fn filtered_sequence(items: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::new(Sequence {
        items: items.into_iter().collect(),
        filter: true,
    })
}

struct OrderedChoice(Vec<Combinator>);

impl Parse for OrderedChoice {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        self.0.iter().find_map(|alt| alt.apply(input, state))
    }
}

/// Returns the first alternative that succeeds. Later alternatives are
/// never tried once one matches.
#[must_use]
pub fn ordered_choice(alternatives: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::new(OrderedChoice(alternatives.into_iter().collect()))
}

struct AllOf(Vec<Combinator>);

impl Parse for AllOf {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let mut last = Match::empty(input);
        for item in &self.0 {
            last = item.apply(input, state)?;
        }
        Some(last)
    }
}

/// Succeeds only if every combinator matches at the same position; the
/// result is the last one's.
#[must_use]
pub fn all_of(items: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::new(AllOf(items.into_iter().collect()))
}

// =============================================================================
// Repetition
// =============================================================================

struct ZeroOrMore(Combinator);

impl Parse for ZeroOrMore {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let mut nodes = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            let Some(matched) = self.0.apply(rest, state) else {
                break;
            };
            // A match that consumed nothing would repeat forever.
            let progressed = matched.rest.len() < rest.len();
            nodes.extend(matched.nodes);
            rest = matched.rest;
            if !progressed {
                break;
            }
        }
        Some(Match::new(without_phantoms(nodes), rest))
    }
}

/// Applies `item` until it fails or the input runs out. Never fails.
#[must_use]
pub fn zero_or_more(item: Combinator) -> Combinator {
    Combinator::new(ZeroOrMore(item))
}

/// `item` at least once, then as often as it matches.
#[must_use]
pub fn one_or_more(item: Combinator) -> Combinator {
    filtered_sequence([item.clone(), zero_or_more(item)])
}

/// `item`, or an empty match.
#[must_use]
pub fn optional(item: Combinator) -> Combinator {
    ordered_choice([item, empty()])
}

/// `item` separated by `separator`, at least one `item`.
#[must_use]
pub fn separated(item: Combinator, separator: Combinator) -> Combinator {
    filtered_sequence([
        item.clone(),
        zero_or_more(filtered_sequence([separator, item])),
    ])
}

// =============================================================================
// Single-token matchers
// =============================================================================

struct NegativeConsume(Combinator);

impl Parse for NegativeConsume {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let (first, rest) = input.split_first()?;
        if self.0.apply(input, state).is_some() {
            return None;
        }
        Some(Match::new(vec![Rc::clone(first)], rest))
    }
}

/// Consumes exactly one token if `item` fails here. Fails if `item`
/// succeeds or the input is empty.
#[must_use]
pub fn negative_consume(item: Combinator) -> Combinator {
    Combinator::new(NegativeConsume(item))
}

struct Predicate<F>(F);

impl<F: Fn(&Node) -> bool> Parse for Predicate<F> {
    fn parse<'t>(&self, input: &'t [NodeRef], _state: &mut ParseState<'t>) -> Outcome<'t> {
        let (first, rest) = input.split_first()?;
        (self.0)(first).then(|| Match::new(vec![Rc::clone(first)], rest))
    }
}

/// Consumes one token if `test` accepts it.
#[must_use]
pub fn predicate(test: impl Fn(&Node) -> bool + 'static) -> Combinator {
    Combinator::new(Predicate(test))
}

/// Consumes one token of the given category.
#[must_use]
pub fn kind(category: Category) -> Combinator {
    predicate(move |node| node.category == category)
}

/// Consumes one plain token with exactly this text.
#[must_use]
pub fn literal(text: &str) -> Combinator {
    let text = text.to_string();
    predicate(move |node| node.is_token_text(&text))
}

/// Matches a literal and discards it.
#[must_use]
pub fn skip(text: &str) -> Combinator {
    discard(literal(text))
}

/// Matches a literal and replaces it with a phantom, for brackets and
/// separators that should vanish from productions.
#[must_use]
pub fn skip_phantom(text: &str) -> Combinator {
    phantom(literal(text))
}

// =============================================================================
// Node shaping
// =============================================================================

struct Discard(Combinator);

impl Parse for Discard {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        self.0.apply(input, state).map(|m| Match::empty(m.rest))
    }
}

/// Matches `item` and drops its nodes.
#[must_use]
pub fn discard(item: Combinator) -> Combinator {
    Combinator::new(Discard(item))
}

struct Phantom(Combinator);

impl Parse for Phantom {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let matched = self.0.apply(input, state)?;
        let consumed = &input[..matched.consumed(input)];
        let span = match (consumed.first(), consumed.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::at(state.offset_of(input)),
        };
        Some(Match::new(vec![Rc::new(Node::phantom(span))], matched.rest))
    }
}

/// Replaces whatever `item` matched with a single phantom node spanning the
/// consumed tokens.
#[must_use]
pub fn phantom(item: Combinator) -> Combinator {
    Combinator::new(Phantom(item))
}

struct Production {
    label: Label,
    body: Combinator,
}

impl Parse for Production {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let matched = self.body.apply(input, state)?;
        let children = without_phantoms(matched.nodes);
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::at(state.offset_of(input)),
        };
        let node = Node::production(self.label.clone(), span, children);
        Some(Match::new(vec![Rc::new(node)], matched.rest))
    }
}

/// Builds one `label` node from the non-phantom nodes of a sequence.
///
/// With no surviving nodes the production is empty and gets a zero-width
/// span where the input starts.
#[must_use]
pub fn production(label: &str, items: impl IntoIterator<Item = Combinator>) -> Combinator {
    Combinator::new(Production {
        label: Label::new(label),
        body: sequence(items),
    })
}

struct Map<F> {
    inner: Combinator,
    f: F,
}

impl<F: Fn(Vec<NodeRef>) -> Vec<NodeRef>> Parse for Map<F> {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let matched = self.inner.apply(input, state)?;
        Some(Match::new((self.f)(matched.nodes), matched.rest))
    }
}

/// Applies `inner` and transforms its nodes.
#[must_use]
pub fn map(inner: Combinator, f: impl Fn(Vec<NodeRef>) -> Vec<NodeRef> + 'static) -> Combinator {
    Combinator::new(Map { inner, f })
}

// =============================================================================
// Constants
// =============================================================================

struct Empty;

impl Parse for Empty {
    fn parse<'t>(&self, input: &'t [NodeRef], _state: &mut ParseState<'t>) -> Outcome<'t> {
        Some(Match::empty(input))
    }
}

/// Succeeds with no nodes, consuming nothing.
#[must_use]
pub fn empty() -> Combinator {
    Combinator::new(Empty)
}

struct Fail;

impl Parse for Fail {
    fn parse<'t>(&self, _input: &'t [NodeRef], _state: &mut ParseState<'t>) -> Outcome<'t> {
        None
    }
}

/// Always fails.
#[must_use]
pub fn fail() -> Combinator {
    Combinator::new(Fail)
}

struct EndOfInput;

impl Parse for EndOfInput {
    fn parse<'t>(&self, input: &'t [NodeRef], _state: &mut ParseState<'t>) -> Outcome<'t> {
        input.is_empty().then(|| Match::empty(input))
    }
}

/// Succeeds with no nodes only when no input remains.
#[must_use]
pub fn end_of_input() -> Combinator {
    Combinator::new(EndOfInput)
}

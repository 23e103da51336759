//! The rule registry.
//!
//! A [`Grammar`] gives rules stable names so that they can refer to each
//! other before they are defined. References are resolved lazily, at
//! application time, and push a frame on the application stack while they
//! run. Each rule name is interned to a [`RuleId`], which also keys the memo
//! table for [`Grammar::memo`] references.
//!
//! # Example
//!
//! ```
//! use packrat_engine::{Grammar, LexicalProfile, evaluate, literal, optional, production, scan};
//!
//! let grammar = Grammar::new();
//! // nested = "(" nested? ")"
//! grammar
//!     .define(
//!         "nested",
//!         production("nested", [literal("("), optional(grammar.memo("nested")), literal(")")]),
//!     )
//!     .unwrap();
//! let top = grammar.entry("nested").unwrap();
//!
//! let tokens = scan("(())", &LexicalProfile::lisp()).unwrap();
//! assert!(evaluate(&top, &tokens).is_some());
//! ```

use std::cell::{Ref, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use packrat_foundation::{Error, Interner, Result, RuleId};

use crate::combinator::{Combinator, Outcome, Parse};
use crate::memo::memo;
use crate::node::NodeRef;
use crate::state::ParseState;

#[derive(Default)]
struct GrammarInner {
    interner: RefCell<Interner>,
    rules: RefCell<HashMap<RuleId, Combinator>>,
    /// Every rule mentioned by `rule` or `memo`, defined or not.
    referenced: RefCell<BTreeSet<RuleId>>,
}

/// A set of named, mutually recursive rules.
///
/// Cloning a `Grammar` is cheap and yields a handle to the same rules.
#[derive(Clone, Default)]
pub struct Grammar {
    inner: Rc<GrammarInner>,
}

impl Grammar {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&self, name: &str) -> RuleId {
        self.inner.interner.borrow_mut().intern_rule(name)
    }

    /// Returns a lazy reference to the rule `name`.
    ///
    /// The rule may be defined later. Applying a reference to a rule that
    /// was never defined fails.
    #[must_use]
    pub fn rule(&self, name: &str) -> Combinator {
        let id = self.intern(name);
        self.inner.referenced.borrow_mut().insert(id);
        Combinator::new(RuleRef {
            grammar: Rc::downgrade(&self.inner),
            id,
        })
    }

    /// Returns a memoized lazy reference to the rule `name`.
    #[must_use]
    pub fn memo(&self, name: &str) -> Combinator {
        let reference = self.rule(name);
        memo(self.intern(name), reference)
    }

    /// Defines the rule `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is already defined.
    pub fn define(&self, name: &str, body: Combinator) -> Result<RuleId> {
        let id = self.intern(name);
        let mut rules = self.inner.rules.borrow_mut();
        if rules.contains_key(&id) {
            return Err(Error::duplicate_rule(name));
        }
        rules.insert(id, body);
        Ok(id)
    }

    /// Returns the memoized rule `name` as the top of a parse, after
    /// checking that every rule referenced so far is defined.
    ///
    /// The returned combinator keeps the grammar alive.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first undefined rule, which may be `name`
    /// itself.
    pub fn entry(&self, name: &str) -> Result<Combinator> {
        if !self.is_defined(name) {
            return Err(Error::undefined_rule(name));
        }
        let undefined = {
            let rules = self.inner.rules.borrow();
            let referenced = self.inner.referenced.borrow();
            referenced.iter().find(|id| !rules.contains_key(id)).copied()
        };
        if let Some(id) = undefined {
            let name = self.name_of(id).unwrap_or_default();
            return Err(Error::undefined_rule(name));
        }

        Ok(Combinator::new(Entry {
            _grammar: Rc::clone(&self.inner),
            top: self.memo(name),
        }))
    }

    /// Returns true if `name` has a body.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        let Some(id) = self.lookup(name) else {
            return false;
        };
        self.inner.rules.borrow().contains_key(&id)
    }

    /// Returns the id of `name`, if it has been mentioned.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<RuleId> {
        self.inner.interner.borrow().lookup(name)
    }

    /// Returns the name of a rule id.
    #[must_use]
    pub fn name_of(&self, id: RuleId) -> Option<String> {
        self.inner
            .interner
            .borrow()
            .get_rule(id)
            .map(str::to_string)
    }

    /// Returns the number of defined rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.inner.rules.borrow().len()
    }

    /// Borrows the name table, for formatting traces.
    ///
    /// # Panics
    ///
    /// Panics if called while a rule is being defined or referenced.
    #[must_use]
    pub fn interner(&self) -> Ref<'_, Interner> {
        self.inner.interner.borrow()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.inner.interner.borrow();
        let rules = self.inner.rules.borrow();
        let mut names: Vec<_> = rules
            .keys()
            .filter_map(|id| interner.get_rule(*id))
            .collect();
        names.sort_unstable();
        f.debug_struct("Grammar").field("rules", &names).finish()
    }
}

/// Lazy reference to a named rule.
///
/// Holds the grammar weakly: rule bodies refer to each other through these,
/// and a strong handle would make every recursive grammar a cycle.
struct RuleRef {
    grammar: Weak<GrammarInner>,
    id: RuleId,
}

impl Parse for RuleRef {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        let grammar = self.grammar.upgrade()?;
        // Release the borrow before applying; the body may reach this table again.
        let body = grammar.rules.borrow().get(&self.id).cloned()?;
        state.apply_rule(self.id, &body, input)
    }
}

struct Entry {
    _grammar: Rc<GrammarInner>,
    top: Combinator,
}

impl Parse for Entry {
    fn parse<'t>(&self, input: &'t [NodeRef], state: &mut ParseState<'t>) -> Outcome<'t> {
        self.top.apply(input, state)
    }
}

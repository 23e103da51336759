//! Interning for grammar rule names.
//!
//! Rules are interned so that memo keys and trace records carry a small,
//! stable identifier instead of a name or a pointer to the rule body.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interned rule identifier.
///
/// Assigned once, when a rule name is first seen by an [`Interner`], and
/// never reused for another name within that interner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    /// Returns the raw index of this rule.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

/// Interner for rule names.
///
/// Maps names to unique [`RuleId`]s and back.
/// It is not thread-safe; use external synchronization if needed.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interner {
    /// Name storage, indexed by rule id.
    names: Vec<Arc<str>>,
    /// Map from name to `RuleId`.
    name_map: HashMap<Arc<str>, RuleId>,
}

impl Interner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a rule name, returning its [`RuleId`].
    ///
    /// # Panics
    ///
    /// Panics if the number of interned rules exceeds `u32::MAX`.
    pub fn intern_rule(&mut self, name: &str) -> RuleId {
        if let Some(&id) = self.name_map.get(name) {
            return id;
        }

        let idx = u32::try_from(self.names.len()).expect("too many rules");
        let id = RuleId(idx);
        let arc: Arc<str> = name.into();
        self.names.push(arc.clone());
        self.name_map.insert(arc, id);
        id
    }

    /// Looks up a name without interning it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<RuleId> {
        self.name_map.get(name).copied()
    }

    /// Gets the name for a rule.
    #[must_use]
    pub fn get_rule(&self, id: RuleId) -> Option<&str> {
        self.names.get(id.0 as usize).map(AsRef::as_ref)
    }

    /// Returns the number of interned rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.names.len()
    }

    /// Iterates over every interned rule in id order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (RuleId(i as u32), name.as_ref()))
    }
}

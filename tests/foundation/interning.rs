//! Integration tests for rule-name interning

use packrat_foundation::{Interner, RuleId};

#[test]
fn ids_round_trip_through_names() {
    let mut interner = Interner::new();
    let names = ["program", "expression", "additive", "multiplicative"];
    let ids: Vec<RuleId> = names.iter().map(|n| interner.intern_rule(n)).collect();

    for (name, id) in names.iter().zip(&ids) {
        assert_eq!(interner.get_rule(*id), Some(*name));
        assert_eq!(interner.lookup(name), Some(*id));
    }
    assert_eq!(interner.rule_count(), names.len());
}

#[test]
fn interners_are_independent() {
    let mut a = Interner::new();
    let mut b = Interner::new();
    a.intern_rule("x");
    let in_b = b.intern_rule("y");
    assert_eq!(a.get_rule(in_b), Some("x"));
    assert_eq!(b.lookup("x"), None);
}

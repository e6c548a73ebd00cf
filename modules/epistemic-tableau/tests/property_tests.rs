//! Property-based tests tying the tableau to the evaluator.

use epistemic_formula::Formula;
use epistemic_tableau::{ProofTree, Satisfiability};
use epistemic_world::{KripkeStructure, Relations, World};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn agent() -> impl Strategy<Value = String> {
    prop_oneof![Just("1"), Just("2")].prop_map(String::from)
}

/// Formulas without common-knowledge operators.
fn basic_formula() -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![Just("p"), Just("q"), Just("r")].prop_map(Formula::atom);
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Formula::and(a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Formula::or(a, b)),
            inner.clone().prop_map(Formula::necessarily),
            inner.clone().prop_map(Formula::possibly),
            (agent(), inner.clone()).prop_map(|(a, f)| Formula::box_a(a, f)),
            (agent(), inner).prop_map(|(a, f)| Formula::diamond_a(a, f)),
        ]
    })
}

fn structure() -> impl Strategy<Value = KripkeStructure> {
    (1..5usize)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(prop::array::uniform3(any::<bool>()), n),
                prop::collection::vec((0..n, 0..n), 0..10),
                prop::collection::vec((0..n, 0..n), 0..10),
            )
        })
        .prop_map(|(valuations, one, two)| {
            let worlds = valuations
                .iter()
                .enumerate()
                .map(|(i, [p, q, r])| World::new(format!("w{i}"), [("p", *p), ("q", *q), ("r", *r)]))
                .collect();
            let named = |pairs: Vec<(usize, usize)>| {
                pairs
                    .into_iter()
                    .map(|(u, v)| (format!("w{u}"), format!("w{v}")))
                    .collect()
            };
            let mut relations = Relations::new();
            relations.insert("1".to_string(), named(one));
            relations.insert("2".to_string(), named(two));
            KripkeStructure::new(worlds, relations).unwrap()
        })
}

// ============================================================================
// Tableau properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A satisfiable verdict always comes with a witness that passes the
    /// evaluator at the root; an unsatisfiable one never does.
    #[test]
    fn prop_witness_satisfies_formula(f in basic_formula()) {
        let mut tree = ProofTree::new(f.clone());
        match tree.derive().unwrap() {
            Satisfiability::Satisfiable => {
                let model = tree.kripke_structure().unwrap();
                prop_assert!(f.semantic(model, tree.root_world()));
            }
            Satisfiability::Unsatisfiable => {
                prop_assert!(tree.kripke_structure().is_none());
            }
        }
    }

    /// A formula true somewhere in some structure is never reported
    /// unsatisfiable.
    #[test]
    fn prop_true_formulas_are_satisfiable(ks in structure(), f in basic_formula()) {
        if ks.world_names().any(|w| f.semantic(&ks, w)) {
            let mut tree = ProofTree::new(f);
            prop_assert_eq!(tree.derive().unwrap(), Satisfiability::Satisfiable);
        }
    }

    /// f and ¬f are never both unsatisfiable.
    #[test]
    fn prop_formula_or_negation_satisfiable(f in basic_formula()) {
        let mut positive = ProofTree::new(f.clone());
        let mut negative = ProofTree::new(Formula::not(f));
        let either = positive.derive().unwrap() == Satisfiability::Satisfiable
            || negative.derive().unwrap() == Satisfiability::Satisfiable;
        prop_assert!(either);
    }

    #[test]
    fn prop_stats_are_consistent(f in basic_formula()) {
        let mut tree = ProofTree::new(f);
        let outcome = tree.derive().unwrap();
        let stats = tree.stats();
        prop_assert_eq!(stats.nodes, tree.nodes().len());
        prop_assert!(stats.closed_branches <= stats.branches);
        if outcome == Satisfiability::Unsatisfiable {
            prop_assert_eq!(stats.closed_branches, stats.branches);
            prop_assert_eq!(stats.worlds, 0);
        } else {
            prop_assert_eq!(stats.worlds, tree.kripke_structure().unwrap().len());
        }
    }
}

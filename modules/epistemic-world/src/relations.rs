//! Accessibility relations keyed by agent, and the builders that close them.
//!
//! Both builders are pure: they return an augmented copy and never invent new
//! agent keys. Dangling world ids pass through untouched; they are rejected
//! later by `KripkeStructure::new`.

use std::collections::{BTreeMap, BTreeSet};

use crate::world::World;

/// Agent id → set of (source world id, target world id) pairs.
pub type Relations = BTreeMap<String, BTreeSet<(String, String)>>;

/// Add `(w, w)` for every world, for every agent already present.
pub fn add_reflexive_edges(worlds: &[World], relations: &Relations) -> Relations {
    let mut out = relations.clone();
    for edges in out.values_mut() {
        for world in worlds {
            edges.insert((world.name().to_string(), world.name().to_string()));
        }
    }
    out
}

/// Add `(v, u)` for every existing `(u, v)`, per agent.
pub fn add_symmetric_edges(relations: &Relations) -> Relations {
    relations
        .iter()
        .map(|(agent, edges)| {
            let closed = edges
                .iter()
                .flat_map(|(u, v)| [(u.clone(), v.clone()), (v.clone(), u.clone())])
                .collect();
            (agent.clone(), closed)
        })
        .collect()
}

/// Build a relation map from borrowed string pairs. Handy for literals.
pub fn relations_from<'a, A, E>(agents: A) -> Relations
where
    A: IntoIterator<Item = (&'a str, E)>,
    E: IntoIterator<Item = (&'a str, &'a str)>,
{
    agents
        .into_iter()
        .map(|(agent, edges)| {
            let set = edges
                .into_iter()
                .map(|(u, v)| (u.to_string(), v.to_string()))
                .collect();
            (agent.to_string(), set)
        })
        .collect()
}

//! Truth of a formula at a world of a Kripke structure.
//!
//! Evaluation is total. A missing proposition is false, an unknown agent has
//! no accessible worlds, and an unknown world id is treated as an isolated
//! world with an empty valuation.

use std::collections::VecDeque;

use epistemic_world::KripkeStructure;
use tracing::trace;

use crate::formula::Formula;

impl Formula {
    /// Whether the formula holds at the world named `world`.
    pub fn semantic(&self, structure: &KripkeStructure, world: &str) -> bool {
        match structure.index_of(world) {
            Some(index) => self.holds_at(structure, index),
            None => {
                trace!(world, "Evaluating at a world outside the structure");
                self.holds_in_isolation()
            }
        }
    }

    /// Whether the formula holds at the world stored at `index`.
    pub fn holds_at(&self, ks: &KripkeStructure, index: usize) -> bool {
        match self {
            Self::Atom(name) => ks.world_at(index).is_some_and(|w| w.holds(name)),
            Self::Not(f) => !f.holds_at(ks, index),
            Self::And(l, r) => l.holds_at(ks, index) && r.holds_at(ks, index),
            Self::Or(l, r) => l.holds_at(ks, index) || r.holds_at(ks, index),
            Self::Box(f) => ks.successors_any(index).all(|next| f.holds_at(ks, next)),
            Self::Diamond(f) => ks.successors_any(index).any(|next| f.holds_at(ks, next)),
            Self::BoxA(agent, f) => ks.successors(agent, index).all(|next| f.holds_at(ks, next)),
            Self::DiamondA(agent, f) => {
                ks.successors(agent, index).any(|next| f.holds_at(ks, next))
            }
            Self::BoxStar(f) => reachable(ks, index)
                .into_iter()
                .all(|next| f.holds_at(ks, next)),
            Self::DiamondStar(f) => reachable(ks, index)
                .into_iter()
                .any(|next| f.holds_at(ks, next)),
        }
    }

    // A world with no valuation and no successors.
    fn holds_in_isolation(&self) -> bool {
        match self {
            Self::Atom(_) => false,
            Self::Not(f) => !f.holds_in_isolation(),
            Self::And(l, r) => l.holds_in_isolation() && r.holds_in_isolation(),
            Self::Or(l, r) => l.holds_in_isolation() || r.holds_in_isolation(),
            Self::Box(_) | Self::BoxA(_, _) => true,
            Self::Diamond(_) | Self::DiamondA(_, _) => false,
            Self::BoxStar(f) | Self::DiamondStar(f) => f.holds_in_isolation(),
        }
    }
}

/// Every world reachable from `start` in zero or more steps over the union of
/// all agents' relations, in breadth-first order. `start` comes first.
pub fn reachable(ks: &KripkeStructure, start: usize) -> Vec<usize> {
    if start >= ks.len() {
        return Vec::new();
    }
    let mut visited = vec![false; ks.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for next in ks.successors_any(current) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    order
}

//! Public announcements over Kripke structures.
//!
//! `solve` is the announcement update: keep exactly the worlds where the
//! formula holds, restrict every relation to the survivors. `prune` searches
//! for the smallest set of violating worlds whose removal leaves a structure
//! on which the formula holds everywhere; this matters for formulas such as
//! `BoxStar` whose truth depends on which worlds are still reachable.

use epistemic_world::KripkeStructure;
use tracing::{debug, info, warn};

use crate::error::AnnounceError;
use crate::formula::Formula;

/// Largest candidate set `prune` will search exhaustively (2^20 subsets).
pub const MAX_PRUNE_CANDIDATES: usize = 20;

pub trait Announce {
    /// Restrict to the worlds where `formula` holds.
    fn solve(&self, formula: &Formula) -> KripkeStructure;

    /// Ids of the worlds where `formula` is false, in structure order.
    fn violating_worlds(&self, formula: &Formula) -> Vec<&str>;

    /// Whether `formula` holds at every world.
    fn is_valid(&self, formula: &Formula) -> bool;

    /// Remove the fewest worlds so that `formula` holds at every remaining one.
    fn prune(&self, formula: &Formula) -> Result<KripkeStructure, AnnounceError>;
}

impl Announce for KripkeStructure {
    fn solve(&self, formula: &Formula) -> KripkeStructure {
        let verdicts: Vec<bool> = (0..self.len()).map(|i| formula.holds_at(self, i)).collect();
        let updated = self.restrict(|i, _| verdicts[i]);
        debug!(
            %formula,
            kept = updated.len(),
            removed = self.len() - updated.len(),
            "Announcement applied"
        );
        updated
    }

    fn violating_worlds(&self, formula: &Formula) -> Vec<&str> {
        self.worlds()
            .iter()
            .enumerate()
            .filter(|(i, _)| !formula.holds_at(self, *i))
            .map(|(_, w)| w.name())
            .collect()
    }

    fn is_valid(&self, formula: &Formula) -> bool {
        (0..self.len()).all(|i| formula.holds_at(self, i))
    }

    fn prune(&self, formula: &Formula) -> Result<KripkeStructure, AnnounceError> {
        let candidates = self.violating_worlds(formula);
        if candidates.is_empty() {
            return Ok(self.clone());
        }
        if candidates.len() > MAX_PRUNE_CANDIDATES {
            warn!(
                candidates = candidates.len(),
                limit = MAX_PRUNE_CANDIDATES,
                "Prune search refused"
            );
            return Err(AnnounceError::PruneSearchTooLarge {
                candidates: candidates.len(),
                limit: MAX_PRUNE_CANDIDATES,
            });
        }

        for size in 1..=candidates.len() {
            for combo in Combinations::new(candidates.len(), size) {
                let removed: Vec<&str> = combo.iter().map(|&i| candidates[i]).collect();
                let pruned = self.without_worlds(&removed);
                if pruned.is_valid(formula) {
                    info!(%formula, removed = ?removed, kept = pruned.len(), "Prune found");
                    return Ok(pruned);
                }
            }
        }

        info!(%formula, "No removal makes the formula valid; result is empty");
        Ok(self.restrict(|_, _| false))
    }
}

/// k-subsets of `0..n` as sorted index vectors, in lexicographic order.
struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self { n, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.take()?;
        let k = out.len();
        let mut next = out.clone();
        // Rightmost position that can still move right.
        let pivot = (0..k).rev().find(|&i| next[i] < self.n - k + i);
        if let Some(i) = pivot {
            next[i] += 1;
            for j in i + 1..k {
                next[j] = next[j - 1] + 1;
            }
            self.current = Some(next);
        }
        Some(out)
    }
}

use epistemic_world::KripkeStructure;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::announce::Announce;
use crate::formula::Formula;

/// An ordered sequence of public announcements.
///
/// Owned by whoever builds the scenario and consumed one announcement at a
/// time; each update takes the previous update's output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    announcements: Vec<Formula>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, announcement: Formula) {
        self.announcements.push(announcement);
    }

    pub fn len(&self) -> usize {
        self.announcements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.announcements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Formula> {
        self.announcements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Formula> {
        self.announcements.iter()
    }

    /// Apply every announcement in order with `solve`, returning the model
    /// after each step. The last element is the final model.
    pub fn apply(&self, initial: &KripkeStructure) -> Vec<KripkeStructure> {
        let mut trace = Vec::with_capacity(self.announcements.len());
        let mut current = initial.clone();
        for (step, announcement) in self.announcements.iter().enumerate() {
            current = current.solve(announcement);
            debug!(step, worlds = current.len(), "Knowledge base step");
            trace.push(current.clone());
        }
        trace
    }

    /// The model after every announcement.
    pub fn solve_all(&self, initial: &KripkeStructure) -> KripkeStructure {
        self.announcements
            .iter()
            .fold(initial.clone(), |model, announcement| model.solve(announcement))
    }
}

impl From<Vec<Formula>> for KnowledgeBase {
    fn from(announcements: Vec<Formula>) -> Self {
        Self { announcements }
    }
}

impl FromIterator<Formula> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> Self {
        Self {
            announcements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a Formula;
    type IntoIter = std::slice::Iter<'a, Formula>;

    fn into_iter(self) -> Self::IntoIter {
        self.announcements.iter()
    }
}

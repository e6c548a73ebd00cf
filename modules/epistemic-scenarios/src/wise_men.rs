//! The three wise men.
//!
//! Each wise man wears a red or white hat and sees the other two. World names
//! spell the hats in order (`RWW`: man 1 red, men 2 and 3 white); valuations
//! set `<man>:<colour>` to true. Agent `n` cannot tell apart the worlds that
//! differ only in man `n`'s hat.

use epistemic_formula::{Announce, Formula, KnowledgeBase};
use epistemic_world::{
    add_reflexive_edges, add_symmetric_edges, relations_from, KripkeStructure, ModelError, World,
};
use serde::Serialize;
use tracing::info;

use crate::error::ScenarioError;

const HATS: [&str; 8] = ["RWW", "RRW", "RRR", "WRR", "WWR", "RWR", "WRW", "WWW"];

/// How each announcement is applied to the running model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Keep exactly the worlds where the announcement holds.
    Solve,
    /// Drop the fewest worlds so the announcement holds everywhere.
    Prune,
}

/// The model after one announcement.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub index: usize,
    pub announcement: Formula,
    pub model: KripkeStructure,
}

#[derive(Debug, Clone)]
pub struct WiseMen {
    pub structure: KripkeStructure,
    pub knowledge_base: KnowledgeBase,
}

/// A world named after its hats, e.g. `RWR`.
pub fn hat_world(hats: &str) -> World {
    let valuation = hats
        .chars()
        .enumerate()
        .map(|(i, colour)| (format!("{}:{}", i + 1, colour), true));
    World::new(hats, valuation)
}

/// "Wise man `agent` does not know the colour of his own hat."
pub fn does_not_know(agent: &str) -> Formula {
    let red = Formula::atom(format!("{agent}:R"));
    Formula::and(
        Formula::not(Formula::box_a(agent, red.clone())),
        Formula::not(Formula::box_a(agent, Formula::not(red))),
    )
}

impl WiseMen {
    pub fn new() -> Result<Self, ModelError> {
        let worlds: Vec<World> = HATS.iter().map(|hats| hat_world(hats)).collect();
        let relations = relations_from([
            (
                "1",
                vec![("RWW", "WWW"), ("RRW", "WRW"), ("RWR", "WWR"), ("WRR", "RRR")],
            ),
            (
                "2",
                vec![("RWR", "RRR"), ("RWW", "RRW"), ("WRR", "WWR"), ("WWW", "WRW")],
            ),
            (
                "3",
                vec![("WWR", "WWW"), ("RRR", "RRW"), ("RWW", "RWR"), ("WRW", "WRR")],
            ),
        ]);
        let relations = add_symmetric_edges(&add_reflexive_edges(&worlds, &relations));
        let structure = KripkeStructure::new(worlds, relations)?;

        let knowledge_base = KnowledgeBase::from(vec![
            does_not_know("1"),
            // Someone other than man 1 wears red, and everyone knows it.
            Formula::box_star(Formula::or(Formula::atom("2:R"), Formula::atom("3:R"))),
            does_not_know("2"),
            Formula::box_a("3", Formula::atom("3:R")),
        ]);

        Ok(Self {
            structure,
            knowledge_base,
        })
    }

    /// Apply every announcement in order, keeping the model after each one.
    pub fn run(&self, mode: UpdateMode) -> Result<Vec<Step>, ScenarioError> {
        let mut steps = Vec::with_capacity(self.knowledge_base.len());
        let mut current = self.structure.clone();
        for (index, announcement) in self.knowledge_base.iter().enumerate() {
            current = match mode {
                UpdateMode::Solve => current.solve(announcement),
                UpdateMode::Prune => current.prune(announcement)?,
            };
            info!(index, %announcement, worlds = current.len(), "Wise men announcement");
            steps.push(Step {
                index,
                announcement: announcement.clone(),
                model: current.clone(),
            });
        }
        Ok(steps)
    }
}

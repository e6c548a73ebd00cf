//! State of one tableau branch.
//!
//! A branch owns its worlds, its edges and two obligation queues: `pending`
//! for non-branching work and `deferred` for beta splits, which only run once
//! `pending` is empty. Proof-tree nodes live in an arena shared by every
//! branch; a branch only remembers its tip.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use epistemic_formula::Formula;
use epistemic_world::{KripkeStructure, Relations, World};
use tracing::{trace, warn};

use crate::config::TableauConfig;
use crate::error::TableauError;
use crate::proof::ProofNode;
use crate::rules::{expand, Expansion, Rule};

#[derive(Debug, Clone)]
struct Necessity {
    agent: Option<String>,
    body: Formula,
    rule: Rule,
}

#[derive(Debug, Clone)]
struct TableauWorld {
    name: String,
    formulas: HashSet<Formula>,
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
    necessities: Vec<Necessity>,
}

impl TableauWorld {
    fn new(name: String) -> Self {
        Self {
            name,
            formulas: HashSet::new(),
            positive: BTreeSet::new(),
            negative: BTreeSet::new(),
            necessities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Edge {
    agent: String,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone)]
struct Split {
    world: usize,
    rule: Rule,
    left: Formula,
    right: Formula,
}

/// What running a branch produced.
#[derive(Debug)]
pub(crate) enum Outcome {
    Closed,
    Open,
    /// The branch split; the caller keeps running `self` (left alternative)
    /// and must explore the returned branch (right alternative) later.
    Split(Branch),
}

#[derive(Debug, Clone)]
pub(crate) struct Branch {
    worlds: Vec<TableauWorld>,
    edges: Vec<Edge>,
    pending: VecDeque<(usize, Formula)>,
    deferred: VecDeque<Split>,
    tip: usize,
    closed: bool,
}

fn matches_label(agent: &Option<String>, label: &str) -> bool {
    agent.as_deref().map_or(true, |a| a == label)
}

impl Branch {
    /// A branch with `formula` asserted at the root world. The root proof
    /// node must already be at index `tip` of the tree.
    pub(crate) fn new(root_world: &str, formula: &Formula, tip: usize) -> Self {
        let mut branch = Self {
            worlds: vec![TableauWorld::new(root_world.to_string())],
            edges: Vec::new(),
            pending: VecDeque::new(),
            deferred: VecDeque::new(),
            tip,
            closed: false,
        };
        branch.insert(0, formula.clone());
        branch
    }

    pub(crate) fn tip(&self) -> usize {
        self.tip
    }

    pub(crate) fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Process obligations until the branch closes, saturates open, or splits.
    pub(crate) fn run(
        &mut self,
        tree: &mut Vec<ProofNode>,
        config: &TableauConfig,
    ) -> Result<Outcome, TableauError> {
        loop {
            if self.closed {
                return Ok(Outcome::Closed);
            }
            if let Some((world, formula)) = self.pending.pop_front() {
                self.process(world, formula, tree, config)?;
                continue;
            }
            let Some(split) = self.deferred.pop_front() else {
                return Ok(Outcome::Open);
            };
            let known = &self.worlds[split.world].formulas;
            if known.contains(&split.left) || known.contains(&split.right) {
                continue;
            }
            let mut right = self.clone();
            self.assert(split.world, split.left, split.rule, tree);
            right.assert(split.world, split.right, split.rule, tree);
            return Ok(Outcome::Split(right));
        }
    }

    fn process(
        &mut self,
        world: usize,
        formula: Formula,
        tree: &mut Vec<ProofNode>,
        config: &TableauConfig,
    ) -> Result<(), TableauError> {
        match expand(&formula)? {
            Expansion::Literal => {}
            Expansion::Alpha { rule, conclusions } => {
                for conclusion in conclusions {
                    self.assert(world, conclusion, rule, tree);
                    if self.closed {
                        break;
                    }
                }
            }
            Expansion::Beta { rule, left, right } => {
                self.deferred.push_back(Split {
                    world,
                    rule,
                    left,
                    right,
                });
            }
            Expansion::Necessity { rule, agent, body } => {
                let targets: Vec<usize> = self
                    .edges
                    .iter()
                    .filter(|e| e.from == world && matches_label(&agent, &e.agent))
                    .map(|e| e.to)
                    .collect();
                self.worlds[world].necessities.push(Necessity {
                    agent,
                    body: body.clone(),
                    rule,
                });
                for target in targets {
                    self.assert(target, body.clone(), rule, tree);
                    if self.closed {
                        break;
                    }
                }
            }
            Expansion::Possibility { rule, agent, body } => {
                let satisfied = self.edges.iter().any(|e| {
                    e.from == world
                        && matches_label(&agent, &e.agent)
                        && self.worlds[e.to].formulas.contains(&body)
                });
                if satisfied {
                    return Ok(());
                }
                if self.worlds.len() >= config.max_worlds {
                    warn!(limit = config.max_worlds, "Tableau world limit reached");
                    return Err(TableauError::LimitExceeded {
                        what: "worlds on a branch",
                        limit: config.max_worlds,
                    });
                }

                let label = agent.unwrap_or_else(|| config.default_agent.clone());
                let target = self.worlds.len();
                let name = format!("{}{}", self.worlds[0].name, target);
                self.worlds.push(TableauWorld::new(name));
                self.edges.push(Edge {
                    agent: label.clone(),
                    from: world,
                    to: target,
                });

                self.assert(target, body, rule, tree);
                let inherited: Vec<(Formula, Rule)> = self.worlds[world]
                    .necessities
                    .iter()
                    .filter(|n| matches_label(&n.agent, &label))
                    .map(|n| (n.body.clone(), n.rule))
                    .collect();
                for (body, rule) in inherited {
                    if self.closed {
                        break;
                    }
                    self.assert(target, body, rule, tree);
                }
            }
        }
        Ok(())
    }

    /// Put `formula` on the branch at `world`, recording a proof node under
    /// the current tip. Already-known formulas are ignored.
    fn assert(&mut self, world: usize, formula: Formula, rule: Rule, tree: &mut Vec<ProofNode>) {
        if self.worlds[world].formulas.contains(&formula) {
            return;
        }
        let node = tree.len();
        tree.push(ProofNode::new(
            self.worlds[world].name.clone(),
            formula.clone(),
            rule,
        ));
        tree[self.tip].children.push(node);
        self.tip = node;
        self.insert(world, formula);
    }

    fn insert(&mut self, world: usize, formula: Formula) {
        let entry = &mut self.worlds[world];
        if !entry.formulas.insert(formula.clone()) {
            return;
        }
        match &formula {
            Formula::Atom(name) => {
                if entry.negative.contains(name) {
                    self.closed = true;
                }
                entry.positive.insert(name.clone());
            }
            Formula::Not(inner) => {
                if let Formula::Atom(name) = &**inner {
                    if entry.positive.contains(name) {
                        self.closed = true;
                    }
                    entry.negative.insert(name.clone());
                }
            }
            _ => {}
        }
        if self.closed {
            trace!(world = entry.name.as_str(), %formula, "Branch closed");
            return;
        }
        self.pending.push_back((world, formula));
    }

    /// The witness model of a saturated open branch.
    pub(crate) fn to_structure(&self) -> Result<KripkeStructure, TableauError> {
        let worlds = self
            .worlds
            .iter()
            .map(|w| {
                let truths = w
                    .positive
                    .iter()
                    .map(|p| (p.clone(), true))
                    .chain(w.negative.iter().map(|p| (p.clone(), false)));
                World::new(w.name.clone(), truths)
            })
            .collect();

        let mut relations: Relations = BTreeMap::new();
        for edge in &self.edges {
            relations.entry(edge.agent.clone()).or_default().insert((
                self.worlds[edge.from].name.clone(),
                self.worlds[edge.to].name.clone(),
            ));
        }

        Ok(KripkeStructure::new(worlds, relations)?)
    }
}

use std::fmt;

use epistemic_formula::Formula;
use epistemic_world::KripkeStructure;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::branch::{Branch, Outcome};
use crate::config::TableauConfig;
use crate::error::TableauError;
use crate::rules::{first_unsupported, Rule};

/// Result of a derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Satisfiability {
    Satisfiable,
    Unsatisfiable,
}

/// Leaf marker for a branch that ended at this node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    None,
    Closed,
    Open,
}

/// One asserted formula in the proof tree.
#[derive(Clone, Debug, Serialize)]
pub struct ProofNode {
    pub world: String,
    pub formula: Formula,
    pub rule: Rule,
    /// Indices into `ProofTree::nodes`.
    pub children: Vec<usize>,
    pub mark: Mark,
}

impl ProofNode {
    pub(crate) fn new(world: String, formula: Formula, rule: Rule) -> Self {
        Self {
            world,
            formula,
            rule,
            children: Vec::new(),
            mark: Mark::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TableauStats {
    /// Proof-tree nodes created.
    pub nodes: usize,
    /// Branches created, counting the initial one.
    pub branches: usize,
    pub closed_branches: usize,
    /// Worlds in the witness, zero when there is none.
    pub worlds: usize,
}

/// A tableau derivation for one formula.
///
/// Nodes are stored in an arena; node `0` is the input formula at the root
/// world. The tree is grown by `derive` and is empty before it runs.
#[derive(Debug)]
pub struct ProofTree {
    formula: Formula,
    config: TableauConfig,
    nodes: Vec<ProofNode>,
    outcome: Option<Satisfiability>,
    kripke_structure: Option<KripkeStructure>,
    stats: TableauStats,
}

impl ProofTree {
    pub fn new(formula: Formula) -> Self {
        Self::with_config(formula, TableauConfig::default())
    }

    pub fn with_config(formula: Formula, config: TableauConfig) -> Self {
        Self {
            formula,
            config,
            nodes: Vec::new(),
            outcome: None,
            kripke_structure: None,
            stats: TableauStats::default(),
        }
    }

    /// Run the tableau. Branches are explored depth first and the search
    /// stops at the first open branch, whose worlds become the witness
    /// returned by `kripke_structure`.
    ///
    /// Calling this again after a successful run returns the cached outcome.
    pub fn derive(&mut self) -> Result<Satisfiability, TableauError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }
        if let Some(unsupported) = first_unsupported(&self.formula) {
            return Err(TableauError::Unsupported(unsupported.clone()));
        }

        self.nodes.clear();
        self.kripke_structure = None;
        self.stats = TableauStats::default();

        let root = self.config.root_world.clone();
        self.nodes
            .push(ProofNode::new(root.clone(), self.formula.clone(), Rule::Root));
        let mut stack = vec![Branch::new(&root, &self.formula, 0)];
        let mut branches = 1;
        let mut closed = 0;

        let outcome = 'search: loop {
            let Some(mut branch) = stack.pop() else {
                break Satisfiability::Unsatisfiable;
            };
            loop {
                match branch.run(&mut self.nodes, &self.config)? {
                    Outcome::Closed => {
                        self.nodes[branch.tip()].mark = Mark::Closed;
                        closed += 1;
                        debug!(closed, remaining = stack.len(), "Branch closed");
                        break;
                    }
                    Outcome::Open => {
                        self.nodes[branch.tip()].mark = Mark::Open;
                        let structure = branch.to_structure()?;
                        if !self.formula.semantic(&structure, &root) {
                            warn!(formula = %self.formula, "Witness fails the formula at the root");
                            return Err(TableauError::WitnessRejected { root });
                        }
                        self.stats.worlds = branch.world_count();
                        self.kripke_structure = Some(structure);
                        break 'search Satisfiability::Satisfiable;
                    }
                    Outcome::Split(right) => {
                        branches += 1;
                        if branches > self.config.max_branches {
                            warn!(limit = self.config.max_branches, "Tableau branch limit reached");
                            return Err(TableauError::LimitExceeded {
                                what: "branches",
                                limit: self.config.max_branches,
                            });
                        }
                        stack.push(right);
                    }
                }
            }
        };

        self.stats.nodes = self.nodes.len();
        self.stats.branches = branches;
        self.stats.closed_branches = closed;
        self.outcome = Some(outcome);
        info!(
            formula = %self.formula,
            outcome = ?outcome,
            nodes = self.stats.nodes,
            branches,
            "Tableau derived"
        );
        Ok(outcome)
    }

    /// `None` until `derive` has succeeded.
    pub fn satisfiability(&self) -> Option<Satisfiability> {
        self.outcome
    }

    /// The witness model, present only for a satisfiable formula.
    pub fn kripke_structure(&self) -> Option<&KripkeStructure> {
        self.kripke_structure.as_ref()
    }

    pub fn root_world(&self) -> &str {
        &self.config.root_world
    }

    pub fn nodes(&self) -> &[ProofNode] {
        &self.nodes
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn config(&self) -> &TableauConfig {
        &self.config
    }

    pub fn stats(&self) -> TableauStats {
        self.stats
    }
}

impl fmt::Display for ProofTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tableau for {}", self.formula)?;
        writeln!(f, "---")?;
        if self.nodes.is_empty() {
            return writeln!(f, "(not derived)");
        }

        // Indent only where the tree branches; chains stay flat.
        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, indent)) = stack.pop() {
            let node = &self.nodes[index];
            write!(
                f,
                "{}{}: {} [{}]",
                "  ".repeat(indent),
                node.world,
                node.formula,
                node.rule.name()
            )?;
            match node.mark {
                Mark::Closed => write!(f, " ✗")?,
                Mark::Open => write!(f, " ○")?,
                Mark::None => {}
            }
            writeln!(f)?;

            let child_indent = if node.children.len() > 1 {
                indent + 1
            } else {
                indent
            };
            for &child in node.children.iter().rev() {
                stack.push((child, child_indent));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Formula {
        Formula::atom("p")
    }

    fn q() -> Formula {
        Formula::atom("q")
    }

    #[test]
    fn test_atom_is_satisfiable() {
        let mut tree = ProofTree::new(p());
        assert_eq!(tree.derive().unwrap(), Satisfiability::Satisfiable);
        let model = tree.kripke_structure().unwrap();
        assert_eq!(model.len(), 1);
        assert!(model.world("s").unwrap().holds("p"));
        assert_eq!(tree.nodes()[0].mark, Mark::Open);
    }

    #[test]
    fn test_contradiction_closes() {
        let mut tree = ProofTree::new(Formula::and(p(), Formula::not(p())));
        assert_eq!(tree.derive().unwrap(), Satisfiability::Unsatisfiable);
        assert!(tree.kripke_structure().is_none());
        assert!(tree.nodes().iter().any(|n| n.mark == Mark::Closed));
        assert_eq!(tree.stats().closed_branches, 1);
    }

    #[test]
    fn test_both_alternatives_close() {
        // (p ∨ q) ∧ ¬p ∧ ¬q
        let formula = Formula::and(
            Formula::or(p(), q()),
            Formula::and(Formula::not(p()), Formula::not(q())),
        );
        let mut tree = ProofTree::new(formula);
        assert_eq!(tree.derive().unwrap(), Satisfiability::Unsatisfiable);
        let stats = tree.stats();
        assert_eq!(stats.branches, 2);
        assert_eq!(stats.closed_branches, 2);
    }

    #[test]
    fn test_right_alternative_is_explored() {
        // (p ∨ q) ∧ ¬p forces the second disjunct.
        let formula = Formula::and(Formula::or(p(), q()), Formula::not(p()));
        let mut tree = ProofTree::new(formula.clone());
        assert_eq!(tree.derive().unwrap(), Satisfiability::Satisfiable);
        let model = tree.kripke_structure().unwrap();
        assert!(model.world("s").unwrap().holds("q"));
        assert!(formula.semantic(model, "s"));
    }

    #[test]
    fn test_possibility_creates_successor() {
        let formula = Formula::and(Formula::diamond_a("1", p()), Formula::box_a("1", q()));
        let mut tree = ProofTree::new(formula.clone());
        assert_eq!(tree.derive().unwrap(), Satisfiability::Satisfiable);
        let model = tree.kripke_structure().unwrap();
        assert_eq!(model.world_names().collect::<Vec<_>>(), vec!["s", "s1"]);
        let s1 = model.world("s1").unwrap();
        assert!(s1.holds("p") && s1.holds("q"));
        assert!(formula.semantic(model, "s"));
    }

    #[test]
    fn test_unindexed_diamond_uses_default_agent() {
        let mut tree = ProofTree::new(Formula::possibly(p()));
        tree.derive().unwrap();
        let model = tree.kripke_structure().unwrap();
        assert!(model.has_agent("*"));
        assert_eq!(model.edge_count("*"), 1);
    }

    #[test]
    fn test_agent_box_does_not_reach_other_agents() {
        // [1]¬p ∧ ⟨2⟩p is satisfiable because the edges differ.
        let formula = Formula::and(
            Formula::box_a("1", Formula::not(p())),
            Formula::diamond_a("2", p()),
        );
        let mut tree = ProofTree::new(formula);
        assert_eq!(tree.derive().unwrap(), Satisfiability::Satisfiable);

        // □¬p ∧ ⟨2⟩p is not.
        let formula = Formula::and(
            Formula::necessarily(Formula::not(p())),
            Formula::diamond_a("2", p()),
        );
        let mut tree = ProofTree::new(formula);
        assert_eq!(tree.derive().unwrap(), Satisfiability::Unsatisfiable);
    }

    #[test]
    fn test_derive_is_cached() {
        let mut tree = ProofTree::new(Formula::or(p(), q()));
        let first = tree.derive().unwrap();
        let nodes = tree.nodes().len();
        assert_eq!(tree.derive().unwrap(), first);
        assert_eq!(tree.nodes().len(), nodes);
        assert_eq!(tree.satisfiability(), Some(first));
    }

    #[test]
    fn test_star_fails_fast() {
        let mut tree = ProofTree::new(Formula::and(p(), Formula::diamond_star(q())));
        let err = tree.derive().unwrap_err();
        assert!(matches!(err, TableauError::Unsupported(Formula::DiamondStar(_))));
        assert!(tree.nodes().is_empty());
        assert_eq!(tree.satisfiability(), None);
    }

    #[test]
    fn test_world_limit() {
        let config = TableauConfig {
            max_worlds: 2,
            ..TableauConfig::default()
        };
        let formula = Formula::possibly(Formula::possibly(p()));
        let mut tree = ProofTree::with_config(formula, config);
        let err = tree.derive().unwrap_err();
        assert!(matches!(err, TableauError::LimitExceeded { limit: 2, .. }));
    }

    #[test]
    fn test_branch_limit() {
        let config = TableauConfig {
            max_branches: 1,
            ..TableauConfig::default()
        };
        let mut tree = ProofTree::with_config(Formula::or(p(), q()), config);
        let err = tree.derive().unwrap_err();
        assert!(matches!(
            err,
            TableauError::LimitExceeded {
                what: "branches",
                limit: 1
            }
        ));
    }

    #[test]
    fn test_custom_root_name() {
        let config = TableauConfig {
            root_world: "root".to_string(),
            ..TableauConfig::default()
        };
        let mut tree = ProofTree::with_config(Formula::possibly(p()), config);
        tree.derive().unwrap();
        assert_eq!(tree.root_world(), "root");
        assert_eq!(
            tree.kripke_structure()
                .unwrap()
                .world_names()
                .collect::<Vec<_>>(),
            vec!["root", "root1"]
        );
    }

    #[test]
    fn test_display_marks_branches() {
        let formula = Formula::and(Formula::or(p(), q()), Formula::not(p()));
        let mut tree = ProofTree::new(formula);
        assert_eq!(format!("{tree}").lines().nth(2), Some("(not derived)"));
        tree.derive().unwrap();
        let rendered = tree.to_string();
        assert!(rendered.starts_with("Tableau for "));
        assert!(rendered.contains("[root]"));
        assert!(rendered.contains(" ✗"));
        assert!(rendered.contains(" ○"));
        assert!(rendered.contains("\n  s: q [∨-elim] ○"));
    }
}

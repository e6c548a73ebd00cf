//! Built-in tableau demonstrations.

use std::fmt;
use std::str::FromStr;

use epistemic_formula::Formula;
use epistemic_tableau::{ProofNode, ProofTree, Satisfiability, TableauConfig, TableauStats};
use epistemic_world::KripkeStructure;
use serde::Serialize;

use crate::error::ScenarioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// (□p ∧ r) ∨ (r ∧ ◇q)
    #[default]
    Satisfiable,
    /// p ∧ ¬p
    Contradiction,
    /// [1]p ∧ ⟨1⟩q ∧ ⟨2⟩¬p
    Knowledge,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Satisfiable, Demo::Contradiction, Demo::Knowledge];

    pub fn name(&self) -> &'static str {
        match self {
            Demo::Satisfiable => "satisfiable",
            Demo::Contradiction => "contradiction",
            Demo::Knowledge => "knowledge",
        }
    }

    pub fn formula(&self) -> Formula {
        let p = Formula::atom("p");
        let q = Formula::atom("q");
        let r = Formula::atom("r");
        match self {
            Demo::Satisfiable => Formula::or(
                Formula::and(Formula::necessarily(p), r.clone()),
                Formula::and(r, Formula::possibly(q)),
            ),
            Demo::Contradiction => Formula::and(p.clone(), Formula::not(p)),
            Demo::Knowledge => Formula::and(
                Formula::box_a("1", p.clone()),
                Formula::and(
                    Formula::diamond_a("1", q),
                    Formula::diamond_a("2", Formula::not(p)),
                ),
            ),
        }
    }

    /// Derive the demo formula under `config`.
    pub fn run(&self, config: TableauConfig) -> Result<DemoReport, ScenarioError> {
        let mut tree = ProofTree::with_config(self.formula(), config);
        let satisfiability = tree.derive()?;
        Ok(DemoReport {
            demo: *self,
            rendered: tree.to_string(),
            formula: tree.formula().clone(),
            satisfiability,
            stats: tree.stats(),
            nodes: tree.nodes().to_vec(),
            witness: tree.kripke_structure().cloned(),
        })
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name() == s)
            .ok_or_else(|| ScenarioError::UnknownDemo(s.to_string()))
    }
}

/// Everything a demo run produced.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub demo: Demo,
    pub formula: Formula,
    pub satisfiability: Satisfiability,
    pub stats: TableauStats,
    pub nodes: Vec<ProofNode>,
    pub witness: Option<KripkeStructure>,
    /// The proof tree as text.
    #[serde(skip)]
    pub rendered: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_names_round_trip() {
        for demo in Demo::ALL {
            assert_eq!(demo.name().parse::<Demo>().unwrap(), demo);
        }
        assert!(matches!(
            "tautology".parse::<Demo>(),
            Err(ScenarioError::UnknownDemo(_))
        ));
    }

    #[test]
    fn test_demo_outcomes() {
        let expected = [
            (Demo::Satisfiable, Satisfiability::Satisfiable),
            (Demo::Contradiction, Satisfiability::Unsatisfiable),
            (Demo::Knowledge, Satisfiability::Satisfiable),
        ];
        for (demo, outcome) in expected {
            let report = demo.run(TableauConfig::default()).unwrap();
            assert_eq!(report.satisfiability, outcome, "{demo}");
            assert_eq!(report.witness.is_some(), outcome == Satisfiability::Satisfiable);
        }
    }

    #[test]
    fn test_report_json_skips_rendering() {
        let report = Demo::Contradiction.run(TableauConfig::default()).unwrap();
        assert!(report.rendered.contains("✗"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["demo"], "contradiction");
        assert_eq!(json["satisfiability"], "unsatisfiable");
        assert!(json["witness"].is_null());
        assert!(json.get("rendered").is_none());
    }
}

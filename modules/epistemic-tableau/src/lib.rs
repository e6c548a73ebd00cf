//! Tableau satisfiability checking for multi-agent modal formulas.
//!
//! `ProofTree::derive` decomposes a formula world by world:
//!
//! - **Alpha rules** extend the current branch (`∧`, `¬∨`, `¬¬`)
//! - **Beta rules** split the branch in two (`∨`, `¬∧`)
//! - **Necessity rules** push a body along every matching edge (`□`, `[a]`, `¬◇`, `¬⟨a⟩`)
//! - **Possibility rules** create (or reuse) a successor world (`◇`, `⟨a⟩`, `¬□`, `¬[a]`)
//!
//! A branch closes when an atom and its negation meet at the same world. The
//! first branch left open is turned into a witness `KripkeStructure`.
//!
//! # Example
//!
//! ```
//! use epistemic_formula::Formula;
//! use epistemic_tableau::{ProofTree, Satisfiability};
//!
//! let p = Formula::atom("p");
//! let mut tree = ProofTree::new(Formula::and(p.clone(), Formula::not(p)));
//! assert_eq!(tree.derive().unwrap(), Satisfiability::Unsatisfiable);
//! assert!(tree.kripke_structure().is_none());
//! ```

mod branch;
pub mod config;
pub mod error;
pub mod proof;
pub mod rules;

pub use config::TableauConfig;
pub use error::TableauError;
pub use proof::{Mark, ProofNode, ProofTree, Satisfiability, TableauStats};
pub use rules::{Expansion, Rule};

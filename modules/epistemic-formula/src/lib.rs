//! Modal formulas, their semantics over Kripke structures, and public
//! announcements.
//!
//! `Formula` is a closed sum type; the evaluator in `semantic` is a single
//! exhaustive match over it. Announcements restrict a structure to the worlds
//! where a formula holds (`Announce::solve`) and are chained through a
//! `KnowledgeBase`.

pub mod announce;
pub mod error;
pub mod formula;
pub mod knowledge;
pub mod semantic;

pub use announce::{Announce, MAX_PRUNE_CANDIDATES};
pub use error::AnnounceError;
pub use formula::Formula;
pub use knowledge::KnowledgeBase;
pub use semantic::reachable;

//! Possible-worlds models for several knowing agents.
//!
//! A `KripkeStructure` is an ordered set of `World`s plus one accessibility
//! relation per agent. Structures are validated once at construction and never
//! mutated afterwards; every update returns a fresh structure.

pub mod error;
pub mod kripke;
pub mod relations;
pub mod world;

pub use error::ModelError;
pub use kripke::KripkeStructure;
pub use relations::{add_reflexive_edges, add_symmetric_edges, relations_from, Relations};
pub use world::{Valuation, World};

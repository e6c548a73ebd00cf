use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Proposition name → truth value. Propositions not listed are false.
pub type Valuation = BTreeMap<String, bool>;

/// A possible state of affairs: an id plus the propositions true in it.
///
/// Equality and hashing cover both the id and the valuation, so two worlds
/// sharing an id but disagreeing on a proposition are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct World {
    name: String,
    #[serde(default)]
    assignment: Valuation,
}

impl World {
    pub fn new<N, I, K>(name: N, assignment: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self {
            name: name.into(),
            assignment: assignment.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// A world with an empty valuation.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assignment: Valuation::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assignment(&self) -> &Valuation {
        &self.assignment
    }

    /// Truth of a proposition here. A missing key reads as false.
    pub fn holds(&self, proposition: &str) -> bool {
        self.assignment.get(proposition).copied().unwrap_or(false)
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, (prop, value)) in self.assignment.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{prop}: {value}")?;
        }
        write!(f, "}}")
    }
}

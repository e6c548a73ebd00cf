use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A modal-logic formula.
///
/// `Box`/`Diamond` quantify over the union of every agent's relation,
/// `BoxA`/`DiamondA` over a single agent's, and `BoxStar`/`DiamondStar` over
/// the reflexive-transitive closure of the union (common knowledge).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Box(Box<Formula>),
    Diamond(Box<Formula>),
    BoxA(String, Box<Formula>),
    DiamondA(String, Box<Formula>),
    BoxStar(Box<Formula>),
    DiamondStar(Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    pub fn not(inner: Formula) -> Self {
        Self::Not(Box::new(inner))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Material implication, encoded as `¬a ∨ b`.
    pub fn implies(antecedent: Formula, consequent: Formula) -> Self {
        Self::or(Self::not(antecedent), consequent)
    }

    /// `Box`: true when every successor, through any agent, satisfies `inner`.
    pub fn necessarily(inner: Formula) -> Self {
        Self::Box(Box::new(inner))
    }

    /// `Diamond`: true when some successor, through any agent, satisfies `inner`.
    pub fn possibly(inner: Formula) -> Self {
        Self::Diamond(Box::new(inner))
    }

    /// Agent `agent` knows `inner`.
    pub fn box_a(agent: impl Into<String>, inner: Formula) -> Self {
        Self::BoxA(agent.into(), Box::new(inner))
    }

    /// Agent `agent` considers `inner` possible.
    pub fn diamond_a(agent: impl Into<String>, inner: Formula) -> Self {
        Self::DiamondA(agent.into(), Box::new(inner))
    }

    /// `inner` is common knowledge.
    pub fn box_star(inner: Formula) -> Self {
        Self::BoxStar(Box::new(inner))
    }

    pub fn diamond_star(inner: Formula) -> Self {
        Self::DiamondStar(Box::new(inner))
    }

    /// Negation that cancels an outer `Not` instead of stacking another one.
    pub fn negate(&self) -> Self {
        match self {
            Self::Not(inner) => (**inner).clone(),
            other => Self::not(other.clone()),
        }
    }

    /// An atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Self::Atom(_) => true,
            Self::Not(inner) => matches!(**inner, Self::Atom(_)),
            _ => false,
        }
    }

    /// Whether `BoxStar` or `DiamondStar` occurs anywhere inside.
    pub fn has_star(&self) -> bool {
        match self {
            Self::Atom(_) => false,
            Self::BoxStar(_) | Self::DiamondStar(_) => true,
            Self::Not(f) | Self::Box(f) | Self::Diamond(f) => f.has_star(),
            Self::BoxA(_, f) | Self::DiamondA(_, f) => f.has_star(),
            Self::And(l, r) | Self::Or(l, r) => l.has_star() || r.has_star(),
        }
    }

    /// Every proposition name mentioned.
    pub fn atoms(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Atom(name) => {
                out.insert(name.as_str());
            }
            Self::Not(f)
            | Self::Box(f)
            | Self::Diamond(f)
            | Self::BoxStar(f)
            | Self::DiamondStar(f)
            | Self::BoxA(_, f)
            | Self::DiamondA(_, f) => f.collect_atoms(out),
            Self::And(l, r) | Self::Or(l, r) => {
                l.collect_atoms(out);
                r.collect_atoms(out);
            }
        }
    }

    /// Every agent named by an indexed modality.
    pub fn agents(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_agents(&mut out);
        out
    }

    fn collect_agents<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Atom(_) => {}
            Self::BoxA(agent, f) | Self::DiamondA(agent, f) => {
                out.insert(agent.as_str());
                f.collect_agents(out);
            }
            Self::Not(f)
            | Self::Box(f)
            | Self::Diamond(f)
            | Self::BoxStar(f)
            | Self::DiamondStar(f) => f.collect_agents(out),
            Self::And(l, r) | Self::Or(l, r) => {
                l.collect_agents(out);
                r.collect_agents(out);
            }
        }
    }

    /// Maximum nesting of modal operators.
    pub fn modal_depth(&self) -> usize {
        match self {
            Self::Atom(_) => 0,
            Self::Not(f) => f.modal_depth(),
            Self::And(l, r) | Self::Or(l, r) => l.modal_depth().max(r.modal_depth()),
            Self::Box(f) | Self::Diamond(f) | Self::BoxStar(f) | Self::DiamondStar(f) => {
                1 + f.modal_depth()
            }
            Self::BoxA(_, f) | Self::DiamondA(_, f) => 1 + f.modal_depth(),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name) => write!(f, "{name}"),
            Self::Not(inner) => write!(f, "¬{inner}"),
            Self::And(l, r) => write!(f, "({l} ∧ {r})"),
            Self::Or(l, r) => write!(f, "({l} ∨ {r})"),
            Self::Box(inner) => write!(f, "□{inner}"),
            Self::Diamond(inner) => write!(f, "◇{inner}"),
            Self::BoxA(agent, inner) => write!(f, "[{agent}]{inner}"),
            Self::DiamondA(agent, inner) => write!(f, "⟨{agent}⟩{inner}"),
            Self::BoxStar(inner) => write!(f, "□*{inner}"),
            Self::DiamondStar(inner) => write!(f, "◇*{inner}"),
        }
    }
}

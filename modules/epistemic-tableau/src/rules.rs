//! Tableau decomposition rules.
//!
//! `expand` classifies a formula asserted at a world into the rule that
//! decomposes it. Negations are pushed inward as part of the classification,
//! so `¬□f` behaves as `◇¬f` and `¬⟨a⟩f` as `[a]¬f`.

use epistemic_formula::Formula;
use serde::Serialize;

use crate::error::TableauError;

/// The rule that put a formula on a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// The input formula at the root world.
    Root,
    /// ¬¬A ⊢ A
    NotNot,
    /// A ∧ B ⊢ A, B
    AndElim,
    /// ¬(A ∨ B) ⊢ ¬A, ¬B
    NotOr,
    /// A ∨ B ⊢ A | B
    OrElim,
    /// ¬(A ∧ B) ⊢ ¬A | ¬B
    NotAnd,
    /// □A or [a]A at w, edge w→v ⊢ A at v
    BoxElim,
    /// ¬◇A or ¬⟨a⟩A at w, edge w→v ⊢ ¬A at v
    NotDiamond,
    /// ◇A or ⟨a⟩A at w ⊢ A at a successor
    DiamondElim,
    /// ¬□A or ¬[a]A at w ⊢ ¬A at a successor
    NotBox,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Root => "root",
            Rule::NotNot => "¬¬",
            Rule::AndElim => "∧-elim",
            Rule::NotOr => "¬∨",
            Rule::OrElim => "∨-elim",
            Rule::NotAnd => "¬∧",
            Rule::BoxElim => "□-elim",
            Rule::NotDiamond => "¬◇",
            Rule::DiamondElim => "◇-elim",
            Rule::NotBox => "¬□",
        }
    }
}

/// How a formula asserted at a world is decomposed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// An atom or negated atom; only checked for contradictions.
    Literal,
    /// Every conclusion holds at the same world.
    Alpha { rule: Rule, conclusions: Vec<Formula> },
    /// One of two alternatives holds at the same world.
    Beta { rule: Rule, left: Formula, right: Formula },
    /// `body` holds at every successor along matching edges. `agent: None`
    /// matches every edge.
    Necessity {
        rule: Rule,
        agent: Option<String>,
        body: Formula,
    },
    /// `body` holds at some successor along a matching edge.
    Possibility {
        rule: Rule,
        agent: Option<String>,
        body: Formula,
    },
}

/// Classify `formula`. Common-knowledge operators have no rule here and are
/// reported as `TableauError::Unsupported`.
pub fn expand(formula: &Formula) -> Result<Expansion, TableauError> {
    let expansion = match formula {
        Formula::Atom(_) => Expansion::Literal,
        Formula::And(a, b) => Expansion::Alpha {
            rule: Rule::AndElim,
            conclusions: vec![(**a).clone(), (**b).clone()],
        },
        Formula::Or(a, b) => Expansion::Beta {
            rule: Rule::OrElim,
            left: (**a).clone(),
            right: (**b).clone(),
        },
        Formula::Box(a) => Expansion::Necessity {
            rule: Rule::BoxElim,
            agent: None,
            body: (**a).clone(),
        },
        Formula::BoxA(agent, a) => Expansion::Necessity {
            rule: Rule::BoxElim,
            agent: Some(agent.clone()),
            body: (**a).clone(),
        },
        Formula::Diamond(a) => Expansion::Possibility {
            rule: Rule::DiamondElim,
            agent: None,
            body: (**a).clone(),
        },
        Formula::DiamondA(agent, a) => Expansion::Possibility {
            rule: Rule::DiamondElim,
            agent: Some(agent.clone()),
            body: (**a).clone(),
        },
        Formula::Not(inner) => match &**inner {
            Formula::Atom(_) => Expansion::Literal,
            Formula::Not(a) => Expansion::Alpha {
                rule: Rule::NotNot,
                conclusions: vec![(**a).clone()],
            },
            Formula::Or(a, b) => Expansion::Alpha {
                rule: Rule::NotOr,
                conclusions: vec![a.negate(), b.negate()],
            },
            Formula::And(a, b) => Expansion::Beta {
                rule: Rule::NotAnd,
                left: a.negate(),
                right: b.negate(),
            },
            Formula::Box(a) => Expansion::Possibility {
                rule: Rule::NotBox,
                agent: None,
                body: a.negate(),
            },
            Formula::BoxA(agent, a) => Expansion::Possibility {
                rule: Rule::NotBox,
                agent: Some(agent.clone()),
                body: a.negate(),
            },
            Formula::Diamond(a) => Expansion::Necessity {
                rule: Rule::NotDiamond,
                agent: None,
                body: a.negate(),
            },
            Formula::DiamondA(agent, a) => Expansion::Necessity {
                rule: Rule::NotDiamond,
                agent: Some(agent.clone()),
                body: a.negate(),
            },
            Formula::BoxStar(_) | Formula::DiamondStar(_) => {
                return Err(TableauError::Unsupported(formula.clone()))
            }
        },
        Formula::BoxStar(_) | Formula::DiamondStar(_) => {
            return Err(TableauError::Unsupported(formula.clone()))
        }
    };
    Ok(expansion)
}

/// The first common-knowledge subformula, searched pre-order.
pub fn first_unsupported(formula: &Formula) -> Option<&Formula> {
    match formula {
        Formula::Atom(_) => None,
        Formula::BoxStar(_) | Formula::DiamondStar(_) => Some(formula),
        Formula::Not(a) | Formula::Box(a) | Formula::Diamond(a) => first_unsupported(a),
        Formula::BoxA(_, a) | Formula::DiamondA(_, a) => first_unsupported(a),
        Formula::And(a, b) | Formula::Or(a, b) => {
            first_unsupported(a).or_else(|| first_unsupported(b))
        }
    }
}

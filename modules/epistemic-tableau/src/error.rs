use epistemic_formula::Formula;
use epistemic_world::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableauError {
    #[error("Unsupported formula shape for the tableau: {0}")]
    Unsupported(Formula),

    #[error("Tableau limit exceeded: more than {limit} {what}")]
    LimitExceeded { what: &'static str, limit: usize },

    #[error("Witness model does not satisfy the formula at {root}")]
    WitnessRejected { root: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),
}

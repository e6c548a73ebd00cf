use epistemic_formula::AnnounceError;
use epistemic_tableau::TableauError;
use epistemic_world::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Announce(#[from] AnnounceError),

    #[error(transparent)]
    Tableau(#[from] TableauError),

    #[error("Unknown demo: {0} (expected one of: satisfiable, contradiction, knowledge)")]
    UnknownDemo(String),
}

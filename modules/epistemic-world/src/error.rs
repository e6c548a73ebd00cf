use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Duplicate world id: {0}")]
    DuplicateWorld(String),

    #[error("Relation for agent {agent} references unknown world {world}")]
    UnknownWorld { agent: String, world: String },
}

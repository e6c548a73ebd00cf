use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnounceError {
    #[error("Prune search too large: {candidates} violating worlds (limit {limit})")]
    PruneSearchTooLarge { candidates: usize, limit: usize },
}

use std::env;

use tracing::info;

use crate::error::TableauError;

/// Tableau settings, loadable from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableauConfig {
    /// Name of the world the input formula is asserted at.
    pub root_world: String,
    /// Edge label used for successors created by an unindexed `◇`.
    pub default_agent: String,
    /// Worlds allowed on a single branch.
    pub max_worlds: usize,
    /// Branches allowed over the whole derivation.
    pub max_branches: usize,
}

impl Default for TableauConfig {
    fn default() -> Self {
        Self {
            root_world: "s".to_string(),
            default_agent: "*".to_string(),
            max_worlds: 10_000,
            max_branches: 100_000,
        }
    }
}

impl TableauConfig {
    /// Load from `TABLEAU_ROOT_WORLD`, `TABLEAU_DEFAULT_AGENT`,
    /// `TABLEAU_MAX_WORLDS` and `TABLEAU_MAX_BRANCHES`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, TableauError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TableauError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            root_world: lookup("TABLEAU_ROOT_WORLD").unwrap_or(defaults.root_world),
            default_agent: lookup("TABLEAU_DEFAULT_AGENT").unwrap_or(defaults.default_agent),
            max_worlds: parse_limit(&lookup, "TABLEAU_MAX_WORLDS", defaults.max_worlds)?,
            max_branches: parse_limit(&lookup, "TABLEAU_MAX_BRANCHES", defaults.max_branches)?,
        };
        if config.root_world.is_empty() {
            return Err(TableauError::Config(
                "TABLEAU_ROOT_WORLD must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn log_summary(&self) {
        info!(
            root_world = self.root_world.as_str(),
            default_agent = self.default_agent.as_str(),
            max_worlds = self.max_worlds,
            max_branches = self.max_branches,
            "Tableau config"
        );
    }
}

fn parse_limit<F>(lookup: &F, key: &str, default: usize) -> Result<usize, TableauError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(TableauError::Config(format!(
                "{key} must be a positive integer, got {raw:?}"
            ))),
            Ok(value) => Ok(value),
        },
    }
}

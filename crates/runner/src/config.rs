//! Tournament configuration
//!
//! Loaded from JSON. Omitted fields take their defaults; an empty policy
//! list means one seeded random policy per firm.

use oligopoly_core::{ConfigError, MarketConfig};
use oligopoly_strategy::PolicySpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub market: MarketConfig,
    /// Number of independent episodes
    pub episodes: u32,
    /// Base seed; episode `k` uses `seed + k`
    pub seed: Option<u64>,
    /// Run episodes on blocking worker threads
    pub parallel: bool,
    /// One policy per firm, in firm order
    pub policies: Vec<PolicySpec>,
    /// JSON-lines trajectory output
    pub output: Option<PathBuf>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            episodes: 10,
            seed: None,
            parallel: true,
            policies: Vec::new(),
            output: None,
        }
    }
}

impl TournamentConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.market.validate()?;
        Ok(config)
    }

    /// Policies in firm order, defaulting to random play
    pub fn resolved_policies(&self) -> Vec<PolicySpec> {
        if self.policies.is_empty() {
            vec![PolicySpec::default(); self.market.n_firms]
        } else {
            self.policies.clone()
        }
    }

    /// Seed for episode `episode`, if the tournament is seeded
    pub fn episode_seed(&self, episode: u32) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(u64::from(episode)))
    }
}

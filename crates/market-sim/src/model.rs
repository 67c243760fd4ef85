// Re-export domain types from oligopoly-core
pub use oligopoly_core::{FirmAction, FirmId, MarketConfig, Observation, Regime};

use crate::domain::ProfitBreakdown;
use serde::Serialize;

/// Returned by `reset`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResetInfo {
    /// Seed used to reseed the RNG, if any
    pub seed: Option<u64>,
}

/// Per-step diagnostics that are not part of the observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    /// Units sold per firm
    pub quantities: Vec<f64>,
    /// Investment after flooring at zero
    pub rd_investments: Vec<f64>,
    pub cycle_multiplier: f64,
    pub innovation_power: f64,
    pub total_demand: f64,
    pub profits: Vec<ProfitBreakdown>,
}

/// Result of one `step`, indexed by firm
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Identical full-state observation for every firm
    pub observations: Vec<Observation>,
    pub rewards: Vec<f64>,
    /// All firms terminate together
    pub dones: Vec<bool>,
    pub info: StepInfo,
}

impl StepOutcome {
    pub fn reward(&self, firm: FirmId) -> Option<f64> {
        self.rewards.get(firm.index()).copied()
    }

    pub fn observation(&self, firm: FirmId) -> Option<&Observation> {
        self.observations.get(firm.index())
    }

    /// True once the episode has reached `max_steps`
    pub fn is_done(&self) -> bool {
        self.dones.iter().all(|d| *d)
    }
}

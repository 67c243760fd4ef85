//! Undercutting Strategy
//!
//! A price-war rule that:
//! - Reads rivals' last posted prices from the observation
//! - Posts just below their average
//! - Never goes below its own marginal cost plus a safety margin

use log::debug;
use oligopoly_core::{FirmAction, FirmId, Observation};
use oligopoly_ports::Policy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndercutConfig {
    /// Amount below the rivals' mean price
    pub undercut: f64,
    /// Margin kept above marginal cost
    pub floor_margin: f64,
    pub investment: f64,
}

impl Default for UndercutConfig {
    fn default() -> Self {
        Self {
            undercut: 5.0,
            floor_margin: 2.0,
            investment: 0.0,
        }
    }
}

pub struct UndercutPolicy {
    config: UndercutConfig,
}

impl UndercutPolicy {
    pub fn new(config: UndercutConfig) -> Self {
        Self { config }
    }
}

impl Policy for UndercutPolicy {
    fn name(&self) -> &str {
        "undercut"
    }

    fn act(&mut self, firm: FirmId, observation: &Observation) -> FirmAction {
        let rivals = observation
            .mean_rival_price(firm)
            .unwrap_or(observation.avg_price);
        let floor = observation
            .marginal_cost(firm)
            .map(|mc| mc + self.config.floor_margin)
            .unwrap_or(0.0);

        let target = rivals - self.config.undercut;
        if target < floor {
            debug!(
                "[Undercut] {} at floor {:.2} (rivals {:.2})",
                firm, floor, rivals
            );
        }

        FirmAction::new(target.max(floor), self.config.investment)
    }
}

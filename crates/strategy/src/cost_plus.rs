use oligopoly_core::{FirmAction, FirmId, Observation};
use oligopoly_ports::Policy;
use serde::{Deserialize, Serialize};

/// Prices at a fixed markup over the observed marginal cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostPlusPolicy {
    /// e.g. 0.5 = price at 150% of marginal cost
    pub markup: f64,
    pub investment: f64,
}

impl CostPlusPolicy {
    pub fn new(markup: f64, investment: f64) -> Self {
        Self { markup, investment }
    }
}

impl Policy for CostPlusPolicy {
    fn name(&self) -> &str {
        "cost_plus"
    }

    fn act(&mut self, firm: FirmId, observation: &Observation) -> FirmAction {
        let cost = observation
            .marginal_cost(firm)
            .unwrap_or(observation.avg_price);
        FirmAction::new(cost * (1.0 + self.markup), self.investment)
    }
}

use oligopoly_core::{FirmAction, FirmId, Observation};
use oligopoly_ports::Policy;
use serde::{Deserialize, Serialize};

/// Always posts the same price and investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPolicy {
    pub price: f64,
    pub investment: f64,
}

impl FixedPolicy {
    pub fn new(price: f64, investment: f64) -> Self {
        Self { price, investment }
    }
}

impl Policy for FixedPolicy {
    fn name(&self) -> &str {
        "fixed"
    }

    fn act(&mut self, _firm: FirmId, _observation: &Observation) -> FirmAction {
        FirmAction::new(self.price, self.investment)
    }
}

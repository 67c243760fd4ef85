//! Uniform random exploration
//!
//! Samples price and investment uniformly from a box. With a seed the
//! action stream is reproducible, which keeps tournaments comparable.

use log::debug;
use oligopoly_core::{FirmAction, FirmId, MarketConfig, Observation};
use oligopoly_ports::Policy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomPolicyConfig {
    pub price_low: f64,
    pub price_high: f64,
    pub max_investment: f64,
    pub seed: Option<u64>,
}

impl RandomPolicyConfig {
    /// Sample from the market's nominal action box
    pub fn for_market(market: &MarketConfig) -> Self {
        let bounds = market.action_bounds();
        Self {
            price_low: bounds.low[0],
            price_high: bounds.high[0],
            max_investment: bounds.high[1],
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for RandomPolicyConfig {
    fn default() -> Self {
        Self::for_market(&MarketConfig::default())
    }
}

pub struct RandomPolicy {
    config: RandomPolicyConfig,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(config: RandomPolicyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    fn sample(&mut self, low: f64, high: f64) -> f64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.rng.gen_range(low..=high)
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn act(&mut self, _firm: FirmId, _observation: &Observation) -> FirmAction {
        let price = self.sample(self.config.price_low, self.config.price_high);
        let investment = self.sample(0.0, self.config.max_investment.max(0.0));
        FirmAction::new(price, investment)
    }

    fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            debug!("[Random] reseeding with {}", seed);
            self.rng = StdRng::seed_from_u64(seed);
        }
    }
}

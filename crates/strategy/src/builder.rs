//! Declarative policy selection for configuration files

use oligopoly_core::MarketConfig;
use oligopoly_ports::Policy;
use serde::{Deserialize, Serialize};

use crate::{
    CostPlusPolicy, FixedPolicy, RandomPolicy, RandomPolicyConfig, UndercutConfig, UndercutPolicy,
};

/// Serializable description of a policy
///
/// ```json
/// { "kind": "cost_plus", "markup": 0.8, "investment": 2.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicySpec {
    Fixed {
        price: f64,
        #[serde(default)]
        investment: f64,
    },
    /// Omitted price bounds fall back to the market's action box
    Random {
        #[serde(default)]
        price_low: Option<f64>,
        #[serde(default)]
        price_high: Option<f64>,
        #[serde(default)]
        max_investment: Option<f64>,
    },
    CostPlus {
        markup: f64,
        #[serde(default)]
        investment: f64,
    },
    Undercut(UndercutConfig),
}

impl PolicySpec {
    /// Name reported by the policies this spec builds
    pub fn name(&self) -> &'static str {
        match self {
            PolicySpec::Fixed { .. } => "fixed",
            PolicySpec::Random { .. } => "random",
            PolicySpec::CostPlus { .. } => "cost_plus",
            PolicySpec::Undercut(_) => "undercut",
        }
    }

    /// Build a fresh policy instance for one episode
    pub fn build(&self, market: &MarketConfig, seed: Option<u64>) -> Box<dyn Policy> {
        match self {
            PolicySpec::Fixed { price, investment } => Box::new(FixedPolicy::new(*price, *investment)),
            PolicySpec::Random {
                price_low,
                price_high,
                max_investment,
            } => {
                let defaults = RandomPolicyConfig::for_market(market);
                Box::new(RandomPolicy::new(RandomPolicyConfig {
                    price_low: price_low.unwrap_or(defaults.price_low),
                    price_high: price_high.unwrap_or(defaults.price_high),
                    max_investment: max_investment.unwrap_or(defaults.max_investment),
                    seed,
                }))
            }
            PolicySpec::CostPlus { markup, investment } => {
                Box::new(CostPlusPolicy::new(*markup, *investment))
            }
            PolicySpec::Undercut(config) => Box::new(UndercutPolicy::new(*config)),
        }
    }
}

impl Default for PolicySpec {
    fn default() -> Self {
        PolicySpec::Random {
            price_low: None,
            price_high: None,
            max_investment: None,
        }
    }
}

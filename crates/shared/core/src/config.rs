//! Market configuration
//!
//! Every economic constant the simulator consumes lives here. A config is
//! fixed for the lifetime of a simulator instance; two instances with
//! different configs never share state.
//!
//! Supports JSON files where any omitted field takes its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::values::{Money, Price};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid market config: {0}")]
    Invalid(String),
}

/// Nominal action box: `[price, investment]` lower and upper corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionBounds {
    pub low: [f64; 2],
    pub high: [f64; 2],
}

/// Economic parameters of the oligopoly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Number of competing firms
    pub n_firms: usize,
    /// Episode length in periods
    pub max_steps: u32,

    // Demand
    /// Base market size (units)
    pub base_demand: f64,
    /// Exponential demand response to average price
    pub price_elasticity: f64,

    // Cost structure
    pub base_marginal_cost: Money,
    pub fixed_capital_cost: Money,
    pub compliance_fixed_cost: Money,
    /// Variable compliance cost per unit sold
    pub compliance_variable_rate: Money,
    /// Quadratic R&D cost coefficient
    pub rd_cost_coefficient: f64,

    // Competition
    /// Softmax price sensitivity (alpha)
    pub price_sensitivity: f64,
    /// Base innovation power (beta0)
    pub innovation_power: f64,
    /// Linear growth of innovation power per elapsed step
    pub tech_progress_rate: f64,
    /// Dampening of innovation power by aggregate innovation
    pub innovation_diminishing: f64,

    // Regulation
    pub price_ceiling: Price,
    /// Minimum legal margin above marginal cost
    pub min_margin: Price,

    // Economic cycle
    pub boom_multiplier: f64,
    pub recession_multiplier: f64,
    pub regime_noise_std: f64,
    pub boom_to_recession_prob: f64,
    pub recession_to_boom_prob: f64,

    // Supplier shock (log-normal, mean 1)
    pub supplier_shock_std: f64,

    // Substitute pressure (bounded random walk)
    pub substitute_pressure_min: f64,
    pub substitute_pressure_max: f64,
    pub substitute_pressure_initial: f64,
    pub substitute_pressure_drift: f64,

    /// Advisory upper bound on R&D spend for the nominal action box.
    /// The simulator itself does not cap investment.
    pub max_rd_investment: Money,
}

impl Default for MarketConfig {
    fn default() -> Self {
        let base_marginal_cost = 80.0;
        Self {
            n_firms: 3,
            max_steps: 200,
            base_demand: 1000.0,
            price_elasticity: 0.015,
            base_marginal_cost,
            fixed_capital_cost: 30.0,
            compliance_fixed_cost: 10.0,
            compliance_variable_rate: 0.02 * base_marginal_cost,
            rd_cost_coefficient: 0.05,
            price_sensitivity: 0.05,
            innovation_power: 1.5,
            tech_progress_rate: 0.002,
            innovation_diminishing: 0.01,
            price_ceiling: 250.0,
            min_margin: 1.0,
            boom_multiplier: 1.2,
            recession_multiplier: 0.8,
            regime_noise_std: 0.02,
            boom_to_recession_prob: 0.05,
            recession_to_boom_prob: 0.10,
            supplier_shock_std: 0.05,
            substitute_pressure_min: 0.05,
            substitute_pressure_max: 0.3,
            substitute_pressure_initial: 0.15,
            substitute_pressure_drift: 0.005,
            max_rd_investment: 100.0,
        }
    }
}

impl MarketConfig {
    /// Default market with a different firm count and episode length
    pub fn with_firms(n_firms: usize, max_steps: u32) -> Self {
        Self {
            n_firms,
            max_steps,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Lowest legal price at base (unshocked) marginal cost
    pub fn price_floor(&self) -> Price {
        self.base_marginal_cost + self.min_margin
    }

    /// Nominal `[price, investment]` action box
    pub fn action_bounds(&self) -> ActionBounds {
        ActionBounds {
            low: [self.price_floor(), 0.0],
            high: [self.price_ceiling, self.max_rd_investment],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_firms == 0 {
            return Err(invalid("n_firms must be at least 1"));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be at least 1"));
        }

        let non_negative = [
            ("base_demand", self.base_demand),
            ("price_elasticity", self.price_elasticity),
            ("fixed_capital_cost", self.fixed_capital_cost),
            ("compliance_fixed_cost", self.compliance_fixed_cost),
            ("compliance_variable_rate", self.compliance_variable_rate),
            ("rd_cost_coefficient", self.rd_cost_coefficient),
            ("price_sensitivity", self.price_sensitivity),
            ("innovation_power", self.innovation_power),
            ("tech_progress_rate", self.tech_progress_rate),
            ("innovation_diminishing", self.innovation_diminishing),
            ("min_margin", self.min_margin),
            ("boom_multiplier", self.boom_multiplier),
            ("recession_multiplier", self.recession_multiplier),
            ("regime_noise_std", self.regime_noise_std),
            ("supplier_shock_std", self.supplier_shock_std),
            ("substitute_pressure_drift", self.substitute_pressure_drift),
            ("max_rd_investment", self.max_rd_investment),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !self.base_marginal_cost.is_finite() || self.base_marginal_cost <= 0.0 {
            return Err(invalid("base_marginal_cost must be positive"));
        }
        if !self.price_ceiling.is_finite() || self.price_floor() > self.price_ceiling {
            return Err(invalid(&format!(
                "price_ceiling {} is below the legal floor {}",
                self.price_ceiling,
                self.price_floor()
            )));
        }

        for (name, p) in [
            ("boom_to_recession_prob", self.boom_to_recession_prob),
            ("recession_to_boom_prob", self.recession_to_boom_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(&format!("{} must be in [0, 1], got {}", name, p)));
            }
        }

        let (lo, hi) = (self.substitute_pressure_min, self.substitute_pressure_max);
        if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || hi >= 1.0 || lo > hi {
            return Err(invalid(&format!(
                "substitute pressure bounds [{}, {}] must satisfy 0 <= min <= max < 1",
                lo, hi
            )));
        }
        if !(lo..=hi).contains(&self.substitute_pressure_initial) {
            return Err(invalid(&format!(
                "substitute_pressure_initial {} outside [{}, {}]",
                self.substitute_pressure_initial, lo, hi
            )));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MarketConfig::default();
        assert!(config.validate().is_ok());
        approx::assert_relative_eq!(config.compliance_variable_rate, 1.6);
    }

    #[test]
    fn test_action_bounds() {
        let bounds = MarketConfig::default().action_bounds();
        assert_eq!(bounds.low, [81.0, 0.0]);
        assert_eq!(bounds.high, [250.0, 100.0]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MarketConfig::from_json(r#"{ "n_firms": 5, "max_steps": 50 }"#).unwrap();
        assert_eq!(config.n_firms, 5);
        assert_eq!(config.max_steps, 50);
        assert_eq!(config.price_ceiling, 250.0);
    }

    #[test]
    fn test_rejects_zero_firms() {
        let config = MarketConfig::with_firms(0, 10);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_ceiling_below_floor() {
        let config = MarketConfig {
            price_ceiling: 50.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = MarketConfig {
            boom_to_recession_prob: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_pressure_bounds() {
        let config = MarketConfig {
            substitute_pressure_min: 0.4,
            substitute_pressure_max: 0.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            MarketConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            MarketConfig::from_file("/nonexistent/market.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}

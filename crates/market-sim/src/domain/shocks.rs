//! Exogenous shock processes
//!
//! Three independent processes evolve every period, always drawn in the
//! same order so a seed fixes the whole trajectory:
//! 1. Regime transition (Bernoulli) and cycle noise (Normal around 1)
//! 2. Supplier cost shock (log-normal with mean 1)
//! 3. Substitute pressure (Gaussian random walk, clamped)

use oligopoly_core::{ConfigError, MarketConfig, Regime};
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};

/// Outcome of one period's shock draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockDraws {
    pub regime: Regime,
    /// Regime multiplier times its noise
    pub cycle_multiplier: f64,
    pub supplier_shock: f64,
    pub substitute_pressure: f64,
}

/// Pre-built distributions for the shock processes
#[derive(Debug, Clone)]
pub struct ShockModel {
    boom_multiplier: f64,
    recession_multiplier: f64,
    boom_to_recession_prob: f64,
    recession_to_boom_prob: f64,
    cycle_noise: Normal<f64>,
    supplier: LogNormal<f64>,
    pressure_drift: Normal<f64>,
    pressure_min: f64,
    pressure_max: f64,
}

impl ShockModel {
    pub fn new(config: &MarketConfig) -> Result<Self, ConfigError> {
        let cycle_noise = Normal::new(1.0, config.regime_noise_std)
            .map_err(|e| ConfigError::Invalid(format!("regime_noise_std: {}", e)))?;

        // mu = -sigma^2 / 2 keeps E[shock] = 1
        let sigma = config.supplier_shock_std;
        let supplier = LogNormal::new(-0.5 * sigma * sigma, sigma)
            .map_err(|e| ConfigError::Invalid(format!("supplier_shock_std: {}", e)))?;

        let pressure_drift = Normal::new(0.0, config.substitute_pressure_drift)
            .map_err(|e| ConfigError::Invalid(format!("substitute_pressure_drift: {}", e)))?;

        Ok(Self {
            boom_multiplier: config.boom_multiplier,
            recession_multiplier: config.recession_multiplier,
            boom_to_recession_prob: config.boom_to_recession_prob,
            recession_to_boom_prob: config.recession_to_boom_prob,
            cycle_noise,
            supplier,
            pressure_drift,
            pressure_min: config.substitute_pressure_min,
            pressure_max: config.substitute_pressure_max,
        })
    }

    /// Markov step: switch with the regime's exit probability, else stay
    pub fn transition<R: Rng + ?Sized>(&self, regime: Regime, rng: &mut R) -> Regime {
        let exit_prob = match regime {
            Regime::Boom => self.boom_to_recession_prob,
            Regime::Recession => self.recession_to_boom_prob,
        };
        if rng.gen_bool(exit_prob) {
            regime.switched()
        } else {
            regime
        }
    }

    pub fn cycle_multiplier<R: Rng + ?Sized>(&self, regime: Regime, rng: &mut R) -> f64 {
        let base = match regime {
            Regime::Boom => self.boom_multiplier,
            Regime::Recession => self.recession_multiplier,
        };
        base * self.cycle_noise.sample(rng)
    }

    pub fn supplier_shock<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.supplier.sample(rng)
    }

    pub fn substitute_pressure<R: Rng + ?Sized>(&self, current: f64, rng: &mut R) -> f64 {
        let next = current + self.pressure_drift.sample(rng);
        next.clamp(self.pressure_min, self.pressure_max)
    }

    /// Draw all shocks for one period in the fixed order
    pub fn evolve<R: Rng + ?Sized>(&self, regime: Regime, pressure: f64, rng: &mut R) -> ShockDraws {
        let regime = self.transition(regime, rng);
        let cycle_multiplier = self.cycle_multiplier(regime, rng);
        let supplier_shock = self.supplier_shock(rng);
        let substitute_pressure = self.substitute_pressure(pressure, rng);

        ShockDraws {
            regime,
            cycle_multiplier,
            supplier_shock,
            substitute_pressure,
        }
    }
}

use oligopoly_core::{MarketConfig, Observation, Regime};
use serde::Serialize;
use std::fmt;

/// Mutable period state, owned exclusively by one simulator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketState {
    /// Periods elapsed since reset
    pub step_index: u32,
    /// Posted prices after clipping
    pub prices: Vec<f64>,
    /// Cumulative R&D per firm, never decreasing within an episode
    pub innovation_stocks: Vec<f64>,
    /// Softmax shares, summing to 1
    pub market_shares: Vec<f64>,
    /// Base cost times the latest supplier shock, identical across firms
    pub marginal_costs: Vec<f64>,
    pub economic_regime: Regime,
    pub supplier_shock: f64,
    pub substitute_pressure: f64,
    /// Base demand times the cycle multiplier
    pub total_demand: f64,
    /// Quantity the market absorbs after elasticity and substitutes
    pub effective_demand: f64,
}

impl MarketState {
    /// Initial state with the given random draws
    pub(crate) fn initial(
        config: &MarketConfig,
        prices: Vec<f64>,
        regime: Regime,
        supplier_shock: f64,
    ) -> Self {
        let n = config.n_firms;
        Self {
            step_index: 0,
            prices,
            innovation_stocks: vec![0.0; n],
            market_shares: vec![1.0 / n as f64; n],
            marginal_costs: vec![config.base_marginal_cost; n],
            economic_regime: regime,
            supplier_shock,
            substitute_pressure: config.substitute_pressure_initial,
            total_demand: config.base_demand,
            effective_demand: config.base_demand,
        }
    }

    pub fn n_firms(&self) -> usize {
        self.prices.len()
    }

    pub fn avg_price(&self) -> f64 {
        mean(&self.prices)
    }

    pub fn total_innovation(&self) -> f64 {
        self.innovation_stocks.iter().sum()
    }

    /// Units sold by each firm this period
    pub fn quantities(&self) -> Vec<f64> {
        self.market_shares
            .iter()
            .map(|share| share * self.effective_demand)
            .collect()
    }

    pub fn observation(&self) -> Observation {
        Observation {
            prices: self.prices.clone(),
            innovation_stocks: self.innovation_stocks.clone(),
            market_shares: self.market_shares.clone(),
            marginal_costs: self.marginal_costs.clone(),
            avg_price: self.avg_price(),
            effective_demand: self.effective_demand,
            step_index: self.step_index,
            regime: self.economic_regime,
            substitute_pressure: self.substitute_pressure,
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Step {} ===", self.step_index)?;
        writeln!(f, "Regime: {}", self.economic_regime.as_str().to_uppercase())?;
        for i in 0..self.n_firms() {
            writeln!(
                f,
                "firm_{}: Price=${:.2} | R&D={:.2} | Share={:.1}% | C_m=${:.2}",
                i,
                self.prices[i],
                self.innovation_stocks[i],
                self.market_shares[i] * 100.0,
                self.marginal_costs[i]
            )?;
        }
        write!(
            f,
            "Demand: {:.0} (effective {:.1}) | Substitutes: {:.1}%",
            self.total_demand,
            self.effective_demand,
            self.substitute_pressure * 100.0
        )
    }
}

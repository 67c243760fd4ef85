//! Full-state observation shared by every firm
//!
//! The market is a symmetric-information game: each firm receives the same
//! snapshot. The flat encoding is
//! `[prices(n), innovation(n), shares(n), marginal_costs(n), avg_price,
//! effective_demand, step_index, regime, substitute_pressure]`.

use serde::{Deserialize, Serialize};

use crate::entities::{FirmId, Regime};

/// Number of market-wide scalars appended after the per-firm blocks
const SCALAR_FIELDS: usize = 5;

/// Number of per-firm blocks
const PER_FIRM_FIELDS: usize = 4;

/// Market snapshot handed to policies after `reset` and each `step`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub prices: Vec<f64>,
    pub innovation_stocks: Vec<f64>,
    pub market_shares: Vec<f64>,
    pub marginal_costs: Vec<f64>,
    pub avg_price: f64,
    pub effective_demand: f64,
    pub step_index: u32,
    pub regime: Regime,
    pub substitute_pressure: f64,
}

impl Observation {
    /// Length of the flat vector for an `n`-firm market
    pub const fn vector_len(n_firms: usize) -> usize {
        PER_FIRM_FIELDS * n_firms + SCALAR_FIELDS
    }

    pub fn n_firms(&self) -> usize {
        self.prices.len()
    }

    /// Flat encoding in the documented field order
    pub fn to_vector(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(Self::vector_len(self.n_firms()));
        out.extend_from_slice(&self.prices);
        out.extend_from_slice(&self.innovation_stocks);
        out.extend_from_slice(&self.market_shares);
        out.extend_from_slice(&self.marginal_costs);
        out.push(self.avg_price);
        out.push(self.effective_demand);
        out.push(f64::from(self.step_index));
        out.push(self.regime.indicator());
        out.push(self.substitute_pressure);
        out
    }

    /// Mean posted price of every firm except `firm`
    ///
    /// Falls back to the firm's own price in a single-firm market.
    pub fn mean_rival_price(&self, firm: FirmId) -> Option<f64> {
        let own = *self.prices.get(firm.index())?;
        let rivals = self.prices.len() - 1;
        if rivals == 0 {
            return Some(own);
        }
        let total: f64 = self.prices.iter().sum();
        Some((total - own) / rivals as f64)
    }

    pub fn marginal_cost(&self, firm: FirmId) -> Option<f64> {
        self.marginal_costs.get(firm.index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Observation {
        Observation {
            prices: vec![100.0, 150.0, 200.0],
            innovation_stocks: vec![0.0, 5.0, 10.0],
            market_shares: vec![0.5, 0.3, 0.2],
            marginal_costs: vec![80.0, 80.0, 80.0],
            avg_price: 150.0,
            effective_demand: 42.0,
            step_index: 7,
            regime: Regime::Boom,
            substitute_pressure: 0.15,
        }
    }

    #[test]
    fn test_vector_layout() {
        let obs = sample();
        let v = obs.to_vector();
        assert_eq!(v.len(), Observation::vector_len(3));
        assert_eq!(v.len(), 17);
        assert_eq!(&v[0..3], &[100.0, 150.0, 200.0]);
        assert_eq!(&v[9..12], &[80.0, 80.0, 80.0]);
        assert_eq!(v[12], 150.0);
        assert_eq!(v[14], 7.0);
        assert_eq!(v[15], 1.0);
        assert_eq!(v[16], 0.15);
    }

    #[test]
    fn test_mean_rival_price() {
        let obs = sample();
        assert_relative_eq!(obs.mean_rival_price(FirmId::new(0)).unwrap(), 175.0);
        assert_relative_eq!(obs.mean_rival_price(FirmId::new(2)).unwrap(), 125.0);
        assert!(obs.mean_rival_price(FirmId::new(9)).is_none());
    }
}

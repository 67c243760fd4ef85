//! Regulation and profit accounting

use oligopoly_core::MarketConfig;
use serde::Serialize;

/// Clamp a proposed price into `[marginal_cost + min_margin, price_ceiling]`
///
/// The ceiling wins if a cost shock ever pushes the floor above it.
pub fn clip_price(config: &MarketConfig, proposed: f64, marginal_cost: f64) -> f64 {
    proposed
        .max(marginal_cost + config.min_margin)
        .min(config.price_ceiling)
}

/// Negative R&D is not allowed
pub fn floor_investment(proposed: f64) -> f64 {
    proposed.max(0.0)
}

/// Quadratic R&D cost of one period's investment
pub fn rd_cost(config: &MarketConfig, investment: f64) -> f64 {
    config.rd_cost_coefficient * investment * investment
}

/// Per-firm profit components for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitBreakdown {
    pub revenue: f64,
    pub production_cost: f64,
    /// Quadratic in investment
    pub rd_cost: f64,
    pub capital_cost: f64,
    pub compliance_cost: f64,
    pub profit: f64,
}

impl ProfitBreakdown {
    pub fn total_cost(&self) -> f64 {
        self.production_cost + self.rd_cost + self.capital_cost + self.compliance_cost
    }
}

pub fn firm_profit(
    config: &MarketConfig,
    price: f64,
    quantity: f64,
    marginal_cost: f64,
    investment: f64,
) -> ProfitBreakdown {
    let revenue = price * quantity;
    let production_cost = marginal_cost * quantity;
    let rd_cost = rd_cost(config, investment);
    let capital_cost = config.fixed_capital_cost;
    let compliance_cost = config.compliance_fixed_cost + config.compliance_variable_rate * quantity;

    let profit = revenue - (production_cost + rd_cost + capital_cost + compliance_cost);

    ProfitBreakdown {
        revenue,
        production_cost,
        rd_cost,
        capital_cost,
        compliance_cost,
        profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_price_bounds() {
        let config = MarketConfig::default();
        assert_eq!(clip_price(&config, 10.0, 80.0), 81.0);
        assert_eq!(clip_price(&config, 500.0, 80.0), 250.0);
        assert_eq!(clip_price(&config, 150.0, 80.0), 150.0);
    }

    #[test]
    fn test_ceiling_wins_over_shocked_floor() {
        let config = MarketConfig::default();
        assert_eq!(clip_price(&config, 100.0, 300.0), 250.0);
    }

    #[test]
    fn test_floor_investment() {
        assert_eq!(floor_investment(-5.0), 0.0);
        assert_eq!(floor_investment(7.5), 7.5);
    }

    #[test]
    fn test_profit_components() {
        let config = MarketConfig::default();
        let p = firm_profit(&config, 200.0, 10.0, 80.0, 10.0);

        assert_relative_eq!(p.revenue, 2000.0);
        assert_relative_eq!(p.production_cost, 800.0);
        assert_relative_eq!(p.rd_cost, 5.0, max_relative = 1e-12);
        assert_relative_eq!(p.capital_cost, 30.0);
        assert_relative_eq!(p.compliance_cost, 26.0, max_relative = 1e-12);
        assert_relative_eq!(p.profit, 2000.0 - 861.0, max_relative = 1e-12);
        assert_relative_eq!(p.total_cost(), 861.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rd_cost_is_convex() {
        let config = MarketConfig::default();
        let small = firm_profit(&config, 150.0, 0.0, 80.0, 10.0).rd_cost;
        let large = firm_profit(&config, 150.0, 0.0, 80.0, 20.0).rd_cost;
        assert_relative_eq!(large, 4.0 * small, max_relative = 1e-12);
    }
}

use oligopoly_core::MarketConfig;

/// Market demand for one period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandOutcome {
    /// Base demand scaled by the cycle multiplier
    pub total: f64,
    /// After price elasticity and substitute pressure
    pub effective: f64,
}

/// `base * cycle * exp(-elasticity * avg_price) * (1 - substitute_pressure)`
///
/// `avg_price` must come from this period's clipped prices.
pub fn compute_demand(
    config: &MarketConfig,
    cycle_multiplier: f64,
    avg_price: f64,
    substitute_pressure: f64,
) -> DemandOutcome {
    let total = config.base_demand * cycle_multiplier;
    let elasticity_effect = (-config.price_elasticity * avg_price).exp();
    let substitute_effect = 1.0 - substitute_pressure;

    DemandOutcome {
        total,
        effective: (total * elasticity_effect * substitute_effect).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_demand_formula() {
        let config = MarketConfig::default();
        let demand = compute_demand(&config, 1.2, 100.0, 0.15);

        assert_relative_eq!(demand.total, 1200.0);
        assert_relative_eq!(
            demand.effective,
            1200.0 * (-1.5f64).exp() * 0.85,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_lower_price_means_more_demand() {
        let config = MarketConfig::default();
        let cheap = compute_demand(&config, 1.0, 100.0, 0.15);
        let dear = compute_demand(&config, 1.0, 200.0, 0.15);
        assert!(cheap.effective > dear.effective);
    }

    #[test]
    fn test_substitutes_scale_linearly() {
        let config = MarketConfig::default();
        let low = compute_demand(&config, 1.0, 150.0, 0.1);
        let high = compute_demand(&config, 1.0, 150.0, 0.2);
        assert_relative_eq!(low.effective / high.effective, 0.9 / 0.8, max_relative = 1e-12);
    }
}

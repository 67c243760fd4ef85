use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::domain::{
    MarketState, ShockModel,
    accounting::{clip_price, firm_profit, floor_investment, rd_cost},
    allocation::{allocate_shares, innovation_power},
    demand::compute_demand,
};
use crate::error::{MarketError, Result};
use crate::model::{
    FirmAction, FirmId, MarketConfig, Observation, Regime, ResetInfo, StepInfo, StepOutcome,
};

/// Round-based oligopoly market
///
/// Each `step` runs, in order: clipping, innovation accumulation, regime
/// transition, shock draws, demand, softmax allocation, quantities and
/// marginal cost, profit, observation and termination. Prices are clipped
/// with the marginal cost from the previous period; profits use the cost
/// recomputed from this period's supplier shock.
///
/// Given the same seed and action sequence, trajectories are bit-identical.
pub struct MarketSimulator {
    config: MarketConfig,
    firms: Vec<FirmId>,
    shocks: ShockModel,
    rng: StdRng,
    /// `None` until the first `reset`
    state: Option<MarketState>,
}

impl MarketSimulator {
    /// Create a simulator seeded from OS entropy
    pub fn new(config: MarketConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(config: MarketConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: MarketConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let shocks = ShockModel::new(&config)?;
        let firms = FirmId::all(config.n_firms);

        Ok(Self {
            config,
            firms,
            shocks,
            rng,
            state: None,
        })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Firm ids in index order
    pub fn firms(&self) -> &[FirmId] {
        &self.firms
    }

    /// Current state, `None` before the first `reset`
    pub fn state(&self) -> Option<&MarketState> {
        self.state.as_ref()
    }

    pub fn observation_len(&self) -> usize {
        Observation::vector_len(self.config.n_firms)
    }

    /// Reinitialize the market
    ///
    /// With `Some(seed)` the RNG is reseeded first; with `None` the current
    /// random stream continues.
    pub fn reset(&mut self, seed: Option<u64>) -> (Vec<Observation>, ResetInfo) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        let floor = self.config.price_floor();
        let ceiling = self.config.price_ceiling;
        let prices: Vec<f64> = (0..self.config.n_firms)
            .map(|_| self.rng.gen_range(floor..=ceiling))
            .collect();

        let regime = if self.rng.gen_bool(0.5) {
            Regime::Boom
        } else {
            Regime::Recession
        };
        let supplier_shock = self.shocks.supplier_shock(&mut self.rng);

        let state = MarketState::initial(&self.config, prices, regime, supplier_shock);
        info!(
            "Market reset: {} firms, regime={}, seed={:?}",
            self.config.n_firms, regime, seed
        );

        let observations = self.broadcast(state.observation());
        self.state = Some(state);

        (observations, ResetInfo { seed })
    }

    /// Advance one period with actions keyed by firm id
    ///
    /// Every firm must have exactly one action; unknown ids are rejected.
    pub fn step(&mut self, actions: &HashMap<FirmId, FirmAction>) -> Result<StepOutcome> {
        if self.state.is_none() {
            return Err(MarketError::NotReset);
        }
        if let Some(unknown) = actions.keys().find(|f| f.index() >= self.config.n_firms) {
            warn!("Rejected action for unknown firm {}", unknown);
            return Err(MarketError::UnknownFirm(*unknown));
        }

        let ordered = self
            .firms
            .iter()
            .map(|firm| actions.get(firm).copied().ok_or(MarketError::MissingAction(*firm)))
            .collect::<Result<Vec<_>>>()?;

        self.step_indexed(&ordered)
    }

    /// Advance one period with actions in firm-index order
    pub fn step_indexed(&mut self, actions: &[FirmAction]) -> Result<StepOutcome> {
        let config = &self.config;
        let state = self.state.as_mut().ok_or(MarketError::NotReset)?;

        if actions.len() != config.n_firms {
            return Err(MarketError::ActionCount {
                expected: config.n_firms,
                got: actions.len(),
            });
        }
        let rd_investments = check_actions(config, state, actions)?;

        state.step_index += 1;

        // 1. Regulation: clip against last period's marginal cost
        state.prices = actions
            .iter()
            .zip(&state.marginal_costs)
            .map(|(a, mc)| clip_price(config, a.price, *mc))
            .collect();

        // 2. Innovation
        for (stock, investment) in state.innovation_stocks.iter_mut().zip(&rd_investments) {
            *stock += investment;
        }

        // 3-4. Exogenous shocks
        let draws = self.shocks.evolve(
            state.economic_regime,
            state.substitute_pressure,
            &mut self.rng,
        );
        state.economic_regime = draws.regime;
        state.supplier_shock = draws.supplier_shock;
        state.substitute_pressure = draws.substitute_pressure;

        // 5. Demand from this period's clipped prices
        let demand = compute_demand(
            config,
            draws.cycle_multiplier,
            state.avg_price(),
            state.substitute_pressure,
        );
        state.total_demand = demand.total;
        state.effective_demand = demand.effective;

        // 6. Softmax competition
        let beta = innovation_power(config, state.step_index, state.total_innovation());
        state.market_shares = allocate_shares(
            config,
            state.step_index,
            &state.prices,
            &state.innovation_stocks,
        );

        // 7. Quantities and market-wide marginal cost
        let quantities = state.quantities();
        let marginal_cost = config.base_marginal_cost * state.supplier_shock;
        state.marginal_costs = vec![marginal_cost; config.n_firms];

        // 8. Profit
        let profits: Vec<_> = (0..config.n_firms)
            .map(|i| {
                firm_profit(
                    config,
                    state.prices[i],
                    quantities[i],
                    state.marginal_costs[i],
                    rd_investments[i],
                )
            })
            .collect();
        let rewards: Vec<f64> = profits.iter().map(|p| p.profit).collect();

        // 9. Observation and termination
        let done = state.step_index >= config.max_steps;
        let observation = state.observation();

        debug!(
            "Step {}: regime={} demand={:.2} avg_price={:.2} shares={:?}",
            state.step_index,
            state.economic_regime,
            state.effective_demand,
            observation.avg_price,
            state.market_shares
        );
        if done {
            info!("Episode finished after {} steps", state.step_index);
        }

        let info = StepInfo {
            quantities,
            rd_investments,
            cycle_multiplier: draws.cycle_multiplier,
            innovation_power: beta,
            total_demand: demand.total,
            profits,
        };

        Ok(StepOutcome {
            observations: self.broadcast(observation),
            rewards,
            dones: vec![done; config.n_firms],
            info,
        })
    }

    fn broadcast(&self, observation: Observation) -> Vec<Observation> {
        vec![observation; self.config.n_firms]
    }
}

/// Floored investments, or the first firm whose action would make the
/// period's arithmetic non-finite
///
/// Covers the action itself, its quadratic R&D cost, the accumulated and
/// aggregate innovation stocks, and the innovation term of the utility.
/// Runs before any state is touched.
fn check_actions(
    config: &MarketConfig,
    state: &MarketState,
    actions: &[FirmAction],
) -> Result<Vec<f64>> {
    let investments: Vec<f64> = actions
        .iter()
        .map(|a| floor_investment(a.investment))
        .collect();

    let mut stocks = Vec::with_capacity(actions.len());
    let mut total = 0.0;
    for (i, action) in actions.iter().enumerate() {
        let stock = state.innovation_stocks[i] + investments[i];
        total += stock;
        let cost = rd_cost(config, investments[i]);
        if !action.is_finite() || !stock.is_finite() || !cost.is_finite() || !total.is_finite() {
            warn!("Rejected non-finite action for firm_{}", i);
            return Err(MarketError::NonFiniteAction {
                firm: FirmId::new(i),
            });
        }
        stocks.push(stock);
    }

    let beta = innovation_power(config, state.step_index + 1, total);
    if let Some(i) = stocks.iter().position(|stock| !(beta * stock).is_finite()) {
        warn!("Rejected innovation stock overflow for firm_{}", i);
        return Err(MarketError::NonFiniteAction {
            firm: FirmId::new(i),
        });
    }

    Ok(investments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_actions(n: usize, price: f64, investment: f64) -> Vec<FirmAction> {
        vec![FirmAction::new(price, investment); n]
    }

    #[test]
    fn test_step_before_reset_fails() {
        let mut sim = MarketSimulator::with_seed(MarketConfig::default(), 1).unwrap();
        let result = sim.step_indexed(&uniform_actions(3, 150.0, 0.0));
        assert_eq!(result.unwrap_err(), MarketError::NotReset);
        assert!(sim.state().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MarketConfig::with_firms(0, 10);
        assert!(matches!(
            MarketSimulator::new(config),
            Err(MarketError::Config(_))
        ));
    }

    #[test]
    fn test_reset_initial_conditions() {
        let mut sim = MarketSimulator::new(MarketConfig::default()).unwrap();
        let (obs, info) = sim.reset(Some(42));

        assert_eq!(info.seed, Some(42));
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].to_vector().len(), sim.observation_len());

        let state = sim.state().unwrap();
        assert_eq!(state.step_index, 0);
        assert!(state.prices.iter().all(|p| (81.0..=250.0).contains(p)));
        assert_eq!(state.innovation_stocks, vec![0.0; 3]);
        assert!(state.supplier_shock > 0.0);
    }

    #[test]
    fn test_wrong_action_count() {
        let mut sim = MarketSimulator::with_seed(MarketConfig::default(), 1).unwrap();
        sim.reset(None);
        let err = sim.step_indexed(&uniform_actions(2, 150.0, 0.0)).unwrap_err();
        assert_eq!(err, MarketError::ActionCount { expected: 3, got: 2 });
    }

    #[test]
    fn test_non_finite_action_leaves_state_untouched() {
        let mut sim = MarketSimulator::with_seed(MarketConfig::default(), 1).unwrap();
        sim.reset(None);
        let before = sim.state().cloned();

        let mut actions = uniform_actions(3, 150.0, 0.0);
        actions[1].price = f64::NAN;
        let err = sim.step_indexed(&actions).unwrap_err();

        assert_eq!(err, MarketError::NonFiniteAction { firm: FirmId::new(1) });
        assert_eq!(sim.state().cloned(), before);
    }

    #[test]
    fn test_missing_and_unknown_firms() {
        let mut sim = MarketSimulator::with_seed(MarketConfig::default(), 1).unwrap();
        sim.reset(None);

        let mut actions: HashMap<FirmId, FirmAction> = sim
            .firms()
            .iter()
            .take(2)
            .map(|f| (*f, FirmAction::new(150.0, 0.0)))
            .collect();
        assert_eq!(
            sim.step(&actions).unwrap_err(),
            MarketError::MissingAction(FirmId::new(2))
        );

        actions.insert(FirmId::new(2), FirmAction::new(150.0, 0.0));
        actions.insert(FirmId::new(7), FirmAction::new(150.0, 0.0));
        assert_eq!(
            sim.step(&actions).unwrap_err(),
            MarketError::UnknownFirm(FirmId::new(7))
        );
        assert_eq!(sim.state().unwrap().step_index, 0);
    }

    #[test]
    fn test_marginal_cost_follows_supplier_shock() {
        let mut sim = MarketSimulator::with_seed(MarketConfig::default(), 9).unwrap();
        sim.reset(None);
        sim.step_indexed(&uniform_actions(3, 150.0, 0.0)).unwrap();

        let state = sim.state().unwrap();
        let expected = 80.0 * state.supplier_shock;
        assert!(state.marginal_costs.iter().all(|mc| *mc == expected));
    }

    #[test]
    fn test_reward_matches_breakdown() {
        let mut sim = MarketSimulator::with_seed(MarketConfig::default(), 5).unwrap();
        sim.reset(None);
        let outcome = sim.step_indexed(&uniform_actions(3, 180.0, 4.0)).unwrap();

        for (reward, breakdown) in outcome.rewards.iter().zip(&outcome.info.profits) {
            assert_eq!(*reward, breakdown.profit);
        }
        let sold: f64 = outcome.info.quantities.iter().sum();
        let demand = sim.state().unwrap().effective_demand;
        assert!((sold - demand).abs() < 1e-9 * demand.max(1.0));
    }
}

//! Episode - one seeded run of the market from reset to termination
//!
//! Drives the simulator with one policy per firm and emits a `StepRecord`
//! per firm per period.

use market_sim::MarketSimulator;
use oligopoly_core::{FirmAction, MarketConfig};
use oligopoly_ports::{Policy, StepRecord, TrajectoryRecorder};
use serde::Serialize;

use crate::error::{Result, RunnerError};

/// Per-episode outcome, indexed by firm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeResult {
    pub episode: u32,
    pub seed: Option<u64>,
    pub steps: u32,
    pub cumulative_profits: Vec<f64>,
    pub final_innovation: Vec<f64>,
    pub mean_prices: Vec<f64>,
    pub mean_shares: Vec<f64>,
}

impl EpisodeResult {
    /// Firm index with the highest cumulative profit
    pub fn winner(&self) -> Option<usize> {
        self.cumulative_profits
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

/// Policy seed for firm `index` in a seeded episode
fn policy_seed(episode_seed: u64, index: usize) -> u64 {
    episode_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index as u64 + 1)
}

/// Run a single episode to termination
pub fn run_episode(
    episode: u32,
    seed: Option<u64>,
    market: &MarketConfig,
    policies: &mut [Box<dyn Policy>],
    recorder: &mut dyn TrajectoryRecorder,
) -> Result<EpisodeResult> {
    if policies.len() != market.n_firms {
        return Err(RunnerError::PolicyCount {
            expected: market.n_firms,
            got: policies.len(),
        });
    }

    let mut sim = MarketSimulator::new(market.clone())?;
    let (mut observations, _) = sim.reset(seed);
    for (index, policy) in policies.iter_mut().enumerate() {
        policy.reset(seed.map(|s| policy_seed(s, index)));
    }

    let n = market.n_firms;
    let mut cumulative = vec![0.0; n];
    let mut price_totals = vec![0.0; n];
    let mut share_totals = vec![0.0; n];
    let mut steps = 0u32;

    loop {
        let actions: Vec<FirmAction> = sim
            .firms()
            .iter()
            .zip(policies.iter_mut())
            .map(|(firm, policy)| policy.act(*firm, &observations[firm.index()]))
            .collect();

        let outcome = sim.step_indexed(&actions)?;
        let state = sim.state().ok_or(market_sim::MarketError::NotReset)?;

        for (i, firm) in sim.firms().iter().enumerate() {
            cumulative[i] += outcome.rewards[i];
            price_totals[i] += state.prices[i];
            share_totals[i] += state.market_shares[i];

            recorder.record(&StepRecord {
                episode,
                step: steps,
                firm: firm.label(),
                price: state.prices[i],
                rd_investment: actions[i].investment,
                innovation_stock: state.innovation_stocks[i],
                market_share: state.market_shares[i],
                marginal_cost: state.marginal_costs[i],
                quantity: outcome.info.quantities[i],
                profit_step: outcome.rewards[i],
                cum_profit: cumulative[i],
                effective_demand: state.effective_demand,
                economic_regime: state.economic_regime,
                substitute_pressure: state.substitute_pressure,
            })?;
        }

        steps += 1;
        if steps % 20 == 0 {
            log::debug!("Episode {} market:\n{}", episode, state);
        }

        let done = outcome.is_done();
        observations = outcome.observations;
        if done {
            break;
        }
    }

    let final_innovation = sim
        .state()
        .map(|s| s.innovation_stocks.clone())
        .unwrap_or_default();
    let per_step = |totals: Vec<f64>| -> Vec<f64> {
        totals.into_iter().map(|t| t / f64::from(steps)).collect()
    };

    log::info!(
        "Episode {} finished after {} steps, profits: {:?}",
        episode,
        steps,
        cumulative.iter().map(|p| format!("{:.0}", p)).collect::<Vec<_>>()
    );

    Ok(EpisodeResult {
        episode,
        seed,
        steps,
        cumulative_profits: cumulative,
        final_innovation,
        mean_prices: per_step(price_totals),
        mean_shares: per_step(share_totals),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{JsonLinesRecorder, MemoryRecorder};
    use oligopoly_strategy::FixedPolicy;

    fn fixed(n: usize, price: f64) -> Vec<Box<dyn Policy>> {
        (0..n)
            .map(|_| Box::new(FixedPolicy::new(price, 0.0)) as Box<dyn Policy>)
            .collect()
    }

    #[test]
    fn test_episode_records_every_firm_every_step() {
        let market = MarketConfig::with_firms(3, 25);
        let mut recorder = MemoryRecorder::new();
        let result = run_episode(0, Some(1), &market, &mut fixed(3, 200.0), &mut recorder).unwrap();

        assert_eq!(result.steps, 25);
        assert_eq!(recorder.len(), 75);

        let last = recorder.records().last().unwrap();
        assert_eq!(last.step, 24);
        assert_eq!(last.firm, "firm_2");
        assert!((last.cum_profit - result.cumulative_profits[2]).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_firms_split_evenly() {
        let market = MarketConfig::with_firms(3, 10);
        let mut recorder = MemoryRecorder::new();
        let result = run_episode(0, Some(2), &market, &mut fixed(3, 180.0), &mut recorder).unwrap();

        for share in &result.mean_shares {
            assert!((share - 1.0 / 3.0).abs() < 1e-9);
        }
        assert!(result.cumulative_profits.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn test_policy_count_mismatch() {
        let market = MarketConfig::with_firms(3, 10);
        let mut recorder = MemoryRecorder::new();
        let err = run_episode(0, None, &market, &mut fixed(2, 150.0), &mut recorder).unwrap_err();
        assert!(matches!(err, RunnerError::PolicyCount { expected: 3, got: 2 }));
    }

    #[test]
    fn test_overflowing_investment_aborts_before_recording() {
        let market = MarketConfig::with_firms(3, 10);
        let mut policies: Vec<Box<dyn Policy>> = vec![
            Box::new(FixedPolicy::new(150.0, 0.0)),
            Box::new(FixedPolicy::new(150.0, 1e200)),
            Box::new(FixedPolicy::new(150.0, 0.0)),
        ];
        let mut recorder = JsonLinesRecorder::new(Vec::new());
        let err = run_episode(0, Some(3), &market, &mut policies, &mut recorder).unwrap_err();

        assert!(matches!(
            err,
            RunnerError::Market(market_sim::MarketError::NonFiniteAction { firm })
                if firm.index() == 1
        ));
        assert_eq!(recorder.written(), 0);
    }

    #[test]
    fn test_rows_read_back_from_json_lines() {
        let market = MarketConfig::with_firms(2, 3);
        let mut recorder = JsonLinesRecorder::new(Vec::new());
        run_episode(0, Some(8), &market, &mut fixed(2, 150.0), &mut recorder).unwrap();

        let output = String::from_utf8(recorder.into_inner()).unwrap();
        let rows: Vec<StepRecord> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.cum_profit.is_finite()));
    }

    #[test]
    fn test_winner() {
        let result = EpisodeResult {
            episode: 0,
            seed: None,
            steps: 1,
            cumulative_profits: vec![10.0, 30.0, 20.0],
            final_innovation: vec![0.0; 3],
            mean_prices: vec![0.0; 3],
            mean_shares: vec![0.0; 3],
        };
        assert_eq!(result.winner(), Some(1));
    }
}

//! Integration test: scripted policies driving the market simulator
//!
//! Tests the complete loop:
//! 1. Policies are built from their JSON descriptions
//! 2. Each policy reads the shared observation
//! 3. The simulator clamps and resolves the actions
//! 4. Observations feed back into the next decision

use market_sim::{MarketSimulator, model::MarketConfig};
use oligopoly_core::{FirmAction, Observation};
use oligopoly_strategy::{Policy, PolicySpec, UndercutConfig};

fn run(policies: &mut [Box<dyn Policy>], steps: u32, seed: u64) -> (MarketSimulator, Vec<Observation>) {
    let _ = env_logger::try_init();
    let config = MarketConfig::with_firms(policies.len(), steps);
    let mut sim = MarketSimulator::new(config).unwrap();
    let (mut observations, _) = sim.reset(Some(seed));
    let mut history = Vec::new();

    loop {
        let actions: Vec<FirmAction> = sim
            .firms()
            .to_vec()
            .into_iter()
            .zip(policies.iter_mut())
            .map(|(firm, policy)| policy.act(firm, &observations[firm.index()]))
            .collect();
        let outcome = sim.step_indexed(&actions).unwrap();
        observations = outcome.observations.clone();
        history.push(observations[0].clone());
        if outcome.is_done() {
            break;
        }
    }
    (sim, history)
}

#[test]
fn test_specs_parse_from_json() {
    let json = r#"[
        { "kind": "fixed", "price": 180.0 },
        { "kind": "random", "max_investment": 10.0 },
        { "kind": "cost_plus", "markup": 0.8, "investment": 2.0 },
        { "kind": "undercut", "undercut": 3.0 }
    ]"#;
    let specs: Vec<PolicySpec> = serde_json::from_str(json).unwrap();

    assert_eq!(specs.len(), 4);
    assert_eq!(
        specs[0],
        PolicySpec::Fixed {
            price: 180.0,
            investment: 0.0
        }
    );
    assert_eq!(
        specs[3],
        PolicySpec::Undercut(UndercutConfig {
            undercut: 3.0,
            ..Default::default()
        })
    );

    let market = MarketConfig::default();
    let names: Vec<String> = specs
        .iter()
        .map(|s| s.build(&market, Some(1)).name().to_string())
        .collect();
    assert_eq!(names, vec!["fixed", "random", "cost_plus", "undercut"]);
}

#[test]
fn test_undercutters_drive_prices_toward_floor() {
    let spec = PolicySpec::Undercut(UndercutConfig::default());
    let market = MarketConfig::default();
    let mut policies: Vec<Box<dyn Policy>> = (0..3).map(|_| spec.build(&market, None)).collect();

    let (sim, history) = run(&mut policies, 100, 5);

    let first = history.first().unwrap().avg_price;
    let last = history.last().unwrap().avg_price;
    assert!(last < first, "price war did not lower prices: {} -> {}", first, last);
    assert!(sim.state().unwrap().prices.iter().all(|p| *p < 100.0));
}

#[test]
fn test_cost_plus_tracks_marginal_cost() {
    let spec = PolicySpec::CostPlus {
        markup: 0.5,
        investment: 0.0,
    };
    let market = MarketConfig::default();
    let mut policies: Vec<Box<dyn Policy>> = (0..3).map(|_| spec.build(&market, None)).collect();

    let (_, history) = run(&mut policies, 30, 9);

    for pair in history.windows(2) {
        let expected = pair[0].marginal_costs[0] * 1.5;
        assert!((pair[1].prices[0] - expected).abs() < 1e-9);
    }
}

#[test]
fn test_seeded_random_policies_reproduce_episode() {
    let market = MarketConfig::default();
    let build = || -> Vec<Box<dyn Policy>> {
        (0..3)
            .map(|i| PolicySpec::default().build(&market, Some(100 + i)))
            .collect()
    };

    let (a, _) = run(&mut build(), 40, 77);
    let (b, _) = run(&mut build(), 40, 77);

    assert_eq!(a.state(), b.state());
}

//! Softmax competition
//!
//! Consumer utility for firm `i` is `-alpha * price_i + beta(t) * innovation_i`.
//! `beta(t)` grows linearly with elapsed steps and is dampened by total
//! innovation across the market, so R&D commoditizes as the industry
//! invests more.

use oligopoly_core::MarketConfig;

/// Innovation power at `step_index` given aggregate innovation
pub fn innovation_power(config: &MarketConfig, step_index: u32, total_innovation: f64) -> f64 {
    let mut beta = config.innovation_power * (1.0 + config.tech_progress_rate * f64::from(step_index));
    if total_innovation > 0.0 {
        beta /= 1.0 + config.innovation_diminishing * total_innovation;
    }
    beta
}

pub fn utilities(prices: &[f64], innovation: &[f64], alpha: f64, beta: f64) -> Vec<f64> {
    prices
        .iter()
        .zip(innovation)
        .map(|(price, stock)| -alpha * price + beta * stock)
        .collect()
}

/// Max-shifted softmax
///
/// The largest utility maps to `exp(0) = 1`, so the denominator is at
/// least 1 and nothing overflows. Utilities must be finite.
pub fn softmax(utilities: &[f64]) -> Vec<f64> {
    let max = utilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = utilities.iter().map(|&u| (u - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Market shares for this period's prices and innovation stocks
pub fn allocate_shares(
    config: &MarketConfig,
    step_index: u32,
    prices: &[f64],
    innovation: &[f64],
) -> Vec<f64> {
    let total_innovation: f64 = innovation.iter().sum();
    let beta = innovation_power(config, step_index, total_innovation);
    softmax(&utilities(prices, innovation, config.price_sensitivity, beta))
}

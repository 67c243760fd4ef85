//! Tournament summary statistics
//!
//! Aggregates trajectory rows into the figures used to compare policies:
//! average prices and shares, market concentration (HHI), cumulative
//! profits, innovation, markups, regime behaviour and price wars.

use oligopoly_core::{FirmId, Regime};
use oligopoly_ports::StepRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Price standard deviation above which an episode counts as a price war
pub const PRICE_WAR_THRESHOLD: f64 = 5.0;

/// Herfindahl-Hirschman Index: sum of squared shares
///
/// `1/n` for an even split among `n` firms, `1` for a monopoly.
pub fn hhi(shares: &[f64]) -> f64 {
    shares.iter().map(|s| s * s).sum()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirmSummary {
    pub firm: String,
    pub avg_price: f64,
    pub price_volatility: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_share: f64,
    /// Mean over episodes of the final cumulative profit
    pub avg_cum_profit: f64,
    pub avg_final_innovation: f64,
    pub profitable_episodes_pct: f64,
    /// `(avg_price - avg_cost) / avg_cost * 100`
    pub avg_markup_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeSummary {
    pub regime: Regime,
    /// Firm-periods observed in this regime
    pub observations: usize,
    pub avg_prices: Vec<f64>,
    pub avg_shares: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub episodes: usize,
    pub firms: Vec<FirmSummary>,
    /// HHI of the firms' average shares
    pub hhi: f64,
    pub regimes: Vec<RegimeSummary>,
    pub price_war_episodes: Vec<u32>,
}

#[derive(Default)]
struct FirmAccumulator {
    prices: Vec<f64>,
    shares: Vec<f64>,
    costs: Vec<f64>,
    /// episode -> (last step seen, cum_profit at that step, max innovation)
    episodes: BTreeMap<u32, (u32, f64, f64)>,
}

impl TournamentSummary {
    pub fn from_records(records: &[StepRecord]) -> Self {
        let mut firms: BTreeMap<FirmId, FirmAccumulator> = BTreeMap::new();
        let mut regimes: BTreeMap<&'static str, (Regime, BTreeMap<FirmId, (Vec<f64>, Vec<f64>)>)> =
            BTreeMap::new();
        let mut episode_prices: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

        for record in records {
            let Ok(firm) = record.firm.parse::<FirmId>() else {
                log::warn!("Skipping record with unknown firm label {}", record.firm);
                continue;
            };

            let acc = firms.entry(firm).or_default();
            acc.prices.push(record.price);
            acc.shares.push(record.market_share);
            acc.costs.push(record.marginal_cost);
            let entry = acc
                .episodes
                .entry(record.episode)
                .or_insert((record.step, record.cum_profit, record.innovation_stock));
            if record.step >= entry.0 {
                entry.0 = record.step;
                entry.1 = record.cum_profit;
            }
            entry.2 = entry.2.max(record.innovation_stock);

            let (_, by_firm) = regimes
                .entry(record.economic_regime.as_str())
                .or_insert_with(|| (record.economic_regime, BTreeMap::new()));
            let (prices, shares) = by_firm.entry(firm).or_default();
            prices.push(record.price);
            shares.push(record.market_share);

            episode_prices
                .entry(record.episode)
                .or_default()
                .push(record.price);
        }

        let firm_summaries: Vec<FirmSummary> = firms
            .iter()
            .map(|(firm, acc)| {
                let finals: Vec<f64> = acc.episodes.values().map(|e| e.1).collect();
                let innovation: Vec<f64> = acc.episodes.values().map(|e| e.2).collect();
                let profitable = finals.iter().filter(|p| **p > 0.0).count();
                let avg_price = mean(&acc.prices);
                let avg_cost = mean(&acc.costs);

                FirmSummary {
                    firm: firm.label(),
                    avg_price,
                    price_volatility: std_dev(&acc.prices),
                    min_price: acc.prices.iter().copied().fold(f64::INFINITY, f64::min),
                    max_price: acc.prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    avg_share: mean(&acc.shares),
                    avg_cum_profit: mean(&finals),
                    avg_final_innovation: mean(&innovation),
                    profitable_episodes_pct: if finals.is_empty() {
                        0.0
                    } else {
                        profitable as f64 / finals.len() as f64 * 100.0
                    },
                    avg_markup_pct: if avg_cost > 0.0 {
                        (avg_price - avg_cost) / avg_cost * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        let avg_shares: Vec<f64> = firm_summaries.iter().map(|f| f.avg_share).collect();

        let regime_summaries = regimes
            .into_values()
            .map(|(regime, by_firm)| RegimeSummary {
                regime,
                observations: by_firm.values().map(|(p, _)| p.len()).sum(),
                avg_prices: by_firm.values().map(|(p, _)| mean(p)).collect(),
                avg_shares: by_firm.values().map(|(_, s)| mean(s)).collect(),
            })
            .collect();

        let price_war_episodes = episode_prices
            .iter()
            .filter(|(_, prices)| std_dev(prices) > PRICE_WAR_THRESHOLD)
            .map(|(episode, _)| *episode)
            .collect();

        Self {
            episodes: episode_prices.len(),
            hhi: hhi(&avg_shares),
            firms: firm_summaries,
            regimes: regime_summaries,
            price_war_episodes,
        }
    }

    /// Log the summary at info level
    pub fn log(&self) {
        log::info!("Average prices:");
        for f in &self.firms {
            log::info!(
                "  {}: ${:.2} (min {:.2}, max {:.2}, vol {:.2})",
                f.firm,
                f.avg_price,
                f.min_price,
                f.max_price,
                f.price_volatility
            );
        }
        log::info!("Average market shares:");
        for f in &self.firms {
            log::info!("  {}: {:.1}%", f.firm, f.avg_share * 100.0);
        }
        let n = self.firms.len().max(1) as f64;
        log::info!(
            "Market concentration (HHI): {:.4} (1/n = {:.4}; 1 = monopoly)",
            self.hhi,
            1.0 / n
        );
        log::info!("Average cumulative profit (per episode):");
        for f in &self.firms {
            log::info!(
                "  {}: ${:.0} ({:.1}% of episodes profitable, markup {:.1}%)",
                f.firm,
                f.avg_cum_profit,
                f.profitable_episodes_pct,
                f.avg_markup_pct
            );
        }
        log::info!("Average final innovation stock:");
        for f in &self.firms {
            log::info!("  {}: {:.2}", f.firm, f.avg_final_innovation);
        }
        for r in &self.regimes {
            log::info!(
                "{} regime ({} firm-periods): prices {:?}, shares {:?}",
                r.regime.as_str().to_uppercase(),
                r.observations,
                r.avg_prices
                    .iter()
                    .map(|p| format!("{:.2}", p))
                    .collect::<Vec<_>>(),
                r.avg_shares
                    .iter()
                    .map(|s| format!("{:.1}%", s * 100.0))
                    .collect::<Vec<_>>()
            );
        }
        if self.price_war_episodes.is_empty() {
            log::info!("No price wars detected");
        } else {
            log::info!(
                "Price war episodes: {:?} ({}/{})",
                self.price_war_episodes,
                self.price_war_episodes.len(),
                self.episodes
            );
        }
    }
}

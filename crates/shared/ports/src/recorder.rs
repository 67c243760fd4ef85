use oligopoly_core::Regime;
use serde::{Deserialize, Serialize};

use crate::error::RecorderResult;

/// One firm's row of the trajectory log for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub episode: u32,
    /// Zero-based period within the episode
    pub step: u32,
    /// Firm label, e.g. `firm_0`
    pub firm: String,
    pub price: f64,
    /// Investment as submitted by the policy, before flooring
    pub rd_investment: f64,
    pub innovation_stock: f64,
    pub market_share: f64,
    pub marginal_cost: f64,
    pub quantity: f64,
    pub profit_step: f64,
    pub cum_profit: f64,
    pub effective_demand: f64,
    pub economic_regime: Regime,
    pub substitute_pressure: f64,
}

/// Port for trajectory sinks
///
/// The simulator never performs I/O; the runner forwards each step's
/// records to a recorder.
pub trait TrajectoryRecorder: Send {
    /// Append one row
    fn record(&mut self, record: &StepRecord) -> RecorderResult<()>;

    /// Flush buffered rows (optional)
    fn finish(&mut self) -> RecorderResult<()> {
        Ok(())
    }
}

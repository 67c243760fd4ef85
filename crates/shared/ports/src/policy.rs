use oligopoly_core::{FirmAction, FirmId, Observation};

/// Port for action sources
///
/// Anything that maps an observation to a `(price, investment)` decision:
/// - Scripted rules for tests and baselines
/// - Seeded random exploration
/// - Externally trained agents
///
/// Actions may be out of range; the simulator normalizes them.
pub trait Policy: Send {
    /// Policy name for logging
    fn name(&self) -> &str;

    /// Decide this period's action for `firm`
    fn act(&mut self, firm: FirmId, observation: &Observation) -> FirmAction;

    /// Called at the start of each episode (optional)
    fn reset(&mut self, _seed: Option<u64>) {}
}

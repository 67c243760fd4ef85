pub mod accounting;
pub mod allocation;
pub mod demand;
pub mod shocks;
pub mod state;

pub use accounting::ProfitBreakdown;
pub use demand::DemandOutcome;
pub use shocks::{ShockDraws, ShockModel};
pub use state::MarketState;

//! Market Simulator - round-based oligopoly
//!
//! A fixed number of firms simultaneously post a price and an R&D
//! investment each period. The simulator:
//!
//! - **Regulates**: clamps prices into `[marginal cost + margin, ceiling]`
//! - **Shocks**: evolves the boom/recession regime, supplier cost shock and
//!   substitute pressure
//! - **Allocates**: splits effective demand by softmax over price and innovation
//! - **Accounts**: returns each firm's profit as its reward
//!
//! ```rust,ignore
//! use market_sim::{MarketSimulator, model::{FirmAction, MarketConfig}};
//!
//! let mut sim = MarketSimulator::new(MarketConfig::default())?;
//! let (observations, _) = sim.reset(Some(42));
//! let outcome = sim.step_indexed(&[FirmAction::new(150.0, 5.0); 3])?;
//! ```

// Application layer
pub mod application;

// Domain layer
pub mod domain;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::MarketSimulator;
pub use domain::{MarketState, ProfitBreakdown};
pub use error::{MarketError, Result};
pub use model::{ResetInfo, StepInfo, StepOutcome};

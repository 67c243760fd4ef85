//! Oligopoly Strategy Library
//!
//! Scripted policies that drive the market simulator without any
//! learning library:
//! - Fixed price and investment (baselines, regression tests)
//! - Uniform random exploration (seeded)
//! - Cost-plus pricing over the observed marginal cost
//! - Undercutting the rivals' average price
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oligopoly_strategy::{PolicySpec, UndercutConfig};
//!
//! let spec = PolicySpec::Undercut(UndercutConfig::default());
//! let mut policy = spec.build(&MarketConfig::default(), Some(42));
//! let action = policy.act(firm, &observation);
//! ```

pub mod builder;
pub mod cost_plus;
pub mod fixed;
pub mod random;
pub mod undercut;

// Re-export main types
pub use builder::PolicySpec;
pub use cost_plus::CostPlusPolicy;
pub use fixed::FixedPolicy;
pub use oligopoly_ports::Policy;
pub use random::{RandomPolicy, RandomPolicyConfig};
pub use undercut::{UndercutConfig, UndercutPolicy};

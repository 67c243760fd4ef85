//! Oligopoly Core Domain
//!
//! Pure domain types for the oligopoly market simulator.
//! This crate contains no async and no simulation logic, and is 100% unit testable.

pub mod config;
pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use config::{ActionBounds, ConfigError, MarketConfig};
pub use entities::{FirmAction, FirmId, ParseFirmIdError, Regime};
pub use values::{Money, Observation, Price};

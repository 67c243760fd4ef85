use oligopoly_core::{ConfigError, FirmId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Simulator stepped before reset")]
    NotReset,

    #[error("Missing action for {0}")]
    MissingAction(FirmId),

    #[error("Unknown firm: {0}")]
    UnknownFirm(FirmId),

    #[error("Expected {expected} actions, got {got}")]
    ActionCount { expected: usize, got: usize },

    #[error("Non-finite action from {firm}")]
    NonFiniteAction { firm: FirmId },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MarketError>;

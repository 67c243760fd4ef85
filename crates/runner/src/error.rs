use market_sim::MarketError;
use oligopoly_core::ConfigError;
use oligopoly_ports::RecorderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Recorder error: {0}")]
    Recorder(#[from] RecorderError),

    #[error("Expected one policy per firm ({expected}), got {got}")]
    PolicyCount { expected: usize, got: usize },

    #[error("Episode task failed: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;

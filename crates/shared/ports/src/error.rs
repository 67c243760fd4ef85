use thiserror::Error;

/// Errors raised by trajectory recorders
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Recorder already finished")]
    Finished,
}

pub type RecorderResult<T> = std::result::Result<T, RecorderError>;

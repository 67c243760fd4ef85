use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LABEL_PREFIX: &str = "firm_";

/// Stable identifier of a firm within a market
///
/// The wrapped value is the firm's index into every per-firm state vector,
/// so lookups never go through a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FirmId(usize);

impl FirmId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0
    }

    /// Human-readable label, e.g. `firm_0`
    pub fn label(&self) -> String {
        format!("{}{}", LABEL_PREFIX, self.0)
    }

    /// All firm ids of an `n`-firm market, in index order
    pub fn all(n_firms: usize) -> Vec<FirmId> {
        (0..n_firms).map(FirmId).collect()
    }
}

impl fmt::Display for FirmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", LABEL_PREFIX, self.0)
    }
}

impl From<usize> for FirmId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Error parsing a firm label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid firm label: {0}")]
pub struct ParseFirmIdError(pub String);

impl FromStr for FirmId {
    type Err = ParseFirmIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(LABEL_PREFIX)
            .and_then(|rest| rest.parse::<usize>().ok())
            .map(FirmId)
            .ok_or_else(|| ParseFirmIdError(s.to_string()))
    }
}

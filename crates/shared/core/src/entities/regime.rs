use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro-economic demand state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Boom,
    Recession,
}

impl Regime {
    /// Returns the other regime
    pub fn switched(&self) -> Self {
        match self {
            Regime::Boom => Regime::Recession,
            Regime::Recession => Regime::Boom,
        }
    }

    /// Observation encoding: boom = 1, recession = 0
    pub fn indicator(&self) -> f64 {
        match self {
            Regime::Boom => 1.0,
            Regime::Recession => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Boom => "boom",
            Regime::Recession => "recession",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switched() {
        assert_eq!(Regime::Boom.switched(), Regime::Recession);
        assert_eq!(Regime::Recession.switched(), Regime::Boom);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Regime::Recession).unwrap();
        assert_eq!(json, "\"recession\"");
    }
}

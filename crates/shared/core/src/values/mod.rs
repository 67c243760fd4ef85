mod observation;

pub use observation::Observation;

/// Posted price per unit
pub type Price = f64;

/// Monetary amount (revenue, cost, profit, R&D spend)
pub type Money = f64;

use serde::{Deserialize, Serialize};

use crate::values::{Money, Price};

/// A firm's decision for one period: posted price and R&D investment
///
/// Values are unconstrained; the simulator clamps the price into the legal
/// band and floors investment at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirmAction {
    pub price: Price,
    pub investment: Money,
}

impl FirmAction {
    pub fn new(price: Price, investment: Money) -> Self {
        Self { price, investment }
    }

    pub fn is_finite(&self) -> bool {
        self.price.is_finite() && self.investment.is_finite()
    }
}

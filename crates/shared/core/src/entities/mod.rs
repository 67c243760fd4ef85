mod action;
mod firm;
mod regime;

pub use action::FirmAction;
pub use firm::{FirmId, ParseFirmIdError};
pub use regime::Regime;

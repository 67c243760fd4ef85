//! Oligopoly Ports
//!
//! Port definitions (traits) for the oligopoly market simulator.
//! These define the boundaries between the market core and its collaborators.

mod error;
mod policy;
mod recorder;

pub use error::{RecorderError, RecorderResult};
pub use policy::Policy;
pub use recorder::{StepRecord, TrajectoryRecorder};

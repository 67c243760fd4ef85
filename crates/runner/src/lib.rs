//! Oligopoly Runner - seeded tournaments over the market simulator
//!
//! Pits one scripted policy per firm against the others for many episodes:
//!
//! - **Config**: JSON tournament description (market, policies, seed)
//! - **Episode**: one reset-to-termination run with per-step trajectory rows
//! - **Recorder**: in-memory and JSON-lines trajectory sinks
//! - **Tournament**: serial or parallel episode execution and the final report
//! - **Summary**: prices, shares, HHI, profits, markups, regimes and price wars
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐   actions    ┌──────────────────┐
//!   │  Policies    │ ───────────▶ │ MarketSimulator  │
//!   │ (one/firm)   │ ◀─────────── │                  │
//!   └──────────────┘ observations └────────┬─────────┘
//!                                          │ step rows
//!                                          ▼
//!                              ┌───────────────────────┐
//!                              │  TrajectoryRecorder   │
//!                              └───────────┬───────────┘
//!                                          ▼
//!                              ┌───────────────────────┐
//!                              │  TournamentSummary    │
//!                              └───────────────────────┘
//! ```

pub mod config;
pub mod episode;
pub mod error;
pub mod recorder;
pub mod summary;
pub mod tournament;

// Re-export main types
pub use config::TournamentConfig;
pub use episode::{EpisodeResult, run_episode};
pub use error::{Result, RunnerError};
pub use recorder::{JsonLinesRecorder, MemoryRecorder};
pub use summary::{FirmSummary, RegimeSummary, TournamentSummary, hhi};
pub use tournament::{Tournament, TournamentReport};

//! Tournament - many seeded episodes with the same line-up of policies
//!
//! Episodes are independent, so in parallel mode each one runs on its own
//! blocking worker with fresh policy instances. Rows are forwarded to the
//! caller's recorder in episode order either way, so serial and parallel
//! runs of a seeded tournament produce the same output.

use chrono::{DateTime, Utc};
use oligopoly_core::MarketConfig;
use oligopoly_ports::{Policy, StepRecord, TrajectoryRecorder};
use oligopoly_strategy::PolicySpec;
use serde::Serialize;
use uuid::Uuid;

use crate::config::TournamentConfig;
use crate::episode::{EpisodeResult, run_episode};
use crate::error::{Result, RunnerError};
use crate::recorder::MemoryRecorder;
use crate::summary::TournamentSummary;

#[derive(Debug, Clone, Serialize)]
pub struct TournamentReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub policies: Vec<String>,
    pub episodes: Vec<EpisodeResult>,
    pub summary: TournamentSummary,
}

impl TournamentReport {
    /// Total wall-clock duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

pub struct Tournament {
    config: TournamentConfig,
    policies: Vec<PolicySpec>,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Result<Self> {
        config.market.validate()?;
        let policies = config.resolved_policies();
        if policies.len() != config.market.n_firms {
            return Err(RunnerError::PolicyCount {
                expected: config.market.n_firms,
                got: policies.len(),
            });
        }
        Ok(Self { config, policies })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Run every episode on the calling thread
    pub fn run_serial(&self, recorder: &mut dyn TrajectoryRecorder) -> Result<TournamentReport> {
        let started_at = Utc::now();
        log::info!(
            "Starting tournament: {} episodes, {} firms (serial)",
            self.config.episodes,
            self.config.market.n_firms
        );

        let mut outcomes = Vec::with_capacity(self.config.episodes as usize);
        for episode in 0..self.config.episodes {
            outcomes.push(play(
                episode,
                self.config.episode_seed(episode),
                &self.config.market,
                &self.policies,
            )?);
        }

        self.finish(started_at, outcomes, recorder)
    }

    /// Run the tournament, in parallel unless configured otherwise
    pub async fn run(&self, recorder: &mut dyn TrajectoryRecorder) -> Result<TournamentReport> {
        if !self.config.parallel {
            return self.run_serial(recorder);
        }

        let started_at = Utc::now();
        log::info!(
            "Starting tournament: {} episodes, {} firms (parallel)",
            self.config.episodes,
            self.config.market.n_firms
        );

        let handles: Vec<_> = (0..self.config.episodes)
            .map(|episode| {
                let seed = self.config.episode_seed(episode);
                let market = self.config.market.clone();
                let specs = self.policies.clone();
                tokio::task::spawn_blocking(move || play(episode, seed, &market, &specs))
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = handle
                .await
                .map_err(|e| RunnerError::Join(e.to_string()))??;
            outcomes.push(outcome);
        }

        self.finish(started_at, outcomes, recorder)
    }

    fn finish(
        &self,
        started_at: DateTime<Utc>,
        outcomes: Vec<(EpisodeResult, Vec<StepRecord>)>,
        recorder: &mut dyn TrajectoryRecorder,
    ) -> Result<TournamentReport> {
        let mut episodes = Vec::with_capacity(outcomes.len());
        let mut records = Vec::new();

        for (result, rows) in outcomes {
            for row in &rows {
                recorder.record(row)?;
            }
            records.extend(rows);
            episodes.push(result);
        }
        recorder.finish()?;

        let summary = TournamentSummary::from_records(&records);
        let policies = self
            .policies
            .iter()
            .map(|spec| spec.name().to_string())
            .collect();

        let report = TournamentReport {
            run_id: Uuid::new_v4(),
            started_at,
            finished_at: Utc::now(),
            policies,
            episodes,
            summary,
        };
        log::info!(
            "Tournament {} finished: {} episodes, {} rows in {}ms",
            report.run_id,
            report.episodes.len(),
            records.len(),
            report.duration_ms()
        );

        Ok(report)
    }
}

/// One episode with fresh policies, buffered in memory
fn play(
    episode: u32,
    seed: Option<u64>,
    market: &MarketConfig,
    specs: &[PolicySpec],
) -> Result<(EpisodeResult, Vec<StepRecord>)> {
    let mut policies: Vec<Box<dyn Policy>> =
        specs.iter().map(|spec| spec.build(market, seed)).collect();
    let mut recorder = MemoryRecorder::new();
    let result = run_episode(episode, seed, market, &mut policies, &mut recorder)?;
    Ok((result, recorder.into_records()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(episodes: u32, seed: Option<u64>) -> TournamentConfig {
        TournamentConfig {
            market: MarketConfig::with_firms(3, 15),
            episodes,
            seed,
            parallel: false,
            ..TournamentConfig::default()
        }
    }

    #[test]
    fn test_policy_count_checked() {
        let mut cfg = config(1, None);
        cfg.policies = vec![PolicySpec::default(); 2];
        assert!(matches!(
            Tournament::new(cfg),
            Err(RunnerError::PolicyCount { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_serial_run_forwards_all_rows() {
        let tournament = Tournament::new(config(3, Some(5))).unwrap();
        let mut recorder = MemoryRecorder::new();
        let report = tournament.run_serial(&mut recorder).unwrap();

        assert_eq!(report.episodes.len(), 3);
        assert_eq!(recorder.len(), 3 * 15 * 3);
        assert_eq!(report.summary.episodes, 3);
        assert_eq!(report.policies, vec!["random"; 3]);
        assert!(report.finished_at >= report.started_at);

        let episodes: Vec<u32> = recorder.records().iter().map(|r| r.episode).collect();
        assert!(episodes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_seeded_serial_runs_repeat() {
        let tournament = Tournament::new(config(2, Some(77))).unwrap();
        let a = tournament.run_serial(&mut MemoryRecorder::new()).unwrap();
        let b = tournament.run_serial(&mut MemoryRecorder::new()).unwrap();

        assert_eq!(a.episodes, b.episodes);
        assert_eq!(a.summary, b.summary);
        assert_ne!(a.run_id, b.run_id);
    }
}

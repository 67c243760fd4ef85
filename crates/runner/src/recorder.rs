//! Trajectory recorders
//!
//! Sinks for the per-firm, per-step rows produced by the runner.

use oligopoly_ports::{RecorderError, RecorderResult, StepRecord, TrajectoryRecorder};
use std::io::Write;

/// Keeps every record in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryRecorder {
    records: Vec<StepRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TrajectoryRecorder for MemoryRecorder {
    fn record(&mut self, record: &StepRecord) -> RecorderResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesRecorder<W: Write + Send> {
    writer: W,
    written: u64,
    finished: bool,
}

impl<W: Write + Send> JsonLinesRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            finished: false,
        }
    }

    /// Number of rows written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> TrajectoryRecorder for JsonLinesRecorder<W> {
    fn record(&mut self, record: &StepRecord) -> RecorderResult<()> {
        if self.finished {
            return Err(RecorderError::Finished);
        }
        let line =
            serde_json::to_string(record).map_err(|e| RecorderError::Serialization(e.to_string()))?;
        writeln!(self.writer, "{}", line)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> RecorderResult<()> {
        self.writer.flush()?;
        self.finished = true;
        log::debug!("Trajectory recorder flushed {} rows", self.written);
        Ok(())
    }
}

//! Statistics Output
//!
//! Collects the per-iteration records and writes the run report as JSON.

use bevy_ecs::prelude::*;
use std::fs;
use std::io;
use std::path::Path;

use unet_snapshot::{IterationRecord, RunSummary, SimulationReport};

/// Resource to accumulate statistics during simulation
#[derive(Resource, Debug, Default)]
pub struct StatsCollector {
    pub history: Vec<IterationRecord>,
    pub total_removed: usize,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one iteration
    pub fn record(&mut self, record: IterationRecord) {
        self.total_removed += record.removed;
        self.history.push(record);
    }

    pub fn latest(&self) -> Option<&IterationRecord> {
        self.history.last()
    }

    /// Combine the history with the final summary
    pub fn generate_report(&self, summary: RunSummary) -> SimulationReport {
        SimulationReport {
            summary,
            history: self.history.clone(),
        }
    }
}

/// Write the report to `path`, creating parent directories as needed
pub fn write_stats(report: &SimulationReport, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = report
        .to_json()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    fs::write(path, json)
}

//! Progress table, one row per iteration, written as soon as it is computed.

use bevy_ecs::prelude::*;
use std::io::Write;

use unet_snapshot::IterationRecord;

const HEADER: &str = "#Iteration Removed Links         Density    Cluster.   Assort.";

/// Resource: where the progress rows go (stderr in the binary)
#[derive(Resource, Default)]
pub struct ProgressTable {
    out: Option<Box<dyn Write + Send + Sync>>,
    with_path_length: bool,
    header_written: bool,
}

impl ProgressTable {
    pub fn new(out: Box<dyn Write + Send + Sync>, with_path_length: bool) -> Self {
        Self {
            out: Some(out),
            with_path_length,
            header_written: false,
        }
    }

    /// A table that discards its rows
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn header(with_path_length: bool) -> String {
        if with_path_length {
            format!("{}    AvgPath", HEADER)
        } else {
            HEADER.to_string()
        }
    }

    pub fn format_row(record: &IterationRecord) -> String {
        let mut row = format!(
            "{:<11}{:<22}{:<11.2}{:<11.2}{:<11.2}",
            record.iteration,
            record.removed,
            record.density,
            record.clustering,
            record.assortativity
        );
        if let Some(path_length) = record.average_path_length {
            row.push_str(&format!("{:<11.2}", path_length));
        }
        row
    }

    /// Writes the header before the first row, then the row itself
    pub fn write_row(&mut self, record: &IterationRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let mut text = String::new();
        if !self.header_written {
            text.push_str(&Self::header(self.with_path_length));
            text.push('\n');
        }
        text.push_str(&Self::format_row(record));
        text.push('\n');

        let result = out.write_all(text.as_bytes()).and_then(|_| out.flush());
        match result {
            Ok(()) => self.header_written = true,
            Err(e) => {
                tracing::warn!("Could not write progress row: {}. Disabling progress output.", e);
                self.out = None;
            }
        }
    }
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub(crate) const SNAPSHOT_COLUMNS: [&str; 9] = [
    "tick",
    "agent_id",
    "state",
    "x",
    "y",
    "z",
    "energy",
    "distance_traveled",
    "communications_count",
];

pub(crate) const SUMMARY_COLUMNS: [&str; 9] = [
    "tick",
    "simulation_time",
    "active_agents",
    "average_energy",
    "active_links",
    "total_messages",
    "packet_delivery_rate",
    "transitions",
    "active_missions",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_COLUMNS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_COLUMNS)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.state.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.energy.to_string(),
                row.distance_traveled.to_string(),
                row.communications_count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.simulation_time.to_string(),
            row.active_agents.to_string(),
            row.average_energy.to_string(),
            row.active_links.to_string(),
            row.total_messages.to_string(),
            row.packet_delivery_rate.to_string(),
            row.transitions.to_string(),
            row.active_missions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_status.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::StatusWriter;
use crate::{AgentStatusRow, OutputResult, TickSummaryRow};

pub const STATUS_FILE: &str = "agent_status.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

pub const STATUS_HEADER: [&str; 14] = [
    "tick", "time_ms", "agent_id", "name", "state", "behavior", "action", "target",
    "health", "food", "x", "y", "z", "inventory",
];

pub const SUMMARY_HEADER: [&str; 4] = ["tick", "time_ms", "ticked_agents", "switches"];

/// Writes status traces to two CSV files.
pub struct CsvStatusWriter {
    statuses:  Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvStatusWriter {
    /// Create (truncating) both files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut statuses = Writer::from_path(dir.join(STATUS_FILE))?;
        statuses.write_record(STATUS_HEADER)?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { statuses, summaries, finished: false })
    }
}

impl StatusWriter for CsvStatusWriter {
    fn write_statuses(&mut self, rows: &[AgentStatusRow]) -> OutputResult<()> {
        for row in rows {
            self.statuses.write_record(&[
                row.tick.to_string(),
                row.time_ms.to_string(),
                row.agent_id.to_string(),
                row.name.clone(),
                row.state.to_owned(),
                row.behavior.to_owned(),
                row.action.to_owned(),
                row.target.clone(),
                format!("{:.1}", row.health),
                row.food.to_string(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                format!("{:.2}", row.z),
                row.inventory.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_ms.to_string(),
            row.ticked_agents.to_string(),
            row.switches.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.statuses.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

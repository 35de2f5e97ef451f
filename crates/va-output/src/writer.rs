//! The `StatusWriter` trait implemented by every backend.

use crate::{AgentStatusRow, OutputResult, TickSummaryRow};

/// Sink for status rows.
///
/// The observer never propagates these errors; they are stored and retrieved
/// with [`StatusObserver::take_error`][crate::StatusObserver::take_error].
pub trait StatusWriter {
    /// Write a batch of agent status rows.
    fn write_statuses(&mut self, rows: &[AgentStatusRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

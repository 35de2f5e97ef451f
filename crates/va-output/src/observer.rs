//! `StatusObserver<W>`: bridges `SimObserver` to a `StatusWriter`.

use tracing::warn;

use va_core::Tick;
use va_sim::{Agent, AgentManager, SimObserver, TickOutcome};

use crate::row::{AgentStatusRow, TickSummaryRow};
use crate::writer::StatusWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a status row per agent at every snapshot
/// and a summary row per tick.
///
/// `SimObserver` hooks return nothing, so writer errors are kept (the first
/// one only) and handed back by [`take_error`][Self::take_error].
pub struct StatusObserver<W: StatusWriter> {
    writer:           W,
    tick_duration_ms: u64,
    switches:         u64,
    last_error:       Option<OutputError>,
}

impl<W: StatusWriter> StatusObserver<W> {
    pub fn new(writer: W, tick_duration_ms: u64) -> Self {
        Self {
            writer,
            tick_duration_ms,
            switches:   0,
            last_error: None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "status output failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: StatusWriter> SimObserver for StatusObserver<W> {
    fn on_agent_ticked(&mut self, _tick: Tick, _agent: &Agent, outcome: &TickOutcome) {
        if outcome.switched {
            self.switches += 1;
        }
    }

    fn on_tick_end(&mut self, tick: Tick, ticked: usize) {
        let row = TickSummaryRow {
            tick:          tick.0,
            time_ms:       tick.0 * self.tick_duration_ms,
            ticked_agents: ticked as u64,
            switches:      std::mem::take(&mut self.switches),
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, now_ms: u64, agents: &AgentManager) {
        let rows: Vec<AgentStatusRow> = agents
            .iter()
            .map(|agent| AgentStatusRow::from_agent(tick, now_ms, agent))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_statuses(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

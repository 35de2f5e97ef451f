//! Simulation observer trait for progress reporting and data collection.

use va_core::Tick;
use va_schedule::TickOutcome;

use crate::{Agent, AgentManager};

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: switch counter
///
/// ```rust,ignore
/// struct Switches(usize);
///
/// impl SimObserver for Switches {
///     fn on_agent_ticked(&mut self, _tick: Tick, _agent: &Agent, outcome: &TickOutcome) {
///         if outcome.switched {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after each tickable agent's scheduler ran.
    fn on_agent_ticked(&mut self, _tick: Tick, _agent: &Agent, _outcome: &TickOutcome) {}

    /// Called at the end of each tick with the number of agents driven.
    fn on_tick_end(&mut self, _tick: Tick, _ticked: usize) {}

    /// Called every `snapshot_interval` ticks with read-only access to every
    /// agent, so output writers can record status rows.
    fn on_snapshot(&mut self, _tick: Tick, _now_ms: u64, _agents: &AgentManager) {}

    /// Called once by [`Sim::run_ticks`][crate::Sim::run_ticks] after its
    /// final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

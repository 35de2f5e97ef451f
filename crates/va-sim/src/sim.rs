//! The `Sim` struct and its tick loop.

use tracing::debug;

use va_behavior::BehaviorKind;
use va_core::{AgentId, Clock, Config, Location, SimClock, Tick};
use va_world::{HostileIndex, WorldView};

use crate::{Agent, AgentManager, SimError, SimObserver, SimResult};

/// The main simulation runner.
///
/// Each tick drives every tickable agent once, in ascending id order:
///
/// 1. A dead entity stops its active behavior and the agent turns `Dead`.
/// 2. A `Spawning` agent initializes its scheduler and turns `Active`.
/// 3. The scheduler ticks; the agent is `Active` while a behavior holds
///    control and `Idle` otherwise.
///
/// Hostiles are owned by the host: it inserts, moves and retargets them in
/// [`Sim::hostiles`] between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W: WorldView> {
    pub config: Config,

    /// Fixed-step clock; `now_ms` is what behaviors see.
    pub clock: SimClock,

    pub world: W,

    pub hostiles: HostileIndex,

    pub agents: AgentManager,

    /// Ticks between [`SimObserver::on_snapshot`] calls.  Zero disables
    /// snapshots.
    pub snapshot_interval: u64,
}

impl<W: WorldView> Sim<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run exactly `n` ticks from the current position.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Drive every tickable agent once and advance the clock.  Returns how
    /// many agents ran.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> usize {
        let tick = self.clock.current_tick;
        let now = self.clock.now_ms();
        observer.on_tick_start(tick);

        let mut ticked = 0;
        for agent in self.agents.iter_mut() {
            if let Some(outcome) = agent.tick(now, &mut self.world, &mut self.hostiles) {
                ticked += 1;
                observer.on_agent_ticked(tick, agent, &outcome);
            }
        }

        observer.on_tick_end(tick, ticked);
        if self.snapshot_interval > 0 && tick.0.is_multiple_of(self.snapshot_interval) {
            observer.on_snapshot(tick, now, &self.agents);
        }
        self.clock.advance();
        ticked
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // ── Agent management ──────────────────────────────────────────────────

    pub fn spawn(&mut self, name: &str, home: Location) -> SimResult<AgentId> {
        self.agents.spawn(name, home)
    }

    /// Remove an agent; hostiles chasing it lose their target.
    pub fn remove(&mut self, id: AgentId) -> SimResult<Agent> {
        let agent = self.agents.remove(id)?;
        self.hostiles.clear_target(id);
        Ok(agent)
    }

    /// Hand control of `id` to `kind` now, bypassing arbitration until the
    /// next arbitration interval.
    pub fn force_behavior(&mut self, id: AgentId, kind: BehaviorKind) -> SimResult<()> {
        let now = self.clock.now_ms();
        let agent = self.agents.get_mut(id).ok_or(SimError::UnknownAgent(id))?;
        agent.force(kind, now, &mut self.world, &mut self.hostiles)?;
        debug!(agent = %id, behavior = %kind, "forced");
        Ok(())
    }

    pub fn disable(&mut self, id: AgentId) -> SimResult<()> {
        let agent = self.agents.get_mut(id).ok_or(SimError::UnknownAgent(id))?;
        agent.disable();
        Ok(())
    }
}

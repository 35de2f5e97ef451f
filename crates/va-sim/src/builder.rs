//! Fluent builder for constructing a [`Sim`].

use va_core::{Config, Location, SimClock};
use va_world::{HostileIndex, WorldView};

use crate::{AgentManager, Sim, SimResult};

/// Fluent builder for [`Sim<W>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                          |
/// |--------------------------|----------------------------------|
/// | `.hostiles(h)`           | `HostileIndex::new()`            |
/// | `.agent(name, home)`     | no agents                        |
/// | `.snapshot_interval(n)`  | one snapshot per simulated second |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(Config::default(), VoxelWorld::flat(63))
///     .agent("miner", Location::new(0.5, 64.0, 0.5))
///     .build()?;
/// sim.run_ticks(200, &mut NoopObserver);
/// ```
pub struct SimBuilder<W: WorldView> {
    config:            Config,
    world:             W,
    hostiles:          HostileIndex,
    agents:            Vec<(String, Location)>,
    snapshot_interval: Option<u64>,
}

impl<W: WorldView> SimBuilder<W> {
    pub fn new(config: Config, world: W) -> Self {
        Self {
            config,
            world,
            hostiles:          HostileIndex::new(),
            agents:            Vec::new(),
            snapshot_interval: None,
        }
    }

    pub fn hostiles(mut self, hostiles: HostileIndex) -> Self {
        self.hostiles = hostiles;
        self
    }

    /// Queue an agent to spawn at `home` when the sim is built.
    pub fn agent(mut self, name: impl Into<String>, home: Location) -> Self {
        self.agents.push((name.into(), home));
        self
    }

    /// Ticks between observer snapshots; zero disables them.
    pub fn snapshot_interval(mut self, ticks: u64) -> Self {
        self.snapshot_interval = Some(ticks);
        self
    }

    /// Validate the configuration, spawn queued agents and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<W>> {
        self.config.validate()?;

        let clock = SimClock::new(self.config.agents.tick_duration_ms);
        let snapshot_interval = self
            .snapshot_interval
            .unwrap_or_else(|| clock.ticks_for_ms(1_000));

        let mut agents = AgentManager::new(self.config.clone());
        for (name, home) in &self.agents {
            agents.spawn(name, *home)?;
        }

        Ok(Sim {
            config:   self.config,
            clock,
            world:    self.world,
            hostiles: self.hostiles,
            agents,
            snapshot_interval,
        })
    }
}

//! `AgentManager`: arena of agents with stable ids and unique names.
//!
//! Removed slots are recycled lowest-id first, so a fresh manager hands out
//! `AgentId(0), AgentId(1), …` and iteration order is always by id.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::info;

use va_agent::{AgentBody, AgentState};
use va_core::{AgentId, AgentRng, Config, Location};
use va_schedule::{BehaviorScheduler, default_behaviors};

use crate::{Agent, SimError, SimResult};

/// Agent counts by lifecycle state.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct AgentStats {
    pub total:    usize,
    pub spawning: usize,
    pub active:   usize,
    pub idle:     usize,
    pub dead:     usize,
    pub disabled: usize,
}

impl fmt::Display for AgentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} agents ({} active, {} idle, {} dead, {} disabled)",
            self.total, self.active, self.idle, self.dead, self.disabled
        )
    }
}

pub struct AgentManager {
    config: Config,
    slots:  Vec<Option<Agent>>,
    free:   Vec<AgentId>,
    names:  FxHashMap<String, AgentId>,
}

impl AgentManager {
    /// `config` must already be validated; every spawned agent gets the
    /// stock behavior set built from it.
    pub fn new(config: Config) -> Self {
        AgentManager {
            config,
            slots: Vec::new(),
            free:  Vec::new(),
            names: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn max_agents(&self) -> usize {
        self.config.agents.max_agents
    }

    /// Number of live agents (any state).
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Create an agent standing at `home`.  It starts in `Spawning` and
    /// becomes `Active` on its first tick.
    pub fn spawn(&mut self, name: &str, home: Location) -> SimResult<AgentId> {
        if self.len() >= self.max_agents() {
            return Err(SimError::CapacityReached { max: self.max_agents() });
        }
        if self.names.contains_key(name) {
            return Err(SimError::DuplicateName(name.to_owned()));
        }

        let mut scheduler = BehaviorScheduler::new(self.config.scheduler.arbitration_interval_ms);
        for behavior in default_behaviors(&self.config)? {
            scheduler.register(behavior)?;
        }

        let id = match self.free.pop() {
            Some(id) => id,
            None => AgentId::try_from(self.slots.len())
                .map_err(|_| SimError::CapacityReached { max: self.max_agents() })?,
        };
        let rng = AgentRng::new(self.config.agents.seed, id);
        let agent = Agent::new(id, name.to_owned(), AgentBody::new(home), scheduler, rng);

        if id.index() == self.slots.len() {
            self.slots.push(Some(agent));
        } else {
            self.slots[id.index()] = Some(agent);
        }
        self.names.insert(name.to_owned(), id);
        info!(agent = %id, name, home = %home.block(), "agent spawned");
        Ok(id)
    }

    /// Take the agent out of the arena.  Its scheduler is shut down and its
    /// inventory leaves with it.
    pub fn remove(&mut self, id: AgentId) -> SimResult<Agent> {
        let mut agent = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(SimError::UnknownAgent(id))?;
        agent.scheduler.shutdown();
        self.names.remove(&agent.name);
        self.free.push(id);
        // Highest first so `pop` recycles the lowest id.
        self.free.sort_unstable_by(|a, b| b.cmp(a));
        info!(agent = %id, name = %agent.name, "agent removed");
        Ok(agent)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Agent> {
        self.names.get(name).and_then(|&id| self.get(id))
    }

    /// Agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.slots.iter_mut().flatten()
    }

    pub fn stats(&self) -> AgentStats {
        let mut stats = AgentStats::default();
        for agent in self.iter() {
            stats.total += 1;
            match agent.state {
                AgentState::Spawning => stats.spawning += 1,
                AgentState::Active   => stats.active += 1,
                AgentState::Idle     => stats.idle += 1,
                AgentState::Dead     => stats.dead += 1,
                AgentState::Disabled => stats.disabled += 1,
            }
        }
        stats
    }
}

impl fmt::Debug for AgentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentManager")
            .field("agents", &self.len())
            .field("max_agents", &self.max_agents())
            .field("free", &self.free)
            .finish()
    }
}

//! One simulated agent: its body, belongings, scheduler and lifecycle.

use tracing::{debug, info, warn};

use va_agent::{AgentBody, AgentState, EntityControl, Inventory};
use va_behavior::{ActivityStatus, BehaviorContext, BehaviorKind};
use va_core::{AgentId, AgentRng};
use va_schedule::{BehaviorScheduler, TickOutcome};
use va_world::{HostileIndex, WorldView};

use crate::{SimError, SimResult};

pub struct Agent {
    pub id:        AgentId,
    pub name:      String,
    pub state:     AgentState,
    pub body:      AgentBody,
    pub inventory: Inventory,
    pub scheduler: BehaviorScheduler,
    pub rng:       AgentRng,
    pub status:    ActivityStatus,
}

impl Agent {
    pub fn new(
        id:        AgentId,
        name:      String,
        body:      AgentBody,
        scheduler: BehaviorScheduler,
        rng:       AgentRng,
    ) -> Self {
        Agent {
            id,
            name,
            state:     AgentState::Spawning,
            body,
            inventory: Inventory::new(),
            scheduler,
            rng,
            status:    ActivityStatus::default(),
        }
    }

    /// Drive the scheduler once.
    ///
    /// Returns `None` when the agent is not tickable, including the tick on
    /// which its entity is found dead.
    pub fn tick(
        &mut self,
        now:      u64,
        world:    &mut dyn WorldView,
        hostiles: &mut HostileIndex,
    ) -> Option<TickOutcome> {
        if !self.state.is_tickable() {
            return None;
        }
        if self.body.is_dead() {
            self.die(now, world, hostiles);
            return None;
        }
        if self.state == AgentState::Spawning {
            self.activate();
        }

        let Agent { id, scheduler, body, inventory, rng, status, .. } = self;
        let mut ctx = BehaviorContext {
            now,
            agent: *id,
            world,
            hostiles,
            entity: body,
            inventory,
            rng,
            status,
        };
        let outcome = scheduler.tick(&mut ctx);

        let next = if outcome.active.is_some() { AgentState::Active } else { AgentState::Idle };
        if next != self.state {
            debug!(agent = %self.id, from = %self.state, to = %next, "agent state");
            self.state = next;
        }
        Some(outcome)
    }

    /// Switch straight to `kind`, bypassing arbitration.
    pub fn force(
        &mut self,
        kind:     BehaviorKind,
        now:      u64,
        world:    &mut dyn WorldView,
        hostiles: &mut HostileIndex,
    ) -> SimResult<()> {
        if !self.state.is_tickable() || self.body.is_dead() {
            return Err(SimError::NotTickable { id: self.id, state: self.state });
        }
        if self.state == AgentState::Spawning {
            self.activate();
        }

        let Agent { id, scheduler, body, inventory, rng, status, .. } = self;
        let mut ctx = BehaviorContext {
            now,
            agent: *id,
            world,
            hostiles,
            entity: body,
            inventory,
            rng,
            status,
        };
        scheduler.force(kind, &mut ctx)?;
        self.state = AgentState::Active;
        Ok(())
    }

    /// Shut the scheduler down for good.  The agent keeps its body and
    /// inventory but is never ticked again.
    pub fn disable(&mut self) {
        if self.state == AgentState::Disabled {
            return;
        }
        self.scheduler.shutdown();
        self.status.clear();
        self.state = AgentState::Disabled;
        info!(agent = %self.id, name = %self.name, "agent disabled");
    }

    fn activate(&mut self) {
        if !self.scheduler.is_initialized() {
            self.scheduler.initialize();
        }
        self.state = AgentState::Active;
        info!(agent = %self.id, name = %self.name, behaviors = self.scheduler.len(), "agent active");
    }

    fn die(&mut self, now: u64, world: &mut dyn WorldView, hostiles: &mut HostileIndex) {
        let Agent { id, scheduler, body, inventory, rng, status, .. } = self;
        let mut ctx = BehaviorContext {
            now,
            agent: *id,
            world,
            hostiles,
            entity: body,
            inventory,
            rng,
            status,
        };
        scheduler.stop_active(&mut ctx);
        self.state = AgentState::Dead;
        warn!(agent = %self.id, name = %self.name, pos = %self.body.location.block(), "agent died");
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

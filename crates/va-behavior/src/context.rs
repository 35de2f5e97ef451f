//! Per-tick view of one agent and the world, handed to every behavior call.

use va_agent::{EntityControl, Inventory};
use va_core::{AgentId, AgentRng};
use va_world::{HostileIndex, WorldView};

use crate::BehaviorKind;

// ── ActivityStatus ────────────────────────────────────────────────────────────

/// What the agent is doing right now, for status displays and traces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityStatus {
    pub behavior: Option<BehaviorKind>,
    /// Short verb phrase, e.g. `"mining"`, `"fleeing"`.
    pub action:   &'static str,
    /// What the action is aimed at, e.g. `"iron_ore (3, 64, 0)"`.
    pub target:   Option<String>,
}

impl ActivityStatus {
    pub fn set(&mut self, action: &'static str, target: Option<String>) {
        self.action = action;
        self.target = target;
    }

    pub fn set_action(&mut self, action: &'static str) {
        self.action = action;
        self.target = None;
    }

    pub fn clear(&mut self) {
        *self = ActivityStatus::default();
    }
}

// ── BehaviorContext ───────────────────────────────────────────────────────────

/// Everything a behavior may read or change during one call.
///
/// Built by the tick loop for a single agent; all borrows end when the
/// agent's scheduler tick returns.
pub struct BehaviorContext<'a> {
    /// Milliseconds from the monotonic clock.
    pub now:       u64,
    pub agent:     AgentId,
    pub world:     &'a mut dyn WorldView,
    pub hostiles:  &'a mut HostileIndex,
    pub entity:    &'a mut dyn EntityControl,
    pub inventory: &'a mut Inventory,
    pub rng:       &'a mut AgentRng,
    pub status:    &'a mut ActivityStatus,
}

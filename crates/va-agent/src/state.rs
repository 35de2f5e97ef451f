//! Agent lifecycle state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an agent is in its life.
///
/// ```text
/// Spawning ──first tick──▶ Active ⇄ Idle
///     │                      │       │
///     └──────────────────────┴───────┴──▶ Dead (entity died)
///                                    └──▶ Disabled (explicit)
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    #[default]
    Spawning,
    /// A behavior is in control.
    Active,
    /// Alive, but no behavior could execute at the last arbitration.
    Idle,
    Dead,
    Disabled,
}

impl AgentState {
    /// Whether the tick loop should drive this agent's scheduler.
    #[inline]
    pub fn is_tickable(self) -> bool {
        matches!(self, AgentState::Spawning | AgentState::Active | AgentState::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Spawning => "spawning",
            AgentState::Active   => "active",
            AgentState::Idle     => "idle",
            AgentState::Dead     => "dead",
            AgentState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

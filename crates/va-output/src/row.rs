//! Plain data row types written by output backends.

use va_agent::EntityControl;
use va_core::Tick;
use va_sim::Agent;

/// What one agent was doing at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStatusRow {
    pub tick:      u64,
    pub time_ms:   u64,
    pub agent_id:  u32,
    pub name:      String,
    /// Lifecycle state, e.g. `"active"`.
    pub state:     &'static str,
    /// Behavior in control; empty when none.
    pub behavior:  &'static str,
    pub action:    &'static str,
    /// Empty when the action has no target.
    pub target:    String,
    pub health:    f64,
    pub food:      u32,
    pub x:         f64,
    pub y:         f64,
    pub z:         f64,
    pub inventory: u32,
}

impl AgentStatusRow {
    pub fn from_agent(tick: Tick, time_ms: u64, agent: &Agent) -> Self {
        let pos = agent.body.position();
        AgentStatusRow {
            tick:      tick.0,
            time_ms,
            agent_id:  agent.id.0,
            name:      agent.name.clone(),
            state:     agent.state.as_str(),
            behavior:  agent.status.behavior.map_or("", |k| k.as_str()),
            action:    agent.status.action,
            target:    agent.status.target.clone().unwrap_or_default(),
            health:    agent.body.health(),
            food:      agent.body.food_level(),
            x:         pos.x,
            y:         pos.y,
            z:         pos.z,
            inventory: agent.inventory.total_count(),
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub time_ms:       u64,
    /// Agents whose scheduler ran this tick.
    pub ticked_agents: u64,
    /// Behavior switches across all agents this tick.
    pub switches:      u64,
}

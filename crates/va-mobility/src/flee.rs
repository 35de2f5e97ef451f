//! `FleeSession`: run from a hostile, or retreat home when badly hurt.

use tracing::debug;

use va_agent::{EntityControl, Inventory};
use va_core::{AgentId, FleeConfig, HostileId, Location};
use va_world::{HostileIndex, WorldView};

use crate::MobilityResult;
use crate::step::{StepResult, take_step};

/// Distance from home at which a threat-less retreat counts as done.
const HOME_RADIUS: f64 = 2.0;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FleeOutcome {
    Waiting,
    Moved(Location),
    Blocked,
    /// Beyond the safety radius of the threat, or home.  Finished.
    Safe,
    /// The threat died or stopped targeting the agent.  Finished.
    ThreatLost,
    /// Finished.
    TimedOut,
}

impl FleeOutcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, FleeOutcome::Safe | FleeOutcome::ThreatLost | FleeOutcome::TimedOut)
    }
}

#[derive(Clone, Debug)]
pub struct FleeSession {
    /// `None` means "retreat home".
    pub threat:           Option<HostileId>,
    pub home:             Location,
    pub started_at:       u64,
    pub last_step_at:     Option<u64>,
    pub steps:            u32,
    pub step_interval_ms: u64,
    pub timeout_ms:       u64,
    pub safety_radius:    f64,
    pub flee_distance:    f64,
}

impl FleeSession {
    pub fn new(threat: Option<HostileId>, home: Location, now: u64, config: &FleeConfig) -> Self {
        FleeSession {
            threat,
            home,
            started_at:       now,
            last_step_at:     None,
            steps:            0,
            step_interval_ms: config.step_interval_ms,
            timeout_ms:       config.timeout_ms,
            safety_radius:    config.safety_radius,
            flee_distance:    config.flee_distance,
        }
    }

    /// Do at most one step of fleeing.
    pub fn step(
        &mut self,
        now: u64,
        agent: AgentId,
        world: &mut dyn WorldView,
        entity: &mut dyn EntityControl,
        inventory: &mut Inventory,
        hostiles: &HostileIndex,
    ) -> MobilityResult<FleeOutcome> {
        if now.saturating_sub(self.started_at) >= self.timeout_ms {
            debug!(%agent, steps = self.steps, "flee timed out");
            return Ok(FleeOutcome::TimedOut);
        }

        let here = entity.position();
        let goal = match self.threat {
            Some(id) => {
                let Some(hostile) = hostiles.get(id).filter(|h| h.target == Some(agent)) else {
                    return Ok(FleeOutcome::ThreatLost);
                };
                if here.distance(&hostile.position) > self.safety_radius {
                    return Ok(FleeOutcome::Safe);
                }
                self.away_from(&here, &hostile.position)
            }
            None => {
                if here.distance(&self.home) <= HOME_RADIUS {
                    return Ok(FleeOutcome::Safe);
                }
                self.home
            }
        };

        if let Some(last) = self.last_step_at {
            if now.saturating_sub(last) < self.step_interval_ms {
                return Ok(FleeOutcome::Waiting);
            }
        }
        self.last_step_at = Some(now);

        match take_step(world, entity, inventory, &goal, 1.0, None)? {
            StepResult::Moved { to, .. } => {
                self.steps += 1;
                Ok(FleeOutcome::Moved(to))
            }
            StepResult::Blocked { .. } => Ok(FleeOutcome::Blocked),
        }
    }

    /// A point `flee_distance` blocks from `here`, directly away from `threat`.
    fn away_from(&self, here: &Location, threat: &Location) -> Location {
        let (dx, dz) = (here.x - threat.x, here.z - threat.z);
        let len = (dx * dx + dz * dz).sqrt();
        if len < 1e-6 {
            // Standing on the threat: any direction is away; use home's.
            let bearing = self.home.bearing_to(here);
            return here.step_along(bearing, self.flee_distance);
        }
        here.add(dx / len * self.flee_distance, 0.0, dz / len * self.flee_distance)
    }
}

//! `MovementSession`: walk toward a destination over many ticks.

use tracing::debug;

use va_agent::{EntityControl, Inventory};
use va_core::{BlockPos, Location, MovementConfig};
use va_world::WorldView;

use crate::MobilityResult;
use crate::step::{StepResult, take_step};

/// What one `MovementSession::step` call did.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StepOutcome {
    /// Step interval not yet elapsed; nothing happened.
    Waiting,
    Moved(Location),
    /// No safe step this time.  The session stays alive.
    Blocked,
    /// Within the arrival radius.  The session is finished.
    Arrived,
    /// Timeout reached before arrival.  The session is finished.
    TimedOut,
}

impl StepOutcome {
    /// `true` when the owner should drop the session.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, StepOutcome::Arrived | StepOutcome::TimedOut)
    }
}

#[derive(Clone, Debug)]
pub struct MovementSession {
    pub destination:      Location,
    pub started_at:       u64,
    pub last_step_at:     Option<u64>,
    pub steps:            u32,
    /// Consecutive `Blocked` results; reset by any successful move.
    pub blocked_streak:   u32,
    pub step_interval_ms: u64,
    pub timeout_ms:       u64,
    pub arrival_radius:   f64,
    pub step_length:      f64,
    /// Block that obstacle clearing must leave alone.
    pub protect:          Option<BlockPos>,
}

impl MovementSession {
    pub fn new(destination: Location, now: u64, config: &MovementConfig) -> Self {
        MovementSession {
            destination,
            started_at:       now,
            last_step_at:     None,
            steps:            0,
            blocked_streak:   0,
            step_interval_ms: config.step_interval_ms,
            timeout_ms:       config.timeout_ms,
            arrival_radius:   config.arrival_radius,
            step_length:      config.step_length,
            protect:          None,
        }
    }

    /// Never break `pos` while clearing obstacles.
    pub fn protecting(mut self, pos: BlockPos) -> Self {
        self.protect = Some(pos);
        self
    }

    #[inline]
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.started_at)
    }

    #[inline]
    pub fn is_timed_out(&self, now: u64) -> bool {
        self.elapsed(now) >= self.timeout_ms
    }

    /// Do at most one step of work.
    pub fn step(
        &mut self,
        now: u64,
        world: &mut dyn WorldView,
        entity: &mut dyn EntityControl,
        inventory: &mut Inventory,
    ) -> MobilityResult<StepOutcome> {
        if self.is_timed_out(now) {
            debug!(dest = %self.destination, steps = self.steps, "movement timed out");
            return Ok(StepOutcome::TimedOut);
        }
        if self.has_arrived(entity) {
            return Ok(StepOutcome::Arrived);
        }
        if let Some(last) = self.last_step_at {
            if now.saturating_sub(last) < self.step_interval_ms {
                return Ok(StepOutcome::Waiting);
            }
        }
        self.last_step_at = Some(now);

        match take_step(world, entity, inventory, &self.destination, self.step_length, self.protect)? {
            StepResult::Moved { to, .. } => {
                self.steps += 1;
                self.blocked_streak = 0;
                if self.has_arrived(entity) {
                    Ok(StepOutcome::Arrived)
                } else {
                    Ok(StepOutcome::Moved(to))
                }
            }
            StepResult::Blocked { .. } => {
                self.blocked_streak += 1;
                Ok(StepOutcome::Blocked)
            }
        }
    }

    #[inline]
    fn has_arrived(&self, entity: &dyn EntityControl) -> bool {
        entity.position().distance(&self.destination) <= self.arrival_radius
    }
}

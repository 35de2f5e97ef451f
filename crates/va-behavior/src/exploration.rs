//! Exploration: wander between random surface waypoints around home.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use va_core::{ExplorationConfig, Location, MovementConfig};
use va_mobility::{MovementSession, StepOutcome};

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult};

/// Draws per waypoint before an already-visited column is accepted.
const WAYPOINT_ATTEMPTS: usize = 8;

/// Consecutive blocked steps before the waypoint is replaced.
const MAX_BLOCKED_STEPS: u32 = 5;

#[derive(Clone, Debug)]
pub enum ExploreState {
    Ready,
    Resting { until: u64 },
    Traveling { waypoint: Location, session: MovementSession },
}

pub struct ExplorationBehavior {
    config:    ExplorationConfig,
    movement:  MovementConfig,
    state:     ExploreState,
    visited:   FxHashSet<(i32, i32)>,
    waypoints: u32,
}

impl ExplorationBehavior {
    pub fn new(config: ExplorationConfig, movement: MovementConfig) -> Self {
        ExplorationBehavior {
            config,
            movement,
            state:     ExploreState::Ready,
            visited:   FxHashSet::default(),
            waypoints: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> &ExploreState {
        &self.state
    }

    /// 16×16 columns the agent has stood in.
    #[inline]
    pub fn visited_columns(&self) -> usize {
        self.visited.len()
    }

    /// Waypoints reached so far.
    #[inline]
    pub fn waypoints_reached(&self) -> u32 {
        self.waypoints
    }

    fn rest(&mut self, now: u64) {
        self.state = ExploreState::Resting { until: now + self.config.interval_seconds * 1000 };
    }

    /// A surface location within `radius` of home, preferring columns not
    /// yet visited.
    fn pick_waypoint(&self, ctx: &mut BehaviorContext<'_>) -> Location {
        let home = ctx.entity.home().block();
        let r = self.config.radius.max(0);
        let mut candidate = home;
        for _ in 0..WAYPOINT_ATTEMPTS {
            let x = home.x + ctx.rng.gen_range(-r..=r);
            let z = home.z + ctx.rng.gen_range(-r..=r);
            candidate = va_core::BlockPos::new(x, ctx.world.highest_block_y(x, z) + 1, z);
            if !self.visited.contains(&candidate.column()) {
                break;
            }
        }
        candidate.center().with_y(candidate.y as f64)
    }

    fn travel(
        &mut self,
        ctx: &mut BehaviorContext<'_>,
        waypoint: Location,
        mut session: MovementSession,
    ) -> BehaviorResult<()> {
        let outcome =
            session.step(ctx.now, &mut *ctx.world, &mut *ctx.entity, &mut *ctx.inventory)?;
        self.visited.insert(ctx.entity.position().block().column());
        match outcome {
            StepOutcome::Arrived => {
                self.waypoints += 1;
                info!(agent = %ctx.agent, %waypoint, columns = self.visited.len(), "waypoint reached");
                self.rest(ctx.now);
                ctx.status.set_action("resting");
                Ok(())
            }
            StepOutcome::TimedOut => {
                warn!(agent = %ctx.agent, %waypoint, "waypoint timed out");
                self.rest(ctx.now);
                Err(BehaviorError::SessionTimeout("movement"))
            }
            StepOutcome::Blocked if session.blocked_streak >= MAX_BLOCKED_STEPS => {
                debug!(agent = %ctx.agent, %waypoint, "waypoint blocked, choosing another");
                self.state = ExploreState::Ready;
                Ok(())
            }
            _ => {
                self.state = ExploreState::Traveling { waypoint, session };
                Ok(())
            }
        }
    }
}

impl Behavior for ExplorationBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Exploration
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    fn can_execute(&mut self, ctx: &BehaviorContext<'_>) -> BehaviorResult<bool> {
        if !self.config.enabled || ctx.entity.is_dead() {
            return Ok(false);
        }
        Ok(match self.state {
            ExploreState::Resting { until } => ctx.now >= until,
            _ => true,
        })
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        match std::mem::replace(&mut self.state, ExploreState::Ready) {
            ExploreState::Traveling { waypoint, session } => {
                ctx.status.set("exploring", Some(waypoint.block().to_string()));
                self.travel(ctx, waypoint, session)
            }
            ExploreState::Resting { until } if ctx.now < until => {
                self.state = ExploreState::Resting { until };
                Ok(())
            }
            ExploreState::Ready | ExploreState::Resting { .. } => {
                let waypoint = self.pick_waypoint(ctx);
                debug!(agent = %ctx.agent, %waypoint, "new waypoint");
                ctx.status.set("exploring", Some(waypoint.block().to_string()));
                let session = MovementSession::new(waypoint, ctx.now, &self.movement);
                self.travel(ctx, waypoint, session)
            }
        }
    }

    fn cancel_sessions(&mut self) {
        if let ExploreState::Traveling { .. } = self.state {
            self.state = ExploreState::Ready;
        }
    }

    fn has_session(&self) -> bool {
        matches!(self.state, ExploreState::Traveling { .. })
    }
}

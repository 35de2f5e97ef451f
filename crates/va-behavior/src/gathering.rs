//! Resource gathering: seek a block, walk to it, mine it.
//!
//! ```text
//! Idle ──search──▶ Seeking ──found──▶ Approaching ──in reach + clear line──▶ Mining
//!   ▲                                   ▲     │                               │
//!   │                                   └─────┘ (obstruction / out of reach) ─┘
//!   └──────────────── completed / target invalid / timed out ─────────────────┘
//! ```
//!
//! The state enum carries the session, so a gatherer can never hold a
//! movement and a mining session at once.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use va_core::{BlockPos, GatheringConfig, Material, MovementConfig};
use va_mobility::{
    MiningOutcome, MiningSession, MiningTable, MovementSession, StepOutcome, Target, VerticalMode,
    first_obstruction,
};
use va_world::WorldView;

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult};

/// Abandoned targets remembered before the list is reset.
const MAX_UNREACHABLE: usize = 64;

#[derive(Clone, Debug)]
pub enum GatherState {
    Idle,
    /// Search on the next update, without waiting for the search interval.
    Seeking,
    Approaching { target: Target, session: Option<MovementSession> },
    Mining { session: MiningSession },
}

pub struct GatheringBehavior {
    config:      GatheringConfig,
    movement:    MovementConfig,
    table:       MiningTable,
    state:       GatherState,
    /// Result of the last search and when it ran.
    last_search: Option<(u64, Option<Target>)>,
    unreachable: FxHashSet<BlockPos>,
    mined:       u32,
}

impl GatheringBehavior {
    pub fn new(config: GatheringConfig, movement: MovementConfig, table: MiningTable) -> Self {
        GatheringBehavior {
            config,
            movement,
            table,
            state:       GatherState::Idle,
            last_search: None,
            unreachable: FxHashSet::default(),
            mined:       0,
        }
    }

    #[inline]
    pub fn state(&self) -> &GatherState {
        &self.state
    }

    /// Blocks mined to completion so far.
    #[inline]
    pub fn mined(&self) -> u32 {
        self.mined
    }

    /// Nearest acceptable block around the agent.  Ties on distance go to the
    /// material listed first in `targets`, then to the lower position.
    pub fn search(&self, world: &dyn WorldView, center: &va_core::Location) -> Option<Target> {
        let origin = center.block();
        let r = self.config.search_radius;
        let mut best: Option<(f64, usize, BlockPos, Material)> = None;
        for dy in -r.min(self.config.height_tolerance)..=r.min(self.config.height_tolerance) {
            for dx in -r..=r {
                for dz in -r..=r {
                    if dx * dx + dy * dy + dz * dz > r * r {
                        continue;
                    }
                    let pos = origin.offset(dx, dy, dz);
                    let material = world.block_at(pos);
                    let Some(rank) = self.config.targets.iter().position(|&m| m == material) else {
                        continue;
                    };
                    if !material.is_minable() || self.unreachable.contains(&pos) {
                        continue;
                    }
                    let dist = center.distance_sq(&pos.corner());
                    let better = match best {
                        None => true,
                        Some((bd, br, bp, _)) => (dist, rank, pos) < (bd, br, bp),
                    };
                    if better {
                        best = Some((dist, rank, pos, material));
                    }
                }
            }
        }
        best.map(|(_, _, pos, material)| Target::new(pos, material))
    }

    fn search_due(&self, now: u64) -> bool {
        match self.last_search {
            None => true,
            Some((at, _)) => now.saturating_sub(at) >= self.config.search_interval_ms,
        }
    }

    fn abandon(&mut self, target: Target, reason: &str) {
        debug!(pos = %target.pos, material = %target.material, reason, "target abandoned");
        if self.unreachable.len() >= MAX_UNREACHABLE {
            self.unreachable.clear();
        }
        self.unreachable.insert(target.pos);
        self.state = GatherState::Idle;
        self.last_search = None;
    }

    // ── Per-state steps ──────────────────────────────────────────────────

    fn seek(&mut self, ctx: &mut BehaviorContext<'_>, forced: bool) -> BehaviorResult<()> {
        let cached = match self.last_search {
            Some((_, Some(t))) if t.is_valid(&*ctx.world) => Some(t),
            _ => None,
        };
        let target = match cached {
            Some(t) => Some(t),
            None if forced || self.search_due(ctx.now) => {
                let found = self.search(&*ctx.world, &ctx.entity.position());
                self.last_search = Some((ctx.now, found));
                found
            }
            None => None,
        };
        match target {
            None => {
                self.state = GatherState::Idle;
                ctx.status.set_action("searching");
                Ok(())
            }
            Some(target) => {
                debug!(agent = %ctx.agent, pos = %target.pos, material = %target.material, "target selected");
                self.last_search = None;
                self.approach(ctx, target, None)
            }
        }
    }

    fn approach(
        &mut self,
        ctx: &mut BehaviorContext<'_>,
        target: Target,
        session: Option<MovementSession>,
    ) -> BehaviorResult<()> {
        if !target.is_valid(&*ctx.world) {
            self.state = GatherState::Seeking;
            return Err(BehaviorError::TargetInvalid(target.pos));
        }
        let here = ctx.entity.position();
        let in_reach = here.distance(&target.pos.corner()) <= self.config.reach;

        if in_reach {
            match first_obstruction(&*ctx.world, &here, target.pos) {
                None => {
                    let mining = MiningSession::new(target, ctx.now, &self.table);
                    ctx.status.set("mining", Some(format!("{} {}", target.material, target.pos)));
                    self.state = GatherState::Mining { session: mining };
                    return Ok(());
                }
                Some(block) => {
                    // Clear the line of sight one block per update.
                    let material = ctx.world.block_at(block);
                    if !VerticalMode::Underground.can_mine(material) {
                        self.abandon(target, "obstructed");
                        return Ok(());
                    }
                    ctx.world.set_block(block, Material::Air)?;
                    ctx.inventory.add(material.drop(), 1);
                    ctx.status.set("clearing", Some(format!("{material} {block}")));
                    self.state = GatherState::Approaching { target, session: None };
                    return Ok(());
                }
            }
        }

        let mut session = session.unwrap_or_else(|| {
            MovementSession::new(target.pos.corner(), ctx.now, &self.movement).protecting(target.pos)
        });
        ctx.status.set("approaching", Some(format!("{} {}", target.material, target.pos)));
        match session.step(ctx.now, &mut *ctx.world, &mut *ctx.entity, &mut *ctx.inventory)? {
            StepOutcome::TimedOut => {
                warn!(agent = %ctx.agent, pos = %target.pos, "approach timed out");
                self.abandon(target, "timeout");
                Err(BehaviorError::SessionTimeout("movement"))
            }
            StepOutcome::Blocked if session.blocked_streak >= self.config.max_blocked_steps => {
                self.abandon(target, "unreachable");
                Ok(())
            }
            StepOutcome::Arrived => {
                self.state = GatherState::Approaching { target, session: None };
                Ok(())
            }
            _ => {
                self.state = GatherState::Approaching { target, session: Some(session) };
                Ok(())
            }
        }
    }

    fn mine(&mut self, ctx: &mut BehaviorContext<'_>, session: MiningSession) -> BehaviorResult<()> {
        let target = session.target;
        let here = ctx.entity.position();
        if target.is_valid(&*ctx.world)
            && (here.distance(&target.pos.corner()) > self.config.reach
                || first_obstruction(&*ctx.world, &here, target.pos).is_some())
        {
            return self.approach(ctx, target, None);
        }
        match session.step(ctx.now, &mut *ctx.world, &mut *ctx.inventory)? {
            MiningOutcome::InProgress { progress } => {
                ctx.status.set(
                    "mining",
                    Some(format!("{} {} {:.0}%", target.material, target.pos, progress * 100.0)),
                );
                self.state = GatherState::Mining { session };
                Ok(())
            }
            MiningOutcome::Completed { drop } => {
                self.mined += 1;
                info!(agent = %ctx.agent, material = %target.material, %drop, pos = %target.pos, "gathered");
                self.state = GatherState::Idle;
                self.last_search = None;
                ctx.status.set_action("searching");
                Ok(())
            }
            MiningOutcome::TargetInvalid => {
                self.state = GatherState::Seeking;
                Err(BehaviorError::TargetInvalid(target.pos))
            }
        }
    }
}

impl Behavior for GatheringBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::ResourceGathering
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    /// Alive, not full, and either busy with a target or aware of one.
    fn can_execute(&mut self, ctx: &BehaviorContext<'_>) -> BehaviorResult<bool> {
        if !self.config.enabled
            || ctx.entity.is_dead()
            || ctx.inventory.is_full(self.config.inventory_full)
        {
            return Ok(false);
        }
        if !matches!(self.state, GatherState::Idle) {
            return Ok(true);
        }
        if self.search_due(ctx.now) {
            let found = self.search(&*ctx.world, &ctx.entity.position());
            self.last_search = Some((ctx.now, found));
        }
        Ok(matches!(self.last_search, Some((_, Some(_)))))
    }

    fn on_start(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        ctx.status.set_action("searching");
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        match std::mem::replace(&mut self.state, GatherState::Idle) {
            GatherState::Idle => self.seek(ctx, false),
            GatherState::Seeking => self.seek(ctx, true),
            GatherState::Approaching { target, session } => self.approach(ctx, target, session),
            GatherState::Mining { session } => self.mine(ctx, session),
        }
    }

    fn cancel_sessions(&mut self) {
        self.state = match std::mem::replace(&mut self.state, GatherState::Idle) {
            GatherState::Approaching { target, .. } => GatherState::Approaching { target, session: None },
            GatherState::Mining { .. } => GatherState::Seeking,
            other => other,
        };
    }

    fn has_session(&self) -> bool {
        matches!(
            self.state,
            GatherState::Approaching { session: Some(_), .. } | GatherState::Mining { .. }
        )
    }
}

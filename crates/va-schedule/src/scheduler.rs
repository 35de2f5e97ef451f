//! `BehaviorScheduler`: pick and run at most one behavior per agent.
//!
//! # Tick algorithm
//!
//! ```text
//! if now - last_arbitration < interval:
//!     update(active)
//! else:
//!     last_arbitration = now
//!     executable = [slot for slot in slots if slot.can_execute(ctx)]
//!     winner     = highest priority in executable, earliest registered on ties
//!     if winner != active: stop(active); start(winner)
//!     update(active)
//! ```
//!
//! The first tick always arbitrates.  Behavior errors never leave the
//! scheduler: each is logged and the behavior counts as having contributed
//! nothing for that call.

use std::fmt;

use tracing::{debug, info, warn};

use va_behavior::{
    Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult, BehaviorSlot,
};

use crate::{ScheduleError, ScheduleResult};

/// What one `tick` did.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickOutcome {
    /// Arbitration ran this tick.
    pub arbitrated: bool,
    /// The active behavior changed this tick.
    pub switched:   bool,
    /// The active behavior's `on_update` ran.
    pub updated:    bool,
    /// Active behavior after the tick.
    pub active:     Option<BehaviorKind>,
}

/// Snapshot for status displays.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SchedulerStats {
    pub total:        usize,
    pub active_count: usize,
    pub current:      Option<BehaviorKind>,
}

impl fmt::Display for SchedulerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(kind) => write!(f, "{}/{} active ({kind})", self.active_count, self.total),
            None => write!(f, "{}/{} active", self.active_count, self.total),
        }
    }
}

pub struct BehaviorScheduler {
    slots:            Vec<BehaviorSlot>,
    active:           Option<usize>,
    last_arbitration: Option<u64>,
    interval_ms:      u64,
    initialized:      bool,
}

impl BehaviorScheduler {
    pub fn new(interval_ms: u64) -> Self {
        BehaviorScheduler {
            slots:            Vec::new(),
            active:           None,
            last_arbitration: None,
            interval_ms,
            initialized:      false,
        }
    }

    /// Append a behavior; registration order breaks priority ties.
    pub fn register(&mut self, behavior: Box<dyn Behavior>) -> ScheduleResult<()> {
        let kind = behavior.kind();
        if self.slots.iter().any(|s| s.kind() == kind) {
            return Err(ScheduleError::Duplicate(kind));
        }
        let mut slot = BehaviorSlot::new(behavior);
        if self.initialized {
            slot.initialize()?;
        }
        debug!(behavior = %kind, priority = slot.priority(), "registered");
        self.slots.push(slot);
        Ok(())
    }

    /// Initialize every registered behavior.  A behavior that fails stays
    /// uninitialized and is skipped by `start`.
    pub fn initialize(&mut self) {
        for slot in &mut self.slots {
            if let Err(e) = slot.initialize() {
                warn!(behavior = %slot.kind(), error = %e, "initialize failed");
            }
        }
        self.initialized = true;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> impl Iterator<Item = &BehaviorSlot> {
        self.slots.iter()
    }

    pub fn slot(&self, kind: BehaviorKind) -> Option<&BehaviorSlot> {
        self.slots.iter().find(|s| s.kind() == kind)
    }

    #[inline]
    pub fn active_kind(&self) -> Option<BehaviorKind> {
        self.active.map(|i| self.slots[i].kind())
    }

    /// Slots currently in the `Active` lifecycle state.  Never more than one.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    pub fn statistics(&self) -> SchedulerStats {
        SchedulerStats {
            total:        self.slots.len(),
            active_count: self.active_count(),
            current:      self.active_kind(),
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────────

    pub fn tick(&mut self, ctx: &mut BehaviorContext<'_>) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let due = self
            .last_arbitration
            .is_none_or(|t| ctx.now.saturating_sub(t) >= self.interval_ms);

        if due {
            self.last_arbitration = Some(ctx.now);
            outcome.arbitrated = true;
            match self.arbitrate(ctx) {
                None => {
                    if self.active.is_some() {
                        self.stop_active(ctx);
                        outcome.switched = true;
                    }
                }
                Some(winner) if Some(winner) != self.active => {
                    if let Err(e) = self.switch_to(winner, ctx) {
                        let kind = self.slots[winner].kind();
                        warn!(agent = %ctx.agent, behavior = %kind, error = %e, "start failed");
                    }
                    outcome.switched = true;
                }
                Some(_) => {}
            }
        }

        if let Some(i) = self.active {
            let kind = self.slots[i].kind();
            match self.slots[i].update(ctx) {
                Ok(ran) => outcome.updated = ran,
                Err(e) => {
                    outcome.updated = true;
                    log_update_error(ctx, kind, &e);
                }
            }
        }
        outcome.active = self.active_kind();
        outcome
    }

    /// Index of the executable slot with the highest priority, earliest
    /// registered on ties.
    fn arbitrate(&mut self, ctx: &BehaviorContext<'_>) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let executable = match slot.can_execute(ctx) {
                Ok(b) => b,
                Err(e) => {
                    warn!(agent = %ctx.agent, behavior = %slot.kind(), error = %e, "can_execute failed");
                    false
                }
            };
            if !executable {
                continue;
            }
            let priority = slot.priority();
            if best.is_none_or(|(_, p)| priority > p) {
                best = Some((i, priority));
            }
        }
        let winner = best.map(|(i, _)| i);
        debug!(
            agent = %ctx.agent,
            winner = ?winner.map(|i| self.slots[i].kind()),
            "arbitrated"
        );
        winner
    }

    /// Stop the active behavior, if any, and clear the status line.
    pub fn stop_active(&mut self, ctx: &mut BehaviorContext<'_>) {
        if let Some(i) = self.active.take() {
            let slot = &mut self.slots[i];
            if let Err(e) = slot.stop() {
                warn!(agent = %ctx.agent, behavior = %slot.kind(), error = %e, "stop failed");
            }
            ctx.status.clear();
        }
    }

    /// Stop the active behavior, then start `winner`.  A failed start leaves
    /// no behavior active.
    fn switch_to(&mut self, winner: usize, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        let from = self.active_kind();
        self.stop_active(ctx);
        let to = self.slots[winner].kind();
        self.slots[winner].start(ctx)?;
        self.active = Some(winner);
        ctx.status.behavior = Some(to);
        info!(agent = %ctx.agent, from = ?from, to = %to, "behavior switched");
        Ok(())
    }

    /// Switch to `kind` immediately, bypassing arbitration.
    pub fn force(&mut self, kind: BehaviorKind, ctx: &mut BehaviorContext<'_>) -> ScheduleResult<()> {
        let index = self
            .slots
            .iter()
            .position(|s| s.kind() == kind)
            .ok_or(ScheduleError::UnknownBehavior(kind))?;
        if self.active == Some(index) {
            return Ok(());
        }
        self.switch_to(index, ctx)?;
        Ok(())
    }

    /// Shut every behavior down.  The scheduler is inert afterwards.
    pub fn shutdown(&mut self) {
        self.active = None;
        for slot in &mut self.slots {
            if let Err(e) = slot.shutdown() {
                warn!(behavior = %slot.kind(), error = %e, "shutdown failed");
            }
        }
    }
}

fn log_update_error(ctx: &BehaviorContext<'_>, kind: BehaviorKind, e: &BehaviorError) {
    match e {
        BehaviorError::TargetInvalid(_) | BehaviorError::ResourceExhausted(_) => {
            debug!(agent = %ctx.agent, behavior = %kind, error = %e, "update");
        }
        _ => warn!(agent = %ctx.agent, behavior = %kind, error = %e, "update failed"),
    }
}

impl fmt::Debug for BehaviorScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorScheduler")
            .field("slots", &self.slots)
            .field("active", &self.active_kind())
            .field("last_arbitration", &self.last_arbitration)
            .field("interval_ms", &self.interval_ms)
            .finish()
    }
}

//! `BehaviorSlot`: the shared lifecycle state machine around a behavior.
//!
//! ```text
//! Uninitialized ──initialize──▶ Initialized ──start──▶ Active ⇄ Inactive
//!        any ──shutdown──▶ ShutDown (terminal)
//! ```
//!
//! Misuse is reported as a `BehaviorError` value, never a panic.  Every
//! transition leaves the slot in the safest prior state on failure.

use std::fmt;

use tracing::debug;

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Active,
    Inactive,
    ShutDown,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub struct BehaviorSlot {
    behavior: Box<dyn Behavior>,
    state:    Lifecycle,
}

impl BehaviorSlot {
    pub fn new(behavior: Box<dyn Behavior>) -> Self {
        BehaviorSlot { behavior, state: Lifecycle::Uninitialized }
    }

    #[inline]
    pub fn kind(&self) -> BehaviorKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.behavior.priority()
    }

    #[inline]
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == Lifecycle::Active
    }

    #[inline]
    pub fn has_session(&self) -> bool {
        self.behavior.has_session()
    }

    pub fn behavior(&self) -> &dyn Behavior {
        self.behavior.as_ref()
    }

    fn lifecycle_error(&self, reason: impl Into<String>) -> BehaviorError {
        BehaviorError::Lifecycle { kind: self.kind(), reason: reason.into() }
    }

    /// Idempotent.  Fails only after shutdown.
    pub fn initialize(&mut self) -> BehaviorResult<()> {
        match self.state {
            Lifecycle::Uninitialized => {
                self.behavior.on_initialize()?;
                self.state = Lifecycle::Initialized;
                debug!(behavior = %self.kind(), "initialized");
                Ok(())
            }
            Lifecycle::ShutDown => Err(self.lifecycle_error("initialize after shutdown")),
            _ => Ok(()),
        }
    }

    pub fn can_execute(&mut self, ctx: &BehaviorContext<'_>) -> BehaviorResult<bool> {
        if self.state == Lifecycle::ShutDown {
            return Ok(false);
        }
        self.behavior.can_execute(ctx)
    }

    /// Initialized/Inactive → Active.  A failing `on_start` reverts the state
    /// and drops any session it created.
    pub fn start(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        let prior = self.state;
        match prior {
            Lifecycle::Uninitialized => Err(BehaviorError::NotInitialized(self.kind())),
            Lifecycle::ShutDown => Err(self.lifecycle_error("start after shutdown")),
            Lifecycle::Active => Ok(()),
            Lifecycle::Initialized | Lifecycle::Inactive => {
                self.state = Lifecycle::Active;
                if let Err(e) = self.behavior.on_start(ctx) {
                    self.behavior.cancel_sessions();
                    self.state = prior;
                    return Err(e);
                }
                debug!(agent = %ctx.agent, behavior = %self.kind(), "started");
                Ok(())
            }
        }
    }

    /// Run one unit of work.  Returns `false` without calling the behavior
    /// unless it is active and still executable.
    pub fn update(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<bool> {
        if self.state != Lifecycle::Active || !self.behavior.can_execute(ctx)? {
            return Ok(false);
        }
        self.behavior.on_update(ctx)?;
        Ok(true)
    }

    /// Active → Inactive, idempotent.  Sessions are dropped even when
    /// `on_stop` fails.
    pub fn stop(&mut self) -> BehaviorResult<()> {
        if self.state != Lifecycle::Active {
            return Ok(());
        }
        self.behavior.cancel_sessions();
        self.state = Lifecycle::Inactive;
        debug!(behavior = %self.kind(), "stopped");
        self.behavior.on_stop()
    }

    /// Any → ShutDown, stopping first.
    pub fn shutdown(&mut self) -> BehaviorResult<()> {
        if self.state == Lifecycle::ShutDown {
            return Ok(());
        }
        let stopped = self.stop();
        self.behavior.cancel_sessions();
        let result = self.behavior.on_shutdown();
        self.state = Lifecycle::ShutDown;
        stopped.and(result)
    }
}

impl fmt::Debug for BehaviorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorSlot")
            .field("kind", &self.kind())
            .field("priority", &self.priority())
            .field("state", &self.state)
            .finish()
    }
}

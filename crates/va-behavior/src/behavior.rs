//! The `Behavior` trait and `BehaviorKind`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use va_core::CoreError;

use crate::{BehaviorContext, BehaviorResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    Survival,
    ResourceGathering,
    Exploration,
    Building,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 4] = [
        BehaviorKind::Survival,
        BehaviorKind::ResourceGathering,
        BehaviorKind::Exploration,
        BehaviorKind::Building,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::Survival          => "survival",
            BehaviorKind::ResourceGathering => "resource_gathering",
            BehaviorKind::Exploration       => "exploration",
            BehaviorKind::Building          => "building",
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BehaviorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BehaviorKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| CoreError::Parse(format!("unknown behavior '{s}'")))
    }
}

/// A policy competing for control of one agent.
///
/// Only [`can_execute`][Self::can_execute], [`on_update`][Self::on_update]
/// and [`cancel_sessions`][Self::cancel_sessions] are required; the
/// lifecycle hooks default to no-ops.  Lifecycle bookkeeping (initialized,
/// active, shut down) is not the behavior's concern: it lives in
/// [`BehaviorSlot`][crate::BehaviorSlot], which is what the scheduler holds.
pub trait Behavior {
    fn kind(&self) -> BehaviorKind;

    /// Static priority; higher wins arbitration.
    fn priority(&self) -> i32;

    /// Whether this behavior wants control given the current state.  May
    /// refresh internal caches (threat scans, target searches).
    fn can_execute(&mut self, ctx: &BehaviorContext<'_>) -> BehaviorResult<bool>;

    fn on_initialize(&mut self) -> BehaviorResult<()> {
        Ok(())
    }

    fn on_start(&mut self, _ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        Ok(())
    }

    /// One bounded unit of work.  Called only while active and executable.
    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()>;

    fn on_stop(&mut self) -> BehaviorResult<()> {
        Ok(())
    }

    fn on_shutdown(&mut self) -> BehaviorResult<()> {
        Ok(())
    }

    /// Drop every in-flight movement, flee or mining session.
    fn cancel_sessions(&mut self);

    /// Whether any session is in flight.
    fn has_session(&self) -> bool;
}

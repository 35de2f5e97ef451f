//! Behavior error taxonomy.
//!
//! None of these escape the scheduler: each is caught where the behavior
//! was called, logged, and the behavior contributes nothing for that tick.

use thiserror::Error;

use va_core::{BlockPos, CoreError, Material};
use va_mobility::MobilityError;
use va_world::WorldError;

use crate::BehaviorKind;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// The target block changed or vanished; recovered by reselection.
    #[error("target at {0} is no longer valid")]
    TargetInvalid(BlockPos),

    #[error("{0} behavior started before initialization")]
    NotInitialized(BehaviorKind),

    #[error("{kind} lifecycle error: {reason}")]
    Lifecycle { kind: BehaviorKind, reason: String },

    #[error("{0} session timed out")]
    SessionTimeout(&'static str),

    #[error("out of {0}")]
    ResourceExhausted(Material),

    #[error("world inconsistency: {0}")]
    World(#[from] WorldError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

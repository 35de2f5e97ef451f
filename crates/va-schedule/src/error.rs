use thiserror::Error;

use va_behavior::{BehaviorError, BehaviorKind};
use va_core::CoreError;
use va_mobility::MobilityError;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("a {0} behavior is already registered")]
    Duplicate(BehaviorKind),

    #[error("no {0} behavior is registered")]
    UnknownBehavior(BehaviorKind),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

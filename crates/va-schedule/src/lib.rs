//! `va-schedule`: per-agent arbitration between competing behaviors.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`scheduler`] | `BehaviorScheduler`, `TickOutcome`, `SchedulerStats`       |
//! | [`factory`]   | `default_behaviors`, `BehaviorScheduler::from_config`      |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! Each agent owns one scheduler.  Schedulers never share state, so agents
//! can be ticked in any order.

pub mod error;
pub mod factory;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use factory::default_behaviors;
pub use scheduler::{BehaviorScheduler, SchedulerStats, TickOutcome};

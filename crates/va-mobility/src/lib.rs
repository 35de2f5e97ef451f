//! `va-mobility`: multi-tick physical actions.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`safety`]   | `VerticalMode`, the three safety predicates, "can mine" checks   |
//! | [`step`]     | `take_step`: one bounded move with obstacle clearing + retries  |
//! | [`movement`] | `MovementSession`, `StepOutcome`                                 |
//! | [`flee`]     | `FleeSession`, `FleeOutcome`                                     |
//! | [`mining`]   | `Target`, `MiningTable`, `MiningSession`, `MiningOutcome`        |
//! | [`sight`]    | `line_of_sight` (0.5-block sampling)                             |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                             |
//!
//! # Session model
//!
//! A session is plain data owned by the behavior that created it.  The
//! behavior calls `step(now, ..)` from its `on_update`; the session does at
//! most one unit of work (one block of movement, or one completion check)
//! and reports what happened.  Pacing is "skip unless N ms elapsed since
//! the last step", and the timeout is checked on every call, before
//! anything else.  Dropping the session is cancellation.

pub mod error;
pub mod flee;
pub mod mining;
pub mod movement;
pub mod safety;
pub mod sight;
pub mod step;

#[cfg(test)]
mod tests;

pub use error::{MobilityError, MobilityResult};
pub use flee::{FleeOutcome, FleeSession};
pub use mining::{MiningOutcome, MiningSession, MiningTable, Target};
pub use movement::{MovementSession, StepOutcome};
pub use safety::VerticalMode;
pub use sight::{first_obstruction, line_of_sight};
pub use step::{StepResult, take_step};

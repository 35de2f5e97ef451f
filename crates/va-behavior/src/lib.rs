//! `va-behavior`: the behavior contract and the four stock behaviors.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`behavior`]    | `Behavior` trait, `BehaviorKind`                              |
//! | [`slot`]        | `BehaviorSlot` lifecycle wrapper, `Lifecycle`                 |
//! | [`context`]     | `BehaviorContext<'a>`, `ActivityStatus`                       |
//! | [`survival`]    | `SurvivalBehavior`: flee, fight, heal, feed, cure            |
//! | [`gathering`]   | `GatheringBehavior`: seek, approach, mine                    |
//! | [`exploration`] | `ExplorationBehavior`: random surface waypoints              |
//! | [`building`]    | `BuildingBehavior`, `BuildProject`, `Construction`            |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Behaviors never block.  Each `on_update` does one bounded unit of work
//! and keeps whatever it needs to resume (a movement, flee or mining
//! session) in its own state.  Stopping a behavior is cancelling those
//! sessions; there is no thread or timer to tear down.
//!
//! Every behavior owns exactly one state enum whose variants carry their
//! session, so "at most one session per behavior" holds by construction.

pub mod behavior;
pub mod building;
pub mod context;
pub mod error;
pub mod exploration;
pub mod gathering;
pub mod slot;
pub mod survival;


pub use behavior::{Behavior, BehaviorKind};
pub use building::{BuildProject, BuildingBehavior, Construction};
pub use context::{ActivityStatus, BehaviorContext};
pub use error::{BehaviorError, BehaviorResult};
pub use exploration::{ExploreState, ExplorationBehavior};
pub use gathering::{GatherState, GatheringBehavior};
pub use slot::{BehaviorSlot, Lifecycle};
pub use survival::{MovePurpose, SurvivalActivity, SurvivalBehavior};

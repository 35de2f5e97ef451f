//! `va-sim`: agent arena and tick loop for the voxel_agents engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`agent`]    | `Agent`: body, inventory, scheduler, lifecycle       |
//! | [`manager`]  | `AgentManager` arena, `AgentStats`                    |
//! | [`sim`]      | `Sim<W>` tick loop                                    |
//! | [`builder`]  | `SimBuilder<W>`                                       |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                   |
//! | [`error`]    | `SimError`, `SimResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use va_core::{Config, Location};
//! use va_sim::{NoopObserver, SimBuilder};
//! use va_world::VoxelWorld;
//!
//! let mut sim = SimBuilder::new(Config::default(), VoxelWorld::flat(63))
//!     .agent("alice", Location::new(0.5, 64.0, 0.5))
//!     .build()?;
//! sim.run_ticks(1_200, &mut NoopObserver);
//! println!("{}", sim.agents.stats());
//! ```

pub mod agent;
pub mod builder;
pub mod error;
pub mod manager;
pub mod observer;
pub mod sim;


pub use agent::Agent;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use manager::{AgentManager, AgentStats};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;

// Observers receive scheduler outcomes.
pub use va_schedule::TickOutcome;

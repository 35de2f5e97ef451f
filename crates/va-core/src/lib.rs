//! `va-core`: foundational types for the `voxel_agents` engine.
//!
//! This crate is a dependency of every other `va-*` crate.  It has no `va-*`
//! dependencies and few external ones (`rand`, `thiserror`, `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `HostileId`                                  |
//! | [`geo`]         | `BlockPos`, `Location`, bearing / yaw helpers           |
//! | [`time`]        | `Tick`, `Clock`, `SimClock`                             |
//! | [`rng`]         | `AgentRng`, one seeded stream per agent                 |
//! | [`material`]    | `Material`, `MaterialCategory`, block property table    |
//! | [`config`]      | `Config` and its per-behavior sections (TOML)           |
//! | [`error`]       | `CoreError`, `CoreResult`                               |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod material;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AgentsConfig, BuildingConfig, Config, ExplorationConfig, FleeConfig, GatheringConfig,
    MiningConfig, MovementConfig, SchedulerConfig, SurvivalConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::{BlockPos, Location};
pub use ids::{AgentId, HostileId};
pub use material::{Material, MaterialCategory};
pub use rng::AgentRng;
pub use time::{Clock, SimClock, Tick};

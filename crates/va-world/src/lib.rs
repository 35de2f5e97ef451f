//! `va-world`: the boundary between agents and the world they act in.
//!
//! Agents never own the world.  Everything they perceive or change goes
//! through [`WorldView`]; the host decides what is actually stored.  The
//! in-memory [`VoxelWorld`] backs the demo and the test-suite.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`view`]    | `WorldView` trait                                           |
//! | [`voxel`]   | `VoxelWorld` (flat generator + sparse edits)                |
//! | [`hostile`] | `Hostile`, `HostileKind`, `HostileIndex` (R-tree)           |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                              |

pub mod error;
pub mod hostile;
pub mod view;
pub mod voxel;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use hostile::{Hostile, HostileIndex, HostileKind};
pub use view::WorldView;
pub use voxel::VoxelWorld;

//! `va-agent`: what an agent *is*, independent of what it decides to do.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`entity`]    | `EntityControl` trait, `AgentBody`, `StatusEffect`        |
//! | [`inventory`] | `Inventory` (material → count)                            |
//! | [`state`]     | `AgentState` lifecycle enum                               |

pub mod entity;
pub mod inventory;
pub mod state;


pub use entity::{AgentBody, EntityControl, StatusEffect};
pub use inventory::Inventory;
pub use state::AgentState;

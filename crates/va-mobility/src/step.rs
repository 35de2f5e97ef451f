//! One bounded movement step, shared by every session.
//!
//! ```text
//! direct bearing ──clear foot/head of next + one ahead──▶ safe? ──▶ commit
//!        │ no
//!        ▼
//! ±45°, ±90° (no clearing) ──▶ safe? ──▶ commit
//!        │ no
//!        ▼
//! fallback: up onto the block ahead, level, down off it ──▶ Blocked
//! ```
//!
//! Obstacles are broken instantly (they are in the way, not the goal) and
//! their drops go into the agent's inventory.

use std::f64::consts::FRAC_PI_4;

use tracing::trace;

use va_agent::{EntityControl, Inventory};
use va_core::{BlockPos, Location, Material};
use va_world::WorldView;

use crate::MobilityResult;
use crate::safety::{VerticalMode, body_blocks, is_safe_horizontal};

/// Heading offsets tried after the direct bearing, in order.
const ALTERNATE_HEADINGS: [f64; 4] = [FRAC_PI_4, -FRAC_PI_4, 2.0 * FRAC_PI_4, -2.0 * FRAC_PI_4];

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StepResult {
    /// Position committed.  `heading` is 0 for the direct bearing, 1..=4 for
    /// the alternates, 5 for the fallback step.
    Moved { to: Location, heading: u8, cleared: u8 },
    /// Nothing safe in any direction; obstacles may still have been cleared.
    Blocked { cleared: u8 },
}

/// Advance the entity one step toward `toward`.
///
/// `protect` is never broken even if it is in the way (the block the agent
/// is walking up to mine, for example).
pub fn take_step(
    world: &mut dyn WorldView,
    entity: &mut dyn EntityControl,
    inventory: &mut Inventory,
    toward: &Location,
    step_length: f64,
    protect: Option<BlockPos>,
) -> MobilityResult<StepResult> {
    let from = entity.position();
    let mode = VerticalMode::classify(toward.y - from.y);
    let bearing = from.bearing_to(toward);

    // ── Direct bearing, with obstacle clearing ───────────────────────────
    let next = next_location(&from, bearing, step_length, mode);
    let beyond = next_location(&next, bearing, step_length, VerticalMode::Horizontal);
    let mut cleared = 0u8;
    for loc in [&next, &beyond] {
        let (foot, head, _) = body_blocks(loc);
        for pos in [foot, head] {
            if clear_obstacle(world, inventory, pos, mode, protect)? {
                cleared += 1;
            }
        }
    }
    if mode.is_safe(world, &next) {
        commit(entity, next, bearing, toward);
        return Ok(StepResult::Moved { to: next, heading: 0, cleared });
    }

    // ── Alternate headings ───────────────────────────────────────────────
    for (i, offset) in ALTERNATE_HEADINGS.iter().enumerate() {
        let heading = bearing + offset;
        let candidate = next_location(&from, heading, step_length, mode);
        if mode.is_safe(world, &candidate) {
            commit(entity, candidate, heading, toward);
            return Ok(StepResult::Moved { to: candidate, heading: i as u8 + 1, cleared });
        }
    }

    // ── Fallback step, judged as plain walking ───────────────────────────
    let ahead = from.step_along(bearing, step_length);
    for dy in [1.0, 0.0, -1.0] {
        let candidate = ahead.add(0.0, dy, 0.0);
        if is_safe_horizontal(world, &candidate) {
            commit(entity, candidate, bearing, toward);
            return Ok(StepResult::Moved { to: candidate, heading: 5, cleared });
        }
    }

    trace!(from = %from, to = %toward, "step blocked");
    Ok(StepResult::Blocked { cleared })
}

fn next_location(from: &Location, bearing: f64, len: f64, mode: VerticalMode) -> Location {
    from.step_along(bearing, len).add(0.0, mode.step_dy(), 0.0)
}

fn clear_obstacle(
    world: &mut dyn WorldView,
    inventory: &mut Inventory,
    pos: BlockPos,
    mode: VerticalMode,
    protect: Option<BlockPos>,
) -> MobilityResult<bool> {
    if protect == Some(pos) {
        return Ok(false);
    }
    let material = world.block_at(pos);
    if material.is_air() || !mode.can_mine(material) {
        return Ok(false);
    }
    world.set_block(pos, Material::Air)?;
    inventory.add(material.drop(), 1);
    trace!(pos = %pos, material = %material, "obstacle cleared");
    Ok(true)
}

fn commit(entity: &mut dyn EntityControl, to: Location, bearing: f64, looking_at: &Location) {
    let yaw = Location::yaw_for_bearing(bearing);
    let pitch = to.pitch_towards(looking_at);
    entity.set_position_and_facing(to.with_facing(yaw, pitch));
}

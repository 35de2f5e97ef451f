//! Straight-line visibility between an agent and a block.

use va_core::{BlockPos, Location, Material};
use va_world::WorldView;

/// Distance between samples along the line.
pub const SAMPLE_STEP: f64 = 0.5;

/// `true` when nothing solid stands between the agent at `from` and the
/// centre of `target`.
///
/// The line runs from the centre of the agent's foot block.  Bedrock, the
/// target itself and the agent's own foot block never obstruct.
pub fn line_of_sight(world: &dyn WorldView, from: &Location, target: BlockPos) -> bool {
    first_obstruction(world, from, target).is_none()
}

/// The first block that blocks the line, if any.
pub fn first_obstruction(world: &dyn WorldView, from: &Location, target: BlockPos) -> Option<BlockPos> {
    let origin_block = from.block();
    let start = origin_block.center();
    let end = target.center();
    let length = start.distance(&end);
    let samples = (length / SAMPLE_STEP).floor() as u32;
    let (dx, dy, dz) = ((end.x - start.x) / length, (end.y - start.y) / length, (end.z - start.z) / length);

    (1..=samples)
        .map(|i| {
            let t = i as f64 * SAMPLE_STEP;
            start.add(dx * t, dy * t, dz * t).block()
        })
        .filter(|&pos| pos != target && pos != origin_block)
        .find(|&pos| {
            let m = world.block_at(pos);
            m.is_solid() && m != Material::Bedrock
        })
}

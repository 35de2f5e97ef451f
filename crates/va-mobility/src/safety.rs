//! Shared safety predicates.
//!
//! Every predicate looks at a candidate *feet* location: the foot block it
//! occupies, the head block above it and the ground block below it.  The
//! vertical mode picks how strict the check is.

use va_core::{BlockPos, Location, Material, MaterialCategory};
use va_world::WorldView;

/// Height difference beyond which movement stops being horizontal.
pub const VERTICAL_THRESHOLD: f64 = 2.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VerticalMode {
    /// Destination more than two blocks below: dig a descending staircase.
    Underground,
    /// Destination more than two blocks above: climb.
    Upward,
    Horizontal,
}

impl VerticalMode {
    /// Pick a mode from `destination.y - current.y`.
    pub fn classify(dy: f64) -> VerticalMode {
        if dy < -VERTICAL_THRESHOLD {
            VerticalMode::Underground
        } else if dy > VERTICAL_THRESHOLD {
            VerticalMode::Upward
        } else {
            VerticalMode::Horizontal
        }
    }

    /// Vertical offset of one step in this mode.
    #[inline]
    pub fn step_dy(self) -> f64 {
        match self {
            VerticalMode::Underground => -1.0,
            VerticalMode::Upward      => 1.0,
            VerticalMode::Horizontal  => 0.0,
        }
    }

    /// Whether an agent moving in this mode may break `material` to make room.
    pub fn can_mine(self, material: Material) -> bool {
        if !material.is_minable() {
            return false;
        }
        match self {
            // Tunnels are carved through anything minable.
            VerticalMode::Underground => true,
            VerticalMode::Horizontal => {
                material.is_solid() && material.category() != MaterialCategory::Obsidian
            }
            VerticalMode::Upward => material.category() != MaterialCategory::Obsidian,
        }
    }

    /// Mode-specific safety check for standing at `loc`.
    pub fn is_safe(self, world: &dyn WorldView, loc: &Location) -> bool {
        match self {
            VerticalMode::Horizontal  => is_safe_horizontal(world, loc),
            VerticalMode::Underground => is_safe_underground(world, loc),
            VerticalMode::Upward      => is_safe_upward(world, loc),
        }
    }
}

/// Foot, head and ground blocks for a feet location.
#[inline]
pub fn body_blocks(loc: &Location) -> (BlockPos, BlockPos, BlockPos) {
    let foot = loc.block();
    (foot, foot.up(), foot.down())
}

#[inline]
fn open(material: Material) -> bool {
    material.is_air() || !material.is_solid()
}

/// Foot and head open, ground solid, no lava or fire anywhere.
pub fn is_safe_horizontal(world: &dyn WorldView, loc: &Location) -> bool {
    let (foot, head, ground) = body_blocks(loc);
    let (f, h, g) = (world.block_at(foot), world.block_at(head), world.block_at(ground));
    open(f) && open(h) && g.is_solid() && !f.is_hazard() && !h.is_hazard() && !g.is_hazard()
}

/// Foot and head free of lava, water and bedrock.
pub fn is_safe_underground(world: &dyn WorldView, loc: &Location) -> bool {
    let (foot, head, _) = body_blocks(loc);
    let excluded = |m: Material| m.is_liquid() || m == Material::Bedrock;
    !excluded(world.block_at(foot)) && !excluded(world.block_at(head))
}

/// Solid non-hazard footing; foot and head air, minable or non-hazard.
pub fn is_safe_upward(world: &dyn WorldView, loc: &Location) -> bool {
    let (foot, head, ground) = body_blocks(loc);
    let g = world.block_at(ground);
    if !g.is_solid() || g.is_hazard() {
        return false;
    }
    let passable = |m: Material| m.is_air() || m.is_minable() || !m.is_hazard();
    passable(world.block_at(foot)) && passable(world.block_at(head))
}

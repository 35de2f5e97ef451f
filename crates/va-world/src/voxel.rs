//! In-memory voxel world: a deterministic terrain generator plus sparse edits.
//!
//! # Storage
//!
//! Terrain is never materialised.  `block_at` first consults the edit map
//! (every block ever set) and falls back to the generator.  A per-column
//! "tallest edit" map keeps `highest_block_y` from scanning the whole height
//! range on every call.

use rustc_hash::FxHashMap;

use va_core::{BlockPos, Material};

use crate::{WorldError, WorldResult, WorldView};

/// Default world height range, matching the modern overworld.
pub const DEFAULT_MIN_HEIGHT: i32 = -64;
pub const DEFAULT_MAX_HEIGHT: i32 = 320;

/// How the unedited parts of the world look.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Terrain {
    /// Air everywhere above a bedrock floor at `min_height`.
    Empty,
    /// Bedrock floor, stone, three layers of dirt, grass at `surface_y`.
    Flat { surface_y: i32 },
}

pub struct VoxelWorld {
    terrain:    Terrain,
    min_height: i32,
    max_height: i32,
    edits:      FxHashMap<BlockPos, Material>,
    /// Highest edited y per (x, z) column.
    edit_top:   FxHashMap<(i32, i32), i32>,
}

impl VoxelWorld {
    /// Flat terrain with grass at `surface_y`.
    pub fn flat(surface_y: i32) -> Self {
        Self::with_terrain(Terrain::Flat { surface_y })
    }

    /// Air above a bedrock floor.
    pub fn empty() -> Self {
        Self::with_terrain(Terrain::Empty)
    }

    fn with_terrain(terrain: Terrain) -> Self {
        VoxelWorld {
            terrain,
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
            edits:      FxHashMap::default(),
            edit_top:   FxHashMap::default(),
        }
    }

    /// Override the height range (builder style).
    pub fn with_height_range(mut self, min_height: i32, max_height: i32) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }

    /// The generated (unedited) material at `pos`.
    fn generated(&self, pos: BlockPos) -> Material {
        if pos.y == self.min_height {
            return Material::Bedrock;
        }
        match self.terrain {
            Terrain::Empty => Material::Air,
            Terrain::Flat { surface_y } => {
                if pos.y > surface_y {
                    Material::Air
                } else if pos.y == surface_y {
                    Material::GrassBlock
                } else if pos.y >= surface_y - 3 {
                    Material::Dirt
                } else {
                    Material::Stone
                }
            }
        }
    }

    fn generated_top(&self) -> i32 {
        match self.terrain {
            Terrain::Empty => self.min_height,
            Terrain::Flat { surface_y } => surface_y.clamp(self.min_height, self.max_height - 1),
        }
    }

    /// Set every block in the inclusive box `from..=to`.
    pub fn fill(&mut self, from: BlockPos, to: BlockPos, material: Material) -> WorldResult<()> {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                for z in from.z.min(to.z)..=from.z.max(to.z) {
                    self.set_block(BlockPos::new(x, y, z), material)?;
                }
            }
        }
        Ok(())
    }

    /// Number of positions that differ from the generator's output.
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }
}

impl WorldView for VoxelWorld {
    fn block_at(&self, pos: BlockPos) -> Material {
        if pos.y >= self.max_height {
            return Material::Air;
        }
        if pos.y < self.min_height {
            return Material::Bedrock;
        }
        match self.edits.get(&pos) {
            Some(&m) => m,
            None => self.generated(pos),
        }
    }

    fn set_block(&mut self, pos: BlockPos, material: Material) -> WorldResult<()> {
        if !self.in_bounds(pos) {
            return Err(WorldError::OutOfBounds(pos));
        }
        if !material.is_block() {
            return Err(WorldError::NotABlock(material));
        }
        self.edits.insert(pos, material);
        let top = self.edit_top.entry((pos.x, pos.z)).or_insert(pos.y);
        *top = (*top).max(pos.y);
        Ok(())
    }

    fn highest_block_y(&self, x: i32, z: i32) -> i32 {
        let start = match self.edit_top.get(&(x, z)) {
            Some(&y) => y.max(self.generated_top()),
            None => return self.generated_top(),
        };
        (self.min_height..=start)
            .rev()
            .find(|&y| !self.block_at(BlockPos::new(x, y, z)).is_air())
            .unwrap_or(self.min_height)
    }

    fn min_height(&self) -> i32 {
        self.min_height
    }

    fn max_height(&self) -> i32 {
        self.max_height
    }
}

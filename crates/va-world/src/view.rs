//! The `WorldView` trait: the only way agents read or change blocks.

use va_core::{BlockPos, Material};

use crate::WorldResult;

/// Block storage as seen by an agent.
///
/// `block_at` never fails: positions above the world read as `Air` and
/// positions below it read as `Bedrock`, so the safety predicates treat the
/// world's edges as impassable without a special case.
pub trait WorldView {
    fn block_at(&self, pos: BlockPos) -> Material;

    /// Replace the block at `pos`.  Fails outside `[min_height, max_height)`
    /// or when `material` is not a block.
    fn set_block(&mut self, pos: BlockPos, material: Material) -> WorldResult<()>;

    /// Y of the topmost non-air block in the column, or `min_height()` when
    /// the column is empty.
    fn highest_block_y(&self, x: i32, z: i32) -> i32;

    /// Lowest valid block y (inclusive).
    fn min_height(&self) -> i32;

    /// Highest valid block y (exclusive).
    fn max_height(&self) -> i32;

    #[inline]
    fn is_solid(&self, pos: BlockPos) -> bool {
        self.block_at(pos).is_solid()
    }

    #[inline]
    fn in_bounds(&self, pos: BlockPos) -> bool {
        pos.y >= self.min_height() && pos.y < self.max_height()
    }
}

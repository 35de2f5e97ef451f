//! Voxel-world geometry: integer block coordinates and continuous locations.
//!
//! Coordinates follow the usual voxel convention: `y` is up, a block at
//! `BlockPos { x, y, z }` occupies the unit cube `[x, x+1) × [y, y+1) × [z, z+1)`,
//! and an entity standing at `Location { y: 64.0, .. }` has its feet in block
//! row 64 and its head in row 65.
//!
//! Horizontal directions are expressed as a *bearing* in radians measured in
//! the x/z plane (`0` = +x, `π/2` = +z).  Facing uses the game's yaw
//! convention (degrees, `0` = +z, `90` = −x).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── BlockPos ──────────────────────────────────────────────────────────────────

/// Integer coordinates of one block.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, z: self.z + dz }
    }

    #[inline]
    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The block's minimum corner as a `Location` (facing zero).
    #[inline]
    pub fn corner(self) -> Location {
        Location::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// The centre of the block's cube.
    #[inline]
    pub fn center(self) -> Location {
        Location::new(self.x as f64 + 0.5, self.y as f64 + 0.5, self.z as f64 + 0.5)
    }

    /// Index of the 16×16 column this block belongs to.
    #[inline]
    pub fn column(self) -> (i32, i32) {
        (self.x.div_euclid(16), self.z.div_euclid(16))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

/// A continuous position plus facing.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Location {
    pub x:     f64,
    pub y:     f64,
    pub z:     f64,
    /// Facing around the vertical axis, degrees.
    pub yaw:   f32,
    /// Facing above/below the horizon, degrees (negative looks up).
    pub pitch: f32,
}

impl Location {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, yaw: 0.0, pitch: 0.0 }
    }

    /// The block containing this location (the agent's "foot" block).
    #[inline]
    pub fn block(&self) -> BlockPos {
        BlockPos::new(self.x.floor() as i32, self.y.floor() as i32, self.z.floor() as i32)
    }

    #[inline]
    pub fn add(&self, dx: f64, dy: f64, dz: f64) -> Location {
        Location { x: self.x + dx, y: self.y + dy, z: self.z + dz, ..*self }
    }

    #[inline]
    pub fn with_y(&self, y: f64) -> Location {
        Location { y, ..*self }
    }

    #[inline]
    pub fn with_facing(&self, yaw: f32, pitch: f32) -> Location {
        Location { yaw, pitch, ..*self }
    }

    /// Squared Euclidean distance (facing ignored).
    #[inline]
    pub fn distance_sq(&self, other: &Location) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn distance(&self, other: &Location) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Distance in the x/z plane only.
    #[inline]
    pub fn horizontal_distance(&self, other: &Location) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Bearing (radians, x/z plane) from `self` toward `other`.
    #[inline]
    pub fn bearing_to(&self, other: &Location) -> f64 {
        (other.z - self.z).atan2(other.x - self.x)
    }

    /// Move `len` blocks horizontally along `bearing`.  Facing is preserved.
    #[inline]
    pub fn step_along(&self, bearing: f64, len: f64) -> Location {
        self.add(bearing.cos() * len, 0.0, bearing.sin() * len)
    }

    /// Game yaw for looking along `bearing`.
    #[inline]
    pub fn yaw_for_bearing(bearing: f64) -> f32 {
        let (dx, dz) = (bearing.cos(), bearing.sin());
        (-dx).atan2(dz).to_degrees() as f32
    }

    /// Pitch for looking from `self` at `target` (negative is up).
    pub fn pitch_towards(&self, target: &Location) -> f32 {
        let horizontal = self.horizontal_distance(target);
        let dy = target.y - self.y;
        if horizontal == 0.0 && dy == 0.0 {
            return 0.0;
        }
        (-dy).atan2(horizontal).to_degrees() as f32
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

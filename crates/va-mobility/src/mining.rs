//! Targets, the mining duration table and `MiningSession`.

use rustc_hash::FxHashMap;
use tracing::info;

use va_agent::Inventory;
use va_core::{BlockPos, Material, MaterialCategory, MiningConfig};
use va_world::WorldView;

use crate::MobilityResult;

// ── Target ────────────────────────────────────────────────────────────────────

/// A block picked by a search, remembered with the material it had then.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Target {
    pub pos:      BlockPos,
    pub material: Material,
}

impl Target {
    pub fn new(pos: BlockPos, material: Material) -> Self {
        Target { pos, material }
    }

    /// Still the same material, and still minable.
    pub fn is_valid(&self, world: &dyn WorldView) -> bool {
        self.material.is_minable() && world.block_at(self.pos) == self.material
    }
}

// ── MiningTable ───────────────────────────────────────────────────────────────

/// Seconds to break a block: overrides, then category, then the default.
#[derive(Clone, Debug)]
pub struct MiningTable {
    default_secs: f64,
    overrides:    FxHashMap<Material, f64>,
}

impl MiningTable {
    pub fn from_config(config: &MiningConfig) -> MobilityResult<Self> {
        let overrides = config.resolved_overrides()?.into_iter().collect();
        Ok(MiningTable { default_secs: config.default_secs, overrides })
    }

    pub fn secs(&self, material: Material) -> f64 {
        if let Some(&secs) = self.overrides.get(&material) {
            return secs;
        }
        match material.category() {
            MaterialCategory::Soil     => 0.5,
            MaterialCategory::Stone    => 2.0,
            MaterialCategory::Ore      => 3.0,
            MaterialCategory::Gem      => 4.0,
            MaterialCategory::Log      => 1.5,
            MaterialCategory::Obsidian => 10.0,
            _ => self.default_secs,
        }
    }

    #[inline]
    pub fn required_ms(&self, material: Material) -> u64 {
        (self.secs(material) * 1000.0).round() as u64
    }
}

impl Default for MiningTable {
    fn default() -> Self {
        MiningTable { default_secs: 1.0, overrides: FxHashMap::default() }
    }
}

// ── MiningSession ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum MiningOutcome {
    /// Not done yet; `progress` is in `[0, 1)`.
    InProgress { progress: f32 },
    /// Block broken; one unit of `drop` added to the inventory.
    Completed { drop: Material },
    /// The block changed under us.  Nothing was mined.
    TargetInvalid,
}

#[derive(Clone, Debug)]
pub struct MiningSession {
    pub target:      Target,
    pub started_at:  u64,
    pub required_ms: u64,
}

impl MiningSession {
    pub fn new(target: Target, now: u64, table: &MiningTable) -> Self {
        MiningSession { target, started_at: now, required_ms: table.required_ms(target.material) }
    }

    /// Check for completion.  Completes iff `now - started_at >= required_ms`.
    pub fn step(
        &self,
        now: u64,
        world: &mut dyn WorldView,
        inventory: &mut Inventory,
    ) -> MobilityResult<MiningOutcome> {
        if !self.target.is_valid(world) {
            return Ok(MiningOutcome::TargetInvalid);
        }
        let elapsed = now.saturating_sub(self.started_at);
        if elapsed < self.required_ms {
            let progress = elapsed as f32 / self.required_ms as f32;
            return Ok(MiningOutcome::InProgress { progress });
        }
        world.set_block(self.target.pos, Material::Air)?;
        let drop = self.target.material.drop();
        inventory.add(drop, 1);
        info!(pos = %self.target.pos, material = %self.target.material, %drop, "block mined");
        Ok(MiningOutcome::Completed { drop })
    }
}

//! Hostile entities reported by the host, indexed for radius queries.
//!
//! The host owns hostile AI.  Each tick it pushes positions and targets in
//! through `insert` / `move_to` / `set_target`; survival only asks "who is
//! hunting me within r blocks" and may strike back with `damage`.
//!
//! An R-tree (via `rstar`) over `[x, y, z]` answers the radius query.  Moving
//! a hostile is remove + insert, which is cheap at the populations involved.

use std::fmt;

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;
use tracing::debug;

use va_core::{AgentId, HostileId, Location};

use crate::{WorldError, WorldResult};

// ── Hostile ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HostileKind {
    Zombie,
    Skeleton,
    Spider,
    Creeper,
}

impl fmt::Display for HostileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HostileKind::Zombie   => "zombie",
            HostileKind::Skeleton => "skeleton",
            HostileKind::Spider   => "spider",
            HostileKind::Creeper  => "creeper",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Hostile {
    pub id:       HostileId,
    pub kind:     HostileKind,
    pub position: Location,
    /// The agent this hostile is currently attacking, if any.
    pub target:   Option<AgentId>,
    pub health:   f64,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq)]
struct HostileEntry {
    point: [f64; 3],
    id:    HostileId,
}

impl RTreeObject for HostileEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for HostileEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[inline]
fn point_of(loc: &Location) -> [f64; 3] {
    [loc.x, loc.y, loc.z]
}

// ── HostileIndex ──────────────────────────────────────────────────────────────

pub struct HostileIndex {
    tree:     RTree<HostileEntry>,
    hostiles: FxHashMap<HostileId, Hostile>,
}

impl HostileIndex {
    pub fn new() -> Self {
        HostileIndex { tree: RTree::new(), hostiles: FxHashMap::default() }
    }

    /// Add or replace a hostile.
    pub fn insert(&mut self, hostile: Hostile) {
        if let Some(old) = self.hostiles.remove(&hostile.id) {
            self.tree.remove(&HostileEntry { point: point_of(&old.position), id: old.id });
        }
        self.tree.insert(HostileEntry { point: point_of(&hostile.position), id: hostile.id });
        self.hostiles.insert(hostile.id, hostile);
    }

    pub fn remove(&mut self, id: HostileId) -> Option<Hostile> {
        let hostile = self.hostiles.remove(&id)?;
        self.tree.remove(&HostileEntry { point: point_of(&hostile.position), id });
        Some(hostile)
    }

    pub fn move_to(&mut self, id: HostileId, position: Location) -> WorldResult<()> {
        let hostile = self.hostiles.get_mut(&id).ok_or(WorldError::HostileNotFound(id))?;
        self.tree.remove(&HostileEntry { point: point_of(&hostile.position), id });
        hostile.position = position;
        self.tree.insert(HostileEntry { point: point_of(&position), id });
        Ok(())
    }

    pub fn set_target(&mut self, id: HostileId, target: Option<AgentId>) -> WorldResult<()> {
        let hostile = self.hostiles.get_mut(&id).ok_or(WorldError::HostileNotFound(id))?;
        hostile.target = target;
        Ok(())
    }

    /// Apply `amount` damage.  Returns `true` when the hostile died and was
    /// removed from the index.
    pub fn damage(&mut self, id: HostileId, amount: f64) -> WorldResult<bool> {
        let hostile = self.hostiles.get_mut(&id).ok_or(WorldError::HostileNotFound(id))?;
        hostile.health -= amount;
        if hostile.health > 0.0 {
            return Ok(false);
        }
        debug!(hostile = %id, "hostile killed");
        self.remove(id);
        Ok(true)
    }

    #[inline]
    pub fn get(&self, id: HostileId) -> Option<&Hostile> {
        self.hostiles.get(&id)
    }

    /// Closest living hostile targeting `agent` within `radius` of `center`.
    /// Ties are broken by the lower id.
    pub fn nearest_targeting(
        &self,
        agent: AgentId,
        center: &Location,
        radius: f64,
    ) -> Option<&Hostile> {
        let query = point_of(center);
        self.tree
            .locate_within_distance(query, radius * radius)
            .filter_map(|entry| self.hostiles.get(&entry.id).map(|h| (entry.distance_2(&query), h)))
            .filter(|(_, h)| h.target == Some(agent) && h.health > 0.0)
            .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)))
            .map(|(_, h)| h)
    }

    /// Forget every hostile targeting `agent` (used when the agent is removed).
    pub fn clear_target(&mut self, agent: AgentId) {
        for hostile in self.hostiles.values_mut() {
            if hostile.target == Some(agent) {
                hostile.target = None;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hostile> {
        self.hostiles.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hostiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hostiles.is_empty()
    }
}

impl Default for HostileIndex {
    fn default() -> Self {
        Self::new()
    }
}

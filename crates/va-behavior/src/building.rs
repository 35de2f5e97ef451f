//! Building: pick a flat site, gather materials, place a blueprint block by
//! block.
//!
//! Planning, gathering and placing are paced by `action_interval_ms`; an
//! in-flight movement or mining session is stepped on every update.

use std::fmt;

use tracing::{debug, info, warn};

use va_core::{BlockPos, BuildingConfig, Location, Material, MovementConfig};
use va_mobility::{
    MiningOutcome, MiningSession, MiningTable, MovementSession, StepOutcome, Target,
};
use va_world::WorldView;

use crate::{Behavior, BehaviorContext, BehaviorError, BehaviorKind, BehaviorResult};

/// Placeable materials, in order of preference.
pub const BUILDING_MATERIALS: &[Material] =
    &[Material::Cobblestone, Material::Stone, Material::OakPlanks, Material::Dirt];

/// Blocks mined when short of building materials.
pub const GATHERABLE: &[Material] = &[
    Material::Stone,
    Material::Dirt,
    Material::GrassBlock,
    Material::OakLog,
    Material::Cobblestone,
];

const SITE_ATTEMPTS: usize = 20;
const SITE_RANGE: i32 = 10;
const SITE_SIZE: i32 = 5;

/// Blocked steps tolerated before a building walk is dropped.
const MAX_BLOCKED_STEPS: u32 = 5;

// ── BuildProject ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BuildProject {
    /// 5×5×3 shell with a door gap.
    SimpleHouse,
    /// 3×3 ring, 8 high.
    Tower,
    /// Two 10-long rows with rails every other block.
    Bridge,
    /// 15 long, 4 high.
    Wall,
}

impl BuildProject {
    pub const ALL: [BuildProject; 4] = [
        BuildProject::SimpleHouse,
        BuildProject::Tower,
        BuildProject::Bridge,
        BuildProject::Wall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildProject::SimpleHouse => "simple_house",
            BuildProject::Tower       => "tower",
            BuildProject::Bridge      => "bridge",
            BuildProject::Wall        => "wall",
        }
    }

    /// Block positions relative to `origin`, lowest layer first.
    pub fn blueprint(self, origin: BlockPos) -> Vec<BlockPos> {
        let mut blocks = Vec::new();
        match self {
            BuildProject::SimpleHouse => {
                for x in 0..5 {
                    for z in 0..5 {
                        for y in 0..3 {
                            let shell = x == 0 || x == 4 || z == 0 || z == 4 || y == 0 || y == 2;
                            let door = x == 2 && z == 0 && y == 1;
                            if shell && !door {
                                blocks.push(origin.offset(x, y, z));
                            }
                        }
                    }
                }
            }
            BuildProject::Tower => {
                for y in 0..8 {
                    for x in 0..3 {
                        for z in 0..3 {
                            if x == 0 || x == 2 || z == 0 || z == 2 {
                                blocks.push(origin.offset(x, y, z));
                            }
                        }
                    }
                }
            }
            BuildProject::Bridge => {
                for x in 0..10 {
                    blocks.push(origin.offset(x, 0, 0));
                    blocks.push(origin.offset(x, 0, 2));
                    if x % 2 == 0 {
                        blocks.push(origin.offset(x, 1, -1));
                        blocks.push(origin.offset(x, 1, 3));
                    }
                }
            }
            BuildProject::Wall => {
                for x in 0..15 {
                    for y in 0..4 {
                        blocks.push(origin.offset(x, y, 0));
                    }
                }
            }
        }
        blocks.sort_by_key(|b| b.y);
        blocks
    }
}

impl fmt::Display for BuildProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// A project placed at a site, with progress.
#[derive(Clone, Debug)]
pub struct Construction {
    pub project: BuildProject,
    pub origin:  BlockPos,
    pub blocks:  Vec<BlockPos>,
    /// Index of the first block not yet handled.
    pub next:    usize,
    pub placed:  u32,
    pub skipped: u32,
}

impl Construction {
    pub fn new(project: BuildProject, origin: BlockPos) -> Self {
        Construction {
            project,
            origin,
            blocks:  project.blueprint(origin),
            next:    0,
            placed:  0,
            skipped: 0,
        }
    }

    /// Next blueprint position that still needs a block, advancing past
    /// positions that are already filled.
    pub fn next_open(&mut self, world: &dyn WorldView) -> Option<BlockPos> {
        while let Some(&pos) = self.blocks.get(self.next) {
            if world.block_at(pos).is_replaceable() {
                return Some(pos);
            }
            self.next += 1;
        }
        None
    }

    pub fn is_complete(&self) -> bool {
        self.next >= self.blocks.len()
    }

    fn contains(&self, pos: BlockPos) -> bool {
        self.blocks.contains(&pos)
    }
}

#[derive(Clone, Debug)]
enum BuildSession {
    None,
    Moving(MovementSession),
    Mining(MiningSession),
}

// ── BuildingBehavior ──────────────────────────────────────────────────────────

pub struct BuildingBehavior {
    config:       BuildingConfig,
    movement:     MovementConfig,
    table:        MiningTable,
    construction: Option<Construction>,
    session:      BuildSession,
    last_action:  Option<u64>,
    completed:    u32,
}

impl BuildingBehavior {
    pub fn new(config: BuildingConfig, movement: MovementConfig, table: MiningTable) -> Self {
        BuildingBehavior {
            config,
            movement,
            table,
            construction: None,
            session:      BuildSession::None,
            last_action:  None,
            completed:    0,
        }
    }

    #[inline]
    pub fn construction(&self) -> Option<&Construction> {
        self.construction.as_ref()
    }

    /// Projects finished so far.
    #[inline]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    fn has_materials(&self, ctx: &BehaviorContext<'_>) -> bool {
        BUILDING_MATERIALS
            .iter()
            .any(|&m| ctx.inventory.count(m) >= self.config.material_threshold)
    }

    /// Nearest gatherable block with air above it, outside the current
    /// construction and not the block the agent stands on.
    pub fn find_material(&self, world: &dyn WorldView, center: &Location) -> Option<Target> {
        let origin = center.block();
        let ground = origin.down();
        let r = self.config.gather_radius;
        let mut best: Option<(f64, BlockPos, Material)> = None;
        for dx in -r..=r {
            for dy in -r..=r {
                for dz in -r..=r {
                    let pos = origin.offset(dx, dy, dz);
                    let material = world.block_at(pos);
                    if !GATHERABLE.contains(&material) || !world.block_at(pos.up()).is_air() {
                        continue;
                    }
                    if pos == ground || self.construction.as_ref().is_some_and(|c| c.contains(pos)) {
                        continue;
                    }
                    let dist = center.distance_sq(&pos.corner());
                    if best.is_none_or(|(bd, bp, _)| (dist, pos) < (bd, bp)) {
                        best = Some((dist, pos, material));
                    }
                }
            }
        }
        best.map(|(_, pos, material)| Target::new(pos, material))
    }

    /// A 5×5 area at foot level that is open with solid ground underneath.
    fn is_flat_site(world: &dyn WorldView, origin: BlockPos) -> bool {
        (0..SITE_SIZE).all(|x| {
            (0..SITE_SIZE).all(|z| {
                let pos = origin.offset(x, 0, z);
                world.block_at(pos).is_replaceable() && world.is_solid(pos.down())
            })
        })
    }

    fn plan(&mut self, ctx: &mut BehaviorContext<'_>) {
        let here = ctx.entity.position().block();
        let mut origin = here;
        for _ in 0..SITE_ATTEMPTS {
            let candidate = here.offset(
                ctx.rng.gen_range(-SITE_RANGE..=SITE_RANGE),
                0,
                ctx.rng.gen_range(-SITE_RANGE..=SITE_RANGE),
            );
            if Self::is_flat_site(&*ctx.world, candidate) {
                origin = candidate;
                break;
            }
        }
        let project = *ctx.rng.choose(&BuildProject::ALL).unwrap_or(&BuildProject::Wall);
        info!(agent = %ctx.agent, %project, %origin, "construction planned");
        ctx.status.set("planning", Some(project.to_string()));
        self.construction = Some(Construction::new(project, origin));
    }

    fn gather(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        let here = ctx.entity.position();
        let Some(target) = self.find_material(&*ctx.world, &here) else {
            return Err(BehaviorError::ResourceExhausted(Material::Cobblestone));
        };
        ctx.status.set("gathering", Some(format!("{} {}", target.material, target.pos)));
        if here.distance(&target.pos.corner()) > self.config.place_reach {
            let session = MovementSession::new(target.pos.corner(), ctx.now, &self.movement)
                .protecting(target.pos);
            self.session = BuildSession::Moving(session);
        } else {
            self.session = BuildSession::Mining(MiningSession::new(target, ctx.now, &self.table));
        }
        Ok(())
    }

    fn place_next(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        let Some(construction) = self.construction.as_mut() else {
            return Ok(());
        };
        let Some(pos) = construction.next_open(&*ctx.world) else {
            info!(
                agent = %ctx.agent,
                project = %construction.project,
                origin = %construction.origin,
                placed = construction.placed,
                skipped = construction.skipped,
                "construction completed"
            );
            self.completed += 1;
            self.construction = None;
            ctx.status.set_action("idle");
            return Ok(());
        };
        ctx.status.set("building", Some(format!("{} {}", construction.project, pos)));

        let here = ctx.entity.position();
        let feet = here.block();
        if pos == feet || pos == feet.up() {
            // Standing in the way: step outside the site first.
            let aside = construction.origin.offset(-2, 0, -2).center().with_y(feet.y as f64);
            self.session = BuildSession::Moving(MovementSession::new(aside, ctx.now, &self.movement));
            return Ok(());
        }
        if here.distance(&pos.center()) > self.config.place_reach {
            let session = MovementSession::new(pos.corner(), ctx.now, &self.movement);
            self.session = BuildSession::Moving(session);
            return Ok(());
        }

        let Some(material) = ctx.inventory.first_held(BUILDING_MATERIALS) else {
            return Err(BehaviorError::ResourceExhausted(Material::Cobblestone));
        };
        if !ctx.inventory.try_remove(material, 1) {
            return Err(BehaviorError::ResourceExhausted(material));
        }
        construction.next += 1;
        if let Err(e) = ctx.world.set_block(pos, material) {
            ctx.inventory.add(material, 1);
            construction.skipped += 1;
            warn!(agent = %ctx.agent, %pos, error = %e, "placement failed, block skipped");
            return Ok(());
        }
        construction.placed += 1;
        debug!(agent = %ctx.agent, %material, %pos, "block placed");
        Ok(())
    }

    fn step_session(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        match std::mem::replace(&mut self.session, BuildSession::None) {
            BuildSession::None => Ok(()),
            BuildSession::Moving(mut session) => {
                match session.step(ctx.now, &mut *ctx.world, &mut *ctx.entity, &mut *ctx.inventory)? {
                    StepOutcome::TimedOut => Err(BehaviorError::SessionTimeout("movement")),
                    StepOutcome::Blocked if session.blocked_streak >= MAX_BLOCKED_STEPS => {
                        debug!(agent = %ctx.agent, "building movement blocked");
                        Ok(())
                    }
                    o if o.is_terminal() => Ok(()),
                    _ => {
                        self.session = BuildSession::Moving(session);
                        Ok(())
                    }
                }
            }
            BuildSession::Mining(session) => {
                match session.step(ctx.now, &mut *ctx.world, &mut *ctx.inventory)? {
                    MiningOutcome::InProgress { .. } => {
                        self.session = BuildSession::Mining(session);
                        Ok(())
                    }
                    MiningOutcome::Completed { drop } => {
                        debug!(agent = %ctx.agent, %drop, "building material gathered");
                        Ok(())
                    }
                    MiningOutcome::TargetInvalid => {
                        Err(BehaviorError::TargetInvalid(session.target.pos))
                    }
                }
            }
        }
    }
}

impl Behavior for BuildingBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Building
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    /// Holding enough of one material, or able to gather some nearby.
    fn can_execute(&mut self, ctx: &BehaviorContext<'_>) -> BehaviorResult<bool> {
        if !self.config.enabled || ctx.entity.is_dead() {
            return Ok(false);
        }
        if self.has_session() || self.has_materials(ctx) {
            return Ok(true);
        }
        Ok(self.find_material(&*ctx.world, &ctx.entity.position()).is_some())
    }

    fn on_start(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        if self.construction.is_none() {
            self.plan(ctx);
            self.last_action = Some(ctx.now);
        }
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>) -> BehaviorResult<()> {
        if !matches!(self.session, BuildSession::None) {
            return self.step_session(ctx);
        }
        if self
            .last_action
            .is_some_and(|t| ctx.now.saturating_sub(t) < self.config.action_interval_ms)
        {
            return Ok(());
        }
        self.last_action = Some(ctx.now);

        let result = if self.construction.is_none() {
            self.plan(ctx);
            Ok(())
        } else if !self.has_materials(ctx)
            && self.find_material(&*ctx.world, &ctx.entity.position()).is_some()
        {
            self.gather(ctx)
        } else {
            self.place_next(ctx)
        };
        match result {
            Err(BehaviorError::ResourceExhausted(material)) => {
                debug!(agent = %ctx.agent, %material, "no building material");
                Ok(())
            }
            other => other,
        }
    }

    fn cancel_sessions(&mut self) {
        self.session = BuildSession::None;
    }

    fn has_session(&self) -> bool {
        !matches!(self.session, BuildSession::None)
    }
}

//! Unit tests for va-mobility.
//!
//! Worlds are flat with grass at y = 63, so an agent standing on the surface
//! has its feet at y = 64.

fn surface_world() -> va_world::VoxelWorld {
    va_world::VoxelWorld::flat(63)
}

fn standing_at(x: f64, z: f64) -> va_agent::AgentBody {
    va_agent::AgentBody::new(va_core::Location::new(x, 64.0, z))
}

// ── Safety predicates ─────────────────────────────────────────────────────────

#[cfg(test)]
mod safety_tests {
    use va_core::{BlockPos, Location, Material};
    use va_world::WorldView;

    use super::surface_world;
    use crate::VerticalMode;
    use crate::safety::{is_safe_horizontal, is_safe_underground, is_safe_upward};

    #[test]
    fn classify_by_height_difference() {
        assert_eq!(VerticalMode::classify(-3.0), VerticalMode::Underground);
        assert_eq!(VerticalMode::classify(-2.0), VerticalMode::Horizontal);
        assert_eq!(VerticalMode::classify(2.0), VerticalMode::Horizontal);
        assert_eq!(VerticalMode::classify(2.5), VerticalMode::Upward);
    }

    #[test]
    fn horizontal_needs_open_body_and_solid_ground() {
        let mut world = surface_world();
        let loc = Location::new(0.5, 64.0, 0.5);
        assert!(is_safe_horizontal(&world, &loc));
        // Floating one block up.
        assert!(!is_safe_horizontal(&world, &loc.add(0.0, 1.0, 0.0)));
        world.set_block(BlockPos::new(0, 65, 0), Material::Stone).unwrap();
        assert!(!is_safe_horizontal(&world, &loc));
        world.set_block(BlockPos::new(0, 65, 0), Material::TallGrass).unwrap();
        assert!(is_safe_horizontal(&world, &loc));
        world.set_block(BlockPos::new(0, 64, 0), Material::Fire).unwrap();
        assert!(!is_safe_horizontal(&world, &loc));
    }

    #[test]
    fn underground_rejects_liquids_and_bedrock() {
        let mut world = surface_world();
        let loc = Location::new(0.5, 50.0, 0.5);
        assert!(is_safe_underground(&world, &loc));
        world.set_block(BlockPos::new(0, 51, 0), Material::Water).unwrap();
        assert!(!is_safe_underground(&world, &loc));
        let floor = Location::new(0.5, world.min_height() as f64, 0.5);
        assert!(!is_safe_underground(&world, &floor));
    }

    #[test]
    fn upward_needs_solid_footing() {
        let mut world = surface_world();
        assert!(is_safe_upward(&world, &Location::new(0.5, 64.0, 0.5)));
        assert!(!is_safe_upward(&world, &Location::new(0.5, 66.0, 0.5)));
        world.set_block(BlockPos::new(0, 63, 0), Material::Lava).unwrap();
        assert!(!is_safe_upward(&world, &Location::new(0.5, 64.0, 0.5)));
    }

    #[test]
    fn mode_specific_can_mine() {
        assert!(VerticalMode::Underground.can_mine(Material::Obsidian));
        assert!(!VerticalMode::Horizontal.can_mine(Material::Obsidian));
        assert!(!VerticalMode::Horizontal.can_mine(Material::TallGrass));
        assert!(VerticalMode::Upward.can_mine(Material::OakLeaves));
        for mode in [VerticalMode::Underground, VerticalMode::Horizontal, VerticalMode::Upward] {
            assert!(!mode.can_mine(Material::Bedrock));
            assert!(!mode.can_mine(Material::Chest));
            assert!(!mode.can_mine(Material::Water));
        }
    }
}

// ── Single steps ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use va_agent::{EntityControl, Inventory};
    use va_core::{BlockPos, Location, Material};
    use va_world::WorldView;

    use super::{standing_at, surface_world};
    use crate::{StepResult, take_step};

    #[test]
    fn direct_step_on_open_ground() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 64.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert!(matches!(result, StepResult::Moved { heading: 0, cleared: 0, .. }));
        assert_eq!(body.position().block(), BlockPos::new(1, 64, 0));
    }

    #[test]
    fn obstacles_ahead_are_cleared_into_inventory() {
        let mut world = surface_world();
        world.fill(BlockPos::new(2, 64, 0), BlockPos::new(2, 65, 0), Material::Dirt).unwrap();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 64.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert!(matches!(result, StepResult::Moved { heading: 0, cleared: 2, .. }));
        assert_eq!(world.block_at(BlockPos::new(2, 64, 0)), Material::Air);
        assert_eq!(inv.count(Material::Dirt), 2);
    }

    #[test]
    fn protected_block_is_left_alone() {
        let mut world = surface_world();
        let ore = BlockPos::new(2, 64, 0);
        world.set_block(ore, Material::IronOre).unwrap();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 64.0, 0.5);
        take_step(&mut world, &mut body, &mut inv, &goal, 1.0, Some(ore)).unwrap();
        assert_eq!(world.block_at(ore), Material::IronOre);
        assert!(inv.is_empty());
    }

    #[test]
    fn unbreakable_obstacle_falls_back_to_alternate_heading() {
        let mut world = surface_world();
        world.fill(BlockPos::new(1, 64, 0), BlockPos::new(1, 65, 0), Material::Bedrock).unwrap();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 64.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert!(matches!(result, StepResult::Moved { heading: 1, .. }), "got {result:?}");
        assert_eq!(body.position().block(), BlockPos::new(1, 64, 1));
    }

    #[test]
    fn boxed_in_is_blocked() {
        let mut world = surface_world();
        world.fill(BlockPos::new(-1, 64, -1), BlockPos::new(1, 66, 1), Material::Bedrock).unwrap();
        world.fill(BlockPos::new(0, 64, 0), BlockPos::new(0, 65, 0), Material::Air).unwrap();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 64.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert_eq!(result, StepResult::Blocked { cleared: 0 });
        assert_eq!(body.position(), Location::new(0.5, 64.0, 0.5));
    }

    #[test]
    fn underground_mode_digs_down() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(5.5, 55.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert!(matches!(result, StepResult::Moved { heading: 0, .. }));
        assert_eq!(body.position().block(), BlockPos::new(1, 63, 0));
        assert_eq!(world.block_at(BlockPos::new(1, 63, 0)), Material::Air);
        assert!(inv.count(Material::Dirt) >= 1);
    }

    #[test]
    fn upward_mode_climbs_onto_a_wall() {
        let mut world = surface_world();
        world.fill(BlockPos::new(1, 64, 0), BlockPos::new(1, 65, 0), Material::Stone).unwrap();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 70.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert!(matches!(result, StepResult::Moved { heading: 0, cleared: 1, .. }), "got {result:?}");
        // Standing on the lower wall block after breaking the upper one.
        assert_eq!(body.position().block(), BlockPos::new(1, 65, 0));
        assert_eq!(world.block_at(BlockPos::new(1, 64, 0)), Material::Stone);
        assert_eq!(world.block_at(BlockPos::new(1, 65, 0)), Material::Air);
        assert_eq!(inv.count(Material::Cobblestone), 1);
    }

    #[test]
    fn goal_overhead_with_nothing_to_climb_walks_level() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(10.5, 70.0, 0.5);
        let result = take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        assert!(matches!(result, StepResult::Moved { heading: 5, cleared: 0, .. }), "got {result:?}");
        assert_eq!(body.position().block(), BlockPos::new(1, 64, 0));
        assert!(inv.is_empty());
    }

    #[test]
    fn facing_points_along_the_step() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let goal = Location::new(0.5, 64.0, 10.5);
        take_step(&mut world, &mut body, &mut inv, &goal, 1.0, None).unwrap();
        // Walking toward +z is yaw 0.
        assert!(body.position().yaw.abs() < 1e-3);
    }
}

// ── MovementSession ───────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use va_agent::{EntityControl, Inventory};
    use va_core::{BlockPos, Location, Material, MovementConfig};

    use super::{standing_at, surface_world};
    use crate::{MovementSession, StepOutcome};

    #[test]
    fn walks_until_arrival() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let dest = Location::new(10.5, 64.0, 0.5);
        let mut session = MovementSession::new(dest, 0, &MovementConfig::default());

        let mut outcome = StepOutcome::Waiting;
        let mut now = 0;
        while !outcome.is_terminal() && now < 60_000 {
            outcome = session.step(now, &mut world, &mut body, &mut inv).unwrap();
            now += 50;
        }
        assert_eq!(outcome, StepOutcome::Arrived);
        assert!(body.position().distance(&dest) <= 2.0);
        assert_eq!(session.steps, 8);
    }

    #[test]
    fn steps_are_paced() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let dest = Location::new(10.5, 64.0, 0.5);
        let mut session = MovementSession::new(dest, 0, &MovementConfig::default());

        assert!(matches!(session.step(0, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Moved(_)));
        assert_eq!(session.step(50, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Waiting);
        assert_eq!(session.step(150, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Waiting);
        assert!(matches!(session.step(200, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Moved(_)));
        assert_eq!(session.steps, 2);
    }

    #[test]
    fn times_out_even_when_unreached() {
        let mut world = surface_world();
        world.fill(BlockPos::new(-1, 64, -1), BlockPos::new(1, 66, 1), Material::Bedrock).unwrap();
        world.fill(BlockPos::new(0, 64, 0), BlockPos::new(0, 65, 0), Material::Air).unwrap();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let config = MovementConfig { timeout_ms: 1_000, ..MovementConfig::default() };
        let mut session = MovementSession::new(Location::new(30.5, 64.0, 0.5), 500, &config);

        assert_eq!(session.step(500, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Blocked);
        assert_eq!(session.step(1_499, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Blocked);
        assert_eq!(session.step(1_500, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::TimedOut);
        assert_eq!(session.blocked_streak, 2);
    }

    #[test]
    fn timeout_wins_over_arrival() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let config = MovementConfig { timeout_ms: 100, ..MovementConfig::default() };
        let mut session = MovementSession::new(Location::new(1.5, 64.0, 0.5), 0, &config);
        assert_eq!(session.step(100, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::TimedOut);
    }

    #[test]
    fn already_there_arrives_without_moving() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let mut session = MovementSession::new(Location::new(1.5, 64.0, 0.5), 0, &MovementConfig::default());
        assert_eq!(session.step(0, &mut world, &mut body, &mut inv).unwrap(), StepOutcome::Arrived);
        assert_eq!(session.steps, 0);
    }
}

// ── FleeSession ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod flee_tests {
    use va_agent::{EntityControl, Inventory};
    use va_core::{AgentId, FleeConfig, HostileId, Location};
    use va_world::{Hostile, HostileIndex, HostileKind};

    use super::{standing_at, surface_world};
    use crate::{FleeOutcome, FleeSession};

    const ME: AgentId = AgentId(0);

    fn index_with(x: f64, target: Option<AgentId>) -> HostileIndex {
        let mut index = HostileIndex::new();
        index.insert(Hostile {
            id:       HostileId(1),
            kind:     HostileKind::Zombie,
            position: Location::new(x, 64.0, 0.5),
            target,
            health:   20.0,
        });
        index
    }

    #[test]
    fn steps_away_from_threat() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let hostiles = index_with(2.5, Some(ME));
        let home = body.home();
        let mut session = FleeSession::new(Some(HostileId(1)), home, 0, &FleeConfig::default());

        let outcome = session.step(0, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap();
        assert!(matches!(outcome, FleeOutcome::Moved(_)));
        assert!(body.position().x < 0.5);
        assert_eq!(session.step(100, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap(), FleeOutcome::Waiting);
        assert!(matches!(
            session.step(150, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap(),
            FleeOutcome::Moved(_)
        ));
    }

    #[test]
    fn ends_when_threat_gives_up_or_is_far() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let home = body.home();

        let hostiles = index_with(2.5, None);
        let mut session = FleeSession::new(Some(HostileId(1)), home, 0, &FleeConfig::default());
        assert_eq!(session.step(0, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap(), FleeOutcome::ThreatLost);

        let hostiles = index_with(20.5, Some(ME));
        let mut session = FleeSession::new(Some(HostileId(1)), home, 0, &FleeConfig::default());
        assert_eq!(session.step(0, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap(), FleeOutcome::Safe);

        let hostiles = HostileIndex::new();
        let mut session = FleeSession::new(Some(HostileId(1)), home, 0, &FleeConfig::default());
        assert_eq!(session.step(0, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap(), FleeOutcome::ThreatLost);
    }

    #[test]
    fn times_out() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let hostiles = index_with(2.5, Some(ME));
        let mut session = FleeSession::new(Some(HostileId(1)), body.home(), 0, &FleeConfig::default());
        assert_eq!(
            session.step(15_000, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap(),
            FleeOutcome::TimedOut
        );
    }

    #[test]
    fn without_threat_retreats_home() {
        let mut world = surface_world();
        let mut body = standing_at(0.5, 0.5);
        let mut inv = Inventory::new();
        let hostiles = HostileIndex::new();
        let home = Location::new(6.5, 64.0, 0.5);
        let mut session = FleeSession::new(None, home, 0, &FleeConfig::default());
        let mut now = 0;
        let mut outcome = FleeOutcome::Waiting;
        while !outcome.is_terminal() && now < 15_000 {
            outcome = session.step(now, ME, &mut world, &mut body, &mut inv, &hostiles).unwrap();
            now += 50;
        }
        assert_eq!(outcome, FleeOutcome::Safe);
        assert!(body.position().distance(&home) <= 2.0);
    }
}

// ── Mining ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mining_tests {
    use va_agent::Inventory;
    use va_core::{BlockPos, Location, Material, MiningConfig};
    use va_world::WorldView;

    use super::surface_world;
    use crate::{MiningOutcome, MiningSession, MiningTable, Target, line_of_sight};

    #[test]
    fn table_categories_and_overrides() {
        let table = MiningTable::default();
        assert_eq!(table.required_ms(Material::Stone), 2_000);
        assert_eq!(table.required_ms(Material::IronOre), 3_000);
        assert_eq!(table.required_ms(Material::DiamondOre), 4_000);
        assert_eq!(table.required_ms(Material::Obsidian), 10_000);
        assert_eq!(table.required_ms(Material::Sand), 500);
        assert_eq!(table.required_ms(Material::OakLog), 1_500);
        assert_eq!(table.required_ms(Material::OakPlanks), 1_000);

        let mut config = MiningConfig::default();
        config.overrides.insert("stone".into(), 0.25);
        let table = MiningTable::from_config(&config).unwrap();
        assert_eq!(table.required_ms(Material::Stone), 250);
        assert_eq!(table.required_ms(Material::Cobblestone), 2_000);
    }

    #[test]
    fn completes_iff_elapsed_reaches_duration() {
        let mut world = surface_world();
        let pos = BlockPos::new(3, 64, 0);
        world.set_block(pos, Material::DiamondOre).unwrap();
        let mut inv = Inventory::new();
        let session = MiningSession::new(Target::new(pos, Material::DiamondOre), 1_000, &MiningTable::default());
        assert_eq!(session.required_ms, 4_000);

        let outcome = session.step(4_999, &mut world, &mut inv).unwrap();
        assert!(matches!(outcome, MiningOutcome::InProgress { .. }));
        assert_eq!(world.block_at(pos), Material::DiamondOre);
        assert!(inv.is_empty());

        let outcome = session.step(5_000, &mut world, &mut inv).unwrap();
        assert_eq!(outcome, MiningOutcome::Completed { drop: Material::Diamond });
        assert_eq!(world.block_at(pos), Material::Air);
        assert_eq!(inv.count(Material::Diamond), 1);
        assert_eq!(inv.total_count(), 1);
    }

    #[test]
    fn changed_block_invalidates() {
        let mut world = surface_world();
        let pos = BlockPos::new(3, 64, 0);
        world.set_block(pos, Material::IronOre).unwrap();
        let mut inv = Inventory::new();
        let session = MiningSession::new(Target::new(pos, Material::IronOre), 0, &MiningTable::default());
        world.set_block(pos, Material::Air).unwrap();
        assert_eq!(session.step(10_000, &mut world, &mut inv).unwrap(), MiningOutcome::TargetInvalid);
        assert!(inv.is_empty());
    }

    #[test]
    fn progress_is_fractional() {
        let mut world = surface_world();
        let pos = BlockPos::new(3, 64, 0);
        world.set_block(pos, Material::Stone).unwrap();
        let mut inv = Inventory::new();
        let session = MiningSession::new(Target::new(pos, Material::Stone), 0, &MiningTable::default());
        match session.step(1_000, &mut world, &mut inv).unwrap() {
            MiningOutcome::InProgress { progress } => assert!((progress - 0.5).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn line_of_sight_sampling() {
        let mut world = surface_world();
        let agent = Location::new(0.0, 64.0, 0.0);
        let ore = BlockPos::new(3, 64, 0);
        world.set_block(ore, Material::IronOre).unwrap();
        assert!(line_of_sight(&world, &agent, ore));

        world.set_block(BlockPos::new(2, 64, 0), Material::Bedrock).unwrap();
        assert!(line_of_sight(&world, &agent, ore));

        world.set_block(BlockPos::new(1, 64, 0), Material::Cobblestone).unwrap();
        assert!(!line_of_sight(&world, &agent, ore));
    }
}

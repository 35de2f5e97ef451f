//! Unit tests for va-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, HostileId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_default() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(HostileId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(HostileId(3).to_string(), "HostileId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{BlockPos, Location};

    #[test]
    fn block_of_negative_location_floors() {
        let loc = Location::new(-0.5, 64.2, 3.9);
        assert_eq!(loc.block(), BlockPos::new(-1, 64, 3));
    }

    #[test]
    fn distance_to_block_corner() {
        let agent = Location::new(0.0, 64.0, 0.0);
        let ore = BlockPos::new(3, 64, 0);
        assert!((agent.distance(&ore.corner()) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn step_along_bearing() {
        let start = Location::new(0.0, 64.0, 0.0);
        let east = start.step_along(0.0, 1.0);
        assert!((east.x - 1.0).abs() < 1e-9 && east.z.abs() < 1e-9);
        let south = start.step_along(std::f64::consts::FRAC_PI_2, 2.0);
        assert!(south.x.abs() < 1e-9 && (south.z - 2.0).abs() < 1e-9);
    }

    #[test]
    fn yaw_follows_game_convention() {
        // +z is yaw 0, -x is yaw 90.
        assert!(Location::yaw_for_bearing(std::f64::consts::FRAC_PI_2).abs() < 1e-4);
        assert!((Location::yaw_for_bearing(std::f64::consts::PI) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn columns_are_sixteen_wide() {
        assert_eq!(BlockPos::new(15, 0, 0).column(), (0, 0));
        assert_eq!(BlockPos::new(16, 0, -1).column(), (1, -1));
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, SimClock, Tick};

    #[test]
    fn advance_is_fixed_step() {
        let mut clock = SimClock::new(50);
        assert_eq!(clock.now_ms(), 0);
        for _ in 0..20 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(20));
        assert_eq!(clock.now_ms(), 1000);
    }

    #[test]
    fn ticks_for_ms_rounds_up() {
        let clock = SimClock::new(50);
        assert_eq!(clock.ticks_for_ms(1000), 20);
        assert_eq!(clock.ticks_for_ms(1001), 21);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(3).since(Tick(5)), 0);
        assert_eq!(Tick(5).since(Tick(3)), 2);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn agent_rng_is_reproducible() {
        let mut a = AgentRng::new(42, AgentId(3));
        let mut b = AgentRng::new(42, AgentId(3));
        for _ in 0..10 {
            assert_eq!(a.gen_range(0..1000), b.gen_range(0..1000));
        }
    }

    #[test]
    fn agents_get_distinct_streams() {
        let mut a = AgentRng::new(42, AgentId(0));
        let mut b = AgentRng::new(42, AgentId(1));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..u32::MAX)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn choose_handles_empty_slices() {
        let mut rng = AgentRng::new(7, AgentId(0));
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}

#[cfg(test)]
mod material {
    use crate::{Material, MaterialCategory};

    #[test]
    fn drops_follow_table() {
        assert_eq!(Material::DiamondOre.drop(), Material::Diamond);
        assert_eq!(Material::IronOre.drop(), Material::RawIron);
        assert_eq!(Material::GoldOre.drop(), Material::RawGold);
        assert_eq!(Material::CoalOre.drop(), Material::Coal);
        assert_eq!(Material::Stone.drop(), Material::Cobblestone);
        assert_eq!(Material::GrassBlock.drop(), Material::Dirt);
        assert_eq!(Material::OakLog.drop(), Material::OakLog);
    }

    #[test]
    fn bedrock_and_furniture_are_not_minable() {
        assert!(!Material::Bedrock.is_minable());
        assert!(!Material::Chest.is_minable());
        assert!(!Material::CraftingTable.is_minable());
        assert!(!Material::Water.is_minable());
        assert!(!Material::Air.is_minable());
        assert!(Material::Stone.is_minable());
        assert!(Material::DiamondOre.is_minable());
    }

    #[test]
    fn solidity() {
        assert!(Material::Stone.is_solid());
        assert!(Material::Bedrock.is_solid());
        assert!(!Material::Air.is_solid());
        assert!(!Material::Lava.is_solid());
        assert!(!Material::TallGrass.is_solid());
        assert!(!Material::Diamond.is_solid());
    }

    #[test]
    fn items_are_not_blocks() {
        assert!(Material::EnchantingTable.is_block());
        assert!(!Material::Coal.is_block());
        assert_eq!(Material::Bread.category(), MaterialCategory::Item);
        assert!(Material::Bread.food_value().is_some());
        assert!(Material::GoldenApple.heal_amount().is_some());
    }

    #[test]
    fn categories() {
        assert_eq!(Material::Sand.category(), MaterialCategory::Soil);
        assert_eq!(Material::Cobblestone.category(), MaterialCategory::Stone);
        assert_eq!(Material::IronOre.category(), MaterialCategory::Ore);
        assert_eq!(Material::DiamondOre.category(), MaterialCategory::Gem);
        assert_eq!(Material::BirchLog.category(), MaterialCategory::Log);
        assert_eq!(Material::Obsidian.category(), MaterialCategory::Obsidian);
        assert_eq!(Material::Water.category(), MaterialCategory::NonSolid);
    }

    #[test]
    fn names_parse_back() {
        for m in Material::ALL {
            assert_eq!(m.name().parse::<Material>().unwrap(), *m);
        }
        assert_eq!("DIAMOND_ORE".parse::<Material>().unwrap(), Material::DiamondOre);
        assert!("unobtainium".parse::<Material>().is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{Config, CoreError, Material};

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.agents.max_agents, 10);
        assert_eq!(config.scheduler.arbitration_interval_ms, 1000);
        assert_eq!(config.survival.priority, 100);
        assert_eq!(config.gathering.priority, 80);
        assert_eq!(config.building.priority, 70);
        assert_eq!(config.exploration.priority, 60);
        assert_eq!(config.gathering.reach, 4.5);
        assert_eq!(config.movement.timeout_ms, 30_000);
        assert_eq!(config.flee.step_interval_ms, 150);
        assert_eq!(config.gathering.targets[0], Material::DiamondOre);
    }

    #[test]
    fn partial_override() {
        let src = r#"
            [gathering]
            reach   = 5.0
            targets = ["iron_ore", "coal_ore"]

            [mining.overrides]
            stone = 1.5
        "#;
        let config = Config::from_toml_str(src).unwrap();
        assert_eq!(config.gathering.reach, 5.0);
        assert_eq!(config.gathering.targets, vec![Material::IronOre, Material::CoalOre]);
        assert_eq!(config.gathering.priority, 80);
        let overrides = config.mining.resolved_overrides().unwrap();
        assert_eq!(overrides, vec![(Material::Stone, 1.5)]);
    }

    #[test]
    fn unknown_mining_material_rejected() {
        let err = Config::from_toml_str("[mining.overrides]\nunobtainium = 3.0\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = Config::from_toml_str("[scheduler]\narbitration_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn unminable_target_rejected() {
        let err = Config::from_toml_str("[gathering]\ntargets = [\"bedrock\"]\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn negative_radius_rejected() {
        for src in [
            "[exploration]\nradius = -1\n",
            "[gathering]\nsearch_radius = -4\n",
            "[gathering]\nheight_tolerance = -1\n",
            "[building]\ngather_radius = -8\n",
        ] {
            let err = Config::from_toml_str(src).unwrap_err();
            assert!(matches!(err, CoreError::Config(_)), "{src}");
        }
        assert!(Config::from_toml_str("[exploration]\nradius = 0\n").is_ok());
    }

    #[test]
    fn reach_shorter_than_arrival_radius_rejected() {
        let mut config = Config::default();
        config.gathering.reach = 1.5;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.movement.arrival_radius = 1.5;
        config.validate().unwrap();
    }

    #[test]
    fn malformed_toml_is_toml_error() {
        let err = Config::from_toml_str("[agents\nmax_agents = 3").unwrap_err();
        assert!(matches!(err, CoreError::Toml(_)));
    }
}

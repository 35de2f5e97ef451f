//! Unit tests for va-world.

#[cfg(test)]
mod voxel_tests {
    use va_core::{BlockPos, Material};

    use crate::{WorldError, WorldView, VoxelWorld};

    #[test]
    fn flat_layers() {
        let world = VoxelWorld::flat(64);
        assert_eq!(world.block_at(BlockPos::new(0, 65, 0)), Material::Air);
        assert_eq!(world.block_at(BlockPos::new(0, 64, 0)), Material::GrassBlock);
        assert_eq!(world.block_at(BlockPos::new(0, 62, 0)), Material::Dirt);
        assert_eq!(world.block_at(BlockPos::new(0, 40, 0)), Material::Stone);
        assert_eq!(world.block_at(BlockPos::new(0, -64, 0)), Material::Bedrock);
    }

    #[test]
    fn outside_height_range_reads_air_or_bedrock() {
        let world = VoxelWorld::flat(64);
        assert_eq!(world.block_at(BlockPos::new(0, 400, 0)), Material::Air);
        assert_eq!(world.block_at(BlockPos::new(0, -100, 0)), Material::Bedrock);
    }

    #[test]
    fn edits_override_terrain() {
        let mut world = VoxelWorld::flat(64);
        let pos = BlockPos::new(3, 64, 0);
        world.set_block(pos, Material::IronOre).unwrap();
        assert_eq!(world.block_at(pos), Material::IronOre);
        world.set_block(pos, Material::Air).unwrap();
        assert_eq!(world.block_at(pos), Material::Air);
        assert_eq!(world.edit_count(), 1);
    }

    #[test]
    fn set_out_of_bounds_fails() {
        let mut world = VoxelWorld::flat(64);
        let err = world.set_block(BlockPos::new(0, 320, 0), Material::Stone).unwrap_err();
        assert!(matches!(err, WorldError::OutOfBounds(_)));
    }

    #[test]
    fn items_cannot_be_placed() {
        let mut world = VoxelWorld::flat(64);
        let err = world.set_block(BlockPos::new(0, 65, 0), Material::Diamond).unwrap_err();
        assert!(matches!(err, WorldError::NotABlock(Material::Diamond)));
    }

    #[test]
    fn highest_block_tracks_edits() {
        let mut world = VoxelWorld::flat(64);
        assert_eq!(world.highest_block_y(5, 5), 64);
        world.set_block(BlockPos::new(5, 70, 5), Material::Cobblestone).unwrap();
        assert_eq!(world.highest_block_y(5, 5), 70);
        world.set_block(BlockPos::new(5, 70, 5), Material::Air).unwrap();
        assert_eq!(world.highest_block_y(5, 5), 64);
        world.fill(BlockPos::new(5, 62, 5), BlockPos::new(5, 64, 5), Material::Air).unwrap();
        assert_eq!(world.highest_block_y(5, 5), 61);
    }

    #[test]
    fn empty_world_has_only_bedrock_floor() {
        let world = VoxelWorld::empty();
        assert_eq!(world.highest_block_y(0, 0), world.min_height());
        assert_eq!(world.block_at(BlockPos::new(0, 0, 0)), Material::Air);
    }
}

#[cfg(test)]
mod hostile_tests {
    use va_core::{AgentId, HostileId, Location};

    use crate::{Hostile, HostileIndex, HostileKind, WorldError};

    fn zombie(id: u32, x: f64, target: Option<AgentId>) -> Hostile {
        Hostile {
            id:       HostileId(id),
            kind:     HostileKind::Zombie,
            position: Location::new(x, 64.0, 0.0),
            target,
            health:   20.0,
        }
    }

    #[test]
    fn nearest_targeting_ignores_other_targets() {
        let me = AgentId(0);
        let mut index = HostileIndex::new();
        index.insert(zombie(1, 2.0, Some(AgentId(1))));
        index.insert(zombie(2, 6.0, Some(me)));
        index.insert(zombie(3, 4.0, None));
        let here = Location::new(0.0, 64.0, 0.0);
        let found = index.nearest_targeting(me, &here, 16.0).unwrap();
        assert_eq!(found.id, HostileId(2));
    }

    #[test]
    fn radius_is_respected() {
        let me = AgentId(0);
        let mut index = HostileIndex::new();
        index.insert(zombie(1, 20.0, Some(me)));
        let here = Location::new(0.0, 64.0, 0.0);
        assert!(index.nearest_targeting(me, &here, 16.0).is_none());
        index.move_to(HostileId(1), Location::new(10.0, 64.0, 0.0)).unwrap();
        assert!(index.nearest_targeting(me, &here, 16.0).is_some());
    }

    #[test]
    fn equal_distance_breaks_by_id() {
        let me = AgentId(0);
        let mut index = HostileIndex::new();
        index.insert(zombie(9, 3.0, Some(me)));
        index.insert(zombie(4, -3.0, Some(me)));
        let here = Location::new(0.0, 64.0, 0.0);
        assert_eq!(index.nearest_targeting(me, &here, 16.0).unwrap().id, HostileId(4));
    }

    #[test]
    fn damage_kills_and_removes() {
        let mut index = HostileIndex::new();
        index.insert(zombie(1, 2.0, None));
        assert!(!index.damage(HostileId(1), 19.0).unwrap());
        assert!(index.damage(HostileId(1), 1.0).unwrap());
        assert!(index.is_empty());
        assert!(matches!(
            index.damage(HostileId(1), 1.0),
            Err(WorldError::HostileNotFound(_))
        ));
    }

    #[test]
    fn reinsert_replaces() {
        let mut index = HostileIndex::new();
        index.insert(zombie(1, 2.0, None));
        index.insert(zombie(1, 8.0, None));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(HostileId(1)).unwrap().position.x, 8.0);
    }

    #[test]
    fn clear_target_forgets_agent() {
        let me = AgentId(3);
        let mut index = HostileIndex::new();
        index.insert(zombie(1, 2.0, Some(me)));
        index.clear_target(me);
        let here = Location::new(0.0, 64.0, 0.0);
        assert!(index.nearest_targeting(me, &here, 16.0).is_none());
    }
}

use proptest::prelude::*;
use worldgen::{
    BacktrackPolicy, Direction, GenerationError, GeneratorConfig, WorldMapGenerator, validate,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]
    #[test]
    fn generated_maps_are_connected_sparse_graphs(
        seed in any::<u64>(),
        rooms in 1_i64..=200,
        exhausted in any::<bool>()
    ) {
        let backtrack =
            if exhausted { BacktrackPolicy::Exhausted } else { BacktrackPolicy::Reroll };
        let config = GeneratorConfig { backtrack, ..Default::default() };

        match WorldMapGenerator::seeded_with_config(seed, config).generate(rooms) {
            Ok(map) => {
                prop_assert_eq!(map.len(), rooms as usize);
                prop_assert_eq!(validate(&map), Ok(()), "seed={} rooms={}", seed, rooms);
                // Every room is a node of a tree-like graph with at most 4 links.
                let links: usize = map.rooms().map(|(_, room)| room.degree()).sum();
                prop_assert!(links % 2 == 0);
                prop_assert!(links / 2 >= map.len() - 1);
            }
            Err(GenerationError::GenerationStalled { placed, target }) => {
                prop_assert_eq!(target, rooms as usize);
                prop_assert!(placed >= 1 && placed < target);
            }
            Err(err) => prop_assert!(false, "unexpected error {}", err),
        }
    }

    #[test]
    fn non_positive_counts_never_generate(seed in any::<u64>(), rooms in i64::MIN..=0) {
        let result = WorldMapGenerator::seeded(seed).generate(rooms);
        let is_invalid = matches!(result, Err(GenerationError::InvalidArgument { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn every_link_has_a_matching_back_link(seed in any::<u64>(), rooms in 2_i64..=120) {
        if let Ok(map) = WorldMapGenerator::seeded(seed).generate(rooms) {
            for (id, room) in map.rooms() {
                for direction in Direction::ALL {
                    if let Some(neighbor) = room.neighbor(direction) {
                        let back = map
                            .room(neighbor)
                            .and_then(|other| other.neighbor(direction.opposite()));
                        prop_assert_eq!(
                            back,
                            Some(id),
                            "{:?} link from {:?}",
                            direction,
                            room.pos()
                        );
                    }
                }
            }
        }
    }
}

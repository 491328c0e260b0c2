//! Entry point tying expansion and normalization to an injected random source.

use log::debug;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::{GeneratorConfig, MAX_ROOMS_CEILING};
use crate::error::{GenerationError, Result};

use super::frontier::expand;
use super::grid::grid_side;
use super::model::WorldMap;
use super::normalize::normalize;
use super::placement::flip_coin;

pub struct WorldMapGenerator<R> {
    rng: R,
    config: GeneratorConfig,
}

impl WorldMapGenerator<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::seeded_with_config(seed, GeneratorConfig::default())
    }

    pub fn seeded_with_config(seed: u64, config: GeneratorConfig) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> WorldMapGenerator<R> {
    pub fn new(rng: R, config: GeneratorConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a connected map of exactly `rooms_count` rooms.
    ///
    /// Fails with [`GenerationError::InvalidArgument`] before doing any work when the count is
    /// below 1 or above `max_rooms`, and with [`GenerationError::GenerationStalled`] when growth
    /// runs out of options.
    pub fn generate(&mut self, rooms_count: i64) -> Result<WorldMap> {
        let target = self.target_rooms(rooms_count)?;
        let rng = &mut self.rng;
        let expansion = expand(target, &self.config, || flip_coin(rng))?;
        let (grid_width, grid_height) = (expansion.grid.width(), expansion.grid.height());
        let map = normalize(expansion.rooms, expansion.order);
        debug!(
            "normalized {} rooms from a {grid_width}x{grid_height} grid into {}x{}",
            map.len(),
            map.width(),
            map.height()
        );
        Ok(map)
    }

    fn target_rooms(&self, rooms_count: i64) -> Result<usize> {
        if rooms_count < 1 {
            return Err(GenerationError::InvalidArgument {
                requested: rooms_count,
                reason: "at least one room is required",
            });
        }
        let limit = self.config.max_rooms.min(MAX_ROOMS_CEILING);
        match usize::try_from(rooms_count) {
            Ok(target) if target <= limit && grid_side(target).is_some() => Ok(target),
            _ => Err(GenerationError::InvalidArgument {
                requested: rooms_count,
                reason: "more rooms than max_rooms allows",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    #[test]
    fn rejects_non_positive_counts() {
        for count in [0, -1, -5, i64::MIN] {
            let err = WorldMapGenerator::seeded(1).generate(count).unwrap_err();
            assert!(
                matches!(
                    err,
                    GenerationError::InvalidArgument { requested, .. } if requested == count
                ),
                "count={count} gave {err:?}"
            );
        }
    }

    #[test]
    fn rejects_counts_above_the_configured_limit() {
        let config = GeneratorConfig { max_rooms: 10, ..Default::default() };
        let mut generator = WorldMapGenerator::seeded_with_config(1, config);
        assert!(matches!(
            generator.generate(11),
            Err(GenerationError::InvalidArgument { requested: 11, .. })
        ));
        assert!(matches!(
            generator.generate(i64::MAX),
            Err(GenerationError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn oversized_limits_fail_as_invalid_argument_instead_of_panicking() {
        let config = GeneratorConfig { max_rooms: usize::MAX, ..Default::default() };
        let mut generator = WorldMapGenerator::seeded_with_config(1, config);
        for count in [i64::MAX, 200_000, MAX_ROOMS_CEILING as i64 + 1] {
            assert!(
                matches!(
                    generator.generate(count),
                    Err(GenerationError::InvalidArgument { requested, .. }) if requested == count
                ),
                "count={count} should be rejected up front"
            );
        }
    }

    #[test]
    fn single_room_map_is_three_by_three() {
        let map = WorldMapGenerator::seeded(5).generate(1).unwrap();
        assert_eq!((map.width(), map.height(), map.len()), (3, 3, 1));
        let (_, room) = map.rooms().next().unwrap();
        assert_eq!(room.pos(), Pos::new(1, 1));
        assert_eq!(room.degree(), 0);
    }

    #[test]
    fn invalid_argument_consumes_no_randomness() {
        let mut generator = WorldMapGenerator::seeded(31);
        let _ = generator.generate(0);
        let fingerprint = |map: WorldMap| map.fingerprint();
        let after_failure = generator.generate(12).map(fingerprint);
        let fresh = WorldMapGenerator::seeded(31).generate(12).map(fingerprint);
        assert_eq!(after_failure, fresh);
    }

    #[test]
    fn consecutive_calls_advance_the_random_stream() {
        let mut generator = WorldMapGenerator::seeded(8);
        let first = generator.generate(25).map(|map| map.canonical_bytes());
        let second = generator.generate(25).map(|map| map.canonical_bytes());
        let mut replay = WorldMapGenerator::seeded(8);
        assert_eq!(first, replay.generate(25).map(|map| map.canonical_bytes()));
        assert_eq!(second, replay.generate(25).map(|map| map.canonical_bytes()));
    }
}

//! Procedural room-graph generation split into coherent submodules.

pub mod direction;
pub mod model;
pub mod validate;

mod frontier;
mod generator;
pub(crate) mod grid;
mod linker;
mod normalize;
mod placement;
mod seed;

use log::info;

use crate::config::GeneratorConfig;
use crate::error::Result;

use seed::attempt_seed;

pub use direction::Direction;
pub use generator::WorldMapGenerator;
pub use model::{MapDocument, Room, RoomRecord, WorldMap};
pub use validate::{InvariantViolation, validate};

/// Generates a map from a fresh ChaCha stream seeded with `seed`.
pub fn generate_world(rooms_count: i64, seed: u64) -> Result<WorldMap> {
    WorldMapGenerator::seeded(seed).generate(rooms_count)
}

/// A map together with the seed that produced it.
#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    pub seed: u64,
    pub attempt: u32,
    pub map: WorldMap,
}

/// Regenerates with a derived seed after each stall, up to `attempts` tries.
///
/// Invalid arguments fail on the first try. When every attempt stalls, the last stall is
/// returned.
pub fn generate_with_retries(
    rooms_count: i64,
    seed: u64,
    attempts: u32,
    config: &GeneratorConfig,
) -> Result<GeneratedWorld> {
    let mut attempt = 0;
    loop {
        let current_seed = attempt_seed(seed, attempt);
        let mut generator = WorldMapGenerator::seeded_with_config(current_seed, config.clone());
        let outcome = generator.generate(rooms_count);
        match outcome {
            Ok(map) => return Ok(GeneratedWorld { seed: current_seed, attempt, map }),
            Err(err) if err.is_stalled() && attempt + 1 < attempts => {
                info!("attempt {attempt} with seed {current_seed} failed: {err}; retrying");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

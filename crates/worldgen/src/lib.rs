pub mod config;
pub mod error;
pub mod mapgen;
pub mod types;

pub use config::{BacktrackPolicy, GeneratorConfig, MAX_ROOMS_CEILING};
pub use error::{ConfigError, GenerationError, Result};
pub use mapgen::{
    Direction, GeneratedWorld, InvariantViolation, MapDocument, Room, RoomRecord, WorldMap,
    WorldMapGenerator, generate_with_retries, generate_world, validate,
};
pub use types::{Pos, RoomId};

use std::io;
use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, GenerationError>;

/// Failures surfaced by world generation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid rooms count {requested}: {reason}")]
    InvalidArgument { requested: i64, reason: &'static str },
    #[error("generation stalled after placing {placed} of {target} rooms")]
    GenerationStalled { placed: usize, target: usize },
}

impl GenerationError {
    pub fn is_stalled(&self) -> bool {
        matches!(self, Self::GenerationStalled { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read generator config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse generator config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid generator config: {0}")]
    Invalid(String),
}

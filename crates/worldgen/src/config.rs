//! Generator tuning loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapgen::grid::grid_side;

/// Largest `max_rooms` accepted. The occupancy grid holds `(2k+1)²` cells, about 268 MB here.
pub const MAX_ROOMS_CEILING: usize = 8_192;

/// What happens when the frontier drains and a dead end is pulled back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktrackPolicy {
    /// Directions that lost a coin flip are rolled again. Dead ends stay queued while any
    /// direction is still placeable.
    #[default]
    Reroll,
    /// Dead ends never reopen; the stalled queue only delays the stall report.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub backtrack: BacktrackPolicy,
    /// A candidate cell with at least this many occupied neighbors is rejected.
    pub density_limit: u8,
    /// Largest accepted room count, capped by [`MAX_ROOMS_CEILING`].
    pub max_rooms: usize,
    /// Frontier pops allowed per requested room before giving up.
    pub step_budget_per_room: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backtrack: BacktrackPolicy::Reroll,
            density_limit: 2,
            max_rooms: 4_096,
            step_budget_per_room: 64,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // A limit of 1 rejects every cell, since the parent is always a neighbor.
        if !(2..=4).contains(&self.density_limit) {
            return Err(ConfigError::Invalid(format!(
                "density_limit must be between 2 and 4, got {}",
                self.density_limit
            )));
        }
        if self.max_rooms == 0 {
            return Err(ConfigError::Invalid("max_rooms must be at least 1".to_string()));
        }
        if self.max_rooms > MAX_ROOMS_CEILING || grid_side(self.max_rooms).is_none() {
            return Err(ConfigError::Invalid(format!(
                "max_rooms must be at most {MAX_ROOMS_CEILING}, got {}",
                self.max_rooms
            )));
        }
        if self.step_budget_per_room == 0 {
            return Err(ConfigError::Invalid("step_budget_per_room must be at least 1".to_string()));
        }
        Ok(())
    }

    pub(crate) fn step_budget(&self, target: usize) -> usize {
        target.saturating_mul(self.step_budget_per_room as usize)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GeneratorConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let raw = r#"
            backtrack = "exhausted"
            density_limit = 3
            max_rooms = 100
            step_budget_per_room = 8
        "#;
        let config = GeneratorConfig::from_toml_str(raw).expect("config should parse");
        assert_eq!(config.backtrack, BacktrackPolicy::Exhausted);
        assert_eq!(config.density_limit, 3);
        assert_eq!(config.max_rooms, 100);
        assert_eq!(config.step_budget(10), 80);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = GeneratorConfig::from_toml_str("seed = 4").expect_err("unknown key should fail");
        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err}");
    }

    #[test]
    fn rejects_density_limit_that_blocks_all_growth() {
        let err = GeneratorConfig::from_toml_str("density_limit = 1")
            .expect_err("density_limit 1 should be rejected");
        assert!(err.to_string().contains("density_limit"), "error should name the field: {err}");
    }

    #[test]
    fn rejects_max_rooms_beyond_the_grid_ceiling() {
        let at_ceiling = GeneratorConfig { max_rooms: MAX_ROOMS_CEILING, ..Default::default() };
        assert!(at_ceiling.validate().is_ok());

        for max_rooms in [MAX_ROOMS_CEILING + 1, 200_000, usize::MAX] {
            let config = GeneratorConfig { max_rooms, ..Default::default() };
            let err = config.validate().expect_err("oversized limit should be rejected");
            assert!(err.to_string().contains("max_rooms"), "error should name the field: {err}");
        }

        let err = GeneratorConfig::from_toml_str("max_rooms = 200000")
            .expect_err("oversized limit in a file should be rejected");
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err}");
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "backtrack = \"reroll\"\nmax_rooms = 12").expect("write config");

        let config = GeneratorConfig::load(file.path()).expect("config file should load");
        assert_eq!(config.max_rooms, 12);
        assert_eq!(config.density_limit, 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = GeneratorConfig::load(&dir.path().join("absent.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

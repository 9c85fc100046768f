use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SnakeError;

/// Smallest side length that fits the border plus the starting snake,
/// whose head sits at `world_size / 2` with three segments below it
pub const MIN_WORLD_SIZE: usize = 9;

/// Largest side length accepted by `validate`
pub const MAX_WORLD_SIZE: usize = 1024;

/// Render mode hint, only meaningful to an external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Human,
    RgbArray,
}

/// Configuration for a snake world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid, border included
    pub world_size: usize,
    /// Frame-rate hint for a renderer, ignored by the simulation
    pub render_fps: u32,
    /// Render mode hint, ignored by the simulation
    pub render_mode: Option<RenderMode>,
    /// Seed for food placement, drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: 30,
            render_fps: 4,
            render_mode: None,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(world_size: usize) -> Self {
        Self {
            world_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(50)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.world_size * self.world_size
    }

    /// Number of plain moves without food before a score penalty
    pub fn stall_limit(&self) -> usize {
        4 * self.world_size
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), SnakeError> {
        if self.world_size < MIN_WORLD_SIZE {
            return Err(SnakeError::WorldTooSmall {
                size: self.world_size,
                min: MIN_WORLD_SIZE,
            });
        }

        if self.world_size > MAX_WORLD_SIZE {
            return Err(SnakeError::WorldTooLarge {
                size: self.world_size,
                max: MAX_WORLD_SIZE,
            });
        }

        if self.render_fps == 0 {
            return Err(SnakeError::InvalidConfig(
                "render_fps must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: WorldConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.world_size, 30);
        assert_eq!(config.render_fps, 4);
        assert_eq!(config.render_mode, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = WorldConfig::new(15).with_seed(3);
        assert_eq!(config.world_size, 15);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.cell_count(), 225);
        assert_eq!(config.stall_limit(), 60);
    }

    #[test]
    fn test_validate_rejects_small_world() {
        assert_eq!(
            WorldConfig::new(8).validate(),
            Err(SnakeError::WorldTooSmall { size: 8, min: 9 })
        );
        assert!(WorldConfig::new(MIN_WORLD_SIZE).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_huge_world() {
        assert!(WorldConfig::new(MAX_WORLD_SIZE).validate().is_ok());
        assert_eq!(
            WorldConfig::new(MAX_WORLD_SIZE + 1).validate(),
            Err(SnakeError::WorldTooLarge {
                size: 1025,
                max: 1024
            })
        );
        assert!(matches!(
            WorldConfig::new(usize::MAX).validate(),
            Err(SnakeError::WorldTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let config = WorldConfig {
            render_fps: 0,
            ..WorldConfig::small()
        };
        assert!(matches!(
            config.validate(),
            Err(SnakeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"world_size": 12, "render_mode": "rgb_array"}}"#).unwrap();

        let config = WorldConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.world_size, 12);
        assert_eq!(config.render_mode, Some(RenderMode::RgbArray));
        assert_eq!(config.render_fps, 4);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_load_rejects_invalid_world() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"world_size": 4}}"#).unwrap();

        let err = WorldConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = WorldConfig::from_json_file(&dir.path().join("missing.json"));
        assert!(result.is_err());
    }
}

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid columns
    pub grid_cols: u32,
    /// Number of grid rows
    pub grid_rows: u32,
    /// Edge length of one cell on a pixel surface
    pub block_size_px: u32,
    /// Logic ticks per second
    pub ticks_per_second: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Open on the instructions screen instead of straight into play
    pub show_instructions: bool,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_cols: 32,
            grid_rows: 24,
            block_size_px: 20,
            ticks_per_second: 10,
            initial_snake_length: 3,
            show_instructions: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            grid_cols: cols,
            grid_rows: rows,
            ..Default::default()
        }
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml_ng::from_str(content).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_cols > 0 && self.grid_rows > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_cols,
            self.grid_rows
        );
        ensure!(self.block_size_px > 0, "block size must be positive");
        ensure!(self.ticks_per_second > 0, "tick rate must be positive");
        ensure!(
            self.initial_snake_length > 0,
            "initial snake length must be positive"
        );
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_cols, self.grid_rows)
    }

    /// Time between logic ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

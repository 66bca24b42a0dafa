//! Configuration loading for MargaNav

use crate::core::WallSide;
use crate::error::{NavError, Result};
use crate::search::SearchStrategy;
use serde::Deserialize;
use std::path::Path;

/// Navigator configuration
#[derive(Clone, Debug, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub search: SearchConfig,

    /// Cycles without a new best distance before local search is skipped (default: 3)
    #[serde(default = "default_stagnation_threshold")]
    pub stagnation_threshold: u32,

    /// Allow filling fillable cells to clear a path (default: true)
    #[serde(default = "default_allow_fill")]
    pub allow_fill: bool,

    /// Side the wall follower keeps a new obstacle on (default: right)
    #[serde(default)]
    pub default_wall_side: WallSide,
}

/// Local search settings
#[derive(Clone, Debug, Deserialize)]
pub struct SearchConfig {
    /// Strategy: "greedy_neighbor" or "frontier_relaxation" (default: greedy)
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// Squared radius of the searched neighborhood (default: 20)
    #[serde(default = "default_sensing_radius_squared")]
    pub sensing_radius_squared: i32,

    /// Base cost of routing through a fillable cell (default: 2)
    #[serde(default = "default_fill_cost_base")]
    pub fill_cost_base: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            sensing_radius_squared: default_sensing_radius_squared(),
            fill_cost_base: default_fill_cost_base(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            stagnation_threshold: default_stagnation_threshold(),
            allow_fill: default_allow_fill(),
            default_wall_side: WallSide::default(),
        }
    }
}

// Default value functions
fn default_stagnation_threshold() -> u32 {
    3
}
fn default_allow_fill() -> bool {
    true
}
fn default_sensing_radius_squared() -> i32 {
    20
}
fn default_fill_cost_base() -> i32 {
    2
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the navigator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.search.sensing_radius_squared < 2 {
            return Err(NavError::Config(format!(
                "sensing_radius_squared must be at least 2 (got {})",
                self.search.sensing_radius_squared
            )));
        }
        if self.stagnation_threshold < 1 {
            return Err(NavError::Config(
                "stagnation_threshold must be at least 1".to_string(),
            ));
        }
        if self.search.fill_cost_base < 1 {
            return Err(NavError::Config(format!(
                "fill_cost_base must be at least 1 (got {})",
                self.search.fill_cost_base
            )));
        }
        Ok(())
    }
}

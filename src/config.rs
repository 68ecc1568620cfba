//! Configuration for the terrarium simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub food: FoodConfig,
    pub logging: LoggingConfig,
}

/// World bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in simulation units
    pub width: f32,
    /// World height in simulation units
    pub height: f32,
}

/// Population limits and initial composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Hard cap on the entity collection. Spawn, reproduction and plant
    /// growth all silently no-op past this.
    pub max_entities: usize,
    /// Herbivores spawned at initialization
    pub initial_herbivores: usize,
    /// Carnivores spawned at initialization
    pub initial_carnivores: usize,
    /// Plants spawned at initialization
    pub initial_plants: usize,
}

/// Food pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodConfig {
    /// Food items scattered at initialization
    pub initial_items: usize,
    /// Hard cap on the food pool
    pub max_items: usize,
}

/// Logging and telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            food: FoodConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_entities: 150,
            initial_herbivores: 20,
            initial_carnivores: 5,
            initial_plants: 15,
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            initial_items: 20,
            max_items: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.world.width.is_finite() || !self.world.height.is_finite() {
            return Err("world dimensions must be finite".to_string());
        }
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return Err("world dimensions must be positive".to_string());
        }
        if self.population.max_entities == 0 {
            return Err("max_entities must be > 0".to_string());
        }
        let initial = self.population.initial_herbivores
            + self.population.initial_carnivores
            + self.population.initial_plants;
        if initial > self.population.max_entities {
            return Err("initial population cannot exceed max_entities".to_string());
        }
        if self.food.initial_items > self.food.max_items {
            return Err("initial_items cannot exceed max_items".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}

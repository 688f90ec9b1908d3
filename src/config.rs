// Configuration module for reading Snake.toml
// Holds the snake's identity, the scoring constants and the fallback direction

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub snake: SnakeConfig,
    pub scores: ScoresConfig,
    pub fallback: FallbackConfig,
    pub debug: DebugConfig,
}

/// Identity and appearance reported to the arena
#[derive(Debug, Deserialize, Clone)]
pub struct SnakeConfig {
    /// Id used to find our snake when the arena does not send `you`
    pub id: String,
    pub name: String,
    pub color: String,
    pub head_url: String,
    pub taunt_state: String,
    pub taunt_start: String,
    pub taunt_move: String,
}

/// Scoring constants
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    // Policy selection
    pub hunger_threshold: i32,

    // Dead-end detection
    pub dead_end_min_empty: usize,
    pub dead_end_penalty: f64,

    // Enemy head proximity
    pub enemy_head_radius: i32,
    pub enemy_head_penalty: f64,
}

/// What to answer when no move could be chosen
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    pub default_direction: Direction,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            snake: SnakeConfig {
                id: "dc4721f2-82da-4170-b2b4-1792bdf1ba71".to_string(),
                name: "gold-snake".to_string(),
                color: "#DAA520".to_string(),
                head_url: "".to_string(),
                taunt_state: "Still digging".to_string(),
                taunt_start: "Show me the gold".to_string(),
                taunt_move: "This is not a taunt".to_string(),
            },
            scores: ScoresConfig {
                hunger_threshold: 70,
                dead_end_min_empty: 8,
                dead_end_penalty: -1000.0,
                enemy_head_radius: 3,
                enemy_head_penalty: -1000.0,
            },
            fallback: FallbackConfig {
                default_direction: Direction::North,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default()
            .unwrap_or_else(|e| {
                log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
                Self::default_hardcoded()
            })
    }
}

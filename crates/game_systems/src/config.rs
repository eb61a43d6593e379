//! Gameplay tuning.
//!
//! Every knob has a default, so a config file only needs to name what it
//! changes. Sections map one-to-one onto systems.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a [`GameplayConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gravity and ground contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Subtracted from `velocity.y` once per tick.
    pub gravity: f32,
    /// Upward velocity set by a jump.
    pub jump_impulse: f32,
    /// Height above an island floor where bodies rest.
    pub ground_offset: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.015,
            jump_impulse: 0.3,
            ground_offset: 0.5,
        }
    }
}

/// Chopping and mining.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarvestConfig {
    /// How far a swing reaches.
    pub strike_radius: f32,
    /// Seconds between swings, shared by every attacker.
    pub cooldown: f32,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            strike_radius: 3.0,
            cooldown: 0.5,
        }
    }
}

/// Creature behaviour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiConfig {
    /// Fraction of max hunger at or below which a creature seeks food.
    pub hunger_threshold: f32,
    /// Per-tick chance an idle creature starts wandering.
    pub wander_chance: f64,
    /// Per-tick chance a wandering creature stops.
    pub idle_chance: f64,
    /// Per-tick chance a wandering creature picks a new heading.
    pub redirect_chance: f64,
    /// Speed multiplier while chasing food.
    pub chase_multiplier: f32,
    /// Distance at which food gets eaten.
    pub eat_distance: f32,
    /// Hunger restored by one meal.
    pub food_value: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            hunger_threshold: 0.3,
            wander_chance: 0.01,
            idle_chance: 0.005,
            redirect_chance: 0.02,
            chase_multiplier: 1.5,
            eat_distance: 1.0,
            food_value: 30.0,
        }
    }
}

/// Golem behaviour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GolemConfig {
    /// Distance at which a golem stops and strikes.
    pub strike_radius: f32,
    /// Seconds between strikes of one golem.
    pub strike_cooldown: f64,
    /// Damage reported with each strike.
    pub strike_damage: f32,
}

impl Default for GolemConfig {
    fn default() -> Self {
        Self {
            strike_radius: 2.0,
            strike_cooldown: 1.5,
            strike_damage: 10.0,
        }
    }
}

/// Resource producers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductionConfig {
    /// Maximum horizontal offset of a spawned resource from its producer.
    pub spawn_jitter: f32,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self { spawn_jitter: 1.5 }
    }
}

/// Boat handling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoatConfig {
    /// Sea surface height.
    pub water_level: f32,
    /// Bobbing amplitude.
    pub bob_amplitude: f32,
    /// Per-tick velocity factor for unmanned or anchored boats.
    pub idle_damping: f32,
    /// Per-tick velocity factor while driven.
    pub water_drag: f32,
    /// Forward acceleration in units per second squared.
    pub thrust: f32,
    /// Collision radius against island shores.
    pub boat_radius: f32,
    /// Velocity factor applied when pushed off a shore.
    pub shore_damping: f32,
    /// How close a player must be to board.
    pub board_radius: f32,
    /// Where a player lands relative to the boat when leaving it.
    pub disembark_offset: [f32; 3],
}

impl Default for BoatConfig {
    fn default() -> Self {
        Self {
            water_level: 0.0,
            bob_amplitude: 0.1,
            idle_damping: 0.95,
            water_drag: 0.98,
            thrust: 10.0,
            boat_radius: 2.0,
            shore_damping: 0.5,
            board_radius: 3.0,
            disembark_offset: [3.0, 0.5, 0.0],
        }
    }
}

/// Item pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    /// Distance at which loose resources are collected.
    pub pickup_radius: f32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { pickup_radius: 1.5 }
    }
}

/// All gameplay tuning in one place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seed for every random stream in the simulation.
    pub seed: u64,
    pub physics: PhysicsConfig,
    pub harvest: HarvestConfig,
    pub ai: AiConfig,
    pub golem: GolemConfig,
    pub production: ProductionConfig,
    pub boat: BoatConfig,
    pub inventory: InventoryConfig,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            physics: PhysicsConfig::default(),
            harvest: HarvestConfig::default(),
            ai: AiConfig::default(),
            golem: GolemConfig::default(),
            production: ProductionConfig::default(),
            boat: BoatConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }
}

impl GameplayConfig {
    /// Override the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and
    /// [`ConfigError::Invalid`] on out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chances = [
            ("ai.wander_chance", self.ai.wander_chance),
            ("ai.idle_chance", self.ai.idle_chance),
            ("ai.redirect_chance", self.ai.redirect_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be within [0, 1]",
                });
            }
        }
        if !(0.0..=1.0).contains(&self.ai.hunger_threshold) {
            return Err(ConfigError::Invalid {
                field: "ai.hunger_threshold",
                reason: "must be within [0, 1]",
            });
        }
        if self.production.spawn_jitter < 0.0 {
            return Err(ConfigError::Invalid {
                field: "production.spawn_jitter",
                reason: "must not be negative",
            });
        }
        if self.harvest.cooldown < 0.0 {
            return Err(ConfigError::Invalid {
                field: "harvest.cooldown",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

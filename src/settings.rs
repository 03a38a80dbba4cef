//! Game configuration
//!
//! Every tunable the simulation reads lives in one immutable [`GameConfig`].
//! It is built once at startup (defaults, optionally overlaid by a JSON file)
//! and then only ever borrowed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration could not be loaded
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            Self::Parse(err) => write!(f, "malformed config: {err}"),
            Self::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub window_width: f32,
    pub window_height: f32,
    /// Simulation ticks (and rendered frames) per second
    pub tick_rate: u32,

    // === Player ===
    pub player_size: Vec2,
    pub player_speed: f32,
    pub jump_height: f32,
    pub gravity: f32,
    pub player_hitbox_inset: f32,
    pub invulnerability_ticks: i32,
    pub starting_lives: i32,

    // === Coins ===
    pub coin_size: Vec2,
    pub coin_drop_speed: f32,
    pub max_coins: usize,

    // === Monsters ===
    pub monster_size: Vec2,
    pub monster_speed: f32,
    pub monster_direction_ticks: u32,

    // === Doors ===
    pub door_size: Vec2,
    pub door_fade_step: u8,

    // === Spawn gates (seconds) ===
    pub coin_interval_secs: f32,
    pub door_interval_secs: f32,
    pub monster_delay_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            tick_rate: TICK_RATE,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,
            jump_height: JUMP_HEIGHT,
            gravity: GRAVITY,
            player_hitbox_inset: PLAYER_HITBOX_INSET,
            invulnerability_ticks: INVULNERABILITY_TICKS,
            starting_lives: STARTING_LIVES,

            coin_size: Vec2::splat(COIN_SIZE),
            coin_drop_speed: COIN_DROP_SPEED,
            max_coins: MAX_COINS,

            monster_size: Vec2::splat(MONSTER_SIZE),
            monster_speed: MONSTER_SPEED,
            monster_direction_ticks: MONSTER_DIRECTION_TICKS,

            door_size: Vec2::new(DOOR_WIDTH, DOOR_HEIGHT),
            door_fade_step: DOOR_FADE_STEP,

            coin_interval_secs: COIN_INTERVAL_SECS,
            door_interval_secs: DOOR_INTERVAL_SECS,
            monster_delay_secs: MONSTER_DELAY_SECS,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pretty JSON of the effective configuration
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(invalid("window_width/window_height", "must be positive"));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1"));
        }
        if self.monster_direction_ticks == 0 {
            return Err(invalid("monster_direction_ticks", "must be at least 1"));
        }

        let sizes = [
            ("player_size", self.player_size),
            ("coin_size", self.coin_size),
            ("monster_size", self.monster_size),
            ("door_size", self.door_size),
        ];
        for (field, size) in sizes {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(invalid(field, "must be positive"));
            }
            if size.x > self.window_width || size.y > self.window_height {
                return Err(invalid(field, format!("{size} does not fit the window")));
            }
        }

        if self.player_hitbox_inset * 2.0 >= self.player_size.x {
            return Err(invalid("player_hitbox_inset", "leaves an empty hitbox"));
        }
        let rates = [
            ("player_speed", self.player_speed),
            ("jump_height", self.jump_height),
            ("gravity", self.gravity),
            ("coin_drop_speed", self.coin_drop_speed),
            ("monster_speed", self.monster_speed),
        ];
        for (field, value) in rates {
            if !(value > 0.0) {
                return Err(invalid(field, "must be positive"));
            }
        }
        let intervals = [
            ("coin_interval_secs", self.coin_interval_secs),
            ("door_interval_secs", self.door_interval_secs),
            ("monster_delay_secs", self.monster_delay_secs),
        ];
        for (field, secs) in intervals {
            if !(secs >= 0.0) {
                return Err(invalid(field, "must be zero or positive"));
            }
        }

        Ok(())
    }

    /// Length of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }

    /// Convert a duration in seconds to whole ticks
    pub fn seconds_to_ticks(&self, secs: f32) -> u64 {
        (secs * self.tick_rate as f32).round() as u64
    }

    pub fn ticks_to_seconds(&self, ticks: u64) -> f32 {
        ticks as f32 / self.tick_rate as f32
    }

    /// Resting y for an entity of the given height
    pub fn floor_for(&self, height: f32) -> f32 {
        self.window_height - height
    }

    /// Largest x that keeps an entity of the given width on screen
    pub fn max_x_for(&self, width: f32) -> f32 {
        (self.window_width - width).max(0.0)
    }

    /// Highest point above its floor line the player can reach
    pub fn max_jump_rise(&self) -> f32 {
        let mut velocity = self.jump_height;
        let mut rise = 0.0;
        while velocity > 0.0 {
            rise += velocity;
            velocity -= self.gravity;
        }
        rise
    }
}

//! Coin Rush - collect falling coins, dodge the monsters that crawl out of doors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Draw-surface abstraction, frame composition and the terminal backend
//! - `platform`: Frame pacing and keyboard plumbing for the terminal front end
//! - `settings`: Immutable game configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, GameConfig};

/// Game configuration defaults (640x480 at 60 ticks per second)
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;

    /// Play field dimensions
    pub const WINDOW_WIDTH: f32 = 640.0;
    pub const WINDOW_HEIGHT: f32 = 480.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Initial upward speed of a jump, also the exit threshold (as a negative)
    pub const JUMP_HEIGHT: f32 = 12.0;
    /// Pulls the jump velocity down each tick; also the plain falling speed
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal hitbox trim on each side of the player
    pub const PLAYER_HITBOX_INSET: f32 = 6.0;
    pub const INVULNERABILITY_TICKS: i32 = 120;
    pub const STARTING_LIVES: i32 = 3;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 24.0;
    pub const COIN_DROP_SPEED: f32 = 2.0;
    /// Grounded coins are evicted while more than this many coins exist
    pub const MAX_COINS: usize = 5;

    /// Monster defaults (80% of the 50px sprite)
    pub const MONSTER_SIZE: f32 = 40.0;
    pub const MONSTER_SPEED: f32 = 1.0;
    pub const MONSTER_DIRECTION_TICKS: u32 = 90;

    /// Door defaults (90% of the 60x90 sprite)
    pub const DOOR_WIDTH: f32 = 54.0;
    pub const DOOR_HEIGHT: f32 = 81.0;
    pub const DOOR_FADE_STEP: u8 = 3;
    pub const DOOR_OPAQUE: u8 = 255;

    /// Spawn gates, in seconds
    pub const COIN_INTERVAL_SECS: f32 = 3.0;
    pub const DOOR_INTERVAL_SECS: f32 = 15.0;
    pub const MONSTER_DELAY_SECS: f32 = 2.0;
}

//! Game state and entity physics
//!
//! Everything a session needs to be replayed lives here: the config, the
//! seeded RNG, the tick counter and the entities.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::{Hitbox, Rect};
use crate::consts::DOOR_OPAQUE;
use crate::settings::GameConfig;

/// Slack for f32 drift in the jump arc. The velocity is a running sum of
/// gravity steps, so after a full arc it lands a few ulps off `-jump_height`.
const JUMP_EPSILON: f32 = 1e-3;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; waiting for a restart
    GameOver,
}

/// Horizontal wandering direction of a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Centre,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Centre, Direction::Right];

    /// Uniform pick among all three directions
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The player-controlled character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (units per tick)
    pub speed: f32,
    /// Held movement intents
    pub left: bool,
    pub right: bool,
    pub jumping: bool,
    /// Upward speed while jumping; reset to the jump height when a jump ends
    pub jump_velocity: f32,
    /// Ticks of damage immunity left (may go negative)
    pub invulnerable: i32,
    pub hitbox: Hitbox,
}

impl Player {
    /// A fresh player, horizontally centred and standing on the floor
    pub fn new(config: &GameConfig) -> Self {
        let size = config.player_size;
        Self {
            pos: Vec2::new(
                config.window_width / 2.0 - size.x / 2.0,
                config.floor_for(size.y),
            ),
            size,
            speed: config.player_speed,
            left: false,
            right: false,
            jumping: false,
            jump_velocity: config.jump_height,
            invulnerable: 0,
            hitbox: Hitbox::NotComputed,
        }
    }

    pub fn floor(&self, config: &GameConfig) -> f32 {
        config.floor_for(self.size.y)
    }

    /// Exactly on the floor line
    pub fn on_ground(&self, config: &GameConfig) -> bool {
        self.pos.y == self.floor(config)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Start a jump if standing on the floor. Returns whether it started.
    pub fn try_jump(&mut self, config: &GameConfig) -> bool {
        if self.on_ground(config) {
            self.jumping = true;
            true
        } else {
            false
        }
    }

    /// Advance one tick of movement and jump/fall physics
    pub fn update(&mut self, config: &GameConfig) {
        // Left then right, each clamped on its own
        let max_x = config.max_x_for(self.size.x);
        if self.left {
            self.pos.x = (self.pos.x - self.speed).clamp(0.0, max_x);
        }
        if self.right {
            self.pos.x = (self.pos.x + self.speed).clamp(0.0, max_x);
        }

        if self.jumping {
            self.pos.y -= self.jump_velocity;
            self.jump_velocity -= config.gravity;
            if self.jump_velocity < -config.jump_height - JUMP_EPSILON {
                self.jumping = false;
                self.jump_velocity = config.jump_height;
                // A symmetric arc ends back on the floor line
                let floor = self.floor(config);
                if (self.pos.y - floor).abs() < JUMP_EPSILON {
                    self.pos.y = floor;
                }
            }
        } else {
            self.pos.y += config.gravity;
        }
        self.pos.y = self.pos.y.min(self.floor(config));

        let inset = config.player_hitbox_inset;
        self.hitbox = Hitbox::Rect(self.bounds().inset(inset, 0.0, inset, 0.0));
    }
}

/// A falling coin
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub drop_speed: f32,
    pub hitbox: Hitbox,
}

impl Coin {
    /// A coin at the top of the field; `x` is clamped on screen
    pub fn new(x: f32, config: &GameConfig) -> Self {
        let size = config.coin_size;
        Self {
            pos: Vec2::new(x.clamp(0.0, config.max_x_for(size.x)), 0.0),
            size,
            drop_speed: config.coin_drop_speed,
            hitbox: Hitbox::NotComputed,
        }
    }

    pub fn on_ground(&self, config: &GameConfig) -> bool {
        self.pos.y == config.floor_for(self.size.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self, config: &GameConfig) {
        self.pos.y = (self.pos.y + self.drop_speed).min(config.floor_for(self.size.y));
        self.hitbox = Hitbox::Rect(self.bounds());
    }
}

/// A monster wandering along the floor
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub direction: Direction,
    /// Ticks until the next direction roll; a roll happens when this is 0
    pub direction_ticks: u32,
    pub hitbox: Hitbox,
}

impl Monster {
    pub fn new(x: f32, config: &GameConfig) -> Self {
        let size = config.monster_size;
        Self {
            pos: Vec2::new(
                x.clamp(0.0, config.max_x_for(size.x)),
                config.floor_for(size.y),
            ),
            size,
            speed: config.monster_speed,
            direction: Direction::Centre,
            direction_ticks: 0,
            hitbox: Hitbox::NotComputed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Advance one tick. Returns true when a new direction was rolled.
    pub fn update(&mut self, config: &GameConfig, rng: &mut impl Rng) -> bool {
        let rolled = self.direction_ticks == 0;
        if rolled {
            self.direction = Direction::random(rng);
            self.direction_ticks = config.monster_direction_ticks;
        }

        let max_x = config.max_x_for(self.size.x);
        match self.direction {
            Direction::Left => self.pos.x = (self.pos.x - self.speed).clamp(0.0, max_x),
            Direction::Right => self.pos.x = (self.pos.x + self.speed).clamp(0.0, max_x),
            Direction::Centre => {}
        }
        self.direction_ticks = self.direction_ticks.saturating_sub(1);

        self.hitbox = Hitbox::Rect(self.bounds().inset(4.0, 4.0, 1.0, 0.0));
        rolled
    }
}

/// The doorway monsters crawl out of
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub pos: Vec2,
    pub size: Vec2,
    /// Fade level, 255 = opaque; only decreases once `spawned` is set
    pub alpha: u8,
    /// Set once this door has produced its monster
    pub spawned: bool,
    /// Session tick the door appeared on
    pub created_tick: u64,
}

impl Door {
    pub fn new(x: f32, created_tick: u64, config: &GameConfig) -> Self {
        let size = config.door_size;
        Self {
            pos: Vec2::new(
                x.clamp(0.0, config.max_x_for(size.x)),
                config.floor_for(size.y),
            ),
            size,
            alpha: DOOR_OPAQUE,
            spawned: false,
            created_tick,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == DOOR_OPAQUE
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Fade out after the monster has left; saturates at fully transparent
    pub fn update(&mut self, config: &GameConfig) {
        if self.spawned {
            self.alpha = self.alpha.saturating_sub(config.door_fade_step);
        }
    }
}

/// Complete game state (deterministic for a given config, seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: i32,
    pub points: u32,
    /// Ticks simulated since the session (re)started; frozen while game over
    pub time_ticks: u64,
    /// Tick of the most recent coin spawn (or session start)
    pub last_coin_tick: u64,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub monsters: Vec<Monster>,
    pub door: Door,
}

impl GameState {
    /// Create a new session with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let door = Door::new(random_x(&mut rng, &config), 0, &config);
        Self {
            player: Player::new(&config),
            lives: config.starting_lives,
            points: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            last_coin_tick: 0,
            coins: Vec::new(),
            monsters: Vec::new(),
            door,
            seed,
            rng,
            config,
        }
    }

    /// Start a fresh session in place; the RNG stream carries on
    pub fn reset(&mut self) {
        log::debug!("Resetting session (seed {})", self.seed);
        self.player = Player::new(&self.config);
        self.lives = self.config.starting_lives;
        self.points = 0;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.last_coin_tick = 0;
        self.coins.clear();
        self.monsters.clear();
        self.door = self.new_door();
    }

    /// A door at a random position, stamped with the current tick
    pub fn new_door(&mut self) -> Door {
        let x = random_x(&mut self.rng, &self.config);
        Door::new(x, self.time_ticks, &self.config)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Elapsed session time in seconds (frozen while game over)
    pub fn elapsed_secs(&self) -> f32 {
        self.config.ticks_to_seconds(self.time_ticks)
    }

    /// Coins resting on the floor
    pub fn grounded_coins(&self) -> usize {
        self.coins
            .iter()
            .filter(|c| c.on_ground(&self.config))
            .count()
    }
}

/// Random spawn column across the full window width (clamped by the entity)
pub(crate) fn random_x(rng: &mut impl Rng, config: &GameConfig) -> f32 {
    rng.random_range(0..=config.window_width as u32) as f32
}

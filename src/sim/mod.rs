//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (time is counted in ticks)
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entity lists)
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{resolve_coins, resolve_collisions, resolve_monsters};
pub use events::GameEvent;
pub use rect::{Hitbox, Rect};
pub use spawn::{replace_door, run_spawners, spawn_coin, spawn_monster};
pub use state::{Coin, Direction, Door, GamePhase, GameState, Monster, Player};
pub use tick::{Action, InputEvent, TickReport, apply_input, tick};

//! Text overlays derived from the game state

use crate::sim::GameState;

pub const INSTRUCTIONS: &str = "Arrow keys or WASD for movement";
pub const TASK: &str =
    "Collect as many coins while avoiding monsters! Difficulty increases as time passes";
pub const GAME_OVER: &str = "Gameover! Press 'R' to restart!";

/// The three status lines, rebuilt every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub life: String,
    pub points: String,
    pub time: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            life: format!("Life: {}", state.lives),
            points: format!("Points: {}", state.points),
            time: format!("Time(seconds): {:.0}", state.elapsed_secs()),
        }
    }
}

//! Rendering module
//!
//! The game never talks to a window or terminal directly. It describes each
//! frame as sprite and text draw calls against a [`Surface`], which a backend
//! turns into pixels or cells.

pub mod hud;
pub mod terminal;

pub use hud::Hud;
pub use terminal::TerminalSurface;

use glam::Vec2;

use crate::sim::{GameState, Rect};

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const BACKGROUND: Rgb = [255, 255, 255];
    pub const TEXT: Rgb = [255, 0, 0];
    pub const PLAYER: Rgb = [60, 90, 200];
    pub const COIN: Rgb = [230, 180, 20];
    pub const MONSTER: Rgb = [40, 150, 60];
    pub const DOOR: Rgb = [130, 80, 40];
}

/// Alpha the player is drawn with while invulnerable
pub const INVULNERABLE_ALPHA: u8 = 100;

/// Things that can be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Coin,
    Monster,
    Door,
}

impl Sprite {
    pub fn color(&self) -> Rgb {
        match self {
            Sprite::Player => colors::PLAYER,
            Sprite::Coin => colors::COIN,
            Sprite::Monster => colors::MONSTER,
            Sprite::Door => colors::DOOR,
        }
    }
}

/// Font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Status lines (24pt)
    Large,
    /// Hints and the timer (16pt)
    Small,
}

/// How a text position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    /// Horizontally centred on the position
    Centre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: TextSize,
    pub anchor: Anchor,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(size: TextSize, anchor: Anchor) -> Self {
        Self {
            size,
            anchor,
            color: colors::TEXT,
        }
    }
}

/// A frame buffer the game can draw into
///
/// Coordinates are in play-field units (see `GameConfig::window_width`);
/// backends scale them to their own resolution.
pub trait Surface {
    type Error;

    fn clear(&mut self, color: Rgb);
    /// Draw a sprite filling `rect`; alpha 0 is fully transparent
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, alpha: u8);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
    /// Show the finished frame
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Draw one complete frame for the current state
pub fn render_frame<S: Surface>(state: &GameState, surface: &mut S) -> Result<(), S::Error> {
    surface.clear(colors::BACKGROUND);
    let hud = Hud::from_state(state);
    if state.is_game_over() {
        draw_game_over(state, &hud, surface);
    } else {
        draw_playing(state, &hud, surface);
    }
    surface.present()
}

fn draw_playing<S: Surface>(state: &GameState, hud: &Hud, surface: &mut S) {
    let width = state.config.window_width;
    let small = TextStyle::new(TextSize::Small, Anchor::TopLeft);
    let large = TextStyle::new(TextSize::Large, Anchor::TopLeft);

    surface.draw_text(hud::INSTRUCTIONS, Vec2::new(10.0, 45.0), small);
    surface.draw_text(hud::TASK, Vec2::new(10.0, 65.0), small);
    surface.draw_text(&hud.life, Vec2::new(10.0, 10.0), large);
    surface.draw_text(&hud.points, Vec2::new(width - 100.0, 10.0), large);
    surface.draw_text(&hud.time, Vec2::new(width - 130.0, 40.0), small);

    let player_alpha = if state.player.is_invulnerable() {
        INVULNERABLE_ALPHA
    } else {
        u8::MAX
    };
    surface.draw_sprite(Sprite::Player, state.player.bounds(), player_alpha);
    for coin in &state.coins {
        surface.draw_sprite(Sprite::Coin, coin.bounds(), u8::MAX);
    }
    surface.draw_sprite(Sprite::Door, state.door.bounds(), state.door.alpha);
    for monster in &state.monsters {
        surface.draw_sprite(Sprite::Monster, monster.bounds(), u8::MAX);
    }
}

fn draw_game_over<S: Surface>(state: &GameState, hud: &Hud, surface: &mut S) {
    let centre = Vec2::new(
        state.config.window_width / 2.0,
        state.config.window_height / 2.0,
    );
    let large = TextStyle::new(TextSize::Large, Anchor::Centre);
    let small = TextStyle::new(TextSize::Small, Anchor::Centre);

    surface.draw_text(&hud.points, centre, large);
    surface.draw_text(&hud.time, centre + Vec2::new(0.0, 30.0), small);
    surface.draw_text(hud::GAME_OVER, centre - Vec2::new(0.0, 30.0), large);
}

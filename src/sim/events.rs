//! Notable things that happened during a tick
//!
//! The simulation reports these so the front end can log them; nothing in
//! the simulation reads them back.

/// A single gameplay event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CoinSpawned { x: f32 },
    DoorReplaced { x: f32 },
    MonsterSpawned { x: f32 },
    CoinCollected { points: u32 },
    /// A grounded coin removed because too many coins were on screen
    CoinEvicted { x: f32 },
    PlayerHit { lives: i32 },
    GameOver { points: u32, elapsed_ticks: u64 },
    Restarted,
}

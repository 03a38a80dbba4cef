//! Fixed timestep simulation tick
//!
//! Order within a tick: input events, entity physics, spawn gates,
//! collision resolution, game-over check.

use super::collision::resolve_collisions;
use super::events::GameEvent;
use super::spawn::run_spawners;
use super::state::{GamePhase, GameState};

/// Logical game controls, independent of any keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Restart,
}

/// A discrete input event delivered by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
    /// Stop the game loop right away
    Terminate,
}

/// What happened during one call to [`tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// A terminate event arrived; the loop should exit without simulating
    pub quit: bool,
}

/// Apply one input event. Movement is level-triggered, jump and restart fire
/// on press only.
pub fn apply_input(state: &mut GameState, input: InputEvent, events: &mut Vec<GameEvent>) {
    match input {
        InputEvent::Pressed(Action::MoveLeft) => state.player.left = true,
        InputEvent::Pressed(Action::MoveRight) => state.player.right = true,
        InputEvent::Released(Action::MoveLeft) => state.player.left = false,
        InputEvent::Released(Action::MoveRight) => state.player.right = false,
        InputEvent::Pressed(Action::Jump) => {
            if state.phase == GamePhase::Playing {
                state.player.try_jump(&state.config);
            }
        }
        InputEvent::Pressed(Action::Restart) => {
            if state.phase == GamePhase::GameOver {
                state.reset();
                log::info!("Game restarted");
                events.push(GameEvent::Restarted);
            }
        }
        InputEvent::Released(Action::Jump | Action::Restart) | InputEvent::Terminate => {}
    }
}

/// Advance the game by one tick, consuming this frame's input events
pub fn tick(state: &mut GameState, inputs: &[InputEvent]) -> TickReport {
    let mut report = TickReport::default();

    for &input in inputs {
        if input == InputEvent::Terminate {
            report.quit = true;
            return report;
        }
        apply_input(state, input, &mut report.events);
    }

    // The world stands still until a restart
    if state.phase == GamePhase::GameOver {
        return report;
    }

    state.time_ticks += 1;

    step_physics(state);
    run_spawners(state, &mut report.events);
    resolve_collisions(state, &mut report.events);

    if state.lives <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: {} points in {:.0}s",
            state.points,
            state.elapsed_secs()
        );
        report.events.push(GameEvent::GameOver {
            points: state.points,
            elapsed_ticks: state.time_ticks,
        });
    }

    report
}

/// Move every entity one tick
fn step_physics(state: &mut GameState) {
    let config = &state.config;
    state.player.update(config);
    for coin in &mut state.coins {
        coin.update(config);
    }
    state.door.update(config);
    for monster in &mut state.monsters {
        monster.update(config, &mut state.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 12345)
    }

    #[test]
    fn test_terminate_stops_immediately() {
        let mut state = new_state();
        let report = tick(
            &mut state,
            &[InputEvent::Terminate, InputEvent::Pressed(Action::MoveLeft)],
        );
        assert!(report.quit);
        assert_eq!(state.time_ticks, 0);
        assert!(!state.player.left);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut state = new_state();
        let start = state.player.pos.x;
        tick(&mut state, &[InputEvent::Pressed(Action::MoveRight)]);
        tick(&mut state, &[]);
        tick(&mut state, &[]);
        assert_eq!(state.player.pos.x, start + 15.0);

        tick(&mut state, &[InputEvent::Released(Action::MoveRight)]);
        assert_eq!(state.player.pos.x, start + 15.0);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut state = new_state();
        tick(&mut state, &[InputEvent::Pressed(Action::Jump)]);
        assert!(state.player.jumping);
        let floor = state.player.floor(&state.config);
        assert_eq!(state.player.pos.y, floor - 12.0);

        // Holding the key does nothing more; pressing again mid-air is ignored
        tick(&mut state, &[InputEvent::Pressed(Action::Jump)]);
        assert!(state.player.pos.y < floor - 12.0);

        for _ in 0..200 {
            tick(&mut state, &[]);
        }
        assert!(state.player.on_ground(&state.config));
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = new_state();
        state.lives = 0;
        let report = tick(&mut state, &[]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            report.events,
            vec![GameEvent::GameOver {
                points: 0,
                elapsed_ticks: 1
            }]
        );

        let frozen = state.time_ticks;
        for _ in 0..500 {
            tick(&mut state, &[InputEvent::Pressed(Action::Jump)]);
        }
        assert_eq!(state.time_ticks, frozen);
        assert!(state.coins.is_empty());
        assert!(state.monsters.is_empty());
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = new_state();
        for _ in 0..10 {
            tick(&mut state, &[]);
        }
        let report = tick(&mut state, &[InputEvent::Pressed(Action::Restart)]);
        assert!(report.events.is_empty());
        assert_eq!(state.time_ticks, 11);

        state.lives = 0;
        tick(&mut state, &[]);
        assert!(state.is_game_over());

        let report = tick(&mut state, &[InputEvent::Pressed(Action::Restart)]);
        assert_eq!(report.events.first(), Some(&GameEvent::Restarted));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(GameConfig::default(), 99999);
        let mut state2 = GameState::new(GameConfig::default(), 99999);

        let inputs = [
            vec![InputEvent::Pressed(Action::MoveLeft)],
            vec![],
            vec![InputEvent::Pressed(Action::Jump)],
            vec![InputEvent::Released(Action::MoveLeft)],
        ];
        for frame in 0..3_000 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.coins, state2.coins);
        assert_eq!(state1.monsters, state2.monsters);
        assert_eq!(state1.door, state2.door);
        assert_eq!(state1.points, state2.points);
    }
}

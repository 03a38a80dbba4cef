//! Platform layer for the terminal front end
//!
//! Handles the parts the simulation must not know about:
//! - Frame pacing against the wall clock
//! - Reading terminal events off the main loop
//! - Turning key presses into [`InputEvent`]s, including synthetic key
//!   releases for terminals that never report them

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Action, InputEvent};

/// Frames a key stays held after its last press or auto-repeat when the
/// terminal does not send release events (about 170 ms at 60 fps).
pub const HOLD_WINDOW_FRAMES: u64 = 10;

/// What a physical key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Action(Action),
    Quit,
}

/// Default key map: arrows or WASD, space to jump, R to restart
pub fn bind_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Binding> {
    let binding = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Binding::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Binding::Quit,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Binding::Action(Action::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Binding::Action(Action::MoveRight)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
            Binding::Action(Action::Jump)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Binding::Action(Action::Restart),
        _ => return None,
    };
    Some(binding)
}

/// Converts raw key events into press/release input events
///
/// A key counts as held while presses or repeats keep arriving, and is
/// released after `HOLD_WINDOW_FRAMES` frames of silence. Terminals that
/// report key releases get the release immediately as well. Whether the
/// terminal does is never assumed: accepting the enhancement flags says
/// nothing about the events that follow.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Held actions and the frame they were last seen on
    held: HashMap<Action, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains_key(&action)
    }

    /// Translate one key event; auto-repeats of a held key produce nothing
    pub fn key_event(&mut self, key: KeyEvent) -> Option<InputEvent> {
        let action = match bind_key(key.code, key.modifiers)? {
            Binding::Quit => {
                return (key.kind == KeyEventKind::Press).then_some(InputEvent::Terminate);
            }
            Binding::Action(action) => action,
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self
                .held
                .insert(action, self.frame)
                .is_none()
                .then_some(InputEvent::Pressed(action)),
            KeyEventKind::Release => self
                .held
                .remove(&action)
                .map(|_| InputEvent::Released(action)),
        }
    }

    /// Synthetic releases for keys that went quiet
    pub fn expire(&mut self) -> Vec<InputEvent> {
        let frame = self.frame;
        let mut expired: Vec<Action> = self
            .held
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW_FRAMES)
            .map(|(&action, _)| action)
            .collect();
        // HashMap order is arbitrary; keep the event stream reproducible
        expired.sort_by_key(|action| *action as u8);
        for action in &expired {
            self.held.remove(action);
        }
        expired.into_iter().map(InputEvent::Released).collect()
    }
}

/// Read terminal events on a dedicated thread so the game loop never blocks
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, game is exiting
                    }
                }
                Err(err) => {
                    log::error!("Terminal event read failed: {err}");
                    break;
                }
            }
        }
    });
    rx
}

/// Holds the loop to a fixed frame rate by sleeping off the remainder
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Block until the current frame's time slot is over
    pub fn wait(&self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        } else {
            log::trace!("Frame overran by {:?}", elapsed - self.frame);
        }
    }
}

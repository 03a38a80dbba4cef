//! Coin Rush entry point
//!
//! Sets up the terminal, then runs input → tick → render at a fixed rate
//! until the player quits. Logs go to stderr; redirect them
//! (`RUST_LOG=debug coin-rush 2>coin-rush.log`) to keep the screen clean.

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use coin_rush::GameConfig;
use coin_rush::platform::{FramePacer, KeyTracker, spawn_event_reader};
use coin_rush::renderer::{TerminalSurface, render_frame};
use coin_rush::sim::{GameEvent, GameState, InputEvent, tick};

#[derive(Debug, Parser)]
#[command(name = "coin-rush", version, about = "Collect coins, dodge monsters")]
struct Args {
    /// JSON file overriding the default game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Coin Rush starting with seed {seed}");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let result = enter_screen(&mut out).and_then(|()| {
        // Kitty-protocol terminals also report key releases; held keys time
        // out either way, so a refused request only matters for cleanup.
        let enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::info!("Keyboard enhancement requested: {enhanced}");

        let rx = spawn_event_reader();
        let result = run(&mut out, &rx, config, seed);
        if enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        result
    });

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn enter_screen<W: Write>(out: &mut W) -> Result<()> {
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide).context("hiding cursor")?;
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    seed: u64,
) -> Result<()> {
    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let field = glam::Vec2::new(config.window_width, config.window_height);
    let mut surface = TerminalSurface::new(out, cols, rows, field);
    let mut pacer = FramePacer::new(config.tick_duration());
    let mut keys = KeyTracker::new();
    let mut state = GameState::new(config, seed);
    let mut inputs: Vec<InputEvent> = Vec::new();

    loop {
        pacer.begin();
        keys.begin_frame();
        inputs.clear();

        // Drain all pending terminal events without blocking
        loop {
            match rx.try_recv() {
                Ok(Event::Key(key)) => inputs.extend(keys.key_event(key)),
                Ok(Event::Resize(cols, rows)) => surface.resize(cols, rows),
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Input reader stopped; quitting");
                    inputs.push(InputEvent::Terminate);
                    break;
                }
            }
        }
        inputs.extend(keys.expire());

        let report = tick(&mut state, &inputs);
        if report.quit {
            log::info!("Quitting with {} points", state.points);
            return Ok(());
        }
        for event in &report.events {
            log_event(event);
        }

        render_frame(&state, &mut surface).context("drawing frame")?;
        pacer.wait();
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PlayerHit { lives } => log::info!("Ouch! {lives} lives left"),
        GameEvent::GameOver {
            points,
            elapsed_ticks,
        } => log::info!("Session over: {points} points after {elapsed_ticks} ticks"),
        other => log::trace!("{other:?}"),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_screen_setup_failure_is_returned() {
        let err = enter_screen(&mut BrokenPipe).unwrap_err();
        assert!(err.to_string().contains("alternate screen"));
    }

    #[test]
    fn test_screen_setup_writes_to_output() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}

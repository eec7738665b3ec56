//! Snake Arcade entry point
//!
//! Headless native runner: drives a session with a greedy autopilot at a
//! fixed 60 Hz frame rate and records every frame's draw commands. A real
//! host swaps the autopilot for keyboard input and the recorder for a GPU
//! backed `RenderTarget`.
//!
//! Usage: `snake-arcade [seed] [rounds] [settings.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use snake_arcade::platform::{FrameInput, InputSource, ScriptedInput};
use snake_arcade::renderer::{RecordingTarget, draw_frame, frame::stats_line};
use snake_arcade::sim::{Direction, GamePhase, Grid};
use snake_arcade::{JsonFileStore, MemoryStore, Session, SessionCommand, SettingsStore};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Safety cap so a looping autopilot cannot run forever
const MAX_FRAMES_PER_ROUND: u32 = 60 * 60 * 5;

/// Turn toward the food, never into a wall or the body
fn autopilot(session: &Session) -> FrameInput {
    let state = &session.state;
    if state.phase != GamePhase::Playing || state.turns.has_pending_turn() {
        return FrameInput::default();
    }

    let head = state.snake.head();
    let current = state.turns.next();
    let mut options: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| !d.is_opposite(current))
        .filter(|d| {
            let cell = head.step(*d);
            state.grid.in_bounds(cell) && !state.snake.contains(cell)
        })
        .collect();
    options.sort_by_key(|d| head.step(*d).manhattan(state.food));

    match options.first() {
        Some(&dir) if dir != current => FrameInput::turn(dir),
        _ => FrameInput::default(),
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arcade (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(seed_from_clock);
    let rounds = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(3)
        .max(1);
    let mut store: Box<dyn SettingsStore> = match args.next() {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    };

    let mut session = match Session::new(Grid::default(), seed, store.as_ref()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not start session: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    // Opening script: pause, resume, then hand over to the autopilot
    let mut script = ScriptedInput::new([FrameInput::pause(), FrameInput::pause()]);
    let mut target = RecordingTarget::new();
    let mut frames_this_round = 0u32;
    let mut total_frames = 0u64;

    loop {
        let scripted = script.poll();
        let input = if scripted.is_empty() {
            autopilot(&session)
        } else {
            scripted
        };

        if session.frame(&input, FRAME_DT, store.as_mut()) == SessionCommand::ReturnToMenu {
            log::info!("Returned to menu");
            break;
        }

        target.clear();
        draw_frame(&session, &mut target);
        frames_this_round += 1;
        total_frames += 1;

        if session.phase() == GamePhase::Playing && frames_this_round >= MAX_FRAMES_PER_ROUND {
            log::warn!("Round {} hit the frame cap, pausing", session.rounds());
            script.push(FrameInput::pause());
            script.push(FrameInput::menu());
            continue;
        }

        if session.phase() == GamePhase::GameOver && session.effects.particles.is_empty() {
            log::info!("Round {}: {}", session.rounds(), stats_line(&session));
            if session.rounds() >= rounds {
                break;
            }
            script.push(FrameInput::restart());
            frames_this_round = 0;
        }
    }

    log::info!(
        "Finished after {} frames ({} draw commands in the last), high score {}",
        total_frames,
        target.commands.len(),
        session.high_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Session` themselves
}

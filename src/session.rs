//! Session state machine
//!
//! Owns one round of `GameState` plus its `Effects` and drives both once per
//! frame. Each phase has its own update function; the shared effects update
//! runs after whichever one applied.

use glam::Vec2;

use crate::cell_to_pixel;
use crate::consts::CELL_SIZE;
use crate::effects::Effects;
use crate::error::SimError;
use crate::platform::FrameInput;
use crate::settings::{Settings, SettingsStore};
use crate::sim::{self, CrashCause, GamePhase, GameState, Grid, TickOutcome};
use crate::theme::Theme;

/// Request from the session back to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    None,
    ReturnToMenu,
}

/// One player's game: current round, effects and high-score bookkeeping
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub effects: Effects,
    theme: Theme,
    high_score: u32,
    /// Set at game over when the round beat the stored high score
    new_high_score: bool,
    settings: Settings,
    round_seed: u64,
    rounds: u32,
}

impl Session {
    /// Start a session with preferences from `store`. Store failures fall
    /// back to defaults.
    pub fn new(grid: Grid, seed: u64, store: &dyn SettingsStore) -> Result<Self, SimError> {
        let settings = read_settings(store);
        let state = GameState::new(grid, seed)?;
        let mut effects = Effects::new(state.snake.segments(), seed);
        effects.configure(&settings);

        log::info!(
            "Session started: {}x{} grid, theme {}, high score {}",
            grid.width,
            grid.height,
            settings.theme.as_str(),
            settings.high_score
        );

        let mut session = Self {
            state,
            effects,
            theme: settings.theme,
            high_score: settings.high_score,
            new_high_score: false,
            settings,
            round_seed: seed,
            rounds: 1,
        };
        // Anchor the camera before the first frame is drawn
        let base = session.camera_base();
        session.effects.shake.update(base, 0.0);
        Ok(session)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    /// Preferences in force for the current round
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Unshaken camera centre: middle of the playfield in pixels
    pub fn camera_base(&self) -> Vec2 {
        Vec2::new(
            self.state.grid.width as f32 * CELL_SIZE / 2.0,
            self.state.grid.height as f32 * CELL_SIZE / 2.0,
        )
    }

    /// Change theme and persist it. Takes effect on the next drawn frame.
    pub fn set_theme(&mut self, theme: Theme, store: &mut dyn SettingsStore) {
        self.theme = theme;
        self.settings.theme = theme;
        if let Err(e) = store.set_theme(theme) {
            log::warn!("Could not save theme {}: {}", theme.as_str(), e);
        }
    }

    /// Run one frame: phase logic first, then effects
    pub fn frame(
        &mut self,
        input: &FrameInput,
        dt: f32,
        store: &mut dyn SettingsStore,
    ) -> SessionCommand {
        let command = match self.state.phase {
            GamePhase::Playing => {
                self.update_playing(input, dt, store);
                SessionCommand::None
            }
            GamePhase::Paused => self.update_paused(input),
            GamePhase::GameOver => self.update_game_over(input, store),
        };

        let playing = self.state.phase == GamePhase::Playing;
        let base = self.camera_base();
        self.effects
            .update(self.state.snake.segments(), base, dt, playing);
        command
    }

    fn update_playing(&mut self, input: &FrameInput, dt: f32, store: &mut dyn SettingsStore) {
        if input.pause {
            self.state.toggle_pause();
            log::debug!("Paused");
            return;
        }
        if let Some(dir) = input.turn {
            self.state.request_turn(dir);
        }

        match sim::advance(&mut self.state, dt) {
            Ok(Some(outcome)) => self.apply_outcome(outcome, store),
            Ok(None) => {}
            Err(e) => self.recover(e, store),
        }
    }

    fn update_paused(&mut self, input: &FrameInput) -> SessionCommand {
        if input.pause {
            self.state.toggle_pause();
            log::debug!("Resumed");
        } else if input.menu {
            return SessionCommand::ReturnToMenu;
        }
        SessionCommand::None
    }

    fn update_game_over(
        &mut self,
        input: &FrameInput,
        store: &dyn SettingsStore,
    ) -> SessionCommand {
        if input.restart {
            self.restart(store);
        } else if input.menu {
            return SessionCommand::ReturnToMenu;
        }
        SessionCommand::None
    }

    /// Throw away the round and start a fresh one. Preferences are re-read.
    pub fn restart(&mut self, store: &dyn SettingsStore) {
        let settings = read_settings(store);
        self.round_seed = next_round_seed(self.round_seed);

        match GameState::new(self.state.grid, self.round_seed) {
            Ok(state) => self.state = state,
            Err(e) => {
                // Grid was valid at session start, so this is unexpected
                log::error!("Could not start a new round: {}", e);
                self.state.phase = GamePhase::GameOver;
                return;
            }
        }

        self.effects.reset(self.state.snake.segments());
        self.effects.configure(&settings);
        self.theme = settings.theme;
        self.high_score = self.high_score.max(settings.high_score);
        self.settings = settings;
        self.new_high_score = false;
        self.rounds += 1;
        log::info!("Round {} started", self.rounds);
    }

    fn apply_outcome(&mut self, outcome: TickOutcome, store: &mut dyn SettingsStore) {
        match outcome {
            TickOutcome::Moved { old_head, ate } => {
                self.effects.on_moved(old_head, ate.is_some());
                debug_assert_eq!(self.effects.body.len(), self.state.snake.len());
                debug_assert!(self.state.snake.is_self_disjoint());
                if let Some(food) = ate {
                    self.effects.on_eat(food, self.theme.palette().food);
                    log::debug!("Ate food at ({}, {}), score {}", food.x, food.y, self.state.score);
                }
            }
            TickOutcome::Crashed { head, cause } => {
                self.effects.on_crash(head);
                self.finish_round(cause, store);
            }
        }
    }

    fn finish_round(&mut self, cause: CrashCause, store: &mut dyn SettingsStore) {
        let score = self.record_score(store);

        log::info!(
            "Game over ({:?}): score {}, length {}, time {:.1}s",
            cause,
            score,
            self.state.snake.len(),
            self.state.play_time
        );
    }

    /// Compare the round's score with the best so far and persist it if
    /// beaten. Returns the score.
    fn record_score(&mut self, store: &mut dyn SettingsStore) -> u32 {
        let score = self.state.score;
        self.new_high_score = score > self.high_score;
        match store.save_high_score(score) {
            Ok(true) => log::info!("New high score: {}", score),
            Ok(false) => {}
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
        self.high_score = self.high_score.max(score);
        score
    }

    /// Invariant violation: abandon the round rather than continue with
    /// broken geometry. The score earned so far still counts.
    fn recover(&mut self, err: SimError, store: &mut dyn SettingsStore) {
        log::error!("Simulation invariant violated: {}; resetting round", err);
        self.record_score(store);
        self.restart(store);
    }

    /// Pixel position of the food cell
    pub fn food_position(&self) -> Vec2 {
        cell_to_pixel(self.state.food)
    }
}

fn read_settings(store: &dyn SettingsStore) -> Settings {
    store.load().unwrap_or_else(|e| {
        log::warn!("Settings unavailable ({}), using defaults", e);
        Settings::default()
    })
}

/// Step the per-round seed (64-bit LCG)
fn next_round_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

//! Session state machine
//!
//! `Game` owns the session and is the only thing the host talks to. The host
//! calls `update` once per display refresh with its clock; timers are plain
//! deadlines checked there, so the countdown, combo window, paddle jump and
//! level-complete overlay all advance even while the frame loop is halted.
//!
//! Transitions:
//!
//! | from                      | event                       | to                        |
//! |---------------------------|-----------------------------|---------------------------|
//! | Menu                      | `start_game`                | Playing                   |
//! | Playing                   | ball lost, lives left       | Paused(LifeLost)          |
//! | Playing                   | ball lost, no lives         | GameOver                  |
//! | Playing / Paused(LifeLost)| countdown hits 0            | GameOver                  |
//! | Playing                   | grid cleared                | Paused(LevelTransition)   |
//! | Paused(LevelTransition)   | overlay elapsed, more levels| Playing (next level)      |
//! | Paused(LevelTransition)   | overlay elapsed, last level | LevelComplete             |
//! | Paused(LifeLost)          | `acknowledge`               | Playing                   |
//! | GameOver / LevelComplete  | `acknowledge`               | Menu                      |
//! | any                       | `restart`                   | Menu (theme selection)    |

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::BrickGrid;
use super::particles::Particles;
use super::state::{GamePhase, PauseReason, SessionState};
use super::tick::{FrameOutcome, TickInput, step_frame};
use crate::consts::*;
use crate::error::GameError;
use crate::platform::{Key, Modal, ModalKind, PanelId, Platform};
use crate::settings::Settings;
use crate::tuning::{Difficulty, Theme, Tuning};

pub const TIME_UP_MESSAGE: &str = "Time's up!";
pub const OUT_OF_LIVES_MESSAGE: &str = "You ran out of lives!";

/// Panels visible while a level is on screen
const PLAY_PANELS: [PanelId; 4] = [
    PanelId::Canvas,
    PanelId::ScoreBoard,
    PanelId::TimeBoard,
    PanelId::LivesBoard,
];

/// One-second level countdown
#[derive(Debug, Clone, Default)]
struct Countdown {
    /// Next decrement (ms); `None` while stopped
    next_tick_at: Option<f64>,
}

impl Countdown {
    fn start(&mut self, now: f64) {
        self.next_tick_at = Some(now + COUNTDOWN_TICK_MS);
    }

    fn stop(&mut self) {
        self.next_tick_at = None;
    }

    fn is_running(&self) -> bool {
        self.next_tick_at.is_some()
    }
}

/// The game controller
pub struct Game {
    tuning: Tuning,
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    theme: Option<Theme>,
    input: TickInput,
    countdown: Countdown,
    music_on: bool,
    pub state: SessionState,
}

impl Game {
    /// Build a game; a broken tuning table is refused here, before any level runs
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Result<Self, GameError> {
        tuning.validate()?;
        let state = SessionState::new(
            tuning.starting_lives,
            tuning.level_time_secs,
            settings.max_particles(),
        );
        Ok(Self {
            tuning,
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            theme: None,
            input: TickInput::default(),
            countdown: Countdown::default(),
            music_on: false,
            state,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    // === Host entry points ===

    /// Pick the visual theme (and with it the level layouts)
    pub fn select_theme(&mut self, theme: Theme, platform: &mut impl Platform) {
        if self.state.phase != GamePhase::Menu {
            log::warn!("Ignoring theme change to {theme} mid-session");
            return;
        }
        self.theme = Some(theme);
        platform.set_theme_background(theme);
        platform.hide_panel(PanelId::ThemeSelect);
        platform.show_panel(PanelId::DifficultySelect);
        log::info!("Theme selected: {theme}");
    }

    /// Start a new session at `level` of `difficulty`. The banked total resets.
    pub fn start_game(
        &mut self,
        difficulty: Difficulty,
        level: usize,
        now: f64,
        platform: &mut impl Platform,
    ) -> Result<(), GameError> {
        if level >= LEVELS_PER_DIFFICULTY {
            return Err(GameError::LevelOutOfRange(level));
        }
        if self.theme.is_none() {
            return Err(GameError::ThemeNotSelected);
        }
        self.state.total_score = 0;
        self.start_level(difficulty, level, now, platform)
    }

    /// Per-refresh callback: timers first, then a frame if the loop is running
    pub fn update(&mut self, now: f64, platform: &mut impl Platform) {
        self.poll_timers(now, platform);
        if self.state.phase == GamePhase::Playing {
            self.frame(now, platform);
        }
    }

    /// Fire any timers whose deadline has passed
    pub fn poll_timers(&mut self, now: f64, platform: &mut impl Platform) {
        self.state.combo.expire(now);
        self.state.paddle.settle(now);
        self.poll_countdown(now, platform);

        if let GamePhase::Paused(PauseReason::LevelTransition { resume_at }) = self.state.phase {
            if now >= resume_at {
                self.finish_level_transition(now, platform);
            }
        }
    }

    /// Run one animation frame. A no-op unless the loop is running.
    pub fn frame(&mut self, now: f64, platform: &mut impl Platform) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let outcome = step_frame(
            &mut self.state,
            &self.input,
            now,
            &mut self.rng,
            &self.settings,
            platform,
        );
        match outcome {
            FrameOutcome::Continue => {}
            FrameOutcome::BallLost => self.lose_life(platform),
            FrameOutcome::Cleared => self.begin_level_transition(now, platform),
        }
    }

    /// The player dismissed the current modal
    pub fn acknowledge(&mut self, platform: &mut impl Platform) {
        match self.state.phase {
            GamePhase::Paused(PauseReason::LifeLost) => {
                self.state.respawn();
                self.state.phase = GamePhase::Playing;
                log::info!("Resuming with {} lives", self.state.lives);
            }
            GamePhase::GameOver | GamePhase::LevelComplete => self.return_to_menu(platform),
            phase => log::warn!("Nothing to acknowledge in {phase:?}"),
        }
    }

    pub fn key_down(&mut self, key: Key, now: f64) {
        match key {
            Key::Left => self.input.left = true,
            Key::Right => self.input.right = true,
            Key::Jump => {
                if self.state.paddle.try_jump(now) {
                    log::debug!("Paddle jump at {now:.0}ms");
                }
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.input.left = false,
            Key::Right => self.input.right = false,
            Key::Jump => {}
        }
    }

    /// Replace held movement keys wholesale (autopilot, tests)
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Throw everything away and go back to theme selection
    pub fn restart(&mut self, platform: &mut impl Platform) {
        if self.music_on {
            platform.pause_background_music();
        }
        let seed = self.seed.wrapping_add(1);
        self.rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
        self.theme = None;
        self.input = TickInput::default();
        self.countdown.stop();
        self.music_on = false;
        self.state = SessionState::new(
            self.tuning.starting_lives,
            self.tuning.level_time_secs,
            self.settings.max_particles(),
        );

        for panel in PLAY_PANELS {
            platform.hide_panel(panel);
        }
        platform.hide_panel(PanelId::LevelComplete);
        platform.hide_panel(PanelId::DifficultySelect);
        platform.show_panel(PanelId::ThemeSelect);
        log::info!("Game restarted with seed: {seed}");
    }

    // === Transitions ===

    /// Fresh grid, ball, paddle, score, lives and countdown for a level.
    /// Only `total_score` survives from earlier levels.
    fn start_level(
        &mut self,
        difficulty: Difficulty,
        level: usize,
        now: f64,
        platform: &mut impl Platform,
    ) -> Result<(), GameError> {
        let theme = self.theme.ok_or(GameError::ThemeNotSelected)?;
        let desc = self.tuning.level(difficulty, level)?;
        let pattern = self.tuning.pattern(theme, level)?;

        if !self.music_on {
            platform.play_background_music();
            self.music_on = true;
        }

        let state = &mut self.state;
        state.difficulty = difficulty;
        state.level = level;
        state.score = 0;
        state.lives = self.tuning.starting_lives;
        state.time_remaining = self.tuning.level_time_secs;
        state.level_speed = desc.speed;
        state.grid = BrickGrid::create(&desc, pattern, difficulty, &mut self.rng);
        state.particles = Particles::with_capacity(self.settings.max_particles());
        state.combo.reset();
        state.paddle = Default::default();
        state.respawn();
        state.phase = GamePhase::Playing;

        platform.set_score_text(state.score);
        platform.set_lives_text(state.lives);
        platform.set_time_text(state.time_remaining);
        platform.hide_panel(PanelId::DifficultySelect);
        for panel in PLAY_PANELS {
            platform.show_panel(panel);
        }

        self.countdown.start(now);
        log::info!(
            "Level {} ({difficulty}, {theme}) started: {}x{} grid, {} bricks",
            level + 1,
            desc.rows,
            desc.columns,
            self.state.grid.remaining()
        );
        Ok(())
    }

    fn poll_countdown(&mut self, now: f64, platform: &mut impl Platform) {
        while let Some(at) = self.countdown.next_tick_at {
            if now < at {
                break;
            }
            self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
            platform.set_time_text(self.state.time_remaining);
            if self.state.time_remaining == 0 {
                log::info!("Countdown expired on level {}", self.state.level + 1);
                self.enter_game_over(TIME_UP_MESSAGE, platform);
                break;
            }
            self.countdown.next_tick_at = Some(at + COUNTDOWN_TICK_MS);
        }
    }

    fn lose_life(&mut self, platform: &mut impl Platform) {
        self.state.lives = self.state.lives.saturating_sub(1);
        platform.set_lives_text(self.state.lives);
        if self.state.lives == 0 {
            self.enter_game_over(OUT_OF_LIVES_MESSAGE, platform);
            return;
        }

        log::info!("Ball lost, {} lives left", self.state.lives);
        self.state.phase = GamePhase::Paused(PauseReason::LifeLost);
        platform.show_modal(Modal {
            title: "Oops!".to_string(),
            message: format!("{} lives left!", self.state.lives),
            kind: ModalKind::Warning,
            confirm_label: "Keep playing".to_string(),
        });
    }

    fn enter_game_over(&mut self, message: &str, platform: &mut impl Platform) {
        self.state.phase = GamePhase::GameOver;
        self.countdown.stop();
        if self.music_on {
            platform.pause_background_music();
            self.music_on = false;
        }
        log::info!("Game over: {message} (score {})", self.state.score);
        platform.show_modal(Modal {
            title: "Game Over".to_string(),
            message: message.to_string(),
            kind: ModalKind::Error,
            confirm_label: "Return to Main Menu".to_string(),
        });
    }

    fn begin_level_transition(&mut self, now: f64, platform: &mut impl Platform) {
        self.countdown.stop();
        self.state.total_score += self.state.score;
        self.state.phase = GamePhase::Paused(PauseReason::LevelTransition {
            resume_at: now + LEVEL_COMPLETE_OVERLAY_MS,
        });
        platform.show_panel(PanelId::LevelComplete);
        log::info!(
            "Level {} cleared with {}s to spare (score {}, total {})",
            self.state.level + 1,
            self.state.time_remaining,
            self.state.score,
            self.state.total_score
        );
    }

    fn finish_level_transition(&mut self, now: f64, platform: &mut impl Platform) {
        platform.hide_panel(PanelId::LevelComplete);
        let next = self.state.level + 1;
        if next < LEVELS_PER_DIFFICULTY {
            if let Err(e) = self.start_level(self.state.difficulty, next, now, platform) {
                log::error!("Could not load level {}: {e}", next + 1);
                self.return_to_menu(platform);
            }
            return;
        }

        let difficulty = self.state.difficulty;
        self.state.phase = GamePhase::LevelComplete;
        log::info!("All {difficulty} levels complete (total {})", self.state.total_score);
        platform.show_modal(Modal {
            title: "Congratulations!".to_string(),
            message: format!(
                "You have completed all levels on {difficulty} difficulty! Total score: {}",
                self.state.total_score
            ),
            kind: ModalKind::Success,
            confirm_label: "Return to Main Menu".to_string(),
        });
    }

    /// Full session reset; back to difficulty selection with the theme kept
    fn return_to_menu(&mut self, platform: &mut impl Platform) {
        self.countdown.stop();
        let state = &mut self.state;
        state.phase = GamePhase::Menu;
        state.level = 0;
        state.score = 0;
        state.total_score = 0;
        state.lives = self.tuning.starting_lives;
        state.time_remaining = self.tuning.level_time_secs;
        state.combo.reset();
        state.particles.clear();

        platform.show_panel(PanelId::DifficultySelect);
        for panel in PLAY_PANELS {
            platform.hide_panel(panel);
        }
    }
}

//! Brickfall - A themed brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, collisions, session state machine)
//! - `platform`: Display/audio/UI collaborator traits and their implementations
//! - `tuning`: Data-driven level table and theme patterns
//! - `settings`: Player preferences
//! - `renderer`, `audio`: Canvas 2D and Web Audio backends (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Difficulty, LevelDescriptor, PatternRule, Theme, Tuning};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults - sits on the floor, centred horizontally
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Horizontal paddle speed (pixels per frame while a key is held)
    pub const PADDLE_SPEED: f32 = 7.0;
    /// How far the paddle hops up on a jump
    pub const JUMP_DISTANCE: f32 = 50.0;
    /// Time the paddle stays up after a jump (ms)
    pub const JUMP_UP_MS: f64 = 500.0;
    /// Minimum time between two jumps (ms)
    pub const JUMP_COOLDOWN_MS: f64 = 1500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball spawns this far above the canvas floor
    pub const BALL_SPAWN_LIFT: f32 = 30.0;

    /// Brick layout
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET: f32 = 30.0;
    pub const MAX_DURABILITY: u8 = 3;

    /// Scoring
    pub const BASE_SCORE: u32 = 1;
    pub const COMBO_MULTIPLIER: u32 = 2;
    /// Combo resets after this long without a hit (ms)
    pub const COMBO_WINDOW_MS: f64 = 2000.0;
    /// An extra life is awarded whenever the score lands on a multiple of this
    pub const LIFE_BONUS_INTERVAL: u32 = 100;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const LEVEL_TIME_SECS: u32 = 180;
    pub const LEVELS_PER_DIFFICULTY: usize = 3;
    /// Countdown granularity (ms)
    pub const COUNTDOWN_TICK_MS: f64 = 1000.0;
    /// How long the level-complete overlay stays up (ms)
    pub const LEVEL_COMPLETE_OVERLAY_MS: f64 = 3000.0;

    /// Particles
    pub const PARTICLES_PER_BURST: usize = 10;
    pub const PARTICLE_SHRINK: f32 = 0.95;
    pub const PARTICLE_MIN_SIZE: f32 = 0.5;

    /// Nominal display refresh used by the headless driver (ms per frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

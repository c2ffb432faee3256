//! Game state and core simulation types
//!
//! Everything a running session mutates lives in `SessionState`, owned by the
//! `Game` controller. Nothing here reads ambient globals.

use glam::{IVec2, Vec2};

use super::combo::ComboTracker;
use super::grid::BrickGrid;
use super::particles::Particles;
use crate::consts::*;
use crate::tuning::Difficulty;

/// Why the frame loop is halted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PauseReason {
    /// Ball dropped; waiting for the player to acknowledge the modal
    LifeLost,
    /// Grid cleared; level-complete overlay is up until `resume_at` (ms)
    LevelTransition { resume_at: f64 },
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Theme/difficulty selection, no level loaded
    Menu,
    /// Frame loop running
    Playing,
    /// Frame loop halted, session still alive
    Paused(PauseReason),
    /// Final level of a difficulty cleared; completion modal is up
    LevelComplete,
    /// Out of lives or out of time; game-over modal is up
    GameOver,
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: IVec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(vel: IVec2) -> Self {
        Self {
            pos: Self::spawn_position(),
            vel,
            radius: BALL_RADIUS,
        }
    }

    /// Centre-bottom of the canvas, just above the paddle
    pub fn spawn_position() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - BALL_SPAWN_LIFT)
    }

    pub fn reset(&mut self, vel: IVec2) {
        self.pos = Self::spawn_position();
        self.vel = vel;
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel.as_vec2();
    }

    #[inline]
    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    #[inline]
    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Pending jump bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Jump {
    /// Where to put the paddle back, and when (ms)
    pub landing: Option<(f32, f64)>,
    /// Earliest time the next jump may start (ms)
    pub ready_at: f64,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub jump: Jump,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
            y: CANVAS_HEIGHT - PADDLE_HEIGHT,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            jump: Jump::default(),
        }
    }
}

impl Paddle {
    pub fn recenter(&mut self) {
        self.x = (CANVAS_WIDTH - self.width) / 2.0;
    }

    /// Whether `x` lies strictly within the paddle's horizontal extent
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Move one frame's worth; right wins when both keys are held
    pub fn steer(&mut self, left: bool, right: bool) {
        let max_x = CANVAS_WIDTH - self.width;
        if right && self.x < max_x {
            self.x = (self.x + PADDLE_SPEED).min(max_x);
        } else if left && self.x > 0.0 {
            self.x = (self.x - PADDLE_SPEED).max(0.0);
        }
    }

    /// Hop up for `JUMP_UP_MS`. Only the cooldown gates a jump.
    pub fn try_jump(&mut self, now: f64) -> bool {
        if now < self.jump.ready_at {
            return false;
        }
        let rest_y = self.y;
        self.y = (self.y - JUMP_DISTANCE).max(0.0);
        self.jump.landing = Some((rest_y, now + JUMP_UP_MS));
        self.jump.ready_at = now + JUMP_COOLDOWN_MS;
        true
    }

    /// Drop back down once the up-phase has elapsed
    pub fn settle(&mut self, now: f64) {
        if let Some((rest_y, at)) = self.jump.landing {
            if now >= at {
                self.y = rest_y;
                self.jump.landing = None;
            }
        }
    }
}

/// Everything one play-through mutates
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Level index within the difficulty (0-based)
    pub level: usize,
    /// Points on the current level
    pub score: u32,
    /// Scores of every level cleared so far this session
    pub total_score: u32,
    pub lives: u32,
    /// Seconds left on the level countdown
    pub time_remaining: u32,
    /// Ball velocity at level start; reused on respawn
    pub level_speed: IVec2,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BrickGrid,
    pub combo: ComboTracker,
    pub particles: Particles,
}

impl SessionState {
    pub fn new(starting_lives: u32, level_time_secs: u32, max_particles: usize) -> Self {
        Self {
            phase: GamePhase::Menu,
            difficulty: Difficulty::Easy,
            level: 0,
            score: 0,
            total_score: 0,
            lives: starting_lives,
            time_remaining: level_time_secs,
            level_speed: IVec2::ZERO,
            ball: Ball::new(IVec2::ZERO),
            paddle: Paddle::default(),
            grid: BrickGrid::empty(),
            combo: ComboTracker::default(),
            particles: Particles::with_capacity(max_particles),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused(_))
    }

    /// Put ball and paddle back at their start positions
    pub fn respawn(&mut self) {
        self.ball.reset(self.level_speed);
        self.paddle.recenter();
    }
}

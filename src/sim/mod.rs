//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One frame per host display refresh, constant integer ball velocity
//! - Timers are deadlines supplied by the host clock, never host callbacks
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the `platform` traits

pub mod autopilot;
pub mod collision;
pub mod combo;
pub mod grid;
pub mod particles;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use combo::{ComboTracker, awards_life, points_for_hit};
pub use grid::{Brick, BrickGrid};
pub use particles::{Particle, Particles};
pub use session::{Game, OUT_OF_LIVES_MESSAGE, TIME_UP_MESSAGE};
pub use state::{Ball, GamePhase, Paddle, PauseReason, SessionState};
pub use tick::{FrameOutcome, TickInput, step_frame};

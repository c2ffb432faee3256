//! Demo autopilot
//!
//! Keeps the paddle under the ball. Used by the headless binary.

use super::state::SessionState;
use super::tick::TickInput;

/// How far off-centre the ball may be before the paddle chases it
const DEADZONE: f32 = 12.0;

pub fn autopilot(state: &SessionState) -> TickInput {
    let paddle_center = state.paddle.x + state.paddle.width / 2.0;
    // Lead the ball a little so the paddle arrives in time
    let target = state.ball.pos.x + state.ball.vel.x as f32 * 4.0;
    let offset = target - paddle_center;
    TickInput {
        left: offset < -DEADZONE,
        right: offset > DEADZONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::{IVec2, Vec2};

    #[test]
    fn test_chases_ball() {
        let mut state = SessionState::new(STARTING_LIVES, LEVEL_TIME_SECS, 0);
        state.ball.vel = IVec2::new(2, -2);
        state.ball.pos = Vec2::new(100.0, 300.0);
        assert_eq!(autopilot(&state), TickInput { left: true, right: false });
        state.ball.pos = Vec2::new(700.0, 300.0);
        assert_eq!(autopilot(&state), TickInput { left: false, right: true });
        state.ball.pos = Vec2::new(392.0, 300.0);
        assert_eq!(autopilot(&state), TickInput::default());
    }
}

//! One animation frame
//!
//! Draw, move, then resolve collisions in a fixed order: bricks, paddle,
//! walls, floor. The caller decides what a lost ball or a cleared grid means.

use rand::Rng;

use super::collision::{
    ball_ceiling_collision, ball_floor_crossing, ball_paddle_contact, ball_side_wall_collision,
};
use super::combo::awards_life;
use super::state::SessionState;
use crate::platform::{Color, Platform, Rect};
use crate::settings::Settings;

/// Held movement keys for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// What the frame ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Ball crossed the floor away from the paddle
    BallLost,
    /// Last brick went down this frame
    Cleared,
}

/// Advance the session by one frame at host time `now` (ms)
pub fn step_frame<P: Platform, R: Rng + ?Sized>(
    state: &mut SessionState,
    input: &TickInput,
    now: f64,
    rng: &mut R,
    settings: &Settings,
    platform: &mut P,
) -> FrameOutcome {
    platform.clear_frame(Color::rgba(0, 0, 0, settings.clear_alpha()));

    state.grid.draw(platform);
    platform.fill_circle(state.ball.pos, state.ball.radius, Color::BLUE);
    let paddle = &state.paddle;
    platform.fill_rect(Rect::new(paddle.x, paddle.y, paddle.width, paddle.height), Color::BLUE);

    state.ball.advance();

    // Bricks: first match in scan order takes the hit
    if let Some((col, row)) = state.grid.hit_test(state.ball.pos) {
        state.ball.bounce_y();
        if let Some(center) = state.grid.strike(col, row) {
            let points = state.combo.register_hit(now);
            state.score += points;
            platform.set_score_text(state.score);
            if awards_life(state.score) {
                state.lives += 1;
                platform.set_lives_text(state.lives);
                log::info!("Extra life at {} points ({} lives)", state.score, state.lives);
            }
            platform.play_hit_sound();
            state.particles.spawn(center, rng);
            log::debug!(
                "Brick ({col}, {row}) hit: +{points} (combo {}), score {}",
                state.combo.count,
                state.score
            );
        }
    }
    let cleared = state.grid.all_cleared();

    if ball_paddle_contact(&state.ball, &state.paddle) {
        state.ball.bounce_y();
    }

    let mut lost = false;
    if ball_side_wall_collision(&state.ball) {
        state.ball.bounce_x();
    }
    if ball_ceiling_collision(&state.ball) {
        state.ball.bounce_y();
    } else if ball_floor_crossing(&state.ball) {
        // Second chance for a ball the paddle check above just missed
        if state.paddle.spans(state.ball.pos.x) {
            state.ball.bounce_y();
        } else if !cleared {
            lost = true;
        }
    }

    state.particles.update();
    state.particles.draw(platform);

    state.paddle.steer(input.left, input.right);

    if cleared {
        FrameOutcome::Cleared
    } else if lost {
        FrameOutcome::BallLost
    } else {
        FrameOutcome::Continue
    }
}

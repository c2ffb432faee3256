//! Axis-aligned collision checks
//!
//! Everything is tested against the ball centre or its bottom edge; there is
//! no circle/box overlap test, so a fast ball can skip a thin brick.

use super::state::{Ball, Paddle};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Ball centre over the paddle and ball bottom inside the paddle's band
pub fn ball_paddle_contact(ball: &Ball, paddle: &Paddle) -> bool {
    let bottom = ball.bottom();
    paddle.spans(ball.pos.x) && bottom > paddle.y && bottom < paddle.y + paddle.height
}

/// Next step would carry the ball past the left or right wall
pub fn ball_side_wall_collision(ball: &Ball) -> bool {
    let next_x = ball.pos.x + ball.vel.x as f32;
    next_x > CANVAS_WIDTH - ball.radius || next_x < ball.radius
}

/// Next step would carry the ball past the ceiling
pub fn ball_ceiling_collision(ball: &Ball) -> bool {
    ball.pos.y + (ball.vel.y as f32) < ball.radius
}

/// Next step would carry the ball past the floor
pub fn ball_floor_crossing(ball: &Ball) -> bool {
    ball.pos.y + (ball.vel.y as f32) > CANVAS_HEIGHT - ball.radius
}

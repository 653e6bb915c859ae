//! Collision tests for an axis-aligned arena
//!
//! Everything here is a pure geometric predicate: bricks, paddle and walls
//! are all axis-aligned, so the ball is tested as a point against rectangles
//! grown by its radius.

use glam::Vec2;

use crate::consts::*;

/// Ball centre inside the rectangle `[min, min + size]` expanded by `radius`
///
/// Bounds are strict, so a ball exactly `radius` away from an edge does not
/// count as touching.
#[inline]
pub fn ball_overlaps_rect(center: Vec2, radius: f32, min: Vec2, size: Vec2) -> bool {
    center.x > min.x - radius
        && center.x < min.x + size.x + radius
        && center.y > min.y - radius
        && center.y < min.y + size.y + radius
}

/// Whether a predicted vertical position lies in the paddle's catch band
///
/// The band starts one paddle height plus a radius above the paddle's top
/// edge and ends one paddle height below it.
#[inline]
pub fn in_paddle_band(next_y: f32, radius: f32) -> bool {
    next_y > PADDLE_TOP - PADDLE_HEIGHT - radius && next_y < PADDLE_TOP + PADDLE_HEIGHT
}

/// Whether the ball's current x lies strictly within the paddle's span
#[inline]
pub fn within_paddle_span(x: f32, paddle_left: f32) -> bool {
    x > paddle_left && x < paddle_left + PADDLE_WIDTH
}

/// Deflection angle (radians from vertical) for a hit at `x`
///
/// The offset from the paddle centre is normalized to `[-1, 1]` and scaled
/// to `±MAX_BOUNCE_ANGLE`.
pub fn paddle_deflection_angle(x: f32, paddle_left: f32) -> f32 {
    let half = PADDLE_WIDTH / 2.0;
    let offset = ((x - (paddle_left + half)) / half).clamp(-1.0, 1.0);
    offset * MAX_BOUNCE_ANGLE
}

/// Velocity leaving the paddle at `angle`, always at base speed
#[inline]
pub fn paddle_bounce_velocity(angle: f32) -> Vec2 {
    Vec2::new(BALL_BASE_SPEED * angle.sin(), -BALL_BASE_SPEED * angle.cos())
}

/// Walls the ball would cross on its next step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    /// Ceiling
    pub top: bool,
    /// Floor (life lost). Never set together with `top`.
    pub floor: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.top || self.floor
    }
}

/// Predict wall contacts from the current position and pending velocity
pub fn wall_contact(pos: Vec2, vel: Vec2, radius: f32) -> WallContact {
    let next = pos + vel;
    let side = next.x > ARENA_WIDTH - radius || next.x < radius;
    let top = next.y < radius;
    let floor = !top && next.y > ARENA_HEIGHT - radius;
    WallContact { side, top, floor }
}

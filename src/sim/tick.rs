//! Per-frame simulation step
//!
//! Order within a tick: bricks, win check, paddle, walls/floor, integrate.
//! All collision tests look at the pre-integration position and the pending
//! velocity; the position only moves at the very end.

use super::collision::{
    ball_overlaps_rect, in_paddle_band, paddle_bounce_velocity, paddle_deflection_angle,
    wall_contact, within_paddle_span,
};
use super::phase::PhaseEvent;
use super::state::{Brick, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one tick
///
/// Does nothing unless the phase is `Playing`. Returns whether the
/// simulation advanced.
pub fn tick(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.time_ticks += 1;

    // Bricks: no early exit, every overlapping brick flips vel.y again
    let mut still_active = 0;
    for (index, brick) in state.bricks.iter_mut().enumerate() {
        if !brick.is_active() {
            continue;
        }
        if ball_overlaps_rect(state.ball.pos, state.ball.radius, brick.pos, Brick::size()) {
            state.ball.vel.y = -state.ball.vel.y;
            brick.destroy();
            state.score += SCORE_PER_BRICK;
            state.events.push(GameEvent::BrickDestroyed {
                index,
                score: state.score,
            });
        } else {
            still_active += 1;
        }
    }

    if still_active == 0 && !state.bricks.is_empty() {
        state.apply_phase_event(PhaseEvent::BricksCleared);
    }

    // Paddle: full velocity reset to base speed
    let ball = &mut state.ball;
    if in_paddle_band(ball.pos.y + ball.vel.y, ball.radius)
        && within_paddle_span(ball.pos.x, state.paddle.x())
    {
        let angle = paddle_deflection_angle(ball.pos.x, state.paddle.x());
        ball.vel = paddle_bounce_velocity(angle);
        state.events.push(GameEvent::PaddleHit { angle });
    }

    let contact = wall_contact(ball.pos, ball.vel, ball.radius);
    if contact.side {
        ball.vel.x = -ball.vel.x;
    }
    if contact.top {
        ball.vel.y = -ball.vel.y;
    }
    if contact.side || contact.top {
        state.events.push(GameEvent::WallBounce);
    }

    // A floor contact ends the tick: either a fresh serve or a frozen final frame
    if contact.floor && state.phase == GamePhase::Playing {
        lose_life(state);
        return true;
    }

    state.ball.pos += state.ball.vel;
    true
}

/// Ball reached the floor
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });
    log::info!("Life lost, {} remaining", state.lives);

    if state.lives == 0 {
        state.apply_phase_event(PhaseEvent::LivesExhausted);
    } else {
        state.reset_ball_and_paddle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BrickStatus;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.primary_action();
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_requires_playing() {
        let mut state = GameState::new(12345);
        let before = state.ball;
        assert!(!tick(&mut state));
        assert_eq!(state.ball, before);
        assert_eq!(state.time_ticks, 0);

        state.primary_action();
        state.toggle_pause();
        let before = state.ball;
        assert!(!tick(&mut state));
        assert_eq!(state.ball, before);
    }

    #[test]
    fn test_free_flight_integrates() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(400.0, 300.0);
        state.ball.vel = Vec2::new(5.0, -5.0);
        assert!(tick(&mut state));
        assert_eq!(state.ball.pos, Vec2::new(405.0, 295.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, -5.0));
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_brick_corner_hit() {
        let mut state = playing(1);
        let corner = state.bricks[0].pos;
        state.ball.pos = corner;
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state);

        assert_eq!(state.bricks[0].status, BrickStatus::Destroyed);
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(state.active_brick_count(), 44);
        assert_eq!(
            state.events()[0],
            GameEvent::BrickDestroyed { index: 0, score: 10 }
        );
    }

    #[test]
    fn test_double_hit_compounds_flip() {
        let mut state = playing(1);
        // Between row 0 and row 1 of column 0; both expanded rects contain it
        state.ball.pos = Vec2::new(60.0, 80.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state);

        assert_eq!(state.bricks[0].status, BrickStatus::Destroyed);
        assert_eq!(state.bricks[1].status, BrickStatus::Destroyed);
        assert_eq!(state.score, 20);
        // Flipped twice
        assert_eq!(state.ball.vel.y, -5.0);
    }

    #[test]
    fn test_destroyed_bricks_are_ignored() {
        let mut state = playing(1);
        state.bricks[0].destroy();
        state.ball.pos = state.bricks[0].pos + Vec2::new(10.0, 10.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state);

        assert_eq!(state.score, 0);
        assert_eq!(state.ball.vel.y, -5.0);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut state = playing(1);
        let last = state.bricks.len() - 1;
        for brick in &mut state.bricks[..last] {
            brick.destroy();
        }
        state.ball.pos = state.bricks[last].pos + Vec2::new(5.0, 5.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.active_brick_count(), 0);
        assert!(state.events().contains(&GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::Win
        }));

        // Loop is over
        let frozen = state.ball;
        assert!(!tick(&mut state));
        assert_eq!(state.ball, frozen);
    }

    #[test]
    fn test_paddle_deflection() {
        let mut state = playing(1);
        let hit_x = state.paddle.center_x() + 30.0;
        state.ball.pos = Vec2::new(hit_x, 540.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        tick(&mut state);

        let angle = 0.5 * MAX_BOUNCE_ANGLE;
        let expected = Vec2::new(BALL_BASE_SPEED * angle.sin(), -BALL_BASE_SPEED * angle.cos());
        assert!((state.ball.vel - expected).length() < 1e-5);
        assert!((state.ball.speed() - BALL_BASE_SPEED).abs() < 1e-5);
        assert!(matches!(state.events()[0], GameEvent::PaddleHit { .. }));
    }

    #[test]
    fn test_paddle_restores_base_speed() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(state.paddle.center_x(), 540.0);
        state.ball.vel = Vec2::new(3.0, 11.0);

        tick(&mut state);

        assert!((state.ball.speed() - BALL_BASE_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_miss_outside_span() {
        let mut state = playing(1);
        state.move_paddle_to(0.0);
        state.ball.pos = Vec2::new(600.0, 540.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        tick(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(0.0, 5.0));
        assert_eq!(state.ball.pos, Vec2::new(600.0, 545.0));
    }

    #[test]
    fn test_side_wall_reflects() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(15.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 5.0);

        tick(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.ball.pos, Vec2::new(20.0, 305.0));
        assert_eq!(state.events(), &[GameEvent::WallBounce]);
    }

    #[test]
    fn test_ceiling_reflects() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(400.0, 15.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state);

        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.ball.pos, Vec2::new(405.0, 20.0));
    }

    #[test]
    fn test_floor_with_last_life_ends_game() {
        let mut state = playing(1);
        state.lives = 1;
        state.move_paddle_to(10.0);
        state.ball.pos = Vec2::new(400.0, 585.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        tick(&mut state);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Not re-served
        assert_eq!(state.ball.pos, Vec2::new(400.0, 585.0));
        assert_eq!(state.paddle.x(), 10.0);
        assert!(!tick(&mut state));
    }

    #[test]
    fn test_floor_with_lives_left_reserves() {
        let mut state = playing(1);
        state.lives = 2;
        state.score = 40;
        state.bricks[7].destroy();
        state.move_paddle_to(10.0);
        state.ball.pos = Vec2::new(400.0, 585.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        tick(&mut state);

        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.paddle.x(), (ARENA_WIDTH - PADDLE_WIDTH) / 2.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 538.0));
        assert_eq!(state.ball.vel.y, -BALL_BASE_SPEED);
        // Level progress survives a lost life
        assert_eq!(state.score, 40);
        assert_eq!(state.active_brick_count(), 44);
        assert_eq!(state.events(), &[GameEvent::LifeLost { remaining: 1 }]);
    }
}

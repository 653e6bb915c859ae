//! Frame painting
//!
//! [`paint_frame`] draws the game onto anything implementing [`Painter`].
//! It only reads the state. [`VertexBatch`] is the painter the GPU pipeline
//! consumes.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Vertex, colors};
use crate::consts::{PADDLE_HEIGHT, PADDLE_WIDTH};
use crate::rgb_to_rgba;
use crate::sim::{Brick, GameState};

/// A 2D surface with filled primitives. Colors are packed 0xRRGGBB.
pub trait Painter {
    fn clear(&mut self, color: u32);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: u32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32);
}

/// Paint one frame: background, active bricks, ball, paddle
pub fn paint_frame<P: Painter + ?Sized>(state: &GameState, painter: &mut P) {
    painter.clear(colors::BACKGROUND);

    let brick_size = Brick::size();
    for brick in state.bricks.iter().filter(|b| b.is_active()) {
        painter.fill_rect(brick.pos, brick_size, brick.color);
    }

    painter.fill_circle(state.ball.pos, state.ball.radius, colors::BALL);

    painter.fill_rect(
        state.paddle.top_left(),
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        colors::PADDLE,
    );
}

/// Collects a frame as triangle-list vertices in arena pixels
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub clear_color: [f32; 4],
    pub vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the batch for the current state
    pub fn from_state(state: &GameState) -> Self {
        let mut batch = Self::new();
        paint_frame(state, &mut batch);
        batch
    }
}

impl Painter for VertexBatch {
    fn clear(&mut self, color: u32) {
        self.clear_color = rgb_to_rgba(color, 1.0);
        self.vertices.clear();
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: u32) {
        self.vertices
            .extend_from_slice(&shapes::rect(min, size, rgb_to_rgba(color, 1.0)));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
        self.vertices.extend(shapes::circle(
            center,
            radius,
            rgb_to_rgba(color, 1.0),
            CIRCLE_SEGMENTS,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PADDLE_TOP;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(u32),
        Rect(Vec2, Vec2, u32),
        Circle(Vec2, f32, u32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Painter for Recorder {
        fn clear(&mut self, color: u32) {
            self.0.push(Op::Clear(color));
        }
        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: u32) {
            self.0.push(Op::Rect(min, size, color));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
            self.0.push(Op::Circle(center, radius, color));
        }
    }

    #[test]
    fn test_paint_order() {
        let state = GameState::new(2);
        let mut rec = Recorder::default();
        paint_frame(&state, &mut rec);

        // clear + 45 bricks + ball + paddle
        assert_eq!(rec.0.len(), 48);
        assert_eq!(rec.0[0], Op::Clear(colors::BACKGROUND));
        assert_eq!(
            rec.0[1],
            Op::Rect(state.bricks[0].pos, Brick::size(), state.bricks[0].color)
        );
        assert_eq!(
            rec.0[46],
            Op::Circle(state.ball.pos, state.ball.radius, colors::BALL)
        );
        assert_eq!(
            rec.0[47],
            Op::Rect(
                Vec2::new(state.paddle.x(), PADDLE_TOP),
                Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
                colors::PADDLE
            )
        );
    }

    #[test]
    fn test_destroyed_bricks_not_painted() {
        let mut state = GameState::new(2);
        state.bricks[0].destroy();
        state.bricks[10].destroy();
        let mut rec = Recorder::default();
        paint_frame(&state, &mut rec);
        assert_eq!(rec.0.len(), 46);
    }

    #[test]
    fn test_painting_does_not_mutate() {
        let state = GameState::new(2);
        let before = state.snapshot();
        let _ = VertexBatch::from_state(&state);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_vertex_batch_counts() {
        let state = GameState::new(2);
        let batch = VertexBatch::from_state(&state);
        let expected = 45 * 6 + CIRCLE_SEGMENTS as usize * 3 + 6;
        assert_eq!(batch.vertices.len(), expected);
        assert_eq!(batch.clear_color, rgb_to_rgba(colors::BACKGROUND, 1.0));
    }
}

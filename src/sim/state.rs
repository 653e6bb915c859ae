//! Game state and core simulation types
//!
//! `GameState` is the single owned aggregate: ball, paddle, bricks, score,
//! lives and phase all live here and are only mutated through its methods
//! and the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the primary action
    #[default]
    Start,
    /// Active gameplay (the only phase in which the tick advances)
    Playing,
    /// Game is paused
    Paused,
    /// All lives lost
    GameOver,
    /// Every brick destroyed
    Win,
}

impl GamePhase {
    /// Phases from which the primary action starts a fresh game
    pub fn starts_new_game(self) -> bool {
        matches!(self, GamePhase::Start | GamePhase::GameOver | GamePhase::Win)
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball resting just above the centred paddle, launched upward
    pub fn serve(horizontal_sign: f32) -> Self {
        Self {
            pos: Vec2::new(
                ARENA_WIDTH / 2.0,
                PADDLE_TOP - PADDLE_HEIGHT - BALL_RADIUS,
            ),
            vel: Vec2::new(BALL_BASE_SPEED * horizontal_sign, -BALL_BASE_SPEED),
            radius: BALL_RADIUS,
        }
    }

    /// Position after the pending velocity is applied
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle
///
/// Only the left edge moves; width, height and vertical offset are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: Self::max_x() / 2.0,
        }
    }
}

impl Paddle {
    /// Largest legal left edge
    #[inline]
    pub const fn max_x() -> f32 {
        ARENA_WIDTH - PADDLE_WIDTH
    }

    /// Left edge
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Horizontal centre
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + PADDLE_WIDTH / 2.0
    }

    /// Top-left corner of the paddle rectangle
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, PADDLE_TOP)
    }

    /// Move the left edge, clamped to `[0, ARENA_WIDTH - PADDLE_WIDTH]`
    pub fn set_x(&mut self, x: f32) {
        // NaN would slip through clamp; keep the old position instead
        if x.is_nan() {
            return;
        }
        self.x = x.clamp(0.0, Self::max_x());
    }
}

/// Brick lifecycle, one-way Active -> Destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub column: usize,
    /// Top-left corner, fixed at layout time
    pub pos: Vec2,
    /// Packed 0xRRGGBB
    pub color: u32,
    pub status: BrickStatus,
}

impl Brick {
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            pos: Vec2::new(
                BRICK_OFFSET_LEFT + column as f32 * (BRICK_WIDTH + BRICK_PADDING),
                BRICK_OFFSET_TOP + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
            ),
            color: BRICK_COLORS[row % BRICK_COLORS.len()],
            status: BrickStatus::Active,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        let was_active = self.is_active();
        self.status = BrickStatus::Destroyed;
        was_active
    }
}

/// Build the full level: column-major, every brick active
pub fn build_brick_grid() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROW_COUNT * BRICK_COLUMN_COUNT);
    for column in 0..BRICK_COLUMN_COUNT {
        for row in 0..BRICK_ROW_COUNT {
            bricks.push(Brick::new(row, column));
        }
    }
    bricks
}

/// Something that happened during a tick or an input, for the shell to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score, lives and bricks were reinitialized
    GameReset,
    /// A brick was destroyed (index into `bricks`)
    BrickDestroyed { index: usize, score: u64 },
    /// Ball deflected off the paddle
    PaddleHit { angle: f32 },
    /// Ball reflected off a side wall or the ceiling
    WallBounce,
    /// Ball reached the floor
    LifeLost { remaining: u8 },
    /// Phase changed
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Fixed grid, column-major
    pub bricks: Vec<Brick>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain (not part of the snapshot)
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a freshly reset game in the `Start` phase
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            lives: INITIAL_LIVES,
            ball: Ball::serve(1.0),
            paddle: Paddle::default(),
            bricks: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_game();
        state.events.clear();
        state
    }

    /// Reinitialize score, lives and the brick grid, then re-serve
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.bricks = build_brick_grid();
        self.reset_ball_and_paddle();
        self.events.push(GameEvent::GameReset);
        log::debug!("Game reset ({} bricks)", self.bricks.len());
    }

    /// Centre the paddle and serve a new ball in a random horizontal direction
    ///
    /// Bricks, score and lives are untouched.
    pub fn reset_ball_and_paddle(&mut self) {
        self.paddle = Paddle::default();
        let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball = Ball::serve(sign);
    }

    /// Number of bricks not yet destroyed
    pub fn active_brick_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    /// Lives as shown to the player (never below zero)
    pub fn displayed_lives(&self) -> u8 {
        self.lives
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Set the phase, recording a `PhaseChanged` event if it differs
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        log::info!("Phase {:?} -> {:?} (score {}, lives {})", from, to, self.score, self.lives);
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.displayed_lives(),
            ball: self.ball,
            paddle_x: self.paddle.x(),
            bricks: self.bricks.clone(),
        }
    }
}

/// Per-frame read-only copy of everything the presentation layer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub ball: Ball,
    pub paddle_x: f32,
    pub bricks: Vec<Brick>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.bricks.len(), 45);
        assert_eq!(state.active_brick_count(), 45);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_brick_layout() {
        let bricks = build_brick_grid();
        // Column-major: second entry is row 1 of column 0
        assert_eq!((bricks[0].row, bricks[0].column), (0, 0));
        assert_eq!((bricks[1].row, bricks[1].column), (1, 0));
        assert_eq!(bricks[0].pos, Vec2::new(30.0, 50.0));
        assert_eq!(bricks[1].pos, Vec2::new(30.0, 85.0));

        let last = bricks.last().unwrap();
        assert_eq!((last.row, last.column), (4, 8));
        assert_eq!(last.pos, Vec2::new(30.0 + 8.0 * 85.0, 50.0 + 4.0 * 35.0));
    }

    #[test]
    fn test_brick_colors_by_row() {
        for brick in build_brick_grid() {
            assert_eq!(brick.color, BRICK_COLORS[brick.row % BRICK_COLORS.len()]);
        }
    }

    #[test]
    fn test_brick_destroy_is_one_way() {
        let mut brick = Brick::new(0, 0);
        assert!(brick.destroy());
        assert!(!brick.destroy());
        assert_eq!(brick.status, BrickStatus::Destroyed);
    }

    #[test]
    fn test_serve_position_and_speed() {
        let state = GameState::new(7);
        assert_eq!(state.paddle.x(), 340.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 538.0));
        assert_eq!(state.ball.vel.y, -BALL_BASE_SPEED);
        assert_eq!(state.ball.vel.x.abs(), BALL_BASE_SPEED);
    }

    #[test]
    fn test_serve_direction_uses_both_signs() {
        let mut state = GameState::new(1);
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..64 {
            state.reset_ball_and_paddle();
            if state.ball.vel.x < 0.0 {
                seen_left = true;
            } else {
                seen_right = true;
            }
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    fn test_same_seed_same_serve() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        assert_eq!(a.ball, b.ball);
    }

    #[test]
    fn test_reset_game_is_idempotent() {
        let mut state = GameState::new(5);
        state.score = 120;
        state.lives = 1;
        state.bricks[3].destroy();
        state.paddle.set_x(0.0);

        state.reset_game();
        let first = state.snapshot();
        state.reset_game();
        let second = state.snapshot();

        assert_eq!(first.score, 0);
        assert_eq!(first.lives, INITIAL_LIVES);
        assert_eq!(first.bricks, second.bricks);
        assert_eq!(first.paddle_x, second.paddle_x);
        assert_eq!(first.ball.pos, second.ball.pos);
        assert_eq!(first.ball.vel.y, second.ball.vel.y);
        assert_eq!(first.ball.vel.x.abs(), second.ball.vel.x.abs());
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::default();
        paddle.set_x(-50.0);
        assert_eq!(paddle.x(), 0.0);
        paddle.set_x(10_000.0);
        assert_eq!(paddle.x(), ARENA_WIDTH - PADDLE_WIDTH);
        paddle.set_x(f32::NAN);
        assert_eq!(paddle.x(), ARENA_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_set_phase_records_event() {
        let mut state = GameState::new(3);
        state.set_phase(GamePhase::Playing);
        state.set_phase(GamePhase::Playing);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Start,
                to: GamePhase::Playing
            }]
        );
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(11);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bricks.len(), 45);
        assert_eq!(back.phase, GamePhase::Start);
    }
}

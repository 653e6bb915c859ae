//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed per-tick velocities
//! - Seeded RNG only
//! - Stable iteration order (brick grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod control;
pub mod phase;
pub mod state;
pub mod tick;

pub use collision::{WallContact, ball_overlaps_rect, wall_contact};
pub use phase::{PhaseEvent, Transition, transition};
pub use state::{
    Ball, Brick, BrickStatus, GameEvent, GamePhase, GameState, Paddle, Snapshot, build_brick_grid,
};
pub use tick::tick;

//! Input mapping
//!
//! Turns raw pointer coordinates and key names into game commands. The
//! browser shell feeds DOM events through here; tests and the native demo
//! call the same functions directly.

use crate::consts::{ARENA_WIDTH, PADDLE_WIDTH};
use crate::sim::{GamePhase, GameState, Paddle};

/// A command for the game state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    /// Put the paddle's left edge here (already clamped)
    MovePaddle(f32),
    /// Pause key
    TogglePause,
    /// Start / restart / resume
    PrimaryAction,
}

impl InputCommand {
    /// Apply to the game. Returns the new phase if the command changed it.
    pub fn apply(self, state: &mut GameState) -> Option<GamePhase> {
        match self {
            InputCommand::MovePaddle(x) => {
                state.move_paddle_to(x);
                None
            }
            InputCommand::TogglePause => state.toggle_pause(),
            InputCommand::PrimaryAction => state.primary_action(),
        }
    }
}

/// Where the drawing surface sits on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    /// Left edge of the surface in client coordinates
    pub left: f32,
    /// Displayed width in client pixels
    pub width: f32,
}

impl Default for SurfaceRect {
    fn default() -> Self {
        Self {
            left: 0.0,
            width: ARENA_WIDTH,
        }
    }
}

impl SurfaceRect {
    /// Client x to arena x, accounting for CSS scaling of the surface
    pub fn to_arena_x(&self, client_x: f32) -> f32 {
        let relative = client_x - self.left;
        if self.width > 0.0 {
            relative * ARENA_WIDTH / self.width
        } else {
            relative
        }
    }
}

/// Paddle left edge for a pointer at `client_x`, centred under the pointer
///
/// Returns `None` when the pointer is outside the surface horizontally.
pub fn pointer_to_paddle_x(client_x: f32, surface: &SurfaceRect) -> Option<f32> {
    let x = surface.to_arena_x(client_x);
    if x > 0.0 && x < ARENA_WIDTH {
        Some((x - PADDLE_WIDTH / 2.0).clamp(0.0, Paddle::max_x()))
    } else {
        None
    }
}

/// Pointer motion as a command
pub fn pointer_command(client_x: f32, surface: &SurfaceRect) -> Option<InputCommand> {
    pointer_to_paddle_x(client_x, surface).map(InputCommand::MovePaddle)
}

/// Key name (DOM `KeyboardEvent.key`) as a command
pub fn key_command(key: &str) -> Option<InputCommand> {
    match key {
        "p" | "P" | "Escape" => Some(InputCommand::TogglePause),
        _ => None,
    }
}

/// Demo/idle input: keep the paddle under the ball
///
/// An oscillating offset varies the hit point so the ball does not bounce
/// straight up and down forever.
pub fn autopilot_command(state: &GameState) -> InputCommand {
    let time_factor = state.time_ticks as f32 * 0.05;
    let offset = time_factor.sin() * PADDLE_WIDTH * 0.35;
    let target = state.ball.pos.x - PADDLE_WIDTH / 2.0 - offset;
    InputCommand::MovePaddle(target.clamp(0.0, Paddle::max_x()))
}

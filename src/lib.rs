//! Block Breaker - a classic brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: 2D painting and the WebGPU pipeline
//! - `platform`: Input mapping and the frame loop
//! - `ui`: Overlay screens and HUD text

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use sim::{GamePhase, GameState, Snapshot};

/// Game configuration constants
///
/// Coordinates are arena pixels with the origin at the top-left corner and
/// y growing downward. Speeds are pixels per tick.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Distance from the arena floor to the paddle's top edge
    pub const PADDLE_Y_OFFSET: f32 = 30.0;
    /// Top edge of the paddle (fixed)
    pub const PADDLE_TOP: f32 = ARENA_HEIGHT - PADDLE_Y_OFFSET;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Speed assigned on every serve and every paddle bounce
    pub const BALL_BASE_SPEED: f32 = 5.0;
    /// Maximum paddle deflection from vertical (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Brick grid
    pub const BRICK_ROW_COUNT: usize = 5;
    pub const BRICK_COLUMN_COUNT: usize = 9;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Row palette (0xRRGGBB), cycled by row index
    pub const BRICK_COLORS: [u32; 5] = [0xEF4444, 0xF97316, 0xEAB308, 0x84CC16, 0x22C55E];

    /// Economy
    pub const INITIAL_LIVES: u8 = 3;
    pub const SCORE_PER_BRICK: u64 = 10;
}

/// Convert a packed 0xRRGGBB color to normalized RGBA
#[inline]
pub fn rgb_to_rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let r = ((rgb >> 16) & 0xFF) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xFF) as f32 / 255.0;
    let b = (rgb & 0xFF) as f32 / 255.0;
    [r, g, b, alpha]
}

/// Format a packed 0xRRGGBB color as a CSS hex string
pub fn rgb_to_css(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xFF_FFFF)
}

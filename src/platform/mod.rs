//! Platform abstraction layer
//!
//! Handles the host-facing edges of the game:
//! - Input events (pointer, keys, primary action)
//! - Frame scheduling

pub mod frame_loop;
pub mod input;

pub use frame_loop::{FrameLoop, FrameOutcome, LoopChange};
pub use input::{
    InputCommand, SurfaceRect, autopilot_command, key_command, pointer_command,
    pointer_to_paddle_x,
};

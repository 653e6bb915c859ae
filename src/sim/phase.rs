//! Phase transition table
//!
//! Every legal phase change goes through [`transition`]; anything it returns
//! `None` for is ignored by the engine.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Inputs that can move the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    /// Overlay button / click
    PrimaryAction,
    /// Pause key (P or Escape)
    TogglePause,
    /// Last active brick destroyed
    BricksCleared,
    /// Lives reached zero
    LivesExhausted,
}

/// Result of a legal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: GamePhase,
    /// Whether `reset_game` must run before entering `to`
    pub reset: bool,
}

/// Next phase for `(current, event)`, or `None` if the event is ignored
pub fn transition(current: GamePhase, event: PhaseEvent) -> Option<Transition> {
    use GamePhase::*;
    use PhaseEvent::*;

    let (to, reset) = match (current, event) {
        (Start | GameOver | Win, PrimaryAction) => (Playing, true),
        (Paused, PrimaryAction) => (Playing, false),
        (Playing, TogglePause) => (Paused, false),
        (Paused, TogglePause) => (Playing, false),
        (Playing, BricksCleared) => (Win, false),
        (Playing, LivesExhausted) => (GameOver, false),
        _ => return None,
    };
    Some(Transition { to, reset })
}

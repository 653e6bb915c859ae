//! Player-facing commands on the game state
//!
//! Input handlers route through these methods; phase changes always go
//! through the transition table.

use super::phase::{PhaseEvent, transition};
use super::state::{GamePhase, GameState};

impl GameState {
    /// Feed an event to the phase machine
    ///
    /// Returns the new phase, or `None` if the event was ignored in the
    /// current phase.
    pub fn apply_phase_event(&mut self, event: PhaseEvent) -> Option<GamePhase> {
        let t = transition(self.phase, event)?;
        if t.reset {
            self.reset_game();
        }
        self.set_phase(t.to);
        Some(t.to)
    }

    /// Start / restart / resume, depending on the current phase
    pub fn primary_action(&mut self) -> Option<GamePhase> {
        self.apply_phase_event(PhaseEvent::PrimaryAction)
    }

    /// Pause key: Playing <-> Paused, ignored elsewhere
    pub fn toggle_pause(&mut self) -> Option<GamePhase> {
        self.apply_phase_event(PhaseEvent::TogglePause)
    }

    /// Move the paddle's left edge, clamped to the arena
    ///
    /// Not gated by phase: the paddle follows the pointer even while paused.
    pub fn move_paddle_to(&mut self, x: f32) {
        self.paddle.set_x(x);
    }
}

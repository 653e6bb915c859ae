//! Menu overlay shown over the arena whenever the game is not running

use crate::sim::{GamePhase, GameState};

/// Controls hint shown on the title screen
pub const CONTROLS_HINT: &str = "Move your mouse to control the paddle. Press 'P' to pause.";

/// Content of the overlay for one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    /// Label of the primary action button
    pub button: &'static str,
    /// Final score line, on game over and win only
    pub score_line: Option<String>,
    pub hint: Option<&'static str>,
}

impl Overlay {
    /// Overlay for the current state, or `None` while playing
    pub fn for_state(state: &GameState) -> Option<Self> {
        let (title, button) = match state.phase {
            GamePhase::Playing => return None,
            GamePhase::Start => ("Block Breaker", "Start Game"),
            GamePhase::GameOver => ("Game Over", "Try Again"),
            GamePhase::Win => ("You Win!", "Play Again"),
            GamePhase::Paused => ("Paused", "Resume"),
        };
        let score_line = matches!(state.phase, GamePhase::GameOver | GamePhase::Win)
            .then(|| format!("Your Score: {}", state.score));
        let hint = (state.phase == GamePhase::Start).then_some(CONTROLS_HINT);
        Some(Self {
            title,
            button,
            score_line,
            hint,
        })
    }
}

//! Score and lives readout

use crate::sim::GameState;

/// HUD values for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    /// One heart per remaining life
    pub hearts: u8,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            hearts: state.displayed_lives(),
        }
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    /// Hearts as text, for hosts without an icon set
    pub fn hearts_text(&self) -> String {
        "\u{2665}".repeat(self.hearts as usize)
    }
}

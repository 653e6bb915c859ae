//! Presentation text for the shell
//!
//! Pure functions of the game state; the browser entry point copies the
//! results into the DOM.

pub mod hud;
pub mod overlay;

pub use hud::Hud;
pub use overlay::Overlay;

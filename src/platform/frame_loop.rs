//! Frame loop driver
//!
//! The host calls [`FrameLoop::frame`] once per display refresh. The loop
//! only ticks the simulation while it is running, and it only runs while the
//! game is `Playing`; leaving `Playing` stops it. Tests drive it with a fixed
//! frame count instead of real display timing.

use crate::sim::{GamePhase, GameState, tick};

/// What a single frame signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Loop not running; nothing happened
    Idle,
    /// Simulation advanced one tick and keeps running
    Advanced,
    /// Simulation advanced and then left `Playing`; the loop stopped and the
    /// host should paint one final frame
    Stopped,
}

/// Change in the loop's running state after syncing with the game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopChange {
    Started,
    Stopped,
    Unchanged,
}

/// Start/stop/frame scheduler for the simulation
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
    /// Frames that advanced the simulation since creation
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns false if it was already running
    pub fn start(&mut self) -> bool {
        let was_running = self.running;
        self.running = true;
        !was_running
    }

    /// Idempotent. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Run exactly when the phase is `Playing`
    pub fn sync(&mut self, phase: GamePhase) -> LoopChange {
        if phase == GamePhase::Playing {
            if self.start() {
                log::debug!("Frame loop started");
                return LoopChange::Started;
            }
        } else if self.stop() {
            log::debug!("Frame loop stopped ({:?})", phase);
            return LoopChange::Stopped;
        }
        LoopChange::Unchanged
    }

    /// Handle one frame signal
    pub fn frame(&mut self, state: &mut GameState) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Idle;
        }
        if tick(state) {
            self.frames += 1;
        }
        match self.sync(state.phase) {
            LoopChange::Stopped => FrameOutcome::Stopped,
            _ => FrameOutcome::Advanced,
        }
    }

    /// Feed up to `count` frame signals, stopping early once the loop stops
    ///
    /// Returns the number of frames that advanced the simulation.
    pub fn run_frames(&mut self, state: &mut GameState, count: u64) -> u64 {
        let start = self.frames;
        for _ in 0..count {
            if self.frame(state) != FrameOutcome::Advanced {
                break;
            }
        }
        self.frames - start
    }
}

//! Round state machine
//!
//! Idle -> Running -> Ended -> Running ... Starting is the only explicit
//! transition; Running -> Ended happens inside `tick` when the timer runs out.

use std::fmt;

use super::state::{GameEvent, RoundPhase, RoundState, Viewport};

/// Rejected round transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// `start` was requested while a round is in progress
    AlreadyRunning,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::AlreadyRunning => write!(f, "a round is already running"),
        }
    }
}

impl std::error::Error for TransitionError {}

impl RoundState {
    /// Start (or restart) a round at `now_ms`.
    ///
    /// Valid from Idle and Ended. Every per-round value is reset and the RNG
    /// is reseeded with `seed`.
    pub fn start(&mut self, now_ms: f64, seed: u64, viewport: &Viewport) -> Result<(), TransitionError> {
        if self.phase == RoundPhase::Running {
            return Err(TransitionError::AlreadyRunning);
        }

        self.reset(seed, viewport);
        self.start_ms = now_ms;
        self.phase = RoundPhase::Running;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started (seed {})", seed);
        Ok(())
    }

    /// Running -> Ended. Called by `tick` once the timer hits zero.
    pub(crate) fn end(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }
        self.phase = RoundPhase::Ended;
        self.time_left = 0;
        self.events.push(GameEvent::RoundEnded { score: self.score });
        log::info!(
            "Round ended: {} caught, {} missed, {} still falling",
            self.score,
            self.missed,
            self.objects.len()
        );
    }
}

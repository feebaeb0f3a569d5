//! Game instance: round state plus everything the host shell needs per frame
//!
//! `Game::frame` is one iteration of the scheduler loop (tick + draw) and
//! tells the caller whether another frame should be scheduled. The browser
//! re-requests an animation frame on `LoopControl::Continue`; the native
//! runner and tests drive the same loop from a simulated clock.

use crate::assets::AssetSet;
use crate::input::{InputOutcome, PointerKind, handle_pointer};
use crate::renderer::{Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, RoundPhase, RoundState, TickInput, TransitionError, Viewport, tick};
use crate::tuning::Tuning;
use crate::ui::{HudCache, HudUpdate, OverlayView, Strings};

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub control: LoopControl,
    /// HUD text that needs rewriting
    pub hud: HudUpdate,
    /// Events raised during the frame
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
pub struct Game {
    pub round: RoundState,
    pub viewport: Viewport,
    pub assets: AssetSet,
    pub settings: Settings,
    hud: HudCache,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, viewport: Viewport) -> Self {
        Self {
            round: RoundState::new(seed, tuning, &viewport),
            viewport,
            assets: AssetSet::default(),
            settings,
            hud: HudCache::default(),
        }
    }

    pub fn strings(&self) -> &'static Strings {
        self.settings.locale.strings()
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    /// Start or restart a round
    pub fn start(&mut self, now_ms: f64, seed: u64) -> Result<(), TransitionError> {
        self.round.start(now_ms, seed, &self.viewport)?;
        self.hud.invalidate();
        Ok(())
    }

    /// Viewport changed; picked up by the next frame
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer(&mut self, kind: PointerKind, client_x: Option<f32>) -> InputOutcome {
        handle_pointer(&mut self.round, kind, client_x)
    }

    /// One loop iteration: tick, draw, report.
    ///
    /// Nothing is drawn once the round is no longer running; the last frame
    /// stays on screen under the overlay.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now_ms: f64) -> FrameReport {
        if !self.round.is_running() {
            return FrameReport {
                control: LoopControl::Stop,
                hud: HudUpdate::default(),
                events: self.round.drain_events(),
            };
        }

        let input = TickInput {
            now_ms,
            viewport: self.viewport,
        };
        tick(&mut self.round, &input);

        let control = if self.round.is_running() {
            draw_frame(surface, &self.round, &self.viewport, &self.assets);
            LoopControl::Continue
        } else {
            LoopControl::Stop
        };

        FrameReport {
            control,
            hud: self.hud.update(self.round.score, self.round.time_left),
            events: self.round.drain_events(),
        }
    }

    /// Drive frames from a simulated clock until the round stops or
    /// `max_frames` is reached. Returns the number of frames run.
    pub fn run_simulated<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        start_ms: f64,
        frame_ms: f64,
        max_frames: usize,
        mut on_frame: impl FnMut(&mut Self, &FrameReport),
    ) -> usize {
        let mut now = start_ms;
        let mut frames = 0;
        while frames < max_frames {
            let report = self.frame(surface, now);
            frames += 1;
            on_frame(self, &report);
            if report.control == LoopControl::Stop {
                break;
            }
            now += frame_ms;
        }
        frames
    }

    pub fn overlay(&self) -> OverlayView {
        OverlayView::for_phase(
            self.round.phase,
            self.round.score,
            self.round.tuning.round_seconds_display(),
            self.assets.all_ready(),
            self.strings(),
        )
    }

    /// Haptic pulses wanted for these events
    pub fn haptic_pulses(&self, events: &[GameEvent]) -> usize {
        if !self.settings.haptics {
            return 0;
        }
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Caught { .. }))
            .count()
    }
}

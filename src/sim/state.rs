//! Round state and core simulation types
//!
//! Everything a round mutates lives in `RoundState`, which is owned by the
//! caller and passed explicitly to `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geom::Aabb;
use crate::clamp;
use crate::tuning::Tuning;

/// Round state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// Nothing played yet, overlay visible
    #[default]
    Idle,
    /// Tick loop active
    Running,
    /// Timer ran out, overlay shows the final score
    Ended,
}

/// Layout parameters shared with the resize handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// CSS pixels
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio, already clamped
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self { width, height, dpr }
    }
}

/// Something the host should react to (HUD, haptics, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    /// Whole seconds left changed
    TimeChanged(u32),
    /// An object was caught at this position
    Caught { x: f32, y: f32 },
    RoundEnded { score: u32 },
}

/// A falling object
#[derive(Debug, Clone, PartialEq)]
pub struct FallingObject {
    /// Center position
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Fall speed (px/s)
    pub vy: f32,
    /// Current rotation (radians)
    pub angle: f32,
    /// Rotation speed (rad/s)
    pub angular_vel: f32,
}

impl FallingObject {
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.vy * dt;
        self.angle += self.angular_vel * dt;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.width, self.height)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }
}

/// The catcher
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Center x, smoothed toward the input target
    pub x: f32,
    /// Center y, pinned near the viewport bottom
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// A catcher centered horizontally in the viewport
    pub fn centered(viewport: &Viewport, tuning: &Tuning) -> Self {
        let mut player = Self {
            x: viewport.width * 0.5,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
        player.layout(viewport, tuning);
        player
    }

    /// Recompute size and vertical position from the current viewport
    pub fn layout(&mut self, viewport: &Viewport, tuning: &Tuning) {
        let (w, h) = player_size(viewport, tuning);
        self.width = w;
        self.height = h;
        self.y = viewport.height - h - tuning.player_bottom_offset - tuning.safe_area_bottom;
    }

    /// Allowed range for the catcher center
    pub fn x_bounds(&self, viewport: &Viewport, tuning: &Tuning) -> (f32, f32) {
        let half = self.width / 2.0;
        let lo = half + tuning.edge_margin;
        let hi = viewport.width - half - tuning.edge_margin;
        (lo, hi.max(lo))
    }

    /// Ease toward `target` with a frame-rate independent factor
    pub fn move_toward(&mut self, target: f32, dt: f32, viewport: &Viewport, tuning: &Tuning) {
        let (lo, hi) = self.x_bounds(viewport, tuning);
        let target = clamp(target, lo, hi);
        let factor = 1.0 - tuning.smoothing_base.powf(dt);
        self.x += (target - self.x) * factor;
        // A shrinking viewport can leave the previous position out of range
        self.x = clamp(self.x, lo, hi);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(Vec2::new(self.x, self.y), self.width, self.height)
    }
}

/// Catcher size for a viewport: width scales with the viewport within bounds
pub fn player_size(viewport: &Viewport, tuning: &Tuning) -> (f32, f32) {
    let w = clamp(
        viewport.width * tuning.player_width_frac,
        tuning.player_min_width,
        tuning.player_max_width,
    );
    (w, w * tuning.player_aspect)
}

/// Transient "+1" shown where something was caught (visual only)
#[derive(Debug, Clone, PartialEq)]
pub struct CatchPop {
    pub pos: Vec2,
    /// Seconds since the catch
    pub age: f32,
}

impl CatchPop {
    /// Remaining life in [0, 1]
    pub fn life(&self, lifetime: f32) -> f32 {
        if lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / lifetime).clamp(0.0, 1.0)
    }
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub tuning: Tuning,
    pub phase: RoundPhase,
    pub score: u32,
    /// Whole seconds remaining (ceil of the precise remainder)
    pub time_left: u32,
    /// Objects that fell past the bottom this round
    pub missed: u32,
    /// Timestamp (ms) the round started at
    pub start_ms: f64,
    /// Timestamp (ms) of the previous frame, `None` before the first frame
    pub last_frame_ms: Option<f64>,
    /// Seconds since round start, never decreases
    pub elapsed: f32,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_acc_ms: f32,
    pub player: Player,
    /// Where the input wants the catcher to be (CSS px)
    pub target_x: f32,
    pub objects: Vec<FallingObject>,
    pub pops: Vec<CatchPop>,
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    seed: u64,
}

impl RoundState {
    /// Create an idle round for the given viewport
    pub fn new(seed: u64, tuning: Tuning, viewport: &Viewport) -> Self {
        let tuning = tuning.validated();
        let player = Player::centered(viewport, &tuning);
        Self {
            phase: RoundPhase::Idle,
            score: 0,
            time_left: tuning.round_seconds_display(),
            missed: 0,
            start_ms: 0.0,
            last_frame_ms: None,
            elapsed: 0.0,
            spawn_acc_ms: 0.0,
            target_x: player.x,
            player,
            objects: Vec::new(),
            pops: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tuning,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Clear every per-round value and reseed the RNG
    pub(crate) fn reset(&mut self, seed: u64, viewport: &Viewport) {
        self.score = 0;
        self.time_left = self.tuning.round_seconds_display();
        self.missed = 0;
        self.start_ms = 0.0;
        self.last_frame_ms = None;
        self.elapsed = 0.0;
        self.spawn_acc_ms = 0.0;
        self.player = Player::centered(viewport, &self.tuning);
        self.target_x = self.player.x;
        self.objects.clear();
        self.pops.clear();
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(seed);
        self.seed = seed;
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

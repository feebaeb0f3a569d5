//! Heart Catch - a 60-second falling-hearts catch minigame
//!
//! Core modules:
//! - `sim`: Round simulation (spawning, physics, collisions, timer, round state machine)
//! - `renderer`: Canvas 2D drawing through a `Surface` abstraction
//! - `input`: Pointer/touch to catcher target mapping
//! - `platform`: Browser capabilities (viewport, haptics, fullscreen)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::{FrameReport, Game};
pub use settings::Settings;
pub use tuning::Tuning;

/// Fixed constants that are not part of game balance
pub mod consts {
    /// Device pixel ratio is clamped to this range before sizing the canvas
    pub const MIN_DEVICE_PIXEL_RATIO: f64 = 1.0;
    pub const MAX_DEVICE_PIXEL_RATIO: f64 = 3.0;

    /// Background star count (positions are derived from the star index)
    pub const STAR_COUNT: u32 = 60;
    pub const STAR_X_PRIME: u32 = 9973;
    pub const STAR_Y_PRIME: u32 = 7919;

    /// Catcher card corner radius
    pub const PLAYER_CORNER_RADIUS: f32 = 18.0;

    /// Haptic pulse on catch (milliseconds)
    pub const CATCH_VIBRATE_MS: u32 = 20;
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f32::clamp` this never panics when `lo > hi` (a viewport narrower
/// than the catcher); the lower bound wins in that case.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

//! Round simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Time comes in as frame timestamps (milliseconds)
//! - Seeded RNG only
//! - Viewport is passed in every frame, never cached

pub mod geom;
pub mod round;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geom::Aabb;
pub use round::TransitionError;
pub use spawner::{object_size, spawn_interval_ms};
pub use state::{CatchPop, FallingObject, GameEvent, Player, RoundPhase, RoundState, Viewport};
pub use tick::{TickInput, tick};

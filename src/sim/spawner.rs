//! Timed spawning of falling objects
//!
//! The spawn interval shrinks linearly with elapsed round time down to a
//! floor. Objects come from the round's seeded RNG so a round replays
//! identically from the same seed and frame timestamps.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, RoundState, Viewport};
use crate::clamp;
use crate::tuning::Tuning;

/// Current spawn interval in milliseconds for `elapsed` seconds into the round
pub fn spawn_interval_ms(tuning: &Tuning, elapsed: f32) -> f32 {
    (tuning.spawn_interval_ms - elapsed * tuning.spawn_ramp_ms_per_sec)
        .max(tuning.min_spawn_interval_ms)
}

/// Square object edge length for a viewport
pub fn object_size(viewport: &Viewport, tuning: &Tuning) -> f32 {
    clamp(
        viewport.width * tuning.object_size_frac,
        tuning.object_min_size,
        tuning.object_max_size,
    )
}

/// Build one object just above the top edge with randomized motion
pub fn spawn_object<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    viewport: &Viewport,
    elapsed: f32,
) -> FallingObject {
    let size = object_size(viewport, tuning);
    // Keep the whole object on-screen horizontally
    let x = rng.random::<f32>() * (viewport.width - size) + size / 2.0;
    let vy = tuning.base_fall_speed
        + elapsed * tuning.fall_speed_ramp
        + rng.random::<f32>() * tuning.fall_speed_jitter;
    let angular_vel = (rng.random::<f32>() * 2.0 - 1.0) * tuning.max_spin;
    let angle = rng.random::<f32>() * TAU;

    FallingObject {
        pos: Vec2::new(x, -size),
        width: size,
        height: size,
        vy,
        angle,
        angular_vel,
    }
}

/// Feed `dt` seconds into the spawn accumulator and emit every object that
/// became due. Returns the number spawned.
///
/// A long frame can release more than one object at once.
pub fn run_spawner(state: &mut RoundState, viewport: &Viewport, dt: f32) -> usize {
    state.spawn_acc_ms += dt * 1000.0;
    let interval = spawn_interval_ms(&state.tuning, state.elapsed);
    if interval <= 0.0 {
        return 0;
    }

    let mut spawned = 0;
    while state.spawn_acc_ms >= interval {
        state.spawn_acc_ms -= interval;
        let object = spawn_object(&mut state.rng, &state.tuning, viewport, state.elapsed);
        state.objects.push(object);
        spawned += 1;
    }
    spawned
}

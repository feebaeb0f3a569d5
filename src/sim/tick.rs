//! Per-frame simulation tick
//!
//! Order each frame: timer -> catcher -> spawner -> objects (move, catch, miss).

use super::spawner::run_spawner;
use super::state::{CatchPop, GameEvent, RoundState, Viewport};
use crate::clamp;

/// Everything a tick needs from the host for one frame
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Frame timestamp (ms, same clock as the round start)
    pub now_ms: f64,
    /// Viewport as of this frame
    pub viewport: Viewport,
}

/// Advance the round to `input.now_ms`.
///
/// Does nothing unless the round is running. Returns the clamped frame delta
/// that was simulated (0 when the round ended this frame).
pub fn tick(state: &mut RoundState, input: &TickInput) -> f32 {
    if !state.is_running() {
        return 0.0;
    }

    let now = input.now_ms;
    let viewport = &input.viewport;

    // First frame of a round has no previous timestamp
    let dt = match state.last_frame_ms {
        Some(last) => clamp(((now - last) / 1000.0) as f32, 0.0, state.tuning.max_frame_dt.max(0.0)),
        None => 0.0,
    };
    state.last_frame_ms = Some(now);

    // Timer
    let elapsed = (((now - state.start_ms) / 1000.0) as f32).max(0.0);
    state.elapsed = state.elapsed.max(elapsed);
    let remaining = (state.tuning.round_seconds - state.elapsed).max(0.0);
    let whole = remaining.ceil() as u32;
    if whole < state.time_left {
        state.time_left = whole;
        state.events.push(GameEvent::TimeChanged(whole));
    }
    if remaining <= 0.0 {
        state.end();
        return 0.0;
    }

    // Catcher
    state.player.layout(viewport, &state.tuning);
    let target = state.target_x;
    state.player.move_toward(target, dt, viewport, &state.tuning);

    run_spawner(state, viewport, dt);

    update_pops(state, dt);
    update_objects(state, viewport, dt);

    dt
}

/// Move every object, then resolve catches and misses in one compacting pass
fn update_objects(state: &mut RoundState, viewport: &Viewport, dt: f32) {
    let player_box = state.player.aabb();
    let miss_line = viewport.height + state.tuning.miss_margin;
    let mut caught = Vec::new();
    let mut missed = 0;

    state.objects.retain_mut(|object| {
        object.advance(dt);
        if object.aabb().intersects(&player_box) {
            caught.push(object.pos);
            return false;
        }
        if object.top() > miss_line {
            missed += 1;
            return false;
        }
        true
    });

    state.missed += missed;
    for pos in caught {
        state.score += 1;
        state.events.push(GameEvent::Caught { x: pos.x, y: pos.y });
        state.pops.push(CatchPop { pos, age: 0.0 });
    }
}

/// Age catch pops and drop the expired ones
fn update_pops(state: &mut RoundState, dt: f32) {
    let lifetime = state.tuning.pop_lifetime;
    let rise = state.tuning.pop_rise_speed;
    state.pops.retain_mut(|pop| {
        pop.age += dt;
        pop.pos.y -= rise * dt;
        pop.age < lifetime
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingObject, RoundPhase};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn vp() -> Viewport {
        Viewport::new(1000.0, 800.0, 1.0)
    }

    fn input(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            viewport: vp(),
        }
    }

    /// A round with spawning pushed far into the future so tests control objects
    fn running_round() -> RoundState {
        let tuning = Tuning {
            spawn_interval_ms: 1.0e9,
            min_spawn_interval_ms: 1.0e9,
            ..Default::default()
        };
        let mut state = RoundState::new(12345, tuning, &vp());
        state.start(0.0, 12345, &vp()).unwrap();
        tick(&mut state, &input(0.0));
        state.drain_events();
        state
    }

    fn object_at(x: f32, y: f32, vy: f32) -> FallingObject {
        FallingObject {
            pos: Vec2::new(x, y),
            width: 100.0,
            height: 100.0,
            vy,
            angle: 0.0,
            angular_vel: 1.0,
        }
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut state = RoundState::new(1, Tuning::default(), &vp());
        state.target_x = 0.0;
        assert_eq!(tick(&mut state, &input(500.0)), 0.0);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.player.x, 500.0);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_bad_tuning_override_still_ticks() {
        let tuning = Tuning::from_json(r#"{ "max_frame_dt": -0.01, "spawn_interval_ms": 0.000001 }"#).unwrap();
        let mut state = RoundState::new(3, tuning, &vp());
        state.start(0.0, 3, &vp()).unwrap();
        tick(&mut state, &input(0.0));
        let dt = tick(&mut state, &input(16.0));
        assert!((dt - 0.016).abs() < 1e-6);
        assert!(state.objects.len() <= 1);
    }

    #[test]
    fn test_negative_dt_cap_set_after_start_does_not_panic() {
        let mut state = running_round();
        state.tuning.max_frame_dt = -0.01;
        assert_eq!(tick(&mut state, &input(FRAME_MS)), 0.0);
        state.tuning.max_frame_dt = f32::NAN;
        assert_eq!(tick(&mut state, &input(2.0 * FRAME_MS)), 0.0);
        assert!(state.is_running());
    }

    #[test]
    fn test_first_frame_dt_zero() {
        let mut state = RoundState::new(1, Tuning::default(), &vp());
        state.start(100.0, 1, &vp()).unwrap();
        assert_eq!(tick(&mut state, &input(116.0)), 0.0);
        assert_eq!(state.last_frame_ms, Some(116.0));
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = running_round();
        // 500ms hitch is simulated as 33ms
        let dt = tick(&mut state, &input(500.0));
        assert!((dt - 0.033).abs() < 1e-6);
    }

    #[test]
    fn test_catch_scores_and_removes() {
        let mut state = running_round();
        let player_top = state.player.y - state.player.height / 2.0;
        let px = state.player.x;
        // One object sitting on the catcher, one far away
        state.objects.push(object_at(px, player_top - 40.0, 0.0));
        state.objects.push(object_at(100.0, 50.0, 0.0));

        tick(&mut state, &input(FRAME_MS));

        assert_eq!(state.score, 1);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos, Vec2::new(100.0, 50.0));
        assert_eq!(state.pops.len(), 1);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Caught { .. })));
    }

    #[test]
    fn test_edge_touch_is_not_a_catch() {
        let mut state = running_round();
        let player_top = state.player.y - state.player.height / 2.0;
        let px = state.player.x;
        // Bottom edge exactly on the catcher's top edge, not moving
        state.objects.push(object_at(px, player_top - 50.0, 0.0));

        tick(&mut state, &input(FRAME_MS));
        assert_eq!(state.score, 0);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_miss_removed_without_penalty() {
        let mut state = running_round();
        // Top edge already past 800 + 20
        state.objects.push(object_at(100.0, 871.0, 0.0));
        // Top edge at 790, still on the way out
        state.objects.push(object_at(100.0, 840.0, 0.0));

        tick(&mut state, &input(FRAME_MS));
        assert_eq!(state.score, 0);
        assert_eq!(state.missed, 1);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos.y, 840.0);
    }

    #[test]
    fn test_several_catches_in_one_frame() {
        let mut state = running_round();
        let player_top = state.player.y - state.player.height / 2.0;
        let px = state.player.x;
        for dx in [-40.0, 0.0, 40.0] {
            state.objects.push(object_at(px + dx, player_top - 10.0, 0.0));
        }
        tick(&mut state, &input(FRAME_MS));
        assert_eq!(state.score, 3);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_objects_fall_and_spin() {
        let mut state = running_round();
        state.objects.push(object_at(100.0, 0.0, 300.0));
        tick(&mut state, &input(20.0));
        let o = &state.objects[0];
        assert!((o.pos.y - 6.0).abs() < 1e-3);
        assert!((o.angle - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_timer_counts_down_and_ends() {
        let mut state = running_round();
        tick(&mut state, &input(1000.0));
        assert_eq!(state.time_left, 59);
        tick(&mut state, &input(59_500.0));
        assert_eq!(state.time_left, 1);
        assert_eq!(state.phase, RoundPhase::Running);
        tick(&mut state, &input(60_000.0));
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, RoundPhase::Ended);

        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::RoundEnded { score: 0 }));
        assert!(events.contains(&GameEvent::TimeChanged(0)));

        // Ended rounds no longer tick
        state.objects.push(object_at(100.0, 0.0, 300.0));
        tick(&mut state, &input(60_100.0));
        assert_eq!(state.objects[0].pos.y, 0.0);
    }

    #[test]
    fn test_timer_ignores_clock_going_backwards() {
        let mut state = running_round();
        tick(&mut state, &input(5_000.0));
        assert_eq!(state.time_left, 55);
        tick(&mut state, &input(2_000.0));
        assert_eq!(state.time_left, 55);
    }

    #[test]
    fn test_pops_expire() {
        let mut state = running_round();
        state.pops.push(CatchPop {
            pos: Vec2::new(10.0, 100.0),
            age: 0.0,
        });
        let mut now = 0.0;
        for _ in 0..10 {
            now += 30.0;
            tick(&mut state, &input(now));
        }
        // 0.3s in, still alive and drifting up
        assert_eq!(state.pops.len(), 1);
        assert!(state.pops[0].pos.y < 100.0);
        for _ in 0..15 {
            now += 30.0;
            tick(&mut state, &input(now));
        }
        assert!(state.pops.is_empty());
    }

    #[test]
    fn test_spawning_ramps_up() {
        let mut state = RoundState::new(3, Tuning::default(), &vp());
        state.start(0.0, 3, &vp()).unwrap();
        let mut now = 0.0;
        // Park the catcher in a corner so nothing gets caught
        state.target_x = -10_000.0;
        let mut total_early = 0;
        while now < 10_000.0 {
            let before = state.objects.len() + state.score as usize + state.missed as usize;
            tick(&mut state, &input(now));
            total_early += state.objects.len() + state.score as usize + state.missed as usize - before;
            now += FRAME_MS;
        }
        // ~10s at ~490ms average interval
        assert!((17..=22).contains(&total_early), "spawned {}", total_early);
    }

    #[test]
    fn test_determinism() {
        let mut a = RoundState::new(99999, Tuning::default(), &vp());
        let mut b = RoundState::new(99999, Tuning::default(), &vp());
        a.start(0.0, 99999, &vp()).unwrap();
        b.start(0.0, 99999, &vp()).unwrap();

        let mut now = 0.0;
        for i in 0..600 {
            let target = if i % 120 < 60 { 200.0 } else { 800.0 };
            a.target_x = target;
            b.target_x = target;
            tick(&mut a, &input(now));
            tick(&mut b, &input(now));
            now += FRAME_MS;
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.objects, b.objects);
        assert_eq!(a.player, b.player);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            targets in proptest::collection::vec(-10_000.0f32..10_000.0, 1..60),
            width in 200.0f32..2000.0,
        ) {
            let viewport = Viewport::new(width, 700.0, 1.0);
            let mut state = RoundState::new(5, Tuning::default(), &viewport);
            state.start(0.0, 5, &viewport).unwrap();
            let mut now = 0.0;
            for target in targets {
                state.target_x = target;
                now += 40.0;
                tick(&mut state, &TickInput { now_ms: now, viewport });
                let half = state.player.width / 2.0;
                let lo = half + 8.0;
                let hi = (width - half - 8.0).max(lo);
                prop_assert!(state.player.x >= lo - 1e-3);
                prop_assert!(state.player.x <= hi + 1e-3);
            }
        }

        #[test]
        fn prop_time_left_never_increases(steps in proptest::collection::vec(0.0f64..3000.0, 1..80)) {
            let mut state = RoundState::new(8, Tuning::default(), &vp());
            state.start(0.0, 8, &vp()).unwrap();
            let mut now = 0.0;
            let mut prev = state.time_left;
            for step in steps {
                now += step;
                tick(&mut state, &input(now));
                prop_assert!(state.time_left <= prev);
                prev = state.time_left;
            }
        }

        #[test]
        fn prop_score_never_decreases(steps in 1usize..400) {
            let mut state = RoundState::new(11, Tuning::default(), &vp());
            state.start(0.0, 11, &vp()).unwrap();
            let mut now = 0.0;
            let mut prev = 0;
            for i in 0..steps {
                state.target_x = ((i * 37) % 1000) as f32;
                now += FRAME_MS;
                tick(&mut state, &input(now));
                prop_assert!(state.score >= prev);
                prev = state.score;
            }
        }
    }

    #[test]
    fn test_extreme_targets_clamp() {
        let mut state = running_round();
        let half = state.player.width / 2.0;
        let mut now = 0.0;
        state.target_x = -10_000.0;
        for _ in 0..300 {
            now += FRAME_MS;
            tick(&mut state, &input(now));
            assert!(state.player.x >= half + 8.0);
        }
        assert!((state.player.x - (half + 8.0)).abs() < 0.01);

        state.target_x = 10_000.0;
        for _ in 0..300 {
            now += FRAME_MS;
            tick(&mut state, &input(now));
            assert!(state.player.x <= 1000.0 - half - 8.0);
        }
        assert!((state.player.x - (1000.0 - half - 8.0)).abs() < 0.01);
    }
}

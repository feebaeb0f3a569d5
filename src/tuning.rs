//! Data-driven game balance
//!
//! Every gameplay number lives here so a round can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

/// Spawn intervals below this would flood a single frame with objects
const MIN_SPAWN_INTERVAL_MS: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round ===
    /// Round length in seconds
    pub round_seconds: f32,
    /// Largest frame delta fed to physics (seconds)
    pub max_frame_dt: f32,

    // === Catcher ===
    /// Catcher width as a fraction of viewport width
    pub player_width_frac: f32,
    pub player_min_width: f32,
    pub player_max_width: f32,
    /// Height = width * aspect
    pub player_aspect: f32,
    /// Gap between catcher bottom and the viewport bottom
    pub player_bottom_offset: f32,
    /// Extra bottom padding standing in for the device safe area
    pub safe_area_bottom: f32,
    /// Catcher keeps this far from the side edges
    pub edge_margin: f32,
    /// Fraction of the distance left after one second of smoothing
    pub smoothing_base: f32,

    // === Spawning ===
    pub spawn_interval_ms: f32,
    /// Interval shrinks by this many ms per elapsed second
    pub spawn_ramp_ms_per_sec: f32,
    pub min_spawn_interval_ms: f32,

    // === Falling objects ===
    pub object_size_frac: f32,
    pub object_min_size: f32,
    pub object_max_size: f32,
    /// Base fall speed (px/s)
    pub base_fall_speed: f32,
    /// Added fall speed per elapsed second (px/s)
    pub fall_speed_ramp: f32,
    /// Upper bound of random fall speed jitter (px/s)
    pub fall_speed_jitter: f32,
    /// Max angular velocity magnitude (rad/s)
    pub max_spin: f32,
    /// Objects are dropped once their top passes viewport bottom + this
    pub miss_margin: f32,

    // === Feedback ===
    /// Catch "+1" pop lifetime (seconds)
    pub pop_lifetime: f32,
    /// Catch pop upward drift (px/s)
    pub pop_rise_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_seconds: 60.0,
            max_frame_dt: 0.033,

            player_width_frac: 0.30,
            player_min_width: 150.0,
            player_max_width: 260.0,
            player_aspect: 0.75,
            player_bottom_offset: 22.0,
            safe_area_bottom: 8.0,
            edge_margin: 8.0,
            smoothing_base: 0.001,

            spawn_interval_ms: 520.0,
            spawn_ramp_ms_per_sec: 6.0,
            min_spawn_interval_ms: 240.0,

            object_size_frac: 0.16,
            object_min_size: 72.0,
            object_max_size: 140.0,
            base_fall_speed: 240.0,
            fall_speed_ramp: 22.0,
            fall_speed_jitter: 40.0,
            max_spin: 2.2,
            miss_margin: 20.0,

            pop_lifetime: 0.6,
            pop_rise_speed: 60.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    ///
    /// Out-of-range values are replaced by their defaults (see `validated`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Replace values the simulation cannot run with by their defaults.
    ///
    /// Frame delta cap, round length and spawn intervals must be finite and
    /// positive; smoothing base must lie in (0, 1]; pop timing must be finite
    /// and non-negative.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        fn repair(name: &str, value: &mut f32, fallback: f32, ok: bool) {
            if !ok {
                log::warn!("Tuning {} = {} out of range, using {}", name, value, fallback);
                *value = fallback;
            }
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        let ok = positive(self.max_frame_dt);
        repair("max_frame_dt", &mut self.max_frame_dt, defaults.max_frame_dt, ok);
        let ok = positive(self.round_seconds);
        repair("round_seconds", &mut self.round_seconds, defaults.round_seconds, ok);
        let ok = self.spawn_interval_ms.is_finite() && self.spawn_interval_ms >= MIN_SPAWN_INTERVAL_MS;
        repair("spawn_interval_ms", &mut self.spawn_interval_ms, defaults.spawn_interval_ms, ok);
        let ok = self.min_spawn_interval_ms.is_finite() && self.min_spawn_interval_ms >= MIN_SPAWN_INTERVAL_MS;
        repair(
            "min_spawn_interval_ms",
            &mut self.min_spawn_interval_ms,
            defaults.min_spawn_interval_ms,
            ok,
        );
        let ok = non_negative(self.spawn_ramp_ms_per_sec);
        repair(
            "spawn_ramp_ms_per_sec",
            &mut self.spawn_ramp_ms_per_sec,
            defaults.spawn_ramp_ms_per_sec,
            ok,
        );
        let ok = self.smoothing_base.is_finite() && self.smoothing_base > 0.0 && self.smoothing_base <= 1.0;
        repair("smoothing_base", &mut self.smoothing_base, defaults.smoothing_base, ok);
        let ok = non_negative(self.pop_lifetime);
        repair("pop_lifetime", &mut self.pop_lifetime, defaults.pop_lifetime, ok);
        let ok = self.pop_rise_speed.is_finite();
        repair("pop_rise_speed", &mut self.pop_rise_speed, defaults.pop_rise_speed, ok);
        self
    }

    /// Whole seconds shown on the timer at round start
    pub fn round_seconds_display(&self) -> u32 {
        self.round_seconds.max(0.0).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.round_seconds_display(), 60);
        assert_eq!(t.spawn_interval_ms, 520.0);
        assert_eq!(t.min_spawn_interval_ms, 240.0);
        assert_eq!(t.base_fall_speed, 240.0);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "round_seconds": 30.0, "max_spin": 1.0 }"#).unwrap();
        assert_eq!(t.round_seconds, 30.0);
        assert_eq!(t.max_spin, 1.0);
        // Untouched fields keep their defaults
        assert_eq!(t.edge_margin, 8.0);
        assert_eq!(t.fall_speed_ramp, 22.0);
    }

    #[test]
    fn test_out_of_range_values_fall_back_to_defaults() {
        let t = Tuning::from_json(
            r#"{ "max_frame_dt": -0.01, "spawn_interval_ms": 0.000001,
                 "min_spawn_interval_ms": -5.0, "smoothing_base": 2.0,
                 "round_seconds": 0.0, "max_spin": 1.5 }"#,
        )
        .unwrap();
        let d = Tuning::default();
        assert_eq!(t.max_frame_dt, d.max_frame_dt);
        assert_eq!(t.spawn_interval_ms, d.spawn_interval_ms);
        assert_eq!(t.min_spawn_interval_ms, d.min_spawn_interval_ms);
        assert_eq!(t.smoothing_base, d.smoothing_base);
        assert_eq!(t.round_seconds, d.round_seconds);
        // Valid fields pass through untouched
        assert_eq!(t.max_spin, 1.5);
    }

    #[test]
    fn test_validated_keeps_sane_values() {
        let t = Tuning {
            max_frame_dt: 0.05,
            spawn_interval_ms: 1.0e9,
            min_spawn_interval_ms: 1.0e9,
            ..Default::default()
        };
        assert_eq!(t.clone().validated(), t);
        let nan = Tuning {
            max_frame_dt: f32::NAN,
            ..Default::default()
        }
        .validated();
        assert_eq!(nan.max_frame_dt, 0.033);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ round_seconds: }").is_err());
    }
}

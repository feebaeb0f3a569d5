//! Platform abstraction layer
//!
//! Best-effort browser capabilities. Every call is feature-detected and
//! silently does nothing when unsupported; native builds get no-op stubs.
//! - Viewport / device pixel ratio
//! - Monotonic clock
//! - Haptics (`navigator.vibrate`)
//! - Fullscreen

use crate::consts::{MAX_DEVICE_PIXEL_RATIO, MIN_DEVICE_PIXEL_RATIO};
#[cfg(not(target_arch = "wasm32"))]
use crate::sim::Viewport;

/// Clamp a reported device pixel ratio (missing/zero counts as 1)
pub fn clamp_dpr(dpr: f64) -> f32 {
    if !dpr.is_finite() || dpr <= 0.0 {
        return MIN_DEVICE_PIXEL_RATIO as f32;
    }
    dpr.clamp(MIN_DEVICE_PIXEL_RATIO, MAX_DEVICE_PIXEL_RATIO) as f32
}

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::{Function, Reflect};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::clamp_dpr;
    use crate::sim::Viewport;

    /// Current window size in CSS pixels
    pub fn viewport() -> Viewport {
        let Some(window) = web_sys::window() else {
            return Viewport::new(0.0, 0.0, 1.0);
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width as f32, height as f32, clamp_dpr(window.device_pixel_ratio()))
    }

    /// `performance.now()`, falling back to `Date.now()`
    pub fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn vibrate(ms: u32) {
        let Some(window) = web_sys::window() else { return };
        let navigator = window.navigator();
        if !Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
            return;
        }
        if !navigator.vibrate_with_duration(ms) {
            log::debug!("vibrate({}) rejected", ms);
        }
    }

    pub fn request_fullscreen() {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };

        // Standard API first, then the WebKit prefix (older iOS Safari)
        for name in ["requestFullscreen", "webkitRequestFullscreen"] {
            let Ok(method) = Reflect::get(&el, &JsValue::from_str(name)) else {
                continue;
            };
            if let Some(func) = method.dyn_ref::<Function>() {
                if let Err(e) = func.call0(&el) {
                    log::debug!("{} failed: {:?}", name, e);
                }
                return;
            }
        }
        log::debug!("Fullscreen not supported");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{now_ms, request_fullscreen, vibrate, viewport};

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0, 1.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn vibrate(_ms: u32) {
    // No-op for native
}

#[cfg(not(target_arch = "wasm32"))]
pub fn request_fullscreen() {
    // No-op for native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dpr() {
        assert_eq!(clamp_dpr(2.0), 2.0);
        assert_eq!(clamp_dpr(0.5), 1.0);
        assert_eq!(clamp_dpr(4.0), 3.0);
        assert_eq!(clamp_dpr(0.0), 1.0);
        assert_eq!(clamp_dpr(f64::NAN), 1.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_stubs() {
        vibrate(20);
        request_fullscreen();
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
        assert!(viewport().width > 0.0);
    }
}

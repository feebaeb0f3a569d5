//! Pointer/touch input
//!
//! Input only records where the catcher should go; the tick does the moving.

use crate::sim::RoundState;

/// Where an input event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// pointermove / pointerdown
    Pointer,
    /// touchmove / touchstart
    Touch,
}

/// What the host should do with the original event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// The target was updated
    pub consumed: bool,
    /// Call `preventDefault()` so the page doesn't scroll/zoom
    pub prevent_default: bool,
}

/// Record a horizontal client coordinate as the catcher target.
///
/// `client_x` is `None` for touch events without any touch point. Events
/// outside a running round are ignored.
pub fn handle_pointer(state: &mut RoundState, kind: PointerKind, client_x: Option<f32>) -> InputOutcome {
    if !state.is_running() {
        return InputOutcome::default();
    }

    let consumed = match client_x {
        Some(x) if x.is_finite() => {
            state.target_x = x;
            true
        }
        _ => false,
    };

    InputOutcome {
        consumed,
        prevent_default: kind == PointerKind::Touch,
    }
}

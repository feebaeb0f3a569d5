//! Canvas 2D rendering
//!
//! Drawing is written against the `Surface` trait. The browser implements it
//! on `CanvasRenderingContext2d`; tests and the native runner use
//! `RecordingSurface`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use shapes::{Rect, Star, cover_fit, star_field};

use std::f32::consts::TAU;

use crate::assets::{AssetId, AssetSet};
use crate::consts::PLAYER_CORNER_RADIUS;
use crate::sim::{FallingObject, Player, RoundState, Viewport};

const WHITE: &str = "white";
const PLACEHOLDER: &str = "rgba(255,255,255,0.08)";
const POP_COLOR: &str = "#ff5c8a";
const POP_FONT: &str = "900 22px -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Arial";

const STAR_ALPHA: f32 = 0.18;
const GLOW_ALPHA: f32 = 0.12;
const GLOW_OFFSET: f32 = 80.0;
const GLOW_RADIUS_Y: f32 = 70.0;
const GLOW_WIDTH_FRAC: f32 = 0.55;
const RING_ALPHA: f32 = 0.18;
const OUTLINE_ALPHA: f32 = 0.22;
const LINE_WIDTH: f32 = 2.0;

/// Minimal 2D drawing surface (a subset of the Canvas 2D API).
///
/// Implementations must never fail; errors from the host are swallowed.
pub trait Surface {
    /// Reconfigure for a new viewport (backing store size + CSS pixel transform)
    fn configure(&mut self, viewport: &Viewport);
    fn clear(&mut self, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_alpha(&mut self, alpha: f32);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str);
    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, line_width: f32, color: &str);
    fn fill_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// Intersect the clip region with a circle
    fn clip_circle(&mut self, x: f32, y: f32, radius: f32);
    /// Intersect the clip region with a rounded rectangle
    fn clip_round_rect(&mut self, rect: Rect, radius: f32);
    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, line_width: f32, color: &str);
    /// Draw the `src` part of an image into `dst`
    fn draw_image(&mut self, image: AssetId, src: Rect, dst: Rect);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}

/// Draw one complete frame
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &RoundState, viewport: &Viewport, assets: &AssetSet) {
    surface.clear(viewport.width, viewport.height);
    draw_background(surface, viewport);

    for object in &state.objects {
        draw_object(surface, object, assets);
    }
    draw_player(surface, &state.player, assets);
    draw_pops(surface, state);
}

/// Star field plus a soft glow near the ground
pub fn draw_background<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport) {
    surface.save();
    surface.set_alpha(STAR_ALPHA);
    for star in star_field(viewport.width, viewport.height) {
        surface.fill_circle(star.x, star.y, star.radius, WHITE);
    }
    surface.restore();

    surface.save();
    surface.set_alpha(GLOW_ALPHA);
    surface.fill_ellipse(
        viewport.width / 2.0,
        viewport.height - GLOW_OFFSET,
        viewport.width * GLOW_WIDTH_FRAC,
        GLOW_RADIUS_Y,
        WHITE,
    );
    surface.restore();
}

/// Rotated, circle-clipped image with a faint ring
pub fn draw_object<S: Surface + ?Sized>(surface: &mut S, object: &FallingObject, assets: &AssetSet) {
    let radius = object.width / 2.0;

    surface.save();
    surface.translate(object.pos.x, object.pos.y);
    surface.rotate(object.angle % TAU);
    surface.clip_circle(0.0, 0.0, radius);
    draw_image_cover(
        surface,
        assets,
        AssetId::Drop,
        Rect::centered(0.0, 0.0, object.width, object.height),
    );
    surface.restore();

    surface.save();
    surface.set_alpha(RING_ALPHA);
    surface.stroke_circle(object.pos.x, object.pos.y, radius, LINE_WIDTH, WHITE);
    surface.restore();
}

/// Rounded "character card" for the catcher
pub fn draw_player<S: Surface + ?Sized>(surface: &mut S, player: &Player, assets: &AssetSet) {
    let rect = Rect::centered(player.x, player.y, player.width, player.height);
    let radius = shapes::corner_radius(PLAYER_CORNER_RADIUS, rect.w, rect.h);

    surface.save();
    surface.clip_round_rect(rect, radius);
    draw_image_cover(surface, assets, AssetId::Catcher, rect);
    surface.restore();

    surface.save();
    surface.set_alpha(OUTLINE_ALPHA);
    surface.stroke_round_rect(rect, radius, LINE_WIDTH, WHITE);
    surface.restore();
}

/// Fading "+1" where objects were caught
pub fn draw_pops<S: Surface + ?Sized>(surface: &mut S, state: &RoundState) {
    let lifetime = state.tuning.pop_lifetime;
    for pop in &state.pops {
        let life = pop.life(lifetime);
        if life <= 0.0 {
            continue;
        }
        surface.save();
        surface.set_alpha(0.9 * life);
        surface.fill_text("❤️+1", pop.pos.x - 18.0, pop.pos.y - 8.0, POP_FONT, POP_COLOR);
        surface.restore();
    }
}

/// Cover-fit an image into `dst`, or a translucent placeholder while the
/// image is loading or failed
pub fn draw_image_cover<S: Surface + ?Sized>(surface: &mut S, assets: &AssetSet, id: AssetId, dst: Rect) {
    match assets.get(id).size() {
        Some((iw, ih)) => surface.draw_image(id, cover_fit(iw, ih, dst), dst),
        None => surface.fill_rect(dst, PLACEHOLDER),
    }
}

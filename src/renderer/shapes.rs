//! Layout math for 2D drawing (no surface access)

use crate::consts::{STAR_COUNT, STAR_X_PRIME, STAR_Y_PRIME};

/// Axis-aligned rectangle in CSS pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`x`h` centered on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }
}

/// Source rectangle that makes an `iw`x`ih` image cover `dst` while keeping
/// its aspect ratio (CSS `background-size: cover`), cropped around the center.
pub fn cover_fit(iw: f32, ih: f32, dst: Rect) -> Rect {
    let scale = (dst.w / iw).max(dst.h / ih);
    let sw = dst.w / scale;
    let sh = dst.h / scale;
    Rect::new((iw - sw) / 2.0, (ih - sh) / 2.0, sw, sh)
}

/// Corner radius that still fits a `w`x`h` box
pub fn corner_radius(r: f32, w: f32, h: f32) -> f32 {
    r.min(w / 2.0).min(h / 2.0).max(0.0)
}

/// A background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Static star field: positions are fixed index products wrapped into the
/// viewport, so the background never flickers between frames.
pub fn star_field(width: f32, height: f32) -> impl Iterator<Item = Star> {
    let w = width.max(1.0).floor() as u64;
    let h = height.max(1.0).floor() as u64;
    (0..STAR_COUNT).map(move |i| {
        let i = i as u64;
        Star {
            x: ((i * STAR_X_PRIME as u64) % w) as f32,
            y: ((i * STAR_Y_PRIME as u64) % h) as f32,
            radius: (1 + i % 3) as f32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_fit_wide_image_into_square() {
        // 200x100 image into 50x50: scale by height, crop the sides
        let src = cover_fit(200.0, 100.0, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(src, Rect::new(50.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_cover_fit_tall_image_into_wide_box() {
        // 100x400 image into 200x150: scale by width (2x), crop top and bottom
        let src = cover_fit(100.0, 400.0, Rect::new(10.0, 10.0, 200.0, 150.0));
        assert_eq!(src, Rect::new(0.0, 162.5, 100.0, 75.0));
    }

    #[test]
    fn test_cover_fit_same_aspect_uses_whole_image() {
        let src = cover_fit(640.0, 480.0, Rect::new(0.0, 0.0, 160.0, 120.0));
        assert_eq!(src, Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_corner_radius_fits() {
        assert_eq!(corner_radius(18.0, 200.0, 150.0), 18.0);
        assert_eq!(corner_radius(18.0, 20.0, 150.0), 10.0);
    }

    #[test]
    fn test_star_field_deterministic_and_in_bounds() {
        let a: Vec<Star> = star_field(390.0, 844.0).collect();
        let b: Vec<Star> = star_field(390.0, 844.0).collect();
        assert_eq!(a.len(), 60);
        assert_eq!(a, b);
        assert_eq!(a[0], Star { x: 0.0, y: 0.0, radius: 1.0 });
        // 9973 % 390 = 223, 7919 % 844 = 323
        assert_eq!(a[1], Star { x: 223.0, y: 323.0, radius: 2.0 });
        for s in &a {
            assert!(s.x < 390.0 && s.y < 844.0);
            assert!((1.0..=3.0).contains(&s.radius));
        }
    }

    #[test]
    fn test_rect_centered() {
        assert_eq!(Rect::centered(100.0, 50.0, 40.0, 20.0), Rect::new(80.0, 40.0, 40.0, 20.0));
    }
}

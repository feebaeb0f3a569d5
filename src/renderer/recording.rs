//! Surface that records draw calls instead of rasterizing them
//!
//! Used by tests and the native headless runner.

use super::Surface;
use super::shapes::Rect;
use crate::assets::AssetId;
use crate::sim::Viewport;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Configure { width: f32, height: f32, dpr: f32 },
    Clear { width: f32, height: f32 },
    Save,
    Restore,
    SetAlpha { alpha: f32 },
    Translate { x: f32, y: f32 },
    Rotate { angle: f32 },
    FillCircle { x: f32, y: f32, radius: f32 },
    StrokeCircle { x: f32, y: f32, radius: f32, line_width: f32 },
    FillEllipse { x: f32, y: f32, rx: f32, ry: f32 },
    FillRect { rect: Rect, color: String },
    ClipCircle { x: f32, y: f32, radius: f32 },
    ClipRoundRect { rect: Rect, radius: f32 },
    StrokeRoundRect { rect: Rect, radius: f32, line_width: f32 },
    DrawImage { image: AssetId, src: Rect, dst: Rect },
    FillText { text: String, x: f32, y: f32 },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    /// Frames seen (number of `clear` calls)
    pub frames: usize,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Every `save` has a matching `restore`, in order
    pub fn is_balanced(&self) -> bool {
        let mut depth: i64 = 0;
        for op in &self.ops {
            match op {
                DrawOp::Save => depth += 1,
                DrawOp::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Surface for RecordingSurface {
    fn configure(&mut self, viewport: &Viewport) {
        self.ops.push(DrawOp::Configure {
            width: viewport.width,
            height: viewport.height,
            dpr: viewport.dpr,
        });
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.frames += 1;
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::SetAlpha { alpha });
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::Translate { x, y });
    }

    fn rotate(&mut self, angle: f32) {
        self.ops.push(DrawOp::Rotate { angle });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, _color: &str) {
        self.ops.push(DrawOp::FillCircle { x, y, radius });
    }

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, line_width: f32, _color: &str) {
        self.ops.push(DrawOp::StrokeCircle {
            x,
            y,
            radius,
            line_width,
        });
    }

    fn fill_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, _color: &str) {
        self.ops.push(DrawOp::FillEllipse { x, y, rx, ry });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn clip_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ops.push(DrawOp::ClipCircle { x, y, radius });
    }

    fn clip_round_rect(&mut self, rect: Rect, radius: f32) {
        self.ops.push(DrawOp::ClipRoundRect { rect, radius });
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, line_width: f32, _color: &str) {
        self.ops.push(DrawOp::StrokeRoundRect {
            rect,
            radius,
            line_width,
        });
    }

    fn draw_image(&mut self, image: AssetId, src: Rect, dst: Rect) {
        self.ops.push(DrawOp::DrawImage { image, src, dst });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, _font: &str, _color: &str) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}

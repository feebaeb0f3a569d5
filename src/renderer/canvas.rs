//! `Surface` on top of a browser `CanvasRenderingContext2d`

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::Surface;
use super::shapes::Rect;
use crate::assets::AssetId;
use crate::sim::Viewport;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<AssetId, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    /// Register the element backing `id`; it may still be loading
    pub fn set_image(&mut self, id: AssetId, image: HtmlImageElement) {
        self.images.insert(id, image);
    }

    fn round_rect_path(&self, rect: Rect, radius: f32) {
        let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        let r = radius as f64;
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }

    fn circle_path(&self, x: f32, y: f32, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn configure(&mut self, viewport: &Viewport) {
        let dpr = viewport.dpr as f64;
        self.canvas.set_width((viewport.width as f64 * dpr).floor() as u32);
        self.canvas.set_height((viewport.height as f64 * dpr).floor() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
        // Draw in CSS pixels
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str) {
        self.circle_path(x, y, radius);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, line_width: f32, color: &str) {
        self.circle_path(x, y, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            x as f64,
            y as f64,
            rx.max(0.0) as f64,
            ry.max(0.0) as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn clip_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.circle_path(x, y, radius);
        self.ctx.clip();
    }

    fn clip_round_rect(&mut self, rect: Rect, radius: f32) {
        self.round_rect_path(rect, radius);
        self.ctx.clip();
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, line_width: f32, color: &str) {
        self.round_rect_path(rect, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn draw_image(&mut self, image: AssetId, src: Rect, dst: Rect) {
        let Some(img) = self.images.get(&image) else {
            return;
        };
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img,
                src.x as f64,
                src.y as f64,
                src.w as f64,
                src.h as f64,
                dst.x as f64,
                dst.y as f64,
                dst.w as f64,
                dst.h as f64,
            );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

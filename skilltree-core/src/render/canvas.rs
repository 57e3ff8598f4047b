// Browser 2D canvas backend.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::layout::PointF;
use crate::render::{Stroke, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(stroke.width);
    }
}

fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("canvas {} failed: {:?}", what, e);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        report("reset transform", self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn set_transform(&mut self, translate: PointF, scale: f64) {
        report(
            "set_transform",
            self.ctx.set_transform(scale, 0.0, 0.0, scale, translate.x, translate.y),
        );
    }

    fn line(&mut self, from: PointF, to: PointF, stroke: &Stroke) {
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn circle(&mut self, center: PointF, radius: f64, fill: &str, stroke: &Stroke) {
        self.ctx.begin_path();
        report("arc", self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU));
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        self.apply_stroke(stroke);
        self.ctx.stroke();
    }

    fn text(&mut self, at: PointF, text: &str, size: f64, color: &str) {
        self.ctx.set_font(&format!("{}px sans-serif", size));
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        report("fill_text", self.ctx.fill_text(text, at.x, at.y));
    }
}

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::surface::{LinearGradient, Paint, Point, Surface};
use crate::viewport::Viewport;

/// A canvas element and its 2d context.
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// `None` when the host has no 2d context for this canvas.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    fn gradient(&self, linear: &LinearGradient) -> CanvasGradient {
        let gradient = self.ctx.create_linear_gradient(
            linear.start.x,
            linear.start.y,
            linear.end.x,
            linear.end.y,
        );
        for (offset, color) in &linear.stops {
            // Only fails for offsets outside [0, 1].
            let _ = gradient.add_color_stop(*offset as f32, &color.to_string());
        }
        gradient
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_string()),
            Paint::Linear(linear) => self.ctx.set_fill_style_canvas_gradient(&self.gradient(linear)),
        }
    }

    fn set_stroke(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_string()),
            Paint::Linear(linear) => self
                .ctx
                .set_stroke_style_canvas_gradient(&self.gradient(linear)),
        }
    }
}

impl Surface for Canvas2d {
    /// Backing store matches the displayed size so drawing coordinates line
    /// up with CSS pixels.
    fn resize(&mut self, viewport: Viewport) {
        let (width, height) = viewport.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.fill_rect(origin.x, origin.y, width, height);
    }

    fn stroke_polyline(&mut self, points: &[Point], paint: &Paint, line_width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.set_stroke(paint);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.set_fill(paint);
        self.ctx.fill();
    }
}

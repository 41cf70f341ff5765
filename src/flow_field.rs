//! Animated sinusoidal flow lines over a diagonal gradient wash, plus a
//! sprinkle of single-frame sparkle dots.

use rand::Rng;

use crate::color::{Rgb, DOT_ALPHA, LINE_ALPHA, WASH_ALPHA};
use crate::surface::{LinearGradient, Paint, Point, Surface};
use crate::viewport::Viewport;

/// Horizontal distance budget per line: `count = floor(width / 100)`.
pub const LINE_SPACING: f64 = 100.0;
/// Vertical distance between sampled points on a line.
pub const SAMPLE_STEP: f64 = 5.0;
pub const FREQUENCY: f64 = 0.002;
/// Phase advance per millisecond of elapsed time.
pub const SPEED: f64 = 0.0005;
pub const LINE_WIDTH: f64 = 1.0;
pub const DOT_RADIUS_MIN: f64 = 1.0;
pub const DOT_RADIUS_MAX: f64 = 4.0;

/// Number of flow lines for a viewport `width` wide.
pub fn line_count(width: f64) -> usize {
    if width > 0.0 {
        (width / LINE_SPACING).floor() as usize
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLine {
    pub index: usize,
    pub base_x: f64,
}

impl FlowLine {
    /// Horizontal displacement from `base_x` at height `y`.
    pub fn offset(y: f64, time: f64, amplitude: f64) -> f64 {
        (y * FREQUENCY + time * SPEED).sin() * amplitude
    }

    /// Write the points of this line at `time` into `out`, one every
    /// [`SAMPLE_STEP`] pixels from `y = 0` down to `height` inclusive.
    pub fn sample_into(&self, height: f64, time: f64, out: &mut Vec<Point>) {
        out.clear();
        let amplitude = height / 10.0;
        let mut step = 0usize;
        loop {
            let y = step as f64 * SAMPLE_STEP;
            if y > height {
                break;
            }
            out.push(Point::new(self.base_x + Self::offset(y, time, amplitude), y));
            step += 1;
        }
    }
}

/// Evenly spaced lines across `[0, width)`.
pub fn lines(viewport: Viewport) -> Vec<FlowLine> {
    let count = line_count(viewport.width);
    (0..count)
        .map(|index| FlowLine {
            index,
            base_x: index as f64 / count as f64 * viewport.width,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct FlowField {
    primary: Rgb,
    secondary: Rgb,
    viewport: Viewport,
    lines: Vec<FlowLine>,
    scratch: Vec<Point>,
}

impl FlowField {
    pub fn new(primary: Rgb, secondary: Rgb) -> Self {
        Self {
            primary,
            secondary,
            viewport: Viewport::default(),
            lines: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.lines = lines(viewport);
    }

    pub fn set_colors(&mut self, primary: Rgb, secondary: Rgb) {
        self.primary = primary;
        self.secondary = secondary;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn lines(&self) -> &[FlowLine] {
        &self.lines
    }

    pub fn amplitude(&self) -> f64 {
        self.viewport.height / 10.0
    }

    /// Paint one frame. `time` is the monotonic frame timestamp in ms.
    pub fn draw(&mut self, surface: &mut impl Surface, time: f64, rng: &mut impl Rng) {
        let Viewport { width, height } = self.viewport;
        if !self.viewport.is_drawable() {
            return;
        }

        surface.clear(width, height);
        let wash = Paint::Linear(LinearGradient {
            start: Point::new(0.0, 0.0),
            end: Point::new(width, height),
            stops: vec![
                (0.0, self.primary.with_alpha(WASH_ALPHA)),
                (1.0, self.secondary.with_alpha(WASH_ALPHA)),
            ],
        });
        surface.fill_rect(Point::new(0.0, 0.0), width, height, &wash);

        let stroke = Paint::Linear(LinearGradient {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, height),
            stops: vec![
                (0.0, self.primary.with_alpha(LINE_ALPHA)),
                (0.5, self.secondary.with_alpha(LINE_ALPHA)),
                (1.0, self.primary.with_alpha(LINE_ALPHA)),
            ],
        });
        for line in &self.lines {
            line.sample_into(height, time, &mut self.scratch);
            surface.stroke_polyline(&self.scratch, &stroke, LINE_WIDTH);
        }

        let dots = [
            Paint::Solid(self.primary.with_alpha(DOT_ALPHA)),
            Paint::Solid(self.secondary.with_alpha(DOT_ALPHA)),
        ];
        for i in 0..self.lines.len() / 2 {
            let center = Point::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
            let radius = rng.gen_range(DOT_RADIUS_MIN..DOT_RADIUS_MAX);
            surface.fill_circle(center, radius, &dots[i % 2]);
        }
    }
}

//! The drawing seam between the renderers and a concrete canvas.
//!
//! Renderers only ever talk to [`Surface`]; the browser build implements it
//! on top of `CanvasRenderingContext2d`, tests implement it with a recorder.

use crate::color::Rgba;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A linear gradient between two points with `(offset, color)` stops.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<(f64, Rgba)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

pub trait Surface {
    /// Match the backing store to `viewport`. Surfaces without one ignore it.
    fn resize(&mut self, _viewport: Viewport) {}

    /// Erase the `width` x `height` area starting at the origin.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: &Paint);

    /// Stroke `points` as one connected path.
    fn stroke_polyline(&mut self, points: &[Point], paint: &Paint, line_width: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear { width: f64, height: f64 },
        FillRect { origin: Point, width: f64, height: f64, paint: Paint },
        Stroke { points: Vec<Point>, paint: Paint, line_width: f64 },
        Circle { center: Point, radius: f64, paint: Paint },
    }

    /// Records every call so tests can assert on draw structure.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn strokes(&self) -> impl Iterator<Item = (&[Point], &Paint)> {
            self.ops.iter().filter_map(|op| match op {
                Op::Stroke { points, paint, .. } => Some((points.as_slice(), paint)),
                _ => None,
            })
        }

        pub fn circles(&self) -> impl Iterator<Item = (Point, f64, &Paint)> {
            self.ops.iter().filter_map(|op| match op {
                Op::Circle { center, radius, paint } => Some((*center, *radius, paint)),
                _ => None,
            })
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self, width: f64, height: f64) {
            self.ops.push(Op::Clear { width, height });
        }

        fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: &Paint) {
            self.ops.push(Op::FillRect {
                origin,
                width,
                height,
                paint: paint.clone(),
            });
        }

        fn stroke_polyline(&mut self, points: &[Point], paint: &Paint, line_width: f64) {
            self.ops.push(Op::Stroke {
                points: points.to_vec(),
                paint: paint.clone(),
                line_width,
            });
        }

        fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
            self.ops.push(Op::Circle {
                center,
                radius,
                paint: paint.clone(),
            });
        }
    }
}

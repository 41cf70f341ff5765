//! Pointer-derived parallax and glow offsets.
//!
//! Nothing here draws. The values end up as CSS custom properties that the
//! page's transforms and radial gradients read.

/// Parallax travel across the full container, in px.
pub const MOVE_RANGE: f64 = 20.0;

pub const MOVE_X: &str = "--move-x";
pub const MOVE_Y: &str = "--move-y";
pub const GLOW_X: &str = "--glow-x";
pub const GLOW_Y: &str = "--glow-y";

/// A container's bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Pointer position relative to the box, each axis clamped to `[0, 1]`.
    /// `None` for a box with no area.
    pub fn normalize(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x = ((client_x - self.left) / self.width).clamp(0.0, 1.0);
        let y = ((client_y - self.top) / self.height).clamp(0.0, 1.0);
        Some((x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxState {
    pub move_x: f64,
    pub move_y: f64,
    /// Radial gradient center, percent of the container.
    pub glow_x: f64,
    pub glow_y: f64,
}

impl Default for ParallaxState {
    fn default() -> Self {
        Self::centered()
    }
}

impl ParallaxState {
    /// The resting state with the pointer in the middle of the container.
    pub const fn centered() -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            glow_x: 50.0,
            glow_y: 50.0,
        }
    }

    pub fn from_normalized(x: f64, y: f64) -> Self {
        Self {
            move_x: (x - 0.5) * MOVE_RANGE,
            move_y: (y - 0.5) * MOVE_RANGE,
            glow_x: x * 100.0,
            glow_y: y * 100.0,
        }
    }

    pub fn from_pointer(client_x: f64, client_y: f64, bounds: Bounds) -> Option<Self> {
        bounds
            .normalize(client_x, client_y)
            .map(|(x, y)| Self::from_normalized(x, y))
    }

    /// `(property, value)` pairs ready for `style.setProperty`.
    pub fn css_properties(&self) -> [(&'static str, String); 4] {
        [
            (MOVE_X, format!("{}px", self.move_x)),
            (MOVE_Y, format!("{}px", self.move_y)),
            (GLOW_X, format!("{}%", self.glow_x)),
            (GLOW_Y, format!("{}%", self.glow_y)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 200.0,
    };

    #[test]
    fn center_of_box_is_at_rest() {
        assert_eq!(
            ParallaxState::from_pointer(300.0, 150.0, BOX),
            Some(ParallaxState::centered())
        );
    }

    #[test]
    fn corners_reach_full_travel() {
        let top_left = ParallaxState::from_pointer(100.0, 50.0, BOX).unwrap();
        assert_eq!((top_left.move_x, top_left.move_y), (-10.0, -10.0));
        assert_eq!((top_left.glow_x, top_left.glow_y), (0.0, 0.0));

        let bottom_right = ParallaxState::from_pointer(500.0, 250.0, BOX).unwrap();
        assert_eq!((bottom_right.move_x, bottom_right.move_y), (10.0, 10.0));
        assert_eq!((bottom_right.glow_x, bottom_right.glow_y), (100.0, 100.0));
    }

    #[test]
    fn quarter_point() {
        let state = ParallaxState::from_pointer(200.0, 100.0, BOX).unwrap();
        assert_eq!(state.move_x, -5.0);
        assert_eq!(state.move_y, -5.0);
        assert_eq!(state.glow_x, 25.0);
        assert_eq!(state.glow_y, 25.0);
    }

    #[test]
    fn outside_positions_clamp_and_empty_boxes_are_ignored() {
        let state = ParallaxState::from_pointer(-1000.0, 9000.0, BOX).unwrap();
        assert_eq!((state.glow_x, state.glow_y), (0.0, 100.0));

        let empty = Bounds { width: 0.0, ..BOX };
        assert_eq!(ParallaxState::from_pointer(120.0, 60.0, empty), None);
    }

    #[test]
    fn renders_css_units() {
        let props = ParallaxState::from_normalized(0.75, 0.5).css_properties();
        assert_eq!(props[0], (MOVE_X, "5px".to_string()));
        assert_eq!(props[1], (MOVE_Y, "0px".to_string()));
        assert_eq!(props[2], (GLOW_X, "75%".to_string()));
        assert_eq!(props[3], (GLOW_Y, "50%".to_string()));
    }
}

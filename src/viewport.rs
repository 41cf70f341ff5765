//! Window/container size tracking.

/// Drawable area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative or NaN sizes must not be drawn into.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Integer size for a canvas backing store. Fractional CSS sizes are
    /// truncated the same way the browser truncates `canvas.width`.
    pub fn backing_size(&self) -> (u32, u32) {
        let clamp = |v: f64| if v > 0.0 { v as u32 } else { 0 };
        (clamp(self.width), clamp(self.height))
    }
}

type Subscriber = Box<dyn FnMut(Viewport)>;

/// Holds the latest viewport and fans every update out to its subscribers.
///
/// There is no debouncing: each call to [`ViewportTracker::update`]
/// notifies, even when the size did not change.
#[derive(Default)]
pub struct ViewportTracker {
    current: Viewport,
    subscribers: Vec<Subscriber>,
}

impl ViewportTracker {
    pub fn new(initial: Viewport) -> Self {
        Self {
            current: initial,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Register `f` and call it right away with the current size.
    pub fn subscribe(&mut self, mut f: impl FnMut(Viewport) + 'static) {
        f(self.current);
        self.subscribers.push(Box::new(f));
    }

    pub fn update(&mut self, viewport: Viewport) {
        self.current = viewport;
        for subscriber in &mut self.subscribers {
            subscriber(viewport);
        }
    }
}

impl std::fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn invalid_sizes_are_not_drawable() {
        assert!(Viewport::new(1000.0, 800.0).is_drawable());
        assert!(!Viewport::new(0.0, 800.0).is_drawable());
        assert!(!Viewport::new(1000.0, -1.0).is_drawable());
        assert!(!Viewport::new(f64::NAN, 10.0).is_drawable());
        assert_eq!(Viewport::new(-5.0, 10.7).backing_size(), (0, 10));
    }

    #[test]
    fn every_update_notifies_synchronously() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = ViewportTracker::new(Viewport::new(10.0, 10.0));
        let sink = seen.clone();
        tracker.subscribe(move |v| sink.borrow_mut().push(v));

        tracker.update(Viewport::new(20.0, 30.0));
        tracker.update(Viewport::new(20.0, 30.0));

        assert_eq!(
            *seen.borrow(),
            vec![
                Viewport::new(10.0, 10.0),
                Viewport::new(20.0, 30.0),
                Viewport::new(20.0, 30.0),
            ]
        );
        assert_eq!(tracker.current(), Viewport::new(20.0, 30.0));
    }
}

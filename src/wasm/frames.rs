use gloo::render::{request_animation_frame, AnimationFrame};

use crate::scheduler::FrameHost;

/// `requestAnimationFrame`. Dropping the returned [`AnimationFrame`] calls
/// `cancelAnimationFrame`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFrames;

impl FrameHost for BrowserFrames {
    type Request = AnimationFrame;

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> AnimationFrame {
        request_animation_frame(callback)
    }
}

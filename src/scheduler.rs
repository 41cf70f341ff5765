//! Handle-based frame loop.
//!
//! A loop is started with [`AnimationScheduler::start`] and runs until its
//! [`AnimationHandle`] is cancelled or dropped. Each scheduled invocation
//! checks the cancellation flag before touching the callback, so a frame the
//! host already dispatched cannot run after `cancel` returns.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// The host's frame-pacing primitive.
pub trait FrameHost {
    /// Outstanding request. Dropping it withdraws the request if the host
    /// still can.
    type Request: 'static;

    /// Ask for `callback` to run once on the next frame with the frame
    /// timestamp in milliseconds. Must not run it synchronously.
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Request;
}

trait LoopControl {
    fn cancel(&self);
    fn is_cancelled(&self) -> bool;
}

struct LoopState<H: FrameHost> {
    host: Rc<H>,
    cancelled: Cell<bool>,
    pending: RefCell<Option<H::Request>>,
    callback: RefCell<Box<dyn FnMut(f64)>>,
}

impl<H: FrameHost + 'static> LoopState<H> {
    fn schedule(self: &Rc<Self>) {
        let next = Rc::clone(self);
        let request = self
            .host
            .request_frame(Box::new(move |timestamp| next.run_frame(timestamp)));
        *self.pending.borrow_mut() = Some(request);
    }

    fn run_frame(self: &Rc<Self>, timestamp: f64) {
        // The request that delivered this frame is spent.
        let _spent = self.pending.borrow_mut().take();
        if self.cancelled.get() {
            return;
        }
        {
            let mut callback = self.callback.borrow_mut();
            (*callback)(timestamp);
        }
        if self.cancelled.get() {
            return;
        }
        self.schedule();
    }
}

impl<H: FrameHost> LoopControl for LoopState<H> {
    fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Cancellation token for one running loop. Dropping it cancels the loop.
#[derive(Default)]
pub struct AnimationHandle {
    control: Option<Rc<dyn LoopControl>>,
}

impl AnimationHandle {
    /// Stop the loop. Safe to call any number of times, and on a handle
    /// that never started anything.
    pub fn cancel(&self) {
        if let Some(control) = &self.control {
            control.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.control.as_ref().is_some_and(|c| !c.is_cancelled())
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

pub struct AnimationScheduler<H> {
    host: Rc<H>,
}

impl<H> Clone for AnimationScheduler<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
        }
    }
}

impl<H: FrameHost + 'static> AnimationScheduler<H> {
    pub fn new(host: H) -> Self {
        Self { host: Rc::new(host) }
    }

    /// Run `callback` once per frame until the returned handle is cancelled.
    pub fn start(&self, callback: impl FnMut(f64) + 'static) -> AnimationHandle {
        let state = Rc::new(LoopState {
            host: Rc::clone(&self.host),
            cancelled: Cell::new(false),
            pending: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
        });
        state.schedule();
        AnimationHandle {
            control: Some(state),
        }
    }

    pub fn cancel(&self, handle: &AnimationHandle) {
        handle.cancel();
    }
}

/// Owner of at most one running loop.
#[derive(Debug, Default)]
pub struct AnimationSlot {
    handle: Option<AnimationHandle>,
}

impl AnimationSlot {
    /// Cancel the current loop, if any, then start `callback` in its place.
    pub fn restart<H: FrameHost + 'static>(
        &mut self,
        scheduler: &AnimationScheduler<H>,
        callback: impl FnMut(f64) + 'static,
    ) {
        self.stop();
        self.handle = Some(scheduler.start(callback));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(AnimationHandle::is_active)
    }
}

type QueuedCallback = (u64, Box<dyn FnOnce(f64)>);

#[derive(Default)]
struct Queue {
    next_id: u64,
    entries: Vec<QueuedCallback>,
}

/// Frame host driven by explicit [`ManualFrames::tick`] calls, for headless
/// use and tests.
#[derive(Clone)]
pub struct ManualFrames {
    queue: Rc<RefCell<Queue>>,
    withdraw_on_drop: bool,
}

impl Default for ManualFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualFrames {
    pub fn new() -> Self {
        Self {
            queue: Rc::default(),
            withdraw_on_drop: true,
        }
    }

    /// A host that keeps withdrawn requests queued, like a browser whose
    /// frame was already dispatched when the cancel arrived.
    pub fn retaining() -> Self {
        Self {
            withdraw_on_drop: false,
            ..Self::new()
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Run every callback queued before this call, returning how many ran.
    pub fn tick(&self, timestamp: f64) -> usize {
        let due = std::mem::take(&mut self.queue.borrow_mut().entries);
        let ran = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        ran
    }
}

pub struct ManualRequest {
    id: u64,
    queue: Weak<RefCell<Queue>>,
    withdraw_on_drop: bool,
}

impl Drop for ManualRequest {
    fn drop(&mut self) {
        if !self.withdraw_on_drop {
            return;
        }
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl FrameHost for ManualFrames {
    type Request = ManualRequest;

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> ManualRequest {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.entries.push((id, callback));
        ManualRequest {
            id,
            queue: Rc::downgrade(&self.queue),
            withdraw_on_drop: self.withdraw_on_drop,
        }
    }
}

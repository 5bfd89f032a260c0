//! Frame pacing and viewport events provided by the embedding UI

use std::time::Duration;

use crate::surface::Viewport;

/// Handle for a pending "call me on the next repaint" request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Handle for a registered resize listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeWatch(pub u64);

/// Services the UI host offers to a running effect
///
/// When a requested frame is due the host calls
/// [`Driver::tick`](crate::Driver::tick); when the viewport changes while a
/// resize watch is registered it calls
/// [`Driver::handle_resize`](crate::Driver::handle_resize).
pub trait FrameHost {
    /// Current viewport dimensions
    fn viewport(&self) -> Viewport;

    /// Ask for one callback on the next repaint
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a pending frame request
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Start delivering viewport changes
    fn watch_resize(&mut self) -> ResizeWatch;

    /// Stop delivering viewport changes
    fn unwatch_resize(&mut self, watch: ResizeWatch);
}

impl<H: FrameHost + ?Sized> FrameHost for &mut H {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn request_frame(&mut self) -> FrameRequest {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        (**self).cancel_frame(request);
    }

    fn watch_resize(&mut self) -> ResizeWatch {
        (**self).watch_resize()
    }

    fn unwatch_resize(&mut self, watch: ResizeWatch) {
        (**self).unwatch_resize(watch);
    }
}

/// Headless host driven by a simulated clock
///
/// Each call to [`advance`](Self::advance) fires the pending frame request,
/// if any, one frame interval after the previous one.
#[derive(Debug, Clone)]
pub struct ManualHost {
    viewport: Viewport,
    clock: Duration,
    frame_interval: Duration,
    next_id: u64,
    pending: Option<FrameRequest>,
    watches: Vec<ResizeWatch>,
    frames_requested: u64,
    frames_cancelled: u64,
}

impl ManualHost {
    /// Host refreshing at `fps` frames per second
    pub fn new(viewport: Viewport, fps: u32) -> Self {
        Self {
            viewport,
            clock: Duration::ZERO,
            frame_interval: Duration::from_secs(1) / fps.max(1),
            next_id: 1,
            pending: None,
            watches: Vec::new(),
            frames_requested: 0,
            frames_cancelled: 0,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Fire the pending frame, returning its timestamp
    pub fn advance(&mut self) -> Option<Duration> {
        self.pending.take()?;
        self.clock += self.frame_interval;
        Some(self.clock)
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Change the viewport; returns whether anyone is listening
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        !self.watches.is_empty()
    }

    pub fn active_resize_watches(&self) -> usize {
        self.watches.len()
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn frames_cancelled(&self) -> u64 {
        self.frames_cancelled
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new(Viewport::default(), 60)
    }
}

impl FrameHost for ManualHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending = Some(request);
        self.frames_requested += 1;
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
            self.frames_cancelled += 1;
        }
    }

    fn watch_resize(&mut self) -> ResizeWatch {
        let watch = ResizeWatch(self.next_id());
        self.watches.push(watch);
        watch
    }

    fn unwatch_resize(&mut self, watch: ResizeWatch) {
        self.watches.retain(|w| *w != watch);
    }
}

//! Animation driver
//!
//! The driver owns one effect run: its particle buffer, the surface it draws
//! on, and the frame request and resize watch it holds on the host. The host
//! calls [`Driver::tick`] whenever a requested frame is due; the run ends on
//! the first tick at or after the configured duration.
//!
//! ```text
//! Idle --start--> Running --tick (t >= duration)--> Done
//!   |                |
//!   +---teardown-----+------------------------------> Cancelled
//! ```
//!
//! Both terminal states release the frame request and the resize watch.
//! Only `Done` invokes the completion callback, and only once.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{BURST_WINDOW_MS, EffectConfig};
use crate::emission::spawn_burst;
use crate::error::{EffectError, Result};
use crate::host::{FrameHost, FrameRequest, ResizeWatch};
use crate::particle::Particle;
use crate::physics;
use crate::render::Renderer;
use crate::surface::{Surface, Viewport};

/// Lifecycle of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, not started
    Idle,
    /// Frames are being requested
    Running,
    /// Ran to its duration and signalled completion
    Done,
    /// Torn down before completion; no callback was made
    Cancelled,
}

impl DriverState {
    /// Whether the driver will never draw again
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledBurst {
    offset_ms: f32,
    fired: bool,
}

/// Runs one particle effect on a surface, paced by a host
pub struct Driver<S: Surface, H: FrameHost> {
    config: EffectConfig,
    renderer: Renderer,
    surface: S,
    host: H,
    rng: StdRng,
    particles: Vec<Particle>,
    bursts: Vec<ScheduledBurst>,
    state: DriverState,
    started_at: Duration,
    elapsed_ms: f32,
    frames: u64,
    pending_frame: Option<FrameRequest>,
    resize_watch: Option<ResizeWatch>,
    on_done: Option<Box<dyn FnOnce()>>,
}

impl<S: Surface, H: FrameHost> Driver<S, H> {
    /// Create an idle driver
    pub fn new(config: EffectConfig, surface: S, host: H) -> Self {
        let mut bursts: Vec<ScheduledBurst> = config
            .bursts
            .iter()
            .map(|&offset| ScheduledBurst {
                offset_ms: offset as f32,
                fired: false,
            })
            .collect();
        bursts.sort_by(|a, b| a.offset_ms.total_cmp(&b.offset_ms));

        Self {
            renderer: Renderer::new(config.shape),
            config,
            surface,
            host,
            rng: StdRng::from_os_rng(),
            particles: Vec::new(),
            bursts,
            state: DriverState::Idle,
            started_at: Duration::ZERO,
            elapsed_ms: 0.0,
            frames: 0,
            pending_frame: None,
            resize_watch: None,
            on_done: None,
        }
    }

    /// Use a fixed seed for spawning, for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Callback invoked exactly once when the run completes
    pub fn on_done<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.on_done = Some(Box::new(callback));
        self
    }

    /// Begin the run at monotonic timestamp `now`
    ///
    /// Sizes the surface, registers the resize watch, fires the bursts due at
    /// t=0 and requests the first frame. On error nothing is acquired and the
    /// driver stays idle.
    pub fn start(&mut self, now: Duration) -> Result<()> {
        if self.state != DriverState::Idle {
            return Err(EffectError::AlreadyStarted(self.state.to_string()));
        }
        if !self.surface.is_attached() {
            log::warn!("Refusing to start effect: surface is not attached");
            return Err(EffectError::SurfaceUnavailable);
        }
        if self.config.palette.is_empty() || self.config.particles_per_burst == 0 {
            log::warn!(
                "Effect has {} particles per burst and {} colors; it will draw nothing",
                self.config.particles_per_burst,
                self.config.palette.len()
            );
        }

        self.surface.resize(self.host.viewport());
        self.resize_watch = Some(self.host.watch_resize());
        self.started_at = now;
        self.elapsed_ms = 0.0;
        self.state = DriverState::Running;

        self.spawn_due_bursts(0.0);
        self.pending_frame = Some(self.host.request_frame());

        log::debug!(
            "Effect started: {} particles, {} ms",
            self.particles.len(),
            self.config.duration_ms
        );
        Ok(())
    }

    /// Advance the run to `now`; call when a requested frame is due
    ///
    /// Ticks outside the running state are ignored.
    pub fn tick(&mut self, now: Duration) -> DriverState {
        if self.state != DriverState::Running {
            log::trace!("Ignoring tick while {}", self.state);
            return self.state;
        }

        // The request being serviced is spent
        self.pending_frame = None;
        self.frames += 1;

        let elapsed_ms = now.saturating_sub(self.started_at).as_secs_f32() * 1000.0;
        self.elapsed_ms = elapsed_ms;
        self.spawn_due_bursts(elapsed_ms);

        let alive = physics::step_all(&mut self.particles, &self.config.physics, elapsed_ms);
        let drawn = self.renderer.render(&mut self.surface, &self.particles);
        log::trace!(
            "Frame {} at {:.1} ms: {} alive, {} drawn",
            self.frames,
            elapsed_ms,
            alive,
            drawn
        );

        if elapsed_ms < self.config.duration_ms as f32 {
            self.pending_frame = Some(self.host.request_frame());
        } else {
            self.complete();
        }
        self.state
    }

    /// Resize callback: recompute the surface size, keep particle state
    pub fn handle_resize(&mut self) {
        if self.resize_watch.is_none() {
            return;
        }
        let viewport = self.host.viewport();
        log::debug!(
            "Viewport resized to {}x{} @{}",
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
        self.surface.resize(viewport);
    }

    /// Stop the run without signalling completion
    ///
    /// Idempotent; does nothing once the driver is done or cancelled.
    pub fn teardown(&mut self) {
        match self.state {
            DriverState::Done | DriverState::Cancelled => {}
            DriverState::Idle | DriverState::Running => {
                self.release();
                self.on_done = None;
                self.particles = Vec::new();
                log::debug!("Effect torn down after {:.1} ms", self.elapsed_ms);
                self.state = DriverState::Cancelled;
            }
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Milliseconds since start as of the last tick
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Number of ticks processed
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn viewport(&self) -> Viewport {
        self.host.viewport()
    }

    fn spawn_due_bursts(&mut self, elapsed_ms: f32) {
        let viewport = self.viewport();
        for index in 0..self.bursts.len() {
            let burst = self.bursts[index];
            if burst.fired || elapsed_ms < burst.offset_ms {
                continue;
            }
            self.bursts[index].fired = true;

            if elapsed_ms >= burst.offset_ms + BURST_WINDOW_MS {
                log::debug!("Missed burst window at {} ms", burst.offset_ms);
                continue;
            }

            let origin = self.config.launch.resolve(&viewport);
            let spawned = spawn_burst(
                origin,
                self.config.particles_per_burst,
                &self.config.palette,
                &self.config.spawn,
                &mut self.rng,
            );
            self.particles.extend(spawned);
        }
    }

    fn complete(&mut self) {
        self.surface.clear();
        self.particles = Vec::new();
        self.release();
        self.state = DriverState::Done;
        log::debug!(
            "Effect done after {} frames ({:.1} ms)",
            self.frames,
            self.elapsed_ms
        );

        if let Some(callback) = self.on_done.take() {
            callback();
        }
    }

    fn release(&mut self) {
        if let Some(request) = self.pending_frame.take() {
            self.host.cancel_frame(request);
        }
        if let Some(watch) = self.resize_watch.take() {
            self.host.unwatch_resize(watch);
        }
    }
}

impl<S: Surface, H: FrameHost> Drop for Driver<S, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: Surface, H: FrameHost> fmt::Debug for Driver<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("state", &self.state)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("frames", &self.frames)
            .field("particles", &self.particles.len())
            .field("pending_frame", &self.pending_frame)
            .field("resize_watch", &self.resize_watch)
            .finish_non_exhaustive()
    }
}

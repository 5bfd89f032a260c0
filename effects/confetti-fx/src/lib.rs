//! Confetti and fountain particle effects
//!
//! This crate renders short celebratory particle bursts onto a transparent,
//! viewport-sized raster surface. It is split the same way a frame is
//! produced:
//!
//! - `Particle`: position, velocity, color, life and oscillation terms
//! - [`spawn_burst`]: initial distribution of one burst
//! - [`physics::step`]: gravity, drag, terminal clamp, wobble and wind
//! - [`Renderer`]: clears and draws live particles with life-based alpha
//! - [`Driver`]: frame loop, burst schedule, duration cutoff and completion
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use confetti_fx::{Driver, EffectConfig, ManualHost, RasterSurface, Viewport};
//!
//! let viewport = Viewport::new(390.0, 844.0, 3.0);
//! let mut host = ManualHost::new(viewport, 60);
//! let surface = RasterSurface::new(viewport);
//!
//! let mut driver = Driver::new(EffectConfig::fountain(), surface, &mut host)
//!     .on_done(|| println!("done"));
//! driver.start(Duration::ZERO)?;
//!
//! while let Some(now) = driver.host_mut().advance() {
//!     driver.tick(now);
//! }
//! # Ok::<(), confetti_fx::EffectError>(())
//! ```

pub mod color;
pub mod config;
pub mod driver;
pub mod emission;
pub mod error;
pub mod host;
pub mod particle;
pub mod physics;
pub mod raster;
pub mod render;
pub mod surface;

pub use color::{CONFETTI_PALETTE, Color, FOUNTAIN_PALETTE};
pub use config::{EffectConfig, Launch, Preset};
pub use driver::{Driver, DriverState};
pub use emission::{SpawnParams, Spread, spawn_burst};
pub use error::{EffectError, Result};
pub use host::{FrameHost, FrameRequest, ManualHost, ResizeWatch};
pub use particle::Particle;
pub use physics::{PhysicsConstants, Wind};
pub use raster::RasterSurface;
pub use render::{Renderer, Shape};
pub use surface::{DrawCall, Paint, RecordingSurface, Rect, Surface, Viewport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Effect configuration and named presets

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::color::{CONFETTI_PALETTE, Color, FOUNTAIN_PALETTE};
use crate::emission::SpawnParams;
use crate::error::EffectError;
use crate::physics::PhysicsConstants;
use crate::render::Shape;
use crate::surface::Viewport;

/// A scheduled burst fires on the first frame inside `[offset, offset + window)`
pub const BURST_WINDOW_MS: f32 = 30.0;

/// Confetti launch point when none is given
pub const DEFAULT_CONFETTI_ORIGIN: Vec2 = Vec2::new(100.0, 100.0);

/// Where a burst is launched from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Launch {
    /// A fixed point in surface coordinates
    Point { x: f32, y: f32 },
    /// Fractions of the viewport, resolved when the burst fires
    Anchor { x: f32, y: f32 },
}

impl Launch {
    pub fn point(origin: Vec2) -> Self {
        Self::Point {
            x: origin.x,
            y: origin.y,
        }
    }

    /// Launch position for the current viewport
    pub fn resolve(&self, viewport: &Viewport) -> Vec2 {
        match *self {
            Self::Point { x, y } => Vec2::new(x, y),
            Self::Anchor { x, y } => viewport.anchor(x, y),
        }
    }
}

/// Named effect variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Short localized burst of flakes
    Confetti,
    /// Long bottom-centre fountain of discs
    Fountain,
}

impl Preset {
    pub const ALL: [Self; 2] = [Self::Confetti, Self::Fountain];

    pub fn name(self) -> &'static str {
        match self {
            Self::Confetti => "confetti",
            Self::Fountain => "fountain",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EffectError::UnknownPreset(s.to_string()))
    }
}

/// Everything a driver needs to run one effect
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectConfig {
    pub launch: Launch,
    /// Total run time; the completion callback fires on the first frame at or past it
    pub duration_ms: u32,
    pub particles_per_burst: usize,
    /// Burst offsets from start, in milliseconds
    pub bursts: Vec<u32>,
    pub palette: Vec<Color>,
    pub spawn: SpawnParams,
    pub physics: PhysicsConstants,
    pub shape: Shape,
}

impl EffectConfig {
    /// Localized flake burst at `origin`
    pub fn confetti(origin: Vec2) -> Self {
        Self {
            launch: Launch::point(origin),
            duration_ms: 1400,
            particles_per_burst: 90,
            bursts: vec![0],
            palette: CONFETTI_PALETTE.to_vec(),
            spawn: SpawnParams::confetti(),
            physics: PhysicsConstants::confetti(),
            shape: Shape::Flake,
        }
    }

    /// Disc fountain rising from the bottom centre of the viewport
    pub fn fountain() -> Self {
        Self {
            launch: Launch::Anchor { x: 0.5, y: 0.9 },
            duration_ms: 4200,
            particles_per_burst: 220,
            bursts: vec![0],
            palette: FOUNTAIN_PALETTE.to_vec(),
            spawn: SpawnParams::fountain(),
            physics: PhysicsConstants::fountain(),
            shape: Shape::Disc,
        }
    }

    /// Preset configuration; `origin` overrides the launch point
    pub fn preset(preset: Preset, origin: Option<Vec2>) -> Self {
        match (preset, origin) {
            (Preset::Confetti, origin) => Self::confetti(origin.unwrap_or(DEFAULT_CONFETTI_ORIGIN)),
            (Preset::Fountain, None) => Self::fountain(),
            (Preset::Fountain, Some(origin)) => Self::fountain().with_launch(Launch::point(origin)),
        }
    }

    pub fn with_launch(mut self, launch: Launch) -> Self {
        self.launch = launch;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_count(mut self, particles_per_burst: usize) -> Self {
        self.particles_per_burst = particles_per_burst;
        self
    }

    pub fn with_palette(mut self, palette: impl Into<Vec<Color>>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_bursts(mut self, bursts: impl Into<Vec<u32>>) -> Self {
        self.bursts = bursts.into();
        self
    }

    /// Upper bound on particles created over the whole run
    pub fn total_particles(&self) -> usize {
        if self.palette.is_empty() {
            return 0;
        }
        self.particles_per_burst * self.bursts.len()
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::fountain()
    }
}

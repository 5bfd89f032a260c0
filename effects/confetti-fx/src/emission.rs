//! Burst spawning

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Range;

use glam::Vec2;
use rand::Rng;

use crate::color::Color;
use crate::particle::Particle;

/// Smallest decay a particle may receive, so life always reaches zero
pub const MIN_DECAY: f32 = 1.0e-4;

/// Angular distribution of launch directions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Spread {
    /// Any direction
    FullCircle,
    /// A fan of `width` radians centred on `center`
    Fan { center: f32, width: f32 },
}

impl Spread {
    /// Upward fan used by the fountain burst
    pub const FOUNTAIN: Self = Self::Fan {
        center: -FRAC_PI_2,
        width: PI * 0.45,
    };

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            Self::FullCircle => rng.random::<f32>() * TAU,
            Self::Fan { center, width } => center + (rng.random::<f32>() - 0.5) * width,
        }
    }
}

/// Initial distribution of a burst
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnParams {
    /// Launch direction distribution
    pub spread: Spread,
    /// Launch speed in pixels per frame
    pub speed: Range<f32>,
    /// Independent multiplier applied to each velocity axis
    pub speed_jitter: Range<f32>,
    /// Subtracted from the vertical velocity (pushes the burst up)
    pub upward_bias: f32,
    /// Side of the square around the origin particles start in
    pub position_jitter: f32,
    /// Flake edge or disc radius
    pub size: Range<f32>,
    /// Life lost per frame
    pub decay: Range<f32>,
    /// Initial rotation in radians
    pub angle: Range<f32>,
    /// Rotation per frame in radians
    pub spin: Range<f32>,
    pub wobble: Range<f32>,
    pub wobble_speed: Range<f32>,
    pub tilt: Range<f32>,
    pub tilt_speed: Range<f32>,
}

impl SpawnParams {
    /// Localized burst: any direction, kicked upwards, fast fade
    pub fn confetti() -> Self {
        Self {
            spread: Spread::FullCircle,
            speed: 5.0..11.0,
            speed_jitter: 1.0..1.0,
            upward_bias: 4.0,
            position_jitter: 0.0,
            size: 3.0..7.0,
            decay: 0.015..0.035,
            angle: 0.0..TAU,
            spin: (-6.0_f32).to_radians()..6.0_f32.to_radians(),
            wobble: 0.0..0.0,
            wobble_speed: 0.0..0.0,
            tilt: 0.0..0.0,
            tilt_speed: 0.0..0.0,
        }
    }

    /// Bottom fountain: narrow upward fan, slow fade, wobbling discs
    pub fn fountain() -> Self {
        Self {
            spread: Spread::FOUNTAIN,
            speed: 5.8..10.6,
            speed_jitter: 0.9..1.05,
            upward_bias: 0.0,
            position_jitter: 6.0,
            size: 2.0..4.5,
            decay: 0.004..0.010,
            angle: 0.0..TAU,
            spin: -0.12..0.12,
            wobble: 0.0..8.0,
            wobble_speed: 0.04..0.12,
            tilt: 0.0..TAU,
            tilt_speed: -0.09..0.09,
        }
    }
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self::confetti()
    }
}

/// Sample a half-open range, tolerating empty ranges
fn uniform<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    if range.end > range.start {
        rng.random_range(range.clone())
    } else {
        range.start
    }
}

/// Create `count` particles at `origin`
///
/// Colors are assigned round-robin, `palette[i % palette.len()]`, so the
/// distribution is exact for any count. An empty palette yields no
/// particles.
pub fn spawn_burst<R: Rng + ?Sized>(
    origin: Vec2,
    count: usize,
    palette: &[Color],
    params: &SpawnParams,
    rng: &mut R,
) -> Vec<Particle> {
    if palette.is_empty() {
        if count > 0 {
            log::debug!("Empty palette, skipping burst of {count} particles");
        }
        return Vec::new();
    }

    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let direction = params.spread.sample(rng);
        let speed = uniform(rng, &params.speed);
        let velocity = Vec2::new(
            direction.cos() * speed * uniform(rng, &params.speed_jitter),
            direction.sin() * speed * uniform(rng, &params.speed_jitter) - params.upward_bias,
        );

        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
            * params.position_jitter;

        let mut particle = Particle::new(
            origin + jitter,
            velocity,
            uniform(rng, &params.size),
            palette[i % palette.len()],
            uniform(rng, &params.decay).max(MIN_DECAY),
        );
        particle.angle = uniform(rng, &params.angle);
        particle.spin = uniform(rng, &params.spin);
        particle.wobble = uniform(rng, &params.wobble);
        particle.wobble_speed = uniform(rng, &params.wobble_speed);
        particle.tilt = uniform(rng, &params.tilt);
        particle.tilt_speed = uniform(rng, &params.tilt_speed);
        particles.push(particle);
    }

    log::trace!("Spawned {} particles at ({}, {})", count, origin.x, origin.y);
    particles
}

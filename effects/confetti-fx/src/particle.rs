//! Individual particle representation

use glam::Vec2;

use crate::color::Color;

/// A single confetti particle
///
/// Coordinates are surface-local CSS pixels with y growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Surface-local position
    pub position: Vec2,
    /// Velocity in pixels per frame
    pub velocity: Vec2,
    /// Edge length (flakes) or radius (discs)
    pub size: f32,
    /// Fill color, fixed for the particle's lifetime
    pub color: Color,
    /// Remaining visibility, starts at 1.0
    pub life: f32,
    /// Amount subtracted from `life` each frame
    pub decay: f32,
    /// Rotation in radians
    pub angle: f32,
    /// Rotation added each frame
    pub spin: f32,
    /// Wobble phase
    pub wobble: f32,
    /// Wobble phase advance per frame
    pub wobble_speed: f32,
    /// Tilt phase, drives horizontal drift and highlight shading
    pub tilt: f32,
    /// Tilt phase advance per frame
    pub tilt_speed: f32,
}

impl Particle {
    /// Create a particle at full life with no rotation or oscillation
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Color, decay: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
            life: 1.0,
            decay,
            angle: 0.0,
            spin: 0.0,
            wobble: 0.0,
            wobble_speed: 0.0,
            tilt: 0.0,
            tilt_speed: 0.0,
        }
    }

    /// Check if the particle is still visible
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Paint opacity derived from remaining life
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    /// Tilt mapped to 0.0-1.0, used to shade the highlight
    #[inline]
    pub fn flip(&self) -> f32 {
        (self.tilt.sin() + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Particle {
        Particle::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, -0.5), 3.0, Color::WHITE, 0.02)
    }

    #[test]
    fn test_particle_new() {
        let p = sample();
        assert_eq!(p.position, Vec2::new(1.0, 2.0));
        assert_eq!(p.velocity, Vec2::new(0.5, -0.5));
        assert_eq!(p.life, 1.0);
        assert_eq!(p.angle, 0.0);
        assert!(p.is_alive());
    }

    #[test]
    fn test_particle_is_alive() {
        let mut p = sample();
        p.life = 0.0001;
        assert!(p.is_alive());

        p.life = 0.0;
        assert!(!p.is_alive());

        p.life = -0.3;
        assert!(!p.is_alive());
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_particle_flip_range() {
        let mut p = sample();
        for step in 0..64 {
            p.tilt = step as f32 * 0.3;
            assert!((0.0..=1.0).contains(&p.flip()));
        }
    }
}

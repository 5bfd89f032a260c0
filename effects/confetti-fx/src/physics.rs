//! Per-frame particle integration
//!
//! Units are pixels and frames: gravity is added to the vertical velocity
//! once per step and drag is a per-step multiplier. Wall-clock time only
//! enters through the ambient wind term, so the stepper is deterministic for
//! a given particle, constant set, and elapsed time.

use glam::Vec2;

use crate::particle::Particle;

/// Slow sinusoidal horizontal gust shared by every particle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Wind {
    /// Peak horizontal acceleration in pixels per frame squared
    pub amplitude: f32,
    /// Angular frequency in radians per millisecond
    pub frequency: f32,
}

impl Wind {
    /// Wind acceleration at `elapsed_ms` into the effect
    #[inline]
    pub fn at(&self, elapsed_ms: f32) -> f32 {
        (elapsed_ms * self.frequency).sin() * self.amplitude
    }
}

/// Constants shared by all particles of one effect
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsConstants {
    /// Added to vy every frame
    pub gravity: f32,
    /// Velocity multiplier per frame, in (0, 1)
    pub drag: f32,
    /// Upper bound for vy after a step
    pub terminal_velocity: f32,
    /// Optional ambient gust
    pub wind: Option<Wind>,
    /// Horizontal drift scaled by the particle's tilt
    pub tilt_drift: f32,
    /// Peak wobble displacement per frame on each axis
    pub wobble_amplitude: Vec2,
}

impl PhysicsConstants {
    /// Heavier fall for the localized burst
    pub fn confetti() -> Self {
        Self {
            gravity: 0.25,
            drag: 0.992,
            terminal_velocity: 12.0,
            wind: None,
            tilt_drift: 0.0,
            wobble_amplitude: Vec2::ZERO,
        }
    }

    /// Gentle fall with wobble and wind for the fountain
    pub fn fountain() -> Self {
        Self {
            gravity: 0.12,
            drag: 0.997,
            terminal_velocity: 4.8,
            wind: Some(Wind {
                amplitude: 0.002,
                frequency: 0.0014,
            }),
            tilt_drift: 0.001,
            wobble_amplitude: Vec2::new(0.5, 0.18),
        }
    }

    /// Wind acceleration at `elapsed_ms`, zero when there is no wind
    #[inline]
    pub fn wind_at(&self, elapsed_ms: f32) -> f32 {
        self.wind.map_or(0.0, |wind| wind.at(elapsed_ms))
    }
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self::confetti()
    }
}

/// Advance one particle by one frame
///
/// Dead particles (life <= 0) are left untouched.
pub fn step(particle: &mut Particle, constants: &PhysicsConstants, elapsed_ms: f32) {
    if !particle.is_alive() {
        return;
    }

    let velocity = &mut particle.velocity;
    velocity.y += constants.gravity;
    velocity.x += constants.wind_at(elapsed_ms) + constants.tilt_drift * (particle.tilt * 1.1).sin();
    *velocity *= constants.drag;
    velocity.y = velocity.y.min(constants.terminal_velocity);

    let wobble = Vec2::new(
        particle.wobble.cos() * constants.wobble_amplitude.x,
        (particle.wobble * 0.85).sin() * constants.wobble_amplitude.y,
    );
    particle.position += particle.velocity + wobble;

    particle.wobble += particle.wobble_speed;
    particle.tilt += particle.tilt_speed;
    particle.angle += particle.spin;
    particle.life -= particle.decay;
}

/// Advance every particle by one frame, returning how many are still alive
pub fn step_all(particles: &mut [Particle], constants: &PhysicsConstants, elapsed_ms: f32) -> usize {
    particles
        .iter_mut()
        .map(|particle| {
            step(particle, constants, elapsed_ms);
            particle.is_alive()
        })
        .filter(|alive| *alive)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn particle(velocity: Vec2) -> Particle {
        Particle::new(Vec2::ZERO, velocity, 4.0, Color::WHITE, 0.02)
    }

    #[test]
    fn test_gravity_then_drag() {
        let mut p = particle(Vec2::new(2.0, 0.0));
        let constants = PhysicsConstants::confetti();
        step(&mut p, &constants, 0.0);

        assert!((p.velocity.x - 2.0 * 0.992).abs() < 1e-6);
        assert!((p.velocity.y - 0.25 * 0.992).abs() < 1e-6);
        assert_eq!(p.position, p.velocity);
        assert!((p.life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let mut p = particle(Vec2::new(0.0, 50.0));
        let constants = PhysicsConstants::fountain();
        step(&mut p, &constants, 0.0);
        assert_eq!(p.velocity.y, constants.terminal_velocity);
    }

    #[test]
    fn test_drag_decays_without_gravity() {
        let mut p = particle(Vec2::new(10.0, -10.0));
        p.decay = 0.0001;
        let constants = PhysicsConstants {
            gravity: 0.0,
            ..PhysicsConstants::confetti()
        };
        for _ in 0..500 {
            step(&mut p, &constants, 0.0);
        }
        assert!(p.velocity.length() < 10.0_f32.hypot(10.0) * 0.992_f32.powi(499));
    }

    #[test]
    fn test_dead_particles_are_inert() {
        let mut p = particle(Vec2::new(1.0, 1.0));
        p.life = 0.0;
        let before = p.clone();
        step(&mut p, &PhysicsConstants::fountain(), 120.0);
        assert_eq!(p, before);
    }

    #[test]
    fn test_rotation_and_phases_advance() {
        let mut p = particle(Vec2::ZERO);
        p.spin = 0.1;
        p.wobble_speed = 0.05;
        p.tilt_speed = -0.02;
        step(&mut p, &PhysicsConstants::fountain(), 0.0);
        assert!((p.angle - 0.1).abs() < 1e-6);
        assert!((p.wobble - 0.05).abs() < 1e-6);
        assert!((p.tilt + 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_wind_follows_elapsed_time() {
        let constants = PhysicsConstants::fountain();
        assert_eq!(constants.wind_at(0.0), 0.0);
        let quarter = std::f32::consts::FRAC_PI_2 / 0.0014;
        assert!((constants.wind_at(quarter) - 0.002).abs() < 1e-6);
        assert_eq!(PhysicsConstants::confetti().wind_at(quarter), 0.0);
    }

    #[test]
    fn test_step_all_counts_survivors() {
        let mut particles = vec![particle(Vec2::ZERO), particle(Vec2::ZERO)];
        particles[1].life = 0.01;
        let alive = step_all(&mut particles, &PhysicsConstants::confetti(), 0.0);
        assert_eq!(alive, 1);
    }
}

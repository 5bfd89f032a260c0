//! Particle rendering

use glam::{Affine2, Vec2};

use crate::color::Color;
use crate::particle::Particle;
use crate::surface::{Paint, Rect, Surface};

/// Flake height relative to its width
pub const FLAKE_ASPECT: f32 = 1.2;
/// Flake corner radius relative to its width
pub const FLAKE_CORNER: f32 = 0.25;
/// Highlight radius and offset relative to the disc radius
pub const HIGHLIGHT_SCALE: f32 = 0.35;
/// Highlight opacity relative to the disc opacity
pub const HIGHLIGHT_ALPHA: f32 = 0.22;

/// How each particle is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// Rounded rectangle, slightly taller than wide
    #[default]
    Flake,
    /// Filled circle with a soft highlight towards the top-left
    Disc,
}

/// Draws a particle set onto a surface
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    shape: Shape,
}

impl Renderer {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    /// Clear the surface and draw every live particle
    ///
    /// Returns the number of particles drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) -> usize {
        surface.clear();

        let mut drawn = 0;
        for particle in particles.iter().filter(|p| p.is_alive()) {
            let transform = Affine2::from_angle_translation(particle.angle, particle.position);
            let alpha = particle.opacity();
            match self.shape {
                Shape::Flake => draw_flake(surface, transform, particle, alpha),
                Shape::Disc => draw_disc(surface, transform, particle, alpha),
            }
            drawn += 1;
        }
        drawn
    }
}

fn draw_flake<S: Surface + ?Sized>(surface: &mut S, transform: Affine2, particle: &Particle, alpha: f32) {
    let size = particle.size;
    let rect = Rect::new(Vec2::splat(-size / 2.0), Vec2::new(size, size * FLAKE_ASPECT));
    surface.fill_rounded_rect(
        transform,
        rect,
        size * FLAKE_CORNER,
        Paint {
            color: particle.color,
            alpha,
        },
    );
}

fn draw_disc<S: Surface + ?Sized>(surface: &mut S, transform: Affine2, particle: &Particle, alpha: f32) {
    let radius = particle.size;
    surface.fill_circle(
        transform,
        Vec2::ZERO,
        radius,
        Paint {
            color: particle.color,
            alpha,
        },
    );

    let highlight = radius * HIGHLIGHT_SCALE;
    surface.fill_circle(
        transform,
        Vec2::splat(-highlight),
        highlight,
        Paint {
            color: Color::WHITE,
            alpha: alpha * HIGHLIGHT_ALPHA * (0.65 + 0.35 * particle.flip()),
        },
    );
}

//! Drawing surface abstraction
//!
//! The renderer talks to a [`Surface`] the way a browser talks to a 2D canvas
//! context: shapes are described in CSS pixels under an affine transform and
//! the surface maps them onto its backing store at the device pixel ratio.

use glam::{Affine2, Vec2};

use crate::color::Color;

/// Size of the host viewport
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: f32,
    /// Height in CSS pixels
    pub height: f32,
    /// Device pixels per CSS pixel
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Device pixel ratio, never below 1.0
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.max(1.0)
        } else {
            1.0
        }
    }

    /// Backing store size in device pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        (
            (self.width.max(0.0) * ratio).floor() as u32,
            (self.height.max(0.0) * ratio).floor() as u32,
        )
    }

    /// Point at the given fractions of the viewport size
    pub fn anchor(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(self.width * x, self.height * y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Fill style for one shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    /// Global alpha in 0.0-1.0
    pub alpha: f32,
}

/// Axis-aligned rectangle in shape-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// A 2D raster target
pub trait Surface {
    /// Whether the surface has a backing buffer to draw into
    fn is_attached(&self) -> bool;

    /// Recompute the backing size for a new viewport
    fn resize(&mut self, viewport: Viewport);

    /// Erase every pixel to transparent
    fn clear(&mut self);

    /// Fill a rounded rectangle given in local coordinates
    fn fill_rounded_rect(&mut self, transform: Affine2, rect: Rect, corner_radius: f32, paint: Paint);

    /// Fill a circle given in local coordinates
    fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, paint: Paint);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_rounded_rect(&mut self, transform: Affine2, rect: Rect, corner_radius: f32, paint: Paint) {
        (**self).fill_rounded_rect(transform, rect, corner_radius, paint);
    }

    fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, paint: Paint) {
        (**self).fill_circle(transform, center, radius, paint);
    }
}

/// One recorded surface operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize(Viewport),
    Clear,
    RoundedRect {
        transform: Affine2,
        rect: Rect,
        corner_radius: f32,
        paint: Paint,
    },
    Circle {
        transform: Affine2,
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
}

impl DrawCall {
    /// Whether this call paints pixels
    pub fn is_fill(&self) -> bool {
        matches!(self, Self::RoundedRect { .. } | Self::Circle { .. })
    }
}

/// Surface that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    attached: bool,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// An attached recorder
    pub fn new() -> Self {
        Self {
            attached: true,
            calls: Vec::new(),
        }
    }

    /// A recorder that reports no backing buffer
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls issued since the most recent clear, excluding the clear itself
    pub fn current_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|call| *call == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }

    pub fn fill_count(&self) -> usize {
        self.calls.iter().filter(|call| call.is_fill()).count()
    }
}

impl Surface for RecordingSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn resize(&mut self, viewport: Viewport) {
        self.calls.push(DrawCall::Resize(viewport));
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rounded_rect(&mut self, transform: Affine2, rect: Rect, corner_radius: f32, paint: Paint) {
        self.calls.push(DrawCall::RoundedRect {
            transform,
            rect,
            corner_radius,
            paint,
        });
    }

    fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::Circle {
            transform,
            center,
            radius,
            paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_uses_ratio() {
        let viewport = Viewport::new(390.5, 844.0, 3.0);
        assert_eq!(viewport.pixel_size(), (1171, 2532));
    }

    #[test]
    fn test_pixel_ratio_floor() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.5).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f32::NAN).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, 0.5).pixel_size(), (10, 10));
    }

    #[test]
    fn test_anchor() {
        let viewport = Viewport::new(400.0, 800.0, 2.0);
        assert_eq!(viewport.anchor(0.5, 0.9), Vec2::new(200.0, 720.0));
    }

    #[test]
    fn test_recording_current_frame() {
        let mut surface = RecordingSurface::new();
        let paint = Paint {
            color: Color::WHITE,
            alpha: 1.0,
        };
        surface.fill_circle(Affine2::IDENTITY, Vec2::ZERO, 1.0, paint);
        surface.clear();
        surface.fill_circle(Affine2::IDENTITY, Vec2::ONE, 2.0, paint);

        assert_eq!(surface.calls().len(), 3);
        assert_eq!(surface.current_frame().len(), 1);
        assert_eq!(surface.fill_count(), 2);
    }
}

//! Software raster surface backed by an RGBA image
//!
//! Shapes are rasterized by evaluating a signed distance in shape-local space
//! at every device pixel centre inside the transformed bounds. Coverage is
//! derived from that distance to give a one-pixel antialiased edge, and the
//! result is composited with straight-alpha source-over blending.

use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};

use crate::color::Color;
use crate::surface::{Paint, Rect, Surface, Viewport};

/// Transparent full-viewport layer
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: Option<RgbaImage>,
    pixel_ratio: f32,
}

impl RasterSurface {
    /// Attached surface sized for `viewport`
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self {
            image: Some(RgbaImage::new(0, 0)),
            pixel_ratio: 1.0,
        };
        surface.resize(viewport);
        surface
    }

    /// Surface with no backing buffer; drivers refuse to start on it
    pub fn detached() -> Self {
        Self {
            image: None,
            pixel_ratio: 1.0,
        }
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Number of pixels with any coverage
    pub fn painted_pixels(&self) -> usize {
        self.image
            .as_ref()
            .map_or(0, |image| image.pixels().filter(|px| px[3] > 0).count())
    }

    fn fill_shape<F>(&mut self, transform: Affine2, bounds: Rect, paint: Paint, distance: F)
    where
        F: Fn(Vec2) -> f32,
    {
        let alpha = paint.alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let Some(image) = self.image.as_mut() else {
            return;
        };
        if image.width() == 0 || image.height() == 0 {
            return;
        }

        let device = Affine2::from_scale(Vec2::splat(self.pixel_ratio)) * transform;
        let inverse = device.inverse();
        if !inverse.is_finite() {
            return;
        }

        let corners = [
            bounds.min,
            bounds.min + Vec2::new(bounds.size.x, 0.0),
            bounds.min + Vec2::new(0.0, bounds.size.y),
            bounds.min + bounds.size,
        ]
        .map(|corner| device.transform_point2(corner));
        let lo = corners.iter().copied().fold(Vec2::INFINITY, Vec2::min) - Vec2::ONE;
        let hi = corners.iter().copied().fold(Vec2::NEG_INFINITY, Vec2::max) + Vec2::ONE;

        let max_x = image.width() as f32;
        let max_y = image.height() as f32;
        let x0 = lo.x.clamp(0.0, max_x) as u32;
        let y0 = lo.y.clamp(0.0, max_y) as u32;
        let x1 = hi.x.ceil().clamp(0.0, max_x) as u32;
        let y1 = hi.y.ceil().clamp(0.0, max_y) as u32;

        // Local units are CSS pixels, so one device pixel spans 1/ratio of them
        let scale = self.pixel_ratio;
        for y in y0..y1 {
            for x in x0..x1 {
                let local = inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                let coverage = (0.5 - distance(local) * scale).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(image.get_pixel_mut(x, y), paint.color, coverage * alpha);
                }
            }
        }
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Surface for RasterSurface {
    fn is_attached(&self) -> bool {
        self.image.is_some()
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.image.is_none() {
            return;
        }
        let (width, height) = viewport.pixel_size();
        self.pixel_ratio = viewport.pixel_ratio();
        self.image = Some(RgbaImage::new(width, height));
        log::trace!(
            "Raster resized to {}x{} (ratio {})",
            width,
            height,
            self.pixel_ratio
        );
    }

    fn clear(&mut self) {
        if let Some(image) = self.image.as_mut() {
            image.pixels_mut().for_each(|px| *px = Rgba([0, 0, 0, 0]));
        }
    }

    fn fill_rounded_rect(&mut self, transform: Affine2, rect: Rect, corner_radius: f32, paint: Paint) {
        let half = rect.size.abs() * 0.5;
        let center = rect.center();
        let radius = corner_radius.clamp(0.0, half.min_element());
        self.fill_shape(transform, rect, paint, |p| {
            let q = (p - center).abs() - half + Vec2::splat(radius);
            q.max(Vec2::ZERO).length() + q.max_element().min(0.0) - radius
        });
    }

    fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, paint: Paint) {
        let bounds = Rect::new(center - Vec2::splat(radius), Vec2::splat(radius * 2.0));
        self.fill_shape(transform, bounds, paint, |p| p.distance(center) - radius);
    }
}

/// Straight-alpha source-over
fn blend(dst: &mut Rgba<u8>, color: Color, alpha: f32) {
    let src = color.to_f32();
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }

    for (channel, value) in src.iter().enumerate() {
        let below = f32::from(dst[channel]) / 255.0;
        let mixed = (value * alpha + below * dst_alpha * (1.0 - alpha)) / out_alpha;
        dst[channel] = (mixed * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

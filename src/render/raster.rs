//! CPU rasterizer backed by an RGBA image.
//!
//! Shapes are drawn with signed-distance coverage (one pixel of antialiasing)
//! and composited source-over in straight alpha. Work is bounded by each
//! shape's bounding box, so a frame costs roughly the covered area.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use glam::{Vec2, Vec4};
use image::{ImageFormat, Rgba, RgbaImage};

use super::canvas::{Canvas, Rect};
use super::font;
use crate::error::SnapshotError;
use crate::scene::Viewport;

/// A [`Canvas`] that draws into an in-memory RGBA framebuffer.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
    scale: f32,
}

impl Raster {
    /// Create a framebuffer sized and scaled for `viewport`.
    pub fn new(viewport: &Viewport) -> Self {
        let mut raster = Self {
            image: RgbaImage::new(1, 1),
            scale: 1.0,
        };
        raster.configure(viewport);
        raster
    }

    /// Raw RGBA8 bytes, row-major, no padding.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Current logical-to-physical scale.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pixel at physical coordinates, or `None` outside the framebuffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Write the current frame as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.image.write_to(&mut writer, ImageFormat::Png)?;
        Ok(())
    }

    /// Composite `color` at `coverage` onto one physical pixel.
    fn blend(&mut self, x: u32, y: u32, color: Vec4, coverage: f32) {
        let src_a = (color.w * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let Rgba(dst) = *self.image.get_pixel(x, y);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mut out = [0u8; 4];
        for c in 0..3 {
            let s = color[c].clamp(0.0, 1.0);
            let d = dst[c] as f32 / 255.0;
            out[c] = to_byte((s * src_a + d * dst_a * (1.0 - src_a)) / out_a);
        }
        out[3] = to_byte(out_a);
        self.image.put_pixel(x, y, Rgba(out));
    }

    /// Visit every physical pixel whose center lies within `lo..hi`
    /// (physical coordinates, expanded by one pixel for antialiasing) and
    /// blend `color` with the coverage `shape` reports for that center.
    fn shade(&mut self, lo: Vec2, hi: Vec2, color: Vec4, shape: impl Fn(Vec2) -> f32) {
        let x0 = (lo.x - 1.0).floor().max(0.0) as u32;
        let y0 = (lo.y - 1.0).floor().max(0.0) as u32;
        let x1 = ((hi.x + 1.0).ceil().max(0.0) as u32).min(self.width());
        let y1 = ((hi.y + 1.0).ceil().max(0.0) as u32).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = shape(center);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage.min(1.0));
                }
            }
        }
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Signed distance from `p` to a rounded box centered at `center`.
fn rounded_box_sdf(p: Vec2, center: Vec2, half: Vec2, radius: f32) -> f32 {
    let radius = radius.min(half.x).min(half.y).max(0.0);
    let q = (p - center).abs() - half + Vec2::splat(radius);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}

impl Canvas for Raster {
    fn configure(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.backing_size();
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
        self.scale = viewport.pixel_ratio;
    }

    fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Vec4) {
        let r = rect.scaled(self.scale);
        let (center, half, radius) = (r.center(), r.size() * 0.5, radius * self.scale);
        self.shade(r.min, r.max, color, |p| {
            0.5 - rounded_box_sdf(p, center, half, radius)
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Vec4) {
        let r = rect.scaled(self.scale);
        let (center, half, radius) = (r.center(), r.size() * 0.5, radius * self.scale);
        let half_width = (width * self.scale * 0.5).max(0.5);
        let pad = Vec2::splat(half_width);
        self.shade(r.min - pad, r.max + pad, color, |p| {
            half_width + 0.5 - rounded_box_sdf(p, center, half, radius).abs()
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec4) {
        let (a, b) = (from * self.scale, to * self.scale);
        let half_width = (width * self.scale * 0.5).max(0.5);
        let pad = Vec2::splat(half_width);
        self.shade(a.min(b) - pad, a.max(b) + pad, color, |p| {
            half_width + 0.5 - segment_distance(p, a, b)
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        let (c, r) = (center * self.scale, radius * self.scale);
        let extent = Vec2::splat(r);
        self.shade(c - extent, c + extent, color, |p| 0.5 - (p.distance(c) - r));
    }

    fn fill_text(&mut self, origin: Vec2, text: &str, size: f32, color: Vec4) {
        let cell = font::cell_size(size);
        for (col, row) in font::lit_cells(text) {
            let min = origin + Vec2::new(col as f32, row as f32) * cell;
            self.fill_rounded_rect(Rect::new(min, min + Vec2::splat(cell)), 0.0, color);
        }
    }
}

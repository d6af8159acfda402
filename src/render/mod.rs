//! Frame rendering.
//!
//! Draw order, back to front:
//!
//! 1. room backplates
//! 2. connective edges between same-room particles
//! 3. particle markers
//! 4. label chips (when enabled)
//!
//! Edges come from an all-pairs scan restricted to same-room pairs, so the
//! cost is O(N²) in the particle count. That is fine at the default
//! population (dozens of particles); there is no spatial partitioning.

mod canvas;
pub mod font;
mod raster;

pub use canvas::{Canvas, DrawCommand, DrawList, Rect};
pub use raster::Raster;

use glam::{Vec2, Vec3, Vec4};

use crate::config::BackgroundConfig;
use crate::scene::{Scene, Viewport};

/// Brand indigo used for every stroke and fill.
pub const BRAND: Vec3 = Vec3::new(0.388, 0.400, 0.945);

/// Backplate size as a fraction of the container.
pub const BACKPLATE_SIZE: Vec2 = Vec2::new(0.28, 0.20);
pub const BACKPLATE_RADIUS: f32 = 16.0;
pub const BACKPLATE_FILL_ALPHA: f32 = 0.05;
pub const BACKPLATE_STROKE_ALPHA: f32 = 0.12;

pub const EDGE_WIDTH: f32 = 1.0;
/// Edge threshold as a fraction of the container's shorter side...
pub const EDGE_THRESHOLD_FRACTION: f32 = 0.10;
/// ...clamped to this range, in logical pixels.
pub const EDGE_THRESHOLD_RANGE: (f32, f32) = (50.0, 80.0);

pub const PARTICLE_RADIUS: f32 = 1.6;
pub const PARTICLE_ALPHA: f32 = 0.55;

pub const LABEL_TEXT_SIZE: f32 = 14.0;
const LABEL_PADDING: Vec2 = Vec2::new(10.0, 5.0);
/// Gap between the top of a backplate and the top of its chip.
const LABEL_INSET: f32 = 8.0;
const LABEL_FILL: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.85);
const LABEL_STROKE_ALPHA: f32 = 0.25;
const LABEL_TEXT_ALPHA: f32 = 0.9;

/// What the renderer needs from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Alpha of an edge between two coincident particles.
    pub line_alpha: f32,
    pub show_labels: bool,
}

impl From<&BackgroundConfig> for RenderStyle {
    fn from(config: &BackgroundConfig) -> Self {
        Self {
            line_alpha: config.edge_alpha(),
            show_labels: config.show_labels,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from(&BackgroundConfig::default())
    }
}

/// Maximum edge length for `viewport`: `clamp(min(w, h) * 0.10, 50, 80)`.
pub fn edge_threshold(viewport: &Viewport) -> f32 {
    let shorter = viewport.width.min(viewport.height);
    (shorter * EDGE_THRESHOLD_FRACTION).clamp(EDGE_THRESHOLD_RANGE.0, EDGE_THRESHOLD_RANGE.1)
}

/// Alpha of an edge of length `distance`: `max_alpha * (1 - d / T)` below
/// the threshold `T`, zero at or beyond it.
#[inline]
pub fn edge_alpha(distance: f32, threshold: f32, max_alpha: f32) -> f32 {
    if distance < threshold {
        max_alpha * (1.0 - distance / threshold)
    } else {
        0.0
    }
}

/// Bounding box of a room's label chip.
pub fn label_chip(label: &str, anchor: Vec2, viewport: &Viewport) -> Rect {
    let text = Vec2::new(font::text_width(label, LABEL_TEXT_SIZE), LABEL_TEXT_SIZE);
    let size = text + LABEL_PADDING * 2.0;
    let plate_top = anchor.y - BACKPLATE_SIZE.y * viewport.height * 0.5;
    let min = Vec2::new(anchor.x - size.x * 0.5, plate_top + LABEL_INSET);
    Rect::new(min, min + size)
}

/// Draw one frame of `scene` onto `canvas`.
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, scene: &Scene, style: &RenderStyle) {
    let viewport = scene.viewport();
    canvas.clear();

    let plate_size = BACKPLATE_SIZE * viewport.size();
    for cluster in scene.clusters() {
        let rect = Rect::from_center(cluster.pixel_center(viewport), plate_size);
        canvas.fill_rounded_rect(rect, BACKPLATE_RADIUS, BRAND.extend(BACKPLATE_FILL_ALPHA));
        canvas.stroke_rounded_rect(rect, BACKPLATE_RADIUS, 1.0, BRAND.extend(BACKPLATE_STROKE_ALPHA));
    }

    let threshold = edge_threshold(viewport);
    let particles = scene.particles();
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            if a.cluster_id != b.cluster_id {
                continue;
            }
            let alpha = edge_alpha(a.position.distance(b.position), threshold, style.line_alpha);
            if alpha > 0.0 {
                canvas.stroke_line(a.position, b.position, EDGE_WIDTH, BRAND.extend(alpha));
            }
        }
    }

    for p in particles {
        canvas.fill_circle(p.position, PARTICLE_RADIUS, BRAND.extend(PARTICLE_ALPHA));
    }

    if style.show_labels {
        for label in scene.labels() {
            let chip = label_chip(label.label, Vec2::new(label.x, label.y), viewport);
            let radius = chip.size().y * 0.5;
            canvas.fill_rounded_rect(chip, radius, LABEL_FILL);
            canvas.stroke_rounded_rect(chip, radius, 1.0, BRAND.extend(LABEL_STROKE_ALPHA));
            canvas.fill_text(
                chip.min + LABEL_PADDING,
                &label.label.to_ascii_uppercase(),
                LABEL_TEXT_SIZE,
                BRAND.extend(LABEL_TEXT_ALPHA),
            );
        }
    }
}

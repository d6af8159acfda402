//! Scene layout: rooms, particles and the viewport they live in.
//!
//! A [`Scene`] is rebuilt from scratch every time the container size changes.
//! Nothing from the previous layout survives a rebuild: the cluster, particle
//! and label vectors are freshly allocated and swapped in as a whole.

use glam::Vec2;
use rand::Rng;

use crate::config::BackgroundConfig;
use crate::spawn::SpawnContext;

/// Candidate room labels, in instantiation order.
pub const ROOM_LABELS: [&str; 4] = ["Entrance", "Kitchen", "Bedroom", "Pooja"];

/// Horizontal spawn jitter as a fraction of container width.
pub const JITTER_X: f32 = 0.06;
/// Vertical spawn jitter as a fraction of container height.
pub const JITTER_Y: f32 = 0.05;
/// Initial velocity spread as a multiple of the base speed.
pub const VELOCITY_SPREAD: f32 = 0.4;

/// Logical container size plus the display's pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width in pixels (at least 1).
    pub width: f32,
    /// Logical height in pixels (at least 1).
    pub height: f32,
    /// Physical pixels per logical pixel (at least 1).
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Create a viewport, coercing degenerate sizes to 1x1 and ratios to 1.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width: at_least_one(width),
            height: at_least_one(height),
            pixel_ratio: at_least_one(pixel_ratio),
        }
    }

    /// Logical size as a vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Backing resolution of the drawing surface in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).ceil() as u32,
            (self.height * self.pixel_ratio).ceil() as u32,
        )
    }

    /// Map a normalized `[0,1]` position to logical pixels.
    #[inline]
    pub fn to_pixels(&self, normalized: Vec2) -> Vec2 {
        normalized * self.size()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

fn at_least_one(value: f32) -> f32 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

/// A labeled room that a subset of particles loosely orbits.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Normalized center within the container.
    pub center: Vec2,
    /// Room label.
    pub label: &'static str,
}

impl Cluster {
    /// Center in logical pixels for the given viewport.
    #[inline]
    pub fn pixel_center(&self, viewport: &Viewport) -> Vec2 {
        viewport.to_pixels(self.center)
    }
}

/// A simulated node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in logical pixels.
    pub position: Vec2,
    /// Velocity in logical pixels per frame.
    pub velocity: Vec2,
    /// Index into the scene's cluster list.
    pub cluster_id: usize,
}

/// Where a room's label chip is anchored, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPosition {
    pub x: f32,
    pub y: f32,
    pub label: &'static str,
}

/// Lay out `count` rooms across the container.
///
/// Room `i` sits at `x = (i + 1) / (count + 1)`, alternating between
/// `y = 0.35` (even) and `y = 0.6` (odd).
pub fn layout_clusters(count: usize) -> Vec<Cluster> {
    let count = count.clamp(1, ROOM_LABELS.len());
    (0..count)
        .map(|i| Cluster {
            center: Vec2::new(
                (i + 1) as f32 / (count + 1) as f32,
                if i % 2 == 0 { 0.35 } else { 0.6 },
            ),
            label: ROOM_LABELS[i],
        })
        .collect()
}

/// Label anchors for the given rooms and viewport.
pub fn label_positions(clusters: &[Cluster], viewport: &Viewport) -> Vec<LabelPosition> {
    clusters
        .iter()
        .map(|cluster| {
            let center = cluster.pixel_center(viewport);
            LabelPosition {
                x: center.x,
                y: center.y,
                label: cluster.label,
            }
        })
        .collect()
}

/// The complete simulated state for one container size.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    viewport: Viewport,
    clusters: Vec<Cluster>,
    particles: Vec<Particle>,
    labels: Vec<LabelPosition>,
}

impl Scene {
    /// Build a fresh scene for `viewport`.
    ///
    /// Particle `i` joins room `i mod C`, starts at its room center plus
    /// uniform jitter of ±6% width / ±5% height, and gets a velocity in
    /// `[-0.2 S, 0.2 S]` per axis where `S` is the clamped base speed.
    pub fn initialize<R: Rng + ?Sized>(
        viewport: Viewport,
        config: &BackgroundConfig,
        rng: &mut R,
    ) -> Self {
        let clusters = layout_clusters(config.cluster_count());
        let count = config.particle_count();
        let amplitude = Vec2::new(JITTER_X * viewport.width, JITTER_Y * viewport.height);
        let spread = Vec2::splat(VELOCITY_SPREAD * config.base_speed());

        let particles = (0..count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, count, &mut *rng);
                let cluster_id = ctx.round_robin(clusters.len());
                let center = clusters[cluster_id].pixel_center(&viewport);
                let position = center + ctx.jitter(amplitude);
                let velocity = ctx.centered(spread);
                Particle {
                    position,
                    velocity,
                    cluster_id,
                }
            })
            .collect();

        let labels = label_positions(&clusters, &viewport);

        log::info!(
            "scene initialized: {} particles across {} rooms ({}x{} @{}x)",
            count,
            clusters.len(),
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );

        Self {
            viewport,
            clusters,
            particles,
            labels,
        }
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for the simulation step. The slice cannot grow or shrink.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn labels(&self) -> &[LabelPosition] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::seeded_rng;

    fn scene(width: f32, height: f32, particles: u32) -> Scene {
        let config = BackgroundConfig {
            particles,
            ..Default::default()
        };
        Scene::initialize(Viewport::new(width, height, 1.0), &config, &mut seeded_rng(Some(11)))
    }

    #[test]
    fn test_viewport_coercion() {
        let vp = Viewport::new(0.0, -20.0, 0.5);
        assert_eq!(vp.size(), Vec2::ONE);
        assert_eq!(vp.pixel_ratio, 1.0);
        assert_eq!(vp.backing_size(), (1, 1));

        let nan = Viewport::new(f32::NAN, 10.0, f32::NAN);
        assert_eq!(nan.width, 1.0);
        assert_eq!(nan.pixel_ratio, 1.0);

        let inf = Viewport::new(f32::INFINITY, f32::NEG_INFINITY, f32::INFINITY);
        assert_eq!(inf.size(), Vec2::ONE);
        assert_eq!(inf.pixel_ratio, 1.0);
        assert_eq!(inf.backing_size(), (1, 1));
    }

    #[test]
    fn test_backing_size_scales_by_ratio() {
        let vp = Viewport::new(801.0, 600.0, 1.5);
        assert_eq!(vp.backing_size(), (1202, 900));
    }

    #[test]
    fn test_cluster_layout() {
        let clusters = layout_clusters(3);
        let centers: Vec<Vec2> = clusters.iter().map(|c| c.center).collect();
        assert_eq!(
            centers,
            vec![Vec2::new(0.25, 0.35), Vec2::new(0.5, 0.6), Vec2::new(0.75, 0.35)]
        );
        let labels: Vec<&str> = clusters.iter().map(|c| c.label).collect();
        assert_eq!(labels, &ROOM_LABELS[..3]);
    }

    #[test]
    fn test_jitter_stays_near_room() {
        let scene = scene(1000.0, 500.0, 200);
        for p in scene.particles() {
            let center = scene.clusters()[p.cluster_id].pixel_center(scene.viewport());
            let offset = (p.position - center).abs();
            assert!(offset.x <= 60.0, "x jitter {}", offset.x);
            assert!(offset.y <= 25.0, "y jitter {}", offset.y);
        }
    }

    #[test]
    fn test_initial_velocity_range() {
        let config = BackgroundConfig {
            speed: 1.0,
            particles: 300,
            ..Default::default()
        };
        let scene = Scene::initialize(Viewport::new(640.0, 480.0, 2.0), &config, &mut seeded_rng(Some(5)));
        for p in scene.particles() {
            assert!(p.velocity.x.abs() <= 0.2 && p.velocity.y.abs() <= 0.2);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = scene(800.0, 600.0, 42);
        let b = scene(800.0, 600.0, 42);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_labels_follow_viewport() {
        let scene = scene(400.0, 200.0, 12);
        let labels = scene.labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1].x, 200.0);
        assert!((labels[1].y - 120.0).abs() < 1e-3);
        assert_eq!(labels[1].label, "Kitchen");
    }
}

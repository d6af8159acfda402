//! Component configuration.
//!
//! Every option is optional and every numeric input is clamped or defaulted
//! rather than rejected. Fields hold the values exactly as supplied (so a
//! deserialized config round-trips unchanged); the accessor methods apply the
//! clamps and are what the rest of the crate reads.
//!
//! # Example
//!
//! ```
//! use network_backdrop::BackgroundConfig;
//!
//! let config = BackgroundConfig {
//!     particles: 4,
//!     speed: 5.0,
//!     ..Default::default()
//! };
//!
//! assert_eq!(config.particle_count(), 12);
//! assert_eq!(config.base_speed(), 1.2);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scene::ROOM_LABELS;

/// Smallest particle population ever instantiated.
pub const MIN_PARTICLES: u32 = 12;
/// Default particle population.
pub const DEFAULT_PARTICLES: u32 = 42;
/// Default base velocity scale.
pub const DEFAULT_SPEED: f32 = 0.6;
/// Allowed range for the base velocity scale.
pub const SPEED_RANGE: (f32, f32) = (0.12, 1.2);
/// Default maximum opacity of connective edges.
pub const DEFAULT_LINE_ALPHA: f32 = 0.18;
/// Default number of rooms.
pub const DEFAULT_CLUSTERS: usize = 3;

/// Options accepted by [`NetworkBackground`](crate::NetworkBackground).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackgroundConfig {
    /// Requested particle count (floored at [`MIN_PARTICLES`]).
    pub particles: u32,
    /// Base velocity scale (clamped to [`SPEED_RANGE`]).
    pub speed: f32,
    /// Overall component opacity, reached at the end of the mount fade-in.
    pub opacity: f32,
    /// Enables pointer listening and the pointer push force.
    pub interactive: bool,
    /// Maximum opacity of connective edges.
    pub line_alpha: f32,
    /// Draw the room label chips.
    pub show_labels: bool,
    /// Number of rooms instantiated (at most one per predefined label).
    pub clusters: usize,
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            particles: DEFAULT_PARTICLES,
            speed: DEFAULT_SPEED,
            opacity: 1.0,
            interactive: false,
            line_alpha: DEFAULT_LINE_ALPHA,
            show_labels: true,
            clusters: DEFAULT_CLUSTERS,
            seed: None,
        }
    }
}

impl BackgroundConfig {
    /// Number of particles to instantiate: `max(12, particles)`.
    pub fn particle_count(&self) -> usize {
        self.particles.max(MIN_PARTICLES) as usize
    }

    /// Base speed clamped to `[0.12, 1.2]`. NaN falls back to the default.
    pub fn base_speed(&self) -> f32 {
        if self.speed.is_nan() {
            return DEFAULT_SPEED;
        }
        self.speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1)
    }

    /// Target opacity clamped to `[0, 1]`.
    pub fn target_opacity(&self) -> f32 {
        unit_or(self.opacity, 1.0)
    }

    /// Edge alpha ceiling clamped to `[0, 1]`.
    pub fn edge_alpha(&self) -> f32 {
        unit_or(self.line_alpha, DEFAULT_LINE_ALPHA)
    }

    /// Room count clamped to `[1, ROOM_LABELS.len()]`.
    pub fn cluster_count(&self) -> usize {
        self.clusters.clamp(1, ROOM_LABELS.len())
    }
}

fn unit_or(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

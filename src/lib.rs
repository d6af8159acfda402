//! # Network Backdrop
//!
//! An animated "clustered network" background for dashboard pages.
//!
//! Particles drift inside a few rooms laid out across the container. Nearby
//! particles of the same room are joined by faint edges, each room sits on a
//! soft rounded backplate, and an optional label chip names it. The pointer,
//! when enabled, gently pushes particles away.
//!
//! ## Quick Start
//!
//! ```ignore
//! use network_backdrop::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     NetworkBackground::new()
//!         .with_particle_count(42)
//!         .with_speed(0.6)
//!         .with_opacity(0.5)
//!         .with_interactive(true)
//!         .run()
//! }
//! ```
//!
//! ## Driving it yourself
//!
//! The component never owns a clock or a window. Feed it container sizes,
//! pointer events and frames, and give it any [`Canvas`] to draw on:
//!
//! ```
//! use network_backdrop::prelude::*;
//!
//! let mut background = NetworkBackground::new().with_seed(1);
//! let mut raster = Raster::new(&Viewport::new(320.0, 240.0, 2.0));
//!
//! background.resize(Vec2::new(320.0, 240.0), 2.0, &mut raster);
//! background.pointer_moved(Vec2::new(160.0, 120.0));
//! background.run_headless(&mut StepFrames::new(3), &mut raster);
//!
//! assert_eq!((raster.width(), raster.height()), (640, 480));
//! ```
//!
//! ## Modules
//!
//! - [`scene`] - container geometry, rooms and particle initialization
//! - [`simulation`] - the per-frame motion step
//! - [`render`] - drawing onto a [`Canvas`], plus the CPU [`Raster`]
//! - [`time`] - frame clocks and cancellable frame sources
//! - [`input`] - pointer tracking

mod background;
pub mod config;
pub mod error;
mod gpu;
pub mod input;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod spawn;
pub mod time;
mod window;

pub use background::{NetworkBackground, FADE_IN_SECS};
pub use config::BackgroundConfig;
pub use error::{GpuError, RunError, SnapshotError};
pub use glam::{Vec2, Vec3, Vec4};
pub use input::PointerState;
pub use render::{Canvas, DrawCommand, DrawList, Raster, Rect, RenderStyle};
pub use scene::{Cluster, LabelPosition, Particle, Scene, Viewport, ROOM_LABELS};
pub use spawn::SpawnContext;
pub use time::{CancelToken, FrameSource, FrameTick, PacedFrames, StepFrames, Time};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use network_backdrop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::NetworkBackground;
    pub use crate::config::BackgroundConfig;
    pub use crate::error::{RunError, SnapshotError};
    pub use crate::input::PointerState;
    pub use crate::render::{Canvas, DrawList, Raster};
    pub use crate::scene::{Scene, Viewport};
    pub use crate::time::{CancelToken, FrameSource, PacedFrames, StepFrames, Time};
    pub use crate::{Vec2, Vec3, Vec4};
}

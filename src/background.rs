//! The animated network background component.
//!
//! [`NetworkBackground`] owns all mutable animation state: configuration,
//! the current [`Scene`], the pointer and the random source. Nothing is
//! global, so a component can be driven headlessly, frame by frame, exactly
//! like the windowed host drives it.

use glam::Vec2;
use rand::rngs::SmallRng;

use crate::config::BackgroundConfig;
use crate::error::RunError;
use crate::input::PointerState;
use crate::render::{self, Canvas, RenderStyle};
use crate::scene::{LabelPosition, Scene, Viewport};
use crate::simulation;
use crate::spawn::seeded_rng;
use crate::time::FrameSource;

/// Seconds the component takes to fade from transparent to its target
/// opacity after mounting.
pub const FADE_IN_SECS: f32 = 0.8;

/// A clustered particle network background.
///
/// Use method chaining to configure, then either call `.run()` to open a
/// window, or drive it yourself:
///
/// ```
/// use network_backdrop::prelude::*;
///
/// let mut background = NetworkBackground::new().with_particle_count(24).with_seed(7);
/// let mut canvas = DrawList::new();
///
/// background.resize(Vec2::new(800.0, 600.0), 1.0, &mut canvas);
/// let frames = background.run_headless(&mut StepFrames::new(10), &mut canvas);
///
/// assert_eq!(frames, 10);
/// assert_eq!(background.scene().particles().len(), 24);
/// ```
pub struct NetworkBackground {
    config: BackgroundConfig,
    scene: Scene,
    pointer: PointerState,
    rng: SmallRng,
    elapsed: f32,
    frames: u64,
}

impl NetworkBackground {
    /// Create a component with default settings. Nothing is simulated until
    /// the first resize tells it the container size.
    pub fn new() -> Self {
        Self::from_config(BackgroundConfig::default())
    }

    /// Create a component from a complete configuration.
    pub fn from_config(config: BackgroundConfig) -> Self {
        let rng = seeded_rng(config.seed);
        Self {
            config,
            scene: Scene::default(),
            pointer: PointerState::new(),
            rng,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Set the number of particles (at least 12 are always simulated).
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.config.particles = count;
        self
    }

    /// Set the base velocity scale (clamped to `[0.12, 1.2]`).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    /// Set the opacity reached at the end of the fade-in.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.config.opacity = opacity;
        self
    }

    /// Enable or disable the pointer push.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.config.interactive = interactive;
        self
    }

    /// Set the maximum alpha of connective edges.
    pub fn with_line_alpha(mut self, alpha: f32) -> Self {
        self.config.line_alpha = alpha;
        self
    }

    /// Show or hide the room label chips.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.config.show_labels = show;
        self
    }

    /// Set the number of rooms (clamped to the predefined labels).
    pub fn with_cluster_count(mut self, count: usize) -> Self {
        self.config.clusters = count;
        self
    }

    /// Make initialization and every simulation step reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self.rng = seeded_rng(Some(seed));
        self
    }

    #[inline]
    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Where the label chips are anchored for the current size.
    #[inline]
    pub fn labels(&self) -> &[LabelPosition] {
        self.scene.labels()
    }

    #[inline]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Frames advanced since creation.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds of animation since creation.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Current overall opacity: the target opacity scaled by the fade-in.
    pub fn opacity(&self) -> f32 {
        self.config.target_opacity() * (self.elapsed / FADE_IN_SECS).clamp(0.0, 1.0)
    }

    /// Rebuild the scene for a new container size without touching any
    /// drawing surface. Previous particles are discarded.
    pub fn reinitialize(&mut self, size: Vec2, pixel_ratio: f32) -> Viewport {
        let viewport = Viewport::new(size.x, size.y, pixel_ratio);
        log::debug!(
            "container resized to {}x{} @{}x, rebuilding scene",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
        self.scene = Scene::initialize(viewport, &self.config, &mut self.rng);
        viewport
    }

    /// Container size changed (or first mount): rebuild the scene and resize
    /// the canvas backing store, resetting its transform to the pixel ratio.
    pub fn resize<C: Canvas + ?Sized>(&mut self, size: Vec2, pixel_ratio: f32, canvas: &mut C) -> Viewport {
        let viewport = self.reinitialize(size, pixel_ratio);
        canvas.configure(&viewport);
        viewport
    }

    /// Pointer moved to `position` (logical pixels).
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.moved(position);
    }

    /// Pointer left the container.
    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    pub(crate) fn pointer_mut(&mut self) -> &mut PointerState {
        &mut self.pointer
    }

    /// Advance the simulation one frame without drawing.
    ///
    /// This is what a frame amounts to when no drawing surface is available.
    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta.max(0.0);
        self.frames += 1;
        let bounds = self.scene.viewport().size();
        let pointer = self.pointer.target(self.config.interactive);
        simulation::step(self.scene.particles_mut(), bounds, pointer, &mut self.rng);
    }

    /// Advance one frame and draw it.
    pub fn frame<C: Canvas + ?Sized>(&mut self, delta: f32, canvas: &mut C) {
        self.advance(delta);
        self.draw(canvas);
    }

    /// Draw the current state without advancing it.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        render::render(canvas, &self.scene, &RenderStyle::from(&self.config));
    }

    /// Pull frames from `frames` until it is exhausted or cancelled, running
    /// one step and one draw per frame, in order. Returns the frame count.
    pub fn run_headless<S, C>(&mut self, frames: &mut S, canvas: &mut C) -> u64
    where
        S: FrameSource + ?Sized,
        C: Canvas + ?Sized,
    {
        let mut count = 0;
        while let Some(tick) = frames.next_frame() {
            self.frame(tick.delta, canvas);
            count += 1;
        }
        count
    }

    /// Open a window hosting the background. Blocks until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        crate::window::run(self)
    }
}

impl Default for NetworkBackground {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;
    use crate::time::StepFrames;

    fn mounted(background: NetworkBackground) -> (NetworkBackground, DrawList) {
        let mut background = background;
        let mut canvas = DrawList::new();
        background.resize(Vec2::new(800.0, 600.0), 1.0, &mut canvas);
        (background, canvas)
    }

    #[test]
    fn test_unmounted_scene_is_empty() {
        let background = NetworkBackground::new();
        assert!(background.scene().particles().is_empty());
        assert!(background.labels().is_empty());

        // Advancing an unmounted component is harmless
        let mut background = background;
        background.advance(0.016);
        assert_eq!(background.frames(), 1);
    }

    #[test]
    fn test_fade_in() {
        let (mut background, mut canvas) = mounted(NetworkBackground::new().with_opacity(0.5).with_seed(1));
        assert_eq!(background.opacity(), 0.0);

        background.run_headless(&mut StepFrames::with_delta(4, 0.1), &mut canvas);
        assert!((background.opacity() - 0.25).abs() < 1e-6);

        background.run_headless(&mut StepFrames::with_delta(10, 0.1), &mut canvas);
        assert_eq!(background.opacity(), 0.5);
    }

    #[test]
    fn test_resize_configures_canvas() {
        let mut background = NetworkBackground::new().with_seed(2);
        let mut canvas = DrawList::new();
        background.resize(Vec2::new(400.0, 300.0), 2.0, &mut canvas);
        background.resize(Vec2::new(500.0, 300.0), 2.0, &mut canvas);

        let configures: Vec<_> = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, crate::render::DrawCommand::Configure { .. }))
            .cloned()
            .collect();
        assert_eq!(
            configures,
            vec![
                crate::render::DrawCommand::Configure { backing: (800, 600), scale: 2.0 },
                crate::render::DrawCommand::Configure { backing: (1000, 600), scale: 2.0 },
            ]
        );
    }

    #[test]
    fn test_non_finite_size_falls_back_to_one_pixel() {
        let mut background = NetworkBackground::new().with_seed(5);
        let mut raster = crate::render::Raster::new(&Viewport::default());
        let viewport = background.resize(Vec2::new(f32::INFINITY, 1.0), f32::INFINITY, &mut raster);

        assert_eq!(viewport.backing_size(), (1, 1));
        assert_eq!((raster.width(), raster.height()), (1, 1));
        background.frame(0.016, &mut raster);
        assert!(background.scene().particles().iter().all(|p| p.position.is_finite()));
    }

    #[test]
    fn test_pointer_ignored_unless_interactive() {
        let run = |interactive: bool| {
            let (mut background, _) = mounted(
                NetworkBackground::new()
                    .with_seed(3)
                    .with_interactive(interactive),
            );
            let target = background.scene().particles()[0].position + Vec2::new(5.0, 0.0);
            background.pointer_moved(target);
            background.advance(0.016);
            background.scene().particles().to_vec()
        };
        let (passive, interactive) = (run(false), run(true));

        let (mut baseline, _) = mounted(NetworkBackground::new().with_seed(3));
        baseline.advance(0.016);
        assert_eq!(passive, baseline.scene().particles());
        assert_ne!(interactive, passive);
    }

    #[test]
    fn test_cancelled_loop_stops() {
        let (mut background, mut canvas) = mounted(NetworkBackground::new().with_seed(4));
        let mut frames = StepFrames::new(1_000);
        frames.cancel_token().cancel();
        assert_eq!(background.run_headless(&mut frames, &mut canvas), 0);
        assert_eq!(background.frames(), 0);
    }
}

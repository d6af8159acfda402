//! Frame timing and frame sources.
//!
//! The animation is a loop of frames. Where those frames come from is
//! abstracted behind [`FrameSource`]: the windowed host turns each redraw into
//! a frame, tests use [`StepFrames`] to drive an exact number of frames
//! synchronously, and [`PacedFrames`] produces wall-clock paced frames for
//! headless use.
//!
//! Every source can be stopped through a [`CancelToken`]; once cancelled it
//! yields no further frames.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Wall-clock frame timing for the windowed host.
///
/// Tracks elapsed time, per-frame delta, frame count and a periodically
/// refreshed FPS figure.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns the delta since the previous call, in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// One frame handed out by a [`FrameSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Zero-based frame number.
    pub index: u64,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// Something that hands out animation frames one at a time.
pub trait FrameSource {
    /// Wait for the next frame. `None` means the loop is over.
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// Shared stop flag for a frame loop.
///
/// Clones share the flag, so the teardown path can keep one handle while the
/// source holds another. Single-threaded like the loop itself.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Deterministic source: exactly `count` frames with a fixed delta.
#[derive(Debug, Clone)]
pub struct StepFrames {
    count: u64,
    emitted: u64,
    delta: f32,
    cancel: CancelToken,
}

impl StepFrames {
    /// `count` frames at 60 fps.
    pub fn new(count: u64) -> Self {
        Self::with_delta(count, 1.0 / 60.0)
    }

    pub fn with_delta(count: u64, delta: f32) -> Self {
        Self {
            count,
            emitted: 0,
            delta,
            cancel: CancelToken::new(),
        }
    }

    /// Handle that stops this source.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Frames handed out so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl FrameSource for StepFrames {
    fn next_frame(&mut self) -> Option<FrameTick> {
        if self.cancel.is_cancelled() || self.emitted >= self.count {
            return None;
        }
        let tick = FrameTick {
            index: self.emitted,
            delta: self.delta,
        };
        self.emitted += 1;
        Some(tick)
    }
}

/// Wall-clock source: sleeps until the next frame is due at `fps`, and runs
/// until cancelled.
#[derive(Debug)]
pub struct PacedFrames {
    interval: Duration,
    time: Time,
    next_due: Instant,
    cancel: CancelToken,
}

impl PacedFrames {
    pub fn new(fps: f32) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        let time = Time::new();
        Self {
            interval: Duration::from_secs_f32(1.0 / fps),
            next_due: Instant::now(),
            time,
            cancel: CancelToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl FrameSource for PacedFrames {
    fn next_frame(&mut self) -> Option<FrameTick> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let now = Instant::now();
        if self.next_due > now {
            std::thread::sleep(self.next_due - now);
        }
        self.next_due += self.interval;

        let index = self.time.frame();
        let delta = self.time.update();
        Some(FrameTick { index, delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let delta = time.update();

        assert!(delta > 0.0);
        assert!(time.elapsed() > 0.0);
        assert_eq!(time.frame(), 1);

        time.reset();
        assert_eq!(time.frame(), 0);
    }

    #[test]
    fn test_step_frames_in_order() {
        let mut frames = StepFrames::with_delta(3, 0.5);
        let ticks: Vec<FrameTick> = std::iter::from_fn(|| frames.next_frame()).collect();
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks.iter().map(|t| t.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(ticks.iter().all(|t| t.delta == 0.5));
        assert_eq!(frames.next_frame(), None);
    }

    #[test]
    fn test_cancel_stops_source() {
        let mut frames = StepFrames::new(100);
        let token = frames.cancel_token();
        assert!(frames.next_frame().is_some());
        token.cancel();
        assert_eq!(frames.next_frame(), None);
        assert_eq!(frames.emitted(), 1);
    }

    #[test]
    fn test_paced_frames_advance() {
        let mut frames = PacedFrames::new(200.0);
        let first = frames.next_frame().unwrap();
        let second = frames.next_frame().unwrap();
        assert_eq!((first.index, second.index), (0, 1));

        frames.cancel_token().cancel();
        assert_eq!(frames.next_frame(), None);
    }
}

//! Pointer tracking.
//!
//! [`PointerState`] is the component-scoped record of where the pointer is
//! and whether it is over the container. The host feeds it window events; the
//! simulation only ever reads it.
//!
//! ```ignore
//! // in the host's event handler
//! pointer.handle_event(&event, window.scale_factor());
//!
//! // once per frame
//! simulation::step(particles, bounds, pointer.target(interactive), &mut rng);
//! ```

use glam::Vec2;
use winit::event::WindowEvent;

/// Pointer position in logical pixels plus whether it is over the container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl PointerState {
    /// Create an inactive pointer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved to `position` (logical pixels).
    pub fn moved(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
        self.active = true;
    }

    /// Pointer left the container. The last position is kept.
    pub fn left(&mut self) {
        self.active = false;
    }

    /// Last known position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Push origin for the simulation: the position when interaction is
    /// enabled and the pointer is over the container, otherwise `None`.
    #[inline]
    pub fn target(&self, interactive: bool) -> Option<Vec2> {
        (interactive && self.active).then(|| self.position())
    }

    /// Process a winit window event. Returns `true` if the pointer changed.
    ///
    /// Cursor positions arrive in physical pixels and are divided by
    /// `scale_factor` to land in the same logical space as the particles.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent, scale_factor: f64) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
                let logical = Vec2::new((position.x / scale) as f32, (position.y / scale) as f32);
                self.moved(logical);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                let changed = self.active;
                self.left();
                changed
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_and_leave() {
        let mut pointer = PointerState::new();
        assert!(!pointer.active);

        pointer.moved(Vec2::new(10.0, 20.0));
        assert!(pointer.active);
        assert_eq!(pointer.position(), Vec2::new(10.0, 20.0));

        pointer.left();
        assert!(!pointer.active);
        // Position is kept across a leave
        assert_eq!(pointer.position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_target_requires_interactive_and_active() {
        let mut pointer = PointerState::new();
        assert_eq!(pointer.target(true), None);

        pointer.moved(Vec2::new(5.0, 5.0));
        assert_eq!(pointer.target(false), None);
        assert_eq!(pointer.target(true), Some(Vec2::new(5.0, 5.0)));

        pointer.left();
        assert_eq!(pointer.target(true), None);
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            position: winit::dpi::PhysicalPosition::new(x, y),
        }
    }

    fn cursor_left() -> WindowEvent {
        WindowEvent::CursorLeft {
            device_id: unsafe { winit::event::DeviceId::dummy() },
        }
    }

    #[test]
    fn test_cursor_moved_is_converted_to_logical_pixels() {
        let mut pointer = PointerState::new();
        assert!(pointer.handle_event(&cursor_moved(200.0, 100.0), 2.0));
        assert!(pointer.active);
        assert_eq!(pointer.position(), Vec2::new(100.0, 50.0));

        // A bogus scale factor is treated as 1
        assert!(pointer.handle_event(&cursor_moved(30.0, 40.0), 0.0));
        assert_eq!(pointer.position(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_cursor_left_reports_change_only_when_active() {
        let mut pointer = PointerState::new();
        assert!(!pointer.handle_event(&cursor_left(), 1.0));

        pointer.handle_event(&cursor_moved(10.0, 10.0), 1.0);
        assert!(pointer.handle_event(&cursor_left(), 1.0));
        assert!(!pointer.active);
        assert!(!pointer.handle_event(&cursor_left(), 1.0));
    }

    #[test]
    fn test_other_events_ignored() {
        let mut pointer = PointerState::new();
        assert!(!pointer.handle_event(&WindowEvent::Focused(true), 1.0));
        assert_eq!(pointer, PointerState::new());
    }
}

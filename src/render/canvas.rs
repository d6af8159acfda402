//! The drawing surface abstraction.
//!
//! All coordinates handed to a [`Canvas`] are logical pixels. Implementations
//! map them to their backing resolution using the pixel ratio given at
//! [`Canvas::configure`].

use glam::{Vec2, Vec4};

use crate::scene::Viewport;

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Same rectangle with every coordinate multiplied by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// A 2D drawing context. Colors are straight (non-premultiplied) RGBA in
/// `[0, 1]`.
pub trait Canvas {
    /// Resize the backing store to the viewport's backing resolution and
    /// reset the transform to exactly its pixel ratio. Calling it twice never
    /// compounds the scale.
    fn configure(&mut self, viewport: &Viewport);

    /// Make every pixel transparent.
    fn clear(&mut self);

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Vec4);

    /// Stroke centered on the rounded rectangle's outline.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Vec4);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec4);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4);

    /// Draw `text` with its top-left corner at `origin`, `size` pixels tall.
    fn fill_text(&mut self, origin: Vec2, text: &str, size: f32, color: Vec4);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Configure { backing: (u32, u32), scale: f32 },
    Clear,
    FillRoundedRect { rect: Rect, radius: f32, color: Vec4 },
    StrokeRoundedRect { rect: Rect, radius: f32, width: f32, color: Vec4 },
    Line { from: Vec2, to: Vec2, width: f32, color: Vec4 },
    Circle { center: Vec2, radius: f32, color: Vec4 },
    Text { origin: Vec2, text: String, size: f32, color: Vec4 },
}

/// A canvas that records calls instead of drawing them.
///
/// Useful wherever the frame's structure matters more than its pixels:
/// tests, or hosts that forward drawing to another 2D API.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Every recorded line as `(from, to, alpha)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, f32)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, color, .. } => Some((*from, *to, color.w)),
            _ => None,
        })
    }

    /// Every recorded circle center.
    pub fn circles(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
    }

    /// Every recorded text run.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn configure(&mut self, viewport: &Viewport) {
        self.commands.push(DrawCommand::Configure {
            backing: viewport.backing_size(),
            scale: viewport.pixel_ratio,
        });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Vec4) {
        self.commands.push(DrawCommand::FillRoundedRect { rect, radius, color });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Vec4) {
        self.commands.push(DrawCommand::StrokeRoundedRect {
            rect,
            radius,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec4) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_text(&mut self, origin: Vec2, text: &str, size: f32, color: Vec4) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(rect.min, Vec2::new(80.0, 40.0));
        assert_eq!(rect.max, Vec2::new(120.0, 60.0));
        assert_eq!(rect.center(), Vec2::new(100.0, 50.0));
        assert_eq!(rect.scaled(2.0).size(), Vec2::new(80.0, 40.0));
    }

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.configure(&Viewport::new(10.0, 10.0, 2.0));
        list.clear();
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, Vec4::new(0.0, 0.0, 0.0, 0.5));
        list.fill_circle(Vec2::ONE, 1.6, Vec4::ONE);

        assert_eq!(
            list.commands()[0],
            DrawCommand::Configure {
                backing: (20, 20),
                scale: 2.0
            }
        );
        assert_eq!(list.commands()[1], DrawCommand::Clear);
        assert_eq!(list.lines().collect::<Vec<_>>(), vec![(Vec2::ZERO, Vec2::ONE, 0.5)]);
        assert_eq!(list.circles().count(), 1);

        list.reset();
        assert!(list.commands().is_empty());
    }
}

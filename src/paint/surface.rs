use crate::geometry::{CanvasPoint, CanvasSize, Color};

use super::pen::{Ink, StrokeStyle};
use super::text::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: CanvasPoint,
    pub to: CanvasPoint,
    pub ink: Ink,
    pub width: u32,
    pub style: StrokeStyle,
    /// Stroke length already drawn before `from`; keeps dashes running
    /// across the many short segments of one drag.
    pub dash_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub anchor: CanvasPoint,
    pub content: String,
    pub ink: Ink,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Segment(Segment),
    Text(TextLabel),
}

/// Vector side of the canvas: what the user sees, in paint order.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    size: CanvasSize,
    background: Color,
    primitives: Vec<Primitive>,
}

impl DrawingSurface {
    pub fn new(size: CanvasSize, background: Color) -> Self {
        Self {
            size,
            background,
            primitives: Vec::new(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_blank(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Drops every primitive and adopts the new dimensions.
    pub fn reset(&mut self, size: CanvasSize) {
        self.size = size;
        self.primitives.clear();
    }
}

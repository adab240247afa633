use std::path::{Path, PathBuf};

use crate::geometry::{CanvasPoint, CanvasSize, Color};
use crate::storage;

use super::error::PaintResult;
use super::pen::{BrushSize, PenState, StrokeStyle};
use super::raster::RasterMirror;
use super::surface::{DrawingSurface, Primitive, Segment, TextLabel};
use super::text::TextStyle;

/// Owns the pen state and both drawing targets. Every mutation of either
/// target goes through here so the two never drift apart.
#[derive(Debug, Clone)]
pub struct PaintController {
    pen: PenState,
    surface: DrawingSurface,
    raster: RasterMirror,
    text_style: TextStyle,
    previous_point: Option<CanvasPoint>,
    stroke_length: f64,
}

impl Default for PaintController {
    fn default() -> Self {
        Self::new(CanvasSize::default(), Color::WHITE, PenState::default())
    }
}

impl PaintController {
    pub fn new(size: CanvasSize, background: Color, pen: PenState) -> Self {
        Self {
            pen,
            surface: DrawingSurface::new(size, background),
            raster: RasterMirror::new(size, background),
            text_style: TextStyle::default(),
            previous_point: None,
            stroke_length: 0.0,
        }
    }

    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = text_style;
        self
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn raster(&self) -> &RasterMirror {
        &self.raster
    }

    pub fn size(&self) -> CanvasSize {
        self.surface.size()
    }

    pub fn text_style(&self) -> TextStyle {
        self.text_style
    }

    pub fn is_stroking(&self) -> bool {
        self.previous_point.is_some()
    }

    /// Color the next stroke will actually lay down.
    pub fn swatch_color(&self) -> Color {
        self.pen.ink().resolve(self.surface.background())
    }

    pub fn begin_stroke(&mut self, point: CanvasPoint) {
        tracing::debug!(x = point.x, y = point.y, "stroke begin");
        self.previous_point = Some(point);
        self.stroke_length = 0.0;
    }

    /// Connects `point` to the previous sample of the current stroke.
    /// Returns whether a segment was drawn.
    pub fn continue_stroke(&mut self, point: CanvasPoint) -> PaintResult<bool> {
        let Some(previous) = self.previous_point.replace(point) else {
            self.stroke_length = 0.0;
            return Ok(false);
        };

        let segment = Segment {
            from: previous,
            to: point,
            ink: self.pen.ink(),
            width: self.pen.brush_size().pixels(),
            style: self.pen.stroke_style(),
            dash_offset: self.stroke_length,
        };
        self.stroke_length +=
            f64::from(point.x - previous.x).hypot(f64::from(point.y - previous.y));
        self.raster.draw_segment(&segment, self.surface.background())?;
        self.surface.push(Primitive::Segment(segment));
        Ok(true)
    }

    pub fn end_stroke(&mut self) {
        if self.previous_point.take().is_some() {
            tracing::debug!(primitives = self.surface.primitives().len(), "stroke end");
        }
    }

    /// Samples the raster at `point` and adopts it as the pen color.
    pub fn pick_color(&mut self, point: CanvasPoint) -> Option<Color> {
        let Some(color) = self.raster.pixel(point) else {
            tracing::debug!(x = point.x, y = point.y, "color pick outside canvas ignored");
            return None;
        };
        self.pen.set_color(color);
        tracing::debug!(color = %color.to_hex(), "picked color");
        Some(color)
    }

    pub fn choose_color(&mut self, color: Color) {
        self.pen.set_color(color);
        tracing::debug!(color = %color.to_hex(), "chose color");
    }

    pub fn clear(&mut self) {
        self.previous_point = None;
        self.stroke_length = 0.0;
        self.surface.clear();
        self.raster.reset(self.surface.size(), self.surface.background());
        tracing::info!("canvas cleared");
    }

    pub fn resize(&mut self, size: CanvasSize) {
        self.previous_point = None;
        self.stroke_length = 0.0;
        self.surface.reset(size);
        self.raster.reset(size, self.surface.background());
        tracing::info!(width = size.width, height = size.height, "canvas resized");
    }

    /// Changes the background and repaints the raster so background-ink
    /// strokes and untouched pixels follow it.
    pub fn set_background(&mut self, background: Color) -> PaintResult<()> {
        self.surface.set_background(background);
        self.raster.replay(&self.surface)?;
        tracing::info!(color = %background.to_hex(), "background changed");
        Ok(())
    }

    pub fn use_eraser(&mut self) {
        if self.pen.engage_eraser() {
            tracing::debug!(backup = %self.pen.previous_color().to_hex(), "eraser engaged");
        }
    }

    pub fn return_to_brush(&mut self) {
        self.pen.restore_brush();
        tracing::debug!(color = %self.pen.color().to_hex(), "brush restored");
    }

    pub fn set_brush_size(&mut self, brush_size: BrushSize) {
        self.pen.set_brush_size(brush_size);
    }

    pub fn set_stroke_style(&mut self, stroke_style: StrokeStyle) {
        self.pen.set_stroke_style(stroke_style);
    }

    /// Places `content` with its top-left corner at `point`. Blank content
    /// is ignored; returns whether anything was inserted.
    pub fn add_text(&mut self, point: CanvasPoint, content: &str) -> PaintResult<bool> {
        if content.trim().is_empty() {
            return Ok(false);
        }

        let label = TextLabel {
            anchor: point,
            content: content.to_string(),
            ink: self.pen.ink(),
            style: self.text_style,
        };
        self.raster.draw_text(&label, self.surface.background())?;
        self.surface.push(Primitive::Text(label));
        tracing::debug!(x = point.x, y = point.y, chars = content.chars().count(), "text added");
        Ok(true)
    }

    pub fn export(&self, path: &Path) -> PaintResult<PathBuf> {
        Ok(storage::export_png(self.raster.image(), path)?)
    }
}

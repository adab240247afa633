//! Cairo drawing shared by the on-screen canvas and the raster mirror. Both
//! targets go through these functions so they rasterize identically.

use gtk4::cairo;

use crate::geometry::Color;

use super::surface::{DrawingSurface, Primitive, Segment, TextLabel};
use super::text::show_text_lines;

// Odd widths centered on the pixel, even widths on its top-left edge, so a
// vertical stroke covers exactly `width` columns.
fn stroke_offset(width: u32) -> f64 {
    if width % 2 == 1 {
        0.5
    } else {
        0.0
    }
}

/// Background first, then every primitive in paint order.
pub fn render_surface(
    context: &cairo::Context,
    surface: &DrawingSurface,
) -> Result<(), cairo::Error> {
    let background = surface.background();
    context.save()?;
    set_source_color(context, background);
    context.paint()?;
    context.restore()?;

    for primitive in surface.primitives() {
        render_primitive(context, primitive, background)?;
    }
    Ok(())
}

pub fn render_primitive(
    context: &cairo::Context,
    primitive: &Primitive,
    background: Color,
) -> Result<(), cairo::Error> {
    match primitive {
        Primitive::Segment(segment) => stroke_segment(context, segment, background),
        Primitive::Text(label) => draw_label(context, label, background),
    }
}

/// Hard-edged stroke: solid strokes get round caps, dashed ones butt caps
/// with the pattern continued from `segment.dash_offset`.
pub fn stroke_segment(
    context: &cairo::Context,
    segment: &Segment,
    background: Color,
) -> Result<(), cairo::Error> {
    let width = segment.width.max(1);
    context.save()?;
    context.set_antialias(cairo::Antialias::None);
    set_source_color(context, segment.ink.resolve(background));
    context.set_line_width(f64::from(width));
    context.set_line_join(cairo::LineJoin::Round);
    if segment.style.is_solid() {
        context.set_line_cap(cairo::LineCap::Round);
        context.set_dash(&[], 0.0);
    } else {
        context.set_line_cap(cairo::LineCap::Butt);
        context.set_dash(&segment.style.dash_pattern(width), segment.dash_offset);
    }

    let offset = stroke_offset(width);
    context.move_to(
        f64::from(segment.from.x) + offset,
        f64::from(segment.from.y) + offset,
    );
    context.line_to(
        f64::from(segment.to.x) + offset,
        f64::from(segment.to.y) + offset,
    );
    let stroked = context.stroke();
    context.restore()?;
    stroked
}

pub fn draw_label(
    context: &cairo::Context,
    label: &TextLabel,
    background: Color,
) -> Result<(), cairo::Error> {
    context.save()?;
    set_source_color(context, label.ink.resolve(background));
    let shown = show_text_lines(context, label.anchor, &label.content, label.style);
    context.restore()?;
    shown
}

pub fn set_source_color(context: &cairo::Context, color: Color) {
    let (red, green, blue) = color.to_cairo_rgb();
    context.set_source_rgb(red, green, blue);
}

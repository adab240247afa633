use gtk4::cairo;

use crate::geometry::Color;
use crate::paint::set_source_color;

/// Pen preview: solid pen color, or background hatched while erasing.
pub(super) fn render_swatch(
    context: &cairo::Context,
    width: f64,
    height: f64,
    color: Color,
    erasing: bool,
) -> Result<(), cairo::Error> {
    set_source_color(context, color);
    context.rectangle(0.0, 0.0, width, height);
    context.fill()?;

    if erasing {
        context.save()?;
        context.set_source_rgb(0.55, 0.55, 0.55);
        context.set_line_width(1.0);
        let step = 5.0;
        let mut offset = -height;
        while offset < width {
            context.move_to(offset, height);
            context.line_to(offset + height, 0.0);
            offset += step;
        }
        context.stroke()?;
        context.restore()?;
    }

    context.set_source_rgb(0.35, 0.35, 0.35);
    context.set_line_width(1.0);
    context.rectangle(0.5, 0.5, (width - 1.0).max(0.0), (height - 1.0).max(0.0));
    context.stroke()
}

use gtk4::cairo;

use crate::geometry::CanvasPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFontFamily {
    #[default]
    Sans,
    Serif,
    Monospace,
}

impl TextFontFamily {
    pub const fn cairo_font_name(self) -> &'static str {
        match self {
            Self::Sans => "Sans",
            Self::Serif => "Serif",
            Self::Monospace => "Monospace",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sans" | "sans-serif" => Some(Self::Sans),
            "serif" => Some(Self::Serif),
            "mono" | "monospace" => Some(Self::Monospace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub family: TextFontFamily,
    pub size: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: TextFontFamily::Sans,
            size: 16,
        }
    }
}

/// Lays out `content` with its top-left corner at `anchor`, one line per `\n`.
/// The caller picks the source; both surfaces share this layout.
pub fn show_text_lines(
    context: &cairo::Context,
    anchor: CanvasPoint,
    content: &str,
    style: TextStyle,
) -> Result<(), cairo::Error> {
    // Grayscale, unhinted glyphs regardless of the desktop font settings.
    let mut options = cairo::FontOptions::new()?;
    options.set_antialias(cairo::Antialias::Gray);
    options.set_hint_style(cairo::HintStyle::None);
    options.set_hint_metrics(cairo::HintMetrics::Off);
    context.set_font_options(&options);
    context.select_font_face(
        style.family.cairo_font_name(),
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    context.set_font_size(f64::from(style.size.max(1)));
    let extents = context.font_extents()?;
    let first_baseline = f64::from(anchor.y) + extents.ascent();
    for (index, line) in content.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        context.move_to(
            f64::from(anchor.x),
            first_baseline + index as f64 * extents.height(),
        );
        context.show_text(line)?;
    }
    Ok(())
}

use crate::ui::StyleTokens;
use gtk4::CssProvider;

fn runtime_css(tokens: StyleTokens) -> String {
    format!(
        "
.scrawl-toolbar {{
  padding: {spacing_4}px {spacing_8}px;
  border-bottom: {border_width}px solid alpha(currentColor, 0.15);
}}
button.toolbar-button {{
  border-radius: {control_radius}px;
  padding: 0 {spacing_12}px;
}}
.pen-swatch {{
  border-radius: {control_radius}px;
}}

/* ── Toast badge ── */
.toast-badge {{
  border-radius: {control_radius}px;
  border: {border_width}px solid alpha(currentColor, 0.2);
  background: @theme_bg_color;
  padding: {spacing_8}px {spacing_12}px;
  margin: {spacing_12}px;
  font-size: 13px;
  font-weight: 500;
  box-shadow: 0 4px 16px rgba(0, 0, 0, 0.14),
              0 1px 3px rgba(0, 0, 0, 0.08);
}}
.toast-badge.toast-error {{
  color: rgba(200, 40, 40, 1.0);
}}
",
        spacing_4 = tokens.spacing_4,
        spacing_8 = tokens.spacing_8,
        spacing_12 = tokens.spacing_12,
        control_radius = tokens.control_radius,
        border_width = tokens.border_width,
    )
}

pub(super) fn install_runtime_css(tokens: StyleTokens) {
    let provider = CssProvider::new();
    provider.load_from_data(&runtime_css(tokens));
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

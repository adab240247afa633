use gtk4::prelude::*;
use gtk4::{Button, DropDown, ToggleButton};

use super::StyleTokens;

pub fn toolbar_button(label: &str, tooltip: &str, tokens: StyleTokens) -> Button {
    let button = Button::with_label(label);
    button.set_focus_on_click(false);
    button.set_tooltip_text(Some(tooltip));
    button.add_css_class("toolbar-button");
    button.set_size_request(-1, tokens.control_height);
    button
}

pub fn toolbar_toggle_button(label: &str, tooltip: &str, tokens: StyleTokens) -> ToggleButton {
    let button = ToggleButton::with_label(label);
    button.set_focus_on_click(false);
    button.set_active(false);
    button.set_tooltip_text(Some(tooltip));
    button.add_css_class("toolbar-button");
    button.set_size_request(-1, tokens.control_height);
    button
}

/// Drop-down over fixed labels; `selected` indexes into `labels`.
pub fn toolbar_dropdown(labels: &[&str], selected: usize, tooltip: &str) -> DropDown {
    let dropdown = DropDown::from_strings(labels);
    dropdown.set_focus_on_click(false);
    dropdown.set_tooltip_text(Some(tooltip));
    dropdown.set_selected(u32::try_from(selected).unwrap_or(0));
    dropdown
}

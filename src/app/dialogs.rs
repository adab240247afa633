use std::cell::Cell;
use std::path::{Path, PathBuf};

use gtk4::prelude::*;
use gtk4::{
    ApplicationWindow, Box as GtkBox, ColorChooserDialog, Dialog, Entry, FileChooserAction,
    FileChooserDialog, FileFilter, Grid, Label, Orientation, ResponseType,
};

use crate::geometry::{CanvasSize, Color};
use crate::input::{resolve_shortcut, InputContext, ShortcutAction};
use crate::storage::EXPORT_EXTENSION;
use crate::ui::StyleTokens;

use super::input_bridge::{normalize_shortcut_key, shortcut_modifiers};

/// Adapts a one-shot callback to GTK's repeatable `response` signal.
fn once<T>(callback: impl FnOnce(T) + 'static) -> impl Fn(T) {
    let slot = Cell::new(Some(callback));
    move |value| {
        if let Some(callback) = slot.take() {
            callback(value);
        }
    }
}

pub(super) fn open_color_dialog(
    parent: &ApplicationWindow,
    title: &str,
    seed: Color,
    on_done: impl FnOnce(Option<Color>) + 'static,
) {
    let dialog = ColorChooserDialog::new(Some(title), Some(parent));
    dialog.set_modal(true);
    dialog.set_use_alpha(false);
    let (red, green, blue) = seed.to_cairo_rgb();
    dialog.set_rgba(&gtk4::gdk::RGBA::new(
        red as f32,
        green as f32,
        blue as f32,
        1.0,
    ));

    let finish = once(on_done);
    dialog.connect_response(move |dialog, response| {
        let color = (response == ResponseType::Ok).then(|| {
            let rgba = dialog.rgba();
            Color::from_unit_rgb(rgba.red(), rgba.green(), rgba.blue())
        });
        dialog.close();
        finish(color);
    });
    dialog.present();
}

pub(super) fn open_save_dialog(
    parent: &ApplicationWindow,
    suggested: &Path,
    on_done: impl FnOnce(Option<PathBuf>) + 'static,
) {
    let dialog = FileChooserDialog::new(
        Some("Save drawing"),
        Some(parent),
        FileChooserAction::Save,
        &[("Cancel", ResponseType::Cancel), ("Save", ResponseType::Accept)],
    );
    dialog.set_modal(true);
    dialog.set_default_response(ResponseType::Accept);

    let filter = FileFilter::new();
    filter.set_name(Some("PNG image"));
    filter.add_mime_type("image/png");
    filter.add_pattern(&format!("*.{EXPORT_EXTENSION}"));
    dialog.add_filter(&filter);
    dialog.set_filter(&filter);

    if let Some(folder) = suggested.parent() {
        if let Err(err) = dialog.set_current_folder(Some(&gtk4::gio::File::for_path(folder))) {
            tracing::debug!(?err, ?folder, "could not preselect export folder");
        }
    }
    if let Some(name) = suggested.file_name().and_then(|name| name.to_str()) {
        dialog.set_current_name(name);
    }

    let finish = once(on_done);
    dialog.connect_response(move |dialog, response| {
        let path = if response == ResponseType::Accept {
            dialog.file().and_then(|file| file.path())
        } else {
            None
        };
        dialog.close();
        finish(path);
    });
    dialog.present();
}

pub(super) fn open_text_dialog(
    parent: &ApplicationWindow,
    tokens: StyleTokens,
    on_done: impl FnOnce(Option<String>) + 'static,
) {
    let (dialog, content) = form_dialog(parent, "Insert text", "Insert", tokens);
    let entry = Entry::new();
    entry.set_activates_default(true);
    entry.set_hexpand(true);
    entry.set_placeholder_text(Some("Text to place on the canvas"));
    content.append(&entry);

    let finish = once(on_done);
    dialog.connect_response(move |dialog, response| {
        let text = (response == ResponseType::Accept).then(|| entry.text().to_string());
        dialog.close();
        finish(text);
    });
    dialog.present();
}

/// Both dimensions come back as `None` when the dialog is cancelled.
pub(super) fn open_size_dialog(
    parent: &ApplicationWindow,
    current: CanvasSize,
    tokens: StyleTokens,
    on_done: impl FnOnce(Option<u32>, Option<u32>) + 'static,
) {
    let (dialog, content) = form_dialog(parent, "Resize canvas", "Resize", tokens);
    let grid = Grid::new();
    grid.set_row_spacing(tokens.spacing_8 as u32);
    grid.set_column_spacing(tokens.spacing_8 as u32);

    let width_entry = dimension_entry(current.width);
    let height_entry = dimension_entry(current.height);
    grid.attach(&Label::new(Some("Width")), 0, 0, 1, 1);
    grid.attach(&width_entry, 1, 0, 1, 1);
    grid.attach(&Label::new(Some("Height")), 0, 1, 1, 1);
    grid.attach(&height_entry, 1, 1, 1, 1);
    content.append(&grid);

    let finish = once(move |(width, height): (Option<u32>, Option<u32>)| {
        on_done(width, height)
    });
    dialog.connect_response(move |dialog, response| {
        let dimensions = if response == ResponseType::Accept {
            (
                parse_dimension(&width_entry.text()),
                parse_dimension(&height_entry.text()),
            )
        } else {
            (None, None)
        };
        dialog.close();
        finish(dimensions);
    });
    dialog.present();
}

pub(super) fn open_confirm_dialog(
    parent: &ApplicationWindow,
    title: &str,
    message: &str,
    tokens: StyleTokens,
    on_done: impl FnOnce(bool) + 'static,
) {
    let dialog = Dialog::new();
    dialog.set_title(Some(title));
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.add_button("No", ResponseType::Reject);
    dialog.add_button("Yes", ResponseType::Accept);
    dialog.set_default_response(ResponseType::Accept);

    let body = Label::new(Some(message));
    body.set_xalign(0.5);
    body.set_justify(gtk4::Justification::Center);
    let content = padded_box(tokens);
    content.append(&body);
    dialog.content_area().append(&content);
    install_dialog_shortcuts(&dialog);

    let finish = once(on_done);
    dialog.connect_response(move |dialog, response| {
        dialog.close();
        finish(response == ResponseType::Accept);
    });
    dialog.present();
}

fn form_dialog(
    parent: &ApplicationWindow,
    title: &str,
    accept_label: &str,
    tokens: StyleTokens,
) -> (Dialog, GtkBox) {
    let dialog = Dialog::new();
    dialog.set_title(Some(title));
    dialog.set_transient_for(Some(parent));
    dialog.set_modal(true);
    dialog.set_destroy_with_parent(true);
    dialog.add_button("Cancel", ResponseType::Cancel);
    dialog.add_button(accept_label, ResponseType::Accept);
    dialog.set_default_response(ResponseType::Accept);

    let content = padded_box(tokens);
    dialog.content_area().append(&content);
    install_dialog_shortcuts(&dialog);
    (dialog, content)
}

fn padded_box(tokens: StyleTokens) -> GtkBox {
    let content = GtkBox::new(Orientation::Vertical, tokens.spacing_8);
    content.set_margin_top(tokens.spacing_12);
    content.set_margin_bottom(tokens.spacing_12);
    content.set_margin_start(tokens.spacing_12);
    content.set_margin_end(tokens.spacing_12);
    content
}

fn dimension_entry(value: u32) -> Entry {
    let entry = Entry::new();
    entry.set_text(&value.to_string());
    entry.set_input_purpose(gtk4::InputPurpose::Digits);
    entry.set_activates_default(true);
    entry
}

fn install_dialog_shortcuts(dialog: &Dialog) {
    let dialog_for_key = dialog.clone();
    let key_controller = gtk4::EventControllerKey::new();
    key_controller.connect_key_pressed(move |_, key, keycode, modifier| {
        let Some(shortcut_key) = normalize_shortcut_key(key, keycode) else {
            return gtk4::glib::Propagation::Proceed;
        };
        let shortcut = resolve_shortcut(
            shortcut_key,
            shortcut_modifiers(modifier),
            InputContext { dialog_open: true },
        );
        match shortcut {
            Some(ShortcutAction::DialogConfirm) => {
                dialog_for_key.response(ResponseType::Accept);
                gtk4::glib::Propagation::Stop
            }
            Some(ShortcutAction::DialogCancel) => {
                dialog_for_key.response(ResponseType::Cancel);
                gtk4::glib::Propagation::Stop
            }
            _ => gtk4::glib::Propagation::Proceed,
        }
    });
    dialog.add_controller(key_controller);
}

fn parse_dimension(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn parse_dimension_accepts_trimmed_integers_only() {
        assert_eq!(parse_dimension(" 640 "), Some(640));
        assert_eq!(parse_dimension("0"), Some(0));
        assert_eq!(parse_dimension(""), None);
        assert_eq!(parse_dimension("-5"), None);
        assert_eq!(parse_dimension("12.5"), None);
    }

    #[test]
    fn once_runs_callback_a_single_time() {
        let total = Rc::new(Cell::new(0));
        let total_for_callback = total.clone();
        let callback = once(move |value: u32| total_for_callback.set(total_for_callback.get() + value));
        callback(2);
        callback(5);
        assert_eq!(total.get(), 2);
    }
}

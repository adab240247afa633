use gtk4::prelude::*;
use gtk4::{EventControllerKey, GestureClick, GestureDrag};

use crate::geometry::CanvasPoint;
use crate::input::{resolve_shortcut, ShortcutAction};
use crate::paint::PaintEvent;

use super::input_bridge::{normalize_shortcut_key, shortcut_modifiers};
use super::runtime::PaintRuntime;

/// Primary drag paints, secondary click samples, primary double-click types.
pub(super) fn connect_canvas_gestures(runtime: &PaintRuntime) {
    let canvas = runtime.canvas();

    let drag = GestureDrag::new();
    drag.set_button(gtk4::gdk::BUTTON_PRIMARY);
    {
        let runtime = runtime.clone();
        drag.connect_drag_begin(move |_, x, y| {
            runtime.apply(PaintEvent::StrokeStart(CanvasPoint::from_widget(x, y)));
        });
    }
    {
        let runtime = runtime.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            runtime.apply(PaintEvent::StrokeMove(CanvasPoint::from_widget(
                start_x + offset_x,
                start_y + offset_y,
            )));
        });
    }
    {
        let runtime = runtime.clone();
        drag.connect_drag_end(move |_, _, _| runtime.apply(PaintEvent::StrokeEnd));
    }
    canvas.add_controller(drag);

    let pick = GestureClick::new();
    pick.set_button(gtk4::gdk::BUTTON_SECONDARY);
    {
        let runtime = runtime.clone();
        pick.connect_pressed(move |_, _, x, y| {
            runtime.apply(PaintEvent::PickColor(CanvasPoint::from_widget(x, y)));
        });
    }
    canvas.add_controller(pick);

    let text_click = GestureClick::new();
    text_click.set_button(gtk4::gdk::BUTTON_PRIMARY);
    {
        let runtime = runtime.clone();
        text_click.connect_pressed(move |_, n_press, x, y| {
            if n_press == 2 {
                runtime.insert_text(CanvasPoint::from_widget(x, y));
            }
        });
    }
    canvas.add_controller(text_click);
}

pub(super) fn connect_canvas_shortcuts(runtime: &PaintRuntime) {
    let key_controller = EventControllerKey::new();
    let runtime_for_key = runtime.clone();
    key_controller.connect_key_pressed(move |_, key, keycode, modifier| {
        let Some(shortcut_key) = normalize_shortcut_key(key, keycode) else {
            return gtk4::glib::Propagation::Proceed;
        };
        let shortcut = resolve_shortcut(
            shortcut_key,
            shortcut_modifiers(modifier),
            runtime_for_key.input_context(),
        );
        match shortcut {
            Some(ShortcutAction::CanvasSave) => {
                tracing::debug!("save shortcut");
                runtime_for_key.save();
                gtk4::glib::Propagation::Stop
            }
            Some(ShortcutAction::CanvasChooseColor) => {
                tracing::debug!("choose color shortcut");
                runtime_for_key.choose_color();
                gtk4::glib::Propagation::Stop
            }
            _ => gtk4::glib::Propagation::Proceed,
        }
    });
    runtime.window().add_controller(key_controller);
}

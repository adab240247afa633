use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::Label;

/// Transient message badge layered over the canvas. A click dismisses it.
#[derive(Clone)]
pub(super) struct ToastRuntime {
    label: Label,
    sequence: Rc<Cell<u64>>,
}

impl ToastRuntime {
    pub(super) fn new(label: &Label) -> Self {
        let runtime = Self {
            label: label.clone(),
            sequence: Rc::new(Cell::new(0)),
        };

        let click = gtk4::GestureClick::new();
        let runtime_for_click = runtime.clone();
        click.connect_released(move |_, _, _, _| runtime_for_click.dismiss());
        label.add_controller(click);

        runtime
    }

    pub(super) fn show(&self, message: impl Into<String>, duration_ms: u32) {
        self.label.remove_css_class("toast-error");
        self.present(message.into(), duration_ms);
    }

    pub(super) fn show_error(&self, message: impl Into<String>, duration_ms: u32) {
        self.label.add_css_class("toast-error");
        self.present(message.into(), duration_ms);
    }

    fn present(&self, message: String, duration_ms: u32) {
        self.label.set_text(&message);
        self.label.set_visible(true);

        let sequence = self.bump_sequence();
        let label = self.label.clone();
        let latest_sequence = self.sequence.clone();
        gtk4::glib::timeout_add_local_once(
            Duration::from_millis(u64::from(duration_ms)),
            move || {
                if latest_sequence.get() == sequence {
                    label.set_visible(false);
                }
            },
        );
    }

    pub(super) fn dismiss(&self) {
        self.bump_sequence();
        self.label.set_visible(false);
    }

    fn bump_sequence(&self) -> u64 {
        let sequence = self.sequence.get().saturating_add(1);
        self.sequence.set(sequence);
        sequence
    }
}

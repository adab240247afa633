use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{ApplicationWindow, DrawingArea, ToggleButton};

use crate::config::AppConfig;
use crate::geometry::{CanvasPoint, CanvasSize};
use crate::input::InputContext;
use crate::notification;
use crate::paint::{self, PaintController, PaintEvent, PaintOutcome};
use crate::storage;
use crate::ui::StyleTokens;

use super::dialogs::{
    open_color_dialog, open_confirm_dialog, open_save_dialog, open_size_dialog, open_text_dialog,
};
use super::toast::ToastRuntime;

/// Widgets and shared state every GTK callback needs to reach the controller.
#[derive(Clone)]
pub(super) struct PaintRuntime {
    controller: Rc<RefCell<PaintController>>,
    config: AppConfig,
    tokens: StyleTokens,
    window: ApplicationWindow,
    canvas: DrawingArea,
    swatch: DrawingArea,
    eraser_toggle: ToggleButton,
    toast: ToastRuntime,
    dialog_open: Rc<Cell<bool>>,
    last_export: Rc<RefCell<Option<PathBuf>>>,
}

pub(super) struct PaintRuntimeParts {
    pub(super) controller: Rc<RefCell<PaintController>>,
    pub(super) config: AppConfig,
    pub(super) tokens: StyleTokens,
    pub(super) window: ApplicationWindow,
    pub(super) canvas: DrawingArea,
    pub(super) swatch: DrawingArea,
    pub(super) eraser_toggle: ToggleButton,
    pub(super) toast: ToastRuntime,
}

impl PaintRuntime {
    pub(super) fn new(parts: PaintRuntimeParts) -> Self {
        Self {
            controller: parts.controller,
            config: parts.config,
            tokens: parts.tokens,
            window: parts.window,
            canvas: parts.canvas,
            swatch: parts.swatch,
            eraser_toggle: parts.eraser_toggle,
            toast: parts.toast,
            dialog_open: Rc::new(Cell::new(false)),
            last_export: Rc::new(RefCell::new(None)),
        }
    }

    pub(super) fn controller(&self) -> &Rc<RefCell<PaintController>> {
        &self.controller
    }

    pub(super) fn window(&self) -> &ApplicationWindow {
        &self.window
    }

    pub(super) fn canvas(&self) -> &DrawingArea {
        &self.canvas
    }

    pub(super) fn input_context(&self) -> InputContext {
        InputContext {
            dialog_open: self.dialog_open.get(),
        }
    }

    /// Runs one event through the controller and refreshes whatever it touched.
    pub(super) fn apply(&self, event: PaintEvent) {
        let result = {
            let mut controller = self.controller.borrow_mut();
            paint::dispatch(&mut controller, event, self.config.dispatch_limits())
        };
        match result {
            Ok(outcome) => self.present_outcome(outcome),
            Err(err) => {
                tracing::warn!(%err, "paint event failed");
                self.toast
                    .show_error(format!("{err}"), self.tokens.error_toast_duration_ms);
            }
        }
        self.refresh_pen();
    }

    fn present_outcome(&self, outcome: PaintOutcome) {
        match outcome {
            PaintOutcome::Unchanged | PaintOutcome::PenChanged => {}
            PaintOutcome::Redraw => self.canvas.queue_draw(),
            PaintOutcome::Resized(size) => {
                self.fit_canvas(size);
                self.canvas.queue_draw();
            }
            PaintOutcome::Exported(path) => {
                let message = format!("Saved {}", path.display());
                self.toast.show(message.clone(), self.tokens.toast_duration_ms);
                notification::send(message);
                *self.last_export.borrow_mut() = Some(path);
            }
        }
    }

    pub(super) fn fit_canvas(&self, size: CanvasSize) {
        self.canvas
            .set_content_width(i32::try_from(size.width).unwrap_or(i32::MAX));
        self.canvas
            .set_content_height(i32::try_from(size.height).unwrap_or(i32::MAX));
    }

    /// Redraws the swatch and pulls the eraser toggle back in line with the pen.
    pub(super) fn refresh_pen(&self) {
        let erasing = self.controller.borrow().pen().eraser_active();
        if self.eraser_toggle.is_active() != erasing {
            self.eraser_toggle.set_active(erasing);
        }
        self.canvas.set_cursor_from_name(canvas_cursor_name(erasing));
        self.swatch.queue_draw();
    }

    fn begin_dialog(&self) -> bool {
        if self.dialog_open.replace(true) {
            tracing::debug!("dialog already open; ignoring request");
            return false;
        }
        true
    }

    fn end_dialog(&self) {
        self.dialog_open.set(false);
    }

    fn export_suggestion(&self) -> PathBuf {
        self.last_export
            .borrow()
            .clone()
            .unwrap_or_else(storage::suggested_export_path)
    }

    pub(super) fn choose_color(&self) {
        if !self.begin_dialog() {
            return;
        }
        let seed = self.controller.borrow().pen().color();
        let runtime = self.clone();
        open_color_dialog(&self.window, "Choose pen color", seed, move |color| {
            runtime.end_dialog();
            runtime.apply(PaintEvent::ChooseColor(color));
        });
    }

    pub(super) fn choose_background(&self) {
        if !self.begin_dialog() {
            return;
        }
        let seed = self.controller.borrow().surface().background();
        let runtime = self.clone();
        open_color_dialog(&self.window, "Choose background", seed, move |color| {
            runtime.end_dialog();
            runtime.apply(PaintEvent::SetBackground(color));
        });
    }

    pub(super) fn resize_canvas(&self) {
        if !self.begin_dialog() {
            return;
        }
        let current = self.controller.borrow().size();
        let runtime = self.clone();
        open_size_dialog(&self.window, current, self.tokens, move |width, height| {
            runtime.end_dialog();
            runtime.apply(PaintEvent::Resize { width, height });
        });
    }

    pub(super) fn save(&self) {
        if !self.begin_dialog() {
            return;
        }
        let runtime = self.clone();
        open_save_dialog(&self.window, &self.export_suggestion(), move |path| {
            runtime.end_dialog();
            runtime.apply(PaintEvent::Export(path));
        });
    }

    pub(super) fn insert_text(&self, point: CanvasPoint) {
        if !self.begin_dialog() {
            return;
        }
        let ask_to_save = self.config.prompt_save_before_text
            && !self.controller.borrow().surface().is_blank();
        if !ask_to_save {
            self.prompt_text(point);
            return;
        }

        let runtime = self.clone();
        open_confirm_dialog(
            &self.window,
            "Save drawing",
            "Save the current drawing before adding text?",
            self.tokens,
            move |save_first| {
                if !save_first {
                    runtime.prompt_text(point);
                    return;
                }
                let runtime_after_save = runtime.clone();
                open_save_dialog(&runtime.window, &runtime.export_suggestion(), move |path| {
                    runtime_after_save.apply(PaintEvent::Export(path));
                    runtime_after_save.prompt_text(point);
                });
            },
        );
    }

    fn prompt_text(&self, point: CanvasPoint) {
        let runtime = self.clone();
        open_text_dialog(&self.window, self.tokens, move |text| {
            runtime.end_dialog();
            runtime.apply(PaintEvent::InsertText { point, text });
        });
    }
}

fn canvas_cursor_name(erasing: bool) -> Option<&'static str> {
    erasing.then_some("cell")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eraser_switches_canvas_to_cell_cursor() {
        assert_eq!(canvas_cursor_name(true), Some("cell"));
        assert_eq!(canvas_cursor_name(false), None);
    }
}

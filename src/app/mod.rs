use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::paint::{render_surface, PaintController};
use crate::ui::LAYOUT_TOKENS;
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, DrawingArea, Label, Orientation,
    Overlay, PolicyType, ScrolledWindow,
};

mod canvas;
mod dialogs;
mod input_bridge;
mod runtime;
mod runtime_css;
mod toast;
mod toolbar;
mod wiring;

use self::runtime::{PaintRuntime, PaintRuntimeParts};
use self::runtime_css::install_runtime_css;
use self::toast::ToastRuntime;
use self::toolbar::{build_toolbar, connect_toolbar};
use self::wiring::{connect_canvas_gestures, connect_canvas_shortcuts};

const APPLICATION_ID: &str = "io.github.scrawl.Scrawl";
const MAX_INITIAL_WINDOW_EDGE: i32 = 1600;

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn start(&self) -> AppResult<()> {
        let config = self.config;
        tracing::info!("starting gtk runtime");
        let application = Application::new(
            Some(APPLICATION_ID),
            gtk4::gio::ApplicationFlags::NON_UNIQUE,
        );
        let activate_once = Rc::new(Cell::new(false));

        application.connect_activate(move |app| {
            if activate_once.replace(true) {
                tracing::debug!("ignoring duplicate gtk activate signal");
                return;
            }
            build_paint_window(app, config).present();
        });

        // Pass only argv[0] so GTK never parses arguments meant for us.
        let exit_code = application.run_with_args(&[env!("CARGO_PKG_NAME")]);
        if exit_code != gtk4::glib::ExitCode::SUCCESS {
            return Err(AppError::Runtime(format!("{exit_code:?}")));
        }
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

fn build_paint_window(app: &Application, config: AppConfig) -> ApplicationWindow {
    let tokens = LAYOUT_TOKENS;
    install_runtime_css(tokens);

    let controller = Rc::new(RefCell::new(
        PaintController::new(config.canvas_size, config.background, config.pen_state())
            .with_text_style(config.text_style),
    ));

    let window = ApplicationWindow::new(app);
    window.add_css_class("scrawl-root");
    window.set_title(Some("Scrawl"));
    window.set_default_size(
        initial_window_edge(config.canvas_size.width, tokens.window_padding),
        initial_window_edge(config.canvas_size.height, tokens.window_padding * 2),
    );

    let toolbar = build_toolbar(tokens, controller.borrow().pen());

    let canvas = DrawingArea::new();
    canvas.set_halign(Align::Start);
    canvas.set_valign(Align::Start);
    {
        let controller = controller.clone();
        canvas.set_draw_func(move |_, context, _, _| {
            if let Err(err) = render_surface(context, controller.borrow().surface()) {
                tracing::warn!(?err, "failed to render drawing surface");
            }
        });
    }

    let scroller = ScrolledWindow::new();
    scroller.set_policy(PolicyType::Automatic, PolicyType::Automatic);
    scroller.set_hexpand(true);
    scroller.set_vexpand(true);
    scroller.set_child(Some(&canvas));

    let toast_label = Label::new(Some(""));
    toast_label.add_css_class("toast-badge");
    toast_label.set_halign(Align::Center);
    toast_label.set_valign(Align::End);
    toast_label.set_visible(false);

    let overlay = Overlay::new();
    overlay.set_child(Some(&scroller));
    overlay.add_overlay(&toast_label);

    let root = GtkBox::new(Orientation::Vertical, 0);
    root.append(&toolbar.root);
    root.append(&overlay);
    window.set_child(Some(&root));

    let runtime = PaintRuntime::new(PaintRuntimeParts {
        controller,
        config,
        tokens,
        window: window.clone(),
        canvas,
        swatch: toolbar.swatch.clone(),
        eraser_toggle: toolbar.eraser_toggle.clone(),
        toast: ToastRuntime::new(&toast_label),
    });
    runtime.fit_canvas(config.canvas_size);
    connect_toolbar(&toolbar, &runtime);
    connect_canvas_gestures(&runtime);
    connect_canvas_shortcuts(&runtime);
    runtime.refresh_pen();

    tracing::info!(
        width = config.canvas_size.width,
        height = config.canvas_size.height,
        background = %config.background.to_hex(),
        "paint window ready"
    );
    window
}

fn initial_window_edge(canvas_edge: u32, padding: i32) -> i32 {
    i32::try_from(canvas_edge)
        .unwrap_or(MAX_INITIAL_WINDOW_EDGE)
        .saturating_add(padding)
        .min(MAX_INITIAL_WINDOW_EDGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_window_edge_pads_and_caps_canvas_size() {
        assert_eq!(initial_window_edge(600, 48), 648);
        assert_eq!(initial_window_edge(8_000, 48), MAX_INITIAL_WINDOW_EDGE);
        assert_eq!(initial_window_edge(u32::MAX, 48), MAX_INITIAL_WINDOW_EDGE);
    }
}

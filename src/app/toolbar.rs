use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, DrawingArea, DropDown, Label, Orientation, ToggleButton};

use crate::paint::{BrushSize, PaintEvent, PenState, StrokeStyle};
use crate::ui::{toolbar_button, toolbar_dropdown, toolbar_toggle_button, StyleTokens};

use super::canvas::render_swatch;
use super::runtime::PaintRuntime;

pub(super) struct ToolbarUi {
    pub(super) root: GtkBox,
    clear_button: Button,
    color_button: Button,
    background_button: Button,
    resize_button: Button,
    save_button: Button,
    brush_dropdown: DropDown,
    style_dropdown: DropDown,
    pub(super) eraser_toggle: ToggleButton,
    pub(super) swatch: DrawingArea,
}

pub(super) fn build_toolbar(tokens: StyleTokens, pen: &PenState) -> ToolbarUi {
    let root = GtkBox::new(Orientation::Horizontal, tokens.spacing_8);
    root.add_css_class("scrawl-toolbar");

    let clear_button = toolbar_button("Clear", "Erase everything on the canvas", tokens);
    let color_button = toolbar_button("Color", "Choose pen color (Alt+C)", tokens);
    let background_button = toolbar_button("Background", "Change the canvas background", tokens);
    let resize_button = toolbar_button("Resize", "Resize the canvas", tokens);
    let save_button = toolbar_button("Save", "Export as PNG (Alt+S)", tokens);

    let brush_labels = BrushSize::ALL.map(BrushSize::label);
    let brush_dropdown = toolbar_dropdown(
        &brush_labels,
        index_of(&BrushSize::ALL, pen.brush_size()),
        "Brush size",
    );
    let style_labels = StrokeStyle::ALL.map(StrokeStyle::label);
    let style_dropdown = toolbar_dropdown(
        &style_labels,
        index_of(&StrokeStyle::ALL, pen.stroke_style()),
        "Stroke style",
    );
    let eraser_toggle = toolbar_toggle_button("Eraser", "Paint with the background color", tokens);

    let swatch = DrawingArea::new();
    swatch.add_css_class("pen-swatch");
    swatch.set_content_width(tokens.swatch_size);
    swatch.set_content_height(tokens.swatch_size);
    swatch.set_valign(gtk4::Align::Center);
    swatch.set_tooltip_text(Some("Current pen"));

    root.append(&clear_button);
    root.append(&color_button);
    root.append(&background_button);
    root.append(&resize_button);
    root.append(&save_button);
    root.append(&Label::new(Some("Brush")));
    root.append(&brush_dropdown);
    root.append(&style_dropdown);
    root.append(&eraser_toggle);
    root.append(&swatch);

    ToolbarUi {
        root,
        clear_button,
        color_button,
        background_button,
        resize_button,
        save_button,
        brush_dropdown,
        style_dropdown,
        eraser_toggle,
        swatch,
    }
}

pub(super) fn connect_toolbar(toolbar: &ToolbarUi, runtime: &PaintRuntime) {
    {
        let runtime = runtime.clone();
        toolbar
            .clear_button
            .connect_clicked(move |_| runtime.apply(PaintEvent::Clear));
    }
    {
        let runtime = runtime.clone();
        toolbar
            .color_button
            .connect_clicked(move |_| runtime.choose_color());
    }
    {
        let runtime = runtime.clone();
        toolbar
            .background_button
            .connect_clicked(move |_| runtime.choose_background());
    }
    {
        let runtime = runtime.clone();
        toolbar
            .resize_button
            .connect_clicked(move |_| runtime.resize_canvas());
    }
    {
        let runtime = runtime.clone();
        toolbar.save_button.connect_clicked(move |_| runtime.save());
    }
    {
        let runtime = runtime.clone();
        toolbar.brush_dropdown.connect_selected_notify(move |dropdown| {
            if let Some(size) = item_at(&BrushSize::ALL, dropdown.selected()) {
                runtime.apply(PaintEvent::SetBrushSize(size));
            }
        });
    }
    {
        let runtime = runtime.clone();
        toolbar.style_dropdown.connect_selected_notify(move |dropdown| {
            if let Some(style) = item_at(&StrokeStyle::ALL, dropdown.selected()) {
                runtime.apply(PaintEvent::SetStrokeStyle(style));
            }
        });
    }
    {
        let runtime = runtime.clone();
        toolbar.eraser_toggle.connect_toggled(move |button| {
            let erasing = runtime.controller().borrow().pen().eraser_active();
            if button.is_active() == erasing {
                return;
            }
            if button.is_active() {
                runtime.apply(PaintEvent::UseEraser);
            } else {
                runtime.apply(PaintEvent::ReturnToBrush);
            }
        });
    }
    {
        let controller = runtime.controller().clone();
        toolbar.swatch.set_draw_func(move |_, context, width, height| {
            let controller = controller.borrow();
            if let Err(err) = render_swatch(
                context,
                f64::from(width),
                f64::from(height),
                controller.swatch_color(),
                controller.pen().eraser_active(),
            ) {
                tracing::warn!(?err, "failed to draw pen swatch");
            }
        });
    }
}

fn index_of<T: PartialEq>(items: &[T], value: T) -> usize {
    items.iter().position(|item| *item == value).unwrap_or(0)
}

fn item_at<T: Copy>(items: &[T], selected: u32) -> Option<T> {
    usize::try_from(selected)
        .ok()
        .and_then(|index| items.get(index).copied())
}

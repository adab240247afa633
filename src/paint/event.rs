use std::path::PathBuf;

use crate::geometry::{CanvasPoint, CanvasSize, Color};

use super::controller::PaintController;
use super::error::PaintResult;
use super::pen::{BrushSize, StrokeStyle};

/// Everything the front end can ask of the canvas. Payloads that come out
/// of a dialog are `Option`s; `None` means the user cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintEvent {
    StrokeStart(CanvasPoint),
    StrokeMove(CanvasPoint),
    StrokeEnd,
    PickColor(CanvasPoint),
    ChooseColor(Option<Color>),
    Clear,
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    SetBackground(Option<Color>),
    UseEraser,
    ReturnToBrush,
    SetBrushSize(BrushSize),
    SetStrokeStyle(StrokeStyle),
    InsertText {
        point: CanvasPoint,
        text: Option<String>,
    },
    Export(Option<PathBuf>),
}

/// What the front end needs to refresh after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintOutcome {
    Unchanged,
    Redraw,
    PenChanged,
    Resized(CanvasSize),
    Exported(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchLimits {
    pub max_canvas_dimension: u32,
}

impl Default for DispatchLimits {
    fn default() -> Self {
        Self {
            max_canvas_dimension: 8192,
        }
    }
}

impl DispatchLimits {
    fn canvas_size(self, width: Option<u32>, height: Option<u32>) -> Option<CanvasSize> {
        let size = CanvasSize::new(width?, height?)?;
        if size.width > self.max_canvas_dimension || size.height > self.max_canvas_dimension {
            return None;
        }
        Some(size)
    }
}

pub fn dispatch(
    controller: &mut PaintController,
    event: PaintEvent,
    limits: DispatchLimits,
) -> PaintResult<PaintOutcome> {
    tracing::trace!(?event, "dispatch paint event");
    let outcome = match event {
        PaintEvent::StrokeStart(point) => {
            controller.begin_stroke(point);
            PaintOutcome::Unchanged
        }
        PaintEvent::StrokeMove(point) => {
            if controller.continue_stroke(point)? {
                PaintOutcome::Redraw
            } else {
                PaintOutcome::Unchanged
            }
        }
        PaintEvent::StrokeEnd => {
            controller.end_stroke();
            PaintOutcome::Unchanged
        }
        PaintEvent::PickColor(point) => match controller.pick_color(point) {
            Some(_) => PaintOutcome::PenChanged,
            None => PaintOutcome::Unchanged,
        },
        PaintEvent::ChooseColor(Some(color)) => {
            controller.choose_color(color);
            PaintOutcome::PenChanged
        }
        PaintEvent::Clear => {
            controller.clear();
            PaintOutcome::Redraw
        }
        PaintEvent::Resize { width, height } => match limits.canvas_size(width, height) {
            Some(size) => {
                controller.resize(size);
                PaintOutcome::Resized(size)
            }
            None => {
                tracing::debug!(?width, ?height, "resize aborted");
                PaintOutcome::Unchanged
            }
        },
        PaintEvent::SetBackground(Some(color)) => {
            controller.set_background(color)?;
            PaintOutcome::Redraw
        }
        PaintEvent::UseEraser => {
            controller.use_eraser();
            PaintOutcome::PenChanged
        }
        PaintEvent::ReturnToBrush => {
            controller.return_to_brush();
            PaintOutcome::PenChanged
        }
        PaintEvent::SetBrushSize(brush_size) => {
            controller.set_brush_size(brush_size);
            PaintOutcome::PenChanged
        }
        PaintEvent::SetStrokeStyle(stroke_style) => {
            controller.set_stroke_style(stroke_style);
            PaintOutcome::PenChanged
        }
        PaintEvent::InsertText {
            point,
            text: Some(text),
        } => {
            if controller.add_text(point, &text)? {
                PaintOutcome::Redraw
            } else {
                PaintOutcome::Unchanged
            }
        }
        PaintEvent::Export(Some(path)) => PaintOutcome::Exported(controller.export(&path)?),
        PaintEvent::ChooseColor(None)
        | PaintEvent::SetBackground(None)
        | PaintEvent::InsertText { text: None, .. }
        | PaintEvent::Export(None) => {
            tracing::debug!("dialog cancelled; nothing to do");
            PaintOutcome::Unchanged
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> CanvasPoint {
        CanvasPoint::new(x, y)
    }

    fn run(controller: &mut PaintController, event: PaintEvent) -> PaintOutcome {
        dispatch(controller, event, DispatchLimits::default()).expect("dispatch")
    }

    #[test]
    fn drag_sequence_draws_only_after_first_sample() {
        let mut controller = PaintController::default();
        assert_eq!(
            run(&mut controller, PaintEvent::StrokeStart(p(10, 10))),
            PaintOutcome::Unchanged
        );
        assert_eq!(
            run(&mut controller, PaintEvent::StrokeMove(p(10, 20))),
            PaintOutcome::Redraw
        );
        assert_eq!(
            run(&mut controller, PaintEvent::StrokeEnd),
            PaintOutcome::Unchanged
        );
        assert_eq!(controller.raster().pixel(p(10, 15)), Some(Color::BLACK));
    }

    #[test]
    fn cancelled_dialogs_leave_state_untouched() {
        let mut controller = PaintController::default();
        run(&mut controller, PaintEvent::ChooseColor(Some(Color::new(9, 9, 9))));
        let before = controller.clone();

        for event in [
            PaintEvent::ChooseColor(None),
            PaintEvent::SetBackground(None),
            PaintEvent::InsertText {
                point: p(1, 1),
                text: None,
            },
            PaintEvent::InsertText {
                point: p(1, 1),
                text: Some(String::new()),
            },
            PaintEvent::Export(None),
            PaintEvent::Resize {
                width: Some(100),
                height: None,
            },
        ] {
            assert_eq!(run(&mut controller, event), PaintOutcome::Unchanged);
        }

        assert_eq!(controller.pen(), before.pen());
        assert_eq!(controller.size(), before.size());
        assert_eq!(controller.raster().image(), before.raster().image());
        assert!(controller.surface().is_blank());
    }

    #[test]
    fn resize_rejects_zero_and_oversized_dimensions() {
        let mut controller = PaintController::default();
        let limits = DispatchLimits {
            max_canvas_dimension: 1000,
        };
        for (width, height) in [(0, 10), (10, 0), (1001, 10)] {
            let outcome = dispatch(
                &mut controller,
                PaintEvent::Resize {
                    width: Some(width),
                    height: Some(height),
                },
                limits,
            )
            .unwrap();
            assert_eq!(outcome, PaintOutcome::Unchanged);
        }
        assert_eq!(controller.size(), CanvasSize::default());

        let outcome = dispatch(
            &mut controller,
            PaintEvent::Resize {
                width: Some(1000),
                height: Some(20),
            },
            limits,
        )
        .unwrap();
        assert_eq!(
            outcome,
            PaintOutcome::Resized(CanvasSize::new(1000, 20).unwrap())
        );
    }

    #[test]
    fn eraser_toggle_round_trip_restores_pen() {
        let mut controller = PaintController::default();
        run(&mut controller, PaintEvent::ChooseColor(Some(Color::new(0, 128, 0))));
        run(&mut controller, PaintEvent::UseEraser);
        assert!(controller.pen().eraser_active());
        run(&mut controller, PaintEvent::StrokeStart(p(1, 1)));
        run(&mut controller, PaintEvent::StrokeMove(p(9, 1)));
        run(&mut controller, PaintEvent::StrokeEnd);
        run(&mut controller, PaintEvent::ReturnToBrush);

        assert!(!controller.pen().eraser_active());
        assert_eq!(controller.pen().color(), Color::new(0, 128, 0));
    }

    #[test]
    fn export_event_reports_written_path() {
        let mut controller = PaintController::default();
        let requested = std::env::temp_dir()
            .join(format!("scrawl-dispatch-{}", std::process::id()))
            .join("sketch");
        let outcome = run(&mut controller, PaintEvent::Export(Some(requested.clone())));
        let written = match outcome {
            PaintOutcome::Exported(path) => path,
            other => panic!("expected export outcome, got {other:?}"),
        };
        assert_eq!(written, requested.with_extension("png"));
        let _ = std::fs::remove_file(written);
    }
}

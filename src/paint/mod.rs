//! Paint core: pen state, the vector drawing surface, its raster mirror and
//! the event dispatcher that keeps them in step.

pub mod controller;
pub mod error;
pub mod event;
pub mod pen;
pub mod raster;
pub mod render;
pub mod surface;
pub mod text;

pub use controller::PaintController;
pub use error::{PaintError, PaintResult};
pub use event::{dispatch, DispatchLimits, PaintEvent, PaintOutcome};
pub use pen::{BrushSize, Ink, PenState, StrokeStyle};
pub use raster::RasterMirror;
pub use render::{render_surface, set_source_color};
pub use surface::{DrawingSurface, Primitive, Segment, TextLabel};
pub use text::{show_text_lines, TextFontFamily, TextStyle};

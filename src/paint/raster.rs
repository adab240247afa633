use gtk4::cairo;
use image::RgbImage;

use crate::geometry::{CanvasPoint, CanvasSize, Color};

use super::error::{PaintError, PaintResult};
use super::render::{draw_label, render_surface, stroke_segment};
use super::surface::{DrawingSurface, Segment, TextLabel};

/// Off-screen pixel copy of the canvas; the only thing that gets exported
/// or sampled.
#[derive(Debug, Clone)]
pub struct RasterMirror {
    image: RgbImage,
}

/// Pixel rectangle of the mirror that a cairo pass reads and writes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl RasterMirror {
    pub fn new(size: CanvasSize, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(size.width, size.height, background.into()),
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn pixel(&self, point: CanvasPoint) -> Option<Color> {
        if !self.size().contains(point) {
            return None;
        }
        Some((*self.image.get_pixel(point.x as u32, point.y as u32)).into())
    }

    pub fn reset(&mut self, size: CanvasSize, background: Color) {
        self.image = RgbImage::from_pixel(size.width, size.height, background.into());
    }

    pub fn draw_segment(&mut self, segment: &Segment, background: Color) -> PaintResult<()> {
        let Some(region) = self.segment_region(segment) else {
            return Ok(());
        };
        self.paint_region(region, |context| {
            stroke_segment(context, segment, background)
        })
    }

    pub fn draw_text(&mut self, label: &TextLabel, background: Color) -> PaintResult<()> {
        let region = self.full_region();
        self.paint_region(region, |context| draw_label(context, label, background))
    }

    /// Repaints from scratch: background first, then every primitive in order.
    pub fn replay(&mut self, surface: &DrawingSurface) -> PaintResult<()> {
        self.reset(surface.size(), surface.background());
        let region = self.full_region();
        self.paint_region(region, |context| render_surface(context, surface))
    }

    fn full_region(&self) -> Region {
        Region {
            left: 0,
            top: 0,
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    // Bounding box of the stroke plus a margin for caps, clipped to the canvas.
    fn segment_region(&self, segment: &Segment) -> Option<Region> {
        let reach = f64::from(segment.width.max(1)) / 2.0 + 2.0;
        let (from, to) = (segment.from, segment.to);
        let left = (f64::from(from.x.min(to.x)) - reach).floor().max(0.0);
        let top = (f64::from(from.y.min(to.y)) - reach).floor().max(0.0);
        let right = (f64::from(from.x.max(to.x)) + 1.0 + reach)
            .ceil()
            .min(f64::from(self.image.width()));
        let bottom = (f64::from(from.y.max(to.y)) + 1.0 + reach)
            .ceil()
            .min(f64::from(self.image.height()));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Region {
            left: left as u32,
            top: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Copies `region` into an Rgb24 cairo surface, runs `draw` in canvas
    /// coordinates and copies the result back.
    fn paint_region(
        &mut self,
        region: Region,
        draw: impl FnOnce(&cairo::Context) -> Result<(), cairo::Error>,
    ) -> PaintResult<()> {
        let width = i32::try_from(region.width).map_err(|_| render_error("region too wide"))?;
        let height = i32::try_from(region.height).map_err(|_| render_error("region too tall"))?;
        let mut surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height)
            .map_err(|err| render_error(format!("create raster surface failed: {err}")))?;
        let stride = usize::try_from(surface.stride()).map_err(|_| render_error("negative stride"))?;

        {
            let mut data = surface
                .data()
                .map_err(|err| render_error(format!("write raster surface failed: {err}")))?;
            for y in 0..region.height {
                for x in 0..region.width {
                    let pixel = self.image.get_pixel(region.left + x, region.top + y);
                    let offset = y as usize * stride + x as usize * 4;
                    data[offset..offset + 4].copy_from_slice(&pack_xrgb(pixel.0).to_ne_bytes());
                }
            }
        }
        surface.mark_dirty();

        {
            let context = cairo::Context::new(&surface)
                .map_err(|err| render_error(format!("create raster context failed: {err}")))?;
            context.translate(-f64::from(region.left), -f64::from(region.top));
            draw(&context).map_err(|err| render_error(format!("draw failed: {err}")))?;
        }
        surface.flush();

        let data = surface
            .data()
            .map_err(|err| render_error(format!("read raster surface failed: {err}")))?;
        for y in 0..region.height {
            for x in 0..region.width {
                let offset = y as usize * stride + x as usize * 4;
                let value = u32::from_ne_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]);
                self.image.get_pixel_mut(region.left + x, region.top + y).0 = unpack_xrgb(value);
            }
        }
        Ok(())
    }
}

// Rgb24 pixels are native-endian 32-bit words laid out as xRGB.
fn pack_xrgb([red, green, blue]: [u8; 3]) -> u32 {
    (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue)
}

fn unpack_xrgb(value: u32) -> [u8; 3] {
    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}

fn render_error(message: impl Into<String>) -> PaintError {
    PaintError::Render(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::pen::{Ink, StrokeStyle};
    use crate::paint::{PaintController, PenState, Primitive};

    const RED: Color = Color::new(255, 0, 0);

    fn segment(from: (i32, i32), to: (i32, i32), width: u32, style: StrokeStyle) -> Segment {
        Segment {
            from: CanvasPoint::new(from.0, from.1),
            to: CanvasPoint::new(to.0, to.1),
            ink: Ink::Color(RED),
            width,
            style,
            dash_offset: 0.0,
        }
    }

    /// Renders the vector surface the way the canvas widget does, on a
    /// fresh full-size cairo surface.
    fn render_on_screen(surface: &DrawingSurface) -> RgbImage {
        let size = surface.size();
        let mut target = cairo::ImageSurface::create(
            cairo::Format::Rgb24,
            size.width as i32,
            size.height as i32,
        )
        .expect("image surface");
        {
            let context = cairo::Context::new(&target).expect("context");
            render_surface(&context, surface).expect("render");
        }
        target.flush();
        let stride = target.stride() as usize;
        let data = target.data().expect("surface data");
        RgbImage::from_fn(size.width, size.height, |x, y| {
            let offset = y as usize * stride + x as usize * 4;
            let value = u32::from_ne_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
            image::Rgb(unpack_xrgb(value))
        })
    }

    fn assert_mirrors_screen(controller: &PaintController) {
        let screen = render_on_screen(controller.surface());
        let raster = controller.raster().image();
        assert_eq!(screen.dimensions(), raster.dimensions());
        for (x, y, pixel) in screen.enumerate_pixels() {
            assert_eq!(
                pixel,
                raster.get_pixel(x, y),
                "screen and raster differ at ({x}, {y})"
            );
        }
    }

    fn drag(controller: &mut PaintController, points: &[(i32, i32)]) {
        controller.begin_stroke(CanvasPoint::new(points[0].0, points[0].1));
        for (x, y) in &points[1..] {
            controller
                .continue_stroke(CanvasPoint::new(*x, *y))
                .expect("stroke");
        }
        controller.end_stroke();
    }

    #[test]
    fn raster_matches_screen_for_diagonal_wide_and_dashed_strokes() {
        let size = CanvasSize::new(120, 90).unwrap();
        let mut controller = PaintController::new(size, Color::WHITE, PenState::new(RED));
        drag(&mut controller, &[(10, 10), (20, 15), (37, 41), (60, 44)]);

        controller.set_brush_size(crate::paint::BrushSize::Large);
        drag(&mut controller, &[(15, 80), (50, 55), (58, 70)]);

        controller.set_brush_size(crate::paint::BrushSize::Small);
        controller.set_stroke_style(StrokeStyle::DashDot);
        let diagonal: Vec<(i32, i32)> = (0..30).map(|step| (70 + step, 5 + 2 * step)).collect();
        drag(&mut controller, &diagonal);

        controller.use_eraser();
        controller.set_stroke_style(StrokeStyle::Solid);
        controller.set_brush_size(crate::paint::BrushSize::Medium);
        drag(&mut controller, &[(5, 5), (110, 85)]);

        assert_mirrors_screen(&controller);
        controller.set_background(Color::new(10, 200, 30)).expect("background");
        assert_mirrors_screen(&controller);
    }

    #[test]
    fn raster_matches_screen_for_text() {
        let mut controller = PaintController::new(
            CanvasSize::new(160, 60).unwrap(),
            Color::WHITE,
            PenState::new(Color::new(20, 40, 220)),
        );
        drag(&mut controller, &[(0, 30), (159, 30)]);
        assert!(controller
            .add_text(CanvasPoint::new(6, 8), "Scrawl\nline two")
            .expect("text"));
        assert_mirrors_screen(&controller);
    }

    #[test]
    fn thin_diagonal_segment_touches_both_endpoints() {
        let mut raster = RasterMirror::new(CanvasSize::default(), Color::WHITE);
        raster
            .draw_segment(&segment((5, 5), (25, 15), 1, StrokeStyle::Solid), Color::WHITE)
            .expect("segment");
        assert_eq!(raster.pixel(CanvasPoint::new(5, 5)), Some(RED));
        assert_eq!(raster.pixel(CanvasPoint::new(15, 10)), Some(RED));
        assert_eq!(raster.pixel(CanvasPoint::new(25, 15)), Some(RED));
        assert_eq!(raster.pixel(CanvasPoint::new(25, 5)), Some(Color::WHITE));
    }

    #[test]
    fn wide_vertical_segment_covers_exactly_its_width() {
        for width in [2_u32, 5, 10] {
            let mut raster = RasterMirror::new(CanvasSize::default(), Color::WHITE);
            raster
                .draw_segment(
                    &segment((100, 100), (100, 200), width, StrokeStyle::Solid),
                    Color::WHITE,
                )
                .expect("segment");
            let inked_columns = (0..600)
                .filter(|x| raster.pixel(CanvasPoint::new(*x, 150)) == Some(RED))
                .count();
            assert_eq!(inked_columns, width as usize, "width {width}");
        }
    }

    #[test]
    fn segments_are_clipped_to_the_canvas() {
        let size = CanvasSize::new(10, 10).expect("size");
        let mut raster = RasterMirror::new(size, Color::WHITE);
        raster
            .draw_segment(&segment((-20, 5), (30, 5), 1, StrokeStyle::Solid), Color::WHITE)
            .expect("segment");
        raster
            .draw_segment(&segment((-20, 2), (30, 2), 5, StrokeStyle::Solid), Color::WHITE)
            .expect("segment");
        assert_eq!(raster.size(), size);
        assert_eq!(raster.pixel(CanvasPoint::new(0, 5)), Some(RED));
        assert_eq!(raster.pixel(CanvasPoint::new(9, 5)), Some(RED));
    }

    #[test]
    fn segment_entirely_outside_the_canvas_is_skipped() {
        let size = CanvasSize::new(10, 10).expect("size");
        let mut raster = RasterMirror::new(size, Color::WHITE);
        let outside = segment((40, 40), (60, 50), 10, StrokeStyle::Solid);
        assert_eq!(raster.segment_region(&outside), None);
        raster.draw_segment(&outside, Color::WHITE).expect("segment");
        assert!(raster.image().pixels().all(|pixel| Color::from(*pixel) == Color::WHITE));
    }

    #[test]
    fn dashed_thin_segment_leaves_gaps() {
        let mut raster = RasterMirror::new(CanvasSize::default(), Color::WHITE);
        raster
            .draw_segment(&segment((0, 0), (19, 0), 1, StrokeStyle::Dash), Color::WHITE)
            .expect("segment");
        let inked: Vec<bool> = (0..20)
            .map(|x| raster.pixel(CanvasPoint::new(x, 0)) == Some(RED))
            .collect();
        assert!(inked[1..6].iter().all(|value| *value));
        assert!(inked[7..10].iter().all(|value| !*value));
        assert!(inked[11..16].iter().all(|value| *value));
    }

    #[test]
    fn dash_offset_shifts_where_the_pattern_resumes() {
        let mut raster = RasterMirror::new(CanvasSize::default(), Color::WHITE);
        let resumed = Segment {
            dash_offset: 6.0,
            ..segment((0, 0), (19, 0), 1, StrokeStyle::Dash)
        };
        raster.draw_segment(&resumed, Color::WHITE).expect("segment");
        assert_eq!(raster.pixel(CanvasPoint::new(1, 0)), Some(Color::WHITE));
        assert_eq!(raster.pixel(CanvasPoint::new(6, 0)), Some(RED));
    }

    #[test]
    fn background_ink_resolves_against_given_background() {
        let mut raster = RasterMirror::new(CanvasSize::default(), Color::WHITE);
        let erase = Segment {
            ink: Ink::Background,
            ..segment((1, 1), (1, 4), 1, StrokeStyle::Solid)
        };
        raster
            .draw_segment(&erase, Color::new(0, 0, 255))
            .expect("segment");
        assert_eq!(raster.pixel(CanvasPoint::new(1, 3)), Some(Color::new(0, 0, 255)));
    }

    #[test]
    fn replay_redraws_primitives_over_new_background() {
        let size = CanvasSize::new(20, 20).unwrap();
        let mut surface = DrawingSurface::new(size, Color::WHITE);
        surface.push(Primitive::Segment(segment((2, 10), (17, 10), 3, StrokeStyle::Solid)));
        surface.set_background(Color::BLACK);
        let mut raster = RasterMirror::new(size, Color::WHITE);
        raster.replay(&surface).expect("replay");
        assert_eq!(raster.pixel(CanvasPoint::new(0, 0)), Some(Color::BLACK));
        assert_eq!(raster.pixel(CanvasPoint::new(10, 10)), Some(RED));
    }

    #[test]
    fn xrgb_packing_round_trips() {
        assert_eq!(pack_xrgb([0x12, 0x34, 0x56]), 0x0012_3456);
        assert_eq!(unpack_xrgb(0xff12_3456), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn pixel_outside_canvas_is_none() {
        let raster = RasterMirror::new(CanvasSize::default(), Color::WHITE);
        assert_eq!(raster.pixel(CanvasPoint::new(600, 0)), None);
        assert_eq!(raster.pixel(CanvasPoint::new(0, -1)), None);
    }
}

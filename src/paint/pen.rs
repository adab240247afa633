use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushSize {
    #[default]
    Fine,
    Small,
    Medium,
    Large,
}

impl BrushSize {
    pub const ALL: [Self; 4] = [Self::Fine, Self::Small, Self::Medium, Self::Large];

    pub const fn pixels(self) -> u32 {
        match self {
            Self::Fine => 1,
            Self::Small => 2,
            Self::Medium => 5,
            Self::Large => 10,
        }
    }

    pub fn from_pixels(pixels: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.pixels() == pixels)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fine => "1",
            Self::Small => "2",
            Self::Medium => "5",
            Self::Large => "10",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl StrokeStyle {
    pub const ALL: [Self; 4] = [Self::Solid, Self::Dash, Self::Dot, Self::DashDot];

    /// On/off run lengths in multiples of the brush width; empty means solid.
    const fn unit_pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dash => &[6.0, 4.0],
            Self::Dot => &[1.0, 3.0],
            Self::DashDot => &[6.0, 3.0, 1.0, 3.0],
        }
    }

    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }

    /// Dash lengths in canvas pixels for a stroke of the given width.
    pub fn dash_pattern(self, width: u32) -> Vec<f64> {
        let scale = f64::from(width.max(1));
        self.unit_pattern()
            .iter()
            .map(|length| length * scale)
            .collect()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Dash => "Dash",
            Self::Dot => "Dot",
            Self::DashDot => "Dash-dot",
        }
    }
}

/// Paint source of a primitive. Background ink is resolved against the
/// surface background at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Color(Color),
    Background,
}

impl Ink {
    pub const fn resolve(self, background: Color) -> Color {
        match self {
            Self::Color(color) => color,
            Self::Background => background,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenState {
    color: Color,
    previous_color: Color,
    eraser_active: bool,
    brush_size: BrushSize,
    stroke_style: StrokeStyle,
}

impl Default for PenState {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl PenState {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            previous_color: color,
            eraser_active: false,
            brush_size: BrushSize::Fine,
            stroke_style: StrokeStyle::Solid,
        }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn previous_color(&self) -> Color {
        self.previous_color
    }

    pub const fn eraser_active(&self) -> bool {
        self.eraser_active
    }

    pub const fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub const fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub const fn ink(&self) -> Ink {
        if self.eraser_active {
            Ink::Background
        } else {
            Ink::Color(self.color)
        }
    }

    /// Adopts a picked or chosen color as both the pen color and its backup.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.previous_color = color;
        self.eraser_active = false;
    }

    pub fn engage_eraser(&mut self) -> bool {
        if self.eraser_active {
            return false;
        }
        self.previous_color = self.color;
        self.eraser_active = true;
        true
    }

    pub fn restore_brush(&mut self) {
        self.color = self.previous_color;
        self.eraser_active = false;
    }

    pub fn set_brush_size(&mut self, brush_size: BrushSize) {
        self.brush_size = brush_size;
    }

    pub fn set_stroke_style(&mut self, stroke_style: StrokeStyle) {
        self.stroke_style = stroke_style;
    }
}

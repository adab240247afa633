//! Shared geometric and color primitives used by the paint core and the GTK front end.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The canvas pixel whose square contains the widget coordinate.
    pub fn from_widget(x: f64, y: f64) -> Self {
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Returns `None` unless both dimensions are positive.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    pub const fn contains(self, point: CanvasPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `#rgb`, with or without the leading `#`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => Some(Self::new(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => {
                let mut channels = [0_u8; 3];
                for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                    let nibble = u8::try_from(digit.to_digit(16)?).ok()?;
                    *slot = nibble * 17;
                }
                Some(Self::new(channels[0], channels[1], channels[2]))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_cairo_rgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Converts a floating point RGBA channel set, as produced by GTK color dialogs.
    pub fn from_unit_rgb(red: f32, green: f32, blue: f32) -> Self {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(red), channel(green), channel(blue))
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r, g, b)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}

/// Compile-time layout tokens; not user-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub control_radius: u16,
    pub control_height: i32,
    pub swatch_size: i32,
    pub border_width: u16,
    pub window_padding: i32,
    pub toast_duration_ms: u32,
    pub error_toast_duration_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    control_radius: 8,
    control_height: 32,
    swatch_size: 28,
    border_width: 1,
    window_padding: 48,
    toast_duration_ms: 2_000,
    error_toast_duration_ms: 6_000,
};

pub mod style;
pub mod widgets;

pub use style::{StyleTokens, LAYOUT_TOKENS};
pub use widgets::{toolbar_button, toolbar_dropdown, toolbar_toggle_button};

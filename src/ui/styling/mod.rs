//! Styling system for UI elements
//!
//! - [`colors`] - RGB565 constants and the tab palette
//! - [`layout`] - padding used as control insets

pub mod colors;
pub mod layout;

pub use colors::{
    COLOR_ACCENT, COLOR_BACKGROUND, COLOR_FOREGROUND, COLOR_RAISED, COLOR_STROKE, DARK_GRAY,
    GRAY, LIGHT_GRAY, TabPalette, WHITE, dimmed,
};
pub use layout::Padding;

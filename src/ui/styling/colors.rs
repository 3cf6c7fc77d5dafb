//! Color definitions and the tab-bar palette
//!
//! All colors are RGB565, the native format of the small SPI panels this
//! crate targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

// ============================================================================
// Base Colors
// ============================================================================

/// Primary background color - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Secondary background/surface color - slightly lighter than background
pub const COLOR_FOREGROUND: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Accent used for the pressed tab and the focus ring - bright teal-green
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Raised surface for the active tab
pub const COLOR_RAISED: Rgb565 = Rgb565::new(36 >> 3, 46 >> 2, 48 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray - for disabled or tertiary text
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray - for subtle text
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// Halve every channel; used to fade captions of a disabled control.
pub fn dimmed(color: Rgb565) -> Rgb565 {
    Rgb565::new(color.r() / 2, color.g() / 2, color.b() / 2)
}

// ============================================================================
// Tab Palette
// ============================================================================

/// Colors used to paint a tab bar.
///
/// Per-tab overrides set on the control take precedence over
/// `tab_background`; `active_tab` (when set) takes precedence over both for
/// the active tab only.
///
/// # Examples
///
/// ```ignore
/// let palette = TabPalette::default().with_active_tab(COLOR_RAISED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabPalette {
    /// Fill behind the whole control (the parent's background)
    pub background: Rgb565,

    /// Default fill of every tab
    pub tab_background: Rgb565,

    /// Fill of the active tab, if different from its normal color
    pub active_tab: Option<Rgb565>,

    /// Fill of a tab while it is pressed but not yet committed
    pub pressed: Option<Rgb565>,

    /// Caption text color
    pub caption: Rgb565,

    /// Caption text color of disabled tabs
    pub disabled_caption: Rgb565,

    /// Tab outlines and the client-area frame
    pub border: Rgb565,

    /// Arrow buttons shown when the strip overflows
    pub arrows: Rgb565,

    /// Keyboard focus ring around the active tab
    pub focus: Rgb565,
}

impl Default for TabPalette {
    /// Returns the default dark palette
    fn default() -> Self {
        Self::dark()
    }
}

impl TabPalette {
    /// Light captions on dark tabs
    pub fn dark() -> Self {
        Self {
            background: COLOR_BACKGROUND,
            tab_background: COLOR_FOREGROUND,
            active_tab: Some(COLOR_RAISED),
            pressed: Some(COLOR_ACCENT),
            caption: WHITE,
            disabled_caption: GRAY,
            border: COLOR_STROKE,
            arrows: LIGHT_GRAY,
            focus: COLOR_ACCENT,
        }
    }

    /// Dark captions on light tabs
    pub fn light() -> Self {
        Self {
            background: WHITE,
            tab_background: LIGHT_GRAY,
            active_tab: Some(WHITE),
            pressed: Some(COLOR_ACCENT),
            caption: COLOR_BACKGROUND,
            disabled_caption: GRAY,
            border: DARK_GRAY,
            arrows: DARK_GRAY,
            focus: COLOR_ACCENT,
        }
    }

    pub fn with_active_tab(mut self, color: Rgb565) -> Self {
        self.active_tab = Some(color);
        self
    }

    pub fn with_pressed(mut self, color: Rgb565) -> Self {
        self.pressed = Some(color);
        self
    }

    pub fn with_caption(mut self, color: Rgb565) -> Self {
        self.caption = color;
        self.arrows = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimmed_halves_channels() {
        assert_eq!(dimmed(WHITE), Rgb565::new(15, 31, 15));
        assert_eq!(dimmed(Rgb565::new(0, 0, 0)), Rgb565::new(0, 0, 0));
    }

    #[test]
    fn test_caption_override_also_colors_arrows() {
        let palette = TabPalette::light().with_caption(COLOR_ACCENT);
        assert_eq!(palette.caption, COLOR_ACCENT);
        assert_eq!(palette.arrows, COLOR_ACCENT);
        assert_eq!(palette.focus, COLOR_ACCENT);
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(TabPalette::default(), TabPalette::dark());
        assert_ne!(TabPalette::dark().background, TabPalette::light().background);
    }
}

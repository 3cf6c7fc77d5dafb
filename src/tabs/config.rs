//! Behaviour settings of a tab bar
//!
//! Everything here is plain data that can be persisted alongside the rest of
//! the host's settings. Colours are not part of it; see
//! [`TabPalette`](crate::ui::styling::TabPalette).

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::layout::{TabPosition, TabStyle};
use super::{TabError, TabResult};
use crate::ui::styling::Padding;

/// Default distance, in pixels, a tap may miss a tab by in flick mode
pub const DEFAULT_TOUCH_TOLERANCE: u32 = 8;

/// How inactive panes are handled
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Only the active pane is attached; arrows scroll an overflowing strip
    #[default]
    Paged,
    /// Every pane stays attached side by side and a horizontal drag pages
    /// between them
    Flick,
}

/// Border drawn around the client area
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Rect,
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBarConfig {
    pub position: TabPosition,
    pub style: TabStyle,
    pub layout_mode: LayoutMode,
    pub border: BorderStyle,
    /// Give every tab the same width
    pub all_same_width: bool,
    /// Room reserved in each tab for an icon
    pub extra_tab_height: u32,
    /// Show scroll arrows when the strip overflows (paged mode)
    pub show_arrows: bool,
    /// A flick may land on a disabled tab
    pub flick_into_disabled_tabs: bool,
    /// Arrow keys move between tabs and into the active pane
    pub keyboard_focus: bool,
    /// Ask the host for click feedback when a tab is tapped
    pub beep_on: bool,
    /// Tap slop in flick mode
    pub touch_tolerance: u32,
    /// Space between the control's bounds and its frame
    pub insets: Padding,
}

impl Default for TabBarConfig {
    fn default() -> Self {
        Self {
            position: TabPosition::Top,
            style: TabStyle::Classic,
            layout_mode: LayoutMode::Paged,
            border: BorderStyle::Rect,
            all_same_width: false,
            extra_tab_height: 0,
            show_arrows: true,
            flick_into_disabled_tabs: true,
            keyboard_focus: true,
            beep_on: false,
            touch_tolerance: DEFAULT_TOUCH_TOLERANCE,
            insets: Padding::default(),
        }
    }
}

impl TabBarConfig {
    /// Settings for finger-driven devices: panes flick, arrows are hidden
    pub fn touch() -> Self {
        Self {
            layout_mode: LayoutMode::Flick,
            show_arrows: false,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: TabPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_style(mut self, style: TabStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    pub fn is_flick(&self) -> bool {
        self.layout_mode == LayoutMode::Flick
    }

    /// Gap between the frame and the client area
    pub fn border_gap(&self) -> u32 {
        match (self.border, self.style) {
            (BorderStyle::None, _) | (_, TabStyle::Material) => 0,
            (BorderStyle::Rect, TabStyle::Classic) => 1,
        }
    }

    pub fn to_postcard(&self) -> TabResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(TabError::Config)
    }

    pub fn from_postcard(bytes: &[u8]) -> TabResult<Self> {
        postcard::from_bytes(bytes).map_err(TabError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TabBarConfig::default();
        assert!(config.show_arrows);
        assert!(config.flick_into_disabled_tabs);
        assert!(config.keyboard_focus);
        assert!(!config.is_flick());
        assert_eq!(config.border_gap(), 1);
    }

    #[test]
    fn test_material_and_borderless_have_no_gap() {
        let material = TabBarConfig::default().with_style(TabStyle::Material);
        assert_eq!(material.border_gap(), 0);

        let borderless = TabBarConfig {
            border: BorderStyle::None,
            ..TabBarConfig::default()
        };
        assert_eq!(borderless.border_gap(), 0);
    }

    #[test]
    fn test_postcard_persistence() {
        let config = TabBarConfig {
            beep_on: true,
            extra_tab_height: 12,
            insets: Padding::all(2),
            ..TabBarConfig::touch().with_position(TabPosition::Bottom)
        };
        let bytes = config.to_postcard().unwrap();
        let restored = TabBarConfig::from_postcard(&bytes).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_truncated_bytes_are_rejected() {
        let bytes = TabBarConfig::default().to_postcard().unwrap();
        let result = TabBarConfig::from_postcard(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(TabError::Config(_))));
    }
}

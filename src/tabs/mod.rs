//! Tab-bar control for small touch displays
//!
//! A [`TabBar`] shows a strip of text or image captions and switches between
//! one content pane per tab. It is split into small, separately testable
//! pieces:
//!
//! - [`caption`] - caption model and width/height measurement
//! - [`layout`] - selected/unselected tab rectangles and strip placement
//! - [`scroll`] - pane offset clamping and nearest-tab lookup
//! - [`flick`] - drag ownership, velocity tracking and settle animation
//! - [`focus`] - keyboard focus hand-off between strip and pane
//! - [`controller`] - the [`TabBar`] that composes the above
//! - [`config`] - serialisable behaviour settings
//! - [`render`] - painter for `embedded-graphics` draw targets
//!
//! Panes are never owned by the control: the host implements
//! [`PaneSurface`] and the control only asks it to attach, detach, move or
//! focus a pane identified by an opaque [`PaneHandle`].
//!
//! # Examples
//!
//! ```ignore
//! let mut bar = TabBar::<_, _, 4>::with_text(
//!     &["Home", "Trend", "Settings"],
//!     MonoFontMetrics::default(),
//!     surface,
//!     TabBarConfig::default(),
//! )?;
//! let update = bar.set_bounds(Rectangle::new(Point::zero(), Size::new(320, 240)));
//! if update.needs_redraw() {
//!     bar.draw(&mut display)?;
//! }
//! ```

use thiserror_no_std::Error;

use crate::ui::core::DirtyRegion;

pub mod caption;
pub mod config;
pub mod controller;
pub mod flick;
pub mod focus;
pub mod layout;
pub mod render;
pub mod scroll;

#[cfg(test)]
pub(crate) mod testing;

pub use caption::{Caption, CaptionMetrics, FontVariant, ImageRef, MonoFontMetrics};
pub use config::{BorderStyle, LayoutMode, TabBarConfig};
pub use controller::{PaneHandle, PaneSurface, Tab, TabBar};
pub use flick::{FlickGate, FlickPhase, FlickRecognizer, FlickStep, ScrollState};
pub use focus::{
    FocusEffect, FocusEvent, FocusMode, FocusStateMachine, GeoRoute, geographic_route, next_enabled,
};
pub use layout::{ArrowButtons, Layout, LayoutPolicy, LayoutWarning, TabMetrics, TabPosition, TabStyle};
pub use scroll::ScrollController;

/// Error types for tab-bar configuration
#[derive(Debug, Error)]
pub enum TabError {
    /// A tab bar needs at least one caption
    #[error("Tab bar has no captions")]
    NoTabs,

    /// More captions than the control was sized for
    #[error("Too many tabs (max: {max})")]
    TooManyTabs {
        /// Compile-time tab capacity
        max: usize,
    },

    /// Caption text does not fit the fixed-size caption buffer
    #[error("Caption {index} is longer than {max} bytes")]
    CaptionTooLong {
        /// Offending caption
        index: usize,
        /// Buffer capacity in bytes
        max: usize,
    },

    /// Text and image captions cannot be combined in one strip
    #[error("Captions mix text and images")]
    MixedCaptions,

    /// Replacement captions must keep the tab count
    #[error("Caption count mismatch (expected {expected}, got {actual})")]
    CaptionCountMismatch { expected: usize, actual: usize },

    /// One icon per tab is required
    #[error("Icon count mismatch (expected {expected}, got {actual})")]
    IconCountMismatch { expected: usize, actual: usize },

    /// Stored configuration could not be encoded or decoded
    #[error("Config encoding failed: {0:?}")]
    Config(postcard::Error),
}

/// Result type for tab-bar operations
pub type TabResult<T> = Result<T, TabError>;

/// Notification that the active tab changed in response to a call or input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChanged {
    /// Previously active tab
    pub from: usize,
    /// Newly active tab
    pub to: usize,
}

/// Focus movements the host must carry out on the control's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    /// Focus moved into the active pane's first traversable child
    Delegated,
    /// The strip took focus back from the pane
    Reclaimed,
    /// The control gave focus up to its parent
    Released,
}

/// Outcome of every mutating operation.
///
/// `dirty` is the explicit redraw signal; the host merges the regions it
/// receives during a frame and repaints once.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Update {
    /// Input event was claimed and must not be offered to an ancestor
    pub consumed: bool,
    /// Area that needs repainting
    pub dirty: Option<DirtyRegion>,
    /// Active tab changed (never set for the first activation)
    pub changed: Option<TabChanged>,
    /// Focus moved across the strip/pane boundary
    pub focus: Option<FocusSignal>,
    /// A tab was tapped and the host should play its click feedback
    pub feedback: bool,
}

impl Update {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty.is_some()
    }

    /// Fold a follow-up update into this one
    pub fn merge(self, other: Update) -> Update {
        Update {
            consumed: self.consumed || other.consumed,
            dirty: DirtyRegion::union(self.dirty, other.dirty),
            changed: other.changed.or(self.changed),
            focus: other.focus.or(self.focus),
            feedback: self.feedback || other.feedback,
        }
    }
}

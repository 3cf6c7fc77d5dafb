// src/ui/mod.rs
//! Shared UI plumbing for embedded displays
//!
//! - Core input, dirty-region and drawable types
//! - Styling (palette and insets)

pub mod core;
pub mod styling;

pub use core::{DirtyRegion, DragDirection, Drawable, InputEvent, Key, TouchPoint};
pub use styling::{Padding, TabPalette};

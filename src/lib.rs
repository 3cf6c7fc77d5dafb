//! Tab-bar control for small embedded displays
//!
//! `tabstrip` lays out a strip of tab captions, switches between host-owned
//! content panes, pages an overflowing strip with arrow buttons or a flick
//! gesture, and hands keyboard focus between the strip and the active pane.
//!
//! It is `#![no_std]` with `extern crate alloc` so it runs on the device and
//! on desktop hosts (the simulator and tests). Drawing goes through
//! `embedded-graphics`; everything else is plain state and geometry.

#![no_std]

extern crate alloc;

pub mod tabs;
pub mod ui;

pub use tabs::{
    Caption, FocusSignal, MonoFontMetrics, PaneHandle, PaneSurface, TabBar, TabBarConfig,
    TabChanged, TabError, TabResult, Update,
};
pub use ui::{Drawable, InputEvent, Key, TouchPoint};

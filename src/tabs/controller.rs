//! The tab-bar control
//!
//! [`TabBar`] owns the active index and composes layout, scrolling, flick
//! recognition and focus hand-off. Panes belong to the host and are reached
//! through [`PaneSurface`] by handle only.
//!
//! Geometry is kept relative to the control's top-left corner and converted
//! to display coordinates at the edges (pointer input, pane placement,
//! public rect getters).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::{debug, info, warn};

use super::caption::{Caption, CaptionMetrics, ImageRef, MAX_CAPTION_LEN};
use super::config::TabBarConfig;
use super::flick::{FlickGate, FlickRecognizer, FlickStep, ScrollState};
use super::focus::{
    FocusEffect, FocusEvent, FocusMode, FocusStateMachine, GeoRoute, geographic_route,
    next_enabled,
};
use super::layout::{
    self, ArrowButtons, Layout, LayoutPolicy, LayoutWarning, TabPosition, TabStyle,
};
use super::scroll::{ScrollController, strip_offset_for};
use super::{FocusSignal, TabChanged, TabError, TabResult, Update};
use crate::ui::core::{DirtyRegion, InputEvent, Key, TouchPoint};
use crate::ui::styling::TabPalette;

/// Opaque identifier of a host-owned pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneHandle(pub u32);

/// What the control needs from whoever owns the panes.
///
/// The control never looks inside a pane. It decides which panes are
/// mounted and where; the host does the mounting.
pub trait PaneSurface {
    /// Create a default pane for `tab`; called lazily the first time the
    /// tab's pane is needed and none was supplied with
    /// [`TabBar::set_pane`]
    fn create_pane(&mut self, tab: usize) -> PaneHandle;

    /// Mount `pane` with the given display bounds, or move an already
    /// mounted pane to them
    fn attach(&mut self, pane: PaneHandle, bounds: Rectangle);

    /// Unmount `pane`
    fn detach(&mut self, pane: PaneHandle);

    /// Move a mounted pane's top-left corner
    fn set_position(&mut self, pane: PaneHandle, position: Point);

    /// Focus the first (`forward`) or last traversable child of `pane`.
    /// Returns `false` when the pane has nothing to focus.
    fn request_focus_first_child(&mut self, pane: PaneHandle, forward: bool) -> bool;
}

/// One tab and its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub index: usize,
    pub caption: Caption,
    pub enabled: bool,
    /// Unplaced rectangle used while active
    pub selected_rect: Rectangle,
    /// Unplaced rectangle used while inactive
    pub unselected_rect: Rectangle,
    /// Fill overriding the palette's tab background
    pub back_color: Option<Rgb565>,
    /// Icon drawn next to a text caption
    pub icon: Option<ImageRef>,
    pane: Option<PaneHandle>,
}

impl Tab {
    pub fn pane(&self) -> Option<PaneHandle> {
        self.pane
    }
}

/// Tab strip plus one pane per tab.
///
/// `N` is the maximum number of tabs. Every mutating method returns an
/// [`Update`] describing what must be redrawn and what the host should be
/// told about.
pub struct TabBar<M, S, const N: usize> {
    metrics: M,
    surface: S,
    config: TabBarConfig,
    palette: TabPalette,
    tabs: Vec<Tab, N>,
    layout: Layout<N>,
    /// Placed tab rectangles before the strip offset
    rects: Vec<Rectangle, N>,
    /// Horizontal shift of the strip keeping the active tab visible
    strip_offset: i32,
    /// Display bounds
    bounds: Rectangle,
    /// Client area relative to `bounds`
    client: Rectangle,
    laid_out: bool,
    active: Option<usize>,
    last_active: Option<usize>,
    scroll: ScrollController,
    flick: FlickRecognizer,
    focus: FocusStateMachine,
    arrows: Option<ArrowButtons>,
    /// Tab tapped in material style, committed on release
    pressed: Option<usize>,
    control_enabled: bool,
    has_icons: bool,
}

impl<M: CaptionMetrics, S: PaneSurface, const N: usize> TabBar<M, S, N> {
    /// Create a tab bar from captions. The bar has no bounds yet; nothing is
    /// activated until [`set_bounds`](Self::set_bounds).
    pub fn new(captions: &[Caption], metrics: M, surface: S, config: TabBarConfig) -> TabResult<Self> {
        let policy = layout_policy(&config, 0, false);
        let layout = layout::compute_layout::<M, N>(captions, &metrics, &policy)?;

        let mut tabs = Vec::new();
        for (index, (caption, m)) in captions.iter().zip(layout.tabs.iter()).enumerate() {
            tabs.push(Tab {
                index,
                caption: caption.clone(),
                enabled: true,
                selected_rect: m.selected,
                unselected_rect: m.unselected,
                back_color: None,
                icon: None,
                pane: None,
            })
            .map_err(|_| TabError::TooManyTabs { max: N })?;
        }

        info!("Tab bar created with {} tabs ({:?})", tabs.len(), config.layout_mode);
        let count = tabs.len();
        Ok(Self {
            metrics,
            surface,
            config,
            palette: TabPalette::default(),
            tabs,
            layout,
            rects: Vec::new(),
            strip_offset: 0,
            bounds: Rectangle::zero(),
            client: Rectangle::zero(),
            laid_out: false,
            active: None,
            last_active: None,
            scroll: ScrollController::new(count, 0),
            flick: FlickRecognizer::new(),
            focus: FocusStateMachine::new(),
            arrows: None,
            pressed: None,
            control_enabled: true,
            has_icons: false,
        })
    }

    /// Create a tab bar with text captions
    pub fn with_text(texts: &[&str], metrics: M, surface: S, config: TabBarConfig) -> TabResult<Self> {
        if texts.len() > N {
            return Err(TabError::TooManyTabs { max: N });
        }
        let mut captions: Vec<Caption, N> = Vec::new();
        for (index, text) in texts.iter().enumerate() {
            let caption = Caption::text(text).ok_or(TabError::CaptionTooLong {
                index,
                max: MAX_CAPTION_LEN,
            })?;
            captions
                .push(caption)
                .map_err(|_| TabError::TooManyTabs { max: N })?;
        }
        Self::new(&captions, metrics, surface, config)
    }

    pub fn with_palette(mut self, palette: TabPalette) -> Self {
        self.palette = palette;
        self
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Place the control. Re-measures the tabs, recomputes the client
    /// area, mounts panes and activates the first enabled tab if none is
    /// active yet.
    pub fn set_bounds(&mut self, bounds: Rectangle) -> Update {
        self.bounds = bounds;
        self.laid_out = true;
        self.relayout();
        self.client = self.compute_client();
        self.scroll.configure(
            self.tabs.len(),
            bounds.size.width,
            self.preferred_width(),
        );

        if self.config.is_flick() {
            if let Some(active) = self.active {
                self.scroll.snap_to(active);
            }
            for i in 0..self.tabs.len() {
                let pane = self.pane_for(i);
                let pane_bounds = self.pane_bounds(i);
                self.surface.attach(pane, pane_bounds);
            }
        } else if let Some(active) = self.active {
            let pane = self.pane_for(active);
            let client = self.client_rect();
            self.surface.attach(pane, client);
        }

        let mut update = Update {
            dirty: self.dirty_all(),
            ..Update::none()
        };
        if self.active.is_none() {
            let first = next_enabled(None, true, &self.disabled_flags());
            update = update.merge(self.set_active_tab(first));
        }
        self.place();
        update
    }

    /// Preferred width: every tab at its inactive width, the active one at
    /// its active width, plus insets
    pub fn preferred_width(&self) -> u32 {
        self.layout
            .preferred_width(self.active, self.config.insets.horizontal())
    }

    /// Height of the strip plus insets. Pane heights are up to the host.
    pub fn preferred_height(&self) -> u32 {
        self.layout.tab_height + self.config.insets.vertical()
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Display area given to panes (strip and borders excluded)
    pub fn client_rect(&self) -> Rectangle {
        Rectangle::new(self.bounds.top_left + self.client.top_left, self.client.size)
    }

    /// Display rectangle of tab `index` as currently placed
    pub fn tab_rect(&self, index: usize) -> Option<Rectangle> {
        self.rects
            .get(index)
            .map(|r| r.translate(self.bounds.top_left + Point::new(self.strip_offset, 0)))
    }

    /// Display x beyond which captions are hidden by the arrow buttons
    pub fn caption_limit_x(&self) -> i32 {
        self.bounds.top_left.x + self.arrow_x()
    }

    pub fn tab_height(&self) -> u32 {
        self.layout.tab_height
    }

    /// Edge length icons should be drawn at, when icons fit
    pub fn icon_size(&self) -> Option<u32> {
        self.layout.icon_size
    }

    pub fn layout_warning(&self) -> Option<LayoutWarning> {
        self.layout.warning
    }

    /// Visible scroll arrows in display coordinates
    pub fn arrows(&self) -> Option<ArrowButtons> {
        self.arrows.map(|a| ArrowButtons {
            left: a.left.translate(self.bounds.top_left),
            right: a.right.translate(self.bounds.top_left),
            ..a
        })
    }

    pub fn must_scroll(&self) -> bool {
        self.scroll.must_scroll()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.flick.state(&self.scroll)
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Make `index` the active tab.
    ///
    /// Ignored when out of range or already active. Emits [`TabChanged`]
    /// for every activation except the first.
    pub fn set_active_tab(&mut self, index: usize) -> Update {
        if index >= self.tabs.len() || self.active == Some(index) {
            return Update::none();
        }
        let previous = self.active;
        let flick = self.config.is_flick();

        if !flick && self.laid_out {
            if let Some(pane) = previous.and_then(|p| self.tabs[p].pane) {
                self.surface.detach(pane);
            }
            let pane = self.pane_for(index);
            let client = self.client_rect();
            self.surface.attach(pane, client);
        }

        self.last_active = previous;
        self.active = Some(index);
        self.pressed = None;

        if flick {
            self.scroll.snap_to(index);
            self.flick.reset();
            self.position_panes();
        }
        self.place();

        debug!("Tab {} activated (previous: {:?})", index, previous);
        Update {
            dirty: self.dirty_all(),
            changed: previous.map(|from| TabChanged { from, to: index }),
            ..Update::none()
        }
    }

    pub fn active_tab(&self) -> Option<usize> {
        self.active
    }

    pub fn last_active_tab(&self) -> Option<usize> {
        self.last_active
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Enable or disable one tab. Disabling the active tab moves to the
    /// next enabled one; when none is left the active tab stays put.
    pub fn set_enabled(&mut self, index: usize, on: bool) -> Update {
        let Some(tab) = self.tabs.get_mut(index) else {
            return Update::none();
        };
        if tab.enabled == on {
            return Update::none();
        }
        tab.enabled = on;

        let mut update = Update {
            dirty: self.dirty_all(),
            ..Update::none()
        };
        if !on && self.active == Some(index) {
            let next = next_enabled(Some(index), true, &self.disabled_flags());
            update = update.merge(self.set_active_tab(next));
        }
        if self.all_disabled() {
            debug!("Every tab is disabled; tabs stay interactive");
        }
        update
    }

    /// Stored enabled flag of tab `index` (`false` when out of range)
    pub fn is_enabled(&self, index: usize) -> bool {
        self.tabs.get(index).is_some_and(|t| t.enabled)
    }

    /// Replace the pane of tab `index`, remounting it if it is showing
    pub fn set_pane(&mut self, index: usize, pane: PaneHandle) -> Update {
        let Some(tab) = self.tabs.get_mut(index) else {
            return Update::none();
        };
        let old = tab.pane.replace(pane);
        let mounted = self.laid_out && (self.config.is_flick() || self.active == Some(index));
        if !mounted {
            return Update::none();
        }
        if let Some(old) = old {
            self.surface.detach(old);
        }
        let pane_bounds = self.pane_bounds(index);
        self.surface.attach(pane, pane_bounds);
        debug!("Pane of tab {} replaced", index);
        Update {
            dirty: Some(DirtyRegion::new(self.client_rect())),
            ..Update::none()
        }
    }

    /// Show one icon per tab next to text captions
    pub fn set_icons(&mut self, icons: &[ImageRef]) -> TabResult<Update> {
        if icons.len() != self.tabs.len() {
            return Err(TabError::IconCountMismatch {
                expected: self.tabs.len(),
                actual: icons.len(),
            });
        }
        for (tab, icon) in self.tabs.iter_mut().zip(icons.iter()) {
            tab.icon = Some(*icon);
        }
        self.has_icons = true;
        self.relayout();
        self.place();
        Ok(Update {
            dirty: self.dirty_all(),
            ..Update::none()
        })
    }

    /// Replace every caption. The tab count cannot change.
    pub fn set_captions(&mut self, captions: &[Caption]) -> TabResult<Update> {
        if captions.len() != self.tabs.len() {
            return Err(TabError::CaptionCountMismatch {
                expected: self.tabs.len(),
                actual: captions.len(),
            });
        }
        layout::validate_captions::<N>(captions)?;
        for (tab, caption) in self.tabs.iter_mut().zip(captions.iter()) {
            tab.caption = caption.clone();
        }
        self.relayout();
        self.client = self.compute_client();
        self.place();
        Ok(Update {
            dirty: self.dirty_all(),
            ..Update::none()
        })
    }

    /// Enable or disable the whole control. A disabled control ignores
    /// input and greys out its captions.
    pub fn set_control_enabled(&mut self, on: bool) -> Update {
        if self.control_enabled == on {
            return Update::none();
        }
        self.control_enabled = on;
        self.pressed = None;
        if !on && self.flick.cancel(&mut self.scroll) {
            self.position_panes();
        }
        if let Some(arrows) = self.arrows.as_mut() {
            arrows.update_enabled(self.active, self.tabs.len(), on);
        }
        Update {
            dirty: self.dirty_all(),
            ..Update::none()
        }
    }

    pub fn is_control_enabled(&self) -> bool {
        self.control_enabled
    }

    /// Override the fill of one tab; `None` restores the palette colour
    pub fn set_tab_color(&mut self, index: usize, color: Option<Rgb565>) -> Update {
        let Some(tab) = self.tabs.get_mut(index) else {
            return Update::none();
        };
        tab.back_color = color;
        Update {
            dirty: self.dirty_all(),
            ..Update::none()
        }
    }

    /// Fill of tab `index`
    pub fn tab_color(&self, index: usize) -> Option<Rgb565> {
        self.tabs
            .get(index)
            .map(|t| t.back_color.unwrap_or(self.palette.tab_background))
    }

    pub fn palette(&self) -> &TabPalette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: TabPalette) -> Update {
        self.palette = palette;
        Update {
            dirty: self.dirty_all(),
            ..Update::none()
        }
    }

    pub fn config(&self) -> &TabBarConfig {
        &self.config
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tab pressed in material style and waiting for the pointer to lift
    pub fn pressed_tab(&self) -> Option<usize> {
        self.pressed
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Route one input event
    pub fn handle_event(&mut self, event: InputEvent) -> Update {
        if !self.control_enabled {
            return Update::none();
        }
        match event {
            InputEvent::PointerDown(point) => self.pointer_down(point),
            InputEvent::PointerDrag { delta, at_ms, .. } => self.pointer_drag(delta, at_ms),
            InputEvent::PointerUp(_) => self.pointer_up(),
            InputEvent::PointerCancel => self.cancel_gesture(),
            InputEvent::KeySpecial(key) => self.focus_event(FocusEvent::Key(key)),
            InputEvent::KeyAction => self.focus_event(FocusEvent::Action),
            InputEvent::FocusIn => self.focus_event(FocusEvent::FocusIn),
        }
    }

    /// Advance the flick settle animation by `dt_ms`
    pub fn tick(&mut self, dt_ms: u32) -> Update {
        match self.flick.tick(dt_ms, &mut self.scroll) {
            FlickStep::Idle => Update::none(),
            FlickStep::Moving => {
                self.position_panes();
                Update {
                    dirty: Some(DirtyRegion::new(self.client_rect())),
                    ..Update::none()
                }
            }
            FlickStep::Settled(target) => {
                self.position_panes();
                debug!("Flick settled on tab {}", target);
                let moved = Update {
                    dirty: Some(DirtyRegion::new(self.client_rect())),
                    ..Update::none()
                };
                moved.merge(self.set_active_tab(target))
            }
        }
    }

    /// An ancestor took over the pointer: drop any uncommitted scrolling
    pub fn cancel_gesture(&mut self) -> Update {
        let had_press = self.pressed.take().is_some();
        let moved = self.flick.cancel(&mut self.scroll);
        if moved {
            self.position_panes();
        }
        if moved || had_press {
            Update {
                dirty: self.dirty_all(),
                ..Update::none()
            }
        } else {
            Update::none()
        }
    }

    /// The active pane's focus traversal ran past its last child
    pub fn content_focus_exhausted(&mut self) -> Update {
        self.focus_event(FocusEvent::BoundaryReached)
    }

    pub fn focus_mode(&self) -> FocusMode {
        self.focus.mode()
    }

    /// Where a directional key should take focus when the window navigates
    /// spatially and this control has focus
    pub fn focus_route(&self, key: Key) -> GeoRoute {
        geographic_route(
            key,
            self.config.position,
            self.active.unwrap_or(0),
            self.tabs.len(),
        )
    }

    fn pointer_down(&mut self, at: TouchPoint) -> Update {
        let p = at.to_point() - self.bounds.top_left;
        self.pressed = None;
        if self.config.is_flick() {
            let in_strip = self.in_strip_band(p);
            self.flick.start(in_strip, &mut self.scroll);
        }

        if let Some(arrows) = self.arrows {
            let forward = if arrows.left_enabled && arrows.left.contains(p) {
                Some(false)
            } else if arrows.right_enabled && arrows.right.contains(p) {
                Some(true)
            } else {
                None
            };
            if let Some(forward) = forward {
                let next = next_enabled(self.active, forward, &self.blocked_flags());
                let mut update = self.set_active_tab(next);
                update.consumed = true;
                return update;
            }
        }

        if p.x >= self.arrow_x() {
            return Update::none();
        }
        let hit = if self.config.is_flick() {
            self.nearest_tab_rect(p)
        } else if self.in_strip_band(p) {
            (0..self.rects.len())
                .rev()
                .find(|&i| self.strip_rect(i).contains(p))
        } else {
            None
        };

        let Some(index) = hit else {
            return Update::none();
        };
        if self.active == Some(index) || self.is_blocked(index) {
            return Update::consumed();
        }

        let tap = Update {
            consumed: true,
            feedback: self.config.beep_on,
            ..Update::none()
        };
        match self.config.style {
            TabStyle::Classic => tap.merge(self.set_active_tab(index)),
            TabStyle::Material => {
                self.pressed = Some(index);
                Update {
                    dirty: self.strip_dirty(),
                    ..tap
                }
            }
        }
    }

    fn pointer_drag(&mut self, delta: Point, at_ms: u64) -> Update {
        if !self.config.is_flick() {
            return Update::none();
        }
        let Some(active) = self.active else {
            return Update::none();
        };
        let blocked = self.blocked_flags();
        let gate = FlickGate {
            active,
            blocked: &blocked,
            into_disabled: self.config.flick_into_disabled_tabs,
        };
        if !self.flick.sample(delta, at_ms, &mut self.scroll, gate) {
            return Update::none();
        }
        let had_press = self.pressed.take().is_some();
        self.position_panes();
        Update {
            consumed: true,
            dirty: if had_press {
                self.dirty_all()
            } else {
                Some(DirtyRegion::new(self.client_rect()))
            },
            ..Update::none()
        }
    }

    fn pointer_up(&mut self) -> Update {
        let dragging = self.flick.is_dragging();
        let mut update = match self.pressed.take() {
            Some(index) if !dragging => self.set_active_tab(index),
            _ => Update::none(),
        };
        if self.config.is_flick() && self.flick.end(&self.scroll).is_some() {
            update.consumed = true;
            update = update.merge(Update {
                dirty: Some(DirtyRegion::new(self.client_rect())),
                ..Update::none()
            });
        }
        update
    }

    fn focus_event(&mut self, event: FocusEvent) -> Update {
        if !self.config.keyboard_focus {
            return Update::none();
        }
        let before = self.focus.mode();
        let mut update = match self.focus.handle(event, self.config.position) {
            FocusEffect::None => Update::none(),
            FocusEffect::ChangeTab { forward } => {
                let next = next_enabled(self.active, forward, &self.blocked_flags());
                Update::consumed().merge(self.set_active_tab(next))
            }
            FocusEffect::EnterContent { forward } => self.enter_content(forward),
            FocusEffect::ReclaimStrip => Update {
                focus: Some(FocusSignal::Reclaimed),
                ..Update::consumed()
            },
            FocusEffect::ReleaseFocus => Update {
                focus: Some(FocusSignal::Released),
                ..Update::consumed()
            },
        };
        if self.focus.mode() != before {
            update = update.merge(Update {
                dirty: self.strip_dirty(),
                ..Update::none()
            });
        }
        update
    }

    fn enter_content(&mut self, forward: bool) -> Update {
        let Some(active) = self.active else {
            self.focus.abort_enter();
            return Update::none();
        };
        let pane = self.pane_for(active);
        if self.surface.request_focus_first_child(pane, forward) {
            Update {
                focus: Some(FocusSignal::Delegated),
                ..Update::consumed()
            }
        } else {
            debug!("Pane of tab {} has nothing to focus", active);
            self.focus.abort_enter();
            Update::consumed()
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn relayout(&mut self) {
        let mut captions: Vec<Caption, N> = Vec::new();
        for tab in &self.tabs {
            // Same length as `tabs`, which shares the capacity.
            let _ = captions.push(tab.caption.clone());
        }
        let policy = layout_policy(&self.config, self.bounds.size.width, self.has_icons);
        match layout::compute_layout::<M, N>(&captions, &self.metrics, &policy) {
            Ok(layout) => {
                for (tab, m) in self.tabs.iter_mut().zip(layout.tabs.iter()) {
                    tab.selected_rect = m.selected;
                    tab.unselected_rect = m.unselected;
                }
                self.layout = layout;
            }
            Err(e) => warn!("Tab layout kept: {}", e),
        }
    }

    /// Place tab rectangles, arrows and the strip offset for the active tab
    fn place(&mut self) {
        self.rects = layout::place_tabs(
            &self.layout,
            self.active,
            self.config.position,
            self.bounds.size.height,
        );
        self.scroll.set_preferred_width(self.preferred_width());

        self.arrows = if self.laid_out && self.config.show_arrows && self.scroll.must_scroll() {
            let mut arrows = ArrowButtons::new(
                self.bounds.size,
                self.layout.tab_height,
                self.layout.font_height,
                self.config.position,
                self.config.is_flick(),
            );
            arrows.update_enabled(self.active, self.tabs.len(), self.control_enabled);
            Some(arrows)
        } else {
            None
        };

        // Keep the active tab in view, left of the arrows when they show
        self.strip_offset = match self.active {
            Some(active) if self.laid_out && self.scroll.must_scroll() => {
                let limit_x = match self.arrows {
                    Some(arrows) => arrows.limit_x(),
                    None => self.bounds.size.width as i32 - 1,
                };
                let mut widths: Vec<u32, N> = Vec::new();
                for t in &self.layout.tabs {
                    let _ = widths.push(t.unselected.size.width);
                }
                let peek = (7 * self.layout.font_height / 11) as i32;
                strip_offset_for(active, &self.rects, &widths, limit_x, peek)
            }
            _ => 0,
        };
    }

    fn compute_client(&self) -> Rectangle {
        let gap = self.config.border_gap();
        let insets = self.config.insets;
        let tab_height = self.layout.tab_height;
        let x = insets.left + gap;
        let y = match self.config.position {
            TabPosition::Top => tab_height + insets.top,
            TabPosition::Bottom => gap + insets.top,
        };
        let width = self
            .bounds
            .size
            .width
            .saturating_sub(insets.horizontal() + 2 * gap);
        let height = self
            .bounds
            .size
            .height
            .saturating_sub(insets.vertical() + 2 * gap + tab_height);
        Rectangle::new(Point::new(x as i32, y as i32), Size::new(width, height))
    }

    /// Display bounds of pane `index` at the current scroll offset
    fn pane_bounds(&self, index: usize) -> Rectangle {
        let client = self.client_rect();
        if self.config.is_flick() {
            client.translate(Point::new(self.scroll.pane_x(index), 0))
        } else {
            client
        }
    }

    fn pane_for(&mut self, index: usize) -> PaneHandle {
        let tab = &mut self.tabs[index];
        match tab.pane {
            Some(pane) => pane,
            None => {
                let pane = self.surface.create_pane(index);
                debug!("Created pane {:?} for tab {}", pane, index);
                tab.pane = Some(pane);
                pane
            }
        }
    }

    /// Move every resident pane to the current offset in one pass
    fn position_panes(&mut self) {
        if !self.config.is_flick() || !self.laid_out {
            return;
        }
        for i in 0..self.tabs.len() {
            let pane = self.pane_for(i);
            let at = self.pane_bounds(i).top_left;
            self.surface.set_position(pane, at);
        }
    }

    fn strip_rect(&self, index: usize) -> Rectangle {
        self.rects[index].translate(Point::new(self.strip_offset, 0))
    }

    fn strip_top(&self) -> i32 {
        match self.config.position {
            TabPosition::Top => 0,
            TabPosition::Bottom => {
                self.bounds.size.height as i32 - self.layout.tab_height as i32
            }
        }
    }

    fn in_strip_band(&self, p: Point) -> bool {
        let top = self.strip_top();
        p.y >= top && p.y < top + self.layout.tab_height as i32
    }

    /// Closest tab within the touch tolerance; ties go to the lower index
    fn nearest_tab_rect(&self, p: Point) -> Option<usize> {
        let mut best = self.config.touch_tolerance;
        let mut hit = None;
        for i in (0..self.rects.len()).rev() {
            if let Some(d) = rounded_distance(p, &self.strip_rect(i), best) {
                if d <= best {
                    best = d;
                    hit = Some(i);
                }
            }
        }
        hit
    }

    fn arrow_x(&self) -> i32 {
        self.arrows
            .map(|a| a.limit_x())
            .unwrap_or(self.bounds.size.width as i32)
    }

    fn dirty_all(&self) -> Option<DirtyRegion> {
        Some(DirtyRegion::new(self.bounds))
    }

    fn strip_dirty(&self) -> Option<DirtyRegion> {
        Some(DirtyRegion::new(Rectangle::new(
            self.bounds.top_left + Point::new(0, self.strip_top()),
            Size::new(self.bounds.size.width, self.layout.tab_height),
        )))
    }

    fn disabled_flags(&self) -> Vec<bool, N> {
        let mut flags = Vec::new();
        for tab in &self.tabs {
            let _ = flags.push(!tab.enabled);
        }
        flags
    }

    fn all_disabled(&self) -> bool {
        self.tabs.iter().all(|t| !t.enabled)
    }

    /// Disabled flags as seen by interaction: while every tab is disabled
    /// nothing is blocked
    fn blocked_flags(&self) -> Vec<bool, N> {
        if self.all_disabled() {
            let mut flags = Vec::new();
            for _ in &self.tabs {
                let _ = flags.push(false);
            }
            flags
        } else {
            self.disabled_flags()
        }
    }

    fn is_blocked(&self, index: usize) -> bool {
        !self.tabs[index].enabled && !self.all_disabled()
    }
}

fn layout_policy(config: &TabBarConfig, available_width: u32, has_icons: bool) -> LayoutPolicy {
    LayoutPolicy {
        all_same_width: config.all_same_width,
        extra_tab_height: config.extra_tab_height,
        has_icons,
        position: config.position,
        style: config.style,
        available_width,
        extra_width: config.insets.horizontal(),
    }
}

/// Distance from `p` to the nearest point of `r`, rounded to the closest
/// pixel. `None` when it is certainly larger than `limit`.
fn rounded_distance(p: Point, r: &Rectangle, limit: u32) -> Option<u32> {
    let right = r.top_left.x + r.size.width as i32;
    let bottom = r.top_left.y + r.size.height as i32;
    let dx = (r.top_left.x - p.x).max(p.x - right).max(0) as u64;
    let dy = (r.top_left.y - p.y).max(p.y - bottom).max(0) as u64;
    let squared = dx * dx + dy * dy;
    let limit = limit as u64 + 1;
    if squared > limit * limit {
        return None;
    }
    let mut d = 0u64;
    while (d + 1) * (d + 1) <= squared {
        d += 1;
    }
    // round half up: sqrt(s) >= d + 0.5  <=>  s > d^2 + d
    if squared > d * d + d {
        d += 1;
    }
    Some(d as u32)
}

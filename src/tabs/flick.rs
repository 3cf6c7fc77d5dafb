//! Flick gesture recognition
//!
//! Turns pointer drag samples into horizontal pane scrolling and, once the
//! finger lifts, animates the panes onto the nearest tab. The recognizer is
//! a cooperative state machine: the host feeds it samples from its event
//! loop and calls [`FlickRecognizer::tick`] from its animation timer.
//!
//! ```text
//! Idle --(horizontal sample accepted)--> Dragging --(end)--> Settling --(arrived)--> Idle
//!   ^                                       |                   |
//!   +------------------(cancel)-------------+-------------------+
//! ```

use embedded_graphics::prelude::Point;
use log::debug;

use super::scroll::ScrollController;
use crate::ui::core::DragDirection;

/// Assumed frame time for the very first velocity sample (ms)
const FIRST_SAMPLE_INTERVAL_MS: f32 = 16.0;
/// Samples further apart than this do not contribute to velocity (ms)
const STALE_SAMPLE_MS: u64 = 500;
/// Weight of the newest sample in the velocity moving average
const VELOCITY_SMOOTHING: f32 = 0.3;
/// Velocity kept per settle tick
const SETTLE_FRICTION: f32 = 0.9;
/// Settling never moves slower than this (px/ms)
const MIN_SETTLE_SPEED: f32 = 0.5;

/// Phase of the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickPhase {
    Idle,
    Dragging,
    /// Animating toward the pane of `target`
    Settling { target: usize },
}

/// Result of advancing the settle animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickStep {
    /// Nothing is animating
    Idle,
    /// The offset moved; panes need repositioning
    Moving,
    /// The panes reached `target`'s pane; the host should activate it
    Settled(usize),
}

/// Snapshot of the scroll gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: i32,
    pub is_dragging: bool,
    pub settle_target: Option<usize>,
    /// Smoothed horizontal finger velocity in px/ms
    pub velocity: f32,
}

/// Everything the recognizer needs to know about the tabs to decide
/// whether a drag may page into the neighbouring tab.
#[derive(Debug, Clone, Copy)]
pub struct FlickGate<'a> {
    pub active: usize,
    /// Per tab: true when the tab currently refuses interaction
    pub blocked: &'a [bool],
    /// Allow paging into disabled tabs
    pub into_disabled: bool,
}

impl FlickGate<'_> {
    fn allows(&self, direction: DragDirection, aligned: bool) -> bool {
        // Mid-flick the panes are between tabs: let the drag continue.
        if !aligned {
            return true;
        }
        let count = self.blocked.len();
        let neighbour = match direction {
            DragDirection::Left if self.active > 0 => self.active - 1,
            DragDirection::Right if self.active + 1 < count => self.active + 1,
            _ => return false,
        };
        self.into_disabled || !self.blocked[neighbour]
    }
}

/// Drag/settle state machine for paging between resident panes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlickRecognizer {
    phase: FlickPhase,
    /// Gesture started inside the tab strip's vertical band
    in_strip: bool,
    velocity: f32,
    last_sample_ms: Option<u64>,
}

impl Default for FlickRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FlickRecognizer {
    pub fn new() -> Self {
        Self {
            phase: FlickPhase::Idle,
            in_strip: false,
            velocity: 0.0,
            last_sample_ms: None,
        }
    }

    pub fn phase(&self) -> FlickPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == FlickPhase::Dragging
    }

    pub fn started_in_strip(&self) -> bool {
        self.in_strip
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn state(&self, scroll: &ScrollController) -> ScrollState {
        ScrollState {
            offset: scroll.offset(),
            is_dragging: self.is_dragging(),
            settle_target: match self.phase {
                FlickPhase::Settling { target } => Some(target),
                _ => None,
            },
            velocity: self.velocity,
        }
    }

    /// Pointer went down. Interrupts any running settle animation.
    ///
    /// The rollback point is only moved while the panes are aligned on a
    /// tab; an interrupted settle keeps the last aligned offset.
    pub fn start(&mut self, in_strip: bool, scroll: &mut ScrollController) {
        self.reset();
        self.in_strip = in_strip;
        if scroll.nearest_tab(true).is_some() {
            scroll.begin_gesture();
        }
    }

    /// Forget the current gesture without touching the offset
    pub fn reset(&mut self) {
        self.phase = FlickPhase::Idle;
        self.velocity = 0.0;
        self.last_sample_ms = None;
    }

    /// Feed one drag sample. Returns `true` when the sample was consumed
    /// by pane scrolling and must not reach an ancestor.
    pub fn sample(
        &mut self,
        delta: Point,
        at_ms: u64,
        scroll: &mut ScrollController,
        gate: FlickGate<'_>,
    ) -> bool {
        self.track_velocity(delta.x, at_ms);

        match self.phase {
            FlickPhase::Dragging => {
                scroll.scroll_by(-delta.x);
                true
            }
            FlickPhase::Settling { .. } => false,
            FlickPhase::Idle => {
                let Some(direction) = DragDirection::from_delta(delta) else {
                    return false;
                };
                if !direction.is_horizontal() || !scroll.must_scroll() {
                    return false;
                }
                let aligned = scroll.nearest_tab(true).is_some();
                if !gate.allows(direction.inverse(), aligned) {
                    return false;
                }
                debug!("Flick drag started (dx = {})", delta.x);
                self.phase = FlickPhase::Dragging;
                scroll.scroll_by(-delta.x);
                true
            }
        }
    }

    /// Pointer lifted. Unless the panes already sit exactly on a tab
    /// (and no drag was in progress), starts settling toward the nearest
    /// tab and returns it.
    pub fn end(&mut self, scroll: &ScrollController) -> Option<usize> {
        if self.phase != FlickPhase::Dragging && scroll.nearest_tab(true).is_some() {
            self.phase = FlickPhase::Idle;
            return None;
        }
        match scroll.nearest_tab(false) {
            Some(target) => {
                debug!("Flick settling on tab {}", target);
                self.phase = FlickPhase::Settling { target };
                Some(target)
            }
            None => {
                self.phase = FlickPhase::Idle;
                None
            }
        }
    }

    /// Advance the settle animation by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: u32, scroll: &mut ScrollController) -> FlickStep {
        let FlickPhase::Settling { target } = self.phase else {
            return FlickStep::Idle;
        };

        let goal = scroll.offset_for(target);
        let remaining = goal - scroll.offset();
        let speed = abs_f32(self.velocity).max(MIN_SETTLE_SPEED);
        let step = ((speed * dt_ms as f32) as i32).max(1);

        if remaining.abs() <= step {
            scroll.snap_to(target);
            self.phase = FlickPhase::Idle;
            self.velocity = 0.0;
            return FlickStep::Settled(target);
        }

        scroll.set_offset(scroll.offset() + step * remaining.signum());
        self.velocity *= SETTLE_FRICTION;
        FlickStep::Moving
    }

    /// An ancestor claimed the pointer stream: roll back to the committed
    /// offset. Returns whether the offset changed.
    pub fn cancel(&mut self, scroll: &mut ScrollController) -> bool {
        let was_active = self.phase != FlickPhase::Idle;
        self.reset();
        if was_active {
            debug!("Flick gesture cancelled");
        }
        scroll.cancel_gesture()
    }

    fn track_velocity(&mut self, dx: i32, at_ms: u64) {
        match self.last_sample_ms {
            Some(last) => {
                let dt = at_ms.saturating_sub(last);
                if dt > 0 && dt < STALE_SAMPLE_MS {
                    let instant = dx as f32 / dt as f32;
                    self.velocity =
                        self.velocity * (1.0 - VELOCITY_SMOOTHING) + instant * VELOCITY_SMOOTHING;
                }
            }
            None => self.velocity = dx as f32 / FIRST_SAMPLE_INTERVAL_MS,
        }
        self.last_sample_ms = Some(at_ms);
    }
}

fn abs_f32(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

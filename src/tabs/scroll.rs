//! Horizontal pane scrolling
//!
//! In flick mode every pane is resident and laid out side by side, one
//! viewport width apart. The controller owns the shared horizontal offset:
//! pane `i` has its left edge at `offset + i * stride` relative to the client
//! area. The offset lives in `[min_offset, 0]`.

/// Horizontal offset of the pane row plus the rules for moving it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollController {
    /// Current offset of pane 0 relative to the client area
    offset: i32,
    /// Offset restored when a gesture is cancelled
    committed: i32,
    /// Distance between consecutive pane left edges
    stride: u32,
    /// Visible width
    viewport_width: u32,
    pane_count: usize,
    /// Preferred width of the tab strip, for the must-scroll predicate
    preferred_width: u32,
}

impl ScrollController {
    pub fn new(pane_count: usize, viewport_width: u32) -> Self {
        Self {
            offset: 0,
            committed: 0,
            stride: viewport_width,
            viewport_width,
            pane_count,
            preferred_width: 0,
        }
    }

    /// Update dimensions after a resize or re-layout and re-clamp
    pub fn configure(&mut self, pane_count: usize, viewport_width: u32, preferred_width: u32) {
        self.pane_count = pane_count;
        self.viewport_width = viewport_width;
        self.stride = viewport_width;
        self.preferred_width = preferred_width;
        self.offset = self.clamp(self.offset);
        self.committed = self.clamp(self.committed);
    }

    pub fn set_preferred_width(&mut self, preferred_width: u32) {
        self.preferred_width = preferred_width;
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Smallest (most negative) valid offset
    pub fn min_offset(&self) -> i32 {
        let total = self.stride as i64 * self.pane_count as i64;
        let overflow = (total - self.viewport_width as i64).max(0);
        -(overflow as i32)
    }

    /// Largest valid offset; content never scrolls past its start
    pub fn max_offset(&self) -> i32 {
        0
    }

    pub fn clamp(&self, offset: i32) -> i32 {
        offset.clamp(self.min_offset(), self.max_offset())
    }

    /// More than one tab and the strip does not fit the viewport
    pub fn must_scroll(&self) -> bool {
        self.pane_count > 1 && self.preferred_width > self.viewport_width
    }

    /// Scroll the content by `delta` pixels; positive values advance toward
    /// later tabs (the offset decreases).
    ///
    /// Deltas that would leave the valid range are clamped. Returns the new
    /// offset and whether it changed. Inert unless [`must_scroll`] holds.
    ///
    /// [`must_scroll`]: Self::must_scroll
    pub fn scroll_by(&mut self, delta: i32) -> (i32, bool) {
        if !self.must_scroll() {
            return (self.offset, false);
        }
        let old = self.offset;
        self.offset = self.clamp(old.saturating_sub(delta));
        (self.offset, self.offset != old)
    }

    /// Move straight to a given offset (clamped)
    pub fn set_offset(&mut self, offset: i32) -> bool {
        let old = self.offset;
        self.offset = self.clamp(offset);
        self.offset != old
    }

    /// Offset at which `tab`'s pane is aligned with the client area
    pub fn offset_for(&self, tab: usize) -> i32 {
        self.clamp(-((tab as i64 * self.stride as i64) as i32))
    }

    /// Align `tab`'s pane and commit the result
    pub fn snap_to(&mut self, tab: usize) {
        self.offset = self.offset_for(tab);
        self.committed = self.offset;
    }

    /// Left edge of pane `i` relative to the client area
    pub fn pane_x(&self, i: usize) -> i32 {
        self.offset + (i as i64 * self.stride as i64) as i32
    }

    /// Tab whose pane is closest to the client area's left edge.
    ///
    /// With `exact` only a pane aligned to the pixel counts. Candidates
    /// further than one stride away are ignored; ties go to the lower index.
    pub fn nearest_tab(&self, exact: bool) -> Option<usize> {
        let mut best_distance = self.stride as i64;
        let mut best = None;
        for i in 0..self.pane_count {
            let distance = (self.pane_x(i) as i64).abs();
            if distance < best_distance {
                best_distance = distance;
                best = Some(i);
            }
        }
        if exact && best_distance != 0 {
            None
        } else {
            best
        }
    }

    /// Remember the current offset as the rollback point of a gesture
    pub fn begin_gesture(&mut self) {
        self.committed = self.offset;
    }

    /// Accept the current offset
    pub fn commit(&mut self) {
        self.committed = self.offset;
    }

    /// Drop any uncommitted movement. Returns whether the offset changed.
    pub fn cancel_gesture(&mut self) -> bool {
        let moved = self.offset != self.committed;
        self.offset = self.committed;
        moved
    }
}

/// Horizontal shift that brings tab `tab` of the strip into view when the
/// strip is wider than the space left of the arrow buttons.
///
/// `rects` are the placed, unshifted tab rectangles. A sliver of the
/// previous tab (`peek` pixels) stays visible; the strip is then pulled back
/// so its right end meets `limit_x` when it would otherwise leave a gap, or
/// when the last tab is requested.
pub fn strip_offset_for(
    tab: usize,
    rects: &[embedded_graphics::primitives::Rectangle],
    unselected_widths: &[u32],
    limit_x: i32,
    peek: i32,
) -> i32 {
    let count = rects.len();
    if count < 2 || tab >= count {
        return 0;
    }
    let mut offset = if tab == 0 {
        0
    } else {
        let mut x = peek;
        for w in unselected_widths.iter().take(tab) {
            x -= *w as i32 - 1;
        }
        x
    };

    let last = &rects[count - 1];
    let last_right = last.top_left.x + last.size.width as i32 - 1 + offset;
    if last_right < limit_x || tab == count - 1 {
        offset += limit_x - last_right;
    }
    offset
}

// src/ui/core.rs
//! Core UI traits and types shared by every control

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Special (non-character) keys the controls react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Key::Up | Key::Down)
    }
}

/// Normalized input delivered by the host's event loop.
///
/// This is a closed set: controls match on it exhaustively instead of
/// probing event types at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at an absolute display position
    PointerDown(TouchPoint),
    /// Pointer moved while pressed. `delta` is the movement since the
    /// previous sample, `at_ms` a monotonic timestamp in milliseconds.
    PointerDrag {
        point: TouchPoint,
        delta: Point,
        at_ms: u64,
    },
    /// Pointer released
    PointerUp(TouchPoint),
    /// An ancestor claimed the pointer stream mid-gesture
    PointerCancel,
    /// Directional key press
    KeySpecial(Key),
    /// Action/confirm key press
    KeyAction,
    /// The control received input focus
    FocusIn,
}

/// Direction of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    Left,
    Right,
    Up,
    Down,
}

impl DragDirection {
    /// Dominant direction of a movement delta, `None` for a zero delta.
    ///
    /// Horizontal wins only when `|dx| > |dy|`.
    pub fn from_delta(delta: Point) -> Option<Self> {
        if delta.x == 0 && delta.y == 0 {
            return None;
        }
        if delta.x.abs() > delta.y.abs() {
            Some(if delta.x < 0 {
                DragDirection::Left
            } else {
                DragDirection::Right
            })
        } else {
            Some(if delta.y < 0 {
                DragDirection::Up
            } else {
                DragDirection::Down
            })
        }
    }

    /// The direction the content travels when the finger drags this way
    pub fn inverse(&self) -> Self {
        match self {
            DragDirection::Left => DragDirection::Right,
            DragDirection::Right => DragDirection::Left,
            DragDirection::Up => DragDirection::Down,
            DragDirection::Down => DragDirection::Up,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, DragDirection::Left | DragDirection::Right)
    }
}

/// Area of the display that must be repainted after a state change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    /// Grow this region to the bounding box of itself and `other`
    pub fn expand_to_include(&mut self, other: Rectangle) {
        let min_x = self.bounds.top_left.x.min(other.top_left.x);
        let min_y = self.bounds.top_left.y.min(other.top_left.y);

        let max_x = (self.bounds.top_left.x + self.bounds.size.width as i32)
            .max(other.top_left.x + other.size.width as i32);
        let max_y = (self.bounds.top_left.y + self.bounds.size.height as i32)
            .max(other.top_left.y + other.size.height as i32);

        self.bounds = Rectangle::new(
            Point::new(min_x, min_y),
            Size::new((max_x - min_x) as u32, (max_y - min_y) as u32),
        );
    }

    /// Combine two optional regions into the smallest region covering both
    pub fn union(a: Option<DirtyRegion>, b: Option<DirtyRegion>) -> Option<DirtyRegion> {
        match (a, b) {
            (Some(mut a), Some(b)) => {
                a.expand_to_include(b.bounds);
                Some(a)
            }
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Trait for any UI element that can paint itself.
///
/// Redraw bookkeeping is not part of this trait: mutating operations return
/// their dirty region and the host's render loop aggregates them.
pub trait Drawable {
    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_direction_prefers_vertical_on_tie() {
        assert_eq!(
            DragDirection::from_delta(Point::new(5, -5)),
            Some(DragDirection::Up)
        );
        assert_eq!(
            DragDirection::from_delta(Point::new(-6, 5)),
            Some(DragDirection::Left)
        );
        assert_eq!(DragDirection::from_delta(Point::zero()), None);
    }

    #[test]
    fn test_inverse_direction() {
        assert_eq!(DragDirection::Left.inverse(), DragDirection::Right);
        assert_eq!(DragDirection::Down.inverse(), DragDirection::Up);
    }

    #[test]
    fn test_dirty_union_covers_both() {
        let a = DirtyRegion::new(Rectangle::new(Point::new(0, 0), Size::new(10, 10)));
        let b = DirtyRegion::new(Rectangle::new(Point::new(20, 5), Size::new(10, 10)));

        let merged = DirtyRegion::union(Some(a), Some(b)).unwrap();
        assert_eq!(
            merged.bounds,
            Rectangle::new(Point::new(0, 0), Size::new(30, 15))
        );
        assert_eq!(DirtyRegion::union(None, Some(b)), Some(b));
        assert_eq!(DirtyRegion::union(None, None), None);
    }
}

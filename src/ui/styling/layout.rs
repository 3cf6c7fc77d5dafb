//! Spacing between a control's bounds and its contents

use serde::{Deserialize, Serialize};

/// Padding around an element (top, right, bottom, left), in pixels.
///
/// A tab bar uses it as its insets: the room left between the control's
/// bounds and the frame around the client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    /// Equal padding on all sides
    pub fn all(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// left + right
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let p = Padding {
            top: 1,
            right: 2,
            bottom: 3,
            left: 4,
        };
        assert_eq!(p.horizontal(), 6);
        assert_eq!(p.vertical(), 4);
        assert_eq!(Padding::all(3).horizontal(), 6);
        assert_eq!(Padding::default().vertical(), 0);
    }
}

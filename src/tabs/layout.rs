//! Tab geometry
//!
//! Each tab gets two rectangles: one for when it is active (wide enough for
//! the bold caption, full strip height) and one for when it is not. The
//! rectangles are computed once per font/caption/width change and then
//! placed side by side into a strip whose neighbours share one pixel column.
//!
//! All coordinates in this module are relative to the control's top-left
//! corner.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::warn;
use serde::{Deserialize, Serialize};

use super::caption::{Caption, CaptionMetrics, FontVariant};
use super::{TabError, TabResult};

/// Vertical padding added to the caption font height (classic style)
const CLASSIC_TAB_PADDING: u32 = 4;
/// Vertical padding added to the caption font height (material style)
const MATERIAL_TAB_PADDING: u32 = 8;
/// Vertical padding added to image captions
const IMAGE_TAB_PADDING: u32 = 4;
/// Horizontal padding of the active tab (classic style)
const CLASSIC_SELECTED_PADDING: u32 = 5;
/// Horizontal padding of inactive tabs (classic style)
const CLASSIC_UNSELECTED_PADDING: u32 = 4;
/// Horizontal padding of every tab (material style)
const MATERIAL_PADDING: u32 = 12;
/// Inactive classic tabs are this much shorter than the active one
const CLASSIC_UNSELECTED_DROP: u32 = 2;

/// Where the strip sits relative to the panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TabPosition {
    #[default]
    Top,
    Bottom,
}

/// Visual style, which decides paddings and whether bold metrics are used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TabStyle {
    /// Hatched tabs; the active caption is drawn bold and the active tab
    /// stands taller than its neighbours
    #[default]
    Classic,
    /// Flat tabs of equal height with no bold caption; taps commit on
    /// release
    Material,
}

/// Inputs of the layout computation that do not come from captions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPolicy {
    /// Give every tab the width of the widest one (or an equal share of
    /// the available width, whichever is larger)
    pub all_same_width: bool,
    /// Additional height reserved for icons drawn above/below text captions
    pub extra_tab_height: u32,
    /// Icons are overlaid on text captions
    pub has_icons: bool,
    pub position: TabPosition,
    pub style: TabStyle,
    /// Width of the control
    pub available_width: u32,
    /// Width consumed by insets and borders, excluded from the equal share
    pub extra_width: u32,
}

/// Non-fatal layout problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutWarning {
    /// Icons were set but no extra tab height reserves room for them; the
    /// icons keep their original size
    IconsWithoutExtraHeight,
}

/// Measured widths and unplaced rectangles of one tab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabMetrics {
    pub plain_width: u32,
    pub selected_width: u32,
    /// Rectangle used while the tab is active (x is always 0)
    pub selected: Rectangle,
    /// Rectangle used while the tab is inactive (x is always 0)
    pub unselected: Rectangle,
}

/// Result of [`compute_layout`]
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<const N: usize> {
    pub tabs: Vec<TabMetrics, N>,
    /// Height of the strip
    pub tab_height: u32,
    /// Plain caption font height
    pub font_height: u32,
    /// Edge length icons should be scaled to, when icons are in use and
    /// there is room for them
    pub icon_size: Option<u32>,
    pub warning: Option<LayoutWarning>,
}

impl<const N: usize> Layout<N> {
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Preferred strip width with `active` drawn at its selected width.
    ///
    /// Before the first activation the tab whose selected rectangle is
    /// widest stands in for the active one.
    pub fn preferred_width(&self, active: Option<usize>, extra_width: u32) -> u32 {
        if self.tabs.is_empty() {
            return extra_width;
        }
        let sum: u32 = self
            .tabs
            .iter()
            .map(|t| t.unselected.size.width.saturating_sub(1))
            .sum();

        let widest = active.filter(|&i| i < self.tabs.len()).unwrap_or_else(|| {
            let mut best = 0;
            for (i, t) in self.tabs.iter().enumerate() {
                if t.selected.size.width > self.tabs[best].selected.size.width {
                    best = i;
                }
            }
            best
        });
        let t = &self.tabs[widest];
        sum + (t.selected.size.width - t.unselected.size.width) + extra_width
    }
}

/// Check that captions can form one strip of at most `N` tabs.
pub fn validate_captions<const N: usize>(captions: &[Caption]) -> TabResult<()> {
    if captions.is_empty() {
        return Err(TabError::NoTabs);
    }
    if captions.len() > N {
        return Err(TabError::TooManyTabs { max: N });
    }
    let text = captions[0].is_text();
    if captions.iter().any(|c| c.is_text() != text) {
        return Err(TabError::MixedCaptions);
    }
    Ok(())
}

/// Measure captions and derive the selected/unselected rectangle of each tab.
pub fn compute_layout<M: CaptionMetrics + ?Sized, const N: usize>(
    captions: &[Caption],
    metrics: &M,
    policy: &LayoutPolicy,
) -> TabResult<Layout<N>> {
    validate_captions::<N>(captions)?;

    let count = captions.len() as u32;
    let is_text = captions[0].is_text();
    let material = policy.style == TabStyle::Material;
    let bold_metrics = is_text && !material && metrics.has_distinct_bold();
    let font_height = metrics.font_height(FontVariant::Plain);
    let overlay_icons = is_text && policy.has_icons;

    let tab_height = if is_text {
        match policy.style {
            TabStyle::Classic if overlay_icons => {
                font_height + CLASSIC_TAB_PADDING + policy.extra_tab_height
            }
            TabStyle::Classic => font_height + CLASSIC_TAB_PADDING,
            TabStyle::Material => font_height + MATERIAL_TAB_PADDING + policy.extra_tab_height,
        }
    } else {
        let tallest = captions
            .iter()
            .map(|c| match c {
                Caption::Image(img) => img.size.height,
                Caption::Text(_) => 0,
            })
            .max()
            .unwrap_or(0);
        tallest + IMAGE_TAB_PADDING
    };

    let mut plain: Vec<u32, N> = Vec::new();
    let mut bold: Vec<u32, N> = Vec::new();
    for caption in captions {
        let wp = caption.width(metrics, FontVariant::Plain);
        let wb = if bold_metrics {
            caption.width(metrics, FontVariant::Bold).max(wp)
        } else {
            wp
        };
        // Capacity was checked by validate_captions.
        plain.push(wp).ok();
        bold.push(wb).ok();
    }

    if policy.all_same_width {
        let medium = policy.available_width.saturating_sub(policy.extra_width) / count;
        let wp = plain.iter().copied().max().unwrap_or(0).max(medium);
        let wb = bold.iter().copied().max().unwrap_or(0).max(medium);
        plain.iter_mut().for_each(|w| *w = wp);
        bold.iter_mut().for_each(|w| *w = wb);
    }

    let mut tabs: Vec<TabMetrics, N> = Vec::new();
    for (&wp, &wb) in plain.iter().zip(bold.iter()) {
        let (selected, unselected) = match policy.style {
            TabStyle::Classic => {
                let drop = if policy.position == TabPosition::Top {
                    CLASSIC_UNSELECTED_DROP as i32
                } else {
                    0
                };
                (
                    Rectangle::new(
                        Point::zero(),
                        Size::new(wb + CLASSIC_SELECTED_PADDING, tab_height),
                    ),
                    Rectangle::new(
                        Point::new(0, drop),
                        Size::new(
                            wp + CLASSIC_UNSELECTED_PADDING,
                            tab_height.saturating_sub(CLASSIC_UNSELECTED_DROP),
                        ),
                    ),
                )
            }
            TabStyle::Material => {
                let width = wp + MATERIAL_PADDING;
                let selected = Rectangle::new(Point::zero(), Size::new(width, tab_height));
                // Without icons the inactive tabs give up the reserved band.
                let unselected = if is_text && !policy.has_icons {
                    let half = policy.extra_tab_height / 2;
                    let y = if policy.position == TabPosition::Top {
                        half as i32
                    } else {
                        0
                    };
                    Rectangle::new(
                        Point::new(0, y),
                        Size::new(width, tab_height.saturating_sub(half)),
                    )
                } else {
                    selected
                };
                (selected, unselected)
            }
        };
        tabs.push(TabMetrics {
            plain_width: wp,
            selected_width: wb,
            selected,
            unselected,
        })
        .ok();
    }

    let mut warning = None;
    let mut icon_size = None;
    if overlay_icons {
        if policy.extra_tab_height == 0 {
            warn!("Icons were set but extra_tab_height is 0; icons will not be resized");
            warning = Some(LayoutWarning::IconsWithoutExtraHeight);
        } else {
            icon_size = Some(policy.extra_tab_height.saturating_sub(font_height / 2));
        }
    }

    Ok(Layout {
        tabs,
        tab_height,
        font_height,
        icon_size,
        warning,
    })
}

/// Place tabs side by side, starting at x = 1.
///
/// The active tab uses its selected rectangle; neighbours overlap by one
/// pixel so their borders coincide. `control_height` positions the strip
/// for bottom tabs.
pub fn place_tabs<const N: usize>(
    layout: &Layout<N>,
    active: Option<usize>,
    position: TabPosition,
    control_height: u32,
) -> Vec<Rectangle, N> {
    let y0 = match position {
        TabPosition::Top => 0,
        TabPosition::Bottom => control_height as i32 - layout.tab_height as i32,
    };

    let mut rects = Vec::new();
    let mut x0 = 1;
    for (i, tab) in layout.tabs.iter().enumerate() {
        let r = if Some(i) == active {
            tab.selected
        } else {
            tab.unselected
        };
        rects
            .push(Rectangle::new(
                Point::new(x0, r.top_left.y + y0),
                r.size,
            ))
            .ok();
        x0 += r.size.width as i32 - 1;
    }
    rects
}

/// Geometry of the scroll arrows shown when the strip overflows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowButtons {
    pub left: Rectangle,
    pub right: Rectangle,
    pub left_enabled: bool,
    pub right_enabled: bool,
}

impl ArrowButtons {
    /// Compute arrow rectangles at the right end of the strip.
    ///
    /// `touch` enlarges the buttons for finger input.
    pub fn new(
        control_size: Size,
        tab_height: u32,
        font_height: u32,
        position: TabPosition,
        touch: bool,
    ) -> Self {
        let side = if touch {
            font_height * 3 / 4
        } else {
            (font_height / 2).max(tab_height / 4)
        };
        let width = if touch { side + font_height } else { side };
        let yy = ((tab_height + side) / 2) as i32;
        let y = match position {
            TabPosition::Top => tab_height as i32 - yy,
            TabPosition::Bottom => control_size.height as i32 - yy,
        };
        let right = Rectangle::new(
            Point::new(control_size.width as i32 - width as i32, y),
            Size::new(width, side),
        );
        let left = Rectangle::new(
            Point::new(right.top_left.x - 2 - width as i32, y),
            Size::new(width, side),
        );
        Self {
            left,
            right,
            left_enabled: false,
            right_enabled: false,
        }
    }

    /// Captions right of this x are hidden behind the arrows
    pub fn limit_x(&self) -> i32 {
        self.left.top_left.x - 2
    }

    /// Enable each arrow when there is a tab in its direction
    pub fn update_enabled(&mut self, active: Option<usize>, count: usize, control_enabled: bool) {
        let active = active.unwrap_or(0);
        self.left_enabled = control_enabled && active > 0;
        self.right_enabled = control_enabled && active + 1 < count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabs::testing::{FixedMetrics, text_captions};

    fn policy(width: u32) -> LayoutPolicy {
        LayoutPolicy {
            all_same_width: false,
            extra_tab_height: 0,
            has_icons: false,
            position: TabPosition::Top,
            style: TabStyle::Classic,
            available_width: width,
            extra_width: 0,
        }
    }

    #[test]
    fn test_classic_rects_use_bold_for_selected() {
        let captions = text_captions(&["Hi", "Tabs"]);
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &policy(200))
            .unwrap();

        // plain 6px/char, bold 7px/char, font height 10
        assert_eq!(layout.tab_height, 14);
        assert_eq!(layout.tabs[0].unselected.size, Size::new(16, 12));
        assert_eq!(layout.tabs[0].selected.size, Size::new(19, 14));
        assert_eq!(layout.tabs[1].unselected.top_left, Point::new(0, 2));
        for tab in &layout.tabs {
            assert!(tab.selected.size.width >= tab.unselected.size.width);
        }
    }

    #[test]
    fn test_same_width_uses_equal_share() {
        let captions = text_captions(&["Hi", "Longest Caption"]);
        let mut p = policy(200);
        p.all_same_width = true;
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &p).unwrap();

        let w0 = layout.tabs[0].unselected.size.width;
        let w1 = layout.tabs[1].unselected.size.width;
        assert_eq!(w0, w1, "all tabs must share one width");
        assert!(w0 >= 100, "equal share of 200px over 2 tabs");
        assert!(w0 >= 15 * 6, "must fit the longest caption");
    }

    #[test]
    fn test_material_ignores_bold() {
        let captions = text_captions(&["Hi", "Tabs"]);
        let mut p = policy(200);
        p.style = TabStyle::Material;
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &p).unwrap();

        assert_eq!(layout.tab_height, 18);
        assert_eq!(layout.tabs[1].selected_width, layout.tabs[1].plain_width);
        assert_eq!(layout.tabs[1].selected.size.width, 24 + 12);
    }

    #[test]
    fn test_icons_without_extra_height_warn() {
        let captions = text_captions(&["Hi", "Tabs"]);
        let mut p = policy(200);
        p.has_icons = true;
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &p).unwrap();
        assert_eq!(layout.warning, Some(LayoutWarning::IconsWithoutExtraHeight));
        assert_eq!(layout.icon_size, None);

        p.extra_tab_height = 16;
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &p).unwrap();
        assert_eq!(layout.warning, None);
        assert_eq!(layout.icon_size, Some(11));
        assert_eq!(layout.tab_height, 10 + 4 + 16);
    }

    #[test]
    fn test_validation_errors() {
        let metrics = FixedMetrics::default();
        assert!(matches!(
            compute_layout::<_, 4>(&[], &metrics, &policy(100)),
            Err(TabError::NoTabs)
        ));
        let captions = text_captions(&["a", "b", "c"]);
        assert!(matches!(
            compute_layout::<_, 2>(&captions, &metrics, &policy(100)),
            Err(TabError::TooManyTabs { max: 2 })
        ));
        let mixed = [
            Caption::text("a").unwrap(),
            Caption::image(crate::tabs::ImageRef::new(1, Size::new(8, 8))),
        ];
        assert!(matches!(
            compute_layout::<_, 4>(&mixed, &metrics, &policy(100)),
            Err(TabError::MixedCaptions)
        ));
    }

    #[test]
    fn test_image_captions_use_tallest_image() {
        let captions = [
            Caption::image(crate::tabs::ImageRef::new(1, Size::new(20, 12))),
            Caption::image(crate::tabs::ImageRef::new(2, Size::new(30, 16))),
        ];
        let layout =
            compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &policy(100)).unwrap();
        assert_eq!(layout.tab_height, 20);
        assert_eq!(layout.tabs[1].plain_width, 30);
    }

    #[test]
    fn test_placed_tabs_share_one_pixel() {
        let captions = text_captions(&["One", "Two", "Three"]);
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &policy(200))
            .unwrap();
        let rects = place_tabs(&layout, Some(1), TabPosition::Top, 100);

        assert_eq!(rects[0].top_left.x, 1);
        for pair in rects.windows(2) {
            let right_edge = pair[0].top_left.x + pair[0].size.width as i32 - 1;
            assert_eq!(right_edge, pair[1].top_left.x, "borders must coincide");
        }
        assert_eq!(rects[1].size, layout.tabs[1].selected.size);
    }

    #[test]
    fn test_bottom_tabs_sit_at_control_bottom() {
        let captions = text_captions(&["One", "Two"]);
        let mut p = policy(200);
        p.position = TabPosition::Bottom;
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &p).unwrap();
        let rects = place_tabs(&layout, Some(0), TabPosition::Bottom, 100);
        assert_eq!(rects[0].top_left.y, 100 - 14);
        assert_eq!(rects[1].top_left.y, 100 - 14, "no drop for bottom tabs");
    }

    #[test]
    fn test_preferred_width_matches_rects() {
        let captions = text_captions(&["Alpha", "Be", "Gamma"]);
        let layout = compute_layout::<_, 4>(&captions, &FixedMetrics::default(), &policy(200))
            .unwrap();
        for active in 0..3 {
            let expected: u32 = layout
                .tabs
                .iter()
                .map(|t| t.unselected.size.width - 1)
                .sum::<u32>()
                + layout.tabs[active].selected.size.width
                - layout.tabs[active].unselected.size.width;
            assert_eq!(layout.preferred_width(Some(active), 0), expected);
        }
        assert_eq!(
            layout.preferred_width(Some(0), 6),
            layout.preferred_width(Some(0), 0) + 6
        );
    }

    #[test]
    fn test_arrows_sit_left_of_each_other() {
        let mut arrows = ArrowButtons::new(Size::new(100, 80), 14, 10, TabPosition::Top, false);
        assert_eq!(arrows.right.top_left.x + arrows.right.size.width as i32, 100);
        assert!(arrows.left.top_left.x < arrows.right.top_left.x);
        assert_eq!(arrows.limit_x(), arrows.left.top_left.x - 2);

        arrows.update_enabled(Some(0), 3, true);
        assert!(!arrows.left_enabled);
        assert!(arrows.right_enabled);
        arrows.update_enabled(Some(2), 3, true);
        assert!(arrows.left_enabled && !arrows.right_enabled);
    }
}

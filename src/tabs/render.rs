//! Painter for `embedded-graphics` targets
//!
//! Draws the frame, the tabs with their text captions, the scroll arrows and
//! the keyboard focus ring. Image captions and icons are not drawn here: the
//! host owns image decoding and paints them into [`TabBar::tab_rect`].

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::caption::{Caption, FontVariant, MonoFontMetrics};
use super::config::BorderStyle;
use super::controller::{PaneSurface, TabBar};
use super::focus::FocusMode;
use super::layout::{TabPosition, TabStyle};
use crate::ui::core::Drawable;
use crate::ui::styling::dimmed;

/// Height of the underline marking the active tab in material style
const MATERIAL_UNDERLINE: u32 = 2;

impl<S: PaneSurface, const N: usize> Drawable for TabBar<MonoFontMetrics, S, N> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let Some(active) = self.active_tab() else {
            return Ok(());
        };
        let bounds = self.bounds();
        let palette = self.palette();
        let config = self.config();
        let tab_height = self.tab_height();
        let top = config.position == TabPosition::Top;

        bounds
            .into_styled(PrimitiveStyle::with_fill(palette.background))
            .draw(display)?;

        // Area behind the panes, overlapping the strip by one pixel
        let frame_y = if top { tab_height as i32 - 1 } else { 0 };
        let frame_height = bounds.size.height.saturating_sub(tab_height) + 1;
        let frame = Rectangle::new(
            bounds.top_left + Point::new(0, frame_y),
            Size::new(bounds.size.width, frame_height),
        );
        let pane_color = self.tab_color(active).unwrap_or(palette.tab_background);
        if config.style == TabStyle::Classic && config.border == BorderStyle::Rect {
            frame
                .into_styled(fill_and_stroke(pane_color, palette.border))
                .draw(display)?;
        } else {
            frame
                .into_styled(PrimitiveStyle::with_fill(pane_color))
                .draw(display)?;
            if config.style == TabStyle::Classic {
                let y = if top {
                    frame.top_left.y
                } else {
                    frame.top_left.y + frame.size.height as i32 - 1
                };
                Line::new(
                    Point::new(bounds.top_left.x, y),
                    Point::new(bounds.top_left.x + bounds.size.width as i32 - 1, y),
                )
                .into_styled(PrimitiveStyle::with_stroke(palette.border, 1))
                .draw(display)?;
            }
        }

        // Captions never run under the scroll arrows
        let limit = self.caption_limit_x();
        let clip = Rectangle::new(
            bounds.top_left,
            Size::new(
                (limit - bounds.top_left.x).max(0) as u32,
                bounds.size.height,
            ),
        );
        {
            let mut strip = display.clipped(&clip);
            for i in (0..self.tab_count()).filter(|&i| i != active) {
                self.draw_tab(&mut strip, i, false)?;
            }
            self.draw_tab(&mut strip, active, true)?;
        }

        if let Some(arrows) = self.arrows() {
            for (rect, enabled, left) in [
                (arrows.left, arrows.left_enabled, true),
                (arrows.right, arrows.right_enabled, false),
            ] {
                let color = if enabled && self.is_control_enabled() {
                    palette.arrows
                } else {
                    dimmed(palette.arrows)
                };
                arrow(rect, left)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(display)?;
            }
        }

        if config.keyboard_focus
            && self.focus_mode() == FocusMode::ChangingTabs
            && let Some(r) = self.tab_rect(active)
            && r.size.width > 2
            && r.size.height > 2
        {
            Rectangle::new(
                r.top_left + Point::new(1, 1),
                Size::new(r.size.width - 2, r.size.height - 2),
            )
            .into_styled(PrimitiveStyle::with_stroke(palette.focus, 1))
            .draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        TabBar::bounds(self)
    }
}

impl<S: PaneSurface, const N: usize> TabBar<MonoFontMetrics, S, N> {
    fn draw_tab<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        index: usize,
        is_active: bool,
    ) -> Result<(), D::Error> {
        let (Some(rect), Some(tab)) = (self.tab_rect(index), self.tabs().get(index)) else {
            return Ok(());
        };
        let palette = self.palette();
        let config = self.config();
        let base = self.tab_color(index).unwrap_or(palette.tab_background);
        let fill = if self.pressed_tab() == Some(index) {
            palette.pressed.unwrap_or(base)
        } else if is_active {
            palette.active_tab.unwrap_or(base)
        } else {
            base
        };

        match config.style {
            TabStyle::Classic => {
                rect.into_styled(fill_and_stroke(fill, palette.border))
                    .draw(display)?;
                if is_active && rect.size.width > 2 {
                    // open the active tab into the pane below (or above)
                    let y = match config.position {
                        TabPosition::Top => rect.top_left.y + rect.size.height as i32 - 1,
                        TabPosition::Bottom => rect.top_left.y,
                    };
                    let pane_color = self.tab_color(index).unwrap_or(palette.tab_background);
                    Line::new(
                        Point::new(rect.top_left.x + 1, y),
                        Point::new(rect.top_left.x + rect.size.width as i32 - 2, y),
                    )
                    .into_styled(PrimitiveStyle::with_stroke(pane_color, 1))
                    .draw(display)?;
                }
            }
            TabStyle::Material => {
                rect.into_styled(PrimitiveStyle::with_fill(fill))
                    .draw(display)?;
                if is_active {
                    let y = match config.position {
                        TabPosition::Top => {
                            rect.top_left.y + rect.size.height as i32 - MATERIAL_UNDERLINE as i32
                        }
                        TabPosition::Bottom => rect.top_left.y,
                    };
                    Rectangle::new(
                        Point::new(rect.top_left.x, y),
                        Size::new(rect.size.width, MATERIAL_UNDERLINE),
                    )
                    .into_styled(PrimitiveStyle::with_fill(palette.focus))
                    .draw(display)?;
                }
            }
        }

        let Caption::Text(text) = &tab.caption else {
            return Ok(());
        };
        let variant = if is_active && config.style == TabStyle::Classic {
            FontVariant::Bold
        } else {
            FontVariant::Plain
        };
        let color = if !self.is_control_enabled() {
            dimmed(palette.caption)
        } else if !tab.enabled {
            palette.disabled_caption
        } else {
            palette.caption
        };

        // With icons the caption sits in the band away from the panes' edge
        let mut anchor = rect.center();
        if let Some(icon) = self.icon_size() {
            let shift = (icon / 2) as i32;
            anchor.y += match config.position {
                TabPosition::Top => shift,
                TabPosition::Bottom => -shift,
            };
        }

        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let character_style = MonoTextStyle::new(self.metrics().font(variant), color);
        Text::with_text_style(text, anchor, character_style, text_style).draw(display)?;
        Ok(())
    }
}

fn fill_and_stroke(fill: Rgb565, stroke: Rgb565) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .fill_color(fill)
        .stroke_color(stroke)
        .stroke_width(1)
        .build()
}

/// Triangle filling `rect`, pointing left or right
fn arrow(rect: Rectangle, left: bool) -> Triangle {
    let x0 = rect.top_left.x;
    let x1 = rect.top_left.x + rect.size.width as i32 - 1;
    let y0 = rect.top_left.y;
    let y1 = rect.top_left.y + rect.size.height as i32 - 1;
    let mid = (y0 + y1) / 2;
    if left {
        Triangle::new(Point::new(x0, mid), Point::new(x1, y0), Point::new(x1, y1))
    } else {
        Triangle::new(Point::new(x1, mid), Point::new(x0, y0), Point::new(x0, y1))
    }
}

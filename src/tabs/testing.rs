//! Test doubles shared by the tab-bar unit tests

use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::caption::{Caption, CaptionMetrics, FontVariant};
use super::controller::{PaneHandle, PaneSurface};

/// Plain captions are 6 px per character, bold ones 7 px; lines are 10 px
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetrics;

impl CaptionMetrics for FixedMetrics {
    fn measure_text(&self, text: &str, variant: FontVariant) -> u32 {
        let per_char = match variant {
            FontVariant::Plain => 6,
            FontVariant::Bold => 7,
        };
        text.chars().count() as u32 * per_char
    }

    fn font_height(&self, _variant: FontVariant) -> u32 {
        10
    }
}

pub fn text_captions(texts: &[&str]) -> Vec<Caption> {
    texts
        .iter()
        .map(|t| Caption::text(t).expect("test caption fits"))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Create(usize),
    Attach(PaneHandle, Rectangle),
    Detach(PaneHandle),
    Position(PaneHandle, Point),
    Focus(PaneHandle, bool),
}

/// Pane surface that records every call it receives
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    /// Panes report a traversable child
    pub focusable: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            focusable: true,
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn attaches(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Attach(..)))
            .count()
    }

    pub fn detaches(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Detach(_)))
            .count()
    }

    /// Last position reported for `pane`
    pub fn position_of(&self, pane: PaneHandle) -> Option<Point> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Position(p, at) if *p == pane => Some(*at),
            SurfaceCall::Attach(p, bounds) if *p == pane => Some(bounds.top_left),
            _ => None,
        })
    }
}

impl PaneSurface for RecordingSurface {
    fn create_pane(&mut self, tab: usize) -> PaneHandle {
        self.calls.push(SurfaceCall::Create(tab));
        PaneHandle(100 + tab as u32)
    }

    fn attach(&mut self, pane: PaneHandle, bounds: Rectangle) {
        self.calls.push(SurfaceCall::Attach(pane, bounds));
    }

    fn detach(&mut self, pane: PaneHandle) {
        self.calls.push(SurfaceCall::Detach(pane));
    }

    fn set_position(&mut self, pane: PaneHandle, position: Point) {
        self.calls.push(SurfaceCall::Position(pane, position));
    }

    fn request_focus_first_child(&mut self, pane: PaneHandle, forward: bool) -> bool {
        self.calls.push(SurfaceCall::Focus(pane, forward));
        self.focusable
    }
}

/// In-memory Rgb565 display that counts the pixels written to it
pub struct TestDisplay {
    size: Size,
    pixels: Vec<Rgb565>,
    pub drawn: usize,
}

impl TestDisplay {
    pub fn new(size: Size, background: Rgb565) -> Self {
        Self {
            size,
            pixels: alloc::vec![background; (size.width * size.height) as usize],
            drawn: 0,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.size.width + x as u32) as usize])
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for TestDisplay {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.size.width && y < self.size.height {
                self.pixels[(y * self.size.width + x) as usize] = color;
                self.drawn += 1;
            }
        }
        Ok(())
    }
}

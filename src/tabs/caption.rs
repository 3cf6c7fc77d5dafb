//! Tab captions and their measurement
//!
//! A caption is either a short text label or a reference to an image the
//! host decodes and draws. The control only needs widths and heights, which
//! it obtains through [`CaptionMetrics`].

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13_BOLD};
use embedded_graphics::prelude::*;

/// Maximum caption length in bytes
pub const MAX_CAPTION_LEN: usize = 32;

/// Fixed-capacity caption text
pub type CaptionText = heapless::String<MAX_CAPTION_LEN>;

/// Reference to an image owned by the host.
///
/// The control never decodes or scales images; it only uses the size for
/// layout and hands the id back to the painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef {
    pub id: u16,
    pub size: Size,
}

impl ImageRef {
    pub fn new(id: u16, size: Size) -> Self {
        Self { id, size }
    }
}

/// Text or image shown inside a tab
#[derive(Debug, Clone, PartialEq)]
pub enum Caption {
    Text(CaptionText),
    Image(ImageRef),
}

impl Caption {
    /// Text caption, `None` if `text` exceeds [`MAX_CAPTION_LEN`]
    pub fn text(text: &str) -> Option<Self> {
        let mut s = CaptionText::new();
        s.push_str(text).ok()?;
        Some(Caption::Text(s))
    }

    pub fn image(image: ImageRef) -> Self {
        Caption::Image(image)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Caption::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Caption::Text(s) => Some(s.as_str()),
            Caption::Image(_) => None,
        }
    }

    /// Width of this caption drawn in the given variant
    pub fn width<M: CaptionMetrics + ?Sized>(&self, metrics: &M, variant: FontVariant) -> u32 {
        match self {
            Caption::Text(s) => metrics.measure_text(s, variant),
            Caption::Image(img) => img.size.width,
        }
    }
}

/// Font variant used to draw a caption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontVariant {
    /// Captions of inactive tabs
    Plain,
    /// Caption of the active tab
    Bold,
}

/// Source of caption measurements.
///
/// Implemented by whatever owns the fonts: the bundled
/// [`MonoFontMetrics`], or a host-provided proportional font engine.
pub trait CaptionMetrics {
    /// Pixel width of `text` in the given variant
    fn measure_text(&self, text: &str, variant: FontVariant) -> u32;

    /// Line height of the given variant
    fn font_height(&self, variant: FontVariant) -> u32;

    /// Whether the bold variant measures differently from the plain one.
    ///
    /// When `false` the layout uses plain widths for the selected tab too.
    fn has_distinct_bold(&self) -> bool {
        true
    }
}

/// Metrics for a plain/bold pair of `embedded-graphics` monospaced fonts
#[derive(Debug, Clone, Copy)]
pub struct MonoFontMetrics {
    pub plain: &'static MonoFont<'static>,
    pub bold: &'static MonoFont<'static>,
}

impl Default for MonoFontMetrics {
    fn default() -> Self {
        Self {
            plain: &FONT_6X10,
            bold: &FONT_7X13_BOLD,
        }
    }
}

impl MonoFontMetrics {
    pub fn new(plain: &'static MonoFont<'static>, bold: &'static MonoFont<'static>) -> Self {
        Self { plain, bold }
    }

    pub fn font(&self, variant: FontVariant) -> &'static MonoFont<'static> {
        match variant {
            FontVariant::Plain => self.plain,
            FontVariant::Bold => self.bold,
        }
    }
}

impl CaptionMetrics for MonoFontMetrics {
    fn measure_text(&self, text: &str, variant: FontVariant) -> u32 {
        let font = self.font(variant);
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0;
        }
        chars * font.character_size.width + (chars - 1) * font.character_spacing
    }

    fn font_height(&self, variant: FontVariant) -> u32 {
        self.font(variant).character_size.height
    }

    fn has_distinct_bold(&self) -> bool {
        !core::ptr::eq(self.plain, self.bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_width_counts_characters() {
        let metrics = MonoFontMetrics::default();
        assert_eq!(metrics.measure_text("", FontVariant::Plain), 0);
        assert_eq!(metrics.measure_text("Hi", FontVariant::Plain), 12);
        assert_eq!(metrics.measure_text("Hi", FontVariant::Bold), 14);
        assert_eq!(metrics.font_height(FontVariant::Plain), 10);
    }

    #[test]
    fn test_same_font_has_no_distinct_bold() {
        let metrics = MonoFontMetrics::new(&FONT_6X10, &FONT_6X10);
        assert!(!metrics.has_distinct_bold());
        assert!(MonoFontMetrics::default().has_distinct_bold());
    }

    #[test]
    fn test_caption_text_capacity() {
        assert!(Caption::text("Settings").is_some());
        let long = "0123456789012345678901234567890123";
        assert!(Caption::text(long).is_none(), "34 bytes must not fit");
    }

    #[test]
    fn test_image_caption_uses_image_width() {
        let metrics = MonoFontMetrics::default();
        let caption = Caption::image(ImageRef::new(3, Size::new(24, 16)));
        assert_eq!(caption.width(&metrics, FontVariant::Bold), 24);
        assert!(!caption.is_text());
    }
}

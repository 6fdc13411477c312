//! Backend-agnostic drawing surface for overlay layers.

use crate::{
    config::brand::TypeStyle,
    foundation::{core::Point, error::QuoteCardResult},
    render::raster::RasterBuffer,
};

/// Horizontal alignment of a text run relative to its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Origin is the left edge.
    Start,
    /// Origin is the horizontal centre.
    Middle,
    /// Origin is the right edge.
    End,
}

/// One single-line text run. `origin.y` is the baseline.
#[derive(Clone, Copy, Debug)]
pub struct TextDraw<'a> {
    /// Text to paint, unescaped.
    pub text: &'a str,
    /// Baseline origin in canvas px.
    pub origin: Point,
    /// Alignment around `origin.x`.
    pub anchor: TextAnchor,
    /// Font size in px.
    pub font_size: f64,
    /// Typeface and paint.
    pub style: &'a TypeStyle,
}

/// A pre-sized raster placed with its top-left corner at `(left, top)`.
#[derive(Clone, Copy, Debug)]
pub struct ImageDraw<'a> {
    /// Premultiplied image, already at its final size.
    pub image: &'a RasterBuffer,
    /// Left edge in canvas px (may be negative).
    pub left: i64,
    /// Top edge in canvas px (may be negative).
    pub top: i64,
}

/// Sink for overlay drawing commands. Later commands paint over earlier ones.
///
/// Backends may batch commands; errors can surface either from the call that triggers a flush or
/// from the backend's own finishing step.
pub trait DrawContext {
    /// Paint a text run.
    fn draw_text(&mut self, text: TextDraw<'_>) -> QuoteCardResult<()>;

    /// Paint an image.
    fn draw_image(&mut self, image: ImageDraw<'_>) -> QuoteCardResult<()>;
}

use serde::{Deserialize, Serialize};

use crate::{
    config::brand::BrandConstants,
    foundation::{
        core::{Canvas, Point},
        error::{QuoteCardError, QuoteCardResult},
    },
    layout::wrap::{CharCountMeasure, LineMeasure, WrapMetrics, wrap_words},
};

/// A quote to be stamped onto a background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Quote text. Must contain at least one non-whitespace character.
    pub text: String,
    /// Optional speaker, rendered below the quote.
    pub attribution: Option<String>,
    /// Target canvas.
    #[serde(default)]
    pub canvas: Canvas,
}

impl QuoteRequest {
    /// Create a request on the default canvas. Fails when `text` is blank.
    pub fn new(text: impl Into<String>) -> QuoteCardResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuoteCardError::validation("quote text must be non-empty"));
        }
        Ok(Self {
            text,
            attribution: None,
            canvas: Canvas::DEFAULT,
        })
    }

    /// Set the attribution; blank strings clear it.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        let attribution = attribution.into();
        self.attribution = (!attribution.trim().is_empty()).then_some(attribution);
        self
    }

    /// Set the canvas, substituting the default for zero dimensions.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Canvas::or_default(width, height);
        self
    }

    /// Set the canvas from a `WxH` string (see [`Canvas::parse_resolution`]).
    pub fn with_resolution(mut self, resolution: &str) -> Self {
        self.canvas = Canvas::parse_resolution(resolution);
        self
    }

    /// Lay this request out with the character-count wrapper.
    pub fn layout(&self, brand: &BrandConstants) -> LineLayout {
        compute_layout(self, brand, &mut CharCountMeasure)
    }
}

/// Attribution line placed below the quote block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributionLine {
    /// Display text: an em-dash, a space, then the uppercased attribution.
    pub text: String,
    /// Baseline y in px.
    pub baseline_y: f64,
}

/// Large decorative quotation glyph near the top-left of the text block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuoteMark {
    /// Glyph baseline origin.
    pub origin: Point,
    /// Font size in px.
    pub size: f64,
}

impl QuoteMark {
    /// The glyph painted for the mark.
    pub const GLYPH: &'static str = "\"";
}

/// Brand wordmark pinned to the top-left corner.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Wordmark {
    /// Text baseline origin.
    pub origin: Point,
    /// Font size in px.
    pub size: f64,
    /// Wordmark text.
    pub text: String,
}

/// Geometry for one quote card. Pure output of [`compute_layout`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineLayout {
    /// Canvas the geometry was computed for.
    pub canvas: Canvas,
    /// Wrapped quote lines in original casing.
    pub lines: Vec<String>,
    /// Character budget used by the heuristic wrapper.
    pub chars_per_line: usize,
    /// Available text width in px.
    pub max_text_width: f64,
    /// Quote font size in px.
    pub quote_font_size: f64,
    /// Attribution font size in px.
    pub attr_font_size: f64,
    /// Distance between consecutive quote baselines.
    pub line_height: f64,
    /// Baseline of the first quote line.
    pub block_start_y: f64,
    /// Horizontal padding in px.
    pub padding: f64,
    /// Present only when the request carried an attribution.
    pub attribution: Option<AttributionLine>,
    /// Decorative quote mark.
    pub quote_mark: QuoteMark,
    /// Brand wordmark.
    pub wordmark: Wordmark,
}

impl LineLayout {
    /// Baseline y of line `index`.
    pub fn line_baseline(&self, index: usize) -> f64 {
        self.block_start_y + (index as f64) * self.line_height
    }

    /// Height of the quote block (`lines * line_height`).
    pub fn total_text_height(&self) -> f64 {
        (self.lines.len() as f64) * self.line_height
    }

    /// Horizontal centre all quote and attribution lines are anchored on.
    pub fn center_x(&self) -> f64 {
        f64::from(self.canvas.width) / 2.0
    }
}

/// Compute the quote-card geometry for `request`.
///
/// All sizes scale with canvas width; only vertical centering uses the height. Zero dimensions are
/// replaced by [`Canvas::DEFAULT`].
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(width = request.canvas.width, height = request.canvas.height)
)]
pub fn compute_layout(
    request: &QuoteRequest,
    brand: &BrandConstants,
    measure: &mut dyn LineMeasure,
) -> LineLayout {
    let canvas = Canvas::or_default(request.canvas.width, request.canvas.height);
    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);

    let quote_font_size = (width * brand.quote_size_ratio).round().max(1.0);
    let attr_font_size = (width * brand.attr_size_ratio).round().max(1.0);
    let mark_size = (width * brand.mark_size_ratio).round().max(1.0);
    let padding = (width * brand.padding_ratio).round();
    let max_text_width = (width - 2.0 * padding).max(1.0);

    let chars_per_line =
        ((max_text_width / (quote_font_size * brand.char_width_ratio)).floor() as usize).max(1);
    let metrics = WrapMetrics {
        chars_per_line,
        max_width_px: max_text_width,
        font_size: quote_font_size,
    };
    let lines = wrap_words(&request.text, &metrics, measure);

    let line_height = quote_font_size * brand.line_height_ratio;
    let total_text_height = (lines.len() as f64) * line_height;
    let block_start_y = (height - total_text_height) / 2.0 + quote_font_size;

    let attribution = request
        .attribution
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| AttributionLine {
            text: format!("\u{2014} {}", a.to_uppercase()),
            baseline_y: block_start_y + total_text_height + attr_font_size * brand.attr_gap_ratio,
        });

    let quote_mark = QuoteMark {
        origin: Point::new(
            padding * brand.mark_x_ratio,
            block_start_y - line_height * brand.mark_rise_ratio,
        ),
        size: mark_size,
    };
    let wordmark = Wordmark {
        origin: Point::new(padding, padding * brand.wordmark_y_ratio),
        size: brand.wordmark_size,
        text: brand.wordmark_text.clone(),
    };

    tracing::debug!(
        lines = lines.len(),
        chars_per_line,
        quote_font_size,
        "computed quote layout"
    );

    LineLayout {
        canvas,
        lines,
        chars_per_line,
        max_text_width,
        quote_font_size,
        attr_font_size,
        line_height,
        block_start_y,
        padding,
        attribution,
        quote_mark,
        wordmark,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;

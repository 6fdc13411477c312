use std::borrow::Cow;

use crate::{
    foundation::error::{QuoteCardError, QuoteCardResult},
    layout::wrap::{LineMeasure, WrapMetrics},
};

/// Shaping-based [`LineMeasure`]: lays the candidate out with Parley using the brand font and
/// compares its advance width against [`WrapMetrics::max_width_px`].
pub struct ParleyMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    letter_spacing: f32,
}

impl std::fmt::Debug for ParleyMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasure")
            .field("family_name", &self.family_name)
            .field("letter_spacing", &self.letter_spacing)
            .finish()
    }
}

impl ParleyMeasure {
    /// Register `font_bytes` and measure with the first family they contain.
    pub fn new(font_bytes: &[u8], letter_spacing: f32) -> QuoteCardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            QuoteCardError::config("no font families registered from brand font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| QuoteCardError::config("registered brand font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            letter_spacing,
        })
    }

    /// Family name the measure shapes with.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Unconstrained advance width of `text` at `size_px`.
    pub fn advance_width(&mut self, text: &str, size_px: f32) -> f32 {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            self.letter_spacing,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.width()
    }
}

impl LineMeasure for ParleyMeasure {
    fn fits(&mut self, candidate: &str, metrics: &WrapMetrics) -> bool {
        let width = self.advance_width(candidate, metrics.font_size as f32);
        f64::from(width) <= metrics.max_width_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;

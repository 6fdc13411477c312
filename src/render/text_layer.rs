use std::borrow::Cow;

use crate::{
    config::brand::BrandConstants,
    foundation::{core::Point, error::QuoteCardResult},
    layout::engine::{LineLayout, QuoteMark},
    render::draw::{DrawContext, TextAnchor, TextDraw},
};

/// Paint every text element of `layout`, bottom to top: quote mark, quote lines, attribution,
/// wordmark.
pub fn paint_text_layer(
    ctx: &mut dyn DrawContext,
    layout: &LineLayout,
    brand: &BrandConstants,
) -> QuoteCardResult<()> {
    ctx.draw_text(TextDraw {
        text: QuoteMark::GLYPH,
        origin: layout.quote_mark.origin,
        anchor: TextAnchor::Start,
        font_size: layout.quote_mark.size,
        style: &brand.mark_style,
    })?;

    let center_x = layout.center_x();
    for (i, line) in layout.lines.iter().enumerate() {
        let shown: Cow<'_, str> = if brand.lowercase_quote {
            Cow::Owned(line.to_lowercase())
        } else {
            Cow::Borrowed(line)
        };
        ctx.draw_text(TextDraw {
            text: &shown,
            origin: Point::new(center_x, layout.line_baseline(i)),
            anchor: TextAnchor::Middle,
            font_size: layout.quote_font_size,
            style: &brand.quote_style,
        })?;
    }

    if let Some(attr) = &layout.attribution {
        ctx.draw_text(TextDraw {
            text: &attr.text,
            origin: Point::new(center_x, attr.baseline_y),
            anchor: TextAnchor::Middle,
            font_size: layout.attr_font_size,
            style: &brand.attribution_style,
        })?;
    }

    ctx.draw_text(TextDraw {
        text: &layout.wordmark.text,
        origin: layout.wordmark.origin,
        anchor: TextAnchor::Start,
        font_size: layout.wordmark.size,
        style: &brand.wordmark_style,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/text_layer.rs"]
mod tests;

//! SVG-markup drawing backend.
//!
//! Text runs are serialized as `<text>` elements, batched, and rasterized with `resvg` whenever an
//! image has to be painted on top of them or the context is finished.

use std::{borrow::Cow, fmt::Write as _};

use crate::{
    foundation::{
        core::Canvas,
        error::{QuoteCardError, QuoteCardResult},
    },
    render::{
        blend::{over_at, over_in_place},
        context::RenderContext,
        draw::{DrawContext, ImageDraw, TextAnchor, TextDraw},
        raster::RasterBuffer,
    },
};

const ESCAPES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

/// Escape the five XML-reserved characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for ch in s.chars() {
        match ESCAPES.iter().find(|(c, _)| *c == ch) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape_xml`]. Other entities are left untouched.
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ESCAPES.iter().find(|(_, entity)| rest.starts_with(entity)) {
            Some((ch, entity)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Serialize one text run as an SVG `<text>` element.
pub fn text_element(text: &TextDraw<'_>) -> String {
    let anchor = match text.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let style = text.style;
    let mut el = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        el,
        r#"<text x="{x}" y="{y}" text-anchor="{anchor}" font-family="{family}" font-weight="{weight}" font-size="{size}" fill="{fill}" opacity="{opacity}""#,
        x = text.origin.x,
        y = text.origin.y,
        family = escape_xml(&style.font_family),
        weight = style.font_weight,
        size = text.font_size,
        fill = style.fill.rgb_hex(),
        opacity = style.effective_opacity(),
    );
    if style.letter_spacing != 0.0 {
        let _ = write!(el, r#" letter-spacing="{}""#, style.letter_spacing);
    }
    let _ = write!(el, ">{}</text>", escape_xml(text.text));
    el
}

/// Wrap element markup in a canvas-sized SVG document.
pub fn svg_document(canvas: Canvas, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
        w = canvas.width,
        h = canvas.height,
    )
}

/// [`DrawContext`] that paints onto `target` through SVG markup.
pub struct SvgDrawContext<'a> {
    target: &'a mut RasterBuffer,
    render_ctx: &'a RenderContext,
    pending: String,
    pending_text: String,
}

impl<'a> SvgDrawContext<'a> {
    /// Start painting onto `target`.
    pub fn new(target: &'a mut RasterBuffer, render_ctx: &'a RenderContext) -> Self {
        Self {
            target,
            render_ctx,
            pending: String::new(),
            pending_text: String::new(),
        }
    }

    /// Markup queued since the last flush.
    pub fn pending_markup(&self) -> &str {
        &self.pending
    }

    /// Rasterize anything still queued.
    pub fn finish(mut self) -> QuoteCardResult<()> {
        self.flush()
    }

    fn flush(&mut self) -> QuoteCardResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let canvas = self.target.canvas();
        let doc = svg_document(canvas, &self.pending);
        let tree = self
            .render_ctx
            .parse_svg(&doc)
            .map_err(|e| QuoteCardError::render(&self.pending_text, e.to_string()))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| {
                QuoteCardError::render(&self.pending_text, "failed to allocate overlay pixmap")
            })?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        over_in_place(self.target.as_bytes_mut(), pixmap.data(), 1.0)?;

        tracing::debug!(
            markup_bytes = self.pending.len(),
            "rasterized overlay markup"
        );
        self.pending.clear();
        self.pending_text.clear();
        Ok(())
    }
}

impl DrawContext for SvgDrawContext<'_> {
    fn draw_text(&mut self, text: TextDraw<'_>) -> QuoteCardResult<()> {
        self.pending.push_str(&text_element(&text));
        self.pending.push('\n');
        if !self.pending_text.is_empty() {
            self.pending_text.push('\n');
        }
        self.pending_text.push_str(text.text);
        Ok(())
    }

    fn draw_image(&mut self, image: ImageDraw<'_>) -> QuoteCardResult<()> {
        self.flush()?;
        over_at(&mut *self.target, image.image, image.left, image.top, 1.0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/markup.rs"]
mod tests;

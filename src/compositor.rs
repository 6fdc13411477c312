use std::sync::Arc;

use crate::{
    config::brand::BrandConstants,
    foundation::{
        core::{Canvas, Rect},
        error::{QuoteCardError, QuoteCardResult},
    },
    layout::engine::LineLayout,
    render::{
        context::RenderContext,
        draw::{DrawContext, ImageDraw},
        markup::SvgDrawContext,
        raster::RasterBuffer,
        text_layer::paint_text_layer,
    },
};

/// Final merged raster and the canvas it was rendered at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeResult {
    /// Premultiplied RGBA8 pixels.
    pub image: RasterBuffer,
    /// Output dimensions.
    pub canvas: Canvas,
}

impl CompositeResult {
    /// Encode the result as PNG bytes.
    pub fn to_png(&self) -> QuoteCardResult<Vec<u8>> {
        self.image.encode_png()
    }
}

/// A figure resized and positioned for a canvas.
#[derive(Clone, Debug)]
pub struct FigurePlacement {
    /// Resized figure.
    pub image: RasterBuffer,
    /// Left edge in canvas px.
    pub left: i64,
    /// Top edge in canvas px.
    pub top: i64,
}

impl FigurePlacement {
    /// Occupied rectangle in canvas px (before clipping).
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            (self.left + i64::from(self.image.width())) as f64,
            (self.top + i64::from(self.image.height())) as f64,
        )
    }
}

/// Scale `figure` to the brand height fraction and pin it to the bottom-right corner.
///
/// Figures wider than the canvas at that height are shrunk to the canvas width.
pub fn place_figure(
    figure: &RasterBuffer,
    canvas: Canvas,
    brand: &BrandConstants,
) -> QuoteCardResult<FigurePlacement> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let figure_height = ((h * brand.figure_height_ratio).round() as u32).max(1);
    let image = figure.resize_to_height(figure_height, canvas.width)?;

    let pad = (w * brand.figure_padding_ratio).round() as i64;
    let left = (i64::from(canvas.width) - i64::from(image.width()) - pad).max(0);
    let top = (i64::from(canvas.height) - i64::from(image.height()) - pad).max(0);
    Ok(FigurePlacement { image, left, top })
}

/// Paints quote layouts and figures over backgrounds.
#[derive(Clone, Debug)]
pub struct Compositor {
    render_ctx: Arc<RenderContext>,
    brand: Arc<BrandConstants>,
}

impl Compositor {
    /// Compositor drawing with `render_ctx` fonts and `brand` styling.
    pub fn new(render_ctx: Arc<RenderContext>, brand: Arc<BrandConstants>) -> Self {
        Self { render_ctx, brand }
    }

    /// Brand constants in use.
    pub fn brand(&self) -> &BrandConstants {
        &self.brand
    }

    /// Rendering context in use.
    pub fn render_context(&self) -> &RenderContext {
        &self.render_ctx
    }

    /// Cover-fit `background` to the layout canvas, then paint the text layer and, if given,
    /// the figure layer over it.
    ///
    /// A figure that cannot be placed is skipped with a warning; the result is then identical to
    /// compositing without a figure.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            width = layout.canvas.width,
            height = layout.canvas.height,
            lines = layout.lines.len(),
            figure = figure.is_some()
        )
    )]
    pub fn composite(
        &self,
        background: Option<&RasterBuffer>,
        layout: &LineLayout,
        figure: Option<&RasterBuffer>,
    ) -> QuoteCardResult<CompositeResult> {
        let background = background.ok_or(QuoteCardError::MissingBackground)?;
        let mut image = background.cover_fit(layout.canvas)?;

        let mut ctx = SvgDrawContext::new(&mut image, &self.render_ctx);
        self.paint_overlays(&mut ctx, layout, figure)?;
        ctx.finish()?;

        Ok(CompositeResult {
            image,
            canvas: layout.canvas,
        })
    }

    /// Paint the overlay layers into any [`DrawContext`], in z-order.
    pub fn paint_overlays(
        &self,
        ctx: &mut dyn DrawContext,
        layout: &LineLayout,
        figure: Option<&RasterBuffer>,
    ) -> QuoteCardResult<()> {
        paint_text_layer(ctx, layout, &self.brand)?;

        let Some(figure) = figure else {
            return Ok(());
        };
        match place_figure(figure, layout.canvas, &self.brand) {
            Ok(placement) => {
                tracing::debug!(
                    left = placement.left,
                    top = placement.top,
                    width = placement.image.width(),
                    "placing figure"
                );
                ctx.draw_image(ImageDraw {
                    image: &placement.image,
                    left: placement.left,
                    top: placement.top,
                })
            }
            Err(err) => {
                tracing::warn!(%err, "skipping figure layer");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/compositor.rs"]
mod tests;

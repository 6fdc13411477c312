//! End-to-end quote-card rendering: background bytes in, PNG-ready raster out.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::{
    assets::figures::{FigurePool, IndexPicker},
    compositor::{CompositeResult, Compositor},
    config::brand::BrandConstants,
    foundation::error::{QuoteCardError, QuoteCardResult},
    layout::{
        engine::{LineLayout, QuoteRequest, compute_layout},
        measure::ParleyMeasure,
        wrap::CharCountMeasure,
    },
    render::{context::RenderContext, raster::RasterBuffer},
};

/// A background image as returned by a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type reported by the provider.
    pub mime_type: String,
}

/// Produces background images from prompts.
///
/// `Ok(None)` means the provider gave a definitive "no image"; partial images do not exist.
pub trait BackgroundProvider {
    /// Fetch a background for `prompt`.
    fn fetch(&self, prompt: &str) -> QuoteCardResult<Option<Background>>;
}

/// Serves one image file for every prompt. A missing file yields `Ok(None)`.
#[derive(Clone, Debug)]
pub struct FileBackgroundProvider {
    path: PathBuf,
}

impl FileBackgroundProvider {
    /// Provider backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn mime_for(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/png",
        }
    }
}

impl BackgroundProvider for FileBackgroundProvider {
    fn fetch(&self, _prompt: &str) -> QuoteCardResult<Option<Background>> {
        if !self.path.is_file() {
            tracing::warn!(path = %self.path.display(), "background file not found");
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read background '{}'", self.path.display()))?;
        Ok(Some(Background {
            bytes,
            mime_type: Self::mime_for(&self.path).to_owned(),
        }))
    }
}

/// How quote lines are broken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Character-count heuristic.
    #[default]
    CharCount,
    /// Shaped advance widths with the brand font.
    Shaped,
}

/// Decode, lay out, composite.
#[derive(Clone, Debug)]
pub struct QuotePipeline {
    compositor: Compositor,
    figures: Option<FigurePool>,
    wrap_mode: WrapMode,
}

impl QuotePipeline {
    /// Pipeline without a figure pool, wrapping by character count.
    pub fn new(render_ctx: Arc<RenderContext>, brand: Arc<BrandConstants>) -> Self {
        Self {
            compositor: Compositor::new(render_ctx, brand),
            figures: None,
            wrap_mode: WrapMode::CharCount,
        }
    }

    /// Draw figures from `pool`.
    pub fn with_figures(mut self, pool: FigurePool) -> Self {
        self.figures = Some(pool);
        self
    }

    /// Select the wrap mode. [`WrapMode::Shaped`] requires a brand font in the render context.
    pub fn with_wrap_mode(mut self, mode: WrapMode) -> QuoteCardResult<Self> {
        if mode == WrapMode::Shaped && self.compositor.render_context().brand_font_bytes().is_none()
        {
            return Err(QuoteCardError::config(
                "shaped wrapping needs a brand font in the render context",
            ));
        }
        self.wrap_mode = mode;
        Ok(self)
    }

    /// The compositor this pipeline paints with.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Compute the layout for `request` with the configured wrap mode.
    pub fn layout(&self, request: &QuoteRequest) -> QuoteCardResult<LineLayout> {
        if request.text.trim().is_empty() {
            return Err(QuoteCardError::validation("quote text must be non-empty"));
        }
        let brand = self.compositor.brand();
        match self.wrap_mode {
            WrapMode::CharCount => Ok(compute_layout(request, brand, &mut CharCountMeasure)),
            WrapMode::Shaped => {
                let font = self
                    .compositor
                    .render_context()
                    .brand_font_bytes()
                    .ok_or_else(|| QuoteCardError::config("brand font missing"))?;
                let mut measure = ParleyMeasure::new(font, brand.quote_style.letter_spacing)?;
                Ok(compute_layout(request, brand, &mut measure))
            }
        }
    }

    /// Render `request` over `background`.
    ///
    /// `None` is a terminal [`QuoteCardError::MissingBackground`]. Figure problems only skip the
    /// figure layer.
    #[tracing::instrument(level = "info", skip_all, fields(text_len = request.text.len()))]
    pub fn render(
        &self,
        request: &QuoteRequest,
        background: Option<&Background>,
        picker: &mut dyn IndexPicker,
    ) -> QuoteCardResult<CompositeResult> {
        let background = background.ok_or(QuoteCardError::MissingBackground)?;
        let background = RasterBuffer::decode(&background.bytes)?;
        let layout = self.layout(request)?;

        let figure = self.figures.as_ref().and_then(|pool| match pool.choose(picker) {
            Ok((_, img)) => Some(img),
            Err(err) => {
                tracing::warn!(%err, "figure unavailable; compositing without it");
                None
            }
        });

        let result = self
            .compositor
            .composite(Some(&background), &layout, figure.as_ref())?;
        tracing::info!(
            width = result.canvas.width,
            height = result.canvas.height,
            lines = layout.lines.len(),
            "quote card rendered"
        );
        Ok(result)
    }

    /// Fetch a background for `prompt` from `provider`, then [`QuotePipeline::render`].
    pub fn render_with_provider(
        &self,
        provider: &dyn BackgroundProvider,
        prompt: &str,
        request: &QuoteRequest,
        picker: &mut dyn IndexPicker,
    ) -> QuoteCardResult<CompositeResult> {
        let background = provider.fetch(prompt)?;
        self.render(request, background.as_ref(), picker)
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;

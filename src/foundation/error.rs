/// Convenience result type used across quotecard.
pub type QuoteCardResult<T> = Result<T, QuoteCardError>;

/// Top-level error taxonomy used by layout, compositing and pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum QuoteCardError {
    /// Invalid user-provided request or brand data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A canvas dimension was zero. Layout recovers from this by substituting defaults.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// No background raster was supplied; compositing cannot start.
    #[error("cannot composite: no background image")]
    MissingBackground,

    /// A figure asset could not be loaded. The pipeline skips the figure layer on this error.
    #[error("figure asset {index} unavailable at '{path}'")]
    MissingFigureAsset {
        /// 1-based index into the figure pool.
        index: u32,
        /// Path that was probed.
        path: String,
    },

    /// Rasterizing the overlay failed.
    #[error("render error ({text_len} chars of overlay text, starting {preview:?}): {detail}")]
    Render {
        /// Total length in chars of the text painted into the failing layer.
        text_len: usize,
        /// Leading excerpt of that text.
        preview: String,
        /// Backend error message.
        detail: String,
    },

    /// Brand or font configuration problems.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuoteCardError {
    /// Build a [`QuoteCardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuoteCardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`QuoteCardError::Render`] value for a layer containing `text`.
    pub fn render(text: &str, detail: impl Into<String>) -> Self {
        const PREVIEW_CHARS: usize = 40;
        Self::Render {
            text_len: text.chars().count(),
            preview: text.chars().take(PREVIEW_CHARS).collect(),
            detail: detail.into(),
        }
    }

    /// Return `true` for errors the pipeline recovers from locally.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::MissingFigureAsset { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

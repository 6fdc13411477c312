//! Quotecard composes branded quote cards: a background image, word-wrapped quote typography, and
//! an optional illustrative figure, merged into one PNG.
//!
//! The flow is:
//!
//! - Build a [`RenderContext`] once from a [`FontConfig`]
//! - Describe a card with a [`QuoteRequest`] and lay it out with [`compute_layout`]
//! - Paint it over a background with a [`Compositor`], or run the whole thing through a
//!   [`QuotePipeline`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compositor;
mod config;
mod foundation;
mod layout;
/// Background providers and the end-to-end pipeline.
pub mod pipeline;
mod render;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{QuoteCardError, QuoteCardResult};

pub use crate::config::brand::{BrandColor, BrandConstants, TypeStyle};

pub use crate::layout::engine::{
    AttributionLine, LineLayout, QuoteMark, QuoteRequest, Wordmark, compute_layout,
};
pub use crate::layout::measure::ParleyMeasure;
pub use crate::layout::wrap::{CharCountMeasure, LineMeasure, WrapMetrics, wrap_words};

pub use crate::render::blend::{PremulRgba8, over, over_at};
pub use crate::render::context::{FontConfig, RenderContext};
pub use crate::render::draw::{DrawContext, ImageDraw, TextAnchor, TextDraw};
pub use crate::render::markup::{SvgDrawContext, escape_xml, unescape_xml};
pub use crate::render::raster::RasterBuffer;
pub use crate::render::text_layer::paint_text_layer;

pub use crate::assets::figures::{FigurePool, FixedPicker, IndexPicker, RngPicker};

pub use crate::compositor::{CompositeResult, Compositor, FigurePlacement, place_figure};
pub use crate::pipeline::{
    Background, BackgroundProvider, FileBackgroundProvider, QuotePipeline, WrapMode,
};

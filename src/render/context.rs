use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{QuoteCardError, QuoteCardResult};

/// Where fonts come from. Resolved once into a [`RenderContext`] at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Brand font file. Loaded into the database and exposed for shaping-based wrapping.
    pub brand_font: Option<PathBuf>,
    /// Also load fonts installed on the host.
    pub load_system_fonts: bool,
    /// Family used for the generic `sans-serif` keyword.
    pub sans_serif_family: Option<String>,
}

impl FontConfig {
    /// Host fonts only.
    pub fn system() -> Self {
        Self {
            load_system_fonts: true,
            ..Self::default()
        }
    }
}

/// Immutable rendering resources shared by every composite call.
///
/// Cheap to clone; the font database is reference counted.
#[derive(Clone)]
pub struct RenderContext {
    fontdb: Arc<usvg::fontdb::Database>,
    brand_font: Option<Arc<Vec<u8>>>,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("font_faces", &self.fontdb.len())
            .field(
                "brand_font_len",
                &self.brand_font.as_ref().map(|b| b.len()),
            )
            .finish()
    }
}

impl RenderContext {
    /// Build the font database described by `config`.
    ///
    /// Missing font directories are skipped with a warning; a missing brand font is an error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(config: &FontConfig) -> QuoteCardResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }

        for dir in &config.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }

        let brand_font = match &config.brand_font {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read brand font '{}'", path.display()))
                    .map_err(|e| QuoteCardError::config(format!("{e:#}")))?;
                db.load_font_data(bytes.clone());
                Some(Arc::new(bytes))
            }
            None => None,
        };

        if let Some(family) = &config.sans_serif_family {
            db.set_sans_serif_family(family.clone());
        }

        tracing::info!(font_faces = db.len(), "render context ready");
        Ok(Self {
            fontdb: Arc::new(db),
            brand_font,
        })
    }

    /// Context with an empty font database. Text layers rasterize to nothing.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
            brand_font: None,
        }
    }

    /// Number of loaded font faces.
    pub fn font_face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Raw brand font bytes, when one was configured.
    pub fn brand_font_bytes(&self) -> Option<&[u8]> {
        self.brand_font.as_deref().map(Vec::as_slice)
    }

    /// Parse SVG markup against this context's fonts.
    pub(crate) fn parse_svg(&self, markup: &str) -> Result<usvg::Tree, usvg::Error> {
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        usvg::Tree::from_str(markup, &opts)
    }
}

fn is_font_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| ["ttf", "otf", "ttc"].contains(&e.to_ascii_lowercase().as_str()))
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), %err, "skipping unreadable font directory");
            return;
        }
    };

    let before = db.len();
    for path in entries.flatten().map(|e| e.path()).filter(|p| is_font_file(p)) {
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), %err, "failed to load font file");
        }
    }
    tracing::debug!(dir = %dir.display(), faces = db.len() - before, "loaded font directory");
}

// Overlay markup only sets family and weight. Unmatched stacks use the first loaded face.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            use usvg::fontdb::Family;

            let families: Vec<Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Named(name) => Family::Name(name),
                    usvg::FontFamily::Serif => Family::Serif,
                    usvg::FontFamily::Monospace => Family::Monospace,
                    _ => Family::SansSerif,
                })
                .chain([Family::SansSerif])
                .collect();

            fontdb
                .query(&usvg::fontdb::Query {
                    families: &families,
                    weight: usvg::fontdb::Weight(font.weight()),
                    ..Default::default()
                })
                .or_else(|| fontdb.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;

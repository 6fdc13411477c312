use std::path::PathBuf;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::error::{QuoteCardError, QuoteCardResult},
    render::raster::RasterBuffer,
};

/// Source of the figure choice, injectable so tests can pin it.
pub trait IndexPicker {
    /// Return a 1-based index in `1..=count`. Callers pass `count >= 1`.
    fn pick(&mut self, count: u32) -> u32;
}

/// Uniform choice backed by any [`rand::Rng`].
#[derive(Clone, Debug)]
pub struct RngPicker<R: Rng>(pub R);

impl RngPicker<StdRng> {
    /// Reproducible picker.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Picker seeded from the operating system.
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> IndexPicker for RngPicker<R> {
    fn pick(&mut self, count: u32) -> u32 {
        self.0.random_range(1..=count.max(1))
    }
}

/// Always returns the same index, clamped into range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPicker(pub u32);

impl IndexPicker for FixedPicker {
    fn pick(&mut self, count: u32) -> u32 {
        self.0.clamp(1, count.max(1))
    }
}

/// Numbered figure images in one directory: `person-01.png` .. `person-NN.png`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigurePool {
    dir: PathBuf,
    count: u32,
}

impl FigurePool {
    /// Pool of `count` figures under `dir`.
    pub fn new(dir: impl Into<PathBuf>, count: u32) -> Self {
        Self {
            dir: dir.into(),
            count,
        }
    }

    /// Number of figures in the pool.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// File path for the 1-based `index`.
    pub fn path_for(&self, index: u32) -> PathBuf {
        self.dir.join(format!("person-{index:02}.png"))
    }

    /// Load figure `index`. Out-of-range indices and absent files are
    /// [`QuoteCardError::MissingFigureAsset`]; undecodable files are wrapped decode errors.
    pub fn load(&self, index: u32) -> QuoteCardResult<RasterBuffer> {
        let path = self.path_for(index);
        if index == 0 || index > self.count || !path.is_file() {
            return Err(QuoteCardError::MissingFigureAsset {
                index,
                path: path.display().to_string(),
            });
        }
        RasterBuffer::open(&path)
    }

    /// Pick an index with `picker` and load it.
    pub fn choose(&self, picker: &mut dyn IndexPicker) -> QuoteCardResult<(u32, RasterBuffer)> {
        if self.count == 0 {
            return Err(QuoteCardError::MissingFigureAsset {
                index: 0,
                path: self.dir.display().to_string(),
            });
        }
        let index = picker.pick(self.count);
        tracing::debug!(index, count = self.count, "picked figure");
        self.load(index).map(|img| (index, img))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/figures.rs"]
mod tests;

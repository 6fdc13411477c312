use std::{io::Cursor, path::Path};

use anyhow::Context as _;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::{Canvas, Rgba8Premul, mul_div255},
    error::{QuoteCardError, QuoteCardResult},
};

/// Owned raster in premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes_len", &self.rgba8_premul.len())
            .finish()
    }
}

impl RasterBuffer {
    /// Fully transparent buffer of the given size.
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            rgba8_premul: vec![0; canvas.rgba_len()],
        }
    }

    /// Buffer filled with one straight-alpha colour.
    pub fn solid(canvas: Canvas, rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        let px = Rgba8Premul::from_straight_rgba(r, g, b, a).to_array();
        Self {
            width: canvas.width,
            height: canvas.height,
            rgba8_premul: px.repeat((canvas.width as usize) * (canvas.height as usize)),
        }
    }

    /// Wrap premultiplied bytes, checking the length against `width * height * 4`.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> QuoteCardResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| QuoteCardError::validation("raster size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(QuoteCardError::validation(format!(
                "raster byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }

    /// Take ownership of a straight-alpha image and premultiply it.
    pub fn from_straight(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul,
        }
    }

    /// Decode any format the `image` crate recognizes.
    pub fn decode(bytes: &[u8]) -> QuoteCardResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_straight(dyn_img.to_rgba8()))
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> QuoteCardResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Mutable premultiplied pixel bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy out as a straight-alpha image.
    pub fn to_straight(&self) -> RgbaImage {
        let mut data = self.rgba8_premul.clone();
        unpremultiply_rgba8_in_place(&mut data);
        // Length is width*height*4 by construction.
        RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Encode as a straight-alpha PNG.
    pub fn encode_png(&self) -> QuoteCardResult<Vec<u8>> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(self.to_straight())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Crop the centred region with `target`'s aspect ratio, then resample it to exactly `target`.
    ///
    /// Never allocates more than one source-sized and one target-sized buffer.
    pub fn cover_fit(&self, target: Canvas) -> QuoteCardResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(QuoteCardError::validation("cannot cover-fit an empty raster"));
        }
        if target.width == 0 || target.height == 0 {
            return Err(QuoteCardError::InvalidDimensions {
                width: target.width,
                height: target.height,
            });
        }
        if self.canvas() == target {
            return Ok(self.clone());
        }

        let (sw, sh) = (f64::from(self.width), f64::from(self.height));
        let (tw, th) = (f64::from(target.width), f64::from(target.height));
        let crop_w = ((sh * tw / th).min(sw).round() as u32).clamp(1, self.width);
        let crop_h = ((sw * th / tw).min(sh).round() as u32).clamp(1, self.height);
        let x = (self.width - crop_w) / 2;
        let y = (self.height - crop_h) / 2;

        let src = self.as_image()?;
        let cropped = image::imageops::crop_imm(&src, x, y, crop_w, crop_h).to_image();
        let out = resample(&cropped, target.width, target.height);
        Self::from_premul_rgba8(target.width, target.height, out.into_raw())
    }

    /// Resize to `height` px tall preserving aspect ratio, but never wider than `max_width`.
    ///
    /// When the width cap applies the result is shorter than `height`.
    pub fn resize_to_height(&self, height: u32, max_width: u32) -> QuoteCardResult<Self> {
        if self.width == 0 || self.height == 0 || height == 0 || max_width == 0 {
            return Err(QuoteCardError::validation("cannot resize an empty raster"));
        }
        let (sw, sh) = (f64::from(self.width), f64::from(self.height));
        let natural_w = sw * f64::from(height) / sh;
        let (width, height) = if natural_w > f64::from(max_width) {
            let capped_h = ((sh * f64::from(max_width) / sw).round() as u32).clamp(1, height);
            (max_width, capped_h)
        } else {
            ((natural_w.round() as u32).max(1), height)
        };

        let out = resample(&self.as_image()?, width, height);
        Self::from_premul_rgba8(width, height, out.into_raw())
    }

    fn as_image(&self) -> QuoteCardResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.rgba8_premul.clone())
            .ok_or_else(|| QuoteCardError::validation("raster byte length mismatch"))
    }
}

// Filtering premultiplied data directly avoids dark fringes at transparent edges.
fn resample(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut out = image::imageops::resize(src, width, height, FilterType::Lanczos3);
    clamp_premul_in_place(&mut out);
    out
}

/// Premultiply straight-alpha RGBA8 in place.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255(u16::from(px[0]), a);
        px[1] = mul_div255(u16::from(px[1]), a);
        px[2] = mul_div255(u16::from(px[2]), a);
    }
}

/// Undo [`premultiply_rgba8_in_place`].
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

// Lanczos ringing can push colour above alpha, which is not a valid premultiplied pixel.
fn clamp_premul_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = px.0[3];
        for c in &mut px.0[..3] {
            *c = (*c).min(a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

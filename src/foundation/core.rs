use crate::foundation::error::{QuoteCardError, QuoteCardResult};

pub use kurbo::{Point, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Canvas {
    /// Square 1080x1080 canvas used whenever a request does not name a usable size.
    pub const DEFAULT: Canvas = Canvas {
        width: 1080,
        height: 1080,
    };

    /// Create a validated canvas with both dimensions non-zero.
    pub fn new(width: u32, height: u32) -> QuoteCardResult<Self> {
        if width == 0 || height == 0 {
            return Err(QuoteCardError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Like [`Canvas::new`], but substitutes [`Canvas::DEFAULT`] for invalid input.
    pub fn or_default(width: u32, height: u32) -> Self {
        Self::new(width, height).unwrap_or_else(|err| {
            tracing::warn!(%err, "substituting default canvas");
            Self::DEFAULT
        })
    }

    /// Parse a `WxH` resolution string.
    ///
    /// Each component falls back to 1080 on its own when missing, unparsable or zero, so
    /// `"1280x"` yields 1280x1080 and `"garbage"` yields the default canvas.
    pub fn parse_resolution(s: &str) -> Self {
        fn component(part: Option<&str>) -> u32 {
            part.and_then(|p| p.trim().parse::<u32>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(Canvas::DEFAULT.width)
        }

        let mut parts = s.trim().split(['x', 'X']);
        let width = component(parts.next());
        let height = component(parts.next());
        Self { width, height }
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: premul_channel(r, a),
            g: premul_channel(g, a),
            b: premul_channel(b, a),
            a,
        }
    }

    /// Pixel as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub(crate) fn premul_channel(c: u8, a: u8) -> u8 {
    mul_div255(u16::from(c), u16::from(a))
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

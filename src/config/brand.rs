//! Canonical brand constants.
//!
//! Every size and position in a quote card is a fixed fraction of the canvas width (or, for the
//! figure, height). Earlier renderers each carried their own copy of these numbers and the copies
//! drifted; this record is the single source of truth.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{QuoteCardError, QuoteCardResult};

/// Straight-alpha sRGB colour, serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BrandColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl BrandColor {
    /// Opaque white.
    pub const WHITE: BrandColor = BrandColor::rgb(255, 255, 255);
    /// Brand mint green (`#2ECC71`).
    pub const MINT: BrandColor = BrandColor::rgb(0x2e, 0xcc, 0x71);

    /// Opaque colour from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` / `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if !s.is_ascii() {
            return Err("hex color must be ASCII".to_owned());
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }

    /// `#rrggbb` without alpha, as used for SVG `fill`.
    pub fn rgb_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `0..=1` factor.
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl TryFrom<String> for BrandColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<BrandColor> for String {
    fn from(c: BrandColor) -> Self {
        if c.a == 255 {
            c.rgb_hex()
        } else {
            format!("{}{:02x}", c.rgb_hex(), c.a)
        }
    }
}

/// Typeface and paint for one class of overlay text. Size is computed by layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeStyle {
    /// CSS-style family list, e.g. `"'Impact', sans-serif"`.
    pub font_family: String,
    /// Numeric weight (100..=900).
    pub font_weight: u16,
    /// Fill colour.
    pub fill: BrandColor,
    /// Layer opacity in `0..=1`, multiplied with the fill alpha.
    pub opacity: f32,
    /// Extra tracking in px.
    #[serde(default)]
    pub letter_spacing: f32,
}

impl TypeStyle {
    fn new(font_family: &str, font_weight: u16, fill: BrandColor, opacity: f32, ls: f32) -> Self {
        Self {
            font_family: font_family.to_owned(),
            font_weight,
            fill,
            opacity,
            letter_spacing: ls,
        }
    }

    /// Effective opacity including the fill alpha.
    pub fn effective_opacity(&self) -> f32 {
        (self.opacity * self.fill.alpha_f32()).clamp(0.0, 1.0)
    }
}

const BRAND_FONT_STACK: &str = "'ABCFavorit-Ultra', 'Impact', 'Arial Black', sans-serif";

/// The canonical set of layout ratios and styles for a quote card.
///
/// Fields missing from a JSON file keep their [`Default`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConstants {
    /// Quote font size as a fraction of canvas width.
    pub quote_size_ratio: f64,
    /// Attribution font size as a fraction of canvas width.
    pub attr_size_ratio: f64,
    /// Decorative quote-mark size as a fraction of canvas width.
    pub mark_size_ratio: f64,
    /// Horizontal padding as a fraction of canvas width.
    pub padding_ratio: f64,
    /// Average glyph advance relative to font size, for the character-count wrapper.
    pub char_width_ratio: f64,
    /// Line height relative to quote font size.
    pub line_height_ratio: f64,
    /// Gap between the last quote line and the attribution, in attribution font sizes.
    pub attr_gap_ratio: f64,
    /// Quote-mark x as a fraction of padding.
    pub mark_x_ratio: f64,
    /// How far the quote mark sits above the first baseline, in line heights.
    pub mark_rise_ratio: f64,
    /// Wordmark baseline as a fraction of padding.
    pub wordmark_y_ratio: f64,
    /// Wordmark font size in px (not scaled with the canvas).
    pub wordmark_size: f64,
    /// Wordmark text.
    pub wordmark_text: String,
    /// Figure height as a fraction of canvas height.
    pub figure_height_ratio: f64,
    /// Figure inset from the bottom-right corner as a fraction of canvas width.
    pub figure_padding_ratio: f64,
    /// Number of figures in the pool (`person-01.png` .. `person-NN.png`).
    pub figure_count: u32,
    /// Render quote lines lowercase.
    pub lowercase_quote: bool,
    /// Quote line style.
    pub quote_style: TypeStyle,
    /// Attribution line style.
    pub attribution_style: TypeStyle,
    /// Decorative quote-mark style.
    pub mark_style: TypeStyle,
    /// Wordmark style.
    pub wordmark_style: TypeStyle,
}

impl Default for BrandConstants {
    fn default() -> Self {
        Self {
            quote_size_ratio: 0.048,
            attr_size_ratio: 0.022,
            mark_size_ratio: 0.18,
            padding_ratio: 0.08,
            char_width_ratio: 0.48,
            line_height_ratio: 1.3,
            attr_gap_ratio: 2.5,
            mark_x_ratio: 0.7,
            mark_rise_ratio: 0.3,
            wordmark_y_ratio: 0.7,
            wordmark_size: 14.0,
            wordmark_text: "cryptotakkies".to_owned(),
            figure_height_ratio: 0.22,
            figure_padding_ratio: 0.04,
            figure_count: 8,
            lowercase_quote: true,
            quote_style: TypeStyle::new(BRAND_FONT_STACK, 900, BrandColor::WHITE, 1.0, -0.5),
            attribution_style: TypeStyle::new(
                "'Helvetica', 'Arial', sans-serif",
                400,
                BrandColor::WHITE,
                0.55,
                2.0,
            ),
            mark_style: TypeStyle::new(
                "Georgia, 'Times New Roman', serif",
                400,
                BrandColor::MINT,
                0.3,
                0.0,
            ),
            wordmark_style: TypeStyle::new(BRAND_FONT_STACK, 900, BrandColor::WHITE, 0.2, 3.0),
        }
    }
}

impl BrandConstants {
    /// Load constants from a JSON file and validate them.
    pub fn from_json_path(path: impl AsRef<Path>) -> QuoteCardResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read brand constants '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Parse constants from JSON text and validate them.
    pub fn from_json_str(raw: &str) -> QuoteCardResult<Self> {
        let brand: Self = serde_json::from_str(raw)
            .map_err(|e| QuoteCardError::config(format!("parse brand constants: {e}")))?;
        brand.validate()?;
        Ok(brand)
    }

    /// Check that every ratio is usable.
    pub fn validate(&self) -> QuoteCardResult<()> {
        let positive = [
            ("quote_size_ratio", self.quote_size_ratio),
            ("attr_size_ratio", self.attr_size_ratio),
            ("mark_size_ratio", self.mark_size_ratio),
            ("char_width_ratio", self.char_width_ratio),
            ("line_height_ratio", self.line_height_ratio),
            ("wordmark_size", self.wordmark_size),
            ("figure_height_ratio", self.figure_height_ratio),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(QuoteCardError::config(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }

        let non_negative = [
            ("attr_gap_ratio", self.attr_gap_ratio),
            ("mark_x_ratio", self.mark_x_ratio),
            ("mark_rise_ratio", self.mark_rise_ratio),
            ("wordmark_y_ratio", self.wordmark_y_ratio),
            ("figure_padding_ratio", self.figure_padding_ratio),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(QuoteCardError::config(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }

        if !self.padding_ratio.is_finite() || !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(QuoteCardError::config(
                "padding_ratio must be in [0, 0.5) so some text width remains",
            ));
        }
        if self.figure_count == 0 {
            return Err(QuoteCardError::config("figure_count must be >= 1"));
        }

        for (name, style) in [
            ("quote_style", &self.quote_style),
            ("attribution_style", &self.attribution_style),
            ("mark_style", &self.mark_style),
            ("wordmark_style", &self.wordmark_style),
        ] {
            if !(0.0..=1.0).contains(&style.opacity) {
                return Err(QuoteCardError::config(format!(
                    "{name}.opacity must be in [0, 1]"
                )));
            }
            if style.font_family.trim().is_empty() {
                return Err(QuoteCardError::config(format!(
                    "{name}.font_family must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/brand.rs"]
mod tests;

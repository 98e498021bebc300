//! Color literals accepted in shadow strings.
//!
//! Only `rgba(...)`, `rgb(...)` and `#` hex (3, 4, 6 or 8 digits) are
//! recognized. Named colors and every other CSS color syntax are rejected so
//! the numeric spread/color heuristic in the shadow parser stays unambiguous.

use std::fmt;
use std::str::FromStr;

use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};
use squircle_core::ColorLinPremul;
use thiserror::Error;

use crate::tokenize::split_top_level_commas;

/// Straight (non-premultiplied) sRGB color with a float alpha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ColorParseError {
    #[error("empty color")]
    Empty,
    #[error("unsupported color syntax `{0}`")]
    Unsupported(String),
    #[error("expected {expected} color components, found {found}")]
    ComponentCount { expected: usize, found: usize },
    #[error("invalid color component `{0}`")]
    InvalidComponent(String),
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),
}

impl ShadowColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Premultiplied linear color for shells compositing in linear space.
    pub fn to_lin_premul(&self) -> ColorLinPremul {
        ColorLinPremul::from_srgba(self.r, self.g, self.b, self.a)
    }

    /// Straight sRGB bytes, alpha scaled to 0..=255.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }

    /// Same color with alpha multiplied by `opacity`, clamped to `[0, 1]`.
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let a = if opacity.is_finite() {
            (self.a * opacity).clamp(0.0, 1.0)
        } else {
            self.a
        };
        Self { a, ..*self }
    }
}

impl fmt::Display for ShadowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for ShadowColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(inner) = function_args(t, "rgba(") {
            let [r, g, b, a] = components::<4>(inner)?;
            return Ok(Self::rgba(channel(r), channel(g), channel(b), a.clamp(0.0, 1.0)));
        }
        if let Some(inner) = function_args(t, "rgb(") {
            let [r, g, b] = components::<3>(inner)?;
            return Ok(Self::rgb(channel(r), channel(g), channel(b)));
        }
        if let Some(hex) = t.strip_prefix('#') {
            return parse_hex(t, hex);
        }
        Err(ColorParseError::Unsupported(t.to_string()))
    }
}

fn function_args<'a>(t: &'a str, prefix: &str) -> Option<&'a str> {
    t.strip_prefix(prefix)?.strip_suffix(')')
}

fn components<const N: usize>(inner: &str) -> Result<[f32; N], ColorParseError> {
    let mut parts = split_top_level_commas(inner);
    // the splitter drops a trailing empty piece; keep it so it fails to parse
    if inner.ends_with(',') {
        parts.push("");
    }
    if parts.len() != N {
        return Err(ColorParseError::ComponentCount {
            expected: N,
            found: parts.len(),
        });
    }
    let mut out = [0.0f32; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        let part = part.trim();
        *slot = part
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ColorParseError::InvalidComponent(part.to_string()))?;
    }
    Ok(out)
}

fn channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

fn parse_hex(token: &str, digits: &str) -> Result<ShadowColor, ColorParseError> {
    let valid_len = matches!(digits.len(), 3 | 4 | 6 | 8);
    if !valid_len || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex(token.to_string()));
    }
    let c = CssColor::from_str(token).map_err(|_| ColorParseError::InvalidHex(token.to_string()))?;
    let byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Ok(ShadowColor::rgba(
        byte(c.r),
        byte(c.g),
        byte(c.b),
        byte(c.a) as f32 / 255.0,
    ))
}

/// Parse a color literal, `None` when the syntax is not supported.
pub fn parse_color(token: &str) -> Option<ShadowColor> {
    token.parse().ok()
}

//! Producing shadow strings from structured input.
//!
//! The parser in [`crate::shadow`] accepts whatever these functions emit, so a
//! host can describe shadows either way and end up on the same code path.

use std::fmt::Write as _;
use std::str::FromStr;

use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};

/// One layer for [`build_box_shadow`]. `color` is `#rgb` or `#rrggbb` and
/// `opacity` is a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowLayerSpec {
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    #[serde(default)]
    pub spread: f32,
    pub color: String,
    pub opacity: f32,
}

fn hex_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let value = u32::from_str_radix(&expanded, 16).unwrap_or(0);
    (
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    )
}

/// Render layers as a `box-shadow` list, `"{x}px {y}px {blur}px {spread}px
/// rgba(r, g, b, a)"` per layer joined by `", "`. Hex that does not decode
/// becomes black.
pub fn build_box_shadow(layers: &[ShadowLayerSpec]) -> String {
    let mut out = String::new();
    for (i, layer) in layers.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let alpha = (layer.opacity / 100.0).clamp(0.0, 1.0);
        let alpha = if alpha.is_nan() { 0.0 } else { alpha };
        let (r, g, b) = hex_rgb(&layer.color);
        let _ = write!(
            out,
            "{}px {}px {}px {}px rgba({}, {}, {}, {})",
            layer.x, layer.y, layer.blur, layer.spread, r, g, b, alpha
        );
    }
    out
}

/// Platform-style shadow props as a host view would receive them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeShadowStyle {
    pub box_shadow: Option<String>,
    pub shadow_color: Option<String>,
    pub shadow_opacity: Option<f32>,
    pub shadow_radius: Option<f32>,
    pub shadow_offset: Option<(f32, f32)>,
    pub elevation: Option<f32>,
}

impl NativeShadowStyle {
    fn is_unset(&self) -> bool {
        self.shadow_color.is_none()
            && self.shadow_opacity.is_none()
            && self.shadow_radius.is_none()
            && self.shadow_offset.is_none()
            && self.elevation.is_none()
    }
}

/// Derive a single-entry shadow string from platform-style props.
///
/// A non-blank `box_shadow` wins and is returned unchanged. Otherwise a color
/// is required; it may be any CSS color the host accepts, including names.
/// Its alpha is multiplied by `shadow_opacity` when present.
pub fn shadow_from_native_style(style: &NativeShadowStyle) -> Option<String> {
    if let Some(raw) = style.box_shadow.as_deref() {
        if !raw.trim().is_empty() {
            return Some(raw.to_string());
        }
    }
    if style.is_unset() {
        return None;
    }
    if style.shadow_radius.is_none() && style.shadow_offset.is_none() && style.shadow_color.is_none() {
        return None;
    }

    let color = CssColor::from_str(style.shadow_color.as_deref()?.trim()).ok()?;
    let [r, g, b, a] = color.to_rgba8();
    let base_alpha = a as f32 / 255.0;
    let alpha = match style.shadow_opacity {
        Some(opacity) => (base_alpha * opacity).clamp(0.0, 1.0),
        None => base_alpha.clamp(0.0, 1.0),
    };

    let (offset_x, offset_y) = style.shadow_offset.unwrap_or((0.0, 0.0));
    let blur = style.shadow_radius.unwrap_or(0.0);
    Some(format!(
        "{}px {}px {}px 0px rgba({}, {}, {}, {})",
        offset_x, offset_y, blur, r, g, b, alpha
    ))
}

//! `box-shadow` list parsing.
//!
//! Each comma separated entry is `<x> <y> <blur> [<spread>] <color>`. The
//! fourth token is a spread only when at least five tokens are present and it
//! parses as a length; otherwise it is the color. Parsing is forgiving: an
//! entry with fewer than four tokens or an unreadable color is dropped and
//! the rest of the list is still parsed.

use serde::{Deserialize, Serialize};

use crate::color::ShadowColor;
use crate::diagnostics::diagnostics_enabled;
use crate::length::parse_length;
use crate::tokenize::{split_top_level_commas, split_top_level_whitespace};

/// One drop shadow, in the units of the source string.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowDescriptor {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: ShadowColor,
}

impl ShadowDescriptor {
    /// Scale the four lengths by a display density factor.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            offset_x: self.offset_x * factor,
            offset_y: self.offset_y * factor,
            blur: self.blur * factor,
            spread: self.spread * factor,
            color: self.color,
        }
    }

    /// Shadows with a fully transparent color paint nothing.
    pub fn is_visible(&self) -> bool {
        self.color.a > 0.0
    }
}

fn dropped(entry: &str, reason: &str) {
    if diagnostics_enabled("shadow") {
        tracing::debug!(entry = %entry, reason, "diagnostics: dropped box-shadow entry");
    }
}

fn parse_entry(entry: &str) -> Option<ShadowDescriptor> {
    let tokens = split_top_level_whitespace(entry);
    if tokens.len() < 4 {
        dropped(entry, "fewer than four tokens");
        return None;
    }

    let offset_x = parse_length(tokens[0]).unwrap_or(0.0);
    let offset_y = parse_length(tokens[1]).unwrap_or(0.0);
    let blur = parse_length(tokens[2]).unwrap_or(0.0);

    let (spread, color_index) = match parse_length(tokens[3]) {
        Some(spread) if tokens.len() >= 5 => (spread, 4),
        _ => (0.0, 3),
    };

    let color = match tokens[color_index].parse::<ShadowColor>() {
        Ok(color) => color,
        Err(err) => {
            dropped(entry, &err.to_string());
            return None;
        }
    };

    Some(ShadowDescriptor {
        offset_x,
        offset_y,
        blur,
        spread,
        color,
    })
}

/// Parse a shadow list into descriptors in paint order (first entry is
/// painted first, furthest back). Blank input and `none` give an empty list.
pub fn parse_box_shadow(input: &str) -> Vec<ShadowDescriptor> {
    let s = input.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    split_top_level_commas(s)
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(parse_entry)
        .collect()
}

/// [`parse_box_shadow`] for an optional prop value; absent means no shadows.
pub fn parse_box_shadow_opt(input: Option<&str>) -> Vec<ShadowDescriptor> {
    input.map(parse_box_shadow).unwrap_or_default()
}

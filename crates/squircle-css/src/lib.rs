//! CSS-ish shadow syntax for squircle views.
//!
//! Parses `box-shadow` lists and the small color grammar they use into
//! [`ShadowDescriptor`]s, and builds shadow strings back from structured
//! host props.

mod build;
mod color;
pub mod diagnostics;
mod length;
mod shadow;
pub mod tokenize;

pub use build::{NativeShadowStyle, ShadowLayerSpec, build_box_shadow, shadow_from_native_style};
pub use color::{ColorParseError, ShadowColor, parse_color};
pub use length::parse_length;
pub use shadow::{ShadowDescriptor, parse_box_shadow, parse_box_shadow_opt};

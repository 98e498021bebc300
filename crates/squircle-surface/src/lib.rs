//! squircle-surface: CPU rendering of squircle views on tiny-skia.

pub mod blur;
mod convert;
mod error;
mod view;

pub use convert::{skia_color, to_skia_path};
pub use error::{RenderError, RenderResult};
pub use view::{Frame, SquircleStyle, SquircleView};

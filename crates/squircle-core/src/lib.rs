//! squircle-core: continuous-curvature corner geometry.
//!
//! [`build_squircle_path`] turns a box size, corner radius and smoothing
//! factor into a closed, clockwise [`SquirclePath`]. Everything here is pure;
//! the only shared state is the optional [`SharedPathCache`].

mod cache;
mod color;
pub mod dpi;
mod geometry;
mod layers;
mod path;
mod shape;
mod tessellate;

pub use cache::{CacheStats, PathCache, PathKey, SharedPathCache};
pub use color::{Color, ColorLinPremul};
pub use geometry::{CurveProperties, arc_measure, compute_curve_properties};
pub use layers::{DEFAULT_CORNER_SMOOTHING, SquircleLayers, SquircleProps};
pub use path::{
    ArcSweep, PathCommand, Segment, SquirclePath, build_inset_squircle_path, build_squircle_path,
};
pub use shape::{FillRule, Path, PathCmd, Rect};
pub use tessellate::{
    DEFAULT_TOLERANCE, Mesh, TessellateError, Vertex, tessellate_fill, tessellate_stroke,
};

//! C ABI for embedding squircle geometry in native view code.
//!
//! Platform shells call the functions in [`ffi`] to build paths and parse
//! shadow strings instead of carrying their own copies of the math. All
//! results are written into caller-owned buffers.

pub mod ffi;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use squircle_config::SquircleConfig;
use squircle_core::{Path, PathCmd, SharedPathCache, SquircleLayers, SquircleProps};
use squircle_css::{ShadowDescriptor, parse_box_shadow};

static CONFIG: Lazy<RwLock<SquircleConfig>> = Lazy::new(|| RwLock::new(SquircleConfig::default()));

static PATH_CACHE: Lazy<SharedPathCache> = Lazy::new(SharedPathCache::new);

pub fn config() -> SquircleConfig {
    CONFIG.read().clone()
}

pub fn set_config(config: SquircleConfig) {
    *CONFIG.write() = config;
}

pub(crate) fn path_cache() -> &'static SharedPathCache {
    &PATH_CACHE
}

/// Kind of an [`FfiPathCmd`].
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiPathVerb {
    MoveTo = 0,
    LineTo = 1,
    CubicTo = 2,
    Close = 3,
}

/// One absolute path command. `MoveTo`/`LineTo` use `points[0..2]`,
/// `CubicTo` uses all six as `c1, c2, end`; `Close` uses none.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FfiPathCmd {
    pub verb: FfiPathVerb,
    pub points: [f32; 6],
}

impl Default for FfiPathCmd {
    fn default() -> Self {
        Self {
            verb: FfiPathVerb::Close,
            points: [0.0; 6],
        }
    }
}

impl From<&PathCmd> for FfiPathCmd {
    fn from(cmd: &PathCmd) -> Self {
        match *cmd {
            PathCmd::MoveTo([x, y]) => Self {
                verb: FfiPathVerb::MoveTo,
                points: [x, y, 0.0, 0.0, 0.0, 0.0],
            },
            PathCmd::LineTo([x, y]) => Self {
                verb: FfiPathVerb::LineTo,
                points: [x, y, 0.0, 0.0, 0.0, 0.0],
            },
            PathCmd::CubicTo(c1, c2, end) => Self {
                verb: FfiPathVerb::CubicTo,
                points: [c1[0], c1[1], c2[0], c2[1], end[0], end[1]],
            },
            PathCmd::Close => Self::default(),
        }
    }
}

/// A parsed shadow with straight sRGB color bytes and float alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiShadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl From<&ShadowDescriptor> for FfiShadow {
    fn from(s: &ShadowDescriptor) -> Self {
        Self {
            offset_x: s.offset_x,
            offset_y: s.offset_y,
            blur: s.blur,
            spread: s.spread,
            r: s.color.r,
            g: s.color.g,
            b: s.color.b,
            a: s.color.a,
        }
    }
}

/// Copy as many items as fit into `out` and return how many there are in
/// total, so callers can retry with a larger buffer.
///
/// # Safety
/// `out` must be null or valid for `cap` writes.
pub(crate) unsafe fn write_out<T: Copy>(items: &[T], out: *mut T, cap: usize) -> usize {
    if !out.is_null() && cap > 0 {
        let n = items.len().min(cap);
        unsafe { std::ptr::copy_nonoverlapping(items.as_ptr(), out, n) };
    }
    items.len()
}

pub(crate) fn path_to_ffi(path: &Path) -> Vec<FfiPathCmd> {
    path.cmds.iter().map(FfiPathCmd::from).collect()
}

/// Per-view state owned by a native view through an opaque handle.
#[derive(Debug)]
pub struct ViewHandle {
    layers: SquircleLayers,
    shadows: Vec<ShadowDescriptor>,
    dp_scale: f32,
}

impl ViewHandle {
    pub fn new(width: f32, height: f32) -> Self {
        let config = config();
        let props = SquircleProps::new(width, height, 0.0)
            .with_corner_smoothing(config.corner_smoothing());
        let layers = if config.geometry.path_cache {
            SquircleLayers::new(props)
        } else {
            SquircleLayers::uncached(props)
        };
        Self {
            layers,
            shadows: Vec::new(),
            dp_scale: config.dp_scale(),
        }
    }

    pub fn layers_mut(&mut self) -> &mut SquircleLayers {
        &mut self.layers
    }

    pub fn shadows(&self) -> &[ShadowDescriptor] {
        &self.shadows
    }

    /// Parse and store a shadow list; lengths are scaled from dp to px.
    pub fn set_box_shadow(&mut self, value: Option<&str>) {
        let scale = self.dp_scale;
        self.shadows = value
            .map(parse_box_shadow)
            .unwrap_or_default()
            .iter()
            .map(|s| s.scaled(scale))
            .collect();
        self.layers.retain_shadows(self.shadows.len());
    }

    pub fn shadow_path(&mut self, index: usize) -> Option<Path> {
        let spread = self.shadows.get(index)?.spread;
        Some(self.layers.shadow_path(index, spread).to_absolute())
    }
}

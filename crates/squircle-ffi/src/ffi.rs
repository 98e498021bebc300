//! Exported C symbols.
//!
//! Buffer-filling functions return the total number of records available,
//! writing at most `cap` of them; pass a null `out` to query the size. Null
//! handles or strings, and strings that are not UTF-8, yield 0.

use std::ffi::{CStr, c_char};

use squircle_config::SquircleConfig;
use squircle_core::{PathKey, SquirclePath, build_squircle_path};
use squircle_css::parse_box_shadow;

use crate::{FfiPathCmd, FfiShadow, ViewHandle, config, path_cache, path_to_ffi, set_config, write_out};

fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok() }
}

fn view_mut<'a>(view: *mut ViewHandle) -> Option<&'a mut ViewHandle> {
    unsafe { view.as_mut() }
}

fn write_path(path: &SquirclePath, out: *mut FfiPathCmd, cap: usize) -> usize {
    let cmds = path_to_ffi(&path.to_absolute());
    unsafe { write_out(&cmds, out, cap) }
}

/// Initialize logging and load `resquircle.toml` plus environment overrides.
///
/// Safe to call more than once; later calls reload the configuration.
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_init() -> bool {
    let _ = env_logger::try_init();
    let loaded = SquircleConfig::load();
    log::info!(
        "resquircle_init: smoothing={} cache={} dp_scale={}",
        loaded.corner_smoothing(),
        loaded.geometry.path_cache,
        loaded.dp_scale()
    );
    if let Some(categories) = loaded.shadow.diagnostics.as_deref() {
        squircle_css::diagnostics::init_diagnostics(categories);
    }
    set_config(loaded);
    true
}

/// Build a squircle for a `width` x `height` box as absolute commands.
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_build_path(
    width: f32,
    height: f32,
    radius: f32,
    corner_smoothing: f32,
    out: *mut FfiPathCmd,
    cap: usize,
) -> usize {
    if config().geometry.path_cache {
        let key = PathKey {
            width,
            height,
            radius,
            corner_smoothing,
            stroke_width: 0.0,
        };
        write_path(&path_cache().get(key), out, cap)
    } else {
        write_path(&build_squircle_path(width, height, radius, corner_smoothing), out, cap)
    }
}

/// Parse a `box-shadow` list. Lengths are returned as written, unscaled.
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_parse_box_shadow(
    input: *const c_char,
    out: *mut FfiShadow,
    cap: usize,
) -> usize {
    let Some(input) = c_str(input) else {
        log::debug!("resquircle_parse_box_shadow: null or non-UTF-8 input");
        return 0;
    };
    let shadows: Vec<FfiShadow> = parse_box_shadow(input).iter().map(FfiShadow::from).collect();
    unsafe { write_out(&shadows, out, cap) }
}

/// Create a view handle. Release it with [`resquircle_view_free`].
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_new(width: f32, height: f32) -> *mut ViewHandle {
    Box::into_raw(Box::new(ViewHandle::new(width, height)))
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_free(view: *mut ViewHandle) {
    if view.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(view) });
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_set_size(view: *mut ViewHandle, width: f32, height: f32) {
    if let Some(view) = view_mut(view) {
        view.layers_mut().update(|p| {
            p.width = width;
            p.height = height;
        });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_set_border_radius(view: *mut ViewHandle, radius: f32) {
    if let Some(view) = view_mut(view) {
        view.layers_mut().update(|p| p.border_radius = radius);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_set_corner_smoothing(view: *mut ViewHandle, smoothing: f32) {
    if let Some(view) = view_mut(view) {
        view.layers_mut().update(|p| p.corner_smoothing = smoothing);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_set_border_width(view: *mut ViewHandle, border_width: f32) {
    if let Some(view) = view_mut(view) {
        view.layers_mut().update(|p| p.border_width = border_width);
    }
}

/// Set the view's shadow list; null clears it. Returns the number of
/// shadows kept after parsing.
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_set_box_shadow(view: *mut ViewHandle, value: *const c_char) -> usize {
    let Some(view) = view_mut(view) else {
        return 0;
    };
    view.set_box_shadow(c_str(value));
    view.shadows().len()
}

/// Scaled shadow at `index`; false when out of range.
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_shadow(view: *mut ViewHandle, index: usize, out: *mut FfiShadow) -> bool {
    let Some(view) = view_mut(view) else {
        return false;
    };
    match (view.shadows().get(index), unsafe { out.as_mut() }) {
        (Some(shadow), Some(out)) => {
            *out = FfiShadow::from(shadow);
            true
        }
        _ => false,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_fill_path(view: *mut ViewHandle, out: *mut FfiPathCmd, cap: usize) -> usize {
    view_mut(view).map_or(0, |v| write_path(&v.layers_mut().fill_path(), out, cap))
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_outer_path(view: *mut ViewHandle, out: *mut FfiPathCmd, cap: usize) -> usize {
    view_mut(view).map_or(0, |v| write_path(&v.layers_mut().outer_path(), out, cap))
}

#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_clip_path(view: *mut ViewHandle, out: *mut FfiPathCmd, cap: usize) -> usize {
    view_mut(view).map_or(0, |v| write_path(&v.layers_mut().clip_path(), out, cap))
}

/// Silhouette for the shadow at `index`, grown by its spread, relative to
/// the view origin. 0 when `index` is out of range.
#[unsafe(no_mangle)]
pub extern "C" fn resquircle_view_shadow_path(
    view: *mut ViewHandle,
    index: usize,
    out: *mut FfiPathCmd,
    cap: usize,
) -> usize {
    let Some(path) = view_mut(view).and_then(|v| v.shadow_path(index)) else {
        return 0;
    };
    let cmds = path_to_ffi(&path);
    unsafe { write_out(&cmds, out, cap) }
}

//! Density helpers shared by the shells.
//!
//! Lengths coming out of the shadow parser and component props are in
//! density-independent units; shells scale them before building paths.

#[inline]
fn sane_scale(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

/// Convert a density-independent length to device pixels.
#[inline]
pub fn dp_to_px(value: f32, scale_factor: f32) -> f32 {
    value * sane_scale(scale_factor)
}

/// Convert device pixels back to density-independent units.
#[inline]
pub fn px_to_dp(value: f32, scale_factor: f32) -> f32 {
    value / sane_scale(scale_factor)
}

/// Snap a coordinate to the nearest device pixel for crisp edges at a given scale factor.
#[inline]
pub fn snap_to_device(v: f32, scale_factor: f32) -> f32 {
    let sf = sane_scale(scale_factor);
    (v * sf).round() / sf
}

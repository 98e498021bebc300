//! Corner curve parameters for a smoothed ("squircle") corner.
//!
//! Each corner is decomposed into a cubic ease out of the straight edge, a
//! circular arc, and a mirrored cubic back into the next edge. The seven
//! values in [`CurveProperties`] fully describe that decomposition for one
//! corner; all four corners share them.

/// Per-corner curve parameters, in the same unit as the box dimensions.
///
/// `p` is the distance from the corner along each edge at which the curve
/// starts. `a`, `b`, `c` and `d` are the control offsets of the two cubic
/// segments, and `arc_section_length` is the per-axis extent of the circular
/// arc between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveProperties {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub p: f32,
    pub arc_section_length: f32,
    pub corner_radius: f32,
}

#[inline]
fn to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Degrees swept by the circular part of a corner for a given smoothing.
#[inline]
pub fn arc_measure(corner_smoothing: f32) -> f32 {
    90.0 * (1.0 - corner_smoothing)
}

/// Compute the curve parameters for one corner.
///
/// `corner_smoothing` must already be clamped to `[0, 1]` and
/// `rounding_and_smoothing_budget` is half the shorter box side, which keeps
/// opposing corners from overlapping. When the smoothed reach `p` exceeds the
/// budget, `a` and `b` are redistributed so the curve still fits.
pub fn compute_curve_properties(
    corner_radius: f32,
    corner_smoothing: f32,
    rounding_and_smoothing_budget: f32,
) -> CurveProperties {
    let mut p = (1.0 + corner_smoothing) * corner_radius;

    let arc_measure = arc_measure(corner_smoothing);
    let arc_section_length = to_radians(arc_measure / 2.0).sin() * corner_radius * 2f32.sqrt();
    let angle_alpha = (90.0 - arc_measure) / 2.0;
    let p3_to_p4_distance = corner_radius * to_radians(angle_alpha / 2.0).tan();
    let angle_beta = 45.0 * corner_smoothing;
    let c = p3_to_p4_distance * to_radians(angle_beta).cos();
    let d = c * to_radians(angle_beta).tan();
    let mut b = (p - arc_section_length - c - d) / 3.0;
    let mut a = 2.0 * b;

    if p > rounding_and_smoothing_budget {
        let p1_to_p3_max_distance = rounding_and_smoothing_budget - d - arc_section_length - c;
        let min_a = p1_to_p3_max_distance / 6.0;
        let max_b = p1_to_p3_max_distance - min_a;
        b = b.min(max_b);
        a = p1_to_p3_max_distance - b;
        p = p.min(rounding_and_smoothing_budget);
    }

    CurveProperties {
        a,
        b,
        c,
        d,
        p,
        arc_section_length,
        corner_radius,
    }
}

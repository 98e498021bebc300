use std::sync::Arc;

use anyhow::Result;
use squircle_core::{
    ColorLinPremul, DEFAULT_TOLERANCE, PathCommand, SquircleLayers, SquircleProps, Segment,
    SharedPathCache, PathKey, build_squircle_path, compute_curve_properties, tessellate_fill,
};

#[test]
fn non_positive_radius_is_exactly_the_rectangle() {
    for radius in [0.0, -5.0] {
        let path = build_squircle_path(120.0, 48.0, radius, 0.6);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo([0.0, 0.0]),
                PathCommand::LineTo([120.0, 0.0]),
                PathCommand::LineTo([120.0, 48.0]),
                PathCommand::LineTo([0.0, 48.0]),
                PathCommand::Close,
            ]
        );
    }
}

#[test]
fn oversized_radius_uses_half_the_short_side() {
    let clamped = build_squircle_path(80.0, 40.0, 500.0, 0.6);
    let exact = build_squircle_path(80.0, 40.0, 20.0, 0.6);
    assert_eq!(clamped, exact);

    let arc_radii: Vec<f32> = clamped
        .commands
        .iter()
        .filter_map(|c| match c {
            PathCommand::ArcTo { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(arc_radii, vec![20.0; 4]);
}

#[test]
fn zero_smoothing_sweeps_quarter_circles() {
    let path = build_squircle_path(100.0, 60.0, 12.0, 0.0);
    let sweeps: Vec<f32> = path
        .segments()
        .into_iter()
        .filter_map(|s| match s {
            Segment::Arc { sweep, .. } => Some(sweep.sweep),
            _ => None,
        })
        .collect();
    assert_eq!(sweeps.len(), 4);
    for sweep in sweeps {
        assert!((sweep - 90.0).abs() < 1e-2, "sweep {sweep}");
    }
}

#[test]
fn every_corner_has_three_segments_and_four_edges() {
    let path = build_squircle_path(200.0, 90.0, 24.0, 0.8);
    let segments = path.segments();
    let cubics = segments.iter().filter(|s| matches!(s, Segment::Cubic { .. })).count();
    let arcs = segments.iter().filter(|s| matches!(s, Segment::Arc { .. })).count();
    let lines = segments.iter().filter(|s| matches!(s, Segment::Line { .. })).count();
    assert_eq!((cubics, arcs), (8, 4));
    // three explicit edges; the fourth is drawn by close
    assert_eq!(lines, 3);
    assert!(matches!(segments.last(), Some(Segment::Close)));
}

#[test]
fn curve_properties_are_bit_identical() {
    let a = compute_curve_properties(9.5, 0.33, 21.0);
    let b = compute_curve_properties(9.5, 0.33, 21.0);
    assert_eq!(format!("{a:?}"), format!("{b:?}"));
    assert_eq!(a.p.to_bits(), b.p.to_bits());
}

#[test]
fn repeated_builds_match_and_cache_hits_share_the_path() {
    assert_eq!(
        build_squircle_path(64.0, 64.0, 16.0, 0.6),
        build_squircle_path(64.0, 64.0, 16.0, 0.6)
    );

    let cache = SharedPathCache::new();
    let key = PathKey {
        width: 64.0,
        height: 64.0,
        radius: 16.0,
        corner_smoothing: 0.6,
        stroke_width: 0.0,
    };
    let first = cache.get(key);
    let second = cache.get(key);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn layers_nest_inside_each_other() {
    let mut layers = SquircleLayers::new(
        SquircleProps::new(120.0, 80.0, 20.0)
            .with_corner_smoothing(0.6)
            .with_border_width(4.0),
    );
    let outer = layers.outer_path().to_absolute().bounds();
    let fill = layers.fill_path().to_absolute().bounds();
    let clip = layers.clip_path().to_absolute().bounds();
    let shadow = layers.shadow_path(0, 6.0).to_absolute().bounds();
    let (Some(outer), Some(fill), Some(clip), Some(shadow)) = (outer, fill, clip, shadow) else {
        panic!("every layer should have bounds");
    };

    assert!(shadow.w > outer.w && shadow.x < outer.x);
    assert!(fill.w < outer.w);
    assert!(clip.w < fill.w);
    assert!((clip.x - 4.0).abs() < 1e-3);
}

#[test]
fn squircle_fill_sits_between_rounded_and_sharp_rectangles() -> Result<()> {
    let path = build_squircle_path(100.0, 100.0, 30.0, 1.0).to_absolute();
    let mesh = tessellate_fill(&path, ColorLinPremul::from_srgba_u8([0, 0, 0, 255]), DEFAULT_TOLERANCE)?;
    let area: f32 = mesh
        .indices
        .chunks(3)
        .map(|t| {
            let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize].pos);
            ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
        })
        .sum();
    assert!(area < 100.0 * 100.0);
    assert!(area > 100.0 * 100.0 - 30.0 * 30.0 * 4.0);
    Ok(())
}

#[test]
fn oversized_negative_spread_fills_nothing() -> Result<()> {
    let mut layers = SquircleLayers::new(SquircleProps::new(60.0, 60.0, 10.0));
    let path = layers.shadow_path(0, -45.0).to_absolute();
    let bounds = path.bounds().expect("bounds");
    assert_eq!((bounds.w, bounds.h), (0.0, 0.0));
    assert_eq!((bounds.x, bounds.y), (30.0, 30.0));

    let mesh = tessellate_fill(&path, ColorLinPremul::from_srgba_u8([0, 0, 0, 255]), DEFAULT_TOLERANCE)?;
    let area: f32 = mesh
        .indices
        .chunks(3)
        .map(|t| {
            let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize].pos);
            ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
        })
        .sum();
    assert!(area < 1e-3);
    Ok(())
}

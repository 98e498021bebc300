//! Bridging squircle geometry and colors into tiny-skia types.

use squircle_core::{FillRule, Path, PathCmd};
use squircle_css::ShadowColor;
use tiny_skia::PathBuilder;

/// `None` when the path has no drawable segments.
pub fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for cmd in &path.cmds {
        match *cmd {
            PathCmd::MoveTo([x, y]) => pb.move_to(x, y),
            PathCmd::LineTo([x, y]) => pb.line_to(x, y),
            PathCmd::CubicTo([x1, y1], [x2, y2], [x, y]) => pb.cubic_to(x1, y1, x2, y2, x, y),
            PathCmd::Close => pb.close(),
        }
    }
    pb.finish()
}

pub fn fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

pub fn skia_color(color: ShadowColor) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

pub fn solid_paint(color: ShadowColor) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use squircle_core::build_squircle_path;

    #[test]
    fn squircle_converts_with_matching_bounds() {
        let path = build_squircle_path(40.0, 30.0, 8.0, 0.6).to_absolute();
        let skia = to_skia_path(&path).expect("path");
        let bounds = skia.bounds();
        assert!((bounds.left() - 0.0).abs() < 1e-3);
        assert!((bounds.top() - 0.0).abs() < 1e-3);
        assert!((bounds.right() - 40.0).abs() < 1e-3);
        assert!((bounds.bottom() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn empty_path_is_none() {
        assert!(to_skia_path(&Path::default()).is_none());
    }
}

use lyon_geom::{CubicBezierSegment, point};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Absolute drawing command, the form backends without arc or relative
/// primitives consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    CubicTo([f32; 2], [f32; 2], [f32; 2]),
    Close,
}

/// Flattened path in absolute coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
    pub fill_rule: FillRule,
}

impl Path {
    /// Shift every point by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Path {
        let shift = |p: [f32; 2]| [p[0] + dx, p[1] + dy];
        let cmds = self
            .cmds
            .iter()
            .map(|cmd| match *cmd {
                PathCmd::MoveTo(p) => PathCmd::MoveTo(shift(p)),
                PathCmd::LineTo(p) => PathCmd::LineTo(shift(p)),
                PathCmd::CubicTo(c1, c2, p) => PathCmd::CubicTo(shift(c1), shift(c2), shift(p)),
                PathCmd::Close => PathCmd::Close,
            })
            .collect();
        Path {
            cmds,
            fill_rule: self.fill_rule,
        }
    }

    /// Tight bounding box of the drawn outline, `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        let mut include = |p: [f32; 2]| {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        };
        let mut current = [0.0f32; 2];
        let mut any = false;
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => {
                    include(p);
                    current = p;
                    any = true;
                }
                PathCmd::CubicTo(c1, c2, p) => {
                    let seg = CubicBezierSegment {
                        from: point(current[0], current[1]),
                        ctrl1: point(c1[0], c1[1]),
                        ctrl2: point(c2[0], c2[1]),
                        to: point(p[0], p[1]),
                    };
                    let bb = seg.bounding_box();
                    include([bb.min.x, bb.min.y]);
                    include([bb.max.x, bb.max.y]);
                    current = p;
                    any = true;
                }
                PathCmd::Close => {}
            }
        }
        any.then(|| Rect::new(min[0], min[1], max[0] - min[0], max[1] - min[1]))
    }
}

//! Squircle path construction.
//!
//! [`build_squircle_path`] walks the four corners clockwise starting on the
//! top edge at `(width - p, 0)` and emits a [`SquirclePath`]: an ordered list
//! of [`PathCommand`]s whose cubic segments are relative to the current
//! point. Shells either replay the commands natively or call
//! [`SquirclePath::to_absolute`] for a flattened move/line/cubic form.

use crate::geometry::{CurveProperties, compute_curve_properties};
use crate::shape::{FillRule, Path, PathCmd};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo([f32; 2]),
    /// Cubic bezier; both control points and the endpoint are deltas from
    /// the current point.
    CubicTo {
        c1: [f32; 2],
        c2: [f32; 2],
        end: [f32; 2],
    },
    /// Clockwise circular arc around `center` ending at `current + delta`.
    ArcTo {
        center: [f32; 2],
        radius: f32,
        delta: [f32; 2],
    },
    LineTo([f32; 2]),
    Close,
}

/// Start angle and clockwise sweep of an arc, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSweep {
    pub start_angle: f32,
    pub sweep: f32,
}

impl ArcSweep {
    /// Angles of `from` and `to` around `center`. The raw delta is folded into
    /// `[0, 360)` so the arc never takes the long way around.
    pub fn between(center: [f32; 2], from: [f32; 2], to: [f32; 2]) -> Self {
        let start_angle = (from[1] - center[1]).atan2(from[0] - center[0]).to_degrees();
        let end_angle = (to[1] - center[1]).atan2(to[0] - center[0]).to_degrees();
        let mut sweep = end_angle - start_angle;
        if sweep < 0.0 {
            sweep += 360.0;
        }
        Self { start_angle, sweep }
    }

    pub fn end_angle(&self) -> f32 {
        self.start_angle + self.sweep
    }
}

/// A resolved segment with absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Move([f32; 2]),
    Line {
        from: [f32; 2],
        to: [f32; 2],
    },
    Cubic {
        from: [f32; 2],
        c1: [f32; 2],
        c2: [f32; 2],
        to: [f32; 2],
    },
    Arc {
        center: [f32; 2],
        radius: f32,
        from: [f32; 2],
        to: [f32; 2],
        sweep: ArcSweep,
    },
    Close,
}

/// Closed squircle outline, always wound clockwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SquirclePath {
    pub commands: Vec<PathCommand>,
}

#[inline]
fn add(p: [f32; 2], d: [f32; 2]) -> [f32; 2] {
    [p[0] + d[0], p[1] + d[1]]
}

impl SquirclePath {
    /// Axis-aligned rectangle, used whenever there is nothing to round.
    pub fn rect(width: f32, height: f32) -> Self {
        Self {
            commands: vec![
                PathCommand::MoveTo([0.0, 0.0]),
                PathCommand::LineTo([width, 0.0]),
                PathCommand::LineTo([width, height]),
                PathCommand::LineTo([0.0, height]),
                PathCommand::Close,
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolve relative commands into absolute segments, in order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.commands.len());
        let mut current = [0.0f32; 2];
        let mut start = current;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    current = p;
                    start = p;
                    out.push(Segment::Move(p));
                }
                PathCommand::LineTo(p) => {
                    out.push(Segment::Line { from: current, to: p });
                    current = p;
                }
                PathCommand::CubicTo { c1, c2, end } => {
                    let to = add(current, end);
                    out.push(Segment::Cubic {
                        from: current,
                        c1: add(current, c1),
                        c2: add(current, c2),
                        to,
                    });
                    current = to;
                }
                PathCommand::ArcTo {
                    center,
                    radius,
                    delta,
                } => {
                    let to = add(current, delta);
                    out.push(Segment::Arc {
                        center,
                        radius,
                        from: current,
                        to,
                        sweep: ArcSweep::between(center, current, to),
                    });
                    current = to;
                }
                PathCommand::Close => {
                    out.push(Segment::Close);
                    current = start;
                }
            }
        }
        out
    }

    /// Flatten into absolute move/line/cubic commands. Arcs become one cubic
    /// per started quarter turn.
    pub fn to_absolute(&self) -> Path {
        let mut cmds = Vec::with_capacity(self.commands.len() + 4);
        for seg in self.segments() {
            match seg {
                Segment::Move(p) => cmds.push(PathCmd::MoveTo(p)),
                Segment::Line { to, .. } => cmds.push(PathCmd::LineTo(to)),
                Segment::Cubic { c1, c2, to, .. } => cmds.push(PathCmd::CubicTo(c1, c2, to)),
                Segment::Arc {
                    center,
                    radius,
                    to,
                    sweep,
                    ..
                } => arc_to_cubics(&mut cmds, center, radius, sweep, to),
                Segment::Close => cmds.push(PathCmd::Close),
            }
        }
        Path {
            cmds,
            fill_rule: FillRule::NonZero,
        }
    }

    /// Shift the whole outline by `(dx, dy)`. Relative deltas are unchanged.
    pub fn translate(&self, dx: f32, dy: f32) -> SquirclePath {
        let shift = |p: [f32; 2]| [p[0] + dx, p[1] + dy];
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(shift(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(shift(p)),
                PathCommand::ArcTo {
                    center,
                    radius,
                    delta,
                } => PathCommand::ArcTo {
                    center: shift(center),
                    radius,
                    delta,
                },
                other => other,
            })
            .collect();
        SquirclePath { commands }
    }
}

fn arc_to_cubics(
    cmds: &mut Vec<PathCmd>,
    center: [f32; 2],
    radius: f32,
    sweep: ArcSweep,
    end: [f32; 2],
) {
    if sweep.sweep <= 0.0 || radius <= 0.0 {
        cmds.push(PathCmd::LineTo(end));
        return;
    }
    let pieces = (sweep.sweep / 90.0 - 1e-3).ceil().max(1.0) as usize;
    let step = sweep.sweep.to_radians() / pieces as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    let mut angle = sweep.start_angle.to_radians();
    for i in 0..pieces {
        let next = angle + step;
        let (s0, c0) = angle.sin_cos();
        let (s1, c1) = next.sin_cos();
        let ctrl1 = [
            center[0] + radius * (c0 - k * s0),
            center[1] + radius * (s0 + k * c0),
        ];
        let ctrl2 = [
            center[0] + radius * (c1 + k * s1),
            center[1] + radius * (s1 - k * c1),
        ];
        // Land exactly on the recorded endpoint to avoid drift at the seam.
        let to = if i + 1 == pieces {
            end
        } else {
            [center[0] + radius * c1, center[1] + radius * s1]
        };
        cmds.push(PathCmd::CubicTo(ctrl1, ctrl2, to));
        angle = next;
    }
}

/// Build a closed squircle for a `width` x `height` box.
///
/// The radius is clamped to half of each side and smoothing to `[0, 1]`. A
/// non-positive radius or size yields [`SquirclePath::rect`].
pub fn build_squircle_path(
    width: f32,
    height: f32,
    radius: f32,
    corner_smoothing: f32,
) -> SquirclePath {
    let radius = if radius.is_nan() { 0.0 } else { radius };
    let smoothing = if corner_smoothing.is_nan() {
        0.0
    } else {
        corner_smoothing.clamp(0.0, 1.0)
    };
    let checked_radius = radius.min(width / 2.0).min(height / 2.0);

    if checked_radius <= 0.0 || width <= 0.0 || height <= 0.0 {
        return SquirclePath::rect(width, height);
    }

    let cp = compute_curve_properties(checked_radius, smoothing, width.min(height) / 2.0);
    corners(width, height, &cp)
}

/// Same outline for a box shrunk by `inset`, shifted so it stays centered.
/// A negative inset grows the box.
///
/// The shrunk size never goes below zero: an inset larger than a side
/// collapses that side to an empty rectangle at the center.
pub fn build_inset_squircle_path(
    width: f32,
    height: f32,
    radius: f32,
    corner_smoothing: f32,
    inset: f32,
) -> SquirclePath {
    let inner_w = (width - inset).max(0.0);
    let inner_h = (height - inset).max(0.0);
    let path = build_squircle_path(inner_w, inner_h, radius, corner_smoothing);
    let dx = (width - inner_w) / 2.0;
    let dy = (height - inner_h) / 2.0;
    if dx != 0.0 || dy != 0.0 {
        path.translate(dx, dy)
    } else {
        path
    }
}

fn corners(width: f32, height: f32, cp: &CurveProperties) -> SquirclePath {
    let CurveProperties {
        a,
        b,
        c,
        d,
        p,
        arc_section_length: arc,
        corner_radius: r,
    } = *cp;

    let cubic = |c1: [f32; 2], c2: [f32; 2], end: [f32; 2]| PathCommand::CubicTo { c1, c2, end };
    let arc_to = |center: [f32; 2], delta: [f32; 2]| PathCommand::ArcTo {
        center,
        radius: r,
        delta,
    };

    let commands = vec![
        PathCommand::MoveTo([width - p, 0.0]),
        // top right
        cubic([a, 0.0], [a + b, 0.0], [a + b + c, d]),
        arc_to([width - r, r], [arc, arc]),
        cubic([d, c], [d, c + d], [d, a + b + c]),
        PathCommand::LineTo([width, height - p]),
        // bottom right
        cubic([0.0, a], [0.0, a + b], [-d, a + b + c]),
        arc_to([width - r, height - r], [-arc, arc]),
        cubic([-c, d], [-(b + c), d], [-(a + b + c), d]),
        PathCommand::LineTo([p, height]),
        // bottom left
        cubic([-a, 0.0], [-(a + b), 0.0], [-(a + b + c), -d]),
        arc_to([r, height - r], [-arc, -arc]),
        cubic([-d, -c], [-d, -(b + c)], [-d, -(a + b + c)]),
        PathCommand::LineTo([0.0, p]),
        // top left
        cubic([0.0, -a], [0.0, -(a + b)], [d, -(a + b + c)]),
        arc_to([r, r], [arc, -arc]),
        cubic([c, -d], [b + c, -d], [a + b + c, -d]),
        PathCommand::Close,
    ];

    SquirclePath { commands }
}

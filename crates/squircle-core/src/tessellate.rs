//! Triangle meshes for GPU shells, built with lyon.

use bytemuck::{Pod, Zeroable};
use lyon_geom::point;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, LineCap, LineJoin, StrokeOptions,
    StrokeTessellator, StrokeVertex, TessellationError, VertexBuffers,
};
use thiserror::Error;

use crate::color::ColorLinPremul;
use crate::shape::{FillRule, Path, PathCmd};

/// Default flattening tolerance in device pixels.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Error)]
pub enum TessellateError {
    #[error("tessellation failed: {0:?}")]
    Lyon(TessellationError),
    #[error("invalid tolerance {0}")]
    Tolerance(f32),
}

fn check_tolerance(tolerance: f32) -> Result<f32, TessellateError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(TessellateError::Tolerance(tolerance))
    }
}

fn to_lyon(path: &Path) -> lyon_path::Path {
    let mut builder = lyon_path::Path::builder();
    let mut started = false;
    for cmd in &path.cmds {
        match *cmd {
            PathCmd::MoveTo(p) => {
                if started {
                    builder.end(false);
                }
                builder.begin(point(p[0], p[1]));
                started = true;
            }
            PathCmd::LineTo(p) => {
                if !started {
                    builder.begin(point(p[0], p[1]));
                    started = true;
                } else {
                    builder.line_to(point(p[0], p[1]));
                }
            }
            PathCmd::CubicTo(c1, c2, p) => {
                if !started {
                    builder.begin(point(p[0], p[1]));
                    started = true;
                } else {
                    builder.cubic_bezier_to(
                        point(c1[0], c1[1]),
                        point(c2[0], c2[1]),
                        point(p[0], p[1]),
                    );
                }
            }
            PathCmd::Close => {
                if started {
                    builder.end(true);
                    started = false;
                }
            }
        }
    }
    if started {
        builder.end(false);
    }
    builder.build()
}

fn premul(color: ColorLinPremul) -> [f32; 4] {
    [color.r, color.g, color.b, color.a]
}

/// Fill `path` into a triangle mesh with a solid premultiplied color.
pub fn tessellate_fill(
    path: &Path,
    color: ColorLinPremul,
    tolerance: f32,
) -> Result<Mesh, TessellateError> {
    let tolerance = check_tolerance(tolerance)?;
    let lyon_path = to_lyon(path);
    let base_opts = FillOptions::default().with_tolerance(tolerance);
    let options = match path.fill_rule {
        FillRule::NonZero => base_opts.with_fill_rule(lyon_tessellation::FillRule::NonZero),
        FillRule::EvenOdd => base_opts.with_fill_rule(lyon_tessellation::FillRule::EvenOdd),
    };
    let rgba = premul(color);
    let mut geom: VertexBuffers<Vertex, u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            lyon_path.as_slice(),
            &options,
            &mut BuffersBuilder::new(&mut geom, |fv: FillVertex| {
                let p = fv.position();
                Vertex {
                    pos: [p.x, p.y],
                    color: rgba,
                }
            }),
        )
        .map_err(TessellateError::Lyon)?;
    Ok(Mesh {
        vertices: geom.vertices,
        indices: geom.indices,
    })
}

/// Stroke `path` with round joins and caps, the way the shells draw borders.
pub fn tessellate_stroke(
    path: &Path,
    width: f32,
    color: ColorLinPremul,
    tolerance: f32,
) -> Result<Mesh, TessellateError> {
    let tolerance = check_tolerance(tolerance)?;
    if !(width > 0.0) {
        return Ok(Mesh::default());
    }
    let lyon_path = to_lyon(path);
    let options = StrokeOptions::default()
        .with_line_width(width)
        .with_tolerance(tolerance)
        .with_line_join(LineJoin::Round)
        .with_start_cap(LineCap::Round)
        .with_end_cap(LineCap::Round);
    let rgba = premul(color);
    let mut geom: VertexBuffers<Vertex, u32> = VertexBuffers::new();
    StrokeTessellator::new()
        .tessellate_path(
            lyon_path.as_slice(),
            &options,
            &mut BuffersBuilder::new(&mut geom, |sv: StrokeVertex| {
                let p = sv.position();
                Vertex {
                    pos: [p.x, p.y],
                    color: rgba,
                }
            }),
        )
        .map_err(TessellateError::Lyon)?;
    Ok(Mesh {
        vertices: geom.vertices,
        indices: geom.indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::build_squircle_path;

    fn mesh_area(mesh: &Mesh) -> f32 {
        mesh.indices
            .chunks(3)
            .map(|tri| {
                let a = mesh.vertices[tri[0] as usize].pos;
                let b = mesh.vertices[tri[1] as usize].pos;
                let c = mesh.vertices[tri[2] as usize].pos;
                ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn rectangle_fill_covers_the_box() {
        let path = build_squircle_path(30.0, 20.0, 0.0, 0.6).to_absolute();
        let mesh = tessellate_fill(&path, ColorLinPremul::from_srgba_u8([255, 0, 0, 255]), DEFAULT_TOLERANCE)
            .expect("fill");
        assert!((mesh_area(&mesh) - 600.0).abs() < 0.5);
        assert!(mesh.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn squircle_fill_is_smaller_than_its_box() {
        let path = build_squircle_path(100.0, 100.0, 30.0, 0.6).to_absolute();
        let mesh = tessellate_fill(&path, ColorLinPremul::TRANSPARENT, DEFAULT_TOLERANCE).expect("fill");
        let area = mesh_area(&mesh);
        assert!(area < 10_000.0);
        // still larger than the circular-corner rounded rect of the same radius would remove
        assert!(area > 10_000.0 - 4.0 * 30.0 * 30.0);
    }

    #[test]
    fn zero_width_stroke_is_empty() {
        let path = build_squircle_path(10.0, 10.0, 2.0, 0.6).to_absolute();
        let mesh = tessellate_stroke(&path, 0.0, ColorLinPremul::TRANSPARENT, DEFAULT_TOLERANCE).expect("stroke");
        assert!(mesh.is_empty());
    }

    #[test]
    fn rejects_bad_tolerance() {
        let path = build_squircle_path(10.0, 10.0, 2.0, 0.6).to_absolute();
        assert!(matches!(
            tessellate_fill(&path, ColorLinPremul::TRANSPARENT, 0.0),
            Err(TessellateError::Tolerance(_))
        ));
    }
}

//! CPU-side geometry for the three supported primitives.
//!
//! Each [`Primitive`] produces a [`RawGeometry`] template: flat-shaded vertices
//! (every face owns its vertices, so normals stay per-face) and a `u32` index
//! list. The templates never change after creation. Per-axis scaling produces
//! a new vertex array through [`scale_vertices`].
//!
//! | Primitive    | Vertices | Indices | Scalable |
//! |--------------|----------|---------|----------|
//! | `Cube`       | 24       | 36      | yes      |
//! | `Quad`       | 4        | 6       | no       |
//! | `Octahedron` | 24       | 24      | no       |

use crate::mesh::Vertex3d;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Errors from selecting geometry.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// The name does not match any primitive.
    #[error("unknown primitive '{0}' (expected cube, quad or octahedron)")]
    UnknownPrimitive(String),
}

/// The shape being displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Textured box with independently scalable axes.
    #[default]
    Cube,
    /// Unit square in the XY plane, facing the camera.
    Quad,
    /// Regular octahedron with its tips on the axes.
    Octahedron,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Primitive::Cube, Primitive::Quad, Primitive::Octahedron];

    /// Builds the base geometry template.
    pub fn geometry(self) -> RawGeometry {
        match self {
            Primitive::Cube => cube(Vec3::splat(0.5)),
            Primitive::Quad => quad(0.5),
            Primitive::Octahedron => octahedron(0.5),
        }
    }

    /// Whether non-uniform scale is applied to this primitive's vertices.
    pub fn supports_scale(self) -> bool {
        matches!(self, Primitive::Cube)
    }

    /// Whether the primitive samples the loaded texture by default.
    pub fn textured_by_default(self) -> bool {
        matches!(self, Primitive::Cube)
    }

    /// Number of indices drawn for this primitive.
    pub fn index_count(self) -> u32 {
        match self {
            Primitive::Cube => 36,
            Primitive::Quad => 6,
            Primitive::Octahedron => 24,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Cube => "cube",
            Primitive::Quad => "quad",
            Primitive::Octahedron => "octahedron",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GeometryError::UnknownPrimitive(s.to_string()))
    }
}

/// Vertex and index data before GPU upload.
#[derive(Clone, Debug)]
pub struct RawGeometry {
    /// Vertex positions, normals, and UVs.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }
}

/// Scales every vertex position component-wise by `scale`.
///
/// Normals and UVs are copied unchanged. The template is not modified.
pub fn scale_vertices(base: &[Vertex3d], scale: Vec3) -> Vec<Vertex3d> {
    base.iter()
        .map(|v| Vertex3d {
            position: (Vec3::from(v.position) * scale).to_array(),
            ..*v
        })
        .collect()
}

/// Box centered at the origin with the given half extents.
fn cube(half: Vec3) -> RawGeometry {
    let Vec3 { x, y, z } = half;

    #[rustfmt::skip]
    let vertices = vec![
        // front (z+)
        Vertex3d::new([-x, -y,  z], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
        Vertex3d::new([ x, -y,  z], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
        Vertex3d::new([ x,  y,  z], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
        Vertex3d::new([-x,  y,  z], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
        // back (z-)
        Vertex3d::new([-x, -y, -z], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
        Vertex3d::new([ x, -y, -z], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
        Vertex3d::new([ x,  y, -z], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
        Vertex3d::new([-x,  y, -z], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
        // left (x-)
        Vertex3d::new([-x, -y, -z], [-1.0,  0.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([-x, -y,  z], [-1.0,  0.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([-x,  y,  z], [-1.0,  0.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-x,  y, -z], [-1.0,  0.0,  0.0], [0.0, 1.0]),
        // right (x+)
        Vertex3d::new([ x, -y, -z], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ x, -y,  z], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ x,  y,  z], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
        Vertex3d::new([ x,  y, -z], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
        // top (y+)
        Vertex3d::new([-x,  y, -z], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
        Vertex3d::new([-x,  y,  z], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ x,  y,  z], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ x,  y, -z], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
        // bottom (y-)
        Vertex3d::new([-x, -y, -z], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([-x, -y,  z], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
        Vertex3d::new([ x, -y,  z], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([ x, -y, -z], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    ];

    #[rustfmt::skip]
    let indices = vec![
        0,  1,  2,  2,  3,  0,  // front
        4,  5,  6,  6,  7,  4,  // back
        8,  9,  10, 10, 11, 8,  // left
        12, 13, 14, 14, 15, 12, // right
        16, 17, 18, 18, 19, 16, // top
        20, 21, 22, 22, 23, 20, // bottom
    ];

    RawGeometry::new(vertices, indices)
}

/// Square in the XY plane; the normal points at the camera (-Z).
fn quad(half: f32) -> RawGeometry {
    let vertices = vec![
        Vertex3d::new([-half, -half, 0.0], [0.0, 0.0, -1.0], [0.0, 0.0]),
        Vertex3d::new([half, -half, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0]),
        Vertex3d::new([half, half, 0.0], [0.0, 0.0, -1.0], [1.0, 1.0]),
        Vertex3d::new([-half, half, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0]),
    ];
    RawGeometry::new(vertices, vec![0, 1, 2, 2, 3, 0])
}

/// Eight flat triangles, one per octant, with tips at distance `radius`.
fn octahedron(radius: f32) -> RawGeometry {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(24);

    for sx in [1.0f32, -1.0] {
        for sy in [1.0f32, -1.0] {
            for sz in [1.0f32, -1.0] {
                let normal = Vec3::new(sx, sy, sz).normalize().to_array();
                let tips = [
                    ([sx * radius, 0.0, 0.0], [0.0, 0.0]),
                    ([0.0, sy * radius, 0.0], [0.5, 1.0]),
                    ([0.0, 0.0, sz * radius], [1.0, 0.0]),
                ];

                let base = vertices.len() as u32;
                vertices.extend(tips.map(|(p, uv)| Vertex3d::new(p, normal, uv)));

                // keep a consistent winding across mirrored octants
                if sx * sy * sz > 0.0 {
                    indices.extend([base, base + 1, base + 2]);
                } else {
                    indices.extend([base, base + 2, base + 1]);
                }
            }
        }
    }

    RawGeometry::new(vertices, indices)
}

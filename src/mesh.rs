//! The base mesh every instance draws: a unit cube centered on the origin.

use bytemuck::{Pod, Zeroable};

use crate::math::Vec3;

/// Position and face normal of one mesh vertex (24 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

const fn vertex(px: f32, py: f32, pz: f32, normal: Vec3) -> MeshVertex {
    MeshVertex {
        position: Vec3::new(px, py, pz),
        normal,
    }
}

const NEG_X: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
const POS_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const NEG_Y: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const POS_Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const NEG_Z: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const POS_Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

pub const CUBE_VERTEX_COUNT: usize = 36;

/// Non-indexed triangle list, two triangles per face.
///
/// Triangles wind clockwise when seen from outside the cube, which is the
/// front-facing order for the backend's culling.
pub static CUBE_VERTICES: [MeshVertex; CUBE_VERTEX_COUNT] = [
    // -Z
    vertex(-0.5, -0.5, -0.5, NEG_Z),
    vertex(-0.5, 0.5, -0.5, NEG_Z),
    vertex(0.5, 0.5, -0.5, NEG_Z),
    vertex(0.5, 0.5, -0.5, NEG_Z),
    vertex(0.5, -0.5, -0.5, NEG_Z),
    vertex(-0.5, -0.5, -0.5, NEG_Z),
    // -X
    vertex(-0.5, -0.5, 0.5, NEG_X),
    vertex(-0.5, 0.5, 0.5, NEG_X),
    vertex(-0.5, 0.5, -0.5, NEG_X),
    vertex(-0.5, 0.5, -0.5, NEG_X),
    vertex(-0.5, -0.5, -0.5, NEG_X),
    vertex(-0.5, -0.5, 0.5, NEG_X),
    // +Z
    vertex(0.5, -0.5, 0.5, POS_Z),
    vertex(0.5, 0.5, 0.5, POS_Z),
    vertex(-0.5, 0.5, 0.5, POS_Z),
    vertex(-0.5, 0.5, 0.5, POS_Z),
    vertex(-0.5, -0.5, 0.5, POS_Z),
    vertex(0.5, -0.5, 0.5, POS_Z),
    // +X
    vertex(0.5, -0.5, -0.5, POS_X),
    vertex(0.5, 0.5, -0.5, POS_X),
    vertex(0.5, 0.5, 0.5, POS_X),
    vertex(0.5, 0.5, 0.5, POS_X),
    vertex(0.5, -0.5, 0.5, POS_X),
    vertex(0.5, -0.5, -0.5, POS_X),
    // +Y
    vertex(-0.5, 0.5, -0.5, POS_Y),
    vertex(-0.5, 0.5, 0.5, POS_Y),
    vertex(0.5, 0.5, 0.5, POS_Y),
    vertex(0.5, 0.5, 0.5, POS_Y),
    vertex(0.5, 0.5, -0.5, POS_Y),
    vertex(-0.5, 0.5, -0.5, POS_Y),
    // -Y
    vertex(-0.5, -0.5, 0.5, NEG_Y),
    vertex(-0.5, -0.5, -0.5, NEG_Y),
    vertex(0.5, -0.5, -0.5, NEG_Y),
    vertex(0.5, -0.5, -0.5, NEG_Y),
    vertex(0.5, -0.5, 0.5, NEG_Y),
    vertex(-0.5, -0.5, 0.5, NEG_Y),
];

/// Triangles of [`CUBE_VERTICES`] as consecutive vertex triples.
pub fn cube_triangles() -> impl Iterator<Item = &'static [MeshVertex; 3]> {
    CUBE_VERTICES
        .chunks_exact(3)
        .filter_map(|tri| <&[MeshVertex; 3]>::try_from(tri).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn twelve_triangles() {
        assert_eq!(cube_triangles().count(), 12);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
    }

    #[test]
    fn vertices_lie_on_unit_cube() {
        for v in CUBE_VERTICES.iter() {
            for c in [v.position.x, v.position.y, v.position.z] {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }

    #[test]
    fn normals_point_out_of_their_face() {
        for v in CUBE_VERTICES.iter() {
            assert_relative_eq!(v.position.dot(v.normal), 0.5);
            assert_relative_eq!(v.normal.magnitude(), 1.0);
        }
    }

    #[test]
    fn winding_is_clockwise_from_outside() {
        // Left-handed axes: clockwise seen from outside means
        // (b - a) x (c - a) points along the outward normal.
        for [a, b, c] in cube_triangles() {
            let geometric = (b.position - a.position).cross(c.position - a.position);
            assert!(geometric.dot(a.normal) > 0.0);
        }
    }
}

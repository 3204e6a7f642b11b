//! 4x4 matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `v * Mat4`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! # Memory layout
//! Storage is row-major (`data[row][col]`, 16 contiguous floats). The shader
//! side declares its matrices with column-major packing, so it sees the
//! transpose of what is stored here and `mul(M, v)` on the GPU computes the
//! same thing as `v * M` on the CPU. Matrices can therefore be copied into
//! constant buffers byte for byte.
//!
//! # Example
//! ```ignore
//! let clip = Vec4::from_vec3(world, 1.0) * world_to_camera * perspective;
//! ```

use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn zero() -> Self {
        Mat4::new([[0.0; 4]; 4])
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a matrix from four row vectors.
    pub fn from_rows(rows: [Vec4; 4]) -> Self {
        let row = |v: Vec4| [v.x, v.y, v.z, v.w];
        Mat4::new([row(rows[0]), row(rows[1]), row(rows[2]), row(rows[3])])
    }

    /// Creates a translation matrix (translation in the last row).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Left-handed perspective projection with depth mapped to `[0, 1]`.
    ///
    /// The frustum is symmetric. `fov_radians` spans the horizontal extent
    /// (`right = tan(fov / 2) * near`) and the vertical extent is derived from
    /// it through `aspect_h_over_w` (height divided by width). Clip-space `w`
    /// equals view-space `z`.
    pub fn perspective_lh_zero_to_one(
        fov_radians: f32,
        aspect_h_over_w: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let right = (fov_radians * 0.5).tan() * near;
        let left = -right;
        let top = right * aspect_h_over_w;
        let bottom = -top;

        let mut m = Mat4::zero();
        m.data[0][0] = (2.0 * near) / (right - left);
        m.data[2][0] = -(right + left) / (right - left);

        m.data[1][1] = (2.0 * near) / (top - bottom);
        m.data[2][1] = -(top + bottom) / (top - bottom);

        m.data[2][2] = far / (far - near);
        m.data[2][3] = 1.0;
        m.data[3][2] = -(near * far) / (far - near);
        m
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut out = Mat4::zero();
        for row in 0..4 {
            for col in 0..4 {
                out.data[col][row] = self.data[row][col];
            }
        }
        out
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    /// Transforms a point (w = 1), applying the perspective divide when the
    /// resulting w is neither 0 nor 1.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (Vec4::from_vec3(p, 1.0) * *self).to_vec3_perspective()
    }

    /// Transforms a direction (w = 0); translation is ignored.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        (Vec4::from_vec3(d, 0.0) * *self).xyz()
    }
}

/// Matrix multiplication: `v * (A * B) == (v * A) * B`.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Row vector times matrix.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        let d = &m.data;
        Vec4::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0] + self.w * d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1] + self.w * d[3][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2] + self.w * d[3][2],
            self.x * d[0][3] + self.y * d[1][3] + self.z * d[2][3] + self.w * d[3][3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_direction(Vec3::UP), Vec3::UP);
    }

    #[test]
    fn product_applies_left_operand_first() {
        let s = Mat4::scaling(2.0, 2.0, 2.0);
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let p = Vec3::new(1.0, 1.0, 1.0);

        // scale then translate
        assert_eq!((s * t).transform_point(p), Vec3::new(3.0, 2.0, 2.0));
        // translate then scale
        assert_eq!((t * s).transform_point(p), Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Mat4::from_rows([
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        ]);
        let t = m.transpose();
        assert_eq!(t.get(0, 3), 13.0);
        assert_eq!(t.get(3, 0), 4.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn perspective_depth_terms() {
        let p = Mat4::perspective_lh_zero_to_one(66.2_f32.to_radians(), 720.0 / 1280.0, 1.0, 100.0);
        assert_eq!(p.get(2, 3), 1.0);
        assert_relative_eq!(p.get(3, 2), -(1.0 * 100.0) / (100.0 - 1.0), epsilon = 1e-6);
        assert_relative_eq!(p.get(2, 2), 100.0 / 99.0, epsilon = 1e-6);
        assert_eq!(p.get(3, 3), 0.0);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let p = Mat4::perspective_lh_zero_to_one(1.2, 0.75, 0.5, 40.0);
        let near = p.transform_point(Vec3::new(0.0, 0.0, 0.5));
        let far = p.transform_point(Vec3::new(0.0, 0.0, 40.0));
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_frustum_edges_hit_ndc_bounds() {
        let fov = 1.0_f32;
        let aspect = 0.5;
        let near = 1.0;
        let p = Mat4::perspective_lh_zero_to_one(fov, aspect, near, 10.0);

        let half_width = (fov * 0.5).tan() * 5.0;
        let edge = p.transform_point(Vec3::new(half_width, half_width * aspect, 5.0));
        assert_relative_eq!(edge.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(edge.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn storage_is_sixteen_row_major_floats() {
        let m = Mat4::translation(7.0, 8.0, 9.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&m));
        assert_eq!(floats.len(), 16);
        assert_eq!(&floats[12..16], &[7.0, 8.0, 9.0, 1.0]);
    }
}

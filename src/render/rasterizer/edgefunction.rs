//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute a bounding box around the triangle, clipped to the buffer
//! 2. For each pixel center in the box, evaluate three edge functions
//! 3. A pixel is inside the triangle if all edge functions have the same sign
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! The values are proportional to barycentric coordinates:
//! `lambda_i = E_i(P) / E(v0, v1, v2)` where `E_i` is the edge opposite vertex
//! `i`.
//!
//! # Interpolation
//!
//! NDC depth is affine in screen space and is interpolated with the raw
//! barycentrics. World position and normal are interpolated
//! perspective-correctly: each attribute is weighted by `1/w`, then divided by
//! the interpolated `1/w`.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)

use super::{Fragment, PixelShader, ScreenVertex};
use crate::math::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Triangle rasterizer using the edge function algorithm.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Computes the edge function value for point P relative to edge (A -> B).
    #[inline]
    pub fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }

    /// Twice the signed screen-space area.
    ///
    /// Negative for triangles that wind clockwise on screen as seen by the
    /// viewer (y up), which is the front-facing order.
    #[inline]
    pub fn signed_area(triangle: &[ScreenVertex; 3]) -> f32 {
        let [v0, v1, v2] = triangle;
        Self::edge_function(v0.position, v1.position, v2.position)
    }

    /// Fills `triangle` into `buffer`, shading every pixel that passes the
    /// depth test. Returns the number of pixels written.
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &[ScreenVertex; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        let [v0, v1, v2] = triangle;
        let (p0, p1, p2) = (v0.position, v1.position, v2.position);

        let area = Self::signed_area(triangle);
        if area.abs() < f32::EPSILON {
            return 0;
        }
        let inv_area = 1.0 / area;

        let min_x = (p0.x.min(p1.x).min(p2.x).floor() as i32).max(0);
        let max_x = (p0.x.max(p1.x).max(p2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (p0.y.min(p1.y).min(p2.y).floor() as i32).max(0);
        let max_y = (p0.y.max(p1.y).max(p2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = Self::edge_function(p1, p2, p);
                let w1 = Self::edge_function(p2, p0, p);
                let w2 = Self::edge_function(p0, p1, p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }

                let l0 = w0 * inv_area;
                let l1 = w1 * inv_area;
                let l2 = w2 * inv_area;

                let depth = l0 * p0.z + l1 * p1.z + l2 * p2.z;
                if !buffer.depth_test(x, y, depth) {
                    continue;
                }

                let q0 = l0 * v0.inv_w;
                let q1 = l1 * v1.inv_w;
                let q2 = l2 * v2.inv_w;
                let norm = 1.0 / (q0 + q1 + q2);

                let fragment = Fragment {
                    x,
                    y,
                    depth,
                    world: (v0.world * q0 + v1.world * q1 + v2.world * q2) * norm,
                    normal: (v0.normal * q0 + v1.normal * q1 + v2.normal * q2) * norm,
                };
                let color = shader.shade(&fragment);
                if buffer.set_pixel_with_depth(x, y, depth, color) {
                    written += 1;
                }
            }
        }
        written
    }
}

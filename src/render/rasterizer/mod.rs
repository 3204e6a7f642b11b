//! Triangle rasterization for the software backend.
//!
//! Vertices arrive in clip space, are mapped to the viewport as
//! [`ScreenVertex`]es and filled by the [`EdgeFunctionRasterizer`], which
//! hands every covered, depth-passing pixel to a [`PixelShader`].

mod edgefunction;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use shader::{FlatShader, PixelShader, SurfaceShader};

use crate::math::{Vec3, Vec4};

/// A vertex after the perspective divide and viewport transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    /// `x`, `y` in pixels (origin top-left, y down), `z` the NDC depth.
    pub position: Vec3,
    /// `1 / w` of the clip-space position, for perspective-correct
    /// interpolation.
    pub inv_w: f32,
    pub world: Vec3,
    pub normal: Vec3,
}

impl ScreenVertex {
    /// Maps a clip-space position onto a `width` x `height` viewport.
    ///
    /// `clip.w` must be positive; callers drop triangles that reach behind
    /// the eye before getting here.
    pub fn from_clip(clip: Vec4, world: Vec3, normal: Vec3, width: u32, height: u32) -> Self {
        let inv_w = 1.0 / clip.w;
        let ndc = clip.xyz() * inv_w;
        Self {
            position: Vec3::new(
                (ndc.x + 1.0) * 0.5 * width as f32,
                (1.0 - ndc.y) * 0.5 * height as f32,
                ndc.z,
            ),
            inv_w,
            world,
            normal,
        }
    }
}

/// One covered pixel with its interpolated attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub world: Vec3,
    /// Interpolated, not renormalized.
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clip_to_viewport_flips_y() {
        let v = ScreenVertex::from_clip(
            Vec4::new(-2.0, 2.0, 1.0, 2.0),
            Vec3::ZERO,
            Vec3::UP,
            200,
            100,
        );
        assert_relative_eq!(v.position.x, 0.0);
        assert_relative_eq!(v.position.y, 0.0);
        assert_relative_eq!(v.position.z, 0.5);
        assert_relative_eq!(v.inv_w, 0.5);

        let center = ScreenVertex::from_clip(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec3::ZERO, Vec3::UP, 200, 100);
        assert_relative_eq!(center.position.x, 100.0);
        assert_relative_eq!(center.position.y, 50.0);
    }
}

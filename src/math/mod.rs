//! Vector, quaternion and matrix primitives.
//!
//! All types are plain `Copy` values with `#[repr(C)]` layouts so they can be
//! written straight into GPU buffers.

pub mod mat4;
pub mod quat;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Degrees to radians.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * 0.017_453_292
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn radians_matches_std_conversion() {
        for deg in [-360.0_f32, -45.0, 0.0, 15.0, 66.2, 145.0] {
            assert_relative_eq!(radians(deg), deg.to_radians(), epsilon = 1e-5);
        }
    }
}

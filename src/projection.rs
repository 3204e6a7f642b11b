//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the projection
//! parameters (FOV, aspect, near/far planes) and builds the left-handed,
//! zero-to-one depth matrix the backend consumes.

use crate::math::{radians, Mat4};

/// Perspective projection parameters.
///
/// The aspect is stored as **height / width**. Together with a field of view
/// that spans the horizontal extent this yields the usual square-pixel
/// projection; see [`Mat4::perspective_lh_zero_to_one`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in radians.
    fov: f32,
    /// Height divided by width.
    aspect_h_over_w: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_degrees(66.2, 720.0 / 1280.0, 1.0, 100.0)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov` - Field of view in radians
    /// * `aspect_h_over_w` - Viewport height divided by width
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov: f32, aspect_h_over_w: f32, z_near: f32, z_far: f32) -> Self {
        debug_assert!(z_near > 0.0 && z_far > z_near, "invalid clip planes");
        Self {
            fov,
            aspect_h_over_w,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_degrees: f32, aspect_h_over_w: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(radians(fov_degrees), aspect_h_over_w, z_near, z_far)
    }

    /// Aspect for a viewport of the given pixel size.
    pub fn aspect_for_viewport(width: u32, height: u32) -> f32 {
        height as f32 / width.max(1) as f32
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_h_over_w(&self) -> f32 {
        self.aspect_h_over_w
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect from a new viewport size (typically on resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect_h_over_w = Self::aspect_for_viewport(width, height);
    }

    /// Generates the perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh_zero_to_one(self.fov, self.aspect_h_over_w, self.z_near, self.z_far)
    }
}

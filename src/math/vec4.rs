//! 4D vector for homogeneous coordinates and RGBA colors.
//!
//! The same four floats serve several roles (point/direction, color,
//! quaternion storage). Instead of overlapping views, the roles are exposed
//! through named accessors such as [`Vec4::xyz`], [`Vec4::rgb`] and
//! [`Vec4::as_quat`].

use bytemuck::{Pod, Zeroable};

use super::quat::Quat;
use super::vec3::Vec3;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Create an RGBA color.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r, g, b, a)
    }

    /// Create a Vec4 from a Vec3 with specified w component.
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// The first three components, discarding w.
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Color view of the first three components.
    pub const fn rgb(self) -> Vec3 {
        self.xyz()
    }

    /// Alpha channel when used as a color.
    pub const fn alpha(self) -> f32 {
        self.w
    }

    /// Reinterprets the components as `(real, i, j, k)`.
    pub const fn as_quat(self) -> Quat {
        Quat::new(self.x, self.y, self.z, self.w)
    }

    /// Convert to Vec3 with perspective division (divide by w).
    pub fn to_vec3_perspective(self) -> Vec3 {
        if self.w != 0.0 && self.w != 1.0 {
            Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        } else {
            self.xyz()
        }
    }
}

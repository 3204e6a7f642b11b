//! 3D vector used for positions, directions, scales and RGB colors.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Component-wise product, used for non-uniform scaling and color modulation.
    pub fn mul_elements(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// The vector must not be zero. Debug builds assert this; release builds
    /// produce NaN/Inf components.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        debug_assert!(magnitude > 0.0, "normalize called on a zero-length Vec3");
        let inv = 1.0 / magnitude;
        self.scale(inv)
    }

    /// In-place variant of [`Vec3::normalize`], same precondition.
    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-hand-rule cross product.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: -(self.x * other.z - self.z * other.x),
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Clamps every component into `[0, 1]`.
    pub fn saturate(&self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    /// Raises every component to `exponent`.
    pub fn powf(&self, exponent: f32) -> Self {
        Self::new(
            self.x.powf(exponent),
            self.y.powf(exponent),
            self.z.powf(exponent),
        )
    }

    /// Linear blend: `self * (1 - t) + other * t`.
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self * (1.0 - t) + other * t
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign<Vec3> for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs.scale(self)
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_follows_right_hand_rule() {
        let z = Vec3::RIGHT.cross(Vec3::UP);
        assert_eq!(z, Vec3::FORWARD);

        let x = Vec3::UP.cross(Vec3::FORWARD);
        assert_eq!(x, Vec3::RIGHT);
    }

    #[test]
    fn cross_is_perpendicular_to_inputs() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-5);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = Vec3::new(3.0, 4.0, 12.0);
        assert_relative_eq!(v.normalize().magnitude(), 1.0, epsilon = 1e-6);

        v.normalize_mut();
        assert_relative_eq!(v.x, 3.0 / 13.0, epsilon = 1e-6);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn normalize_zero_asserts_in_debug() {
        let _ = Vec3::ZERO.normalize();
    }

    #[test]
    fn mul_elements_scales_per_axis() {
        let v = Vec3::new(1.0, 2.0, 3.0).mul_elements(Vec3::new(2.0, 0.5, -1.0));
        assert_eq!(v, Vec3::new(2.0, 1.0, -3.0));
    }

    #[test]
    fn saturate_clamps_each_component() {
        let v = Vec3::new(-0.5, 0.25, 3.0).saturate();
        assert_eq!(v, Vec3::new(0.0, 0.25, 1.0));
    }
}

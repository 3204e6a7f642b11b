//! Quaternions for orientations.
//!
//! Stored as a real part followed by the imaginary vector, so the memory
//! layout is `[real, i, j, k]`. This is the order the instance shader reads
//! from its `float4 orient` field.
//!
//! An orientation is a **unit** quaternion. Composition with `*` slowly drifts
//! away from unit length, so callers that compose repeatedly should call
//! [`Quat::normalize`] from time to time; [`Quat::rotate`] never does it for
//! them.

use std::ops::{Add, Mul, Sub};

use bytemuck::{Pod, Zeroable};

use super::vec3::Vec3;
use super::vec4::Vec4;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Quat {
    pub real: f32,
    pub imaginary: Vec3,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(real: f32, i: f32, j: f32, k: f32) -> Self {
        Self {
            real,
            imaginary: Vec3::new(i, j, k),
        }
    }

    pub const fn from_parts(real: f32, imaginary: Vec3) -> Self {
        Self { real, imaginary }
    }

    /// Pure quaternion `(0, v)`.
    pub const fn pure(v: Vec3) -> Self {
        Self::from_parts(0.0, v)
    }

    /// Rotation of `angle_radians` around `axis`.
    ///
    /// The axis is normalized first and must not be zero.
    pub fn from_axis_angle(angle_radians: f32, axis: Vec3) -> Self {
        let half = angle_radians * 0.5;
        let (s, c) = half.sin_cos();
        Self::from_parts(c, axis.normalize() * s)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.real,
            self.imaginary.x,
            self.imaginary.y,
            self.imaginary.z,
        )
    }

    pub fn conjugate(&self) -> Self {
        Self::from_parts(self.real, -self.imaginary)
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.real * self.real + self.imaginary.dot(self.imaginary)
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn normalize(&self) -> Self {
        let inv = 1.0 / self.magnitude();
        Self::from_parts(self.real * inv, self.imaginary * inv)
    }

    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    /// Multiplicative inverse: conjugate divided by squared magnitude.
    pub fn inverse(&self) -> Self {
        let inv_sq = 1.0 / self.magnitude_squared();
        Self::from_parts(self.real * inv_sq, -self.imaginary * inv_sq)
    }

    /// Rotates `v` by this orientation: `(q * (0, v) * conj(q)).imaginary`.
    ///
    /// Assumes `self` is a unit quaternion.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        (*self * Self::pure(v) * self.conjugate()).imaginary
    }
}

/// Hamilton product. `a * b` applies `b` first when used to rotate vectors.
impl Mul<Quat> for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Self::Output {
        let real = self.real * rhs.real - self.imaginary.dot(rhs.imaginary);
        let imaginary = rhs.imaginary * self.real
            + self.imaginary * rhs.real
            + self.imaginary.cross(rhs.imaginary);
        Quat::from_parts(real, imaginary)
    }
}

impl Add<Quat> for Quat {
    type Output = Quat;

    fn add(self, rhs: Quat) -> Self::Output {
        Quat::from_parts(self.real + rhs.real, self.imaginary + rhs.imaginary)
    }
}

impl Sub<Quat> for Quat {
    type Output = Quat;

    fn sub(self, rhs: Quat) -> Self::Output {
        Quat::from_parts(self.real - rhs.real, self.imaginary - rhs.imaginary)
    }
}

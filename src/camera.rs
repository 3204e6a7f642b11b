//! Free-fly camera driven by spherical angles.
//!
//! # Coordinate System
//!
//! Left-handed view space:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as two spherical angles in degrees and converted to
//! a basis every frame:
//!
//! - **Theta**: polar angle measured from world +Y. 90° looks at the horizon,
//!   smaller values look up. Clamped to `[45°, 145°]` so the forward vector
//!   never becomes parallel to world up.
//! - **Phi**: azimuth in the XZ plane. 90° looks down +Z. Wrapped into
//!   `(-360°, 360°)` so it does not grow without bound.

use crate::input::{InputSample, Key};
use crate::math::{radians, Mat4, Vec3, Vec4};

pub const THETA_MIN: f32 = 45.0;
pub const THETA_MAX: f32 = 145.0;
const PHI_WRAP: f32 = 360.0;

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraBasis {
    /// Derives the frame from spherical angles in degrees.
    ///
    /// `right = cross(world_up, forward)` then `up = cross(forward, right)`.
    /// Well defined as long as theta stays inside the clamp range.
    pub fn from_angles(theta_degrees: f32, phi_degrees: f32) -> Self {
        let (sin_theta, cos_theta) = radians(theta_degrees).sin_cos();
        let (sin_phi, cos_phi) = radians(phi_degrees).sin_cos();

        let forward = Vec3::new(cos_phi * sin_theta, cos_theta, sin_theta * sin_phi).normalize();
        let right = Vec3::UP.cross(forward).normalize();
        let up = forward.cross(right).normalize();

        Self { forward, right, up }
    }
}

/// First-person camera with position and theta/phi orientation.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    theta: f32,
    phi: f32,
    basis: CameraBasis,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0, 90.0)
    }
}

impl FlyCamera {
    /// Creates a camera at `position`. Angles are in degrees and are
    /// clamped/wrapped the same way per-frame updates are.
    pub fn new(position: Vec3, theta: f32, phi: f32) -> Self {
        let theta = clamp_theta(theta);
        let phi = wrap_phi(phi);
        Self {
            position,
            theta,
            phi,
            basis: CameraBasis::from_angles(theta, phi),
        }
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Applies a pointer displacement scaled by `sensitivity` (degrees per
    /// pixel) and refreshes the basis.
    ///
    /// Moving the pointer down increases theta (look down); moving it right
    /// decreases phi.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.theta = clamp_theta(self.theta + dy * sensitivity);
        self.phi = wrap_phi(self.phi - dx * sensitivity);
        self.basis = CameraBasis::from_angles(self.theta, self.phi);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves along the current forward vector.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.basis.forward * distance;
    }

    /// Moves along the current right vector (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.basis.right * distance;
    }

    /// Moves along the camera's up vector, not world up.
    pub fn move_up(&mut self, distance: f32) {
        self.position += self.basis.up * distance;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Polar angle in degrees.
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Azimuth in degrees.
    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn basis(&self) -> CameraBasis {
        self.basis
    }

    pub fn forward(&self) -> Vec3 {
        self.basis.forward
    }

    pub fn right(&self) -> Vec3 {
        self.basis.right
    }

    pub fn up(&self) -> Vec3 {
        self.basis.up
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World-to-camera matrix.
    ///
    /// The inverse of the camera's rigid transform: since the basis is
    /// orthonormal the rotation part is its transpose, and each axis gets the
    /// translation `-dot(axis, position)`. In the row-vector layout the basis
    /// vectors are the columns of the upper 3x3 and the translation is the last
    /// row; the shader reads this as basis rows with a per-row translation.
    pub fn world_to_camera(&self) -> Mat4 {
        let CameraBasis { forward, right, up } = self.basis;
        let p = self.position;
        Mat4::from_rows([
            Vec4::new(right.x, up.x, forward.x, 0.0),
            Vec4::new(right.y, up.y, forward.y, 0.0),
            Vec4::new(right.z, up.z, forward.z, 0.0),
            Vec4::new(-right.dot(p), -up.dot(p), -forward.dot(p), 1.0),
        ])
    }
}

fn clamp_theta(theta: f32) -> f32 {
    theta.clamp(THETA_MIN, THETA_MAX)
}

/// Keeps phi inside `(-360, 360)`, preserving the remainder past a full turn.
///
/// Snapping to 0 at a full turn would also stay in range; the remainder is
/// kept instead.
fn wrap_phi(phi: f32) -> f32 {
    phi % PHI_WRAP
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Maps sampled input onto camera motion.
#[derive(Debug, Clone)]
pub struct FlyCameraController {
    /// Distance moved per frame for each held movement key.
    pub move_speed: f32,
    /// Degrees of rotation per pixel of pointer displacement.
    pub look_sensitivity: f32,
}

impl Default for FlyCameraController {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            look_sensitivity: 0.1,
        }
    }
}

impl FlyCameraController {
    pub fn new(move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            move_speed,
            look_sensitivity,
        }
    }

    /// Updates the camera from one input sample.
    ///
    /// Rotation is applied first so movement uses this frame's basis.
    ///
    /// # Input Mapping
    /// - Pointer: look around
    /// - W/S: Move forward/backward
    /// - A/D: Strafe left/right
    /// - Space/Shift: Move up/down along the camera's up vector
    pub fn update(&self, camera: &mut FlyCamera, input: &InputSample) {
        let delta = input.pointer_delta;
        camera.look(delta.x, delta.y, self.look_sensitivity);

        let keys = &input.keys;
        let speed = self.move_speed;
        if keys.held(Key::W) {
            camera.move_forward(speed);
        }
        if keys.held(Key::S) {
            camera.move_forward(-speed);
        }
        if keys.held(Key::A) {
            camera.move_right(-speed);
        }
        if keys.held(Key::D) {
            camera.move_right(speed);
        }
        if keys.held(Key::Shift) {
            camera.move_up(-speed);
        }
        if keys.held(Key::Space) {
            camera.move_up(speed);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

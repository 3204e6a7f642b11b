//! GPU-facing per-frame records and the backend contract.
//!
//! Every struct here is `#[repr(C)]` + `Pod` so it can be uploaded with
//! `bytemuck::bytes_of`. Field order and explicit padding follow 16-byte
//! constant-buffer packing.

use bytemuck::{Pod, Zeroable};

use crate::error::{BackendError, FrameError};
use crate::instance::Instance;
use crate::light::{Light, LightType};
use crate::math::{Mat4, Vec3, Vec4};

/// Number of light slots in [`LightConstants`].
pub const MAX_LIGHTS: usize = 8;

/// Projection, view and eye position for one frame (144 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameConstants {
    pub perspective: Mat4,
    pub world_to_camera: Mat4,
    pub camera_position: Vec3,
    _pad: f32,
}

impl FrameConstants {
    pub fn new(perspective: Mat4, world_to_camera: Mat4, camera_position: Vec3) -> Self {
        Self {
            perspective,
            world_to_camera,
            camera_position,
            _pad: 0.0,
        }
    }

    /// World to clip space in one matrix (row vectors: view first).
    pub fn view_projection(&self) -> Mat4 {
        self.world_to_camera * self.perspective
    }
}

/// One light slot as the pixel stage reads it (80 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    pub position: Vec3,
    pub kind: u32,

    pub reference_distance: f32,
    pub max_distance: f32,
    pub min_distance: f32,
    _pad0: f32,

    pub direction: Vec3,
    /// Nonzero when the light contributes.
    pub enabled: u32,

    pub inner_angle: f32,
    pub outer_angle: f32,
    _pad1: [f32; 2],

    pub color: Vec4,
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        Self {
            position: light.position,
            kind: light.kind.tag(),
            reference_distance: light.reference_distance,
            max_distance: light.max_distance,
            min_distance: light.min_distance,
            _pad0: 0.0,
            direction: light.direction,
            enabled: u32::from(light.enabled),
            inner_angle: light.inner_angle,
            outer_angle: light.outer_angle,
            _pad1: [0.0; 2],
            color: light.color,
        }
    }
}

impl GpuLight {
    /// Decodes the slot back into a [`Light`]. Unknown type tags read as
    /// disabled directional lights.
    pub fn to_light(&self) -> Light {
        let kind = match self.kind {
            0 => Some(LightType::Directional),
            1 => Some(LightType::Point),
            2 => Some(LightType::Spotlight),
            _ => None,
        };
        Light {
            kind: kind.unwrap_or_default(),
            position: self.position,
            reference_distance: self.reference_distance,
            max_distance: self.max_distance,
            min_distance: self.min_distance,
            direction: self.direction,
            enabled: self.enabled != 0 && kind.is_some(),
            inner_angle: self.inner_angle,
            outer_angle: self.outer_angle,
            color: self.color,
        }
    }
}

/// All light slots plus the eye position (656 bytes).
///
/// Slots past the supplied lights stay zeroed, which reads as disabled.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightConstants {
    pub lights: [GpuLight; MAX_LIGHTS],
    pub camera_position: Vec3,
    _pad: f32,
}

impl LightConstants {
    pub fn from_lights(lights: &[Light], camera_position: Vec3) -> Result<Self, FrameError> {
        if lights.len() > MAX_LIGHTS {
            return Err(FrameError::TooManyLights {
                count: lights.len(),
                max: MAX_LIGHTS,
            });
        }
        let mut constants = Self::zeroed();
        for (slot, light) in constants.lights.iter_mut().zip(lights) {
            *slot = GpuLight::from(light);
        }
        constants.camera_position = camera_position;
        Ok(constants)
    }

    /// Lights of the enabled slots, in slot order.
    pub fn enabled_lights(&self) -> Vec<Light> {
        self.lights
            .iter()
            .map(GpuLight::to_light)
            .filter(|light| light.enabled)
            .collect()
    }
}

/// Consumer of the per-frame buffers.
///
/// Per frame the core calls the three uploads, then `draw` with the number
/// of instances uploaded. Each draw renders the 36-vertex unit cube
/// ([`crate::mesh::CUBE_VERTICES`]) once per instance.
pub trait RenderBackend {
    fn upload_frame_constants(&mut self, constants: &FrameConstants) -> Result<(), BackendError>;

    fn upload_lights(&mut self, lights: &LightConstants) -> Result<(), BackendError>;

    fn upload_instances(&mut self, instances: &[Instance]) -> Result<(), BackendError>;

    fn draw(&mut self, instance_count: usize) -> Result<(), BackendError>;
}

//! Per-object instance records and the bounded registry that collects them
//! each frame.

use bytemuck::{Pod, Zeroable};

use crate::error::RegistryError;
use crate::math::{Quat, Vec3, Vec4};

/// Transform and color of one drawn copy of the base mesh.
///
/// The layout matches the shader's structured-buffer element exactly:
/// `float3 position; float4 orientation; float3 scale; float4 color`, tightly
/// packed (56 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub position: Vec3,
    /// Unit quaternion.
    pub orientation: Quat,
    /// Per-axis scale, applied after rotation. Must be positive.
    pub scale: Vec3,
    /// Linear RGBA in `[0, 1]`.
    pub color: Vec4,
}

impl Instance {
    pub fn new(position: Vec3, orientation: Quat, scale: Vec3, color: Vec4) -> Self {
        Self {
            position,
            orientation,
            scale,
            color,
        }
    }

    /// Model-space point to world space: rotate, scale per axis, translate.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.orientation.rotate(p).mul_elements(self.scale) + self.position
    }

    /// Model-space normal to world space.
    ///
    /// Scaled the same way as points and renormalized, matching the vertex
    /// stage of the reference shader.
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        self.orientation.rotate(n).mul_elements(self.scale).normalize()
    }
}

/// Fixed-capacity, append-only list of [`Instance`]s rebuilt every frame.
#[derive(Debug, Clone)]
pub struct InstanceRegistry {
    instances: Vec<Instance>,
    capacity: usize,
}

impl InstanceRegistry {
    /// Allocates room for `capacity` instances up front; the registry never
    /// grows past it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Empties the registry. Called once per frame boundary.
    pub fn reset(&mut self) {
        self.instances.clear();
    }

    /// Appends an instance and returns it for further tweaks.
    ///
    /// Fails with [`RegistryError::Full`] once `capacity` entries are stored.
    pub fn add(
        &mut self,
        position: Vec3,
        orientation: Quat,
        scale: Vec3,
        color: Vec4,
    ) -> Result<&mut Instance, RegistryError> {
        self.push(Instance::new(position, orientation, scale, color))
    }

    pub fn push(&mut self, instance: Instance) -> Result<&mut Instance, RegistryError> {
        if self.is_full() {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        let index = self.instances.len();
        self.instances.push(instance);
        Ok(&mut self.instances[index])
    }

    /// The live range `[0, len)` for bulk upload.
    pub fn snapshot(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.instances.len() >= self.capacity
    }
}

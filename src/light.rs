//! Light sources and the per-frame light registry.

use crate::error::RegistryError;
use crate::math::{Vec3, Vec4};

/// How a light emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum LightType {
    /// Parallel rays along `direction`, no falloff with distance.
    #[default]
    Directional = 0,
    /// Omnidirectional emitter at `position`.
    Point = 1,
    /// Cone along `direction` from `position`.
    Spotlight = 2,
}

impl LightType {
    /// Tag written into the GPU record.
    pub fn tag(self) -> u32 {
        self as u32
    }
}

/// CPU-side description of one light.
///
/// Distances are in world units and cone angles in degrees. Fields that do
/// not apply to a light's type are ignored by shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightType,
    pub position: Vec3,
    /// Distance at which the inverse-square term equals one.
    pub reference_distance: f32,
    /// The light contributes nothing at or beyond this distance.
    pub max_distance: f32,
    /// Distances below this are clamped, avoiding the singularity at zero.
    pub min_distance: f32,
    /// Unit vector the light points along.
    pub direction: Vec3,
    pub enabled: bool,
    /// Full-intensity half-angle of a spotlight cone.
    pub inner_angle: f32,
    /// Half-angle where a spotlight reaches zero.
    pub outer_angle: f32,
    pub color: Vec4,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightType::Directional,
            position: Vec3::ZERO,
            reference_distance: 1.0,
            max_distance: 100.0,
            min_distance: 1.0,
            direction: Vec3::FORWARD,
            enabled: true,
            inner_angle: 15.0,
            outer_angle: 35.0,
            color: Vec4::ONE,
        }
    }
}

impl Light {
    /// A light infinitely far away shining along `direction`.
    pub fn directional(direction: Vec3, color: Vec4) -> Self {
        Self {
            kind: LightType::Directional,
            direction: direction.normalize(),
            color,
            ..Self::default()
        }
    }

    pub fn point(position: Vec3, reference_distance: f32, max_distance: f32, color: Vec4) -> Self {
        Self {
            kind: LightType::Point,
            position,
            reference_distance,
            max_distance,
            color,
            ..Self::default()
        }
    }

    /// A cone light; angles are half-angles in degrees with `inner <= outer`.
    pub fn spotlight(
        position: Vec3,
        direction: Vec3,
        reference_distance: f32,
        max_distance: f32,
        inner_angle: f32,
        outer_angle: f32,
        color: Vec4,
    ) -> Self {
        debug_assert!(inner_angle <= outer_angle, "spotlight inner cone wider than outer");
        Self {
            kind: LightType::Spotlight,
            position,
            direction: direction.normalize(),
            reference_distance,
            max_distance,
            inner_angle,
            outer_angle,
            color,
            ..Self::default()
        }
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Emits from a position, so distance attenuation applies.
    pub fn is_local(&self) -> bool {
        self.kind != LightType::Directional
    }
}

/// Fixed-capacity list of lights, rebuilt every frame.
#[derive(Debug, Clone)]
pub struct LightRegistry {
    lights: Vec<Light>,
    capacity: usize,
}

impl LightRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lights: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn push(&mut self, light: Light) -> Result<(), RegistryError> {
        if self.lights.len() >= self.capacity {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        self.lights.push(light);
        Ok(())
    }

    /// All lights in insertion order, enabled or not.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Light> + '_ {
        self.lights.iter().filter(|light| light.enabled)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constructors_normalize_direction() {
        let sun = Light::directional(Vec3::new(0.0, -4.0, 0.0), Vec4::ONE);
        assert_relative_eq!(sun.direction.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(sun.direction.y, -1.0, epsilon = 1e-6);

        let spot = Light::spotlight(
            Vec3::ZERO,
            Vec3::new(-1.0, 0.0, 1.0),
            24.0,
            100.0,
            15.0,
            35.0,
            Vec4::ONE,
        );
        assert_relative_eq!(spot.direction.magnitude(), 1.0, epsilon = 1e-6);
        assert_eq!(spot.kind, LightType::Spotlight);
    }

    #[test]
    fn type_tags_are_stable() {
        assert_eq!(LightType::Directional.tag(), 0);
        assert_eq!(LightType::Point.tag(), 1);
        assert_eq!(LightType::Spotlight.tag(), 2);
    }

    #[test]
    fn point_light_is_local() {
        let bulb = Light::point(Vec3::new(1.0, 2.0, 3.0), 16.0, 100.0, Vec4::ONE);
        assert!(bulb.is_local());
        assert!(!Light::directional(Vec3::UP, Vec4::ONE).is_local());
        assert_eq!(bulb.min_distance, 1.0);
    }

    #[test]
    fn registry_rejects_past_capacity() {
        let mut registry = LightRegistry::with_capacity(1);
        registry.push(Light::default()).unwrap();
        assert_eq!(
            registry.push(Light::default()),
            Err(RegistryError::Full { capacity: 1 })
        );
    }

    #[test]
    fn enabled_skips_disabled_lights() {
        let mut registry = LightRegistry::with_capacity(8);
        registry.push(Light::default()).unwrap();
        registry.push(Light::default().with_enabled(false)).unwrap();
        registry.push(Light::default()).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.enabled().count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }
}

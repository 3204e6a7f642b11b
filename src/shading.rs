//! Per-surface shading: the lit multi-light model and a Gooch variant.
//!
//! These functions are the reference for what the pixel stage computes. The
//! software backend calls them per pixel; a GPU backend is expected to
//! reproduce them exactly.

use serde::{Deserialize, Serialize};

use crate::light::{Light, LightType};
use crate::math::{radians, Vec3, Vec4};

/// Exponent applied to the final linear color.
pub const GAMMA: f32 = 2.2;

/// Fraction of the albedo added after all lights.
pub const AMBIENT: f32 = 0.05;

/// Which pixel stage to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingModel {
    #[default]
    Lit,
    Gooch,
}

/// Interpolated inputs of one shaded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub position: Vec3,
    /// Unit normal in world space.
    pub normal: Vec3,
    /// Instance color; alpha passes straight through.
    pub albedo: Vec4,
}

/// Smooth cutoff towards `max_distance`: `(max(1 - (d/max)^4, 0))^2`.
pub fn windowing(distance: f32, max_distance: f32) -> f32 {
    let ratio = distance / max_distance;
    let falloff = (1.0 - ratio.powi(4)).max(0.0);
    falloff * falloff
}

/// Inverse-square falloff relative to `reference_distance`, windowed so it
/// reaches exactly zero at `max_distance`.
pub fn attenuation(
    distance: f32,
    reference_distance: f32,
    min_distance: f32,
    max_distance: f32,
) -> f32 {
    let inverse = reference_distance / distance.max(min_distance);
    inverse * inverse * windowing(distance, max_distance)
}

/// Position of `cosine` between the outer and inner cone, clamped to `[0, 1]`.
///
/// Angles are half-angles in radians.
pub fn spotlight_ratio(cosine: f32, inner_angle: f32, outer_angle: f32) -> f32 {
    let cos_outer = outer_angle.cos();
    let cos_inner = inner_angle.cos();
    ((cosine - cos_outer) / (cos_inner - cos_outer)).clamp(0.0, 1.0)
}

/// Hermite smoothstep of an already clamped `t`.
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Spotlight factor for a point seen along `light_to_point` (unit) from a
/// cone pointing along `spot_direction`. Angles in degrees.
pub fn spotlight_falloff(
    light_to_point: Vec3,
    spot_direction: Vec3,
    inner_degrees: f32,
    outer_degrees: f32,
) -> f32 {
    let cosine = spot_direction.normalize().dot(light_to_point);
    smoothstep(spotlight_ratio(
        cosine,
        radians(inner_degrees),
        radians(outer_degrees),
    ))
}

/// Lambert term of a directional light.
pub fn directional(light_direction: Vec3, light_color: Vec3, albedo: Vec3, normal: Vec3) -> Vec3 {
    let cosine = (-light_direction).dot(normal).max(0.0);
    light_color.mul_elements(albedo) * cosine
}

/// Unclamped contribution of one light to `surface`.
pub fn light_contribution(light: &Light, surface: &SurfaceSample) -> Vec3 {
    let light_color = light.color.rgb();
    let albedo = surface.albedo.rgb();

    if light.kind == LightType::Directional {
        return directional(light.direction, light_color, albedo, surface.normal);
    }

    let offset = light.position - surface.position;
    let distance = offset.magnitude();
    if distance <= 0.0 {
        return Vec3::ZERO;
    }
    let to_light = offset / distance;

    let mut strength = attenuation(
        distance,
        light.reference_distance,
        light.min_distance,
        light.max_distance,
    ) * to_light.dot(surface.normal).max(0.0);

    if light.kind == LightType::Spotlight {
        strength *= spotlight_falloff(
            -to_light,
            light.direction,
            light.inner_angle,
            light.outer_angle,
        );
    }

    light_color.mul_elements(albedo) * strength
}

/// Linear color of the lit model, before gamma.
///
/// Disabled lights are skipped. The running sum is saturated after every
/// light, then the ambient term is added on top.
pub fn shade_lit<'a>(lights: impl IntoIterator<Item = &'a Light>, surface: &SurfaceSample) -> Vec3 {
    let shaded = lights
        .into_iter()
        .filter(|light| light.enabled)
        .fold(Vec3::ZERO, |sum, light| {
            (sum + light_contribution(light, surface)).saturate()
        });
    shaded + surface.albedo.rgb() * AMBIENT
}

/// Constants of the Gooch tone model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoochParams {
    pub light_position: Vec3,
    pub cool: Vec3,
    pub warm: Vec3,
    pub highlight: Vec3,
    /// Share of the albedo mixed into both tones.
    pub albedo_weight: f32,
}

impl Default for GoochParams {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(4.0, 0.0, 0.0),
            cool: Vec3::new(0.0, 0.0, 0.55),
            warm: Vec3::new(0.3, 0.3, 0.0),
            highlight: Vec3::ONE,
            albedo_weight: 0.25,
        }
    }
}

/// Linear color of the Gooch model, before gamma.
pub fn shade_gooch(params: &GoochParams, surface: &SurfaceSample, eye: Vec3) -> Vec3 {
    let albedo = surface.albedo.rgb() * params.albedo_weight;
    let cool = params.cool + albedo;
    let warm = params.warm + albedo;
    let n = surface.normal;

    let to_eye = (eye - surface.position).normalize();
    let to_light = (params.light_position - surface.position).normalize();
    let t = (to_light.dot(n) + 1.0) * 0.5;
    let reflected = (n * (2.0 * n.dot(to_light)) - to_light).normalize();
    let s = (100.0 * reflected.dot(to_eye) - 97.0).clamp(0.0, 1.0);

    params.highlight * s + warm.lerp(cool, 1.0 - t) * (1.0 - s)
}

/// Final output transfer.
pub fn apply_gamma(linear: Vec3) -> Vec3 {
    linear.powf(GAMMA)
}

impl ShadingModel {
    /// Runs the selected model and returns the output color with the
    /// surface's alpha.
    pub fn shade(
        &self,
        lights: &[Light],
        gooch: &GoochParams,
        surface: &SurfaceSample,
        eye: Vec3,
    ) -> Vec4 {
        let linear = match self {
            ShadingModel::Lit => shade_lit(lights, surface),
            ShadingModel::Gooch => shade_gooch(gooch, surface, eye),
        };
        Vec4::from_vec3(apply_gamma(linear), surface.albedo.alpha())
    }
}

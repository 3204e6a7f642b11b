//! Pixel shaders for the edge function rasterizer.
//!
//! A pixel shader receives a [`Fragment`] with interpolated world position
//! and normal and returns the packed ARGB8888 color to write.

use super::Fragment;
use crate::light::Light;
use crate::math::{Vec3, Vec4};
use crate::render::color::pack_argb;
use crate::shading::{GoochParams, ShadingModel, SurfaceSample};

/// Computes the color for one pixel.
pub trait PixelShader {
    fn shade(&self, fragment: &Fragment) -> u32;
}

/// Single color for every pixel.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _fragment: &Fragment) -> u32 {
        self.color
    }
}

/// Runs a [`ShadingModel`] for the surface of one instance.
pub struct SurfaceShader<'a> {
    model: ShadingModel,
    lights: &'a [Light],
    gooch: &'a GoochParams,
    eye: Vec3,
    albedo: Vec4,
}

impl<'a> SurfaceShader<'a> {
    pub fn new(
        model: ShadingModel,
        lights: &'a [Light],
        gooch: &'a GoochParams,
        eye: Vec3,
        albedo: Vec4,
    ) -> Self {
        Self {
            model,
            lights,
            gooch,
            eye,
            albedo,
        }
    }
}

impl PixelShader for SurfaceShader<'_> {
    fn shade(&self, fragment: &Fragment) -> u32 {
        let surface = SurfaceSample {
            position: fragment.world,
            normal: fragment.normal.normalize(),
            albedo: self.albedo,
        };
        pack_argb(self.model.shade(self.lights, self.gooch, &surface, self.eye))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(normal: Vec3) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            depth: 0.5,
            world: Vec3::ZERO,
            normal,
        }
    }

    #[test]
    fn flat_ignores_fragment() {
        assert_eq!(FlatShader::new(0x1234).shade(&fragment(Vec3::UP)), 0x1234);
    }

    #[test]
    fn unlit_surface_is_dim_ambient() {
        let gooch = GoochParams::default();
        let shader = SurfaceShader::new(ShadingModel::Lit, &[], &gooch, Vec3::ZERO, Vec4::ONE);
        // 0.05^2.2 rounds to channel value 0.
        assert_eq!(shader.shade(&fragment(Vec3::UP)), 0xFF00_0000);
    }

    #[test]
    fn lit_surface_is_bright() {
        let gooch = GoochParams::default();
        let sun = [Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec4::ONE)];
        let shader = SurfaceShader::new(ShadingModel::Lit, &sun, &gooch, Vec3::ZERO, Vec4::ONE);
        // Unnormalized interpolated normals are fixed up before shading.
        assert_eq!(shader.shade(&fragment(Vec3::new(0.0, 3.0, 0.0))), 0xFFFF_FFFF);
    }
}

//! CPU implementation of [`RenderBackend`].
//!
//! Runs the same pipeline a GPU backend would: per-instance vertex
//! transform, near-plane rejection, back-face culling, edge-function
//! rasterization with a depth test and per-pixel shading.

use super::color::BACKGROUND;
use super::framebuffer::FrameBuffer;
use super::rasterizer::{EdgeFunctionRasterizer, ScreenVertex, SurfaceShader};
use crate::error::BackendError;
use crate::frame::{FrameConstants, LightConstants, RenderBackend};
use crate::instance::Instance;
use crate::light::Light;
use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::{cube_triangles, MeshVertex};
use crate::shading::{GoochParams, ShadingModel};

/// Counters of the most recent `draw`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub triangles: usize,
    /// Rejected for reaching behind the near plane.
    pub clipped: usize,
    pub culled: usize,
    pub pixels: usize,
}

pub struct SoftwareBackend {
    framebuffer: FrameBuffer,
    rasterizer: EdgeFunctionRasterizer,
    shading: ShadingModel,
    gooch: GoochParams,
    instance_capacity: usize,
    frame: Option<FrameConstants>,
    lights: Option<LightConstants>,
    instances: Vec<Instance>,
    stats: DrawStats,
}

impl SoftwareBackend {
    pub fn new(width: u32, height: u32, instance_capacity: usize, shading: ShadingModel) -> Self {
        log::info!(
            "software backend {}x{}, {} instances, {:?} shading",
            width,
            height,
            instance_capacity,
            shading
        );
        Self {
            framebuffer: FrameBuffer::new(width, height, BACKGROUND),
            rasterizer: EdgeFunctionRasterizer::new(),
            shading,
            gooch: GoochParams::default(),
            instance_capacity,
            frame: None,
            lights: None,
            instances: Vec::with_capacity(instance_capacity),
            stats: DrawStats::default(),
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer.resize(width, height, BACKGROUND);
    }

    pub fn shading_model(&self) -> ShadingModel {
        self.shading
    }

    pub fn set_shading_model(&mut self, shading: ShadingModel) {
        self.shading = shading;
    }

    pub fn set_gooch_params(&mut self, gooch: GoochParams) {
        self.gooch = gooch;
    }

    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    fn draw_instance(
        &mut self,
        instance: &Instance,
        view_projection: &Mat4,
        lights: &[Light],
        eye: Vec3,
    ) {
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let shader = SurfaceShader::new(self.shading, lights, &self.gooch, eye, instance.color);

        let project = |vertex: &MeshVertex| {
            let world = instance.transform_point(vertex.position);
            let clip = Vec4::from_vec3(world, 1.0) * *view_projection;
            if clip.z < 0.0 || clip.w <= 0.0 {
                return None;
            }
            let normal = instance.transform_normal(vertex.normal);
            Some(ScreenVertex::from_clip(clip, world, normal, width, height))
        };

        for [a, b, c] in cube_triangles() {
            self.stats.triangles += 1;

            let (Some(a), Some(b), Some(c)) = (project(a), project(b), project(c)) else {
                self.stats.clipped += 1;
                continue;
            };
            let screen = [a, b, c];

            // Front faces wind clockwise, giving a negative area.
            if EdgeFunctionRasterizer::signed_area(&screen) >= 0.0 {
                self.stats.culled += 1;
                continue;
            }

            self.stats.pixels +=
                self.rasterizer
                    .fill_triangle(&screen, &mut self.framebuffer, &shader);
        }
    }
}

impl RenderBackend for SoftwareBackend {
    /// Starts a frame: clears color and depth.
    fn upload_frame_constants(&mut self, constants: &FrameConstants) -> Result<(), BackendError> {
        self.framebuffer.clear(BACKGROUND);
        self.framebuffer.clear_depth();
        self.frame = Some(*constants);
        Ok(())
    }

    fn upload_lights(&mut self, lights: &LightConstants) -> Result<(), BackendError> {
        self.lights = Some(*lights);
        Ok(())
    }

    fn upload_instances(&mut self, instances: &[Instance]) -> Result<(), BackendError> {
        if instances.len() > self.instance_capacity {
            log::warn!(
                "rejecting {} instances, buffer holds {}",
                instances.len(),
                self.instance_capacity
            );
            return Err(BackendError::InstanceCapacity {
                requested: instances.len(),
                capacity: self.instance_capacity,
            });
        }
        self.instances.clear();
        self.instances.extend_from_slice(instances);
        Ok(())
    }

    fn draw(&mut self, instance_count: usize) -> Result<(), BackendError> {
        if instance_count > self.instance_capacity {
            return Err(BackendError::InstanceCapacity {
                requested: instance_count,
                capacity: self.instance_capacity,
            });
        }
        let frame = self
            .frame
            .ok_or(BackendError::MissingUpload("frame constants"))?;
        let light_constants = self.lights.ok_or(BackendError::MissingUpload("lights"))?;
        if instance_count > self.instances.len() {
            return Err(BackendError::MissingUpload("instances"));
        }

        let view_projection = frame.view_projection();
        let lights = light_constants.enabled_lights();
        let instances = std::mem::take(&mut self.instances);

        self.stats = DrawStats::default();
        for instance in &instances[..instance_count] {
            self.draw_instance(instance, &view_projection, &lights, frame.camera_position);
        }
        self.instances = instances;

        log::debug!(
            "draw: {} instances, {} triangles ({} clipped, {} culled), {} pixels",
            instance_count,
            self.stats.triangles,
            self.stats.clipped,
            self.stats.culled,
            self.stats.pixels
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FlyCamera;
    use crate::math::Quat;
    use crate::projection::Projection;

    const W: u32 = 64;
    const H: u32 = 36;

    fn frame_constants() -> FrameConstants {
        let camera = FlyCamera::default();
        let projection = Projection::from_degrees(66.2, Projection::aspect_for_viewport(W, H), 1.0, 100.0);
        FrameConstants::new(projection.matrix(), camera.world_to_camera(), camera.position())
    }

    fn lit_from_camera() -> LightConstants {
        let sun = Light::directional(Vec3::FORWARD, Vec4::ONE);
        LightConstants::from_lights(&[sun], Vec3::ZERO).unwrap()
    }

    fn cube_at(z: f32, color: Vec4) -> Instance {
        Instance::new(Vec3::new(0.0, 0.0, z), Quat::IDENTITY, Vec3::ONE, color)
    }

    fn render(backend: &mut SoftwareBackend, instances: &[Instance]) {
        backend.upload_frame_constants(&frame_constants()).unwrap();
        backend.upload_lights(&lit_from_camera()).unwrap();
        backend.upload_instances(instances).unwrap();
        backend.draw(instances.len()).unwrap();
    }

    #[test]
    fn cube_in_front_covers_center_only() {
        let mut backend = SoftwareBackend::new(W, H, 4, ShadingModel::Lit);
        render(&mut backend, &[cube_at(5.0, Vec4::rgba(1.0, 0.0, 0.0, 1.0))]);

        let fb = backend.framebuffer();
        let center = fb.get_pixel(W as i32 / 2, H as i32 / 2).unwrap();
        assert_ne!(center, BACKGROUND);
        // The light faces the visible side head on: full red, no green/blue.
        assert_eq!(center, 0xFFFF_0000);
        assert_eq!(fb.get_pixel(0, 0), Some(BACKGROUND));
        assert_eq!(fb.get_pixel(W as i32 - 1, H as i32 - 1), Some(BACKGROUND));

        let stats = backend.stats();
        assert_eq!(stats.triangles, 12);
        assert!(stats.culled >= 6);
        assert!(stats.pixels > 0);
    }

    #[test]
    fn nearer_cube_wins_depth_test() {
        let mut backend = SoftwareBackend::new(W, H, 4, ShadingModel::Lit);
        let far = cube_at(8.0, Vec4::rgba(0.0, 0.0, 1.0, 1.0));
        let near = cube_at(4.0, Vec4::rgba(1.0, 0.0, 0.0, 1.0));
        render(&mut backend, &[near, far]);
        let center_near_first = backend.framebuffer().get_pixel(W as i32 / 2, H as i32 / 2);

        render(&mut backend, &[far, near]);
        let center_far_first = backend.framebuffer().get_pixel(W as i32 / 2, H as i32 / 2);

        assert_eq!(center_near_first, Some(0xFFFF_0000));
        assert_eq!(center_far_first, center_near_first);
    }

    #[test]
    fn cube_behind_camera_is_rejected() {
        let mut backend = SoftwareBackend::new(W, H, 4, ShadingModel::Lit);
        render(&mut backend, &[cube_at(-5.0, Vec4::ONE)]);
        assert_eq!(backend.stats().clipped, 12);
        assert!(backend.framebuffer().pixels().iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn gooch_model_paints_something() {
        let mut backend = SoftwareBackend::new(W, H, 4, ShadingModel::Gooch);
        render(&mut backend, &[cube_at(5.0, Vec4::ONE)]);
        assert_ne!(
            backend.framebuffer().get_pixel(W as i32 / 2, H as i32 / 2),
            Some(BACKGROUND)
        );
    }

    #[test]
    fn switching_model_and_gooch_tones_changes_output() {
        let mut backend = SoftwareBackend::new(W, H, 4, ShadingModel::Lit);
        backend.set_shading_model(ShadingModel::Gooch);
        assert_eq!(backend.shading_model(), ShadingModel::Gooch);

        let green = Vec3::new(0.0, 1.0, 0.0);
        backend.set_gooch_params(GoochParams {
            cool: green,
            warm: green,
            highlight: green,
            albedo_weight: 0.0,
            ..GoochParams::default()
        });
        render(&mut backend, &[cube_at(5.0, Vec4::ONE)]);
        assert_eq!(
            backend.framebuffer().get_pixel(W as i32 / 2, H as i32 / 2),
            Some(0xFF00_FF00)
        );
    }

    #[test]
    fn upload_over_capacity_fails() {
        let mut backend = SoftwareBackend::new(W, H, 1, ShadingModel::Lit);
        let instances = [cube_at(5.0, Vec4::ONE); 2];
        assert_eq!(
            backend.upload_instances(&instances),
            Err(BackendError::InstanceCapacity {
                requested: 2,
                capacity: 1
            })
        );
        assert!(backend.draw(2).is_err());
    }

    #[test]
    fn draw_requires_uploads() {
        let mut backend = SoftwareBackend::new(W, H, 1, ShadingModel::Lit);
        assert_eq!(
            backend.draw(0),
            Err(BackendError::MissingUpload("frame constants"))
        );
        backend.upload_frame_constants(&frame_constants()).unwrap();
        assert_eq!(backend.draw(0), Err(BackendError::MissingUpload("lights")));
        backend.upload_lights(&lit_from_camera()).unwrap();
        assert_eq!(backend.draw(1), Err(BackendError::MissingUpload("instances")));
        assert!(backend.draw(0).is_ok());
    }
}

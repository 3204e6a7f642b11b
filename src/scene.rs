//! The animated reference scene and the per-frame loop around it.
//!
//! A [`Scene`] owns the camera, the projection and both registries. Each
//! frame it consumes one [`InputSample`], rebuilds the registries from
//! scratch and hands the result to a [`RenderBackend`].

use crate::camera::{FlyCamera, FlyCameraController};
use crate::config::{RendererConfig, SceneConfig};
use crate::error::FrameError;
use crate::frame::{FrameConstants, LightConstants, RenderBackend};
use crate::input::{InputSample, InputSampler};
use crate::instance::InstanceRegistry;
use crate::light::{Light, LightRegistry};
use crate::math::{Quat, Vec3, Vec4};
use crate::projection::Projection;

/// Uniform scale of the small cube drawn at every light position.
pub const LIGHT_MARKER_SCALE: f32 = 0.2;

/// Whether the loop should keep going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

pub struct Scene {
    camera: FlyCamera,
    controller: FlyCameraController,
    projection: Projection,
    instances: InstanceRegistry,
    lights: LightRegistry,
    /// Accumulated animation time, used as an angle in radians.
    rotation: f32,
    time_step: f32,
    frame_index: u64,
}

impl Scene {
    /// Scene with the default camera and projection.
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: FlyCamera::default(),
            controller: FlyCameraController::default(),
            projection: Projection::default(),
            instances: InstanceRegistry::with_capacity(config.instance_capacity),
            lights: LightRegistry::with_capacity(config.light_capacity),
            rotation: 0.0,
            time_step: config.time_step,
            frame_index: 0,
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        let mut scene = Self::new(&config.scene);
        scene.camera = config.camera.camera();
        scene.controller = config.camera.controller();
        scene.projection = config
            .projection
            .projection(config.window.width, config.window.height);
        log::info!(
            "scene: {} instance slots, {} light slots, {}x{} viewport",
            config.scene.instance_capacity,
            config.scene.light_capacity,
            config.window.width,
            config.window.height
        );
        scene
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Applies one input sample and rebuilds the frame's instances and lights.
    ///
    /// A platform quit returns [`FrameStatus::Quit`] without touching any
    /// state. Releasing Escape still builds this frame and then reports
    /// `Quit`, so the last frame reaches the backend. If populating fails the
    /// registries are emptied and time does not advance.
    pub fn update(&mut self, input: &InputSample) -> Result<FrameStatus, FrameError> {
        if input.quit {
            return Ok(FrameStatus::Quit);
        }

        self.controller.update(&mut self.camera, input);
        self.end_frame();
        match self.populate() {
            Ok(rotation) => self.rotation = rotation,
            Err(e) => {
                self.end_frame();
                return Err(e);
            }
        }
        self.frame_index += 1;

        log::debug!(
            "frame {}: {} instances, {} lights, camera at {:?}",
            self.frame_index,
            self.instances.len(),
            self.lights.len(),
            self.camera.position()
        );
        if input.wants_quit() {
            Ok(FrameStatus::Quit)
        } else {
            Ok(FrameStatus::Continue)
        }
    }

    /// Fills the registries and returns the advanced rotation.
    fn populate(&mut self) -> Result<f32, FrameError> {
        let rotation = self.rotation;
        self.instances.add(
            Vec3::new(0.0, 0.0, 8.0),
            Quat::from_axis_angle(rotation, Vec3::RIGHT),
            Vec3::splat(6.0),
            Vec4::rgba(0.0, 0.5, 0.8, 1.0),
        )?;
        self.instances.add(
            Vec3::new(6.0, 0.0, 4.0),
            Quat::from_axis_angle(-rotation, Vec3::new(0.0, 0.5, 1.0)),
            Vec3::ONE,
            Vec4::rgba(0.6, 0.5, 0.0, 1.0),
        )?;

        // The cubes use the time before this frame's step, the orbiting
        // light the time after it.
        let rotation = rotation + self.time_step;

        let spot = Light::spotlight(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::FORWARD,
            8.0,
            50.0,
            15.0,
            35.0,
            Vec4::rgba(0.5, 0.3, 1.0, 1.0),
        )
        .with_min_distance(1.0);
        let side_spot = Light {
            position: Vec3::new(16.0, 4.0, -4.0),
            direction: Vec3::new(-1.0, 0.0, 1.0).normalize(),
            reference_distance: 24.0,
            max_distance: 100.0,
            color: Vec4::ONE,
            ..spot
        };
        let orbit = Light::point(
            Vec3::new(rotation.sin() * 10.0, rotation.cos() * 10.0, 0.0),
            16.0,
            100.0,
            Vec4::rgba(0.0, 1.0, 0.0, 1.0),
        )
        .with_min_distance(1.0);

        for light in [spot, side_spot, orbit] {
            self.lights.push(light)?;
            self.instances.add(
                light.position,
                Quat::IDENTITY,
                Vec3::splat(LIGHT_MARKER_SCALE),
                Vec4::ONE,
            )?;
        }
        Ok(rotation)
    }

    pub fn frame_constants(&self) -> FrameConstants {
        FrameConstants::new(
            self.projection.matrix(),
            self.camera.world_to_camera(),
            self.camera.position(),
        )
    }

    pub fn light_constants(&self) -> Result<LightConstants, FrameError> {
        LightConstants::from_lights(self.lights.lights(), self.camera.position())
    }

    /// Uploads this frame's buffers and issues the instanced draw.
    pub fn submit<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> Result<(), FrameError> {
        let instances = self.instances.snapshot();
        backend.upload_frame_constants(&self.frame_constants())?;
        backend.upload_lights(&self.light_constants()?)?;
        backend.upload_instances(instances)?;
        backend.draw(instances.len())?;
        Ok(())
    }

    /// Empties both registries for the next frame.
    pub fn end_frame(&mut self) {
        self.instances.reset();
        self.lights.clear();
    }

    /// Samples input, updates, submits and resets: one whole frame.
    ///
    /// A platform quit skips the frame; an Escape release draws it first.
    pub fn run_frame<S, B>(&mut self, sampler: &mut S, backend: &mut B) -> Result<FrameStatus, FrameError>
    where
        S: InputSampler + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let input = sampler.sample();
        if input.quit {
            log::info!("quit requested after {} frames", self.frame_index);
            return Ok(FrameStatus::Quit);
        }
        let status = self.update(&input)?;
        self.submit(backend)?;
        self.end_frame();
        if status == FrameStatus::Quit {
            log::info!("escape released after {} frames", self.frame_index);
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, ScriptedInput};
    use crate::light::LightType;
    use crate::math::Vec2;
    use approx::assert_relative_eq;

    fn scene() -> Scene {
        Scene::new(&SceneConfig::default())
    }

    #[test]
    fn reference_frame_contents() {
        let mut scene = scene();
        assert_eq!(scene.update(&InputSample::idle()).unwrap(), FrameStatus::Continue);

        assert_eq!(scene.instances().len(), 5);
        assert_eq!(scene.lights().enabled().count(), 3);

        let instances = scene.instances().snapshot();
        assert_eq!(instances[0].position, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(instances[0].scale, Vec3::splat(6.0));
        assert_eq!(instances[0].orientation, Quat::IDENTITY);
        assert_eq!(instances[1].color, Vec4::rgba(0.6, 0.5, 0.0, 1.0));
        for marker in &instances[2..] {
            assert_eq!(marker.scale, Vec3::splat(LIGHT_MARKER_SCALE));
            assert_eq!(marker.color, Vec4::ONE);
        }

        let kinds: Vec<LightType> = scene.lights().lights().iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![LightType::Spotlight, LightType::Spotlight, LightType::Point]
        );
    }

    #[test]
    fn side_spotlight_inherits_cone() {
        let mut scene = scene();
        scene.update(&InputSample::idle()).unwrap();
        let side = scene.lights().lights()[1];
        assert_eq!(side.inner_angle, 15.0);
        assert_eq!(side.outer_angle, 35.0);
        assert_eq!(side.min_distance, 1.0);
        assert_relative_eq!(side.direction.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn orbiting_light_follows_time() {
        let mut scene = scene();
        scene.update(&InputSample::idle()).unwrap();
        let step = SceneConfig::default().time_step;
        assert_relative_eq!(scene.rotation(), step);

        let orbit = scene.lights().lights()[2];
        assert_relative_eq!(orbit.position.x, step.sin() * 10.0);
        assert_relative_eq!(orbit.position.y, step.cos() * 10.0);
        assert_eq!(scene.instances().snapshot()[4].position, orbit.position);
    }

    #[test]
    fn registries_do_not_accumulate_across_frames() {
        let mut scene = scene();
        for _ in 0..3 {
            scene.update(&InputSample::idle()).unwrap();
        }
        assert_eq!(scene.instances().len(), 5);
        assert_eq!(scene.lights().len(), 3);
        assert_eq!(scene.frame_index(), 3);
    }

    #[test]
    fn small_capacity_surfaces_registry_error() {
        let mut scene = Scene::new(&SceneConfig {
            instance_capacity: 3,
            ..SceneConfig::default()
        });
        let err = scene.update(&InputSample::idle()).unwrap_err();
        assert!(matches!(err, FrameError::Registry(_)));
        assert!(scene.instances().is_empty());
        assert!(scene.lights().is_empty());
        assert_eq!(scene.rotation(), 0.0);
        assert_eq!(scene.frame_index(), 0);
    }

    #[test]
    fn escape_release_still_builds_the_frame() {
        let mut scene = scene();
        let mut sample = InputSample::idle();
        sample.keys.key_down(Key::Escape);
        sample.keys.begin_sample();
        sample.keys.key_up(Key::Escape);

        assert_eq!(scene.update(&sample).unwrap(), FrameStatus::Quit);
        assert_eq!(scene.frame_index(), 1);
        assert_eq!(scene.instances().len(), 5);
    }

    #[test]
    fn quit_leaves_scene_untouched() {
        let mut scene = scene();
        let sample = InputSample {
            quit: true,
            ..InputSample::idle()
        };
        assert_eq!(scene.update(&sample).unwrap(), FrameStatus::Quit);
        assert_eq!(scene.frame_index(), 0);
        assert!(scene.instances().is_empty());
    }

    #[test]
    fn input_moves_camera() {
        let mut scene = scene();
        let mut sample = InputSample {
            pointer_delta: Vec2::new(0.0, 0.0),
            ..InputSample::idle()
        };
        sample.keys.key_down(Key::W);
        scene.update(&sample).unwrap();
        assert_relative_eq!(scene.camera().position().z, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn frame_constants_use_camera_and_projection() {
        let scene = scene();
        let constants = scene.frame_constants();
        assert_eq!(constants.perspective, scene.projection().matrix());
        assert_eq!(constants.world_to_camera, scene.camera().world_to_camera());
        assert_eq!(constants.camera_position, Vec3::ZERO);
    }

    #[test]
    fn run_frame_stops_when_input_runs_out() {
        struct Discard;
        impl RenderBackend for Discard {
            fn upload_frame_constants(
                &mut self,
                _: &FrameConstants,
            ) -> Result<(), crate::error::BackendError> {
                Ok(())
            }
            fn upload_lights(&mut self, _: &LightConstants) -> Result<(), crate::error::BackendError> {
                Ok(())
            }
            fn upload_instances(
                &mut self,
                _: &[crate::instance::Instance],
            ) -> Result<(), crate::error::BackendError> {
                Ok(())
            }
            fn draw(&mut self, _: usize) -> Result<(), crate::error::BackendError> {
                Ok(())
            }
        }

        let mut scene = scene();
        let mut input = ScriptedInput::idle_frames(2);
        let mut backend = Discard;
        assert_eq!(scene.run_frame(&mut input, &mut backend).unwrap(), FrameStatus::Continue);
        assert!(scene.instances().is_empty());
        assert_eq!(scene.run_frame(&mut input, &mut backend).unwrap(), FrameStatus::Continue);
        assert_eq!(scene.run_frame(&mut input, &mut backend).unwrap(), FrameStatus::Quit);
        assert_eq!(scene.frame_index(), 2);
    }
}

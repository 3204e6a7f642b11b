//! CPU geometry and lighting core of a real-time 3D renderer.
//!
//! Each frame the crate turns a fly camera, a set of object instances and a
//! set of light sources into the exact buffers a rasterizing backend
//! consumes: projection and view matrices, tightly packed instance records
//! and fixed-slot light constants. The [`shading`] module defines what the
//! pixel stage computes, and [`render::SoftwareBackend`] runs the whole
//! pipeline on the CPU.
//!
//! # Quick Start
//!
//! ```
//! use rtr::prelude::*;
//!
//! let config = RendererConfig::default();
//! let mut scene = Scene::from_config(&config);
//! let mut backend = SoftwareBackend::new(320, 180, 64, ShadingModel::Lit);
//! let mut input = ScriptedInput::idle_frames(1);
//!
//! let status = scene.run_frame(&mut input, &mut backend).unwrap();
//! assert_eq!(status, FrameStatus::Continue);
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod instance;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod scene;
pub mod shading;
#[cfg(feature = "window")]
pub mod window;

pub use error::{BackendError, FrameError, RegistryError};
pub use projection::Projection;

/// Prelude module for convenient imports.
pub mod prelude {
    // Camera
    pub use crate::camera::{CameraBasis, FlyCamera, FlyCameraController};

    // Configuration
    pub use crate::config::{Config, ConfigError, RendererConfig, SceneConfig};

    // Frame assembly
    pub use crate::error::{BackendError, FrameError, RegistryError};
    pub use crate::frame::{FrameConstants, GpuLight, LightConstants, RenderBackend, MAX_LIGHTS};
    pub use crate::instance::{Instance, InstanceRegistry};
    pub use crate::light::{Light, LightRegistry, LightType};
    pub use crate::scene::{FrameStatus, Scene};

    // Input
    pub use crate::input::{InputSample, InputSampler, Key, KeyInteraction, KeyboardState, ScriptedInput};

    // Math
    pub use crate::math::{Mat4, Quat, Vec2, Vec3, Vec4};

    // Projection
    pub use crate::projection::Projection;

    // Rendering
    pub use crate::render::SoftwareBackend;
    pub use crate::shading::{GoochParams, ShadingModel};
}

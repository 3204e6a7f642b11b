//! Configuration system
//!
//! Everything tunable lives in [`RendererConfig`], read from a TOML file.
//! Every section is `#[serde(default)]`, so a file only needs the keys it
//! changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{FlyCamera, FlyCameraController};
use crate::math::Vec3;
use crate::projection::Projection;
use crate::shading::ShadingModel;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a `.toml` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        ensure_toml(path)?;
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to a `.toml` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        ensure_toml(path)?;
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn ensure_toml(path: &Path) -> Result<(), ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(()),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub scene: SceneConfig,
    pub shading: ShadingConfig,
}

impl Config for RendererConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "rtr".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Starting pose and controls of the fly camera. Angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub theta: f32,
    pub phi: f32,
    /// World units per frame.
    pub move_speed: f32,
    /// Degrees per pixel of pointer motion.
    pub look_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            theta: 90.0,
            phi: 90.0,
            move_speed: 0.1,
            look_sensitivity: 0.1,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self) -> FlyCamera {
        let [x, y, z] = self.position;
        FlyCamera::new(Vec3::new(x, y, z), self.theta, self.phi)
    }

    pub fn controller(&self) -> FlyCameraController {
        FlyCameraController::new(self.move_speed, self.look_sensitivity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 66.2,
            z_near: 1.0,
            z_far: 100.0,
        }
    }
}

impl ProjectionConfig {
    /// Projection for a viewport of `width` x `height` pixels.
    pub fn projection(&self, width: u32, height: u32) -> Projection {
        Projection::from_degrees(
            self.fov_degrees,
            Projection::aspect_for_viewport(width, height),
            self.z_near,
            self.z_far,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub instance_capacity: usize,
    pub light_capacity: usize,
    /// Animation time added per frame.
    pub time_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            instance_capacity: 1024,
            light_capacity: 8,
            time_step: 1.0 / 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    pub model: ShadingModel,
}

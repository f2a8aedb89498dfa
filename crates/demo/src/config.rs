use serde::{Deserialize, Serialize};
use spincube_scene::BoxGeometry;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading a [`DemoConfig`] from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fixed parameters of the demo scene.
///
/// Defaults reproduce the classic setup: 75° fov on a 400×200 canvas, a unit
/// green cube five units in front of the camera, 0.01 rad per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Camera distance along +Z from the origin.
    pub camera_z: f32,
    pub cube: BoxGeometry,
    /// Packed `0xRRGGBB`.
    pub cube_color: u32,
    /// Radians added to the x and y rotation each frame.
    pub rotation_step: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            aspect: 400.0 / 200.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 5.0,
            cube: BoxGeometry::unit(),
            cube_color: 0x00ff00,
            rotation_step: 0.01,
        }
    }
}

impl DemoConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be in (0, 180), got {}",
                self.fov
            )));
        }
        if !(self.aspect > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        let size = self.cube.size();
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cube dimensions must be positive, got {size}"
            )));
        }
        if self.cube_color > 0xff_ffff {
            return Err(ConfigError::Invalid(format!(
                "cube_color must fit in 0xRRGGBB, got {:#x}",
                self.cube_color
            )));
        }
        if !(self.rotation_step.is_finite() && self.rotation_step >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rotation_step must be finite and non-negative, got {}",
                self.rotation_step
            )));
        }
        Ok(())
    }
}

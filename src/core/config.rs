// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Renderer configuration
//!
//! Everything [`Renderer::init`](crate::core::pipeline::Renderer::init)
//! needs: buffer size, clip planes, blend weight, default texture color and
//! the initial camera. Files are TOML or JSON, picked by extension; every
//! field is optional and falls back to [`RendererConfig::default`].
//!
//! ```toml
//! width = 320
//! height = 240
//! near = 2.0
//! far = 1000.0
//!
//! [camera]
//! eye = [0.0, 0.0, -100.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{RenderError, Result};
use crate::core::math::float::{flt_less, flt_less_equal};
use crate::core::math::Vec3;
use crate::core::resource::color::LIME;

/// Look-at camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub at: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [152.5, 25.0, -70.0],
            at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraConfig {
    pub fn eye(&self) -> Vec3 {
        Vec3::from(self.eye)
    }

    pub fn at(&self) -> Vec3 {
        Vec3::from(self.at)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::from(self.up)
    }
}

/// Renderer setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
    /// Near plane distance (at least 1)
    pub near: f32,
    /// Far plane distance (greater than `near`)
    pub far: f32,
    /// Foreground weight for alpha blending
    pub alpha_blend: f32,
    /// Color of the 1×1 texture used when none is set
    pub default_texture_color: u32,
    pub camera: CameraConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            near: 2.0,
            far: 1000.0,
            alpha_blend: 0.5,
            default_texture_color: LIME,
            camera: CameraConfig::default(),
        }
    }
}

impl RendererConfig {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// Parse a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// Load and validate a `.toml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => {
                return Err(RenderError::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as `.toml` or `.json`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| RenderError::Config(e.to_string()))?
            }
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| RenderError::Config(e.to_string()))?,
            _ => {
                return Err(RenderError::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };

        std::fs::write(path, text)?;
        Ok(())
    }

    /// Check buffer size and clip planes
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidBufferSize`] for a zero dimension
    /// - [`RenderError::InvalidClipPlanes`] unless `near >= 1` and
    ///   `far > near`
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidBufferSize {
                width: self.width,
                height: self.height,
            });
        }

        validate_clip_planes(self.near, self.far)
    }
}

/// Near must be at least 1 and far strictly beyond it
pub fn validate_clip_planes(near: f32, far: f32) -> Result<()> {
    if flt_less(near, 1.0) || flt_less_equal(far, near) {
        return Err(RenderError::InvalidClipPlanes { near, far });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.camera.eye(), Vec3::new(152.5, 25.0, -70.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RendererConfig::from_toml_str(
            "width = 64\nheight = 32\n\n[camera]\neye = [0.0, 0.0, -10.0]\n",
        )
        .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.near, 2.0);
        assert_eq!(config.camera.eye(), Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(config.camera.up(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_json_parse() {
        let config = RendererConfig::from_json_str(r#"{"far": 50.0}"#).unwrap();
        assert_eq!(config.far, 50.0);
        assert_eq!(config.width, 800);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            RendererConfig::from_toml_str("width = \"wide\""),
            Err(RenderError::Config(_))
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = RendererConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidBufferSize { .. })
        ));

        config.width = 10;
        config.near = 0.5;
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidClipPlanes { .. })
        ));

        config.near = 10.0;
        config.far = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = RendererConfig {
            width: 123,
            alpha_blend: 0.25,
            ..Default::default()
        };

        for name in ["r.toml", "r.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(RendererConfig::load(&path).unwrap(), config);
        }

        assert!(config.save(dir.path().join("r.yaml")).is_err());
    }
}

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

//! Light sources and surface materials
//!
//! Colors are per-channel intensities in `0..=255`; material coefficients
//! scale them and are normally in `0..=1`.

use crate::core::math::Vec3;

/// Light source geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Parallel rays travelling along `direction`
    Directional { direction: Vec3 },

    /// Omni light that fades linearly to zero at `radius`
    Point { position: Vec3, radius: f32 },
}

/// Colored light source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub kind: LightKind,
}

impl Light {
    pub fn directional(color: Vec3, direction: Vec3) -> Self {
        Self {
            color,
            kind: LightKind::Directional { direction },
        }
    }

    pub fn point(color: Vec3, position: Vec3, radius: f32) -> Self {
        Self {
            color,
            kind: LightKind::Point { position, radius },
        }
    }
}

/// Surface response to light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Self-illumination added to every vertex
    pub emissive: Vec3,
    /// Scale applied to the ambient light
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Specular exponent
    pub power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            emissive: Vec3::zeros(),
            ambient: Vec3::zeros(),
            diffuse: Vec3::zeros(),
            specular: Vec3::zeros(),
            power: 0.0,
        }
    }
}

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

//! Illumination engine
//!
//! Per-vertex Phong-style lighting in world space.
//!
//! # Model
//!
//! For every vertex the color starts at
//! `ambient_light ⊙ material.ambient + material.emissive` and each enabled
//! light adds:
//!
//! - diffuse `light ⊙ material.diffuse · (L·N)` when `L·N > 0`
//! - specular `light ⊙ material.specular · (R·V)^power` when `R·V > 0`,
//!   with `R = 2(N·L)N - L` and `V` toward the eye. Skipped when no eye
//!   position is supplied.
//!
//! Directional lights use `L = -direction`. Point lights use the unit vector
//! toward the light, only reach vertices within `radius`, and scale both
//! terms by `1 - distance / radius`.
//!
//! Channels are clamped above at 255 and nowhere else. Negative emissive,
//! ambient, diffuse or specular factors and negative light colors carry
//! through as negative channels; the rasterizer's float-to-byte conversion
//! saturates those to 0.

use crate::core::error::{RenderError, Result};
use crate::core::math::float::{flt_less, flt_less_equal};
use crate::core::math::{normalize_or_zero, transform_point, Mat4, Vec3};
use crate::core::resource::{Light, LightKind, Material};

/// Registered light
#[derive(Debug, Clone, Copy, PartialEq)]
struct LightSlot {
    id: i32,
    enabled: bool,
    light: Light,
}

/// Lights, ambient color and material for the illumination pass
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    slots: Vec<LightSlot>,
    ambient: Vec3,
    material: Material,
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a light under a unique id
    ///
    /// Directional lights have their direction normalised.
    ///
    /// # Errors
    ///
    /// [`RenderError::DuplicateLightId`] if `id` is taken; the set is
    /// unchanged.
    pub fn add(&mut self, mut light: Light, id: i32, enabled: bool) -> Result<()> {
        if self.slots.iter().any(|s| s.id == id) {
            return Err(RenderError::DuplicateLightId(id));
        }

        if let LightKind::Directional { direction } = &mut light.kind {
            *direction = normalize_or_zero(direction);
        }

        self.slots.push(LightSlot { id, enabled, light });
        log::debug!("Added light {} (enabled: {})", id, enabled);
        Ok(())
    }

    /// Unregister a light and return it
    pub fn remove(&mut self, id: i32) -> Result<Light> {
        let index = self.position(id)?;
        log::debug!("Removed light {}", id);
        Ok(self.slots.remove(index).light)
    }

    pub fn get(&self, id: i32) -> Option<&Light> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.light)
    }

    /// Mutable access for moving a light between frames
    pub fn get_mut(&mut self, id: i32) -> Option<&mut Light> {
        self.slots.iter_mut().find(|s| s.id == id).map(|s| &mut s.light)
    }

    pub fn set_enabled(&mut self, id: i32, enabled: bool) -> Result<()> {
        let index = self.position(id)?;
        self.slots[index].enabled = enabled;
        Ok(())
    }

    pub fn is_enabled(&self, id: i32) -> Option<bool> {
        self.slots.iter().find(|s| s.id == id).map(|s| s.enabled)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn any_enabled(&self) -> bool {
        self.slots.iter().any(|s| s.enabled)
    }

    pub fn set_ambient(&mut self, color: Vec3) {
        self.ambient = color;
    }

    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    fn position(&self, id: i32) -> Result<usize> {
        self.slots
            .iter()
            .position(|s| s.id == id)
            .ok_or(RenderError::UnknownLightId(id))
    }

    /// Light every vertex of a mesh
    ///
    /// # Arguments
    ///
    /// * `normal` - Local normal points (`vertex + unit normal`)
    /// * `world_vertex` - The mesh vertices already in world space
    /// * `world` - World matrix, applied to the normal points
    /// * `eye` - Viewer position for specular highlights
    /// * `color` - Output, one RGB triple per vertex
    pub fn compute(
        &self,
        normal: &[Vec3],
        world_vertex: &[Vec3],
        world: &Mat4,
        eye: Option<&Vec3>,
        color: &mut Vec<Vec3>,
    ) {
        let m = &self.material;
        let base = self.ambient.component_mul(&m.ambient) + m.emissive;

        color.clear();
        color.resize(normal.len(), base);

        if self.any_enabled() {
            let world_normal: Vec<Vec3> = normal
                .iter()
                .zip(world_vertex)
                .map(|(n, v)| normalize_or_zero(&(transform_point(n, world) - v)))
                .collect();

            for slot in self.slots.iter().filter(|s| s.enabled) {
                for ((c, n), v) in color.iter_mut().zip(&world_normal).zip(world_vertex) {
                    *c += self.contribution(&slot.light, n, v, eye);
                }
            }
        }

        for c in color.iter_mut() {
            for channel in c.iter_mut() {
                if flt_less(255.0, *channel) {
                    *channel = 255.0;
                }
            }
        }
    }

    /// Diffuse plus specular light reaching one vertex
    fn contribution(&self, light: &Light, n: &Vec3, v: &Vec3, eye: Option<&Vec3>) -> Vec3 {
        let m = &self.material;

        let (to_light, attenuation) = match light.kind {
            LightKind::Directional { direction } => (-direction, 1.0),
            LightKind::Point { position, radius } => {
                let d = position - v;
                let distance = d.norm();
                if !flt_less_equal(distance, radius) {
                    return Vec3::zeros();
                }
                (normalize_or_zero(&d), 1.0 - distance / radius)
            }
        };

        let mut sum = Vec3::zeros();

        let c = to_light.dot(n);
        if flt_less(0.0, c) {
            sum += light.color.component_mul(&m.diffuse) * c * attenuation;
        }

        if let Some(eye) = eye {
            let reflect = normalize_or_zero(&(n * (2.0 * n.dot(&to_light)) - to_light));
            let sight = normalize_or_zero(&(eye - v));
            let c = reflect.dot(&sight);
            if flt_less(0.0, c) {
                sum += light.color.component_mul(&m.specular) * c.powf(m.power) * attenuation;
            }
        }

        sum
    }
}

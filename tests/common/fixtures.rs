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

//! Test fixtures for renderer testing
//!
//! The default camera sits at `(0, 0, -8)` looking at the origin over a
//! 64×64 buffer, so world `(x, y, 0)` lands on pixel `(32 + 4x, 32 - 4y)`
//! at depth 8.

use raster3d::core::config::{CameraConfig, RendererConfig};
use raster3d::core::math::Vec3;
use raster3d::core::pipeline::{RenderStateKind, Renderer};
use raster3d::core::resource::{Material, MeshSegment, MeshTriangle};

#[allow(dead_code)]
pub fn test_config() -> RendererConfig {
    RendererConfig {
        width: 64,
        height: 64,
        camera: CameraConfig {
            eye: [0.0, 0.0, -8.0],
            at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        },
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn create_renderer() -> Renderer {
    Renderer::new(&test_config()).expect("Failed to create renderer")
}

/// Renderer with illumination on and an emissive-only material
#[allow(dead_code)]
pub fn create_lit_renderer(r: f32, g: f32, b: f32) -> Renderer {
    let mut renderer = create_renderer();
    renderer.enable_render_state(RenderStateKind::Illumination, true);
    renderer.set_material(Material {
        emissive: Vec3::new(r, g, b),
        ..Default::default()
    });
    renderer
}

/// Triangle covering pixels (16, 48), (48, 48), (32, 16) at any depth `z`
///
/// The winding faces away from the camera.
#[allow(dead_code)]
pub fn screen_triangle(z: f32) -> MeshTriangle {
    let s = (z + 8.0) / 2.0;
    MeshTriangle::new(
        vec![
            Vec3::new(-s, -s, z),
            Vec3::new(s, -s, z),
            Vec3::new(0.0, s, z),
        ],
        vec![0, 1, 2],
    )
    .expect("Failed to build triangle")
}

#[allow(dead_code)]
pub fn segment(a: Vec3, b: Vec3) -> MeshSegment {
    MeshSegment::new(vec![a, b], vec![0, 1]).expect("Failed to build segment")
}

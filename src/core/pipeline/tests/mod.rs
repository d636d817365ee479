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

//! Renderer tests
//!
//! Tests are organized into the following modules:
//! - `basic`: initialization, defaults and state setters
//! - `validation`: rejected draws and frustum culling
//! - `segments`: wireframe draws, near clipping and viewport clipping
//! - `triangles`: lit and textured draws, depth test, blending, culling

mod triangles;
mod validation;

use super::Renderer;
use crate::core::config::{CameraConfig, RendererConfig};

/// 64×64 buffer, camera 8 units behind the origin looking down +z
///
/// World `z = 0` lands at camera depth 8, so `1/z` is exact and a point
/// `(x, y, 0)` maps to pixel `(32 + 4x, 32 - 4y)`.
pub(super) fn test_config() -> RendererConfig {
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

pub(super) fn test_renderer() -> Renderer {
    Renderer::new(&test_config()).unwrap()
}

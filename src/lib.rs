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

//! CPU-only 3D rasterization library
//!
//! This library provides a software rendering pipeline that draws segment and
//! triangle meshes into an in-memory packed-ARGB frame buffer, with near-plane
//! clipping, face culling, per-vertex lighting, perspective-correct texture
//! sampling, depth testing and alpha blending.
//!
//! # Example
//!
//! ```
//! use raster3d::core::config::RendererConfig;
//! use raster3d::core::math::Vec3;
//! use raster3d::core::pipeline::{RenderStateKind, Renderer};
//! use raster3d::core::resource::{Material, MeshTriangle};
//!
//! let config = RendererConfig {
//!     width: 160,
//!     height: 120,
//!     ..Default::default()
//! };
//! let mut renderer = Renderer::new(&config).unwrap();
//! renderer.enable_render_state(RenderStateKind::Illumination, true);
//! renderer.set_material(Material {
//!     emissive: Vec3::new(255.0, 0.0, 0.0),
//!     ..Default::default()
//! });
//!
//! let cube = MeshTriangle::cube(20.0, 20.0, 20.0).unwrap();
//! let outcome = renderer.draw_3d_mesh_triangle(&cube, None);
//! assert!(outcome.is_drawn());
//! ```

pub mod core;

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

//! Caller-owned rendering resources
//!
//! - `color`: packed ARGB helpers and named colors
//! - `texture`: texel grids, decoded from image files
//! - `font`: ASCII glyph sheets for the text overlay
//! - `light`: light sources and materials
//! - `mesh`: segment/triangle meshes, text loader and shape generators

pub mod color;
pub mod font;
pub mod light;
pub mod mesh;
pub mod texture;

pub use font::AsciiFont;
pub use light::{Light, LightKind, Material};
pub use mesh::{MeshSegment, MeshTriangle};
pub use texture::Texture;

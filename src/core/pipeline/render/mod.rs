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

//! Scanline and line rasterizers
//!
//! - `rasterizer`: the [`Rasterizer`] front end and its dispatch tables
//! - `triangle`: perspective-correct flat-triangle walker
//! - `segment`: Bresenham walker with optional depth and blending

mod rasterizer;
mod segment;
mod triangle;

pub use rasterizer::Rasterizer;

/// Mutable view of the frame buffer planes
pub(crate) struct Surface<'a> {
    pub color: &'a mut [u32],
    pub depth: &'a mut [f32],
    pub width: usize,
}

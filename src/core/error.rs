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

/// Renderer error types
use thiserror::Error;

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Main error type for the renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid transform tag: {0} (valid range: 0-3)")]
    InvalidTransformTag(u32),

    #[error("Invalid render state tag: {0} (valid range: 0-4)")]
    InvalidRenderStateTag(u32),

    #[error("Invalid clip planes: near={near}, far={far} (need near >= 1 and far > near)")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("Invalid buffer size: {width}x{height}")]
    InvalidBufferSize { width: u32, height: u32 },

    #[error("Light id {0} is already registered")]
    DuplicateLightId(i32),

    #[error("Unknown light id: {0}")]
    UnknownLightId(i32),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capture error: {0}")]
    Capture(String),
}

/// Mesh, texture and font loading errors
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Mesh parse error at line {line}: {reason}")]
    MeshParse { line: usize, reason: String },

    #[error("Mesh index {index} out of range (vertex count {count})")]
    MeshIndexOutOfRange { index: usize, count: usize },

    #[error("Invalid shape parameters: {0}")]
    InvalidShape(String),

    #[error("Invalid texture size: {width}x{height} with {len} texels")]
    InvalidTextureSize {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("Invalid font: {0}")]
    InvalidFont(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

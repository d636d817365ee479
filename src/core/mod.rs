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

//! Core rendering components
//!
//! This module contains the renderer and everything it draws with:
//! - Math (row-vector transforms, truncating float comparison)
//! - 2D geometry (rectangles, segment clipping)
//! - Frame buffer (color and depth planes, 2D primitives)
//! - Resources (colors, textures, fonts, lights, meshes)
//! - Pipeline (the 3D renderer and its stages)
//! - Configuration and frame capture

pub mod capture;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod resource;

// Re-export commonly used types
pub use capture::FrameCapture;
pub use config::RendererConfig;
pub use error::{RenderError, ResourceError, Result};
pub use framebuffer::FrameBuffer;
pub use pipeline::{DrawOutcome, Renderer};

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

//! Texture storage and loading
//!
//! A texture is a row-major grid of opaque ARGB texels, first row at the top.
//! Image files are decoded through the `image` crate (PNG and BMP are enabled)
//! and their alpha channel is dropped.

use std::path::Path;

use image::DynamicImage;

use super::color::pack_rgb;
use crate::core::error::ResourceError;

/// Row-major ARGB texel grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<u32>,
}

impl Texture {
    /// Create a texture from raw texels
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidTextureSize`] when either dimension is
    /// zero or `texels.len() != width * height`.
    pub fn new(width: usize, height: usize, texels: Vec<u32>) -> Result<Self, ResourceError> {
        if width == 0 || height == 0 || texels.len() != width * height {
            return Err(ResourceError::InvalidTextureSize {
                width,
                height,
                len: texels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// 1×1 texture of a single color
    pub fn solid(color: u32) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Decode an image file into a texture
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let image = image::open(path)?;
        let texture = Self::from_image(&image)?;
        log::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Convert a decoded image, dropping alpha
    pub fn from_image(image: &DynamicImage) -> Result<Self, ResourceError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let texels = rgb
            .pixels()
            .map(|p| pack_rgb(p.0[0], p.0[1], p.0[2]))
            .collect();
        Self::new(width as usize, height as usize, texels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn texels(&self) -> &[u32] {
        &self.texels
    }

    pub fn texels_mut(&mut self) -> &mut [u32] {
        &mut self.texels
    }

    /// Texel at `(x, y)` with both coordinates clamped into the texture
    #[inline(always)]
    pub fn texel_clamped(&self, x: i32, y: i32) -> u32 {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        self.texels[x + y * self.width]
    }
}

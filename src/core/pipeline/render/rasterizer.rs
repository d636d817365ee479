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

//! Rasterizer front end
//!
//! Every combination of render states gets its own monomorphised inner loop,
//! selected once per draw from a table indexed by the dispatch key.
//!
//! # Triangle table
//!
//! Indexed by `dt | ab<<1 | ic<<2 | ts<<3`. Triangle draws require exactly
//! one of illumination and texture sampling, so only slots `0x4..=0x7`
//! (illumination) and `0x8..=0xB` (texture) hold a function; the rest are
//! `None`.
//!
//! # Segment table
//!
//! Indexed by `dt | ab<<1`; all four slots are live.
//!
//! # Viewport
//!
//! The rectangle every primitive is clipped to is the view rectangle
//! intersected with the buffer, so a view matrix that maps outside the
//! buffer can never produce an out-of-bounds write.

use super::segment::rasterize_segment;
use super::triangle::rasterize_flat;
use super::Surface;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{rectangle_intersect, Rect};
use crate::core::math::Vec3;
use crate::core::pipeline::classify::FlatTriangle;
use crate::core::pipeline::fill::VertexData;
use crate::core::resource::Texture;

type SegmentFn = fn(&Rasterizer, &mut Surface<'_>, &Vec3, &Vec3, u32);

type TriangleFn = fn(&Rasterizer, &mut Surface<'_>, &FlatTriangle, &[VertexData; 4], &Texture);

const SEGMENT_RASTERIZERS: [SegmentFn; 4] = [
    rasterize_segment::<false, false>,
    rasterize_segment::<true, false>,
    rasterize_segment::<false, true>,
    rasterize_segment::<true, true>,
];

const TRIANGLE_RASTERIZERS: [Option<TriangleFn>; 16] = [
    None,
    None,
    None,
    None,
    // Illumination
    Some(rasterize_flat::<false, false, false>),
    Some(rasterize_flat::<true, false, false>),
    Some(rasterize_flat::<false, true, false>),
    Some(rasterize_flat::<true, true, false>),
    // Texture sampling
    Some(rasterize_flat::<false, false, true>),
    Some(rasterize_flat::<true, false, true>),
    Some(rasterize_flat::<false, true, true>),
    Some(rasterize_flat::<true, true, true>),
    None,
    None,
    None,
    None,
];

/// Clipping and blending parameters shared by every raster path
///
/// # Examples
///
/// ```
/// use raster3d::core::framebuffer::FrameBuffer;
/// use raster3d::core::geometry::Rect;
/// use raster3d::core::math::Vec3;
/// use raster3d::core::pipeline::Rasterizer;
///
/// let mut fb = FrameBuffer::new(16, 16);
/// let mut rasterizer = Rasterizer::new();
/// rasterizer.set_viewport(&Rect::new(0, 0, 16, 16), &fb.rect());
///
/// // Plain segment: no depth test, no blending
/// rasterizer.draw_segment(&mut fb, 0, &Vec3::new(0.0, 0.0, 1.0), &Vec3::new(15.0, 0.0, 1.0), 0xffff_ffff);
/// assert_eq!(fb.pixel(15, 0), Some(0xffff_ffff));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rasterizer {
    /// View rectangle clamped to the buffer (`x2`/`y2` exclusive)
    pub(super) viewport: Rect,

    /// Foreground weight for alpha blending
    pub(super) fg_alpha: f32,

    /// Background weight, always `1 - fg_alpha`
    pub(super) bg_alpha: f32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Create a rasterizer with an empty viewport and an even blend
    pub fn new() -> Self {
        Self {
            viewport: Rect::default(),
            fg_alpha: 0.5,
            bg_alpha: 0.5,
        }
    }

    /// Clip to `view ∩ buffer`
    ///
    /// Disjoint rectangles leave an empty viewport that rejects everything.
    pub fn set_viewport(&mut self, view: &Rect, buffer: &Rect) {
        self.viewport = rectangle_intersect(view, buffer).unwrap_or_default();
    }

    #[inline]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Set the foreground blend weight; the background gets the rest
    pub fn set_alpha_blend(&mut self, foreground: f32) {
        self.fg_alpha = foreground;
        self.bg_alpha = 1.0 - foreground;
    }

    /// `(foreground, background)` blend weights
    #[inline]
    pub fn alpha_blend(&self) -> (f32, f32) {
        (self.fg_alpha, self.bg_alpha)
    }

    /// Rasterize one view-space segment
    ///
    /// # Arguments
    ///
    /// * `fb` - Target buffer
    /// * `key` - Segment key `dt | ab<<1`
    /// * `v0`, `v1` - Pixel-space endpoints; `z` holds `1/z`
    /// * `color` - Packed ARGB color
    pub fn draw_segment(&self, fb: &mut FrameBuffer, key: usize, v0: &Vec3, v1: &Vec3, color: u32) {
        let width = fb.width();
        let (color_plane, depth_plane) = fb.planes_mut();
        let mut surface = Surface {
            color: color_plane,
            depth: depth_plane,
            width,
        };

        SEGMENT_RASTERIZERS[key & 0x3](self, &mut surface, v0, v1, color);
    }

    /// Rasterize one flat triangle part
    ///
    /// # Arguments
    ///
    /// * `fb` - Target buffer
    /// * `key` - Triangle key `dt | ab<<1 | ic<<2 | ts<<3`
    /// * `part` - Corner slots into `data`
    /// * `data` - Filled tuples (three corners plus the split vertex)
    /// * `texture` - Sampled when the key has `ts` set
    ///
    /// # Returns
    ///
    /// `false` if `key` names a dead slot and nothing was drawn
    pub fn draw_flat_triangle(
        &self,
        fb: &mut FrameBuffer,
        key: usize,
        part: &FlatTriangle,
        data: &[VertexData; 4],
        texture: &Texture,
    ) -> bool {
        let Some(rasterize) = TRIANGLE_RASTERIZERS[key & 0xf] else {
            return false;
        };

        let width = fb.width();
        let (color_plane, depth_plane) = fb.planes_mut();
        let mut surface = Surface {
            color: color_plane,
            depth: depth_plane,
            width,
        };

        log::trace!("Rasterizing flat triangle {:?} with key {:#x}", part, key);
        rasterize(self, &mut surface, part, data, texture);
        true
    }
}

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

//! Flat-triangle scanline walker
//!
//! Walks a flat-bottom or flat-top part row by row between its left and
//! right edges, interpolating the filled tuple linearly in screen space.
//!
//! # Perspective correction
//!
//! Tuples carry `1/z` and attributes pre-divided by `z`. Both vary linearly
//! across the screen, so each pixel recovers its attribute as
//! `(attr/z) / (1/z)`.
//!
//! # Edge buffers
//!
//! Row edges hold fields `1..` of the tuple (`x, 1/z, attributes...`); the
//! span buffer holds fields `2..` (`1/z, attributes...`).

use super::{Rasterizer, Surface};
use crate::core::geometry::{rectangle_intersect, Rect};
use crate::core::math::float::flt_less;
use crate::core::pipeline::classify::FlatTriangle;
use crate::core::pipeline::fill::{VertexData, MAX_FIELDS};
use crate::core::resource::color::{blend, blend_rgb, pack_rgb};
use crate::core::resource::Texture;

const EDGE_FIELDS: usize = MAX_FIELDS - 1;
const SPAN_FIELDS: usize = MAX_FIELDS - 2;

/// Rasterize one flat part
///
/// `TS` selects texture sampling (5 fields), otherwise the part carries lit
/// colors (6 fields).
///
/// # Algorithm
///
/// 1. Bound the part by the truncated corner coordinates and give up if the
///    bounds miss the viewport.
/// 2. Step both edges by `(bottom - top) / height` per row, skipping rows
///    above the viewport and stopping at its bottom.
/// 3. Per row, step the span by `(right - left) / width` per pixel, skipping
///    pixels left of the viewport and stopping at its right edge.
/// 4. Per pixel, depth test against `1/z` when `DT`, then write or blend.
pub(super) fn rasterize_flat<const DT: bool, const AB: bool, const TS: bool>(
    r: &Rasterizer,
    s: &mut Surface<'_>,
    part: &FlatTriangle,
    data: &[VertexData; 4],
    texture: &Texture,
) {
    let fields = if TS { 5 } else { 6 };
    let edge_fields = fields - 1;
    let span_fields = fields - 2;

    let lt = &data[part.left_top];
    let rt = &data[part.right_top];
    let lb = &data[part.left_bottom];
    let rb = &data[part.right_bottom];

    let xs = [lt[1] as i32, lb[1] as i32, rt[1] as i32, rb[1] as i32];
    let bounds = Rect::new(
        xs.iter().copied().min().unwrap_or(0),
        lt[0] as i32,
        xs.iter().copied().max().unwrap_or(0),
        lb[0] as i32,
    );

    let vp = r.viewport;
    if rectangle_intersect(&bounds, &vp).is_none() {
        return;
    }

    let mut y_top = bounds.y1;
    let height = bounds.y2 - y_top;
    if height == 0 {
        return;
    }

    let mut left = [0.0f32; EDGE_FIELDS];
    let mut right = [0.0f32; EDGE_FIELDS];
    let mut left_step = [0.0f32; EDGE_FIELDS];
    let mut right_step = [0.0f32; EDGE_FIELDS];
    for i in 0..edge_fields {
        left[i] = lt[i + 1];
        right[i] = rt[i + 1];
        left_step[i] = (lb[i + 1] - lt[i + 1]) / height as f32;
        right_step[i] = (rb[i + 1] - rt[i + 1]) / height as f32;
    }

    if y_top < vp.y1 {
        let skipped = (vp.y1 - y_top) as f32;
        for i in 0..edge_fields {
            left[i] += skipped * left_step[i];
            right[i] += skipped * right_step[i];
        }
        y_top = vp.y1;
    }
    let y_bottom = bounds.y2.min(vp.y2);

    let (fg, bg) = (r.fg_alpha, r.bg_alpha);

    for y in y_top..y_bottom {
        let mut x_left = left[0] as i32;
        let x_right = right[0] as i32;
        let width = x_right - x_left;

        if width > 0 {
            let mut span = [0.0f32; SPAN_FIELDS];
            let mut span_step = [0.0f32; SPAN_FIELDS];
            for i in 0..span_fields {
                span[i] = left[i + 1];
                span_step[i] = (right[i + 1] - left[i + 1]) / width as f32;
            }

            if x_left < vp.x1 {
                let skipped = (vp.x1 - x_left) as f32;
                for i in 0..span_fields {
                    span[i] += skipped * span_step[i];
                }
                x_left = vp.x1;
            }
            let x_right = x_right.min(vp.x2);

            let row = y as usize * s.width;
            for x in x_left..x_right {
                let p = row + x as usize;
                let inv_z = span[0];

                if !DT || flt_less(s.depth[p], inv_z) {
                    s.color[p] = shade::<AB, TS>(s.color[p], &span, texture, fg, bg);
                    if DT {
                        s.depth[p] = inv_z;
                    }
                }

                for i in 0..span_fields {
                    span[i] += span_step[i];
                }
            }
        }

        for i in 0..edge_fields {
            left[i] += left_step[i];
            right[i] += right_step[i];
        }
    }
}

/// Color of one pixel given its interpolated span values
#[inline(always)]
fn shade<const AB: bool, const TS: bool>(
    bg_color: u32,
    span: &[f32; SPAN_FIELDS],
    texture: &Texture,
    fg: f32,
    bg: f32,
) -> u32 {
    let inv_z = span[0];

    if TS {
        let u = (span[1] / inv_z) as i32;
        let v = (span[2] / inv_z) as i32;
        let texel = texture.texel_clamped(u, v);
        if AB {
            blend(bg_color, texel, fg, bg)
        } else {
            texel
        }
    } else {
        let rgb = [span[1] / inv_z, span[2] / inv_z, span[3] / inv_z];
        if AB {
            blend_rgb(bg_color, rgb, fg, bg)
        } else {
            pack_rgb(rgb[0] as u8, rgb[1] as u8, rgb[2] as u8)
        }
    }
}

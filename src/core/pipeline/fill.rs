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

//! Attribute fill
//!
//! Packs a view-space vertex and its attributes into the flat tuple the
//! classifier and rasterizer interpolate:
//!
//! ```text
//! [y, x, 1/z, (r/z, g/z, b/z), (u·(tw-1)/z, v·(th-1)/z)]
//! ```
//!
//! Attributes are pre-divided by depth so linear interpolation in screen
//! space stays perspective-correct; the rasterizer divides by the
//! interpolated `1/z` to recover them. The color group is present with
//! illumination, the texture group with texture sampling, giving 3, 6, 5
//! or 8 fields.

use crate::core::math::{Vec2, Vec3};

/// Longest tuple (color and texture)
pub const MAX_FIELDS: usize = 8;

/// One filled vertex; fields past the layout's count are unused
pub type VertexData = [f32; MAX_FIELDS];

/// Field count per attribute key `ic | ts<<1`
const FIELD_COUNT: [usize; 4] = [3, 6, 5, 8];

#[inline]
pub fn field_count(attribute_key: usize) -> usize {
    FIELD_COUNT[attribute_key & 0x3]
}

/// Per-vertex inputs for the fill stage
#[derive(Debug, Clone, Copy)]
pub struct FillSource<'a> {
    /// View-space positions; `z` is camera depth
    pub view: &'a [Vec3],
    /// Lit colors, index-aligned with `view` when illumination is on
    pub color: &'a [Vec3],
    /// Texture coordinates, index-aligned with `view` when sampling is on
    pub texture: &'a [Vec2],
    /// Texture width and height in texels
    pub texture_size: (usize, usize),
}

type FillFn = fn(&FillSource<'_>, usize) -> VertexData;

const FILLERS: [FillFn; 4] = [
    fill_vertex::<false, false>,
    fill_vertex::<true, false>,
    fill_vertex::<false, true>,
    fill_vertex::<true, true>,
];

fn fill_vertex<const IC: bool, const TS: bool>(src: &FillSource<'_>, index: usize) -> VertexData {
    let v = src.view[index];
    let mut data = [0.0; MAX_FIELDS];

    data[0] = v.y;
    data[1] = v.x;
    data[2] = 1.0 / v.z;

    let mut next = 3;
    if IC {
        let c = src.color[index];
        data[3] = c.x / v.z;
        data[4] = c.y / v.z;
        data[5] = c.z / v.z;
        next = 6;
    }

    if TS {
        let t = src.texture[index];
        let right = src.texture_size.0.saturating_sub(1) as f32;
        let bottom = src.texture_size.1.saturating_sub(1) as f32;
        data[next] = t.x * right / v.z;
        data[next + 1] = t.y * bottom / v.z;
    }

    data
}

/// Fill the three corners of a triangle
///
/// # Returns
///
/// The tuples and the number of meaningful fields in each
pub fn fill_triangle(
    attribute_key: usize,
    src: &FillSource<'_>,
    corners: [usize; 3],
) -> ([VertexData; 3], usize) {
    let key = attribute_key & 0x3;
    let fill = FILLERS[key];
    (corners.map(|i| fill(src, i)), FIELD_COUNT[key])
}

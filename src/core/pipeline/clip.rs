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

//! Near-plane clipper
//!
//! Cuts camera-space primitives against the plane `z = near`. New vertices
//! are appended to a [`VertexArena`], so indices handed out earlier stay
//! valid and the clipped index list can mix original and new vertices.
//!
//! # Fast path
//!
//! When the whole bounding sphere lies at or beyond the near plane nothing
//! can be cut, and the caller's index slice is returned as
//! [`Cow::Borrowed`] without touching the arena.
//!
//! # Cut point
//!
//! Along an edge from `a` to `b`, with `t = (near - a.z) / (near - b.z)`,
//! every attribute is `(t·b - a) / (t - 1)`. When the two endpoint values
//! compare equal, the value of a designated endpoint is taken instead, so
//! axis-aligned edges stay exact.
//!
//! # Attribute layouts
//!
//! Triangles carry optional per-vertex color and texture coordinates that
//! must be cut in lockstep with the position. The four layouts
//! (`ic | ts<<1`) are monomorphised and dispatched through a table.

use std::borrow::Cow;

use crate::core::math::float::{flt_equal, flt_less, flt_less_equal};
use crate::core::math::{Vec2, Vec3};

/// Camera-space vertices with their clip-carried attributes
///
/// `color` and `texture` are either empty or index-aligned with `camera`.
#[derive(Debug, Clone, Default)]
pub struct VertexArena {
    pub camera: Vec<Vec3>,
    pub color: Vec<Vec3>,
    pub texture: Vec<Vec2>,
}

impl VertexArena {
    pub fn clear(&mut self) {
        self.camera.clear();
        self.color.clear();
        self.texture.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.camera.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.camera.is_empty()
    }

    /// Append the cut point of edge `a`→`b` and return its index
    ///
    /// `fallback` names the endpoint whose value is kept when the two ends
    /// of a channel compare equal.
    fn push_cut<const IC: bool, const TS: bool>(
        &mut self,
        near: f32,
        a: usize,
        b: usize,
        fallback: usize,
    ) -> usize {
        let (va, vb, vf) = (self.camera[a], self.camera[b], self.camera[fallback]);
        let t = (near - va.z) / (near - vb.z);
        let cut = |x: f32, y: f32, f: f32| {
            if flt_equal(x, y) {
                f
            } else {
                (t * y - x) / (t - 1.0)
            }
        };

        self.camera
            .push(Vec3::new(cut(va.x, vb.x, vf.x), cut(va.y, vb.y, vf.y), near));

        if IC {
            let (ca, cb, cf) = (self.color[a], self.color[b], self.color[fallback]);
            self.color.push(Vec3::new(
                cut(ca.x, cb.x, cf.x),
                cut(ca.y, cb.y, cf.y),
                cut(ca.z, cb.z, cf.z),
            ));
        }

        if TS {
            let (ta, tb, tf) = (self.texture[a], self.texture[b], self.texture[fallback]);
            self.texture
                .push(Vec2::new(cut(ta.x, tb.x, tf.x), cut(ta.y, tb.y, tf.y)));
        }

        self.camera.len() - 1
    }
}

/// Whole sphere at or beyond the near plane
#[inline]
fn beyond_near(near: f32, center: &Vec3, radius: f32) -> bool {
    flt_less_equal(near, center.z - radius)
}

/// Clip segment index pairs against the near plane
///
/// # Arguments
///
/// * `arena` - Camera-space vertices; cut points are appended
/// * `segment` - Flat index pairs into `arena`
/// * `near` - Near plane distance
/// * `center`, `radius` - Camera-space bounding sphere
///
/// # Returns
///
/// The surviving pairs. Pairs entirely at or behind the plane are dropped;
/// pairs crossing it have their behind end replaced by a new cut vertex.
pub fn clip_segments<'a>(
    arena: &mut VertexArena,
    segment: &'a [usize],
    near: f32,
    center: &Vec3,
    radius: f32,
) -> Cow<'a, [usize]> {
    if beyond_near(near, center, radius) {
        return Cow::Borrowed(segment);
    }

    let mut clipped = Vec::with_capacity(segment.len());
    for pair in segment.chunks_exact(2) {
        let (i0, i1) = (pair[0], pair[1]);
        let (z0, z1) = (arena.camera[i0].z, arena.camera[i1].z);

        if flt_less_equal(z0, near) && flt_less_equal(z1, near) {
            continue;
        }

        if flt_less_equal(near, z0) && flt_less_equal(near, z1) {
            clipped.extend_from_slice(&[i0, i1]);
            continue;
        }

        let cut = arena.push_cut::<false, false>(near, i0, i1, i0);
        if flt_less_equal(z0, near) {
            clipped.extend_from_slice(&[cut, i1]);
        } else {
            clipped.extend_from_slice(&[i0, cut]);
        }
    }

    Cow::Owned(clipped)
}

/// The other two corners of a triangle, in winding order after `k`
const ROTATION: [(usize, usize); 3] = [(1, 2), (2, 0), (0, 1)];

type TriangleClipFn = for<'a> fn(&mut VertexArena, &'a [usize], f32) -> Cow<'a, [usize]>;

/// Clippers indexed by attribute key `ic | ts<<1`
const TRIANGLE_CLIPPERS: [TriangleClipFn; 4] = [
    clip_triangles_with::<false, false>,
    clip_triangles_with::<true, false>,
    clip_triangles_with::<false, true>,
    clip_triangles_with::<true, true>,
];

/// Clip triangle index triples against the near plane
///
/// # Arguments
///
/// * `attribute_key` - `ic | ts<<1`; selects which arena channels follow
///   the cut
/// * `arena` - Camera-space vertices; cut points are appended
/// * `triangle` - Flat index triples into `arena`
/// * `near` - Near plane distance
/// * `center`, `radius` - Camera-space bounding sphere
///
/// # Algorithm
///
/// Triangles wholly at or behind the plane are dropped, wholly at or beyond
/// it are kept. Otherwise:
///
/// - One corner `l` behind: its two edges are cut (`c0` toward the first
///   corner after `l`, `c1` toward the second) and the remaining quad is
///   emitted as two triangles: the original with `l → c0`, and the original
///   with the first corner after `l` → `c0` and `l → c1`.
/// - Two corners behind: both edges from the front corner `m` are cut and
///   one triangle is emitted with the two behind corners replaced.
///
/// Winding is preserved in both cases.
pub fn clip_triangles<'a>(
    attribute_key: usize,
    arena: &mut VertexArena,
    triangle: &'a [usize],
    near: f32,
    center: &Vec3,
    radius: f32,
) -> Cow<'a, [usize]> {
    if beyond_near(near, center, radius) {
        return Cow::Borrowed(triangle);
    }

    TRIANGLE_CLIPPERS[attribute_key & 0x3](arena, triangle, near)
}

fn clip_triangles_with<'a, const IC: bool, const TS: bool>(
    arena: &mut VertexArena,
    triangle: &'a [usize],
    near: f32,
) -> Cow<'a, [usize]> {
    let mut clipped = Vec::with_capacity(triangle.len());

    for tri in triangle.chunks_exact(3) {
        let index = [tri[0], tri[1], tri[2]];
        let z = index.map(|i| arena.camera[i].z);

        if z.iter().all(|&z| flt_less_equal(z, near)) {
            continue;
        }

        if z.iter().all(|&z| flt_less_equal(near, z)) {
            clipped.extend_from_slice(&index);
            continue;
        }

        let behind_count = z.iter().filter(|&&z| flt_less(z, near)).count();

        if behind_count == 1 {
            let l = z.iter().position(|&z| flt_less(z, near)).unwrap_or(2);
            let (m0, m1) = ROTATION[l];

            let cut0 = arena.push_cut::<IC, TS>(near, index[m0], index[l], index[l]);
            let cut1 = arena.push_cut::<IC, TS>(near, index[m1], index[l], index[l]);

            let mut first = index;
            first[l] = cut0;

            let mut second = index;
            second[m0] = cut0;
            second[l] = cut1;

            clipped.extend_from_slice(&first);
            clipped.extend_from_slice(&second);
        } else {
            let m = z.iter().position(|&z| flt_less(near, z)).unwrap_or(2);
            let (l0, l1) = ROTATION[m];

            let cut0 = arena.push_cut::<IC, TS>(near, index[m], index[l0], index[m]);
            let cut1 = arena.push_cut::<IC, TS>(near, index[m], index[l1], index[m]);

            let mut kept = index;
            kept[l0] = cut0;
            kept[l1] = cut1;

            clipped.extend_from_slice(&kept);
        }
    }

    Cow::Owned(clipped)
}

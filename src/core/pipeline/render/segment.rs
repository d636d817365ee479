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

//! Segment rasterization

use super::{Rasterizer, Surface};
use crate::core::framebuffer::{segment_steps, walk_segment};
use crate::core::geometry::{segment_clip, Segment2};
use crate::core::math::float::flt_less;
use crate::core::math::Vec3;
use crate::core::resource::color::blend;

/// Draw a segment between two view-space points
///
/// Endpoints are truncated to pixels and clipped to the viewport. The depth
/// variants interpolate `1/z` from `v0.z` toward `v1.z` one step per pixel
/// along the dominant axis of the clipped segment. The depth and blend
/// variants skip segments whose endpoints land on the same pixel.
pub(super) fn rasterize_segment<const DT: bool, const AB: bool>(
    r: &Rasterizer,
    s: &mut Surface<'_>,
    v0: &Vec3,
    v1: &Vec3,
    color: u32,
) {
    let seg = Segment2::new(v0.x as i32, v0.y as i32, v1.x as i32, v1.y as i32);

    if (DT || AB) && seg.x1 == seg.x2 && seg.y1 == seg.y2 {
        return;
    }

    let Some(seg) = segment_clip(&r.viewport, &seg) else {
        return;
    };

    let rate = (v1.z - v0.z) / segment_steps(&seg) as f32;
    let mut z = v0.z;
    let (fg, bg) = (r.fg_alpha, r.bg_alpha);
    let width = s.width;

    walk_segment(&seg, |x, y| {
        let p = x as usize + y as usize * width;

        if !DT || flt_less(s.depth[p], z) {
            s.color[p] = if AB { blend(s.color[p], color, fg, bg) } else { color };
            if DT {
                s.depth[p] = z;
            }
        }

        z += rate;
    });
}

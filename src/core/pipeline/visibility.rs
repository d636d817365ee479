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

//! Visibility stage
//!
//! Whole-mesh frustum rejection and per-triangle face culling.

use super::state::CullMode;
use crate::core::math::float::flt_less;
use crate::core::math::{normalize_or_zero, Vec3};

/// Bounding-sphere frustum test
///
/// Rejects a mesh whose camera-space sphere `(center, radius)` lies wholly
/// beyond the far plane, in front of the near plane, or outside one of the
/// four side planes. The side planes are the fixed 90° pyramid `|x| = z`,
/// `|y| = z`, independent of the viewport aspect.
///
/// # Returns
///
/// `true` if the mesh may be visible
pub fn frustum_test(center: &Vec3, radius: f32, near: f32, far: f32) -> bool {
    let c = center;
    let r = radius;

    !(flt_less(far, c.z - r)
        || flt_less(c.z + r, near)
        || flt_less(c.z, c.x - r)
        || flt_less(c.x + r, -c.z)
        || flt_less(c.z, c.y - r)
        || flt_less(c.y + r, -c.z))
}

/// Line of sight in projection space
const SIGHT: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Ordinals of the triangles that survive face culling
///
/// `projected` holds `(x/z, y/z, z)` per vertex. The face normal is
/// `(p0 - p1) × (p1 - p2)`; back culling keeps triangles whose normal faces
/// the viewer (`n · sight < 0`), front culling the opposite.
pub fn face_cull(projected: &[Vec3], triangle: &[usize], mode: CullMode, visible: &mut Vec<usize>) {
    visible.clear();

    for (ordinal, tri) in triangle.chunks_exact(3).enumerate() {
        let u1 = projected[tri[0]] - projected[tri[1]];
        let u2 = projected[tri[1]] - projected[tri[2]];
        let facing = normalize_or_zero(&u1.cross(&u2)).dot(&SIGHT);

        let keep = match mode {
            CullMode::Back => facing < 0.0,
            CullMode::Front => facing > 0.0,
        };
        if keep {
            visible.push(ordinal);
        }
    }
}

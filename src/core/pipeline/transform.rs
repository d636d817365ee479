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

//! Transform stage
//!
//! Holds the four pipeline matrices and the viewport rectangle derived from
//! the view matrix.

use super::state::TransformKind;
use crate::core::geometry::Rect;
use crate::core::math::{transform_point, Mat4, Vec3};

/// World, camera, projection and view matrices
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStage {
    world: Mat4,
    camera: Mat4,
    projection: Mat4,
    view: Mat4,
    view_rect: Rect,
}

impl Default for TransformStage {
    fn default() -> Self {
        Self {
            world: Mat4::identity(),
            camera: Mat4::identity(),
            projection: Mat4::identity(),
            view: Mat4::identity(),
            view_rect: Rect::default(),
        }
    }
}

impl TransformStage {
    /// Replace one matrix
    ///
    /// Setting the view matrix also re-derives the viewport rectangle.
    pub fn set(&mut self, kind: TransformKind, m: Mat4) {
        match kind {
            TransformKind::World => self.world = m,
            TransformKind::Camera => self.camera = m,
            TransformKind::Projection => self.projection = m,
            TransformKind::View => {
                self.view = m;
                self.view_rect = view_rect_of(&m);
            }
        }
    }

    pub fn get(&self, kind: TransformKind) -> &Mat4 {
        match kind {
            TransformKind::World => &self.world,
            TransformKind::Camera => &self.camera,
            TransformKind::Projection => &self.projection,
            TransformKind::View => &self.view,
        }
    }

    #[inline]
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    #[inline]
    pub fn camera(&self) -> &Mat4 {
        &self.camera
    }

    #[inline]
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Pixel rectangle covered by the view matrix
    #[inline]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Local origin carried through world and camera
    ///
    /// Meshes bound themselves with an origin-centred sphere, so this is the
    /// bounding-sphere centre in camera space.
    pub fn center_in_camera(&self) -> Vec3 {
        let world = transform_point(&Vec3::zeros(), &self.world);
        transform_point(&world, &self.camera)
    }
}

/// Viewport rectangle of a view matrix
///
/// Inverts [`compute_transform_view`](crate::core::math::compute_transform_view):
/// the left edge sits `e11` left of the centre `e41`, the top edge `|e22|`
/// above `e42`. Each term is truncated separately.
pub fn view_rect_of(m: &Mat4) -> Rect {
    let e11 = m[(0, 0)];
    let e22 = m[(1, 1)];
    let e41 = m[(3, 0)];
    let e42 = m[(3, 1)];

    let x1 = (e41 - e11) as i32;
    let y1 = (e42 + e22) as i32;
    Rect::new(x1, y1, x1 + (e11 * 2.0) as i32, y1 + (-e22 * 2.0) as i32)
}

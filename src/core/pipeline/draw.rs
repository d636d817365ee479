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

//! 3D mesh draw calls
//!
//! Draws never fail. A rejected mesh or state combination comes back as
//! [`DrawOutcome::Invalid`], a mesh outside the frustum as
//! [`DrawOutcome::Culled`]; neither touches the frame buffer.

use super::classify::classify;
use super::clip::{clip_segments, clip_triangles};
use super::fill::{fill_triangle, FillSource, MAX_FIELDS};
use super::state::{DrawOutcome, InvalidDraw, RenderFlags};
use super::visibility::{face_cull, frustum_test};
use super::Renderer;
use crate::core::math::float::flt_less_equal;
use crate::core::math::{transform_point, Mat4, Vec3};
use crate::core::resource::{MeshSegment, MeshTriangle};

/// Perspective divide for triangles: `(x/z, y/z, z)`
#[inline]
fn project_keep_depth(c: &Vec3) -> Vec3 {
    Vec3::new(c.x / c.z, c.y / c.z, c.z)
}

/// Perspective divide for segments: `(x/z, y/z, 1/z)`
#[inline]
fn project_inverse_depth(c: &Vec3) -> Vec3 {
    Vec3::new(c.x / c.z, c.y / c.z, 1.0 / c.z)
}

fn check_indices(indices: &[usize], count: usize) -> Result<(), InvalidDraw> {
    match indices.iter().find(|&&i| i >= count) {
        Some(&index) => Err(InvalidDraw::IndexOutOfRange { index, count }),
        None => Ok(()),
    }
}

impl Renderer {
    /// Draw a wireframe mesh in a single color
    ///
    /// Uses the world, camera and view matrices, the near plane, and the
    /// depth test and alpha blend states.
    ///
    /// # Arguments
    ///
    /// * `mesh` - Segment mesh in local space
    /// * `color` - Packed ARGB color
    ///
    /// # Returns
    ///
    /// `Drawn` with the number of segments handed to the rasterizer after
    /// near clipping, `Culled`, or `Invalid` for an out-of-range index
    pub fn draw_3d_mesh_segment(&mut self, mesh: &MeshSegment, color: u32) -> DrawOutcome {
        if let Err(reason) = check_indices(&mesh.segment, mesh.vertex.len()) {
            log::debug!("Segment mesh rejected: {}", reason);
            return DrawOutcome::Invalid(reason);
        }

        let center = self.transforms.center_in_camera();
        if !frustum_test(&center, mesh.radius, self.near, self.far) {
            log::debug!("Segment mesh outside frustum (center {:?})", center);
            return DrawOutcome::Culled;
        }

        if mesh.segment.is_empty() {
            log::warn!("Segment mesh has no segments");
            return DrawOutcome::Drawn { primitives: 0 };
        }

        self.transform_to_camera(&mesh.vertex);

        let near = self.near;
        let segment = clip_segments(&mut self.arena, &mesh.segment, near, &center, mesh.radius);

        self.project_and_view(project_inverse_depth);

        let key = self.flags.segment_key();
        for pair in segment.chunks_exact(2) {
            self.rasterizer.draw_segment(
                &mut self.framebuffer,
                key,
                &self.view[pair[0]],
                &self.view[pair[1]],
                color,
            );
        }

        let primitives = segment.len() / 2;
        log::trace!("Drew {} segments with key {:#x}", primitives, key);
        DrawOutcome::Drawn { primitives }
    }

    /// Draw a solid mesh, lit or textured
    ///
    /// Exactly one of illumination and texture sampling must be enabled.
    /// Lit draws use the light set, ambient light and material; `eye` adds
    /// specular highlights. Textured draws sample the active texture, or the
    /// default 1×1 texture when none is set.
    ///
    /// # Arguments
    ///
    /// * `mesh` - Triangle mesh in local space
    /// * `eye` - Viewer position in world space, for specular lighting
    ///
    /// # Returns
    ///
    /// `Drawn` with the number of triangles that produced at least one flat
    /// part, `Culled`, or `Invalid` when the mesh does not fit the states:
    ///
    /// - normal count differs from the vertex count
    /// - illumination and texture sampling are both on or both off
    /// - texturing with a texture coordinate count unlike the vertex count
    /// - an index past the last vertex
    ///
    /// # Algorithm
    ///
    /// 1. Frustum-test the bounding sphere in camera space.
    /// 2. Transform vertices to world space and light them there.
    /// 3. Transform to camera space and clip against the near plane, carrying
    ///    color or texture coordinates to the cut points.
    /// 4. Divide by depth, face-cull if enabled, and map to pixels.
    /// 5. For each surviving triangle: fill the interpolation tuples, split
    ///    into flat parts and rasterize each.
    pub fn draw_3d_mesh_triangle(&mut self, mesh: &MeshTriangle, eye: Option<Vec3>) -> DrawOutcome {
        if let Err(reason) = self.validate_triangle_mesh(mesh) {
            log::debug!("Triangle mesh rejected: {}", reason);
            return DrawOutcome::Invalid(reason);
        }

        let center = self.transforms.center_in_camera();
        if !frustum_test(&center, mesh.radius, self.near, self.far) {
            log::debug!("Triangle mesh outside frustum (center {:?})", center);
            return DrawOutcome::Culled;
        }

        if mesh.triangle.is_empty() {
            log::warn!("Triangle mesh has no triangles");
            return DrawOutcome::Drawn { primitives: 0 };
        }

        let flags = self.flags;
        let attribute_key = flags.attribute_key();
        let world_m: Mat4 = *self.transforms.world();

        self.world.clear();
        self.world
            .extend(mesh.vertex.iter().map(|v| transform_point(v, &world_m)));

        self.arena.clear();
        if flags.contains(RenderFlags::ILLUMINATION) {
            self.lights.compute(
                &mesh.normal,
                &self.world,
                &world_m,
                eye.as_ref(),
                &mut self.arena.color,
            );
        }
        if flags.contains(RenderFlags::TEXTURE_SAMPLE) {
            self.arena.texture.extend_from_slice(&mesh.texture);
        }

        let camera_m: Mat4 = *self.transforms.camera();
        self.arena
            .camera
            .extend(self.world.iter().map(|v| transform_point(v, &camera_m)));

        let near = self.near;
        let triangle = clip_triangles(
            attribute_key,
            &mut self.arena,
            &mesh.triangle,
            near,
            &center,
            mesh.radius,
        );

        self.project_and_view(project_keep_depth);

        if flags.contains(RenderFlags::FACE_CULLING) {
            face_cull(&self.projected, &triangle, self.cull_mode, &mut self.visible);
        } else {
            self.visible.clear();
            self.visible.extend(0..triangle.len() / 3);
        }

        let texture = self.texture.as_ref().unwrap_or(&self.default_texture);
        let src = FillSource {
            view: &self.view,
            color: &self.arena.color,
            texture: &self.arena.texture,
            texture_size: (texture.width(), texture.height()),
        };

        let key = flags.triangle_key();
        let mut primitives = 0;

        for &ordinal in &self.visible {
            let base = ordinal * 3;
            let corners = [triangle[base], triangle[base + 1], triangle[base + 2]];

            let (filled, fields) = fill_triangle(attribute_key, &src, corners);
            let mut data = [filled[0], filled[1], filled[2], [0.0; MAX_FIELDS]];

            let classified = classify(&mut data, fields);
            for part in classified.parts() {
                self.rasterizer
                    .draw_flat_triangle(&mut self.framebuffer, key, &part, &data, texture);
            }

            if classified.mask() != 0 {
                primitives += 1;
            }
        }

        log::trace!(
            "Drew {} of {} triangles with key {:#x}",
            primitives,
            triangle.len() / 3,
            key
        );
        DrawOutcome::Drawn { primitives }
    }

    fn validate_triangle_mesh(&self, mesh: &MeshTriangle) -> Result<(), InvalidDraw> {
        let vertices = mesh.vertex.len();

        if mesh.normal.len() != vertices {
            return Err(InvalidDraw::NormalCountMismatch {
                vertices,
                normals: mesh.normal.len(),
            });
        }

        let ic = self.flags.contains(RenderFlags::ILLUMINATION);
        let ts = self.flags.contains(RenderFlags::TEXTURE_SAMPLE);
        if ic == ts {
            return Err(InvalidDraw::ShadingConflict);
        }

        if ts && mesh.texture.len() != vertices {
            return Err(InvalidDraw::TextureCountMismatch {
                vertices,
                coords: mesh.texture.len(),
            });
        }

        check_indices(&mesh.triangle, vertices)
    }

    /// Fill `world` and the arena's camera positions from local vertices
    fn transform_to_camera(&mut self, vertex: &[Vec3]) {
        let world_m: Mat4 = *self.transforms.world();
        let camera_m: Mat4 = *self.transforms.camera();

        self.world.clear();
        self.world
            .extend(vertex.iter().map(|v| transform_point(v, &world_m)));

        self.arena.clear();
        self.arena
            .camera
            .extend(self.world.iter().map(|v| transform_point(v, &camera_m)));
    }

    /// Divide by depth and map to pixels
    ///
    /// Vertices closer than the near plane are left at the origin; no
    /// clipped primitive references them.
    fn project_and_view(&mut self, project: fn(&Vec3) -> Vec3) {
        let near = self.near;
        let view_m: Mat4 = *self.transforms.view();

        self.projected.clear();
        self.view.clear();

        for c in &self.arena.camera {
            if flt_less_equal(near, c.z) {
                let p = project(c);
                self.projected.push(p);
                self.view.push(transform_point(&p, &view_m));
            } else {
                self.projected.push(Vec3::zeros());
                self.view.push(Vec3::zeros());
            }
        }
    }
}

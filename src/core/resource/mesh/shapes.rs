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

//! Procedural triangle meshes
//!
//! All shapes are centred on the local origin with +Y up. Surfaces of
//! revolution are built by rotating a profile about the Y axis in
//! `slices_in_xz_plane` equal steps. Triangles wind so that the outside
//! faces the camera under back-face culling.

use super::MeshTriangle;
use crate::core::error::ResourceError;
use crate::core::math::float::flt_less_equal;
use crate::core::math::{rotate_y, rotate_z, transform_point, translate, Vec3, PI, PI_M2};

fn require_positive(name: &str, value: f32) -> Result<(), ResourceError> {
    if flt_less_equal(value, 0.0) {
        return Err(ResourceError::InvalidShape(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

fn require_greater(name: &str, value: f32, than: &str, other: f32) -> Result<(), ResourceError> {
    if flt_less_equal(value, other) {
        return Err(ResourceError::InvalidShape(format!(
            "{} ({}) must exceed {} ({})",
            name, value, than, other
        )));
    }
    Ok(())
}

fn require_slices(name: &str, value: usize, min: usize) -> Result<(), ResourceError> {
    if value < min {
        return Err(ResourceError::InvalidShape(format!(
            "{} must be at least {}, got {}",
            name, min, value
        )));
    }
    Ok(())
}

impl MeshTriangle {
    /// Axis-aligned box with 8 vertices and 12 triangles
    pub fn cube(width: f32, height: f32, depth: f32) -> Result<Self, ResourceError> {
        require_positive("width", width)?;
        require_positive("height", height)?;
        require_positive("depth", depth)?;

        let (wd2, hd2, dd2) = (width / 2.0, height / 2.0, depth / 2.0);
        let vertex = vec![
            Vec3::new(wd2, hd2, dd2),
            Vec3::new(-wd2, hd2, dd2),
            Vec3::new(-wd2, hd2, -dd2),
            Vec3::new(wd2, hd2, -dd2),
            Vec3::new(wd2, -hd2, dd2),
            Vec3::new(-wd2, -hd2, dd2),
            Vec3::new(-wd2, -hd2, -dd2),
            Vec3::new(wd2, -hd2, -dd2),
        ];

        #[rustfmt::skip]
        let triangle = vec![
            0, 3, 2,  0, 2, 1,
            4, 6, 7,  4, 5, 6,
            3, 7, 6,  3, 6, 2,
            0, 4, 7,  0, 7, 3,
            0, 5, 4,  0, 1, 5,
            1, 6, 5,  1, 2, 6,
        ];

        Self::new(vertex, triangle)
    }

    /// UV sphere
    ///
    /// # Arguments
    ///
    /// * `radius` - Sphere radius, also used as the bounding radius
    /// * `slices_in_xz_plane` - Meridians (at least 3)
    /// * `slices_in_y_axis` - Latitude bands (at least 2)
    ///
    /// Vertex 0 is the north pole, vertex 1 the south pole, followed by
    /// `slices_in_y_axis - 1` ring vertices per meridian.
    pub fn sphere(
        radius: f32,
        slices_in_xz_plane: usize,
        slices_in_y_axis: usize,
    ) -> Result<Self, ResourceError> {
        require_positive("radius", radius)?;
        require_slices("slices_in_xz_plane", slices_in_xz_plane, 3)?;
        require_slices("slices_in_y_axis", slices_in_y_axis, 2)?;

        let ring = slices_in_y_axis - 1;
        let north = Vec3::new(0.0, radius, 0.0);
        let mut vertex = vec![north, Vec3::new(0.0, -radius, 0.0)];

        // First meridian: swing the pole down about Z
        let step = PI / slices_in_y_axis as f32;
        let mut angle = 0.0;
        for _ in 0..ring {
            angle += step;
            vertex.push(transform_point(&north, &rotate_z(angle)));
        }

        // Remaining meridians: rotate the first about Y
        let step = PI_M2 / slices_in_xz_plane as f32;
        let mut angle = 0.0;
        for _ in 0..slices_in_xz_plane - 1 {
            angle += step;
            let m = rotate_y(angle);
            for j in 0..ring {
                let v = transform_point(&vertex[2 + j], &m);
                vertex.push(v);
            }
        }

        let mut triangle = Vec::new();
        for i in 0..slices_in_xz_plane {
            let right = 2 + i * ring;
            let left = 2 + ((i + 1) % slices_in_xz_plane) * ring;

            triangle.extend([0, right, left]);
            triangle.extend([1, left + ring - 1, right + ring - 1]);

            for j in 0..ring - 1 {
                let (rt, rb) = (right + j, right + j + 1);
                let (lt, lb) = (left + j, left + j + 1);
                triangle.extend([rt, rb, lt, lt, rb, lb]);
            }
        }

        let mut mesh = Self::new(vertex, triangle)?;
        mesh.radius = radius;
        Ok(mesh)
    }

    /// Cone with its apex up, base centred at `-height / 2`
    pub fn cone(radius: f32, height: f32, slices_in_xz_plane: usize) -> Result<Self, ResourceError> {
        require_positive("radius", radius)?;
        require_positive("height", height)?;
        require_slices("slices_in_xz_plane", slices_in_xz_plane, 3)?;

        let hd2 = height / 2.0;
        let mut vertex = vec![Vec3::new(0.0, hd2, 0.0), Vec3::new(0.0, -hd2, 0.0)];

        let rim = Vec3::new(radius, -hd2, 0.0);
        let step = PI_M2 / slices_in_xz_plane as f32;
        for i in 0..slices_in_xz_plane {
            vertex.push(transform_point(&rim, &rotate_y(step * i as f32)));
        }

        let mut triangle = Vec::new();
        for i in 0..slices_in_xz_plane {
            let cur = 2 + i;
            let nxt = 2 + (i + 1) % slices_in_xz_plane;
            triangle.extend([0, cur, nxt, 1, nxt, cur]);
        }

        Self::new(vertex, triangle)
    }

    /// Capped frustum of a cone; equal radii give a cylinder
    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices_in_xz_plane: usize,
    ) -> Result<Self, ResourceError> {
        require_positive("radius_top", radius_top)?;
        require_positive("radius_bottom", radius_bottom)?;
        require_positive("height", height)?;
        require_slices("slices_in_xz_plane", slices_in_xz_plane, 3)?;

        let hd2 = height / 2.0;
        let mut vertex = vec![Vec3::new(0.0, hd2, 0.0), Vec3::new(0.0, -hd2, 0.0)];

        let top = Vec3::new(radius_top, hd2, 0.0);
        let bottom = Vec3::new(radius_bottom, -hd2, 0.0);
        let step = PI_M2 / slices_in_xz_plane as f32;
        for i in 0..slices_in_xz_plane {
            let m = rotate_y(step * i as f32);
            vertex.push(transform_point(&top, &m));
            vertex.push(transform_point(&bottom, &m));
        }

        let mut triangle = Vec::new();
        for i in 0..slices_in_xz_plane {
            let rt = 2 + i * 2;
            let rb = rt + 1;
            let lt = 2 + ((i + 1) % slices_in_xz_plane) * 2;
            let lb = lt + 1;
            triangle.extend([0, rt, lt]);
            triangle.extend([lt, rt, lb]);
            triangle.extend([rb, lb, rt]);
            triangle.extend([1, lb, rb]);
        }

        Self::new(vertex, triangle)
    }

    /// Hollow tube with independent inner/outer radii at each end
    pub fn pipe(
        radius_top_in: f32,
        radius_top_out: f32,
        radius_bottom_in: f32,
        radius_bottom_out: f32,
        height: f32,
        slices_in_xz_plane: usize,
    ) -> Result<Self, ResourceError> {
        require_positive("radius_top_in", radius_top_in)?;
        require_positive("radius_top_out", radius_top_out)?;
        require_greater("radius_top_out", radius_top_out, "radius_top_in", radius_top_in)?;
        require_positive("radius_bottom_in", radius_bottom_in)?;
        require_positive("radius_bottom_out", radius_bottom_out)?;
        require_greater(
            "radius_bottom_out",
            radius_bottom_out,
            "radius_bottom_in",
            radius_bottom_in,
        )?;
        require_positive("height", height)?;
        require_slices("slices_in_xz_plane", slices_in_xz_plane, 3)?;

        let hd2 = height / 2.0;
        let profile = [
            Vec3::new(radius_top_in, hd2, 0.0),
            Vec3::new(radius_top_out, hd2, 0.0),
            Vec3::new(radius_bottom_in, -hd2, 0.0),
            Vec3::new(radius_bottom_out, -hd2, 0.0),
        ];

        let step = PI_M2 / slices_in_xz_plane as f32;
        let mut vertex = Vec::with_capacity(slices_in_xz_plane * 4);
        for i in 0..slices_in_xz_plane {
            let m = rotate_y(step * i as f32);
            vertex.extend(profile.iter().map(|p| transform_point(p, &m)));
        }

        let mut triangle = Vec::new();
        for i in 0..slices_in_xz_plane {
            let r = i * 4;
            let l = ((i + 1) % slices_in_xz_plane) * 4;
            let (r_ti, r_to, r_bi, r_bo) = (r, r + 1, r + 2, r + 3);
            let (l_ti, l_to, l_bi, l_bo) = (l, l + 1, l + 2, l + 3);

            // inner wall
            triangle.extend([r_ti, l_ti, r_bi, l_bi, r_bi, l_ti]);
            // top ring
            triangle.extend([l_ti, r_ti, l_to, r_to, l_to, r_ti]);
            // outer wall
            triangle.extend([l_to, r_to, l_bo, r_bo, l_bo, r_to]);
            // bottom ring
            triangle.extend([l_bo, r_bo, l_bi, r_bi, l_bi, r_bo]);
        }

        Self::new(vertex, triangle)
    }

    /// Ring torus lying in the XZ plane
    ///
    /// The tube cross-section is a circle of radius
    /// `(radius_out - radius_in) / 2` centred halfway between the two radii.
    pub fn torus(
        radius_in: f32,
        radius_out: f32,
        slices_in_xy_plane: usize,
        slices_in_xz_plane: usize,
    ) -> Result<Self, ResourceError> {
        require_positive("radius_in", radius_in)?;
        require_positive("radius_out", radius_out)?;
        require_greater("radius_out", radius_out, "radius_in", radius_in)?;
        require_slices("slices_in_xy_plane", slices_in_xy_plane, 3)?;
        require_slices("slices_in_xz_plane", slices_in_xz_plane, 3)?;

        let tube = (radius_out - radius_in) / 2.0;
        let centre = translate(radius_in + tube, 0.0, 0.0);
        let start = Vec3::new(tube, 0.0, 0.0);

        let step = PI_M2 / slices_in_xy_plane as f32;
        let mut vertex: Vec<Vec3> = (0..slices_in_xy_plane)
            .map(|i| transform_point(&start, &(rotate_z(step * i as f32) * centre)))
            .collect();

        let step = PI_M2 / slices_in_xz_plane as f32;
        for i in 1..slices_in_xz_plane {
            let m = rotate_y(step * i as f32);
            for j in 0..slices_in_xy_plane {
                let v = transform_point(&vertex[j], &m);
                vertex.push(v);
            }
        }

        let mut triangle = Vec::new();
        for i in 0..slices_in_xz_plane {
            let right = i * slices_in_xy_plane;
            let left = ((i + 1) % slices_in_xz_plane) * slices_in_xy_plane;

            for j in 0..slices_in_xy_plane {
                let up = (j + 1) % slices_in_xy_plane;
                let (rb, rt) = (right + j, right + up);
                let (lb, lt) = (left + j, left + up);
                triangle.extend([lt, rt, lb, rb, lb, rt]);
            }
        }

        Self::new(vertex, triangle)
    }
}

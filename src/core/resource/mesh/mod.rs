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

//! Segment and triangle meshes
//!
//! Meshes are plain indexed vertex lists in local space. Each carries the
//! radius of an origin-centred bounding sphere, used by the frustum test and
//! the near-plane fast path.
//!
//! # Normals
//!
//! [`MeshTriangle::normal`] stores *points*, not directions: each entry is
//! `vertex + unit_normal`. The point goes through the world transform with
//! the vertex, and the difference of the two transformed points is the
//! world-space normal. This keeps normals correct under any affine world
//! matrix without a separate normal matrix.

mod loader;
mod shapes;

use crate::core::error::ResourceError;
use crate::core::math::{local_sphere_radius, normalize_or_zero, vec3_flt_equal, Vec2, Vec3};

/// Wireframe mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshSegment {
    pub vertex: Vec<Vec3>,
    /// Flat index pairs
    pub segment: Vec<usize>,
    /// Bounding sphere radius around the local origin
    pub radius: f32,
}

/// Solid triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshTriangle {
    pub vertex: Vec<Vec3>,
    /// Normal points (`vertex + unit normal`), one per vertex
    pub normal: Vec<Vec3>,
    /// Texture coordinates in `0..=1`, one per vertex, or empty
    pub texture: Vec<Vec2>,
    /// Flat index triples
    pub triangle: Vec<usize>,
    /// Bounding sphere radius around the local origin
    pub radius: f32,
}

fn check_indices(indices: &[usize], count: usize) -> Result<(), ResourceError> {
    match indices.iter().find(|&&i| i >= count) {
        Some(&index) => Err(ResourceError::MeshIndexOutOfRange { index, count }),
        None => Ok(()),
    }
}

impl MeshSegment {
    /// Build a segment mesh and compute its bounding radius
    ///
    /// # Errors
    ///
    /// Fails if the index list has odd length or references a missing vertex.
    pub fn new(vertex: Vec<Vec3>, segment: Vec<usize>) -> Result<Self, ResourceError> {
        if segment.len() % 2 != 0 {
            return Err(ResourceError::InvalidShape(format!(
                "segment index count {} is not a multiple of 2",
                segment.len()
            )));
        }
        check_indices(&segment, vertex.len())?;

        let radius = local_sphere_radius(&vertex);
        Ok(Self {
            vertex,
            segment,
            radius,
        })
    }

    /// Wireframe of a triangle mesh
    ///
    /// Each undirected edge appears once, in first-seen order.
    pub fn from_triangle_mesh(mesh: &MeshTriangle) -> Self {
        let mut segment: Vec<usize> = Vec::new();

        for tri in mesh.triangle.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let seen = segment
                    .chunks_exact(2)
                    .any(|s| (s[0] == a && s[1] == b) || (s[0] == b && s[1] == a));
                if !seen {
                    segment.push(a);
                    segment.push(b);
                }
            }
        }

        Self {
            vertex: mesh.vertex.clone(),
            segment,
            radius: mesh.radius,
        }
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.segment.len() / 2
    }
}

impl MeshTriangle {
    /// Build a triangle mesh, deriving normals and bounding radius
    ///
    /// # Errors
    ///
    /// Fails if the index list length is not a multiple of 3 or references a
    /// missing vertex.
    pub fn new(vertex: Vec<Vec3>, triangle: Vec<usize>) -> Result<Self, ResourceError> {
        if triangle.len() % 3 != 0 {
            return Err(ResourceError::InvalidShape(format!(
                "triangle index count {} is not a multiple of 3",
                triangle.len()
            )));
        }
        check_indices(&triangle, vertex.len())?;

        let normal = compute_normals(&vertex, &triangle);
        let radius = local_sphere_radius(&vertex);
        Ok(Self {
            vertex,
            normal,
            texture: Vec::new(),
            triangle,
            radius,
        })
    }

    /// Attach per-vertex texture coordinates
    pub fn with_texture(mut self, texture: Vec<Vec2>) -> Self {
        self.texture = texture;
        self
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle.len() / 3
    }
}

/// Smooth per-vertex normals, stored as `vertex + normal` points
///
/// Every vertex averages the distinct unit normals of the faces that touch
/// it. Faces with identical normals (e.g. two halves of a quad) count once,
/// so a cube corner gets the diagonal of its three sides.
pub fn compute_normals(vertex: &[Vec3], triangle: &[usize]) -> Vec<Vec3> {
    let mut face_normals: Vec<Vec<Vec3>> = vec![Vec::new(); vertex.len()];

    for tri in triangle.chunks_exact(3) {
        let u1 = vertex[tri[0]] - vertex[tri[1]];
        let u2 = vertex[tri[1]] - vertex[tri[2]];
        let normal = normalize_or_zero(&u1.cross(&u2));

        for &vi in tri {
            let list = &mut face_normals[vi];
            if !list.iter().any(|n| vec3_flt_equal(n, &normal)) {
                list.push(normal);
            }
        }
    }

    face_normals
        .iter()
        .zip(vertex)
        .map(|(list, v)| {
            let sum = list.iter().fold(Vec3::zeros(), |acc, n| acc + n);
            normalize_or_zero(&sum) + v
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> MeshTriangle {
        // Two triangles in the z = 0 plane sharing edge 0-2
        MeshTriangle::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_coplanar_faces_share_one_normal() {
        let mesh = quad();
        for (n, v) in mesh.normal.iter().zip(&mesh.vertex) {
            assert_relative_eq!((n - v).norm(), 1.0, epsilon = 1e-6);
            assert_relative_eq!((n - v).z.abs(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_new_rejects_bad_indices() {
        let v = vec![Vec3::zeros(); 3];
        assert!(matches!(
            MeshTriangle::new(v.clone(), vec![0, 1, 3]),
            Err(ResourceError::MeshIndexOutOfRange { index: 3, count: 3 })
        ));
        assert!(MeshTriangle::new(v.clone(), vec![0, 1]).is_err());
        assert!(MeshSegment::new(v, vec![0]).is_err());
    }

    #[test]
    fn test_segment_mesh_dedups_shared_edges() {
        let wire = MeshSegment::from_triangle_mesh(&quad());
        // 4 outer edges + 1 diagonal
        assert_eq!(wire.segment_count(), 5);
        assert_eq!(wire.radius, quad().radius);
    }

    #[test]
    fn test_radius() {
        let mesh = quad();
        assert_relative_eq!(mesh.radius, 2.0_f32.sqrt());
    }
}

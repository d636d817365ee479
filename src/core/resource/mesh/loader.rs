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

//! Text mesh format
//!
//! Meshes are stored as a sequence of parenthesised tuples, one per line.
//!
//! Triangle mesh:
//!
//! ```text
//! (type)                 0 = positions only, otherwise positions + uv
//! (vertex_count)
//! (x,y,z)  or  (x,y,z,u,v)   repeated vertex_count times
//! (triangle_count)
//! (i,j,k)                repeated triangle_count times
//! ```
//!
//! Segment mesh:
//!
//! ```text
//! (vertex_count)
//! (x,y,z)                repeated vertex_count times
//! (segment_count)
//! (i,j)                  repeated segment_count times
//! ```
//!
//! An optional initial transform is applied to every vertex before normals
//! and the bounding radius are computed.

use std::path::Path;
use std::str::FromStr;

use super::{MeshSegment, MeshTriangle};
use crate::core::error::ResourceError;
use crate::core::math::{transform_point, Mat4, Vec2, Vec3};

/// Sequential reader over `( ... )` tuples
struct TupleReader<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> TupleReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
        }
    }

    fn error(&self, reason: impl Into<String>) -> ResourceError {
        ResourceError::MeshParse {
            line: self.line,
            reason: reason.into(),
        }
    }

    /// Next tuple's comma-separated fields
    fn next_tuple(&mut self) -> Result<Vec<&'a str>, ResourceError> {
        let text = self.text;
        let rest = &text[self.pos..];
        let open = rest
            .find('(')
            .ok_or_else(|| self.error("unexpected end of input"))?;

        let skipped = &rest[..open];
        if let Some(c) = skipped.chars().find(|c| !c.is_whitespace()) {
            return Err(self.error(format!("unexpected character '{}'", c)));
        }
        self.line += skipped.matches('\n').count();

        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| self.error("unterminated tuple"))?;

        let body = &rest[open + 1..close];
        if body.contains('\n') {
            return Err(self.error("tuple spans multiple lines"));
        }

        self.pos += close + 1;
        Ok(body.split(',').map(str::trim).collect())
    }

    fn parse_field<T: FromStr>(&self, field: &str) -> Result<T, ResourceError> {
        field
            .parse()
            .map_err(|_| self.error(format!("invalid number '{}'", field)))
    }

    fn next_values<T: FromStr>(&mut self, arity: &[usize]) -> Result<Vec<T>, ResourceError> {
        let fields = self.next_tuple()?;
        if !arity.contains(&fields.len()) {
            return Err(self.error(format!(
                "expected {:?} fields, found {}",
                arity,
                fields.len()
            )));
        }
        fields.iter().map(|f| self.parse_field(f)).collect()
    }

    fn next_count(&mut self) -> Result<usize, ResourceError> {
        let value = self.next_values::<i64>(&[1])?[0];
        usize::try_from(value).map_err(|_| self.error(format!("negative count {}", value)))
    }

    fn next_indices(&mut self, arity: usize) -> Result<Vec<usize>, ResourceError> {
        let values: Vec<i64> = self.next_values(&[arity])?;
        values
            .into_iter()
            .map(|v| usize::try_from(v).map_err(|_| self.error(format!("negative index {}", v))))
            .collect()
    }
}

fn apply_transform(vertex: &mut [Vec3], init_transform: Option<&Mat4>) {
    if let Some(m) = init_transform {
        for v in vertex.iter_mut() {
            *v = transform_point(v, m);
        }
    }
}

impl MeshTriangle {
    /// Parse a triangle mesh from its text form
    pub fn parse(text: &str, init_transform: Option<&Mat4>) -> Result<Self, ResourceError> {
        let mut reader = TupleReader::new(text);

        let kind = reader.next_values::<i64>(&[1])?[0];
        let textured = kind != 0;

        let vertex_count = reader.next_count()?;
        let mut vertex = Vec::with_capacity(vertex_count);
        let mut texture = Vec::new();
        for _ in 0..vertex_count {
            if textured {
                let f: Vec<f32> = reader.next_values(&[5])?;
                vertex.push(Vec3::new(f[0], f[1], f[2]));
                texture.push(Vec2::new(f[3], f[4]));
            } else {
                let f: Vec<f32> = reader.next_values(&[3])?;
                vertex.push(Vec3::new(f[0], f[1], f[2]));
            }
        }

        let triangle_count = reader.next_count()?;
        let mut triangle = Vec::with_capacity(triangle_count * 3);
        for _ in 0..triangle_count {
            triangle.extend(reader.next_indices(3)?);
        }

        apply_transform(&mut vertex, init_transform);
        Ok(Self::new(vertex, triangle)?.with_texture(texture))
    }

    /// Load a triangle mesh file
    pub fn load<P: AsRef<Path>>(
        path: P,
        init_transform: Option<&Mat4>,
    ) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mesh = Self::parse(&text, init_transform)?;
        log::info!(
            "Loaded triangle mesh {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertex.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

impl MeshSegment {
    /// Parse a segment mesh from its text form
    pub fn parse(text: &str, init_transform: Option<&Mat4>) -> Result<Self, ResourceError> {
        let mut reader = TupleReader::new(text);

        let vertex_count = reader.next_count()?;
        let mut vertex = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            let f: Vec<f32> = reader.next_values(&[3])?;
            vertex.push(Vec3::new(f[0], f[1], f[2]));
        }

        let segment_count = reader.next_count()?;
        let mut segment = Vec::with_capacity(segment_count * 2);
        for _ in 0..segment_count {
            segment.extend(reader.next_indices(2)?);
        }

        apply_transform(&mut vertex, init_transform);
        Self::new(vertex, segment)
    }

    /// Load a segment mesh file
    pub fn load<P: AsRef<Path>>(
        path: P,
        init_transform: Option<&Mat4>,
    ) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mesh = Self::parse(&text, init_transform)?;
        log::info!(
            "Loaded segment mesh {} ({} vertices, {} segments)",
            path.display(),
            mesh.vertex.len(),
            mesh.segment_count()
        );
        Ok(mesh)
    }
}

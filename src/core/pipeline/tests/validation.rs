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

//! Draw rejection tests
//! Invalid mesh/state combinations and frustum culling leave the buffer alone

use super::super::*;
use super::test_renderer;
use crate::core::math::{translate, Vec2};
use crate::core::resource::color::{BLACK, WHITE};
use crate::core::resource::{MeshSegment, MeshTriangle};

fn triangle() -> MeshTriangle {
    MeshTriangle::new(
        vec![
            Vec3::new(-4.0, -4.0, 0.0),
            Vec3::new(4.0, -4.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ],
        vec![0, 1, 2],
    )
    .unwrap()
}

fn untouched(renderer: &Renderer) -> bool {
    renderer.video_buffer().iter().all(|&c| c == BLACK)
        && renderer.depth_buffer().iter().all(|&d| d == 0.0)
}

#[test]
fn test_shading_conflict() {
    let mut renderer = test_renderer();
    let mesh = triangle().with_texture(vec![Vec2::zeros(); 3]);

    // Neither state
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Invalid(InvalidDraw::ShadingConflict)
    );

    // Both states
    renderer.enable_render_state(RenderStateKind::Illumination, true);
    renderer.enable_render_state(RenderStateKind::TextureSample, true);
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Invalid(InvalidDraw::ShadingConflict)
    );

    assert!(untouched(&renderer));
}

#[test]
fn test_normal_count_mismatch() {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::Illumination, true);

    let mut mesh = triangle();
    mesh.normal.pop();
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Invalid(InvalidDraw::NormalCountMismatch {
            vertices: 3,
            normals: 2
        })
    );
    assert!(untouched(&renderer));
}

#[test]
fn test_texture_count_mismatch() {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::TextureSample, true);

    let mesh = triangle();
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Invalid(InvalidDraw::TextureCountMismatch {
            vertices: 3,
            coords: 0
        })
    );

    // Coordinates are ignored by lit draws
    renderer.enable_render_state(RenderStateKind::TextureSample, false);
    renderer.enable_render_state(RenderStateKind::Illumination, true);
    assert!(renderer.draw_3d_mesh_triangle(&mesh, None).is_drawn());
}

#[test]
fn test_index_out_of_range() {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::Illumination, true);

    let mut mesh = triangle();
    mesh.triangle = vec![0, 1, 3];
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Invalid(InvalidDraw::IndexOutOfRange { index: 3, count: 3 })
    );

    let segment = MeshSegment {
        vertex: vec![Vec3::zeros(); 2],
        segment: vec![0, 2],
        radius: 0.0,
    };
    assert_eq!(
        renderer.draw_3d_mesh_segment(&segment, WHITE),
        DrawOutcome::Invalid(InvalidDraw::IndexOutOfRange { index: 2, count: 2 })
    );
    assert!(untouched(&renderer));
}

#[test]
fn test_frustum_culling() {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::Illumination, true);
    let mesh = triangle();
    let wire = MeshSegment::from_triangle_mesh(&mesh);

    // Beyond the far plane
    renderer.set_transform(TransformKind::World, translate(0.0, 0.0, 5000.0));
    assert_eq!(renderer.draw_3d_mesh_triangle(&mesh, None), DrawOutcome::Culled);
    assert_eq!(renderer.draw_3d_mesh_segment(&wire, WHITE), DrawOutcome::Culled);

    // Behind the camera
    renderer.set_transform(TransformKind::World, translate(0.0, 0.0, -100.0));
    assert_eq!(renderer.draw_3d_mesh_triangle(&mesh, None), DrawOutcome::Culled);

    // Far off to the side
    renderer.set_transform(TransformKind::World, translate(1000.0, 0.0, 0.0));
    assert_eq!(renderer.draw_3d_mesh_segment(&wire, WHITE), DrawOutcome::Culled);

    assert!(untouched(&renderer));
}

#[test]
fn test_empty_mesh_draws_nothing() {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::Illumination, true);

    let mesh = MeshTriangle::new(vec![Vec3::new(1.0, 0.0, 0.0)], Vec::new()).unwrap();
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Drawn { primitives: 0 }
    );
    assert!(untouched(&renderer));
}

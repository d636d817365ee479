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

//! Triangle draw tests
//!
//! The test camera puts world `z = 0` at depth 8 and `z = 8` at depth 16,
//! so `1/z` and `color/z` stay exact and recovered colors are exact too.

use super::super::*;
use super::test_renderer;
use crate::core::config::{CameraConfig, RendererConfig};
use crate::core::math::Vec2;
use approx::assert_relative_eq;
use crate::core::resource::color::{
    blue, green, pack_rgb, red, BLACK, BLUE, LIME, MAGENTA, RED, WHITE,
};
use crate::core::resource::MeshTriangle;

/// Triangle at depth `z` covering pixels (16, 48), (48, 48), (32, 16)
/// whatever the depth
fn triangle_at(z: f32, triangle: Vec<usize>) -> MeshTriangle {
    let s = (z + 8.0) / 2.0;
    MeshTriangle::new(
        vec![
            Vec3::new(-s, -s, z),
            Vec3::new(s, -s, z),
            Vec3::new(0.0, s, z),
        ],
        triangle,
    )
    .unwrap()
}

fn emissive(r: f32, g: f32, b: f32) -> Material {
    Material {
        emissive: Vec3::new(r, g, b),
        ..Default::default()
    }
}

fn lit_renderer() -> Renderer {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::Illumination, true);
    renderer
}

#[test]
fn test_red_triangle() {
    let mut renderer = lit_renderer();
    renderer.set_ambient_light(Vec3::new(255.0, 0.0, 0.0));
    renderer.set_material(Material {
        ambient: Vec3::new(1.0, 1.0, 1.0),
        ..Default::default()
    });

    let mesh = triangle_at(0.0, vec![0, 1, 2]);
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Drawn { primitives: 1 }
    );

    let frame = renderer.frame();
    assert_eq!(frame.pixel(32, 40), Some(RED));
    assert_eq!(frame.pixel(32, 20), Some(RED));
    assert_eq!(frame.pixel(20, 46), Some(RED));

    // Outside the triangle
    assert_eq!(frame.pixel(0, 0), Some(BLACK));
    assert_eq!(frame.pixel(18, 20), Some(BLACK));
    assert_eq!(frame.pixel(32, 50), Some(BLACK));
}

/// Which side of every edge `(x, y)` lies on, as a signed distance to the
/// nearest edge: positive inside, negative outside
fn edge_distance(corners: &[(f32, f32); 3], x: f32, y: f32) -> f32 {
    let mut nearest = f32::MAX;
    for i in 0..3 {
        let (ax, ay) = corners[i];
        let (bx, by) = corners[(i + 1) % 3];
        let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
        let length = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
        nearest = nearest.min(cross / length);
    }
    nearest
}

#[test]
fn test_red_triangle_footprint() {
    let config = RendererConfig {
        width: 100,
        height: 100,
        near: 2.0,
        far: 1000.0,
        camera: CameraConfig {
            eye: [0.0, 0.0, -64.0],
            at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        },
        ..Default::default()
    };
    let mut renderer = Renderer::new(&config).unwrap();
    renderer.enable_render_state(RenderStateKind::Illumination, true);
    renderer.enable_render_state(RenderStateKind::DepthTest, true);
    renderer.enable_render_state(RenderStateKind::FaceCulling, true);
    assert_eq!(renderer.cull_mode(), CullMode::Back);
    renderer.set_ambient_light(Vec3::new(255.0, 0.0, 0.0));
    renderer.set_material(Material {
        ambient: Vec3::new(1.0, 1.0, 1.0),
        ..Default::default()
    });

    let fill = pack_rgb(40, 40, 40);
    renderer.fill_buffer(Some(fill), true);
    let fill_depth = 1.0 / 1000.0;

    // Clockwise on screen, so the face points at the camera; depth 64
    let world = [
        Vec3::new(-38.4, -32.0, 0.0),
        Vec3::new(12.8, 38.4, 0.0),
        Vec3::new(44.8, -25.6, 0.0),
    ];
    let mesh = MeshTriangle::new(world.to_vec(), vec![0, 1, 2]).unwrap();
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Drawn { primitives: 1 }
    );

    // (x, y, 64) lands on pixel (50 + 50x/64, 50 - 50y/64)
    let corners = world.map(|v| (50.0 + 50.0 * v.x / 64.0, 50.0 - 50.0 * v.y / 64.0));
    let depth = 1.0 / 64.0;

    // Pixels within 2.5 of an edge may fall either way after truncation
    let frame = renderer.frame();
    let mut footprint = 0;
    for y in 0..100 {
        for x in 0..100 {
            let color = frame.pixel(x, y).unwrap();
            let stored = frame.depth_at(x, y).unwrap();
            let distance = edge_distance(&corners, x as f32, y as f32);

            if color == RED {
                footprint += 1;
                assert!(distance > -2.5, "({}, {}) red outside the triangle", x, y);
                assert_relative_eq!(stored, depth, max_relative = 1e-5);
            } else {
                assert_eq!(color, fill, "({}, {})", x, y);
                assert_eq!(stored, fill_depth, "({}, {})", x, y);
                assert!(distance < 2.5, "({}, {}) unfilled inside the triangle", x, y);
            }
        }
    }

    // Screen area of the triangle is 1687.5 pixels
    assert!((1500..1850).contains(&footprint), "footprint {}", footprint);
}

#[test]
fn test_overlapping_triangles_depth() {
    let near = triangle_at(0.0, vec![0, 1, 2]);
    let far = triangle_at(8.0, vec![0, 1, 2]);

    for near_first in [true, false] {
        let mut renderer = lit_renderer();
        renderer.enable_render_state(RenderStateKind::DepthTest, true);
        renderer.fill_buffer(None, true);

        let mut draws = [(&near, emissive(255.0, 0.0, 0.0)), (&far, emissive(0.0, 0.0, 255.0))];
        if !near_first {
            draws.reverse();
        }
        for (mesh, material) in draws {
            renderer.set_material(material);
            assert!(renderer.draw_3d_mesh_triangle(mesh, None).is_drawn());
        }

        let frame = renderer.frame();
        assert_eq!(frame.pixel(32, 40), Some(RED), "near_first = {}", near_first);
        assert_eq!(frame.depth_at(32, 40), Some(0.125));
    }
}

#[test]
fn test_without_depth_test_last_draw_wins() {
    let mut renderer = lit_renderer();

    renderer.set_material(emissive(255.0, 0.0, 0.0));
    renderer.draw_3d_mesh_triangle(&triangle_at(0.0, vec![0, 1, 2]), None);
    renderer.set_material(emissive(0.0, 0.0, 255.0));
    renderer.draw_3d_mesh_triangle(&triangle_at(8.0, vec![0, 1, 2]), None);

    assert_eq!(renderer.frame().pixel(32, 40), Some(BLUE));
    assert_eq!(renderer.frame().depth_at(32, 40), Some(0.0));
}

#[test]
fn test_alpha_blended_triangle() {
    let mut renderer = lit_renderer();
    renderer.enable_render_state(RenderStateKind::AlphaBlend, true);
    renderer.fill_buffer(Some(WHITE), false);
    renderer.set_material(emissive(255.0, 0.0, 0.0));

    renderer.draw_3d_mesh_triangle(&triangle_at(0.0, vec![0, 1, 2]), None);

    assert_eq!(renderer.frame().pixel(32, 40), Some(pack_rgb(255, 127, 127)));
    assert_eq!(renderer.frame().pixel(0, 0), Some(WHITE));
}

#[test]
fn test_face_culling() {
    let mut renderer = lit_renderer();
    renderer.set_material(emissive(255.0, 0.0, 0.0));
    renderer.enable_render_state(RenderStateKind::FaceCulling, true);

    // Projected normal along +z: removed by back culling
    let away = triangle_at(0.0, vec![0, 1, 2]);
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&away, None),
        DrawOutcome::Drawn { primitives: 0 }
    );
    assert_eq!(renderer.frame().pixel(32, 40), Some(BLACK));

    let toward = triangle_at(0.0, vec![0, 2, 1]);
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&toward, None),
        DrawOutcome::Drawn { primitives: 1 }
    );
    assert_eq!(renderer.frame().pixel(32, 40), Some(RED));

    // Front culling flips the choice
    renderer.fill_buffer(Some(BLACK), false);
    renderer.set_cull_mode(CullMode::Front);
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&toward, None),
        DrawOutcome::Drawn { primitives: 0 }
    );
    assert_eq!(
        renderer.draw_3d_mesh_triangle(&away, None),
        DrawOutcome::Drawn { primitives: 1 }
    );
    assert_eq!(renderer.frame().pixel(32, 40), Some(RED));
}

#[test]
fn test_textured_triangle() {
    let mut renderer = test_renderer();
    renderer.enable_render_state(RenderStateKind::TextureSample, true);

    let mesh = triangle_at(0.0, vec![0, 1, 2]).with_texture(vec![
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.5, 0.0),
    ]);

    // Default 1×1 texture
    assert!(renderer.draw_3d_mesh_triangle(&mesh, None).is_drawn());
    assert_eq!(renderer.frame().pixel(32, 40), Some(LIME));

    renderer.set_default_texture_color(MAGENTA);
    renderer.draw_3d_mesh_triangle(&mesh, None);
    assert_eq!(renderer.frame().pixel(32, 40), Some(MAGENTA));

    // Caller texture: left half blue, right half red
    let texture = Texture::new(4, 1, vec![BLUE, BLUE, RED, RED]).unwrap();
    renderer.set_texture(Some(Arc::new(texture)));
    renderer.draw_3d_mesh_triangle(&mesh, None);
    assert_eq!(renderer.frame().pixel(20, 46), Some(BLUE));
    assert_eq!(renderer.frame().pixel(44, 46), Some(RED));

    // Dropping it falls back to the default again
    renderer.set_texture(None);
    renderer.draw_3d_mesh_triangle(&mesh, None);
    assert_eq!(renderer.frame().pixel(44, 46), Some(MAGENTA));
}

#[test]
fn test_triangle_crossing_near_plane() {
    let mut renderer = lit_renderer();
    renderer.set_material(emissive(255.0, 0.0, 0.0));

    // Two corners at depth 1, behind the near plane; one at depth 16
    let mesh = MeshTriangle::new(
        vec![
            Vec3::new(-4.0, -1.0, -7.0),
            Vec3::new(4.0, -1.0, -7.0),
            Vec3::new(0.0, 1.0, 8.0),
        ],
        vec![0, 1, 2],
    )
    .unwrap();

    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Drawn { primitives: 1 }
    );

    // The cut edge sits near row 46, the apex on row 30
    let c = renderer.frame().pixel(32, 40).unwrap_or(BLACK);
    assert!(red(c) >= 254, "pixel {:#x}", c);
    assert_eq!((green(c), blue(c)), (0, 0));
    assert_eq!(renderer.frame().pixel(32, 20), Some(BLACK));
    assert_eq!(renderer.frame().pixel(32, 50), Some(BLACK));
}

#[test]
fn test_triangle_fully_behind_near_plane() {
    let mut renderer = lit_renderer();
    renderer.set_material(emissive(255.0, 0.0, 0.0));

    let mesh = MeshTriangle::new(
        vec![
            Vec3::new(-1.0, -1.0, -7.0),
            Vec3::new(1.0, -1.0, -7.0),
            Vec3::new(0.0, 1.0, -7.0),
            // Keeps the bounding sphere reaching into the frustum
            Vec3::new(0.0, 0.0, 9.0),
        ],
        vec![0, 1, 2],
    )
    .unwrap();

    assert_eq!(
        renderer.draw_3d_mesh_triangle(&mesh, None),
        DrawOutcome::Drawn { primitives: 0 }
    );
    assert!(renderer.video_buffer().iter().all(|&c| c == BLACK));
}

#[test]
fn test_directional_light() {
    let mut renderer = lit_renderer();
    renderer.set_material(Material {
        diffuse: Vec3::new(1.0, 1.0, 1.0),
        ..Default::default()
    });

    // Normals of this winding point toward -z, at the camera
    let mesh = triangle_at(0.0, vec![0, 2, 1]);

    // Shining along +z onto the face
    renderer
        .add_light(Light::directional(Vec3::new(0.0, 200.0, 0.0), Vec3::new(0.0, 0.0, 3.0)), 1, true)
        .unwrap();
    renderer.draw_3d_mesh_triangle(&mesh, None);
    assert_eq!(renderer.frame().pixel(32, 40), Some(pack_rgb(0, 200, 0)));

    // Disabled lights contribute nothing
    renderer.enable_light(1, false).unwrap();
    renderer.draw_3d_mesh_triangle(&mesh, None);
    assert_eq!(renderer.frame().pixel(32, 40), Some(BLACK));
}

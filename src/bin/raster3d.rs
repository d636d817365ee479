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

//! Headless demo renderer
//!
//! Renders a lit sphere and a spinning textured mesh under three colored
//! lights for a number of frames, then writes the last frame to disk. No
//! window is opened.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use raster3d::core::capture::{self, FrameCapture};
use raster3d::core::config::RendererConfig;
use raster3d::core::error::Result;
use raster3d::core::math::{
    compute_transform_camera, compute_transform_view, rotate_y, scale, Mat4, Vec2, Vec3,
};
use raster3d::core::pipeline::{CullMode, RenderStateKind, Renderer, TransformKind};
use raster3d::core::resource::color::{BLACK, WHITE};
use raster3d::core::resource::{AsciiFont, Light, LightKind, Material, MeshTriangle, Texture};

/// Id of the point light that orbits the scene
const POINT_LIGHT: i32 = 1;

/// CPU-only 3D rasterizer demo
#[derive(Parser)]
#[command(name = "raster3d")]
#[command(about = "Render a demo scene to an image file", long_about = None)]
struct Args {
    /// Renderer config file (.toml or .json); also read from RASTER3D_CONFIG
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// PNG file for the last frame
    #[arg(short = 'o', long, default_value = "frame.png")]
    output: PathBuf,

    /// Binary capture of the last frame (color and depth)
    #[arg(long)]
    capture: Option<PathBuf>,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value = "1")]
    frames: u64,

    /// Texture image for the spinning mesh
    #[arg(short = 't', long)]
    texture: Option<PathBuf>,

    /// Triangle mesh file for the spinning mesh (defaults to a torus)
    #[arg(short = 'm', long)]
    mesh: Option<PathBuf>,

    /// 8×16 glyph coverage sheet for the text overlay
    #[arg(short = 'f', long)]
    font: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if present; a missing file is fine
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("raster3d v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var_os("RASTER3D_CONFIG").map(PathBuf::from));
    let config = match &config_path {
        Some(path) => RendererConfig::load(path).inspect_err(|e| {
            error!("Failed to load config {}: {}", path.display(), e);
        })?,
        None => RendererConfig::default(),
    };

    let mut renderer = Renderer::new(&config)?;
    setup_scene(&mut renderer, &config)?;

    let texture = match &args.texture {
        Some(path) => Some(Arc::new(Texture::load(path)?)),
        None => None,
    };
    renderer.set_texture(texture);

    let sphere = MeshTriangle::sphere(50.0, 32, 32)?;
    let spinning = match &args.mesh {
        Some(path) => {
            let mesh = MeshTriangle::load(path, Some(&scale(60.0, 60.0, 60.0)))?;
            if mesh.texture.len() == mesh.vertex.len() {
                mesh
            } else {
                with_planar_texture(mesh)
            }
        }
        None => with_planar_texture(MeshTriangle::torus(45.0, 90.0, 32, 32)?),
    };

    let font = match &args.font {
        Some(path) => Some(AsciiFont::load(path, 8, 16, WHITE)?),
        None => None,
    };

    let eye = config.camera.eye();
    let mut angle = 0.0f32;

    for frame in 0..args.frames {
        angle += 0.01;
        render_frame(&mut renderer, &sphere, &spinning, eye, angle, frame);

        if let Some(font) = &font {
            draw_overlay(&mut renderer, font, eye, frame);
        }

        if frame % 10 == 0 {
            info!("Rendered frame {}/{}", frame + 1, args.frames);
        }
    }

    info!("Writing {}", args.output.display());
    capture::export_png(renderer.frame(), &args.output)?;

    if let Some(path) = &args.capture {
        let snapshot = FrameCapture::from_frame(renderer.frame(), args.frames.saturating_sub(1));
        snapshot.save_to_file(path)?;
        info!("Saved capture to {}", path.display());
    }

    Ok(())
}

/// Render states, material and lights shared by every frame
fn setup_scene(renderer: &mut Renderer, config: &RendererConfig) -> Result<()> {
    renderer.set_transform(
        TransformKind::View,
        compute_transform_view(0, 0, config.width as i32, config.height as i32),
    );

    renderer.enable_render_state(RenderStateKind::DepthTest, true);
    renderer.enable_render_state(RenderStateKind::AlphaBlend, true);
    renderer.set_alpha_blend_weight(config.alpha_blend);
    renderer.enable_render_state(RenderStateKind::FaceCulling, true);
    renderer.set_cull_mode(CullMode::Back);

    renderer.set_material(Material {
        emissive: Vec3::zeros(),
        ambient: Vec3::new(0.5, 0.5, 0.5),
        diffuse: Vec3::new(0.5, 0.5, 0.5),
        specular: Vec3::new(0.6, 0.6, 0.6),
        power: 5.0,
    });

    renderer.add_light(
        Light::point(Vec3::new(0.0, 255.0, 0.0), Vec3::zeros(), 70.0),
        POINT_LIGHT,
        true,
    )?;
    renderer.add_light(
        Light::directional(Vec3::new(0.0, 0.0, 255.0), Vec3::new(0.0, -1.0, 0.0)),
        2,
        true,
    )?;
    renderer.add_light(
        Light::directional(Vec3::new(255.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        3,
        true,
    )?;

    Ok(())
}

fn render_frame(
    renderer: &mut Renderer,
    sphere: &MeshTriangle,
    spinning: &MeshTriangle,
    eye: Vec3,
    angle: f32,
    frame: u64,
) {
    // Ambient light pulses through the grey ramp
    let ambient = ((255 + frame) % 256) as f32;
    renderer.set_ambient_light(Vec3::new(ambient, ambient, ambient));

    // Point light circles the sphere
    if let Some(light) = renderer.light_mut(POINT_LIGHT) {
        light.kind = LightKind::Point {
            position: Vec3::new(80.0 * angle.cos(), 0.0, 80.0 * angle.sin()),
            radius: 70.0,
        };
    }

    renderer.fill_buffer(Some(BLACK), true);
    renderer.set_transform(
        TransformKind::Camera,
        compute_transform_camera(&eye, &Vec3::zeros(), &Vec3::y()),
    );

    renderer.enable_render_state(RenderStateKind::Illumination, true);
    renderer.enable_render_state(RenderStateKind::TextureSample, false);
    renderer.set_transform(TransformKind::World, Mat4::identity());
    let lit = renderer.draw_3d_mesh_triangle(sphere, Some(eye));

    renderer.enable_render_state(RenderStateKind::Illumination, false);
    renderer.enable_render_state(RenderStateKind::TextureSample, true);
    renderer.set_transform(TransformKind::World, rotate_y(angle));
    let textured = renderer.draw_3d_mesh_triangle(spinning, Some(eye));

    log::debug!("Frame {}: sphere {:?}, mesh {:?}", frame, lit, textured);
}

fn draw_overlay(renderer: &mut Renderer, font: &AsciiFont, eye: Vec3, frame: u64) {
    let light = renderer
        .light(POINT_LIGHT)
        .map(|l| match l.kind {
            LightKind::Point { position, .. } => position,
            LightKind::Directional { direction } => direction,
        })
        .unwrap_or_else(Vec3::zeros);

    let lines = [
        format!("frame : {}", frame),
        format!("eye_pos : (x={:.2},y={:.2},z={:.2})", eye.x, eye.y, eye.z),
        format!(
            "dot_light_pos : (x={:.2},y={:.2},z={:.2})",
            light.x, light.y, light.z
        ),
    ];

    for (row, line) in lines.iter().enumerate() {
        renderer.draw_2d_ascii_string(font, 256, 1, 0, row as i32 * 32, line);
    }
}

/// Project texture coordinates onto the xy bounding box
fn with_planar_texture(mesh: MeshTriangle) -> MeshTriangle {
    let (min, max) = mesh.vertex.iter().fold(
        (Vec3::repeat(f32::MAX), Vec3::repeat(f32::MIN)),
        |(lo, hi), v| (lo.inf(v), hi.sup(v)),
    );
    let span = max - min;

    let texture = mesh
        .vertex
        .iter()
        .map(|v| {
            let u = if span.x > 0.0 { (v.x - min.x) / span.x } else { 0.0 };
            let t = if span.y > 0.0 { (max.y - v.y) / span.y } else { 0.0 };
            Vec2::new(u, t)
        })
        .collect();

    mesh.with_texture(texture)
}

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

//! Rendering pipeline
//!
//! This module implements the [`Renderer`], a software 3D pipeline that draws
//! segment and triangle meshes into a packed-ARGB color buffer with a
//! reciprocal-depth buffer. The renderer is responsible for:
//! - Holding the world, camera, projection and view matrices
//! - Clipping primitives against the near plane
//! - Rejecting meshes outside the view frustum and culling faces
//! - Lighting vertices and sampling textures
//! - Rasterizing into the frame buffer, with optional depth test and blending
//!
//! # Stages
//!
//! ```text
//! triangle: validate → frustum → world → (light) → camera → near clip
//!           → projection → (face cull) → view → fill → classify → rasterize
//! segment:  frustum → world → camera → near clip → projection → view
//!           → rasterize
//! ```
//!
//! # Spaces
//!
//! - World and camera spaces use the row-vector convention of
//!   [`crate::core::math`]; the camera looks down `+z`.
//! - Projection is a fixed perspective divide `(x/z, y/z)`; the stored
//!   projection matrix is kept for callers but never applied.
//! - View space is pixels, y down. Triangles carry camera depth `z` into view
//!   space, segments carry `1/z`.
//!
//! # Depth
//!
//! The depth buffer stores `1/z`; larger is nearer. Clearing depth writes
//! `1/far`, and a fragment passes the depth test when its `1/z` is strictly
//! greater than the stored value.

use std::sync::Arc;

pub mod classify;
pub mod clip;
mod draw;
pub mod fill;
pub mod illumination;
pub mod render;
pub mod state;
#[cfg(test)]
mod tests;
pub mod transform;
pub mod visibility;

pub use illumination::LightSet;
pub use render::Rasterizer;
pub use state::{CullMode, DrawOutcome, InvalidDraw, RenderFlags, RenderStateKind, TransformKind};
pub use transform::TransformStage;

use crate::core::config::{validate_clip_planes, RendererConfig};
use crate::core::error::Result;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{Rect, Segment2};
use crate::core::math::{compute_transform_camera, compute_transform_view, Mat4, Vec3};
use crate::core::resource::{AsciiFont, Light, Material, Texture};
use clip::VertexArena;

/// Software 3D pipeline instance
///
/// Owns the frame buffer, the transform and render state, the light set and
/// per-draw scratch arrays. Meshes, textures and lights stay owned by the
/// caller; the active texture is shared through an [`Arc`].
///
/// # Examples
///
/// ```
/// use raster3d::core::config::RendererConfig;
/// use raster3d::core::pipeline::{Renderer, RenderStateKind};
/// use raster3d::core::resource::color::RED;
///
/// let config = RendererConfig {
///     width: 64,
///     height: 48,
///     ..Default::default()
/// };
/// let mut renderer = Renderer::new(&config).unwrap();
/// renderer.enable_render_state(RenderStateKind::DepthTest, true);
/// renderer.fill_buffer(Some(RED), true);
///
/// assert_eq!(renderer.buffer_size(), (64, 48));
/// assert!(renderer.video_buffer().iter().all(|&c| c == RED));
/// ```
pub struct Renderer {
    /// Color and depth planes
    pub(in crate::core::pipeline) framebuffer: FrameBuffer,

    /// World, camera, projection and view matrices
    pub(in crate::core::pipeline) transforms: TransformStage,

    /// Viewport and blend weights shared by every raster path
    pub(in crate::core::pipeline) rasterizer: Rasterizer,

    /// Enabled render states
    pub(in crate::core::pipeline) flags: RenderFlags,

    /// Winding removed when face culling is on
    pub(in crate::core::pipeline) cull_mode: CullMode,

    /// Near clip plane distance (at least 1)
    pub(in crate::core::pipeline) near: f32,

    /// Far plane distance, used by the frustum test and depth clear
    pub(in crate::core::pipeline) far: f32,

    /// Lights, ambient color and material
    pub(in crate::core::pipeline) lights: LightSet,

    /// 1×1 texture sampled when no texture is set
    pub(in crate::core::pipeline) default_texture: Arc<Texture>,

    /// Texture set by the caller
    pub(in crate::core::pipeline) texture: Option<Arc<Texture>>,

    /// Mesh vertices in world space
    world: Vec<Vec3>,

    /// Camera-space vertices plus clip-carried color and texture
    arena: VertexArena,

    /// Projected vertices, index-aligned with the arena
    projected: Vec<Vec3>,

    /// View-space vertices, index-aligned with the arena
    view: Vec<Vec3>,

    /// Ordinals of triangles surviving face culling
    visible: Vec<usize>,
}

impl Renderer {
    /// Create a renderer and initialise it from `config`
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::init`].
    pub fn new(config: &RendererConfig) -> Result<Self> {
        config.validate()?;

        let mut renderer = Self {
            framebuffer: FrameBuffer::new(0, 0),
            transforms: TransformStage::default(),
            rasterizer: Rasterizer::new(),
            flags: RenderFlags::empty(),
            cull_mode: CullMode::default(),
            near: config.near,
            far: config.far,
            lights: LightSet::new(),
            default_texture: Arc::new(Texture::solid(config.default_texture_color)),
            texture: None,
            world: Vec::new(),
            arena: VertexArena::default(),
            projected: Vec::new(),
            view: Vec::new(),
            visible: Vec::new(),
        };

        renderer.init(config)?;
        Ok(renderer)
    }

    /// Reset every piece of state from `config`
    ///
    /// Reallocates the frame buffer (black, depth 0), places the camera at
    /// `config.camera`, maps the view onto the whole buffer, resets the
    /// projection to identity, disables every render state, back-face culls,
    /// zeroes the material and ambient light and drops all lights and the
    /// active texture.
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidBufferSize`](crate::core::error::RenderError::InvalidBufferSize)
    ///   for a zero dimension
    /// - [`RenderError::InvalidClipPlanes`](crate::core::error::RenderError::InvalidClipPlanes)
    ///   unless `near >= 1` and `far > near`
    ///
    /// The renderer is unchanged on error.
    pub fn init(&mut self, config: &RendererConfig) -> Result<()> {
        config.validate()?;

        let width = config.width as usize;
        let height = config.height as usize;
        self.framebuffer = FrameBuffer::new(width, height);

        let camera = &config.camera;
        self.transforms = TransformStage::default();
        self.transforms.set(
            TransformKind::Camera,
            compute_transform_camera(&camera.eye(), &camera.at(), &camera.up()),
        );
        self.transforms.set(TransformKind::Projection, Mat4::identity());
        self.set_transform(
            TransformKind::View,
            compute_transform_view(0, 0, config.width as i32, config.height as i32),
        );

        self.rasterizer.set_alpha_blend(config.alpha_blend);
        self.flags = RenderFlags::empty();
        self.cull_mode = CullMode::Back;
        self.near = config.near;
        self.far = config.far;

        self.lights = LightSet::new();
        self.default_texture = Arc::new(Texture::solid(config.default_texture_color));
        self.texture = None;

        self.world.clear();
        self.arena.clear();
        self.projected.clear();
        self.view.clear();
        self.visible.clear();

        log::info!(
            "Renderer initialized: {}x{}, near {}, far {}",
            width,
            height,
            self.near,
            self.far
        );
        Ok(())
    }

    /// Replace one of the four matrices
    ///
    /// Setting the view matrix also moves the viewport to the view rectangle
    /// clamped to the buffer.
    pub fn set_transform(&mut self, kind: TransformKind, m: Mat4) {
        self.transforms.set(kind, m);

        if kind == TransformKind::View {
            let view_rect = self.transforms.view_rect();
            self.rasterizer
                .set_viewport(&view_rect, &self.framebuffer.rect());
            log::debug!(
                "View rectangle {:?}, viewport {:?}",
                view_rect,
                self.rasterizer.viewport()
            );
        }
    }

    pub fn transform(&self, kind: TransformKind) -> &Mat4 {
        self.transforms.get(kind)
    }

    /// Pixel rectangle derived from the view matrix, before buffer clamping
    pub fn view_rect(&self) -> Rect {
        self.transforms.view_rect()
    }

    /// Move the near and far planes
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidClipPlanes`](crate::core::error::RenderError::InvalidClipPlanes)
    /// unless `near >= 1` and `far > near`; the planes are unchanged.
    pub fn set_camera_planes(&mut self, near: f32, far: f32) -> Result<()> {
        validate_clip_planes(near, far)?;
        self.near = near;
        self.far = far;
        Ok(())
    }

    /// `(near, far)`
    pub fn camera_planes(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    pub fn enable_render_state(&mut self, kind: RenderStateKind, enabled: bool) {
        self.flags.set(kind.flag(), enabled);
        log::debug!("Render state {:?} = {}", kind, enabled);
    }

    pub fn is_render_state_enabled(&self, kind: RenderStateKind) -> bool {
        self.flags.contains(kind.flag())
    }

    /// All enabled render states
    pub fn render_flags(&self) -> RenderFlags {
        self.flags
    }

    /// Foreground weight for alpha blending; the background gets `1 - weight`
    pub fn set_alpha_blend_weight(&mut self, weight: f32) {
        self.rasterizer.set_alpha_blend(weight);
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    /// Color sampled by textured draws when no texture is set
    pub fn set_default_texture_color(&mut self, color: u32) {
        self.default_texture = Arc::new(Texture::solid(color));
    }

    /// Texture sampled by textured draws; `None` falls back to the default
    pub fn set_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.texture = texture;
    }

    pub fn set_ambient_light(&mut self, color: Vec3) {
        self.lights.set_ambient(color);
    }

    pub fn set_material(&mut self, material: Material) {
        self.lights.set_material(material);
    }

    /// Register a light under a unique id
    ///
    /// # Errors
    ///
    /// [`RenderError::DuplicateLightId`](crate::core::error::RenderError::DuplicateLightId)
    /// if `id` is taken.
    pub fn add_light(&mut self, light: Light, id: i32, enabled: bool) -> Result<()> {
        self.lights.add(light, id, enabled)
    }

    pub fn remove_light(&mut self, id: i32) -> Result<Light> {
        self.lights.remove(id)
    }

    pub fn light(&self, id: i32) -> Option<&Light> {
        self.lights.get(id)
    }

    pub fn light_mut(&mut self, id: i32) -> Option<&mut Light> {
        self.lights.get_mut(id)
    }

    pub fn enable_light(&mut self, id: i32, enabled: bool) -> Result<()> {
        self.lights.set_enabled(id, enabled)
    }

    /// Lights, ambient color and material
    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    /// Clear the color plane, the depth plane, or both
    ///
    /// Depth is reset to `1/far`, so only geometry in front of the far plane
    /// passes the depth test.
    pub fn fill_buffer(&mut self, color: Option<u32>, depth: bool) {
        if let Some(color) = color {
            self.framebuffer.fill_color(color);
        }
        if depth {
            self.framebuffer.fill_depth(1.0 / self.far);
        }
    }

    /// One-pixel segment clipped to the buffer
    pub fn draw_2d_segment(&mut self, seg: &Segment2, color: u32) {
        self.framebuffer.draw_segment(seg, color);
    }

    /// Fill `[x1, x2) × [y1, y2)` clipped to the buffer
    pub fn draw_2d_rectangle(&mut self, rect: &Rect, color: u32) {
        self.framebuffer.draw_rectangle(rect, color);
    }

    /// Blit part of a texture, skipping texels equal to `color_key`
    pub fn draw_2d_texture(
        &mut self,
        texture: &Texture,
        src: &Rect,
        dx: i32,
        dy: i32,
        color_key: Option<u32>,
    ) {
        self.framebuffer.draw_texture(texture, src, dx, dy, color_key);
    }

    /// ASCII text on a `columns × rows` character grid
    pub fn draw_2d_ascii_string(
        &mut self,
        font: &AsciiFont,
        columns: usize,
        rows: usize,
        x: i32,
        y: i32,
        text: &str,
    ) {
        self.framebuffer
            .draw_ascii_string(font, columns, rows, x, y, text);
    }

    /// `(width, height)` in pixels
    pub fn buffer_size(&self) -> (usize, usize) {
        (self.framebuffer.width(), self.framebuffer.height())
    }

    /// Row-major packed ARGB pixels
    pub fn video_buffer(&self) -> &[u32] {
        self.framebuffer.color()
    }

    /// Row-major `1/z` values
    pub fn depth_buffer(&self) -> &[f32] {
        self.framebuffer.depth()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.framebuffer
    }
}

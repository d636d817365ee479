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

//! Render state and dispatch keys
//!
//! The pipeline picks its specialised code paths from a handful of boolean
//! states. Each stage packs the states it cares about into a small integer
//! key and indexes a table of monomorphised functions with it:
//!
//! | Key | Bits | Used by |
//! |---|---|---|
//! | attribute | `ic<<0 \| ts<<1` | near clip, fill |
//! | segment | `dt<<0 \| ab<<1` | segment rasterizer |
//! | triangle | `dt<<0 \| ab<<1 \| ic<<2 \| ts<<3` | triangle rasterizer |
//!
//! (`dt` depth test, `ab` alpha blend, `ic` illumination, `ts` texture sample)

use bitflags::bitflags;
use thiserror::Error;

use crate::core::error::RenderError;

bitflags! {
    /// Enabled render states
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u8 {
        const DEPTH_TEST = 1 << 0;
        const ALPHA_BLEND = 1 << 1;
        const FACE_CULLING = 1 << 2;
        const ILLUMINATION = 1 << 3;
        const TEXTURE_SAMPLE = 1 << 4;
    }
}

impl RenderFlags {
    #[inline]
    fn bit(&self, flag: RenderFlags) -> usize {
        self.contains(flag) as usize
    }

    /// Near-clip and fill layout: `ic | ts<<1`
    #[inline]
    pub fn attribute_key(&self) -> usize {
        self.bit(Self::ILLUMINATION) | self.bit(Self::TEXTURE_SAMPLE) << 1
    }

    /// Segment rasterizer slot: `dt | ab<<1`
    #[inline]
    pub fn segment_key(&self) -> usize {
        self.bit(Self::DEPTH_TEST) | self.bit(Self::ALPHA_BLEND) << 1
    }

    /// Triangle rasterizer slot: `dt | ab<<1 | ic<<2 | ts<<3`
    #[inline]
    pub fn triangle_key(&self) -> usize {
        self.segment_key() | self.attribute_key() << 2
    }
}

/// Matrix slot selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    World = 0,
    Camera = 1,
    /// Stored but never applied; projection is the fixed perspective divide
    Projection = 2,
    View = 3,
}

impl TryFrom<u32> for TransformKind {
    type Error = RenderError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::World),
            1 => Ok(Self::Camera),
            2 => Ok(Self::Projection),
            3 => Ok(Self::View),
            _ => Err(RenderError::InvalidTransformTag(value)),
        }
    }
}

/// Toggleable render state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStateKind {
    DepthTest = 0,
    AlphaBlend = 1,
    FaceCulling = 2,
    Illumination = 3,
    TextureSample = 4,
}

impl RenderStateKind {
    /// Flag this state toggles
    pub fn flag(self) -> RenderFlags {
        match self {
            Self::DepthTest => RenderFlags::DEPTH_TEST,
            Self::AlphaBlend => RenderFlags::ALPHA_BLEND,
            Self::FaceCulling => RenderFlags::FACE_CULLING,
            Self::Illumination => RenderFlags::ILLUMINATION,
            Self::TextureSample => RenderFlags::TEXTURE_SAMPLE,
        }
    }
}

impl TryFrom<u32> for RenderStateKind {
    type Error = RenderError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::DepthTest),
            1 => Ok(Self::AlphaBlend),
            2 => Ok(Self::FaceCulling),
            3 => Ok(Self::Illumination),
            4 => Ok(Self::TextureSample),
            _ => Err(RenderError::InvalidRenderStateTag(value)),
        }
    }
}

/// Which winding face culling removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// Keep triangles whose projected normal points at the viewer
    #[default]
    Back,
    Front,
}

/// Why a triangle draw was skipped before touching the buffer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDraw {
    #[error("normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch { vertices: usize, normals: usize },

    #[error("exactly one of illumination and texture sampling must be enabled")]
    ShadingConflict,

    #[error("texture coordinate count {coords} does not match vertex count {vertices}")]
    TextureCountMismatch { vertices: usize, coords: usize },

    #[error("index {index} out of range (vertex count {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Result of a 3D draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Primitives that reached the rasterizer
    Drawn { primitives: usize },

    /// Bounding sphere outside the frustum
    Culled,

    /// Mesh or state combination rejected
    Invalid(InvalidDraw),
}

impl DrawOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

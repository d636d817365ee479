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

//! Packed ARGB colors
//!
//! Every pixel is a `u32` laid out as `0xAARRGGBB`:
//! - Bits 24-31: Alpha (always `0xFF` when written by the pipeline)
//! - Bits 16-23: Red
//! - Bits 8-15: Green
//! - Bits 0-7: Blue

pub const BLACK: u32 = 0xff00_0000;
pub const RED: u32 = 0xffff_0000;
pub const LIME: u32 = 0xff00_ff00;
pub const BLUE: u32 = 0xff00_00ff;
pub const YELLOW: u32 = 0xffff_ff00;
pub const MAGENTA: u32 = 0xffff_00ff;
pub const CYAN: u32 = 0xff00_ffff;
pub const WHITE: u32 = 0xffff_ffff;

/// Pack three channels into an opaque color
///
/// # Examples
///
/// ```
/// use raster3d::core::resource::color::{pack_rgb, RED};
///
/// assert_eq!(pack_rgb(255, 0, 0), RED);
/// ```
#[inline(always)]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    0xff00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline(always)]
pub const fn red(c: u32) -> u8 {
    ((c & 0x00ff_0000) >> 16) as u8
}

#[inline(always)]
pub const fn green(c: u32) -> u8 {
    ((c & 0x0000_ff00) >> 8) as u8
}

#[inline(always)]
pub const fn blue(c: u32) -> u8 {
    (c & 0x0000_00ff) as u8
}

/// Weighted per-channel mix of `fg` over `bg`
///
/// Each channel is `(int)(bg * bg_weight + fg * fg_weight)`; the result is
/// opaque.
#[inline(always)]
pub fn blend(bg: u32, fg: u32, fg_weight: f32, bg_weight: f32) -> u32 {
    blend_rgb(
        bg,
        [red(fg) as f32, green(fg) as f32, blue(fg) as f32],
        fg_weight,
        bg_weight,
    )
}

/// [`blend`] with an unquantised foreground
#[inline(always)]
pub fn blend_rgb(bg: u32, fg: [f32; 3], fg_weight: f32, bg_weight: f32) -> u32 {
    let mix = |b: u8, f: f32| (b as f32 * bg_weight + f * fg_weight) as u8;
    pack_rgb(
        mix(red(bg), fg[0]),
        mix(green(bg), fg[1]),
        mix(blue(bg), fg[2]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = pack_rgb(0x12, 0x34, 0x56);
        assert_eq!(c, 0xff12_3456);
        assert_eq!((red(c), green(c), blue(c)), (0x12, 0x34, 0x56));
    }

    #[test]
    fn test_blend_half() {
        assert_eq!(blend(BLACK, WHITE, 0.5, 0.5), pack_rgb(127, 127, 127));
        assert_eq!(blend(RED, BLUE, 1.0, 0.0), BLUE);
    }
}

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

//! 2D overlay primitives
//!
//! Screen-space drawing that bypasses the 3D pipeline: no depth test, no
//! blending. Everything is clipped to the buffer rectangle first.

use super::{walk_segment, FrameBuffer};
use crate::core::geometry::{rectangle_intersect, segment_clip, Rect, Segment2};
use crate::core::resource::{AsciiFont, Texture};

impl FrameBuffer {
    /// Draw a one-pixel segment
    pub fn draw_segment(&mut self, seg: &Segment2, color: u32) {
        let Some(seg) = segment_clip(&self.rect(), seg) else {
            return;
        };

        let width = self.width;
        walk_segment(&seg, |x, y| {
            self.color[x as usize + y as usize * width] = color;
        });
    }

    /// Fill `[x1, x2) × [y1, y2)`
    pub fn draw_rectangle(&mut self, rect: &Rect, color: u32) {
        let Some(r) = rectangle_intersect(rect, &self.rect()) else {
            return;
        };
        if r.x1 >= r.x2 || r.y1 >= r.y2 {
            return;
        }

        for y in r.y1..r.y2 {
            let row = y as usize * self.width;
            self.color[row + r.x1 as usize..row + r.x2 as usize].fill(color);
        }
    }

    /// Copy part of a texture to the buffer
    ///
    /// # Arguments
    ///
    /// * `texture` - Source texels
    /// * `src` - Source rectangle in texel coordinates (`x2`/`y2` exclusive)
    /// * `dx`, `dy` - Destination of the source rectangle's top-left corner
    /// * `color_key` - Texels equal to this color are skipped. The key is
    ///   only active when its alpha byte is non-zero and is compared as an
    ///   opaque color.
    pub fn draw_texture(
        &mut self,
        texture: &Texture,
        src: &Rect,
        dx: i32,
        dy: i32,
        color_key: Option<u32>,
    ) {
        let tex_rect = Rect::from_size(texture.width() as i32, texture.height() as i32);
        let Some(mut s) = rectangle_intersect(&tex_rect, src) else {
            return;
        };

        // Shift the destination by however much the source shrank
        let d = Rect::new(
            dx + (s.x1 - src.x1),
            dy + (s.y1 - src.y1),
            dx + src.width() + (s.x2 - src.x2),
            dy + src.height() + (s.y2 - src.y2),
        );

        let Some(r) = rectangle_intersect(&d, &self.rect()) else {
            return;
        };

        s.x1 += r.x1 - d.x1;
        s.y1 += r.y1 - d.y1;
        s.x2 += r.x2 - d.x2;
        s.y2 += r.y2 - d.y2;

        let key = color_key
            .filter(|k| k & 0xff00_0000 != 0)
            .map(|k| k | 0xff00_0000);
        let texels = texture.texels();
        let tw = texture.width();

        for (sy, y) in (s.y1..s.y2).zip(r.y1..r.y2) {
            let src_row = sy as usize * tw;
            let dst_row = y as usize * self.width;
            for (sx, x) in (s.x1..s.x2).zip(r.x1..r.x2) {
                let c = texels[src_row + sx as usize];
                if key != Some(c) {
                    self.color[dst_row + x as usize] = c;
                }
            }
        }
    }

    /// Draw ASCII text on a fixed character grid
    ///
    /// Glyphs are laid out left to right in rows of `columns` characters,
    /// wrapping to a new row of height `font.glyph_height()`, for at most
    /// `rows` rows. Drawing stops at the end of `text`. Background texels of
    /// the glyph sheet are keyed out.
    pub fn draw_ascii_string(
        &mut self,
        font: &AsciiFont,
        columns: usize,
        rows: usize,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let gw = font.glyph_width() as i32;
        let gh = font.glyph_height() as i32;
        let key = AsciiFont::key_for(font.color());

        let cells = (0..rows).flat_map(|cy| (0..columns).map(move |cx| (cx as i32, cy as i32)));
        for (byte, (cx, cy)) in text.bytes().zip(cells) {
            let glyph = Rect::new(byte as i32 * gw, 0, byte as i32 * gw + gw, gh);
            self.draw_texture(font.sheet(), &glyph, x + gw * cx, y + gh * cy, Some(key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::color::{BLACK, RED, WHITE};
    use crate::core::resource::font::GLYPH_COUNT;

    #[test]
    fn test_rectangle_clipped_to_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_rectangle(&Rect::new(-2, 2, 10, 10), RED);
        assert_eq!(fb.pixel(0, 1), Some(BLACK));
        assert_eq!(fb.pixel(0, 2), Some(RED));
        assert_eq!(fb.pixel(3, 3), Some(RED));
    }

    #[test]
    fn test_segment_clipped_to_buffer() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_segment(&Segment2::new(-10, 3, 20, 3), WHITE);
        assert!((0..8).all(|x| fb.pixel(x, 3) == Some(WHITE)));
        assert_eq!(fb.pixel(0, 2), Some(BLACK));
    }

    #[test]
    fn test_texture_partial_blit_with_key() {
        let texture = Texture::new(2, 2, vec![RED, WHITE, WHITE, RED]).unwrap();
        let mut fb = FrameBuffer::new(3, 3);
        // Source hangs off the left of the texture
        fb.draw_texture(&texture, &Rect::new(-1, 0, 2, 2), 0, 0, Some(WHITE));

        // Texel (0,0) lands at x = 1 after the left shrink
        assert_eq!(fb.pixel(1, 0), Some(RED));
        assert_eq!(fb.pixel(2, 0), Some(BLACK));
        assert_eq!(fb.pixel(1, 1), Some(BLACK));
        assert_eq!(fb.pixel(2, 1), Some(RED));
        assert_eq!(fb.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn test_texture_key_requires_alpha() {
        let texture = Texture::new(1, 1, vec![0xff12_3456]).unwrap();
        let mut fb = FrameBuffer::new(1, 1);
        fb.draw_texture(&texture, &Rect::new(0, 0, 1, 1), 0, 0, Some(0x0012_3456));
        assert_eq!(fb.pixel(0, 0), Some(0xff12_3456));
    }

    #[test]
    fn test_ascii_string_uses_glyph_cells() {
        // Glyph 'A' is solid ink, every other glyph is empty
        let gw = 2;
        let mut coverage = vec![BLACK; GLYPH_COUNT * gw];
        let a = b'A' as usize * gw;
        coverage[a] = WHITE;
        coverage[a + 1] = WHITE;
        let sheet = Texture::new(GLYPH_COUNT * gw, 1, coverage).unwrap();
        let font = AsciiFont::from_sheet(gw, 1, RED, &sheet).unwrap();

        let mut fb = FrameBuffer::new(6, 2);
        fb.draw_ascii_string(&font, 2, 2, 0, 0, "BAA");

        // "B" keyed out, "A" at column 1, second "A" wraps to row 1
        assert_eq!(fb.pixel(0, 0), Some(BLACK));
        assert_eq!(fb.pixel(2, 0), Some(RED));
        assert_eq!(fb.pixel(3, 0), Some(RED));
        assert_eq!(fb.pixel(0, 1), Some(RED));
        assert_eq!(fb.pixel(4, 0), Some(BLACK));
    }
}

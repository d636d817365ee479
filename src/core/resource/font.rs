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

//! ASCII bitmap font
//!
//! Glyphs live side by side in a single texture row: the glyph for byte `b`
//! occupies `x = b * glyph_width .. (b + 1) * glyph_width`. Ink pixels carry
//! the font color and background pixels carry its complement, which the text
//! blitter uses as a color key.

use std::path::Path;

use super::color::{blue, green, red};
use super::texture::Texture;
use crate::core::error::ResourceError;

/// Number of glyph cells a sheet must provide
pub const GLYPH_COUNT: usize = 128;

/// Fixed-size ASCII font backed by a glyph sheet
#[derive(Debug, Clone)]
pub struct AsciiFont {
    glyph_width: usize,
    glyph_height: usize,
    color: u32,
    sheet: Texture,
}

impl AsciiFont {
    /// Build a font from a coverage sheet
    ///
    /// Any texel with a non-black RGB value in `coverage` is ink. The sheet
    /// is recolored so ink becomes `color` and everything else becomes the
    /// color key `!color | 0xff000000`.
    ///
    /// # Errors
    ///
    /// Fails when the glyph size is zero or the sheet is smaller than
    /// [`GLYPH_COUNT`] glyphs of that size.
    pub fn from_sheet(
        glyph_width: usize,
        glyph_height: usize,
        color: u32,
        coverage: &Texture,
    ) -> Result<Self, ResourceError> {
        if glyph_width == 0 || glyph_height == 0 {
            return Err(ResourceError::InvalidFont(format!(
                "glyph size {}x{}",
                glyph_width, glyph_height
            )));
        }
        if coverage.width() < glyph_width * GLYPH_COUNT || coverage.height() < glyph_height {
            return Err(ResourceError::InvalidFont(format!(
                "sheet {}x{} too small for {} glyphs of {}x{}",
                coverage.width(),
                coverage.height(),
                GLYPH_COUNT,
                glyph_width,
                glyph_height
            )));
        }

        let ink = color | 0xff00_0000;
        let key = Self::key_for(color);
        let mut sheet = coverage.clone();
        for texel in sheet.texels_mut() {
            let lit = red(*texel) | green(*texel) | blue(*texel) != 0;
            *texel = if lit { ink } else { key };
        }

        Ok(Self {
            glyph_width,
            glyph_height,
            color,
            sheet,
        })
    }

    /// Load a coverage sheet from an image file
    pub fn load<P: AsRef<Path>>(
        path: P,
        glyph_width: usize,
        glyph_height: usize,
        color: u32,
    ) -> Result<Self, ResourceError> {
        let coverage = Texture::load(path)?;
        Self::from_sheet(glyph_width, glyph_height, color, &coverage)
    }

    /// Color key that marks background texels for `color`
    #[inline]
    pub fn key_for(color: u32) -> u32 {
        !color | 0xff00_0000
    }

    #[inline]
    pub fn glyph_width(&self) -> usize {
        self.glyph_width
    }

    #[inline]
    pub fn glyph_height(&self) -> usize {
        self.glyph_height
    }

    #[inline]
    pub fn color(&self) -> u32 {
        self.color
    }

    #[inline]
    pub fn sheet(&self) -> &Texture {
        &self.sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::color::{BLACK, WHITE};

    #[test]
    fn test_from_sheet_recolors() {
        let mut texels = vec![BLACK; GLYPH_COUNT * 2];
        texels[0] = 0xff01_0000;
        let coverage = Texture::new(GLYPH_COUNT * 2, 1, texels).unwrap();

        let font = AsciiFont::from_sheet(2, 1, WHITE, &coverage).unwrap();
        assert_eq!(font.sheet().texels()[0], WHITE);
        assert_eq!(font.sheet().texels()[1], AsciiFont::key_for(WHITE));
        assert_eq!(AsciiFont::key_for(WHITE), BLACK);
    }

    #[test]
    fn test_from_sheet_rejects_small_sheet() {
        let coverage = Texture::new(8, 8, vec![0; 64]).unwrap();
        assert!(AsciiFont::from_sheet(8, 8, WHITE, &coverage).is_err());
        assert!(AsciiFont::from_sheet(0, 8, WHITE, &coverage).is_err());
    }
}

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

//! Integer screen-space geometry
//!
//! Rectangles and 2D segments in pixel coordinates, plus the two clipping
//! primitives every raster path goes through:
//!
//! - [`rectangle_intersect`]: inclusive overlap test, result clamped to the
//!   second rectangle
//! - [`segment_clip`]: Cohen–Sutherland clip of a segment to a rectangle
//!
//! # Conventions
//!
//! A [`Rect`] stores `x1, y1, x2, y2`. Raster loops treat `x2`/`y2` as
//! exclusive, but the overlap test compares them inclusively, so two
//! rectangles that only touch along an edge still "intersect".
//!
//! # References
//!
//! - [Cohen–Sutherland algorithm](https://en.wikipedia.org/wiki/Cohen%E2%80%93Sutherland_algorithm)

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Create a rectangle from its two corners
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle `[0, width) × [0, height)`
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Horizontal extent
    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Vertical extent
    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// Integer 2D segment between `(x1, y1)` and `(x2, y2)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segment2 {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment2 {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Intersect `r1` with `r2`
///
/// Returns `None` when the rectangles do not overlap. Edges are compared
/// inclusively. On overlap the result is `r1` with each side clamped into
/// `r2`.
///
/// # Examples
///
/// ```
/// use raster3d::core::geometry::{rectangle_intersect, Rect};
///
/// let r = rectangle_intersect(&Rect::new(-10, -10, 50, 50), &Rect::new(0, 0, 20, 20));
/// assert_eq!(r, Some(Rect::new(0, 0, 20, 20)));
///
/// assert_eq!(rectangle_intersect(&Rect::new(30, 0, 40, 5), &Rect::new(0, 0, 20, 20)), None);
/// ```
pub fn rectangle_intersect(r1: &Rect, r2: &Rect) -> Option<Rect> {
    if r1.x1 > r2.x2 || r2.x1 > r1.x2 || r1.y1 > r2.y2 || r2.y1 > r1.y2 {
        return None;
    }

    Some(Rect {
        x1: r1.x1.max(r2.x1),
        y1: r1.y1.max(r2.y1),
        x2: r1.x2.min(r2.x2),
        y2: r1.y2.min(r2.y2),
    })
}

/// Outcode bits
const AREA_N: u8 = 0x01;
const AREA_S: u8 = 0x02;
const AREA_W: u8 = 0x04;
const AREA_E: u8 = 0x08;

#[inline]
fn outcode(rect: &Rect, x: i32, y: i32) -> u8 {
    let mut code = 0;
    if x < rect.x1 {
        code |= AREA_W;
    } else if x >= rect.x2 {
        code |= AREA_E;
    }
    if y < rect.y1 {
        code |= AREA_N;
    } else if y >= rect.y2 {
        code |= AREA_S;
    }
    code
}

/// X on the original line at row `y`
#[inline]
fn x_at(seg: &Segment2, y: i32) -> i32 {
    (seg.x1 as f32 + (y - seg.y1) as f32 * (seg.x2 - seg.x1) as f32 / (seg.y2 - seg.y1) as f32)
        as i32
}

/// Y on the original line at column `x`
#[inline]
fn y_at(seg: &Segment2, x: i32) -> i32 {
    (seg.y1 as f32 + (x - seg.x1) as f32 * (seg.y2 - seg.y1) as f32 / (seg.x2 - seg.x1) as f32)
        as i32
}

#[inline]
fn inside(rect: &Rect, x: i32, y: i32) -> bool {
    x >= rect.x1 && x < rect.x2 && y >= rect.y1 && y < rect.y2
}

/// Move one endpoint with outcode `code` onto the rectangle border
///
/// Every cut is computed against the original segment so the two endpoints
/// stay on the same line. Corner codes try the vertical border first and
/// fall back to the horizontal one when the result leaves the y range.
fn clip_endpoint(rect: &Rect, seg: &Segment2, code: u8, x: i32, y: i32) -> (i32, i32) {
    let north = || (x_at(seg, rect.y1), rect.y1);
    let south = || (x_at(seg, rect.y2 - 1), rect.y2 - 1);
    let west = || (rect.x1, y_at(seg, rect.x1));
    let east = || (rect.x2 - 1, y_at(seg, rect.x2 - 1));
    let out_of_rows = |py: i32| py < rect.y1 || py >= rect.y2;

    match code {
        AREA_N => north(),
        AREA_S => south(),
        AREA_W => west(),
        AREA_E => east(),
        c if c == AREA_E | AREA_N || c == AREA_E | AREA_S => {
            let p = east();
            match (out_of_rows(p.1), c & AREA_N != 0) {
                (false, _) => p,
                (true, true) => north(),
                (true, false) => south(),
            }
        }
        c if c == AREA_W | AREA_N || c == AREA_W | AREA_S => {
            let p = west();
            match (out_of_rows(p.1), c & AREA_N != 0) {
                (false, _) => p,
                (true, true) => north(),
                (true, false) => south(),
            }
        }
        _ => (x, y),
    }
}

/// Clip a segment to a rectangle (Cohen–Sutherland)
///
/// # Arguments
///
/// * `rect` - Clip rectangle; `x2` and `y2` are exclusive
/// * `seg` - Segment to clip
///
/// # Returns
///
/// The clipped segment, or `None` when no part of it lies inside `rect`.
///
/// # Examples
///
/// ```
/// use raster3d::core::geometry::{segment_clip, Rect, Segment2};
///
/// let rect = Rect::new(0, 0, 100, 100);
/// let clipped = segment_clip(&rect, &Segment2::new(-50, 50, 150, 50)).unwrap();
/// assert_eq!(clipped, Segment2::new(0, 50, 99, 50));
///
/// assert!(segment_clip(&rect, &Segment2::new(-10, -10, -5, 200)).is_none());
/// ```
pub fn segment_clip(rect: &Rect, seg: &Segment2) -> Option<Segment2> {
    let a1 = outcode(rect, seg.x1, seg.y1);
    let a2 = outcode(rect, seg.x2, seg.y2);

    if a1 == 0 && a2 == 0 {
        return Some(*seg);
    }

    // Both endpoints share an outside half-plane
    if a1 & a2 != 0 {
        return None;
    }

    let (x1, y1) = clip_endpoint(rect, seg, a1, seg.x1, seg.y1);
    if !inside(rect, x1, y1) {
        return None;
    }

    let (x2, y2) = clip_endpoint(rect, seg, a2, seg.x2, seg.y2);
    if !inside(rect, x2, y2) {
        return None;
    }

    Some(Segment2 { x1, y1, x2, y2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_touching_edges_counts() {
        let r = rectangle_intersect(&Rect::new(10, 0, 20, 10), &Rect::new(0, 0, 10, 10));
        assert_eq!(r, Some(Rect::new(10, 0, 10, 10)));
    }

    #[test]
    fn test_intersect_contained() {
        let inner = Rect::new(5, 5, 8, 8);
        assert_eq!(
            rectangle_intersect(&inner, &Rect::new(0, 0, 10, 10)),
            Some(inner)
        );
    }

    #[test]
    fn test_clip_inside_is_unchanged() {
        let seg = Segment2::new(1, 2, 30, 40);
        assert_eq!(segment_clip(&Rect::new(0, 0, 50, 50), &seg), Some(seg));
    }

    #[test]
    fn test_clip_vertical_through_rect() {
        let rect = Rect::new(0, 0, 10, 10);
        let clipped = segment_clip(&rect, &Segment2::new(5, -20, 5, 20)).unwrap();
        assert_eq!(clipped, Segment2::new(5, 0, 5, 9));
    }

    #[test]
    fn test_clip_corner_falls_back_to_row() {
        // Starts north-west; the west cut lands above the rect so the north cut wins
        let rect = Rect::new(0, 0, 100, 100);
        let clipped = segment_clip(&rect, &Segment2::new(-10, -110, 10, 90)).unwrap();
        assert_eq!(clipped, Segment2::new(1, 0, 10, 90));
    }

    #[test]
    fn test_clip_miss_across_corner() {
        // Passes outside the top-left corner without entering
        let rect = Rect::new(0, 0, 10, 10);
        assert!(segment_clip(&rect, &Segment2::new(-5, 3, 3, -5)).is_none());
    }

    #[test]
    fn test_clip_shared_region_rejects() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(segment_clip(&rect, &Segment2::new(20, 1, 30, 8)).is_none());
    }
}

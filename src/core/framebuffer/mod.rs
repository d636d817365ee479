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

//! Frame buffer
//!
//! Owns the color and depth planes the pipeline draws into.
//!
//! # Layout
//!
//! Both planes are `width × height` cells stored row-major, top row first:
//! `index = x + y * width`.
//!
//! - Color cells are packed `0xAARRGGBB`.
//! - Depth cells hold **reciprocal** depth `1/z`. Larger means nearer, so
//!   a cleared buffer holds `1/far` and a fragment passes the depth test
//!   when its `1/z` is greater than the stored value.
//!
//! The 2D primitives in [`draw2d`] draw straight into the color plane and
//! ignore depth.

pub mod draw2d;

use crate::core::geometry::{Rect, Segment2};

/// Color and reciprocal-depth planes
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    color: Vec<u32>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    /// Allocate a black buffer with zero depth
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color: vec![0xff00_0000; size],
            depth: vec![0.0; size],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in each plane
    #[inline]
    pub fn len(&self) -> usize {
        self.color.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.color.is_empty()
    }

    /// `[0, width) × [0, height)`
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn color(&self) -> &[u32] {
        &self.color
    }

    #[inline]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Both planes, mutably, for the rasterizer
    #[inline]
    pub(crate) fn planes_mut(&mut self) -> (&mut [u32], &mut [f32]) {
        (&mut self.color, &mut self.depth)
    }

    /// Color at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index_of(x, y).map(|i| self.color[i])
    }

    /// Depth at `(x, y)`, or `None` outside the buffer
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index_of(x, y).map(|i| self.depth[i])
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(x as usize + y as usize * self.width)
    }

    pub fn fill_color(&mut self, color: u32) {
        self.color.fill(color);
    }

    pub fn fill_depth(&mut self, depth: f32) {
        self.depth.fill(depth);
    }
}

/// Walk a segment with Bresenham's algorithm
///
/// Calls `plot(x, y)` for every pixel from `(x1, y1)` to `(x2, y2)`
/// inclusive, stepping one pixel per call along the dominant axis. Ties
/// (`|dx| == |dy|`) step along y.
///
/// # Algorithm
///
/// With `dx >= dy` the decision value starts at `p = 2dy - dx`. After each
/// pixel, `p >= 0` moves one row and subtracts `2dx`; every step adds
/// `2dy`. The y-major case swaps the roles.
pub(crate) fn walk_segment(seg: &Segment2, mut plot: impl FnMut(i32, i32)) {
    let (mut x, mut y) = (seg.x1, seg.y1);

    let dx = (seg.x2 - seg.x1).abs();
    let dy = (seg.y2 - seg.y1).abs();
    let step_x = if seg.x2 < seg.x1 { -1 } else { 1 };
    let step_y = if seg.y2 < seg.y1 { -1 } else { 1 };

    let dx2 = dx << 1;
    let dy2 = dy << 1;

    if dx > dy {
        let mut p = dy2 - dx;
        for _ in 0..=dx {
            plot(x, y);
            if p >= 0 {
                y += step_y;
                p -= dx2;
            }
            x += step_x;
            p += dy2;
        }
    } else {
        let mut p = dx2 - dy;
        for _ in 0..=dy {
            plot(x, y);
            if p >= 0 {
                x += step_x;
                p -= dy2;
            }
            y += step_y;
            p += dx2;
        }
    }
}

/// Number of pixels [`walk_segment`] visits minus one
#[inline]
pub(crate) fn segment_steps(seg: &Segment2) -> i32 {
    (seg.x2 - seg.x1).abs().max((seg.y2 - seg.y1).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sizes_both_planes() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.len(), 12);
        assert_eq!(fb.depth().len(), 12);
        assert_eq!(fb.rect(), Rect::new(0, 0, 4, 3));
    }

    #[test]
    fn test_pixel_bounds() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.fill_color(7);
        assert_eq!(fb.pixel(1, 1), Some(7));
        assert_eq!(fb.pixel(2, 0), None);
        assert_eq!(fb.pixel(-1, 0), None);
    }

    #[test]
    fn test_walk_segment_endpoints_inclusive() {
        let mut points = Vec::new();
        walk_segment(&Segment2::new(0, 0, 4, 2), |x, y| points.push((x, y)));
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(4, 2)));
    }

    #[test]
    fn test_walk_segment_reverse_and_steep() {
        let mut points = Vec::new();
        walk_segment(&Segment2::new(3, 9, 1, 0), |x, y| points.push((x, y)));
        assert_eq!(points.len(), 10);
        assert_eq!(points.first(), Some(&(3, 9)));
        assert_eq!(points.last(), Some(&(1, 0)));
        assert!(points.windows(2).all(|w| w[1].1 == w[0].1 - 1));
    }

    #[test]
    fn test_walk_single_point() {
        let mut count = 0;
        walk_segment(&Segment2::new(5, 5, 5, 5), |_, _| count += 1);
        assert_eq!(count, 1);
    }
}

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

//! Triangle classification
//!
//! Splits a filled triangle into at most two flat-edged parts the scanline
//! walker can handle: a flat-bottom part whose top is a single point, and a
//! flat-top part whose bottom is a single point.
//!
//! ```text
//!        top                 flat-bottom: lt = rt = top
//!        /\                               lb, rb = split / mid
//!       /  \
//!  split----mid              flat-top:    lt, rt = split / mid
//!       \  |                              lb = rb = bot
//!        \ |
//!         bot
//! ```

use super::fill::{VertexData, MAX_FIELDS};
use crate::core::math::float::{flt_equal, flt_less};

/// Slot of the split vertex in the four-entry tuple array
pub const SPLIT: usize = 3;

/// Corners of a flat part, as slots into the tuple array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTriangle {
    pub left_top: usize,
    pub right_top: usize,
    pub left_bottom: usize,
    pub right_bottom: usize,
}

impl FlatTriangle {
    const fn new(left_top: usize, right_top: usize, left_bottom: usize, right_bottom: usize) -> Self {
        Self {
            left_top,
            right_top,
            left_bottom,
            right_bottom,
        }
    }
}

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classified {
    pub flat_bottom: Option<FlatTriangle>,
    pub flat_top: Option<FlatTriangle>,
}

impl Classified {
    /// bit 0 = flat-bottom part present, bit 1 = flat-top part present
    pub fn mask(&self) -> u8 {
        self.flat_bottom.is_some() as u8 | (self.flat_top.is_some() as u8) << 1
    }

    /// Parts in raster order
    pub fn parts(&self) -> impl Iterator<Item = FlatTriangle> {
        self.flat_bottom.into_iter().chain(self.flat_top)
    }
}

/// Classify a filled triangle
///
/// # Arguments
///
/// * `data` - Slots 0..3 hold the filled corners; slot [`SPLIT`] receives
///   the split vertex when one is needed
/// * `field_count` - Meaningful fields per tuple
///
/// # Algorithm
///
/// 1. Coincident or collinear corners produce nothing.
/// 2. Corners with three distinct `y` are sorted top to bottom. The split
///    vertex lies on the long edge at the middle corner's `y`; every other
///    field is interpolated by the truncated row offsets. Whichever of split
///    and middle is further left becomes the left edge of both parts.
/// 3. With two equal `y`, the pair forms the flat edge and the third corner
///    the apex; the apex above gives a flat-bottom part, below a flat-top.
pub fn classify(data: &mut [VertexData; 4], field_count: usize) -> Classified {
    let [d0, d1, d2] = [&data[0], &data[1], &data[2]];

    if flt_equal(d0[1], d1[1])
        && flt_equal(d1[1], d2[1])
        && flt_equal(d0[0], d1[0])
        && flt_equal(d1[0], d2[0])
    {
        return Classified::default();
    }

    if flt_equal(
        (d0[0] - d1[0]) * (d1[1] - d2[1]),
        (d1[0] - d2[0]) * (d0[1] - d1[1]),
    ) {
        return Classified::default();
    }

    let distinct_y =
        !flt_equal(d0[0], d1[0]) && !flt_equal(d1[0], d2[0]) && !flt_equal(d2[0], d0[0]);

    if distinct_y {
        classify_general(data, field_count)
    } else {
        classify_flat(data)
    }
}

fn classify_general(data: &mut [VertexData; 4], field_count: usize) -> Classified {
    let mut order = [0, 1, 2];
    for i in (1..3).rev() {
        for j in 0..i {
            if data[order[j]][0] > data[order[j + 1]][0] {
                order.swap(j, j + 1);
            }
        }
    }
    let [top, mid, bot] = order;

    let y = data[mid][0];
    let y_offset_tb = (data[bot][0] as i32 - data[top][0] as i32) as f32;
    let y_offset_tm = (y as i32 - data[top][0] as i32) as f32;

    let mut split = [0.0; MAX_FIELDS];
    split[0] = y;
    for i in 1..field_count {
        let change = (data[bot][i] - data[top][i]) / y_offset_tb;
        split[i] = data[top][i] + y_offset_tm * change;
    }
    data[SPLIT] = split;

    if flt_less(data[SPLIT][1], data[mid][1]) {
        Classified {
            flat_bottom: Some(FlatTriangle::new(top, top, SPLIT, mid)),
            flat_top: Some(FlatTriangle::new(SPLIT, mid, bot, bot)),
        }
    } else {
        Classified {
            flat_bottom: Some(FlatTriangle::new(top, top, mid, SPLIT)),
            flat_top: Some(FlatTriangle::new(mid, SPLIT, bot, bot)),
        }
    }
}

fn classify_flat(data: &[VertexData; 4]) -> Classified {
    let (left, centre, right) = if flt_equal(data[0][0], data[1][0]) {
        if flt_less(data[0][1], data[1][1]) {
            (0, 2, 1)
        } else {
            (1, 2, 0)
        }
    } else if flt_equal(data[1][0], data[2][0]) {
        if flt_less(data[1][1], data[2][1]) {
            (1, 0, 2)
        } else {
            (2, 0, 1)
        }
    } else if flt_less(data[2][1], data[0][1]) {
        (2, 1, 0)
    } else {
        (0, 1, 2)
    };

    if flt_less(data[centre][0], data[left][0]) {
        Classified {
            flat_bottom: Some(FlatTriangle::new(centre, centre, left, right)),
            flat_top: None,
        }
    } else {
        Classified {
            flat_bottom: None,
            flat_top: Some(FlatTriangle::new(left, right, centre, centre)),
        }
    }
}

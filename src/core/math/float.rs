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

//! Scaled-integer float comparisons
//!
//! Every comparison in the pipeline that decides *which side* of something a
//! value falls on (near plane, depth buffer, degenerate triangles) goes through
//! these helpers instead of raw `<` / `==`.
//!
//! Both operands are multiplied by [`FLT_DECIMAL_DIGITS`] and **truncated**
//! toward zero into an `i64` before comparing. Truncation is not rounding:
//! `0.0000009` and `-0.0000009` both compare equal to zero. Near-plane
//! classification relies on this exact tie-breaking, so do not replace these
//! with an epsilon test.

/// Fixed decimal precision used by every comparison (six decimal places)
pub const FLT_DECIMAL_DIGITS: f32 = 1_000_000.0;

#[inline(always)]
fn scaled(value: f32) -> i64 {
    (value * FLT_DECIMAL_DIGITS) as i64
}

/// `value` truncates to zero at six decimal places
///
/// # Examples
///
/// ```
/// use raster3d::core::math::float::flt_equal_zero;
///
/// assert!(flt_equal_zero(0.0000009));
/// assert!(flt_equal_zero(-0.0000009));
/// assert!(!flt_equal_zero(0.00001));
/// ```
#[inline(always)]
pub fn flt_equal_zero(value: f32) -> bool {
    scaled(value) == 0
}

/// `a < b` after truncation
#[inline(always)]
pub fn flt_less(a: f32, b: f32) -> bool {
    scaled(a) < scaled(b)
}

/// `a == b` after truncation
#[inline(always)]
pub fn flt_equal(a: f32, b: f32) -> bool {
    scaled(a) == scaled(b)
}

/// `a <= b` after truncation
#[inline(always)]
pub fn flt_less_equal(a: f32, b: f32) -> bool {
    scaled(a) <= scaled(b)
}

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

//! Custom assertions for frame buffer testing

use raster3d::core::framebuffer::FrameBuffer;

#[allow(dead_code)]
pub fn assert_pixel(frame: &FrameBuffer, x: i32, y: i32, expected: u32) {
    let actual = frame.pixel(x, y);
    assert_eq!(
        actual,
        Some(expected),
        "Pixel ({}, {}) mismatch: expected 0x{:08X}, got {:08X?}",
        x,
        y,
        expected,
        actual
    );
}

#[allow(dead_code)]
pub fn assert_depth(frame: &FrameBuffer, x: i32, y: i32, expected: f32) {
    let actual = frame.depth_at(x, y);
    assert_eq!(
        actual,
        Some(expected),
        "Depth at ({}, {}) mismatch: expected {}, got {:?}",
        x,
        y,
        expected,
        actual
    );
}

#[allow(dead_code)]
pub fn assert_all_pixels(frame: &FrameBuffer, expected: u32) {
    if let Some((i, &c)) = frame.color().iter().enumerate().find(|(_, &c)| c != expected) {
        panic!(
            "Pixel ({}, {}) is 0x{:08X}, expected every pixel to be 0x{:08X}",
            i % frame.width(),
            i / frame.width(),
            c,
            expected
        );
    }
}

#[allow(dead_code)]
pub fn count_pixels(frame: &FrameBuffer, color: u32) -> usize {
    frame.color().iter().filter(|&&c| c == color).count()
}

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

//! Frame capture
//!
//! Snapshots of a rendered frame, for regression comparisons and for
//! looking at the depth plane after the fact.
//!
//! # Capture Format
//!
//! Captures are serialized using bincode. A capture holds:
//! - Metadata (timestamp, frame index, buffer size)
//! - The packed ARGB color plane
//! - The `1/z` depth plane
//!
//! # Version Compatibility
//!
//! Captures carry a version number; loading a capture with a different
//! version fails.
//!
//! # Example
//!
//! ```no_run
//! use raster3d::core::capture::FrameCapture;
//! use raster3d::core::config::RendererConfig;
//! use raster3d::core::pipeline::Renderer;
//!
//! let renderer = Renderer::new(&RendererConfig::default()).unwrap();
//! // ... draw ...
//!
//! let capture = FrameCapture::from_frame(renderer.frame(), 0);
//! capture.save_to_file("frame.cap").unwrap();
//! capture.export_png("frame.png").unwrap();
//!
//! let loaded = FrameCapture::load_from_file("frame.cap").unwrap();
//! assert_eq!(loaded.color, capture.color);
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use bincode::{config, Decode, Encode};
use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};

use crate::core::error::{RenderError, ResourceError, Result};
use crate::core::framebuffer::FrameBuffer;
use crate::core::resource::color::{blue, green, red};

/// Capture format version
///
/// Incremented whenever the encoded layout changes.
pub const CAPTURE_VERSION: u32 = 1;

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct FrameCapture {
    /// Version number for compatibility checking
    pub version: u32,

    pub metadata: CaptureMetadata,

    /// Row-major packed ARGB pixels
    pub color: Vec<u32>,

    /// Row-major `1/z` values
    pub depth: Vec<f32>,
}

/// When and what was captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct CaptureMetadata {
    /// Timestamp when the capture was taken
    #[bincode(with_serde)]
    pub created_at: DateTime<Utc>,

    /// Index of the frame within its run
    pub frame_index: u64,

    pub width: u32,
    pub height: u32,
}

impl FrameCapture {
    /// Copy both planes of a frame buffer
    pub fn from_frame(frame: &FrameBuffer, frame_index: u64) -> Self {
        Self {
            version: CAPTURE_VERSION,
            metadata: CaptureMetadata {
                created_at: Utc::now(),
                frame_index,
                width: frame.width() as u32,
                height: frame.height() as u32,
            },
            color: frame.color().to_vec(),
            depth: frame.depth().to_vec(),
        }
    }

    /// Save capture to file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Encoding fails
    /// - The file cannot be created or written
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = config::standard();
        let encoded =
            bincode::encode_to_vec(self, config).map_err(|e| RenderError::Capture(e.to_string()))?;

        let mut file = File::create(path.as_ref())?;
        file.write_all(&encoded)?;

        log::debug!(
            "Saved capture of frame {} ({} bytes) to {}",
            self.metadata.frame_index,
            encoded.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load capture from file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file cannot be opened or read
    /// - Decoding fails
    /// - The version differs from [`CAPTURE_VERSION`]
    /// - The planes do not match the recorded size
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        let config = config::standard();
        let (capture, _): (FrameCapture, usize) = bincode::decode_from_slice(&buffer, config)
            .map_err(|e| RenderError::Capture(e.to_string()))?;

        if capture.version != CAPTURE_VERSION {
            return Err(RenderError::Capture(format!(
                "Incompatible capture version: expected {}, got {}",
                CAPTURE_VERSION, capture.version
            )));
        }

        let len = capture.metadata.width as usize * capture.metadata.height as usize;
        if capture.color.len() != len || capture.depth.len() != len {
            return Err(RenderError::Capture(format!(
                "Plane size mismatch: {}x{} with {} color and {} depth values",
                capture.metadata.width,
                capture.metadata.height,
                capture.color.len(),
                capture.depth.len()
            )));
        }

        Ok(capture)
    }

    /// Write the color plane as an RGB PNG
    pub fn export_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_png(
            &self.color,
            self.metadata.width,
            self.metadata.height,
            path.as_ref(),
        )
    }
}

/// Write a frame buffer's color plane as an RGB PNG
pub fn export_png<P: AsRef<Path>>(frame: &FrameBuffer, path: P) -> Result<()> {
    write_png(
        frame.color(),
        frame.width() as u32,
        frame.height() as u32,
        path.as_ref(),
    )
}

fn write_png(color: &[u32], width: u32, height: u32, path: &Path) -> Result<()> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        let c = color[(y * width + x) as usize];
        image::Rgb([red(c), green(c), blue(c)])
    });

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(ResourceError::from)?;

    log::info!("Wrote {}x{} frame to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::color::{pack_rgb, RED};

    fn sample_frame() -> FrameBuffer {
        let mut frame = FrameBuffer::new(4, 3);
        frame.fill_color(RED);
        frame.fill_depth(0.5);
        frame
    }

    #[test]
    fn test_capture_version() {
        assert_eq!(CAPTURE_VERSION, 1);
    }

    #[test]
    fn test_from_frame() {
        let capture = FrameCapture::from_frame(&sample_frame(), 7);

        assert_eq!(capture.version, CAPTURE_VERSION);
        assert_eq!(capture.metadata.frame_index, 7);
        assert_eq!((capture.metadata.width, capture.metadata.height), (4, 3));
        assert_eq!(capture.color, vec![RED; 12]);
        assert_eq!(capture.depth, vec![0.5; 12]);
    }

    #[test]
    fn test_save_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.cap");

        let capture = FrameCapture::from_frame(&sample_frame(), 3);
        capture.save_to_file(&path).unwrap();

        let loaded = FrameCapture::load_from_file(&path).unwrap();
        assert_eq!(loaded, capture);
    }

    #[test]
    fn test_version_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.cap");

        let mut capture = FrameCapture::from_frame(&sample_frame(), 0);
        capture.version = 999;
        capture.save_to_file(&path).unwrap();

        let result = FrameCapture::load_from_file(&path);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Incompatible capture version"));
        }
    }

    #[test]
    fn test_plane_size_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.cap");

        let mut capture = FrameCapture::from_frame(&sample_frame(), 0);
        capture.depth.pop();
        capture.save_to_file(&path).unwrap();

        assert!(matches!(
            FrameCapture::load_from_file(&path),
            Err(RenderError::Capture(_))
        ));
    }

    #[test]
    fn test_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.cap");
        std::fs::write(&path, [0xffu8; 3]).unwrap();

        assert!(FrameCapture::load_from_file(&path).is_err());
        assert!(matches!(
            FrameCapture::load_from_file(dir.path().join("missing.cap")),
            Err(RenderError::Io(_))
        ));
    }

    #[test]
    fn test_export_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut frame = sample_frame();
        frame.fill_color(pack_rgb(10, 20, 30));
        export_png(&frame, &path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(2, 1).0, [10, 20, 30]);
    }
}

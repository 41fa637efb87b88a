//! Diagnostic frame dumps.
//!
//! Frames are numbered in the order they are recorded, starting from zero for
//! every recorder, and written as PNG files into a single directory.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{BoundingBox, Contour};

const CONTOUR_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BOUNDS_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Writes intermediate images to numbered files when enabled
#[derive(Debug, Default)]
pub struct FrameRecorder {
    output_dir: Option<PathBuf>,
    counter: usize,
}

impl FrameRecorder {
    /// A recorder that drops every frame
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Record into `output_dir`, creating it if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir: Some(output_dir),
            counter: 0,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.output_dir.is_some()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Number of frames recorded so far
    pub fn frame_count(&self) -> usize {
        self.counter
    }

    /// Save one frame. Failures are logged and otherwise ignored.
    pub fn record(&mut self, label: &str, image: &DynamicImage) {
        let Some(dir) = &self.output_dir else {
            return;
        };

        let filename = format!(
            "{:03}_{}.png",
            self.counter,
            label.to_lowercase().replace(' ', "_")
        );
        let path = dir.join(&filename);
        self.counter += 1;

        match image.save(&path) {
            Ok(()) => debug!(frame = %filename, "frame recorded"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to record frame"),
        }
    }

    /// Record only if enabled, building the frame lazily
    pub fn record_with<F>(&mut self, label: &str, build: F)
    where
        F: FnOnce() -> DynamicImage,
    {
        if self.is_enabled() {
            let frame = build();
            self.record(label, &frame);
        }
    }
}

/// Copy of `img` with every contour outlined
pub fn draw_contours(img: &DynamicImage, contours: &[Contour]) -> DynamicImage {
    let mut canvas: RgbaImage = img.to_rgba8();
    for c in contours {
        let n = c.points.len();
        for i in 0..n {
            let p1 = c.points[i];
            let p2 = c.points[(i + 1) % n];
            draw_line_segment_mut(
                &mut canvas,
                (p1.x as f32, p1.y as f32),
                (p2.x as f32, p2.y as f32),
                CONTOUR_COLOR,
            );
        }
    }
    DynamicImage::ImageRgba8(canvas)
}

/// Copy of `img` with the crop rectangle outlined
pub fn draw_bounds(img: &DynamicImage, bounds: &BoundingBox) -> DynamicImage {
    let mut canvas: RgbaImage = img.to_rgba8();
    if bounds.width > 0 && bounds.height > 0 {
        let rect = Rect::at(bounds.x as i32, bounds.y as i32).of_size(bounds.width, bounds.height);
        draw_hollow_rect_mut(&mut canvas, rect, BOUNDS_COLOR);
    }
    DynamicImage::ImageRgba8(canvas)
}

use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CropError, Result};
use crate::models::BoundingBox;

/// Cut `bounds` out of the image, abandoning crops smaller than `min_area` px²
pub fn crop_to_bounds(
    img: &DynamicImage,
    bounds: &BoundingBox,
    min_area: u64,
) -> Result<DynamicImage> {
    let area = bounds.area();
    if area < min_area {
        return Err(CropError::UndersizedResult {
            area,
            minimum: min_area,
        });
    }

    debug!(
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        "cropping"
    );
    Ok(img.crop_imm(bounds.x, bounds.y, bounds.width, bounds.height))
}

/// Output name for `input` with `cropped` inserted before the extension:
/// `scan.jpg` becomes `scan.cropped.jpg`
pub fn derive_output_path(input: &Path) -> Result<PathBuf> {
    let ext = input
        .extension()
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| CropError::InvalidInputPath(input.to_path_buf()))?;

    let mut cropped_ext = std::ffi::OsString::from("cropped.");
    cropped_ext.push(ext);
    Ok(input.with_extension(cropped_ext))
}

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use tracing::debug;

use crate::models::Contour;

/// Find the external contours of the white regions in a binary mask.
///
/// Holes and regions nested inside holes are skipped.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    let borders = find_contours::<u32>(mask);
    let total = borders.len();

    let external: Vec<Contour> = borders
        .into_iter()
        .filter(|b| b.border_type == BorderType::Outer && b.parent.is_none())
        .filter_map(|b| Contour::from_points(b.points))
        .collect();

    debug!(borders = total, external = external.len(), "contours extracted");
    external
}

use crate::error::{CropError, Result};
use crate::models::{BoundingBox, Contour};

/// Smallest axis-aligned box containing every contour, clamped to the image.
///
/// Fails with [`CropError::DegenerateSelection`] when the contours do not span a
/// positive area, which includes the empty contour list.
pub fn aggregate_bounds(
    contours: &[Contour],
    (width, height): (u32, u32),
) -> Result<BoundingBox> {
    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;

    for contour in contours {
        let bbox = contour.bounding_box();
        min_x = min_x.min(bbox.x);
        min_y = min_y.min(bbox.y);
        max_x = max_x.max(bbox.right());
        max_y = max_y.max(bbox.bottom());
    }

    let max_x = max_x.min(width);
    let max_y = max_y.min(height);
    if min_x >= max_x || min_y >= max_y {
        return Err(CropError::DegenerateSelection);
    }

    Ok(BoundingBox::from_extent(min_x, min_y, max_x, max_y))
}

use tracing::trace;

use crate::config::ContourLimits;
use crate::models::Contour;

/// A single rule a contour must satisfy to count towards the crop
pub trait ContourPredicate: Send + Sync {
    /// Whether the contour passes, given the `(width, height)` of the source image
    fn accepts(&self, contour: &Contour, image_size: (u32, u32)) -> bool;

    /// Human-readable name for this rule (used in trace output)
    fn name(&self) -> &str;
}

/// Reject contours whose bounding box is too narrow or too short
pub struct MinimumSize {
    pub min_width: u32,
    pub min_height: u32,
}

impl ContourPredicate for MinimumSize {
    fn accepts(&self, contour: &Contour, _image_size: (u32, u32)) -> bool {
        contour.width() >= self.min_width && contour.height() >= self.min_height
    }

    fn name(&self) -> &str {
        "minimum size"
    }
}

/// Keep contours whose enclosed area lies strictly between an absolute floor
/// and a fraction of the image area
pub struct AreaRange {
    pub min_area: f64,
    pub max_area_fraction: f64,
}

impl ContourPredicate for AreaRange {
    fn accepts(&self, contour: &Contour, (width, height): (u32, u32)) -> bool {
        let image_area = width as f64 * height as f64;
        let area = contour.area();
        area > self.min_area && area < self.max_area_fraction * image_area
    }

    fn name(&self) -> &str {
        "area range"
    }
}

/// Reject contours that come within `margin` pixels of any border.
///
/// A margin of 0 rejects exactly the contours touching the border.
pub struct EdgeMargin {
    pub margin: u32,
}

impl ContourPredicate for EdgeMargin {
    fn accepts(&self, contour: &Contour, (width, height): (u32, u32)) -> bool {
        let bbox = contour.bounding_box();
        let m = self.margin;
        !(bbox.x <= m
            || bbox.y <= m
            || bbox.right() >= width.saturating_sub(m)
            || bbox.bottom() >= height.saturating_sub(m))
    }

    fn name(&self) -> &str {
        "edge margin"
    }
}

/// Ordered list of predicates; a contour survives only if all accept it
#[derive(Default)]
pub struct ContourFilter {
    predicates: Vec<Box<dyn ContourPredicate>>,
}

impl ContourFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard rule set built from configured limits
    pub fn from_limits(limits: &ContourLimits) -> Self {
        Self::new()
            .with(MinimumSize {
                min_width: limits.min_width,
                min_height: limits.min_height,
            })
            .with(AreaRange {
                min_area: limits.min_area,
                max_area_fraction: limits.max_area_fraction,
            })
            .with(EdgeMargin {
                margin: limits.edge_margin,
            })
    }

    pub fn with(mut self, predicate: impl ContourPredicate + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn accepts(&self, contour: &Contour, image_size: (u32, u32)) -> bool {
        for predicate in &self.predicates {
            if !predicate.accepts(contour, image_size) {
                trace!(
                    rule = predicate.name(),
                    x = contour.min_x,
                    y = contour.min_y,
                    width = contour.width(),
                    height = contour.height(),
                    "contour rejected"
                );
                return false;
            }
        }
        true
    }

    /// Keep only the contours every predicate accepts
    pub fn apply(&self, contours: Vec<Contour>, image_size: (u32, u32)) -> Vec<Contour> {
        contours
            .into_iter()
            .filter(|c| self.accepts(c, image_size))
            .collect()
    }
}

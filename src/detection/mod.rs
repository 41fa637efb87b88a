pub mod bounds;
pub mod contours;
pub mod filters;
pub mod threshold;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, instrument};

use crate::config::CropConfig;
use crate::error::Result;
use crate::models::BoundingBox;
use crate::recorder::{FrameRecorder, draw_bounds, draw_contours};

use self::filters::ContourFilter;

/// Where the photo sits in a scan, and how it was found
#[derive(Debug, Clone)]
pub struct Detection {
    pub bounds: BoundingBox,
    pub threshold_level: u8,
    pub contours_found: usize,
    pub contours_kept: usize,
}

/// Locates the photographic region of a scan:
/// threshold search, contour extraction, contour filtering, bounds aggregation.
pub struct PhotoDetector {
    config: CropConfig,
    filter: ContourFilter,
}

impl PhotoDetector {
    pub fn new(config: CropConfig) -> Self {
        let filter = ContourFilter::from_limits(&config.limits);
        Self { config, filter }
    }

    /// Replace the contour rules derived from the config
    pub fn with_filter(mut self, filter: ContourFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Run detection without recording frames
    pub fn detect(&self, img: &DynamicImage) -> Result<Detection> {
        self.detect_recorded(img, &mut FrameRecorder::disabled())
    }

    /// Run detection, handing intermediate images to `recorder`
    #[instrument(skip_all, fields(width = img.width(), height = img.height()))]
    pub fn detect_recorded(
        &self,
        img: &DynamicImage,
        recorder: &mut FrameRecorder,
    ) -> Result<Detection> {
        let size = img.dimensions();
        recorder.record("input", img);

        let gray = threshold::to_grayscale(img);
        let binary = self.config.threshold.run_with(&gray, |level, mask| {
            recorder.record_with(&format!("threshold {level:03}"), || {
                DynamicImage::ImageLuma8(mask.clone())
            });
        })?;
        debug!(level = binary.level, white_fraction = binary.white_fraction, "threshold chosen");

        let all = contours::find_external_contours(&binary.mask);
        let contours_found = all.len();
        recorder.record_with("contours all", || draw_contours(img, &all));

        let kept = self.filter.apply(all, size);
        let contours_kept = kept.len();
        recorder.record_with("contours kept", || draw_contours(img, &kept));
        info!(found = contours_found, kept = contours_kept, "contours filtered");

        let bounds = bounds::aggregate_bounds(&kept, size)?;
        recorder.record_with("bounds", || draw_bounds(img, &bounds));
        info!(
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "photo bounds found"
        );

        Ok(Detection {
            bounds,
            threshold_level: binary.level,
            contours_found,
            contours_kept,
        })
    }
}

impl Default for PhotoDetector {
    fn default() -> Self {
        Self::new(CropConfig::default())
    }
}

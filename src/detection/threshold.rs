use image::{DynamicImage, GrayImage, Luma};
use tracing::{debug, instrument};

use crate::config::ThresholdSearch;
use crate::error::{CropError, Result};

/// Outcome of a successful threshold search
#[derive(Debug, Clone)]
pub struct Binarization {
    pub mask: GrayImage,
    pub level: u8,
    pub white_fraction: f64,
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Pixels at or above `level` become white, everything else black
pub fn binarize(gray: &GrayImage, level: u8) -> GrayImage {
    let mut mask = gray.clone();
    for p in mask.pixels_mut() {
        *p = if p.0[0] >= level { Luma([255]) } else { Luma([0]) };
    }
    mask
}

/// Fraction of non-zero pixels in the mask
pub fn white_fraction(mask: &GrayImage) -> f64 {
    let total = mask.width() as u64 * mask.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let white = mask.pixels().filter(|p| p.0[0] != 0).count() as u64;
    white as f64 / total as f64
}

impl ThresholdSearch {
    /// Raise the level until the white fraction drops to the ceiling.
    pub fn run(&self, gray: &GrayImage) -> Result<Binarization> {
        self.run_with(gray, |_, _| {})
    }

    /// Like [`run`](Self::run), reporting every attempted mask to `on_attempt`.
    #[instrument(skip_all, fields(start = self.start_level, ceiling = self.white_ceiling))]
    pub fn run_with<F>(&self, gray: &GrayImage, mut on_attempt: F) -> Result<Binarization>
    where
        F: FnMut(u8, &GrayImage),
    {
        let step = self.step.max(1) as u16;
        let mut level = self.start_level as u16;
        let mut last = None;

        while level <= self.max_level as u16 {
            let current = level as u8;
            let mask = binarize(gray, current);
            let fraction = white_fraction(&mask);
            debug!(level = current, white_fraction = fraction, "threshold attempt");
            on_attempt(current, &mask);

            if fraction <= self.white_ceiling {
                return Ok(Binarization {
                    mask,
                    level: current,
                    white_fraction: fraction,
                });
            }
            last = Some((current, fraction));
            level += step;
        }

        let (last_level, white_fraction) = last.unwrap_or((self.start_level, 1.0));
        Err(CropError::ThresholdSearchNonConvergence {
            last_level,
            white_fraction,
            ceiling: self.white_ceiling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_inclusive() {
        let gray = GrayImage::from_fn(3, 1, |x, _| Luma([99 + x as u8]));
        let mask = binarize(&gray, 100);
        assert_eq!(mask.as_raw(), &vec![0, 255, 255]);
    }

    #[test]
    fn search_steps_until_fraction_fits() {
        // Left 90% of columns at 105, the rest black: level 100 is 90% white,
        // level 110 is fully black.
        let gray = GrayImage::from_fn(100, 10, |x, _| if x < 90 { Luma([105]) } else { Luma([0]) });
        let mut seen = Vec::new();
        let result = ThresholdSearch::default()
            .run_with(&gray, |level, _| seen.push(level))
            .unwrap();
        assert_eq!(seen, vec![100, 110]);
        assert_eq!(result.level, 110);
        assert_eq!(result.white_fraction, 0.0);
    }

    #[test]
    fn zero_step_advances_one_level_at_a_time() {
        let gray = GrayImage::from_pixel(4, 4, Luma([255]));
        let search = ThresholdSearch {
            step: 0,
            max_level: 103,
            ..ThresholdSearch::default()
        };
        let mut seen = Vec::new();
        let err = search.run_with(&gray, |level, _| seen.push(level)).unwrap_err();
        assert_eq!(seen, vec![100, 101, 102, 103]);
        assert!(matches!(
            err,
            CropError::ThresholdSearchNonConvergence { last_level: 103, .. }
        ));
    }

    #[test]
    fn start_above_max_never_converges() {
        let gray = GrayImage::from_pixel(4, 4, Luma([0]));
        let search = ThresholdSearch {
            start_level: 200,
            max_level: 150,
            ..ThresholdSearch::default()
        };
        assert!(matches!(
            search.run(&gray),
            Err(CropError::ThresholdSearchNonConvergence { last_level: 200, .. })
        ));
    }
}

//! Failure kinds for a single crop run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("cannot derive an output name for {}: input has no file extension", .0.display())]
    InvalidInputPath(PathBuf),

    #[error("failed to decode image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no contour survived filtering, nothing to crop")]
    DegenerateSelection,

    #[error("crop of {area} px² is below the minimum of {minimum} px²")]
    UndersizedResult { area: u64, minimum: u64 },

    #[error(
        "threshold search gave up at level {last_level}: white fraction {white_fraction:.3} still above {ceiling}"
    )]
    ThresholdSearchNonConvergence {
        last_level: u8,
        white_fraction: f64,
        ceiling: f64,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CropError {
    /// True for outcomes that mean "no suitable crop found" rather than bad input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CropError::DegenerateSelection
                | CropError::UndersizedResult { .. }
                | CropError::ThresholdSearchNonConvergence { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CropError>;

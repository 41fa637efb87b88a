mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from photocrop for tests
pub use photocrop::{
    BoundingBox, Contour, CropConfig, CropError, FrameRecorder, Pipeline, PhotoDetector, Preset,
};

pub mod config;
pub mod crop;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod recorder;

pub use config::{ContourLimits, CropConfig, Preset, ThresholdSearch};
pub use detection::{Detection, PhotoDetector};
pub use error::CropError;
pub use models::{BoundingBox, Contour};
pub use pipeline::{BatchEntry, CropReport, CropResult, Pipeline};
pub use recorder::FrameRecorder;

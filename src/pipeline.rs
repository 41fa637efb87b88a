use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::config::CropConfig;
use crate::crop::{crop_to_bounds, derive_output_path};
use crate::detection::{Detection, PhotoDetector};
use crate::error::{CropError, Result};
use crate::models::BoundingBox;
use crate::recorder::FrameRecorder;

/// In-memory result of cropping one image
#[derive(Debug, Clone)]
pub struct CropResult {
    pub detection: Detection,
    pub image: DynamicImage,
}

impl CropResult {
    pub fn bounds(&self) -> BoundingBox {
        self.detection.bounds
    }
}

/// What `process_file` wrote
#[derive(Debug, Clone)]
pub struct CropReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub detection: Detection,
}

/// One input of a batch run and how it went
#[derive(Debug)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub outcome: Result<CropReport>,
}

/// Load, detect, crop and write scans with one configuration
pub struct Pipeline {
    detector: PhotoDetector,
    frames_dir: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(config: CropConfig) -> Self {
        Self::from_detector(PhotoDetector::new(config))
    }

    pub fn from_detector(detector: PhotoDetector) -> Self {
        Self {
            detector,
            frames_dir: None,
        }
    }

    /// Record intermediate frames of every run into `frames_dir`
    pub fn with_recording(mut self, frames_dir: impl Into<PathBuf>) -> Self {
        self.frames_dir = Some(frames_dir.into());
        self
    }

    pub fn detector(&self) -> &PhotoDetector {
        &self.detector
    }

    /// Detect and crop an already decoded image, without recording
    pub fn run(&self, img: &DynamicImage) -> Result<CropResult> {
        self.run_recorded(img, &mut FrameRecorder::disabled())
    }

    pub fn run_recorded(
        &self,
        img: &DynamicImage,
        recorder: &mut FrameRecorder,
    ) -> Result<CropResult> {
        let detection = self.detector.detect_recorded(img, recorder)?;
        let image = crop_to_bounds(img, &detection.bounds, self.detector.config().min_crop_area)?;
        recorder.record("cropped", &image);
        Ok(CropResult { detection, image })
    }

    /// Crop one file. Without `output` the name is derived from `input`.
    ///
    /// The output path is resolved before the frames directory is touched.
    /// A frames directory that cannot be created disables recording.
    pub fn process_file(&self, input: &Path, output: Option<&Path>) -> Result<CropReport> {
        let output = resolve_output(input, output)?;
        let mut recorder = recorder_in(self.frames_dir.clone());
        self.process_file_recorded(input, output, &mut recorder)
    }

    #[instrument(skip(self, output, recorder), fields(input = %input.display()))]
    fn process_file_recorded(
        &self,
        input: &Path,
        output: PathBuf,
        recorder: &mut FrameRecorder,
    ) -> Result<CropReport> {
        let img = image::open(input).map_err(|source| CropError::UnreadableImage {
            path: input.to_path_buf(),
            source,
        })?;
        info!(width = img.width(), height = img.height(), "scan loaded");

        let result = self.run_recorded(&img, recorder)?;
        result.image.save(&output).map_err(|source| CropError::WriteImage {
            path: output.clone(),
            source,
        })?;
        info!(output = %output.display(), "cropped image written");

        Ok(CropReport {
            input: input.to_path_buf(),
            output,
            detection: result.detection,
        })
    }

    /// Crop every input independently; one failing input never stops the rest.
    ///
    /// Outputs use derived names. When recording, each input gets a
    /// subdirectory of the frames directory named after its file stem.
    pub fn process_batch<P: AsRef<Path>>(&self, inputs: &[P]) -> Vec<BatchEntry> {
        inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                let outcome = resolve_output(input, None).and_then(|output| {
                    let mut recorder = recorder_in(self.batch_frames_dir(input));
                    self.process_file_recorded(input, output, &mut recorder)
                });
                if let Err(e) = &outcome {
                    warn!(input = %input.display(), error = %e, "skipping input");
                }
                BatchEntry {
                    input: input.to_path_buf(),
                    outcome,
                }
            })
            .collect()
    }

    fn batch_frames_dir(&self, input: &Path) -> Option<PathBuf> {
        self.frames_dir.as_ref().map(|dir| {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "input".to_string());
            dir.join(stem)
        })
    }
}

fn resolve_output(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    match output {
        Some(path) => Ok(path.to_path_buf()),
        None => derive_output_path(input),
    }
}

fn recorder_in(frames_dir: Option<PathBuf>) -> FrameRecorder {
    let Some(dir) = frames_dir else {
        return FrameRecorder::disabled();
    };
    match FrameRecorder::new(&dir) {
        Ok(recorder) => recorder,
        Err(e) => {
            warn!(
                dir = %dir.display(),
                error = %e,
                "cannot create frames directory, recording disabled"
            );
            FrameRecorder::disabled()
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(CropConfig::default())
    }
}

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use photocrop::{CropConfig, Pipeline, Preset};

/// Nothing suitable to crop; no output was written
const EXIT_NOTHING_TO_CROP: u8 = 2;

#[derive(Parser)]
#[command(name = "photocrop")]
#[command(about = "Crop the photograph out of a flatbed scan")]
struct Cli {
    /// Path to the scanned image
    #[arg(value_name = "INPUT")]
    input_file: PathBuf,

    /// Where to write the crop (default: INPUT with `cropped` before the extension)
    #[arg(value_name = "OUTPUT")]
    output_file: Option<PathBuf>,

    /// Dump intermediate frames for inspection
    #[arg(long)]
    record_process: bool,

    /// Directory for recorded frames
    #[arg(long, value_name = "DIR", default_value = "frames")]
    frames_dir: PathBuf,

    /// Contour limit preset, refined by the options below
    #[arg(long, value_enum, default_value_t = Preset::Standard)]
    preset: Preset,

    /// Minimum contour width in pixels
    #[arg(long, value_name = "PX")]
    min_width: Option<u32>,

    /// Minimum contour height in pixels
    #[arg(long, value_name = "PX")]
    min_height: Option<u32>,

    /// Minimum enclosed contour area in px²
    #[arg(long, value_name = "PX2")]
    min_area: Option<f64>,

    /// Maximum contour area as a fraction of the image area
    #[arg(long, value_name = "FRACTION")]
    max_area_fraction: Option<f64>,

    /// Distance contours must keep from the image border
    #[arg(long, value_name = "PX")]
    edge_margin: Option<u32>,

    /// Highest acceptable fraction of white pixels after thresholding
    #[arg(long, value_name = "FRACTION")]
    white_ceiling: Option<f64>,

    /// Give up the threshold search after this level
    #[arg(long, value_name = "LEVEL")]
    max_threshold: Option<u8>,

    /// Crops smaller than this many px² are discarded
    #[arg(long, value_name = "PX2")]
    min_crop_area: Option<u64>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> CropConfig {
        let mut config = CropConfig::from_preset(self.preset);
        let limits = &mut config.limits;
        if let Some(v) = self.min_width {
            limits.min_width = v;
        }
        if let Some(v) = self.min_height {
            limits.min_height = v;
        }
        if let Some(v) = self.min_area {
            limits.min_area = v;
        }
        if let Some(v) = self.max_area_fraction {
            limits.max_area_fraction = v;
        }
        if let Some(v) = self.edge_margin {
            limits.edge_margin = v;
        }
        if let Some(v) = self.white_ceiling {
            config.threshold.white_ceiling = v;
        }
        if let Some(v) = self.max_threshold {
            config.threshold.max_level = v;
        }
        if let Some(v) = self.min_crop_area {
            config.min_crop_area = v;
        }
        config
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("photocrop={level}")))
        .with_writer(std::io::stderr)
        .init();

    let mut pipeline = Pipeline::new(args.config());
    if args.record_process {
        pipeline = pipeline.with_recording(args.frames_dir.clone());
    }

    match pipeline.process_file(&args.input_file, args.output_file.as_deref()) {
        Ok(report) => {
            let b = report.detection.bounds;
            println!(
                "Cropped {} -> {} ({}x{} at {},{})",
                report.input.display(),
                report.output.display(),
                b.width,
                b.height,
                b.x,
                b.y
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_recoverable() => {
            println!("No crop written for {}: {}", args.input_file.display(), e);
            Ok(ExitCode::from(EXIT_NOTHING_TO_CROP))
        }
        Err(e) => Err(e.into()),
    }
}

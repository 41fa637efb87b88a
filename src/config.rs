/// Parameters of the binarization threshold search
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSearch {
    /// First level tried
    pub start_level: u8,
    /// Increment between attempts
    pub step: u8,
    /// Last level that may be tried before giving up
    pub max_level: u8,
    /// Highest acceptable fraction of white pixels
    pub white_ceiling: f64,
}

impl Default for ThresholdSearch {
    fn default() -> Self {
        Self {
            start_level: 100,
            step: 10,
            max_level: 250,
            white_ceiling: 0.85,
        }
    }
}

/// Size and position limits a contour must satisfy to count towards the crop
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLimits {
    pub min_width: u32,
    pub min_height: u32,
    /// Absolute minimum enclosed area in px²
    pub min_area: f64,
    /// Maximum enclosed area as a fraction of the whole image
    pub max_area_fraction: f64,
    /// Distance in pixels a contour must keep from every border
    pub edge_margin: u32,
}

impl Default for ContourLimits {
    fn default() -> Self {
        Preset::Standard.limits()
    }
}

/// Known-good contour limit combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// 50px minimum sides, half-image area cap, 20px edge margin
    #[default]
    Standard,
    /// 100px minimum sides, 30% area cap, only border-touching contours rejected
    Strict,
}

impl Preset {
    pub fn limits(self) -> ContourLimits {
        match self {
            Preset::Standard => ContourLimits {
                min_width: 50,
                min_height: 50,
                min_area: 200.0,
                max_area_fraction: 0.5,
                edge_margin: 20,
            },
            Preset::Strict => ContourLimits {
                min_width: 100,
                min_height: 100,
                min_area: 200.0,
                max_area_fraction: 0.3,
                edge_margin: 0,
            },
        }
    }
}

/// Everything that tunes one crop run
#[derive(Debug, Clone, PartialEq)]
pub struct CropConfig {
    pub threshold: ThresholdSearch,
    pub limits: ContourLimits,
    /// Crops smaller than this many px² are abandoned
    pub min_crop_area: u64,
}

impl CropConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            limits: preset.limits(),
            ..Self::default()
        }
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdSearch::default(),
            limits: ContourLimits::default(),
            min_crop_area: 10_000,
        }
    }
}

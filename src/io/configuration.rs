//! Cropping constants and runtime configuration defaults

/// Number of equal-width histogram bins used for entropy estimation
pub const HISTOGRAM_BINS: usize = 255;

// Default values for configurable parameters
/// Default number of strip eliminations per axis
pub const DEFAULT_MAX_STEPS: usize = 10;

/// Default lower percentile for the linear intensity stretch
pub const DEFAULT_MIN_PERCENT: f64 = 0.0;
/// Default upper percentile for the linear intensity stretch
pub const DEFAULT_MAX_PERCENT: f64 = 100.0;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_cropped";

/// File extensions accepted by the batch processor
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

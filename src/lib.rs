//! Entropy-maximizing automatic cropping for 2-D intensity images
//!
//! Border strips carrying the least information are discarded until the
//! requested size is reached, first across columns and then across rows.

#![forbid(unsafe_code)]

/// Strip elimination, crop windows and strip entropy caching
pub mod crop;
/// Input/output operations and error handling
pub mod io;
/// Entropy estimation and intensity scaling
pub mod math;

pub use crop::{CropWindow, EntropyCropper, entropy_crop};
pub use io::error::{CropError, Result};
pub use math::entropy::{EntropyEstimator, ValueRange, entropy};

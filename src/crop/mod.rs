//! Entropy-driven cropping of 2-D intensity arrays

/// Memoization of border strip entropies
pub mod cache;
/// Two-pass greedy strip elimination
pub mod cropper;
/// Crop rectangle bounds and region extraction
pub mod window;

pub use cache::Side;
pub use cropper::{CropReport, EntropyCropper, entropy_crop};
pub use window::CropWindow;

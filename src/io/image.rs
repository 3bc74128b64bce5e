//! Grayscale raster import and export

use crate::io::error::{CropError, Result};
use image::{GrayImage, ImageBuffer, Luma};
use ndarray::{Array2, ArrayBase, Data, Ix2};
use std::path::Path;

/// Decode an image file into a `height x width` intensity array
///
/// Colour sources are converted to luma. Samples keep the 16-bit range
/// so low-contrast data survives until the stretch.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_grayscale(path: &Path) -> Result<Array2<f64>> {
    let img = image::open(path).map_err(|e| CropError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let luma = img.to_luma16();
    let (width, height) = (luma.width() as usize, luma.height() as usize);

    let mut data = Array2::zeros((height, width));
    for (x, y, pixel) in luma.enumerate_pixels() {
        if let Some(value) = data.get_mut((y as usize, x as usize)) {
            *value = f64::from(pixel.0[0]);
        }
    }

    Ok(data)
}

/// Convert normalized intensities to an 8-bit grayscale buffer
///
/// Values are clamped to `[0, 1]`; non-finite samples become black.
pub fn to_gray_image<S>(data: &ArrayBase<S, Ix2>) -> GrayImage
where
    S: Data<Elem = f64>,
{
    let (height, width) = data.dim();
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let value = data
            .get((y as usize, x as usize))
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        Luma([(value.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

/// Write normalized intensities as an 8-bit grayscale image
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn save_grayscale<S>(data: &ArrayBase<S, Ix2>, output_path: &Path) -> Result<()>
where
    S: Data<Elem = f64>,
{
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CropError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    to_gray_image(data)
        .save(output_path)
        .map_err(|e| CropError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

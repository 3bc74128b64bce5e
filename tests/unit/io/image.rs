//! Tests for grayscale image import, conversion and export

#[cfg(test)]
mod tests {
    use entropycrop::CropError;
    use entropycrop::io::image::{load_grayscale, save_grayscale, to_gray_image};
    use ndarray::{Array2, array};

    // Tests normalized values map onto the 8-bit range
    // Verified by truncating instead of rounding
    #[test]
    fn test_to_gray_image_scales_and_clamps() {
        let data = array![[0.0, 0.5, 1.0], [-3.0, 7.0, f64::NAN]];
        let img = to_gray_image(&data);

        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [128]);
        assert_eq!(img.get_pixel(2, 0).0, [255]);
        assert_eq!(img.get_pixel(0, 1).0, [0]);
        assert_eq!(img.get_pixel(1, 1).0, [255]);
        assert_eq!(img.get_pixel(2, 1).0, [0]);
    }

    // Tests saving then loading keeps shape and orientation
    // Verified by transposing rows and columns on load
    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frame.png");
        let data =
            Array2::from_shape_fn((3, 5), |(r, c)| if r == 0 && c == 4 { 1.0 } else { 0.0 });

        save_grayscale(&data, &path).unwrap();
        assert!(path.exists(), "PNG file should be created with its parent directory");

        let loaded = load_grayscale(&path).unwrap();
        assert_eq!(loaded.dim(), (3, 5));
        assert!((loaded[(0, 4)] - 65535.0).abs() < f64::EPSILON);
        assert!(loaded[(2, 0)].abs() < f64::EPSILON);
    }

    // Tests missing files surface as load errors with the path
    // Verified by mapping load failures to FileSystem errors
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");

        match load_grayscale(&path) {
            Err(CropError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            _ => unreachable!("Expected ImageLoad error type"),
        }
    }

    // Tests unknown output extensions fail to export
    // Verified by defaulting unknown extensions to PNG
    #[test]
    fn test_save_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.unknownformat");
        let data = Array2::<f64>::zeros((2, 2));

        assert!(matches!(
            save_grayscale(&data, &path),
            Err(CropError::ImageExport { .. })
        ));
    }
}

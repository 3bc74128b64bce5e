//! Tests for two-pass strip elimination, validation and crop traces

#[cfg(test)]
mod tests {
    use entropycrop::CropError;
    use entropycrop::crop::cache::Side;
    use entropycrop::crop::cropper::{EntropyCropper, entropy_crop, step_size};
    use entropycrop::crop::window::CropWindow;
    use ndarray::{Array2, s};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noise(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array2::from_shape_fn((rows, cols), |_| rng.random::<f64>())
    }

    // Columns 0-4 are zero, columns 5-9 each hold 0..9 down the rows
    fn half_blank() -> Array2<f64> {
        Array2::from_shape_fn((10, 10), |(r, c)| if c < 5 { 0.0 } else { r as f64 })
    }

    // Tests zero and oversized targets are rejected before any work
    // Verified by allowing targets equal to zero
    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let image = Array2::<f64>::zeros((4, 6));

        for (w, h) in [(0, 2), (2, 0), (7, 2), (2, 5)] {
            match EntropyCropper::new(w, h).crop(&image) {
                Err(CropError::InvalidDimensions {
                    requested,
                    available,
                }) => {
                    assert_eq!(requested, (w, h));
                    assert_eq!(available, (6, 4));
                }
                _ => unreachable!("Expected InvalidDimensions for {w}x{h}"),
            }
        }
    }

    // Tests a zero step budget is rejected
    // Verified by removing the max_steps check
    #[test]
    fn test_validate_rejects_zero_max_steps() {
        let image = Array2::<f64>::zeros((4, 6));
        let result = EntropyCropper::new(3, 3).with_max_steps(0).crop(&image);

        assert!(matches!(
            result,
            Err(CropError::InvalidParameter {
                parameter: "max_steps",
                ..
            })
        ));
    }

    // Tests step rounding and the minimum of one
    // Verified by rounding half away from zero
    #[test]
    fn test_step_size() {
        assert_eq!(step_size(0, 10), 1);
        assert_eq!(step_size(5, 10), 1);
        assert_eq!(step_size(20, 10), 2);
        assert_eq!(step_size(25, 10), 2);
        assert_eq!(step_size(35, 10), 4);
        assert_eq!(step_size(96, 10), 10);
        assert_eq!(step_size(7, 1), 7);
    }

    // Tests the output always has the target shape
    // Verified by stopping each pass one strip early
    #[test]
    fn test_shape_invariant() {
        let image = noise(17, 23, 3);

        for max_steps in [1, 2, 3, 7, 10, 50] {
            for (w, h) in [(1, 1), (5, 9), (22, 16), (23, 17), (10, 1)] {
                let cropped = entropy_crop(&image, w, h, max_steps).unwrap();
                assert_eq!(cropped.dim(), (h, w), "max_steps {max_steps}, {w}x{h}");
            }
        }
    }

    // Tests cropping to the source size returns the source unchanged
    // Verified by entering the loop when no reduction is needed
    #[test]
    fn test_identity_when_target_matches_source() {
        let image = noise(8, 12, 11);
        let cropper = EntropyCropper::new(12, 8);

        let report = cropper.locate(&image).unwrap();
        assert_eq!(report.window, CropWindow::from_ranges(0..12, 0..8));
        assert!(report.horizontal.decisions.is_empty());
        assert!(report.vertical.decisions.is_empty());
        assert_eq!(report.horizontal.evaluations, 0);

        assert_eq!(cropper.crop(&image).unwrap(), image);
    }

    // Tests blank columns are discarded for every step budget
    // Verified by discarding the higher-entropy side
    #[test]
    fn test_blank_columns_discarded() {
        let image = half_blank();
        let expected = image.slice(s![.., 5..10]).to_owned();

        for max_steps in 1..=12 {
            let cropped = entropy_crop(&image, 5, 10, max_steps).unwrap();
            assert_eq!(cropped, expected, "max_steps {max_steps}");
        }
    }

    // Tests blank rows are discarded by the vertical pass
    // Verified by running the vertical pass on columns
    #[test]
    fn test_blank_rows_discarded() {
        let image = half_blank().reversed_axes();
        let expected = image.slice(s![5..10, ..]).to_owned();

        for max_steps in 1..=12 {
            let cropped = entropy_crop(&image, 10, 5, max_steps).unwrap();
            assert_eq!(cropped, expected, "max_steps {max_steps}");
        }
    }

    // Tests a flat image ties everywhere and keeps the top-left block
    // Verified by breaking ties toward the leading side
    #[test]
    fn test_flat_image_keeps_top_left() {
        let image = Array2::from_elem((8, 8), 3.0_f64);

        for max_steps in [1, 2, 4, 10] {
            let report = EntropyCropper::new(4, 4)
                .with_max_steps(max_steps)
                .locate(&image)
                .unwrap();

            assert_eq!(report.window, CropWindow::from_ranges(0..4, 0..4));
            assert!(
                report
                    .horizontal
                    .decisions
                    .iter()
                    .chain(&report.vertical.decisions)
                    .all(|d| d.discarded == Side::Trailing)
            );
        }
    }

    // Tests every discard strictly shrinks the window and the pass ends at the target
    // Verified by allowing a zero-width final strip
    #[test]
    fn test_monotonic_shrink_and_bounded_iterations() {
        let image = noise(24, 32, 5);

        for max_steps in [1, 3, 6, 10, 40] {
            let report = EntropyCropper::new(10, 7)
                .with_max_steps(max_steps)
                .locate(&image)
                .unwrap();

            for (trace, extent, target) in [
                (&report.horizontal, 32_usize, 10_usize),
                (&report.vertical, 24, 7),
            ] {
                let mut previous = extent;
                for decision in &trace.decisions {
                    assert!(decision.remaining < previous);
                    assert!(decision.strip_width >= 1);
                    assert!(decision.strip_width <= trace.step);
                    previous = decision.remaining;
                }
                assert_eq!(previous, target);
                assert_eq!(trace.decisions.len(), (extent - target).div_ceil(trace.step));
            }
        }
    }

    // Tests the untouched side's entropy is reused between iterations
    // Verified by invalidating both sides after each discard
    #[test]
    fn test_strip_entropies_are_memoized() {
        let image = noise(12, 30, 9);
        let report = EntropyCropper::new(10, 12).locate(&image).unwrap();

        // 20 excess columns in steps of 2: ten discards, one fresh strip each after the first pair
        assert_eq!(report.horizontal.step, 2);
        assert_eq!(report.horizontal.decisions.len(), 10);
        assert_eq!(report.horizontal.evaluations, 11);
    }

    // Tests the lower-entropy strip is the one discarded
    // Verified by discarding on greater-than instead of less-than
    #[test]
    fn test_decisions_follow_entropy_order() {
        let image = noise(16, 40, 21);
        let report = EntropyCropper::new(12, 6)
            .with_max_steps(7)
            .locate(&image)
            .unwrap();

        for decision in report
            .horizontal
            .decisions
            .iter()
            .chain(&report.vertical.decisions)
        {
            match decision.discarded {
                Side::Leading => assert!(decision.leading_entropy < decision.trailing_entropy),
                Side::Trailing => assert!(decision.leading_entropy >= decision.trailing_entropy),
            }
        }
    }

    // Tests the value range comes from the whole image
    // Verified by deriving the range from the first strip
    #[test]
    fn test_value_range_from_whole_image() {
        let mut image = Array2::from_elem((6, 6), 1.0_f64);
        image[(5, 5)] = 9.0;
        image[(0, 3)] = -4.0;

        let report = EntropyCropper::new(3, 3).locate(&image).unwrap();
        assert!((report.value_range.min + 4.0).abs() < f64::EPSILON);
        assert!((report.value_range.max - 9.0).abs() < f64::EPSILON);
    }

    // Tests the crop is taken as-is without mirroring
    // Verified by reversing the column order of the result
    #[test]
    fn test_crop_preserves_orientation() {
        let image = Array2::from_shape_fn((9, 13), |(r, c)| (r * 13 + c) as f64);
        let cropper = EntropyCropper::new(6, 4).with_max_steps(3);

        let report = cropper.locate(&image).unwrap();
        let cropped = cropper.crop(&image).unwrap();
        let window = report.window;

        for ((r, c), value) in cropped.indexed_iter() {
            assert!((value - image[(window.top + r, window.left + c)]).abs() < f64::EPSILON);
        }
        assert!(cropped[(0, 0)] < cropped[(0, 1)]);
    }

    // Tests the high-entropy patch survives cropping
    // Verified by swapping the tie-break rule
    #[test]
    fn test_keeps_textured_patch() {
        let mut image = Array2::<f64>::zeros((20, 20));
        let patch = noise(6, 6, 17).mapv(|v| v + 1.0);
        image.slice_mut(s![10..16, 12..18]).assign(&patch);

        let report = EntropyCropper::new(8, 8)
            .with_max_steps(12)
            .locate(&image)
            .unwrap();
        let window = report.window;

        assert!(window.left <= 12 && window.right >= 18, "{window:?}");
        assert!(window.top <= 10 && window.bottom >= 16, "{window:?}");
    }

    // Tests identical inputs give identical outputs
    // Verified by seeding the noise from the clock
    #[test]
    fn test_determinism() {
        let image = noise(30, 40, 77);
        let cropper = EntropyCropper::new(17, 11).with_max_steps(6);

        let first = cropper.crop(&image).unwrap();
        let second = cropper.crop(&image).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            cropper.locate(&image).unwrap().window,
            cropper.locate(&image).unwrap().window
        );
    }

    // Tests integer images and views are accepted
    // Verified by requiring owned f64 arrays
    #[test]
    fn test_integer_image_and_view() {
        let image =
            Array2::from_shape_fn((10, 10), |(r, c)| if c < 5 { 0_u16 } else { r as u16 * 100 });

        let cropped = entropy_crop(&image.view(), 5, 10, 10).unwrap();
        assert_eq!(cropped, image.slice(s![.., 5..10]).to_owned());
    }

    // Tests images without finite samples still crop deterministically
    // Verified by propagating the missing value range as an error
    #[test]
    fn test_all_nan_image() {
        let image = Array2::from_elem((6, 6), f64::NAN);
        let report = EntropyCropper::new(2, 3).locate(&image).unwrap();

        assert_eq!(report.window, CropWindow::from_ranges(0..2, 0..3));
    }

    // Tests vertical strips span the full image width
    // Verified by restricting vertical strips to the horizontal window
    #[test]
    fn test_vertical_pass_uses_full_width() {
        // Row texture lives only in columns that the horizontal pass discards
        let mut image = Array2::<f64>::zeros((10, 10));
        for r in 5..10 {
            for c in 0..3 {
                image[(r, c)] = (r * 3 + c) as f64;
            }
        }
        for r in 0..10 {
            for c in 5..10 {
                image[(r, c)] = (r + c) as f64;
            }
        }

        let report = EntropyCropper::new(5, 5).locate(&image).unwrap();
        assert_eq!(report.window.left, 5);
        assert_eq!(report.window.top, 5);
    }
}

//! Linear percentile stretch for rendering raw intensities
//!
//! Raw detector counts rarely span a useful display range. The stretch clips
//! to two percentiles of the finite samples and maps them onto `[0, 1]`.

use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Clip-and-rescale transform defined by two percentiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearStretch {
    min_percent: f64,
    max_percent: f64,
}

impl LinearStretch {
    /// Create a stretch between two percentiles in `[0, 100]`
    ///
    /// # Errors
    ///
    /// Returns an error if either percentile is outside `[0, 100]` or
    /// `min_percent` is not strictly below `max_percent`.
    pub fn new(min_percent: f64, max_percent: f64) -> Result<Self> {
        for (parameter, value) in [("min_percent", min_percent), ("max_percent", max_percent)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be within [0, 100]",
                ));
            }
        }

        if min_percent >= max_percent {
            return Err(invalid_parameter(
                "min_percent",
                &min_percent,
                &format!("must be below max_percent ({max_percent})"),
            ));
        }

        Ok(Self {
            min_percent,
            max_percent,
        })
    }

    /// Stretch covering the full sample range
    pub const fn full() -> Self {
        Self {
            min_percent: 0.0,
            max_percent: 100.0,
        }
    }

    /// Intensity bounds the stretch maps to 0 and 1
    ///
    /// Returns `None` when the data has no finite samples.
    pub fn bounds<S>(&self, data: &ArrayBase<S, Ix2>) -> Option<(f64, f64)>
    where
        S: Data<Elem = f64>,
    {
        let mut finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        finite.sort_by(f64::total_cmp);

        let low = percentile(&finite, self.min_percent)?;
        let high = percentile(&finite, self.max_percent)?;
        Some((low, high))
    }

    /// Apply the stretch, producing values in `[0, 1]`
    ///
    /// Non-finite samples map to 0, as does everything when the bounds
    /// coincide.
    pub fn apply<S>(&self, data: &ArrayBase<S, Ix2>) -> Array2<f64>
    where
        S: Data<Elem = f64>,
    {
        let Some((low, high)) = self.bounds(data) else {
            return Array2::zeros(data.raw_dim());
        };
        let span = high - low;

        data.mapv(|v| {
            if !v.is_finite() || span <= 0.0 {
                0.0
            } else {
                ((v - low) / span).clamp(0.0, 1.0)
            }
        })
    }
}

impl Default for LinearStretch {
    fn default() -> Self {
        Self::full()
    }
}

/// Percentile of sorted data using linear interpolation between order statistics
///
/// Returns `None` for empty input.
pub fn percentile(sorted: &[f64], percent: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (percent / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    let low = *sorted.get(lower)?;
    let high = *sorted.get(upper)?;
    Some(fraction.mul_add(high - low, low))
}

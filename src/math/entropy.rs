//! Histogram-based Shannon entropy over a fixed value range
//!
//! All strips compared during one crop share the same [`ValueRange`], so their
//! entropies are measured on a common histogram basis and can be ordered.

use crate::io::configuration::HISTOGRAM_BINS;
use num_traits::ToPrimitive;

/// Closed interval of sample values covered by the histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl ValueRange {
    /// Placeholder range for sources without any finite sample
    ///
    /// Such sources bin nothing, so every entropy against it is zero.
    pub const EMPTY: Self = Self { min: 0.0, max: 0.0 };

    /// Create a range from explicit bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest range containing every finite sample
    ///
    /// Returns `None` when there are no finite samples.
    pub fn from_samples<'a, T, I>(samples: I) -> Option<Self>
    where
        T: ToPrimitive + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        samples
            .into_iter()
            .filter_map(ToPrimitive::to_f64)
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some(Self::new(v, v)),
                Some(Self { min, max }) => Some(Self::new(min.min(v), max.max(v))),
            })
    }

    /// Check if a value lies inside the closed interval
    pub const fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance between the bounds
    pub const fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Equal-width histogram of samples over a [`ValueRange`]
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: Vec<usize>,
    total: usize,
}

impl Histogram {
    /// Bin samples into `bins` equal-width buckets spanning `range`
    ///
    /// The last bin is closed so that `range.max` is counted. Samples that are
    /// non-finite or outside the range are skipped.
    pub fn build<I>(samples: I, range: ValueRange, bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let bins = bins.max(1);
        let mut counts = vec![0usize; bins];
        let mut total = 0;
        let span = range.span();

        for value in samples {
            if !value.is_finite() || !range.contains(value) {
                continue;
            }

            // A flat range has a single meaningful bucket
            let index = if span > 0.0 {
                (((value - range.min) / span * bins as f64) as usize).min(bins - 1)
            } else {
                0
            };

            if let Some(count) = counts.get_mut(index) {
                *count += 1;
                total += 1;
            }
        }

        Self { counts, total }
    }

    /// Per-bin sample counts
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of samples that landed in a bin
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Shannon entropy of the normalized histogram in bits
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let total = self.total as f64;
        let entropy = self
            .counts
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum::<f64>();

        // A single populated bin sums to -0.0
        entropy.max(0.0)
    }
}

/// Entropy oracle bound to the value range of one source image
#[derive(Debug, Clone, Copy)]
pub struct EntropyEstimator {
    range: ValueRange,
    bins: usize,
}

impl EntropyEstimator {
    /// Create an estimator using the default bin count
    pub const fn new(range: ValueRange) -> Self {
        Self {
            range,
            bins: HISTOGRAM_BINS,
        }
    }

    /// Override the number of histogram bins
    pub const fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Value range shared by every estimate
    pub const fn range(&self) -> ValueRange {
        self.range
    }

    /// Shannon entropy in bits of the given samples
    pub fn estimate<'a, T, I>(&self, samples: I) -> f64
    where
        T: ToPrimitive + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Histogram::build(
            samples.into_iter().filter_map(ToPrimitive::to_f64),
            self.range,
            self.bins,
        )
        .entropy()
    }
}

/// Shannon entropy of `samples` binned over `[value_min, value_max]`
///
/// Uses [`HISTOGRAM_BINS`] equal-width bins. Empty or single-valued input
/// yields zero.
pub fn entropy<'a, T, I>(samples: I, value_min: f64, value_max: f64) -> f64
where
    T: ToPrimitive + 'a,
    I: IntoIterator<Item = &'a T>,
{
    EntropyEstimator::new(ValueRange::new(value_min, value_max)).estimate(samples)
}

//! Greedy two-pass strip elimination
//!
//! Width is reduced first by repeatedly discarding whichever vertical border
//! strip carries less information, then height by the same procedure on
//! horizontal strips. Each pass costs a bounded number of entropy evaluations
//! instead of an exhaustive search over every offset.

use crate::crop::cache::{Side, StripCache};
use crate::crop::window::CropWindow;
use crate::io::configuration::DEFAULT_MAX_STEPS;
use crate::io::error::{CropError, Result, invalid_parameter};
use crate::math::entropy::{EntropyEstimator, ValueRange};
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2, Slice};
use num_traits::ToPrimitive;
use std::ops::Range;

/// One discard made during a reduction pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripDecision {
    /// Border the strip was removed from
    pub discarded: Side,
    /// Entropy of the leading (left or top) strip
    pub leading_entropy: f64,
    /// Entropy of the trailing (right or bottom) strip
    pub trailing_entropy: f64,
    /// Width of both compared strips
    pub strip_width: usize,
    /// Window extent along the axis after the discard
    pub remaining: usize,
}

/// Record of a single-axis reduction
#[derive(Debug, Clone, Default)]
pub struct AxisTrace {
    /// Nominal strip width for this axis
    pub step: usize,
    /// Discards in the order they were made
    pub decisions: Vec<StripDecision>,
    /// Number of strip entropies actually computed
    pub evaluations: usize,
}

/// Outcome of locating a crop, with per-axis traces
#[derive(Debug, Clone)]
pub struct CropReport {
    /// Final crop rectangle
    pub window: CropWindow,
    /// Value range shared by every entropy evaluation
    pub value_range: ValueRange,
    /// Column reduction
    pub horizontal: AxisTrace,
    /// Row reduction
    pub vertical: AxisTrace,
}

/// Entropy-maximizing cropper for a fixed target size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyCropper {
    target_width: usize,
    target_height: usize,
    max_steps: usize,
}

impl EntropyCropper {
    /// Create a cropper producing `target_width x target_height` images
    pub const fn new(target_width: usize, target_height: usize) -> Self {
        Self {
            target_width,
            target_height,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Set how many strips each pass aims to remove
    ///
    /// Larger values take thinner strips (slower, closer to exhaustive),
    /// smaller values take wider ones.
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Target width in columns
    pub const fn target_width(&self) -> usize {
        self.target_width
    }

    /// Target height in rows
    pub const fn target_height(&self) -> usize {
        self.target_height
    }

    /// Configured strip budget per axis
    pub const fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Check the target against an image of `(rows, cols)`
    ///
    /// # Errors
    ///
    /// Returns an error if a target dimension is zero or larger than the
    /// image, or if `max_steps` is zero.
    pub fn validate(&self, dim: (usize, usize)) -> Result<()> {
        let (rows, cols) = dim;
        if self.target_width == 0
            || self.target_height == 0
            || self.target_width > cols
            || self.target_height > rows
        {
            return Err(CropError::InvalidDimensions {
                requested: (self.target_width, self.target_height),
                available: (cols, rows),
            });
        }

        if self.max_steps == 0 {
            return Err(invalid_parameter(
                "max_steps",
                &self.max_steps,
                &"must be at least 1",
            ));
        }

        Ok(())
    }

    /// Find the crop window without copying any pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the target does not fit the image or `max_steps`
    /// is zero.
    pub fn locate<S, T>(&self, image: &ArrayBase<S, Ix2>) -> Result<CropReport>
    where
        S: Data<Elem = T>,
        T: ToPrimitive,
    {
        self.validate(image.dim())?;

        let estimator =
            EntropyEstimator::new(ValueRange::from_samples(image.iter()).unwrap_or_else(|| {
                log::debug!("image has no finite samples, every strip scores zero");
                ValueRange::EMPTY
            }));

        let (columns, horizontal) =
            reduce_axis(image, Axis(1), self.target_width, self.max_steps, &estimator);
        let (rows, vertical) =
            reduce_axis(image, Axis(0), self.target_height, self.max_steps, &estimator);

        // Each pass stops exactly at its target extent
        let window = CropWindow::from_ranges(columns, rows);

        log::debug!(
            "crop window columns {}..{} rows {}..{} ({} + {} entropy evaluations)",
            window.left,
            window.right,
            window.top,
            window.bottom,
            horizontal.evaluations,
            vertical.evaluations
        );

        Ok(CropReport {
            window,
            value_range: estimator.range(),
            horizontal,
            vertical,
        })
    }

    /// Crop `image` to the target size, keeping the highest-entropy region
    ///
    /// # Errors
    ///
    /// Returns an error if the target does not fit the image or `max_steps`
    /// is zero.
    pub fn crop<S, T>(&self, image: &ArrayBase<S, Ix2>) -> Result<Array2<T>>
    where
        S: Data<Elem = T>,
        T: Clone + ToPrimitive,
    {
        let report = self.locate(image)?;
        Ok(report.window.view(image)?.to_owned())
    }
}

/// Crop `image` to `width x height` maximizing retained entropy
///
/// # Errors
///
/// Returns an error if the target does not fit the image or `max_steps` is
/// zero.
pub fn entropy_crop<S, T>(
    image: &ArrayBase<S, Ix2>,
    width: usize,
    height: usize,
    max_steps: usize,
) -> Result<Array2<T>>
where
    S: Data<Elem = T>,
    T: Clone + ToPrimitive,
{
    EntropyCropper::new(width, height)
        .with_max_steps(max_steps)
        .crop(image)
}

/// Nominal strip width for removing `excess` lines in `max_steps` strips
///
/// Rounds half to even and never returns less than one.
pub fn step_size(excess: usize, max_steps: usize) -> usize {
    if max_steps == 0 {
        return excess.max(1);
    }
    let step = (excess as f64 / max_steps as f64).round_ties_even() as usize;
    step.max(1)
}

// Shrinks [0, len) along `axis` to exactly `target` lines. The last strip is
// narrowed to the remaining excess so the pass never overshoots.
fn reduce_axis<S, T>(
    image: &ArrayBase<S, Ix2>,
    axis: Axis,
    target: usize,
    max_steps: usize,
    estimator: &EntropyEstimator,
) -> (Range<usize>, AxisTrace)
where
    S: Data<Elem = T>,
    T: ToPrimitive,
{
    let extent = image.len_of(axis);
    let step = step_size(extent.saturating_sub(target), max_steps);
    let strip_entropy = |bounds: &Range<usize>| {
        estimator.estimate(image.slice_axis(axis, Slice::from(bounds.clone())))
    };

    let mut span = 0..extent;
    let mut cache = StripCache::new();
    let mut decisions = Vec::new();

    while span.len() > target {
        let width = step.min(span.len() - target);
        let leading = span.start..span.start + width;
        let trailing = span.end - width..span.end;

        let leading_entropy =
            cache.get_or_compute(Side::Leading, leading.clone(), || strip_entropy(&leading));
        let trailing_entropy =
            cache.get_or_compute(Side::Trailing, trailing.clone(), || strip_entropy(&trailing));

        // Ties discard the trailing side
        let discarded = if leading_entropy < trailing_entropy {
            span.start += width;
            Side::Leading
        } else {
            span.end -= width;
            Side::Trailing
        };
        cache.invalidate(discarded);

        log::debug!(
            "axis {}: discarded {discarded:?} strip of {width} (entropy {leading_entropy:.4} vs {trailing_entropy:.4}), window {}..{}",
            axis.index(),
            span.start,
            span.end
        );

        decisions.push(StripDecision {
            discarded,
            leading_entropy,
            trailing_entropy,
            strip_width: width,
            remaining: span.len(),
        });
    }

    let trace = AxisTrace {
        step,
        decisions,
        evaluations: cache.stats.misses,
    };
    (span, trace)
}

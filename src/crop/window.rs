//! Rectangular crop bounds in image coordinates

use crate::io::error::{CropError, Result};
use ndarray::{ArrayBase, ArrayView2, Axis, Data, Ix2, Slice};
use std::ops::Range;

/// Half-open crop rectangle: columns `[left, right)`, rows `[top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    /// First retained column
    pub left: usize,
    /// One past the last retained column
    pub right: usize,
    /// First retained row
    pub top: usize,
    /// One past the last retained row
    pub bottom: usize,
}

impl CropWindow {
    /// Window from column and row ranges
    pub const fn from_ranges(columns: Range<usize>, rows: Range<usize>) -> Self {
        Self {
            left: columns.start,
            right: columns.end,
            top: rows.start,
            bottom: rows.end,
        }
    }

    /// Number of retained columns
    pub const fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// Number of retained rows
    pub const fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Check if the window lies inside an image of the given `(rows, cols)`
    pub const fn fits(&self, dim: (usize, usize)) -> bool {
        self.left <= self.right
            && self.top <= self.bottom
            && self.bottom <= dim.0
            && self.right <= dim.1
    }

    /// Borrow the windowed region of `image`
    ///
    /// # Errors
    ///
    /// Returns an error if the window extends past the image bounds.
    pub fn view<'a, S, T>(&self, image: &'a ArrayBase<S, Ix2>) -> Result<ArrayView2<'a, T>>
    where
        S: Data<Elem = T>,
    {
        let (rows, cols) = image.dim();
        if !self.fits((rows, cols)) {
            return Err(CropError::InvalidDimensions {
                requested: (self.width(), self.height()),
                available: (cols, rows),
            });
        }

        let mut view = image.view();
        view.slice_axis_inplace(Axis(0), Slice::from(self.top..self.bottom));
        view.slice_axis_inplace(Axis(1), Slice::from(self.left..self.right));
        Ok(view)
    }
}

//! Mathematical utilities for cropping and rendering

/// Histogram-based Shannon entropy estimation
pub mod entropy;
/// Percentile-based linear intensity stretch
pub mod scaling;

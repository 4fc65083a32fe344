//! Summary-statistic reduction over a masked grid
//!
//! Reductions flatten time and space together: one scalar per statistic for
//! the whole request window, never per-timestep. Masked cells are excluded
//! from every statistic, and `ncells` reports how many cells actually
//! contributed.

use crate::errors::{ClimoStatError, Result};
use crate::masked::MaskedGrid;
use serde::Serialize;

/// Scalar summary of the unmasked cells of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divide by N, not N-1).
    pub stdev: f64,
    /// Count of unmasked cells contributing to the reduction.
    pub ncells: usize,
}

/// Reduce a masked grid to min/max/mean/median/stdev/ncells.
///
/// Fails with [`ClimoStatError::EmptyRegion`] when no cell is unmasked: the
/// underlying reductions are mathematically undefined over an empty set, and
/// an explicit error beats a silent NaN.
///
/// Accumulation is sequential f64 in a fixed cell order, so identical inputs
/// always produce bit-identical output.
pub fn reduce(grid: &MaskedGrid) -> Result<GridSummary> {
    let values = grid.compressed();
    reduce_values(&values)
}

/// Reduce an already-compressed value vector.
pub(crate) fn reduce_values(values: &[f64]) -> Result<GridSummary> {
    if values.is_empty() {
        return Err(ClimoStatError::EmptyRegion);
    }

    let n = values.len() as f64;

    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    let mean = sum / n;

    let sq_sum: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    let stdev = (sq_sum / n).sqrt();

    Ok(GridSummary {
        min,
        max,
        mean,
        median: median(values),
        stdev,
        ncells: values.len(),
    })
}

/// Median of a non-empty slice; even counts average the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

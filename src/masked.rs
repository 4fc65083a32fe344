//! Masked 3D grid representation
//!
//! NetCDF climate output flags missing cells with a fill value; spatial
//! clipping removes further cells. Both kinds of exclusion are carried here as
//! a boolean mask alongside the data so that reductions can skip invalid cells
//! instead of treating them as zero.

use crate::errors::{ClimoStatError, Result};
use ndarray::Array3;

/// A dense (time, y, x) grid with an element-wise validity mask.
///
/// `mask` is `true` where a cell is *excluded*: flagged missing in the source
/// file, non-finite, or outside the requested region. A single-timestep
/// extraction is represented with a unit time axis.
#[derive(Debug, Clone)]
pub struct MaskedGrid {
    data: Array3<f64>,
    mask: Array3<bool>,
}

impl MaskedGrid {
    /// Build a grid from data and mask arrays of identical shape.
    pub fn new(data: Array3<f64>, mask: Array3<bool>) -> Result<Self> {
        if data.dim() != mask.dim() {
            return Err(ClimoStatError::Generic(format!(
                "Mask shape {:?} does not match data shape {:?}",
                mask.dim(),
                data.dim()
            )));
        }
        Ok(Self { data, mask })
    }

    /// Build a fully valid grid (no masked cells).
    pub fn from_data(data: Array3<f64>) -> Self {
        let mask = Array3::from_elem(data.dim(), false);
        Self { data, mask }
    }

    /// Grid shape as (time, y, x).
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Total number of cells, masked or not.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of unmasked cells across every dimension.
    pub fn ncells(&self) -> usize {
        self.mask.iter().filter(|&&m| !m).count()
    }

    /// Whether the cell at (t, j, i) is excluded.
    pub fn is_masked(&self, t: usize, j: usize, i: usize) -> bool {
        self.mask[[t, j, i]]
    }

    /// Raw data value at (t, j, i), masked or not.
    pub fn value(&self, t: usize, j: usize, i: usize) -> f64 {
        self.data[[t, j, i]]
    }

    /// Additionally mask every cell for which `excluded` returns true.
    ///
    /// The resulting mask is the union of the existing mask and the
    /// predicate, so cells already missing in the source stay excluded.
    pub fn mask_where<F>(&mut self, mut excluded: F)
    where
        F: FnMut(usize, usize, usize) -> bool,
    {
        let (nt, ny, nx) = self.data.dim();
        for t in 0..nt {
            for j in 0..ny {
                for i in 0..nx {
                    if excluded(t, j, i) {
                        self.mask[[t, j, i]] = true;
                    }
                }
            }
        }
    }

    /// Unmasked values flattened into a vector, in row-major (t, j, i) order.
    ///
    /// The fixed iteration order keeps downstream reductions deterministic:
    /// the same grid always produces the same vector.
    pub fn compressed(&self) -> Vec<f64> {
        self.data
            .iter()
            .zip(self.mask.iter())
            .filter_map(|(&v, &m)| if m { None } else { Some(v) })
            .collect()
    }
}

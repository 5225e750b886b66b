//! Coordinate-format (triplet) storage for assembled stiffness matrices
//!
//! Assembly writes one entry per local (row, col) pair of every element and
//! never merges duplicates. Conversions to CSR or dense storage sum repeated
//! (row, col) pairs, the usual COO convention.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use serde::{Deserialize, Serialize};

use super::Mat;
use crate::error::{FemError, FemResult};

/// Parallel `(data, rows, cols)` arrays of a sparse matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triplets {
    data: Vec<f64>,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Triplets {
    /// Allocate `len` zeroed entries
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
            rows: vec![0; len],
            cols: vec![0; len],
        }
    }

    /// Build from existing arrays, which must have equal lengths
    pub fn from_parts(data: Vec<f64>, rows: Vec<usize>, cols: Vec<usize>) -> FemResult<Self> {
        crate::error::check_len("triplet rows", data.len(), rows.len())?;
        crate::error::check_len("triplet cols", data.len(), cols.len())?;
        Ok(Self { data, rows, cols })
    }

    /// Number of stored entries, duplicates included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Mutable views of the three arrays, for in-place assembly
    pub(crate) fn parts_mut(&mut self) -> (&mut [f64], &mut [usize], &mut [usize]) {
        (&mut self.data, &mut self.rows, &mut self.cols)
    }

    /// Iterate `(row, col, value)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.data)
            .map(|((&row, &col), &value)| (row, col, value))
    }

    /// Copy the entries in `range` into a new container
    pub fn slice(&self, range: std::ops::Range<usize>) -> FemResult<Self> {
        if range.start > range.end || range.end > self.len() {
            return Err(FemError::SparseFormat(format!(
                "range {}..{} outside {} stored entries",
                range.start,
                range.end,
                self.len()
            )));
        }
        Ok(Self {
            data: self.data[range.clone()].to_vec(),
            rows: self.rows[range.clone()].to_vec(),
            cols: self.cols[range].to_vec(),
        })
    }

    /// Largest row and column index referenced, if any
    pub fn max_indices(&self) -> Option<(usize, usize)> {
        let max_row = self.rows.iter().copied().max()?;
        let max_col = self.cols.iter().copied().max()?;
        Some((max_row, max_col))
    }

    /// Convert to an `nrows x ncols` nalgebra-sparse COO matrix (duplicates kept)
    pub fn to_coo(&self, nrows: usize, ncols: usize) -> FemResult<CooMatrix<f64>> {
        CooMatrix::try_from_triplets(
            nrows,
            ncols,
            self.rows.clone(),
            self.cols.clone(),
            self.data.clone(),
        )
        .map_err(|err| FemError::SparseFormat(err.to_string()))
    }

    /// Convert to CSR format, summing duplicate entries
    pub fn to_csr(&self, nrows: usize, ncols: usize) -> FemResult<CsrMatrix<f64>> {
        let coo = self.to_coo(nrows, ncols)?;
        Ok(CsrMatrix::from(&coo))
    }

    /// Convert to a dense `nrows x ncols` matrix, summing duplicate entries
    ///
    /// Intended for small meshes, comparison and debugging.
    pub fn to_dense(&self, nrows: usize, ncols: usize) -> FemResult<Mat> {
        if let Some((max_row, max_col)) = self.max_indices() {
            if max_row >= nrows || max_col >= ncols {
                return Err(FemError::SparseFormat(format!(
                    "entry ({max_row}, {max_col}) outside a {nrows}x{ncols} matrix"
                )));
            }
        }

        let mut mat = Mat::zeros(nrows, ncols);
        for (row, col, value) in self.iter() {
            mat[(row, col)] += value;
        }
        Ok(mat)
    }

    /// Matrix-vector product `y = A x` with duplicates summed implicitly
    ///
    /// `nrows` is the length of the result.
    pub fn matvec(&self, x: &DVector<f64>, nrows: usize) -> FemResult<DVector<f64>> {
        if let Some((max_row, max_col)) = self.max_indices() {
            if max_row >= nrows || max_col >= x.len() {
                return Err(FemError::SparseFormat(format!(
                    "entry ({max_row}, {max_col}) outside a {nrows}x{} operator",
                    x.len()
                )));
            }
        }

        let mut y = DVector::zeros(nrows);
        for (row, col, value) in self.iter() {
            y[row] += value * x[col];
        }
        Ok(y)
    }
}

/// Per-design-variable derivative blocks of the global stiffness matrix
///
/// Block `v` holds the `block_len` triplets of `dK/d multiplier[v]`, stored at
/// offsets `v * block_len .. (v + 1) * block_len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityTriplets {
    triplets: Triplets,
    block_len: usize,
}

impl SensitivityTriplets {
    pub(crate) fn new(triplets: Triplets, block_len: usize) -> Self {
        debug_assert!(block_len > 0 && triplets.len() % block_len == 0);
        Self {
            triplets,
            block_len,
        }
    }

    /// Number of design variables covered
    pub fn num_variables(&self) -> usize {
        self.triplets.len() / self.block_len
    }

    /// Entries per design variable
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Design variable that storage entry `k` belongs to
    pub fn variable_of(&self, k: usize) -> usize {
        k / self.block_len
    }

    /// Derivative triplets for a single design variable
    pub fn variable(&self, index: usize) -> FemResult<Triplets> {
        let count = self.num_variables();
        if index >= count {
            return Err(FemError::DesignVariableOutOfRange { index, count });
        }
        let start = index * self.block_len;
        self.triplets.slice(start..start + self.block_len)
    }

    /// All blocks as one flat container
    pub fn triplets(&self) -> &Triplets {
        &self.triplets
    }

    pub(crate) fn triplets_mut(&mut self) -> &mut Triplets {
        &mut self.triplets
    }

    pub fn into_triplets(self) -> Triplets {
        self.triplets
    }
}

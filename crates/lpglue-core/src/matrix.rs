//! Compressed sparse constraint matrices.
//!
//! A [`SparseMatrix`] stores either compressed sparse columns or compressed
//! sparse rows. The "major" dimension is the one with start offsets (columns
//! for [`MatrixOrientation::ColumnWise`], rows for
//! [`MatrixOrientation::RowWise`]); the "minor" dimension is the one the
//! stored indices refer to.

use crate::error::ProblemError;

/// Storage orientation of a compressed sparse matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixOrientation {
    /// Start offsets per column, row indices.
    ColumnWise,
    /// Start offsets per row, column indices.
    RowWise,
}

impl MatrixOrientation {
    pub fn as_str(self) -> &'static str {
        match self {
            MatrixOrientation::ColumnWise => "column_wise",
            MatrixOrientation::RowWise => "row_wise",
        }
    }

    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            MatrixOrientation::ColumnWise => MatrixOrientation::RowWise,
            MatrixOrientation::RowWise => MatrixOrientation::ColumnWise,
        }
    }
}

/// Compressed sparse matrix with `num_major + 1` start offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    orientation: MatrixOrientation,
    starts: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Build a matrix from raw compressed arrays.
    ///
    /// `starts` must hold one entry per major element plus a trailing entry
    /// equal to the number of nonzeros, begin at 0 and never decrease.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::InvalidMatrix`] when any of those invariants
    /// fails or `indices` and `values` differ in length.
    pub fn new(
        orientation: MatrixOrientation,
        starts: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self, ProblemError> {
        if starts.is_empty() {
            return Err(ProblemError::InvalidMatrix {
                reason: "starts must hold num_major + 1 entries".to_string(),
            });
        }
        if indices.len() != values.len() {
            return Err(ProblemError::InvalidMatrix {
                reason: format!(
                    "indices ({}) and values ({}) must be the same length",
                    indices.len(),
                    values.len()
                ),
            });
        }
        if starts[0] != 0 {
            return Err(ProblemError::InvalidMatrix {
                reason: "starts must begin at 0".to_string(),
            });
        }
        if let Some(pos) = starts.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(ProblemError::InvalidMatrix {
                reason: format!("starts must be non-decreasing (entry {})", pos + 1),
            });
        }
        if starts.last().copied().unwrap_or(0) != values.len() {
            return Err(ProblemError::InvalidMatrix {
                reason: "starts last entry must equal the number of nonzeros".to_string(),
            });
        }

        Ok(Self {
            orientation,
            starts,
            indices,
            values,
        })
    }

    /// A matrix with `num_major` empty major entries.
    pub fn empty(orientation: MatrixOrientation, num_major: usize) -> Self {
        Self {
            orientation,
            starts: vec![0; num_major + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Pack dense major entries, dropping explicit zeros.
    ///
    /// Each inner slice is one major element (a row for
    /// [`MatrixOrientation::RowWise`]); its positions are the minor indices.
    pub fn from_dense<R: AsRef<[f64]>>(orientation: MatrixOrientation, dense: &[R]) -> Self {
        let mut starts = Vec::with_capacity(dense.len() + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();

        starts.push(0);
        for major in dense {
            for (minor, &value) in major.as_ref().iter().enumerate() {
                if value != 0.0 {
                    indices.push(minor);
                    values.push(value);
                }
            }
            starts.push(indices.len());
        }

        tracing::trace!(
            component = "matrix",
            operation = "from_dense",
            status = "success",
            orientation = orientation.as_str(),
            num_major = dense.len(),
            nnz = values.len(),
            "Packed dense matrix"
        );

        Self {
            orientation,
            starts,
            indices,
            values,
        }
    }

    pub fn orientation(&self) -> MatrixOrientation {
        self.orientation
    }

    /// Number of columns (column-wise) or rows (row-wise).
    pub fn num_major(&self) -> usize {
        self.starts.len() - 1
    }

    pub fn num_nonzeros(&self) -> usize {
        self.values.len()
    }

    /// All start offsets, including the trailing nonzero count.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Start offsets without the trailing entry, one per major element.
    pub fn major_starts(&self) -> &[usize] {
        &self.starts[..self.num_major()]
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Minor indices and values of one major element.
    pub fn major(&self, index: usize) -> Option<(&[usize], &[f64])> {
        if index >= self.num_major() {
            return None;
        }
        let range = self.starts[index]..self.starts[index + 1];
        Some((&self.indices[range.clone()], &self.values[range]))
    }

    /// Ensure every stored index is below `bound`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::IndexOutOfBounds`] for the first offender.
    pub fn check_minor_bound(&self, bound: usize) -> Result<(), ProblemError> {
        match self.indices.iter().position(|&index| index >= bound) {
            Some(position) => Err(ProblemError::IndexOutOfBounds {
                index: self.indices[position],
                bound,
                position,
            }),
            None => Ok(()),
        }
    }

    /// Re-compress the same matrix in the other orientation.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::IndexOutOfBounds`] if an index is not below
    /// `num_minor`.
    pub fn transpose(&self, num_minor: usize) -> Result<Self, ProblemError> {
        self.check_minor_bound(num_minor)?;

        let mut starts = vec![0usize; num_minor + 1];
        for &minor in &self.indices {
            starts[minor + 1] += 1;
        }
        for i in 0..num_minor {
            starts[i + 1] += starts[i];
        }

        let mut cursor = starts.clone();
        let mut indices = vec![0usize; self.indices.len()];
        let mut values = vec![0.0; self.values.len()];
        for major in 0..self.num_major() {
            for pos in self.starts[major]..self.starts[major + 1] {
                let minor = self.indices[pos];
                let slot = cursor[minor];
                indices[slot] = major;
                values[slot] = self.values[pos];
                cursor[minor] += 1;
            }
        }

        Ok(Self {
            orientation: self.orientation.flipped(),
            starts,
            indices,
            values,
        })
    }

    /// Return this matrix in `target` orientation, transposing if needed.
    ///
    /// # Errors
    ///
    /// See [`SparseMatrix::transpose`].
    pub fn to_orientation(
        &self,
        target: MatrixOrientation,
        num_minor: usize,
    ) -> Result<Self, ProblemError> {
        if self.orientation == target {
            self.check_minor_bound(num_minor)?;
            Ok(self.clone())
        } else {
            self.transpose(num_minor)
        }
    }
}

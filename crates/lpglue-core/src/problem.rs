//! Complete problem descriptors handed to a solver in one piece.

use crate::error::ProblemError;
use crate::matrix::{MatrixOrientation, SparseMatrix};
use crate::types::{Bounds, Column, Integrality, Row, Sense};

/// Input data for building a [`Problem`].
pub struct ProblemInput<'a> {
    pub sense: Sense,
    pub offset: f64,
    pub col_cost: &'a [f64],
    pub col_lower: &'a [f64],
    pub col_upper: &'a [f64],
    pub row_lower: &'a [f64],
    pub row_upper: &'a [f64],
    pub matrix: SparseMatrix,
    /// `None` means every column is continuous.
    pub integrality: Option<&'a [Integrality]>,
}

/// A linear or mixed-integer program in struct-of-arrays form.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    sense: Sense,
    offset: f64,
    col_cost: Vec<f64>,
    col_lower: Vec<f64>,
    col_upper: Vec<f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    matrix: SparseMatrix,
    integrality: Vec<Integrality>,
}

/// Rows of the form `[lower, coeff..., upper]` split into their parts.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedRows {
    pub coefficients: Vec<Vec<f64>>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Problem {
    /// Build and validate a problem from raw arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if array lengths disagree, a bound is NaN, or the
    /// matrix dimensions and indices do not fit the column/row counts.
    pub fn new(input: ProblemInput<'_>) -> Result<Self, ProblemError> {
        let ProblemInput {
            sense,
            offset,
            col_cost,
            col_lower,
            col_upper,
            row_lower,
            row_upper,
            matrix,
            integrality,
        } = input;

        let num_columns = col_cost.len();
        let num_rows = row_lower.len();

        ensure_len("col_lower", num_columns, col_lower.len())?;
        ensure_len("col_upper", num_columns, col_upper.len())?;
        ensure_len("row_upper", num_rows, row_upper.len())?;
        if let Some(integrality) = integrality {
            ensure_len("integrality", num_columns, integrality.len())?;
        }

        for (index, (&lower, &upper)) in col_lower.iter().zip(col_upper).enumerate() {
            ensure_bounds("column", index, lower, upper)?;
        }
        for (index, (&lower, &upper)) in row_lower.iter().zip(row_upper).enumerate() {
            ensure_bounds("row", index, lower, upper)?;
        }

        let (num_major, num_minor) = match matrix.orientation() {
            MatrixOrientation::ColumnWise => (num_columns, num_rows),
            MatrixOrientation::RowWise => (num_rows, num_columns),
        };
        ensure_len("matrix starts", num_major + 1, matrix.starts().len())?;
        matrix.check_minor_bound(num_minor)?;

        let integrality = integrality
            .map(<[Integrality]>::to_vec)
            .unwrap_or_else(|| vec![Integrality::Continuous; num_columns]);

        tracing::debug!(
            component = "problem",
            operation = "build",
            status = "success",
            num_columns,
            num_rows,
            nnz = matrix.num_nonzeros(),
            orientation = matrix.orientation().as_str(),
            sense = sense.as_str(),
            "Built problem descriptor"
        );

        Ok(Self {
            sense,
            offset,
            col_cost: col_cost.to_vec(),
            col_lower: col_lower.to_vec(),
            col_upper: col_upper.to_vec(),
            row_lower: row_lower.to_vec(),
            row_upper: row_upper.to_vec(),
            matrix,
            integrality,
        })
    }

    /// Build a problem from column descriptors and dense bounded rows.
    ///
    /// Each bounded row is `[lower, coeff_0, ..., coeff_{n-1}, upper]`. The
    /// constraint matrix is stored row-wise with zeros dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a row does not carry one coefficient per column,
    /// or for any reason listed on [`Problem::new`].
    pub fn from_bounded_rows<R: AsRef<[f64]>>(
        sense: Sense,
        columns: &[Column],
        bounded_rows: &[R],
    ) -> Result<Self, ProblemError> {
        let split = split_bounded_rows(bounded_rows)?;
        for coefficients in &split.coefficients {
            ensure_len("row coefficients", columns.len(), coefficients.len())?;
        }

        let col_cost: Vec<f64> = columns.iter().map(|col| col.cost).collect();
        let col_lower: Vec<f64> = columns.iter().map(|col| col.bounds.lower).collect();
        let col_upper: Vec<f64> = columns.iter().map(|col| col.bounds.upper).collect();
        let integrality: Vec<Integrality> = columns.iter().map(|col| col.integrality).collect();

        Problem::new(ProblemInput {
            sense,
            offset: 0.0,
            col_cost: &col_cost,
            col_lower: &col_lower,
            col_upper: &col_upper,
            row_lower: &split.lower,
            row_upper: &split.upper,
            matrix: SparseMatrix::from_dense(MatrixOrientation::RowWise, &split.coefficients),
            integrality: Some(&integrality),
        })
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Constant term added to the objective.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn num_columns(&self) -> usize {
        self.col_cost.len()
    }

    pub fn num_rows(&self) -> usize {
        self.row_lower.len()
    }

    pub fn num_nonzeros(&self) -> usize {
        self.matrix.num_nonzeros()
    }

    pub fn costs(&self) -> &[f64] {
        &self.col_cost
    }

    pub fn column_lower_bounds(&self) -> &[f64] {
        &self.col_lower
    }

    pub fn column_upper_bounds(&self) -> &[f64] {
        &self.col_upper
    }

    pub fn row_lower_bounds(&self) -> &[f64] {
        &self.row_lower
    }

    pub fn row_upper_bounds(&self) -> &[f64] {
        &self.row_upper
    }

    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    pub fn integrality(&self) -> &[Integrality] {
        &self.integrality
    }

    /// True when at least one column carries a discrete restriction.
    pub fn is_mip(&self) -> bool {
        self.integrality.iter().any(|kind| kind.is_discrete())
    }

    /// Change the integrality of a single column.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::ColumnOutOfRange`] for an unknown column.
    pub fn set_integrality(
        &mut self,
        column: usize,
        integrality: Integrality,
    ) -> Result<(), ProblemError> {
        let num_columns = self.num_columns();
        let slot = self
            .integrality
            .get_mut(column)
            .ok_or(ProblemError::ColumnOutOfRange {
                column,
                num_columns,
            })?;
        *slot = integrality;
        Ok(())
    }

    /// Column descriptor at `index`.
    pub fn column(&self, index: usize) -> Option<Column> {
        Some(Column {
            cost: *self.col_cost.get(index)?,
            bounds: Bounds::new(self.col_lower[index], self.col_upper[index]),
            integrality: self.integrality[index],
        })
    }

    /// Row descriptor at `index`.
    pub fn row(&self, index: usize) -> Option<Row> {
        Some(Row::new(
            *self.row_lower.get(index)?,
            self.row_upper[index],
        ))
    }

    /// Objective value `offset + cost . x` for the given column values.
    pub fn objective_at(&self, col_values: &[f64]) -> f64 {
        self.col_cost
            .iter()
            .zip(col_values)
            .fold(self.offset, |acc, (cost, value)| acc + cost * value)
    }

    /// Return a copy with the matrix stored in `orientation`.
    ///
    /// # Errors
    ///
    /// Propagates transpose errors; these cannot occur for a validated problem.
    pub fn with_orientation(&self, orientation: MatrixOrientation) -> Result<Self, ProblemError> {
        let num_minor = match self.matrix.orientation() {
            MatrixOrientation::ColumnWise => self.num_rows(),
            MatrixOrientation::RowWise => self.num_columns(),
        };
        let mut problem = self.clone();
        problem.matrix = self.matrix.to_orientation(orientation, num_minor)?;
        Ok(problem)
    }
}

/// Split rows of the form `[lower, coeff..., upper]` into bounds and dense coefficients.
///
/// # Errors
///
/// Returns [`ProblemError::MalformedBoundedRow`] for rows shorter than two
/// entries and [`ProblemError::LengthMismatch`] when rows differ in length.
pub fn split_bounded_rows<R: AsRef<[f64]>>(
    bounded_rows: &[R],
) -> Result<BoundedRows, ProblemError> {
    let mut split = BoundedRows {
        coefficients: Vec::with_capacity(bounded_rows.len()),
        lower: Vec::with_capacity(bounded_rows.len()),
        upper: Vec::with_capacity(bounded_rows.len()),
    };
    let expected_len = bounded_rows.first().map(|row| row.as_ref().len());

    for (index, row) in bounded_rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() < 2 {
            return Err(ProblemError::MalformedBoundedRow {
                row: index,
                len: row.len(),
            });
        }
        if let Some(expected) = expected_len {
            ensure_len("bounded row", expected, row.len())?;
        }
        let last = row.len() - 1;
        split.lower.push(row[0]);
        split.upper.push(row[last]);
        split.coefficients.push(row[1..last].to_vec());
    }

    Ok(split)
}

fn ensure_len(field: &'static str, expected: usize, got: usize) -> Result<(), ProblemError> {
    if expected == got {
        Ok(())
    } else {
        Err(ProblemError::LengthMismatch {
            field,
            expected,
            got,
        })
    }
}

fn ensure_bounds(
    kind: &'static str,
    index: usize,
    lower: f64,
    upper: f64,
) -> Result<(), ProblemError> {
    if !Bounds::new(lower, upper).has_nan() {
        Ok(())
    } else {
        Err(ProblemError::InvalidBounds {
            kind,
            index,
            lower,
            upper,
        })
    }
}

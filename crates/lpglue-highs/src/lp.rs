//! Conversion of a [`Problem`] into the integer arrays the C API expects.

use crate::error::HighsError;
use crate::ffi::HighsInt;
use crate::status::{integrality_code, orientation_code, sense_code};
use lpglue_core::Problem;

/// A problem plus its `HighsInt` views, ready for `Highs_passLp`,
/// `Highs_passMip`, `Highs_lpCall` or `Highs_mipCall`.
pub(crate) struct HighsLp<'a> {
    pub(crate) problem: &'a Problem,
    pub(crate) num_col: HighsInt,
    pub(crate) num_row: HighsInt,
    pub(crate) num_nz: HighsInt,
    pub(crate) a_format: HighsInt,
    pub(crate) sense: HighsInt,
    /// One start per major element; the trailing sentinel is not passed.
    pub(crate) a_start: Vec<HighsInt>,
    pub(crate) a_index: Vec<HighsInt>,
    /// `None` for a pure LP.
    pub(crate) integrality: Option<Vec<HighsInt>>,
}

impl<'a> HighsLp<'a> {
    /// # Errors
    ///
    /// Returns [`HighsError::TooLarge`] if a dimension does not fit in `HighsInt`.
    pub(crate) fn new(problem: &'a Problem) -> Result<Self, HighsError> {
        let matrix = problem.matrix();
        let integrality = problem.is_mip().then(|| {
            problem
                .integrality()
                .iter()
                .map(|&kind| integrality_code(kind))
                .collect()
        });

        Ok(HighsLp {
            problem,
            num_col: to_highs_int("num_col", problem.num_columns())?,
            num_row: to_highs_int("num_row", problem.num_rows())?,
            num_nz: to_highs_int("num_nz", problem.num_nonzeros())?,
            a_format: orientation_code(matrix.orientation()),
            sense: sense_code(problem.sense()),
            a_start: to_highs_ints("a_start", matrix.major_starts())?,
            a_index: to_highs_ints("a_index", matrix.indices())?,
            integrality,
        })
    }

    /// Length invariants the FFI layer relies on before passing pointers.
    pub(crate) fn is_consistent(&self) -> bool {
        let problem = self.problem;
        let num_col = problem.num_columns();
        let num_row = problem.num_rows();
        let num_major = match problem.matrix().orientation() {
            lpglue_core::MatrixOrientation::ColumnWise => num_col,
            lpglue_core::MatrixOrientation::RowWise => num_row,
        };

        problem.costs().len() == num_col
            && problem.column_lower_bounds().len() == num_col
            && problem.column_upper_bounds().len() == num_col
            && problem.row_upper_bounds().len() == num_row
            && self.a_start.len() == num_major
            && self.a_index.len() == problem.num_nonzeros()
            && problem.matrix().values().len() == problem.num_nonzeros()
            && self
                .integrality
                .as_ref()
                .is_none_or(|codes| codes.len() == num_col)
    }
}

pub(crate) fn to_highs_int(field: &'static str, value: usize) -> Result<HighsInt, HighsError> {
    HighsInt::try_from(value).map_err(|_| HighsError::TooLarge { field, value })
}

pub(crate) fn to_highs_ints(
    field: &'static str,
    values: &[usize],
) -> Result<Vec<HighsInt>, HighsError> {
    values
        .iter()
        .map(|&value| to_highs_int(field, value))
        .collect()
}

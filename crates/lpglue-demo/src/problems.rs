//! Demo problem data.
//!
//! ```text
//! minimize    2 x0 + 3 x1
//! subject to             x1 <= 6
//!             10 <= x0 + 2 x1 <= 14
//!              8 <= 2 x0 + x1
//!             0 <= x0 <= 3, 1 <= x1
//! ```

use lpglue_core::{
    Integrality, MatrixOrientation, Problem, ProblemError, ProblemInput, Sense, SparseMatrix,
};

pub const NUM_COL: usize = 2;
pub const NUM_ROW: usize = 3;

pub const COL_COST: [f64; NUM_COL] = [2.0, 3.0];
pub const COL_LOWER: [f64; NUM_COL] = [0.0, 1.0];
pub const COL_UPPER: [f64; NUM_COL] = [3.0, f64::INFINITY];
pub const ROW_LOWER: [f64; NUM_ROW] = [f64::NEG_INFINITY, 10.0, 8.0];
pub const ROW_UPPER: [f64; NUM_ROW] = [6.0, 14.0, f64::INFINITY];

/// Constraint matrix stored in `orientation`.
pub fn constraint_matrix(orientation: MatrixOrientation) -> Result<SparseMatrix, ProblemError> {
    match orientation {
        MatrixOrientation::RowWise => SparseMatrix::new(
            orientation,
            vec![0, 1, 3, 5],
            vec![1, 0, 1, 0, 1],
            vec![1.0, 1.0, 2.0, 2.0, 1.0],
        ),
        MatrixOrientation::ColumnWise => SparseMatrix::new(
            orientation,
            vec![0, 2, 5],
            vec![1, 2, 0, 1, 2],
            vec![1.0, 2.0, 1.0, 2.0, 1.0],
        ),
    }
}

/// The demo problem, as an LP when `integrality` is `None`.
pub fn example_problem(
    orientation: MatrixOrientation,
    integrality: Option<&[Integrality]>,
) -> Result<Problem, ProblemError> {
    Problem::new(ProblemInput {
        sense: Sense::Minimize,
        offset: 0.0,
        col_cost: &COL_COST,
        col_lower: &COL_LOWER,
        col_upper: &COL_UPPER,
        row_lower: &ROW_LOWER,
        row_upper: &ROW_UPPER,
        matrix: constraint_matrix(orientation)?,
        integrality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientations_describe_the_same_matrix() {
        let row_wise = constraint_matrix(MatrixOrientation::RowWise).expect("row-wise");
        let column_wise = constraint_matrix(MatrixOrientation::ColumnWise).expect("column-wise");

        let transposed = row_wise
            .to_orientation(MatrixOrientation::ColumnWise, NUM_COL)
            .expect("transpose");
        assert_eq!(transposed, column_wise);
    }

    #[test]
    fn example_problem_dimensions() {
        let problem = example_problem(MatrixOrientation::ColumnWise, None).expect("problem");
        assert_eq!(problem.num_columns(), NUM_COL);
        assert_eq!(problem.num_rows(), NUM_ROW);
        assert_eq!(problem.num_nonzeros(), 5);
        assert!(!problem.is_mip());

        let integer = [Integrality::Integer; NUM_COL];
        let mip = example_problem(MatrixOrientation::RowWise, Some(&integer)).expect("mip");
        assert!(mip.is_mip());
    }

    #[test]
    fn known_optimum_is_feasible() {
        let problem = example_problem(MatrixOrientation::RowWise, None).expect("problem");
        let x = [2.0, 4.0];
        assert!((problem.objective_at(&x) - 16.0).abs() < 1e-12);

        for row in 0..NUM_ROW {
            let (columns, values) = problem.matrix().major(row).expect("row");
            let activity: f64 = columns
                .iter()
                .zip(values)
                .map(|(&col, value)| value * x[col])
                .sum();
            let bounds = problem.row(row).expect("row bounds").bounds;
            assert!(activity >= bounds.lower && activity <= bounds.upper);
        }
    }
}

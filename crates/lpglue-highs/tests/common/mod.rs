#![allow(dead_code)]

use lpglue_core::{
    Bounds, Column, Integrality, MatrixOrientation, Problem, ProblemInput, Sense, SparseMatrix,
};

pub const TOLERANCE: f64 = 1e-6;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// minimize 2x0 + 3x1
/// subject to x1 <= 6, 10 <= x0 + 2x1 <= 14, 8 <= 2x0 + x1,
/// 0 <= x0 <= 3, x1 >= 1. Optimum x = (2, 4), objective 16.
pub fn example_columns() -> Vec<Column> {
    vec![
        Column::continuous(2.0, Bounds::new(0.0, 3.0)),
        Column::continuous(3.0, Bounds::at_least(1.0)),
    ]
}

pub const ROW_LOWER: [f64; 3] = [f64::NEG_INFINITY, 10.0, 8.0];
pub const ROW_UPPER: [f64; 3] = [6.0, 14.0, f64::INFINITY];

pub fn example_rows() -> SparseMatrix {
    SparseMatrix::new(
        MatrixOrientation::RowWise,
        vec![0, 1, 3, 5],
        vec![1, 0, 1, 0, 1],
        vec![1.0, 1.0, 2.0, 2.0, 1.0],
    )
    .expect("row-wise matrix")
}

pub fn example_columns_matrix() -> SparseMatrix {
    SparseMatrix::new(
        MatrixOrientation::ColumnWise,
        vec![0, 2, 5],
        vec![1, 2, 0, 1, 2],
        vec![1.0, 2.0, 1.0, 2.0, 1.0],
    )
    .expect("column-wise matrix")
}

pub fn example_problem(matrix: SparseMatrix, integrality: Option<&[Integrality]>) -> Problem {
    Problem::new(ProblemInput {
        sense: Sense::Minimize,
        offset: 0.0,
        col_cost: &[2.0, 3.0],
        col_lower: &[0.0, 1.0],
        col_upper: &[3.0, f64::INFINITY],
        row_lower: &ROW_LOWER,
        row_upper: &ROW_UPPER,
        matrix,
        integrality,
    })
    .expect("example problem")
}

/// maximize x subject to x <= 1.5, 0 <= x <= 10.
pub fn toggle_problem(integrality: Integrality) -> Problem {
    let columns = [Column {
        cost: 1.0,
        bounds: Bounds::new(0.0, 10.0),
        integrality,
    }];
    Problem::from_bounded_rows(Sense::Maximize, &columns, &[[f64::NEG_INFINITY, 1.0, 1.5]])
        .expect("toggle problem")
}

/// minimize x subject to x <= 5, with column bounds 0 <= x <= -1.
pub fn inverted_bounds_problem() -> Problem {
    let columns = [Column::continuous(1.0, Bounds::new(0.0, -1.0))];
    Problem::from_bounded_rows(Sense::Minimize, &columns, &[[f64::NEG_INFINITY, 1.0, 5.0]])
        .expect("inverted bounds still build")
}

#![allow(clippy::float_cmp)]

mod common;

use common::{
    assert_close, example_columns_matrix, example_problem, example_rows, init_tracing,
    inverted_bounds_problem, toggle_problem,
};
use lpglue_core::{Integrality, MatrixOrientation};
use lpglue_highs::{BasisStatus, ModelStatus, RunStatus, call};

#[test]
fn test_lp_call_column_wise() {
    init_tracing();
    let problem = example_problem(example_columns_matrix(), None);
    let solution = call::solve(&problem).expect("lp call");

    assert_eq!(solution.run_status(), Some(RunStatus::Ok));
    assert_eq!(solution.model_status(), ModelStatus::Optimal);
    assert_close(solution.objective_value(), 16.0);
    assert_close(solution.col_values()[0], 2.0);
    assert_close(solution.col_values()[1], 4.0);
    assert_eq!(solution.row_duals().len(), 3);

    let basis = solution.basis().expect("optimal LP carries a basis");
    assert_eq!(basis.row_status[0], BasisStatus::Basic);
}

#[test]
fn test_lp_call_orientations_agree() {
    let column_wise = call::solve(&example_problem(example_columns_matrix(), None)).expect("cols");
    let row_wise = call::solve(&example_problem(example_rows(), None)).expect("rows");

    assert_close(column_wise.objective_value(), row_wise.objective_value());
    for (a, b) in column_wise.row_values().iter().zip(row_wise.row_values()) {
        assert_close(*a, *b);
    }
}

#[test]
fn test_mip_call() {
    init_tracing();
    let integrality = [Integrality::Integer, Integrality::Integer];
    let problem = example_problem(example_rows(), Some(&integrality));
    assert!(problem.is_mip());
    assert_eq!(problem.matrix().orientation(), MatrixOrientation::RowWise);

    let solution = call::solve(&problem).expect("mip call");
    assert_eq!(solution.model_status(), ModelStatus::Optimal);
    assert_close(solution.objective_value(), 16.0);
    assert_close(solution.col_values()[0], 2.0);
    assert_close(solution.col_values()[1], 4.0);
    assert!(!solution.has_duals());
    assert!(solution.basis().is_none());
}

#[test]
fn test_integrality_changes_one_shot_optimum() {
    let lp = call::solve(&toggle_problem(Integrality::Continuous)).expect("lp");
    let mip = call::solve(&toggle_problem(Integrality::Integer)).expect("mip");

    assert!(lp.is_optimal());
    assert!(mip.is_optimal());
    assert_close(lp.objective_value(), 1.5);
    assert_close(mip.objective_value(), 1.0);
}

#[test]
fn test_inverted_bounds_reported_as_infeasible() {
    init_tracing();
    let solution = call::solve(&inverted_bounds_problem()).expect("lp call");

    assert!(matches!(
        solution.model_status(),
        ModelStatus::Infeasible | ModelStatus::UnboundedOrInfeasible
    ));
    assert!(!solution.is_feasible());
    assert!(solution.objective_value().is_nan());
    assert!(solution.basis().is_none());
}

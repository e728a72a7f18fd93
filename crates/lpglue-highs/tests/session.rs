#![allow(clippy::float_cmp)]

mod common;

use common::{
    ROW_LOWER, ROW_UPPER, assert_close, example_columns_matrix, example_problem, example_rows,
    init_tracing, inverted_bounds_problem, toggle_problem,
};
use lpglue_core::{Integrality, MatrixOrientation, Sense, SparseMatrix};
use lpglue_highs::{
    BasisStatus, HighsError, ModelStatus, OptionType, OptionValue, RunStatus, Session,
    SolutionStatus, SolverConfig,
};

fn build_example(session: &mut Session) {
    let inf = session.infinity().expect("infinity");
    session
        .add_columns(&[2.0, 3.0], &[0.0, 1.0], &[3.0, inf])
        .expect("add columns");
    session
        .add_rows(&ROW_LOWER, &ROW_UPPER, &example_rows())
        .expect("add rows");
}

#[test]
fn test_incremental_build_reaches_known_optimum() {
    init_tracing();
    let mut session = Session::new().expect("create");
    build_example(&mut session);

    assert_eq!(session.num_columns(), Ok(2));
    assert_eq!(session.num_rows(), Ok(3));
    assert_eq!(session.objective_sense(), Ok(Sense::Minimize));

    assert_eq!(session.run(), Ok(RunStatus::Ok));
    assert_eq!(session.model_status(), Ok(ModelStatus::Optimal));
    assert_eq!(session.solution_status(), Ok(SolutionStatus::Feasible));
    assert_close(session.objective_value().expect("objective"), 16.0);

    let mut col_value = [0.0; 2];
    let mut col_dual = [0.0; 2];
    let mut row_value = [0.0; 3];
    let mut row_dual = [0.0; 3];
    session
        .solution_into(&mut col_value, &mut col_dual, &mut row_value, &mut row_dual)
        .expect("solution");
    assert_close(col_value[0], 2.0);
    assert_close(col_value[1], 4.0);
    assert_close(row_value[0], 4.0);
    assert_close(row_value[1], 10.0);
    assert_close(row_value[2], 8.0);

    session.destroy().expect("destroy");
}

#[test]
fn test_basis_after_lp_solve() {
    init_tracing();
    let mut session = Session::new().expect("create");
    build_example(&mut session);
    session.run().expect("run");

    let basis = session.basis().expect("basis");
    assert_eq!(basis.col_status.len(), 2);
    assert_eq!(basis.row_status.len(), 3);
    assert_eq!(basis.num_basic(), 3);
    // x0 and x1 both sit strictly between their bounds.
    assert_eq!(basis.col_status, vec![BasisStatus::Basic, BasisStatus::Basic]);

    let solution = session.solution().expect("solution");
    assert!(solution.is_optimal());
    assert_eq!(solution.run_status(), Some(RunStatus::Ok));
    assert_eq!(solution.basis(), Some(&basis));
    assert_close(solution.objective_value(), 16.0);
}

#[test]
fn test_add_rows_rejects_missing_column() {
    init_tracing();
    let mut session = Session::new().expect("create");
    session
        .add_columns(&[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0])
        .expect("add columns");

    session
        .add_row(0.0, 1.0, &[0, 1], &[1.0, 1.0])
        .expect("row over existing columns");

    let err = session
        .add_row(0.0, 1.0, &[0, 2], &[1.0, 1.0])
        .expect_err("column 2 does not exist");
    assert_eq!(err.code(), "MATRIX_INDEX_OUT_OF_BOUNDS");
    assert_eq!(session.num_rows(), Ok(1));
}

#[test]
fn test_add_rows_checks_bound_lengths() {
    let mut session = Session::new().expect("create");
    session
        .add_columns(&[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0])
        .expect("add columns");

    let err = session
        .add_rows(&[0.0, 0.0], &[1.0], &example_rows())
        .expect_err("row_upper too short");
    assert_eq!(err.code(), "PROBLEM_LENGTH_MISMATCH");

    let err = session
        .add_rows(&[0.0], &[1.0], &example_rows())
        .expect_err("matrix has three rows");
    assert_eq!(err.code(), "PROBLEM_LENGTH_MISMATCH");
}

#[test]
fn test_destroy_twice_returns_destroyed() {
    let mut session = Session::new().expect("create");
    assert_eq!(session.destroy(), Ok(()));
    assert_eq!(
        session.destroy(),
        Err(HighsError::Destroyed {
            operation: "destroy"
        })
    );
    assert!(matches!(
        session.set_option("presolve", "off"),
        Err(HighsError::Destroyed { .. })
    ));
}

#[test]
fn test_destroyed_session_names_the_called_operation() {
    let mut session = Session::new().expect("create");
    session.destroy().expect("destroy");

    let destroyed = |operation| Err(HighsError::Destroyed { operation });
    assert_eq!(session.set_option("presolve", "off"), destroyed("set_option"));
    assert_eq!(
        session.option("presolve").map(|_| ()),
        destroyed("option")
    );
    assert_eq!(
        session.add_rows(&ROW_LOWER, &ROW_UPPER, &example_rows()),
        destroyed("add_rows")
    );
    assert_eq!(session.add_row(0.0, 1.0, &[0], &[1.0]), destroyed("add_row"));
    assert_eq!(
        session.add_columns(&[1.0], &[0.0], &[]),
        destroyed("add_columns")
    );
    assert_eq!(
        session.change_col_integrality(0, Integrality::Integer),
        destroyed("change_col_integrality")
    );
    assert_eq!(
        session.change_cols_integrality_by_range(0, 1, &[Integrality::Integer; 2]),
        destroyed("change_cols_integrality_by_range")
    );
    assert_eq!(
        session.change_cols_integrality_by_mask(&[true], &[Integrality::Integer]),
        destroyed("change_cols_integrality_by_mask")
    );
}

#[test]
fn test_option_round_trips() {
    init_tracing();
    let mut session = Session::new().expect("create");

    session.set_option("mip_detect_symmetry", false).expect("bool");
    assert_eq!(
        session.option("mip_detect_symmetry"),
        Ok(OptionValue::Bool(false))
    );

    session.set_option("simplex_iteration_limit", 12_345).expect("int");
    assert_eq!(
        session.option("simplex_iteration_limit"),
        Ok(OptionValue::Int(12_345))
    );

    session.set_option("time_limit", 42.5).expect("double");
    assert_eq!(session.option("time_limit"), Ok(OptionValue::Double(42.5)));

    session.set_option("presolve", "off").expect("string");
    assert_eq!(
        session.option("presolve"),
        Ok(OptionValue::Str("off".to_string()))
    );
}

#[test]
fn test_option_errors() {
    let mut session = Session::new().expect("create");

    let err = session
        .set_option("no_such_option", 1)
        .expect_err("unknown option");
    assert_eq!(
        err,
        HighsError::UnknownOption {
            name: "no_such_option".to_string()
        }
    );
    assert!(matches!(
        session.option("no_such_option"),
        Err(HighsError::UnknownOption { .. })
    ));

    let err = session
        .set_option("presolve", true)
        .expect_err("presolve is a string option");
    assert_eq!(
        err,
        HighsError::OptionTypeMismatch {
            name: "presolve".to_string(),
            expected: OptionType::String,
            got: OptionType::Bool,
        }
    );

    assert_eq!(session.option_type("time_limit"), Ok(OptionType::Double));
    assert_eq!(session.option_type("output_flag"), Ok(OptionType::Bool));
}

#[test]
fn test_apply_config() {
    let config = SolverConfig::new()
        .with_time_limit(30.0)
        .with_presolve(false)
        .with_threads(1)
        .with_tolerance(1e-8);
    let session = Session::with_config(&config).expect("create with config");

    assert_eq!(session.option("time_limit"), Ok(OptionValue::Double(30.0)));
    assert_eq!(
        session.option("presolve"),
        Ok(OptionValue::Str("off".to_string()))
    );
    assert_eq!(
        session.option("primal_feasibility_tolerance"),
        Ok(OptionValue::Double(1e-8))
    );
    assert_eq!(session.option("output_flag"), Ok(OptionValue::Bool(false)));
}

#[test]
fn test_integrality_changes_optimum() {
    init_tracing();
    let mut session = Session::new().expect("create");
    session
        .pass_problem(&toggle_problem(Integrality::Continuous))
        .expect("pass");
    assert_eq!(session.objective_sense(), Ok(Sense::Maximize));

    session.run().expect("run lp");
    assert_eq!(session.model_status(), Ok(ModelStatus::Optimal));
    assert_close(session.objective_value().expect("objective"), 1.5);

    session
        .change_col_integrality(0, Integrality::Integer)
        .expect("integer");
    session.run().expect("run mip");
    assert_eq!(session.model_status(), Ok(ModelStatus::Optimal));
    assert_close(session.objective_value().expect("objective"), 1.0);

    session
        .change_cols_integrality_by_range(0, 0, &[Integrality::Continuous])
        .expect("continuous");
    session.run().expect("rerun lp");
    assert_close(session.objective_value().expect("objective"), 1.5);

    session
        .change_cols_integrality_by_mask(&[true], &[Integrality::Integer])
        .expect("mask");
    session.run().expect("rerun mip");
    assert_close(session.objective_value().expect("objective"), 1.0);
}

#[test]
fn test_integrality_change_out_of_range() {
    let mut session = Session::new().expect("create");
    session
        .add_columns(&[1.0], &[0.0], &[1.0])
        .expect("add columns");

    let err = session
        .change_col_integrality(1, Integrality::Integer)
        .expect_err("column 1 missing");
    assert_eq!(err.code(), "COLUMN_OUT_OF_RANGE");

    let err = session
        .change_cols_integrality_by_mask(&[true, false], &[Integrality::Integer; 2])
        .expect_err("mask too long");
    assert_eq!(err.code(), "PROBLEM_LENGTH_MISMATCH");
}

#[test]
fn test_integrality_range_must_be_ordered() {
    let mut session = Session::new().expect("create");
    session
        .add_columns(&[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0])
        .expect("add columns");

    let err = session
        .change_cols_integrality_by_range(1, 0, &[Integrality::Integer; 2])
        .expect_err("reversed range");
    assert_eq!(err.code(), "COLUMN_RANGE_INVALID");
    assert!(err.to_string().contains("1..=0"));
}

#[test]
fn test_solve_problem_both_orientations() {
    init_tracing();
    for matrix in [example_rows(), example_columns_matrix()] {
        let orientation = matrix.orientation();
        let problem = example_problem(matrix, None);
        let mut session = Session::new().expect("create");

        let solution = session.solve_problem(&problem).expect("solve");
        assert!(solution.is_optimal(), "{}", orientation.as_str());
        assert_close(solution.objective_value(), 16.0);
        assert_close(solution.col_values()[0], 2.0);
        assert_close(solution.col_values()[1], 4.0);
    }
}

#[test]
fn test_inverted_bounds_solve_as_infeasible() {
    init_tracing();
    let mut session = Session::new().expect("create");
    let err = session
        .solve_problem(&inverted_bounds_problem())
        .expect_err("inverted bounds");
    assert!(matches!(
        err,
        HighsError::NotOptimal {
            status: ModelStatus::Infeasible | ModelStatus::UnboundedOrInfeasible
        }
    ));
}

#[test]
fn test_solution_before_run_has_no_run_status() {
    let mut session = Session::new().expect("create");
    let solution = session.solution().expect("empty solution");
    assert_eq!(solution.run_status(), None);
    assert_eq!(solution.model_status(), ModelStatus::NotSet);

    build_example(&mut session);
    let status = session.run().expect("run");
    assert_eq!(session.solution().expect("solution").run_status(), Some(status));
}

#[test]
fn test_solve_problem_reports_infeasible() {
    // x >= 5 and x <= 1 cannot both hold.
    let matrix = SparseMatrix::new(
        MatrixOrientation::RowWise,
        vec![0, 1, 2],
        vec![0, 0],
        vec![1.0, 1.0],
    )
    .expect("matrix");
    let problem = lpglue_core::Problem::new(lpglue_core::ProblemInput {
        sense: Sense::Minimize,
        offset: 0.0,
        col_cost: &[1.0],
        col_lower: &[0.0],
        col_upper: &[10.0],
        row_lower: &[5.0, f64::NEG_INFINITY],
        row_upper: &[f64::INFINITY, 1.0],
        matrix,
        integrality: None,
    })
    .expect("problem");

    let mut session = Session::new().expect("create");
    let err = session.solve_problem(&problem).expect_err("infeasible");
    assert_eq!(err.code(), "SOLVE_NOT_OPTIMAL");
    assert!(matches!(
        err,
        HighsError::NotOptimal {
            status: ModelStatus::Infeasible | ModelStatus::UnboundedOrInfeasible
        }
    ));
}

#[test]
fn test_objective_sense_and_offset() {
    let mut problem = toggle_problem(Integrality::Continuous);
    problem.set_offset(10.0);
    problem.set_sense(Sense::Minimize);

    let mut session = Session::new().expect("create");
    let solution = session.solve_problem(&problem).expect("solve");
    assert_close(solution.objective_value(), 10.0);

    session
        .set_objective_sense(Sense::Maximize)
        .expect("sense");
    session.run().expect("run");
    assert_close(session.objective_value().expect("objective"), 11.5);
}

#[test]
fn test_solution_buffers_are_checked() {
    let mut session = Session::new().expect("create");
    build_example(&mut session);
    session.run().expect("run");

    let mut col_value = [0.0; 1];
    let mut col_dual = [0.0; 2];
    let mut row_value = [0.0; 3];
    let mut row_dual = [0.0; 3];
    let err = session
        .solution_into(&mut col_value, &mut col_dual, &mut row_value, &mut row_dual)
        .expect_err("col_value too short");
    assert_eq!(
        err,
        HighsError::InvalidInput(lpglue_core::ProblemError::LengthMismatch {
            field: "col_value",
            expected: 2,
            got: 1,
        })
    );
}

#[test]
fn test_info_values_after_lp() {
    let mut session = Session::new().expect("create");
    build_example(&mut session);
    session.run().expect("run");

    assert!(session.simplex_iteration_count().is_ok());
    assert!(session.mip_gap().is_ok());
    assert!(session.infinity().expect("infinity").is_infinite());
}

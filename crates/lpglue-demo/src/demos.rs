//! The three ways of driving HiGHS shown by the binary.

use crate::problems::{
    COL_COST, COL_LOWER, COL_UPPER, NUM_COL, ROW_LOWER, ROW_UPPER, constraint_matrix,
    example_problem,
};
use crate::report::RunReport;
use lpglue_core::{Integrality, MatrixOrientation};
use lpglue_highs::{HighsError, Session, SolverConfig, call};
use tracing::{debug, info};

/// One-shot calls: the LP row-wise through `Highs_lpCall`, then the same
/// problem with integer columns column-wise through `Highs_mipCall`.
pub fn minimal() -> Result<Vec<RunReport>, HighsError> {
    let lp = example_problem(MatrixOrientation::RowWise, None)?;
    let lp_solution = call::solve(&lp)?;

    let integer = [Integrality::Integer; NUM_COL];
    let mip = example_problem(MatrixOrientation::ColumnWise, Some(&integer))?;
    let mip_solution = call::solve(&mip)?;

    info!(
        component = "demo",
        operation = "minimal",
        status = "success",
        lp_status = lp_solution.model_status().as_str(),
        mip_status = mip_solution.model_status().as_str(),
        "Finished one-shot calls"
    );

    Ok(vec![
        RunReport::from_solution("minimal", "lp_call", &lp_solution),
        RunReport::from_solution("minimal", "mip_call", &mip_solution),
    ])
}

/// Incremental session: add columns, add rows, run, read back, destroy.
pub fn session(config: &SolverConfig) -> Result<Vec<RunReport>, HighsError> {
    let mut session = Session::with_config(config)?;
    session.add_columns(&COL_COST, &COL_LOWER, &COL_UPPER)?;
    session.add_rows(
        &ROW_LOWER,
        &ROW_UPPER,
        &constraint_matrix(MatrixOrientation::RowWise)?,
    )?;

    session.run()?;
    let solution = session.solution()?;
    let report = RunReport::from_solution("session", "lp", &solution);
    session.destroy()?;

    info!(
        component = "demo",
        operation = "session",
        status = "success",
        model_status = solution.model_status().as_str(),
        "Finished session demo"
    );
    Ok(vec![report])
}

/// Options, integrality and both matrix orientations.
///
/// Builds the problem incrementally and makes both columns integer by
/// range, then passes it whole column-wise as a MIP and relaxes the first
/// column back to continuous.
pub fn full(config: &SolverConfig) -> Result<Vec<RunReport>, HighsError> {
    let mut reports = Vec::with_capacity(2);

    let mut session = Session::with_config(config)?;
    describe_options(&session)?;
    session.add_columns(&COL_COST, &COL_LOWER, &COL_UPPER)?;
    session.add_rows(
        &ROW_LOWER,
        &ROW_UPPER,
        &constraint_matrix(MatrixOrientation::RowWise)?,
    )?;
    let integer = [Integrality::Integer; NUM_COL];
    session.change_cols_integrality_by_range(0, NUM_COL - 1, &integer)?;
    reports.push(run_and_report(&mut session, "row-wise mip")?);
    session.destroy()?;

    let mut session = Session::with_config(config)?;
    let mip = example_problem(MatrixOrientation::ColumnWise, Some(&integer))?;
    session.pass_problem(&mip)?;
    session.change_col_integrality(0, Integrality::Continuous)?;
    reports.push(run_and_report(&mut session, "column-wise mixed")?);
    session.destroy()?;

    Ok(reports)
}

fn run_and_report(session: &mut Session, step: &str) -> Result<RunReport, HighsError> {
    let run_status = session.run()?;
    let model_status = session.model_status()?;
    if !model_status.is_optimal() {
        return Ok(RunReport::status_only(
            "full",
            step,
            Some(run_status),
            model_status,
        ));
    }

    let solution = session.solution()?;
    debug!(
        component = "demo",
        operation = "full",
        status = "success",
        step,
        objective = solution.objective_value(),
        mip_gap = session.mip_gap()?,
        simplex_iterations = session.simplex_iteration_count()?,
        "Solved step"
    );
    Ok(RunReport::from_solution("full", step, &solution))
}

fn describe_options(session: &Session) -> Result<(), HighsError> {
    for name in ["presolve", "solver", "time_limit", "threads", "output_flag"] {
        let value = session.option(name)?;
        debug!(
            component = "demo",
            operation = "describe_options",
            status = "success",
            option = name,
            option_type = session.option_type(name)?.as_str(),
            value = %value,
            "Current option value"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("objective value");
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn minimal_reaches_known_optimum() {
        let reports = minimal().expect("minimal demo");
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.model_status_code, 7);
            assert_close(report.objective_value, 16.0);
        }
        assert!(reports[0].rows.iter().all(|row| row.dual.is_some()));
        assert!(reports[1].rows.iter().all(|row| row.dual.is_none()));
    }

    #[test]
    fn session_reports_basis() {
        let reports = session(&SolverConfig::new()).expect("session demo");
        assert_eq!(reports.len(), 1);
        assert_close(reports[0].objective_value, 16.0);
        assert_eq!(reports[0].columns.len(), 2);
        assert_eq!(reports[0].columns[0].basis, Some("basic"));
    }

    #[test]
    fn full_solves_both_orientations() {
        let config = SolverConfig::new().with_presolve(true).with_mip_gap(1e-6);
        let reports = full(&config).expect("full demo");
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.model_status, "optimal");
            assert_close(report.objective_value, 16.0);
        }
    }
}

//! One-shot solves through `Highs_lpCall` and `Highs_mipCall`.
//!
//! No session is created by the caller; HiGHS builds and releases its own
//! instance inside the call.

use crate::error::HighsError;
use crate::ffi::{LpCallBuffers, MipCallBuffers, lp_call, mip_call};
use crate::lp::HighsLp;
use crate::solution::{Basis, Solution};
use crate::status::{ModelStatus, RunStatus};
use lpglue_core::Problem;
use std::time::Instant;
use tracing::{debug, warn};

/// Solve `problem` in one call.
///
/// Problems with any discrete column go through `Highs_mipCall`, which
/// reports no duals and no basis. The objective value is evaluated from the
/// returned column values since neither call reports it; it is NaN when the
/// model status carries no solution.
///
/// A failed run is not an error here: the returned [`Solution`] carries the
/// run and model status for the caller to inspect.
///
/// # Errors
///
/// Returns [`HighsError::TooLarge`] if a dimension does not fit in `HighsInt`,
/// or [`HighsError::UnexpectedCode`] if HiGHS returns an unknown basis code.
pub fn solve(problem: &Problem) -> Result<Solution, HighsError> {
    let lp = HighsLp::new(problem)?;
    let (num_col, num_row) = (problem.num_columns(), problem.num_rows());
    let started = Instant::now();

    let (solution, run_status) = if problem.is_mip() {
        let mut out = MipCallBuffers::new(num_col, num_row);
        let run_status = RunStatus::from_code(mip_call(&lp, &mut out));
        let model_status = ModelStatus::from_code(out.model_status);

        let solution = Solution {
            objective_value: objective_if_solved(problem, model_status, &out.col_value),
            col_value: out.col_value,
            col_dual: Vec::new(),
            row_value: out.row_value,
            row_dual: Vec::new(),
            basis: None,
            model_status,
            run_status: Some(run_status),
        };
        (solution, run_status)
    } else {
        let mut out = LpCallBuffers::new(num_col, num_row);
        let run_status = RunStatus::from_code(lp_call(&lp, &mut out));
        let model_status = ModelStatus::from_code(out.model_status);
        let basis = if model_status.is_optimal() {
            Some(Basis::from_codes(&out.col_basis, &out.row_basis)?)
        } else {
            None
        };

        let solution = Solution {
            objective_value: objective_if_solved(problem, model_status, &out.col_value),
            col_value: out.col_value,
            col_dual: out.col_dual,
            row_value: out.row_value,
            row_dual: out.row_dual,
            basis,
            model_status,
            run_status: Some(run_status),
        };
        (solution, run_status)
    };

    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    let entry_point = if problem.is_mip() { "mip_call" } else { "lp_call" };
    if run_status.is_error() {
        warn!(
            component = "call",
            operation = entry_point,
            status = "error",
            run_status = run_status.as_str(),
            model_status = solution.model_status.as_str(),
            duration_ms,
            "One-shot solve failed"
        );
    } else {
        debug!(
            component = "call",
            operation = entry_point,
            status = "success",
            num_columns = num_col,
            num_rows = num_row,
            orientation = problem.matrix().orientation().as_str(),
            model_status = solution.model_status.as_str(),
            objective = solution.objective_value,
            duration_ms,
            "One-shot solve finished"
        );
    }

    Ok(solution)
}

fn objective_if_solved(problem: &Problem, status: ModelStatus, col_value: &[f64]) -> f64 {
    if status.has_solution() {
        problem.objective_at(col_value)
    } else {
        f64::NAN
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use lpglue_core::{Bounds, Column, Sense};

    #[test]
    fn test_single_column_lp() {
        // minimize x subject to x <= 3, 1 <= x <= 4
        let columns = [Column::continuous(1.0, Bounds::new(1.0, 4.0))];
        let rows = [[f64::NEG_INFINITY, 1.0, 3.0]];
        let problem =
            Problem::from_bounded_rows(Sense::Minimize, &columns, &rows).expect("problem");

        let solution = solve(&problem).expect("solve");
        assert_eq!(solution.run_status(), Some(RunStatus::Ok));
        assert!(solution.is_optimal());
        assert!((solution.objective_value() - 1.0).abs() < 1e-9);
        assert_eq!(solution.row_values().len(), 1);
        assert!(solution.basis().is_some());
    }
}

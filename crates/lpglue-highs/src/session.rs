//! Owned session over one HiGHS instance.

use crate::config::SolverConfig;
use crate::error::HighsError;
use crate::ffi::{HighsInt, RawHighs, STATUS_ERROR};
use crate::lp::{HighsLp, to_highs_int, to_highs_ints};
use crate::options::{OptionType, OptionValue};
use crate::solution::{Basis, Solution};
use crate::status::{
    BasisStatus, ModelStatus, RunStatus, SolutionStatus, integrality_code, sense_code,
    sense_from_code,
};
use lpglue_core::{Integrality, MatrixOrientation, Problem, ProblemError, Sense, SparseMatrix};
use std::ffi::{CStr, CString};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// A HiGHS instance and everything loaded into it.
///
/// The instance is released exactly once, by [`Session::destroy`] or on drop.
/// Every call on a destroyed session returns [`HighsError::Destroyed`].
pub struct Session {
    raw: Option<RawHighs>,
    last_run: Option<RunStatus>,
}

impl Session {
    /// Create a session with HiGHS console output switched off.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::CreateFailed`] if HiGHS cannot allocate an instance.
    pub fn new() -> Result<Self, HighsError> {
        let Some(raw) = RawHighs::create() else {
            warn!(
                component = "session",
                operation = "create",
                status = "error",
                "Highs_create returned null"
            );
            return Err(HighsError::CreateFailed);
        };
        let mut session = Session {
            raw: Some(raw),
            last_run: None,
        };
        session.set_option("output_flag", false)?;

        debug!(
            component = "session",
            operation = "create",
            status = "success",
            "Created HiGHS session"
        );
        Ok(session)
    }

    /// Create a session and apply `config` to it.
    pub fn with_config(config: &SolverConfig) -> Result<Self, HighsError> {
        let mut session = Session::new()?;
        session.apply_config(config)?;
        Ok(session)
    }

    /// Apply every option set in `config`.
    pub fn apply_config(&mut self, config: &SolverConfig) -> Result<(), HighsError> {
        let options = config.options();
        for (name, value) in &options {
            self.set_option(name, value.clone())?;
        }
        debug!(
            component = "session",
            operation = "apply_config",
            status = "success",
            num_options = options.len(),
            "Applied solver configuration"
        );
        Ok(())
    }

    fn raw(&self, operation: &'static str) -> Result<&RawHighs, HighsError> {
        self.raw
            .as_ref()
            .ok_or(HighsError::Destroyed { operation })
    }

    fn raw_mut(&mut self, operation: &'static str) -> Result<&mut RawHighs, HighsError> {
        self.raw
            .as_mut()
            .ok_or(HighsError::Destroyed { operation })
    }

    pub fn is_destroyed(&self) -> bool {
        self.raw.is_none()
    }

    pub fn num_columns(&self) -> Result<usize, HighsError> {
        Ok(self.raw("num_columns")?.num_col())
    }

    pub fn num_rows(&self) -> Result<usize, HighsError> {
        Ok(self.raw("num_rows")?.num_row())
    }

    /// Append columns with the given costs and bounds.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::InvalidInput`] if the slices differ in length,
    /// or [`HighsError::EngineStatus`] if HiGHS rejects the columns.
    pub fn add_columns(
        &mut self,
        costs: &[f64],
        lower: &[f64],
        upper: &[f64],
    ) -> Result<(), HighsError> {
        let raw = self.raw_mut("add_columns")?;
        ensure_len("col_lower", costs.len(), lower.len())?;
        ensure_len("col_upper", costs.len(), upper.len())?;
        to_highs_int("num_new_col", costs.len())?;

        let code = raw.add_cols(costs, lower, upper);
        check_status("add_columns", code)?;

        trace!(
            component = "session",
            operation = "add_columns",
            status = "success",
            added = costs.len(),
            num_columns = raw.num_col(),
            "Added columns"
        );
        Ok(())
    }

    /// Append rows whose coefficients are given as a row-wise sparse matrix.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::OrientationMismatch`] for a column-wise matrix and
    /// [`HighsError::InvalidInput`] if a coefficient references a column that
    /// does not exist yet.
    pub fn add_rows(
        &mut self,
        lower: &[f64],
        upper: &[f64],
        matrix: &SparseMatrix,
    ) -> Result<(), HighsError> {
        let raw = self.raw_mut("add_rows")?;
        if matrix.orientation() != MatrixOrientation::RowWise {
            return Err(HighsError::OrientationMismatch {
                expected: MatrixOrientation::RowWise,
                got: matrix.orientation(),
            });
        }
        ensure_len("row_upper", lower.len(), upper.len())?;
        ensure_len("row starts", lower.len() + 1, matrix.starts().len())?;

        let num_columns = raw.num_col();
        if let Err(err) = matrix.check_minor_bound(num_columns) {
            warn!(
                component = "session",
                operation = "add_rows",
                status = "warn",
                num_columns,
                error = %err,
                "Rejected rows referencing missing columns"
            );
            return Err(err.into());
        }

        let starts = to_highs_ints("a_start", matrix.major_starts())?;
        let indices = to_highs_ints("a_index", matrix.indices())?;
        let code = raw.add_rows(lower, upper, &starts, &indices, matrix.values());
        check_status("add_rows", code)?;

        trace!(
            component = "session",
            operation = "add_rows",
            status = "success",
            added = lower.len(),
            nnz = matrix.num_nonzeros(),
            num_rows = raw.num_row(),
            "Added rows"
        );
        Ok(())
    }

    /// Append a single row.
    pub fn add_row(
        &mut self,
        lower: f64,
        upper: f64,
        columns: &[usize],
        values: &[f64],
    ) -> Result<(), HighsError> {
        self.raw("add_row")?;
        let matrix = SparseMatrix::new(
            MatrixOrientation::RowWise,
            vec![0, columns.len()],
            columns.to_vec(),
            values.to_vec(),
        )?;
        self.add_rows(&[lower], &[upper], &matrix)
    }

    /// Replace the incumbent model with `problem`.
    pub fn pass_problem(&mut self, problem: &Problem) -> Result<(), HighsError> {
        let lp = HighsLp::new(problem)?;
        let raw = self.raw_mut("pass_problem")?;
        let code = raw.pass_model(&lp);
        check_status("pass_problem", code)?;
        self.last_run = None;

        debug!(
            component = "session",
            operation = "pass_problem",
            status = "success",
            num_columns = problem.num_columns(),
            num_rows = problem.num_rows(),
            nnz = problem.num_nonzeros(),
            orientation = problem.matrix().orientation().as_str(),
            is_mip = problem.is_mip(),
            "Passed model to HiGHS"
        );
        Ok(())
    }

    pub fn set_objective_sense(&mut self, sense: Sense) -> Result<(), HighsError> {
        let raw = self.raw_mut("set_objective_sense")?;
        let code = raw.change_objective_sense(sense_code(sense));
        check_status("set_objective_sense", code)?;
        trace!(
            component = "session",
            operation = "set_objective_sense",
            status = "success",
            sense = sense.as_str(),
            "Changed objective sense"
        );
        Ok(())
    }

    pub fn objective_sense(&self) -> Result<Sense, HighsError> {
        let raw = self.raw("objective_sense")?;
        let Some(code) = raw.objective_sense() else {
            return Err(HighsError::EngineStatus {
                operation: "objective_sense",
                code: STATUS_ERROR,
            });
        };
        sense_from_code(code).ok_or(HighsError::UnexpectedCode {
            what: "objective sense",
            code,
        })
    }

    /// Declared type of the option `name`.
    pub fn option_type(&self, name: &str) -> Result<OptionType, HighsError> {
        let raw = self.raw("option_type")?;
        declared_option_type(raw, name, &option_name(name)?)
    }

    /// Set a HiGHS option.
    ///
    /// The value type must match the option's declared type.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::UnknownOption`], [`HighsError::OptionTypeMismatch`],
    /// or [`HighsError::InvalidOptionValue`] if HiGHS rejects the value.
    pub fn set_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<(), HighsError> {
        let value = value.into();
        let raw = self.raw_mut("set_option")?;
        let c_name = option_name(name)?;
        let expected = declared_option_type(raw, name, &c_name)?;
        if expected != value.option_type() {
            warn!(
                component = "session",
                operation = "set_option",
                status = "warn",
                option = name,
                expected = expected.as_str(),
                got = value.option_type().as_str(),
                "Option type mismatch"
            );
            return Err(HighsError::OptionTypeMismatch {
                name: name.to_string(),
                expected,
                got: value.option_type(),
            });
        }

        let code = match &value {
            OptionValue::Bool(flag) => raw.set_bool_option(&c_name, *flag),
            OptionValue::Int(number) => raw.set_int_option(&c_name, HighsInt::from(*number)),
            OptionValue::Double(number) => raw.set_double_option(&c_name, *number),
            OptionValue::Str(text) => {
                let c_value = CString::new(text.as_str()).map_err(|_| {
                    HighsError::InvalidOptionValue {
                        name: name.to_string(),
                    }
                })?;
                raw.set_string_option(&c_name, &c_value)
            }
        };
        if RunStatus::from_code(code).is_error() {
            warn!(
                component = "session",
                operation = "set_option",
                status = "error",
                option = name,
                value = %value,
                code,
                "HiGHS rejected option value"
            );
            return Err(HighsError::InvalidOptionValue {
                name: name.to_string(),
            });
        }

        trace!(
            component = "session",
            operation = "set_option",
            status = "success",
            option = name,
            value = %value,
            "Set option"
        );
        Ok(())
    }

    /// Read a HiGHS option as a typed value.
    pub fn option(&self, name: &str) -> Result<OptionValue, HighsError> {
        let raw = self.raw("option")?;
        let c_name = option_name(name)?;
        let option_type = declared_option_type(raw, name, &c_name)?;
        let value = match option_type {
            OptionType::Bool => raw.bool_option(&c_name).map(OptionValue::Bool),
            OptionType::Int => match raw.int_option(&c_name) {
                Some(code) => Some(OptionValue::Int(i32::try_from(code).map_err(|_| {
                    HighsError::UnexpectedCode {
                        what: "int option",
                        code,
                    }
                })?)),
                None => None,
            },
            OptionType::Double => raw.double_option(&c_name).map(OptionValue::Double),
            OptionType::String => raw.string_option(&c_name).map(OptionValue::Str),
        };
        value.ok_or(HighsError::EngineStatus {
            operation: "option",
            code: STATUS_ERROR,
        })
    }

    /// Change the integrality of one column.
    pub fn change_col_integrality(
        &mut self,
        col: usize,
        integrality: Integrality,
    ) -> Result<(), HighsError> {
        let raw = self.raw_mut("change_col_integrality")?;
        let num_columns = raw.num_col();
        if col >= num_columns {
            return Err(ProblemError::ColumnOutOfRange {
                column: col,
                num_columns,
            }
            .into());
        }
        let col_code = to_highs_int("col", col)?;
        let code = raw.change_col_integrality(col_code, integrality_code(integrality));
        check_status("change_col_integrality", code)?;
        trace!(
            component = "session",
            operation = "change_col_integrality",
            status = "success",
            col,
            integrality = integrality.as_str(),
            "Changed column integrality"
        );
        Ok(())
    }

    /// Change the integrality of columns `from..=to`.
    pub fn change_cols_integrality_by_range(
        &mut self,
        from: usize,
        to: usize,
        integrality: &[Integrality],
    ) -> Result<(), HighsError> {
        let raw = self.raw_mut("change_cols_integrality_by_range")?;
        if from > to {
            return Err(ProblemError::InvalidRange { from, to }.into());
        }
        let num_columns = raw.num_col();
        if to >= num_columns {
            return Err(ProblemError::ColumnOutOfRange {
                column: to,
                num_columns,
            }
            .into());
        }
        ensure_len("integrality", to - from + 1, integrality.len())?;

        let codes: Vec<HighsInt> = integrality.iter().map(|&kind| integrality_code(kind)).collect();
        let (from_code, to_code) = (to_highs_int("from", from)?, to_highs_int("to", to)?);
        let code = raw.change_cols_integrality_by_range(from_code, to_code, &codes);
        check_status("change_cols_integrality_by_range", code)?;
        trace!(
            component = "session",
            operation = "change_cols_integrality_by_range",
            status = "success",
            from,
            to,
            "Changed column integrality"
        );
        Ok(())
    }

    /// Change the integrality of every column whose mask entry is `true`.
    pub fn change_cols_integrality_by_mask(
        &mut self,
        mask: &[bool],
        integrality: &[Integrality],
    ) -> Result<(), HighsError> {
        let raw = self.raw_mut("change_cols_integrality_by_mask")?;
        let num_columns = raw.num_col();
        ensure_len("mask", num_columns, mask.len())?;
        ensure_len("integrality", num_columns, integrality.len())?;

        let mask_codes: Vec<HighsInt> = mask.iter().map(|&flag| HighsInt::from(flag)).collect();
        let codes: Vec<HighsInt> = integrality.iter().map(|&kind| integrality_code(kind)).collect();
        let code = raw.change_cols_integrality_by_mask(&mask_codes, &codes);
        check_status("change_cols_integrality_by_mask", code)?;
        trace!(
            component = "session",
            operation = "change_cols_integrality_by_mask",
            status = "success",
            changed = mask.iter().filter(|&&flag| flag).count(),
            "Changed column integrality"
        );
        Ok(())
    }

    /// Solve the incumbent model.
    ///
    /// Returns the run status whatever the outcome; check [`Session::model_status`]
    /// for optimality. Only a destroyed session is an error.
    pub fn run(&mut self) -> Result<RunStatus, HighsError> {
        let started = Instant::now();
        let raw = self.raw_mut("run")?;
        let status = RunStatus::from_code(raw.run());
        let model_status = ModelStatus::from_code(raw.model_status());
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.last_run = Some(status);

        if status.is_error() {
            warn!(
                component = "session",
                operation = "run",
                status = "error",
                run_status = status.as_str(),
                model_status = model_status.as_str(),
                duration_ms,
                "HiGHS run failed"
            );
        } else {
            debug!(
                component = "session",
                operation = "run",
                status = "success",
                run_status = status.as_str(),
                model_status = model_status.as_str(),
                duration_ms,
                "HiGHS run finished"
            );
        }
        Ok(status)
    }

    pub fn model_status(&self) -> Result<ModelStatus, HighsError> {
        Ok(ModelStatus::from_code(self.raw("model_status")?.model_status()))
    }

    pub fn objective_value(&self) -> Result<f64, HighsError> {
        Ok(self.raw("objective_value")?.objective_value())
    }

    /// Whether HiGHS holds a primal point, and whether it is feasible.
    pub fn solution_status(&self) -> Result<SolutionStatus, HighsError> {
        let code = self.int_info("solution_status", c"primal_solution_status")?;
        Ok(SolutionStatus::from_code(code))
    }

    pub fn simplex_iteration_count(&self) -> Result<usize, HighsError> {
        let count = self.int_info("simplex_iteration_count", c"simplex_iteration_count")?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Relative MIP gap of the last solve. HiGHS reports infinity for an LP.
    pub fn mip_gap(&self) -> Result<f64, HighsError> {
        let raw = self.raw("mip_gap")?;
        raw.double_info(c"mip_gap").ok_or(HighsError::EngineStatus {
            operation: "mip_gap",
            code: STATUS_ERROR,
        })
    }

    /// The value HiGHS treats as infinite in bounds.
    pub fn infinity(&self) -> Result<f64, HighsError> {
        Ok(self.raw("infinity")?.infinity())
    }

    fn int_info(&self, operation: &'static str, name: &CStr) -> Result<HighsInt, HighsError> {
        let raw = self.raw(operation)?;
        raw.int_info(name).ok_or(HighsError::EngineStatus {
            operation,
            code: STATUS_ERROR,
        })
    }

    /// Copy the current solution into caller-provided buffers.
    ///
    /// Column buffers must hold [`Session::num_columns`] entries and row
    /// buffers [`Session::num_rows`]. Values are meaningful only after an
    /// optimal run.
    pub fn solution_into(
        &self,
        col_value: &mut [f64],
        col_dual: &mut [f64],
        row_value: &mut [f64],
        row_dual: &mut [f64],
    ) -> Result<(), HighsError> {
        let raw = self.raw("solution")?;
        let (num_col, num_row) = (raw.num_col(), raw.num_row());
        ensure_len("col_value", num_col, col_value.len())?;
        ensure_len("col_dual", num_col, col_dual.len())?;
        ensure_len("row_value", num_row, row_value.len())?;
        ensure_len("row_dual", num_row, row_dual.len())?;

        let code = raw.solution(col_value, col_dual, row_value, row_dual);
        check_status("solution", code)?;
        Ok(())
    }

    /// Read the full solution, including the basis when one is valid.
    pub fn solution(&self) -> Result<Solution, HighsError> {
        let raw = self.raw("solution")?;
        let (num_col, num_row) = (raw.num_col(), raw.num_row());
        let mut col_value = vec![0.0; num_col];
        let mut col_dual = vec![0.0; num_col];
        let mut row_value = vec![0.0; num_row];
        let mut row_dual = vec![0.0; num_row];
        self.solution_into(&mut col_value, &mut col_dual, &mut row_value, &mut row_dual)?;

        let basis = match self.basis() {
            Ok(basis) => Some(basis),
            Err(HighsError::BasisUnavailable) => None,
            Err(err) => return Err(err),
        };

        Ok(Solution {
            col_value,
            col_dual,
            row_value,
            row_dual,
            basis,
            objective_value: raw.objective_value(),
            model_status: ModelStatus::from_code(raw.model_status()),
            run_status: self.last_run,
        })
    }

    /// Copy the basis status of every column and row into caller buffers.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::BasisUnavailable`] when HiGHS holds no valid
    /// basis, as after a MIP solve.
    pub fn basis_into(
        &self,
        col_status: &mut [BasisStatus],
        row_status: &mut [BasisStatus],
    ) -> Result<(), HighsError> {
        let raw = self.raw("basis")?;
        let (num_col, num_row) = (raw.num_col(), raw.num_row());
        ensure_len("col_status", num_col, col_status.len())?;
        ensure_len("row_status", num_row, row_status.len())?;

        if raw.int_info(c"basis_validity") != Some(1) {
            return Err(HighsError::BasisUnavailable);
        }

        let mut col_codes: Vec<HighsInt> = vec![0; num_col];
        let mut row_codes: Vec<HighsInt> = vec![0; num_row];
        let code = raw.basis(&mut col_codes, &mut row_codes);
        check_status("basis", code)?;

        let basis = Basis::from_codes(&col_codes, &row_codes)?;
        col_status.copy_from_slice(&basis.col_status);
        row_status.copy_from_slice(&basis.row_status);
        Ok(())
    }

    pub fn basis(&self) -> Result<Basis, HighsError> {
        let raw = self.raw("basis")?;
        let mut col_status = vec![BasisStatus::Lower; raw.num_col()];
        let mut row_status = vec![BasisStatus::Lower; raw.num_row()];
        self.basis_into(&mut col_status, &mut row_status)?;
        Ok(Basis {
            col_status,
            row_status,
        })
    }

    /// Pass `problem`, run, and return the solution if it is optimal.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::NotOptimal`] carrying the model status otherwise.
    pub fn solve_problem(&mut self, problem: &Problem) -> Result<Solution, HighsError> {
        self.pass_problem(problem)?;
        let run_status = self.run()?;
        if run_status.is_error() {
            return Err(HighsError::EngineStatus {
                operation: "run",
                code: run_status.code(),
            });
        }

        let status = self.model_status()?;
        if !status.is_optimal() {
            warn!(
                component = "session",
                operation = "solve_problem",
                status = "warn",
                model_status = status.as_str(),
                "Solve did not reach optimality"
            );
            return Err(HighsError::NotOptimal { status });
        }
        self.solution()
    }

    /// Release the HiGHS instance.
    ///
    /// # Errors
    ///
    /// Returns [`HighsError::Destroyed`] if the session was already destroyed.
    pub fn destroy(&mut self) -> Result<(), HighsError> {
        let Some(raw) = self.raw.take() else {
            warn!(
                component = "session",
                operation = "destroy",
                status = "warn",
                "Session already destroyed"
            );
            return Err(HighsError::Destroyed {
                operation: "destroy",
            });
        };
        drop(raw);
        debug!(
            component = "session",
            operation = "destroy",
            status = "success",
            "Destroyed HiGHS session"
        );
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.raw.is_some() {
            trace!(
                component = "session",
                operation = "drop",
                status = "success",
                "Releasing HiGHS session on drop"
            );
        }
    }
}

fn declared_option_type(
    raw: &RawHighs,
    name: &str,
    c_name: &CStr,
) -> Result<OptionType, HighsError> {
    let Some(code) = raw.option_type(c_name) else {
        return Err(HighsError::UnknownOption {
            name: name.to_string(),
        });
    };
    OptionType::from_code(code).ok_or(HighsError::UnexpectedCode {
        what: "option type",
        code,
    })
}

fn option_name(name: &str) -> Result<CString, HighsError> {
    CString::new(name).map_err(|_| HighsError::InvalidOptionValue {
        name: name.to_string(),
    })
}

fn ensure_len(field: &'static str, expected: usize, got: usize) -> Result<(), HighsError> {
    if expected == got {
        Ok(())
    } else {
        Err(ProblemError::LengthMismatch {
            field,
            expected,
            got,
        }
        .into())
    }
}

fn check_status(operation: &'static str, code: HighsInt) -> Result<RunStatus, HighsError> {
    let status = RunStatus::from_code(code);
    match status {
        RunStatus::Ok => Ok(status),
        RunStatus::Warning => {
            warn!(
                component = "session",
                operation,
                status = "warn",
                code,
                "HiGHS returned a warning"
            );
            Ok(status)
        }
        RunStatus::Error => {
            warn!(
                component = "session",
                operation,
                status = "error",
                code,
                "HiGHS returned an error"
            );
            Err(HighsError::EngineStatus { operation, code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_twice_is_detected() {
        let mut session = Session::new().expect("create");
        assert!(!session.is_destroyed());
        session.destroy().expect("first destroy");
        assert!(session.is_destroyed());
        assert_eq!(
            session.destroy(),
            Err(HighsError::Destroyed {
                operation: "destroy"
            })
        );
    }

    #[test]
    fn test_calls_after_destroy_fail() {
        let mut session = Session::new().expect("create");
        session.destroy().expect("destroy");

        assert!(matches!(
            session.run(),
            Err(HighsError::Destroyed { operation: "run" })
        ));
        assert!(matches!(
            session.add_columns(&[1.0], &[0.0], &[1.0]),
            Err(HighsError::Destroyed { .. })
        ));
        assert!(matches!(
            session.model_status(),
            Err(HighsError::Destroyed { .. })
        ));
    }

    #[test]
    fn test_add_columns_length_mismatch() {
        let mut session = Session::new().expect("create");
        let err = session
            .add_columns(&[1.0, 2.0], &[0.0], &[1.0, 1.0])
            .expect_err("mismatch");
        assert_eq!(err.code(), "PROBLEM_LENGTH_MISMATCH");
        assert_eq!(session.num_columns(), Ok(0));
    }

    #[test]
    fn test_add_rows_rejects_column_wise_matrix() {
        let mut session = Session::new().expect("create");
        session
            .add_columns(&[1.0], &[0.0], &[1.0])
            .expect("columns");
        let matrix = SparseMatrix::empty(MatrixOrientation::ColumnWise, 1);
        let err = session
            .add_rows(&[0.0], &[1.0], &matrix)
            .expect_err("column-wise");
        assert_eq!(err.code(), "MATRIX_ORIENTATION_MISMATCH");
    }

    #[test]
    fn test_new_session_is_quiet() {
        let session = Session::new().expect("create");
        assert_eq!(session.option("output_flag"), Ok(OptionValue::Bool(false)));
    }
}

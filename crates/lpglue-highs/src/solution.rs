//! Solution and basis types.

use crate::error::HighsError;
use crate::ffi::HighsInt;
use crate::status::{BasisStatus, ModelStatus, RunStatus};

/// Simplex basis of a solved model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    pub col_status: Vec<BasisStatus>,
    pub row_status: Vec<BasisStatus>,
}

impl Basis {
    pub(crate) fn from_codes(
        col_codes: &[HighsInt],
        row_codes: &[HighsInt],
    ) -> Result<Self, HighsError> {
        Ok(Basis {
            col_status: decode_basis(col_codes)?,
            row_status: decode_basis(row_codes)?,
        })
    }

    /// Number of basic columns and rows. Equals the row count for a valid basis.
    pub fn num_basic(&self) -> usize {
        self.col_status
            .iter()
            .chain(&self.row_status)
            .filter(|status| matches!(status, BasisStatus::Basic))
            .count()
    }
}

fn decode_basis(codes: &[HighsInt]) -> Result<Vec<BasisStatus>, HighsError> {
    codes
        .iter()
        .map(|&code| {
            BasisStatus::from_code(code).ok_or(HighsError::UnexpectedCode {
                what: "basis status",
                code,
            })
        })
        .collect()
}

/// Values read back after a solve.
///
/// Duals are empty for a one-shot MIP call, which reports none.
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) col_value: Vec<f64>,
    pub(crate) col_dual: Vec<f64>,
    pub(crate) row_value: Vec<f64>,
    pub(crate) row_dual: Vec<f64>,
    pub(crate) basis: Option<Basis>,
    pub(crate) objective_value: f64,
    pub(crate) model_status: ModelStatus,
    pub(crate) run_status: Option<RunStatus>,
}

impl Solution {
    /// Get the primal value of a column at the given index
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.col_value.get(index).copied()
    }

    /// Get the dual value (reduced cost) of a column at the given index
    pub fn get_column_dual(&self, index: usize) -> Option<f64> {
        self.col_dual.get(index).copied()
    }

    /// Get the activity of a row at the given index
    pub fn get_row_value(&self, index: usize) -> Option<f64> {
        self.row_value.get(index).copied()
    }

    /// Get the dual value (shadow price) of a row at the given index
    pub fn get_row_dual(&self, index: usize) -> Option<f64> {
        self.row_dual.get(index).copied()
    }

    pub fn col_values(&self) -> &[f64] {
        &self.col_value
    }

    pub fn col_duals(&self) -> &[f64] {
        &self.col_dual
    }

    pub fn row_values(&self) -> &[f64] {
        &self.row_value
    }

    pub fn row_duals(&self) -> &[f64] {
        &self.row_dual
    }

    pub fn basis(&self) -> Option<&Basis> {
        self.basis.as_ref()
    }

    /// Objective at the reported column values.
    ///
    /// Meaningful only when [`Solution::is_feasible`] holds. A one-shot call
    /// that produced no point reports NaN.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model_status
    }

    /// Status of the run that produced this solution, or `None` if the
    /// session was never run on the current model.
    pub fn run_status(&self) -> Option<RunStatus> {
        self.run_status
    }

    /// Check if solution is optimal
    pub fn is_optimal(&self) -> bool {
        self.model_status.is_optimal()
    }

    /// Check if the solve produced a usable point (includes optimal)
    pub fn is_feasible(&self) -> bool {
        self.model_status.has_solution()
    }

    pub fn has_duals(&self) -> bool {
        !self.col_dual.is_empty() || !self.row_dual.is_empty()
    }
}

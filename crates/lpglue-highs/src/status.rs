//! Status codes returned by HiGHS and conversions to and from its integer codes.

use crate::ffi::HighsInt;
use lpglue_core::{Integrality, MatrixOrientation, Sense};
use std::fmt;

/// Outcome of a HiGHS call at the run level (`kHighsStatus*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Ok,
    Warning,
    Error,
}

impl RunStatus {
    /// Decode a raw status. Anything HiGHS does not document is an error.
    pub fn from_code(code: HighsInt) -> Self {
        match code {
            0 => RunStatus::Ok,
            1 => RunStatus::Warning,
            _ => RunStatus::Error,
        }
    }

    pub fn code(self) -> HighsInt {
        match self {
            RunStatus::Ok => 0,
            RunStatus::Warning => 1,
            RunStatus::Error => -1,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, RunStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Ok => "ok",
            RunStatus::Warning => "warning",
            RunStatus::Error => "error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Model status after a solve (`HighsModelStatus`).
///
/// The same `Optimal` value is reported for LPs and MIPs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelStatus {
    NotSet,
    LoadError,
    ModelError,
    PresolveError,
    SolveError,
    PostsolveError,
    ModelEmpty,
    Optimal,
    Infeasible,
    UnboundedOrInfeasible,
    Unbounded,
    ObjectiveBound,
    ObjectiveTarget,
    ReachedTimeLimit,
    ReachedIterationLimit,
    Unknown,
    ReachedSolutionLimit,
    Interrupted,
}

impl ModelStatus {
    /// Decode a raw model status. Codes newer than this crate map to `Unknown`.
    pub fn from_code(code: HighsInt) -> Self {
        match code {
            0 => ModelStatus::NotSet,
            1 => ModelStatus::LoadError,
            2 => ModelStatus::ModelError,
            3 => ModelStatus::PresolveError,
            4 => ModelStatus::SolveError,
            5 => ModelStatus::PostsolveError,
            6 => ModelStatus::ModelEmpty,
            7 => ModelStatus::Optimal,
            8 => ModelStatus::Infeasible,
            9 => ModelStatus::UnboundedOrInfeasible,
            10 => ModelStatus::Unbounded,
            11 => ModelStatus::ObjectiveBound,
            12 => ModelStatus::ObjectiveTarget,
            13 => ModelStatus::ReachedTimeLimit,
            14 => ModelStatus::ReachedIterationLimit,
            16 => ModelStatus::ReachedSolutionLimit,
            17 => ModelStatus::Interrupted,
            _ => ModelStatus::Unknown,
        }
    }

    pub fn code(self) -> HighsInt {
        match self {
            ModelStatus::NotSet => 0,
            ModelStatus::LoadError => 1,
            ModelStatus::ModelError => 2,
            ModelStatus::PresolveError => 3,
            ModelStatus::SolveError => 4,
            ModelStatus::PostsolveError => 5,
            ModelStatus::ModelEmpty => 6,
            ModelStatus::Optimal => 7,
            ModelStatus::Infeasible => 8,
            ModelStatus::UnboundedOrInfeasible => 9,
            ModelStatus::Unbounded => 10,
            ModelStatus::ObjectiveBound => 11,
            ModelStatus::ObjectiveTarget => 12,
            ModelStatus::ReachedTimeLimit => 13,
            ModelStatus::ReachedIterationLimit => 14,
            ModelStatus::Unknown => 15,
            ModelStatus::ReachedSolutionLimit => 16,
            ModelStatus::Interrupted => 17,
        }
    }

    pub fn is_optimal(self) -> bool {
        matches!(self, ModelStatus::Optimal)
    }

    /// Load, model, presolve, solve or postsolve failure inside HiGHS.
    pub fn is_solver_error(self) -> bool {
        matches!(
            self,
            ModelStatus::LoadError
                | ModelStatus::ModelError
                | ModelStatus::PresolveError
                | ModelStatus::SolveError
                | ModelStatus::PostsolveError
        )
    }

    /// Optimal, or stopped at a limit with a usable point.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            ModelStatus::Optimal
                | ModelStatus::ReachedTimeLimit
                | ModelStatus::ReachedIterationLimit
        )
    }

    /// Short machine-friendly name.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelStatus::NotSet => "not_set",
            ModelStatus::LoadError => "load_error",
            ModelStatus::ModelError => "model_error",
            ModelStatus::PresolveError => "presolve_error",
            ModelStatus::SolveError => "solve_error",
            ModelStatus::PostsolveError => "postsolve_error",
            ModelStatus::ModelEmpty => "empty",
            ModelStatus::Optimal => "optimal",
            ModelStatus::Infeasible => "infeasible",
            ModelStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
            ModelStatus::Unbounded => "unbounded",
            ModelStatus::ObjectiveBound => "objective_bound",
            ModelStatus::ObjectiveTarget => "objective_target",
            ModelStatus::ReachedTimeLimit => "time_limit",
            ModelStatus::ReachedIterationLimit => "iteration_limit",
            ModelStatus::Unknown => "unknown",
            ModelStatus::ReachedSolutionLimit => "solution_limit",
            ModelStatus::Interrupted => "interrupted",
        }
    }

    /// Human-readable name, as printed in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelStatus::NotSet => "Model Not Set",
            ModelStatus::LoadError => "Model Load Error",
            ModelStatus::ModelError => "Model Error",
            ModelStatus::PresolveError => "Model Presolve Error",
            ModelStatus::SolveError => "Model Solve Error",
            ModelStatus::PostsolveError => "Model Postsolve Error",
            ModelStatus::ModelEmpty => "Model Empty",
            ModelStatus::Optimal => "Model Optimal",
            ModelStatus::Infeasible => "Model Infeasible",
            ModelStatus::UnboundedOrInfeasible => "Model Unbounded or Infeasible",
            ModelStatus::Unbounded => "Model Unbounded",
            ModelStatus::ObjectiveBound => "Model Objective Bound",
            ModelStatus::ObjectiveTarget => "Model Objective Target",
            ModelStatus::ReachedTimeLimit => "Model Time Limit",
            ModelStatus::ReachedIterationLimit => "Model Iteration Limit",
            ModelStatus::Unknown => "Model Unknown",
            ModelStatus::ReachedSolutionLimit => "Model Solution Limit",
            ModelStatus::Interrupted => "Model Interrupted",
        }
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Simplex basis status of a column or row (`HighsBasisStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasisStatus {
    /// Nonbasic at lower bound.
    Lower,
    Basic,
    /// Nonbasic at upper bound.
    Upper,
    /// Free nonbasic at zero.
    Zero,
    Nonbasic,
}

impl BasisStatus {
    pub fn from_code(code: HighsInt) -> Option<Self> {
        match code {
            0 => Some(BasisStatus::Lower),
            1 => Some(BasisStatus::Basic),
            2 => Some(BasisStatus::Upper),
            3 => Some(BasisStatus::Zero),
            4 => Some(BasisStatus::Nonbasic),
            _ => None,
        }
    }

    pub fn code(self) -> HighsInt {
        match self {
            BasisStatus::Lower => 0,
            BasisStatus::Basic => 1,
            BasisStatus::Upper => 2,
            BasisStatus::Zero => 3,
            BasisStatus::Nonbasic => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BasisStatus::Lower => "lower",
            BasisStatus::Basic => "basic",
            BasisStatus::Upper => "upper",
            BasisStatus::Zero => "zero",
            BasisStatus::Nonbasic => "nonbasic",
        }
    }
}

impl fmt::Display for BasisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether HiGHS holds a primal point, read from `primal_solution_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolutionStatus {
    None,
    Infeasible,
    Feasible,
}

impl SolutionStatus {
    pub fn from_code(code: HighsInt) -> Self {
        match code {
            1 => SolutionStatus::Infeasible,
            2 => SolutionStatus::Feasible,
            _ => SolutionStatus::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolutionStatus::None => "none",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Feasible => "feasible",
        }
    }
}

pub(crate) fn sense_code(sense: Sense) -> HighsInt {
    match sense {
        Sense::Minimize => 1,
        Sense::Maximize => -1,
    }
}

pub(crate) fn sense_from_code(code: HighsInt) -> Option<Sense> {
    match code {
        1 => Some(Sense::Minimize),
        -1 => Some(Sense::Maximize),
        _ => None,
    }
}

pub(crate) fn orientation_code(orientation: MatrixOrientation) -> HighsInt {
    match orientation {
        MatrixOrientation::ColumnWise => 1,
        MatrixOrientation::RowWise => 2,
    }
}

pub(crate) fn integrality_code(integrality: Integrality) -> HighsInt {
    match integrality {
        Integrality::Continuous => 0,
        Integrality::Integer => 1,
        Integrality::SemiContinuous => 2,
        Integrality::SemiInteger => 3,
        Integrality::ImplicitInteger => 4,
    }
}

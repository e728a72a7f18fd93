//! Errors returned by sessions and one-shot calls.

use crate::ffi::HighsInt;
use crate::options::OptionType;
use crate::status::ModelStatus;
use lpglue_core::{MatrixOrientation, ProblemError};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum HighsError {
    /// `Highs_create` returned null.
    CreateFailed,
    /// The session was already destroyed.
    Destroyed { operation: &'static str },
    /// Input rejected before reaching HiGHS.
    InvalidInput(ProblemError),
    OrientationMismatch {
        expected: MatrixOrientation,
        got: MatrixOrientation,
    },
    /// A count or index does not fit in `HighsInt`.
    TooLarge { field: &'static str, value: usize },
    UnknownOption { name: String },
    OptionTypeMismatch {
        name: String,
        expected: OptionType,
        got: OptionType,
    },
    /// Option name or string value contains an interior NUL, or HiGHS
    /// rejected the value.
    InvalidOptionValue { name: String },
    /// HiGHS returned an error status.
    EngineStatus {
        operation: &'static str,
        code: HighsInt,
    },
    /// No valid basis exists for the incumbent model.
    BasisUnavailable,
    NotOptimal { status: ModelStatus },
    /// HiGHS handed back a code outside the documented range.
    UnexpectedCode { what: &'static str, code: HighsInt },
}

impl HighsError {
    pub fn code(&self) -> &'static str {
        match self {
            HighsError::CreateFailed => "HIGHS_CREATE_FAILED",
            HighsError::Destroyed { .. } => "SESSION_DESTROYED",
            HighsError::InvalidInput(err) => err.code(),
            HighsError::OrientationMismatch { .. } => "MATRIX_ORIENTATION_MISMATCH",
            HighsError::TooLarge { .. } => "HIGHS_INT_OVERFLOW",
            HighsError::UnknownOption { .. } => "OPTION_UNKNOWN",
            HighsError::OptionTypeMismatch { .. } => "OPTION_TYPE_MISMATCH",
            HighsError::InvalidOptionValue { .. } => "OPTION_INVALID_VALUE",
            HighsError::EngineStatus { .. } => "HIGHS_STATUS_ERROR",
            HighsError::BasisUnavailable => "BASIS_UNAVAILABLE",
            HighsError::NotOptimal { .. } => "SOLVE_NOT_OPTIMAL",
            HighsError::UnexpectedCode { .. } => "HIGHS_UNEXPECTED_CODE",
        }
    }
}

impl fmt::Display for HighsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsError::CreateFailed => {
                write!(f, "[{}] Failed to create HiGHS instance", self.code())
            }
            HighsError::Destroyed { operation } => write!(
                f,
                "[{}] Cannot {operation}: session already destroyed",
                self.code()
            ),
            HighsError::InvalidInput(err) => write!(f, "{err}"),
            HighsError::OrientationMismatch { expected, got } => write!(
                f,
                "[{}] Expected {} matrix, got {}",
                self.code(),
                expected.as_str(),
                got.as_str()
            ),
            HighsError::TooLarge { field, value } => write!(
                f,
                "[{}] {field} value {value} exceeds the HiGHS integer range",
                self.code()
            ),
            HighsError::UnknownOption { name } => {
                write!(f, "[{}] Unknown option '{name}'", self.code())
            }
            HighsError::OptionTypeMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "[{}] Option '{name}' has type {expected}, got {got}",
                self.code()
            ),
            HighsError::InvalidOptionValue { name } => {
                write!(f, "[{}] Invalid value for option '{name}'", self.code())
            }
            HighsError::EngineStatus { operation, code } => write!(
                f,
                "[{}] HiGHS {operation} returned status {code}",
                self.code()
            ),
            HighsError::BasisUnavailable => {
                write!(f, "[{}] No valid basis available", self.code())
            }
            HighsError::NotOptimal { status } => write!(
                f,
                "[{}] Solve finished with status {}",
                self.code(),
                status.display_name()
            ),
            HighsError::UnexpectedCode { what, code } => {
                write!(f, "[{}] Unexpected {what} code {code}", self.code())
            }
        }
    }
}

impl std::error::Error for HighsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighsError::InvalidInput(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProblemError> for HighsError {
    fn from(err: ProblemError) -> Self {
        HighsError::InvalidInput(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(HighsError::CreateFailed.code(), "HIGHS_CREATE_FAILED");
        assert_eq!(
            HighsError::Destroyed { operation: "run" }.code(),
            "SESSION_DESTROYED"
        );
        assert_eq!(HighsError::BasisUnavailable.code(), "BASIS_UNAVAILABLE");
    }

    #[test]
    fn test_problem_error_passes_through() {
        let err = HighsError::from(ProblemError::IndexOutOfBounds {
            index: 5,
            bound: 2,
            position: 1,
        });
        assert_eq!(err.code(), "MATRIX_INDEX_OUT_OF_BOUNDS");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = HighsError::OptionTypeMismatch {
            name: "presolve".to_string(),
            expected: OptionType::String,
            got: OptionType::Bool,
        };
        assert_eq!(
            err.to_string(),
            "[OPTION_TYPE_MISMATCH] Option 'presolve' has type string, got bool"
        );

        let err = HighsError::Destroyed { operation: "run" };
        assert_eq!(
            err.to_string(),
            "[SESSION_DESTROYED] Cannot run: session already destroyed"
        );
    }
}

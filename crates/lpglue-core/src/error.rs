//! Problem descriptor error types.

/// Errors raised while building or validating a problem descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Two parallel arrays disagree on length.
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// A lower or upper bound is NaN.
    InvalidBounds {
        kind: &'static str,
        index: usize,
        lower: f64,
        upper: f64,
    },
    /// Start offsets or index arrays are malformed.
    InvalidMatrix { reason: String },
    /// A minor index points past the end of its dimension.
    IndexOutOfBounds {
        index: usize,
        bound: usize,
        position: usize,
    },
    /// A column position does not exist.
    ColumnOutOfRange { column: usize, num_columns: usize },
    /// A column range whose start lies after its end.
    InvalidRange { from: usize, to: usize },
    /// A bounded row is too short to hold both bounds.
    MalformedBoundedRow { row: usize, len: usize },
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::LengthMismatch { .. } => "PROBLEM_LENGTH_MISMATCH",
            ProblemError::InvalidBounds { .. } => "PROBLEM_INVALID_BOUNDS",
            ProblemError::InvalidMatrix { .. } => "MATRIX_INVALID_DATA",
            ProblemError::IndexOutOfBounds { .. } => "MATRIX_INDEX_OUT_OF_BOUNDS",
            ProblemError::ColumnOutOfRange { .. } => "COLUMN_OUT_OF_RANGE",
            ProblemError::InvalidRange { .. } => "COLUMN_RANGE_INVALID",
            ProblemError::MalformedBoundedRow { .. } => "ROW_MALFORMED",
        }
    }
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::LengthMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "[{}] {} length mismatch (expected {}, got {})",
                self.code(),
                field,
                expected,
                got
            ),
            ProblemError::InvalidBounds {
                kind,
                index,
                lower,
                upper,
            } => write!(
                f,
                "[{}] {} {} bounds invalid: NaN in [{}, {}]",
                self.code(),
                kind,
                index,
                lower,
                upper
            ),
            ProblemError::InvalidMatrix { reason } => {
                write!(f, "[{}] Invalid sparse matrix: {}", self.code(), reason)
            }
            ProblemError::IndexOutOfBounds {
                index,
                bound,
                position,
            } => write!(
                f,
                "[{}] Index {} at position {} out of bounds (must be < {})",
                self.code(),
                index,
                position,
                bound
            ),
            ProblemError::ColumnOutOfRange {
                column,
                num_columns,
            } => write!(
                f,
                "[{}] Column {} does not exist (num_columns = {})",
                self.code(),
                column,
                num_columns
            ),
            ProblemError::InvalidRange { from, to } => write!(
                f,
                "[{}] Column range {}..={} is reversed",
                self.code(),
                from,
                to
            ),
            ProblemError::MalformedBoundedRow { row, len } => write!(
                f,
                "[{}] Bounded row {} has {} entries; at least 2 are required",
                self.code(),
                row,
                len
            ),
        }
    }
}

impl std::error::Error for ProblemError {}

//! Problem descriptors for linear and mixed-integer programs.
//!
//! Everything here is plain data: column costs and bounds, row bounds, a
//! compressed sparse constraint matrix in either orientation, and optional
//! per-column integrality. Validation is limited to the length and index
//! invariants a solver relies on.

pub mod error;
pub mod matrix;
pub mod problem;
pub mod types;

pub use error::ProblemError;
pub use matrix::{MatrixOrientation, SparseMatrix};
pub use problem::{BoundedRows, Problem, ProblemInput, split_bounded_rows};
pub use types::{Bounds, Column, Integrality, Row, Sense};

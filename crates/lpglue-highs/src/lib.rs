//! Owned sessions and one-shot calls over the HiGHS LP/MIP solver.
//!
//! [`Session`] wraps one HiGHS instance for incremental model building,
//! option handling and solution retrieval. [`call::solve`] hands a complete
//! [`lpglue_core::Problem`] to HiGHS in a single call.

pub mod call;
pub mod config;
pub mod error;
mod ffi;
mod lp;
pub mod options;
pub mod session;
pub mod solution;
mod status;

pub use config::SolverConfig;
pub use error::HighsError;
pub use ffi::{HighsInt, highs_version};
pub use options::{OptionType, OptionValue};
pub use session::Session;
pub use solution::{Basis, Solution};
pub use status::{BasisStatus, ModelStatus, RunStatus, SolutionStatus};

//! Solver backends for optimization problems
//!
//! The crate talks to optimization backends exclusively through the
//! [`Solver`] trait: a backend receives the variables with their bounds, the
//! constraints, the objective, and the integer variable subset encoded in a
//! [`Problem`], and reports a status together with the variable assignment
//! and objective value when one exists.

pub mod microlp;

use thiserror::Error;

use crate::optimize::problem::Problem;
use crate::optimize::ProblemSolution;

pub use microlp::MicrolpSolver;

/// Interface implemented by optimization backends
pub trait Solver {
    /// Solve the given problem
    ///
    /// Infeasible and unbounded outcomes are reported through
    /// [`ProblemSolution::status`], not as errors; `Err` is reserved for
    /// solver level failures such as numerical breakdown.
    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError>;
}

/// Errors reported by solver backends
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// The backend failed with the attached diagnostic
    #[error("{0}")]
    Backend(String),
}

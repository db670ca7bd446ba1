//! Module for constructing and solving optimization problems

pub mod constraint;
pub mod fba;
pub mod objective;
pub mod problem;
pub mod solvers;
pub mod variable;

use indexmap::IndexMap;
use thiserror::Error;

use crate::optimize::problem::ProblemError;
use crate::optimize::solvers::SolverError;

/// Struct representing the solution to an optimization problem
#[derive(Debug, Clone)]
pub struct ProblemSolution {
    /// The status of the optimization problem, representing if the optimization was
    /// completed successfully
    pub status: OptimizationStatus,
    /// Optimized value of the objective
    ///
    /// Some(f64) if the optimization was completed successfully, None otherwise
    pub objective_value: Option<f64>,
    /// Values of the variables at the optimum
    ///
    /// Some(IndexMap), keyed by variable id, with values corresponding to variable
    /// values at optimum if the problem could be solved, None otherwise
    pub variable_values: Option<IndexMap<String, f64>>,
}

impl ProblemSolution {
    /// Create a solution representing a failed optimization with the given status
    pub(crate) fn failed(status: OptimizationStatus) -> Self {
        ProblemSolution {
            status,
            objective_value: None,
            variable_values: None,
        }
    }
}

/// Status of an optimization problem
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// Problem has been optimized
    Optimal,
    /// Problem can't be solved because it is infeasible (conflicting constraints)
    Infeasible,
    /// Problem can't be optimized because objective value is not bounded
    Unbounded,
}

/// Errors surfaced by optimization driven analysis
///
/// Infeasible and unbounded outcomes are reported to the caller and never
/// retried automatically; backend failures carry the backend diagnostic
/// verbatim.
#[derive(Error, Debug, Clone)]
pub enum OptimizeError {
    /// No flux vector satisfies the constraints
    #[error("the optimization problem is infeasible")]
    Infeasible,
    /// The objective value is not bounded
    #[error("the optimization problem is unbounded")]
    Unbounded,
    /// The solver backend reported a failure
    #[error("solver backend failure: {0}")]
    Backend(String),
    /// The derived optimization problem could not be constructed
    #[error("failed to construct optimization problem: {0}")]
    Problem(#[from] ProblemError),
}

impl From<SolverError> for OptimizeError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Backend(diagnostic) => OptimizeError::Backend(diagnostic),
        }
    }
}

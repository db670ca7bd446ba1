//! Implements a solver interface for microlp
//!
//! microlp is a pure Rust simplex implementation with branch and bound
//! support for integer variables, which makes it suitable for both the base
//! flux balance programs and the mixed integer minimal medium programs.
use indexmap::IndexMap;
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection};

use crate::optimize::constraint::{Constraint, ConstraintTerm};
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::Problem;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Solver backend backed by the microlp crate
///
/// Each call to [`Solver::solve`] translates the [`Problem`] into a fresh
/// microlp program, so repeated solves of an incrementally modified problem
/// (as done during minimal medium enumeration) always see the accumulated
/// constraint set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl Solver for MicrolpSolver {
    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        let direction = match problem.objective().sense() {
            ObjectiveSense::Minimize => OptimizationDirection::Minimize,
            ObjectiveSense::Maximize => OptimizationDirection::Maximize,
        };
        let objective_coefficients = problem.objective().coefficients();

        // Translate the variables, remembering the microlp handle for each id
        let mut backend = microlp::Problem::new(direction);
        let mut handles: IndexMap<&str, microlp::Variable> = IndexMap::new();
        for (id, variable) in problem.variables() {
            let coefficient = objective_coefficients.get(id).copied().unwrap_or(0.);
            let handle = match variable.variable_type {
                VariableType::Continuous => {
                    backend.add_var(coefficient, (variable.lower_bound, variable.upper_bound))
                }
                VariableType::Binary => backend.add_binary_var(coefficient),
            };
            handles.insert(id, handle);
        }

        // Translate the constraints; a two sided inequality becomes a Ge/Le pair
        for constraint in problem.constraints().values() {
            let build_expr = |terms: &[ConstraintTerm]| {
                let mut expr = LinearExpr::empty();
                for term in terms {
                    expr.add(handles[term.variable.as_str()], term.coefficient);
                }
                expr
            };
            match constraint {
                Constraint::Equality { terms, equals } => {
                    backend.add_constraint(build_expr(terms), ComparisonOp::Eq, *equals);
                }
                Constraint::Inequality {
                    terms,
                    lower_bound,
                    upper_bound,
                } => {
                    if lower_bound.is_finite() {
                        backend.add_constraint(build_expr(terms), ComparisonOp::Ge, *lower_bound);
                    }
                    if upper_bound.is_finite() {
                        backend.add_constraint(build_expr(terms), ComparisonOp::Le, *upper_bound);
                    }
                }
            }
        }

        match backend.solve() {
            Ok(solution) => {
                let variable_values = problem
                    .variables()
                    .iter()
                    .map(|(id, variable)| {
                        let value = match variable.variable_type {
                            VariableType::Continuous => solution[handles[id.as_str()]],
                            // Binary values can come back as e.g. 0.999999999
                            VariableType::Binary => {
                                solution.var_value_rounded(handles[id.as_str()])
                            }
                        };
                        (id.clone(), value)
                    })
                    .collect();
                Ok(ProblemSolution {
                    status: OptimizationStatus::Optimal,
                    objective_value: Some(solution.objective()),
                    variable_values: Some(variable_values),
                })
            }
            Err(microlp::Error::Infeasible) => {
                Ok(ProblemSolution::failed(OptimizationStatus::Infeasible))
            }
            Err(microlp::Error::Unbounded) => {
                Ok(ProblemSolution::failed(OptimizationStatus::Unbounded))
            }
            Err(other) => Err(SolverError::Backend(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_linear_program() {
        // maximize x + 2y subject to x + y <= 5, x in [0, 4], y in [0, 3]
        let mut problem = Problem::new_maximization();
        problem
            .add_new_variable("x", VariableType::Continuous, 0., 4.)
            .unwrap();
        problem
            .add_new_variable("y", VariableType::Continuous, 0., 3.)
            .unwrap();
        problem
            .add_new_inequality_constraint("cap", &["x", "y"], &[1., 1.], f64::NEG_INFINITY, 5.)
            .unwrap();
        problem.add_new_linear_objective_term("x", 1.).unwrap();
        problem.add_new_linear_objective_term("y", 2.).unwrap();

        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Optimal);
        assert!((solution.objective_value.unwrap() - 8.).abs() < 1e-6);
        let values = solution.variable_values.unwrap();
        assert!((values["x"] - 2.).abs() < 1e-6);
        assert!((values["y"] - 3.).abs() < 1e-6);
    }

    #[test]
    fn infeasible_program() {
        let mut problem = Problem::new_maximization();
        problem
            .add_new_variable("x", VariableType::Continuous, 0., 1.)
            .unwrap();
        problem
            .add_new_inequality_constraint("floor", &["x"], &[1.], 2., f64::INFINITY)
            .unwrap();
        problem.add_new_linear_objective_term("x", 1.).unwrap();

        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Infeasible);
        assert!(solution.objective_value.is_none());
    }

    #[test]
    fn unbounded_program() {
        let mut problem = Problem::new_maximization();
        problem
            .add_new_variable("x", VariableType::Continuous, 0., f64::INFINITY)
            .unwrap();
        problem.add_new_linear_objective_term("x", 1.).unwrap();

        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Unbounded);
    }

    #[test]
    fn solve_mixed_integer_program() {
        // maximize 2a + 3b over binary a, b with a + b <= 1
        let mut problem = Problem::new_maximization();
        problem
            .add_new_variable("a", VariableType::Binary, 0., 1.)
            .unwrap();
        problem
            .add_new_variable("b", VariableType::Binary, 0., 1.)
            .unwrap();
        problem
            .add_new_inequality_constraint("pick", &["a", "b"], &[1., 1.], f64::NEG_INFINITY, 1.)
            .unwrap();
        problem.add_new_linear_objective_term("a", 2.).unwrap();
        problem.add_new_linear_objective_term("b", 3.).unwrap();

        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Optimal);
        assert!((solution.objective_value.unwrap() - 3.).abs() < 1e-6);
        let values = solution.variable_values.unwrap();
        assert_eq!(values["a"], 0.);
        assert_eq!(values["b"], 1.);
    }
}

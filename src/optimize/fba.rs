//! Flux balance analysis over a metabolic model
//!
//! Translates a [`Model`] into its base linear program: one flux variable per
//! reaction bounded by the reaction's flux bounds, one steady state mass
//! balance equality per metabolite, and the model's linear objective. This
//! module is the sole point of contact with the optimization backend; the
//! minimal medium programs are built on top of [`build_problem`] and
//! submitted through the same [`Solver`].
use indexmap::IndexMap;

use crate::metabolic_model::model::Model;
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::Solver;
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, OptimizeError, ProblemSolution};

/// The flux distribution found by a successful optimization
#[derive(Debug, Clone)]
pub struct FluxSolution {
    /// Optimized value of the model objective
    pub objective_value: f64,
    /// Flux through every reaction at the optimum, keyed by reaction id
    pub fluxes: IndexMap<String, f64>,
}

/// Build the base flux balance program for a model
///
/// Variables are the reaction fluxes; each metabolite contributes one
/// equality constraint requiring the signed sum of participating fluxes to be
/// zero. The objective maximizes the weighted sum given by the model's
/// objective coefficients (callers can flip the sense on the returned
/// problem).
pub fn build_problem(model: &Model) -> Result<Problem, ProblemError> {
    let mut problem = Problem::new_maximization();

    // One flux variable per reaction
    for (reaction_id, reaction) in &model.reactions {
        problem.add_new_variable(
            reaction_id,
            VariableType::Continuous,
            reaction.lower_bound,
            reaction.upper_bound,
        )?;
    }

    // Collect each metabolite's participating reactions
    let mut participants: IndexMap<&str, (Vec<&str>, Vec<f64>)> = IndexMap::new();
    for metabolite_id in model.metabolites.keys() {
        participants.insert(metabolite_id, (Vec::new(), Vec::new()));
    }
    for (reaction_id, reaction) in &model.reactions {
        for (metabolite_id, coefficient) in &reaction.metabolites {
            if *coefficient == 0. {
                continue;
            }
            if let Some((variables, coefficients)) = participants.get_mut(metabolite_id.as_str()) {
                variables.push(reaction_id);
                coefficients.push(*coefficient);
            }
        }
    }

    // Steady state mass balance, one equality per metabolite
    for (metabolite_id, (variables, coefficients)) in &participants {
        if variables.is_empty() {
            continue;
        }
        problem.add_new_equality_constraint(metabolite_id, variables, coefficients, 0.)?;
    }

    for (reaction_id, coefficient) in &model.objective {
        problem.add_new_linear_objective_term(reaction_id, *coefficient)?;
    }

    Ok(problem)
}

/// Convert a backend solution into a result, surfacing failed statuses as errors
pub(crate) fn expect_optimal(solution: ProblemSolution) -> Result<ProblemSolution, OptimizeError> {
    match solution.status {
        OptimizationStatus::Optimal => Ok(solution),
        OptimizationStatus::Infeasible => Err(OptimizeError::Infeasible),
        OptimizationStatus::Unbounded => Err(OptimizeError::Unbounded),
    }
}

/// Optimize the model objective, returning the objective value and flux vector
///
/// # Errors
/// [`OptimizeError::Infeasible`] when no flux vector satisfies the bounds and
/// mass balance constraints, [`OptimizeError::Unbounded`] when the objective
/// is unbounded, and [`OptimizeError::Backend`] for solver level failures.
pub fn optimize<S: Solver>(model: &Model, solver: &S) -> Result<FluxSolution, OptimizeError> {
    let problem = build_problem(model)?;
    let solution = expect_optimal(solver.solve(&problem)?)?;
    // Optimal solutions always carry a value and assignment
    let objective_value = solution
        .objective_value
        .ok_or_else(|| OptimizeError::Backend("optimal solution without objective value".into()))?;
    let fluxes = solution
        .variable_values
        .ok_or_else(|| OptimizeError::Backend("optimal solution without variable values".into()))?;
    Ok(FluxSolution {
        objective_value,
        fluxes,
    })
}

/// Optimize the model objective, returning only the objective value
pub fn slim_optimize<S: Solver>(model: &Model, solver: &S) -> Result<f64, OptimizeError> {
    optimize(model, solver).map(|solution| solution.objective_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use crate::optimize::solvers::MicrolpSolver;

    /// A linear chain: import A (up to 10), convert A to B, consume B
    fn chain_model() -> Model {
        let mut model = Model::new_empty();
        model.add_metabolite(Metabolite::new("a_c", "c"));
        model.add_metabolite(Metabolite::new("b_c", "c"));
        let reactions = [
            ("import_a", IndexMap::from([("a_c".to_string(), 1.)]), (0., 10.)),
            (
                "a_to_b",
                IndexMap::from([("a_c".to_string(), -1.), ("b_c".to_string(), 1.)]),
                (0., 1000.),
            ),
            ("consume_b", IndexMap::from([("b_c".to_string(), -1.)]), (0., 1000.)),
        ];
        for (id, metabolites, (lower, upper)) in reactions {
            model
                .add_reaction(
                    ReactionBuilder::default()
                        .id(id)
                        .metabolites(metabolites)
                        .lower_bound(lower)
                        .upper_bound(upper)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        model.set_objective("consume_b", 1.).unwrap();
        model
    }

    #[test]
    fn build_problem_shape() {
        let model = chain_model();
        let problem = build_problem(&model).unwrap();
        assert_eq!(problem.variables().len(), 3);
        // One mass balance constraint per metabolite
        assert_eq!(problem.constraints().len(), 2);
        assert!(problem.constraints().contains_key("a_c"));
        assert!(problem.constraints().contains_key("b_c"));
    }

    #[test]
    fn optimize_chain() {
        let model = chain_model();
        let solution = optimize(&model, &MicrolpSolver).unwrap();
        assert!((solution.objective_value - 10.).abs() < 1e-6);
        assert!((solution.fluxes["import_a"] - 10.).abs() < 1e-6);
        assert!((solution.fluxes["a_to_b"] - 10.).abs() < 1e-6);
        assert!((solution.fluxes["consume_b"] - 10.).abs() < 1e-6);

        let value = slim_optimize(&model, &MicrolpSolver).unwrap();
        assert!((value - 10.).abs() < 1e-6);
    }

    #[test]
    fn infeasible_model() {
        let mut model = chain_model();
        // Force production of a_c with nothing allowed to consume it
        model.set_reaction_bounds("import_a", 5., 10.).unwrap();
        model.set_reaction_bounds("a_to_b", 0., 0.).unwrap();
        let res = optimize(&model, &MicrolpSolver);
        assert!(matches!(res, Err(OptimizeError::Infeasible)));
    }

    #[test]
    fn unbounded_model() {
        let mut model = chain_model();
        model
            .set_reaction_bounds("import_a", 0., f64::INFINITY)
            .unwrap();
        model
            .set_reaction_bounds("a_to_b", 0., f64::INFINITY)
            .unwrap();
        model
            .set_reaction_bounds("consume_b", 0., f64::INFINITY)
            .unwrap();
        let res = optimize(&model, &MicrolpSolver);
        assert!(matches!(res, Err(OptimizeError::Unbounded)));
    }
}

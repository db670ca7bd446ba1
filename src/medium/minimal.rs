//! Minimal growth medium computation
//!
//! Finds nutrient import profiles that still achieve a target objective
//! value, either by minimizing the total (weighted) import flux as a linear
//! program, or by minimizing the number of active imports as a mixed integer
//! program with optional enumeration of alternative optimal supports.
//!
//! Both modes share a derived program built on the base flux balance problem:
//! the model objective becomes a floor constraint, and every importable
//! exchange reaction's flux is split into non-negative import and export
//! components whose difference reproduces the flux. Only the import component
//! is penalized (or counted).
use derive_builder::Builder;
use indexmap::IndexMap;

use crate::configuration::CONFIGURATION;
use crate::medium::boundary::{classify_boundary, BoundaryType};
use crate::medium::MediumError;
use crate::metabolic_model::model::Model;
use crate::optimize::fba::{build_problem, expect_optimal};
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::Solver;
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, OptimizeError, ProblemSolution};

/// Options controlling the minimal medium computation
#[derive(Builder, Debug, Clone)]
pub struct MinimalMediumOptions {
    /// Relax every exchange reaction's bounds to `(-open_bound, open_bound)`
    /// before solving, making currently disabled imports eligible
    #[builder(default = "false")]
    pub open_exchanges: bool,
    /// The symmetric bound applied when opening exchanges, also used as the
    /// big-M value for imports without a finite upper bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub open_bound: f64,
    /// Per exchange reaction weights for the total import objective;
    /// reactions absent from the map weigh 1.0
    #[builder(default = "None", setter(strip_option))]
    pub weights: Option<IndexMap<String, f64>>,
    /// Import magnitudes at or below this threshold are treated as inactive
    /// and dropped from results
    #[builder(default = "CONFIGURATION.read().unwrap().tolerance")]
    pub tolerance: f64,
}

impl Default for MinimalMediumOptions {
    fn default() -> Self {
        let configuration = CONFIGURATION.read().unwrap();
        MinimalMediumOptions {
            open_exchanges: false,
            open_bound: configuration.upper_bound,
            weights: None,
            tolerance: configuration.tolerance,
        }
    }
}

/// The import side of one exchange reaction within a derived program
#[derive(Debug, Clone)]
struct ImportTerm {
    /// Id of the exchange reaction
    reaction: String,
    /// Id of the non-negative import component variable
    import_var: String,
    /// Id of the binary indicator variable, when indicators were requested
    indicator_var: Option<String>,
    /// Weight of this import in the total import objective
    weight: f64,
}

/// Build the derived program shared by both minimal medium modes
///
/// Starts from the base flux balance problem, turns the model objective into
/// a `>= min_objective` floor constraint, and splits every importable
/// exchange flux `v` into `v = import - export` with `import, export >= 0`.
/// With `with_indicators`, a binary indicator `y` per import is linked by the
/// big-M constraint `import <= M * y`, M at least the import's maximal
/// feasible magnitude.
fn build_import_program(
    model: &Model,
    min_objective: f64,
    options: &MinimalMediumOptions,
    with_indicators: bool,
) -> Result<(Problem, Vec<ImportTerm>), MediumError> {
    let mut problem = build_problem(model).map_err(OptimizeError::from)?;
    problem.remove_all_objective_terms();
    problem.update_objective_sense(ObjectiveSense::Minimize);

    let objective_variables: Vec<&str> = model.objective.keys().map(String::as_str).collect();
    let objective_coefficients: Vec<f64> = model.objective.values().copied().collect();
    problem
        .add_new_inequality_constraint(
            "objective_floor",
            &objective_variables,
            &objective_coefficients,
            min_objective,
            f64::INFINITY,
        )
        .map_err(OptimizeError::from)?;

    let classification = classify_boundary(model);
    let mut terms = Vec::new();
    for (reaction_id, boundary_type) in &classification {
        if *boundary_type != BoundaryType::Exchange {
            continue;
        }
        let Some(reaction) = model.reactions.get(reaction_id) else {
            continue;
        };
        let (mut lower, mut upper) = reaction.bounds();
        if options.open_exchanges {
            lower = -options.open_bound;
            upper = options.open_bound;
            problem
                .update_variable_bounds(reaction_id, lower, upper)
                .map_err(OptimizeError::from)?;
        }
        if upper <= 0. {
            // This exchange cannot import anything
            continue;
        }
        let max_import = if upper.is_finite() {
            upper
        } else {
            options.open_bound
        };

        let import_var = format!("{reaction_id}_import");
        let export_var = format!("{reaction_id}_export");
        problem
            .add_new_variable(&import_var, VariableType::Continuous, 0., upper)
            .map_err(OptimizeError::from)?;
        problem
            .add_new_variable(&export_var, VariableType::Continuous, 0., (-lower).max(0.))
            .map_err(OptimizeError::from)?;
        problem
            .add_new_equality_constraint(
                &format!("{reaction_id}_split"),
                &[reaction_id, &import_var, &export_var],
                &[1., -1., 1.],
                0.,
            )
            .map_err(OptimizeError::from)?;

        let weight = options
            .weights
            .as_ref()
            .and_then(|weights| weights.get(reaction_id))
            .copied()
            .unwrap_or(1.);
        let mut term = ImportTerm {
            reaction: reaction_id.clone(),
            import_var: import_var.clone(),
            indicator_var: None,
            weight,
        };

        if with_indicators {
            let indicator_var = format!("{reaction_id}_indicator");
            problem
                .add_new_variable(&indicator_var, VariableType::Binary, 0., 1.)
                .map_err(OptimizeError::from)?;
            problem
                .add_new_inequality_constraint(
                    &format!("{reaction_id}_big_m"),
                    &[&import_var, &indicator_var],
                    &[1., -max_import],
                    f64::NEG_INFINITY,
                    0.,
                )
                .map_err(OptimizeError::from)?;
            term.indicator_var = Some(indicator_var);
        }
        terms.push(term);
    }
    Ok((problem, terms))
}

/// Point the problem's objective at the total weighted import flux
fn set_total_import_objective(
    problem: &mut Problem,
    terms: &[ImportTerm],
) -> Result<(), ProblemError> {
    problem.remove_all_objective_terms();
    problem.update_objective_sense(ObjectiveSense::Minimize);
    for term in terms {
        problem.add_new_linear_objective_term(&term.import_var, term.weight)?;
    }
    Ok(())
}

/// Collect the non-zero import magnitudes of a solved program
fn extract_import_magnitudes(
    solution: &ProblemSolution,
    terms: &[ImportTerm],
    tolerance: f64,
) -> Result<IndexMap<String, f64>, MediumError> {
    let values = solution
        .variable_values
        .as_ref()
        .ok_or_else(|| OptimizeError::Backend("optimal solution without variable values".into()))?;
    let mut magnitudes = IndexMap::new();
    for term in terms {
        let Some(magnitude) = values.get(&term.import_var) else {
            continue;
        };
        if *magnitude > tolerance {
            magnitudes.insert(term.reaction.clone(), *magnitude);
        }
    }
    Ok(magnitudes)
}

/// Compute the minimal total import flux medium (LP mode)
///
/// Finds the import profile with the lowest total weighted import flux that
/// still achieves an objective value of at least `min_objective`. Returns a
/// mapping from exchange reaction id to its minimal import magnitude,
/// excluding magnitudes at or below `options.tolerance`.
///
/// # Errors
/// [`OptimizeError::Infeasible`] (wrapped in [`MediumError::Optimize`]) when
/// no flux vector achieves `min_objective` under the current (or opened)
/// bounds.
pub fn minimal_medium<S: Solver>(
    model: &Model,
    solver: &S,
    min_objective: f64,
    options: &MinimalMediumOptions,
) -> Result<IndexMap<String, f64>, MediumError> {
    let (mut problem, terms) = build_import_program(model, min_objective, options, false)?;
    set_total_import_objective(&mut problem, &terms).map_err(OptimizeError::from)?;
    let solution = solver.solve(&problem).map_err(OptimizeError::from)?;
    let solution = expect_optimal(solution)?;
    extract_import_magnitudes(&solution, &terms, options.tolerance)
}

/// Compute minimal component count media (MIP mode), enumerating alternatives
///
/// Minimizes the number of distinct active imports needed to achieve
/// `min_objective`, then enumerates up to `max_alternatives` optimal
/// supports. After every accepted solution a no-good cut excludes that exact
/// support and the program is re-solved; enumeration stops when the requested
/// number of alternatives is reached, when the program becomes infeasible, or
/// when the attainable import count worsens. Every returned alternative
/// therefore has the same, minimal, active import count, and alternatives
/// differ pairwise in their support.
///
/// Each reported alternative is polished by a second LP pass that fixes the
/// support and minimizes the total weighted import flux over it, so the
/// returned magnitudes are canonical.
///
/// `max_alternatives = 1` is consistent with a plain MIP solve.
pub fn minimize_components<S: Solver>(
    model: &Model,
    solver: &S,
    min_objective: f64,
    max_alternatives: usize,
    options: &MinimalMediumOptions,
) -> Result<Vec<IndexMap<String, f64>>, MediumError> {
    let (mut problem, terms) = build_import_program(model, min_objective, options, true)?;
    problem.remove_all_objective_terms();
    problem.update_objective_sense(ObjectiveSense::Minimize);
    for term in &terms {
        if let Some(indicator_var) = &term.indicator_var {
            problem
                .add_new_linear_objective_term(indicator_var, 1.)
                .map_err(OptimizeError::from)?;
        }
    }

    let mut alternatives: Vec<IndexMap<String, f64>> = Vec::new();
    let mut best_count: Option<f64> = None;
    for cut_index in 0..max_alternatives {
        let solution = solver.solve(&problem).map_err(OptimizeError::from)?;
        if solution.status == OptimizationStatus::Infeasible {
            if alternatives.is_empty() {
                // The target objective itself is unreachable
                return Err(OptimizeError::Infeasible.into());
            }
            // The cuts exhausted the alternatives
            break;
        }
        let solution = expect_optimal(solution)?;
        let count = solution
            .objective_value
            .ok_or_else(|| {
                OptimizeError::Backend("optimal solution without objective value".into())
            })?
            .round();
        match best_count {
            None => best_count = Some(count),
            // A worse count means no further alternative at the optimum
            Some(best) if count > best + 0.5 => break,
            Some(_) => {}
        }

        let values = solution.variable_values.as_ref().ok_or_else(|| {
            OptimizeError::Backend("optimal solution without variable values".into())
        })?;
        let support: Vec<String> = terms
            .iter()
            .filter(|term| {
                term.indicator_var
                    .as_ref()
                    .and_then(|indicator_var| values.get(indicator_var))
                    .is_some_and(|value| *value > 0.5)
            })
            .map(|term| term.reaction.clone())
            .collect();

        alternatives.push(polish_support(
            model,
            solver,
            min_objective,
            options,
            &support,
        )?);

        // Forbid reproducing exactly this support
        let indicator_variables: Vec<&str> = terms
            .iter()
            .filter_map(|term| term.indicator_var.as_deref())
            .collect();
        let cut_coefficients: Vec<f64> = terms
            .iter()
            .filter(|term| term.indicator_var.is_some())
            .map(|term| {
                if support.contains(&term.reaction) {
                    1.
                } else {
                    -1.
                }
            })
            .collect();
        problem
            .add_new_inequality_constraint(
                &format!("exclusion_{cut_index}"),
                &indicator_variables,
                &cut_coefficients,
                f64::NEG_INFINITY,
                support.len() as f64 - 1.,
            )
            .map_err(OptimizeError::from)?;
    }
    Ok(alternatives)
}

/// Recover the minimal total flux solution over a fixed support
fn polish_support<S: Solver>(
    model: &Model,
    solver: &S,
    min_objective: f64,
    options: &MinimalMediumOptions,
    support: &[String],
) -> Result<IndexMap<String, f64>, MediumError> {
    let (mut problem, terms) = build_import_program(model, min_objective, options, false)?;
    for term in &terms {
        if !support.contains(&term.reaction) {
            problem
                .update_variable_bounds(&term.import_var, 0., 0.)
                .map_err(OptimizeError::from)?;
        }
    }
    set_total_import_objective(&mut problem, &terms).map_err(OptimizeError::from)?;
    let solution = solver.solve(&problem).map_err(OptimizeError::from)?;
    let solution = expect_optimal(solution)?;
    extract_import_magnitudes(&solution, &terms, options.tolerance)
}

//! Provides struct for representing an optimization problem's objective

use indexmap::IndexMap;

/// Represents the Objective of an optimization problem
///
/// The objective is a weighted sum of problem variables, referenced by id,
/// together with a direction to optimize in.
#[derive(Debug, Clone)]
pub struct Objective {
    /// Terms included in the objective (see [`ObjectiveTerm`])
    terms: Vec<ObjectiveTerm>,
    /// Sense of the objective (maximize, or minimize), see [`ObjectiveSense`]
    sense: ObjectiveSense,
}

impl Objective {
    /// Create a new empty objective, with a given sense
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            terms: Vec::new(),
            sense,
        }
    }

    /// Create a new empty maximization objective
    pub fn new_maximize() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new empty minimization objective
    pub fn new_minimize() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }

    /// The current sense of the objective
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Change the sense of the objective
    pub fn set_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// Add a new linear term to the objective
    pub fn add_linear_term(&mut self, variable: &str, coefficient: f64) {
        self.terms.push(ObjectiveTerm {
            variable: variable.to_string(),
            coefficient,
        });
    }

    /// The terms of the objective
    pub fn terms(&self) -> &[ObjectiveTerm] {
        &self.terms
    }

    /// Whether the objective has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Remove all terms from the objective
    pub fn remove_all_terms(&mut self) {
        self.terms.clear();
    }

    /// Collapse the terms into a map of variable id to summed coefficient
    pub fn coefficients(&self) -> IndexMap<String, f64> {
        let mut coefficients: IndexMap<String, f64> = IndexMap::new();
        for term in &self.terms {
            *coefficients.entry(term.variable.clone()).or_insert(0.) += term.coefficient;
        }
        coefficients
    }
}

/// Represents the sense of the objective, whether it should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// The objective should be minimized
    Minimize,
    /// The objective should be maximized
    Maximize,
}

/// A linear term in the objective
#[derive(Debug, Clone)]
pub struct ObjectiveTerm {
    /// Id of the variable in the objective term
    pub variable: String,
    /// Coefficient for the term
    pub coefficient: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_coefficients() {
        let mut objective = Objective::new_maximize();
        objective.add_linear_term("x", 1.);
        objective.add_linear_term("y", 2.);
        objective.add_linear_term("x", 0.5);

        let coefficients = objective.coefficients();
        assert_eq!(coefficients.get("x"), Some(&1.5));
        assert_eq!(coefficients.get("y"), Some(&2.));

        let mut objective = objective;
        objective.remove_all_terms();
        assert!(objective.is_empty());
    }

    #[test]
    fn sense_update() {
        let mut objective = Objective::new_minimize();
        assert_eq!(objective.sense(), ObjectiveSense::Minimize);
        objective.set_sense(ObjectiveSense::Maximize);
        assert_eq!(objective.sense(), ObjectiveSense::Maximize);
    }
}

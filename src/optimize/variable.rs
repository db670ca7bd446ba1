//! Module providing representation of optimization problem variables
use std::fmt::{Display, Formatter};

/// A variable in an optimization problem, bounded by `lower_bound..=upper_bound`
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Used to identify the variable (must be unique within a problem)
    pub id: String,
    /// Type of the variable, see [`VariableType`]
    pub variable_type: VariableType,
    /// Lowest value the variable can take
    pub lower_bound: f64,
    /// Highest value the variable can take
    pub upper_bound: f64,
}

impl Variable {
    /// Create a new continuous variable
    pub fn new_continuous(id: &str, lower_bound: f64, upper_bound: f64) -> Variable {
        Variable {
            id: id.to_string(),
            variable_type: VariableType::Continuous,
            lower_bound,
            upper_bound,
        }
    }

    /// Create a new binary variable (bounded by 0 and 1)
    pub fn new_binary(id: &str) -> Variable {
        Variable {
            id: id.to_string(),
            variable_type: VariableType::Binary,
            lower_bound: 0.,
            upper_bound: 1.,
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.variable_type)
    }
}

/// Represents the type of variable in an optimization problem
///
/// Flux variables are continuous; binary variables serve as activity
/// indicators in the component-minimizing programs.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VariableType {
    /// Continuous variable
    Continuous,
    /// Binary Variable
    Binary,
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "CONTINUOUS"),
            VariableType::Binary => write!(f, "BINARY"),
        }
    }
}

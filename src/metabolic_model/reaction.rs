//! This module provides a struct for representing reactions
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration::CONFIGURATION;
use crate::metabolic_model::model::ModelError;

/// Represents a reaction in the metabolic model
///
/// Reactions are exclusively owned by the
/// [`Model`](crate::metabolic_model::model::Model); their stoichiometry refers
/// to metabolites by id. The flux through a reaction is bounded by
/// `lower_bound..=upper_bound`, and `lower_bound <= upper_bound` is an
/// invariant enforced by every bound setting operation.
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Used to identify the reaction
    #[builder(setter(into))]
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// A map of metabolite id to signed stoichiometric coefficient, holding
    /// non-zero entries only
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
}

impl Reaction {
    /// Get the current flux bounds as a `(lower, upper)` pair
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Set the flux bounds of the reaction
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidBounds`] if `lower_bound > upper_bound`;
    /// the reaction is left unchanged in that case.
    pub fn set_bounds(&mut self, lower_bound: f64, upper_bound: f64) -> Result<(), ModelError> {
        if lower_bound > upper_bound {
            return Err(ModelError::InvalidBounds {
                reaction: self.id.clone(),
                lower_bound,
                upper_bound,
            });
        }
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        Ok(())
    }

    /// Whether the reaction is a boundary reaction
    ///
    /// A boundary reaction has exactly one metabolite participant with a
    /// non-zero coefficient, so mass enters or leaves the modeled system
    /// through it.
    pub fn is_boundary(&self) -> bool {
        self.metabolites
            .values()
            .filter(|coefficient| **coefficient != 0.)
            .count()
            == 1
    }
}

//! This module provides the Model struct for representing an entire metabolic model
use indexmap::IndexMap;
use thiserror::Error;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

/// Represents a metabolic network as a flux-balance system
///
/// The model owns its reactions and metabolites; every metabolite referenced
/// by a reaction's stoichiometry must be present in `metabolites`, which
/// [`Model::add_reaction`] enforces. The objective is a linear combination of
/// reaction fluxes, stored as a map of reaction id to objective coefficient.
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    pub objective: IndexMap<String, f64>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// Short name of the external (extracellular) compartment, if known
    ///
    /// When unset, boundary classification falls back to detecting the
    /// external compartment from the boundary reactions themselves, see
    /// [`find_external_compartment`](crate::medium::boundary::find_external_compartment).
    pub external_compartment: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            objective: IndexMap::new(),
            id: None,
            compartments: None,
            external_compartment: None,
        }
    }

    /// Add a metabolite to the model
    ///
    /// # Examples
    /// ```rust
    /// use fluxrs_core::metabolic_model::metabolite::Metabolite;
    /// use fluxrs_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// model.add_metabolite(Metabolite::new("glc_e", "e"));
    /// ```
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Add a reaction to the model
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownMetabolite`] if the reaction's
    /// stoichiometry references a metabolite that is not in the model; the
    /// reaction is not added in that case.
    ///
    /// # Examples
    /// ```rust
    /// use fluxrs_core::metabolic_model::model::Model;
    /// use fluxrs_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction").build().unwrap();
    /// model.add_reaction(new_reaction).unwrap();
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        for metabolite_id in reaction.metabolites.keys() {
            if !self.metabolites.contains_key(metabolite_id) {
                return Err(ModelError::UnknownMetabolite {
                    reaction: reaction.id.clone(),
                    metabolite: metabolite_id.clone(),
                });
            }
        }
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
        Ok(())
    }

    /// Set the objective coefficient of a reaction
    ///
    /// A coefficient of zero removes the reaction from the objective.
    pub fn set_objective(&mut self, reaction_id: &str, coefficient: f64) -> Result<(), ModelError> {
        if !self.reactions.contains_key(reaction_id) {
            return Err(ModelError::UnknownReaction(reaction_id.to_string()));
        }
        if coefficient == 0. {
            self.objective.shift_remove(reaction_id);
        } else {
            self.objective.insert(reaction_id.to_string(), coefficient);
        }
        Ok(())
    }

    /// Get the flux bounds of a reaction as a `(lower, upper)` pair
    pub fn reaction_bounds(&self, reaction_id: &str) -> Result<(f64, f64), ModelError> {
        self.reactions
            .get(reaction_id)
            .map(Reaction::bounds)
            .ok_or_else(|| ModelError::UnknownReaction(reaction_id.to_string()))
    }

    /// Set the flux bounds of a reaction
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownReaction`] if the reaction is not in the
    /// model, and [`ModelError::InvalidBounds`] if `lower_bound > upper_bound`.
    /// The model is unchanged on error.
    pub fn set_reaction_bounds(
        &mut self,
        reaction_id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        match self.reactions.get_mut(reaction_id) {
            Some(reaction) => reaction.set_bounds(lower_bound, upper_bound),
            None => Err(ModelError::UnknownReaction(reaction_id.to_string())),
        }
    }
}

/// Errors associated with constructing and mutating a Model
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// A reaction id was used that is not present in the model
    #[error("reaction '{0}' is not present in the model")]
    UnknownReaction(String),
    /// A reaction references a metabolite that is not present in the model
    #[error("reaction '{reaction}' references unknown metabolite '{metabolite}'")]
    UnknownMetabolite { reaction: String, metabolite: String },
    /// Bounds were requested with lower_bound > upper_bound
    #[error("invalid bounds for reaction '{reaction}': {lower_bound} > {upper_bound}")]
    InvalidBounds {
        reaction: String,
        lower_bound: f64,
        upper_bound: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use indexmap::IndexMap;

    fn model_with_metabolites() -> Model {
        let mut model = Model::new_empty();
        model.add_metabolite(Metabolite::new("glc_e", "e"));
        model.add_metabolite(Metabolite::new("glc_c", "c"));
        model
    }

    #[test]
    fn add_reaction_validates_stoichiometry() {
        let mut model = model_with_metabolites();
        let transport = ReactionBuilder::default()
            .id("T_glc")
            .metabolites(IndexMap::from([
                ("glc_e".to_string(), -1.),
                ("glc_c".to_string(), 1.),
            ]))
            .build()
            .unwrap();
        model.add_reaction(transport).unwrap();
        assert!(model.reactions.contains_key("T_glc"));

        let dangling = ReactionBuilder::default()
            .id("bad")
            .metabolites(IndexMap::from([("missing_m".to_string(), 1.)]))
            .build()
            .unwrap();
        let res = model.add_reaction(dangling);
        assert!(matches!(res, Err(ModelError::UnknownMetabolite { .. })));
        assert!(!model.reactions.contains_key("bad"));
    }

    #[test]
    fn objective_requires_known_reaction() {
        let mut model = model_with_metabolites();
        let growth = ReactionBuilder::default().id("growth").build().unwrap();
        model.add_reaction(growth).unwrap();

        model.set_objective("growth", 1.).unwrap();
        assert_eq!(model.objective.get("growth"), Some(&1.));

        // Zero coefficient drops the term again
        model.set_objective("growth", 0.).unwrap();
        assert!(model.objective.is_empty());

        let res = model.set_objective("nope", 1.);
        assert!(matches!(res, Err(ModelError::UnknownReaction(_))));
    }

    #[test]
    fn bounds_access() {
        let mut model = model_with_metabolites();
        let reaction = ReactionBuilder::default().id("r1").build().unwrap();
        model.add_reaction(reaction).unwrap();

        model.set_reaction_bounds("r1", 0., 5.).unwrap();
        assert_eq!(model.reaction_bounds("r1").unwrap(), (0., 5.));

        assert!(matches!(
            model.set_reaction_bounds("r1", 7., 5.),
            Err(ModelError::InvalidBounds { .. })
        ));
        assert!(matches!(
            model.set_reaction_bounds("missing", 0., 5.),
            Err(ModelError::UnknownReaction(_))
        ));
        // Failed updates leave the model untouched
        assert_eq!(model.reaction_bounds("r1").unwrap(), (0., 5.));
    }
}

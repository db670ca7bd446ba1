//! Classification of boundary reactions
//!
//! Boundary reactions are the reactions through which mass enters or leaves
//! the modeled system. Their role (exchange, demand, or sink) is never stored
//! on the reaction; it is recomputed from the current stoichiometry and
//! bounds so the classification can not go stale after the model is edited.
use indexmap::IndexMap;

use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;

/// The role of a boundary reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryType {
    /// Transports one metabolite between the external environment and the
    /// modeled system
    Exchange,
    /// Consumes a single internal metabolite, one-directionally
    Demand,
    /// Like a demand reaction, but permits flux in both directions
    Sink,
}

/// Guess the external compartment of a model
///
/// Uses the explicitly configured
/// [`external_compartment`](Model::external_compartment) when set; otherwise
/// takes a majority vote over the compartments of the metabolites
/// participating in boundary reactions, breaking ties in favour of
/// conventionally named external compartments ("e", "extracellular", ...).
pub fn find_external_compartment(model: &Model) -> Option<String> {
    if let Some(compartment) = &model.external_compartment {
        return Some(compartment.clone());
    }
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for reaction in model.reactions.values() {
        if !reaction.is_boundary() {
            continue;
        }
        let Some(metabolite_id) = single_participant(reaction) else {
            continue;
        };
        if let Some(compartment) = model
            .metabolites
            .get(metabolite_id)
            .and_then(|metabolite| metabolite.compartment.as_deref())
        {
            *counts.entry(compartment).or_insert(0) += 1;
        }
    }
    let best = counts.iter().max_by_key(|(compartment, count)| {
        // Name convention breaks ties in the vote
        (*count, looks_external(compartment))
    })?;
    Some(best.0.to_string())
}

/// Whether a compartment tag follows an external-compartment naming convention
fn looks_external(compartment: &str) -> bool {
    let lowered = compartment.to_lowercase();
    lowered == "e"
        || lowered.starts_with("extracellular")
        || lowered.starts_with("external")
        || lowered == "medium"
        || lowered == "env"
}

/// The id of the single non-zero participant of a boundary reaction
fn single_participant(reaction: &Reaction) -> Option<&str> {
    let mut participants = reaction
        .metabolites
        .iter()
        .filter(|(_, coefficient)| **coefficient != 0.);
    let (metabolite_id, _) = participants.next()?;
    if participants.next().is_some() {
        return None;
    }
    Some(metabolite_id)
}

/// Classify the boundary reactions of a model
///
/// Pure function of the current stoichiometry and bounds; reactions absent
/// from the returned map are not boundary reactions. Exchange reactions have
/// their single participant in the external compartment (or follow the `EX_`
/// id convention); the remaining boundary reactions are demand reactions when
/// their lower bound is non-negative and sink reactions otherwise. `DM_` and
/// `SK_` id prefixes are honored as convention hints.
pub fn classify_boundary(model: &Model) -> IndexMap<String, BoundaryType> {
    let external = find_external_compartment(model);
    let mut classification = IndexMap::new();
    for (reaction_id, reaction) in &model.reactions {
        let Some(metabolite_id) = single_participant(reaction) else {
            continue;
        };
        let compartment = model
            .metabolites
            .get(metabolite_id)
            .and_then(|metabolite| metabolite.compartment.as_deref());
        let in_external = matches!(
            (compartment, external.as_deref()),
            (Some(c), Some(e)) if c == e
        );
        let boundary_type = if in_external || reaction_id.starts_with("EX_") {
            BoundaryType::Exchange
        } else if reaction_id.starts_with("DM_") {
            BoundaryType::Demand
        } else if reaction_id.starts_with("SK_") {
            BoundaryType::Sink
        } else if reaction.lower_bound >= 0. {
            BoundaryType::Demand
        } else {
            BoundaryType::Sink
        };
        classification.insert(reaction_id.clone(), boundary_type);
    }
    classification
}

impl Model {
    /// All boundary reactions of the model
    pub fn boundary(&self) -> Vec<&Reaction> {
        self.reactions
            .values()
            .filter(|reaction| reaction.is_boundary())
            .collect()
    }

    /// All exchange reactions of the model
    pub fn exchanges(&self) -> Vec<&Reaction> {
        self.reactions_of_type(BoundaryType::Exchange)
    }

    /// All demand reactions of the model
    pub fn demands(&self) -> Vec<&Reaction> {
        self.reactions_of_type(BoundaryType::Demand)
    }

    /// All sink reactions of the model
    pub fn sinks(&self) -> Vec<&Reaction> {
        self.reactions_of_type(BoundaryType::Sink)
    }

    fn reactions_of_type(&self, boundary_type: BoundaryType) -> Vec<&Reaction> {
        let classification = classify_boundary(self);
        classification
            .iter()
            .filter(|(_, ty)| **ty == boundary_type)
            .filter_map(|(reaction_id, _)| self.reactions.get(reaction_id))
            .collect()
    }
}

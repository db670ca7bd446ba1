//! Growth medium handling
//!
//! The medium of a model is a derived view over its exchange reactions:
//! which nutrients may be imported and at what maximal rate. Exchange
//! reactions are oriented so that positive flux is import, so an exchange
//! reaction's upper bound is its maximal uptake rate and the medium is the
//! mapping of exchange reaction id to non-zero upper bound.

pub mod boundary;
pub mod minimal;

use indexmap::IndexMap;
use thiserror::Error;

use crate::metabolic_model::context::BoundChange;
use crate::metabolic_model::model::Model;
use crate::optimize::OptimizeError;

pub use boundary::{classify_boundary, find_external_compartment, BoundaryType};
pub use minimal::{
    minimal_medium, minimize_components, MinimalMediumOptions, MinimalMediumOptionsBuilder,
};

/// Errors associated with reading, applying, and minimizing growth media
#[derive(Error, Debug, Clone)]
pub enum MediumError {
    /// A medium mapping referenced a reaction that is not an exchange
    /// reaction of the model
    #[error("'{0}' is not an exchange reaction of the model")]
    UnknownReaction(String),
    /// Applying the medium would require clamping a lower bound, and
    /// clamping was disallowed
    #[error(
        "applying the medium would leave reaction '{reaction}' with lower bound \
         {lower_bound} above upper bound {upper_bound}"
    )]
    BoundsConflict {
        reaction: String,
        lower_bound: f64,
        upper_bound: f64,
    },
    /// An optimization carried out on behalf of a medium computation failed
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}

/// Read the current growth medium of a model
///
/// Returns a snapshot mapping each exchange reaction id to its upper bound,
/// restricted to exchange reactions whose upper bound is non-zero. The
/// returned map holds no reference back to the model; mutating it never
/// affects the model.
pub fn get_medium(model: &Model) -> IndexMap<String, f64> {
    classify_boundary(model)
        .iter()
        .filter(|(_, boundary_type)| **boundary_type == BoundaryType::Exchange)
        .filter_map(|(reaction_id, _)| {
            let reaction = model.reactions.get(reaction_id)?;
            if reaction.upper_bound != 0. {
                Some((reaction_id.clone(), reaction.upper_bound))
            } else {
                None
            }
        })
        .collect()
}

/// Replace the growth medium of a model
///
/// Exchange reactions present in `medium` get their upper bound set to the
/// mapping's value; exchange reactions absent from `medium` get their upper
/// bound set to zero, disabling that import. Lower bounds are left untouched
/// unless an existing lower bound would exceed the new upper bound, in which
/// case it is clamped down to the new upper bound — or, when `strict` is set,
/// the whole update fails with [`MediumError::BoundsConflict`].
///
/// The update is atomic: on any error no bound is modified.
///
/// # Errors
/// [`MediumError::UnknownReaction`] if a key of `medium` is not a known
/// exchange reaction, and [`MediumError::BoundsConflict`] as described above.
pub fn set_medium(
    model: &mut Model,
    medium: &IndexMap<String, f64>,
    strict: bool,
) -> Result<(), MediumError> {
    apply_medium(model, medium, strict).map(|_| ())
}

/// Apply a medium and report the pre-change bounds of every touched reaction
///
/// Shared between [`set_medium`] and the scoped variant
/// [`ModelScope::set_medium`](crate::metabolic_model::context::ModelScope::set_medium),
/// which records the returned changes for rollback.
pub(crate) fn apply_medium(
    model: &mut Model,
    medium: &IndexMap<String, f64>,
    strict: bool,
) -> Result<Vec<BoundChange>, MediumError> {
    let classification = classify_boundary(model);
    let exchange_ids: Vec<&String> = classification
        .iter()
        .filter(|(_, boundary_type)| **boundary_type == BoundaryType::Exchange)
        .map(|(reaction_id, _)| reaction_id)
        .collect();

    // Every key must name an exchange reaction of the model
    for reaction_id in medium.keys() {
        if !exchange_ids.iter().any(|id| *id == reaction_id) {
            return Err(MediumError::UnknownReaction(reaction_id.clone()));
        }
    }

    // Stage all updates before touching the model, so either every bound
    // update succeeds or none are applied
    let mut staged: Vec<(String, (f64, f64), (f64, f64))> = Vec::new();
    for reaction_id in exchange_ids {
        let Some(reaction) = model.reactions.get(reaction_id) else {
            continue;
        };
        let (old_lower, old_upper) = reaction.bounds();
        let new_upper = medium.get(reaction_id).copied().unwrap_or(0.);
        let new_lower = if old_lower > new_upper {
            if strict {
                return Err(MediumError::BoundsConflict {
                    reaction: reaction_id.clone(),
                    lower_bound: old_lower,
                    upper_bound: new_upper,
                });
            }
            new_upper
        } else {
            old_lower
        };
        if (new_lower, new_upper) != (old_lower, old_upper) {
            staged.push((
                reaction_id.clone(),
                (new_lower, new_upper),
                (old_lower, old_upper),
            ));
        }
    }

    let mut changes = Vec::with_capacity(staged.len());
    for (reaction_id, (new_lower, new_upper), (old_lower, old_upper)) in staged {
        if let Some(reaction) = model.reactions.get_mut(&reaction_id) {
            reaction.lower_bound = new_lower;
            reaction.upper_bound = new_upper;
        }
        changes.push(BoundChange {
            reaction: reaction_id,
            lower_bound: old_lower,
            upper_bound: old_upper,
        });
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn exchange_model() -> Model {
        let mut model = Model::new_empty();
        model.external_compartment = Some("e".to_string());
        for metabolite_id in ["a_e", "b_e", "c_e"] {
            model.add_metabolite(Metabolite::new(metabolite_id, "e"));
        }
        model.add_metabolite(Metabolite::new("a_c", "c"));
        let exchanges = [
            ("EX_a", "a_e", (-10., 1000.)),
            ("EX_b", "b_e", (0., 500.)),
            // A forced import: lower bound above zero
            ("EX_c", "c_e", (2., 800.)),
        ];
        for (id, metabolite_id, (lower, upper)) in exchanges {
            model
                .add_reaction(
                    ReactionBuilder::default()
                        .id(id)
                        .metabolites(IndexMap::from([(metabolite_id.to_string(), 1.)]))
                        .lower_bound(lower)
                        .upper_bound(upper)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        // An internal reaction, never part of the medium
        model
            .add_reaction(
                ReactionBuilder::default()
                    .id("T_a")
                    .metabolites(IndexMap::from([
                        ("a_e".to_string(), -1.),
                        ("a_c".to_string(), 1.),
                    ]))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        model
    }

    #[test]
    fn get_medium_snapshot() {
        let mut model = exchange_model();
        let medium = get_medium(&model);
        assert_eq!(medium.get("EX_a"), Some(&1000.));
        assert_eq!(medium.get("EX_b"), Some(&500.));
        assert_eq!(medium.get("EX_c"), Some(&800.));
        assert!(!medium.contains_key("T_a"));

        // Zero upper bounds are filtered out
        model.set_reaction_bounds("EX_b", 0., 0.).unwrap();
        assert!(!get_medium(&model).contains_key("EX_b"));
    }

    #[test]
    fn set_then_get_normalizes() {
        let mut model = exchange_model();
        let requested = IndexMap::from([
            ("EX_a".to_string(), 5.),
            ("EX_b".to_string(), 0.),
            ("EX_c".to_string(), 3.),
        ]);
        set_medium(&mut model, &requested, false).unwrap();
        // The read-back equals the request minus its zero entries
        let medium = get_medium(&model);
        assert_eq!(
            medium,
            IndexMap::from([("EX_a".to_string(), 5.), ("EX_c".to_string(), 3.)])
        );
    }

    #[test]
    fn absent_exchanges_are_zeroed_and_clamped() {
        let mut model = exchange_model();
        set_medium(&mut model, &IndexMap::from([("EX_a".to_string(), 5.)]), false).unwrap();
        // Present key: upper bound replaced, lower bound untouched
        assert_eq!(model.reaction_bounds("EX_a").unwrap(), (-10., 5.));
        // Absent keys: upper bound zeroed
        assert_eq!(model.reaction_bounds("EX_b").unwrap(), (0., 0.));
        // EX_c's lower bound of 2 would exceed the new upper bound of 0
        assert_eq!(model.reaction_bounds("EX_c").unwrap(), (0., 0.));
    }

    #[test]
    fn strict_conflict_is_atomic() {
        let mut model = exchange_model();
        let res = set_medium(&mut model, &IndexMap::from([("EX_a".to_string(), 5.)]), true);
        assert!(matches!(res, Err(MediumError::BoundsConflict { .. })));
        // Nothing was applied, including the valid EX_a update
        assert_eq!(model.reaction_bounds("EX_a").unwrap(), (-10., 1000.));
        assert_eq!(model.reaction_bounds("EX_b").unwrap(), (0., 500.));
        assert_eq!(model.reaction_bounds("EX_c").unwrap(), (2., 800.));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut model = exchange_model();
        for bad_key in ["EX_missing", "T_a"] {
            let res = set_medium(
                &mut model,
                &IndexMap::from([(bad_key.to_string(), 5.)]),
                false,
            );
            assert!(matches!(res, Err(MediumError::UnknownReaction(_))));
        }
        // Rejected updates leave the model untouched
        assert_eq!(model.reaction_bounds("EX_a").unwrap(), (-10., 1000.));
    }

    #[test]
    fn scoped_medium_is_restored() {
        let mut model = exchange_model();
        let before = get_medium(&model);
        {
            let mut scope = model.scope();
            scope
                .set_medium(&IndexMap::from([("EX_a".to_string(), 5.)]), false)
                .unwrap();
            assert_eq!(scope.model().reaction_bounds("EX_a").unwrap(), (-10., 5.));
            assert_eq!(scope.model().reaction_bounds("EX_c").unwrap(), (0., 0.));
        }
        assert_eq!(get_medium(&model), before);
        assert_eq!(model.reaction_bounds("EX_c").unwrap(), (2., 800.));
    }
}

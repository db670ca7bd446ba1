//! Scoped, reversible mutation of model bounds
//!
//! Bound changing operations performed through a [`ModelScope`] are recorded
//! and rolled back when the scope is dropped, whether the scope ends by
//! normal return or while an error is being propagated. This supports the
//! "apply a medium, observe growth, revert" style of experimentation without
//! the caller having to track previous bounds itself.
use indexmap::IndexMap;

use crate::medium::{apply_medium, MediumError};
use crate::metabolic_model::model::{Model, ModelError};

/// The pre-change bounds of a single reaction, recorded for rollback
#[derive(Debug, Clone)]
pub struct BoundChange {
    /// Id of the touched reaction
    pub reaction: String,
    /// Lower bound before the change
    pub lower_bound: f64,
    /// Upper bound before the change
    pub upper_bound: f64,
}

/// A scope over a model inside which bound mutations are reversible
///
/// Dropping the scope restores every recorded bound in reverse order of
/// modification, so the model is observably unchanged outside the scope.
/// Scopes nest: an inner scope created with [`ModelScope::scope`] restores
/// its changes before the outer scope restores its own.
#[derive(Debug)]
pub struct ModelScope<'m> {
    model: &'m mut Model,
    undo: Vec<BoundChange>,
}

impl Model {
    /// Open a scope in which bound mutations are rolled back on exit
    ///
    /// # Examples
    /// ```rust
    /// use fluxrs_core::metabolic_model::model::Model;
    /// use fluxrs_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// model.add_reaction(ReactionBuilder::default().id("r1").build().unwrap()).unwrap();
    /// {
    ///     let mut scope = model.scope();
    ///     scope.set_reaction_bounds("r1", 0., 10.).unwrap();
    ///     assert_eq!(scope.model().reaction_bounds("r1").unwrap(), (0., 10.));
    /// }
    /// assert_eq!(model.reaction_bounds("r1").unwrap(), (-1000., 1000.));
    /// ```
    pub fn scope(&mut self) -> ModelScope<'_> {
        ModelScope {
            model: self,
            undo: Vec::new(),
        }
    }
}

impl ModelScope<'_> {
    /// Read access to the model with the scope's mutations applied
    pub fn model(&self) -> &Model {
        self.model
    }

    /// Open a nested scope
    pub fn scope(&mut self) -> ModelScope<'_> {
        ModelScope {
            model: self.model,
            undo: Vec::new(),
        }
    }

    /// Set the flux bounds of a reaction, recording the previous bounds
    pub fn set_reaction_bounds(
        &mut self,
        reaction_id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        let (previous_lower, previous_upper) = self.model.reaction_bounds(reaction_id)?;
        self.model
            .set_reaction_bounds(reaction_id, lower_bound, upper_bound)?;
        // Don't clutter the log with unchanged bounds
        if previous_lower != lower_bound || previous_upper != upper_bound {
            self.undo.push(BoundChange {
                reaction: reaction_id.to_string(),
                lower_bound: previous_lower,
                upper_bound: previous_upper,
            });
        }
        Ok(())
    }

    /// Apply a growth medium, recording the previous bounds of every
    /// exchange reaction it touches
    ///
    /// Semantics are those of [`set_medium`](crate::medium::set_medium); on
    /// error nothing is applied and nothing is recorded.
    pub fn set_medium(
        &mut self,
        medium: &IndexMap<String, f64>,
        strict: bool,
    ) -> Result<(), MediumError> {
        let changes = apply_medium(self.model, medium, strict)?;
        self.undo.extend(changes);
        Ok(())
    }
}

impl Drop for ModelScope<'_> {
    fn drop(&mut self) {
        // Replay the change log in reverse so earlier values win
        for change in self.undo.drain(..).rev() {
            if let Some(reaction) = self.model.reactions.get_mut(&change.reaction) {
                reaction.lower_bound = change.lower_bound;
                reaction.upper_bound = change.upper_bound;
            }
        }
    }
}

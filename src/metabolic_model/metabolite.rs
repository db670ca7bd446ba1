//! This module provides the metabolite struct representing a metabolite

use std::hash::Hash;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Represents a metabolite
///
/// Metabolites are immutable once created and owned by the
/// [`Model`](crate::metabolic_model::model::Model); reactions refer to them
/// by id only.
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    #[builder(setter(into))]
    pub id: String,
    /// Human readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None", setter(strip_option, into))]
    pub compartment: Option<String>,
}

impl Metabolite {
    /// Create a new metabolite from an id and a compartment tag
    pub fn new(id: &str, compartment: &str) -> Self {
        Metabolite {
            id: id.to_string(),
            name: None,
            compartment: Some(compartment.to_string()),
        }
    }
}

impl Hash for Metabolite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash by id
                             // If the metabolite has an associated compartment, also hash by that
        if let Some(ref compartment) = self.compartment {
            compartment.hash(state)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_metabolite() {
        let met = MetaboliteBuilder::default()
            .id("glc_e")
            .compartment("e")
            .build()
            .unwrap();
        assert_eq!(met.id, "glc_e");
        assert_eq!(met.compartment.as_deref(), Some("e"));
        assert!(met.name.is_none());
    }

    #[test]
    fn new_metabolite() {
        let met = Metabolite::new("atp_c", "c");
        assert_eq!(met.id, "atp_c");
        assert_eq!(met.compartment.as_deref(), Some("c"));
    }
}

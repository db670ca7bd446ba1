//! Global configuration shared across the crate
use std::sync::{LazyLock, RwLock};

/// Global configuration instance
///
/// Holds the crate wide defaults, such as the flux bounds applied to newly
/// created reactions and the numeric tolerance used when deciding whether an
/// import is active.
pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Default lower flux bound for new reactions
    pub lower_bound: f64,
    /// Default upper flux bound for new reactions
    pub upper_bound: f64,
    /// Numeric tolerance below which a flux magnitude is treated as zero
    pub tolerance: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-07,
        }
    }
}

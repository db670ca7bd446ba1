//! Core rust implementation of fluxrs, a crate for constraint based metabolic
//! network optimization and minimal growth medium computation.

pub mod configuration;
pub mod io;
pub mod medium;
pub mod metabolic_model;
pub mod optimize;

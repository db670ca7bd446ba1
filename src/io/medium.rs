//! JSON serialization of growth media
//!
//! A medium file is a single JSON object mapping exchange reaction ids to
//! maximal uptake rates, for example:
//!
//! ```json
//! {"EX_glc": 10.0, "EX_o2": 1000.0}
//! ```
//!
//! Reading a medium performs no model validation; unknown reaction ids are
//! only rejected once the medium is applied with
//! [`set_medium`](crate::medium::set_medium).
use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::io::IoError;

/// Parse a growth medium from a JSON string
pub fn medium_from_json_str(json_data: &str) -> Result<IndexMap<String, f64>, IoError> {
    Ok(serde_json::from_str(json_data)?)
}

/// Serialize a growth medium to a JSON string
pub fn medium_to_json_string(medium: &IndexMap<String, f64>) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(medium)?)
}

/// Read a growth medium from a JSON file
pub fn read_medium<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, f64>, IoError> {
    let json_data = fs::read_to_string(path)?;
    medium_from_json_str(&json_data)
}

/// Write a growth medium to a JSON file
pub fn write_medium<P: AsRef<Path>>(
    path: P,
    medium: &IndexMap<String, f64>,
) -> Result<(), IoError> {
    let json_data = medium_to_json_string(medium)?;
    fs::write(path, json_data)?;
    Ok(())
}

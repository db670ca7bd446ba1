//! Module for reading and writing growth media
pub mod medium;

use thiserror::Error;

/// Errors arising while reading or writing files
#[derive(Error, Debug)]
pub enum IoError {
    /// The underlying file could not be read or written
    #[error("io error: {0}")]
    File(#[from] std::io::Error),
    /// The data was not valid JSON of the expected shape
    #[error("deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

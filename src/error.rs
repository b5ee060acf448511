//! Error types for skyline query preparation and execution.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkylineError>;

#[derive(Debug, Error)]
pub enum SkylineError {
    /// The reference set is empty, so distances and the hull are undefined.
    #[error("no reference points supplied")]
    NoReferencePoints,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The spatial index violated its structural contract.
    #[error("malformed spatial index: {0}")]
    MalformedIndex(String),
}

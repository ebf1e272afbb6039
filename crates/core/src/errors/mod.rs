//! Error types and Result alias for the FitLedger workspace

use thiserror::Error;

/// Main error type for ledger and persistence operations.
///
/// Business rejections (insufficient points, already-claimed rewards)
/// are deliberately NOT represented here: they are ordinary outcomes
/// returned by the ledger operations, never errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

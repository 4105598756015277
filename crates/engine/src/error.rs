//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`MalformedInput`] thrown when an import payload cannot be parsed into rows.
//! - [`InvalidSnapshot`] thrown when a stored ledger breaks a ledger invariant.
//! - [`Storage`] thrown when the persistence backend fails.
//!
//! Skipped rows and unknown ids are not errors.
//!
//!  [`MalformedInput`]: EngineError::MalformedInput
//!  [`InvalidSnapshot`]: EngineError::InvalidSnapshot
//!  [`Storage`]: EngineError::Storage
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Export failure: {0}")]
    Export(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MalformedInput(a), Self::MalformedInput(b)) => a == b,
            (Self::InvalidSnapshot(a), Self::InvalidSnapshot(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

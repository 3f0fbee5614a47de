//! Custom error types for pocket-ledger
//!
//! The ledger has two failure families: input that should never have reached
//! the store, and a durable store that cannot be read or written. Everything
//! else (config, raw I/O, export) is plumbing around those two.

use thiserror::Error;

use crate::models::{MoneyParseError, TransactionValidationError};

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Rejected input: blank description, non-positive amount, bad month...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The durable key-value store is unreadable, unwritable or holds
    /// malformed data
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create an invalid-input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Check if this is an invalid-input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<MoneyParseError> for LedgerError {
    fn from(err: MoneyParseError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<TransactionValidationError> for LedgerError {
    fn from(err: TransactionValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

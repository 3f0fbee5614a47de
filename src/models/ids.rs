//! Transaction identifier
//!
//! Ids are random v4 UUIDs, so an id is never reused even after the
//! transaction it named has been removed or the ledger cleared.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "txn-";

/// Opaque, unique identifier of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form shown in listings (`txn-` + first 8 hex digits)
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }

    /// Check whether a user-typed reference names this id.
    ///
    /// Accepts the full UUID, or a prefix of its hex form with or without the
    /// `txn-` display prefix. Prefixes shorter than 4 characters never match.
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.trim();
        if let Ok(uuid) = Uuid::parse_str(reference) {
            return uuid == self.0;
        }

        let prefix = reference
            .strip_prefix(DISPLAY_PREFIX)
            .unwrap_or(reference)
            .to_ascii_lowercase();
        prefix.len() >= 4 && self.0.simple().to_string().starts_with(&prefix)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

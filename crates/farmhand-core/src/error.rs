//! Error types for Farmhand.

use thiserror::Error;

use crate::types::{CatalogKind, ItemId};

/// Main error type for Farmhand operations.
#[derive(Error, Debug, Clone)]
pub enum FarmhandError {
    /// The catalog has no record for the identifier.
    #[error("{kind} {id} not found in catalog")]
    NotFound { kind: CatalogKind, id: ItemId },

    /// The catalog could not be reached or answered with an error.
    #[error("Catalog lookup failed for {kind}: {message}")]
    LookupFailed { kind: CatalogKind, message: String },

    /// A fetched record lacks fields the planner needs.
    #[error("Malformed {kind} record: {reason}")]
    MalformedRecord {
        kind: CatalogKind,
        id: Option<ItemId>,
        reason: String,
    },

    /// A build request could not be parsed.
    #[error("Invalid build request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FarmhandError {
    /// Creates a malformed-record error for a known identifier.
    pub fn malformed(kind: CatalogKind, id: ItemId, reason: impl Into<String>) -> Self {
        FarmhandError::MalformedRecord {
            kind,
            id: Some(id),
            reason: reason.into(),
        }
    }

    /// Returns true if the catalog could not resolve an identifier or query.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            FarmhandError::NotFound { .. } | FarmhandError::LookupFailed { .. }
        )
    }

    /// Returns true if a fetched record was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FarmhandError::MalformedRecord { .. })
    }
}

/// Convenience Result type for Farmhand operations.
pub type Result<T> = std::result::Result<T, FarmhandError>;

impl From<serde_json::Error> for FarmhandError {
    fn from(err: serde_json::Error) -> Self {
        FarmhandError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let not_found = FarmhandError::NotFound {
            kind: CatalogKind::Weapon,
            id: 12,
        };
        assert!(not_found.is_lookup_failure());
        assert!(!not_found.is_malformed());

        let malformed = FarmhandError::malformed(CatalogKind::Armor, 3, "no materials");
        assert!(malformed.is_malformed());
        assert!(!malformed.is_lookup_failure());
    }

    #[test]
    fn test_error_display() {
        let err = FarmhandError::NotFound {
            kind: CatalogKind::Charm,
            id: 7,
        };
        assert_eq!(err.to_string(), "charm 7 not found in catalog");
    }
}

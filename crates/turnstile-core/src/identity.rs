//! # Ticket Identifiers
//!
//! The [`TicketId`] domain newtype. Identifiers are caller-supplied opaque
//! strings; the only format constraint the ledger imposes is non-emptiness,
//! enforced here at construction so a blank id cannot reach the ledger at
//! all. Comparison is case-sensitive exact match.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A globally unique ticket identifier.
///
/// # Validation
///
/// - Must be non-empty after trimming surrounding whitespace.
/// - No other format constraint: the ledger does not mandate an id scheme
///   beyond "non-empty, unique".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(String);

impl TicketId {
    /// Create a ticket identifier from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTicketId`] if the string is empty or
    /// whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyTicketId);
        }
        Ok(Self(s))
    }

    /// Generate a fresh 8-character lowercase hex identifier.
    ///
    /// Convenience for callers without their own id scheme: the first eight
    /// hex characters of a UUIDv4, matching the issuing front end this
    /// ledger was built for. Collisions are possible at scale; the ledger's
    /// uniqueness check is the authority either way.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex[..8].to_string())
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

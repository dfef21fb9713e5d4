//! # Error Hierarchy
//!
//! Structured error types for the foundational layer, built with `thiserror`.
//! Every failure in this crate is a per-call rejection carrying enough
//! context to diagnose the bad input; nothing here panics.

use thiserror::Error;

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be integers or strings.
    #[error("float values are not permitted in canonical representations; use an integer or string amount: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticket identifier is blank (empty or whitespace only).
    #[error("invalid ticket ID: must be non-empty")]
    EmptyTicketId,
}

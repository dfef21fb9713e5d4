#![deny(missing_docs)]

//! # turnstile-core — Foundational Types for the Turnstile Ticket Ledger
//!
//! This crate defines the types the ledger engine is built on. It has no
//! internal crate dependencies — only `serde`, `serde_json`, `serde_jcs`,
//! `thiserror`, `chrono`, `uuid`, and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`CanonicalBytes`] is the sole path to digest computation.** Every
//!    block digest in the ledger flows through `CanonicalBytes::new()`, which
//!    coerces the value and serializes it in RFC 8785 canonical form. Two
//!    code paths that serialize the same block differently cannot exist.
//!
//! 2. **Newtype wrappers for domain primitives.** A [`TicketId`] is a
//!    distinct type, validated non-empty at construction. You cannot hand the
//!    ledger a blank identifier.
//!
//! 3. **UTC-only time.** [`Timestamp`] stores UTC and canonicalizes to second
//!    precision with a `Z` suffix so that digest computation is deterministic.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::TicketId;
pub use temporal::Timestamp;

//! # Blocks
//!
//! An immutable, sealed group of tickets plus linkage and proof metadata.
//! Blocks are created exactly once, at finalization time, by the ledger and
//! never mutated afterwards. Each block's `previous_hash` is the content
//! digest of its predecessor; the genesis block carries a fixed sentinel
//! instead.

use serde::{Deserialize, Serialize};
use turnstile_core::{sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest, TicketId, Timestamp};

use crate::ticket::Ticket;

/// Index of the genesis block. Chain indices are 1-based and contiguous.
pub const GENESIS_INDEX: u64 = 1;

/// Fixed proof value of the genesis block. Not a solved proof; the first
/// real proof-of-work search runs against this value.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel `previous_hash` of the genesis block, which has no predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A sealed group of tickets with chain linkage and proof metadata.
///
/// ## Integrity Invariant
///
/// For every non-genesis block, `previous_hash` equals the content digest of
/// the immediately preceding block, and `proof` satisfies the proof-of-work
/// predicate against the preceding block's proof. The ledger enforces this
/// at construction; [`crate::Ledger::verify_chain`] re-checks it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain: 1-based, strictly increasing, contiguous.
    pub index: u64,
    /// When the block was sealed.
    pub timestamp: Timestamp,
    /// The tickets sealed into this block, in admission order. May be empty.
    pub tickets: Vec<Ticket>,
    /// Proof-of-work solution relative to the previous block's proof.
    pub proof: u64,
    /// Content digest of the previous block (64 lowercase hex chars), or
    /// [`GENESIS_PREVIOUS_HASH`] for the genesis block.
    pub previous_hash: String,
}

impl Block {
    /// Construct the genesis block: index 1, fixed proof, sentinel link,
    /// no tickets.
    pub(crate) fn genesis() -> Self {
        Self {
            index: GENESIS_INDEX,
            timestamp: Timestamp::now(),
            tickets: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// Whether this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    /// Find a ticket in this block by id.
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.ticket_id == id)
    }

    /// Compute the canonical content digest of this block.
    ///
    /// All fields participate, including the ticket list. Equal logical
    /// content always yields the same digest: serialization flows through
    /// [`CanonicalBytes`], which sorts keys and normalizes timestamps.
    ///
    /// # Errors
    ///
    /// Canonicalization of a well-formed block cannot fail (no floats, no
    /// fallible serializers); the error path exists because the pipeline is
    /// typed as fallible.
    pub fn content_digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }
}

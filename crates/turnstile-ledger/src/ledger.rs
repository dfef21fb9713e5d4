//! # The Ledger
//!
//! The ordered chain of finalized blocks plus the mutable pending batch.
//! One state machine with four operations: admit a ticket, seal the batch
//! into a block, look a ticket up, read the tip. Construction runs genesis
//! exactly once, so the chain is never empty.
//!
//! ## Integrity Model
//!
//! 1. Every admitted ticket id is recorded in the [`TicketRegistry`]; a
//!    duplicate submission is rejected with no mutation.
//! 2. Finalization solves proof-of-work against the tip's proof, digests the
//!    tip through the canonical pipeline, and seals a new block whose
//!    `previous_hash` is that digest. The pending batch is swapped out
//!    atomically, not copied and re-cleared.
//! 3. [`Ledger::verify_chain`] re-checks the whole chain on demand: index
//!    contiguity, link digests, and proof validity each have a typed error.

use std::mem;
use std::sync::Arc;

use thiserror::Error;
use turnstile_core::{CanonicalizationError, TicketId, Timestamp, ValidationError};

use crate::block::{Block, GENESIS_INDEX, GENESIS_PREVIOUS_HASH};
use crate::pow::{HashcashPow, ProofOfWork};
use crate::registry::TicketRegistry;
use crate::ticket::Ticket;

/// Errors raised by ledger operations.
///
/// Every variant is a recoverable per-call rejection; the ledger has no
/// fatal error class.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The submitted ticket's id already exists in the chain or the pending
    /// batch. The ledger was not mutated.
    #[error("duplicate ticket ID \"{ticket_id}\": already admitted to the ledger")]
    DuplicateTicketId {
        /// The rejected identifier.
        ticket_id: TicketId,
    },

    /// Identifier validation failure surfaced through the ledger taxonomy.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Canonicalization failed while digesting a block. Unreachable for
    /// well-formed blocks.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The first block is not a well-formed genesis block.
    #[error("bad genesis block: {reason}")]
    BadGenesis {
        /// What was wrong with it.
        reason: String,
    },

    /// Block indices are not contiguous.
    #[error("chain index gap: expected {expected}, found {actual}")]
    IndexGap {
        /// The index the position demands.
        expected: u64,
        /// The index actually stored.
        actual: u64,
    },

    /// A block's `previous_hash` does not match its predecessor's digest.
    #[error("link mismatch at block {index}: expected {expected}, found {actual}")]
    LinkMismatch {
        /// Index of the block with the bad link.
        index: u64,
        /// The predecessor's actual digest.
        expected: String,
        /// The `previous_hash` the block carries.
        actual: String,
    },

    /// A block's proof fails the proof-of-work predicate against its
    /// predecessor's proof.
    #[error("invalid proof at block {index}")]
    InvalidProof {
        /// Index of the offending block.
        index: u64,
    },
}

/// The ticket ledger: finalized chain plus pending batch.
///
/// Exactly one instance owns the state; all operations take `&mut self` or
/// `&self` and are serialized by Rust's borrow rules. For multi-threaded
/// embeddings, wrap it in [`crate::SharedLedger`].
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Ticket>,
    registry: TicketRegistry,
    pow: Arc<dyn ProofOfWork>,
}

impl Ledger {
    /// Create a ledger with the standard hashcash gate and seal the genesis
    /// block as block 1.
    pub fn new() -> Self {
        Self::with_proof_of_work(Arc::new(HashcashPow::default()))
    }

    /// Create a ledger with a custom finalization gate.
    pub fn with_proof_of_work(pow: Arc<dyn ProofOfWork>) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            registry: TicketRegistry::new(),
            pow,
        }
    }

    /// A shared handle to this ledger's finalization gate.
    pub fn proof_of_work(&self) -> Arc<dyn ProofOfWork> {
        Arc::clone(&self.pow)
    }

    /// Admit a ticket into the pending batch.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateTicketId`] if the id already exists
    /// anywhere in the chain or the pending batch (case-sensitive exact
    /// match). On rejection the ledger is unchanged.
    pub fn submit_ticket(&mut self, ticket: Ticket) -> Result<(), LedgerError> {
        if self.registry.contains(&ticket.ticket_id) {
            tracing::warn!(ticket_id = %ticket.ticket_id, "duplicate ticket ID rejected");
            return Err(LedgerError::DuplicateTicketId {
                ticket_id: ticket.ticket_id,
            });
        }
        self.registry.admit(ticket.ticket_id.clone());
        tracing::debug!(
            ticket_id = %ticket.ticket_id,
            event = %ticket.event_name,
            pending = self.pending.len() + 1,
            "ticket admitted to pending batch"
        );
        self.pending.push(ticket);
        Ok(())
    }

    /// Seal the pending batch into a new block and append it to the chain.
    ///
    /// Solves proof-of-work against the tip's proof (a blocking search; see
    /// [`ProofOfWork::solve`]), digests the tip, and seals. The pending
    /// batch is swapped out atomically; finalizing an empty batch is legal
    /// and produces an empty block. Returns a copy of the sealed block.
    ///
    /// # Errors
    ///
    /// Only canonicalization can fail, and it cannot occur for well-formed
    /// blocks.
    pub fn finalize_block(&mut self) -> Result<Block, LedgerError> {
        let proof = self.pow.solve(self.last_block().proof);
        self.seal_block(proof)
    }

    /// Seal the pending batch with an already-solved proof.
    ///
    /// Split out of [`Ledger::finalize_block`] so that
    /// [`crate::SharedLedger`] can run the search without holding the lock.
    /// The caller is responsible for having solved against the current tip.
    pub(crate) fn seal_block(&mut self, proof: u64) -> Result<Block, LedgerError> {
        let tip = self.last_block();
        let previous_hash = tip.content_digest()?.to_hex();
        let block = Block {
            index: tip.index + 1,
            timestamp: Timestamp::now(),
            tickets: mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        tracing::info!(
            index = block.index,
            tickets = block.tickets.len(),
            proof = block.proof,
            "block sealed"
        );
        self.chain.push(block.clone());
        Ok(block)
    }

    /// Find a ticket by id, finalized or pending.
    ///
    /// Scans finalized blocks first, then the pending batch; callers cannot
    /// tell from the result whether the ticket has been sealed yet.
    pub fn lookup_ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.chain
            .iter()
            .flat_map(|block| block.tickets.iter())
            .chain(self.pending.iter())
            .find(|ticket| &ticket.ticket_id == id)
    }

    /// The most recently appended block. Always exists: genesis is sealed at
    /// construction.
    pub fn last_block(&self) -> &Block {
        self.chain.last().expect("chain contains genesis")
    }

    /// The full chain of finalized blocks, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Tickets admitted but not yet sealed into a block, in admission order.
    pub fn pending_tickets(&self) -> &[Ticket] {
        &self.pending
    }

    /// Number of distinct tickets ever admitted (finalized plus pending).
    pub fn ticket_count(&self) -> usize {
        self.registry.len()
    }

    /// Audit the whole chain: genesis shape, index contiguity, link digests,
    /// and proof validity.
    ///
    /// # Errors
    ///
    /// The first violation found is returned as its typed variant. A ledger
    /// mutated only through its own operations always passes.
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        let genesis = match self.chain.first() {
            Some(block) => block,
            None => {
                return Err(LedgerError::BadGenesis {
                    reason: "chain is empty".to_string(),
                })
            }
        };
        if genesis.index != GENESIS_INDEX {
            return Err(LedgerError::BadGenesis {
                reason: format!("index {} is not {GENESIS_INDEX}", genesis.index),
            });
        }
        if genesis.previous_hash != GENESIS_PREVIOUS_HASH {
            return Err(LedgerError::BadGenesis {
                reason: format!(
                    "previous_hash \"{}\" is not the sentinel \"{GENESIS_PREVIOUS_HASH}\"",
                    genesis.previous_hash
                ),
            });
        }

        for pair in self.chain.windows(2) {
            let (prev, block) = (&pair[0], &pair[1]);
            if block.index != prev.index + 1 {
                return Err(LedgerError::IndexGap {
                    expected: prev.index + 1,
                    actual: block.index,
                });
            }
            let expected_link = prev.content_digest()?.to_hex();
            if block.previous_hash != expected_link {
                return Err(LedgerError::LinkMismatch {
                    index: block.index,
                    expected: expected_link,
                    actual: block.previous_hash.clone(),
                });
            }
            if !self.pow.check(prev.proof, block.proof) {
                return Err(LedgerError::InvalidProof { index: block.index });
            }
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("blocks", &self.chain.len())
            .field("pending", &self.pending.len())
            .field("tickets", &self.registry.len())
            .finish()
    }
}

//! # Shared Ledger Handle
//!
//! A `Clone`-able, thread-safe handle over a single [`Ledger`]. All state
//! sits behind one `parking_lot::Mutex`, so submissions and finalizations
//! are serialized: two submissions can never both pass the uniqueness check
//! for the same id, and finalization snapshots a batch no one else is
//! mutating.
//!
//! The proof-of-work search is the one long-running operation, and it does
//! not need the state at all — only the tip's proof value. So
//! [`SharedLedger::finalize_block`] reads the tip under the lock, releases
//! it for the whole search, and reacquires it to seal. Submissions stay
//! responsive for the full search duration.

use std::sync::Arc;

use parking_lot::Mutex;
use turnstile_core::TicketId;

use crate::block::Block;
use crate::ledger::{Ledger, LedgerError};
use crate::pow::ProofOfWork;
use crate::ticket::Ticket;

/// Thread-safe handle to a ledger. Cheap to clone; all clones share the
/// same underlying state.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
    pow: Arc<dyn ProofOfWork>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use.
    pub fn new(ledger: Ledger) -> Self {
        let pow = ledger.proof_of_work();
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            pow,
        }
    }

    /// Admit a ticket into the pending batch. See
    /// [`Ledger::submit_ticket`].
    pub fn submit_ticket(&self, ticket: Ticket) -> Result<(), LedgerError> {
        self.inner.lock().submit_ticket(ticket)
    }

    /// Find a ticket by id, finalized or pending. Returns an owned copy.
    pub fn lookup_ticket(&self, id: &TicketId) -> Option<Ticket> {
        self.inner.lock().lookup_ticket(id).cloned()
    }

    /// A copy of the most recently appended block.
    pub fn last_block(&self) -> Block {
        self.inner.lock().last_block().clone()
    }

    /// Number of finalized blocks, genesis included.
    pub fn chain_len(&self) -> usize {
        self.inner.lock().chain().len()
    }

    /// Number of tickets admitted but not yet sealed.
    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending_tickets().len()
    }

    /// A copy of the full chain, genesis first.
    pub fn chain_snapshot(&self) -> Vec<Block> {
        self.inner.lock().chain().to_vec()
    }

    /// Audit the whole chain. See [`Ledger::verify_chain`].
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        self.inner.lock().verify_chain()
    }

    /// Seal the pending batch into a new block without blocking submissions
    /// for the duration of the proof-of-work search.
    ///
    /// Snapshots the tip's index and proof under the lock, solves with the
    /// lock released, then reacquires the lock to seal. If another
    /// finalization advanced the chain during the search, the stale solution
    /// is discarded and the search reruns against the new tip.
    pub fn finalize_block(&self) -> Result<Block, LedgerError> {
        let (mut tip_index, mut tip_proof) = {
            let guard = self.inner.lock();
            let tip = guard.last_block();
            (tip.index, tip.proof)
        };

        loop {
            let proof = self.pow.solve(tip_proof);

            let mut guard = self.inner.lock();
            let (current_index, current_proof) = {
                let tip = guard.last_block();
                (tip.index, tip.proof)
            };
            if current_index == tip_index {
                return guard.seal_block(proof);
            }
            // The tip moved while we were searching; solve against it.
            tracing::debug!(
                stale_index = tip_index,
                current_index,
                "chain advanced during proof-of-work search, retrying"
            );
            tip_index = current_index;
            tip_proof = current_proof;
        }
    }
}

impl std::fmt::Debug for SharedLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLedger")
            .field("ledger", &*self.inner.lock())
            .finish()
    }
}

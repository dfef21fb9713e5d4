#![deny(missing_docs)]

//! # turnstile-ledger — The Turnstile Ticket Ledger Engine
//!
//! An append-only ledger for event tickets with blockchain semantics:
//! tickets are admitted into a pending batch, batches are sealed into
//! hash-chained blocks, and a hashcash proof-of-work search gates each
//! finalization.
//!
//! ## Scope
//!
//! Single process, in-memory, no peers. The proof of work is a simulated
//! throttle, not a trust mechanism. The ledger returns plain data records;
//! rendering (currency symbols, QR codes) belongs to the caller.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use turnstile_core::TicketId;
//! use turnstile_ledger::{Ledger, NullPow, Ticket};
//!
//! let mut ledger = Ledger::with_proof_of_work(Arc::new(NullPow));
//! let ticket = Ticket::new(TicketId::new("A1")?, "Alice", "Concert", 1500);
//! ledger.submit_ticket(ticket)?;
//!
//! let block = ledger.finalize_block()?;
//! assert_eq!(block.index, 2);
//! assert!(ledger.lookup_ticket(&TicketId::new("A1")?).is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For multi-threaded embeddings, wrap the ledger in a [`SharedLedger`]:
//! submissions stay responsive while a finalization runs the proof-of-work
//! search off the lock.

pub mod block;
pub mod ledger;
pub mod pow;
pub mod registry;
pub mod shared;
pub mod ticket;

// Re-export primary types at crate root for ergonomic imports.
pub use block::{Block, GENESIS_INDEX, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
pub use ledger::{Ledger, LedgerError};
pub use pow::{HashcashPow, NullPow, ProofOfWork};
pub use registry::TicketRegistry;
pub use shared::SharedLedger;
pub use ticket::Ticket;

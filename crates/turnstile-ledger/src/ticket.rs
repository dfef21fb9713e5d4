//! # Ticket Records
//!
//! The immutable [`Ticket`] record. Tickets are created by the caller at
//! submission time and never mutated; they are destroyed only with the
//! owning block or batch. Holder name, event name, and price are opaque to
//! the ledger — this layer deliberately validates nothing beyond the
//! identifier, matching the trust model of the issuing front end.

use serde::{Deserialize, Serialize};
use turnstile_core::TicketId;

/// An issued event ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Globally unique identifier, caller-supplied or generated.
    pub ticket_id: TicketId,
    /// Name of the ticket holder.
    pub holder_name: String,
    /// Name of the event the ticket admits to.
    pub event_name: String,
    /// Price in whole currency units. Opaque to the ledger; price
    /// integrity against a catalog is the caller's concern.
    pub price: u64,
}

impl Ticket {
    /// Create a ticket record.
    pub fn new(
        ticket_id: TicketId,
        holder_name: impl Into<String>,
        event_name: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            ticket_id,
            holder_name: holder_name.into(),
            event_name: event_name.into(),
            price,
        }
    }
}

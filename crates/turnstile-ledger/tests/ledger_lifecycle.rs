//! End-to-end lifecycle of the ticket ledger: admission, duplicate
//! rejection, lookup across the pending/finalized boundary, proof-of-work
//! gated sealing, and full-chain audit.

use std::sync::Arc;

use turnstile_core::TicketId;
use turnstile_ledger::{
    HashcashPow, Ledger, LedgerError, NullPow, ProofOfWork, Ticket, GENESIS_INDEX,
    GENESIS_PREVIOUS_HASH,
};

fn ticket(id: &str, holder: &str, event: &str, price: u64) -> Ticket {
    Ticket::new(TicketId::new(id).unwrap(), holder, event, price)
}

/// The canonical acceptance scenario, run against the standard gate.
#[test]
fn book_verify_finalize_verify() {
    let mut ledger = Ledger::new();

    // Fresh ledger: exactly the genesis block.
    assert_eq!(ledger.chain().len(), 1);
    assert_eq!(ledger.last_block().index, GENESIS_INDEX);
    assert_eq!(ledger.last_block().previous_hash, GENESIS_PREVIOUS_HASH);
    assert!(ledger.last_block().tickets.is_empty());

    // Book a ticket.
    ledger
        .submit_ticket(ticket("A1", "Alice", "Concert", 1500))
        .unwrap();

    // Booking the same id again fails and changes nothing.
    let err = ledger
        .submit_ticket(ticket("A1", "Mallory", "Concert", 1500))
        .unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateTicketId { .. }));
    assert_eq!(ledger.chain().len(), 1);
    assert_eq!(ledger.pending_tickets().len(), 1);

    // The ticket verifies while still pending.
    let id = TicketId::new("A1").unwrap();
    let found = ledger.lookup_ticket(&id).unwrap();
    assert_eq!(found.holder_name, "Alice");

    // Finalize: block 2 carries the ticket, the batch drains.
    let block = ledger.finalize_block().unwrap();
    assert_eq!(block.index, 2);
    assert_eq!(block.tickets.len(), 1);
    assert_eq!(block.tickets[0].ticket_id, id);
    assert!(ledger.pending_tickets().is_empty());

    // The ticket still verifies, now from the finalized chain.
    let found = ledger.lookup_ticket(&id).unwrap();
    assert_eq!(found.price, 1500);

    // The sealed proof satisfies the gate against the genesis proof.
    let pow = ledger.proof_of_work();
    let chain = ledger.chain();
    assert!(pow.check(chain[0].proof, chain[1].proof));

    ledger.verify_chain().unwrap();
}

#[test]
fn multi_block_history_stays_contiguous() {
    let mut ledger = Ledger::with_proof_of_work(Arc::new(HashcashPow::new(2)));

    for round in 0..4u64 {
        for seat in 0..3u64 {
            ledger
                .submit_ticket(ticket(
                    &format!("r{round}-s{seat}"),
                    "Holder",
                    "Festival",
                    200 + seat,
                ))
                .unwrap();
        }
        ledger.finalize_block().unwrap();
    }

    let chain = ledger.chain();
    assert_eq!(chain.len(), 5);
    for (position, block) in chain.iter().enumerate() {
        assert_eq!(block.index, position as u64 + 1);
    }
    for pair in chain.windows(2) {
        assert_eq!(
            pair[1].previous_hash,
            pair[0].content_digest().unwrap().to_hex()
        );
    }
    ledger.verify_chain().unwrap();
    assert_eq!(ledger.ticket_count(), 12);
}

#[test]
fn sealed_proofs_are_minimal() {
    let pow = HashcashPow::new(2);
    let mut ledger = Ledger::with_proof_of_work(Arc::new(pow));
    ledger.finalize_block().unwrap();

    let chain = ledger.chain();
    let (previous, sealed) = (chain[0].proof, chain[1].proof);
    for candidate in 0..sealed {
        assert!(!pow.check(previous, candidate));
    }
    assert!(pow.check(previous, sealed));
}

#[test]
fn duplicate_check_spans_blocks_and_batch() {
    let mut ledger = Ledger::with_proof_of_work(Arc::new(NullPow));

    ledger.submit_ticket(ticket("A1", "Alice", "Concert", 10)).unwrap();
    ledger.finalize_block().unwrap();
    ledger.submit_ticket(ticket("B2", "Bob", "Concert", 10)).unwrap();

    // Duplicate of a finalized ticket.
    assert!(ledger.submit_ticket(ticket("A1", "Eve", "Concert", 10)).is_err());
    // Duplicate of a pending ticket.
    assert!(ledger.submit_ticket(ticket("B2", "Eve", "Concert", 10)).is_err());
    // A fresh id is still welcome.
    ledger.submit_ticket(ticket("C3", "Carol", "Concert", 10)).unwrap();
}

#[test]
fn empty_finalizations_chain_cleanly() {
    let mut ledger = Ledger::with_proof_of_work(Arc::new(NullPow));
    for expected_index in 2..=6u64 {
        let block = ledger.finalize_block().unwrap();
        assert_eq!(block.index, expected_index);
        assert!(block.tickets.is_empty());
    }
    ledger.verify_chain().unwrap();
}

#[test]
fn generated_ids_flow_through_the_ledger() {
    let mut ledger = Ledger::with_proof_of_work(Arc::new(NullPow));
    let id = TicketId::generate();
    ledger
        .submit_ticket(Ticket::new(id.clone(), "Walk-up", "Matinee", 50))
        .unwrap();
    ledger.finalize_block().unwrap();
    assert_eq!(ledger.lookup_ticket(&id).unwrap().event_name, "Matinee");
}

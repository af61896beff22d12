//! Repository layer over persistence slots.
//!
//! # Responsibility
//! - Define the record store contract used by services and presenters.
//! - Hide the collection encoding from every caller.
//!
//! # Invariants
//! - Writes call `Book::validate()` before touching the slot.
//! - Reads reject malformed persisted state instead of masking it.

pub mod book_repo;

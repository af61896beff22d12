//! Presentation sync between user intents and the record store.
//!
//! # Responsibility
//! - Define the view, form and notification surfaces hosts implement.
//! - Reflect store contents into a view and route add/delete intents.
//!
//! # Invariants
//! - The presenter holds no book state of its own; the store is authoritative.
//! - At most one notification is active at a time.

pub mod notification;
pub mod presenter;
pub mod view;

//! Flutter-facing bindings for the book list core.

pub mod api;

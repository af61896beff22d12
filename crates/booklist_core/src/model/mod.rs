//! Book list domain model.
//!
//! # Responsibility
//! - Define the record shape persisted in the book slot.
//! - Own field-level validation shared by store and presentation layers.
//!
//! # Invariants
//! - A book has no identity beyond its title; duplicates are allowed.

pub mod book;

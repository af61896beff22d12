//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record store calls into use-case level APIs.
//! - Keep presenter and FFI layers decoupled from slot details.

pub mod book_service;

//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory note list and its mutation rules.
//! - Keep panels decoupled from storage details.

pub mod note_store;

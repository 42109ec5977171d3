//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value contract and its SQLite/in-memory backends.
//! - Map the note list and selection pointer onto key-value entries.
//!
//! # Invariants
//! - Keys are written independently; there is no cross-key transaction.
//! - Malformed persisted values never abort a load.

pub mod kv_repo;
pub mod note_state_repo;

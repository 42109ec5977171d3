//! Domain model for the note list.
//!
//! # Responsibility
//! - Define the persisted note record and its JSON shape.
//! - Own the display-order policy shared by store and panels.
//!
//! # Invariants
//! - Every note is identified by an immutable, list-unique `NoteId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod note;
